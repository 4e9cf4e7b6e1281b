//! three.js `BufferGeometry` JSON
//!
//! The layout is what `THREE.BufferGeometryLoader` parses: indexed triangles
//! with `position` and `normal` attributes.

use crate::Result;
use crate::mesh::{Mesh, Vertex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;

const FORMAT_VERSION: f32 = 4.5;
const GENERATOR: &str = "flatpack";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub version: f32,
    #[serde(rename = "type")]
    pub kind: String,
    pub generator: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub item_size: u32,
    #[serde(rename = "type")]
    pub array_type: String,
    pub array: Vec<f32>,
    pub normalized: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    #[serde(rename = "type")]
    pub array_type: String,
    pub array: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryData {
    pub attributes: BTreeMap<String, Attribute>,
    pub index: Index,
}

/// A whole `BufferGeometry` document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferGeometryJson {
    pub metadata: Metadata,
    #[serde(rename = "type")]
    pub kind: String,
    pub data: GeometryData,
}

impl BufferGeometryJson {
    pub fn from_mesh(mesh: &Mesh) -> Self {
        // Vertex is repr(C) [position; normal], six floats apiece
        let interleaved: &[f32] = bytemuck::cast_slice(&mesh.vertices);
        let stride = std::mem::size_of::<Vertex>() / std::mem::size_of::<f32>();

        let mut position = Vec::with_capacity(mesh.vertex_count() * 3);
        let mut normal = Vec::with_capacity(mesh.vertex_count() * 3);
        for vertex in interleaved.chunks_exact(stride) {
            position.extend_from_slice(&vertex[..3]);
            normal.extend_from_slice(&vertex[3..]);
        }

        let attributes = BTreeMap::from([
            ("position".to_string(), float_attribute(position)),
            ("normal".to_string(), float_attribute(normal)),
        ]);

        Self {
            metadata: Metadata {
                version: FORMAT_VERSION,
                kind: "BufferGeometry".to_string(),
                generator: GENERATOR.to_string(),
            },
            kind: "BufferGeometry".to_string(),
            data: GeometryData {
                attributes,
                index: Index {
                    array_type: "Uint32Array".to_string(),
                    array: mesh.indices.clone(),
                },
            },
        }
    }
}

fn float_attribute(array: Vec<f32>) -> Attribute {
    Attribute {
        item_size: 3,
        array_type: "Float32Array".to_string(),
        array,
        normalized: false,
    }
}

/// Write a mesh as a three.js `BufferGeometry` document
pub fn write_threejs<W: Write>(mesh: &Mesh, writer: &mut W) -> Result<()> {
    serde_json::to_writer(&mut *writer, &BufferGeometryJson::from_mesh(mesh))?;
    writer.flush()?;
    Ok(())
}
