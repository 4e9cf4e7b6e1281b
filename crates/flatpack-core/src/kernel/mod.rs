//! The boundary to a solid-modeling kernel
//!
//! Layout and composition only ever produce boxes and translations, so that
//! is all a kernel has to offer. [`BoxKernel`] is the built-in one: it keeps
//! solids as axis-aligned boxes and writes meshes and STEP files itself.

use crate::assembly::Assembly;
use crate::export::{StepSolid, write_obj, write_step, write_threejs};
use crate::geometry::{Aabb, Dimensions, PieceKind};
use crate::mesh::{Mesh, TessellationConfig};
use crate::{Error, Result};
use glam::DVec3;
use tracing::debug;

/// Operations the layout pipeline needs from a geometry kernel
pub trait Kernel {
    type Solid;
    type Compound;

    /// A box of `dims` with its minimum corner at the origin
    fn make_box(&mut self, kind: PieceKind, dims: Dimensions) -> Result<Self::Solid>;

    fn translate(&mut self, solid: Self::Solid, offset: DVec3) -> Self::Solid;

    fn group(&mut self, name: &str, solids: Vec<Self::Solid>) -> Self::Compound;

    /// Tessellated interchange bytes for display
    fn export_mesh(&self, compound: &Self::Compound) -> Result<Vec<u8>>;

    /// CAD interchange bytes
    fn export_cad(&self, _compound: &Self::Compound) -> Result<Vec<u8>> {
        Err(Error::Unsupported("CAD export".to_string()))
    }
}

/// Build every primitive of `assembly` as a kernel solid and group them
pub fn materialize<K: Kernel>(kernel: &mut K, assembly: &Assembly) -> Result<K::Compound> {
    let mut solids = Vec::with_capacity(assembly.len());
    for primitive in assembly.iter() {
        let solid = kernel.make_box(primitive.kind, primitive.dims)?;
        solids.push(kernel.translate(solid, primitive.offset));
    }
    debug!(assembly = assembly.name(), solids = solids.len(), "materialized");
    Ok(kernel.group(assembly.name(), solids))
}

/// A solid of the built-in kernel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSolid {
    pub kind: PieceKind,
    pub bounds: Aabb,
}

/// A named group of box solids
#[derive(Debug, Clone, PartialEq)]
pub struct BoxCompound {
    pub name: String,
    pub solids: Vec<BoxSolid>,
}

impl BoxCompound {
    pub fn to_mesh(&self, config: &TessellationConfig) -> Result<Mesh> {
        let mut mesh = Mesh::new();
        for solid in &self.solids {
            mesh.merge(&Mesh::cuboid(solid.bounds.min, size_of(&solid.bounds), config)?)?;
        }
        Ok(mesh)
    }

    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::enclosing(self.solids.iter().map(|s| &s.bounds))
    }
}

fn size_of(bounds: &Aabb) -> Dimensions {
    let size = bounds.size();
    Dimensions::new(size.x, size.y, size.z)
}

/// Mesh flavor written by [`BoxKernel::export_mesh`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeshEncoding {
    #[default]
    ThreeJs,
    Obj,
}

/// Kernel that keeps every solid as an axis-aligned box
#[derive(Debug, Clone, Default)]
pub struct BoxKernel {
    pub tessellation: TessellationConfig,
    pub encoding: MeshEncoding,
}

impl BoxKernel {
    pub fn new(tessellation: TessellationConfig) -> Self {
        Self {
            tessellation,
            encoding: MeshEncoding::default(),
        }
    }

    pub fn with_encoding(mut self, encoding: MeshEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Write an already tessellated mesh in this kernel's encoding
    pub fn encode_mesh(&self, mesh: &Mesh) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        match self.encoding {
            MeshEncoding::ThreeJs => write_threejs(mesh, &mut out)?,
            MeshEncoding::Obj => write_obj(mesh, &mut out)?,
        }
        Ok(out)
    }
}

impl Kernel for BoxKernel {
    type Solid = BoxSolid;
    type Compound = BoxCompound;

    fn make_box(&mut self, kind: PieceKind, dims: Dimensions) -> Result<BoxSolid> {
        if !dims.is_solid() {
            return Err(Error::InvalidSpec {
                quantity: "box dimensions",
                value: dims.length.min(dims.width).min(dims.height),
                requirement: "> 0",
            });
        }
        Ok(BoxSolid {
            kind,
            bounds: Aabb::from_origin(DVec3::ZERO, dims),
        })
    }

    fn translate(&mut self, solid: BoxSolid, offset: DVec3) -> BoxSolid {
        BoxSolid {
            bounds: solid.bounds.translate(offset),
            ..solid
        }
    }

    fn group(&mut self, name: &str, solids: Vec<BoxSolid>) -> BoxCompound {
        BoxCompound {
            name: name.to_string(),
            solids,
        }
    }

    fn export_mesh(&self, compound: &BoxCompound) -> Result<Vec<u8>> {
        let mesh = compound.to_mesh(&self.tessellation)?;
        debug!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "tessellated"
        );
        self.encode_mesh(&mesh)
    }

    fn export_cad(&self, compound: &BoxCompound) -> Result<Vec<u8>> {
        let solids: Vec<StepSolid> = compound
            .solids
            .iter()
            .map(|solid| StepSolid {
                name: solid.kind.label().to_string(),
                bounds: solid.bounds,
            })
            .collect();
        let mut out = Vec::new();
        write_step(&compound.name, &solids, &mut out)?;
        Ok(out)
    }
}
