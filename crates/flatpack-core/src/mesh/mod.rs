//! Triangle meshes tessellated from axis-aligned boxes
//!
//! Every face of a box gets its own vertices so normals stay flat. A face is
//! two triangles unless [`TessellationConfig::max_edge`] asks for a finer
//! grid.

use crate::geometry::{Aabb, BoxFace, Dimensions};
use crate::{Error, Result};
use glam::{DVec3, Vec3};

/// Most vertices one mesh may hold
pub const MAX_VERTICES: usize = 1 << 24;

/// Most grid cells along one edge of a face
const MAX_SEGMENTS: u32 = 4096;

/// A vertex with position and normal
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

/// A triangle mesh
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// Configuration for box tessellation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TessellationConfig {
    /// Longest allowed triangle edge along a face axis; `None` keeps every
    /// face at two triangles
    pub max_edge: Option<f64>,
}

impl TessellationConfig {
    pub fn with_max_edge(mut self, max_edge: f64) -> Self {
        self.max_edge = Some(max_edge);
        self
    }

    /// Number of grid cells needed along an edge of `extent`
    fn segments(&self, extent: f64) -> Result<u32> {
        let Some(max) = self.max_edge else {
            return Ok(1);
        };
        if !(max.is_finite() && max > 0.0) {
            return Err(Error::InvalidSpec {
                quantity: "max_edge",
                value: max,
                requirement: "finite and > 0",
            });
        }
        let cells = (extent / max).ceil().max(1.0);
        if cells > f64::from(MAX_SEGMENTS) {
            return Err(too_fine(max));
        }
        Ok(cells as u32)
    }
}

fn too_fine(max_edge: f64) -> Error {
    Error::InvalidSpec {
        quantity: "max_edge",
        value: max_edge,
        requirement: "coarse enough for at most 4096 cells per edge and 16777216 vertices per mesh",
    }
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Tessellate the box spanned by `dims` with its minimum corner at `origin`.
    ///
    /// Fails when `config` asks for more than [`MAX_VERTICES`].
    pub fn cuboid(origin: DVec3, dims: Dimensions, config: &TessellationConfig) -> Result<Self> {
        let mut mesh = Self::new();
        for face in &Aabb::from_origin(origin, dims).faces() {
            mesh.push_face(face, config)?;
        }
        Ok(mesh)
    }

    fn push_face(&mut self, face: &BoxFace, config: &TessellationConfig) -> Result<()> {
        let nu = config.segments(face.u.length())?;
        let nv = config.segments(face.v.length())?;
        let face_vertices = (nu as usize + 1) * (nv as usize + 1);
        if self.vertices.len() + face_vertices > MAX_VERTICES {
            return Err(too_fine(config.max_edge.unwrap_or(f64::INFINITY)));
        }

        let normal = face.normal().as_vec3();
        let base = self.vertices.len() as u32;

        for j in 0..=nv {
            for i in 0..=nu {
                let p = face.origin
                    + face.u * (f64::from(i) / f64::from(nu))
                    + face.v * (f64::from(j) / f64::from(nv));
                self.vertices.push(Vertex::new(p.as_vec3(), normal));
            }
        }

        let row = nu + 1;
        for j in 0..nv {
            for i in 0..nu {
                let a = base + j * row + i;
                let b = a + 1;
                let c = b + row;
                let d = a + row;
                self.indices.extend_from_slice(&[a, b, c, a, c, d]);
            }
        }
        Ok(())
    }

    /// Append another mesh, reindexing its triangles
    pub fn merge(&mut self, other: &Mesh) -> Result<()> {
        let total = self.vertices.len() + other.vertices.len();
        if total > MAX_VERTICES {
            return Err(Error::InvalidSpec {
                quantity: "mesh vertex count",
                value: total as f64,
                requirement: "at most 16777216",
            });
        }
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|&i| i + base));
        Ok(())
    }

    /// Bounding box of all vertex positions
    pub fn bounds(&self) -> Option<Aabb> {
        let mut points = self
            .vertices
            .iter()
            .map(|v| Vec3::from_array(v.position).as_dvec3());
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Aabb::new(min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box(config: &TessellationConfig) -> Mesh {
        Mesh::cuboid(DVec3::ZERO, Dimensions::new(4.0, 2.0, 1.0), config).expect("tessellates")
    }

    #[test]
    fn test_cuboid_counts() {
        let mesh = unit_box(&TessellationConfig::default());
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn test_cuboid_bounds() {
        let origin = DVec3::new(1.0, 2.0, 3.0);
        let mesh = Mesh::cuboid(origin, Dimensions::new(4.0, 2.0, 1.0), &TessellationConfig::default())
            .expect("tessellates");
        let bounds = mesh.bounds().expect("non-empty mesh");
        assert_eq!(bounds.min, origin);
        assert_eq!(bounds.max, DVec3::new(5.0, 4.0, 4.0));
    }

    #[test]
    fn test_triangles_wind_outward() {
        let mesh = unit_box(&TessellationConfig::default());
        let center = Vec3::new(2.0, 1.0, 0.5);

        for tri in mesh.indices.chunks(3) {
            let p: Vec<Vec3> = tri
                .iter()
                .map(|&i| Vec3::from_array(mesh.vertices[i as usize].position))
                .collect();
            let face_normal = (p[1] - p[0]).cross(p[2] - p[0]);
            let stored = Vec3::from_array(mesh.vertices[tri[0] as usize].normal);
            assert!(face_normal.dot(stored) > 0.0);
            assert!(stored.dot(p[0] - center) > 0.0);
        }
    }

    #[test]
    fn test_max_edge_subdivides_faces() {
        let mesh = unit_box(&TessellationConfig::default().with_max_edge(1.0));
        // 4x2 + 4x2 + 4x1 + 4x1 + 2x1 + 2x1 cells, two triangles each
        assert_eq!(mesh.triangle_count(), 2 * (8 + 8 + 4 + 4 + 2 + 2));
    }

    #[test]
    fn test_merge_reindexes() {
        let config = TessellationConfig::default();
        let mut a = unit_box(&config);
        let b = unit_box(&config);
        a.merge(&b).expect("within budget");

        assert_eq!(a.vertex_count(), 48);
        assert_eq!(a.triangle_count(), 24);
        assert!(a.indices.iter().all(|&i| (i as usize) < a.vertex_count()));
        assert_eq!(*a.indices.iter().max().expect("indices"), 47);
    }

    #[test]
    fn test_tiny_max_edge_is_rejected() {
        let top = Dimensions::new(95.0, 42.0, 1.5);
        for max_edge in [1e-12, 0.001, 0.02] {
            let config = TessellationConfig::default().with_max_edge(max_edge);
            assert!(matches!(
                Mesh::cuboid(DVec3::ZERO, top, &config),
                Err(Error::InvalidSpec { quantity: "max_edge", .. })
            ));
        }
    }

    #[test]
    fn test_non_positive_max_edge_is_rejected() {
        for max_edge in [0.0, -1.0, f64::NAN] {
            let config = TessellationConfig::default().with_max_edge(max_edge);
            assert!(Mesh::cuboid(DVec3::ZERO, Dimensions::new(1.0, 1.0, 1.0), &config).is_err());
        }
    }

    #[test]
    fn test_fine_grid_within_budget() {
        // 380 cells along the length, 6 across each 1.5 edge
        let config = TessellationConfig::default().with_max_edge(0.25);
        let mesh = Mesh::cuboid(DVec3::ZERO, Dimensions::new(95.0, 1.5, 1.5), &config)
            .expect("tessellates");
        assert!(mesh.vertex_count() <= MAX_VERTICES);
        assert_eq!(mesh.triangle_count(), 2 * (380 * 6 * 4 + 6 * 6 * 2));
    }
}
