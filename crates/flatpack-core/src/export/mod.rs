//! Export of composed furniture to mesh and CAD files

mod obj;
mod step;
mod threejs;

use std::path::Path;

pub use obj::write_obj;
pub use step::{StepSolid, write_step};
pub use threejs::{BufferGeometryJson, write_threejs};

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// three.js `BufferGeometry` JSON
    #[default]
    Json,
    Obj,
    /// ISO 10303-21 faceted B-rep
    Step,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [Self::Json, Self::Obj, Self::Step];

    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "obj" => Some(Self::Obj),
            "step" | "stp" => Some(Self::Step),
            _ => None,
        }
    }

    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Obj => "obj",
            Self::Step => "step",
        }
    }

    /// Get a human-readable name for this format
    pub fn name(&self) -> &'static str {
        match self {
            Self::Json => "three.js JSON",
            Self::Obj => "OBJ",
            Self::Step => "STEP (faceted B-rep)",
        }
    }

    /// True for formats written from a tessellated mesh
    pub fn is_mesh(&self) -> bool {
        !matches!(self, Self::Step)
    }
}
