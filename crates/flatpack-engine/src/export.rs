//! Geometry export for the Flatpack engine
//!
//! Materializes a scene through the box kernel and writes three.js JSON,
//! Wavefront OBJ or STEP.

use crate::scene::Scene;
use anyhow::{Context, Result};
use flatpack_core::kernel::{BoxKernel, Kernel, MeshEncoding, materialize};
use flatpack_core::mesh::TessellationConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub use flatpack_core::export::ExportFormat;

/// File the companion page loads when nothing else is asked for
pub const DEFAULT_MESH_PATH: &str = "table.json";

/// Options for geometry export
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Output file path
    pub path: PathBuf,

    /// Export format (if None, inferred from path extension)
    pub format: Option<ExportFormat>,

    /// Longest triangle edge; `None` keeps two triangles per face
    pub max_edge: Option<f64>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::new(DEFAULT_MESH_PATH)
    }
}

impl ExportOptions {
    /// Create export options for a given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: None,
            max_edge: None,
        }
    }

    /// Set the export format explicitly
    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_max_edge(mut self, max_edge: f64) -> Self {
        self.max_edge = Some(max_edge);
        self
    }

    /// Get the effective format (explicit or inferred from path)
    pub fn effective_format(&self) -> Option<ExportFormat> {
        self.format
            .or_else(|| ExportFormat::from_extension(&self.path))
    }

    fn tessellation(&self) -> TessellationConfig {
        TessellationConfig {
            max_edge: self.max_edge,
        }
    }
}

/// Result of a successful export operation
#[derive(Debug, Clone)]
pub struct ExportResult {
    /// Path where the file was written
    pub path: PathBuf,

    /// Format used for export
    pub format: ExportFormat,

    /// Number of box solids written
    pub solid_count: usize,

    /// Triangles in the mesh, zero for CAD output
    pub triangle_count: usize,

    pub bytes: usize,
}

impl std::fmt::Display for ExportResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Exported {} as {} ({} solids",
            self.path.display(),
            self.format.name(),
            self.solid_count
        )?;
        if self.triangle_count > 0 {
            write!(f, ", {} triangles", self.triangle_count)?;
        }
        write!(f, ")")
    }
}

/// Export a scene to a mesh or CAD file
pub fn export_scene(scene: &Scene, options: &ExportOptions) -> Result<ExportResult> {
    let format = match options.effective_format() {
        Some(format) => format,
        None if options.path.extension().is_none() => ExportFormat::default(),
        None => anyhow::bail!(
            "Cannot determine export format from {}",
            options.path.display()
        ),
    };

    let encoding = match format {
        ExportFormat::Obj => MeshEncoding::Obj,
        ExportFormat::Json | ExportFormat::Step => MeshEncoding::ThreeJs,
    };
    let mut kernel = BoxKernel::new(options.tessellation()).with_encoding(encoding);
    let compound = materialize(&mut kernel, &scene.assembly)?;

    let (bytes, triangle_count) = if format.is_mesh() {
        let mesh = compound.to_mesh(&kernel.tessellation)?;
        (kernel.encode_mesh(&mesh)?, mesh.triangle_count())
    } else {
        (kernel.export_cad(&compound)?, 0)
    };

    // Ensure the file has the correct extension
    let mut output_path = options.path.clone();
    if output_path.extension().is_none() {
        output_path.set_extension(format.extension());
    }
    write_output(&output_path, &bytes)?;

    info!(
        path = %output_path.display(),
        format = format.name(),
        bytes = bytes.len(),
        "exported"
    );
    Ok(ExportResult {
        path: output_path,
        format,
        solid_count: compound.solids.len(),
        triangle_count,
        bytes: bytes.len(),
    })
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_options_builder() {
        let opts = ExportOptions::new("desk.step")
            .with_format(ExportFormat::Step)
            .with_max_edge(4.0);

        assert_eq!(opts.path, PathBuf::from("desk.step"));
        assert_eq!(opts.format, Some(ExportFormat::Step));
        assert_eq!(opts.max_edge, Some(4.0));
    }

    #[test]
    fn test_default_target_is_companion_mesh() {
        let opts = ExportOptions::default();
        assert_eq!(opts.path, PathBuf::from("table.json"));
        assert_eq!(opts.effective_format(), Some(ExportFormat::Json));
    }

    #[test]
    fn test_explicit_format_wins() {
        let opts = ExportOptions::new("out.json").with_format(ExportFormat::Obj);
        assert_eq!(opts.effective_format(), Some(ExportFormat::Obj));
    }

    #[test]
    fn test_result_display() {
        let result = ExportResult {
            path: PathBuf::from("table.step"),
            format: ExportFormat::Step,
            solid_count: 7,
            triangle_count: 0,
            bytes: 100,
        };
        assert_eq!(
            result.to_string(),
            "Exported table.step as STEP (faceted B-rep) (7 solids)"
        );
    }
}
