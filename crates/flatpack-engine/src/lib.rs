//! Flatpack Engine - configuration, preview, export and cut-list output
//!
//! The Engine is a thin orchestration layer over flatpack-core: it turns a
//! configuration into a composed scene and drives every output mode from it.
//!
//! ## Example
//!
//! ```ignore
//! use flatpack_engine::{Engine, ExportOptions, FurnitureConfig};
//!
//! let mut engine = Engine::new();
//! engine.load_config(&FurnitureConfig::default())?;
//!
//! engine.preview(&PreviewOptions::default())?;
//! engine.export(&ExportOptions::new("table.json"))?;
//! engine.write_pieces("pieces.json".as_ref())?;
//! ```

pub mod config;
pub mod export;
pub mod pieces;
pub mod preview;
pub mod scene;

use anyhow::Result;
use scene::Scene;
use std::path::Path;
use tracing::info;

// Re-export commonly used types from dependencies
pub use flatpack_core::assembly::{Assembly, Family, Furniture};
pub use flatpack_core::summary::PieceSummary;

// Re-export our own types
pub use config::FurnitureConfig;
pub use export::{ExportFormat, ExportOptions, ExportResult};
pub use pieces::PiecesError;
pub use preview::{ConsoleViewer, PreviewOptions, Viewer};
pub use scene::SceneError;

/// The main Flatpack engine
///
/// Holds the current scene and provides:
/// - Loading furniture from configuration files
/// - Console preview
/// - Mesh and CAD export
/// - Cut-list output and companion script patching
#[derive(Debug, Default)]
pub struct Engine {
    current_scene: Option<Scene>,
}

impl Engine {
    /// Create a new engine instance
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Compose the furniture a configuration describes
    pub fn load_config(&mut self, config: &FurnitureConfig) -> Result<&Scene> {
        let scene = Scene::new(config.build()?)?;
        Ok(self.store(scene))
    }

    /// Read a configuration file and compose its furniture
    pub fn load_config_file(&mut self, path: &Path) -> Result<&Scene> {
        let config = FurnitureConfig::load(path)?;
        let scene = Scene::new(config.build()?)?.with_source(path.to_path_buf());
        Ok(self.store(scene))
    }

    /// Compose already validated furniture
    pub fn load_furniture(&mut self, furniture: Furniture) -> Result<&Scene> {
        let scene = Scene::new(furniture)?;
        Ok(self.store(scene))
    }

    fn store(&mut self, scene: Scene) -> &Scene {
        info!(
            family = %scene.furniture.family(),
            pieces = scene.assembly.len(),
            "scene loaded"
        );
        self.current_scene.insert(scene)
    }

    // ========================================================================
    // Scene Access
    // ========================================================================

    /// Get the currently loaded scene (if any)
    pub fn scene(&self) -> Option<&Scene> {
        self.current_scene.as_ref()
    }

    /// Check if a scene is currently loaded
    pub fn has_scene(&self) -> bool {
        self.current_scene.is_some()
    }

    /// Clear the current scene
    pub fn clear_scene(&mut self) {
        self.current_scene = None;
    }

    fn require_scene(&self) -> Result<&Scene> {
        self.current_scene
            .as_ref()
            .ok_or_else(|| SceneError::NoScene.into())
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Print the current scene to the console
    pub fn preview(&self, options: &PreviewOptions) -> Result<()> {
        preview::run_preview(self.require_scene()?, options)
    }

    /// Show the current scene through any viewer
    pub fn preview_with(&self, viewer: &mut dyn Viewer, options: &PreviewOptions) -> Result<()> {
        viewer.show(self.require_scene()?, options)
    }

    /// Export the current scene to a mesh or CAD file
    pub fn export(&self, options: &ExportOptions) -> Result<ExportResult> {
        export::export_scene(self.require_scene()?, options)
    }

    /// Cut list of the current scene
    pub fn summary(&self) -> Result<PieceSummary> {
        Ok(self.require_scene()?.summary())
    }

    /// Write the cut list as `pieces.json`-style data
    pub fn write_pieces(&self, path: &Path) -> Result<PieceSummary> {
        let summary = self.summary()?;
        pieces::write_pieces_json(&summary, path)?;
        Ok(summary)
    }

    /// Replace the `PIECES = ...;` assignment of a companion script
    pub fn patch_pieces(&self, script: &Path) -> Result<PieceSummary> {
        let summary = self.summary()?;
        pieces::patch_pieces_script(&summary, script)?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_creation() {
        let engine = Engine::new();
        assert!(!engine.has_scene());
        assert!(engine.scene().is_none());
    }

    #[test]
    fn test_load_config() {
        let mut engine = Engine::new();
        let scene = engine.load_config(&FurnitureConfig::default()).expect("loads");
        assert_eq!(scene.furniture.family(), Family::TableWithLegs);
        assert!(engine.has_scene());
    }

    #[test]
    fn test_invalid_config_keeps_previous_scene() {
        let mut engine = Engine::new();
        engine.load_config(&FurnitureConfig::default()).expect("loads");

        let mut bad = FurnitureConfig::default();
        bad.table.length = 10.0;
        assert!(engine.load_config(&bad).is_err());
        assert!(engine.has_scene());
    }

    #[test]
    fn test_outputs_need_a_scene() {
        let engine = Engine::new();
        let err = engine.summary().expect_err("nothing loaded");
        assert!(matches!(err.downcast_ref::<SceneError>(), Some(SceneError::NoScene)));
        assert!(engine.preview(&PreviewOptions::default()).is_err());
    }

    #[test]
    fn test_clear_scene() {
        let mut engine = Engine::new();
        engine.load_config(&FurnitureConfig::default()).expect("loads");
        engine.clear_scene();
        assert!(!engine.has_scene());
    }
}
