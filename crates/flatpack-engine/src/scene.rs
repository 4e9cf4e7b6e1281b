//! Scene representation for the Flatpack engine
//!
//! A Scene is a validated piece of furniture together with the assembly
//! composed from it, so every output mode works from the same geometry.

use flatpack_core::assembly::{Assembly, Furniture};
use flatpack_core::summary::PieceSummary;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when working with scenes
#[derive(Error, Debug)]
pub enum SceneError {
    /// No scene is currently loaded
    #[error("No scene loaded")]
    NoScene,

    /// The furniture could not be composed
    #[error("Failed to compose {family}: {source}")]
    Compose {
        family: String,
        #[source]
        source: flatpack_core::Error,
    },
}

/// Furniture and its composed assembly
#[derive(Debug, Clone)]
pub struct Scene {
    pub furniture: Furniture,

    pub assembly: Assembly,

    /// Configuration file the furniture was read from, if any
    pub source_path: Option<PathBuf>,
}

impl Scene {
    /// Compose `furniture` into a scene
    pub fn new(furniture: Furniture) -> Result<Self, SceneError> {
        let assembly = furniture.assemble().map_err(|source| SceneError::Compose {
            family: furniture.family().to_string(),
            source,
        })?;
        Ok(Self {
            furniture,
            assembly,
            source_path: None,
        })
    }

    pub fn with_source(mut self, path: PathBuf) -> Self {
        self.source_path = Some(path);
        self
    }

    /// Cut list of the composed assembly
    pub fn summary(&self) -> PieceSummary {
        PieceSummary::from_assembly(&self.assembly)
    }

    /// Get the source file name (without path)
    pub fn source_name(&self) -> Option<String> {
        self.source_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
    }
}
