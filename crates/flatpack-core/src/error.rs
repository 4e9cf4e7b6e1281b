//! Error types for Flatpack

use thiserror::Error;

/// Result type alias using Flatpack's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Flatpack operations
#[derive(Error, Debug)]
pub enum Error {
    /// A parameter or a quantity derived from parameters is out of range
    #[error("Invalid specification: {quantity} = {value} (must be {requirement})")]
    InvalidSpec {
        quantity: &'static str,
        value: f64,
        requirement: &'static str,
    },

    /// Two sub-assemblies measure height from different ends
    #[error("Cannot combine a {table:?}-referenced table with a {bench:?}-referenced bench")]
    IncompatibleFrames {
        table: crate::spec::ZReference,
        bench: crate::spec::ZReference,
    },

    /// Two pieces of an assembly interpenetrate
    #[error("Pieces overlap: {first} and {second}")]
    Overlap {
        first: crate::geometry::PieceKind,
        second: crate::geometry::PieceKind,
    },

    /// The geometry kernel does not provide an operation
    #[error("Unsupported by this kernel: {0}")]
    Unsupported(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
