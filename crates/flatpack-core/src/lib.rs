//! # Flatpack Core
//!
//! Parametric layout of flat-pack furniture built from sheet stock.
//!
//! A piece of furniture is described by a handful of numbers (overall size,
//! board thickness, insets). Validating those numbers gives a spec; layout
//! functions turn a spec into axis-aligned boxes; the composer groups the
//! boxes into an [`Assembly`](assembly::Assembly) from which meshes, STEP
//! files and the cut list are produced.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use flatpack_core::prelude::*;
//!
//! let spec = TableSpec::new(TableParams::default())?;
//! let table = Furniture::TableWithLegs(spec).assemble()?;
//!
//! let summary = PieceSummary::from_assembly(&table);
//! println!("{summary}");
//!
//! let mut kernel = BoxKernel::default();
//! let compound = materialize(&mut kernel, &table)?;
//! std::fs::write("table.json", kernel.export_mesh(&compound)?)?;
//! ```
//!
//! ## Units and Conventions
//!
//! - **Distances**: inches throughout; nothing is scaled on export
//! - **Axes**: x along the length, y across the width, z up
//! - **Placement**: every box is positioned by its minimum corner and never
//!   rotated

pub mod assembly;
pub mod export;
pub mod geometry;
pub mod kernel;
pub mod layout;
pub mod mesh;
pub mod spec;
pub mod summary;

mod error;

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::assembly::{Assembly, Family, Furniture};
    pub use crate::geometry::{Aabb, Dimensions, PieceKind, Primitive};
    pub use crate::kernel::{BoxKernel, Kernel, MeshEncoding, materialize};
    pub use crate::mesh::{Mesh, TessellationConfig, Vertex};
    pub use crate::spec::{
        BenchParams, BenchSpec, CompositeSpec, LegStyle, PedestalTableParams, PedestalTableSpec,
        TableParams, TableSpec, ZReference,
    };
    pub use crate::summary::PieceSummary;

    pub use crate::export::ExportFormat;

    pub use glam::DVec3;

    pub use crate::{Error, Result};
}
