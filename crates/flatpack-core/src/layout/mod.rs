//! Primitive layout functions
//!
//! Each function maps a validated furniture spec to the positioned boxes of
//! one structural part. They are pure: the same spec always yields
//! the same primitives, and nothing here knows about other parts except
//! through the derived quantities on the spec types.
//!
//! Positions are worked out with z measured from the floor and converted to
//! the spec's [`ZReference`] as each primitive is placed.

mod bench;
mod leg;
mod pedestal;
mod spanner;
mod top;

pub use bench::{bench_legs, bench_spanner, bench_top};
pub use leg::{leg_group, table_legs};
pub use pedestal::{pedestal_table_top, pedestals};
pub use spanner::table_spanners;
pub use top::table_top;

use crate::geometry::{Dimensions, PieceKind, Primitive};
use crate::spec::ZReference;
use glam::DVec3;

/// Vertical frame shared by all primitives of one assembly
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame {
    pub reference: ZReference,
    pub total_height: f64,
}

impl Frame {
    pub fn new(reference: ZReference, total_height: f64) -> Self {
        Self {
            reference,
            total_height,
        }
    }

    /// Position a box whose minimum corner is at (`x`, `y`, `floor_z`) when
    /// measured from the floor
    pub fn place(&self, kind: PieceKind, dims: Dimensions, x: f64, y: f64, floor_z: f64) -> Primitive {
        let z = self
            .reference
            .z_origin(floor_z, dims.height, self.total_height);
        Primitive::new(kind, dims, DVec3::new(x, y, z))
    }
}
