//! Pedestal tables: a single top on four pedestals arranged 2x2
//!
//! Each end of the table carries a pair of pedestals straddling the
//! centerline with `pedestal_gap` between them.

use super::Frame;
use crate::geometry::{Dimensions, PieceKind, Primitive};
use crate::spec::PedestalTableSpec;

/// The four pedestals, near end first, each pair ordered far side first
pub fn pedestals(spec: &PedestalTableSpec) -> Vec<Primitive> {
    let frame = Frame::new(spec.z_reference, spec.total_height());
    let dims = Dimensions::new(
        spec.pedestal_thickness,
        spec.pedestal_width,
        spec.pedestal_height,
    );

    spec.pedestal_xs()
        .into_iter()
        .flat_map(|x| {
            spec.pedestal_ys()
                .map(|y| frame.place(PieceKind::Pedestal, dims, x, y, 0.0))
        })
        .collect()
}

/// The top slab, resting on the pedestals
pub fn pedestal_table_top(spec: &PedestalTableSpec) -> Primitive {
    let frame = Frame::new(spec.z_reference, spec.total_height());
    let dims = Dimensions::new(spec.length, spec.width, spec.table_thickness);
    frame.place(PieceKind::Top, dims, 0.0, 0.0, spec.pedestal_height)
}
