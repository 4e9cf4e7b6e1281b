//! Table tops: one slab, or two slabs separated by a narrow gap

use super::Frame;
use crate::geometry::{Dimensions, PieceKind, Primitive};
use crate::spec::TableSpec;

/// The slab(s) covering the full length and width of the table
pub fn table_top(spec: &TableSpec) -> Vec<Primitive> {
    let frame = Frame::new(spec.z_reference, spec.total_height());
    let z = spec.structure_height - spec.thickness;
    let slab = Dimensions::new(spec.length, spec.top_slab_width(), spec.thickness);

    if spec.split_top {
        let far_y = spec.width / 2.0 + spec.split_gap / 2.0;
        vec![
            frame.place(PieceKind::Top, slab, 0.0, 0.0, z),
            frame.place(PieceKind::Top, slab, 0.0, far_y, z),
        ]
    } else {
        vec![frame.place(PieceKind::Top, slab, 0.0, 0.0, z)]
    }
}
