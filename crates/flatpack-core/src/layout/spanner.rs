//! Spanners bracing the two legs of a table

use super::Frame;
use crate::geometry::{Dimensions, PieceKind, Primitive};
use crate::spec::TableSpec;

/// One spanner on the y-midline, or two offset by half the separation either
/// side of it. Spanners run between the inner faces of the leg bodies and
/// hang from the top of the legs.
pub fn table_spanners(spec: &TableSpec) -> Vec<Primitive> {
    let frame = Frame::new(spec.z_reference, spec.total_height());
    let dims = Dimensions::new(spec.spanner_length(), spec.thickness, spec.spanner_height);
    let x = spec.spanner_x();
    let z = spec.structure_top_z() - spec.spanner_height;
    let mid_y = spec.width / 2.0 - spec.thickness / 2.0;

    if spec.double_spanner {
        let half_sep = spec.spanner_sep / 2.0;
        vec![
            frame.place(PieceKind::Spanner, dims, x, mid_y - half_sep, z),
            frame.place(PieceKind::Spanner, dims, x, mid_y + half_sep, z),
        ]
    } else {
        vec![frame.place(PieceKind::Spanner, dims, x, mid_y, z)]
    }
}
