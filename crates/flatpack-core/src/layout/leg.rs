//! Table legs
//!
//! A leg group is an upright leg body plus a leg base that overhangs it on
//! every side. Footed legs stand on their base; hanging legs hang from a base
//! fixed under the top. The two groups mirror each other about the x
//! midline of the table.

use super::Frame;
use crate::geometry::{Dimensions, PieceKind, Primitive};
use crate::spec::TableSpec;

/// One leg group whose base starts at `x`: the leg body, then the leg base
pub fn leg_group(spec: &TableSpec, x: f64) -> [Primitive; 2] {
    let frame = Frame::new(spec.z_reference, spec.total_height());

    let body = Dimensions::new(spec.thickness, spec.leg_width(), spec.leg_height());
    let base = Dimensions::new(spec.leg_base_length(), spec.leg_base_width(), spec.thickness);

    [
        frame.place(
            PieceKind::Leg,
            body,
            x + spec.leg_base_length_over,
            spec.leg_width_inset,
            spec.leg_body_z(),
        ),
        frame.place(
            PieceKind::LegBase,
            base,
            x,
            spec.leg_width_inset - spec.leg_base_width_over,
            spec.leg_base_z(),
        ),
    ]
}

/// Both leg groups, left then right
pub fn table_legs(spec: &TableSpec) -> Vec<Primitive> {
    [spec.left_leg_x(), spec.right_leg_x()]
        .into_iter()
        .flat_map(|x| leg_group(spec, x))
        .collect()
}
