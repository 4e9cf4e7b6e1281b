//! Benches: a seat on two legs with one spanner
//!
//! Bench legs have no base; they run from the floor to the underside of the
//! seat, and the spanner hangs from the seat between their inner faces.

use super::Frame;
use crate::geometry::{Dimensions, PieceKind, Primitive};
use crate::spec::BenchSpec;

pub fn bench_top(spec: &BenchSpec) -> Primitive {
    let frame = Frame::new(spec.z_reference, spec.total_height());
    let dims = Dimensions::new(spec.length, spec.bench_width, spec.thickness);
    frame.place(PieceKind::BenchTop, dims, 0.0, 0.0, spec.leg_height())
}

/// Left and right bench legs
pub fn bench_legs(spec: &BenchSpec) -> Vec<Primitive> {
    let frame = Frame::new(spec.z_reference, spec.total_height());
    let dims = Dimensions::new(spec.thickness, spec.bench_width, spec.leg_height());

    [spec.left_leg_x(), spec.right_leg_x()]
        .into_iter()
        .map(|x| frame.place(PieceKind::BenchLeg, dims, x, 0.0, 0.0))
        .collect()
}

pub fn bench_spanner(spec: &BenchSpec) -> Primitive {
    let frame = Frame::new(spec.z_reference, spec.total_height());
    let dims = Dimensions::new(spec.spanner_length(), spec.thickness, spec.spanner_height);
    frame.place(
        PieceKind::BenchSpanner,
        dims,
        spec.spanner_x(),
        spec.bench_width / 2.0 - spec.thickness / 2.0,
        spec.leg_height() - spec.spanner_height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{BenchParams, ZReference};
    use approx::assert_relative_eq;

    fn floor_spec() -> BenchSpec {
        BenchSpec::new(BenchParams {
            z_reference: ZReference::Floor,
            ..BenchParams::default()
        })
        .expect("valid bench")
    }

    #[test]
    fn test_default_bench_pieces() {
        let spec = floor_spec();
        assert_eq!(bench_top(&spec).dims, Dimensions::new(95.0, 15.0, 1.5));
        assert_eq!(bench_spanner(&spec).dims, Dimensions::new(68.0, 1.5, 6.0));
        assert_eq!(bench_legs(&spec)[0].dims, Dimensions::new(1.5, 15.0, 16.5));
    }

    #[test]
    fn test_bench_legs_mirror() {
        let spec = floor_spec();
        let legs = bench_legs(&spec);
        assert_relative_eq!(legs[0].x_center(), spec.bench_leg_inset);
        assert_relative_eq!(legs[0].x_center() + legs[1].x_center(), spec.length);
    }

    #[test]
    fn test_bench_spanner_between_legs_under_seat() {
        let spec = floor_spec();
        let legs = bench_legs(&spec);
        let spanner = bench_spanner(&spec);
        let top = bench_top(&spec);

        assert_relative_eq!(spanner.offset.x, legs[0].offset.x + legs[0].dims.length);
        assert_relative_eq!(spanner.offset.x + spanner.dims.length, legs[1].offset.x);
        assert_relative_eq!(spanner.offset.z + spanner.dims.height, top.offset.z);
        assert_relative_eq!(spanner.y_center(), spec.bench_width / 2.0);
    }
}
