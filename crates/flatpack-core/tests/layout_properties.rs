//! Layout properties that must hold for every valid specification

// Tests are allowed to use expect/unwrap for cleaner error messages
#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use flatpack_core::Error;
use flatpack_core::assembly::{Assembly, Furniture, compose_table, compose_table_and_bench};
use flatpack_core::geometry::{PieceKind, Primitive};
use flatpack_core::prelude::*;
use flatpack_core::summary::PieceSummary;

const FRAMES: [ZReference; 2] = [ZReference::Floor, ZReference::Tabletop];
const STYLES: [LegStyle; 2] = [LegStyle::Footed, LegStyle::Hanging];

fn table_variants() -> Vec<TableSpec> {
    let mut specs = Vec::new();
    for z_reference in FRAMES {
        for leg_style in STYLES {
            for (split_top, double_spanner) in [(false, false), (true, false), (false, true), (true, true)] {
                let params = TableParams {
                    split_top,
                    double_spanner,
                    leg_style,
                    z_reference,
                    ..TableParams::default()
                };
                specs.push(TableSpec::new(params).expect("valid table"));
            }
        }
    }
    specs
}

fn pedestal_variants() -> Vec<PedestalTableSpec> {
    FRAMES
        .into_iter()
        .map(|z_reference| {
            PedestalTableSpec::new(PedestalTableParams {
                z_reference,
                ..PedestalTableParams::default()
            })
            .expect("valid pedestal table")
        })
        .collect()
}

/// Floor-to-piece span in z, whatever frame the assembly uses
fn floor_span(frame: ZReference, total_height: f64, primitive: &Primitive) -> (f64, f64) {
    let bounds = primitive.bounds();
    match frame {
        ZReference::Floor => (bounds.min.z, bounds.max.z),
        ZReference::Tabletop => (total_height - bounds.max.z, total_height - bounds.min.z),
    }
}

fn all_positive(assembly: &Assembly) {
    for primitive in assembly.iter() {
        assert!(primitive.dims.is_solid(), "{:?} is degenerate", primitive);
    }
}

#[test]
fn every_primitive_is_solid() {
    for spec in table_variants() {
        all_positive(&compose_table(&spec));
    }
    for spec in pedestal_variants() {
        all_positive(&Furniture::TableWithPedestals(spec).assemble().expect("assembles"));
    }
    let bench = BenchSpec::new(BenchParams::default()).expect("valid bench");
    all_positive(&Furniture::Bench(bench).assemble().expect("assembles"));
}

#[test]
fn every_table_variant_is_free_of_overlaps() {
    for spec in table_variants() {
        let table = Furniture::TableWithLegs(spec.clone()).assemble();
        assert!(table.is_ok(), "{:?} failed: {:?}", spec.params(), table.err());
    }
}

#[test]
fn legs_mirror_about_the_midline() {
    for spec in table_variants() {
        let table = compose_table(&spec);
        for kind in [PieceKind::Leg, PieceKind::LegBase] {
            let pieces = table.of_kind(kind);
            assert_eq!(pieces.len(), 2);
            let (left, right) = (pieces[0], pieces[1]);
            assert_eq!(left.dims, right.dims);
            assert_relative_eq!(left.offset.y, right.offset.y);
            assert_relative_eq!(left.offset.z, right.offset.z);
            assert_relative_eq!(left.x_center() + right.x_center(), spec.length);
        }
    }
}

#[test]
fn pedestals_mirror_in_both_directions() {
    for spec in pedestal_variants() {
        let table = Furniture::TableWithPedestals(spec.clone()).assemble().expect("assembles");
        let pedestals = table.of_kind(PieceKind::Pedestal);
        assert_eq!(pedestals.len(), 4);

        let x_sum: f64 = pedestals.iter().map(|p| p.x_center()).sum();
        let y_sum: f64 = pedestals.iter().map(|p| p.y_center()).sum();
        assert_relative_eq!(x_sum / 4.0, spec.length / 2.0);
        assert_relative_eq!(y_sum / 4.0, spec.width / 2.0);
    }
}

#[test]
fn top_rests_on_the_structure_without_gap() {
    for spec in table_variants() {
        let table = compose_table(&spec);
        let frame = spec.z_reference;
        let height = spec.total_height();

        let top_bottom = table
            .of_kind(PieceKind::Top)
            .iter()
            .map(|p| floor_span(frame, height, p).0)
            .fold(f64::INFINITY, f64::min);
        let structure_top = table
            .iter()
            .filter(|p| p.kind != PieceKind::Top)
            .map(|p| floor_span(frame, height, p).1)
            .fold(f64::NEG_INFINITY, f64::max);

        assert_relative_eq!(top_bottom, structure_top);
        assert_relative_eq!(top_bottom, height - spec.thickness);
    }

    for spec in pedestal_variants() {
        let table = Furniture::TableWithPedestals(spec.clone()).assemble().expect("assembles");
        let frame = spec.z_reference;
        let height = spec.total_height();
        let top = table.of_kind(PieceKind::Top)[0];
        for pedestal in table.of_kind(PieceKind::Pedestal) {
            assert_relative_eq!(floor_span(frame, height, pedestal).1, floor_span(frame, height, top).0);
            assert_relative_eq!(floor_span(frame, height, pedestal).0, 0.0);
        }
    }
}

#[test]
fn spanners_center_under_the_top() {
    for spec in table_variants() {
        let table = compose_table(&spec);
        let spanners = table.of_kind(PieceKind::Spanner);
        let expected = if spec.double_spanner { 2 } else { 1 };
        assert_eq!(spanners.len(), expected);

        let mean_y = spanners.iter().map(|p| p.offset.y).sum::<f64>() / spanners.len() as f64;
        assert_relative_eq!(mean_y, spec.width / 2.0 - spec.thickness / 2.0);
    }
}

#[test]
fn summary_matches_primitive_stock() {
    for spec in table_variants() {
        let table = compose_table(&spec);
        let summary = PieceSummary::from_assembly(&table);
        let section = summary.section("table").expect("table section");

        let listed: usize = section.entries.iter().map(|e| e.count).sum();
        assert_eq!(listed, table.len());
        for entry in &section.entries {
            let first = table.of_kind(entry.kind)[0];
            assert_eq!(entry.size, first.dims.stock_size());
        }
    }
}

#[test]
fn bench_sits_past_the_table_with_clearance() {
    for z_reference in FRAMES {
        let table = TableSpec::new(TableParams {
            z_reference,
            ..TableParams::default()
        })
        .expect("valid table");
        let bench = BenchSpec::new(BenchParams {
            z_reference,
            ..BenchParams::default()
        })
        .expect("valid bench");
        let spec = CompositeSpec::new(table, bench, 4.0).expect("valid composite");

        let both = compose_table_and_bench(&spec);
        let table_box = both.children()[0].bounds().expect("table");
        let bench_box = both.children()[1].bounds().expect("bench");

        assert!(bench_box.min.y > table_box.max.y);
        assert_relative_eq!(bench_box.min.y - table_box.max.y, 4.0);
        assert_relative_eq!(bench_box.center().x, table_box.center().x);
    }
}

#[test]
fn mismatched_frames_cannot_be_combined() {
    let table = TableSpec::new(TableParams {
        z_reference: ZReference::Floor,
        ..TableParams::default()
    })
    .expect("valid table");
    let bench = BenchSpec::new(BenchParams::default()).expect("valid bench");

    assert!(matches!(
        CompositeSpec::new(table, bench, 6.0),
        Err(Error::IncompatibleFrames { .. })
    ));
}

#[test]
fn scenario_wide_table_leg_sizes() {
    let spec = TableSpec::new(TableParams {
        width: 42.0,
        length: 95.0,
        leg_width_inset: 8.0,
        leg_base_width_over: 3.0,
        ..TableParams::default()
    })
    .expect("valid table");
    let table = compose_table(&spec);

    let leg = table.of_kind(PieceKind::Leg)[0];
    let base = table.of_kind(PieceKind::LegBase)[0];
    assert_relative_eq!(leg.dims.width, 26.0);
    assert_relative_eq!(base.dims.width, 32.0);
    assert_relative_eq!(base.offset.y, 5.0);
}

#[test]
fn scenario_pedestal_pair_straddles_centerline() {
    let spec = PedestalTableSpec::new(PedestalTableParams {
        width: 40.0,
        pedestal_gap: 0.5,
        pedestal_width: 12.0,
        ..PedestalTableParams::default()
    })
    .expect("valid pedestal table");

    assert_eq!(spec.pedestal_ys(), [20.25, 7.75]);
}

#[test]
fn scenario_companion_cut_list() {
    let table = TableSpec::new(TableParams {
        width: 40.0,
        leg_width_inset: 10.0,
        leg_base_width_over: 4.5,
        split_top: false,
        double_spanner: true,
        structure_height: 29.5,
        leg_style: LegStyle::Footed,
        ..TableParams::default()
    })
    .expect("valid table");
    let bench = BenchSpec::new(BenchParams::default()).expect("valid bench");
    let spec = CompositeSpec::new(table, bench, 6.0).expect("valid composite");

    let assembly = Furniture::TableAndBench(spec).assemble().expect("assembles");
    let json = PieceSummary::from_assembly(&assembly).to_json().expect("serializes");

    assert_eq!(
        json,
        concat!(
            r#"{"table":{"top":[95.0,40.0],"legs (2)":[26.5,20.0],"#,
            r#""leg bases (2)":[29.0,4.5],"spanners (2)":[45.5,6.0]},"#,
            r#""bench":{"top":[95.0,15.0],"spanner":[68.0,6.0],"legs (2)":[16.5,15.0]}}"#
        )
    );
}

#[test]
fn malformed_specs_are_rejected() {
    let too_narrow = TableParams {
        width: 15.0,
        leg_width_inset: 8.0,
        ..TableParams::default()
    };
    assert!(matches!(TableSpec::new(too_narrow), Err(Error::InvalidSpec { .. })));

    let overhanging = TableParams {
        leg_base_width_over: 9.0,
        ..TableParams::default()
    };
    assert!(TableSpec::new(overhanging).is_err());

    let crowded = TableParams {
        double_spanner: true,
        spanner_sep: 1.0,
        ..TableParams::default()
    };
    assert!(TableSpec::new(crowded).is_err());

    let short = TableParams {
        length: 40.0,
        ..TableParams::default()
    };
    assert!(TableSpec::new(short).is_err());

    // Caught before layout rather than as an overlap of the two bases
    let colliding_bases = TableParams {
        length: 60.0,
        leg_base_length_over: 6.0,
        ..TableParams::default()
    };
    assert!(matches!(
        TableSpec::new(colliding_bases),
        Err(Error::InvalidSpec { quantity, .. }) if quantity.starts_with("leg base clearance")
    ));

    let pedestals_too_wide = PedestalTableParams {
        pedestal_width: 20.0,
        ..PedestalTableParams::default()
    };
    assert!(PedestalTableSpec::new(pedestals_too_wide).is_err());

    let not_a_number = BenchParams {
        bench_height: f64::NAN,
        ..BenchParams::default()
    };
    assert!(BenchSpec::new(not_a_number).is_err());
}

#[test]
fn box_kernel_round_trip_matches_assembly() {
    let spec = TableSpec::new(TableParams::default()).expect("valid table");
    let table = compose_table(&spec);
    let mut kernel = BoxKernel::default();
    let compound = materialize(&mut kernel, &table).expect("materializes");

    let mesh = compound.to_mesh(&kernel.tessellation).expect("tessellates");
    let mesh_bounds = mesh.bounds().expect("non-empty");
    let table_bounds = table.bounds().expect("non-empty");
    assert_relative_eq!(mesh_bounds.min.x, table_bounds.min.x, epsilon = 1e-4);
    assert_relative_eq!(mesh_bounds.max.y, table_bounds.max.y, epsilon = 1e-4);
    assert_relative_eq!(mesh_bounds.max.z, table_bounds.max.z, epsilon = 1e-4);
}
