//! Furniture specifications
//!
//! Each furniture family has a plain parameter record (`*Params`, freely
//! constructed and deserialized) and a validated specification (`*Spec`) that
//! can only be built from parameters passing every range check. Layout code
//! takes the validated form, so it never sees inverted or degenerate
//! geometry.
//!
//! The derived quantities (leg width, spanner length, ...) live on the
//! specifications. Validation and layout both read them from here.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Board thickness of the stock sheet goods
pub const DEFAULT_THICKNESS: f64 = 1.5;
/// Height of a dining table, floor to top surface
pub const DEFAULT_STRUCTURE_HEIGHT: f64 = 30.0;
/// Height of the companion bench
pub const DEFAULT_BENCH_HEIGHT: f64 = 18.0;
pub const DEFAULT_SPANNER_HEIGHT: f64 = 6.0;
/// Gap between the two slabs of a split top
pub const DEFAULT_SPLIT_GAP: f64 = 0.5;
/// Distance between a table and the bench placed beside it
pub const DEFAULT_BENCH_CLEARANCE: f64 = 6.0;

/// Where the leg base sits relative to the leg body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegStyle {
    /// The base is a foot on the floor and the leg body rises to meet the top
    Footed,
    /// The base is a cleat fixed under the top and the leg body hangs from it
    #[default]
    Hanging,
}

/// Which end of the furniture z = 0 refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZReference {
    /// z = 0 is the floor
    Floor,
    /// z = 0 is the upper surface of the top; the structure is built along +z
    #[default]
    Tabletop,
}

impl ZReference {
    /// Convert the z-origin of a piece measured from the floor into this frame.
    ///
    /// `total_height` is the floor-to-top height of the whole assembly.
    pub fn z_origin(self, floor_z: f64, piece_height: f64, total_height: f64) -> f64 {
        match self {
            Self::Floor => floor_z,
            Self::Tabletop => total_height - floor_z - piece_height,
        }
    }

    /// z coordinate of the floor plane in this frame
    pub fn floor_z(self, total_height: f64) -> f64 {
        match self {
            Self::Floor => 0.0,
            Self::Tabletop => total_height,
        }
    }
}

fn positive(quantity: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidSpec {
            quantity,
            value,
            requirement: "finite and > 0",
        })
    }
}

fn non_negative(quantity: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidSpec {
            quantity,
            value,
            requirement: "finite and >= 0",
        })
    }
}

// ============================================================================
// Table with legs and spanners
// ============================================================================

/// Parameters of a two-leg table braced by one or two spanners
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableParams {
    /// Extent of the top across the table (y)
    pub width: f64,
    /// Extent of the top along the table (x)
    pub length: f64,
    /// Distance from a long edge of the top to the face of a leg
    pub leg_width_inset: f64,
    /// Distance from a short edge of the top to the center of a leg
    pub leg_length_inset: f64,
    /// How far the leg base extends past the leg across the table
    pub leg_base_width_over: f64,
    /// How far the leg base extends past the leg along the table
    pub leg_base_length_over: f64,
    pub split_top: bool,
    pub split_gap: f64,
    pub double_spanner: bool,
    /// Center-to-center distance between doubled spanners
    pub spanner_sep: f64,
    /// Floor to top surface
    pub structure_height: f64,
    pub thickness: f64,
    pub spanner_height: f64,
    pub leg_style: LegStyle,
    pub z_reference: ZReference,
}

impl Default for TableParams {
    fn default() -> Self {
        Self {
            width: 42.0,
            length: 95.0,
            leg_width_inset: 8.0,
            leg_length_inset: 24.0,
            leg_base_width_over: 3.0,
            leg_base_length_over: 1.5,
            split_top: true,
            split_gap: DEFAULT_SPLIT_GAP,
            double_spanner: false,
            spanner_sep: 10.0,
            structure_height: DEFAULT_STRUCTURE_HEIGHT,
            thickness: DEFAULT_THICKNESS,
            spanner_height: DEFAULT_SPANNER_HEIGHT,
            leg_style: LegStyle::Hanging,
            z_reference: ZReference::Tabletop,
        }
    }
}

/// Validated table specification
#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec(TableParams);

impl TableSpec {
    pub fn new(params: TableParams) -> Result<Self> {
        let p = &params;
        positive("width", p.width)?;
        positive("length", p.length)?;
        positive("leg_width_inset", p.leg_width_inset)?;
        positive("leg_length_inset", p.leg_length_inset)?;
        non_negative("leg_base_width_over", p.leg_base_width_over)?;
        non_negative("leg_base_length_over", p.leg_base_length_over)?;
        positive("structure_height", p.structure_height)?;
        positive("thickness", p.thickness)?;
        positive("spanner_height", p.spanner_height)?;

        let spec = Self(params);
        let p = &spec.0;

        positive("leg width (width - 2 * leg_width_inset)", spec.leg_width())?;
        non_negative(
            "leg base overhang (leg_width_inset - leg_base_width_over)",
            p.leg_width_inset - p.leg_base_width_over,
        )?;
        non_negative(
            "left leg origin (leg_length_inset - thickness / 2 - leg_base_length_over)",
            spec.left_leg_x(),
        )?;
        positive(
            "spanner length (length - 2 * leg_length_inset - thickness)",
            spec.spanner_length(),
        )?;
        non_negative(
            "leg base clearance (spanner length - 2 * leg_base_length_over)",
            spec.spanner_length() - 2.0 * p.leg_base_length_over,
        )?;
        positive("leg height", spec.leg_height())?;
        non_negative(
            "spanner drop (leg height - spanner_height)",
            spec.leg_height() - p.spanner_height,
        )?;

        if p.split_top {
            positive("split_gap", p.split_gap)?;
            positive("top slab width (width / 2 - split_gap / 2)", spec.top_slab_width())?;
        }

        if p.double_spanner {
            non_negative(
                "spanner clearance (spanner_sep - thickness)",
                p.spanner_sep - p.thickness,
            )?;
            non_negative(
                "spanner span (leg width - spanner_sep - thickness)",
                spec.leg_width() - p.spanner_sep - p.thickness,
            )?;
        } else {
            non_negative(
                "spanner fit (leg width - thickness)",
                spec.leg_width() - p.thickness,
            )?;
        }

        Ok(spec)
    }

    pub fn params(&self) -> &TableParams {
        &self.0
    }

    pub fn leg_width(&self) -> f64 {
        self.width - 2.0 * self.leg_width_inset
    }

    pub fn leg_base_width(&self) -> f64 {
        self.leg_width() + 2.0 * self.leg_base_width_over
    }

    pub fn leg_base_length(&self) -> f64 {
        self.thickness + 2.0 * self.leg_base_length_over
    }

    /// Height of the leg body
    pub fn leg_height(&self) -> f64 {
        match self.leg_style {
            LegStyle::Footed => self.structure_height - 2.0 * self.thickness,
            LegStyle::Hanging => self.structure_height - 3.0 * self.thickness,
        }
    }

    /// Floor-frame z of the leg base
    pub fn leg_base_z(&self) -> f64 {
        match self.leg_style {
            LegStyle::Footed => 0.0,
            LegStyle::Hanging => self.structure_height - 2.0 * self.thickness,
        }
    }

    /// Floor-frame z of the bottom of the leg body
    pub fn leg_body_z(&self) -> f64 {
        self.thickness
    }

    /// Floor-frame z of the top of the leg bodies. Spanners hang from here.
    pub fn structure_top_z(&self) -> f64 {
        self.leg_body_z() + self.leg_height()
    }

    /// x-origin of the left leg group (its base, which is the widest piece)
    pub fn left_leg_x(&self) -> f64 {
        self.leg_length_inset - self.thickness / 2.0 - self.leg_base_length_over
    }

    /// x-origin of the right leg group, mirrored about the x midline
    pub fn right_leg_x(&self) -> f64 {
        self.length - self.left_leg_x() - self.leg_base_length()
    }

    pub fn spanner_length(&self) -> f64 {
        self.length - 2.0 * self.leg_length_inset - self.thickness
    }

    pub fn spanner_x(&self) -> f64 {
        self.leg_length_inset + self.thickness / 2.0
    }

    /// Width of one top slab; the full width unless the top is split
    pub fn top_slab_width(&self) -> f64 {
        if self.split_top {
            self.width / 2.0 - self.split_gap / 2.0
        } else {
            self.width
        }
    }

    pub fn total_height(&self) -> f64 {
        self.structure_height
    }
}

impl Deref for TableSpec {
    type Target = TableParams;

    fn deref(&self) -> &TableParams {
        &self.0
    }
}

impl TryFrom<TableParams> for TableSpec {
    type Error = Error;

    fn try_from(params: TableParams) -> Result<Self> {
        Self::new(params)
    }
}

// ============================================================================
// Table on four pedestals
// ============================================================================

/// Parameters of a table standing on four pedestals in a 2x2 arrangement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PedestalTableParams {
    pub width: f64,
    pub length: f64,
    /// Distance from a short edge of the top to the outer face of a pedestal
    pub pedestal_inset: f64,
    pub pedestal_width: f64,
    pub pedestal_thickness: f64,
    /// Gap between the two pedestals of a pair, straddling the centerline
    pub pedestal_gap: f64,
    pub table_thickness: f64,
    pub pedestal_height: f64,
    pub z_reference: ZReference,
}

impl Default for PedestalTableParams {
    fn default() -> Self {
        Self {
            width: 40.0,
            length: 96.0,
            pedestal_inset: 16.0,
            pedestal_width: 12.0,
            pedestal_thickness: 3.0,
            pedestal_gap: 0.5,
            table_thickness: DEFAULT_THICKNESS,
            pedestal_height: 28.5,
            z_reference: ZReference::Tabletop,
        }
    }
}

/// Validated pedestal table specification
#[derive(Debug, Clone, PartialEq)]
pub struct PedestalTableSpec(PedestalTableParams);

impl PedestalTableSpec {
    pub fn new(params: PedestalTableParams) -> Result<Self> {
        let p = &params;
        positive("width", p.width)?;
        positive("length", p.length)?;
        positive("pedestal_inset", p.pedestal_inset)?;
        positive("pedestal_width", p.pedestal_width)?;
        positive("pedestal_thickness", p.pedestal_thickness)?;
        positive("pedestal_gap", p.pedestal_gap)?;
        positive("table_thickness", p.table_thickness)?;
        positive("pedestal_height", p.pedestal_height)?;
        non_negative(
            "pedestal span (width - 2 * pedestal_width - pedestal_gap)",
            p.width - 2.0 * p.pedestal_width - p.pedestal_gap,
        )?;
        non_negative(
            "pedestal spacing (length - 2 * (pedestal_inset + pedestal_thickness))",
            p.length - 2.0 * (p.pedestal_inset + p.pedestal_thickness),
        )?;
        Ok(Self(params))
    }

    pub fn params(&self) -> &PedestalTableParams {
        &self.0
    }

    /// x-origins of the near and far pedestal pairs
    pub fn pedestal_xs(&self) -> [f64; 2] {
        [
            self.pedestal_inset,
            self.length - self.pedestal_inset - self.pedestal_thickness,
        ]
    }

    /// y-origins of the two pedestals of a pair, either side of the centerline
    pub fn pedestal_ys(&self) -> [f64; 2] {
        [
            (self.width + self.pedestal_gap) / 2.0,
            (self.width - self.pedestal_gap) / 2.0 - self.pedestal_width,
        ]
    }

    pub fn total_height(&self) -> f64 {
        self.pedestal_height + self.table_thickness
    }
}

impl Deref for PedestalTableSpec {
    type Target = PedestalTableParams;

    fn deref(&self) -> &PedestalTableParams {
        &self.0
    }
}

impl TryFrom<PedestalTableParams> for PedestalTableSpec {
    type Error = Error;

    fn try_from(params: PedestalTableParams) -> Result<Self> {
        Self::new(params)
    }
}

// ============================================================================
// Bench
// ============================================================================

/// Parameters of a two-leg bench with a single spanner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchParams {
    pub length: f64,
    pub bench_width: f64,
    /// Distance from a short edge of the seat to the center of a leg
    pub bench_leg_inset: f64,
    pub bench_height: f64,
    pub thickness: f64,
    pub spanner_height: f64,
    pub z_reference: ZReference,
}

impl Default for BenchParams {
    fn default() -> Self {
        Self {
            length: 95.0,
            bench_width: 15.0,
            bench_leg_inset: 12.75,
            bench_height: DEFAULT_BENCH_HEIGHT,
            thickness: DEFAULT_THICKNESS,
            spanner_height: DEFAULT_SPANNER_HEIGHT,
            z_reference: ZReference::Tabletop,
        }
    }
}

/// Validated bench specification
#[derive(Debug, Clone, PartialEq)]
pub struct BenchSpec(BenchParams);

impl BenchSpec {
    pub fn new(params: BenchParams) -> Result<Self> {
        let p = &params;
        positive("length", p.length)?;
        positive("bench_width", p.bench_width)?;
        positive("bench_leg_inset", p.bench_leg_inset)?;
        positive("bench_height", p.bench_height)?;
        positive("thickness", p.thickness)?;
        positive("spanner_height", p.spanner_height)?;

        let spec = Self(params);
        non_negative(
            "left bench leg origin (bench_leg_inset - thickness / 2)",
            spec.left_leg_x(),
        )?;
        positive(
            "bench spanner length (length - 2 * bench_leg_inset - thickness)",
            spec.spanner_length(),
        )?;
        positive("bench leg height (bench_height - thickness)", spec.leg_height())?;
        non_negative(
            "bench spanner drop (bench leg height - spanner_height)",
            spec.leg_height() - spec.spanner_height,
        )?;
        Ok(spec)
    }

    pub fn params(&self) -> &BenchParams {
        &self.0
    }

    pub fn leg_height(&self) -> f64 {
        self.bench_height - self.thickness
    }

    pub fn left_leg_x(&self) -> f64 {
        self.bench_leg_inset - self.thickness / 2.0
    }

    pub fn right_leg_x(&self) -> f64 {
        self.length - self.left_leg_x() - self.thickness
    }

    pub fn spanner_length(&self) -> f64 {
        self.length - 2.0 * self.bench_leg_inset - self.thickness
    }

    pub fn spanner_x(&self) -> f64 {
        self.bench_leg_inset + self.thickness / 2.0
    }

    pub fn total_height(&self) -> f64 {
        self.bench_height
    }
}

impl Deref for BenchSpec {
    type Target = BenchParams;

    fn deref(&self) -> &BenchParams {
        &self.0
    }
}

impl TryFrom<BenchParams> for BenchSpec {
    type Error = Error;

    fn try_from(params: BenchParams) -> Result<Self> {
        Self::new(params)
    }
}

// ============================================================================
// Table with a bench beside it
// ============================================================================

/// A table and a bench placed alongside it
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeSpec {
    pub table: TableSpec,
    pub bench: BenchSpec,
    /// Gap between the far long edge of the table and the bench
    pub bench_clearance: f64,
}

impl CompositeSpec {
    pub fn new(table: TableSpec, bench: BenchSpec, bench_clearance: f64) -> Result<Self> {
        positive("bench_clearance", bench_clearance)?;
        if table.z_reference != bench.z_reference {
            return Err(Error::IncompatibleFrames {
                table: table.z_reference,
                bench: bench.z_reference,
            });
        }
        Ok(Self {
            table,
            bench,
            bench_clearance,
        })
    }
}
