//! Assembly composition
//!
//! The composer never derives geometry of its own. It concatenates the
//! primitives produced by the layout functions and applies one translation
//! per sub-assembly.

use crate::geometry::{Aabb, PieceKind, Primitive};
use crate::layout;
use crate::spec::{BenchSpec, CompositeSpec, PedestalTableSpec, TableSpec, ZReference};
use crate::{Error, Result};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Interpenetration below this is treated as two faces touching
const OVERLAP_TOLERANCE: f64 = 1e-9;

/// The furniture families the composer knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Family {
    #[default]
    TableWithLegs,
    TableWithPedestals,
    Bench,
    TableAndBench,
}

impl Family {
    pub const ALL: [Family; 4] = [
        Self::TableWithLegs,
        Self::TableWithPedestals,
        Self::Bench,
        Self::TableAndBench,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::TableWithLegs => "table-with-legs",
            Self::TableWithPedestals => "table-with-pedestals",
            Self::Bench => "bench",
            Self::TableAndBench => "table-and-bench",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Family {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|family| family.name() == s)
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|f| f.name()).collect();
                format!("unknown family '{s}', expected one of: {}", names.join(", "))
            })
    }
}

/// A named group of positioned primitives, possibly holding sub-assemblies
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    name: String,
    frame: ZReference,
    floor_z: f64,
    primitives: Vec<Primitive>,
    children: Vec<Assembly>,
}

impl Assembly {
    /// `total_height` is the floor-to-top height the primitives were laid
    /// out against, which fixes where the floor sits in `frame`.
    pub fn new(
        name: impl Into<String>,
        frame: ZReference,
        total_height: f64,
        primitives: Vec<Primitive>,
    ) -> Self {
        Self {
            name: name.into(),
            frame,
            floor_z: frame.floor_z(total_height),
            primitives,
            children: Vec::new(),
        }
    }

    /// An assembly made only of sub-assemblies, standing on the floor of the
    /// first one
    pub fn with_children(name: impl Into<String>, frame: ZReference, children: Vec<Assembly>) -> Self {
        let floor_z = children.first().map_or(0.0, |c| c.floor_z);
        Self {
            name: name.into(),
            frame,
            floor_z,
            primitives: Vec::new(),
            children,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frame(&self) -> ZReference {
        self.frame
    }

    /// Primitives owned directly by this assembly
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn children(&self) -> &[Assembly] {
        &self.children
    }

    /// Every primitive of this assembly and its sub-assemblies, depth first
    pub fn iter(&self) -> Box<dyn Iterator<Item = &Primitive> + '_> {
        Box::new(
            self.primitives
                .iter()
                .chain(self.children.iter().flat_map(|c| c.iter())),
        )
    }

    /// Total number of primitives, including sub-assemblies
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn of_kind(&self, kind: PieceKind) -> Vec<&Primitive> {
        self.iter().filter(|p| p.kind == kind).collect()
    }

    /// A copy of this assembly moved by `offset`
    pub fn translated(&self, offset: DVec3) -> Self {
        Self {
            name: self.name.clone(),
            frame: self.frame,
            floor_z: self.floor_z + offset.z,
            primitives: self.primitives.iter().map(|p| p.translated(offset)).collect(),
            children: self.children.iter().map(|c| c.translated(offset)).collect(),
        }
    }

    pub fn bounds(&self) -> Option<Aabb> {
        let boxes: Vec<Aabb> = self.iter().map(Primitive::bounds).collect();
        Aabb::enclosing(&boxes)
    }

    /// z of the floor plane this assembly stands on.
    ///
    /// This is the nominal floor, not the lowest piece: hanging legs stop one
    /// board thickness above it.
    pub fn floor_z(&self) -> f64 {
        self.floor_z
    }

    /// Fail if any two primitives interpenetrate. Touching faces are fine.
    pub fn check_disjoint(&self) -> Result<()> {
        let all: Vec<&Primitive> = self.iter().collect();
        for (i, a) in all.iter().enumerate() {
            let a_box = a.bounds();
            for b in &all[i + 1..] {
                let b_box = b.bounds();
                let lo = a_box.min.max(b_box.min);
                let hi = a_box.max.min(b_box.max);
                let depth = hi - lo;
                if depth.min_element() > OVERLAP_TOLERANCE {
                    return Err(Error::Overlap {
                        first: a.kind,
                        second: b.kind,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Two legs with bases, the top and the spanner(s)
pub fn compose_table(spec: &TableSpec) -> Assembly {
    let mut primitives = layout::table_top(spec);
    primitives.extend(layout::table_legs(spec));
    primitives.extend(layout::table_spanners(spec));

    debug!(
        pieces = primitives.len(),
        split_top = spec.split_top,
        double_spanner = spec.double_spanner,
        "composed table"
    );
    Assembly::new("table", spec.z_reference, spec.total_height(), primitives)
}

/// The top on four pedestals
pub fn compose_pedestal_table(spec: &PedestalTableSpec) -> Assembly {
    let mut primitives = vec![layout::pedestal_table_top(spec)];
    primitives.extend(layout::pedestals(spec));

    debug!(pieces = primitives.len(), "composed pedestal table");
    Assembly::new("table", spec.z_reference, spec.total_height(), primitives)
}

pub fn compose_bench(spec: &BenchSpec) -> Assembly {
    let mut primitives = vec![layout::bench_top(spec), layout::bench_spanner(spec)];
    primitives.extend(layout::bench_legs(spec));

    debug!(pieces = primitives.len(), "composed bench");
    Assembly::new("bench", spec.z_reference, spec.total_height(), primitives)
}

/// Where the bench goes relative to the table: past the far long edge with
/// the configured clearance, centered along the table, floors aligned.
pub fn bench_offset(spec: &CompositeSpec) -> DVec3 {
    let frame = spec.table.z_reference;
    DVec3::new(
        (spec.table.length - spec.bench.length) / 2.0,
        spec.table.width + spec.bench_clearance,
        frame.floor_z(spec.table.total_height()) - frame.floor_z(spec.bench.total_height()),
    )
}

/// A table with its bench moved alongside it
pub fn compose_table_and_bench(spec: &CompositeSpec) -> Assembly {
    let table = compose_table(&spec.table);
    let offset = bench_offset(spec);
    let bench = compose_bench(&spec.bench).translated(offset);

    debug!(x = offset.x, y = offset.y, z = offset.z, "placed bench beside table");
    Assembly::with_children("table and bench", spec.table.z_reference, vec![table, bench])
}

/// A validated specification of any furniture family
#[derive(Debug, Clone, PartialEq)]
pub enum Furniture {
    TableWithLegs(TableSpec),
    TableWithPedestals(PedestalTableSpec),
    Bench(BenchSpec),
    TableAndBench(CompositeSpec),
}

impl Furniture {
    pub fn family(&self) -> Family {
        match self {
            Self::TableWithLegs(_) => Family::TableWithLegs,
            Self::TableWithPedestals(_) => Family::TableWithPedestals,
            Self::Bench(_) => Family::Bench,
            Self::TableAndBench(_) => Family::TableAndBench,
        }
    }

    /// Compose the assembly and check that no two pieces interpenetrate
    pub fn assemble(&self) -> Result<Assembly> {
        let assembly = match self {
            Self::TableWithLegs(spec) => compose_table(spec),
            Self::TableWithPedestals(spec) => compose_pedestal_table(spec),
            Self::Bench(spec) => compose_bench(spec),
            Self::TableAndBench(spec) => compose_table_and_bench(spec),
        };
        assembly.check_disjoint()?;
        Ok(assembly)
    }
}
