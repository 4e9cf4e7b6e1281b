//! Geometry value types shared by layout, composition and export
//!
//! Axes are fixed: x runs along the long side of a piece of furniture, y across
//! it, z is vertical. Every primitive is an axis-aligned box positioned by the
//! translation of its minimum corner; nothing is ever rotated.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size of an axis-aligned box along x, y and z
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Extent along x
    pub length: f64,
    /// Extent along y
    pub width: f64,
    /// Extent along z
    pub height: f64,
}

impl Dimensions {
    pub const fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
        }
    }

    pub fn to_vec3(self) -> DVec3 {
        DVec3::new(self.length, self.width, self.height)
    }

    /// True when every extent is finite and strictly positive
    pub fn is_solid(&self) -> bool {
        [self.length, self.width, self.height]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }

    /// Flat stock needed to cut this piece: the two largest extents, descending.
    ///
    /// The smallest extent is the board thickness and is dropped.
    pub fn stock_size(&self) -> [f64; 2] {
        let mut extents = [self.length, self.width, self.height];
        extents.sort_by(|a, b| b.total_cmp(a));
        [extents[0], extents[1]]
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {} x {}", self.length, self.width, self.height)
    }
}

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Box spanned by `dims` with its minimum corner at `origin`
    pub fn from_origin(origin: DVec3, dims: Dimensions) -> Self {
        Self::new(origin, origin + dims.to_vec3())
    }

    /// Merge two bounding boxes
    pub fn union(&self, other: &Aabb) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// Get the size of the bounding box
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Get the center of the bounding box
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    pub fn translate(&self, offset: DVec3) -> Self {
        Self::new(self.min + offset, self.max + offset)
    }

    /// The 8 corners, bit 0 selects max x, bit 1 max y, bit 2 max z
    pub fn corners(&self) -> [DVec3; 8] {
        std::array::from_fn(|i| {
            DVec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            )
        })
    }

    /// Interior intersection. Boxes that only share a face do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
            && self.min.z < other.max.z
            && other.min.z < self.max.z
    }

    /// The six faces, each wound counter-clockwise seen from outside
    pub fn faces(&self) -> [BoxFace; 6] {
        let size = self.size();
        let x = DVec3::X * size.x;
        let y = DVec3::Y * size.y;
        let z = DVec3::Z * size.z;
        let o = self.min;
        [
            BoxFace::new(o, y, x),
            BoxFace::new(o + z, x, y),
            BoxFace::new(o, x, z),
            BoxFace::new(o + y, z, x),
            BoxFace::new(o, z, y),
            BoxFace::new(o + x, y, z),
        ]
    }

    /// Smallest box containing every box in `boxes`
    pub fn enclosing<'a>(boxes: impl IntoIterator<Item = &'a Aabb>) -> Option<Self> {
        boxes.into_iter().copied().reduce(|acc, b| acc.union(&b))
    }
}

/// A rectangular face of a box: a corner and the two edges leaving it.
/// `u × v` is the outward normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxFace {
    pub origin: DVec3,
    pub u: DVec3,
    pub v: DVec3,
}

impl BoxFace {
    pub fn new(origin: DVec3, u: DVec3, v: DVec3) -> Self {
        Self { origin, u, v }
    }

    pub fn normal(&self) -> DVec3 {
        self.u.cross(self.v).normalize_or_zero()
    }

    /// Corners in winding order
    pub fn corners(&self) -> [DVec3; 4] {
        [
            self.origin,
            self.origin + self.u,
            self.origin + self.u + self.v,
            self.origin + self.v,
        ]
    }
}

/// The structural role of a primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceKind {
    Top,
    Leg,
    LegBase,
    Spanner,
    Pedestal,
    BenchTop,
    BenchLeg,
    BenchSpanner,
}

impl PieceKind {
    /// Machine label, as used in serialized output
    pub fn label(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Leg => "leg",
            Self::LegBase => "leg_base",
            Self::Spanner => "spanner",
            Self::Pedestal => "pedestal",
            Self::BenchTop => "bench_top",
            Self::BenchLeg => "bench_leg",
            Self::BenchSpanner => "bench_spanner",
        }
    }

    /// Name shown in a cut list. Bench pieces are listed under their own
    /// heading, so they drop the prefix.
    pub fn display_name(self, count: usize) -> String {
        let (singular, plural) = match self {
            Self::Top | Self::BenchTop => ("top", "tops"),
            Self::Leg | Self::BenchLeg => ("leg", "legs"),
            Self::LegBase => ("leg base", "leg bases"),
            Self::Spanner | Self::BenchSpanner => ("spanner", "spanners"),
            Self::Pedestal => ("pedestal", "pedestals"),
        };
        if count == 1 {
            singular.to_string()
        } else {
            format!("{plural} ({count})")
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One positioned box of an assembly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub kind: PieceKind,
    pub dims: Dimensions,
    /// Translation applied to the box's minimum corner
    pub offset: DVec3,
}

impl Primitive {
    pub fn new(kind: PieceKind, dims: Dimensions, offset: DVec3) -> Self {
        Self { kind, dims, offset }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_origin(self.offset, self.dims)
    }

    pub fn translated(&self, offset: DVec3) -> Self {
        Self {
            offset: self.offset + offset,
            ..*self
        }
    }

    /// Center of the footprint in y, used by the symmetry checks
    pub fn y_center(&self) -> f64 {
        self.offset.y + self.dims.width * 0.5
    }

    /// Center of the footprint in x
    pub fn x_center(&self) -> f64 {
        self.offset.x + self.dims.length * 0.5
    }
}
