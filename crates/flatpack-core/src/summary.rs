//! Cut list: the flat stock needed for each distinct piece
//!
//! The summary is read off a composed [`Assembly`], never recomputed from the
//! specification, so it always agrees with the geometry that gets exported.

use crate::assembly::Assembly;
use crate::geometry::PieceKind;
use crate::{Error, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Identical pieces folded into one line of the cut list
#[derive(Debug, Clone, PartialEq)]
pub struct PieceEntry {
    /// Display label with the multiplicity folded in, e.g. `"legs (2)"`
    pub label: String,
    pub kind: PieceKind,
    pub count: usize,
    /// Stock size as `[length, width]`, largest first
    pub size: [f64; 2],
}

/// The cut list of one assembly
#[derive(Debug, Clone, PartialEq)]
pub struct PieceSection {
    pub name: String,
    pub entries: Vec<PieceEntry>,
}

impl PieceSection {
    pub fn get(&self, label: &str) -> Option<[f64; 2]> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.size)
    }

    fn from_assembly(assembly: &Assembly) -> Self {
        let mut groups: Vec<(PieceKind, [f64; 2], usize)> = Vec::new();
        for primitive in assembly.primitives() {
            let size = primitive.dims.stock_size();
            match groups
                .iter_mut()
                .find(|(kind, s, _)| *kind == primitive.kind && *s == size)
            {
                Some((_, _, count)) => *count += 1,
                None => groups.push((primitive.kind, size, 1)),
            }
        }

        let mut entries: Vec<PieceEntry> = Vec::with_capacity(groups.len());
        for (kind, size, count) in groups {
            let mut label = kind.display_name(count);
            // Same kind in two sizes: keep labels unique
            if entries.iter().any(|entry| entry.label == label) {
                label = format!("{label} [{} x {}]", size[0], size[1]);
            }
            entries.push(PieceEntry {
                label,
                kind,
                count,
                size,
            });
        }

        Self {
            name: assembly.name().to_string(),
            entries,
        }
    }
}

/// Cut lists for an assembly and each of its sub-assemblies, in order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PieceSummary {
    pub sections: Vec<PieceSection>,
}

impl PieceSummary {
    pub fn from_assembly(assembly: &Assembly) -> Self {
        let mut summary = Self::default();
        summary.collect(assembly);
        summary
    }

    fn collect(&mut self, assembly: &Assembly) {
        if !assembly.primitives().is_empty() {
            self.sections.push(PieceSection::from_assembly(assembly));
        }
        for child in assembly.children() {
            self.collect(child);
        }
    }

    pub fn section(&self, name: &str) -> Option<&PieceSection> {
        self.sections.iter().find(|section| section.name == name)
    }

    /// Look up one entry, e.g. `get("table", "legs (2)")`
    pub fn get(&self, section: &str, label: &str) -> Option<[f64; 2]> {
        self.section(section)?.get(label)
    }

    /// Compact JSON, one line, as embedded in the companion page
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Error::from)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Error::from)
    }
}

impl Serialize for PieceSection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.label, &entry.size)?;
        }
        map.end()
    }
}

impl Serialize for PieceSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for section in &self.sections {
            map.serialize_entry(&section.name, section)?;
        }
        map.end()
    }
}

impl fmt::Display for PieceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            writeln!(f, "{}", section.name)?;
            for entry in &section.entries {
                writeln!(f, "  {}: {} x {}", entry.label, entry.size[0], entry.size[1])?;
            }
        }
        Ok(())
    }
}
