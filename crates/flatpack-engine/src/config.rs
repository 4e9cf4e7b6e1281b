//! Furniture configuration files
//!
//! A TOML file selects the family to build and overrides any of the built-in
//! defaults:
//!
//! ```toml
//! family = "table-and-bench"
//! bench_clearance = 6.0
//!
//! [table]
//! width = 40.0
//! split_top = false
//!
//! [bench]
//! bench_height = 18.0
//! ```
//!
//! Settings are looked up in `{config_dir}/flatpack/furniture.toml` when no
//! path is given.

use anyhow::{Context, Result};
use flatpack_core::assembly::{Family, Furniture};
use flatpack_core::spec::{
    BenchParams, BenchSpec, CompositeSpec, DEFAULT_BENCH_CLEARANCE, PedestalTableParams,
    PedestalTableSpec, TableParams, TableSpec,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Everything needed to build one piece of furniture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FurnitureConfig {
    pub family: Family,
    /// Gap between the table and the bench when both are built
    pub bench_clearance: f64,
    pub table: TableParams,
    pub pedestal_table: PedestalTableParams,
    pub bench: BenchParams,
}

impl Default for FurnitureConfig {
    fn default() -> Self {
        Self {
            family: Family::default(),
            bench_clearance: DEFAULT_BENCH_CLEARANCE,
            table: TableParams::default(),
            pedestal_table: PedestalTableParams::default(),
            bench: BenchParams::default(),
        }
    }
}

/// Get the path to the default configuration file
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("flatpack").join("furniture.toml"))
}

impl FurnitureConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid furniture configuration")
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Read a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        info!(path = %path.display(), family = %config.family, "loaded configuration");
        Ok(config)
    }

    /// Load `path` if given, else the default file if it exists, else the
    /// built-in defaults
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                debug!("no configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Validate the section for the selected family
    pub fn build(&self) -> Result<Furniture> {
        let furniture = match self.family {
            Family::TableWithLegs => Furniture::TableWithLegs(self.table_spec()?),
            Family::TableWithPedestals => Furniture::TableWithPedestals(
                PedestalTableSpec::new(self.pedestal_table.clone())
                    .context("Invalid [pedestal_table] section")?,
            ),
            Family::Bench => Furniture::Bench(self.bench_spec()?),
            Family::TableAndBench => Furniture::TableAndBench(
                CompositeSpec::new(self.table_spec()?, self.bench_spec()?, self.bench_clearance)
                    .context("Table and bench cannot be combined")?,
            ),
        };
        Ok(furniture)
    }

    fn table_spec(&self) -> Result<TableSpec> {
        TableSpec::new(self.table.clone()).context("Invalid [table] section")
    }

    fn bench_spec(&self) -> Result<BenchSpec> {
        BenchSpec::new(self.bench.clone()).context("Invalid [bench] section")
    }
}
