//! Flatpack CLI - Command-line interface for parametric flat-pack furniture
//!
//! # Logging
//!
//! `-v` enables info output, `-vv` debug and `-vvv` trace. `RUST_LOG`
//! overrides the flag when set:
//!
//! ```bash
//! RUST_LOG=flatpack_core=debug flatpack export -o table.json
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use flatpack_core::assembly::Family;
use flatpack_engine::export::DEFAULT_MESH_PATH;
use flatpack_engine::pieces::DEFAULT_PIECES_PATH;
use flatpack_engine::{Engine, ExportFormat, ExportOptions, FurnitureConfig, PreviewOptions};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "flatpack")]
#[command(about = "Parametric flat-pack furniture layouts", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Furniture configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the family selected by the configuration
    #[arg(short, long, global = true)]
    family: Option<Family>,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// three.js BufferGeometry JSON
    Json,
    /// Wavefront OBJ
    Obj,
    /// STEP faceted B-rep
    Step,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Obj => ExportFormat::Obj,
            FormatArg::Step => ExportFormat::Step,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the assembly outline and cut list
    Show {
        /// Outline only, without individual pieces
        #[arg(long)]
        brief: bool,
    },

    /// Export geometry (format auto-detected from extension)
    Export {
        /// Output file
        #[arg(short, long, default_value = DEFAULT_MESH_PATH)]
        output: PathBuf,

        /// Output format, overriding the extension
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Longest triangle edge in inches; faces are two triangles otherwise
        #[arg(long)]
        max_edge: Option<f64>,
    },

    /// Write the cut list
    Pieces {
        /// Output JSON file
        #[arg(short, long, default_value = DEFAULT_PIECES_PATH)]
        output: PathBuf,

        /// Also replace the `PIECES = ...;` line of this script
        #[arg(long)]
        patch: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn init_tracing(verbose: u8) {
    let filter = if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "flatpack_core=info,flatpack_engine=info",
            2 => "flatpack_core=debug,flatpack_engine=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref(), cli.family)?;

    match cli.command {
        Commands::Show { brief } => run_show(&config, brief)?,
        Commands::Export {
            output,
            format,
            max_edge,
        } => run_export(&config, output, format, max_edge)?,
        Commands::Pieces { output, patch } => run_pieces(&config, &output, patch.as_deref())?,
        Commands::Config => print!("{}", config.to_toml_string()?),
    }

    Ok(())
}

fn load_config(path: Option<&Path>, family: Option<Family>) -> Result<FurnitureConfig> {
    let mut config = FurnitureConfig::resolve(path)?;
    if let Some(family) = family {
        config.family = family;
    }
    Ok(config)
}

fn load_engine(config: &FurnitureConfig) -> Result<Engine> {
    let mut engine = Engine::new();
    engine.load_config(config)?;
    Ok(engine)
}

fn run_show(config: &FurnitureConfig, brief: bool) -> Result<()> {
    let engine = load_engine(config)?;
    let options = PreviewOptions::default()
        .with_title(format!("Flatpack: {}", config.family))
        .with_pieces(!brief);
    engine.preview(&options)
}

fn run_export(
    config: &FurnitureConfig,
    output: PathBuf,
    format: Option<FormatArg>,
    max_edge: Option<f64>,
) -> Result<()> {
    if let Some(max_edge) = max_edge {
        anyhow::ensure!(
            max_edge.is_finite() && max_edge > 0.0,
            "--max-edge must be a positive length, got {max_edge}"
        );
    }

    let engine = load_engine(config)?;
    let mut options = ExportOptions::new(output);
    if let Some(format) = format {
        options = options.with_format(format.into());
    }
    if let Some(max_edge) = max_edge {
        options = options.with_max_edge(max_edge);
    }

    let result = engine.export(&options)?;
    println!("{result}");
    Ok(())
}

fn run_pieces(config: &FurnitureConfig, output: &Path, patch: Option<&Path>) -> Result<()> {
    let engine = load_engine(config)?;

    // A missing marker aborts before pieces.json is written
    if let Some(script) = patch {
        engine.patch_pieces(script)?;
        println!("Patched {}", script.display());
    }

    let summary = engine.write_pieces(output)?;
    print!("{summary}");
    println!("Wrote {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_export_defaults() {
        let cli = Cli::try_parse_from(["flatpack", "export"]).expect("parses");
        let Commands::Export {
            output,
            format,
            max_edge,
        } = cli.command
        else {
            panic!("expected export");
        };
        assert_eq!(output, PathBuf::from("table.json"));
        assert_eq!(format, None);
        assert_eq!(max_edge, None);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "flatpack",
            "pieces",
            "--patch",
            "html/index.js",
            "--family",
            "table-and-bench",
            "-vv",
        ])
        .expect("parses");

        assert_eq!(cli.family, Some(Family::TableAndBench));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Commands::Pieces { patch: Some(ref p), .. } if p == Path::new("html/index.js")
        ));
    }

    #[test]
    fn test_unknown_family_is_rejected() {
        assert!(Cli::try_parse_from(["flatpack", "show", "--family", "sofa"]).is_err());
    }
}
