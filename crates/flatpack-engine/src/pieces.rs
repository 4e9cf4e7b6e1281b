//! Cut-list output
//!
//! The companion page reads the cut list either from `pieces.json` or from a
//! `PIECES = {...};` assignment in its script. Both are written from a
//! [`PieceSummary`].

use flatpack_core::summary::PieceSummary;
use regex::{Captures, Regex};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{info, warn};

/// File the companion page loads when nothing else is asked for
pub const DEFAULT_PIECES_PATH: &str = "pieces.json";

/// One `PIECES = ...;` assignment on a line of its own, optionally declared
#[allow(clippy::expect_used)]
static PIECES_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([ \t]*(?:(?:var|let|const)[ \t]+)?PIECES[ \t]*=[ \t]*)[^\n]*?;([ \t]*\r?)$")
        .expect("PIECES pattern is a valid regex")
});

/// Errors that can occur when writing the cut list
#[derive(Error, Debug)]
pub enum PiecesError {
    /// The script has no `PIECES = ...;` line to replace
    #[error("No `PIECES = ...;` assignment found in {0}")]
    MarkerNotFound(PathBuf),

    #[error("Failed to encode cut list: {0}")]
    Encode(#[from] flatpack_core::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> PiecesError + '_ {
    move |source| PiecesError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Write the cut list as pretty-printed JSON
pub fn write_pieces_json(summary: &PieceSummary, path: &Path) -> Result<(), PiecesError> {
    let json = summary.to_json_pretty()?;
    write_atomic(path, &format!("{json}\n"))?;
    info!(path = %path.display(), sections = summary.sections.len(), "wrote cut list");
    Ok(())
}

/// Replace the first `PIECES = ...;` assignment of `script` with the cut list.
///
/// Returns the new script text and the number of assignments found.
pub fn patch_pieces(script: &str, summary: &PieceSummary) -> Result<Option<(String, usize)>, PiecesError> {
    let found = PIECES_ASSIGNMENT.find_iter(script).count();
    if found == 0 {
        return Ok(None);
    }
    let json = summary.to_json()?;
    let patched = PIECES_ASSIGNMENT.replace(script, |caps: &Captures<'_>| format!("{}{json};{}", &caps[1], &caps[2]));
    Ok(Some((patched.into_owned(), found)))
}

/// Patch the companion script at `path` in place.
///
/// Nothing is written unless the assignment is found, and the new file
/// replaces the old one in a single rename.
pub fn patch_pieces_script(summary: &PieceSummary, path: &Path) -> Result<(), PiecesError> {
    let script = fs::read_to_string(path).map_err(io_error(path))?;
    let Some((patched, found)) = patch_pieces(&script, summary)? else {
        return Err(PiecesError::MarkerNotFound(path.to_path_buf()));
    };
    if found > 1 {
        warn!(
            path = %path.display(),
            found,
            "several PIECES assignments, only the first was replaced"
        );
    }
    write_atomic(path, &patched)?;
    info!(path = %path.display(), "patched cut list");
    Ok(())
}

fn write_atomic(path: &Path, contents: &str) -> Result<(), PiecesError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let temp = path.with_file_name(format!(".{file_name}.tmp"));

    fs::write(&temp, contents).map_err(io_error(&temp))?;
    if let Err(source) = fs::rename(&temp, path) {
        let _ = fs::remove_file(&temp);
        return Err(PiecesError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatpack_core::assembly::compose_bench;
    use flatpack_core::spec::{BenchParams, BenchSpec};

    fn bench_summary() -> PieceSummary {
        let spec = BenchSpec::new(BenchParams::default()).expect("valid bench");
        PieceSummary::from_assembly(&compose_bench(&spec))
    }

    const BENCH_JSON: &str = r#"{"bench":{"top":[95.0,15.0],"spanner":[68.0,6.0],"legs (2)":[16.5,15.0]}}"#;

    #[test]
    fn test_patch_replaces_assignment() {
        let script = "var x = 1;\nvar PIECES = {\"old\": {}};\nfunction f() {}\n";
        let (patched, found) = patch_pieces(script, &bench_summary())
            .expect("encodes")
            .expect("marker present");

        assert_eq!(found, 1);
        assert_eq!(
            patched,
            format!("var x = 1;\nvar PIECES = {BENCH_JSON};\nfunction f() {{}}\n")
        );
    }

    #[test]
    fn test_patch_keeps_declaration_and_indent() {
        let script = "  const PIECES={};\n";
        let (patched, _) = patch_pieces(script, &bench_summary())
            .expect("encodes")
            .expect("marker present");
        assert_eq!(patched, format!("  const PIECES={BENCH_JSON};\n"));
    }

    #[test]
    fn test_patch_only_first_assignment() {
        let script = "PIECES = 1;\nPIECES = 2;\n";
        let (patched, found) = patch_pieces(script, &bench_summary())
            .expect("encodes")
            .expect("marker present");
        assert_eq!(found, 2);
        assert_eq!(patched, format!("PIECES = {BENCH_JSON};\nPIECES = 2;\n"));
    }

    #[test]
    fn test_missing_marker() {
        let script = "for (var name in PIECES) {}\nvar ALL_PIECES = 3;\n";
        assert!(patch_pieces(script, &bench_summary()).expect("encodes").is_none());
    }
}
