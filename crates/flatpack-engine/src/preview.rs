//! Scene preview for the Flatpack engine
//!
//! Displays go through the [`Viewer`] trait. The built-in [`ConsoleViewer`]
//! prints an outline of the assembly tree with every piece's size and
//! placement, followed by the cut list.

use crate::scene::Scene;
use anyhow::Result;
use flatpack_core::assembly::Assembly;
use std::io::Write;

/// Options for previewing a scene
#[derive(Debug, Clone)]
pub struct PreviewOptions {
    /// Heading printed above the outline
    pub title: String,

    /// List every primitive, not only the assembly totals
    pub show_pieces: bool,

    /// Append the cut list
    pub show_summary: bool,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            title: "Flatpack Preview".to_string(),
            show_pieces: true,
            show_summary: true,
        }
    }
}

impl PreviewOptions {
    /// Create options with a custom title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_pieces(mut self, show: bool) -> Self {
        self.show_pieces = show;
        self
    }

    pub fn with_summary(mut self, show: bool) -> Self {
        self.show_summary = show;
        self
    }
}

/// Something that can display a scene
pub trait Viewer {
    fn show(&mut self, scene: &Scene, options: &PreviewOptions) -> Result<()>;
}

/// Prints a text outline to any writer
pub struct ConsoleViewer<W: Write> {
    out: W,
}

impl ConsoleViewer<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleViewer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn outline(&mut self, assembly: &Assembly, depth: usize, options: &PreviewOptions) -> Result<()> {
        let indent = "  ".repeat(depth);
        write!(self.out, "{indent}{} [{:?} frame, {} pieces]", assembly.name(), assembly.frame(), assembly.len())?;
        if let Some(bounds) = assembly.bounds() {
            let size = bounds.size();
            write!(self.out, " {} x {} x {}", size.x, size.y, size.z)?;
        }
        writeln!(self.out)?;

        if options.show_pieces {
            for primitive in assembly.primitives() {
                let at = primitive.offset;
                writeln!(
                    self.out,
                    "{indent}  {:<14} {:<20} at ({}, {}, {})",
                    primitive.kind.label(),
                    primitive.dims.to_string(),
                    at.x,
                    at.y,
                    at.z
                )?;
            }
        }
        for child in assembly.children() {
            self.outline(child, depth + 1, options)?;
        }
        Ok(())
    }
}

impl<W: Write> Viewer for ConsoleViewer<W> {
    fn show(&mut self, scene: &Scene, options: &PreviewOptions) -> Result<()> {
        writeln!(self.out, "{}", options.title)?;
        writeln!(self.out, "{}", "=".repeat(options.title.len()))?;
        if let Some(name) = scene.source_name() {
            writeln!(self.out, "from {name}")?;
        }
        self.outline(&scene.assembly, 0, options)?;

        if options.show_summary {
            writeln!(self.out)?;
            write!(self.out, "{}", scene.summary())?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Show a scene on the console
pub fn run_preview(scene: &Scene, options: &PreviewOptions) -> Result<()> {
    ConsoleViewer::stdout().show(scene, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatpack_core::assembly::Furniture;
    use flatpack_core::spec::{BenchParams, BenchSpec};

    fn render(options: &PreviewOptions) -> String {
        let spec = BenchSpec::new(BenchParams::default()).expect("valid bench");
        let scene = Scene::new(Furniture::Bench(spec)).expect("composes");
        let mut viewer = ConsoleViewer::new(Vec::new());
        viewer.show(&scene, options).expect("writes to memory");
        String::from_utf8(viewer.into_inner()).expect("utf8")
    }

    #[test]
    fn test_preview_options_builder() {
        let opts = PreviewOptions::default()
            .with_title("Bench")
            .with_pieces(false)
            .with_summary(false);

        assert_eq!(opts.title, "Bench");
        assert!(!opts.show_pieces);
        assert!(!opts.show_summary);
    }

    #[test]
    fn test_outline_lists_pieces_and_summary() {
        let text = render(&PreviewOptions::default());
        assert!(text.starts_with("Flatpack Preview\n================\n"));
        assert!(text.contains("bench [Tabletop frame, 4 pieces] 95 x 15 x 18"));
        assert!(text.contains("bench_spanner"));
        assert!(text.contains("  spanner: 68 x 6"));
    }

    #[test]
    fn test_outline_without_pieces() {
        let text = render(&PreviewOptions::default().with_pieces(false).with_summary(false));
        assert!(!text.contains("bench_leg"));
        assert!(!text.contains("legs (2)"));
    }
}
