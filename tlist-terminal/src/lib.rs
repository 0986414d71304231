//! Terminal frontend for transformation lists
use anyhow::{Context, Result};
use crossterm::style::Color;
use log::{info, warn};
use std::cell::Cell;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tlist_core::{TaggedTransform, TransformComposer};

pub mod document;
pub mod renderer;

pub use document::TransformDocument;
pub use renderer::MatrixPrinter;

/// Determinants smaller than this are reported as singular.
const SINGULAR_EPSILON: f64 = 1e-12;

/// A transformation list bound to the file it was loaded from
pub struct TerminalApp {
    path: PathBuf,
    composer: TransformComposer,
    printer: MatrixPrinter,
    modified: Rc<Cell<bool>>,
}

impl TerminalApp {
    /// Load the list stored at `path`.
    ///
    /// With `allow_missing`, a file that does not exist yet opens as an empty list.
    pub fn open(path: &Path, allow_missing: bool, printer: MatrixPrinter) -> Result<Self> {
        let document = TransformDocument::load(path, allow_missing)?;
        let mut composer = TransformComposer::new();
        document.restore_into(&mut composer)?;
        info!(
            "loaded {} transformations from {}",
            composer.len(),
            path.display()
        );

        let modified = Rc::new(Cell::new(false));
        let flag = Rc::clone(&modified);
        composer.subscribe(move |composer: &TransformComposer| {
            flag.set(true);
            let determinant = composer.complete_transform().matrix().determinant();
            if determinant.abs() < SINGULAR_EPSILON {
                warn!("complete transformation is singular");
            }
        });

        Ok(Self {
            path: path.to_path_buf(),
            composer,
            printer,
            modified,
        })
    }

    pub fn composer(&self) -> &TransformComposer {
        &self.composer
    }

    pub fn is_modified(&self) -> bool {
        self.modified.get()
    }

    /// Print every entry followed by the composite up to and including it.
    pub fn show<W: Write>(&self, writer: &mut W) -> Result<()> {
        if self.composer.is_empty() {
            self.printer
                .print_heading(writer, "(no transformations)", Color::DarkGrey)?;
        }

        for (index, entry) in self.composer.iter().enumerate() {
            self.printer.print_entry(writer, index, entry)?;
            let prefix = self.composer.prefix_transform(index + 1)?;
            self.printer
                .print_heading(writer, &format!("  composite of 0..={index}"), Color::DarkGrey)?;
            self.printer.print_matrix(writer, &prefix)?;
        }

        self.printer
            .print_heading(writer, "complete transformation", Color::White)?;
        self.printer
            .print_matrix(writer, &self.composer.complete_transform())?;
        writer.flush()?;
        Ok(())
    }

    /// Print one composite: the first `prefix` entries, the scaling transform, or everything.
    pub fn compose<W: Write>(
        &self,
        writer: &mut W,
        prefix: Option<usize>,
        scaling: bool,
    ) -> Result<()> {
        let (title, transform) = match (prefix, scaling) {
            (Some(count), _) => (
                format!("composite of the first {count} transformations"),
                self.composer
                    .prefix_transform(count)
                    .context("Invalid prefix length")?,
            ),
            (None, true) => {
                warn!("scaling transformation may still contain rotation");
                ("scaling transformation".to_string(), self.composer.scaling_transform())
            }
            (None, false) => (
                "complete transformation".to_string(),
                self.composer.complete_transform(),
            ),
        };

        self.printer.print_heading(writer, &title, Color::White)?;
        self.printer.print_matrix(writer, &transform)?;
        writer.flush()?;
        Ok(())
    }

    pub fn append(&mut self, entry: TaggedTransform) {
        self.composer.append(entry);
    }

    pub fn remove(&mut self, index: usize) -> Result<TaggedTransform> {
        Ok(self.composer.remove(index)?)
    }

    pub fn clear(&mut self) {
        self.composer.clear();
    }

    /// Write the list back to its file if anything changed.
    pub fn save(&self) -> Result<()> {
        if !self.is_modified() {
            info!("no changes to save");
            return Ok(());
        }
        TransformDocument::from_composer(&self.composer).save(&self.path)
    }
}

/// Parse `X,Y,Z` into three numbers.
pub fn parse_vector(input: &str) -> std::result::Result<[f64; 3], String> {
    let values = input
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid number in `{input}`: {e}"))?;

    match values.as_slice() {
        [x, y, z] => Ok([*x, *y, *z]),
        _ => Err(format!("expected three comma-separated values, got `{input}`")),
    }
}
