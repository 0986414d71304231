//! Coloured matrix printer for terminal output
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use tlist_core::{TaggedTransform, Transform, TransformKind};

/// Values closer to zero than this are printed dimmed.
const ZERO_THRESHOLD: f64 = 1e-12;

/// Writes matrices and list entries to a terminal or any other writer
pub struct MatrixPrinter {
    precision: usize,
    color: bool,
}

impl MatrixPrinter {
    pub fn new(precision: usize, color: bool) -> Self {
        Self { precision, color }
    }

    /// Print one list entry: its position, kind and matrix.
    pub fn print_entry<W: Write>(
        &self,
        writer: &mut W,
        index: usize,
        entry: &TaggedTransform,
    ) -> std::io::Result<()> {
        self.print_heading(
            writer,
            &format!("[{index}] {}", entry.kind()),
            kind_color(entry.kind()),
        )?;
        self.print_matrix(writer, entry.transform())
    }

    pub fn print_heading<W: Write>(
        &self,
        writer: &mut W,
        title: &str,
        color: Color,
    ) -> std::io::Result<()> {
        self.set_color(writer, color)?;
        writer.queue(Print(title))?;
        self.reset_color(writer)?;
        writer.queue(Print('\n'))?;
        Ok(())
    }

    pub fn print_matrix<W: Write>(
        &self,
        writer: &mut W,
        transform: &Transform,
    ) -> std::io::Result<()> {
        let rows = transform.to_rows();
        let width = self.column_width(&rows);

        for row in &rows {
            writer.queue(Print("  "))?;
            for value in row {
                let color = if value.abs() < ZERO_THRESHOLD {
                    Color::DarkGrey
                } else {
                    Color::White
                };
                self.set_color(writer, color)?;
                writer.queue(Print(format!(
                    " {:>width$.prec$}",
                    normalize_zero(*value),
                    width = width,
                    prec = self.precision
                )))?;
            }
            self.reset_color(writer)?;
            writer.queue(Print('\n'))?;
        }
        Ok(())
    }

    fn column_width(&self, rows: &[[f64; 4]; 4]) -> usize {
        rows.iter()
            .flatten()
            .map(|value| format!("{:.prec$}", normalize_zero(*value), prec = self.precision).len())
            .max()
            .unwrap_or(1)
    }

    fn set_color<W: Write>(&self, writer: &mut W, color: Color) -> std::io::Result<()> {
        if self.color {
            writer.queue(SetForegroundColor(color))?;
        }
        Ok(())
    }

    fn reset_color<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        if self.color {
            writer.queue(ResetColor)?;
        }
        Ok(())
    }
}

impl Default for MatrixPrinter {
    fn default() -> Self {
        Self::new(4, true)
    }
}

/// Colour used for an entry heading
pub fn kind_color(kind: TransformKind) -> Color {
    match kind {
        TransformKind::Translation => Color::Green,
        TransformKind::Rotation => Color::Cyan,
        TransformKind::Scale => Color::Magenta,
        TransformKind::Landmark => Color::Blue,
        TransformKind::User => Color::Yellow,
    }
}

/// Avoid printing `-0.0000`.
fn normalize_zero(value: f64) -> f64 {
    if value.abs() < ZERO_THRESHOLD {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(printer: &MatrixPrinter, transform: &Transform) -> String {
        let mut out = Vec::new();
        printer.print_matrix(&mut out, transform).unwrap();
        out.flush().unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_matrix_layout() {
        let printer = MatrixPrinter::new(1, false);
        let text = render(&printer, &Transform::translation(-12.5, 0.0, 3.0));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "     1.0   0.0   0.0 -12.5");
        assert_eq!(lines[3], "     0.0   0.0   0.0   1.0");
    }

    #[test]
    fn test_negative_zero_is_hidden() {
        let printer = MatrixPrinter::new(2, false);
        let text = render(&printer, &Transform::scale(-0.0, 1.0, 1.0));
        assert!(!text.contains("-0.00"));
    }

    #[test]
    fn test_color_output_has_escape_codes() {
        let printer = MatrixPrinter::new(2, true);
        let text = render(&printer, &Transform::identity());
        assert!(text.contains('\u{1b}'));
    }

    #[test]
    fn test_entry_heading() {
        let printer = MatrixPrinter::new(0, false);
        let mut out = Vec::new();
        let entry = TaggedTransform::scale(2.0, 2.0, 2.0).unwrap();
        printer.print_entry(&mut out, 3, &entry).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("[3] scale\n"));
    }
}
