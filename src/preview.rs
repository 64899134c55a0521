// File: src/preview.rs
use crate::core::types::StimulusRow;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{self, Write};

/// Prints rows as tab-separated lines, each cell in its display color.
/// Cells without a color use the terminal's default foreground.
pub fn print_rows<W: Write>(out: &mut W, rows: &[StimulusRow], limit: Option<usize>) -> io::Result<()> {
    let shown = limit.unwrap_or(rows.len()).min(rows.len());
    for (i, row) in rows.iter().take(shown).enumerate() {
        queue!(out, Print(format!("{:>4}  ", i + 1)))?;
        for (j, cell) in row.cells().into_iter().enumerate() {
            if j > 0 {
                queue!(out, Print("\t"))?;
            }
            match cell.display_color() {
                Some(c) => queue!(
                    out,
                    SetForegroundColor(Color::Rgb { r: c.r, g: c.g, b: c.b }),
                    Print(&cell.text),
                    ResetColor
                )?,
                None => queue!(out, Print(&cell.text))?,
            }
        }
        queue!(out, Print("\n"))?;
    }
    if shown < rows.len() {
        queue!(out, Print(format!("  ... {} more rows\n", rows.len() - shown)))?;
    }
    out.flush()
}
