//! Rasterizes stimulus table rows into fixed-size trial images.
//!
//! Rows are independent: each one gets its own canvas, is encoded into a
//! temp file beside the destination and renamed into place. A row that fails
//! is logged and skipped; the rest of the table is still rendered.

pub mod layout;
pub mod naming;
pub mod typeface;

use crate::core::color::DisplayColor;
use crate::error::{Result, StimulusError};
use crate::persistence::StimulusTable;
use image::{ImageFormat, RgbImage};
use layout::{RenderConfig, RowRange};
use naming::{file_name, pad_numeric, NamingScheme};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use typeface::Typeface;

/// Text and color for one slot of one row, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderField {
    pub text: String,
    pub color: DisplayColor,
}

/// Outcome of rendering a table.
#[derive(Debug, Default)]
pub struct RenderReport {
    pub written: Vec<PathBuf>,
    /// (1-based row, reason) for every skipped row
    pub failed: Vec<(usize, String)>,
}

impl RenderReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct Renderer {
    config: RenderConfig,
    typeface: Typeface,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        let typeface = Typeface::load(config.font_path.as_deref());
        Ok(Self { config, typeface })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Draws one row. The canvas always has the configured dimensions.
    pub fn render_fields(&self, fields: &[RenderField]) -> RgbImage {
        let config = &self.config;
        let mut canvas = RgbImage::from_pixel(config.width, config.height, config.background.to_rgb());
        for (slot, field) in config.slots.iter().zip(fields) {
            let center = slot.anchor_px(config.width, config.height);
            self.typeface
                .draw_centered(&mut canvas, &field.text, center, slot.font_size_px(), field.color.to_rgb());
        }
        canvas
    }

    /// Reads the configured slots out of a table row.
    fn fields_for(&self, table: &StimulusTable, columns: &[usize], row: usize) -> Vec<RenderField> {
        columns
            .iter()
            .map(|&col| {
                let cell = table.cell(row, col).cloned().unwrap_or_default();
                let text = cell.text.trim();
                RenderField {
                    text: if self.config.pad_numeric { pad_numeric(text) } else { text.to_string() },
                    color: cell.display_color().unwrap_or(self.config.default_text_color),
                }
            })
            .collect()
    }

    /// Renders the selected rows of `table` into `out_dir`.
    ///
    /// Missing columns abort before anything is drawn; per-row failures are
    /// collected in the report.
    pub fn render_table(&self, table: &StimulusTable, out_dir: &Path, range: RowRange) -> Result<RenderReport> {
        let columns: Vec<usize> = self
            .config
            .slots
            .iter()
            .map(|slot| table.column_index(&slot.column))
            .collect::<Result<_>>()?;
        let name_column = match &self.config.naming {
            NamingScheme::Column(name) => Some(table.column_index(name)?),
            _ => None,
        };
        fs::create_dir_all(out_dir)?;

        let indices = range.indices(table.len());
        tracing::info!(
            rows = indices.len(),
            out_dir = %out_dir.display(),
            "rendering {}x{} images",
            self.config.width,
            self.config.height
        );

        let mut report = RenderReport::default();
        for row in indices {
            let seq = row + 1;
            let fields = self.fields_for(table, &columns, row);
            let name_value = name_column.map(|col| {
                let raw = table.cell(row, col).map(|c| c.text.trim().to_string()).unwrap_or_default();
                if self.config.pad_numeric { pad_numeric(&raw) } else { raw }
            });
            match self.render_row(seq, &fields, name_value.as_deref(), out_dir) {
                Ok(path) => {
                    tracing::debug!(row = seq, path = %path.display(), "rendered");
                    report.written.push(path);
                }
                Err(e) => {
                    tracing::warn!(row = seq, "skipping row: {}", e);
                    report.failed.push((seq, e.to_string()));
                }
            }
        }
        tracing::info!(written = report.written.len(), failed = report.failed.len(), "rendering finished");
        Ok(report)
    }

    fn render_row(&self, seq: usize, fields: &[RenderField], name_value: Option<&str>, out_dir: &Path) -> Result<PathBuf> {
        let texts: Vec<&str> = fields.iter().map(|f| f.text.as_str()).collect();
        let name = file_name(&self.config.naming, seq, &texts, name_value);
        if name == ".png" {
            return Err(StimulusError::Render { row: seq, reason: "empty file name".into() });
        }
        let path = out_dir.join(name);
        let canvas = self.render_fields(fields);
        save_png(&canvas, &path).map_err(|e| StimulusError::Render { row: seq, reason: e.to_string() })?;
        Ok(path)
    }
}

/// Encodes `canvas` as PNG into a temp file and renames it over `path`.
/// The temp file is removed if encoding fails.
pub fn save_png(canvas: &RgbImage, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut temp_file = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file_mut());
        canvas.write_to(&mut writer, ImageFormat::Png)?;
        writer.flush()?;
    }
    temp_file.persist(path).map_err(|e| StimulusError::Io(e.error))?;
    Ok(())
}
