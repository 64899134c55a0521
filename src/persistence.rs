// File: src/persistence.rs
use crate::core::alphabet::AlphabetKind;
use crate::core::types::{Cell, StimulusRow, TransformType, STIMULUS_COLUMNS};
use crate::error::{Result, StimulusError};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// On-disk encoding of a stimulus table, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// `.json`, pretty-printed and hand-editable
    Json,
    /// `.bin`, compact binary
    Binary,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()) {
            Some(ext) if ext == "json" => Ok(TableFormat::Json),
            Some(ext) if ext == "bin" => Ok(TableFormat::Binary),
            _ => Err(StimulusError::invalid(format!(
                "unsupported table file '{}' (use .json or .bin)",
                path.display()
            ))),
        }
    }
}

/// A header row plus data rows. Each cell may carry a display color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StimulusTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl StimulusTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    /// A table with the generated-set header `Title, Wrong_Option, Right_Option`.
    pub fn from_rows(rows: Vec<StimulusRow>) -> Self {
        Self {
            columns: STIMULUS_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: rows.into_iter().map(StimulusRow::into_cells).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a named column; header names are matched after trimming.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.trim() == name)
            .ok_or_else(|| StimulusError::missing(format!("column '{}' not found in table header", name)))
    }

    /// The cell at a 0-based row and column, `None` past the end of a short row.
    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Reads the table back as generated rows.
    pub fn stimulus_rows(&self) -> Result<Vec<StimulusRow>> {
        let idx: Vec<usize> = STIMULUS_COLUMNS
            .iter()
            .map(|name| self.column_index(name))
            .collect::<Result<_>>()?;
        let cell = |row: &[Cell], i: usize| row.get(idx[i]).cloned().unwrap_or_default();
        Ok(self
            .rows
            .iter()
            .map(|row| StimulusRow {
                title: cell(row, 0),
                wrong_option: cell(row, 1),
                right_option: cell(row, 2),
            })
            .collect())
    }
}

/// Writes the table atomically: a temp file in the target directory is
/// filled, flushed and then renamed over `path`.
pub fn save_table(table: &StimulusTable, path: &Path) -> Result<()> {
    let format = TableFormat::from_path(path)?;
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        match format {
            TableFormat::Json => serde_json::to_writer_pretty(&mut writer, table)?,
            TableFormat::Binary => bincode::serialize_into(&mut writer, table)?,
        }
        writer.flush()?;
    }

    temp_file.persist(path).map_err(|e| StimulusError::Io(e.error))?;
    tracing::info!(path = %path.display(), rows = table.len(), "saved stimulus table");
    Ok(())
}

pub fn load_table(path: &Path) -> Result<StimulusTable> {
    let format = TableFormat::from_path(path)?;
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            StimulusError::missing(format!("table file '{}' does not exist", path.display()))
        }
        _ => StimulusError::Io(e),
    })?;
    let reader = BufReader::new(file);
    let table: StimulusTable = match format {
        TableFormat::Json => serde_json::from_reader(reader)?,
        TableFormat::Binary => bincode::deserialize_from(reader)?,
    };
    tracing::debug!(path = %path.display(), rows = table.len(), "loaded stimulus table");
    Ok(table)
}

/// `<data_dir>/<Task>-<Style>/<task>_<style>_<type>_dataset.json`
pub fn default_table_path(data_dir: &Path, alphabet: AlphabetKind, transform: TransformType) -> PathBuf {
    let task = alphabet.task().name();
    let style = alphabet.style();
    data_dir
        .join(format!("{}-{}", capitalize(task), capitalize(style)))
        .join(format!("{}_{}_{}_dataset.json", task, style, transform))
}

/// `<image_dir>/<Task>-<Style>-image/<type>/`
pub fn default_image_dir(image_dir: &Path, alphabet: AlphabetKind, transform: TransformType) -> PathBuf {
    image_dir
        .join(format!(
            "{}-{}-image",
            capitalize(alphabet.task().name()),
            capitalize(alphabet.style())
        ))
        .join(transform.to_string())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
