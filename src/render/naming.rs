// File: src/render/naming.rs
use serde::{Deserialize, Serialize};

/// Characters that are not allowed in file names on common filesystems.
const UNSAFE_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Width numeric field values are zero-padded to.
pub const NUMERIC_WIDTH: usize = 5;

/// How an image file is named from its row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingScheme {
    /// `{seq}_{field1}_{field2}_{field3}.png`, seq counting from 1
    Indexed,
    /// `{field1}_{field2}_{field3}.png`
    Content,
    /// `{value}.png` where value comes from the named column
    Column(String),
}

/// Replaces filesystem-unsafe characters with `_`.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if UNSAFE_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Left-pads an all-digit value with zeros to five places; other values pass through.
pub fn pad_numeric(value: &str) -> String {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        format!("{:0>width$}", value, width = NUMERIC_WIDTH)
    } else {
        value.to_string()
    }
}

/// The file name (with `.png`) for one row.
pub fn file_name(scheme: &NamingScheme, seq: usize, fields: &[&str], column_value: Option<&str>) -> String {
    let stem = match scheme {
        NamingScheme::Indexed => {
            let mut parts = vec![seq.to_string()];
            parts.extend(fields.iter().map(|f| f.trim().to_string()));
            parts.join("_")
        }
        NamingScheme::Content => fields.iter().map(|f| f.trim()).collect::<Vec<_>>().join("_"),
        NamingScheme::Column(_) => column_value.unwrap_or_default().trim().to_string(),
    };
    format!("{}.png", sanitize(&stem))
}
