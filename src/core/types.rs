// src/core/types.rs
use crate::core::color::DisplayColor;
use crate::error::{Result, StimulusError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Header of every generated stimulus table.
pub const STIMULUS_COLUMNS: [&str; 3] = ["Title", "Wrong_Option", "Right_Option"];

/// The cognitive paradigm a stimulus set is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Task {
    Flanker,
    Stroop,
}

impl Task {
    pub fn name(self) -> &'static str {
        match self {
            Task::Flanker => "flanker",
            Task::Stroop => "stroop",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Task {
    type Err = StimulusError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flanker" => Ok(Task::Flanker),
            "stroop" => Ok(Task::Stroop),
            other => Err(StimulusError::invalid(format!(
                "unknown task '{}' (expected flanker or stroop)",
                other
            ))),
        }
    }
}

/// One of the four fixed layout rules mapping a symbol pair to a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TransformType {
    Type1,
    Type2,
    Type3,
    Type4,
}

impl TransformType {
    pub const ALL: [TransformType; 4] = [
        TransformType::Type1,
        TransformType::Type2,
        TransformType::Type3,
        TransformType::Type4,
    ];

    pub fn number(self) -> u8 {
        match self {
            TransformType::Type1 => 1,
            TransformType::Type2 => 2,
            TransformType::Type3 => 3,
            TransformType::Type4 => 4,
        }
    }

    pub fn from_number(n: u8) -> Result<Self> {
        match n {
            1 => Ok(TransformType::Type1),
            2 => Ok(TransformType::Type2),
            3 => Ok(TransformType::Type3),
            4 => Ok(TransformType::Type4),
            _ => Err(StimulusError::invalid(format!(
                "transform type {} is out of range (1-4)",
                n
            ))),
        }
    }
}

impl fmt::Display for TransformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type{}", self.number())
    }
}

impl FromStr for TransformType {
    type Err = StimulusError;

    /// Accepts `type1`..`type4` or a bare `1`..`4`.
    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        let digits = lowered.strip_prefix("type").unwrap_or(&lowered);
        digits
            .parse::<u8>()
            .map_err(|_| StimulusError::invalid(format!("unknown transform type '{}'", s.trim())))
            .and_then(Self::from_number)
    }
}

/// A symbol drawn from an alphabet. Color symbols carry their display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub label: &'static str,
    pub color: Option<DisplayColor>,
}

/// An ordered pair of distinct symbols from the same alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolPair {
    pub primary: Symbol,
    pub secondary: Symbol,
}

impl SymbolPair {
    /// Returns `None` on the diagonal (`primary == secondary`).
    pub fn new(primary: Symbol, secondary: Symbol) -> Option<Self> {
        if primary.label == secondary.label {
            None
        } else {
            Some(Self { primary, secondary })
        }
    }
}

/// One table cell: its text and an optional display color stored as hex.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub text: String,
    #[serde(default)]
    pub color: Option<String>,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), color: None }
    }

    pub fn colored(text: impl Into<String>, color: DisplayColor) -> Self {
        Self { text: text.into(), color: Some(color.to_hex()) }
    }

    /// The normalized display color, if the cell carries a readable one.
    pub fn display_color(&self) -> Option<DisplayColor> {
        let raw = self.color.as_deref()?;
        match DisplayColor::parse_hex(raw) {
            Ok(color) => Some(color),
            Err(e) => {
                tracing::warn!(cell = %self.text, "ignoring cell color: {}", e);
                None
            }
        }
    }
}

/// A generated trial: title plus the two answer options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StimulusRow {
    pub title: Cell,
    pub wrong_option: Cell,
    pub right_option: Cell,
}

impl StimulusRow {
    pub fn cells(&self) -> [&Cell; 3] {
        [&self.title, &self.wrong_option, &self.right_option]
    }

    pub fn texts(&self) -> [&str; 3] {
        [
            self.title.text.as_str(),
            self.wrong_option.text.as_str(),
            self.right_option.text.as_str(),
        ]
    }

    pub fn into_cells(self) -> Vec<Cell> {
        vec![self.title, self.wrong_option, self.right_option]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_transform_types() {
        assert_eq!("type3".parse::<TransformType>().unwrap(), TransformType::Type3);
        assert_eq!(" TYPE1 ".parse::<TransformType>().unwrap(), TransformType::Type1);
        assert_eq!("4".parse::<TransformType>().unwrap(), TransformType::Type4);
    }

    #[test]
    fn rejects_unknown_transform_types() {
        for bad in ["type0", "type5", "typeA", "", "five"] {
            let err = bad.parse::<TransformType>().unwrap_err();
            assert!(matches!(err, StimulusError::InvalidConfiguration(_)), "{}", bad);
        }
    }

    #[test]
    fn parses_tasks() {
        assert_eq!("Flanker".parse::<Task>().unwrap(), Task::Flanker);
        assert_eq!("stroop\n".parse::<Task>().unwrap(), Task::Stroop);
        assert!("simon".parse::<Task>().is_err());
    }

    #[test]
    fn diagonal_pair_is_rejected() {
        let a = Symbol { label: "A", color: None };
        let b = Symbol { label: "B", color: None };
        assert!(SymbolPair::new(a, a).is_none());
        assert!(SymbolPair::new(a, b).is_some());
    }

    #[test]
    fn cell_color_tolerates_alpha_and_garbage() {
        let mut cell = Cell::plain("Red");
        cell.color = Some("FFFF0000".into());
        assert_eq!(cell.display_color(), Some(DisplayColor::new(255, 0, 0)));

        cell.color = Some("not-a-color".into());
        assert_eq!(cell.display_color(), None);
    }
}
