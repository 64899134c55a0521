// File: src/core/alphabet.rs
use crate::core::color::DisplayColor;
use crate::core::types::{Symbol, Task};
use crate::error::{Result, StimulusError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const LETTERS: [&str; 26] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R",
    "S", "T", "U", "V", "W", "X", "Y", "Z",
];

const DIGITS: [&str; 9] = ["1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// Color names in presentation order, each with its display color.
pub const NAMED_COLORS: [(&str, DisplayColor); 7] = [
    ("Red", DisplayColor::new(0xFF, 0x00, 0x00)),
    ("Blue", DisplayColor::new(0x00, 0x00, 0xFF)),
    ("Green", DisplayColor::new(0x00, 0xFF, 0x00)),
    ("Yellow", DisplayColor::new(0xFF, 0xFF, 0x00)),
    ("Orange", DisplayColor::new(0xFF, 0xA5, 0x00)),
    ("Black", DisplayColor::new(0x00, 0x00, 0x00)),
    ("Purple", DisplayColor::new(0x80, 0x00, 0x80)),
];

/// Number of copies of each symbol in an option field.
pub const OPTION_REPEAT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlphabetKind {
    Letters,
    Digits,
    Colors,
}

impl AlphabetKind {
    pub const ALL: [AlphabetKind; 3] = [AlphabetKind::Letters, AlphabetKind::Digits, AlphabetKind::Colors];

    /// Ordered symbols of this alphabet.
    pub fn symbols(self) -> Vec<Symbol> {
        match self {
            AlphabetKind::Letters => LETTERS.iter().map(|&label| Symbol { label, color: None }).collect(),
            AlphabetKind::Digits => DIGITS.iter().map(|&label| Symbol { label, color: None }).collect(),
            AlphabetKind::Colors => NAMED_COLORS
                .iter()
                .map(|&(label, color)| Symbol { label, color: Some(color) })
                .collect(),
        }
    }

    pub fn len(self) -> usize {
        match self {
            AlphabetKind::Letters => LETTERS.len(),
            AlphabetKind::Digits => DIGITS.len(),
            AlphabetKind::Colors => NAMED_COLORS.len(),
        }
    }

    /// Number of ordered pairs of distinct symbols, N×(N−1).
    pub fn pair_count(self) -> usize {
        self.len() * (self.len() - 1)
    }

    /// Copies of the primary symbol in a repeated-symbol title.
    /// Letter titles are one longer than their options; digit titles are not.
    pub fn title_repeat(self) -> usize {
        match self {
            AlphabetKind::Letters => 6,
            AlphabetKind::Digits | AlphabetKind::Colors => OPTION_REPEAT,
        }
    }

    /// The paradigm this alphabet feeds.
    pub fn task(self) -> Task {
        match self {
            AlphabetKind::Letters | AlphabetKind::Digits => Task::Flanker,
            AlphabetKind::Colors => Task::Stroop,
        }
    }

    /// Style name used in file and folder names (`letter`, `number`).
    /// Stroop sets are filed under `letter`, as the color words are spelled out.
    pub fn style(self) -> &'static str {
        match self {
            AlphabetKind::Letters | AlphabetKind::Colors => "letter",
            AlphabetKind::Digits => "number",
        }
    }

    pub fn find(self, label: &str) -> Option<Symbol> {
        self.symbols().into_iter().find(|s| s.label == label)
    }

    /// Resolves the alphabet for a task and an optional style answer.
    pub fn for_task(task: Task, style: Option<&str>) -> Result<Self> {
        let style = style.map(|s| s.trim().to_ascii_lowercase());
        match (task, style.as_deref()) {
            (Task::Stroop, None) | (Task::Stroop, Some("")) => Ok(AlphabetKind::Colors),
            (Task::Flanker, None) | (Task::Flanker, Some("")) => Err(StimulusError::invalid(
                "flanker needs a style (letter or number)",
            )),
            (task, Some(style)) => {
                let kind: AlphabetKind = style.parse()?;
                match (task, kind) {
                    (Task::Flanker, AlphabetKind::Letters | AlphabetKind::Digits) => Ok(kind),
                    (Task::Stroop, AlphabetKind::Letters | AlphabetKind::Colors) => Ok(AlphabetKind::Colors),
                    (task, kind) => Err(StimulusError::invalid(format!(
                        "{} has no {} variant",
                        task,
                        kind
                    ))),
                }
            }
        }
    }
}

impl fmt::Display for AlphabetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AlphabetKind::Letters => "letters",
            AlphabetKind::Digits => "digits",
            AlphabetKind::Colors => "colors",
        })
    }
}

impl FromStr for AlphabetKind {
    type Err = StimulusError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "letter" | "letters" => Ok(AlphabetKind::Letters),
            "number" | "numbers" | "digit" | "digits" => Ok(AlphabetKind::Digits),
            "color" | "colors" | "colour" | "colours" => Ok(AlphabetKind::Colors),
            other => Err(StimulusError::invalid(format!(
                "unknown alphabet '{}' (expected letter, number or color)",
                other
            ))),
        }
    }
}
