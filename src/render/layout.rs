// File: src/render/layout.rs
use crate::core::color::DisplayColor;
use crate::core::types::Task;
use crate::error::{Result, StimulusError};
use crate::render::naming::NamingScheme;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Pixels per inch used to convert point sizes.
pub const DPI: f32 = 100.0;

/// Largest font size a layout may ask for.
pub const MAX_FONT_SIZE_PT: f32 = 1000.0;

/// One text field placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSlot {
    /// Table column the text is read from
    pub column: String,
    /// Center of the text as figure fractions, origin bottom-left
    pub anchor: (f32, f32),
    /// Font size in points
    pub font_size_pt: f32,
}

impl TextSlot {
    pub fn new(column: &str, anchor: (f32, f32), font_size_pt: f32) -> Self {
        Self { column: column.to_string(), anchor, font_size_pt }
    }

    pub fn font_size_px(&self) -> f32 {
        self.font_size_pt * DPI / 72.0
    }

    /// Anchor in pixel coordinates, origin top-left.
    pub fn anchor_px(&self, width: u32, height: u32) -> (f32, f32) {
        (self.anchor.0 * width as f32, (1.0 - self.anchor.1) * height as f32)
    }
}

/// Everything needed to turn a table row into an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    #[serde(with = "hex_color")]
    pub background: DisplayColor,
    /// Used for cells that carry no display color
    #[serde(with = "hex_color")]
    pub default_text_color: DisplayColor,
    /// TrueType/OpenType font; the built-in bitmap face is used when unset
    #[serde(default)]
    pub font_path: Option<PathBuf>,
    pub slots: Vec<TextSlot>,
    pub naming: NamingScheme,
    /// Zero-pad all-digit texts and file names to five places
    #[serde(default)]
    pub pad_numeric: bool,
}

impl RenderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(StimulusError::invalid(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.slots.is_empty() {
            return Err(StimulusError::invalid("layout has no text slots"));
        }
        for slot in &self.slots {
            if !(slot.font_size_pt > 0.0 && slot.font_size_pt <= MAX_FONT_SIZE_PT) {
                return Err(StimulusError::invalid(format!(
                    "font size for '{}' must be in (0, {}] pt, got {}",
                    slot.column, MAX_FONT_SIZE_PT, slot.font_size_pt
                )));
            }
            let (x, y) = slot.anchor;
            if !((0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y)) {
                return Err(StimulusError::invalid(format!(
                    "anchor for '{}' must lie within the canvas (0..1), got ({}, {})",
                    slot.column, x, y
                )));
            }
        }
        Ok(())
    }

    /// Reads a layout from a JSON file and validates it.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(StimulusError::missing(format!("layout file '{}' not found", path.display())));
        }
        let contents = std::fs::read_to_string(path)?;
        let config: RenderConfig = serde_json::from_str(&contents)
            .map_err(|e| StimulusError::invalid(format!("layout file '{}': {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_font(mut self, font_path: Option<PathBuf>) -> Self {
        if font_path.is_some() {
            self.font_path = font_path;
        }
        self
    }
}

/// The canvas layouts used by the experiment pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutPreset {
    /// Gray canvas, white text, Title above Wrong (left) and Right (right)
    Flanker,
    /// Light canvas, cell-colored words, Wrong on the right and Right on the left
    Stroop,
    /// Target plus two options, named by the `Image` column
    Squared,
    /// Single centered target, named by the `Image` column
    Origin,
    /// 600x600 three-field layout with content names
    LegacySquare,
}

impl LayoutPreset {
    pub const ALL: [LayoutPreset; 5] = [
        LayoutPreset::Flanker,
        LayoutPreset::Stroop,
        LayoutPreset::Squared,
        LayoutPreset::Origin,
        LayoutPreset::LegacySquare,
    ];

    pub fn for_task(task: Task) -> Self {
        match task {
            Task::Flanker => LayoutPreset::Flanker,
            Task::Stroop => LayoutPreset::Stroop,
        }
    }

    pub fn config(self) -> RenderConfig {
        match self {
            LayoutPreset::Flanker => RenderConfig {
                width: 500,
                height: 300,
                background: DisplayColor::GRAY,
                default_text_color: DisplayColor::WHITE,
                font_path: None,
                slots: vec![
                    TextSlot::new("Title", (0.5, 0.70), 25.0),
                    TextSlot::new("Wrong_Option", (0.25, 0.40), 25.0),
                    TextSlot::new("Right_Option", (0.75, 0.40), 25.0),
                ],
                naming: NamingScheme::Indexed,
                pad_numeric: false,
            },
            LayoutPreset::Stroop => RenderConfig {
                width: 500,
                height: 300,
                background: DisplayColor::LIGHT_GRAY,
                default_text_color: DisplayColor::BLACK,
                font_path: None,
                slots: vec![
                    TextSlot::new("Title", (0.5, 0.70), 30.0),
                    TextSlot::new("Wrong_Option", (0.75, 0.40), 25.0),
                    TextSlot::new("Right_Option", (0.25, 0.40), 25.0),
                ],
                naming: NamingScheme::Indexed,
                pad_numeric: false,
            },
            LayoutPreset::Squared => RenderConfig {
                width: 500,
                height: 300,
                background: DisplayColor::LIGHT_GRAY,
                default_text_color: DisplayColor::BLACK,
                font_path: None,
                slots: vec![
                    TextSlot::new("Target", (0.5, 0.70), 36.0),
                    TextSlot::new("Option_Left", (0.25, 0.40), 32.0),
                    TextSlot::new("Option_Right", (0.75, 0.40), 32.0),
                ],
                naming: NamingScheme::Column("Image".into()),
                pad_numeric: true,
            },
            LayoutPreset::Origin => RenderConfig {
                width: 500,
                height: 300,
                background: DisplayColor::GRAY,
                default_text_color: DisplayColor::WHITE,
                font_path: None,
                slots: vec![TextSlot::new("Target", (0.5, 0.5), 45.0)],
                naming: NamingScheme::Column("Image".into()),
                pad_numeric: true,
            },
            LayoutPreset::LegacySquare => RenderConfig {
                width: 600,
                height: 600,
                background: DisplayColor::GRAY,
                default_text_color: DisplayColor::BLACK,
                font_path: None,
                slots: vec![
                    TextSlot::new("Title", (0.5, 0.65), 35.0),
                    TextSlot::new("Wrong_Option", (0.2, 0.35), 35.0),
                    TextSlot::new("Right_Option", (0.25, 0.45), 35.0),
                ],
                naming: NamingScheme::Content,
                pad_numeric: false,
            },
        }
    }
}

impl fmt::Display for LayoutPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LayoutPreset::Flanker => "flanker",
            LayoutPreset::Stroop => "stroop",
            LayoutPreset::Squared => "squared",
            LayoutPreset::Origin => "origin",
            LayoutPreset::LegacySquare => "legacy-square",
        })
    }
}

impl FromStr for LayoutPreset {
    type Err = StimulusError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.to_string() == wanted)
            .ok_or_else(|| StimulusError::invalid(format!("unknown layout '{}'", s.trim())))
    }
}

/// 1-based inclusive range of data rows to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowRange {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl RowRange {
    pub const ALL: RowRange = RowRange { start: None, end: None };

    pub fn new(start: Option<usize>, end: Option<usize>) -> Result<Self> {
        if start == Some(0) || end == Some(0) {
            return Err(StimulusError::invalid("row numbers start at 1"));
        }
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(StimulusError::invalid(format!("start row {} is after end row {}", s, e)));
            }
        }
        Ok(Self { start, end })
    }

    /// 0-based indices into a table of `len` rows; the end clamps to the table.
    pub fn indices(&self, len: usize) -> std::ops::Range<usize> {
        let start = self.start.map(|s| s - 1).unwrap_or(0).min(len);
        let end = self.end.unwrap_or(len).min(len).max(start);
        start..end
    }
}

mod hex_color {
    use crate::core::color::DisplayColor;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &DisplayColor, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&color.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DisplayColor, D::Error> {
        let raw = String::deserialize(d)?;
        DisplayColor::parse_hex(&raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate() {
        for preset in LayoutPreset::ALL {
            preset.config().validate().unwrap();
            assert_eq!(preset.to_string().parse::<LayoutPreset>().unwrap(), preset);
        }
    }

    #[test]
    fn legacy_square_is_600_square() {
        let config = LayoutPreset::LegacySquare.config();
        assert_eq!((config.width, config.height), (600, 600));
    }

    #[test]
    fn anchors_flip_vertically() {
        let slot = TextSlot::new("Title", (0.5, 0.70), 25.0);
        let (x, y) = slot.anchor_px(500, 300);
        assert!((x - 250.0).abs() < 1e-3);
        assert!((y - 90.0).abs() < 1e-3);
        assert!((slot.font_size_px() - 34.722).abs() < 1e-2);
    }

    #[test]
    fn row_range_clamps_and_validates() {
        assert_eq!(RowRange::ALL.indices(10), 0..10);
        assert_eq!(RowRange::new(Some(3), Some(5)).unwrap().indices(10), 2..5);
        assert_eq!(RowRange::new(Some(8), Some(50)).unwrap().indices(10), 7..10);
        assert_eq!(RowRange::new(Some(20), None).unwrap().indices(10), 10..10);
        assert!(RowRange::new(Some(0), None).is_err());
        assert!(RowRange::new(Some(5), Some(4)).is_err());
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = LayoutPreset::Stroop.config();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"C8C8C8\""));
        let back: RenderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn layout_file_is_loaded_and_checked() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        let mut config = LayoutPreset::Squared.config();
        config.width = 640;
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        assert_eq!(RenderConfig::from_file(&path).unwrap(), config);

        config.slots.clear();
        std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();
        assert!(matches!(RenderConfig::from_file(&path), Err(StimulusError::InvalidConfiguration(_))));

        let missing = dir.path().join("nope.json");
        assert!(matches!(RenderConfig::from_file(&missing), Err(StimulusError::MissingInput(_))));
    }

    #[test]
    fn rejects_out_of_range_slots() {
        for size in [0.0, -3.0, f32::NAN, f32::INFINITY, 1e9] {
            let mut config = LayoutPreset::Flanker.config();
            config.slots[0].font_size_pt = size;
            assert!(matches!(config.validate(), Err(StimulusError::InvalidConfiguration(_))), "{}", size);
        }
        for anchor in [(1e30, 0.7), (0.5, -0.1), (f32::NAN, 0.5), (0.5, f32::INFINITY)] {
            let mut config = LayoutPreset::Flanker.config();
            config.slots[1].anchor = anchor;
            assert!(matches!(config.validate(), Err(StimulusError::InvalidConfiguration(_))), "{:?}", anchor);
        }
        let mut config = LayoutPreset::Flanker.config();
        config.slots[0].anchor = (1.0, 0.0);
        config.slots[0].font_size_pt = MAX_FONT_SIZE_PT;
        config.validate().unwrap();
    }

    #[test]
    fn layout_file_with_far_anchor_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        let mut config = LayoutPreset::Flanker.config();
        config.slots[2].anchor = (1e30, 0.7);
        std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();
        assert!(matches!(RenderConfig::from_file(&path), Err(StimulusError::InvalidConfiguration(_))));
    }

    #[test]
    fn rejects_empty_canvas() {
        let mut config = LayoutPreset::Origin.config();
        config.height = 0;
        assert!(matches!(config.validate(), Err(StimulusError::InvalidConfiguration(_))));
    }
}
