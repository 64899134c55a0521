//! Run configuration and on-disk settings

use crate::core::alphabet::AlphabetKind;
use crate::core::types::{Task, TransformType};
use crate::error::{Result, StimulusError};
use crate::persistence::{default_image_dir, default_table_path, TableFormat};
use crate::render::layout::{LayoutPreset, RenderConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings read from an optional JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root folder for generated tables
    pub data_dir: PathBuf,
    /// Root folder for rendered images
    pub image_dir: PathBuf,
    /// Font used for rendering; bitmap glyphs when unset
    pub font_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("Data-set"),
            image_dir: PathBuf::from("Data-set-Image"),
            font_path: None,
        }
    }
}

impl Settings {
    /// Load settings from file. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Settings::default());
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| StimulusError::invalid(format!("settings file '{}': {}", path.display(), e)))
    }
}

/// A fully resolved generation run. Built and validated once, before any
/// work starts.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub alphabet: AlphabetKind,
    pub transform: TransformType,
    /// Where the stimulus table is written
    pub output_path: PathBuf,
    pub render_images: bool,
    /// Folder the images go to when `render_images` is set
    pub image_dir: PathBuf,
    pub layout: RenderConfig,
}

impl RunConfig {
    /// Resolves a run from the raw selections, filling unset paths from
    /// `settings`.
    pub fn new(
        task: Task,
        style: Option<&str>,
        transform: TransformType,
        output_path: Option<PathBuf>,
        render_images: bool,
        settings: &Settings,
    ) -> Result<Self> {
        let alphabet = AlphabetKind::for_task(task, style)?;
        let output_path =
            output_path.unwrap_or_else(|| default_table_path(&settings.data_dir, alphabet, transform));
        let config = Self {
            alphabet,
            transform,
            output_path,
            render_images,
            image_dir: default_image_dir(&settings.image_dir, alphabet, transform),
            layout: LayoutPreset::for_task(task).config().with_font(settings.font_path.clone()),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn task(&self) -> Task {
        self.alphabet.task()
    }

    pub fn validate(&self) -> Result<()> {
        TableFormat::from_path(&self.output_path)?;
        if self.render_images {
            self.layout.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.data_dir, PathBuf::from("Data-set"));
        assert!(settings.font_path.is_none());
    }

    #[test]
    fn missing_settings_file_gives_defaults() {
        let settings = Settings::load(Some(Path::new("/nonexistent/stimulus.json"))).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_settings_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "data_dir": "out/tables" }"#).unwrap();
        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("out/tables"));
        assert_eq!(settings.image_dir, PathBuf::from("Data-set-Image"));
    }

    #[test]
    fn malformed_settings_are_invalid_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ data_dir = 3 }").unwrap();
        assert!(matches!(Settings::load(Some(&path)), Err(StimulusError::InvalidConfiguration(_))));
    }

    #[test]
    fn run_config_resolves_defaults() {
        let config =
            RunConfig::new(Task::Stroop, None, TransformType::Type2, None, true, &Settings::default()).unwrap();
        assert_eq!(config.alphabet, AlphabetKind::Colors);
        assert_eq!(
            config.output_path,
            PathBuf::from("Data-set/Stroop-Letter/stroop_letter_type2_dataset.json")
        );
        assert_eq!(config.image_dir, PathBuf::from("Data-set-Image/Stroop-Letter-image/type2"));
        assert_eq!(config.layout, LayoutPreset::Stroop.config());
    }

    #[test]
    fn run_config_rejects_bad_selection_and_format() {
        let settings = Settings::default();
        assert!(RunConfig::new(Task::Stroop, Some("number"), TransformType::Type1, None, false, &settings).is_err());
        let err = RunConfig::new(
            Task::Flanker,
            Some("letter"),
            TransformType::Type1,
            Some(PathBuf::from("set.xlsx")),
            false,
            &settings,
        )
        .unwrap_err();
        assert!(matches!(err, StimulusError::InvalidConfiguration(_)));
    }
}
