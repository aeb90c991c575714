//! Configuration handling for the GenoTrack CLI
//!
//! Supports loading configuration from genotrack.toml files with CLI argument overrides.

use genotrack_core::VisibleWindow;
use genotrack_render::{BasePalette, GridLayout, TrackStyle, ViewOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CliError, CliResult};

pub const DEFAULT_CONFIG_FILE: &str = "genotrack.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub style: TrackStyle,
    #[serde(default)]
    pub palette: BasePalette,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Font size for base letters and axis labels
    #[serde(default = "default_font_size")]
    pub font_size: f64,

    /// Widest window (end - start) drawn base by base
    #[serde(default = "default_per_base_limit")]
    pub per_base_limit: u64,

    /// Tallest a transcript row may get
    #[serde(default = "default_max_transcript_row_height")]
    pub max_transcript_row_height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Default canvas width
    #[serde(default = "default_width")]
    pub width: u32,

    /// Default canvas height
    #[serde(default = "default_height")]
    pub height: u32,

    /// Share of the canvas height given to the sequence row
    #[serde(default = "default_sequence_row_ratio")]
    pub sequence_row_ratio: f64,

    /// Share of the canvas height given to the transcript rows
    #[serde(default = "default_transcript_row_ratio")]
    pub transcript_row_ratio: f64,

    #[serde(default = "default_background_color")]
    pub background_color: String,
}

// Default value functions
fn default_font_size() -> f64 { 10.0 }
fn default_per_base_limit() -> u64 { 100 }
fn default_max_transcript_row_height() -> f64 { 40.0 }
fn default_width() -> u32 { 1100 }
fn default_height() -> u32 { 700 }
fn default_sequence_row_ratio() -> f64 { 0.09 }
fn default_transcript_row_ratio() -> f64 { 0.91 }
fn default_background_color() -> String { "#ffffff".to_string() }

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            per_base_limit: default_per_base_limit(),
            max_transcript_row_height: default_max_transcript_row_height(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            sequence_row_ratio: default_sequence_row_ratio(),
            transcript_row_ratio: default_transcript_row_ratio(),
            background_color: default_background_color(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> CliResult<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    log::info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Err(CliError::file_not_found(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> CliResult<()> {
        let content = Self::to_toml(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Generate example configuration file content
    pub fn example_toml() -> CliResult<String> {
        Self::default().to_toml()
    }

    pub fn to_toml(&self) -> CliResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// View options for one render; the window and sequence id come from the command line.
    pub fn view_options(&self, window: Option<VisibleWindow>, sequence_id: Option<String>) -> ViewOptions {
        ViewOptions {
            window,
            font_size: self.view.font_size,
            per_base_limit: self.view.per_base_limit,
            sequence_id,
            max_transcript_row_height: self.view.max_transcript_row_height,
            palette: self.palette.clone(),
            style: self.style.clone(),
        }
    }

    /// Sequence row over transcript row, one column.
    pub fn grid(&self, width: u32, height: u32) -> GridLayout {
        GridLayout::with_ratios(
            width as f64,
            height as f64,
            vec![1.0],
            vec![vec![self.layout.sequence_row_ratio, self.layout.transcript_row_ratio]],
        )
    }
}
