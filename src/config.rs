use std::fs;
use std::path::{Path, PathBuf};

use egui::Color32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::parse_hex_color;

/// Environment variable that points at a config file
pub const CONFIG_ENV: &str = "SKETCHPAD_CONFIG";

/// Config file looked up in the working directory when the variable is unset
pub const DEFAULT_CONFIG_FILE: &str = "sketchpad.json";

/// Errors that can occur while loading the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// A marker button: line thickness plus where the cursor indicator sits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerPreset {
    pub name: String,
    pub thickness: f32,
    /// Offset of the preview indicator from the pointer, in canvas pixels
    pub cursor_offset: [f32; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old configs
pub struct SketchConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Integer upscale applied to exported images
    pub export_scale: u32,
    pub export_file_name: String,
    /// Native only: where exported files are written
    pub export_dir: PathBuf,
    /// Canvas background as `#rrggbb`
    pub background: String,
    /// Initial marker color as `#rrggbb`
    pub initial_color: String,
    /// Font spec stored with every placed sticker
    pub sticker_font: String,
    /// Font spec for the marker indicator
    pub preview_font: String,
    pub markers: Vec<MarkerPreset>,
    pub stickers: Vec<String>,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            canvas_width: 256,
            canvas_height: 256,
            export_scale: 4,
            export_file_name: "sketchpad.png".to_owned(),
            export_dir: PathBuf::from("."),
            background: "#ffffff".to_owned(),
            initial_color: "#000000".to_owned(),
            sticker_font: "32px monospace".to_owned(),
            preview_font: "16px monospace".to_owned(),
            markers: vec![
                MarkerPreset {
                    name: "Thin".to_owned(),
                    thickness: 2.0,
                    cursor_offset: [4.0, -4.0],
                },
                MarkerPreset {
                    name: "Thick".to_owned(),
                    thickness: 6.0,
                    cursor_offset: [8.0, -8.0],
                },
            ],
            stickers: vec!["🐸".to_owned(), "🍕".to_owned(), "★".to_owned()],
        }
    }
}

impl SketchConfig {
    /// Parse and validate a JSON config
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Load from `$SKETCHPAD_CONFIG`, else `sketchpad.json` if present, else defaults.
    ///
    /// A file named by the environment variable must exist; the default file is optional.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            log::info!("Loading config from {}", Path::new(&path).display());
            return Self::load(path);
        }
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() {
            log::info!("Loading config from {}", path.display());
            Self::load(path)
        } else {
            log::debug!("No {DEFAULT_CONFIG_FILE} found, using default config");
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.export_scale == 0 {
            return Err(ConfigError::Invalid("export_scale must be at least 1".to_owned()));
        }
        if self.export_file_name.trim().is_empty() {
            return Err(ConfigError::Invalid("export_file_name is empty".to_owned()));
        }
        if self.markers.is_empty() {
            return Err(ConfigError::Invalid("at least one marker is required".to_owned()));
        }
        if let Some(marker) = self
            .markers
            .iter()
            .find(|marker| !(marker.thickness.is_finite() && marker.thickness > 0.0))
        {
            return Err(ConfigError::Invalid(format!(
                "marker {:?} has invalid thickness {}",
                marker.name, marker.thickness
            )));
        }
        for (field, value) in [("background", &self.background), ("initial_color", &self.initial_color)] {
            if parse_hex_color(value).is_none() {
                return Err(ConfigError::Invalid(format!("{field} {value:?} is not a #rrggbb color")));
            }
        }
        Ok(())
    }

    pub fn background_color(&self) -> Color32 {
        parse_hex_color(&self.background).unwrap_or(Color32::WHITE)
    }

    pub fn initial_color(&self) -> Color32 {
        parse_hex_color(&self.initial_color).unwrap_or(Color32::BLACK)
    }
}
