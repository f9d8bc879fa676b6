//! Configuration file support for sketchrefine.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/sketchrefine/config.toml`. Settings include canvas size and pen
//! defaults, the refinement API, and where output files go.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

pub use enums::ColorSpec;
pub use types::{CanvasConfig, OutputConfig, RefineConfig};

use crate::refine::Style;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// width = 500
/// height = 500
/// brush_size = 3.0
/// smoothing = true
///
/// [refine]
/// model = "gemini-2.5-flash-image"
/// timeout_secs = 120
/// default_style = "watercolor"
///
/// [output]
/// directory = "~/Pictures/SketchRefine"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Canvas size and pen defaults
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Generative image API settings
    #[serde(default)]
    pub refine: RefineConfig,

    /// Output file locations and upload limits
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `canvas.width` / `canvas.height`: 16 - 4096
    /// - `canvas.brush_size`: 1.0 - 20.0
    /// - `canvas.eraser_multiplier`: 1.0 - 20.0
    /// - `canvas.tension`: 0.0 - 1.0
    /// - `refine.timeout_secs`: 0 - 600
    fn validate_and_clamp(&mut self) {
        if !(16..=4096).contains(&self.canvas.width) {
            warn!(
                "Invalid canvas width {}, clamping to 16-4096 range",
                self.canvas.width
            );
            self.canvas.width = self.canvas.width.clamp(16, 4096);
        }

        if !(16..=4096).contains(&self.canvas.height) {
            warn!(
                "Invalid canvas height {}, clamping to 16-4096 range",
                self.canvas.height
            );
            self.canvas.height = self.canvas.height.clamp(16, 4096);
        }

        let defaults = CanvasConfig::default();
        for (name, value, default) in [
            ("brush_size", &mut self.canvas.brush_size, defaults.brush_size),
            (
                "eraser_multiplier",
                &mut self.canvas.eraser_multiplier,
                defaults.eraser_multiplier,
            ),
            ("tension", &mut self.canvas.tension, defaults.tension),
        ] {
            if value.is_nan() {
                warn!("Invalid {} NaN, using default {:.1}", name, default);
                *value = default;
            }
        }

        if !(1.0..=20.0).contains(&self.canvas.brush_size) {
            warn!(
                "Invalid brush_size {:.1}, clamping to 1.0-20.0 range",
                self.canvas.brush_size
            );
            self.canvas.brush_size = self.canvas.brush_size.clamp(1.0, 20.0);
        }

        if !(1.0..=20.0).contains(&self.canvas.eraser_multiplier) {
            warn!(
                "Invalid eraser_multiplier {:.1}, clamping to 1.0-20.0 range",
                self.canvas.eraser_multiplier
            );
            self.canvas.eraser_multiplier = self.canvas.eraser_multiplier.clamp(1.0, 20.0);
        }

        if !(0.0..=1.0).contains(&self.canvas.tension) {
            warn!(
                "Invalid tension {:.2}, clamping to 0.0-1.0 range",
                self.canvas.tension
            );
            self.canvas.tension = self.canvas.tension.clamp(0.0, 1.0);
        }

        if self.refine.timeout_secs > 600 {
            warn!(
                "Invalid timeout_secs {}, clamping to 600",
                self.refine.timeout_secs
            );
            self.refine.timeout_secs = 600;
        }

        if Style::from_name(&self.refine.default_style).is_none() {
            warn!(
                "Unknown default_style '{}', falling back to '{}'",
                self.refine.default_style,
                Style::default().as_str()
            );
            self.refine.default_style = Style::default().as_str().to_string();
        }
    }

    /// Timeout for one refinement request, or `None` to wait indefinitely.
    pub fn refine_timeout(&self) -> Option<Duration> {
        (self.refine.timeout_secs > 0).then(|| Duration::from_secs(self.refine.timeout_secs))
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/sketchrefine/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("sketchrefine");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `config_path`, or returns defaults if the file
    /// doesn't exist. All loaded values are validated and clamped.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or contains
    /// invalid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;
        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    fn from_toml(config_str: &str) -> Result<Self> {
        Ok(toml::from_str(config_str)?)
    }

    /// Writes the documented example config to `config_path`.
    ///
    /// # Errors
    /// Returns an error if a config file already exists at the target path or
    /// the file cannot be written.
    pub fn create_default_file(config_path: &Path) -> Result<()> {
        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(config_path, default_config)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Created default config at {}", config_path.display());
        Ok(())
    }

    /// JSON schema describing the config file, for editor tooling.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
