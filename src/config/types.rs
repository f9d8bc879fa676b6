//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing canvas settings.
///
/// Controls the size of the exported sketch and the initial pen settings.
/// Brush size and tool can still be changed while drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Canvas width in pixels (valid range: 16 - 4096)
    #[serde(default = "default_canvas_size")]
    pub width: u32,

    /// Canvas height in pixels (valid range: 16 - 4096)
    #[serde(default = "default_canvas_size")]
    pub height: u32,

    /// Initial brush size in pixels (valid range: 1.0 - 20.0)
    #[serde(default = "default_brush_size")]
    pub brush_size: f64,

    /// Eraser width as a multiple of the brush size (valid range: 1.0 - 20.0)
    #[serde(default = "default_eraser_multiplier")]
    pub eraser_multiplier: f64,

    /// Draw strokes as smoothed curves instead of straight segments
    #[serde(default = "default_smoothing")]
    pub smoothing: bool,

    /// Curve tension used when smoothing (valid range: 0.0 - 1.0)
    #[serde(default = "default_tension")]
    pub tension: f64,

    /// Pen ink - a named color (black, graphite, sepia, red, blue, white)
    /// or an RGB array like `[40, 40, 60]`
    #[serde(default = "default_pen_color")]
    pub pen_color: ColorSpec,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_size(),
            height: default_canvas_size(),
            brush_size: default_brush_size(),
            eraser_multiplier: default_eraser_multiplier(),
            smoothing: default_smoothing(),
            tension: default_tension(),
            pen_color: default_pen_color(),
        }
    }
}

/// Generative image API settings.
#[derive(Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RefineConfig {
    /// API key for the image model. Usually supplied through `GEMINI_API_KEY`
    /// or `--api-key` instead of being stored here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model used for refinement
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the generative language API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds; 0 waits indefinitely (valid range: 0 - 600)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Style used when none is given (pencil, charcoal, watercolor, oil,
    /// digital, minimalist)
    #[serde(default = "default_style")]
    pub default_style: String,
}

impl std::fmt::Debug for RefineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefineConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .field("default_style", &self.default_style)
            .finish()
    }
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            default_style: default_style(),
        }
    }
}

/// Where sketches and refined images are written, and upload limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OutputConfig {
    /// Directory for downloads; empty means the current directory.
    /// A leading `~/` is expanded to the home directory.
    #[serde(default)]
    pub directory: String,

    /// File name used when saving the drawn sketch
    #[serde(default = "default_sketch_filename")]
    pub sketch_filename: String,

    /// File name used when saving a refined image
    #[serde(default = "default_result_filename")]
    pub result_filename: String,

    /// Largest accepted upload in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: String::new(),
            sketch_filename: default_sketch_filename(),
            result_filename: default_result_filename(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

// =============================================================================
// Defaults
// =============================================================================

fn default_canvas_size() -> u32 {
    500
}

fn default_brush_size() -> f64 {
    3.0
}

fn default_eraser_multiplier() -> f64 {
    5.0
}

fn default_smoothing() -> bool {
    true
}

fn default_tension() -> f64 {
    0.5
}

fn default_pen_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_style() -> String {
    "pencil".to_string()
}

fn default_sketch_filename() -> String {
    "my-sketch.png".to_string()
}

fn default_result_filename() -> String {
    "refined-sketch.png".to_string()
}

fn default_max_upload_bytes() -> u64 {
    10 * 1024 * 1024
}
