//! Drawing tool selection.

use serde::{Deserialize, Serialize};

/// Drawing tool selection.
///
/// The active tool determines how a new stroke composites with the ink that
/// is already on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Freehand ink, drawn over existing strokes
    #[default]
    Pen,
    /// Punches through earlier strokes without touching their point data
    Eraser,
}

impl Tool {
    /// Width actually stored on a stroke for the selected brush size.
    ///
    /// The eraser works at a fixed multiple of the selected size so it can
    /// clear an area quickly.
    pub fn stroke_width(self, brush_size: f64, eraser_multiplier: f64) -> f64 {
        match self {
            Tool::Pen => brush_size,
            Tool::Eraser => brush_size * eraser_multiplier,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tool::Pen => "pen",
            Tool::Eraser => "eraser",
        }
    }
}
