//! Recorded stroke scripts replayed through the pointer state machine.
//!
//! A script is a JSON array of strokes:
//!
//! ```json
//! [
//!   { "tool": "pen", "size": 3, "points": [[10, 10], [40, 25], [80, 30]] },
//!   { "tool": "eraser", "size": 2, "points": [[40, 20], [40, 40]] }
//! ]
//! ```

use super::{DrawingSurface, Tool};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One recorded stroke: a pointer-down at the first point followed by a
/// pointer-move for every remaining point, then a pointer-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptedStroke {
    #[serde(default)]
    pub tool: Tool,
    /// Selected brush size; defaults to the surface's current size
    #[serde(default)]
    pub size: Option<f64>,
    pub points: Vec<(f64, f64)>,
}

/// Parses a stroke script from JSON text.
pub fn parse_script(json: &str) -> Result<Vec<ScriptedStroke>> {
    serde_json::from_str(json).context("Invalid stroke script")
}

/// Reads and parses a stroke script file.
pub fn load_script(path: &Path) -> Result<Vec<ScriptedStroke>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read stroke script {}", path.display()))?;
    parse_script(&json).with_context(|| format!("In {}", path.display()))
}

impl DrawingSurface {
    /// Replays scripted strokes as pointer input. Empty strokes are skipped.
    ///
    /// The surface's tool and brush size are left as the last stroke set them,
    /// just as they would be after drawing by hand.
    pub fn replay(&mut self, script: &[ScriptedStroke]) {
        for scripted in script {
            let Some((&(x0, y0), rest)) = scripted.points.split_first() else {
                log::warn!("Skipping scripted stroke with no points");
                continue;
            };

            self.set_tool(scripted.tool);
            if let Some(size) = scripted.size {
                self.set_brush_size(size);
            }

            self.on_pointer_down(x0, y0);
            for &(x, y) in rest {
                self.on_pointer_move(x, y);
            }
            self.on_pointer_up();
        }
        log::debug!("Replayed {} scripted strokes", script.len());
    }
}
