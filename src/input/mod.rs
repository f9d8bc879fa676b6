//! Input handling and the drawing surface state machine.
//!
//! This module translates mouse and touch events into strokes. It maintains
//! the current tool settings (tool, brush size, smoothing) and the per-stroke
//! state machine that captures points while the pointer is down.

pub mod events;
pub mod script;
pub mod state;
pub mod tool;

pub use events::{PointerEvent, TouchPhase};
pub use script::{ScriptedStroke, load_script, parse_script};
pub use state::{DrawingState, DrawingSurface};
pub use tool::Tool;
