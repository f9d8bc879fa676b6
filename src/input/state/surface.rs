//! Drawing state machine and surface state management.

use crate::config::CanvasConfig;
use crate::draw::{
    Color, ExportError, Frame, RenderOptions, Stroke, color::BLACK, export_data_url, export_png,
};
use crate::input::Tool;

/// Smallest selectable brush size in pixels.
pub const MIN_BRUSH_SIZE: f64 = 1.0;
/// Largest selectable brush size in pixels.
pub const MAX_BRUSH_SIZE: f64 = 20.0;

/// Per-stroke drawing mode state machine.
///
/// `Idle -> Drawing` on pointer-down, `Drawing -> Drawing` on pointer-move,
/// `Drawing -> Idle` on pointer-up or pointer-leave.
#[derive(Debug, Default)]
pub enum DrawingState {
    /// Not actively drawing - waiting for a pointer-down
    #[default]
    Idle,
    /// A stroke is in progress; the surface owns it exclusively until it is
    /// committed to the frame
    Drawing {
        /// The active stroke
        stroke: Stroke,
    },
}

/// Freehand drawing surface.
///
/// Holds the committed strokes, the active stroke (if any), and the current
/// tool settings. Every operation is infallible except export, which can only
/// fail if Cairo cannot allocate a surface.
pub struct DrawingSurface {
    /// Committed strokes in render order
    pub(crate) frame: Frame,
    /// Current per-stroke state machine
    pub state: DrawingState,
    /// Tool used for the next stroke
    pub current_tool: Tool,
    /// Selected brush size in pixels (clamped to 1.0 - 20.0)
    pub brush_size: f64,
    /// Eraser width relative to the brush size
    pub eraser_multiplier: f64,
    /// Ink color for pen strokes
    pub pen_color: Color,
    /// Whether strokes are drawn as smoothed curves
    pub smoothing: bool,
    /// Curve tension used when smoothing is on
    pub tension: f64,
    /// Export width in pixels
    pub width: u32,
    /// Export height in pixels
    pub height: u32,
}

impl DrawingSurface {
    /// Creates an empty surface with the default pen settings.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frame: Frame::new(),
            state: DrawingState::Idle,
            current_tool: Tool::Pen,
            brush_size: 3.0,
            eraser_multiplier: 5.0,
            pen_color: BLACK,
            smoothing: true,
            tension: 0.5,
            width,
            height,
        }
    }

    /// Creates an empty surface from the `[canvas]` config section.
    pub fn from_config(config: &CanvasConfig) -> Self {
        let mut surface = Self::new(config.width, config.height);
        surface.set_brush_size(config.brush_size);
        surface.eraser_multiplier = config.eraser_multiplier;
        surface.pen_color = config.pen_color.to_color();
        surface.smoothing = config.smoothing;
        surface.tension = config.tension;
        surface
    }

    /// Selects the tool for the next stroke. The active stroke keeps its tool.
    pub fn set_tool(&mut self, tool: Tool) {
        self.current_tool = tool;
    }

    /// Sets the brush size, clamped to the supported range.
    ///
    /// NaN is ignored and the current size kept.
    pub fn set_brush_size(&mut self, size: f64) {
        if size.is_nan() {
            log::warn!("Ignoring NaN brush size, keeping {:.1}", self.brush_size);
            return;
        }
        self.brush_size = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
    }

    /// Toggles curve smoothing. Rendering only; stored points are untouched.
    pub fn toggle_smoothing(&mut self) {
        self.smoothing = !self.smoothing;
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::smoothed(self.smoothing, self.tension)
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawingState::Drawing { .. })
    }

    /// Returns the stroke currently being drawn, if any.
    pub fn active_stroke(&self) -> Option<&Stroke> {
        match &self.state {
            DrawingState::Drawing { stroke } => Some(stroke),
            DrawingState::Idle => None,
        }
    }

    /// Committed strokes, in render order.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// All strokes in render order, including the active one on top.
    pub fn strokes(&self) -> impl Iterator<Item = &Stroke> {
        self.frame.strokes().iter().chain(self.active_stroke())
    }

    /// Number of strokes, including the active one.
    pub fn stroke_count(&self) -> usize {
        self.frame.len() + usize::from(self.is_drawing())
    }

    /// Removes the last stroke; no-op when there are none.
    ///
    /// An in-progress stroke is the last stroke, so undo discards it.
    pub fn undo(&mut self) -> Option<Stroke> {
        match std::mem::take(&mut self.state) {
            DrawingState::Drawing { stroke } => Some(stroke),
            DrawingState::Idle => self.frame.undo(),
        }
    }

    /// Removes every stroke, including one in progress.
    pub fn clear(&mut self) {
        self.state = DrawingState::Idle;
        self.frame.clear();
    }

    /// Renders the current strokes against white paper and encodes as PNG.
    ///
    /// Callable at any time; an empty surface yields a blank white image of
    /// the configured size.
    pub fn export_png(&self) -> Result<Vec<u8>, ExportError> {
        export_png(self.strokes(), self.width, self.height, self.render_options())
    }

    /// Same as [`export_png`](Self::export_png), as a `data:image/png` URL.
    pub fn export_raster(&self) -> Result<String, ExportError> {
        export_data_url(self.strokes(), self.width, self.height, self.render_options())
    }
}
