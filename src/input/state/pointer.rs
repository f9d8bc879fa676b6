use crate::draw::Stroke;
use crate::input::{Tool, events::PointerEvent};
use log::trace;

use super::{DrawingState, DrawingSurface};

impl DrawingSurface {
    /// Starts a new stroke at `point` with the given tool and selected width.
    ///
    /// Any stroke still in progress is committed first, so a missed
    /// pointer-up can never leave two active strokes.
    pub fn begin_stroke(&mut self, point: (f64, f64), tool: Tool, width: f64) {
        self.end_stroke();
        let width = tool.stroke_width(width, self.eraser_multiplier);
        trace!("Begin {} stroke at {:?} (width {:.1})", tool.name(), point, width);
        self.state = DrawingState::Drawing {
            stroke: Stroke::new(tool, point, self.pen_color, width),
        };
    }

    /// Appends a point to the active stroke. No-op when idle.
    pub fn extend_stroke(&mut self, point: (f64, f64)) {
        if let DrawingState::Drawing { stroke } = &mut self.state {
            stroke.push(point);
        }
    }

    /// Commits the active stroke to the frame. Idempotent.
    pub fn end_stroke(&mut self) {
        if let DrawingState::Drawing { stroke } = std::mem::take(&mut self.state) {
            trace!("Commit stroke with {} points", stroke.len());
            self.frame.push(stroke);
        }
    }

    /// Processes a pointer press: starts a stroke with the current tool.
    pub fn on_pointer_down(&mut self, x: f64, y: f64) {
        self.begin_stroke((x, y), self.current_tool, self.brush_size);
    }

    /// Processes pointer motion: extends the active stroke, if any.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.extend_stroke((x, y));
    }

    /// Processes pointer release.
    pub fn on_pointer_up(&mut self) {
        self.end_stroke();
    }

    /// Processes the pointer leaving the canvas; ends the stroke like a release.
    pub fn on_pointer_leave(&mut self) {
        self.end_stroke();
    }

    /// Dispatches a generic pointer event (mouse or mapped touch).
    pub fn handle_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { x, y } => self.on_pointer_down(x, y),
            PointerEvent::Move { x, y } => self.on_pointer_move(x, y),
            PointerEvent::Up => self.on_pointer_up(),
            PointerEvent::Leave => self.on_pointer_leave(),
        }
    }
}
