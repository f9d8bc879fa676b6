//! Stroke definitions for the sketch canvas.

use super::color::Color;
use crate::input::Tool;

/// One continuous pointer-down to pointer-up path.
///
/// A stroke is created with its first point and only ever grows at the end
/// while it is the active stroke. Once committed to a [`Frame`](super::Frame)
/// it is never modified again.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    /// Compositing mode for this stroke
    pub tool: Tool,
    /// Points in arrival order
    points: Vec<(f64, f64)>,
    /// Ink color (ignored by the eraser, which only removes coverage)
    pub color: Color,
    /// Line width in pixels, already scaled for the eraser
    pub width: f64,
}

impl Stroke {
    /// Starts a stroke seeded with the pointer-down position.
    pub fn new(tool: Tool, start: (f64, f64), color: Color, width: f64) -> Self {
        Self {
            tool,
            points: vec![start],
            color,
            width,
        }
    }

    /// Appends a point to the end of the stroke. Amortized O(1).
    pub fn push(&mut self, point: (f64, f64)) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Never zero: a stroke always keeps its seed point.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_eraser(&self) -> bool {
        self.tool == Tool::Eraser
    }
}
