//! Frame container for the committed strokes of a sketch.

use super::stroke::Stroke;

/// Ordered buffer of committed strokes.
///
/// Insertion order is z-order is render order: the first stroke is the bottom
/// of the stack and every later stroke composites on top of it.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    strokes: Vec<Stroke>,
}

impl Frame {
    /// Creates a new empty frame with no strokes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a finished stroke on top of the existing ones.
    pub fn push(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// Removes and returns the most recently added stroke, if any.
    pub fn undo(&mut self) -> Option<Stroke> {
        self.strokes.pop()
    }

    /// Removes all strokes, clearing the canvas.
    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}
