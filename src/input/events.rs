//! Generic pointer event types for mouse and touch input.

/// Pointer event delivered to the drawing surface.
///
/// Mouse and touch backends both translate into these, so the surface has a
/// single code path for either kind of input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Button pressed or finger placed on the canvas
    Down { x: f64, y: f64 },
    /// Pointer moved (with or without a stroke in progress)
    Move { x: f64, y: f64 },
    /// Button released or finger lifted
    Up,
    /// Pointer left the canvas
    Leave,
}

/// Phase of a touch contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

impl PointerEvent {
    /// Maps a touch contact onto the equivalent pointer event (1:1).
    pub fn from_touch(phase: TouchPhase, x: f64, y: f64) -> Self {
        match phase {
            TouchPhase::Start => PointerEvent::Down { x, y },
            TouchPhase::Move => PointerEvent::Move { x, y },
            TouchPhase::End => PointerEvent::Up,
            TouchPhase::Cancel => PointerEvent::Leave,
        }
    }
}
