mod pointer;
mod surface;

pub use surface::{DrawingState, DrawingSurface, MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};
