//! Rendering primitives and stroke definitions (Cairo-based).
//!
//! This module defines the core drawing types of the sketch canvas:
//! - [`Color`]: RGBA color representation with a small palette
//! - [`Stroke`]: one freehand pen or eraser path
//! - [`Frame`]: ordered buffer of committed strokes
//! - Rendering and PNG / data URL export

pub mod color;
pub mod export;
pub mod frame;
pub mod render;
pub mod stroke;

pub use color::Color;
pub use export::{ExportError, PNG_MIME, export_data_url, export_png, rasterize};
pub use frame::Frame;
pub use render::{PathSegment, RenderOptions, render_background, render_stroke, render_strokes};
pub use stroke::Stroke;
