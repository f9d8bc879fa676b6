//! Sketch drawing and AI refinement.
//!
//! Exposes the drawing surface, the refinement client, and the session studio
//! so that the command-line binary and external tools share one
//! implementation.

pub mod config;
pub mod draw;
pub mod input;
pub mod refine;
pub mod studio;
pub mod util;

pub use config::Config;
pub use studio::Studio;
