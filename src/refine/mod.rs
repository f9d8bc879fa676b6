//! Sketch refinement through a generative image model.
//!
//! A [`RefineClient`] turns an exported sketch, a style, and optional user
//! guidance into one request against a [`RefineTransport`] and unwraps the
//! image it returns. [`RefineManager`] runs the client on a background task so
//! the drawing surface stays usable while a request is outstanding.

pub mod client;
pub mod gemini;
pub mod manager;
pub mod style;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{RefineClient, RefineTransport};
pub use gemini::GeminiTransport;
pub use manager::RefineManager;
pub use style::{Style, build_instruction};
pub use types::{
    ContentPart, FinishedJob, GenerateRequest, GenerateResponse, RefineError, RefineJob,
    RefineOutcome,
};
