//! Data types for sketch refinement.

use std::time::Duration;
use thiserror::Error;

/// One request to the image model: the raw sketch and the instruction text.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    /// Decoded image bytes (no data URL prefix).
    pub image: Vec<u8>,
    /// MIME type of `image`.
    pub mime_type: String,
    /// Natural-language instruction sent alongside the image.
    pub instruction: String,
}

/// Content returned by the image model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateResponse {
    pub parts: Vec<ContentPart>,
}

/// A single part of a model response.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    Text(String),
    /// Inline image; `data` is base64 as delivered by the service.
    InlineImage { mime_type: String, data: String },
}

impl GenerateResponse {
    /// Returns the base64 payload of the first inline image, if any.
    pub fn first_image(&self) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            ContentPart::InlineImage { data, .. } if !data.is_empty() => Some(data.as_str()),
            _ => None,
        })
    }
}

/// A queued refinement for the background worker.
#[derive(Debug, Clone)]
pub struct RefineJob {
    /// Caller-chosen id, echoed back in [`FinishedJob`].
    pub id: u64,
    /// Input sketch as a data URL or bare base64 payload.
    pub image: String,
    pub style: String,
    pub details: Option<String>,
}

/// Outcome of a refinement job (success or failure).
#[derive(Debug, Clone, PartialEq)]
pub enum RefineOutcome {
    /// Refined image as a PNG data URL, with the style that produced it.
    Success { image: String, style: String },
    Failed(String),
}

/// A job's outcome, tagged with the id of the job that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct FinishedJob {
    pub id: u64,
    pub outcome: RefineOutcome,
}

/// Errors that can occur while refining a sketch.
#[derive(Debug, Error)]
pub enum RefineError {
    #[error("No image returned from the model")]
    NoImageReturned,

    #[error("Refinement request failed: {0}")]
    Transport(String),

    #[error("Refinement timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Input image is not valid base64: {0}")]
    InvalidImage(String),

    #[error("Refinement is not configured: {0}")]
    Configuration(String),

    #[error("Refinement worker is not running")]
    ManagerUnavailable,
}

impl From<reqwest::Error> for RefineError {
    fn from(err: reqwest::Error) -> Self {
        RefineError::Transport(err.to_string())
    }
}
