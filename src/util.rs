//! Utility functions for data URLs and color names.
//!
//! This module provides:
//! - Encoding and decoding of `data:<mime>;base64,<payload>` URLs
//! - Name-to-color mapping for the config file

use crate::draw::{Color, color::*};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

// ============================================================================
// Data URLs
// ============================================================================

/// MIME type assumed when a payload carries no `data:` prefix.
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Wraps raw bytes as a base64 data URL.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Wraps an already base64-encoded payload as a data URL.
pub fn wrap_base64(mime: &str, payload: &str) -> String {
    format!("data:{};base64,{}", mime, payload)
}

/// Returns the base64 payload of a data URL.
///
/// Everything up to and including the first comma is the encoding-scheme
/// prefix. Input without a comma is assumed to be a bare payload and is
/// returned unchanged.
pub fn strip_data_url_prefix(data_url: &str) -> &str {
    match data_url.split_once(',') {
        Some((_, payload)) if !payload.is_empty() => payload,
        _ => data_url,
    }
}

/// Extracts the MIME type from a `data:` prefix, if there is one.
pub fn data_url_mime(data_url: &str) -> Option<&str> {
    let header = data_url.strip_prefix("data:")?.split_once(',')?.0;
    let mime = header.split(';').next()?;
    (!mime.is_empty()).then_some(mime)
}

/// Decodes a data URL (or bare base64 payload) into its MIME type and bytes.
pub fn decode_data_url(data_url: &str) -> Result<(String, Vec<u8>), base64::DecodeError> {
    let mime = data_url_mime(data_url).unwrap_or(DEFAULT_IMAGE_MIME).to_string();
    let payload = strip_data_url_prefix(data_url).trim();
    let bytes = STANDARD.decode(payload)?;
    Ok((mime, bytes))
}

// ============================================================================
// Color Names
// ============================================================================

/// Maps a color name from the config file to a [`Color`].
///
/// Case-insensitive. Returns `None` for unknown names so callers can decide on
/// a fallback.
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "black" => Some(BLACK),
        "white" => Some(WHITE),
        "graphite" | "gray" | "grey" => Some(GRAPHITE),
        "sepia" | "brown" => Some(SEPIA),
        "red" => Some(RED),
        "blue" => Some(BLUE),
        _ => None,
    }
}
