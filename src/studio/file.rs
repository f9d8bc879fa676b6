//! Loading sketches from disk and saving images back out.

use crate::config::OutputConfig;
use crate::util;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
const JPEG_SIGNATURE: &[u8] = &[0xff, 0xd8, 0xff];

/// Errors that can occur while reading or writing image files.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} is not a PNG or JPEG image")]
    UnsupportedFormat(String),

    #[error("Image is {size} bytes; the limit is {limit}")]
    TooLarge { size: u64, limit: u64 },

    #[error("Image data is not valid base64: {0}")]
    InvalidData(String),
}

/// Identifies PNG and JPEG data by its leading magic bytes.
pub fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(PNG_SIGNATURE) {
        Some("image/png")
    } else if bytes.starts_with(JPEG_SIGNATURE) {
        Some("image/jpeg")
    } else {
        None
    }
}

/// Reads an image file fully into memory and returns it as a data URL.
///
/// # Errors
/// Fails if the file is larger than `max_bytes`, cannot be read, or is not a
/// PNG or JPEG.
pub fn load_image(path: &Path, max_bytes: u64) -> Result<String, FileError> {
    let size = fs::metadata(path)?.len();
    if size > max_bytes {
        return Err(FileError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let bytes = fs::read(path)?;
    let mime = sniff_image_mime(&bytes)
        .ok_or_else(|| FileError::UnsupportedFormat(path.display().to_string()))?;

    log::info!("Loaded {} ({} bytes, {})", path.display(), bytes.len(), mime);
    Ok(util::encode_data_url(mime, &bytes))
}

/// Decodes a data URL and writes the image bytes to `path`.
///
/// Missing parent directories are created. Returns the path written.
pub fn save_data_url(data_url: &str, path: &Path) -> Result<PathBuf, FileError> {
    let (_, bytes) =
        util::decode_data_url(data_url).map_err(|e| FileError::InvalidData(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_directory_exists(parent)?;
    }

    fs::write(path, &bytes)?;
    log::info!("Saved {} ({} bytes)", path.display(), bytes.len());
    Ok(path.to_path_buf())
}

/// Ensure the directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<(), FileError> {
    if !directory.exists() {
        log::info!("Creating output directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }
    Ok(())
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

/// Resolves `filename` against the configured output directory.
pub fn output_path(config: &OutputConfig, filename: &str) -> PathBuf {
    let directory = config.directory.trim();
    if directory.is_empty() {
        PathBuf::from(filename)
    } else {
        expand_tilde(directory).join(filename)
    }
}

/// Inserts a style suffix before the extension: `refined-sketch.png` becomes
/// `refined-sketch-oil.png`.
pub fn styled_filename(filename: &str, style: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{}-{}.{}", stem, style, ext),
        _ => format!("{}-{}", filename, style),
    }
}
