//! Output encodings and encoder errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Quality used when the requested quality is outside `[0, 1]`.
pub const DEFAULT_QUALITY: f64 = 0.92;

/// Errors that can occur while encoding a raster surface.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying codec failed
    #[error("{format} encoding failed: {message}")]
    EncodingFailed {
        format: &'static str,
        message: String,
    },
}

/// The fixed set of output encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageType {
    #[serde(rename = "image/png")]
    Png,
    #[default]
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/gif")]
    Gif,
}

impl ImageType {
    pub const ALL: [ImageType; 3] = [ImageType::Png, ImageType::Jpeg, ImageType::Gif];

    /// Look up an encoding by its exact MIME identifier.
    pub fn from_mime(mime: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.mime() == mime)
    }

    pub fn mime(self) -> &'static str {
        match self {
            ImageType::Png => "image/png",
            ImageType::Jpeg => "image/jpeg",
            ImageType::Gif => "image/gif",
        }
    }
}

/// Check whether `value` is exactly one of the allowed MIME identifiers.
pub fn is_allowed(value: &str) -> bool {
    ImageType::from_mime(value).is_some()
}

/// Map a requested quality onto what the encoder will use.
///
/// Values outside `[0, 1]` (including NaN) fall back to [`DEFAULT_QUALITY`],
/// the same rule canvas `toDataURL` applies.
pub fn effective_quality(quality: f64) -> f64 {
    if (0.0..=1.0).contains(&quality) {
        quality
    } else {
        DEFAULT_QUALITY
    }
}
