//! Compression entry points.
//!
//! - [`compress`] re-encodes once at a fixed quality.
//! - [`compress_accurately`] searches the quality range for an encoding
//!   whose size lands inside a tolerance band around a target.
//!
//! Both return the input unchanged when there is nothing to do or when the
//! re-encoded result would be larger than the input. Those outcomes are
//! `Ok`, not errors.
//!
//! # Output type
//!
//! A valid requested `type` is used both to encode and to label the result.
//! An invalid (or, for `compress_accurately`, absent) `type` encodes JPEG
//! but labels the result with the source MIME type. This mismatch is kept
//! deliberately until the intended behavior is settled.

mod accurate;
mod search;
mod simple;

use log::warn;
use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::{EncodeError, ImageType};
use crate::transform::TransformError;

pub use accurate::compress_accurately;
pub use search::{
    estimate_size, search_quality, Candidate, CanvasEncoder, QualityEncoder, SearchOutcome,
    SizeBand, INITIAL_QUALITY, MAX_ITERATIONS, SIZE_PER_CHAR,
};
pub use simple::compress;

/// Errors surfaced by the compression entry points.
#[derive(Debug, Error)]
pub enum CompressError {
    /// The input is not a binary blob.
    #[error("{0}(): First arg must be a Blob object or a File object")]
    InputType(&'static str),

    /// A required configuration field is missing.
    #[error("config.type undefined")]
    MissingType,

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    /// The search loop finished without producing a candidate.
    #[error("compress_accurately(): quality search produced no candidate")]
    NoCandidate,
}

/// The encoding to produce and the MIME label to attach to the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OutputType {
    pub encode: ImageType,
    pub label: String,
}

/// Resolve the requested `type` against the source MIME type.
pub(crate) fn resolve_output(requested: Option<&str>, source_mime: String) -> OutputType {
    match requested.and_then(ImageType::from_mime) {
        Some(image_type) => OutputType {
            encode: image_type,
            label: image_type.mime().to_string(),
        },
        None => {
            if let Some(requested) = requested {
                warn!(
                    "unsupported output type {:?}; encoding as image/jpeg, labelled {}",
                    requested, source_mime
                );
            }
            OutputType {
                encode: ImageType::Jpeg,
                label: source_mime,
            }
        }
    }
}
