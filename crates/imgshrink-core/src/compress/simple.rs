//! Single-pass compression at a fixed quality.

use log::{debug, info};

use super::{resolve_output, CompressError};
use crate::blob::Blob;
use crate::config::CompressConfig;
use crate::data_url::{data_url_to_file, file_to_data_url, DataUrl};
use crate::decode::data_url_to_image;
use crate::encode::canvas_to_data_url;
use crate::transform::image_to_canvas;

/// Re-encode `file` once at `config.quality`.
///
/// Returns `file` unchanged when `quality` is unset, or when the
/// re-encoded result would be larger than `file`. `quality` is passed to
/// the encoder as is; see [`effective_quality`](crate::encode::effective_quality).
///
/// # Errors
///
/// - `CompressError::MissingType` if `config.mime_type` is `None`
/// - `CompressError::Decode` if the input cannot be decoded
/// - `CompressError::Transform` if the requested canvas is too large
/// - `CompressError::Encode` if encoding fails
pub fn compress(file: Blob, config: &CompressConfig) -> Result<Blob, CompressError> {
    let Some(quality) = config.quality.filter(|q| !q.is_nan()) else {
        debug!("compress: quality is not a number, returning input");
        return Ok(file);
    };

    let data_url = file_to_data_url(&file);
    let source_mime = DataUrl::parse_mime(&data_url)?;

    let requested = config.mime_type.as_deref().ok_or(CompressError::MissingType)?;
    let output = resolve_output(Some(requested), source_mime);

    let image = data_url_to_image(&data_url)?;
    let canvas = image_to_canvas(&image, &config.transform)?;
    let compressed_url = canvas_to_data_url(&canvas, quality, output.encode)?;
    let compressed = data_url_to_file(&compressed_url, &output.label)?;

    if compressed.size() > file.size() {
        info!(
            "compress: result {} bytes exceeds input {} bytes, returning input",
            compressed.size(),
            file.size()
        );
        return Ok(file);
    }

    info!(
        "compress: {} -> {} bytes ({} at quality {})",
        file.size(),
        compressed.size(),
        output.encode.mime(),
        quality
    );
    Ok(compressed)
}
