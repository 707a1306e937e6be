//! Compression to a target size.

use log::{debug, info};

use super::search::{search_quality, CanvasEncoder, SizeBand};
use super::{resolve_output, CompressError};
use crate::blob::Blob;
use crate::config::CompressAccuratelyConfig;
use crate::data_url::{data_url_to_file, file_to_data_url, DataUrl};
use crate::decode::data_url_to_image;
use crate::transform::image_to_canvas;

/// Compress `file` so its size lands within the accuracy band around
/// `config.size` KB.
///
/// Returns `file` unchanged when `size` is unset, when `size * 1024` already
/// exceeds the input size, or when the chosen encoding is larger than the
/// input. At most 7 encodes are performed; if none lands in the band, the
/// one closest to the target is used.
///
/// # Errors
///
/// - `CompressError::Decode` if the input cannot be decoded
/// - `CompressError::Transform` if the requested canvas is too large
/// - `CompressError::Encode` if encoding fails
/// - `CompressError::NoCandidate` if the search produced nothing
pub fn compress_accurately(
    file: Blob,
    config: &CompressAccuratelyConfig,
) -> Result<Blob, CompressError> {
    let Some(size) = config.size.filter(|s| !s.is_nan()) else {
        debug!("compress_accurately: size is not a number, returning input");
        return Ok(file);
    };

    if size * 1024.0 > file.size() as f64 {
        debug!(
            "compress_accurately: target {} KB exceeds input {} bytes, returning input",
            size,
            file.size()
        );
        return Ok(file);
    }

    let band = SizeBand::new(size, config.effective_accuracy());

    let data_url = file_to_data_url(&file);
    let source_mime = DataUrl::parse_mime(&data_url)?;
    let output = resolve_output(config.mime_type.as_deref(), source_mime);

    let image = data_url_to_image(&data_url)?;
    let canvas = image_to_canvas(&image, &config.transform)?;

    let mut encoder = CanvasEncoder::new(&canvas, output.encode);
    let outcome = search_quality(&mut encoder, &band)?;
    let compressed = data_url_to_file(&outcome.candidate.data_url, &output.label)?;

    if compressed.size() > file.size() {
        info!(
            "compress_accurately: result {} bytes exceeds input {} bytes, returning input",
            compressed.size(),
            file.size()
        );
        return Ok(file);
    }

    info!(
        "compress_accurately: {} -> {} bytes (target {:.0}, quality {:.4}, {} encodes, in band: {})",
        file.size(),
        compressed.size(),
        band.target,
        outcome.candidate.quality,
        outcome.iterations,
        outcome.in_band
    );
    Ok(compressed)
}
