//! Encoding raster surfaces to PNG, JPEG or GIF.
//!
//! JPEG has no alpha channel: pixels are composited onto black first, as a
//! canvas does when exporting JPEG. PNG and GIF ignore the quality argument.

use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::io::Cursor;

use super::{effective_quality, EncodeError, ImageType};
use crate::blob::Blob;
use crate::data_url::DataUrl;
use crate::decode::RasterSurface;

/// Encode a surface to bytes in the given format.
///
/// # Arguments
///
/// * `surface` - RGBA surface to encode
/// * `image_type` - Output encoding
/// * `quality` - Quality in `[0, 1]`; out-of-range values use the default
///
/// # Errors
///
/// Returns an error if the surface has zero dimensions, a pixel buffer of
/// the wrong length, or the codec fails.
pub fn encode_raster(
    surface: &RasterSurface,
    image_type: ImageType,
    quality: f64,
) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (surface.width, surface.height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 4;
    if surface.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: surface.pixels.len(),
        });
    }

    match image_type {
        ImageType::Jpeg => encode_jpeg(surface, quality),
        ImageType::Png => encode_png(surface),
        ImageType::Gif => encode_gif(surface),
    }
}

/// Encode a surface to a data URL string.
pub fn canvas_to_data_url(
    surface: &RasterSurface,
    quality: f64,
    image_type: ImageType,
) -> Result<String, EncodeError> {
    let bytes = encode_raster(surface, image_type, quality)?;
    Ok(DataUrl::new(image_type.mime(), bytes).to_string())
}

/// Encode a surface straight to a blob, skipping the data URL form.
pub fn canvas_to_file(
    surface: &RasterSurface,
    quality: f64,
    image_type: ImageType,
) -> Result<Blob, EncodeError> {
    let bytes = encode_raster(surface, image_type, quality)?;
    Ok(Blob::new(bytes, image_type.mime()))
}

/// Map a `[0, 1]` quality onto the JPEG encoder's 1-100 scale.
fn jpeg_quality(quality: f64) -> u8 {
    ((effective_quality(quality) * 100.0).round() as u8).clamp(1, 100)
}

fn encode_jpeg(surface: &RasterSurface, quality: f64) -> Result<Vec<u8>, EncodeError> {
    let rgb: Vec<u8> = surface
        .pixels
        .chunks_exact(4)
        .flat_map(|px| {
            let alpha = px[3] as u16;
            [
                (px[0] as u16 * alpha / 255) as u8,
                (px[1] as u16 * alpha / 255) as u8,
                (px[2] as u16 * alpha / 255) as u8,
            ]
        })
        .collect();

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, jpeg_quality(quality))
        .write_image(&rgb, surface.width, surface.height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: "JPEG",
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}

fn encode_png(surface: &RasterSurface) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(
            &surface.pixels,
            surface.width,
            surface.height,
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| EncodeError::EncodingFailed {
            format: "PNG",
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}

fn encode_gif(surface: &RasterSurface) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Vec::new();
    {
        // The GIF trailer is written when the encoder drops
        let mut encoder = GifEncoder::new(&mut buffer);
        encoder
            .encode(
                &surface.pixels,
                surface.width,
                surface.height,
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| EncodeError::EncodingFailed {
                format: "GIF",
                message: e.to_string(),
            })?;
    }

    Ok(buffer)
}
