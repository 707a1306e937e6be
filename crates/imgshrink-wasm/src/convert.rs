//! Conversion WASM bindings: files, data URLs and rasters.
//!
//! These are the building blocks the compression functions are made of,
//! exposed for callers that want to run a step on its own.
//!
//! # Example
//!
//! ```typescript
//! import { JsImageFile, file_to_data_url, data_url_to_image, image_to_canvas,
//!          canvas_to_file } from '@imgshrink/wasm';
//!
//! const file = new JsImageFile(bytes, 'image/jpeg');
//! const image = data_url_to_image(file_to_data_url(file));
//! const canvas = image_to_canvas(image, { scale: 0.5, orientation: 6 });
//! const png = canvas_to_file(canvas, undefined, 'image/png');
//! ```

use crate::config::read_object;
use crate::types::{JsImageFile, JsRasterSurface};
use imgshrink_core::{ImageType, TransformConfig};
use wasm_bindgen::prelude::*;

/// Encode a file as a `data:<mime>;base64,<payload>` URL.
#[wasm_bindgen]
pub fn file_to_data_url(file: &JsImageFile) -> String {
    imgshrink_core::file_to_data_url(file.as_blob())
}

/// Decode a data URL into a file.
///
/// `mime` labels the result when it is one of the supported image types;
/// otherwise the data URL's own MIME type is used.
///
/// # Errors
///
/// Returns an error if the data URL has no comma, no MIME type, or an
/// invalid base64 payload.
#[wasm_bindgen]
pub fn data_url_to_file(data_url: &str, mime: Option<String>) -> Result<JsImageFile, JsValue> {
    imgshrink_core::data_url_to_file(data_url, mime.as_deref().unwrap_or_default())
        .map(JsImageFile::from_blob)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode a data URL into an RGBA raster.
///
/// # Errors
///
/// Returns an error if the data URL is malformed or the payload is not a
/// decodable image.
#[wasm_bindgen]
pub fn data_url_to_image(data_url: &str) -> Result<JsRasterSurface, JsValue> {
    imgshrink_core::data_url_to_image(data_url)
        .map(JsRasterSurface::from_surface)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Draw an image onto a new canvas, resized and re-oriented per `config`
/// (`{ width, height, scale, orientation }`, all optional).
///
/// # Errors
///
/// Returns an error if `config` is not a valid options object, or if the
/// resulting canvas would exceed the size limit.
#[wasm_bindgen]
pub fn image_to_canvas(image: &JsRasterSurface, config: &JsValue) -> Result<JsRasterSurface, JsValue> {
    let config: TransformConfig = read_object(config)?;
    imgshrink_core::image_to_canvas(&image.to_surface(), &config)
        .map(JsRasterSurface::from_surface)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a canvas to a data URL.
///
/// A missing or out-of-range `quality` uses 0.92. A missing or unsupported
/// `mime` encodes JPEG.
///
/// # Errors
///
/// Returns an error if the canvas has zero dimensions or a malformed pixel
/// buffer.
#[wasm_bindgen]
pub fn canvas_to_data_url(
    canvas: &JsRasterSurface,
    quality: Option<f64>,
    mime: Option<String>,
) -> Result<String, JsValue> {
    imgshrink_core::canvas_to_data_url(
        &canvas.to_surface(),
        quality.unwrap_or(f64::NAN),
        output_type(mime.as_deref()),
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a canvas straight to a file. Same defaults as
/// [`canvas_to_data_url`].
#[wasm_bindgen]
pub fn canvas_to_file(
    canvas: &JsRasterSurface,
    quality: Option<f64>,
    mime: Option<String>,
) -> Result<JsImageFile, JsValue> {
    imgshrink_core::canvas_to_file(
        &canvas.to_surface(),
        quality.unwrap_or(f64::NAN),
        output_type(mime.as_deref()),
    )
    .map(JsImageFile::from_blob)
    .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// The EXIF orientation code (1-8) of a JPEG, if it has one.
#[wasm_bindgen]
pub fn read_orientation(bytes: &[u8]) -> Option<u8> {
    imgshrink_core::read_orientation(bytes)
}

/// Whether `mime` is one of the supported output types.
#[wasm_bindgen]
pub fn is_image_type(mime: &str) -> bool {
    imgshrink_core::is_allowed(mime)
}

fn output_type(mime: Option<&str>) -> ImageType {
    mime.and_then(ImageType::from_mime).unwrap_or_default()
}

/// Tests for conversion bindings.
///
/// Functions returning `Result<T, JsValue>` only run on wasm32; see
/// `wasm_tests` below.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_type_defaults_to_jpeg() {
        assert_eq!(output_type(None), ImageType::Jpeg);
        assert_eq!(output_type(Some("image/webp")), ImageType::Jpeg);
        assert_eq!(output_type(Some("image/gif")), ImageType::Gif);
    }

    #[test]
    fn test_is_image_type() {
        assert!(is_image_type("image/png"));
        assert!(is_image_type("image/jpeg"));
        assert!(is_image_type("image/gif"));
        assert!(!is_image_type("image/bmp"));
        assert!(!is_image_type(""));
    }

    #[test]
    fn test_read_orientation_without_exif() {
        assert_eq!(read_orientation(&[0, 1, 2, 3]), None);
    }

    #[test]
    fn test_file_to_data_url() {
        let file = JsImageFile::new(b"abc".to_vec(), "image/png".to_string());
        assert_eq!(file_to_data_url(&file), "data:image/png;base64,YWJj");
    }
}
