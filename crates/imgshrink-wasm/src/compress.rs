//! Compression WASM bindings.
//!
//! # Functions
//!
//! - [`compress`] - Re-encode once at a fixed quality
//! - [`compress_accurately`] - Re-encode to land near a target size in KB
//!
//! # Example
//!
//! ```typescript
//! import { compress, compress_accurately } from '@imgshrink/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//!
//! const small = compress(bytes, file.type, { quality: 0.8, type: 'image/jpeg' });
//! const sized = compress_accurately(bytes, file.type, 200); // ~200 KB
//! const blob = new Blob([sized.bytes()], { type: sized.mime });
//! ```

use crate::config::read_config;
use crate::types::JsImageFile;
use imgshrink_core::{Blob, CompressAccuratelyConfig, CompressConfig, CompressError};
use js_sys::Uint8Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Re-encode an image once at `config.quality`.
///
/// # Arguments
///
/// * `input` - The file bytes as a `Uint8Array`
/// * `mime` - The file's MIME type (`file.type`); empty to sniff it
/// * `config` - `{ quality, type, width, height, scale, orientation }`, or a
///   bare quality number
///
/// # Returns
///
/// The compressed file, or the input unchanged when `quality` is missing or
/// the result would be larger than the input.
///
/// # Errors
///
/// Returns an error if:
/// - `input` is not a `Uint8Array`
/// - `config.type` is missing
/// - The image cannot be decoded or encoded
#[wasm_bindgen]
pub fn compress(input: &JsValue, mime: &str, config: &JsValue) -> Result<JsImageFile, JsValue> {
    let file = read_input(input, mime, "compress")?;
    let config: CompressConfig = read_config(config)?;

    imgshrink_core::compress(file, &config)
        .map(JsImageFile::from_blob)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Re-encode an image so its size lands near `config.size` KB.
///
/// # Arguments
///
/// * `input` - The file bytes as a `Uint8Array`
/// * `mime` - The file's MIME type (`file.type`); empty to sniff it
/// * `config` - `{ size, accuracy, type, width, height, scale, orientation }`,
///   or a bare size in KB
///
/// # Returns
///
/// The compressed file, or the input unchanged when `size` is missing, the
/// input is already smaller than the target, or the result would be larger
/// than the input.
///
/// # Errors
///
/// Returns an error if `input` is not a `Uint8Array`, or the image cannot
/// be decoded or encoded.
#[wasm_bindgen]
pub fn compress_accurately(
    input: &JsValue,
    mime: &str,
    config: &JsValue,
) -> Result<JsImageFile, JsValue> {
    let file = read_input(input, mime, "compressAccurately")?;
    let config: CompressAccuratelyConfig = read_config(config)?;

    imgshrink_core::compress_accurately(file, &config)
        .map(JsImageFile::from_blob)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn read_input(input: &JsValue, mime: &str, caller: &'static str) -> Result<Blob, JsValue> {
    input
        .dyn_ref::<Uint8Array>()
        .map(|array| Blob::new(array.to_vec(), mime))
        .ok_or_else(|| JsValue::from_str(&CompressError::InputType(caller).to_string()))
}

/// WASM-specific tests that require JsValue.
///
/// The compression paths themselves are covered by the tests in
/// `imgshrink_core::compress`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn png_bytes() -> Uint8Array {
        let surface = imgshrink_core::RasterSurface::new(8, 8, vec![200u8; 8 * 8 * 4]);
        let file = imgshrink_core::canvas_to_file(&surface, 1.0, imgshrink_core::ImageType::Png)
            .unwrap();
        Uint8Array::from(file.bytes())
    }

    #[wasm_bindgen_test]
    fn test_rejects_non_binary_input() {
        let err = compress(&JsValue::from_str("not a file"), "", &JsValue::from_f64(0.5))
            .err()
            .unwrap();
        assert_eq!(
            err.as_string().unwrap(),
            "compress(): First arg must be a Blob object or a File object"
        );

        let err = compress_accurately(&JsValue::NULL, "", &JsValue::from_f64(10.0))
            .err()
            .unwrap();
        assert_eq!(
            err.as_string().unwrap(),
            "compressAccurately(): First arg must be a Blob object or a File object"
        );
    }

    #[wasm_bindgen_test]
    fn test_missing_type_errors() {
        let input = png_bytes();
        let err = compress(&input, "image/png", &JsValue::from_f64(0.5)).err().unwrap();
        assert_eq!(err.as_string().unwrap(), "config.type undefined");
    }

    #[wasm_bindgen_test]
    fn test_missing_quality_returns_input() {
        let input = png_bytes();
        let out = compress(&input, "image/png", &JsValue::UNDEFINED).unwrap();
        assert_eq!(out.bytes(), input.to_vec());
        assert_eq!(out.mime(), "image/png");
    }

    #[wasm_bindgen_test]
    fn test_target_above_input_returns_input() {
        let input = png_bytes();
        let out = compress_accurately(&input, "image/png", &JsValue::from_str("500")).unwrap();
        assert_eq!(out.bytes(), input.to_vec());
    }
}
