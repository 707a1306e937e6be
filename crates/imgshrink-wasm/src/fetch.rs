//! Loading files and images from a URL.
//!
//! # Example
//!
//! ```typescript
//! import { url_to_blob, url_to_image } from '@imgshrink/wasm';
//!
//! const file = await url_to_blob('https://example.com/photo.jpg');
//! const image = await url_to_image('https://example.com/photo.jpg');
//! console.log(`${file.size} bytes, ${image.width}x${image.height}`);
//! ```

use crate::types::{JsImageFile, JsRasterSurface};
use imgshrink_core::decode::decode_raster;
use imgshrink_core::Blob;
use js_sys::Uint8Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

const IMAGE_LOAD_ERROR: &str = "urlToImage(): Image failed to load, please check the image URL";

/// Fetch `url` and return its body as a file, labelled with the response
/// `Content-Type` (sniffed from the bytes when absent).
///
/// # Errors
///
/// Returns the fetch rejection if the request fails.
#[wasm_bindgen]
pub async fn url_to_blob(url: String) -> Result<JsImageFile, JsValue> {
    fetch_file(&url).await.map(JsImageFile::from_blob)
}

/// Fetch `url` and decode it into an RGBA raster.
///
/// # Errors
///
/// Returns an error if the request fails or the body is not a decodable
/// image.
#[wasm_bindgen]
pub async fn url_to_image(url: String) -> Result<JsRasterSurface, JsValue> {
    let file = fetch_file(&url).await.map_err(|e| {
        log::warn!("url_to_image: fetching {} failed: {:?}", url, e);
        JsValue::from_str(IMAGE_LOAD_ERROR)
    })?;

    decode_raster(file.bytes())
        .map(JsRasterSurface::from_surface)
        .map_err(|e| {
            log::warn!("url_to_image: decoding {} failed: {}", url, e);
            JsValue::from_str(IMAGE_LOAD_ERROR)
        })
}

async fn fetch_file(url: &str) -> Result<Blob, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let response: Response = JsFuture::from(window.fetch_with_str(url))
        .await?
        .dyn_into()?;

    let mime = response
        .headers()
        .get("content-type")?
        .unwrap_or_default();
    let buffer = JsFuture::from(response.array_buffer()?).await?;
    Ok(Blob::new(Uint8Array::new(&buffer).to_vec(), mime))
}


/// WASM-specific tests that require a browser `fetch`.
///
/// Data URLs stand in for remote images so no network is needed.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use imgshrink_core::{canvas_to_data_url, ImageType, RasterSurface};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn png_data_url() -> String {
        let surface = RasterSurface::new(5, 3, vec![77u8; 5 * 3 * 4]);
        canvas_to_data_url(&surface, 1.0, ImageType::Png).unwrap()
    }

    #[wasm_bindgen_test]
    async fn test_url_to_blob_reads_bytes_and_type() {
        let file = url_to_blob(png_data_url()).await.unwrap();
        assert_eq!(file.mime(), "image/png");
        assert!(file.size() > 0);
    }

    #[wasm_bindgen_test]
    async fn test_url_to_image_decodes() {
        let image = url_to_image(png_data_url()).await.unwrap();
        assert_eq!((image.width(), image.height()), (5, 3));
    }

    #[wasm_bindgen_test]
    async fn test_url_to_image_rejects_non_image() {
        let err = url_to_image("data:text/plain;base64,aGVsbG8=".to_string())
            .await
            .err()
            .unwrap();
        assert_eq!(err.as_string().unwrap(), IMAGE_LOAD_ERROR);
    }
}
