//! WASM-compatible wrapper types for files and rasters.
//!
//! These wrap the core `Blob` and `RasterSurface` types and handle the
//! conversion between Rust and JavaScript data representations.

use imgshrink_core::{Blob, RasterSurface};
use wasm_bindgen::prelude::*;

/// A decoded RGBA raster, the JavaScript side of a canvas.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy
/// is made to JavaScript memory as a `Uint8Array`, which can be wrapped in an
/// `ImageData` for drawing.
#[wasm_bindgen]
pub struct JsRasterSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRasterSurface {
    /// Create a surface from dimensions and RGBA pixel data
    /// (4 bytes per pixel, row-major order).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRasterSurface {
        JsRasterSurface {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 4).
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array. This copies.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsRasterSurface {
    pub(crate) fn from_surface(surface: RasterSurface) -> Self {
        Self {
            width: surface.width,
            height: surface.height,
            pixels: surface.pixels,
        }
    }

    /// Clones the pixel data.
    pub(crate) fn to_surface(&self) -> RasterSurface {
        RasterSurface {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// Encoded file bytes with a MIME type, the JavaScript side of a `Blob`.
///
/// Construct one from `new Uint8Array(await file.arrayBuffer())` and
/// `file.type`; turn it back into a browser `Blob` with
/// `new Blob([image.bytes()], { type: image.mime })`.
#[wasm_bindgen]
pub struct JsImageFile {
    inner: Blob,
}

#[wasm_bindgen]
impl JsImageFile {
    /// An empty `mime` is filled in from the file signature when recognized.
    #[wasm_bindgen(constructor)]
    pub fn new(bytes: Vec<u8>, mime: String) -> JsImageFile {
        JsImageFile {
            inner: Blob::new(bytes, mime),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn mime(&self) -> String {
        self.inner.mime().to_string()
    }

    /// Size in bytes.
    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.inner.size()
    }

    /// Returns the encoded bytes as Uint8Array. This copies.
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes().to_vec()
    }
}

impl JsImageFile {
    pub(crate) fn from_blob(inner: Blob) -> Self {
        Self { inner }
    }

    pub(crate) fn as_blob(&self) -> &Blob {
        &self.inner
    }
}
