//! Imgshrink WASM - WebAssembly bindings for Imgshrink
//!
//! This crate provides WASM bindings to expose the imgshrink-core
//! functionality to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `compress` - Fixed-quality and target-size compression
//! - `convert` - File, data URL and raster conversions
//! - `download` - Saving a file through the browser
//! - `fetch` - Loading a file or image from a URL
//! - `types` - WASM-compatible wrapper types for files and rasters
//!
//! # Usage
//!
//! ```typescript
//! import init, { compress_accurately, download_file } from '@imgshrink/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = compress_accurately(bytes, file.type, { size: 100, accuracy: 0.9 });
//! console.log(`${file.size} -> ${result.size} bytes`);
//! download_file(result, 'compressed.jpg');
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod config;
mod convert;
mod download;
mod fetch;
mod logger;
mod types;

// Re-export public types
pub use compress::{compress, compress_accurately};
pub use convert::{
    canvas_to_data_url, canvas_to_file, data_url_to_file, data_url_to_image, file_to_data_url,
    image_to_canvas, is_image_type, read_orientation,
};
pub use download::download_file;
pub use fetch::{url_to_blob, url_to_image};
pub use types::{JsImageFile, JsRasterSurface};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logger::install();
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Set the console log level: `off`, `error`, `warn` (default), `info`,
/// `debug` or `trace`. Returns false for an unknown level.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> bool {
    match logger::parse_level(level) {
        Some(filter) => {
            log::set_max_level(filter);
            true
        }
        None => false,
    }
}


/// WASM-specific tests that touch the browser console.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_init_is_repeatable() {
        init();
        init();
        log::warn!("console logger installed");
        assert!(log::max_level() >= log::LevelFilter::Warn);
    }
}
