//! Image decoding for the compression pipeline.
//!
//! This module provides functionality for:
//! - Decoding PNG, JPEG and GIF bytes into an RGBA [`RasterSurface`]
//! - Decoding the image embedded in a data URL
//! - Sniffing the MIME type of encoded bytes
//! - Reading the EXIF orientation code
//!
//! # Examples
//!
//! ```ignore
//! use imgshrink_core::decode::decode_raster;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let surface = decode_raster(&bytes).unwrap();
//! println!("Decoded {}x{} image", surface.width, surface.height);
//! ```

mod raster;
mod types;

#[cfg(test)]
pub(crate) use raster::fixtures;
pub use raster::{data_url_to_image, decode_raster, read_orientation, sniff_mime};
pub use types::{DecodeError, RasterSurface};
