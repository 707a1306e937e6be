//! Image encoding for the compression pipeline.
//!
//! This module provides functionality for:
//! - Validating requested output encodings against the allowed set
//! - Encoding a [`RasterSurface`](crate::decode::RasterSurface) to PNG, JPEG or GIF
//! - Producing the data URL form used for size estimation
//!
//! # Examples
//!
//! ```ignore
//! use imgshrink_core::encode::{canvas_to_data_url, ImageType};
//!
//! let url = canvas_to_data_url(&surface, 0.8, ImageType::Jpeg).unwrap();
//! println!("Estimated {} bytes", url.len() as f64 * 0.75);
//! ```

mod raster;
mod types;

pub use raster::{canvas_to_data_url, canvas_to_file, encode_raster};
pub use types::{effective_quality, is_allowed, EncodeError, ImageType, DEFAULT_QUALITY};
