//! Imgshrink Core - Image compression library
//!
//! This crate provides the core compression functionality for Imgshrink:
//! re-encoding an image at a fixed quality, searching the quality range for
//! a target file size, and the conversions between files, data URLs and
//! decoded rasters that both paths are built from.
//!
//! Everything here is platform independent; the browser bindings live in
//! `imgshrink-wasm`.

pub mod blob;
pub mod compress;
pub mod config;
pub mod data_url;
pub mod decode;
pub mod encode;
pub mod transform;

pub use blob::Blob;
pub use compress::{compress, compress_accurately, CompressError};
pub use config::{parse_number, CompressAccuratelyConfig, CompressConfig, TransformConfig};
pub use data_url::{data_url_to_file, file_to_data_url, DataUrl};
pub use decode::{data_url_to_image, read_orientation, DecodeError, RasterSurface};
pub use encode::{canvas_to_data_url, canvas_to_file, is_allowed, EncodeError, ImageType};
pub use transform::{image_to_canvas, Orientation, TransformError};
