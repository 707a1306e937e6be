//! Canvas transform: resize and re-orient a decoded image.
//!
//! This is the step between decoding the source and encoding candidates.
//! It fails only when the requested canvas is too large to allocate; see
//! [`image_to_canvas`] for the degradation path on unreadable sources.
//!
//! # Coordinate System
//!
//! - Orientation codes follow EXIF (1-8); 5-8 swap width and height
//! - The source is resampled to the computed size first, then re-oriented
//! - Origin is top-left corner

mod canvas;
mod orientation;
mod resize;

use thiserror::Error;

pub use canvas::{
    canvas_layout, image_to_canvas, CanvasLayout, MAX_DIMENSION, MAX_PIXELS, MAX_SCALE,
};
pub use orientation::Orientation;

/// Errors that can occur while drawing onto a canvas.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The computed canvas exceeds the dimension or pixel-count limit.
    #[error("Canvas {width}x{height} exceeds the size limit")]
    CanvasTooLarge { width: u32, height: u32 },
}
