//! Drawing a decoded image onto a resized, re-oriented canvas.
//!
//! # Sizing
//!
//! A usable `scale` (set, non-zero, not NaN) wins: inside `(0, 10)` it multiplies the
//! source dimensions, outside that range it is treated as 1. Without a scale,
//! an explicit `width`/`height` is used, a missing one is derived from the
//! other through the source aspect ratio, and the source size fills in the
//! rest. Orientations 5-8 then swap the canvas width and height.

use log::{debug, warn};

use super::orientation::Orientation;
use super::resize::{resize_exact, to_pixels};
use super::TransformError;
use crate::config::TransformConfig;
use crate::decode::RasterSurface;

/// Upper bound (exclusive) of the accepted scale range.
pub const MAX_SCALE: f64 = 10.0;

/// Maximum canvas width or height.
pub const MAX_DIMENSION: u32 = 32768;

/// Maximum canvas pixel count. 100 megapixels is 400MB of RGBA.
pub const MAX_PIXELS: u64 = 100_000_000;

/// The resolved geometry of one `image_to_canvas` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasLayout {
    /// Size the source is resampled to before orientation is applied.
    pub draw_width: u32,
    pub draw_height: u32,
    /// Size of the output surface.
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub orientation: Option<Orientation>,
}

/// Resolve the canvas geometry for a source of the given size.
pub fn canvas_layout(src_width: u32, src_height: u32, config: &TransformConfig) -> CanvasLayout {
    let (src_w, src_h) = (src_width as f64, src_height as f64);
    let positive = |value: Option<f64>| value.filter(|v| v.is_finite() && *v > 0.0);

    let (width, height) = match config.scale.filter(|s| *s != 0.0 && !s.is_nan()) {
        Some(scale) => {
            let scale = if scale > 0.0 && scale < MAX_SCALE {
                scale
            } else {
                1.0
            };
            (src_w * scale, src_h * scale)
        }
        None => {
            let explicit_w = positive(config.width);
            let explicit_h = positive(config.height);
            let width = explicit_w
                .or_else(|| explicit_h.map(|h| h * src_w / src_h))
                .unwrap_or(src_w);
            let height = explicit_h
                .or_else(|| explicit_w.map(|w| w * src_h / src_w))
                .unwrap_or(src_h);
            (width, height)
        }
    };

    let (draw_width, draw_height) = (to_pixels(width), to_pixels(height));
    let orientation = config.orientation.and_then(Orientation::from_code);

    let (canvas_width, canvas_height) = match orientation {
        Some(o) if o.swaps_dimensions() => (draw_height, draw_width),
        _ => (draw_width, draw_height),
    };

    CanvasLayout {
        draw_width,
        draw_height,
        canvas_width,
        canvas_height,
        orientation,
    }
}

impl CanvasLayout {
    /// Reject canvases larger than [`MAX_DIMENSION`] or [`MAX_PIXELS`].
    pub fn check_size(&self) -> Result<(), TransformError> {
        let (width, height) = (self.canvas_width, self.canvas_height);
        if width > MAX_DIMENSION
            || height > MAX_DIMENSION
            || u64::from(width) * u64::from(height) > MAX_PIXELS
        {
            return Err(TransformError::CanvasTooLarge { width, height });
        }
        Ok(())
    }
}

/// Draw `image` onto a new canvas sized and oriented per `config`.
///
/// The input is never mutated. If the source pixels cannot be read (empty
/// surface or a buffer that does not match its dimensions) a blank canvas of
/// the computed size is returned instead of an error.
///
/// # Errors
///
/// `TransformError::CanvasTooLarge` if the computed canvas exceeds
/// [`MAX_DIMENSION`] on either side or [`MAX_PIXELS`] in total. Nothing is
/// allocated in that case.
pub fn image_to_canvas(
    image: &RasterSurface,
    config: &TransformConfig,
) -> Result<RasterSurface, TransformError> {
    let layout = canvas_layout(image.width, image.height, config);
    debug!(
        "canvas {}x{} -> {}x{} (orientation {:?})",
        image.width, image.height, layout.canvas_width, layout.canvas_height, layout.orientation
    );
    layout.check_size()?;

    let source = match image.to_rgba_image() {
        Some(source) if !image.is_empty() => source,
        _ => {
            warn!(
                "source surface {}x{} has unusable pixel data; returning a blank canvas",
                image.width, image.height
            );
            return Ok(RasterSurface::blank(layout.canvas_width, layout.canvas_height));
        }
    };

    let sized = resize_exact(&source, layout.draw_width, layout.draw_height);
    let drawn = match layout.orientation {
        Some(orientation) => orientation.apply(&sized),
        None => sized,
    };

    Ok(RasterSurface::from_rgba_image(drawn))
}
