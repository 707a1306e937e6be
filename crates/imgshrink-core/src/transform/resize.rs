//! Resampling a surface to exact dimensions.

use image::imageops::FilterType;
use image::RgbaImage;

/// Resize an image to exact dimensions with bilinear filtering.
///
/// Dimensions are assumed non-zero. Matching dimensions return a copy
/// without resampling.
pub(crate) fn resize_exact(img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if img.dimensions() == (width, height) {
        return img.clone();
    }
    image::imageops::resize(img, width, height, FilterType::Triangle)
}

/// Truncate a computed canvas dimension to whole pixels, at least 1.
pub(crate) fn to_pixels(value: f64) -> u32 {
    if !value.is_finite() || value < 1.0 {
        return 1;
    }
    value.min(u32::MAX as f64) as u32
}
