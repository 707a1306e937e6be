//! EXIF orientation codes and the draw operations they map to.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Rotate 180 degrees + horizontal flip (a vertical flip).
    FlipVertical = 4,
    /// Rotate 90 CW + horizontal flip.
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Rotate 270 CW + horizontal flip.
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl Orientation {
    /// Interpret a coerced config value. Only the exact integers 1-8 are
    /// orientation codes; everything else is `None` (drawn as identity).
    pub fn from_code(code: f64) -> Option<Self> {
        if code.fract() != 0.0 {
            return None;
        }
        Some(match code as i64 {
            1 => Orientation::Normal,
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => return None,
        })
    }

    /// Returns true if this orientation swaps width and height dimensions.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90CW
                | Orientation::Transverse
                | Orientation::Rotate270CW
        )
    }

    /// Apply the draw operations for this code to an already-sized image.
    pub fn apply(self, img: &RgbaImage) -> RgbaImage {
        use image::imageops::{flip_horizontal, flip_vertical, rotate180, rotate270, rotate90};

        match self {
            Orientation::Normal => img.clone(),
            Orientation::FlipHorizontal => flip_horizontal(img),
            Orientation::Rotate180 => rotate180(img),
            Orientation::FlipVertical => flip_vertical(img),
            Orientation::Transpose => flip_horizontal(&rotate90(img)),
            Orientation::Rotate90CW => rotate90(img),
            Orientation::Transverse => flip_horizontal(&rotate270(img)),
            Orientation::Rotate270CW => rotate270(img),
        }
    }
}
