//! Raster decoding from encoded bytes or data URLs.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::ImageReader;

use super::{DecodeError, RasterSurface};
use crate::data_url::DataUrl;

/// Decode PNG, JPEG or GIF bytes into a `RasterSurface`.
///
/// EXIF orientation is NOT applied; pass it through
/// `TransformConfig::orientation` instead so it is applied exactly once.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be guessed and
/// `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_raster(bytes: &[u8]) -> Result<RasterSurface, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    Ok(RasterSurface::from_rgba_image(img.into_rgba8()))
}

/// Decode the image embedded in a data URL.
pub fn data_url_to_image(data_url: &str) -> Result<RasterSurface, DecodeError> {
    let parsed = DataUrl::parse(data_url)?;
    decode_raster(&parsed.payload)
}

/// Guess the MIME type of encoded image bytes from their magic number.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes).ok().map(|f| f.to_mime_type())
}

/// Read the EXIF orientation code (1-8) from encoded image bytes.
///
/// Returns `None` when there is no EXIF block, no orientation tag, or the
/// value is out of range.
pub fn read_orientation(bytes: &[u8]) -> Option<u8> {
    let mut cursor = Cursor::new(bytes);
    let exif = Reader::new().read_from_container(&mut cursor).ok()?;
    let field = exif.get_field(Tag::Orientation, In::PRIMARY)?;
    let value = field.value.get_uint(0)?;

    (1..=8).contains(&value).then_some(value as u8)
}

#[cfg(test)]
pub(crate) mod fixtures {
    // Minimal valid JPEG bytes (1x1 pixel, no EXIF)
    pub const MINIMAL_JPEG: &[u8] = &[
        0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01, 0x01, 0x00, 0x00,
        0x01, 0x00, 0x01, 0x00, 0x00, 0xFF, 0xDB, 0x00, 0x43, 0x00, 0x08, 0x06, 0x06, 0x07, 0x06,
        0x05, 0x08, 0x07, 0x07, 0x07, 0x09, 0x09, 0x08, 0x0A, 0x0C, 0x14, 0x0D, 0x0C, 0x0B, 0x0B,
        0x0C, 0x19, 0x12, 0x13, 0x0F, 0x14, 0x1D, 0x1A, 0x1F, 0x1E, 0x1D, 0x1A, 0x1C, 0x1C, 0x20,
        0x24, 0x2E, 0x27, 0x20, 0x22, 0x2C, 0x23, 0x1C, 0x1C, 0x28, 0x37, 0x29, 0x2C, 0x30, 0x31,
        0x34, 0x34, 0x34, 0x1F, 0x27, 0x39, 0x3D, 0x38, 0x32, 0x3C, 0x2E, 0x33, 0x34, 0x32, 0xFF,
        0xC0, 0x00, 0x0B, 0x08, 0x00, 0x01, 0x00, 0x01, 0x01, 0x01, 0x11, 0x00, 0xFF, 0xC4, 0x00,
        0x1F, 0x00, 0x00, 0x01, 0x05, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B,
        0xFF, 0xC4, 0x00, 0xB5, 0x10, 0x00, 0x02, 0x01, 0x03, 0x03, 0x02, 0x04, 0x03, 0x05, 0x05,
        0x04, 0x04, 0x00, 0x00, 0x01, 0x7D, 0x01, 0x02, 0x03, 0x00, 0x04, 0x11, 0x05, 0x12, 0x21,
        0x31, 0x41, 0x06, 0x13, 0x51, 0x61, 0x07, 0x22, 0x71, 0x14, 0x32, 0x81, 0x91, 0xA1, 0x08,
        0x23, 0x42, 0xB1, 0xC1, 0x15, 0x52, 0xD1, 0xF0, 0x24, 0x33, 0x62, 0x72, 0x82, 0x09, 0x0A,
        0x16, 0x17, 0x18, 0x19, 0x1A, 0x25, 0x26, 0x27, 0x28, 0x29, 0x2A, 0x34, 0x35, 0x36, 0x37,
        0x38, 0x39, 0x3A, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48, 0x49, 0x4A, 0x53, 0x54, 0x55, 0x56,
        0x57, 0x58, 0x59, 0x5A, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, 0x69, 0x6A, 0x73, 0x74, 0x75,
        0x76, 0x77, 0x78, 0x79, 0x7A, 0x83, 0x84, 0x85, 0x86, 0x87, 0x88, 0x89, 0x8A, 0x92, 0x93,
        0x94, 0x95, 0x96, 0x97, 0x98, 0x99, 0x9A, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6, 0xA7, 0xA8, 0xA9,
        0xAA, 0xB2, 0xB3, 0xB4, 0xB5, 0xB6, 0xB7, 0xB8, 0xB9, 0xBA, 0xC2, 0xC3, 0xC4, 0xC5, 0xC6,
        0xC7, 0xC8, 0xC9, 0xCA, 0xD2, 0xD3, 0xD4, 0xD5, 0xD6, 0xD7, 0xD8, 0xD9, 0xDA, 0xE1, 0xE2,
        0xE3, 0xE4, 0xE5, 0xE6, 0xE7, 0xE8, 0xE9, 0xEA, 0xF1, 0xF2, 0xF3, 0xF4, 0xF5, 0xF6, 0xF7,
        0xF8, 0xF9, 0xFA, 0xFF, 0xDA, 0x00, 0x08, 0x01, 0x01, 0x00, 0x00, 0x3F, 0x00, 0xFB, 0xD5,
        0xDB, 0x20, 0xA8, 0xF1, 0x7E, 0xFF, 0xD9,
    ];

    /// Noisy RGB image, PNG-encoded. Noise keeps lossy encodes from
    /// collapsing to a few hundred bytes.
    pub fn noisy_png(width: u32, height: u32) -> Vec<u8> {
        let mut seed: u32 = 0x2545_F491;
        let img = image::RgbImage::from_fn(width, height, |x, y| {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let noise = (seed & 0x3F) as u8;
            image::Rgb([
                ((x * 255 / width.max(1)) as u8).wrapping_add(noise),
                ((y * 255 / height.max(1)) as u8).wrapping_add(noise / 2),
                noise.wrapping_mul(3),
            ])
        });
        let mut out = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{noisy_png, MINIMAL_JPEG};
    use super::*;

    #[test]
    fn test_decode_valid_jpeg() {
        let surface = decode_raster(MINIMAL_JPEG).unwrap();
        assert_eq!(surface.width, 1);
        assert_eq!(surface.height, 1);
        assert_eq!(surface.pixels.len(), 4);
    }

    #[test]
    fn test_decode_png() {
        let surface = decode_raster(&noisy_png(30, 20)).unwrap();
        assert_eq!((surface.width, surface.height), (30, 20));
        // Opaque source stays opaque
        assert!(surface.pixels.chunks(4).all(|p| p[3] == 255));
    }

    #[test]
    fn test_decode_invalid_bytes() {
        let result = decode_raster(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_raster(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_jpeg() {
        let result = decode_raster(&MINIMAL_JPEG[0..20]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_data_url_to_image() {
        let url = DataUrl::new("image/png", noisy_png(8, 4)).to_string();
        let surface = data_url_to_image(&url).unwrap();
        assert_eq!((surface.width, surface.height), (8, 4));
    }

    #[test]
    fn test_data_url_to_image_rejects_bad_header() {
        let result = data_url_to_image("not a data url");
        assert!(matches!(result, Err(DecodeError::InvalidDataUrl(_))));
    }

    #[test]
    fn test_sniff_mime() {
        assert_eq!(sniff_mime(MINIMAL_JPEG), Some("image/jpeg"));
        assert_eq!(sniff_mime(&noisy_png(2, 2)), Some("image/png"));
        assert_eq!(sniff_mime(b"GIF89a......"), Some("image/gif"));
        assert_eq!(sniff_mime(&[0x00, 0x01]), None);
    }

    #[test]
    fn test_orientation_absent_without_exif() {
        assert_eq!(read_orientation(MINIMAL_JPEG), None);
        assert_eq!(read_orientation(&[0x00, 0x01, 0x02]), None);
    }
}
