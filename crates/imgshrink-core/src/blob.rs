//! Binary image blob with a MIME label.

use crate::decode::sniff_mime;

const OCTET_STREAM: &str = "application/octet-stream";

/// Encoded image bytes plus the MIME type they are labelled with.
///
/// The label is not verified against the bytes: a compressed artifact may be
/// labelled with the source MIME while holding bytes of a different format
/// (see `compress::compress`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    bytes: Vec<u8>,
    mime: String,
}

impl Blob {
    /// Create a blob with an explicit MIME label.
    ///
    /// An empty label is replaced by the sniffed image MIME, or
    /// `application/octet-stream` when the bytes are not a known format.
    pub fn new(bytes: Vec<u8>, mime: impl Into<String>) -> Self {
        let mime = mime.into();
        let mime = if mime.trim().is_empty() {
            sniff_mime(&bytes).unwrap_or(OCTET_STREAM).to_string()
        } else {
            mime
        };
        Self { bytes, mime }
    }

    /// Create a blob labelled by sniffing its magic bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::new(bytes, String::new())
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}
