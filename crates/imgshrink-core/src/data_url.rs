//! Data URL encoding and parsing.
//!
//! A data URL (`data:<mime>;base64,<payload>`) is the textual form every
//! encode step produces. Its length drives the size estimate used by the
//! quality search, so encoding always goes through this form.

use std::fmt;

use base64::{engine::general_purpose, Engine as _};

use crate::blob::Blob;
use crate::decode::DecodeError;
use crate::encode::ImageType;

/// A parsed data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    /// MIME type from the header.
    pub mime: String,
    /// Decoded payload bytes.
    pub payload: Vec<u8>,
}

impl DataUrl {
    pub fn new(mime: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            payload,
        }
    }

    /// Parse a `data:<mime>;base64,<payload>` string.
    ///
    /// The MIME type is the text between the first `:` and the following `;`
    /// of the header (everything before the first comma).
    ///
    /// # Errors
    ///
    /// `DecodeError::InvalidDataUrl` if the header has no `:mime;` section,
    /// `DecodeError::Base64` if the payload does not decode.
    pub fn parse(data_url: &str) -> Result<Self, DecodeError> {
        let (header, payload) = match data_url.split_once(',') {
            Some((header, payload)) => (header, payload),
            None => (data_url, ""),
        };

        let mime = parse_header_mime(header)
            .ok_or_else(|| DecodeError::InvalidDataUrl(truncate_for_error(header)))?;

        let payload = general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| DecodeError::Base64(e.to_string()))?;

        Ok(Self::new(mime, payload))
    }

    /// Read only the MIME type from a data URL header.
    pub fn parse_mime(data_url: &str) -> Result<String, DecodeError> {
        let header = data_url.split(',').next().unwrap_or_default();
        parse_header_mime(header)
            .map(str::to_string)
            .ok_or_else(|| DecodeError::InvalidDataUrl(truncate_for_error(header)))
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "data:{};base64,{}",
            self.mime,
            general_purpose::STANDARD.encode(&self.payload)
        )
    }
}

fn parse_header_mime(header: &str) -> Option<&str> {
    let start = header.find(':')? + 1;
    let len = header[start..].find(';')?;
    Some(&header[start..start + len])
}

fn truncate_for_error(header: &str) -> String {
    header.chars().take(64).collect()
}

/// Serialize a blob as a data URL, labelled with the blob's MIME type.
pub fn file_to_data_url(file: &Blob) -> String {
    DataUrl::new(file.mime(), file.bytes().to_vec()).to_string()
}

/// Convert a data URL back into a blob.
///
/// `mime` overrides the header's MIME type only when it is one of the
/// allowed image types; otherwise the header's MIME type is kept.
pub fn data_url_to_file(data_url: &str, mime: &str) -> Result<Blob, DecodeError> {
    let parsed = DataUrl::parse(data_url)?;
    let label = if ImageType::from_mime(mime).is_some() {
        mime.to_string()
    } else {
        parsed.mime
    };
    Ok(Blob::new(parsed.payload, label))
}
