//! Typed configuration for the transform and compression entry points.
//!
//! Every numeric field is coerced once, at deserialization time, with the
//! same rules as JavaScript's `Number()`: numbers pass through, numeric
//! strings are parsed, booleans become 0/1. Anything that does not coerce
//! to a number (including NaN and `null`) is stored as `None`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::encode::ImageType;

/// Default accuracy for `compress_accurately`.
pub const DEFAULT_ACCURACY: f64 = 0.95;

/// Accepted accuracy range (inclusive).
pub const ACCURACY_RANGE: std::ops::RangeInclusive<f64> = 0.8..=0.99;

/// Sizing and orientation applied when drawing the source onto a canvas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Output width in pixels (before orientation swap).
    #[serde(deserialize_with = "coerce_number")]
    pub width: Option<f64>,
    /// Output height in pixels (before orientation swap).
    #[serde(deserialize_with = "coerce_number")]
    pub height: Option<f64>,
    /// Uniform scale relative to the source, valid in `(0, 10)`.
    /// Overrides `width` and `height` when set.
    #[serde(deserialize_with = "coerce_number")]
    pub scale: Option<f64>,
    /// EXIF orientation code, 1-8.
    #[serde(deserialize_with = "coerce_number")]
    pub orientation: Option<f64>,
}

/// Configuration for single-pass compression at a fixed quality.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressConfig {
    #[serde(flatten)]
    pub transform: TransformConfig,
    /// Encoder quality. Not clamped; the encoder substitutes its default
    /// for values outside `[0, 1]`.
    #[serde(deserialize_with = "coerce_number")]
    pub quality: Option<f64>,
    /// Requested output MIME type. Required by `compress`.
    #[serde(rename = "type")]
    pub mime_type: Option<String>,
}

impl From<f64> for CompressConfig {
    /// A bare number is the quality.
    fn from(quality: f64) -> Self {
        Self {
            quality: Some(quality).filter(|q| !q.is_nan()),
            ..Self::default()
        }
    }
}

impl CompressConfig {
    pub fn with_type(mut self, image_type: ImageType) -> Self {
        self.mime_type = Some(image_type.mime().to_string());
        self
    }
}

/// Configuration for compression to a target size.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressAccuratelyConfig {
    #[serde(flatten)]
    pub transform: TransformConfig,
    /// Target size in KB (1 KB = 1024 bytes).
    #[serde(deserialize_with = "coerce_number")]
    pub size: Option<f64>,
    /// Tolerance, valid in `[0.8, 0.99]`.
    #[serde(deserialize_with = "coerce_number")]
    pub accuracy: Option<f64>,
    /// Requested output MIME type. Optional.
    #[serde(rename = "type")]
    pub mime_type: Option<String>,
}

impl From<f64> for CompressAccuratelyConfig {
    /// A bare number is the target size in KB.
    fn from(size: f64) -> Self {
        Self {
            size: Some(size).filter(|s| !s.is_nan()),
            ..Self::default()
        }
    }
}

impl CompressAccuratelyConfig {
    /// The accuracy to use: the configured value if it is inside
    /// [`ACCURACY_RANGE`], otherwise [`DEFAULT_ACCURACY`].
    pub fn effective_accuracy(&self) -> f64 {
        self.accuracy
            .filter(|a| ACCURACY_RANGE.contains(a))
            .unwrap_or(DEFAULT_ACCURACY)
    }

    pub fn with_type(mut self, image_type: ImageType) -> Self {
        self.mime_type = Some(image_type.mime().to_string());
        self
    }
}

/// Parse a string the way `Number()` does.
///
/// Blank strings are 0; anything unparsable is `None`.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    match trimmed {
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        // Rust accepts these spellings, JS does not
        _ if trimmed.eq_ignore_ascii_case("nan")
            || trimmed.to_ascii_lowercase().contains("inf") =>
        {
            None
        }
        _ => trimmed.parse::<f64>().ok(),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Number(f64),
    Bool(bool),
    Text(String),
}

fn coerce_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<LooseNumber>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|value| match value {
            LooseNumber::Number(n) => Some(n),
            LooseNumber::Bool(b) => Some(if b { 1.0 } else { 0.0 }),
            LooseNumber::Text(s) => parse_number(&s),
        })
        .filter(|n| !n.is_nan()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("0.8"), Some(0.8));
        assert_eq!(parse_number("  100 "), Some(100.0));
        assert_eq!(parse_number(""), Some(0.0));
        assert_eq!(parse_number("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_compress_config_from_json() {
        let config: CompressConfig = serde_json::from_str(
            r#"{"quality": "0.8", "type": "image/png", "width": 300, "orientation": 6}"#,
        )
        .unwrap();

        assert_eq!(config.quality, Some(0.8));
        assert_eq!(config.mime_type.as_deref(), Some("image/png"));
        assert_eq!(config.transform.width, Some(300.0));
        assert_eq!(config.transform.height, None);
        assert_eq!(config.transform.orientation, Some(6.0));
    }

    #[test]
    fn test_non_numeric_fields_are_unset() {
        let config: CompressAccuratelyConfig =
            serde_json::from_str(r#"{"size": "big", "accuracy": null, "scale": true}"#).unwrap();

        assert_eq!(config.size, None);
        assert_eq!(config.accuracy, None);
        assert_eq!(config.transform.scale, Some(1.0));
    }

    #[test]
    fn test_empty_object_is_default() {
        let config: CompressAccuratelyConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CompressAccuratelyConfig::default());
    }

    #[test]
    fn test_bare_numbers() {
        assert_eq!(CompressConfig::from(0.6).quality, Some(0.6));
        assert_eq!(CompressConfig::from(f64::NAN).quality, None);
        assert_eq!(CompressAccuratelyConfig::from(100.0).size, Some(100.0));
    }

    #[test]
    fn test_effective_accuracy() {
        let mut config = CompressAccuratelyConfig::default();
        assert_eq!(config.effective_accuracy(), DEFAULT_ACCURACY);

        config.accuracy = Some(0.9);
        assert_eq!(config.effective_accuracy(), 0.9);

        config.accuracy = Some(0.8);
        assert_eq!(config.effective_accuracy(), 0.8);

        config.accuracy = Some(0.99);
        assert_eq!(config.effective_accuracy(), 0.99);

        config.accuracy = Some(0.5);
        assert_eq!(config.effective_accuracy(), DEFAULT_ACCURACY);

        config.accuracy = Some(0.0);
        assert_eq!(config.effective_accuracy(), DEFAULT_ACCURACY);
    }

    #[test]
    fn test_with_type() {
        let config = CompressConfig::from(0.5).with_type(ImageType::Gif);
        assert_eq!(config.mime_type.as_deref(), Some("image/gif"));
    }
}
