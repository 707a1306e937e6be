//! Reading configuration arguments passed from JavaScript.
//!
//! The compression entry points take either an options object, a bare
//! number (quality for `compress`, target KB for `compress_accurately`),
//! a numeric string, or nothing at all.

use imgshrink_core::parse_number;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

/// Read an options object. `undefined` and `null` give the defaults.
pub(crate) fn read_object<T>(value: &JsValue) -> Result<T, JsValue>
where
    T: DeserializeOwned + Default,
{
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value.clone())
        .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))
}

/// Read an options object, or a number standing in for its primary field.
pub(crate) fn read_config<T>(value: &JsValue) -> Result<T, JsValue>
where
    T: DeserializeOwned + Default + From<f64>,
{
    if let Some(number) = value.as_f64() {
        return Ok(T::from(number));
    }
    if let Some(flag) = value.as_bool() {
        return Ok(config_from_bool(flag));
    }
    if let Some(text) = value.as_string() {
        return Ok(config_from_text(&text));
    }
    read_object(value)
}

/// A boolean config is coerced like `Number()`: 1 or 0.
pub(crate) fn config_from_bool<T>(flag: bool) -> T
where
    T: From<f64>,
{
    T::from(if flag { 1.0 } else { 0.0 })
}

/// A string config is coerced like `Number()`; non-numeric text is unset.
pub(crate) fn config_from_text<T>(text: &str) -> T
where
    T: Default + From<f64>,
{
    parse_number(text).map(T::from).unwrap_or_default()
}
