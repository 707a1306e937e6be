//! Saving a file to the user's machine through a temporary object URL.

use crate::types::JsImageFile;
use js_sys::{Array, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{BlobPropertyBag, HtmlAnchorElement, Url};

/// Trigger a browser download of `file`.
///
/// When `name` is missing or empty, the current timestamp in base 36 is
/// used as the file name.
///
/// # Errors
///
/// Returns an error outside a browser document, or if the DOM rejects any
/// of the steps.
#[wasm_bindgen]
pub fn download_file(file: &JsImageFile, name: Option<String>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;

    let blob = file.as_blob();
    let parts = Array::of1(&Uint8Array::from(blob.bytes()));
    let options = BlobPropertyBag::new();
    options.set_type(blob.mime());
    let js_blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&js_blob)?;

    let link: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    link.set_href(&url);
    link.set_download(&file_name(name, js_sys::Date::now()));

    body.append_child(&link)?;
    link.click();
    link.remove();
    Url::revoke_object_url(&url)?;

    log::debug!("download_file: {} bytes as {}", blob.size(), blob.mime());
    Ok(())
}

fn file_name(name: Option<String>, now_ms: f64) -> String {
    match name {
        Some(name) if !name.is_empty() => name,
        _ => to_base36(now_ms as u64),
    }
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}
