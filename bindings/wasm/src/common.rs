use anyhow::{anyhow, Result};
use js_sys::Uint8Array;
use serde::Serialize;
use wasm_bindgen::JsValue;

pub(crate) fn js_err(e: impl ToString) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Accept either a string or a Uint8Array-like value as raw file bytes.
pub(crate) fn js_bytes(value: &JsValue) -> Result<Vec<u8>> {
    if let Some(text) = value.as_string() {
        return Ok(text.into_bytes());
    }
    if value.is_object() {
        let array = Uint8Array::new(value);
        let mut buf = vec![0u8; array.length() as usize];
        array.copy_to(&mut buf[..]);
        return Ok(buf);
    }
    Err(anyhow!("expected a string or Uint8Array, got {value:?}"))
}

/// Serialize to a JSON string and parse it on the JS side, which is cheaper
/// than building large nested objects through the bridge.
pub(crate) fn to_js_json(value: &impl Serialize) -> Result<JsValue, JsValue> {
    let text = serde_json::to_string(value)
        .map_err(|e| js_err(format!("Failed to serialize commands: {e}")))?;
    js_sys::JSON::parse(&text)
}
