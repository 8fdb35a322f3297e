//! Error types for page boot and DOM binding.
//!
//! ERROR HANDLING
//! ==============
//! Only boot can fail: a missing required element halts initialization of
//! the remaining behaviors. Optional elements never produce an error, their
//! feature no-ops instead. Form submission failures are user-facing outcomes,
//! not errors, and live in `contact`.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("required element missing: {0}")]
    MissingElement(&'static str),
    #[error("javascript error: {0}")]
    Js(String),
    #[error("page behaviors already booted")]
    AlreadyBooted,
    #[error("invalid site config: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<JsValue> for SiteError {
    fn from(value: JsValue) -> Self {
        Self::Js(describe_js(&value))
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;

/// Best-effort human-readable rendering of a thrown JS value.
pub fn describe_js(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}
