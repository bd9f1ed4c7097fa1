//! Crate error type.
//!
//! Nothing in the engines themselves fails: unknown parameter keys are
//! stored, out-of-range values are accepted. Errors come from the host
//! boundary (bad slugs, bad config) and the browser (missing window, canvas
//! context failures).

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use wasm_bindgen::JsValue;

/// Errors produced at the host boundary.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// No simulation answers to the requested page slug.
    #[error("unknown simulation kind: {0}")]
    UnknownKind(String),

    /// A surface configuration document could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// A Canvas2D call failed or the 2D context is unavailable.
    #[error("render failed: {0}")]
    Render(String),

    /// A value could not be serialized for the host page.
    #[error("serialize failed: {0}")]
    Serialize(String),

    /// There is no `window` (not running in a browser main thread).
    #[error("no browser window available")]
    NoWindow,
}

impl SimError {
    /// Stable machine-readable code for the host page.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownKind(_) => "E_UNKNOWN_KIND",
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::Render(_) => "E_RENDER",
            Self::Serialize(_) => "E_SERIALIZE",
            Self::NoWindow => "E_NO_WINDOW",
        }
    }

    /// Wrap a `JsValue` thrown by a browser API.
    #[must_use]
    pub fn render(err: &JsValue) -> Self {
        Self::Render(err.as_string().unwrap_or_else(|| format!("{err:?}")))
    }
}

impl From<SimError> for JsValue {
    fn from(err: SimError) -> Self {
        let error = js_sys::Error::new(&err.to_string());
        error.set_name(err.error_code());
        error.into()
    }
}
