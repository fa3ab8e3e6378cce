//! Page Configuration
//!
//! Optional `window.triageConfig` object; every field has a default.

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::render::RowTemplate;

/// Page global read for configuration
pub const CONFIG_GLOBAL: &str = "triageConfig";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// Base URL for changeset and user links
    pub osm_url: String,
    /// Shown when a changeset has no comment
    pub no_comment_placeholder: String,
    /// Page global holding the changesets to triage
    pub changesets_global: String,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            osm_url: "https://www.openstreetmap.org".to_string(),
            no_comment_placeholder: "(no comment)".to_string(),
            changesets_global: "changesets".to_string(),
        }
    }
}

impl TriageConfig {
    /// Read from the page, falling back to defaults
    pub fn from_window() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let value = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)).unwrap_or(JsValue::UNDEFINED);
        if value.is_undefined() || value.is_null() {
            return Self::default();
        }
        match serde_wasm_bindgen::from_value(value) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring malformed {CONFIG_GLOBAL}");
                Self::default()
            }
        }
    }

    pub fn row_template(&self) -> RowTemplate {
        RowTemplate::new(self.osm_url.clone())
    }
}
