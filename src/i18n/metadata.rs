//! Bundle metadata: default language, supported languages and display labels.
//!
//! The metadata lives inside the bundle under the reserved `_meta` key. Every
//! field is optional and falls back to a built-in default on its own, so a
//! bundle with a broken `labels` object still keeps its `supported` list.

use serde_json::Value;
use std::collections::HashMap;

/// Reserved top-level bundle key holding [`Metadata`].
pub const META_KEY: &str = "_meta";

/// Built-in default language.
pub const DEFAULT_LANG: &str = "hy";

/// Built-in supported languages, in cycle order.
pub const DEFAULT_SUPPORTED: [&str; 3] = ["hy", "en", "ru"];

/// Built-in display labels.
pub const DEFAULT_LABELS: [(&str, &str); 3] = [("hy", "Հայ"), ("en", "EN"), ("ru", "РУ")];

/// Language metadata for a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// Language used when nothing else matches, and second step of the fallback chain
    pub default_lang: String,

    /// Supported language codes in cycle order
    pub supported: Vec<String>,

    /// Display label per language code
    pub labels: HashMap<String, String>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            default_lang: DEFAULT_LANG.to_string(),
            supported: DEFAULT_SUPPORTED.iter().map(|s| s.to_string()).collect(),
            labels: default_labels(),
        }
    }
}

impl Metadata {
    /// Build metadata from the raw `_meta` value, if any.
    ///
    /// Each field is checked independently; a missing or wrongly typed field
    /// keeps its default.
    pub fn from_value(meta: Option<&Value>) -> Self {
        let mut metadata = Self::default();
        let Some(Value::Object(meta)) = meta else {
            return metadata;
        };

        if let Some(Value::String(lang)) = meta.get("defaultLang") {
            metadata.default_lang = lang.clone();
        }

        if let Some(supported) = meta.get("supported").and_then(parse_supported) {
            metadata.supported = supported;
        }

        if let Some(Value::Object(labels)) = meta.get("labels") {
            metadata.labels = labels
                .iter()
                .filter_map(|(code, label)| label.as_str().map(|l| (code.clone(), l.to_string())))
                .collect();
        }

        metadata
    }

    /// Check whether a language code is in the supported list.
    pub fn is_supported(&self, code: &str) -> bool {
        self.supported.iter().any(|lang| lang == code)
    }

    /// Display label for a language, falling back to the code itself.
    ///
    /// An empty label counts as "no label".
    pub fn label_for<'a>(&'a self, code: &'a str) -> &'a str {
        match self.labels.get(code) {
            Some(label) if !label.is_empty() => label.as_str(),
            _ => code,
        }
    }
}

/// `supported` must be an array made only of strings, otherwise it is malformed.
fn parse_supported(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|lang| lang.as_str().map(str::to_string))
        .collect()
}

fn default_labels() -> HashMap<String, String> {
    DEFAULT_LABELS
        .iter()
        .map(|(code, label)| (code.to_string(), label.to_string()))
        .collect()
}
