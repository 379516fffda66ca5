use anyhow::{Context, Result};

use crate::storage::PREFERENCE_KEY;

/// Relative path of the translation bundle.
pub const DEFAULT_BUNDLE_PATH: &str = "content/site.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL the bundle path is resolved against (the page URL in a browser)
    pub site_url: String,

    /// Bundle path, relative to `site_url`
    pub bundle_path: String,

    /// Storage key of the persisted language
    pub storage_key: String,
}

impl Config {
    /// Config for a site, with the standard bundle path and storage key.
    pub fn for_site(site_url: impl Into<String>) -> Self {
        Self {
            site_url: site_url.into(),
            bundle_path: DEFAULT_BUNDLE_PATH.to_string(),
            storage_key: PREFERENCE_KEY.to_string(),
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self {
            site_url: std::env::var("SITE_URL").context("SITE_URL not set")?,
            bundle_path: std::env::var("I18N_BUNDLE_PATH")
                .unwrap_or_else(|_| DEFAULT_BUNDLE_PATH.to_string()),
            storage_key: std::env::var("I18N_STORAGE_KEY")
                .unwrap_or_else(|_| PREFERENCE_KEY.to_string()),
        })
    }
}
