use crate::config::Config;
use crate::error::BundleError;
use crate::i18n::TranslationBundle;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use tracing::{debug, info};
use url::Url;

/// Fetches the translation bundle over HTTP.
///
/// One request per call, never retried, never served from a cache.
#[derive(Debug, Clone)]
pub struct BundleLoader {
    client: reqwest::Client,
    url: Url,
}

impl BundleLoader {
    /// Build a loader for `config.bundle_path` resolved against `config.site_url`.
    pub fn new(config: &Config) -> Result<Self, BundleError> {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &Config) -> Result<Self, BundleError> {
        let url = bundle_url(&config.site_url, &config.bundle_path)?;
        Ok(Self { client, url })
    }

    /// Resolved bundle URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetch and parse the bundle.
    pub async fn load(&self) -> Result<TranslationBundle, BundleError> {
        info!("Fetching translation bundle from {}", self.url);

        let response = self
            .client
            .get(self.url.clone())
            .header(CACHE_CONTROL, "no-cache, no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BundleError::Status {
                status: response.status(),
                url: self.url.to_string(),
            });
        }

        let body = response.text().await?;
        debug!("Received {} bytes of bundle JSON", body.len());

        let bundle = TranslationBundle::from_json(&body)?;
        info!(
            "Loaded translation bundle: {} languages, {} keys",
            bundle.languages().len(),
            bundle.keys().len()
        );
        Ok(bundle)
    }
}

/// Resolve `path` against `site_url` the way a browser resolves a relative link.
pub fn bundle_url(site_url: &str, path: &str) -> Result<Url, BundleError> {
    Url::parse(site_url)
        .and_then(|base| base.join(path))
        .map_err(|source| BundleError::InvalidUrl {
            url: format!("{} + {}", site_url, path),
            source,
        })
}
