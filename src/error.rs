//! Error types for the translation pipeline.
//!
//! Only bundle loading can fail in a way the caller has to see. Storage errors
//! exist so implementations can report them, but every call site inside the
//! crate degrades them to "no value".

use thiserror::Error;

/// Errors that abort initialization (the page stays untranslated).
#[derive(Error, Debug)]
pub enum BundleError {
    /// The bundle URL could not be built from the site URL and bundle path
    #[error("Invalid bundle URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The request never produced a response
    #[error("Failed to fetch translation bundle: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Translation bundle request failed ({status}): {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// The body was not valid JSON
    #[error("Failed to parse translation bundle: {0}")]
    Parse(#[from] serde_json::Error),

    /// The body was valid JSON but not an object
    #[error("Translation bundle must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Errors reported by a [`PreferenceStore`](crate::storage::PreferenceStore).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Durable storage is disabled or not present in this environment
    #[error("Storage is unavailable")]
    Unavailable,

    /// The backend rejected the operation (quota, security policy, ...)
    #[error("Storage operation failed: {0}")]
    Backend(String),
}
