//! Client-side translation for static sites.
//!
//! Loads `content/site.json`, picks the visitor's language (stored preference,
//! then the page's declared language, then the bundle default), and rewrites
//! every element marked with `data-i18n-key`. The chosen language is stored
//! under `site.lang` so it sticks across visits.
//!
//! The pipeline is written against two small traits, [`dom::Document`] and
//! [`storage::PreferenceStore`]. In the browser (wasm32) they are backed by
//! the DOM and `localStorage`; elsewhere [`dom::MemoryDocument`] and
//! [`storage::MemoryStore`] stand in.

pub mod applier;
pub mod config;
pub mod dom;
pub mod error;
pub mod i18n;
pub mod loader;
pub mod storage;
pub mod translator;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use applier::{apply, ApplyReport};
pub use config::Config;
pub use error::{BundleError, StorageError};
pub use loader::BundleLoader;
pub use translator::Translator;
