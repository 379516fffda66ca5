//! The translator: loads the bundle, picks the language, applies it, and
//! cycles languages on demand.

use crate::applier::{apply, ApplyReport};
use crate::config::Config;
use crate::dom::Document;
use crate::error::BundleError;
use crate::i18n::{resolve_startup_language, LanguageSource, Session, TranslationBundle};
use crate::loader::BundleLoader;
use crate::storage::{read_preference, PreferenceStore};
use tracing::{debug, info};

/// Owns the session, the page and the preference store for one page load.
#[derive(Debug)]
pub struct Translator<D: Document, S: PreferenceStore> {
    session: Session,
    document: D,
    store: S,
    storage_key: String,
    startup_source: LanguageSource,
}

impl<D: Document, S: PreferenceStore> Translator<D, S> {
    /// Fetch the bundle and start translating.
    ///
    /// On error nothing has been written to `document`; the page keeps its
    /// authored content.
    pub async fn init(config: &Config, document: D, store: S) -> Result<Self, BundleError> {
        let loader = BundleLoader::new(config)?;
        let bundle = loader.load().await?;
        Ok(Self::start(bundle, config, document, store))
    }

    /// Start translating with an already-loaded bundle.
    ///
    /// Picks the startup language (stored preference, then the root element's
    /// `data-lang`/`lang`, then the bundle default) and applies it once.
    pub fn start(bundle: TranslationBundle, config: &Config, document: D, store: S) -> Self {
        let persisted = read_preference(&store, &config.storage_key);
        let declared = document_language(&document);

        let startup = resolve_startup_language(
            bundle.metadata(),
            persisted.as_deref(),
            declared.as_deref(),
        );
        info!("Starting with language '{}' ({})", startup.code, startup.source);

        let mut translator = Self {
            session: Session::new(bundle, startup.code),
            document,
            store,
            storage_key: config.storage_key.clone(),
            startup_source: startup.source,
        };
        translator.apply();
        translator
    }

    /// Re-render the page for the current language.
    pub fn apply(&mut self) -> ApplyReport {
        apply(
            &self.session,
            &mut self.document,
            &mut self.store,
            &self.storage_key,
        )
    }

    /// Switch to the next supported language and re-render.
    ///
    /// Does nothing and returns `None` when the bundle supports no languages.
    pub fn cycle(&mut self) -> Option<ApplyReport> {
        if self.session.cycle().is_none() {
            debug!("No supported languages, ignoring language switch");
            return None;
        }
        Some(self.apply())
    }

    /// Resolve a key in the current language.
    pub fn resolve(&self, key: &str) -> String {
        self.session.resolve(key)
    }

    pub fn active_language(&self) -> &str {
        self.session.active_language()
    }

    /// Which candidate picked the startup language.
    pub fn startup_source(&self) -> LanguageSource {
        self.startup_source
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give back the page and the store.
    pub fn into_parts(self) -> (D, S) {
        (self.document, self.store)
    }
}

/// Language declared on the root element: `data-lang`, else `lang`.
fn document_language<D: Document>(document: &D) -> Option<String> {
    let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());
    non_empty(document.root_attribute("data-lang"))
        .or_else(|| non_empty(document.root_attribute("lang")))
}
