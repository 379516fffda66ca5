//! Bundle coverage report.
//!
//! For every supported language, lists which keys it provides itself, which
//! it only gets through the fallback chain, and which resolve to nothing.
//! Used by the `preview` binary to spot holes in a bundle before deploying.

use crate::i18n::{ResolutionStep, Session, TranslationBundle};
use serde::Serialize;

/// Coverage for a single language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageCoverage {
    /// Language code
    pub lang: String,

    /// Keys with a non-null value in this language
    pub translated: Vec<String>,

    /// Keys that resolve, but from another language
    pub fallback: Vec<String>,

    /// Keys that resolve to the empty fallback
    pub missing: Vec<String>,
}

impl LanguageCoverage {
    /// Share of keys this language translates itself, as a percentage (0-100).
    pub fn translated_rate(&self) -> f64 {
        let total = self.translated.len() + self.fallback.len() + self.missing.len();
        if total == 0 {
            return 100.0;
        }
        (self.translated.len() as f64 / total as f64) * 100.0
    }

    /// Whether every key is translated in this language.
    pub fn is_complete(&self) -> bool {
        self.fallback.is_empty() && self.missing.is_empty()
    }
}

/// Coverage for every supported language of a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    /// Total number of distinct keys in the bundle
    pub total_keys: usize,

    /// One entry per supported language, in `supported` order
    pub languages: Vec<LanguageCoverage>,
}

impl CoverageReport {
    /// Build the report for `bundle`.
    pub fn for_bundle(bundle: &TranslationBundle) -> Self {
        let keys = bundle.keys();

        let languages = bundle
            .metadata()
            .supported
            .iter()
            .map(|lang| {
                let session = Session::new(bundle.clone(), lang.clone());
                let mut coverage = LanguageCoverage {
                    lang: lang.clone(),
                    translated: Vec::new(),
                    fallback: Vec::new(),
                    missing: Vec::new(),
                };

                for key in &keys {
                    let bucket = match session.lookup(key).map(|r| r.step) {
                        Some(ResolutionStep::Active) => &mut coverage.translated,
                        Some(_) => &mut coverage.fallback,
                        None => &mut coverage.missing,
                    };
                    bucket.push(key.to_string());
                }

                coverage
            })
            .collect();

        Self {
            total_keys: keys.len(),
            languages,
        }
    }

    /// Whether every supported language translates every key.
    pub fn is_complete(&self) -> bool {
        self.languages.iter().all(LanguageCoverage::is_complete)
    }

    /// Coverage entry for one language.
    pub fn language(&self, lang: &str) -> Option<&LanguageCoverage> {
        self.languages.iter().find(|coverage| coverage.lang == lang)
    }
}
