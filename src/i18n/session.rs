//! Translation session: the loaded bundle plus the active language.
//!
//! A [`Session`] is the only mutable state of the pipeline. The translator
//! owns one and hands it to the applier; nothing is stored globally.

use crate::i18n::{next_language, Metadata, TranslationBundle};
use tracing::debug;

/// Which step of the fallback chain produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStep {
    /// Found in the active language
    Active,
    /// Found in `defaultLang`
    Default,
    /// Found by scanning `supported` in order
    Supported,
}

/// A resolved value and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub value: &'a str,
    pub step: ResolutionStep,
    /// Language whose section supplied the value
    pub lang: &'a str,
}

/// Bundle and active language for one page session.
#[derive(Debug, Clone)]
pub struct Session {
    bundle: TranslationBundle,
    active: String,
}

impl Session {
    /// Start a session with an explicit active language.
    pub fn new(bundle: TranslationBundle, active: impl Into<String>) -> Self {
        Self {
            bundle,
            active: active.into(),
        }
    }

    pub fn metadata(&self) -> &Metadata {
        self.bundle.metadata()
    }

    /// Currently active language code.
    pub fn active_language(&self) -> &str {
        &self.active
    }

    /// Advance to the next supported language.
    ///
    /// Returns the new language, or `None` (leaving the session untouched)
    /// when no languages are supported.
    pub fn cycle(&mut self) -> Option<&str> {
        let next = next_language(&self.bundle.metadata().supported, &self.active)?.to_string();
        debug!("Cycling language: {} -> {}", self.active, next);
        self.active = next;
        Some(self.active.as_str())
    }

    /// Look up `key` through the fallback chain.
    ///
    /// Tries the active language, then `defaultLang`, then every supported
    /// language in order. Returns `None` if no step has a non-null value.
    pub fn lookup(&self, key: &str) -> Option<Resolution<'_>> {
        let metadata = self.bundle.metadata();

        let preferred = [
            (self.active.as_str(), ResolutionStep::Active),
            (metadata.default_lang.as_str(), ResolutionStep::Default),
        ];
        let scanned = metadata
            .supported
            .iter()
            .map(|lang| (lang.as_str(), ResolutionStep::Supported));

        preferred
            .into_iter()
            .chain(scanned)
            .find_map(|(lang, step)| {
                self.bundle
                    .value(lang, key)
                    .map(|value| Resolution { value, step, lang })
            })
    }

    /// Resolve `key` to a displayable string; `""` when nothing matches.
    pub fn resolve(&self, key: &str) -> String {
        self.lookup(key)
            .map(|resolution| resolution.value.to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(json: &str) -> TranslationBundle {
        TranslationBundle::from_json(json).expect("Test bundle should parse")
    }

    fn sample_session(active: &str) -> Session {
        Session::new(
            bundle(
                r#"{
                    "_meta": { "defaultLang": "hy", "supported": ["hy", "en", "ru"] },
                    "hy": { "title": "Վերնագիր", "only_hy": "Հայերեն", "blank": "" },
                    "en": { "title": "Title", "nulled": null },
                    "ru": { "title": "Заголовок", "only_ru": "Русский", "nulled": "Пусто" }
                }"#,
            ),
            active,
        )
    }

    // ==================== Fallback Chain Tests ====================

    #[test]
    fn test_resolve_active_language() {
        assert_eq!(sample_session("en").resolve("title"), "Title");
        assert_eq!(sample_session("ru").resolve("title"), "Заголовок");
        assert_eq!(sample_session("hy").resolve("title"), "Վերնագիր");
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let session = sample_session("en");
        let resolution = session.lookup("only_hy").unwrap();
        assert_eq!(resolution.value, "Հայերեն");
        assert_eq!(resolution.step, ResolutionStep::Default);
        assert_eq!(resolution.lang, "hy");
    }

    #[test]
    fn test_resolve_scans_supported() {
        let session = sample_session("en");
        let resolution = session.lookup("only_ru").unwrap();
        assert_eq!(resolution.value, "Русский");
        assert_eq!(resolution.step, ResolutionStep::Supported);
        assert_eq!(resolution.lang, "ru");
    }

    #[test]
    fn test_null_value_falls_through() {
        // en has an explicit null, hy lacks the key, ru has it
        assert_eq!(sample_session("en").resolve("nulled"), "Пусто");
    }

    #[test]
    fn test_empty_string_is_not_missing() {
        let session = sample_session("hy");
        let resolution = session.lookup("blank").unwrap();
        assert_eq!(resolution.value, "");
        assert_eq!(resolution.step, ResolutionStep::Active);
    }

    #[test]
    fn test_missing_everywhere_resolves_to_empty() {
        let session = sample_session("en");
        assert!(session.lookup("missing").is_none());
        assert_eq!(session.resolve("missing"), "");
    }

    #[test]
    fn test_active_language_without_section() {
        let session = sample_session("fr");
        assert_eq!(session.resolve("title"), "Վերնագիր");
    }

    #[test]
    fn test_documented_example() {
        let session = Session::new(
            bundle(r#"{"hy": {"t": "Ա"}, "en": {"t": "B"}, "ru": {}}"#),
            "en",
        );
        assert_eq!(session.resolve("t"), "B");
    }

    // ==================== Cycle Tests ====================

    #[test]
    fn test_cycle_walks_supported() {
        let mut session = sample_session("hy");
        assert_eq!(session.cycle(), Some("en"));
        assert_eq!(session.cycle(), Some("ru"));
        assert_eq!(session.cycle(), Some("hy"));
        assert_eq!(session.active_language(), "hy");
    }

    #[test]
    fn test_cycle_with_empty_supported_is_noop() {
        let mut session = Session::new(bundle(r#"{"_meta": {"supported": []}}"#), "hy");
        assert_eq!(session.cycle(), None);
        assert_eq!(session.active_language(), "hy");
    }

    #[test]
    fn test_cycle_changes_resolution() {
        let mut session = sample_session("hy");
        session.cycle();
        assert_eq!(session.resolve("title"), "Title");
    }
}
