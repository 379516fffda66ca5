//! Language resolution: startup selection and cycling.

use crate::i18n::Metadata;
use std::fmt;

/// Where the startup language came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageSource {
    /// The visitor's stored preference
    Persisted,
    /// `data-lang` / `lang` on the document root
    Document,
    /// `defaultLang` from the bundle metadata
    Default,
}

impl fmt::Display for LanguageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Persisted => "persisted preference",
            Self::Document => "document markup",
            Self::Default => "bundle default",
        };
        f.write_str(name)
    }
}

/// Result of startup language resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupLanguage {
    /// Chosen language code
    pub code: String,

    /// Which candidate won
    pub source: LanguageSource,
}

/// Pick the startup language.
///
/// Candidates are tried in order: persisted preference, then the language
/// declared on the document root, then `defaultLang`. A candidate is only
/// accepted when it is non-empty and listed in `supported`. `defaultLang` is
/// the last resort and is used even when it is not supported itself.
///
/// # Example
/// ```
/// use site_i18n::i18n::{resolve_startup_language, LanguageSource, Metadata};
///
/// let meta = Metadata::default();
/// let lang = resolve_startup_language(&meta, Some("fr"), Some("en"));
/// assert_eq!(lang.code, "en");
/// assert_eq!(lang.source, LanguageSource::Document);
/// ```
pub fn resolve_startup_language(
    metadata: &Metadata,
    persisted: Option<&str>,
    document: Option<&str>,
) -> StartupLanguage {
    let candidates = [
        (persisted, LanguageSource::Persisted),
        (document, LanguageSource::Document),
    ];

    for (candidate, source) in candidates {
        if let Some(code) = candidate.filter(|c| !c.is_empty()) {
            if metadata.is_supported(code) {
                return StartupLanguage {
                    code: code.to_string(),
                    source,
                };
            }
        }
    }

    StartupLanguage {
        code: metadata.default_lang.clone(),
        source: LanguageSource::Default,
    }
}

/// Language that follows `current` in `supported`, wrapping around.
///
/// A `current` that is not in the list is treated as sitting just before the
/// first entry, so the result is `supported[0]`. Returns `None` when
/// `supported` is empty.
pub fn next_language<'a>(supported: &'a [String], current: &str) -> Option<&'a str> {
    if supported.is_empty() {
        return None;
    }

    let next_index = supported
        .iter()
        .position(|lang| lang == current)
        .map_or(0, |index| (index + 1) % supported.len());

    Some(supported[next_index].as_str())
}
