//! Translation data and resolution.
//!
//! Everything in here is pure: no DOM, no storage, no network.
//!
//! # Architecture
//!
//! - `metadata`: `_meta` parsing with per-field defaults
//! - `bundle`: the immutable per-language key/value sections
//! - `language`: startup language selection and cycling
//! - `session`: bundle + active language, and the value fallback chain
//! - `coverage`: per-language translation coverage report
//!
//! # Example
//!
//! ```
//! use site_i18n::i18n::{Session, TranslationBundle};
//!
//! let bundle = TranslationBundle::from_json(r#"{"hy": {"t": "Ա"}, "en": {"t": "B"}}"#).unwrap();
//! let session = Session::new(bundle, "en");
//! assert_eq!(session.resolve("t"), "B");
//! assert_eq!(session.resolve("nope"), "");
//! ```

mod bundle;
mod coverage;
mod language;
mod metadata;
mod session;

pub use bundle::{Section, TranslationBundle};
pub use coverage::{CoverageReport, LanguageCoverage};
pub use language::{next_language, resolve_startup_language, LanguageSource, StartupLanguage};
pub use metadata::{Metadata, DEFAULT_LABELS, DEFAULT_LANG, DEFAULT_SUPPORTED, META_KEY};
pub use session::{Resolution, ResolutionStep, Session};
