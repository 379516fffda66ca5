//! Preview binary - loads a site's translation bundle and shows what visitors would see
//!
//! Usage:
//!   cargo run --bin preview                     # Metadata + coverage per language
//!   cargo run --bin preview -- --lang en        # Also print every key resolved under "en"
//!   cargo run --bin preview -- --pref ru        # Startup language for a visitor who stored "ru"
//!   cargo run --bin preview -- --json           # Coverage report as JSON
//!
//! Required environment variables:
//! - SITE_URL (e.g. http://localhost:8000/)
//!
//! Optional:
//! - I18N_BUNDLE_PATH (defaults to content/site.json)
//! - I18N_STORAGE_KEY (defaults to site.lang)

use anyhow::{Context, Result};
use site_i18n::i18n::{resolve_startup_language, CoverageReport, ResolutionStep, Session};
use site_i18n::{BundleLoader, Config};
use tracing::info;

/// Command-line options
struct PreviewArgs {
    lang: Option<String>,
    preference: Option<String>,
    json: bool,
}

impl PreviewArgs {
    fn parse() -> Result<Self> {
        let mut args = std::env::args().skip(1);
        let mut parsed = Self {
            lang: None,
            preference: None,
            json: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--lang" => parsed.lang = Some(args.next().context("--lang needs a language code")?),
                "--pref" => {
                    parsed.preference = Some(args.next().context("--pref needs a language code")?)
                }
                "--json" => parsed.json = true,
                other => anyhow::bail!("Unknown argument: {}", other),
            }
        }

        Ok(parsed)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("site_i18n=info".parse()?),
        )
        .init();

    let args = PreviewArgs::parse()?;

    info!("Loading configuration...");
    let config = Config::from_env()?;

    let loader = BundleLoader::new(&config)?;
    let bundle = loader
        .load()
        .await
        .with_context(|| format!("Failed to load bundle from {}", loader.url()))?;

    let report = CoverageReport::for_bundle(&bundle);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let meta = bundle.metadata();
    let startup = resolve_startup_language(meta, args.preference.as_deref(), None);

    println!();
    println!("========== TRANSLATION BUNDLE ==========");
    println!("Source:          {}", loader.url());
    println!("Default:         {}", meta.default_lang);
    println!(
        "Supported:       {}",
        meta.supported
            .iter()
            .map(|lang| format!("{} ({})", lang, meta.label_for(lang)))
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("Keys:            {}", report.total_keys);
    println!("Startup:         {} ({})", startup.code, startup.source);
    if !meta.is_supported(&meta.default_lang) {
        println!("⚠️  Default language '{}' is not in the supported list", meta.default_lang);
    }
    println!();

    println!("--- Coverage ---");
    for coverage in &report.languages {
        println!(
            "{:>6}: {:5.1}% translated, {} via fallback, {} missing",
            coverage.lang,
            coverage.translated_rate(),
            coverage.fallback.len(),
            coverage.missing.len()
        );
        if !coverage.fallback.is_empty() {
            println!("        fallback: {}", coverage.fallback.join(", "));
        }
        if !coverage.missing.is_empty() {
            println!("        missing:  {}", coverage.missing.join(", "));
        }
    }
    println!();

    if let Some(lang) = args.lang {
        println!("--- Resolved values ({}) ---", lang);
        let session = Session::new(bundle.clone(), lang);
        for key in bundle.keys() {
            match session.lookup(key) {
                Some(resolution) if resolution.step == ResolutionStep::Active => {
                    println!("{} = {:?}", key, resolution.value)
                }
                Some(resolution) => {
                    println!("{} = {:?}  [from {}]", key, resolution.value, resolution.lang)
                }
                None => println!("{} = \"\"  [missing]", key),
            }
        }
        println!();
    }

    if report.is_complete() {
        println!("✓ Every supported language translates every key");
    }

    Ok(())
}
