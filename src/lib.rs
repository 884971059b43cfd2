//! RentDesk: a Zellij plugin for running a small item rental desk.
//!
//! RentDesk keeps a fixed catalog of physical items (cameras, tents, tools)
//! in the memory of a plugin pane and serves two roles:
//! - requesters browse the catalog and rent an available item
//! - administrators, behind a shared code, record returns, edit and register
//!   items, and compose reminder text for renters to copy by hand
//!
//! Reminder text is either a static notice or produced by an optional
//! text-generation endpoint, with a local template whenever generation fails.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Screens, modals
//! │  - Event handling, admin gate, forms                │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Catalog       │   │ Reminder      │
//! │ (ui/)         │   │ (catalog/)    │   │ (reminder/)   │
//! │ - Rendering   │   │ - Store       │   │ - Composer    │
//! │ - Theming     │   │ - Seed TOML   │   │ - Generator   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Items and the rental state machine (domain/)     │
//! │  - Paths, OSC 52 clipboard (infrastructure/)        │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/rentdesk.wasm" {
//!         admin_code "2026prime"
//!         rental_days "3"
//!         seed_file "~/rentdesk/catalog.toml"
//!         language "en"
//!         organization "the rental desk"
//!         utc_offset_minutes "540"
//!         reminder "generated"
//!         generator_api_key "..."
//!         generation_timeout_secs "10"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use rentdesk::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! for event in [Event::OpenUserView, Event::KeyDown, Event::Select] {
//!     let (_render, _actions) = handle_event(&mut state, &event)?;
//! }
//! assert!(state.modal.is_some());
//! # Ok::<(), rentdesk::RentDeskError>(())
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod reminder;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event};
pub use domain::{RentDeskError, Result};
pub use ui::Theme;

use app::state::DEFAULT_GENERATION_TIMEOUT_SECS;
use app::AccessGate;
use catalog::{CatalogStore, SeedCatalog};
use chrono::{FixedOffset, Offset, Utc};
use domain::RentalPeriod;
use reminder::{GenerationClient, Locale, ReminderComposer, ReminderStrategy};
use std::collections::BTreeMap;

/// Longest accepted generation timeout. Shorter than the 60 s refresh timer
/// so the two timers stay distinguishable.
pub const MAX_GENERATION_TIMEOUT_SECS: u64 = 30;

/// Plugin configuration parsed from the Zellij plugin block.
///
/// Every key is optional. Unparseable values fall back to the default and are
/// recorded in `issues`, which [`initialize`] logs and shows on the flash line.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared code for the admin screen.
    pub admin_code: String,
    pub rental_period: RentalPeriod,
    /// TOML seed catalog. The built-in demo catalog is used when unset.
    pub seed_file: Option<String>,
    pub locale: Locale,
    /// Signature of the static notice.
    pub organization: String,
    /// Offset used to display dates.
    pub utc_offset: FixedOffset,
    pub reminder_strategy: ReminderStrategy,
    pub generator: GenerationClient,
    pub generation_timeout_secs: u64,
    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,
    /// Custom TOML theme, see [`ui::theme`].
    pub theme_file: Option<String>,
    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,
    /// Values that were rejected while parsing.
    pub issues: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            admin_code: app::gate::DEFAULT_ADMIN_CODE.to_string(),
            rental_period: RentalPeriod::default(),
            seed_file: None,
            locale: Locale::default(),
            organization: reminder::composer::DEFAULT_ORGANIZATION.to_string(),
            utc_offset: Utc.fix(),
            reminder_strategy: ReminderStrategy::default(),
            generator: GenerationClient::default(),
            generation_timeout_secs: DEFAULT_GENERATION_TIMEOUT_SECS,
            theme_name: None,
            theme_file: None,
            trace_level: None,
            issues: vec![],
        }
    }
}

/// Non-empty trimmed value for `key`.
fn non_empty<'a>(config: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    config.get(key).map(|s| s.trim()).filter(|s| !s.is_empty())
}

impl Config {
    /// Parses the configuration map Zellij passes to `load`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use rentdesk::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("rental_days".to_string(), "7".to_string());
    /// map.insert("language".to_string(), "klingon".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.rental_period.as_days(), 7);
    /// assert_eq!(config.issues.len(), 1);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let mut parsed = Self::default();
        let mut issues = Vec::new();

        if let Some(code) = non_empty(config, "admin_code") {
            parsed.admin_code = code.to_string();
        }

        if let Some(days) = non_empty(config, "rental_days") {
            match days.parse::<i64>() {
                Ok(days) => match RentalPeriod::days(days) {
                    Ok(period) => parsed.rental_period = period,
                    Err(err) => issues.push(err.to_string()),
                },
                Err(_) => issues.push(format!("rental_days must be a whole number, got '{days}'")),
            }
        }

        parsed.seed_file = non_empty(config, "seed_file").map(String::from);

        if let Some(language) = non_empty(config, "language") {
            match language.parse() {
                Ok(locale) => parsed.locale = locale,
                Err(err) => issues.push(err),
            }
        }

        if let Some(organization) = non_empty(config, "organization") {
            parsed.organization = organization.to_string();
        }

        if let Some(minutes) = non_empty(config, "utc_offset_minutes") {
            match minutes.parse::<i32>().ok().and_then(|m| FixedOffset::east_opt(m * 60)) {
                Some(offset) => parsed.utc_offset = offset,
                None => issues.push(format!("utc_offset_minutes out of range: '{minutes}'")),
            }
        }

        if let Some(strategy) = non_empty(config, "reminder") {
            match strategy.parse() {
                Ok(strategy) => parsed.reminder_strategy = strategy,
                Err(err) => issues.push(err),
            }
        }

        if let Some(endpoint) = non_empty(config, "generator_endpoint") {
            parsed.generator.endpoint = endpoint.trim_end_matches('/').to_string();
        }
        if let Some(model) = non_empty(config, "generator_model") {
            parsed.generator.model = model.to_string();
        }
        parsed.generator.api_key = non_empty(config, "generator_api_key").map(String::from);

        if let Some(secs) = non_empty(config, "generation_timeout_secs") {
            match secs.parse::<u64>() {
                Ok(secs) if (1..=MAX_GENERATION_TIMEOUT_SECS).contains(&secs) => {
                    parsed.generation_timeout_secs = secs;
                }
                _ => issues.push(format!(
                    "generation_timeout_secs must be between 1 and {MAX_GENERATION_TIMEOUT_SECS}, got '{secs}'"
                )),
            }
        }

        parsed.theme_name = non_empty(config, "theme").map(String::from);
        parsed.theme_file = non_empty(config, "theme_file").map(String::from);
        parsed.trace_level = non_empty(config, "trace_level").map(String::from);
        parsed.issues = issues;
        parsed
    }
}

/// Resolves the theme: file first, then built-in name, then the default.
fn load_theme(config: &Config, issues: &mut Vec<String>) -> Theme {
    if let Some(theme_file) = &config.theme_file {
        match Theme::from_file(infrastructure::expand_tilde(theme_file)) {
            Ok(theme) => return theme,
            Err(err) => issues.push(err.to_string()),
        }
    }
    if let Some(theme_name) = &config.theme_name {
        match Theme::from_name(theme_name) {
            Some(theme) => return theme,
            None => issues.push(format!("Unknown theme '{theme_name}'")),
        }
    }
    Theme::default()
}

/// Loads the configured seed file, or the built-in demo catalog.
///
/// Returns the store and a description of where it came from.
fn load_catalog(config: &Config, issues: &mut Vec<String>) -> (CatalogStore, String) {
    let period = config.rental_period;

    if let Some(seed_file) = &config.seed_file {
        let path = infrastructure::expand_tilde(seed_file);
        let loaded = SeedCatalog::from_file(&path)
            .and_then(|seed| CatalogStore::from_seed(seed.into_items(), period));
        match loaded {
            Ok(store) => return (store, infrastructure::display_path(&path)),
            Err(err) => issues.push(format!("Could not load {seed_file}: {err}. Using the demo catalog")),
        }
    }

    match CatalogStore::from_seed(SeedCatalog::builtin(Utc::now()).into_items(), period) {
        Ok(store) => (store, "built-in demo catalog".to_string()),
        Err(err) => {
            issues.push(err.to_string());
            (CatalogStore::empty(period), "empty catalog".to_string())
        }
    }
}

/// Builds the initial [`AppState`] from configuration.
///
/// Never fails: a broken seed file, theme, or option value falls back to its
/// default, is logged at `warn`, and is reported on the flash line.
///
/// # Example
///
/// ```rust
/// use rentdesk::{initialize, Config};
///
/// let state = initialize(&Config::default());
/// assert_eq!(state.catalog.list().len(), 6);
/// assert!(state.flash.is_none());
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    let _span = tracing::debug_span!("initialize").entered();

    let mut issues = config.issues.clone();
    let theme = load_theme(config, &mut issues);
    let (catalog, source) = load_catalog(config, &mut issues);

    let mut state = AppState::new(catalog, theme);
    state.catalog_source = source;
    state.gate = AccessGate::new(config.admin_code.clone());
    state.composer = ReminderComposer::new(config.locale, config.utc_offset, config.organization.clone());
    state.strategy = config.reminder_strategy;
    state.generator = config.generator.clone();
    #[allow(clippy::cast_possible_wrap)]
    let timeout_secs = config.generation_timeout_secs as i64;
    state.generation_timeout = chrono::Duration::seconds(timeout_secs);

    if state.strategy == ReminderStrategy::Generated && !state.generator.is_configured() {
        tracing::warn!("generated reminders requested without generator_api_key, using the fallback template");
    }

    for issue in &issues {
        tracing::warn!(issue = %issue, "configuration problem");
    }
    if !issues.is_empty() {
        state.flash_error(issues.join("; "));
    }

    tracing::debug!(
        items = state.catalog.list().len(),
        source = %state.catalog_source,
        strategy = ?state.strategy,
        "rentdesk initialized"
    );
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn defaults_without_keys() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config.admin_code, "2026prime");
        assert_eq!(config.rental_period.as_days(), 3);
        assert_eq!(config.reminder_strategy, ReminderStrategy::Template);
        assert_eq!(config.generation_timeout_secs, 10);
        assert!(config.generator.api_key.is_none());
        assert!(config.issues.is_empty());
    }

    #[test]
    fn parses_every_key() {
        let config = Config::from_zellij(&map(&[
            ("admin_code", " desk "),
            ("rental_days", "7"),
            ("seed_file", "~/catalog.toml"),
            ("language", "ko"),
            ("organization", "Prime Lab"),
            ("utc_offset_minutes", "540"),
            ("reminder", "generated"),
            ("generator_endpoint", "http://localhost:8080/v1beta/"),
            ("generator_model", "tiny"),
            ("generator_api_key", "secret"),
            ("generation_timeout_secs", "20"),
            ("theme", "prime-green"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.admin_code, "desk");
        assert_eq!(config.rental_period.as_days(), 7);
        assert_eq!(config.seed_file.as_deref(), Some("~/catalog.toml"));
        assert_eq!(config.locale, Locale::Ko);
        assert_eq!(config.organization, "Prime Lab");
        assert_eq!(config.utc_offset.local_minus_utc(), 9 * 3600);
        assert_eq!(config.reminder_strategy, ReminderStrategy::Generated);
        assert_eq!(config.generator.endpoint, "http://localhost:8080/v1beta");
        assert_eq!(config.generator.model, "tiny");
        assert!(config.generator.is_configured());
        assert_eq!(config.generation_timeout_secs, 20);
        assert_eq!(config.theme_name.as_deref(), Some("prime-green"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert!(config.issues.is_empty());
    }

    #[test]
    fn rejected_values_keep_defaults() {
        let config = Config::from_zellij(&map(&[
            ("rental_days", "0"),
            ("reminder", "carrier-pigeon"),
            ("generation_timeout_secs", "90"),
            ("utc_offset_minutes", "abc"),
        ]));
        assert_eq!(config.rental_period.as_days(), 3);
        assert_eq!(config.reminder_strategy, ReminderStrategy::Template);
        assert_eq!(config.generation_timeout_secs, 10);
        assert_eq!(config.issues.len(), 4);
    }

    #[test]
    fn initialize_applies_config() {
        let config = Config::from_zellij(&map(&[("admin_code", "desk"), ("rental_days", "5"), ("theme", "catppuccin-latte")]));
        let state = initialize(&config);

        assert!(state.gate.verify("desk").is_ok());
        assert_eq!(state.catalog.period().as_days(), 5);
        assert_eq!(state.theme.name, "catppuccin-latte");
        assert_eq!(state.catalog_source, "built-in demo catalog");
    }

    #[test]
    fn seed_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"
[[items]]
id = "t1"
name = "Tent"
category = "Outdoor"
description = "4-person dome tent"
"#,
        )
        .unwrap();

        let config = Config {
            seed_file: Some(file.path().to_string_lossy().into_owned()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.catalog.list().len(), 1);
        assert!(state.flash.is_none());
    }

    #[test]
    fn broken_seed_file_falls_back_with_flash() {
        let config = Config {
            seed_file: Some("/nonexistent/catalog.toml".to_string()),
            theme_name: Some("no-such-theme".to_string()),
            ..Config::default()
        };
        let state = initialize(&config);

        assert_eq!(state.catalog.list().len(), 6);
        let flash = state.flash.unwrap();
        assert!(flash.is_error);
        assert!(flash.message.contains("Unknown theme 'no-such-theme'"));
        assert!(flash.message.contains("Could not load /nonexistent/catalog.toml"));
    }
}
