//! Configuration for the character browser
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/mortydex/config.toml)
//! 3. Built-in defaults (lowest priority)

use crate::i18n::Locale;
use crate::model::{FilterState, SortKey};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod fetch;
mod observability;
mod serialization;

#[cfg(test)]
mod tests;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (maintain public API)
// ─────────────────────────────────────────────────────────────────────────────

pub use fetch::FetchConfig;
pub use observability::{LogRotation, LoggingConfig};

use fetch::{FileFetch, FileFilters};
use observability::FileLogging;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default GraphQL endpoint
pub const DEFAULT_API_URL: &str = crate::query::graphql::DEFAULT_ENDPOINT;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// GraphQL endpoint of the character API
    pub api_url: String,

    /// UI language
    pub locale: Locale,

    /// Initial sort order
    pub sort: SortKey,

    /// Filters applied at startup
    pub filters: FilterState,

    /// Whether to enable the TUI (can be disabled for headless mode)
    pub enable_tui: bool,

    /// Demo mode: serve the built-in dataset instead of calling the API
    pub demo_mode: bool,

    /// Fetch timeout and demo paging
    pub fetch: FetchConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            locale: Locale::En,
            sort: SortKey::Name,
            filters: FilterState::default(),
            enable_tui: true,
            demo_mode: false,
            fetch: FetchConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub api_url: Option<String>,
    pub locale: Option<String>,
    pub sort: Option<String>,
    pub demo_mode: Option<bool>,

    /// Optional [fetch] section
    pub fetch: Option<FileFetch>,

    /// Optional [filters] section
    pub filters: Option<FileFilters>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

/// Truthy values for boolean env flags
fn env_flag(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

impl Config {
    /// Get the config file path: ~/.config/mortydex/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("mortydex").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        // Use Config::default().to_toml() as single source of truth
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// A config file that exists but cannot be read or parsed is an error:
    /// silently falling back to defaults would hide the typo.
    fn load_file_config() -> Result<FileConfig> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => {
                Err(e).with_context(|| format!("Cannot read config file {}", path.display()))
            }
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Result<Self> {
        let file = Self::load_file_config()?;
        Ok(Self::from_sources(file, |key| std::env::var(key).ok()))
    }

    /// Merge a parsed file config with an environment lookup
    pub(crate) fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // API URL: env > file > default
        let api_url = env("MORTYDEX_API_URL")
            .or(file.api_url)
            .unwrap_or(defaults.api_url);

        // Language: env > file > default (unknown codes fall back to English)
        let locale = env("MORTYDEX_LANG")
            .or(file.locale)
            .map(|code| {
                Locale::from_code(&code).unwrap_or_else(|| {
                    eprintln!("Unknown language {:?}, using English", code);
                    Locale::En
                })
            })
            .unwrap_or(defaults.locale);

        // Sort: file > default
        let sort = file
            .sort
            .as_deref()
            .and_then(SortKey::parse)
            .unwrap_or(defaults.sort);

        // TUI toggle: env only (runtime flag)
        let enable_tui = env("MORTYDEX_NO_TUI")
            .map(|v| !env_flag(&v))
            .unwrap_or(true);

        // Demo mode: env > file > default
        let demo_mode = env("MORTYDEX_DEMO")
            .map(|v| env_flag(&v))
            .or(file.demo_mode)
            .unwrap_or(false);

        let mut fetch = FetchConfig::from_file(file.fetch);
        if let Some(secs) = env("MORTYDEX_TIMEOUT_SECS").and_then(|v| v.parse::<u64>().ok()) {
            fetch.timeout_secs = secs.max(1);
        }

        let filters = fetch::filters_from_file(file.filters);
        let logging = LoggingConfig::from_file(file.logging);

        Self {
            api_url,
            locale,
            sort,
            filters,
            enable_tui,
            demo_mode,
            fetch,
            logging,
        }
    }
}
