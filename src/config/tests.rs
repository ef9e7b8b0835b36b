//! Configuration tests
//!
//! Round-trip tests keep `to_toml` and `FileConfig` in sync; precedence
//! tests pin down env > file > defaults.

use super::*;
use crate::model::Status;
use std::collections::HashMap;

/// Parse a serialized config back into a `Config` with no env overrides
fn roundtrip(config: &Config) -> Config {
    let toml_str = config.to_toml();
    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );
    Config::from_sources(parsed.unwrap(), |_| None)
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let parsed = roundtrip(&config);

    assert_eq!(parsed.api_url, config.api_url);
    assert_eq!(parsed.locale, config.locale);
    assert_eq!(parsed.sort, config.sort);
    assert_eq!(parsed.filters, config.filters);
    assert_eq!(parsed.fetch, config.fetch);
    assert_eq!(parsed.logging, config.logging);
}

#[test]
fn test_config_roundtrip_customized() {
    let mut config = Config::default();
    config.api_url = "http://localhost:4000/graphql".to_string();
    config.locale = Locale::De;
    config.sort = SortKey::OriginName;
    config.demo_mode = true;
    config.filters = FilterState::new(Some(Status::Unknown), Some("Alien \"Parasite\"".into()));
    config.fetch.timeout_secs = 3;
    config.fetch.page_size = 5;
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;

    let parsed = roundtrip(&config);

    assert_eq!(parsed.api_url, "http://localhost:4000/graphql");
    assert_eq!(parsed.locale, Locale::De);
    assert_eq!(parsed.sort, SortKey::OriginName);
    assert!(parsed.demo_mode);
    assert_eq!(parsed.filters.status, Some(Status::Unknown));
    assert_eq!(parsed.filters.species.as_deref(), Some("Alien \"Parasite\""));
    assert_eq!(parsed.fetch.timeout_secs, 3);
    assert_eq!(parsed.fetch.page_size, 5);
    assert!(parsed.logging.file_enabled);
    assert_eq!(parsed.logging.file_rotation, LogRotation::Hourly);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_env_overrides_file() {
    let file: FileConfig = toml::from_str(
        r#"
api_url = "http://file/graphql"
locale = "es"
demo_mode = false

[fetch]
timeout_secs = 30
"#,
    )
    .unwrap();

    let env = env_from(&[
        ("MORTYDEX_API_URL", "http://env/graphql"),
        ("MORTYDEX_LANG", "de_DE.UTF-8"),
        ("MORTYDEX_DEMO", "1"),
        ("MORTYDEX_TIMEOUT_SECS", "7"),
    ]);
    let config = Config::from_sources(file, env);

    assert_eq!(config.api_url, "http://env/graphql");
    assert_eq!(config.locale, Locale::De);
    assert!(config.demo_mode);
    assert_eq!(config.fetch.timeout_secs, 7);
}

#[test]
fn test_file_overrides_defaults() {
    let file: FileConfig = toml::from_str(
        r#"
sort = "origin"

[filters]
status = "dead"
species = "  Human  "

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let config = Config::from_sources(file, |_| None);

    assert_eq!(config.sort, SortKey::OriginName);
    assert_eq!(config.filters.status, Some(Status::Dead));
    assert_eq!(config.filters.species.as_deref(), Some("Human"));
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.fetch, FetchConfig::default());
    assert!(config.enable_tui);
}

#[test]
fn test_unknown_values_fall_back() {
    let file: FileConfig = toml::from_str(
        r#"
locale = "fr"
sort = "height"

[filters]
status = "zombie"

[fetch]
timeout_secs = 0
"#,
    )
    .unwrap();

    let config = Config::from_sources(file, |_| None);

    assert_eq!(config.locale, Locale::En);
    assert_eq!(config.sort, SortKey::Name);
    assert_eq!(config.filters.status, None);
    assert_eq!(config.fetch.timeout_secs, 1);
}

#[test]
fn test_no_tui_flag() {
    let config = Config::from_sources(
        FileConfig::default(),
        env_from(&[("MORTYDEX_NO_TUI", "true")]),
    );
    assert!(!config.enable_tui);

    let config = Config::from_sources(
        FileConfig::default(),
        env_from(&[("MORTYDEX_NO_TUI", "0")]),
    );
    assert!(config.enable_tui);
}

#[test]
fn test_commented_filters_when_unset() {
    let toml_str = Config::default().to_toml();
    assert!(toml_str.contains("# status = \"Alive\""));
    assert!(toml_str.contains("# species = \"Human\""));
}
