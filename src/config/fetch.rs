//! Fetch and startup-filter configuration

use crate::model::{FilterState, Status};
use serde::Deserialize;
use std::time::Duration;

/// Page fetch settings
#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    /// Per-page timeout; expiry puts the feed into the error state
    pub timeout_secs: u64,
    /// Page size served by the demo dataset (the real API fixes it at 20)
    pub page_size: usize,
    /// Artificial latency for demo responses
    pub demo_latency_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            page_size: 20,
            demo_latency_ms: 400,
        }
    }
}

impl FetchConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileFetch>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            timeout_secs: file.timeout_secs.unwrap_or(defaults.timeout_secs).max(1),
            page_size: file.page_size.unwrap_or(defaults.page_size).max(1),
            demo_latency_ms: file.demo_latency_ms.unwrap_or(defaults.demo_latency_ms),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Fetch settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileFetch {
    pub timeout_secs: Option<u64>,
    pub page_size: Option<usize>,
    pub demo_latency_ms: Option<u64>,
}

/// Startup filters as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileFilters {
    pub status: Option<String>,
    pub species: Option<String>,
}

/// Build the startup filter state; unknown status strings are ignored
pub(super) fn filters_from_file(file: Option<FileFilters>) -> FilterState {
    let file = file.unwrap_or_default();
    let status = file.status.as_deref().and_then(|s| {
        let parsed = Status::parse_filter(s);
        if parsed.is_none() && !s.trim().is_empty() {
            eprintln!("Ignoring unknown status filter {:?} in config", s);
        }
        parsed
    });
    FilterState::new(status, file.species)
}
