//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

/// Quote a string as a TOML basic string
fn quoted(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

impl Config {
    /// Serialize the [filters] section; unset filters become commented examples
    pub(super) fn filters_to_toml(&self) -> String {
        let mut output = String::from("[filters]\n");
        match self.filters.status {
            Some(status) => {
                output.push_str(&format!("status = {}\n", quoted(status.as_api_str())));
            }
            None => output.push_str("# status = \"Alive\"        # Alive, Dead, unknown\n"),
        }
        match &self.filters.species {
            Some(species) => output.push_str(&format!("species = {}\n", quoted(species))),
            None => output.push_str("# species = \"Human\"       # case-insensitive match\n"),
        }
        output
    }

    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        format!(
            r#"# mortydex configuration

# GraphQL endpoint of the character API
api_url = {api_url}

# UI language: en, de, es
locale = "{locale}"

# Initial sort order: name, origin
sort = "{sort}"

# Serve the built-in demo dataset instead of calling the API
demo_mode = {demo_mode}

# Page fetching
[fetch]
timeout_secs = {timeout_secs}
# Page size and latency only apply to the demo dataset
page_size = {page_size}
demo_latency_ms = {demo_latency_ms}

# Filters applied at startup
{filters_section}
# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# File logging (in addition to TUI buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix}
"#,
            api_url = quoted(&self.api_url),
            locale = self.locale.code(),
            sort = self.sort.as_str(),
            demo_mode = self.demo_mode,
            timeout_secs = self.fetch.timeout_secs,
            page_size = self.fetch.page_size,
            demo_latency_ms = self.fetch.demo_latency_ms,
            filters_section = self.filters_to_toml(),
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = quoted(&self.logging.file_dir.display().to_string()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = quoted(&self.logging.file_prefix),
        )
    }

    /// Save current configuration to file
    pub fn save(&self) -> Result<(), std::io::Error> {
        let Some(path) = Self::config_path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config path",
            ));
        };

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, self.to_toml())
    }
}
