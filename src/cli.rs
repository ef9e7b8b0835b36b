// CLI module - command-line argument parsing and handlers
//
// Subcommands:
// - list: headless feed walk, prints the sorted characters
// - config --show: Display effective configuration
// - config --reset: Regenerate config file with defaults
// - config --edit: Open config file in $EDITOR
// - config --update: Rewrite config with current structure, keeping values
// - config --path: Print the config file location

use crate::config::{Config, VERSION};
use crate::feed::{fetcher, derive_view, ApplyOutcome, FeedController};
use crate::i18n::{Locale, Translator};
use crate::model::{Character, FilterState, SortKey, Status};
use crate::query::SharedQueryService;
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::process::Command;
use unicode_width::UnicodeWidthStr;

/// Browse Rick and Morty characters in the terminal
#[derive(Parser, Debug)]
#[command(name = "mortydex")]
#[command(version = VERSION)]
#[command(about = "Browse Rick and Morty characters in the terminal", long_about = None)]
pub struct Cli {
    /// Serve the built-in dataset instead of calling the API
    #[arg(long, global = true)]
    pub demo: bool,

    /// UI language (en, de, es)
    #[arg(long, global = true, value_parser = parse_locale)]
    pub lang: Option<Locale>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print characters without starting the TUI
    List(ListArgs),

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Update config with new defaults (preserves user values)
        #[arg(long)]
        update: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Status filter: alive, dead, unknown or all
    #[arg(long, value_parser = parse_status)]
    pub status: Option<StatusArg>,

    /// Species filter (free text)
    #[arg(long)]
    pub species: Option<String>,

    /// Sort order: name or origin
    #[arg(long, value_parser = parse_sort)]
    pub sort: Option<SortKey>,

    /// Stop after this many pages (default: all)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: Option<u32>,

    /// Print one JSON object per line instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Status flag value; `All` clears a status filter set in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusArg {
    All,
    Only(Status),
}

fn parse_locale(s: &str) -> Result<Locale, String> {
    Locale::from_code(s).ok_or_else(|| format!("unsupported language '{}' (en, de, es)", s))
}

fn parse_status(s: &str) -> Result<StatusArg, String> {
    if s.eq_ignore_ascii_case("all") {
        return Ok(StatusArg::All);
    }
    Status::parse_filter(s)
        .map(StatusArg::Only)
        .ok_or_else(|| format!("unknown status '{}' (alive, dead, unknown, all)", s))
}

fn parse_sort(s: &str) -> Result<SortKey, String> {
    SortKey::parse(s).ok_or_else(|| format!("unknown sort key '{}' (name, origin)", s))
}

impl Cli {
    /// Apply global flags on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if self.demo {
            config.demo_mode = true;
        }
        if let Some(locale) = self.lang {
            config.locale = locale;
        }
    }

    /// Whether this invocation runs without the TUI
    pub fn is_headless(&self, config: &Config) -> bool {
        matches!(self.command, Some(Commands::List(_))) || !config.enable_tui
    }
}

/// Handle the config subcommand. Returns true if it ran (exit after).
pub fn handle_config_command(cli: &Cli) -> Result<bool> {
    let Some(Commands::Config {
        show,
        reset,
        edit,
        update,
        path,
    }) = &cli.command
    else {
        return Ok(false);
    };

    if *path {
        handle_config_path()?;
    } else if *show {
        handle_config_show(cli)?;
    } else if *reset {
        handle_config_reset()?;
    } else if *edit {
        handle_config_edit()?;
    } else if *update {
        handle_config_update()?;
    } else {
        // No flag provided, show help
        println!("Usage: mortydex config [--show|--reset|--edit|--update|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --edit    Open config file in $EDITOR");
        println!("  --update  Update config with new defaults (preserves user values)");
        println!("  --path    Show config file path");
    }
    Ok(true)
}

fn require_config_path() -> Result<std::path::PathBuf> {
    Config::config_path().context("Could not determine config path")
}

fn handle_config_path() -> Result<()> {
    println!("{}", require_config_path()?.display());
    Ok(())
}

fn handle_config_show(cli: &Cli) -> Result<()> {
    let mut config = Config::from_env()?;
    cli.apply_overrides(&mut config);

    println!("# Effective configuration (flags > env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let path = require_config_path()?;

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    Config::default()
        .save()
        .with_context(|| format!("Error writing config {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

fn handle_config_edit() -> Result<()> {
    let path = require_config_path()?;

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    println!("Opening {} with {}", path.display(), editor);

    let status = Command::new(&editor)
        .arg(&path)
        .status()
        .with_context(|| {
            format!(
                "Failed to launch editor '{}' (set $EDITOR to your preferred editor)",
                editor
            )
        })?;

    if !status.success() {
        bail!("Editor exited with status: {}", status);
    }
    Ok(())
}

fn handle_config_update() -> Result<()> {
    let path = require_config_path()?;

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
        return Ok(());
    }

    // Regenerate TOML from the merged values
    let existing = Config::from_env()?;

    let backup_path = path.with_extension("toml.bak");
    match std::fs::copy(&path, &backup_path) {
        Ok(_) => println!("Backup created: {}", backup_path.display()),
        Err(e) => eprintln!("Warning: Could not create backup: {}", e),
    }

    existing
        .save()
        .with_context(|| format!("Error writing config {}", path.display()))?;

    println!("Config updated with latest structure: {}", path.display());
    println!("Your values have been preserved.");
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Headless listing
// ─────────────────────────────────────────────────────────────────────────────

/// Filters for a headless run: flags override the configured startup filters
fn list_filters(args: &ListArgs, config: &Config) -> FilterState {
    let status = match args.status {
        Some(StatusArg::All) => None,
        Some(StatusArg::Only(status)) => Some(status),
        None => config.filters.status,
    };
    let species = args.species.clone().or_else(|| config.filters.species.clone());
    FilterState::new(status, species)
}

/// Walk the feed page by page, then print the sorted result
pub async fn run_list(args: ListArgs, config: &Config, service: SharedQueryService) -> Result<()> {
    let filters = list_filters(&args, config);
    let sort = args.sort.unwrap_or(config.sort);
    let timeout = config.fetch.timeout();

    tracing::info!(
        "Listing characters via {} (status={:?}, species={:?}, sort={})",
        service.name(),
        filters.status,
        filters.species,
        sort.as_str()
    );

    let mut feed = FeedController::new(filters);
    let mut next = Some(feed.mount());
    let mut pages = 0u32;

    while let Some(request) = next.take() {
        match fetcher::fetch(&service, &request, timeout).await {
            Ok(page) => {
                if let ApplyOutcome::Applied { added, duplicates } = feed.apply_page(&request, page)
                {
                    tracing::debug!(
                        "Page {}: {} new, {} duplicate(s)",
                        request.page,
                        added,
                        duplicates
                    );
                }
            }
            Err(e) => {
                feed.apply_failure(&request, e.to_string());
                bail!("Fetching page {} failed: {}", request.page, e);
            }
        }

        pages += 1;
        if args.pages.is_some_and(|max| pages >= max) {
            break;
        }
        next = feed.load_more();
    }

    let view = derive_view(feed.characters(), sort);
    let translator = Translator::new(config.locale);

    let mut stdout = std::io::stdout().lock();
    if args.json {
        for character in &view {
            writeln!(stdout, "{}", serde_json::to_string(character)?)?;
        }
    } else if view.is_empty() {
        writeln!(stdout, "{}", translator.translate("no_results"))?;
    } else {
        write!(stdout, "{}", format_table(&view, &translator))?;
    }

    tracing::info!("Listed {} character(s) from {} page(s)", view.len(), pages);
    Ok(())
}

/// Pad to a display width; wide glyphs count double
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

/// Render characters as an aligned plain-text table with translated labels
pub fn format_table(characters: &[Character], translator: &Translator) -> String {
    let header = [
        translator.translate("sorting.name").to_string(),
        translator.translate("character.status").to_string(),
        translator.translate("character.species").to_string(),
        translator.translate("character.gender").to_string(),
        translator.translate("character.origin").to_string(),
    ];

    let rows: Vec<[String; 5]> = characters
        .iter()
        .map(|c| {
            [
                c.name.clone(),
                translator.status_label(c.status).to_string(),
                c.species.clone(),
                translator.gender_label(&c.gender).to_string(),
                c.origin.name.clone(),
            ]
        })
        .collect();

    let mut widths = header.clone().map(|h| h.width());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.width());
        }
    }

    let mut output = String::new();
    for row in std::iter::once(&header).chain(rows.iter()) {
        let line: Vec<String> = row
            .iter()
            .zip(widths.iter())
            .map(|(cell, &width)| pad(cell, width))
            .collect();
        output.push_str(line.join("  ").trim_end());
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::DemoService;
    use std::sync::Arc;

    #[test]
    fn test_parse_list_flags() {
        let cli = Cli::try_parse_from([
            "mortydex", "--demo", "list", "--status", "Dead", "--species", "Alien", "--sort",
            "origin", "--pages", "2", "--lang", "es",
        ])
        .unwrap();

        assert!(cli.demo);
        assert_eq!(cli.lang, Some(Locale::Es));
        let Some(Commands::List(args)) = cli.command else {
            panic!("expected list subcommand");
        };
        assert_eq!(args.status, Some(StatusArg::Only(Status::Dead)));
        assert_eq!(args.species.as_deref(), Some("Alien"));
        assert_eq!(args.sort, Some(SortKey::OriginName));
        assert_eq!(args.pages, Some(2));
    }

    #[test]
    fn test_rejects_unknown_status() {
        assert!(Cli::try_parse_from(["mortydex", "list", "--status", "zombie"]).is_err());
        assert!(Cli::try_parse_from(["mortydex", "--lang", "fr"]).is_err());
        assert!(Cli::try_parse_from(["mortydex", "list", "--pages", "0"]).is_err());
    }

    #[test]
    fn test_status_all_clears_config_filter() {
        let mut config = Config::default();
        config.filters = FilterState::new(Some(Status::Alive), Some("Human".into()));

        let args = ListArgs {
            status: Some(StatusArg::All),
            ..Default::default()
        };
        let filters = list_filters(&args, &config);
        assert_eq!(filters.status, None);
        assert_eq!(filters.species.as_deref(), Some("Human"));
    }

    #[test]
    fn test_format_table_translates_labels() {
        let mut rick = crate::model::character("1", "Rick Sanchez", "Earth (C-137)");
        rick.status = Status::Alive;
        rick.gender = "Male".into();

        let table = format_table(&[rick], &Translator::new(Locale::De));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Name"));
        assert!(lines[0].contains("Herkunft"));
        assert!(lines[1].contains("Lebendig"));
        assert!(lines[1].contains("Männlich"));
    }

    #[tokio::test]
    async fn test_run_list_walks_demo_pages() {
        let mut config = Config::default();
        config.demo_mode = true;
        let service: SharedQueryService = Arc::new(DemoService::new(5));

        let args = ListArgs {
            pages: Some(2),
            json: true,
            ..Default::default()
        };
        run_list(args, &config, service.clone()).await.unwrap();

        let failing: SharedQueryService = Arc::new(DemoService::new(5).with_failing_page(1));
        assert!(run_list(ListArgs::default(), &config, failing).await.is_err());
    }
}
