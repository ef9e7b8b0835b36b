// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, finished fetches)
// - Rendering the UI and feeding sentinel visibility back to the feed

pub mod app;
pub mod clipboard;
pub mod components;
pub mod input;
pub mod layout;
pub mod modal;
pub mod scroll;
pub mod theme;
pub mod views;

use crate::config::Config;
use crate::events::FeedEvent;
use crate::logging::LogBuffer;
use crate::model::SortKey;
use crate::query::SharedQueryService;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::ModalAction;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Finished fetches waiting for the UI loop
const FEED_CHANNEL_CAPACITY: usize = 32;

/// Run the TUI
///
/// Sets up the terminal, issues the first page request, runs the event loop
/// and restores the terminal when done.
pub async fn run_tui(
    config: &Config,
    service: SharedQueryService,
    log_buffer: LogBuffer,
) -> Result<()> {
    let (feed_tx, mut feed_rx) = mpsc::channel(FEED_CHANNEL_CAPACITY);
    let mut app = App::new(config, service, log_buffer, feed_tx);

    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    app.start();

    let result = run_event_loop(&mut terminal, &mut app, &mut feed_rx).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Each iteration draws a frame, lets the sentinel observe what was drawn,
/// then waits on whichever comes first:
/// 1. Keyboard or mouse input
/// 2. A timer tick (spinner animation, toast expiry)
/// 3. A finished page fetch
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    feed_rx: &mut mpsc::Receiver<FeedEvent>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(100));

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        // The renderer just recorded whether the end-of-list row is on screen
        app.check_sentinel();

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        _ => {}
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick_animation();
            }

            Some(feed_event) = feed_rx.recv() => {
                app.handle_feed_event(feed_event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Modal → Species editor → Global → List navigation
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind == KeyEventKind::Release {
        app.handle_key_release(key_event.code);
        return;
    }
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    if handle_modal_input(app, &key_event) {
        return;
    }

    // Typing a species swallows every key until Enter or Esc
    if app.species_input.is_some() {
        app.species_edit_key(key_event.code);
        return;
    }

    if handle_global_keys(app, &key_event) {
        return;
    }

    handle_navigation(app, key_event.code);
}

fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    if app.modal.is_some() || app.species_input.is_some() {
        return;
    }
    match mouse_event.kind {
        MouseEventKind::ScrollUp => app.select_previous(),
        MouseEventKind::ScrollDown => app.select_next(),
        _ => {}
    }
}

/// Handle modal input - returns true if a modal absorbed the input
fn handle_modal_input(app: &mut App, key_event: &KeyEvent) -> bool {
    let Some(modal) = app.modal.as_ref() else {
        return false;
    };

    match modal.handle_input(key_event.code) {
        ModalAction::None => {}
        ModalAction::Close => app.modal = None,
        ModalAction::Copy => {
            if let Some(character) = modal.character().cloned() {
                app.copy_character(&character);
            }
        }
    }
    true
}

/// Handle global keys - returns true if the key was consumed
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    let key = key_event.code;

    let action: fn(&mut App) = match key {
        KeyCode::Char('q') => |app| app.should_quit = true,
        KeyCode::Char('?') => App::open_help,
        KeyCode::Char('s') => App::cycle_status,
        KeyCode::Char('p') => App::cycle_species_preset,
        KeyCode::Char('/') => App::begin_species_edit,
        KeyCode::Char('t') => App::toggle_sort,
        KeyCode::Char('n') => |app| app.set_sort(SortKey::Name),
        KeyCode::Char('o') => |app| app.set_sort(SortKey::OriginName),
        KeyCode::Char('l') => App::cycle_locale,
        KeyCode::Char('r') => App::retry,
        KeyCode::Char('y') => App::copy_selected,
        KeyCode::Char('L') => |app| app.show_logs = !app.show_logs,
        KeyCode::Enter => App::open_detail,
        _ => return false,
    };

    if app.handle_key_press(key) {
        action(app);
    }
    true
}

fn handle_navigation(app: &mut App, key: KeyCode) {
    if !app.handle_key_press(key) {
        return;
    }
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::PageDown => app.page_down(),
        KeyCode::PageUp => app.page_up(),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),
        _ => {}
    }
}
