// Views module - screen-level rendering
//
// One screen: title, filter bar, character list, optional logs, status.
// Modals and the toast are drawn on top.

mod modal;

use super::app::{App, LOGS_PANEL_HEIGHT};
use crate::tui::components::{
    characters_panel, filter_bar, logs_panel, status_bar, title_bar,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, f.area());

    let mut constraints = vec![
        Constraint::Length(3), // Title
        Constraint::Length(3), // Filters
        Constraint::Min(5),    // Characters
    ];
    if app.show_logs {
        constraints.push(Constraint::Length(LOGS_PANEL_HEIGHT));
    }
    constraints.push(Constraint::Length(2)); // Status

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    title_bar::render(f, chunks[0], app);
    filter_bar::render(f, chunks[1], app);
    characters_panel::render(f, chunks[2], app);
    if app.show_logs {
        logs_panel::render(f, chunks[3], app);
    }
    status_bar::render(f, chunks[chunks.len() - 1], app);

    if let Some(modal_state) = &app.modal {
        modal::render(f, modal_state, app);
    }

    if let Some(ref toast) = app.toast {
        let area = f.area();
        toast.render(f, area, &app.theme);
    }

    app.clear_expired_toast();
}
