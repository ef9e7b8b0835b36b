//! Logs panel component
//!
//! Tail of the in-memory log buffer, colour-coded by level. Toggled with `L`.

use crate::logging::LogEntry;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

const EMPTY_PLACEHOLDER: &str = "  (no log entries yet)";

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let height = area.height.saturating_sub(2) as usize;
    let entries = app.log_buffer.recent(height);

    let items: Vec<ListItem> = if app.log_buffer.is_empty() {
        vec![ListItem::new(EMPTY_PLACEHOLDER).style(Style::default().fg(theme.muted))]
    } else {
        entries
            .iter()
            .map(|entry| {
                ListItem::new(format_log_entry(entry)).style(theme.log_level_style(entry.level))
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(theme.border_style())
            .title(format!(" Logs ({}) ", app.log_buffer.len())),
    );

    f.render_widget(list, area);
}

fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}: {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.target,
        entry.message
    )
}
