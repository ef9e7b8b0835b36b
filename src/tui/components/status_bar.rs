// Status bar component
//
// Renders fetch statistics at the bottom: loaded count, page, requests,
// failures, stale drops, average latency, uptime, backend.

use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the status bar
///
/// Adapts to terminal width:
/// - Wide: labelled counters plus backend name
/// - Narrow: icon-based format
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let stats = &app.stats;
    let bp = Breakpoint::from_width(area.width);
    let loaded = app.feed.characters().len();
    // Cursor points at the next page to fetch
    let page = app.feed.cursor().saturating_sub(1);

    let status_text = if !bp.at_least(Breakpoint::Wide) {
        format!(
            " {} │ 👥 {} │ 📄 {} │ 📡 {} │ ✗ {} │ ~{}ms",
            app.uptime(),
            loaded,
            page,
            stats.total_requests,
            stats.failed,
            stats.avg_duration().as_millis(),
        )
    } else {
        let drops = if stats.stale_dropped > 0 || stats.duplicates_dropped > 0 {
            format!(
                " │ stale {} · dup {}",
                stats.stale_dropped, stats.duplicates_dropped
            )
        } else {
            String::new()
        };
        format!(
            " {} │ {} {} │ page {} │ 📡 {} ✓ {} ✗ {}{} │ ~{}ms │ {}",
            app.uptime(),
            loaded,
            app.translator.translate("characters"),
            page,
            stats.total_requests,
            stats.successful,
            stats.failed,
            drops,
            stats.avg_duration().as_millis(),
            app.service_name(),
        )
    };

    let mut spans = vec![Span::styled(status_text, Style::default().fg(app.theme.muted))];
    if let Some(error) = app.feed.error() {
        spans.push(Span::styled(
            format!(" │ {}: {}", app.translator.translate("error"), error),
            Style::default().fg(app.theme.error),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(app.theme.border_style()),
    );

    f.render_widget(status, area);
}
