// Title bar component
//
// App title and subtitle in the active language, with a spinner while a
// page is loading.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let t = &app.translator;
    let theme = &app.theme;

    let mut spans = vec![
        Span::styled(format!(" 🧪 {}", t.translate("title")), theme.title_style()),
        Span::styled(
            format!("  {}", t.translate("subtitle")),
            Style::default().fg(theme.muted),
        ),
    ];
    if app.feed.is_loading() {
        spans.push(Span::styled(
            format!("  {} {}", app.spinner_char(), t.translate("loading")),
            Style::default().fg(theme.loading),
        ));
    }

    let title = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.highlight))
            .title_top(Line::from(" ? ").right_aligned()),
    );

    f.render_widget(title, area);
}
