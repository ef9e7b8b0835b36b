// Filter bar component
//
// One line of controls: status choices, species text, sort key, language.
// The active choice of each group is highlighted; the species field shows a
// cursor while it is being edited.

use crate::model::{SortKey, Status};
use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let t = &app.translator;
    let theme = &app.theme;
    let compact = !Breakpoint::from_width(area.width).at_least(Breakpoint::Normal);

    let label = Style::default().fg(theme.muted);
    let active = Style::default()
        .fg(theme.highlight)
        .add_modifier(Modifier::BOLD | Modifier::REVERSED);
    let inactive = Style::default().fg(theme.foreground);
    let separator = Span::styled("  │  ", Style::default().fg(theme.border));

    let mut spans = vec![Span::styled(format!(" {}: ", t.translate("filters.status")), label)];

    // Status group: All plus each status
    let current_status = app.feed.filters().status;
    let mut options: Vec<(Option<Status>, &str)> = vec![(None, t.translate("filters.all"))];
    options.extend(Status::all().iter().map(|&s| (Some(s), t.status_label(s))));
    for (value, text) in options {
        if compact && value != current_status {
            continue;
        }
        let style = if value == current_status { active } else { inactive };
        spans.push(Span::styled(format!(" {} ", text), style));
    }

    spans.push(separator.clone());
    spans.push(Span::styled(format!("{}: ", t.translate("filters.species")), label));
    match &app.species_input {
        Some(input) => {
            spans.push(Span::styled(
                format!("{}▏", input),
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::UNDERLINED),
            ));
        }
        None => match &app.feed.filters().species {
            Some(species) => spans.push(Span::styled(species.clone(), active)),
            None => spans.push(Span::styled(
                t.translate("filters.species_placeholder").to_string(),
                Style::default()
                    .fg(theme.muted)
                    .add_modifier(Modifier::ITALIC),
            )),
        },
    }

    spans.push(separator.clone());
    spans.push(Span::styled(format!("{}: ", t.translate("sorting.title")), label));
    for key in [SortKey::Name, SortKey::OriginName] {
        if compact && key != app.sort {
            continue;
        }
        let text = match key {
            SortKey::Name => t.translate("sorting.name"),
            SortKey::OriginName => t.translate("sorting.origin"),
        };
        let style = if key == app.sort { active } else { inactive };
        spans.push(Span::styled(format!(" {} ", text), style));
    }

    if !compact {
        spans.push(separator);
        spans.push(Span::styled(format!("{}: ", t.translate("language")), label));
        spans.push(Span::styled(
            t.locale().native_name().to_string(),
            inactive,
        ));
    }

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(theme.border_style())
            .title(format!(" {} ", t.translate("filters.title"))),
    );

    f.render_widget(bar, area);
}
