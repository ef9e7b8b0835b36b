//! Character list component
//!
//! Renders the sorted view with one row per character, followed by a
//! footer row that doubles as the load-more sentinel: whenever the footer is
//! inside the viewport the feed is asked for another page.
//!
//! Columns adapt to width: name and status always, species from
//! [`Breakpoint::Normal`], gender and origin from [`Breakpoint::Wide`].

use super::scrollbar::render_scrollbar;
use crate::feed::FeedState;
use crate::model::Character;
use crate::tui::app::{App, ListFrame};
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Render the list and record whether the sentinel row was visible
pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let breakpoint = Breakpoint::from_width(area.width);
    let viewport = area.height.saturating_sub(2) as usize;

    let frame = app.list_frame();
    let count = frame.items.len();

    // Footer row sits at index `count`
    frame.scroll.update_dimensions(count + 1, viewport);
    frame.scroll.ensure_visible(frame.selected);
    if frame.selected + 1 == count {
        frame.scroll.ensure_visible(count);
    }
    let sentinel_visible = frame.scroll.is_visible(count);

    let (start, end) = frame.scroll.visible_range();
    let widths = ColumnWidths::for_area(area.width.saturating_sub(4), breakpoint);

    let mut rows: Vec<ListItem> = (start..end.min(count))
        .map(|i| {
            let line = character_line(&frame, &frame.items[i], &widths, breakpoint);
            if i == frame.selected {
                ListItem::new(line).style(frame.theme.selected_style())
            } else {
                ListItem::new(line)
            }
        })
        .collect();
    if sentinel_visible {
        rows.push(ListItem::new(footer_line(&frame, count)));
    }

    let title = format!(
        " {} ({}) ",
        frame.translator.translate("characters"),
        count
    );
    let list = List::new(rows).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(frame.theme.border_type)
            .border_style(frame.theme.border_style())
            .title(title),
    );

    f.render_widget(list, area);
    render_scrollbar(f, area, frame.scroll);

    app.sentinel_visible = sentinel_visible;
}

struct ColumnWidths {
    name: usize,
    status: usize,
    species: usize,
    gender: usize,
}

impl ColumnWidths {
    fn for_area(width: u16, breakpoint: Breakpoint) -> Self {
        let width = width as usize;
        match breakpoint {
            Breakpoint::Compact => Self {
                name: width.saturating_sub(16).max(8),
                status: 12,
                species: 0,
                gender: 0,
            },
            Breakpoint::Normal => Self {
                name: (width / 2).max(12),
                status: 12,
                species: 18,
                gender: 0,
            },
            Breakpoint::Wide => Self {
                name: 32,
                status: 12,
                species: 20,
                gender: 14,
            },
        }
    }
}

/// Cut `text` to at most `width` columns (with an ellipsis) and pad to width
fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return format!("{}{}", text, " ".repeat(width - text.width()));
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

fn character_line<'a>(
    frame: &ListFrame<'_>,
    character: &'a Character,
    widths: &ColumnWidths,
    breakpoint: Breakpoint,
) -> Line<'a> {
    let t = frame.translator;
    let theme = frame.theme;
    let status_color = theme.status_color(character.status);

    let mut spans = vec![
        Span::styled(" ● ", Style::default().fg(status_color)),
        Span::styled(
            fit(&character.name, widths.name),
            Style::default()
                .fg(theme.foreground)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            fit(t.status_label(character.status), widths.status),
            Style::default().fg(status_color),
        ),
    ];

    if breakpoint.at_least(Breakpoint::Normal) {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            fit(&character.species, widths.species),
            Style::default().fg(theme.foreground),
        ));
    }
    if breakpoint.at_least(Breakpoint::Wide) {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            fit(t.gender_label(&character.gender), widths.gender),
            Style::default().fg(theme.muted),
        ));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            character.origin.name.as_str(),
            Style::default().fg(theme.muted),
        ));
    }

    Line::from(spans)
}

/// Loading / error / end-of-list indicator
fn footer_line(frame: &ListFrame<'_>, count: usize) -> Line<'static> {
    let t = frame.translator;
    let theme = frame.theme;

    match frame.feed.state() {
        FeedState::Loading => Line::from(Span::styled(
            format!(" {} {}", frame.spinner, t.translate("loading")),
            Style::default().fg(theme.loading),
        )),
        FeedState::Error(message) => Line::from(vec![
            Span::styled(
                format!(" ✗ {}: {}", t.translate("error"), message),
                Style::default().fg(theme.error),
            ),
            Span::styled(
                format!("  [r] {}", t.translate("help.retry")),
                Style::default().fg(theme.muted),
            ),
        ]),
        FeedState::Idle if !frame.feed.has_next() => {
            let key = if count == 0 { "no_results" } else { "end_of_list" };
            Line::from(Span::styled(
                format!(" {}", t.translate(key)),
                Style::default()
                    .fg(theme.muted)
                    .add_modifier(Modifier::ITALIC),
            ))
        }
        FeedState::Idle => Line::from(Span::styled(" ···", Style::default().fg(theme.muted))),
    }
}
