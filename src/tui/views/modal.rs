// Modal overlay rendering
//
// - Help modal: keyboard shortcuts in the active language
// - Detail modal: every field of one character

use crate::model::Character;
use crate::tui::app::App;
use crate::tui::modal::Modal;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, modal: &Modal, app: &App) {
    match modal {
        Modal::Help => render_help(f, app),
        Modal::Detail(character) => render_detail(f, app, character),
    }
}

/// Calculate centered rect for modal dialog
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

const HELP_KEYS: &[(&str, &str)] = &[
    ("↑/↓, j/k", "help.navigate"),
    ("s", "help.status"),
    ("p", "help.species"),
    ("/", "help.species_edit"),
    ("t", "help.sort"),
    ("l", "help.language"),
    ("r", "help.retry"),
    ("Enter", "help.details"),
    ("y", "help.copy"),
    ("L", "help.logs"),
    ("q", "help.quit"),
];

fn render_help(f: &mut Frame, app: &App) {
    let t = &app.translator;
    let key_style = Style::default().fg(app.theme.highlight);
    let desc_style = Style::default().fg(app.theme.foreground);

    let mut lines = vec![Line::raw("")];
    lines.extend(HELP_KEYS.iter().map(|(key, desc)| {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<12}", key), key_style),
            Span::styled(t.translate(desc), desc_style),
        ])
    }));

    let width = 52;
    let height = lines.len() as u16 + 3;
    let area = centered_rect(width, height, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(Text::from(lines))
        .style(Style::default().bg(app.theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.highlight))
                .border_type(app.theme.border_type)
                .title(format!(" {} ", t.translate("help.title")))
                .title_bottom(Line::from(" ? / Esc ").centered()),
        );

    f.render_widget(paragraph, area);
}

fn render_detail(f: &mut Frame, app: &App, character: &Character) {
    let t = &app.translator;
    let theme = &app.theme;
    let label = Style::default().fg(theme.muted);
    let value = Style::default().fg(theme.foreground);

    let field = |key: &str, text: String, style: Style| -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("  {:<12}", t.translate(key)), label),
            Span::styled(text, style),
        ])
    };

    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            format!("  {}", character.name),
            theme.title_style().add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        field(
            "character.status",
            format!("● {}", t.status_label(character.status)),
            Style::default().fg(theme.status_color(character.status)),
        ),
        field("character.species", character.species.clone(), value),
        field(
            "character.gender",
            t.gender_label(&character.gender).to_string(),
            value,
        ),
        field("character.origin", character.origin.name.clone(), value),
        Line::from(vec![
            Span::styled(format!("  {:<12}", "ID"), label),
            Span::styled(character.id.clone(), label),
        ]),
    ];

    let width = 56;
    let height = lines.len() as u16 + 3;
    let area = centered_rect(width, height, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .style(Style::default().bg(theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.highlight))
                .border_type(theme.border_type)
                .title(format!(" {} ", t.translate("help.details")))
                .title_bottom(Line::from(" y copy · Esc close ").centered()),
        );

    f.render_widget(paragraph, area);
}
