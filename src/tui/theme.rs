// Colors for the TUI
//
// One palette, tuned for dark terminals: purple accents from the portal
// gradient, and the usual traffic-light colors for character status.

use crate::logging::LogLevel;
use crate::model::Status;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

/// Complete theme definition with all UI colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub foreground: Color,
    pub background: Color,
    pub muted: Color,
    pub border: Color,
    pub border_type: BorderType,

    // Accents
    pub title: Color,
    pub highlight: Color,
    pub selection: Color,
    pub selection_fg: Color,

    // Character status
    pub status_alive: Color,
    pub status_dead: Color,
    pub status_unknown: Color,

    // Feed state
    pub loading: Color,
    pub error: Color,

    // Log levels
    pub log_error: Color,
    pub log_warn: Color,
    pub log_info: Color,
    pub log_debug: Color,
    pub log_trace: Color,
}

impl Theme {
    /// Default dark palette
    pub fn portal() -> Self {
        Self {
            foreground: Color::Rgb(0xe6, 0xe6, 0xf0),
            background: Color::Reset,
            muted: Color::Rgb(0x8a, 0x8a, 0xa0),
            border: Color::Rgb(0x5a, 0x4a, 0x8a),
            border_type: BorderType::Rounded,
            title: Color::Rgb(0xb3, 0x9d, 0xdb),
            highlight: Color::Rgb(0x9c, 0x6a, 0xde),
            selection: Color::Rgb(0x4a, 0x2f, 0x7a),
            selection_fg: Color::White,
            status_alive: Color::Rgb(0x4c, 0xaf, 0x50),
            status_dead: Color::Rgb(0xf4, 0x43, 0x36),
            status_unknown: Color::Rgb(0x9e, 0x9e, 0x9e),
            loading: Color::Rgb(0x97, 0xce, 0x4c),
            error: Color::Rgb(0xf4, 0x43, 0x36),
            log_error: Color::Red,
            log_warn: Color::Yellow,
            log_info: Color::Rgb(0xb3, 0x9d, 0xdb),
            log_debug: Color::Rgb(0x8a, 0x8a, 0xa0),
            log_trace: Color::DarkGray,
        }
    }

    pub fn status_color(&self, status: Status) -> Color {
        match status {
            Status::Alive => self.status_alive,
            Status::Dead => self.status_dead,
            Status::Unknown => self.status_unknown,
        }
    }

    pub fn log_level_style(&self, level: LogLevel) -> Style {
        let color = match level {
            LogLevel::Error => self.log_error,
            LogLevel::Warn => self.log_warn,
            LogLevel::Info => self.log_info,
            LogLevel::Debug => self.log_debug,
            LogLevel::Trace => self.log_trace,
        };
        Style::default().fg(color)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.title)
            .add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::portal()
    }
}
