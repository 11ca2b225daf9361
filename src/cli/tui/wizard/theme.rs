use ratatui::style::{Color, Modifier, Style};

use crate::config::Rgb;
use crate::generator::terminal::Shade;

/// Consistent theme for the wizard
pub struct Theme {
    pub title: Style,
    pub subtitle: Style,
    pub header: Style,
    pub selected: Style,
    pub option: Style,
    pub label: Style,
    pub label_focused: Style,
    pub input: Style,
    pub placeholder: Style,
    pub button: Style,
    pub button_active: Style,
    pub error: Style,
    pub success: Style,
    pub muted: Style,
    pub step_done: Style,
    pub step_active: Style,
    pub help_bar: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(125, 86, 244))
                .add_modifier(Modifier::BOLD),
            subtitle: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            header: Style::default()
                .fg(Color::Rgb(125, 86, 244))
                .add_modifier(Modifier::BOLD),
            selected: Style::default()
                .fg(Color::Rgb(125, 86, 244))
                .add_modifier(Modifier::BOLD),
            option: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            label_focused: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            input: Style::default().fg(Color::White),
            placeholder: Style::default().fg(Color::DarkGray),
            button: Style::default().fg(Color::Gray).bg(Color::Rgb(60, 60, 60)),
            button_active: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(125, 86, 244))
                .add_modifier(Modifier::BOLD),
            error: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            success: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            muted: Style::default().fg(Color::DarkGray),
            step_done: Style::default().fg(Color::Green),
            step_active: Style::default()
                .fg(Color::Rgb(125, 86, 244))
                .add_modifier(Modifier::BOLD),
            help_bar: Style::default().fg(Color::Gray).bg(Color::DarkGray),
        }
    }
}

impl Theme {
    /// Swatch style for a palette color
    pub fn swatch(color: Rgb) -> Style {
        Style::default().bg(Color::Rgb(color.r, color.g, color.b))
    }

    /// Terminal color for one half of a preview cell
    pub fn shade_color(shade: Shade) -> Color {
        match shade {
            Shade::Black => Color::Black,
            Shade::BrightWhite => Color::White,
        }
    }
}
