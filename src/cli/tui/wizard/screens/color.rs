use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{header, hint, menu_marker, text_field_line};
use crate::cli::tui::wizard::state::{Step, Wizard};
use crate::cli::tui::wizard::theme::Theme;
use crate::config::PALETTE;

/// Shared by the foreground and background steps
pub fn render(frame: &mut Frame, area: Rect, wizard: &Wizard, theme: &Theme) {
    let (picker, title) = if wizard.step == Step::ForegroundColor {
        (&wizard.foreground, "Foreground Color")
    } else {
        (&wizard.background, "Background Color")
    };

    let mut lines = vec![header(wizard.step, title, theme), Line::from("")];

    if picker.custom {
        lines.push(Line::from(Span::styled("Enter hex color:", theme.label_focused)));
        lines.push(text_field_line(&picker.input, true, theme));
        lines.push(Line::from(""));
        lines.push(hint("Press ESC to go back to color selection", theme));
    } else {
        for (i, (name, color)) in PALETTE.iter().enumerate() {
            let (marker, style) = menu_marker(i == picker.index, theme);
            lines.push(Line::from(vec![
                Span::styled(marker, style),
                Span::styled("  ", Theme::swatch(*color)),
                Span::styled(format!(" {}", name), style),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(hint("Press 'c' for custom hex color", theme));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
