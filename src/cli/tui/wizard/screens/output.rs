use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{header, hint, menu_marker, text_field_line};
use crate::cli::tui::wizard::file_picker::FilePicker;
use crate::cli::tui::wizard::state::{Step, Wizard};
use crate::cli::tui::wizard::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, wizard: &Wizard, theme: &Theme) {
    let mut lines = vec![header(Step::Output, "Output Location", theme), Line::from("")];

    if wizard.file_browser_active {
        lines.extend(file_picker_lines(&wizard.file_picker, theme));
    } else {
        lines.push(Line::from(Span::styled("Filename or path:", theme.label_focused)));
        lines.push(text_field_line(&wizard.output_input, true, theme));
        lines.push(Line::from(""));
        lines.push(hint("Leave empty for 'qrcode' in current directory", theme));
        lines.push(hint("Use ~ for home directory, e.g., ~/Downloads/myqr", theme));
        lines.push(hint("Press Tab to browse files", theme));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn file_picker_lines<'a>(picker: &'a FilePicker, theme: &Theme) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::from(Span::styled(format!("📂 {}", picker.display_dir()), theme.label_focused)),
        Line::from(""),
    ];

    if picker.in_name_mode() {
        lines.push(Line::from(Span::styled("Filename:", theme.label_focused)));
        lines.push(text_field_line(picker.name_input(), true, theme));
        lines.push(Line::from(""));
        lines.push(hint("Press Esc to go back to browsing", theme));
        return lines;
    }

    if let Some(error) = picker.error() {
        lines.push(Line::from(Span::styled(
            format!("⚠ Cannot read directory: {}", error),
            theme.error,
        )));
        lines.push(hint("Press Backspace to go to parent directory", theme));
        return lines;
    }

    if picker.entries().is_empty() {
        lines.push(hint("  (empty directory)", theme));
    } else {
        if picker.has_more_above() {
            lines.push(hint("  ↑ more items above", theme));
        }
        for (i, entry) in picker.visible_entries() {
            let icon = if entry.is_parent() {
                "⬆ "
            } else if entry.is_dir {
                "📁"
            } else {
                "📄"
            };
            let (marker, style) = menu_marker(i == picker.cursor(), theme);
            lines.push(Line::from(Span::styled(
                format!("{}{} {}", marker, icon, entry.name),
                style,
            )));
        }
        if picker.has_more_below() {
            lines.push(hint("  ↓ more items below", theme));
        }
    }

    lines.push(Line::from(""));
    lines.push(hint("Press 'n' to enter a filename · '~' to go home", theme));
    lines
}
