use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{header, text_field_line};
use crate::cli::tui::wizard::state::{Step, Wizard};
use crate::cli::tui::wizard::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, wizard: &Wizard, theme: &Theme) {
    let lines = vec![
        header(Step::Url, "Enter URL or Text", theme),
        Line::from(""),
        Line::from(Span::styled("Content:", theme.label_focused)),
        text_field_line(&wizard.content_input, true, theme),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}
