use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{header, hint, text_field_line};
use crate::cli::tui::wizard::state::{Step, Wizard};
use crate::cli::tui::wizard::theme::Theme;
use crate::config::{MAX_SIZE, MIN_SIZE};

pub fn render(frame: &mut Frame, area: Rect, wizard: &Wizard, theme: &Theme) {
    let lines = vec![
        header(Step::Size, "Set Dimensions", theme),
        Line::from(""),
        Line::from(Span::styled(
            format!("Size ({}-{} pixels):", MIN_SIZE, MAX_SIZE),
            theme.label_focused,
        )),
        text_field_line(&wizard.size_input, true, theme),
        Line::from(""),
        hint(
            format!("Leave empty for default ({}px)", wizard.settings().default_size),
            theme,
        ),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}
