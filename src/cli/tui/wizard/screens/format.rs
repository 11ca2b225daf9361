use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{header, hint};
use crate::cli::tui::wizard::state::{Step, Wizard};
use crate::cli::tui::wizard::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, wizard: &Wizard, theme: &Theme) {
    let button = |label: &'static str, active: bool| {
        let style = if active { theme.button_active } else { theme.button };
        Span::styled(format!("  {}  ", label), style)
    };

    let lines = vec![
        header(Step::Format, "Choose Output Format", theme),
        Line::from(""),
        Line::from(vec![
            button("PNG", wizard.format_index == 0),
            Span::raw("  "),
            button("SVG", wizard.format_index == 1),
        ]),
        Line::from(""),
        hint("PNG: Raster image, best for most uses", theme),
        hint("SVG: Vector format, scales infinitely", theme),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}
