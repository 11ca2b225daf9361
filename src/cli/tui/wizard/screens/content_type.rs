use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{header, menu_marker};
use crate::cli::tui::wizard::state::{Step, Wizard};
use crate::cli::tui::wizard::theme::Theme;
use crate::templates::ContentType;

pub fn render(frame: &mut Frame, area: Rect, wizard: &Wizard, theme: &Theme) {
    let mut lines = vec![
        header(Step::ContentType, "What do you want to encode?", theme),
        Line::from(""),
    ];

    for (i, content_type) in ContentType::ALL.iter().enumerate() {
        let selected = i == wizard.content_type_index;
        let (marker, style) = menu_marker(selected, theme);
        lines.push(Line::from(vec![
            Span::styled(marker, style),
            Span::styled(format!("{} {}", content_type.icon(), content_type.name()), style),
            Span::styled(
                format!(" - {}", content_type.description()),
                if selected { theme.selected } else { theme.muted },
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
