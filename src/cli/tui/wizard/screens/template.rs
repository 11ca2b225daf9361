use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{header, hint, text_field_line};
use crate::cli::tui::wizard::state::{Step, Wizard};
use crate::cli::tui::wizard::template_form::FieldView;
use crate::cli::tui::wizard::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, wizard: &Wizard, theme: &Theme) {
    let content_type = wizard.content_type();
    let mut lines = vec![
        header(
            Step::Template,
            &format!("{} {} Details", content_type.icon(), content_type.name()),
            theme,
        ),
        Line::from(""),
    ];

    let Some(template) = &wizard.template else {
        frame.render_widget(Paragraph::new(lines), area);
        return;
    };

    let form = &template.form;
    for index in 0..form.field_count() {
        let focused = index == template.focus();
        let label_style = if focused { theme.label_focused } else { theme.label };
        let label = form.field_label(index);

        match form.field_view(index) {
            Some(FieldView::Text(field)) => {
                lines.push(Line::from(Span::styled(label, label_style)));
                lines.push(text_field_line(field, focused, theme));
            }
            Some(FieldView::Selector(options, selected)) => {
                lines.push(Line::from(Span::styled(label, label_style)));
                let mut spans = Vec::with_capacity(options.len() * 2);
                for (i, option) in options.into_iter().enumerate() {
                    let style = if i == selected {
                        theme.button_active
                    } else {
                        theme.button
                    };
                    spans.push(Span::styled(format!(" {} ", option), style));
                    spans.push(Span::raw(" "));
                }
                lines.push(Line::from(spans));
            }
            Some(FieldView::Toggle(on)) => {
                let state = if on { "● Yes" } else { "○ No" };
                lines.push(Line::from(vec![
                    Span::styled(format!("{} ", label), label_style),
                    Span::styled(state, label_style),
                ]));
            }
            None => {}
        }
        lines.push(Line::from(""));
    }

    lines.push(hint(
        "Tab/↓: Next field • Shift+Tab/↑: Previous • Enter: Confirm",
        theme,
    ));
    frame.render_widget(Paragraph::new(lines), area);
}
