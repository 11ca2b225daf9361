/// Screen modules for the wizard
pub mod color;
pub mod complete;
pub mod confirm;
pub mod content;
pub mod content_type;
pub mod format;
pub mod output;
pub mod size;
pub mod template;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use super::state::{Step, Wizard, TOTAL_VISIBLE_STEPS};
use super::text_field::TextField;
use super::theme::Theme;

/// Draw the whole wizard: title, progress, step body, error and help bar
pub fn render(frame: &mut Frame, wizard: &Wizard, theme: &Theme) {
    let progress_height = if wizard.step.shows_progress() { 2 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),               // Title and subtitle
            Constraint::Length(progress_height), // Progress bar
            Constraint::Min(0),                  // Step content
            Constraint::Length(1),               // Error line
            Constraint::Length(1),               // Help bar
        ])
        .split(frame.area());

    render_title(frame, chunks[0], theme);
    if wizard.step.shows_progress() {
        render_progress(frame, chunks[1], wizard.step, theme);
    }

    let body = Block::default()
        .borders(Borders::NONE)
        .padding(Padding::horizontal(2));
    let body_area = body.inner(chunks[2]);
    frame.render_widget(body, chunks[2]);

    match wizard.step {
        Step::ContentType => content_type::render(frame, body_area, wizard, theme),
        Step::Url => content::render(frame, body_area, wizard, theme),
        Step::Template => template::render(frame, body_area, wizard, theme),
        Step::Format => format::render(frame, body_area, wizard, theme),
        Step::ForegroundColor | Step::BackgroundColor => color::render(frame, body_area, wizard, theme),
        Step::Size => size::render(frame, body_area, wizard, theme),
        Step::Output => output::render(frame, body_area, wizard, theme),
        Step::Confirm => confirm::render(frame, body_area, wizard, theme),
        Step::Complete => complete::render(frame, body_area, wizard, theme),
    }

    if let Some(error) = &wizard.error {
        let line = Line::from(Span::styled(format!("  ⚠ {}", error), theme.error));
        frame.render_widget(Paragraph::new(line), chunks[3]);
    }

    render_help(frame, chunks[4], help_text(wizard), theme);
}

fn render_title(frame: &mut Frame, area: Rect, theme: &Theme) {
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("  QR Code Generator  ", theme.title),
        ]),
        Line::from(Span::styled(
            "  Create beautiful QR codes from your terminal",
            theme.subtitle,
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_progress(frame: &mut Frame, area: Rect, step: Step, theme: &Theme) {
    let current = step.display_number();
    let mut spans = vec![Span::raw("  ")];

    for i in 1..=TOTAL_VISIBLE_STEPS {
        let (marker, style) = if i < current {
            ("✓", theme.step_done)
        } else if i == current {
            ("●", theme.step_active)
        } else {
            ("○", theme.muted)
        };
        spans.push(Span::styled(format!(" {} ", marker), style));

        if i < TOTAL_VISIBLE_STEPS {
            let style = match i.cmp(&current) {
                std::cmp::Ordering::Less => theme.step_done,
                std::cmp::Ordering::Equal => theme.step_active,
                std::cmp::Ordering::Greater => theme.muted,
            };
            spans.push(Span::styled("───", style));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help(frame: &mut Frame, area: Rect, text: &str, theme: &Theme) {
    let help = Paragraph::new(Line::from(format!(" {} ", text)))
        .alignment(Alignment::Center)
        .style(theme.help_bar);
    frame.render_widget(help, area);
}

/// Key hints for the current step and sub-mode
pub fn help_text(wizard: &Wizard) -> &'static str {
    match wizard.step {
        Step::ContentType => "↑/↓: Select • Enter/Space: Confirm • Ctrl+C: Quit",
        Step::Url | Step::Size => "Enter: Confirm • Esc: Back • Ctrl+C: Quit",
        Step::Template => {
            "Tab/↓: Next field • Shift+Tab/↑: Prev • Enter: Confirm • Esc: Back • Ctrl+C: Quit"
        }
        Step::Format => "←/→: Select • Enter/Space: Confirm • Esc: Back • Ctrl+C: Quit",
        Step::ForegroundColor | Step::BackgroundColor => {
            let picker = if wizard.step == Step::ForegroundColor {
                &wizard.foreground
            } else {
                &wizard.background
            };
            if picker.custom {
                "Enter: Confirm • Esc: Cancel custom color • Ctrl+C: Quit"
            } else {
                "↑/↓: Select • Enter/Space: Confirm • C: Custom color • Esc: Back • Ctrl+C: Quit"
            }
        }
        Step::Output if wizard.file_browser_active => {
            if wizard.file_picker.in_name_mode() {
                "Enter: Confirm • Esc: Back to browsing • Ctrl+C: Quit"
            } else {
                "↑/↓: Navigate • Enter: Open/Select • N: New filename • ~: Home • Tab: Manual input • Ctrl+C: Quit"
            }
        }
        Step::Output => "Enter: Confirm • Tab: Browse files • Esc: Back • Ctrl+C: Quit",
        Step::Confirm => "Y/Enter: Generate • N: Start over • Esc: Previous step • Ctrl+C: Quit",
        Step::Complete => "R: Create another • Q/Enter: Exit",
    }
}

/// Step heading, e.g. "Step 3: Choose Output Format"
pub fn header<'a>(step: Step, title: &str, theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(
        format!("Step {}: {}", step.display_number(), title),
        theme.header,
    ))
}

/// Render a text field as one line with its cursor
pub fn text_field_line<'a>(field: &'a TextField, focused: bool, theme: &Theme) -> Line<'a> {
    let cursor_style = theme.input.add_modifier(ratatui::style::Modifier::REVERSED);
    let show_cursor = focused && field.cursor_visible();
    let mut spans = vec![Span::styled("> ", if focused { theme.label_focused } else { theme.label })];

    if field.value().is_empty() {
        let placeholder = field.placeholder();
        let mut chars = placeholder.chars();
        match chars.next() {
            Some(first) if show_cursor => {
                spans.push(Span::styled(first.to_string(), cursor_style));
                spans.push(Span::styled(chars.as_str(), theme.placeholder));
            }
            Some(_) => spans.push(Span::styled(placeholder, theme.placeholder)),
            None if show_cursor => spans.push(Span::styled(" ", cursor_style)),
            None => {}
        }
        return Line::from(spans);
    }

    let value = field.value();
    let split = value
        .char_indices()
        .nth(field.cursor())
        .map_or(value.len(), |(i, _)| i);
    let (before, rest) = value.split_at(split);
    spans.push(Span::styled(before, theme.input));

    if show_cursor {
        let mut chars = rest.chars();
        match chars.next() {
            Some(c) => {
                spans.push(Span::styled(c.to_string(), cursor_style));
                spans.push(Span::styled(chars.as_str(), theme.input));
            }
            None => spans.push(Span::styled(" ", cursor_style)),
        }
    } else {
        spans.push(Span::styled(rest, theme.input));
    }
    Line::from(spans)
}

/// A muted hint line
pub fn hint<'a>(text: impl Into<String>, theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(text.into(), theme.label))
}

/// Selection marker and style for a menu row
pub fn menu_marker(selected: bool, theme: &Theme) -> (&'static str, Style) {
    if selected {
        ("▸ ", theme.selected)
    } else {
        ("  ", theme.option)
    }
}

/// Shorten `text` to `max` characters with a trailing ellipsis
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut)
}
