use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
    Frame,
};

use super::{header, hint, truncate};
use crate::cli::tui::wizard::state::{Step, Wizard};
use crate::cli::tui::wizard::theme::Theme;
use crate::config::{color_to_hex, palette_name, QrConfig, Rgb};
use crate::templates::ContentType;

const SUMMARY_WIDTH: usize = 40;

pub fn render(frame: &mut Frame, area: Rect, wizard: &Wizard, theme: &Theme) {
    let rows: Vec<Line> = summary_lines(&wizard.config, wizard.content_type())
        .into_iter()
        .map(|text| Line::from(Span::styled(text, theme.input)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),                     // Header
            Constraint::Length(rows.len() as u16 + 2), // Summary box
            Constraint::Min(0),                        // Prompt
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(vec![header(Step::Confirm, "Review & Generate", theme), Line::from("")]),
        chunks[0],
    );

    let summary = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.header)
        .padding(Padding::horizontal(1));
    let box_area = Rect {
        width: chunks[1].width.min(64),
        ..chunks[1]
    };
    frame.render_widget(Paragraph::new(rows).block(summary), box_area);

    let prompt = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Generate QR code? ",
            theme.header.add_modifier(Modifier::BOLD),
        )),
        hint("[Y/Enter] Yes  [N] Start over  [Esc] Go Back", theme),
    ];
    frame.render_widget(Paragraph::new(prompt), chunks[2]);
}

/// Plain-text summary rows for the review box
pub fn summary_lines(config: &QrConfig, content_type: ContentType) -> Vec<String> {
    vec![
        format!("📋 Type:     {} {}", content_type.icon(), content_type.name()),
        format!("📝 Content:  {}", truncate(&config.content, SUMMARY_WIDTH)),
        format!("📄 Format:   {}", config.format.extension().to_uppercase()),
        format!("🎨 FG Color: {}", describe_color(config.foreground)),
        format!("🖼️  BG Color: {}", describe_color(config.background)),
        format!("📐 Size:     {}x{} pixels", config.size, config.size),
        format!(
            "💾 Output:   {}",
            truncate(&config.output_path.display().to_string(), SUMMARY_WIDTH)
        ),
    ]
}

fn describe_color(color: Rgb) -> String {
    format!(
        "{} ({})",
        palette_name(color).unwrap_or("Custom"),
        color_to_hex(color)
    )
}
