use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
    Frame,
};

use super::hint;
use crate::cli::tui::wizard::state::Wizard;
use crate::cli::tui::wizard::theme::Theme;
use crate::generator::terminal::{cell_rows, cell_shades, HALF_BLOCK};
use crate::generator::Bitmap;

pub fn render(frame: &mut Frame, area: Rect, wizard: &Wizard, theme: &Theme) {
    let saved_to = wizard
        .success_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let preview = wizard.preview.as_ref().map(preview_lines).unwrap_or_default();
    let preview_height = if preview.is_empty() {
        0
    } else {
        preview.len() as u16 + 2
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),              // Success box
            Constraint::Length(preview_height), // Scan preview
            Constraint::Min(0),                 // Prompt
        ])
        .split(area);

    let success = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.success)
        .padding(Padding::horizontal(1));
    let box_lines = vec![
        Line::from(Span::styled("✓ QR code generated successfully!", theme.success)),
        Line::from(""),
        Line::from(Span::styled("Saved to:", theme.label)),
        Line::from(Span::styled(saved_to, theme.input)),
    ];
    let box_width = box_lines
        .iter()
        .map(|l| l.width() as u16 + 4)
        .max()
        .unwrap_or(0)
        .min(chunks[0].width);
    frame.render_widget(
        Paragraph::new(box_lines).block(success),
        Rect {
            width: box_width,
            ..chunks[0]
        },
    );

    if !preview.is_empty() {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled("Scan with your phone:", theme.header)),
        ];
        lines.extend(preview);
        frame.render_widget(Paragraph::new(lines), chunks[1]);
    }

    let prompt = vec![
        Line::from(""),
        hint("Press [R] to create another, [Q/Enter] to exit", theme),
    ];
    frame.render_widget(Paragraph::new(prompt), chunks[2]);
}

/// One line per pair of module rows, each cell a half block in two shades
pub fn preview_lines(bitmap: &Bitmap) -> Vec<Line<'static>> {
    cell_rows(bitmap)
        .map(|row| {
            let spans: Vec<Span> = row
                .into_iter()
                .map(|(top, bottom)| {
                    let (upper, lower) = cell_shades(top, bottom);
                    Span::styled(
                        HALF_BLOCK.to_string(),
                        Style::default()
                            .fg(Theme::shade_color(upper))
                            .bg(Theme::shade_color(lower)),
                    )
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::module_bitmap;

    #[test]
    fn test_preview_halves_the_row_count() {
        let bitmap = module_bitmap("https://example.com").unwrap();
        let lines = preview_lines(&bitmap);

        assert_eq!(lines.len(), bitmap.len().div_ceil(2));
        assert!(lines.iter().all(|l| l.spans.len() == bitmap[0].len()));
    }
}
