//! Field rendering utilities for forms

use crate::schema::{FieldDescriptor, FieldKind, TEXTAREA_ROWS};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const CURSOR: &str = "▌";

/// Rows a field occupies, borders included
pub fn field_height(field: &FieldDescriptor) -> u16 {
    if field.kind.is_multiline() {
        TEXTAREA_ROWS + 2
    } else {
        3
    }
}

/// Split text into rows of at most `width` characters, breaking long lines
fn hard_wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    text.split('\n')
        .flat_map(|line| {
            let chars: Vec<char> = line.chars().collect();
            if chars.is_empty() {
                vec![String::new()]
            } else {
                chars.chunks(width).map(|c| c.iter().collect()).collect()
            }
        })
        .collect()
}

/// The end of a value that fits in `width` columns
fn visible_tail(value: &str, width: usize) -> &str {
    let skip = value.chars().count().saturating_sub(width);
    match value.char_indices().nth(skip) {
        Some((start, _)) => &value[start..],
        None => "",
    }
}

/// Draw one schema field with its current value
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FieldDescriptor,
    value: &str,
    is_active: bool,
) {
    let accent = if is_active { Color::Cyan } else { Color::DarkGray };
    let hint_style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);
    let value_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let inner_width = area.width.saturating_sub(2) as usize;

    let content = match &field.kind {
        FieldKind::Select(_) => {
            let mut spans = Vec::new();
            if is_active {
                spans.push(Span::styled("◂ ", Style::default().fg(Color::Cyan)));
            }
            if value.is_empty() {
                spans.push(Span::styled(field.hint(), hint_style));
            } else {
                spans.push(Span::styled(value, value_style));
            }
            if is_active {
                spans.push(Span::styled(" ▸", Style::default().fg(Color::Cyan)));
            }
            Paragraph::new(Line::from(spans))
        }
        kind if kind.is_multiline() => {
            if value.is_empty() {
                let mut lines = Vec::new();
                if is_active {
                    lines.push(Line::from(Span::styled(CURSOR, value_style)));
                }
                lines.push(Line::from(Span::styled(field.hint(), hint_style)));
                Paragraph::new(lines).wrap(Wrap { trim: false })
            } else {
                let text = if is_active {
                    format!("{value}{CURSOR}")
                } else {
                    value.to_string()
                };
                // keep the last wrapped rows in view
                let mut rows = hard_wrap(&text, inner_width);
                let overflow = rows.len().saturating_sub(TEXTAREA_ROWS as usize);
                let lines: Vec<Line> = rows
                    .split_off(overflow)
                    .into_iter()
                    .map(|row| Line::from(Span::styled(row, value_style)))
                    .collect();
                Paragraph::new(lines)
            }
        }
        _ => {
            // the active field scrolls so its end and the cursor stay visible
            let shown = if is_active {
                visible_tail(value, inner_width.saturating_sub(1))
            } else {
                value
            };
            let mut spans = vec![Span::styled(shown, value_style)];
            if is_active {
                spans.push(Span::styled(CURSOR, Style::default().fg(Color::Cyan)));
            }
            if value.is_empty() {
                spans.push(Span::styled(field.hint(), hint_style));
            }
            Paragraph::new(Line::from(spans))
        }
    };

    let title = Line::from(vec![
        Span::raw(" "),
        Span::styled(&field.label, Style::default().fg(accent)),
        if field.required {
            Span::styled(" *", Style::default().fg(Color::Red))
        } else {
            Span::raw("")
        },
        Span::raw(" "),
    ]);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));

    frame.render_widget(content.block(block), area);
}
