//! Schema-driven form view
//!
//! Rows are the schema's fields in order, then the consent checkbox (when
//! the schema asks for one) and the submit button. The row list scrolls so
//! the focused row stays inside the viewport.

use super::field_renderer::{draw_field, field_height};
use crate::state::{Focus, FormState, NoticeKind};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use crate::ui::wrap_text;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows above the scrolling area (description)
const HEADER_ROWS: u16 = 2;
/// Rows below the scrolling area (inline notice)
const NOTICE_ROWS: u16 = 2;

/// Height of the scrolling area inside a form drawn into `area_height` rows
pub fn viewport_height(area_height: u16) -> u16 {
    area_height.saturating_sub(2 + HEADER_ROWS + NOTICE_ROWS)
}

fn consent_height(text: &str, width: u16) -> u16 {
    // "[x] " prefix plus borders
    let inner = width.saturating_sub(6).max(1) as usize;
    wrap_text(text, inner).len() as u16 + 2
}

/// Height of every row in the form, in focus order
pub fn row_heights(form: &FormState, width: u16) -> Vec<u16> {
    let mut heights: Vec<u16> = form.schema.fields.iter().map(field_height).collect();
    if let Some(text) = &form.schema.consent_text {
        heights.push(consent_height(text, width));
    }
    heights.push(BUTTON_HEIGHT);
    heights
}

/// First visible row such that `active` fits in a viewport of `viewport` rows,
/// moving as little as possible from `scroll`
pub fn ensure_visible(heights: &[u16], active: usize, scroll: usize, viewport: u16) -> usize {
    if heights.is_empty() {
        return 0;
    }
    let active = active.min(heights.len() - 1);
    let mut first = scroll.min(active);
    while first < active && heights[first..=active].iter().sum::<u16>() > viewport {
        first += 1;
    }
    first
}

/// Label of the submit button for the form's phase
pub fn submit_label(form: &FormState) -> &'static str {
    if form.is_submitting() {
        "Submitting..."
    } else if form.is_submitted() {
        "Submitted"
    } else {
        "Submit"
    }
}

/// Draw the form. `scroll` is the first visible row.
pub fn draw_form(frame: &mut Frame, area: Rect, form: &FormState, scroll: usize) {
    let block = Block::default()
        .title(format!(" {} ", form.schema.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_ROWS),
            Constraint::Min(0),
            Constraint::Length(NOTICE_ROWS),
        ])
        .split(inner);

    let description = Paragraph::new(form.schema.description.as_str())
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true });
    frame.render_widget(description, chunks[0]);

    draw_rows(frame, chunks[1], form, scroll);
    draw_notice(frame, chunks[2], form);
}

fn draw_rows(frame: &mut Frame, area: Rect, form: &FormState, scroll: usize) {
    let heights = row_heights(form, area.width);
    let focus = form.focus();
    let first = ensure_visible(&heights, form.active_field_index, scroll, area.height);

    let mut y = area.y;
    let bottom = area.y + area.height;
    for (index, height) in heights.iter().enumerate().skip(first) {
        if y >= bottom {
            break;
        }
        let row = Rect {
            x: area.x,
            y,
            width: area.width,
            height: (*height).min(bottom - y),
        };
        let is_active = index == form.active_field_index;

        if let Some(field) = form.schema.fields.get(index) {
            draw_field(frame, row, field, form.value(&field.name), is_active);
        } else if index == form.schema.fields.len() && form.schema.requires_consent() {
            draw_consent(frame, row, form, focus == Focus::Consent);
        } else {
            let width = (submit_label(form).len() as u16 + 4).min(row.width);
            render_button(
                frame,
                Rect { width, ..row },
                submit_label(form),
                focus == Focus::Submit,
                !form.is_submitting() && !form.is_submitted(),
            );
        }
        y = y.saturating_add(*height);
    }
}

fn draw_consent(frame: &mut Frame, area: Rect, form: &FormState, is_active: bool) {
    let accent = if is_active { Color::Cyan } else { Color::DarkGray };
    let mark = if form.consent { "[x] " } else { "[ ] " };
    let text = form.schema.consent_text.as_deref().unwrap_or_default();
    let paragraph = Paragraph::new(Line::from(vec![
        Span::styled(mark, Style::default().fg(accent).add_modifier(Modifier::BOLD)),
        Span::raw(text),
    ]))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(" Consent * ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent)),
    );
    frame.render_widget(paragraph, area);
}

fn draw_notice(frame: &mut Frame, area: Rect, form: &FormState) {
    let Some(notice) = &form.notice else {
        return;
    };
    let color = match notice.kind {
        NoticeKind::Error => Color::Red,
        NoticeKind::Success => Color::Green,
    };
    let paragraph = Paragraph::new(notice.text.as_str())
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
