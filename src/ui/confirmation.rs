//! Confirmation screen shown after a form is accepted

use crate::schema::Method;
use crate::state::{FormPhase, FormState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, form: Option<&FormState>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(9),
            Constraint::Min(0),
        ])
        .split(area);

    let is_update = form.is_some_and(|f| f.endpoint().method == Method::Put);
    let (title, status) = match form {
        Some(form) => (
            form.schema.title.as_str(),
            match form.phase() {
                FormPhase::Submitted { status } => Some(status),
                _ => None,
            },
        ),
        None => ("Form", None),
    };

    let mut lines = vec![
        Line::from(Span::styled(
            "✓ Submission received",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if is_update {
        lines.push(Line::from("Your changes have been saved."));
    } else {
        lines.push(Line::from(format!("Thank you. Your {title} has been submitted.")));
        lines.push(Line::from("We will review it and contact you by email."));
    }
    if let Some(status) = status {
        lines.push(Line::from(Span::styled(
            format!("Server responded {status}"),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));
    let keys = if is_update {
        "Enter: back"
    } else {
        "Enter: back to forms   n: submit another"
    };
    lines.push(Line::from(Span::styled(
        keys,
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        );
    frame.render_widget(paragraph, chunks[1]);
}
