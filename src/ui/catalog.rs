//! Form catalog: every built-in form and whether it can be opened

use super::render_scrollable_list;
use crate::schema::AuthRequirement;
use crate::state::{AdminCollection, AppState, Availability};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

fn availability_badge(availability: Availability) -> Span<'static> {
    match availability {
        Availability::Open => Span::styled("open", Style::default().fg(Color::Green)),
        Availability::Closed => Span::styled("closed", Style::default().fg(Color::Red)),
        Availability::SignInRequired => {
            Span::styled("sign in", Style::default().fg(Color::Yellow))
        }
    }
}

/// Draw the catalog list and the selected form's details
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Min(0)])
        .split(area);

    let items: Vec<ListItem> = state
        .schemas
        .iter()
        .enumerate()
        .map(|(idx, schema)| {
            let is_selected = idx == state.selected_index;
            let prefix = if is_selected { "▸ " } else { "  " };
            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            let scope = match schema.auth {
                AuthRequirement::Public => "",
                AuthRequirement::Session => " (admin)",
            };
            ListItem::new(Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(&schema.title, style),
                Span::styled(scope, Style::default().fg(Color::Magenta)),
                Span::raw(" "),
                availability_badge(state.availability(schema)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Forms ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    render_scrollable_list(frame, chunks[0], list, state.selected_index);

    draw_details(frame, chunks[1], state);
}

fn draw_details(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(schema) = state.selected_schema() else {
        let empty = Paragraph::new("No forms available")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            &schema.title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(schema.description.as_str()),
        Line::from(""),
        Line::from(state.availability(schema).describe(schema)),
    ];
    if let Some(collection) = AdminCollection::for_slug(&schema.slug) {
        lines.push(Line::from(format!(
            "Press e to edit an existing {}",
            collection.noun.to_lowercase()
        )));
    }
    lines.extend([
        Line::from(""),
        Line::from(Span::styled(
            "Fields",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
    ]);
    lines.extend(
        schema
            .fields
            .iter()
            .map(|field| Line::from(format!("  {}", field.display_label()))),
    );

    let details = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(details, area);
}
