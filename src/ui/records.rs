//! Existing admin entities, each opening an edit form

use super::render_scrollable_list;
use crate::state::EntityListing;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, listing: &EntityListing) {
    let block = Block::default()
        .title(format!(" {}s ", listing.noun))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if listing.rows.is_empty() {
        let empty = Paragraph::new(format!("No {}s yet", listing.noun.to_lowercase()))
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = listing
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let is_selected = idx == listing.selected_index;
            let prefix = if is_selected { "▸ " } else { "  " };
            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(&row.label, style),
            ]))
        })
        .collect();

    render_scrollable_list(frame, area, List::new(items).block(block), listing.selected_index);
}
