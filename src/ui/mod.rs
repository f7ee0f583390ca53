//! UI module for rendering the TUI

mod catalog;
mod components;
mod confirmation;
pub mod forms;
mod layout;
mod records;
mod widgets;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

pub(crate) use components::wrap_text;
pub(crate) use widgets::render_scrollable_list;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    match app.state.current_view {
        View::Catalog => catalog::draw(frame, main_area, &app.state),
        View::Form => match &app.state.form {
            Some(form) => forms::draw_form(frame, main_area, form, app.state.form_scroll),
            None => catalog::draw(frame, main_area, &app.state),
        },
        View::Records => match &app.state.listing {
            Some(listing) => records::draw(frame, main_area, listing),
            None => catalog::draw(frame, main_area, &app.state),
        },
        View::Confirmation => confirmation::draw(frame, main_area, app.state.form.as_ref()),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Error dialog overlays everything else
    if let Some(message) = app.state.current_error() {
        components::render_error_dialog(frame, message, app.state.error_count() - 1);
    }
}

/// Flatten a rendered buffer into text, one line per row
#[cfg(test)]
pub(crate) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    let width = buffer.area.width as usize;
    buffer
        .content
        .chunks(width.max(1))
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
