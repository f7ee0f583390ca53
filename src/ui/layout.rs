//! Layout components (content area, status bar)

use crate::app::App;
use crate::platform::{PASTE_SHORTCUT, SUBMIT_SHORTCUT};
use crate::schema::Method;
use crate::state::{Focus, FormState, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into the content area and the status bar line
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // API reachability, from the module lookup
    let conn_status = if app.api_reachable {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Red))
    };
    spans.push(conn_status);

    let hints = view_hints(app.state.current_view, app.state.form.as_ref());
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    if let Some(session) = app.session.as_ref().filter(|s| s.is_active()) {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("admin: {}", session.display_name()),
            Style::default().fg(Color::Magenta),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the current view and focused row
pub fn view_hints(view: View, form: Option<&FormState>) -> String {
    match view {
        View::Catalog => "j/k:nav  Enter:open  e:edit existing  q:quit".to_string(),
        View::Records => "j/k:nav  Enter:edit  Esc:back".to_string(),
        View::Confirmation => match form {
            Some(form) if form.endpoint().method == Method::Put => "Enter:back".to_string(),
            _ => "Enter:back  n:new submission".to_string(),
        },
        View::Form => {
            let focused = match form.map(|f| (f.focus(), f.active_descriptor())) {
                Some((Focus::Field(_), Some(field))) if field.kind.is_select() => {
                    "←/→:choose  Bksp:clear".to_string()
                }
                Some((Focus::Field(_), _)) => format!("type to edit  {PASTE_SHORTCUT}:paste"),
                Some((Focus::Consent, _)) => "Space:toggle".to_string(),
                Some((Focus::Submit, _)) | None => "Enter:submit".to_string(),
            };
            format!("Tab:next  {focused}  {SUBMIT_SHORTCUT}:submit  Esc:back")
        }
    }
}
