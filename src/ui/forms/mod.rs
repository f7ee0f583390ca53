//! Form rendering module
//!
//! - `field_renderer`: one bordered widget per field kind
//! - `form_view`: the scrolling form with consent, submit button and notice

mod field_renderer;
mod form_view;

pub use form_view::{draw_form, ensure_visible, row_heights, viewport_height};
