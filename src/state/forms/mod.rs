//! Form domain layer
//!
//! - `record`: the values entered into a form
//! - `validation`: submit-time checks
//! - `form_state`: one live form and its submit lifecycle
//! - `entity`: admin entities edited through a shared create/edit form

mod entity;
mod form_state;
mod record;
mod validation;

pub use entity::{AccessLevel, AdminCollection, AdminEntity, EntityRow, Location, Zone};
pub use form_state::{Focus, Form, FormError, FormPhase, FormState, NoticeKind};
