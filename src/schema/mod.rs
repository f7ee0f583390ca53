//! Declarative form schemas
//!
//! - `field`: field descriptors and the closed set of field kinds
//! - `form_schema`: schemas, endpoints and schema checks
//! - `catalog`: the built-in tournament forms

pub mod catalog;
mod field;
mod form_schema;

pub use field::{FieldDescriptor, FieldKind, TEXTAREA_ROWS};
pub use form_schema::{join_url, AuthRequirement, Endpoint, FormRule, FormSchema, Method};
