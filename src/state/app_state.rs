//! Application state definitions

use super::forms::{EntityRow, FormState};
use crate::api::ModuleStatus;
use crate::schema::{catalog, AuthRequirement, FormSchema};
use std::collections::{HashSet, VecDeque};

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// List of available forms
    #[default]
    Catalog,
    /// Existing admin entities, picked for editing
    Records,
    /// Filling in the open form
    Form,
    /// Shown once the open form has been accepted
    Confirmation,
}

impl View {
    pub fn is_form_view(&self) -> bool {
        matches!(self, Self::Form)
    }
}

/// Whether a catalog entry can be opened right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Open,
    /// The server does not accept applications for this module
    Closed,
    /// Needs an admin session first
    SignInRequired,
}

impl Availability {
    /// Sentence telling the user whether `schema` can be opened
    pub fn describe(self, schema: &FormSchema) -> String {
        match self {
            Self::Open => "Press Enter to open this form".to_string(),
            Self::Closed => format!(
                "{} applications are currently not being accepted",
                schema.title
            ),
            Self::SignInRequired => format!(
                "{} requires an admin session (set FAIRWAY_SESSION_TOKEN)",
                schema.title
            ),
        }
    }
}

/// Admin entities loaded from the server for editing
#[derive(Debug, Clone)]
pub struct EntityListing {
    pub noun: String,
    pub rows: Vec<EntityRow>,
    pub selected_index: usize,
}

impl EntityListing {
    pub fn new(noun: &str, rows: Vec<EntityRow>) -> Self {
        Self {
            noun: noun.to_string(),
            rows,
            selected_index: 0,
        }
    }

    pub fn selected_row(&self) -> Option<&EntityRow> {
        self.rows.get(self.selected_index)
    }

    /// Replace the row edited through `form` with its submitted values
    pub fn refresh(&mut self, form: &FormState) {
        if let Some(row) = self
            .rows
            .iter_mut()
            .find(|row| row.form.endpoint() == form.endpoint())
        {
            row.label = form.value("name").to_string();
            row.form = form.reopened();
        }
    }
}

/// Main application state
#[derive(Debug)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,

    // Catalog
    pub schemas: Vec<FormSchema>,
    pub selected_index: usize,
    /// Slugs of active application modules; `None` until a lookup succeeds
    pub active_modules: Option<HashSet<String>>,
    pub has_session: bool,

    /// Entities shown in the records view
    pub listing: Option<EntityListing>,

    // Open form
    pub form: Option<FormState>,
    pub form_scroll: usize,

    // Modal error queue, oldest first
    errors: VecDeque<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_schemas(catalog::all())
    }
}

impl AppState {
    pub fn with_schemas(schemas: Vec<FormSchema>) -> Self {
        Self {
            current_view: View::default(),
            view_history: Vec::new(),
            schemas,
            selected_index: 0,
            active_modules: None,
            has_session: false,
            listing: None,
            form: None,
            form_scroll: 0,
            errors: VecDeque::new(),
        }
    }

    /// Queue an error for the modal error dialog
    pub fn push_error(&mut self, message: String) {
        tracing::warn!(%message, "Showing error");
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn selected_schema(&self) -> Option<&FormSchema> {
        self.schemas.get(self.selected_index)
    }

    /// Record the server's module list
    pub fn set_modules(&mut self, modules: &[ModuleStatus]) {
        self.active_modules = Some(
            modules
                .iter()
                .filter(|m| m.is_active)
                .map(|m| m.slug.clone())
                .collect(),
        );
    }

    /// Gated forms are open only when the server lists their module as active
    pub fn availability(&self, schema: &FormSchema) -> Availability {
        if schema.auth == AuthRequirement::Session && !self.has_session {
            return Availability::SignInRequired;
        }
        if !schema.module_gated {
            return Availability::Open;
        }
        match &self.active_modules {
            Some(active) if active.contains(&schema.slug) => Availability::Open,
            _ => Availability::Closed,
        }
    }

    /// Replace the open form, resetting its scroll position
    pub fn open_form(&mut self, form: FormState) {
        self.form = Some(form);
        self.form_scroll = 0;
    }

    pub fn close_form(&mut self) {
        self.form = None;
        self.form_scroll = 0;
    }
}
