//! Application state and core logic

use crate::api::{Session, SubmissionError, SubmitReceipt, Submitter};
use crate::schema::{catalog, FormSchema, Method};
use crate::state::{
    AdminCollection, AppState, Availability, EntityListing, Focus, Form, FormError, FormState,
    View,
};
use crate::ui::forms::{ensure_visible, row_heights, viewport_height};
use anyhow::{anyhow, bail, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Record key accepted for the consent checkbox in headless submissions
const CONSENT_KEY: &str = "consent";

/// Result of a request run on a spawned task
#[derive(Debug)]
pub enum TaskOutcome {
    /// A form submission, routed back to the form that started it
    Submission {
        request_id: Uuid,
        result: Result<SubmitReceipt, SubmissionError>,
    },
    /// An admin collection fetched for editing
    Listing {
        slug: String,
        result: Result<Value, SubmissionError>,
    },
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Transport for submissions and module lookups
    submitter: Arc<dyn Submitter>,
    base_url: String,
    /// Admin session, if one was configured
    pub session: Option<Session>,
    outcome_tx: mpsc::UnboundedSender<TaskOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<TaskOutcome>,
    /// Whether the last module lookup reached the API
    pub api_reachable: bool,
    /// Whether the app should quit
    quit: bool,
    /// Transient message for the status bar
    pub status_message: Option<String>,
    /// Terminal size for scroll calculations (height, width)
    pub terminal_size: Option<(u16, u16)>,
}

impl App {
    /// Create a new App instance
    pub fn new(
        submitter: Arc<dyn Submitter>,
        base_url: impl Into<String>,
        session: Option<Session>,
    ) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let mut state = AppState::default();
        state.has_session = session.as_ref().is_some_and(Session::is_active);
        Self {
            state,
            submitter,
            base_url: base_url.into(),
            session,
            outcome_tx,
            outcome_rx,
            api_reachable: false,
            quit: false,
            status_message: None,
            terminal_size: None,
        }
    }

    /// Ask the API which application modules are accepting submissions.
    /// On failure every gated module stays closed.
    pub async fn load_modules(&mut self) {
        match self.submitter.public_modules().await {
            Ok(modules) => {
                tracing::info!(count = modules.len(), "Loaded application modules");
                self.state.set_modules(&modules);
                self.api_reachable = true;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not load application modules");
                self.api_reachable = false;
                self.status_message = Some("Could not reach the tournament API".to_string());
            }
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether a submission is waiting for its outcome
    pub fn is_submitting(&self) -> bool {
        self.state.form.as_ref().is_some_and(FormState::is_submitting)
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Schema for `slug` if it exists and can be opened right now
    fn openable_schema(&self, slug: &str) -> Result<FormSchema, String> {
        let schema = catalog::schema_for(slug)
            .ok_or_else(|| format!("Application Not Found: there is no form called `{slug}`"))?;
        match self.state.availability(&schema) {
            Availability::Open => Ok(schema),
            closed => Err(closed.describe(&schema)),
        }
    }

    /// Open the form for `slug`, refusing unknown slugs and closed modules
    pub fn open_form(&mut self, slug: &str) {
        match self.openable_schema(slug) {
            Ok(schema) => {
                tracing::info!(slug, "Opening form");
                self.state.open_form(blank_form(schema));
                self.navigate(View::Form);
            }
            Err(message) => self.push_error(message),
        }
    }

    /// Fetch the existing entities behind an admin schema. The listing
    /// arrives through [`App::poll_tasks`] and opens the records view.
    pub fn request_listing(&mut self, slug: &str) {
        let Some(collection) = AdminCollection::for_slug(slug) else {
            self.status_message = Some("Only admin forms have existing records".to_string());
            return;
        };
        if let Err(message) = self.openable_schema(slug) {
            self.push_error(message);
            return;
        }

        let submitter = Arc::clone(&self.submitter);
        let tx = self.outcome_tx.clone();
        let bearer = self
            .session
            .as_ref()
            .and_then(Session::bearer)
            .map(str::to_string);
        let slug = slug.to_string();
        tracing::info!(%slug, "Loading existing records");
        tokio::spawn(async move {
            let result = submitter.list(collection.path.to_string(), bearer).await;
            if tx.send(TaskOutcome::Listing { slug, result }).is_err() {
                tracing::debug!("Listing finished after shutdown");
            }
        });
        self.status_message = Some(format!("Loading {}s...", collection.noun.to_lowercase()));
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        self.state.view_history.push(self.state.current_view);
        self.state.current_view = view;
    }

    /// Go back to the previous non-form view, dropping the open form
    pub fn go_back(&mut self) {
        let previous = std::iter::from_fn(|| self.state.view_history.pop())
            .find(|view| !view.is_form_view() && *view != View::Confirmation);
        self.state.current_view = previous.unwrap_or_default();
        self.state.close_form();
        if self.state.current_view == View::Catalog {
            self.state.listing = None;
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;

        match self.state.current_view {
            View::Catalog => self.handle_catalog_key(key),
            View::Records => self.handle_records_key(key),
            View::Form => {
                self.handle_form_key(key);
                self.sync_form_scroll();
            }
            View::Confirmation => self.handle_confirmation_key(key),
        }
        Ok(())
    }

    fn handle_catalog_key(&mut self, key: KeyEvent) {
        let count = self.state.schemas.len();
        let selected = self.state.selected_schema().map(|s| s.slug.clone());
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.state.move_selection_down(count),
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Enter => {
                if let Some(slug) = selected {
                    self.open_form(&slug);
                }
            }
            KeyCode::Char('e') => {
                if let Some(slug) = selected {
                    self.request_listing(&slug);
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    fn handle_records_key(&mut self, key: KeyEvent) {
        let Some(listing) = self.state.listing.as_mut() else {
            self.go_back();
            return;
        };
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                if listing.selected_index + 1 < listing.rows.len() {
                    listing.selected_index += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                listing.selected_index = listing.selected_index.saturating_sub(1);
            }
            KeyCode::Enter => {
                if let Some(form) = listing.selected_row().map(|row| row.form.clone()) {
                    self.state.open_form(form);
                    self.navigate(View::Form);
                }
            }
            KeyCode::Esc => self.go_back(),
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.submit_form();
            return;
        }
        if key.code == KeyCode::Char('v') && key.modifiers.contains(crate::platform::PASTE_MODIFIER)
        {
            if let Err(e) = self.paste_from_clipboard() {
                self.push_error(format!("Clipboard unavailable: {e}"));
            }
            return;
        }
        if key.code == KeyCode::Esc {
            // the outcome needs the form to land on
            if self.is_submitting() {
                self.status_message = Some("Still submitting, please wait".to_string());
            } else {
                self.go_back();
            }
            return;
        }

        let Some(form) = self.state.form.as_mut() else {
            return;
        };
        let on_select = form.active_descriptor().is_some_and(|f| f.kind.is_select());

        match (form.focus(), key.code) {
            (_, KeyCode::Tab | KeyCode::Down) => form.next_field(),
            (_, KeyCode::BackTab | KeyCode::Up) => form.prev_field(),
            (Focus::Field(_), KeyCode::Left) if on_select => form.cycle_option(false),
            (Focus::Field(_), KeyCode::Right) if on_select => form.cycle_option(true),
            (Focus::Field(_), KeyCode::Enter) => {
                if form.active_descriptor().is_some_and(|f| f.kind.is_multiline()) {
                    form.insert_newline();
                } else {
                    form.next_field();
                }
            }
            (Focus::Field(_), KeyCode::Char(c)) => form.push_char(c),
            (Focus::Field(_), KeyCode::Backspace) => form.pop_char(),
            (Focus::Consent, KeyCode::Char(' ') | KeyCode::Enter) => form.toggle_consent(),
            (Focus::Submit, KeyCode::Enter) => self.submit_form(),
            _ => {}
        }
    }

    fn handle_confirmation_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.go_back(),
            KeyCode::Char('n') => {
                // edits go back through the records view instead
                let Some(form) = self
                    .state
                    .form
                    .as_mut()
                    .filter(|f| f.endpoint().method == Method::Post)
                else {
                    return;
                };
                form.reset();
                self.state.form_scroll = 0;
                self.state.current_view = View::Form;
            }
            _ => {}
        }
    }

    /// Validate and send the open form. The request runs on its own task and
    /// its outcome arrives through [`App::poll_tasks`].
    pub fn submit_form(&mut self) {
        let Some(form) = self.state.form.as_mut() else {
            return;
        };
        match form.begin_submit(&self.base_url, self.session.as_ref()) {
            Ok(request) => {
                let submitter = Arc::clone(&self.submitter);
                let tx = self.outcome_tx.clone();
                let request_id = request.id;
                tokio::spawn(async move {
                    let result = submitter.send(request).await;
                    if tx
                        .send(TaskOutcome::Submission { request_id, result })
                        .is_err()
                    {
                        tracing::debug!(id = %request_id, "Submission finished after shutdown");
                    }
                });
                self.status_message = Some("Submitting...".to_string());
            }
            Err(FormError::InFlight) => {
                self.status_message = Some("Still submitting, please wait".to_string());
            }
            Err(FormError::SessionRequired) => {
                self.push_error("Your admin session has ended. Restart with a valid FAIRWAY_SESSION_TOKEN.");
            }
            Err(e) => {
                tracing::debug!(error = %e, "Submission refused");
            }
        }
    }

    /// Fill and submit one form without the terminal UI, waiting for the
    /// server's answer. Record keys are field names; `consent` (or the
    /// schema's consent key) takes a boolean.
    pub async fn submit_record(
        &mut self,
        slug: &str,
        values: &Map<String, Value>,
    ) -> Result<SubmitReceipt> {
        let schema = self.openable_schema(slug).map_err(|message| anyhow!(message))?;
        let mut form = blank_form(schema);
        for (name, value) in values {
            let is_consent =
                name == CONSENT_KEY || form.schema.consent_field.as_deref() == Some(name.as_str());
            match value {
                Value::Bool(agreed) if is_consent => form.consent = *agreed,
                Value::String(text) => form.set_field(name, text.as_str())?,
                Value::Number(n) => form.set_field(name, n.to_string())?,
                other => bail!("`{name}` must be a string or number, got {other}"),
            }
        }

        let result = form
            .submit(self.submitter.as_ref(), &self.base_url, self.session.as_ref())
            .await;
        if let Err(FormError::Submission(e)) = &result {
            self.expire_session_on(e);
        }
        result.map_err(|e| anyhow!(e.user_message()))
    }

    /// Apply every task outcome that has arrived
    pub fn poll_tasks(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply_outcome(outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::Submission { request_id, result } => {
                self.apply_submission(request_id, result)
            }
            TaskOutcome::Listing { slug, result } => self.apply_listing(&slug, result),
        }
    }

    fn apply_submission(&mut self, request_id: Uuid, result: Result<SubmitReceipt, SubmissionError>) {
        if let Err(e) = &result {
            if self.expire_session_on(e) {
                self.push_error(e.user_message());
            }
        }

        let Some(form) = self.state.form.as_mut() else {
            tracing::debug!(id = %request_id, "Outcome arrived with no form open");
            return;
        };
        if !form.finish_submit(request_id, &result) {
            return;
        }
        if form.is_submitted() {
            self.status_message = form.notice.as_ref().map(|n| n.text.clone());
            if let Some(listing) = self.state.listing.as_mut() {
                listing.refresh(form);
            }
            self.navigate(View::Confirmation);
        }
    }

    fn apply_listing(&mut self, slug: &str, result: Result<Value, SubmissionError>) {
        let Some(collection) = AdminCollection::for_slug(slug) else {
            return;
        };
        let rows = match result {
            Ok(listing) => collection.parse(listing).map_err(|e| {
                format!("Could not read the {} list: {e}", collection.noun.to_lowercase())
            }),
            Err(e) => {
                self.expire_session_on(&e);
                Err(e.user_message())
            }
        };
        match rows {
            Ok(rows) => {
                tracing::info!(slug, count = rows.len(), "Loaded existing records");
                self.state.listing = Some(EntityListing::new(collection.noun, rows));
                if self.state.current_view != View::Records {
                    self.navigate(View::Records);
                }
            }
            Err(message) => self.push_error(message),
        }
    }

    /// Invalidate the session when the server refused it. Returns whether it did.
    fn expire_session_on(&mut self, error: &SubmissionError) -> bool {
        if !error.is_unauthorized() {
            return false;
        }
        if let Some(session) = self.session.as_mut() {
            session.invalidate();
        }
        self.state.has_session = false;
        true
    }

    /// Keep the focused row of the open form on screen
    fn sync_form_scroll(&mut self) {
        let Some(form) = self.state.form.as_ref() else {
            return;
        };
        let (height, width) = self.terminal_size.unwrap_or((24, 80));
        // less the status bar line
        let viewport = viewport_height(height.saturating_sub(1));
        let heights = row_heights(form, width.saturating_sub(2));
        self.state.form_scroll = ensure_visible(
            &heights,
            form.active_field_index,
            self.state.form_scroll,
            viewport,
        );
    }

    fn paste_from_clipboard(&mut self) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        let text = clipboard.get_text()?;
        if let Some(form) = self.state.form.as_mut() {
            form.paste(&text);
        }
        Ok(())
    }
}

/// Fresh form for a schema; admin schemas open in create mode
fn blank_form(schema: FormSchema) -> FormState {
    match AdminCollection::for_slug(&schema.slug) {
        Some(collection) => collection.create_form(),
        None => FormState::new(schema),
    }
}
