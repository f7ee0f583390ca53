//! Form state management: one schema-driven form instance
//!
//! Lifecycle: `Editing -> (validate) -> Editing | Submitting -> Submitted | Editing`.
//! Submission is split into [`FormState::begin_submit`], which validates and
//! snapshots the record into a request, and [`FormState::finish_submit`],
//! which applies the outcome. Only the submit control is locked while a
//! request is in flight; fields stay editable.

use super::record::SubmissionRecord;
use super::validation::{validate, ValidationError};
use crate::api::{Session, SubmissionError, SubmissionRequest, SubmitReceipt, Submitter};
use crate::schema::{AuthRequirement, Endpoint, FieldDescriptor, FieldKind, FormSchema};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Trait for common form navigation
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Where the form is in its submit lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Editing,
    Submitting { request_id: Uuid },
    Submitted { status: u16 },
}

/// Which row of the form has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(usize),
    Consent,
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Success,
}

/// Inline message shown under the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }
}

/// Errors raised by form operations. None of them end the form; the user can
/// always edit and try again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("`{value}` is not an option of `{field}`")]
    OptionNotOffered { field: String, value: String },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("a submission is already in progress")]
    InFlight,
    #[error("this form has already been submitted")]
    AlreadySubmitted,
    #[error("an active admin session is required")]
    SessionRequired,
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl FormError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.message(),
            Self::Submission(e) => e.user_message(),
            Self::SessionRequired => "Please sign in as an administrator first".to_string(),
            other => other.to_string(),
        }
    }
}

/// One live form: schema, entered values, consent and submit phase
#[derive(Debug, Clone)]
pub struct FormState {
    pub schema: FormSchema,
    pub record: SubmissionRecord,
    pub consent: bool,
    endpoint: Endpoint,
    phase: FormPhase,
    pub active_field_index: usize,
    pub notice: Option<Notice>,
}

impl FormState {
    pub fn new(schema: FormSchema) -> Self {
        Self {
            record: SubmissionRecord::for_schema(&schema),
            consent: !schema.requires_consent(),
            endpoint: schema.endpoint.clone(),
            phase: FormPhase::Editing,
            active_field_index: 0,
            notice: None,
            schema,
        }
    }

    /// Submit somewhere other than the schema's own endpoint
    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, FormPhase::Submitting { .. })
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.phase, FormPhase::Submitted { .. })
    }

    pub fn focus(&self) -> Focus {
        let fields = self.schema.fields.len();
        match self.active_field_index {
            i if i < fields => Focus::Field(i),
            i if i == fields && self.schema.requires_consent() => Focus::Consent,
            _ => Focus::Submit,
        }
    }

    /// Descriptor of the focused field, if a field row has focus
    pub fn active_descriptor(&self) -> Option<&FieldDescriptor> {
        match self.focus() {
            Focus::Field(i) => self.schema.fields.get(i),
            Focus::Consent | Focus::Submit => None,
        }
    }

    pub fn value(&self, name: &str) -> &str {
        self.record.get(name).unwrap_or_default()
    }

    /// Store a value for `name`. Select fields only take their offered options.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let field = self
            .schema
            .field(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        let value = value.into();
        if let FieldKind::Select(options) = &field.kind {
            if !options.contains(&value) {
                return Err(FormError::OptionNotOffered {
                    field: name.to_string(),
                    value,
                });
            }
        }
        self.record.set(name, value);
        Ok(())
    }

    /// Type a character into the focused row
    pub fn push_char(&mut self, c: char) {
        match self.focus() {
            Focus::Field(i) => {
                let field = &self.schema.fields[i];
                if field.kind.is_select() {
                    if c == ' ' {
                        self.cycle_option(true);
                    }
                    return;
                }
                let mut current = self.value(&field.name).to_string();
                if field.kind.accepts_char(&current, c) {
                    current.push(c);
                    let name = field.name.clone();
                    self.record.set(name, current);
                }
            }
            Focus::Consent if c == ' ' => self.toggle_consent(),
            Focus::Consent | Focus::Submit => {}
        }
    }

    /// Remove the last character, or clear a select choice
    pub fn pop_char(&mut self) {
        let Some(field) = self.active_descriptor() else {
            return;
        };
        let name = field.name.clone();
        if field.kind.is_select() {
            self.record.remove(&name);
            return;
        }
        let mut current = self.value(&name).to_string();
        current.pop();
        self.record.set(name, current);
    }

    pub fn insert_newline(&mut self) {
        if self
            .active_descriptor()
            .is_some_and(|f| f.kind.is_multiline())
        {
            self.push_char('\n');
        }
    }

    /// Insert pasted text, dropping characters the control would refuse
    pub fn paste(&mut self, text: &str) {
        if self.active_descriptor().is_some_and(|f| f.kind.is_select()) {
            return;
        }
        let multiline = self
            .active_descriptor()
            .is_some_and(|f| f.kind.is_multiline());
        for c in text.chars() {
            if c == '\n' && !multiline {
                continue;
            }
            self.push_char(c);
        }
    }

    /// Move the focused select field to the next or previous option.
    /// An unset select picks the first (or last) option.
    pub fn cycle_option(&mut self, forward: bool) {
        let Some(field) = self.active_descriptor() else {
            return;
        };
        let options = field.kind.options();
        if options.is_empty() {
            return;
        }
        let current = self
            .record
            .get(&field.name)
            .and_then(|v| options.iter().position(|o| o == v));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => options.len() - 1,
            (Some(i), true) => (i + 1) % options.len(),
            (Some(0), false) => options.len() - 1,
            (Some(i), false) => i - 1,
        };
        let name = field.name.clone();
        let value = options[next].clone();
        self.record.set(name, value);
    }

    pub fn toggle_consent(&mut self) {
        if self.schema.requires_consent() {
            self.consent = !self.consent;
        }
    }

    /// Guard, validate and snapshot the record into a request.
    ///
    /// On success the form is `Submitting` and the returned request must be
    /// handed back to [`FormState::finish_submit`] with its outcome.
    pub fn begin_submit(
        &mut self,
        base_url: &str,
        session: Option<&Session>,
    ) -> Result<SubmissionRequest, FormError> {
        match self.phase {
            FormPhase::Submitting { .. } => return Err(FormError::InFlight),
            FormPhase::Submitted { .. } => return Err(FormError::AlreadySubmitted),
            FormPhase::Editing => {}
        }

        let bearer = match self.schema.auth {
            AuthRequirement::Public => None,
            AuthRequirement::Session => match session.and_then(Session::bearer) {
                Some(token) => Some(token.to_string()),
                None => return Err(self.reject(FormError::SessionRequired)),
            },
        };

        if let Err(e) = validate(&self.schema, &self.record, self.consent) {
            return Err(self.reject(e.into()));
        }

        let request = SubmissionRequest {
            id: Uuid::new_v4(),
            method: self.endpoint.method,
            url: self.endpoint.url(base_url),
            body: self.schema.body.wrap(self.body_record()),
            bearer,
        };
        tracing::info!(
            slug = %self.schema.slug,
            id = %request.id,
            method = %request.method,
            "Submitting form"
        );
        self.phase = FormPhase::Submitting {
            request_id: request.id,
        };
        self.notice = None;
        Ok(request)
    }

    /// Record values, plus the consent flag when the endpoint expects it
    fn body_record(&self) -> Value {
        let mut record = self.record.to_json();
        if let (Some(key), Value::Object(map)) = (&self.schema.consent_field, &mut record) {
            map.insert(key.clone(), Value::Bool(self.consent));
        }
        record
    }

    fn reject(&mut self, error: FormError) -> FormError {
        self.notice = Some(Notice::error(error.user_message()));
        error
    }

    /// Apply the outcome of the request started by `begin_submit`.
    ///
    /// Returns false, changing nothing, when `request_id` is not the request
    /// currently in flight.
    pub fn finish_submit(
        &mut self,
        request_id: Uuid,
        outcome: &Result<SubmitReceipt, SubmissionError>,
    ) -> bool {
        if self.phase != (FormPhase::Submitting { request_id }) {
            tracing::debug!(id = %request_id, "Ignoring stale submission outcome");
            return false;
        }
        match outcome {
            Ok(receipt) => {
                tracing::info!(slug = %self.schema.slug, id = %request_id, status = receipt.status, "Form submitted");
                self.phase = FormPhase::Submitted {
                    status: receipt.status,
                };
                self.notice = Some(Notice::success(format!(
                    "{} submitted successfully",
                    self.schema.title
                )));
            }
            Err(e) => {
                tracing::warn!(slug = %self.schema.slug, id = %request_id, error = %e, "Submission failed");
                self.phase = FormPhase::Editing;
                self.notice = Some(Notice::error(e.user_message()));
            }
        }
        true
    }

    /// Validate, send once, and apply the outcome
    pub async fn submit<S: Submitter + ?Sized>(
        &mut self,
        submitter: &S,
        base_url: &str,
        session: Option<&Session>,
    ) -> Result<SubmitReceipt, FormError> {
        let request = self.begin_submit(base_url, session)?;
        let id = request.id;
        let outcome = submitter.send(request).await;
        self.finish_submit(id, &outcome);
        outcome.map_err(FormError::from)
    }

    /// Start over with a fresh record, as when the form is opened again
    pub fn reset(&mut self) {
        *self = Self::new(self.schema.clone()).with_endpoint(self.endpoint.clone());
    }

    /// Copy of the entered values, back in the editing phase
    pub fn reopened(&self) -> Self {
        let mut form = Self::new(self.schema.clone()).with_endpoint(self.endpoint.clone());
        form.record = self.record.clone();
        form.consent = self.consent;
        form
    }
}

impl Form for FormState {
    fn field_count(&self) -> usize {
        // fields, consent checkbox when asked for, submit button
        self.schema.fields.len() + usize::from(self.schema.requires_consent()) + 1
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.field_count() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockSubmitter;
    use crate::schema::catalog::{self, VOLUNTEER_SLUG};
    use crate::schema::{FieldDescriptor, Method};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    const BASE: &str = "http://api.test/api";

    fn contact_schema() -> FormSchema {
        FormSchema::new("contact", "Contact", Endpoint::post("/contact"))
            .fields(vec![
                FieldDescriptor::text("name", "Name").required(),
                FieldDescriptor::email("email", "Email").required(),
                FieldDescriptor::number("guests", "Guests"),
                FieldDescriptor::select("size", "Shirt Size", &["S", "M", "L"]).required(),
                FieldDescriptor::textarea("message", "Message"),
            ])
            .consent("I agree")
    }

    fn filled_contact() -> FormState {
        let mut form = FormState::new(contact_schema());
        form.set_field("name", "Kiprono").unwrap();
        form.set_field("email", "kip@example.com").unwrap();
        form.set_field("size", "M").unwrap();
        form.consent = true;
        form
    }

    fn ok_receipt(status: u16) -> Result<SubmitReceipt, SubmissionError> {
        Ok(SubmitReceipt {
            status,
            body: Value::Null,
        })
    }

    mod editing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_new_form_starts_editing_without_consent() {
            let form = FormState::new(contact_schema());
            assert_eq!(form.phase(), FormPhase::Editing);
            assert!(!form.consent);
            assert_eq!(form.record, SubmissionRecord::new());
            assert_eq!(form.focus(), Focus::Field(0));
        }

        #[test]
        fn test_schema_without_consent_text_starts_consented() {
            let schema = FormSchema::new("s", "S", Endpoint::post("/s"))
                .fields(vec![FieldDescriptor::text("name", "Name")]);
            let mut form = FormState::new(schema);
            assert!(form.consent);
            form.toggle_consent();
            assert!(form.consent);
        }

        #[test]
        fn test_set_field_twice_is_idempotent() {
            let mut form = FormState::new(contact_schema());
            form.set_field("name", "Njeri").unwrap();
            let once = form.record.clone();
            form.set_field("name", "Njeri").unwrap();
            assert_eq!(form.record, once);
        }

        #[test]
        fn test_set_field_rejects_unknown_name() {
            let mut form = FormState::new(contact_schema());
            assert_eq!(
                form.set_field("nickname", "x"),
                Err(FormError::UnknownField("nickname".to_string()))
            );
            assert_eq!(form.record, SubmissionRecord::new());
        }

        #[test]
        fn test_select_only_takes_offered_options() {
            let mut form = FormState::new(contact_schema());
            let err = form.set_field("size", "XXL").unwrap_err();
            assert!(matches!(err, FormError::OptionNotOffered { .. }));
            assert!(form.record.get("size").is_none());
            form.set_field("size", "L").unwrap();
            assert_eq!(form.value("size"), "L");
        }

        #[test]
        fn test_typing_filters_per_kind() {
            let mut form = FormState::new(contact_schema());
            form.set_active_field(2); // guests
            for c in "1a2.5.".chars() {
                form.push_char(c);
            }
            assert_eq!(form.value("guests"), "12.5");
            form.pop_char();
            assert_eq!(form.value("guests"), "12.");
        }

        #[test]
        fn test_select_ignores_typing_and_cycles() {
            let mut form = FormState::new(contact_schema());
            form.set_active_field(3); // size
            form.push_char('X');
            assert!(form.record.get("size").is_none());
            form.cycle_option(true);
            assert_eq!(form.value("size"), "S");
            form.cycle_option(false);
            assert_eq!(form.value("size"), "L");
            form.push_char(' ');
            assert_eq!(form.value("size"), "S");
            form.pop_char();
            assert!(form.record.is_blank("size"));
        }

        #[test]
        fn test_unset_select_cycles_backwards_to_last() {
            let mut form = FormState::new(contact_schema());
            form.set_active_field(3);
            form.cycle_option(false);
            assert_eq!(form.value("size"), "L");
        }

        #[test]
        fn test_newline_only_in_textarea() {
            let mut form = FormState::new(contact_schema());
            form.insert_newline();
            assert_eq!(form.value("name"), "");
            form.set_active_field(4);
            form.push_char('a');
            form.insert_newline();
            form.push_char('b');
            assert_eq!(form.value("message"), "a\nb");
        }

        #[test]
        fn test_paste_strips_newlines_in_single_line_fields() {
            let mut form = FormState::new(contact_schema());
            form.paste("Grace\nWambui");
            assert_eq!(form.value("name"), "GraceWambui");
        }

        #[test]
        fn test_navigation_covers_consent_and_submit_rows() {
            let mut form = FormState::new(contact_schema());
            assert_eq!(form.field_count(), 7);
            form.set_active_field(5);
            assert_eq!(form.focus(), Focus::Consent);
            form.push_char(' ');
            assert!(form.consent);
            form.next_field();
            assert_eq!(form.focus(), Focus::Submit);
            form.next_field();
            assert_eq!(form.focus(), Focus::Field(0));
            form.prev_field();
            assert_eq!(form.focus(), Focus::Submit);
            form.set_active_field(100);
            assert_eq!(form.active_field_index, 6);
        }
    }

    mod begin_submit {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_missing_required_blocks_submission() {
            let mut form = FormState::new(contact_schema());
            form.consent = true;
            let err = form.begin_submit(BASE, None).unwrap_err();
            match err {
                FormError::Validation(v) => {
                    assert_eq!(v.missing, vec!["Name", "Email", "Shirt Size"]);
                }
                other => panic!("unexpected error: {other:?}"),
            }
            assert_eq!(form.phase(), FormPhase::Editing);
            assert_eq!(
                form.notice,
                Some(Notice::error("Please fill in: Name, Email, Shirt Size"))
            );
        }

        #[test]
        fn test_consent_required() {
            let mut form = filled_contact();
            form.consent = false;
            let err = form.begin_submit(BASE, None).unwrap_err();
            assert_eq!(
                err.user_message(),
                "Please agree to the terms and conditions"
            );
        }

        #[test]
        fn test_builds_request_from_snapshot() {
            let mut form = filled_contact();
            let request = form.begin_submit(BASE, None).unwrap();
            assert_eq!(request.method, Method::Post);
            assert_eq!(request.url, "http://api.test/api/contact");
            assert_eq!(request.body, form.record.to_json());
            assert!(request.bearer.is_none());
            assert_eq!(
                form.phase(),
                FormPhase::Submitting {
                    request_id: request.id
                }
            );
        }

        #[test]
        fn test_wrapped_body_for_application_modules() {
            let mut form = FormState::new(catalog::schema_for("pro-am").unwrap());
            let request = form.begin_submit(BASE, None);
            assert!(request.is_err());

            for field in form.schema.fields.clone() {
                let value = match &field.kind {
                    FieldKind::Select(options) => options[0].clone(),
                    FieldKind::Email => "golfer@example.com".to_string(),
                    FieldKind::Number => "12".to_string(),
                    FieldKind::Date => "1990-01-01".to_string(),
                    _ => "x".to_string(),
                };
                form.set_field(&field.name, value).unwrap();
            }
            form.consent = true;
            let request = form.begin_submit(BASE, None).unwrap();
            assert_eq!(request.url, "http://api.test/api/accreditation/apply/pro-am");
            assert_eq!(request.body, json!({ "form_data": form.record.to_json() }));
        }

        #[test]
        fn test_edits_while_in_flight_are_allowed_but_resubmit_is_not() {
            let mut form = filled_contact();
            let request = form.begin_submit(BASE, None).unwrap();
            form.set_field("name", "Changed").unwrap();
            assert_eq!(request.body["name"], "Kiprono");
            assert_eq!(form.begin_submit(BASE, None), Err(FormError::InFlight));
        }

        #[test]
        fn test_volunteer_body_carries_consent_flag() {
            let mut form = FormState::new(catalog::schema_for(VOLUNTEER_SLUG).unwrap());
            for (name, value) in [
                ("first_name", "Wanjiru"),
                ("last_name", "Kamau"),
                ("email", "wanjiru@example.com"),
                ("phone", "0712345678"),
                ("role", "marshal"),
                ("availability_friday", "morning"),
            ] {
                form.set_field(name, value).unwrap();
            }
            form.toggle_consent();

            let request = form.begin_submit(BASE, None).unwrap();
            assert_eq!(request.body["consent_given"], json!(true));
            assert_eq!(request.body["role"], json!("marshal"));
        }

        #[test]
        fn test_consent_flag_absent_unless_schema_names_it() {
            let request = filled_contact().begin_submit(BASE, None).unwrap();
            assert!(request.body.get("consent_given").is_none());
        }

        #[test]
        fn test_session_required_for_admin_schemas() {
            let schema = contact_schema().session_required();
            let mut form = FormState::new(schema);
            form.set_field("name", "A").unwrap();
            form.set_field("email", "a@b.co").unwrap();
            form.set_field("size", "S").unwrap();
            form.consent = true;

            assert_eq!(form.begin_submit(BASE, None), Err(FormError::SessionRequired));

            let mut session = Session::new("tok", None);
            session.invalidate();
            assert_eq!(
                form.begin_submit(BASE, Some(&session)),
                Err(FormError::SessionRequired)
            );

            let session = Session::new("tok", None);
            let request = form.begin_submit(BASE, Some(&session)).unwrap();
            assert_eq!(request.bearer.as_deref(), Some("tok"));
        }
    }

    mod finish_submit {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_reopened_keeps_values_and_endpoint() {
            let mut form = filled_contact().with_endpoint(Endpoint::put("/contact/c-1"));
            let request = form.begin_submit(BASE, None).unwrap();
            form.finish_submit(request.id, &ok_receipt(200));

            let again = form.reopened();
            assert_eq!(again.phase(), FormPhase::Editing);
            assert_eq!(again.record, form.record);
            assert_eq!(again.endpoint(), &Endpoint::put("/contact/c-1"));
            assert!(again.notice.is_none());
        }

        #[test]
        fn test_success_is_terminal() {
            let mut form = filled_contact();
            let request = form.begin_submit(BASE, None).unwrap();
            assert!(form.finish_submit(request.id, &ok_receipt(201)));
            assert_eq!(form.phase(), FormPhase::Submitted { status: 201 });
            assert_eq!(
                form.begin_submit(BASE, None),
                Err(FormError::AlreadySubmitted)
            );
        }

        #[test]
        fn test_failure_returns_to_editing_with_record_intact() {
            let mut form = filled_contact();
            let before = form.record.clone();
            let request = form.begin_submit(BASE, None).unwrap();
            let outcome = Err(SubmissionError::Rejected {
                status: 500,
                detail: None,
            });
            assert!(form.finish_submit(request.id, &outcome));
            assert_eq!(form.phase(), FormPhase::Editing);
            assert_eq!(form.record, before);
            assert_eq!(
                form.notice.as_ref().map(|n| n.kind),
                Some(NoticeKind::Error)
            );
        }

        #[test]
        fn test_stale_outcome_is_ignored() {
            let mut form = filled_contact();
            let _request = form.begin_submit(BASE, None).unwrap();
            assert!(!form.finish_submit(Uuid::new_v4(), &ok_receipt(200)));
            assert!(form.is_submitting());
        }

        #[test]
        fn test_reset_restores_fresh_form() {
            let mut form = filled_contact();
            let request = form.begin_submit(BASE, None).unwrap();
            form.finish_submit(request.id, &ok_receipt(200));
            form.reset();
            assert_eq!(form.phase(), FormPhase::Editing);
            assert_eq!(form.record, SubmissionRecord::new());
            assert!(form.notice.is_none());
        }
    }

    mod submit {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_valid_form_sends_exactly_one_request_with_record_body() {
            let mut form = filled_contact();
            let expected = form.record.to_json();

            let mut submitter = MockSubmitter::new();
            submitter
                .expect_send()
                .withf(move |req| req.body == expected && req.url == "http://api.test/api/contact")
                .times(1)
                .returning(|_| ok_receipt(201));

            let receipt = form.submit(&submitter, BASE, None).await.unwrap();
            assert_eq!(receipt.status, 201);
            assert!(form.is_submitted());
        }

        #[tokio::test]
        async fn test_invalid_form_never_touches_network() {
            for schema in catalog::all() {
                let mut form = FormState::new(schema);
                form.consent = true;
                let mut submitter = MockSubmitter::new();
                submitter.expect_send().times(0);
                let session = Session::new("tok", None);
                let result = form.submit(&submitter, BASE, Some(&session)).await;
                assert!(matches!(result, Err(FormError::Validation(_))));
            }
        }

        #[tokio::test]
        async fn test_server_error_then_retry_succeeds() {
            let mut form = filled_contact();
            let before = form.record.clone();

            let mut submitter = MockSubmitter::new();
            let mut seq = mockall::Sequence::new();
            submitter
                .expect_send()
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| {
                    Err(SubmissionError::Rejected {
                        status: 500,
                        detail: Some("Database unavailable".to_string()),
                    })
                });
            submitter
                .expect_send()
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| ok_receipt(200));

            let err = form.submit(&submitter, BASE, None).await.unwrap_err();
            assert_eq!(err.user_message(), "Database unavailable");
            assert_eq!(form.record, before);
            assert_eq!(form.notice, Some(Notice::error("Database unavailable")));

            form.submit(&submitter, BASE, None).await.unwrap();
            assert_eq!(form.phase(), FormPhase::Submitted { status: 200 });
        }

        #[tokio::test]
        async fn test_volunteer_registration_scenario() {
            let mut form = FormState::new(catalog::schema_for(VOLUNTEER_SLUG).unwrap());
            form.set_field("first_name", "Achieng").unwrap();
            form.set_field("last_name", "Otieno").unwrap();
            form.set_field("email", "achieng@example.com").unwrap();
            form.set_field("phone", "+254 700 000 000").unwrap();
            form.set_field("role", "scorer").unwrap();
            form.set_field("availability_saturday", "all_day").unwrap();
            form.toggle_consent();

            let mut submitter = MockSubmitter::new();
            submitter
                .expect_send()
                .withf(|req| {
                    req.method == Method::Post
                        && req.url == "http://api.test/api/volunteers/register"
                        && req.body["first_name"] == "Achieng"
                        && req.body["last_name"] == "Otieno"
                        && req.body["email"] == "achieng@example.com"
                        && req.body["phone"] == "+254 700 000 000"
                        && req.body["role"] == "scorer"
                        && req.body["availability_saturday"] == "all_day"
                        && req.body["availability_sunday"] == "not_available"
                        && req.body["consent_given"] == true
                })
                .times(1)
                .returning(|_| ok_receipt(200));

            form.submit(&submitter, BASE, None).await.unwrap();
            assert!(form.is_submitted());
        }

        #[test]
        fn test_unset_required_select_counts_as_missing() {
            let mut form = FormState::new(catalog::schema_for("pro-am").unwrap());
            for field in form.schema.fields.clone() {
                if field.kind.is_select() {
                    continue;
                }
                let value = match field.kind {
                    FieldKind::Email => "golfer@example.com",
                    FieldKind::Number => "10",
                    _ => "x",
                };
                form.set_field(&field.name, value).unwrap();
            }
            form.consent = true;

            let mut submitter = MockSubmitter::new();
            submitter.expect_send().times(0);
            let result = tokio_test::block_on(form.submit(&submitter, BASE, None));
            let Err(FormError::Validation(error)) = result else {
                panic!("expected validation failure");
            };
            assert_eq!(
                error.missing,
                vec![
                    "Can you provide handicap certificate?",
                    "Preferred Pro-Am Date",
                    "Polo Shirt Size"
                ]
            );
        }
    }
}
