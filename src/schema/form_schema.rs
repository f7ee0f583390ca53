//! Form schemas: ordered fields plus submission metadata

use super::field::{FieldDescriptor, FieldKind};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// HTTP method used for a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Post,
    Put,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
        }
    }
}

/// Where a form is submitted, relative to the API base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub path: String,
}

impl Endpoint {
    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
        }
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self {
            method: Method::Put,
            path: path.into(),
        }
    }

    /// Join the endpoint path onto an API base URL
    pub fn url(&self, base: &str) -> String {
        join_url(base, &self.path)
    }
}

/// Join a path onto a base URL with exactly one slash between them
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Shape of the JSON body built from the record
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BodyShape {
    /// The body is the record itself
    #[default]
    Bare,
    /// The record is nested under a single key
    Wrapped(String),
}

impl BodyShape {
    pub fn wrap(&self, record: Value) -> Value {
        match self {
            Self::Bare => record,
            Self::Wrapped(key) => {
                let mut outer = Map::new();
                outer.insert(key.clone(), record);
                Value::Object(outer)
            }
        }
    }
}

/// Whether submitting needs an authenticated session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthRequirement {
    #[default]
    Public,
    Session,
}

/// Cross-field constraint checked at submit time
#[derive(Debug, Clone, PartialEq)]
pub enum FormRule {
    /// At least one of `fields` must hold something other than `value`
    AnyDiffers {
        fields: Vec<String>,
        value: String,
        message: String,
    },
    /// A non-blank `field` must be a number within `min..=max`
    InRange {
        field: String,
        min: f64,
        max: f64,
        message: String,
    },
}

impl FormRule {
    pub fn message(&self) -> &str {
        match self {
            Self::AnyDiffers { message, .. } | Self::InRange { message, .. } => message,
        }
    }

    /// Names of the fields the rule reads
    pub fn fields(&self) -> Vec<&str> {
        match self {
            Self::AnyDiffers { fields, .. } => fields.iter().map(String::as_str).collect(),
            Self::InRange { field, .. } => vec![field.as_str()],
        }
    }
}

/// Schema configuration mistakes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("field name `{0}` appears more than once")]
    DuplicateField(String),
    #[error("select field `{0}` offers no options")]
    EmptyOptions(String),
    #[error("initial value `{value}` of `{field}` is not an offered option")]
    InitialNotOffered { field: String, value: String },
    #[error("rule refers to unknown field `{0}`")]
    UnknownRuleField(String),
}

/// A declarative form: ordered fields and where to send them
#[derive(Debug, Clone, PartialEq)]
pub struct FormSchema {
    /// Identifier used to select the schema (module slug)
    pub slug: String,
    pub title: String,
    pub description: String,
    pub fields: Vec<FieldDescriptor>,
    pub endpoint: Endpoint,
    pub body: BodyShape,
    /// Terms the user must accept; `None` means no consent is asked for
    pub consent_text: Option<String>,
    /// Body key that carries the consent flag, for endpoints that want it sent
    pub consent_field: Option<String>,
    pub auth: AuthRequirement,
    pub rules: Vec<FormRule>,
    /// Whether the server can switch this form off as an application module
    pub module_gated: bool,
}

impl FormSchema {
    pub fn new(slug: &str, title: &str, endpoint: Endpoint) -> Self {
        Self {
            slug: slug.to_string(),
            title: title.to_string(),
            description: String::new(),
            fields: Vec::new(),
            endpoint,
            body: BodyShape::Bare,
            consent_text: None,
            consent_field: None,
            auth: AuthRequirement::Public,
            rules: Vec::new(),
            module_gated: false,
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn fields(mut self, fields: Vec<FieldDescriptor>) -> Self {
        self.fields = fields;
        self
    }

    /// Nest the record under `key` in the request body
    pub fn wrapped(mut self, key: &str) -> Self {
        self.body = BodyShape::Wrapped(key.to_string());
        self
    }

    pub fn consent(mut self, text: &str) -> Self {
        self.consent_text = Some(text.to_string());
        self
    }

    /// Send the consent flag as a boolean under `name`
    pub fn consent_field(mut self, name: &str) -> Self {
        self.consent_field = Some(name.to_string());
        self
    }

    pub fn session_required(mut self) -> Self {
        self.auth = AuthRequirement::Session;
        self
    }

    pub fn rule(mut self, rule: FormRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn module_gated(mut self) -> Self {
        self.module_gated = true;
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn requires_consent(&self) -> bool {
        self.consent_text.is_some()
    }

    /// Verify the schema's structural invariants
    pub fn check(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
            if let FieldKind::Select(options) = &field.kind {
                if options.is_empty() {
                    return Err(SchemaError::EmptyOptions(field.name.clone()));
                }
                if let Some(initial) = &field.initial {
                    if !options.contains(initial) {
                        return Err(SchemaError::InitialNotOffered {
                            field: field.name.clone(),
                            value: initial.clone(),
                        });
                    }
                }
            }
        }
        if let Some(name) = self.consent_field.as_deref().filter(|n| seen.contains(n)) {
            return Err(SchemaError::DuplicateField(name.to_string()));
        }
        for rule in &self.rules {
            if let Some(unknown) = rule.fields().into_iter().find(|name| !seen.contains(name)) {
                return Err(SchemaError::UnknownRuleField(unknown.to_string()));
            }
        }
        Ok(())
    }
}
