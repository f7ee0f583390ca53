//! Submit-time validation of a record against its schema

use super::record::SubmissionRecord;
use crate::schema::{FormRule, FormSchema};
use std::fmt;

/// How many offending labels a summary message names
const MAX_LISTED: usize = 3;

/// Why a record cannot be submitted yet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    /// Labels of required fields that are absent or empty, in schema order
    pub missing: Vec<String>,
    /// Non-empty values a native control would refuse, as "<label> <problem>"
    pub invalid: Vec<String>,
    pub consent_missing: bool,
    /// Messages of violated cross-field rules
    pub rule_failures: Vec<String>,
}

impl ValidationError {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty()
            && self.invalid.is_empty()
            && !self.consent_missing
            && self.rule_failures.is_empty()
    }

    /// Compact one-line summary suitable for an inline notice
    pub fn message(&self) -> String {
        if !self.missing.is_empty() {
            format!("Please fill in: {}", summarize(&self.missing))
        } else if !self.invalid.is_empty() {
            format!("Please correct: {}", summarize(&self.invalid))
        } else if self.consent_missing {
            "Please agree to the terms and conditions".to_string()
        } else if let Some(rule) = self.rule_failures.first() {
            rule.clone()
        } else {
            String::new()
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Join the first few items, marking truncation with an ellipsis
fn summarize(items: &[String]) -> String {
    let listed = items
        .iter()
        .take(MAX_LISTED)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if items.len() > MAX_LISTED {
        format!("{listed}...")
    } else {
        listed
    }
}

fn rule_holds(rule: &FormRule, record: &SubmissionRecord) -> bool {
    match rule {
        FormRule::AnyDiffers { fields, value, .. } => fields.iter().any(|name| {
            record
                .get(name)
                .is_some_and(|current| !current.is_empty() && current != value)
        }),
        FormRule::InRange {
            field, min, max, ..
        } => match record.get(field) {
            None | Some("") => true,
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .is_ok_and(|n| (*min..=*max).contains(&n)),
        },
    }
}

/// Check required fields, value formats, consent and cross-field rules
pub fn validate(
    schema: &FormSchema,
    record: &SubmissionRecord,
    consent: bool,
) -> Result<(), ValidationError> {
    let mut error = ValidationError {
        consent_missing: !consent,
        ..Default::default()
    };

    for field in &schema.fields {
        if record.is_blank(&field.name) {
            if field.required {
                error.missing.push(field.label.clone());
            }
            continue;
        }
        let value = record.get(&field.name).unwrap_or_default();
        if let Some(problem) = field.kind.format_problem(value) {
            error.invalid.push(format!("{} {}", field.label, problem));
        }
    }

    error.rule_failures = schema
        .rules
        .iter()
        .filter(|rule| !rule_holds(rule, record))
        .map(|rule| rule.message().to_string())
        .collect();

    if error.is_empty() {
        Ok(())
    } else {
        Err(error)
    }
}
