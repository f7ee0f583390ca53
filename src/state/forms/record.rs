//! Submission record: the values entered into one form instance

use crate::schema::FormSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Flat mapping from field name to entered value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionRecord {
    values: BTreeMap<String, String>,
}

impl SubmissionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record seeded with the schema's initial values
    pub fn for_schema(schema: &FormSchema) -> Self {
        let values = schema
            .fields
            .iter()
            .filter_map(|f| f.initial.as_ref().map(|v| (f.name.clone(), v.clone())))
            .collect();
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Store a value, replacing any previous one for the same name
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    /// Absent and empty values both count as blank
    pub fn is_blank(&self, name: &str) -> bool {
        self.get(name).map_or(true, str::is_empty)
    }

    /// The record as a JSON object
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SubmissionRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Endpoint, FieldDescriptor};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_new_record_is_empty() {
        let record = SubmissionRecord::new();
        assert_eq!(record.to_json(), json!({}));
        assert!(record.is_blank("anything"));
    }

    #[test]
    fn test_set_is_last_write_wins() {
        let mut record = SubmissionRecord::new();
        record.set("email", "a@b.co");
        let after_first = record.clone();
        record.set("email", "a@b.co");
        assert_eq!(record, after_first);
        record.set("email", "c@d.co");
        assert_eq!(record.get("email"), Some("c@d.co"));
        assert_eq!(record.to_json(), json!({"email": "c@d.co"}));
    }

    #[test]
    fn test_empty_string_is_blank() {
        let mut record = SubmissionRecord::new();
        record.set("name", "");
        assert!(record.is_blank("name"));
        record.set("name", " ");
        assert!(!record.is_blank("name"));
    }

    #[test]
    fn test_for_schema_seeds_initial_values() {
        let schema = FormSchema::new("s", "S", Endpoint::post("/s")).fields(vec![
            FieldDescriptor::text("name", "Name"),
            FieldDescriptor::select("day", "Day", &["yes", "no"]).initial("no"),
        ]);
        let record = SubmissionRecord::for_schema(&schema);
        assert_eq!(record.get("day"), Some("no"));
        assert_eq!(record.get("name"), None);
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let record: SubmissionRecord = [("first_name", "Wanjiru"), ("role", "marshal")]
            .into_iter()
            .collect();
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"first_name": "Wanjiru", "role": "marshal"})
        );
        assert_eq!(record.to_json(), serde_json::to_value(&record).unwrap());
    }
}
