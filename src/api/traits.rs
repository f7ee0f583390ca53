//! Trait abstraction for the submission transport to enable mocking in tests

use super::error::SubmissionError;
use crate::schema::Method;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

/// One outbound submission, fully built before it leaves the form
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRequest {
    /// Correlates the outcome with the form that started it
    pub id: Uuid,
    pub method: Method,
    pub url: String,
    pub body: Value,
    pub bearer: Option<String>,
}

/// Successful submission
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitReceipt {
    pub status: u16,
    /// Parsed response body, `Value::Null` when empty or not JSON
    pub body: Value,
}

/// Availability of one application module as reported by the server
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModuleStatus {
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
}

/// Transport for form submissions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Submitter: Send + Sync {
    /// Send one request; any 2xx status is success
    async fn send(&self, request: SubmissionRequest) -> Result<SubmitReceipt, SubmissionError>;

    /// List the public application modules and whether they accept applications
    async fn public_modules(&self) -> Result<Vec<ModuleStatus>, SubmissionError>;

    /// Fetch a collection path (relative to the API base) as raw JSON
    async fn list(&self, path: String, bearer: Option<String>) -> Result<Value, SubmissionError>;
}
