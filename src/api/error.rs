//! Submission failure taxonomy

use thiserror::Error;

/// Shown when the server gives no detail for a rejected submission
pub const GENERIC_FAILURE: &str = "Submission failed. Please try again.";

/// Shown when the request never produced a response
pub const NETWORK_FAILURE: &str = "An error occurred. Please try again.";

/// Why a submission did not succeed. Every variant is recoverable by retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("server rejected submission with status {status}")]
    Rejected { status: u16, detail: Option<String> },
    #[error("session is not authorized")]
    Unauthorized { detail: Option<String> },
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl SubmissionError {
    /// Classify a non-success HTTP status
    pub fn from_status(status: u16, detail: Option<String>) -> Self {
        if status == 401 {
            Self::Unauthorized { detail }
        } else {
            Self::Rejected { status, detail }
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Message to show the user: the server's detail when it sent one
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { detail, .. } => {
                detail.clone().unwrap_or_else(|| GENERIC_FAILURE.to_string())
            }
            Self::Unauthorized { detail } => detail
                .clone()
                .unwrap_or_else(|| "Your session has expired. Please sign in again.".to_string()),
            Self::Network(_) | Self::Decode(_) => NETWORK_FAILURE.to_string(),
        }
    }
}

impl From<reqwest::Error> for SubmissionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Pull the conventional `detail` string out of an error response body
pub fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(|d| d.as_str())
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_classifies_401() {
        assert!(SubmissionError::from_status(401, None).is_unauthorized());
        assert!(!SubmissionError::from_status(500, None).is_unauthorized());
        assert!(matches!(
            SubmissionError::from_status(422, None),
            SubmissionError::Rejected { status: 422, .. }
        ));
    }

    #[test]
    fn test_user_message_prefers_detail() {
        let err = SubmissionError::Rejected {
            status: 400,
            detail: Some("Email already registered".to_string()),
        };
        assert_eq!(err.user_message(), "Email already registered");
        let err = SubmissionError::Rejected {
            status: 500,
            detail: None,
        };
        assert_eq!(err.user_message(), GENERIC_FAILURE);
        assert_eq!(
            SubmissionError::Network("refused".to_string()).user_message(),
            NETWORK_FAILURE
        );
    }

    #[test]
    fn test_extract_detail() {
        assert_eq!(
            extract_detail(r#"{"detail": "Module is closed"}"#),
            Some("Module is closed".to_string())
        );
        // Validation errors carry a list, not a message
        assert_eq!(extract_detail(r#"{"detail": [{"loc": ["body"]}]}"#), None);
        assert_eq!(extract_detail("<html>502</html>"), None);
        assert_eq!(extract_detail(r#"{"detail": ""}"#), None);
    }
}
