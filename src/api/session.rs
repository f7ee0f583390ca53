//! Admin session passed explicitly to every authenticated submission

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Active,
    /// Rejected by the server or closed locally; never becomes active again
    Invalidated,
}

/// Opaque bearer session for the admin API
#[derive(Debug, Clone)]
pub struct Session {
    token: String,
    pub username: Option<String>,
    state: SessionState,
}

impl Session {
    pub fn new(token: impl Into<String>, username: Option<String>) -> Self {
        Self {
            token: token.into(),
            username,
            state: SessionState::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active && !self.token.is_empty()
    }

    /// Token to send as a bearer credential, if the session is still usable
    pub fn bearer(&self) -> Option<&str> {
        self.is_active().then_some(self.token.as_str())
    }

    pub fn invalidate(&mut self) {
        if self.state == SessionState::Active {
            tracing::warn!(user = ?self.username, "Session invalidated");
        }
        self.state = SessionState::Invalidated;
    }

    /// Name shown in the status bar
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or("admin")
    }
}
