use crate::models::User;

/// Coarse authentication state derived from the session snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    /// No session check has completed yet.
    Unknown,
    Authenticated,
    Anonymous,
}

impl std::fmt::Display for AuthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthStatus::Unknown => write!(f, "Unknown"),
            AuthStatus::Authenticated => write!(f, "Authenticated"),
            AuthStatus::Anonymous => write!(f, "Anonymous"),
        }
    }
}

/// Client-held view of the current session.
///
/// `user == None` means the UI must treat the session as unauthenticated.
/// `error` is advisory: user-dismissible, auto-expiring, and never a reason
/// to block further operations.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        // Loading starts true: the initial auth check is always pending
        Self {
            user: None,
            loading: true,
            error: None,
        }
    }
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Derive the coarse state machine position.
    ///
    /// An in-flight re-check keeps an existing user Authenticated; only the
    /// initial check (no user yet) reads as Unknown.
    pub fn status(&self) -> AuthStatus {
        if self.user.is_some() {
            AuthStatus::Authenticated
        } else if self.loading {
            AuthStatus::Unknown
        } else {
            AuthStatus::Anonymous
        }
    }
}
