//! Client-side session state management.
//!
//! `SessionManager` is the single source of truth for authentication state.
//! It wraps the backend's session, logout, and profile endpoints and converts
//! every failure into state a consumer can render: a nullable user, a loading
//! flag, and an advisory, auto-expiring error message.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::models::{ProfilePatch, User};

use super::Session;

/// Seconds an advisory error stays visible before auto-dismissal.
const ERROR_DISMISS_SECS: u64 = 5;

/// Fixed user-facing message for failed logouts.
const LOGOUT_FAILED: &str = "Logout failed. Please try again.";

/// Fallback message when a profile update fails without a more specific cause.
const UPDATE_FAILED: &str = "Profile update failed";

/// Profile update failure, carrying the resolved user-facing message.
///
/// The same message is mirrored into the shared session `error` field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct UpdateProfileError {
    pub message: String,
}

struct Inner {
    session: Session,
    // Bumped on every error change; a dismissal task only clears the error
    // whose epoch it captured.
    error_epoch: u64,
    dismiss: Option<JoinHandle<()>>,
}

/// Single source of truth for authentication state.
///
/// Constructor-injected into consumers; share it behind an `Arc` when more
/// than one surface needs it. All state mutation happens on task resumption
/// under the internal lock, in call-resolution order.
pub struct SessionManager {
    api: ApiClient,
    state: Arc<RwLock<Inner>>,
    error_ttl: Duration,
}

impl SessionManager {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(Inner {
                session: Session::default(),
                error_epoch: 0,
                dismiss: None,
            })),
            error_ttl: Duration::from_secs(ERROR_DISMISS_SECS),
        }
    }

    /// Create a manager and run the initial session check.
    pub async fn connect(api: ApiClient) -> Self {
        let manager = Self::new(api);
        manager.check_auth_status().await;
        manager
    }

    /// Override how long an advisory error stays visible.
    pub fn with_error_ttl(mut self, ttl: Duration) -> Self {
        self.error_ttl = ttl;
        self
    }

    /// Snapshot of the current session state.
    pub async fn session(&self) -> Session {
        self.state.read().await.session.clone()
    }

    pub async fn user(&self) -> Option<User> {
        self.state.read().await.session.user.clone()
    }

    pub async fn loading(&self) -> bool {
        self.state.read().await.session.loading
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.session.error.clone()
    }

    /// Re-derive the session from the backend.
    ///
    /// An unauthenticated visitor is an expected condition, so failures here
    /// are logged and absorbed: the session just reads as anonymous. The
    /// loading flag is never left set, whichever way the call resolves.
    pub async fn check_auth_status(&self) {
        {
            let mut inner = self.state.write().await;
            inner.session.loading = true;
        }

        let result = self.api.fetch_auth_status().await;

        let mut inner = self.state.write().await;
        match result {
            Ok(status) => {
                inner.session.user = if status.authenticated {
                    status.user
                } else {
                    None
                };
            }
            Err(err) => {
                warn!(error = %err, "Auth check failed");
                inner.session.user = None;
            }
        }
        inner.session.loading = false;
    }

    /// Build the OAuth2 entry-point URL for a provider.
    ///
    /// No local state changes: the caller performs the full-page navigation
    /// and control leaves the application until the backend redirects back.
    pub fn login(&self, provider: &str) -> String {
        self.api.authorization_url(provider)
    }

    /// Terminate the backend session.
    ///
    /// On failure the previous user value stays visible (stale but known
    /// good) and a fixed message lands in the shared error field.
    pub async fn logout(&self) -> Result<()> {
        match self.api.logout().await {
            Ok(()) => {
                let mut inner = self.state.write().await;
                inner.session.user = None;
                debug!("Session cleared after logout");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Logout failed");
                self.set_error(LOGOUT_FAILED).await;
                Err(err)
            }
        }
    }

    /// Submit a profile update.
    ///
    /// Success replaces the whole user value with the server's copy. Any
    /// failure leaves the user unchanged, mirrors the resolved message into
    /// the shared error field, and returns it. Message precedence:
    /// server-supplied error string, then transport/parse error, then the
    /// fixed fallback.
    pub async fn update_profile(
        &self,
        patch: &ProfilePatch,
    ) -> std::result::Result<User, UpdateProfileError> {
        match self.api.update_profile(patch).await {
            Ok(resp) if resp.success => {
                if let Some(user) = resp.user {
                    let mut inner = self.state.write().await;
                    inner.session.user = Some(user.clone());
                    Ok(user)
                } else {
                    // success without a user payload is a malformed response
                    Err(self.fail_update(resolve_update_error(None, None)).await)
                }
            }
            Ok(resp) => Err(self.fail_update(resolve_update_error(resp.error, None)).await),
            Err(err) => {
                warn!(error = %err, "Profile update failed");
                Err(self
                    .fail_update(resolve_update_error(None, Some(err.to_string())))
                    .await)
            }
        }
    }

    /// Dismiss the advisory error. Idempotent.
    pub async fn clear_error(&self) {
        let mut inner = self.state.write().await;
        if let Some(handle) = inner.dismiss.take() {
            handle.abort();
        }
        inner.session.error = None;
        inner.error_epoch += 1;
    }

    async fn fail_update(&self, message: String) -> UpdateProfileError {
        self.set_error(message.clone()).await;
        UpdateProfileError { message }
    }

    /// Record an advisory error and schedule its dismissal.
    ///
    /// The pending task is cancelled whenever the error changes before
    /// expiry, and it holds only a weak state reference, so it can never
    /// mutate state after the manager is torn down.
    async fn set_error(&self, message: impl Into<String>) {
        let mut inner = self.state.write().await;
        if let Some(handle) = inner.dismiss.take() {
            handle.abort();
        }
        inner.session.error = Some(message.into());
        inner.error_epoch += 1;

        let epoch = inner.error_epoch;
        let ttl = self.error_ttl;
        let state = Arc::downgrade(&self.state);
        inner.dismiss = Some(tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            if let Some(state) = state.upgrade() {
                let mut inner = state.write().await;
                if inner.error_epoch == epoch {
                    inner.session.error = None;
                    inner.dismiss = None;
                }
            }
        }));
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.state.try_write() {
            if let Some(handle) = inner.dismiss.take() {
                handle.abort();
            }
        }
    }
}

/// Resolve the user-facing message for a failed update.
/// Precedence: server error string > exception message > fixed fallback.
fn resolve_update_error(server: Option<String>, exception: Option<String>) -> String {
    server
        .filter(|s| !s.is_empty())
        .or_else(|| exception.filter(|s| !s.is_empty()))
        .unwrap_or_else(|| UPDATE_FAILED.to_string())
}
