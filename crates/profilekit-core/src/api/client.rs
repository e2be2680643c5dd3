//! HTTP client for the profile backend.
//!
//! This module provides the `ApiClient` struct for making credentialed
//! requests against the backend's session, logout, and profile endpoints.

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::debug;

use crate::models::{AuthStatusResponse, LogoutResponse, ProfilePatch, ProfileUpdateResponse};

use super::ApiError;

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// API client for the profile backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client for the given backend origin.
    ///
    /// The cookie store is enabled so the backend's session cookie rides
    /// along on every request, matching the browser's credentialed mode.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .cookie_store(true)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Backend origin this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full-navigation OAuth2 entry point for a provider.
    ///
    /// The URL is never fetched here: the embedding surface navigates to it
    /// and control leaves the application until the provider redirects back.
    pub fn authorization_url(&self, provider: &str) -> String {
        format!("{}/oauth2/authorization/{}", self.base_url, provider)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    /// Fetch the current session status.
    pub async fn fetch_auth_status(&self) -> Result<AuthStatusResponse> {
        let url = format!("{}/api/user", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    /// Terminate the backend session.
    pub async fn logout(&self) -> Result<()> {
        let url = format!("{}/api/logout", self.base_url);

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .with_context(|| format!("Failed to send POST request to {}", url))?;

        let response = Self::check_response(response).await?;

        // The body is informational only, but log it when it parses
        let text = response.text().await.unwrap_or_default();
        if let Ok(parsed) = serde_json::from_str::<LogoutResponse>(&text) {
            debug!(message = ?parsed.message, "Logout response received");
        }

        Ok(())
    }

    /// Submit a profile update.
    ///
    /// A non-2xx body that still parses as a `ProfileUpdateResponse` with a
    /// server error string is returned as a structured failure rather than a
    /// transport error, so callers can prefer the server's own message.
    pub async fn update_profile(&self, patch: &ProfilePatch) -> Result<ProfileUpdateResponse> {
        let url = format!("{}/api/profile", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(patch)
            .send()
            .await
            .with_context(|| format!("Failed to send POST request to {}", url))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", url))?;
        debug!(status = %status, "Profile update response received");

        if status.is_success() {
            return serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse JSON response from {}", url));
        }

        if let Ok(parsed) = serde_json::from_str::<ProfileUpdateResponse>(&text) {
            if parsed.error.is_some() {
                return Ok(parsed);
            }
        }

        Err(ApiError::from_status(status, &text).into())
    }
}
