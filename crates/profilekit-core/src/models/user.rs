use serde::{Deserialize, Serialize};

/// Authenticated user profile as returned by the backend.
///
/// The backend substitutes empty strings for unset nullable columns, so
/// display code must treat `Some("")` the same as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub bio: Option<String>,
    #[serde(rename = "avatarUrl")]
    pub avatar_url: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

impl User {
    /// Display name with the generic fallback used when none is set.
    pub fn display_name_or_default(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "User",
        }
    }

    /// First letter of the display name, for avatar placeholders.
    pub fn initial(&self) -> char {
        self.display_name_or_default()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('U')
    }
}

/// Partial profile update confined to the editable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct ProfilePatch {
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub bio: String,
}

/// Response from `GET /api/user`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthStatusResponse {
    pub authenticated: bool,
    #[serde(default)]
    pub user: Option<User>,
}

/// Response from `POST /api/profile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdateResponse {
    pub success: bool,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response from `POST /api/logout`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
