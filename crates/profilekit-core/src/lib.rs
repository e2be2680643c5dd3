//! Core library for profilekit - a client for an OAuth2-backed user-profile
//! service.
//!
//! The library owns the client side of the session lifecycle: the initial
//! session check, OAuth2 login-redirect URL construction, logout, and profile
//! editing against the backend REST API. The `SessionManager` is the single
//! source of truth for authentication state; consumers render from its
//! `Session` snapshots and invoke its operations on user interaction.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod profile;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use auth::{AuthStatus, Session, SessionManager, UpdateProfileError};
pub use config::Config;
pub use models::{AuthStatusResponse, LogoutResponse, ProfilePatch, ProfileUpdateResponse, User};
pub use profile::ProfileForm;
