//! Session and authentication state management.
//!
//! This module provides:
//! - `SessionManager`: the single source of truth for authentication state
//! - `Session` / `AuthStatus`: the snapshot consumers render from
//!
//! Sessions live only for the process lifetime and are re-derived from the
//! backend on startup via the session check.

pub mod manager;
pub mod session;

pub use manager::{SessionManager, UpdateProfileError};
pub use session::{AuthStatus, Session};
