//! Data models for the profile backend.
//!
//! This module contains the structures exchanged with the backend API:
//!
//! - `User`: the authenticated user's profile
//! - `ProfilePatch`: the editable subset sent on profile updates
//! - Wire responses: `AuthStatusResponse`, `ProfileUpdateResponse`, `LogoutResponse`

pub mod user;

pub use user::{AuthStatusResponse, LogoutResponse, ProfilePatch, ProfileUpdateResponse, User};
