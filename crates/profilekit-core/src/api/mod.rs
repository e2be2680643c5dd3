//! REST API client module for the profile backend.
//!
//! This module provides the `ApiClient` for communicating with the
//! backend's session, logout, and profile endpoints.
//!
//! Requests are credentialed: the backend issues a session cookie after the
//! OAuth2 redirect flow, and the client's cookie store replays it.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
