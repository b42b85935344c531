//! Request extractors.
//!
//! - [`auth::AuthUser`] -- The caller's user id from a JWT Bearer token.
//! - [`json::ApiJson`] -- JSON bodies that reject with [`crate::error::AppError`].

pub mod auth;
pub mod json;
