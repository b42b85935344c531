//! Authentication primitives.
//!
//! - [`jwt`] -- access-token validation against the auth service's secret.

pub mod jwt;
