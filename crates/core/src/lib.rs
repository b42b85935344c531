//! Domain logic for the comic storyboard pipeline.
//!
//! Everything in this crate is pure: no network, no database. The
//! provider, persistence and HTTP layers build on these types.

pub mod consistency;
pub mod error;
pub mod generation;
pub mod mock;
pub mod panel;
pub mod parser;
pub mod scene;
pub mod story;
pub mod types;
