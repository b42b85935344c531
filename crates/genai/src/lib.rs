//! Clients for the external generation backends.
//!
//! Provides the generative text/image backend client, the task-based image
//! API client and durable blob storage. Each backend sits behind an
//! `async_trait` seam in [`backend`] so the pipeline can run against
//! test doubles.

pub mod backend;
pub mod error;
pub mod gemini;
pub mod storage;
pub mod task_api;

pub use backend::{BlobStore, GeneratedImage, ImageGenerator, TaskBackend, TaskSnapshot, TextGenerator};
pub use error::GenAiError;
