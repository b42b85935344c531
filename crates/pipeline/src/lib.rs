//! Storyboard-to-image generation pipeline.
//!
//! Turns story text into scenes ([`analyzer`]), drives the configured
//! image provider ([`provider`]) and materializes a project's storyboards
//! as canvas panels ([`materializer`]). [`service::ComicPipeline`] is the
//! entry point the HTTP layer holds; persistence goes through the
//! [`store::ComicStore`] seam.

pub mod analyzer;
pub mod error;
pub mod materializer;
pub mod provider;
pub mod service;
pub mod store;

pub use error::{PipelineError, ProviderError};
pub use service::ComicPipeline;
