//! REST client for the task-based image API.
//!
//! `POST {api_url}/imagine` queues a render and returns a task id;
//! `GET {api_url}/task/{id}` reports progress and, eventually, the image URL.
//! Both calls authenticate with a bearer credential.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::backend::{TaskBackend, TaskSnapshot};
use crate::error::GenAiError;

/// Render parameters sent with every submission.
const MODEL: &str = "niji6";
const QUALITY: &str = "high";
const STYLE: &str = "anime";

/// Connection settings for [`TaskApiClient`].
#[derive(Debug, Clone)]
pub struct TaskApiConfig {
    pub api_key: String,
    /// Base URL, e.g. `https://api.midjourney.com/v2`.
    pub api_url: String,
    pub submit_timeout: Duration,
    pub poll_timeout: Duration,
}

/// HTTP client for the task-based image API.
pub struct TaskApiClient {
    client: reqwest::Client,
    config: TaskApiConfig,
}

impl TaskApiClient {
    pub fn new(config: TaskApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_url.trim_end_matches('/'), path)
    }

    /// Parse a successful JSON response body or return an error.
    async fn parse_response(response: reqwest::Response) -> Result<TaskSnapshot, GenAiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GenAiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl TaskBackend for TaskApiClient {
    async fn submit(&self, prompt: &str) -> Result<TaskSnapshot, GenAiError> {
        let body = json!({
            "prompt": prompt,
            "model": MODEL,
            "quality": QUALITY,
            "style": STYLE,
        });

        let response = self
            .client
            .post(self.url("imagine"))
            .bearer_auth(&self.config.api_key)
            .timeout(self.config.submit_timeout)
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn fetch(&self, task_id: &str) -> Result<TaskSnapshot, GenAiError> {
        let response = self
            .client
            .get(self.url(&format!("task/{task_id}")))
            .bearer_auth(&self.config.api_key)
            .timeout(self.config.poll_timeout)
            .send()
            .await?;

        Self::parse_response(response).await
    }
}
