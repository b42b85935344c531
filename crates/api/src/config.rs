use std::time::Duration;

use comicflow_core::error::CoreError;
use comicflow_core::mock::MockStatusMode;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `300`). Generation runs
    /// inside the request, so this bounds a whole batch.
    pub request_timeout_secs: u64,
    /// JWT verification settings.
    pub jwt: JwtConfig,
    /// External generation backends and blob storage.
    pub providers: ProviderConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `5000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `300`                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            providers: ProviderConfig::from_env(),
        }
    }
}

// ---------------------------------------------------------------------------
// Providers
// ---------------------------------------------------------------------------

/// Which image provider serves generation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Synchronous image backend; results are final immediately.
    Sync,
    /// Task-based image API; results are polled.
    Task,
}

impl ProviderKind {
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sync" => Ok(Self::Sync),
            "task" => Ok(Self::Task),
            other => Err(CoreError::Validation(format!(
                "Invalid image provider '{other}'. Must be one of: sync, task"
            ))),
        }
    }
}

/// Settings for the external generation backends.
///
/// A missing API key leaves that backend unconfigured; the pipeline then
/// uses placeholder generation for it.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_api_url: String,
    pub gemini_text_model: String,
    pub gemini_image_model: String,
    pub gemini_timeout: Duration,
    pub task_api_key: Option<String>,
    pub task_api_url: String,
    pub task_submit_timeout: Duration,
    pub task_poll_timeout: Duration,
    pub image_provider: ProviderKind,
    pub mock_status_mode: MockStatusMode,
    /// Directory generated images are written to.
    pub upload_dir: String,
    /// Public URL prefix under which `upload_dir` is served.
    pub upload_url_prefix: String,
}

impl Default for ProviderConfig {
    /// No backends configured; everything else at its default.
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_api_url: "https://generativelanguage.googleapis.com/v1beta".into(),
            gemini_text_model: "gemini-3-flash-preview".into(),
            gemini_image_model: "gemini-2.5-flash-image".into(),
            gemini_timeout: Duration::from_secs(120),
            task_api_key: None,
            task_api_url: "https://api.midjourney.com/v2".into(),
            task_submit_timeout: Duration::from_secs(30),
            task_poll_timeout: Duration::from_secs(10),
            image_provider: ProviderKind::Sync,
            mock_status_mode: MockStatusMode::Reshuffle,
            upload_dir: "uploads".into(),
            upload_url_prefix: "/uploads".into(),
        }
    }
}

impl ProviderConfig {
    /// Load provider settings from environment variables with defaults.
    ///
    /// | Env Var               | Default                                            |
    /// |-----------------------|----------------------------------------------------|
    /// | `GEMINI_API_KEY`      | unset (mock text analysis and sync images)         |
    /// | `GEMINI_API_URL`      | `https://generativelanguage.googleapis.com/v1beta` |
    /// | `GEMINI_TEXT_MODEL`   | `gemini-3-flash-preview`                           |
    /// | `GEMINI_IMAGE_MODEL`  | `gemini-2.5-flash-image`                           |
    /// | `MIDJOURNEY_API_KEY`  | unset (mock task images)                           |
    /// | `MIDJOURNEY_API_URL`  | `https://api.midjourney.com/v2`                    |
    /// | `IMAGE_PROVIDER`      | `sync`                                             |
    /// | `MOCK_STATUS_MODE`    | `reshuffle`                                        |
    /// | `UPLOAD_DIR`          | `uploads`                                          |
    /// | `UPLOAD_URL_PREFIX`   | `/uploads`                                         |
    ///
    /// # Panics
    ///
    /// Panics on an unknown `IMAGE_PROVIDER` or `MOCK_STATUS_MODE`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let var = |name: &str, default: String| std::env::var(name).unwrap_or(default);
        let secret = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let image_provider = std::env::var("IMAGE_PROVIDER")
            .map(|v| ProviderKind::parse(&v).unwrap_or_else(|e| panic!("{e}")))
            .unwrap_or(defaults.image_provider);

        let mock_status_mode = std::env::var("MOCK_STATUS_MODE")
            .map(|v| MockStatusMode::parse(&v).unwrap_or_else(|e| panic!("{e}")))
            .unwrap_or(defaults.mock_status_mode);

        Self {
            gemini_api_key: secret("GEMINI_API_KEY"),
            gemini_api_url: var("GEMINI_API_URL", defaults.gemini_api_url),
            gemini_text_model: var("GEMINI_TEXT_MODEL", defaults.gemini_text_model),
            gemini_image_model: var("GEMINI_IMAGE_MODEL", defaults.gemini_image_model),
            task_api_key: secret("MIDJOURNEY_API_KEY"),
            task_api_url: var("MIDJOURNEY_API_URL", defaults.task_api_url),
            image_provider,
            mock_status_mode,
            upload_dir: var("UPLOAD_DIR", defaults.upload_dir),
            upload_url_prefix: var("UPLOAD_URL_PREFIX", defaults.upload_url_prefix),
            ..defaults
        }
    }
}
