//! JWT access-token validation.
//!
//! Access tokens are HS256-signed JWTs issued by the auth service. This
//! server only holds the shared secret and reads the caller's user id from
//! the `sub` claim.

use comicflow_core::types::DbId;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Deserializer};

/// The claims this server reads from an access token.
#[derive(Debug, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id. The auth service writes
    /// it as a string (`"3"`); plain integers are accepted too.
    #[serde(deserialize_with = "subject_id")]
    pub sub: DbId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Accepts `3` or `"3"` for the subject claim.
fn subject_id<'de, D>(deserializer: D) -> Result<DbId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Subject {
        Id(DbId),
        Text(String),
    }

    match Subject::deserialize(deserializer)? {
        Subject::Id(id) => Ok(id),
        Subject::Text(text) => text.trim().parse().map_err(|_| {
            serde::de::Error::custom(format!("subject '{text}' is not a user id"))
        }),
    }
}

/// Configuration for JWT validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the auth service.
    pub secret: String,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var      | Required | Default |
    /// |--------------|----------|---------|
    /// | `JWT_SECRET` | **yes**  | --      |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");
        Self { secret }
    }
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}
