/// Errors from the external backend layer.
#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Backend API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response without the expected content.
    #[error("Response missing {0}")]
    MissingPayload(String),

    /// Inline image data could not be decoded.
    #[error("Failed to decode image data: {0}")]
    Decode(String),

    /// Writing to blob storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl GenAiError {
    /// Whether the remote answered and refused, as opposed to never answering.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Api { .. })
    }
}
