//! REST client for the Gemini `generateContent` endpoint.
//!
//! One client serves both capabilities: [`TextGenerator`] against the text
//! model and [`ImageGenerator`] against the image model. Image bytes come
//! back inline as base64 and are decoded here.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;

use crate::backend::{GeneratedImage, ImageGenerator, TextGenerator};
use crate::error::GenAiError;

/// Connection settings for [`GeminiClient`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    /// Base URL, e.g. `https://generativelanguage.googleapis.com/v1beta`.
    pub api_url: String,
    pub text_model: String,
    pub image_model: String,
    pub timeout: Duration,
}

/// HTTP client for the Gemini API.
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: Option<String>,
    data: String,
}

impl GeminiClient {
    /// Build a client. The underlying [`reqwest::Client`] honors
    /// `HTTPS_PROXY`/`HTTP_PROXY` from the environment.
    pub fn new(config: GeminiConfig) -> Result<Self, GenAiError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    async fn generate_content(
        &self,
        model: &str,
        body: serde_json::Value,
    ) -> Result<GenerateResponse, GenAiError> {
        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.config.api_url.trim_end_matches('/'),
                model
            ))
            .header("X-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, GenAiError> {
        let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });
        let response = self.generate_content(&self.config.text_model, body).await?;
        extract_text(response)
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage, GenAiError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "responseModalities": ["IMAGE", "TEXT"] },
        });
        let response = self.generate_content(&self.config.image_model, body).await?;
        extract_image(response)
    }
}

// ---- private helpers ----

/// Return the response unchanged on 2xx, or [`GenAiError::Api`] with the body.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, GenAiError> {
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
    Ok(response)
}

/// Concatenated text parts of the first candidate that has any text.
fn extract_text(response: GenerateResponse) -> Result<String, GenAiError> {
    response
        .candidates
        .into_iter()
        .filter_map(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .find(|text| !text.trim().is_empty())
        .ok_or_else(|| GenAiError::MissingPayload("text".to_string()))
}

/// First inline image part across all candidates, decoded.
fn extract_image(response: GenerateResponse) -> Result<GeneratedImage, GenAiError> {
    let inline = response
        .candidates
        .into_iter()
        .filter_map(|candidate| candidate.content)
        .flat_map(|content| content.parts)
        .filter_map(|part| part.inline_data)
        .find(|inline| !inline.data.is_empty())
        .ok_or_else(|| GenAiError::MissingPayload("inline image data".to_string()))?;

    let bytes = STANDARD
        .decode(inline.data.as_bytes())
        .map_err(|e| GenAiError::Decode(e.to_string()))?;

    Ok(GeneratedImage {
        bytes,
        mime_type: inline.mime_type.unwrap_or_else(|| "image/png".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn parse(value: serde_json::Value) -> GenerateResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn text_joins_parts_of_first_candidate() {
        let response = parse(json!({
            "candidates": [{ "content": { "parts": [{ "text": "[{\"a\":" }, { "text": "1}]" }] } }]
        }));
        assert_eq!(extract_text(response).unwrap(), "[{\"a\":1}]");
    }

    #[test]
    fn missing_text_is_an_error() {
        let response = parse(json!({ "candidates": [] }));
        assert_matches!(extract_text(response), Err(GenAiError::MissingPayload(_)));

        let blank = parse(json!({ "candidates": [{ "content": { "parts": [{ "text": "  " }] } }] }));
        assert_matches!(extract_text(blank), Err(GenAiError::MissingPayload(_)));
    }

    #[test]
    fn image_is_decoded_from_inline_data() {
        let data = STANDARD.encode([0x89, b'P', b'N', b'G']);
        let response = parse(json!({
            "candidates": [{ "content": { "parts": [
                { "text": "Here is your panel" },
                { "inlineData": { "mimeType": "image/jpeg", "data": data } }
            ] } }]
        }));
        let image = extract_image(response).unwrap();
        assert_eq!(image.bytes, vec![0x89, b'P', b'N', b'G']);
        assert_eq!(image.extension(), "jpg");
    }

    #[test]
    fn text_only_image_response_is_missing_payload() {
        let response = parse(json!({
            "candidates": [{ "content": { "parts": [{ "text": "I cannot draw that" }] } }]
        }));
        assert_matches!(extract_image(response), Err(GenAiError::MissingPayload(_)));
    }

    #[test]
    fn corrupt_base64_is_a_decode_error() {
        let response = parse(json!({
            "candidates": [{ "content": { "parts": [
                { "inlineData": { "mimeType": "image/png", "data": "not base64!!" } }
            ] } }]
        }));
        assert_matches!(extract_image(response), Err(GenAiError::Decode(_)));
    }
}
