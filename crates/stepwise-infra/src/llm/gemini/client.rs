//! GeminiProvider -- concrete [`TextGenerator`] implementation for the
//! Gemini `generateContent` API.
//!
//! Sends a single non-streaming POST per call, with the API key supplied
//! as the `key` query parameter the endpoint expects. The key is wrapped
//! in [`secrecy::SecretString`] and is never logged or included in
//! `Debug` output.

use secrecy::{ExposeSecret, SecretString};

use stepwise_core::llm::TextGenerator;
use stepwise_types::error::LlmError;

use super::types::{GeminiRequest, GeminiResponse};

/// Gemini text-completion provider.
///
/// Implements [`TextGenerator`] for the generativelanguage
/// `generateContent` endpoint. One request per call; no streaming, no
/// retry, and no timeout beyond the reqwest transport default.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";

    /// Create a new Gemini provider.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Gemini API key wrapped in SecretString
    /// * `model` - Model identifier (e.g., "gemini-2.0-flash")
    pub fn new(api_key: SecretString, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            model,
        }
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Build the generateContent URL for the configured model. The API
    /// key is attached separately as a query parameter.
    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

// GeminiProvider intentionally does NOT derive Debug so the API key
// cannot leak through formatting.

impl TextGenerator for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let body = GeminiRequest::from_prompt(prompt);

        let response = self
            .client
            .post(self.url())
            .query(&[("key", self.api_key.expose_secret())])
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => LlmError::AuthenticationFailed,
                429 => LlmError::RateLimited {
                    retry_after_ms: None,
                },
                _ => LlmError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let gemini_resp: GeminiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        gemini_resp.first_candidate_text().ok_or_else(|| {
            LlmError::Deserialization("response contained no candidates".to_string())
        })
    }
}
