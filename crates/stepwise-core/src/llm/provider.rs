//! TextGenerator trait definition.
//!
//! This is the abstraction over the external text-completion endpoint.
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use stepwise_types::error::LlmError;

/// Trait for text-completion backends.
///
/// One prompt in, one raw text reply out -- no streaming, no retry. The
/// synthesizer treats any error from `generate` as a transport failure.
///
/// Implementations live in stepwise-infra (e.g., `GeminiProvider`).
pub trait TextGenerator: Send + Sync {
    /// Human-readable provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send the prompt as the sole content of one completion request and
    /// return the raw generated text.
    fn generate(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, LlmError>> + Send;
}
