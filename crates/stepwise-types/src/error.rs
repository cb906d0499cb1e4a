use thiserror::Error;

/// Errors from the completion provider (transport level).
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

/// Errors from turning a model reply into a roadmap (synthesis level).
///
/// The transport/extraction/parse taxonomy is kept distinct here so each
/// failure mode is unit-testable; the CLI collapses all three into one
/// generic message at the presentation boundary.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("completion request failed: {0}")]
    Transport(#[from] LlmError),

    #[error("no JSON object found in the model response")]
    NoJsonFound,

    #[error("model response contained malformed JSON: {0}")]
    MalformedJson(String),
}

/// Errors from roadmap operations (service level).
#[derive(Debug, Error)]
pub enum RoadmapError {
    #[error("roadmap not found")]
    NotFound,

    #[error("step '{0}' not found in roadmap")]
    StepNotFound(String),

    #[error("topic must not be empty")]
    EmptyTopic,

    #[error("customization instruction must not be empty")]
    EmptyInstruction,

    #[error("no API key configured")]
    ApiKeyMissing,

    #[error("a customization for this roadmap is already in flight")]
    SynthesisInFlight,

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors from repository operations (storage level).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage I/O error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_error_display() {
        let err = LlmError::Provider {
            message: "HTTP 500: boom".to_string(),
        };
        assert_eq!(err.to_string(), "provider error: HTTP 500: boom");
    }

    #[test]
    fn test_generation_error_wraps_transport() {
        let err = GenerationError::from(LlmError::AuthenticationFailed);
        assert!(matches!(err, GenerationError::Transport(_)));
        assert!(err.to_string().contains("authentication failed"));
    }

    #[test]
    fn test_roadmap_error_transparent_generation() {
        let err = RoadmapError::from(GenerationError::NoJsonFound);
        assert_eq!(err.to_string(), "no JSON object found in the model response");
    }

    #[test]
    fn test_step_not_found_display() {
        let err = RoadmapError::StepNotFound("step-3".to_string());
        assert!(err.to_string().contains("step-3"));
    }
}
