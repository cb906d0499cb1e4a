//! Completion provider implementations.
//!
//! Contains concrete implementations of the [`TextGenerator`] trait
//! defined in `stepwise-core`, currently Gemini only.
//!
//! [`TextGenerator`]: stepwise_core::llm::TextGenerator

pub mod gemini;

pub use gemini::GeminiProvider;
