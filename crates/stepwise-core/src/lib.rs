//! Business logic and port trait definitions for Stepwise.
//!
//! This crate defines the "ports" (the text-generation provider trait and
//! the roadmap repository trait) that the infrastructure layer implements,
//! plus the generation pipeline itself: prompt construction, JSON span
//! extraction, synthesis/reconciliation, and the roadmap service. It
//! depends only on `stepwise-types` -- never on HTTP or filesystem crates.

pub mod export;
pub mod llm;
pub mod repository;
pub mod roadmap;
