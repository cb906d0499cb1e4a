//! Shared domain types for Stepwise.
//!
//! This crate contains the core domain types used across the Stepwise
//! application: Roadmap, Step, Resource, configuration, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod error;
pub mod roadmap;
