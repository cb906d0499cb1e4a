//! The roadmap generation pipeline.
//!
//! `prompt` builds the instruction text, `extract` pulls the JSON span out
//! of the raw reply, `synthesize` turns the span into a validated
//! [`Roadmap`](stepwise_types::roadmap::Roadmap), and `service` wires the
//! pipeline to a repository behind the double-submit guard.

pub mod extract;
pub mod prompt;
pub mod service;
pub mod synthesize;

pub use service::RoadmapService;
pub use synthesize::{SynthesisMode, Synthesizer};
