//! Persistence adapters for Stepwise.
//!
//! Implements the `RoadmapRepository` trait from `stepwise-core` on top
//! of a single JSON file, and resolves the data directory the file (and
//! `config.toml`) lives in.

pub mod json_store;

pub use json_store::JsonRoadmapStore;

use std::path::PathBuf;

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `STEPWISE_DATA_DIR` environment variable
/// 2. Platform home directory: `~/.stepwise`
/// 3. Last resort: `./.stepwise`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("STEPWISE_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".stepwise");
    }

    PathBuf::from(".stepwise")
}
