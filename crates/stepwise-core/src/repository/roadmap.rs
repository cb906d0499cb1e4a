//! Roadmap repository trait definition.

use stepwise_types::error::RepositoryError;
use stepwise_types::roadmap::{Roadmap, RoadmapId};

/// Repository trait for the persisted, ordered roadmap list.
///
/// The list is ordered newest-first; `upsert` and `remove` preserve the
/// relative order of untouched entries. Implementations must tolerate
/// empty or corrupt storage on load (treated as "no prior roadmaps",
/// never fatal).
///
/// Implementations live in stepwise-infra (e.g., `JsonRoadmapStore`).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait RoadmapRepository: Send + Sync {
    /// Load the full ordered list. Empty or unreadable storage yields an
    /// empty list rather than an error.
    fn load(&self)
    -> impl std::future::Future<Output = Result<Vec<Roadmap>, RepositoryError>> + Send;

    /// Replace the persisted list wholesale.
    fn save(
        &self,
        roadmaps: &[Roadmap],
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Look up a roadmap by id.
    fn get(
        &self,
        id: &RoadmapId,
    ) -> impl std::future::Future<Output = Result<Option<Roadmap>, RepositoryError>> + Send;

    /// Replace an existing roadmap in place, or insert a new one at the
    /// front of the list.
    fn upsert(
        &self,
        roadmap: &Roadmap,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Remove a roadmap by id. Returns whether an entry was removed.
    fn remove(
        &self,
        id: &RoadmapId,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}
