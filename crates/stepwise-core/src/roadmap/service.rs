//! Roadmap service: the boundary between callers and the synthesis
//! pipeline plus persisted state.
//!
//! Owns input validation, the per-roadmap in-flight guard for customize
//! calls, and the invariant that failed synthesis never modifies stored
//! state (the repository is only written after a successful pipeline run).

use dashmap::DashSet;

use stepwise_types::error::RoadmapError;
use stepwise_types::roadmap::{Roadmap, RoadmapId};

use crate::llm::TextGenerator;
use crate::repository::RoadmapRepository;
use crate::roadmap::synthesize::Synthesizer;

/// Application service over the synthesizer and the roadmap repository.
///
/// The provider is optional: list/show/toggle/delete/export work without
/// an API key, and only synthesis operations fail with `ApiKeyMissing`,
/// mirroring the generate-disabled-without-key boundary of the original
/// application.
pub struct RoadmapService<P, R> {
    synthesizer: Option<Synthesizer<P>>,
    repository: R,
    in_flight: DashSet<RoadmapId>,
}

impl<P: TextGenerator, R: RoadmapRepository> RoadmapService<P, R> {
    pub fn new(provider: Option<P>, repository: R) -> Self {
        Self {
            synthesizer: provider.map(Synthesizer::new),
            repository,
            in_flight: DashSet::new(),
        }
    }

    /// Generate a fresh roadmap for a topic and persist it at the front
    /// of the list.
    pub async fn generate(&self, topic: &str) -> Result<Roadmap, RoadmapError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(RoadmapError::EmptyTopic);
        }
        let synthesizer = self.synthesizer.as_ref().ok_or(RoadmapError::ApiKeyMissing)?;

        let roadmap = synthesizer.generate(topic).await?;
        self.repository.upsert(&roadmap).await?;
        tracing::info!(id = %roadmap.id, steps = roadmap.steps.len(), "roadmap generated");
        Ok(roadmap)
    }

    /// Customize an existing roadmap in place according to a free-text
    /// instruction.
    ///
    /// Holds the per-roadmap in-flight flag for the duration of the call;
    /// a second customize against the same id fails fast with
    /// `SynthesisInFlight` instead of racing on the previous state. Any
    /// synthesis failure leaves the stored roadmap untouched.
    pub async fn customize(
        &self,
        id: &RoadmapId,
        instruction: &str,
    ) -> Result<Roadmap, RoadmapError> {
        let instruction = instruction.trim();
        if instruction.is_empty() {
            return Err(RoadmapError::EmptyInstruction);
        }
        let synthesizer = self.synthesizer.as_ref().ok_or(RoadmapError::ApiKeyMissing)?;

        let previous = self
            .repository
            .get(id)
            .await?
            .ok_or(RoadmapError::NotFound)?;

        let _guard = self.begin(id).ok_or(RoadmapError::SynthesisInFlight)?;

        let roadmap = synthesizer.customize(&previous, instruction).await?;
        self.repository.upsert(&roadmap).await?;
        tracing::info!(id = %roadmap.id, steps = roadmap.steps.len(), "roadmap customized");
        Ok(roadmap)
    }

    /// The full persisted list, newest first.
    pub async fn list(&self) -> Result<Vec<Roadmap>, RoadmapError> {
        Ok(self.repository.load().await?)
    }

    /// Look up a roadmap by id.
    pub async fn get(&self, id: &RoadmapId) -> Result<Roadmap, RoadmapError> {
        self.repository
            .get(id)
            .await?
            .ok_or(RoadmapError::NotFound)
    }

    /// Flip one step's completion flag and persist the change.
    pub async fn toggle_step(
        &self,
        id: &RoadmapId,
        step_id: &str,
    ) -> Result<Roadmap, RoadmapError> {
        let mut roadmap = self.get(id).await?;
        roadmap
            .toggle_step(step_id)
            .ok_or_else(|| RoadmapError::StepNotFound(step_id.to_string()))?;
        self.repository.upsert(&roadmap).await?;
        Ok(roadmap)
    }

    /// Delete a roadmap by id.
    pub async fn delete(&self, id: &RoadmapId) -> Result<(), RoadmapError> {
        if self.repository.remove(id).await? {
            tracing::info!(%id, "roadmap deleted");
            Ok(())
        } else {
            Err(RoadmapError::NotFound)
        }
    }

    /// Mark a roadmap as having a synthesis in flight.
    ///
    /// Returns `None` when one is already active for this id.
    fn begin(&self, id: &RoadmapId) -> Option<InFlightGuard<'_>> {
        if !self.in_flight.insert(id.clone()) {
            return None;
        }
        Some(InFlightGuard {
            set: &self.in_flight,
            id: id.clone(),
        })
    }
}

/// Clears the in-flight flag on drop, including on error paths.
struct InFlightGuard<'a> {
    set: &'a DashSet<RoadmapId>,
    id: RoadmapId,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set.remove(&self.id);
    }
}
