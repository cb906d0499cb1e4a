//! JSON file roadmap store.
//!
//! Persists the ordered roadmap list as pretty-printed JSON at
//! `{data_dir}/roadmaps.json`, read in full at startup and rewritten on
//! every mutation. Empty or corrupt storage loads as "no prior roadmaps"
//! -- never a fatal error.

use std::path::{Path, PathBuf};

use stepwise_core::repository::RoadmapRepository;
use stepwise_types::error::RepositoryError;
use stepwise_types::roadmap::{Roadmap, RoadmapId};

/// File-backed implementation of [`RoadmapRepository`].
pub struct JsonRoadmapStore {
    path: PathBuf,
}

impl JsonRoadmapStore {
    /// Store roadmaps at `{data_dir}/roadmaps.json`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("roadmaps.json"),
        }
    }

    /// The file backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RoadmapRepository for JsonRoadmapStore {
    async fn load(&self) -> Result<Vec<Roadmap>, RepositoryError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Vec::new());
            }
            Err(err) => {
                tracing::warn!(
                    "Failed to read {}: {err}, treating as empty",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
        };

        match serde_json::from_str(&content) {
            Ok(roadmaps) => Ok(roadmaps),
            Err(err) => {
                tracing::warn!(
                    "Failed to parse {}: {err}, treating as empty",
                    self.path.display()
                );
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, roadmaps: &[Roadmap]) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| RepositoryError::Io(e.to_string()))?;
        }
        let content = serde_json::to_string_pretty(roadmaps)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| RepositoryError::Io(e.to_string()))
    }

    async fn get(&self, id: &RoadmapId) -> Result<Option<Roadmap>, RepositoryError> {
        let roadmaps = self.load().await?;
        Ok(roadmaps.into_iter().find(|r| &r.id == id))
    }

    async fn upsert(&self, roadmap: &Roadmap) -> Result<(), RepositoryError> {
        let mut roadmaps = self.load().await?;
        match roadmaps.iter_mut().find(|r| r.id == roadmap.id) {
            Some(existing) => *existing = roadmap.clone(),
            // New roadmaps go to the front: the list is newest-first.
            None => roadmaps.insert(0, roadmap.clone()),
        }
        self.save(&roadmaps).await
    }

    async fn remove(&self, id: &RoadmapId) -> Result<bool, RepositoryError> {
        let mut roadmaps = self.load().await?;
        let before = roadmaps.len();
        roadmaps.retain(|r| &r.id != id);
        if roadmaps.len() == before {
            return Ok(false);
        }
        self.save(&roadmaps).await?;
        Ok(true)
    }
}
