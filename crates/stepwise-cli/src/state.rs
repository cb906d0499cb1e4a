//! Application state wiring the pipeline together.
//!
//! AppState holds the concrete roadmap service used by every command.
//! The service is generic over provider/repository traits, but AppState
//! pins it to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use stepwise_core::roadmap::RoadmapService;
use stepwise_infra::config::load_global_config;
use stepwise_infra::llm::GeminiProvider;
use stepwise_infra::secret::resolve_api_key;
use stepwise_infra::storage::{JsonRoadmapStore, resolve_data_dir};

/// Concrete type alias for the service generics pinned to infra
/// implementations.
pub type ConcreteRoadmapService = RoadmapService<GeminiProvider, JsonRoadmapStore>;

/// Shared application state for all CLI commands.
pub struct AppState {
    pub roadmap_service: Arc<ConcreteRoadmapService>,
    pub data_dir: PathBuf,
    pub model: String,
    pub has_api_key: bool,
}

impl AppState {
    /// Initialize the application state: resolve the data directory,
    /// load config, and wire the service.
    ///
    /// A missing API key is not fatal here -- list/show/toggle/delete
    /// work without one; only generate/customize need it.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_global_config(&data_dir).await;

        let api_key = resolve_api_key();
        let has_api_key = api_key.is_some();
        let provider = api_key.map(|key| {
            let provider = GeminiProvider::new(key, config.model.clone());
            match &config.base_url {
                Some(base_url) => provider.with_base_url(base_url.clone()),
                None => provider,
            }
        });

        let store = JsonRoadmapStore::new(&data_dir);
        let roadmap_service = RoadmapService::new(provider, store);

        Ok(Self {
            roadmap_service: Arc::new(roadmap_service),
            data_dir,
            model: config.model,
            has_api_key,
        })
    }
}
