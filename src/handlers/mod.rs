mod coverage;
mod service_info;

pub use coverage::get_coverage;
pub use service_info::service_info;

use crate::coverage::DensitySession;
use crate::formats::BamCatalogReader;
use crate::storage::Storage;
use crate::{Error, Result};
use axum::{Router, routing::get};
use moka::future::Cache;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    sessions: Cache<String, Arc<DensitySession>>,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>, cache_capacity: u64) -> Self {
        Self {
            storage,
            sessions: Cache::builder().max_capacity(cache_capacity).build(),
        }
    }

    /// Density session for `id`, scanning its index on first use.
    pub async fn session(&self, id: &str) -> Result<Arc<DensitySession>> {
        if let Some(session) = self.sessions.get(id).await {
            return Ok(session);
        }

        if !self.storage.exists(id).await? {
            return Err(Error::NotFound(id.to_string()));
        }
        let info = self.storage.file_info(id).await?;
        let index_path = self
            .storage
            .index_path(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("index for {}", id)))?;

        let bam_path = self.storage.file_path(id);
        let catalog = BamCatalogReader::read_catalog(&bam_path, &index_path).await?;

        let session = tokio::task::spawn_blocking(move || {
            DensitySession::open(index_path, catalog, Some(info.size))
        })
        .await
        .map_err(|e| Error::Internal(format!("index scan task failed: {}", e)))??;

        let session = Arc::new(session);
        self.sessions.insert(id.to_string(), session.clone()).await;
        tracing::info!("cached density session for {}", id);
        Ok(session)
    }
}

/// All routes served by readdensity
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/coverage/:id", get(get_coverage))
        .route("/", get(service_info))
        .route("/service-info", get(service_info))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
