use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, OnceCell};
use tracing::{info, warn};

use super::fetcher::{HttpTemplateSource, RemoteCatalogFetcher, TemplateSource};
use super::provider::{CatalogProvider, StaticCatalogProvider};
use super::registry::CatalogRegistry;
use crate::config::RemoteConfig;
use crate::error::{CatalogError, Result};
use crate::metrics;
use crate::types::Catalog;

/// Merges the static catalog with remote templates and publishes the result.
///
/// The static catalog is captured once at construction. `load` runs the
/// fetch at most once per loader: concurrent and later callers share the
/// same in-flight operation and the same merged value. The merged catalog
/// is immutable; static templates come first in their original order,
/// remote templates follow in backend order.
pub struct CatalogLoader {
    key: String,
    static_catalog: Arc<Catalog>,
    fetcher: RemoteCatalogFetcher,
    registry: Arc<CatalogRegistry>,
    timeout: Duration,
    merged: OnceCell<Arc<Catalog>>,
    updates: watch::Sender<Arc<Catalog>>,
}

impl CatalogLoader {
    pub fn new(
        provider: &dyn CatalogProvider,
        fetcher: RemoteCatalogFetcher,
        registry: Arc<CatalogRegistry>,
        key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let static_catalog = provider.catalog();
        let (updates, _) = watch::channel(Arc::clone(&static_catalog));
        Self {
            key: key.into(),
            static_catalog,
            fetcher,
            registry,
            timeout,
            merged: OnceCell::new(),
            updates,
        }
    }

    /// Loader fetching over HTTP, with the static side seeded in `registry`
    pub fn from_config(config: &RemoteConfig, registry: Arc<CatalogRegistry>) -> Result<Self> {
        let timeout = Duration::from_millis(config.timeout_ms);
        let source: Arc<dyn TemplateSource> = Arc::new(HttpTemplateSource::new(&config.base_url, timeout)?);
        let provider = StaticCatalogProvider::new(Arc::clone(&registry), config.lookup_key.clone());
        Ok(Self::new(
            &provider,
            RemoteCatalogFetcher::new(source),
            registry,
            config.lookup_key.clone(),
            timeout,
        ))
    }

    /// Fully merged catalog; fetches on first call only
    pub async fn load(&self) -> Arc<Catalog> {
        let merged = self.merged.get_or_init(|| self.merge_and_publish()).await;
        Arc::clone(merged)
    }

    /// Merged catalog when ready, otherwise the static one. Never waits.
    pub fn snapshot(&self) -> Arc<Catalog> {
        self.merged
            .get()
            .cloned()
            .unwrap_or_else(|| Arc::clone(&self.static_catalog))
    }

    /// Receiver that starts at the static catalog and sees the merged one once published
    pub fn subscribe(&self) -> watch::Receiver<Arc<Catalog>> {
        self.updates.subscribe()
    }

    pub fn is_loaded(&self) -> bool {
        self.merged.initialized()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    async fn merge_and_publish(&self) -> Arc<Catalog> {
        let remote = match tokio::time::timeout(self.timeout, self.fetcher.fetch()).await {
            Ok(templates) => templates,
            Err(_) => {
                let err = CatalogError::Timeout(self.timeout.as_millis() as u64);
                metrics::fetch::failed("timeout");
                warn!("Could not load configurable project templates: {}", err);
                Vec::new()
            }
        };

        let remote_count = remote.len();
        let merged = Arc::new(self.static_catalog.with_appended(remote));

        self.registry.add(&self.key, Arc::clone(&merged));
        self.updates.send_replace(Arc::clone(&merged));
        metrics::fetch::published();

        info!(
            key = %self.key,
            total = merged.examples.len(),
            remote = remote_count,
            "Published kanban examples"
        );
        info!(names = ?merged.template_names(), "Template names");
        merged
    }
}
