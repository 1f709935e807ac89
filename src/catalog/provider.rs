use std::sync::Arc;

use super::builtin::default_catalog;
use super::registry::CatalogRegistry;
use crate::types::Catalog;

/// Supplies the static side of the merge
pub trait CatalogProvider: Send + Sync {
    fn catalog(&self) -> Arc<Catalog>;
}

/// Returns the catalog seeded under the lookup key, falling back to the
/// built-in catalog. Published merges are not read back.
pub struct StaticCatalogProvider {
    registry: Arc<CatalogRegistry>,
    key: String,
}

impl StaticCatalogProvider {
    pub fn new(registry: Arc<CatalogRegistry>, key: impl Into<String>) -> Self {
        Self {
            registry,
            key: key.into(),
        }
    }
}

impl CatalogProvider for StaticCatalogProvider {
    fn catalog(&self) -> Arc<Catalog> {
        self.registry
            .seed_for(&self.key)
            .unwrap_or_else(default_catalog)
    }
}

/// Always hands out the same catalog
pub struct FixedCatalogProvider(pub Arc<Catalog>);

impl CatalogProvider for FixedCatalogProvider {
    fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.0)
    }
}
