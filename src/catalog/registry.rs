use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

use crate::types::Catalog;

/// Keyed store the UI layer reads catalogs from.
///
/// Constructed explicitly and handed to whoever needs it; there is no
/// process-wide instance. Static catalogs are seeded separately from the
/// published ones, so publishing a merged catalog never changes what a
/// later merge starts from.
#[derive(Default)]
pub struct CatalogRegistry {
    entries: RwLock<HashMap<String, Arc<Catalog>>>,
    seeds: RwLock<HashMap<String, Arc<Catalog>>>,
}

impl CatalogRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog registered under `key`, or `default` when there is none
    pub fn get(&self, key: &str, default: Option<Arc<Catalog>>) -> Option<Arc<Catalog>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned().or(default)
    }

    /// Register `catalog` under `key`, replacing any previous value
    pub fn add(&self, key: &str, catalog: Arc<Catalog>) {
        debug!(key, templates = catalog.examples.len(), "Registering catalog");
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), catalog);
    }

    /// Set the static catalog for `key`. Readers see it through `get` until
    /// something is published with `add`.
    pub fn seed(&self, key: &str, catalog: Arc<Catalog>) {
        debug!(key, templates = catalog.examples.len(), "Seeding static catalog");
        {
            let mut seeds = self.seeds.write().unwrap_or_else(|e| e.into_inner());
            seeds.insert(key.to_string(), Arc::clone(&catalog));
        }
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.entry(key.to_string()).or_insert(catalog);
    }

    /// Static catalog seeded under `key`, ignoring anything published since
    pub fn seed_for(&self, key: &str) -> Option<Arc<Catalog>> {
        let seeds = self.seeds.read().unwrap_or_else(|e| e.into_inner());
        seeds.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.keys().cloned().collect()
    }
}
