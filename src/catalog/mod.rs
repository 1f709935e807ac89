// Kanban example catalog: built-in templates, remote templates, and the merge

pub mod builtin;
pub mod fetcher;
pub mod loader;
pub mod normalize;
pub mod provider;
pub mod registry;

pub use builtin::{default_catalog, GENERIC_DESCRIPTION};
pub use fetcher::{HttpTemplateSource, RemoteCatalogFetcher, TemplateSource};
pub use loader::CatalogLoader;
pub use normalize::normalize_template;
pub use provider::{CatalogProvider, FixedCatalogProvider, StaticCatalogProvider};
pub use registry::CatalogRegistry;
