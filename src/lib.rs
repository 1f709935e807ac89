pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod markers;
pub mod metrics;
pub mod server;
pub mod templates;
pub mod types;

pub use catalog::{CatalogLoader, CatalogRegistry};
pub use error::{CatalogError, Result};
pub use types::{Catalog, RawTemplate, RichText, Template};
