//! Metric names and recording helpers for the catalog loader and the
//! examples endpoint.
//!
//! Recording is a no-op until a recorder is installed with [`init`].

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::fmt;
use std::sync::{Mutex, OnceLock};
use tracing::info;

use crate::error::{CatalogError, Result};

/// All metric names used by the crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Client side
    RemoteFetchSuccess,
    RemoteFetchError,
    RemoteFetchDuration,
    RemoteTemplatesMerged,
    CatalogPublished,

    // Server side
    ExamplesRequests,
    ExamplesServed,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::RemoteFetchSuccess => "kanban_catalog_remote_fetch_success_total",
            MetricName::RemoteFetchError => "kanban_catalog_remote_fetch_error_total",
            MetricName::RemoteFetchDuration => "kanban_catalog_remote_fetch_duration_seconds",
            MetricName::RemoteTemplatesMerged => "kanban_catalog_remote_templates_merged_total",
            MetricName::CatalogPublished => "kanban_catalog_published_total",
            MetricName::ExamplesRequests => "kanban_catalog_examples_requests_total",
            MetricName::ExamplesServed => "kanban_catalog_examples_served_total",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
static INSTALL_LOCK: Mutex<()> = Mutex::new(());

/// Install the Prometheus recorder. Calling it again returns the existing handle.
pub fn init() -> Result<PrometheusHandle> {
    if let Some(handle) = METRICS_HANDLE.get() {
        return Ok(handle.clone());
    }
    // Only one caller may install the global recorder
    let _guard = INSTALL_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(handle) = METRICS_HANDLE.get() {
        return Ok(handle.clone());
    }
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| CatalogError::Config(format!("Failed to install Prometheus recorder: {}", e)))?;
    let handle = METRICS_HANDLE.get_or_init(|| handle).clone();
    info!("Metrics system initialized");
    Ok(handle)
}

/// Prometheus text exposition, if the recorder is installed
pub fn render() -> Option<String> {
    METRICS_HANDLE.get().map(|h| h.render())
}

pub mod fetch {
    use super::MetricName;

    pub fn succeeded(templates: usize, seconds: f64) {
        ::metrics::counter!(MetricName::RemoteFetchSuccess.as_str()).increment(1);
        ::metrics::histogram!(MetricName::RemoteFetchDuration.as_str()).record(seconds);
        ::metrics::counter!(MetricName::RemoteTemplatesMerged.as_str()).increment(templates as u64);
    }

    pub fn failed(reason: &'static str) {
        ::metrics::counter!(MetricName::RemoteFetchError.as_str(), "reason" => reason).increment(1);
    }

    pub fn published() {
        ::metrics::counter!(MetricName::CatalogPublished.as_str()).increment(1);
    }
}

pub mod server {
    use super::MetricName;

    pub fn examples_served(count: usize) {
        ::metrics::counter!(MetricName::ExamplesRequests.as_str()).increment(1);
        ::metrics::counter!(MetricName::ExamplesServed.as_str()).increment(count as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names_are_prefixed() {
        let all = [
            MetricName::RemoteFetchSuccess,
            MetricName::RemoteFetchError,
            MetricName::RemoteFetchDuration,
            MetricName::RemoteTemplatesMerged,
            MetricName::CatalogPublished,
            MetricName::ExamplesRequests,
            MetricName::ExamplesServed,
        ];
        for name in all {
            assert!(name.to_string().starts_with("kanban_catalog_"));
        }
    }

    #[test]
    fn test_recorded_counters_render() {
        let handle = init().unwrap();
        assert!(init().is_ok());

        fetch::failed("network");
        server::examples_served(3);

        let text = render().unwrap();
        assert!(text.contains(MetricName::RemoteFetchError.as_str()));
        assert!(text.contains(r#"reason="network""#));
        assert!(text.contains(MetricName::ExamplesServed.as_str()));
        assert!(handle.render().contains(MetricName::ExamplesRequests.as_str()));
    }

    #[test]
    fn test_recording_without_recorder_is_harmless() {
        fetch::succeeded(3, 0.25);
        fetch::failed("network");
        server::examples_served(2);
    }
}
