use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use super::normalize::normalize_all;
use crate::constants::KANBAN_EXAMPLES_PATH;
use crate::error::{CatalogError, Result};
use crate::metrics;
use crate::types::{ExamplesResponse, RawTemplate, Template};

/// Transport that retrieves operator-configured templates from the backend
#[async_trait]
pub trait TemplateSource: Send + Sync {
    async fn fetch_examples(&self) -> Result<ExamplesResponse>;
}

/// Fetches the examples over HTTP as an empty JSON-RPC call
pub struct HttpTemplateSource {
    client: reqwest::Client,
    url: String,
}

impl HttpTemplateSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        let url = format!("{}{}", base_url.trim_end_matches('/'), KANBAN_EXAMPLES_PATH);
        Self { client, url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl TemplateSource for HttpTemplateSource {
    async fn fetch_examples(&self) -> Result<ExamplesResponse> {
        let body = json!({
            "jsonrpc": "2.0",
            "method": "call",
            "params": {},
        });
        let resp = self.client.post(&self.url).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Status { status: status.as_u16() });
        }
        let value: Value = resp.json().await?;
        parse_examples_body(value)
    }
}

/// Accept either a bare `{ examples }` object or a JSON-RPC envelope around one
pub fn parse_examples_body(mut value: Value) -> Result<ExamplesResponse> {
    if let Some(err) = value.get("error") {
        let message = err
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        return Err(CatalogError::Backend { message });
    }
    if let Some(result) = value.get_mut("result") {
        value = result.take();
    }
    if !value.is_object() {
        return Err(CatalogError::Malformed(format!("expected an object, got {}", value)));
    }
    let entries = match value.get_mut("examples").map(Value::take) {
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            return Err(CatalogError::Malformed(format!("expected an examples array, got {}", other)))
        }
        None => return Err(CatalogError::Malformed("missing examples".to_string())),
    };

    // One bad entry must not cost the others
    let mut examples = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<RawTemplate>(entry) {
            Ok(template) => examples.push(template),
            Err(e) => warn!(index, "Skipping unreadable project template: {}", e),
        }
    }
    Ok(ExamplesResponse { examples })
}

/// Retrieves remote templates and normalizes them; never fails.
pub struct RemoteCatalogFetcher {
    source: Arc<dyn TemplateSource>,
}

impl RemoteCatalogFetcher {
    pub fn new(source: Arc<dyn TemplateSource>) -> Self {
        Self { source }
    }

    /// Normalized remote templates in backend order, or an empty list on any failure
    #[instrument(skip(self))]
    pub async fn fetch(&self) -> Vec<Template> {
        let started = Instant::now();
        match self.source.fetch_examples().await {
            Ok(response) => {
                let templates = normalize_all(response.examples);
                metrics::fetch::succeeded(templates.len(), started.elapsed().as_secs_f64());
                info!(count = templates.len(), "Loaded configurable project templates");
                let names: Vec<&str> = templates.iter().map(|t| t.name.as_str()).collect();
                debug!(?names, "Remote template names");
                templates
            }
            Err(e) => {
                metrics::fetch::failed(failure_reason(&e));
                warn!("Could not load configurable project templates: {}", e);
                Vec::new()
            }
        }
    }
}

fn failure_reason(err: &CatalogError) -> &'static str {
    match err {
        CatalogError::Http(_) => "network",
        CatalogError::Status { .. } => "status",
        CatalogError::Backend { .. } => "backend",
        CatalogError::Json(_) | CatalogError::Malformed(_) => "malformed",
        CatalogError::Timeout(_) => "timeout",
        _ => "other",
    }
}
