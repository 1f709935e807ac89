use axum::{routing::post, Json, Router};
use serde_json::{json, Value};
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use kanban_catalog::catalog::{
    CatalogLoader, CatalogRegistry, HttpTemplateSource, RemoteCatalogFetcher, TemplateSource,
};
use kanban_catalog::config::RemoteConfig;
use kanban_catalog::markers::Marker;
use kanban_catalog::server::{serve_listener, ServerState};
use kanban_catalog::templates::TemplateStore;

const TEMPLATES: &str = r#"
[[templates]]
name = "Custom Flow"
bullet_green = false
bullet_orange = false
bullet_star = true

  [[templates.stages]]
  name = "Todo"
  sequence = 1

  [[templates.stages]]
  name = "Shipped"
  sequence = 2
  folded = true

[[templates]]
name = "Retired"
active = false
"#;

/// Start the examples server on a loopback port and return its base URL
fn spawn_server(store: TemplateStore) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve_listener(ServerState::fixed(store), listener));
    format!("http://{}", addr)
}

fn remote_config(base_url: String) -> RemoteConfig {
    RemoteConfig {
        base_url,
        timeout_ms: 2_000,
        ..RemoteConfig::default()
    }
}

#[tokio::test]
async fn test_http_source_reads_jsonrpc_endpoint() {
    let base = spawn_server(TemplateStore::from_toml_str(TEMPLATES).unwrap());
    let source = HttpTemplateSource::new(&base, Duration::from_secs(2)).unwrap();

    let response = source.fetch_examples().await.unwrap();

    assert_eq!(response.examples.len(), 1);
    let example = &response.examples[0];
    assert_eq!(example.name, "Custom Flow");
    assert_eq!(example.columns, vec!["Todo"]);
    assert_eq!(example.folded_columns, vec!["Shipped"]);
    assert_eq!(example.bullets, Some(vec!["star".to_string()]));
}

#[tokio::test]
async fn test_end_to_end_merge_over_http() {
    let base = spawn_server(TemplateStore::from_toml_str(TEMPLATES).unwrap());
    let registry = Arc::new(CatalogRegistry::new());
    let loader = CatalogLoader::from_config(&remote_config(base), Arc::clone(&registry)).unwrap();

    let merged = loader.load().await;

    assert_eq!(merged.examples.len(), 13);
    let custom = merged.examples.last().unwrap();
    assert_eq!(custom.name, "Custom Flow");
    assert_eq!(custom.bullets, vec![Marker::Star]);
    assert!(registry.contains("project"));
}

#[tokio::test]
async fn test_refused_connection_yields_static_catalog() {
    // Bind then drop to get a port nobody listens on
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let loader = CatalogLoader::from_config(
        &remote_config(format!("http://127.0.0.1:{}", port)),
        Arc::new(CatalogRegistry::new()),
    )
    .unwrap();

    let merged = loader.load().await;
    assert_eq!(merged.examples.len(), 12);
}

#[tokio::test]
async fn test_malformed_endpoint_yields_static_catalog() {
    let app = Router::new().route(
        "/project_templates/kanban_examples",
        post(|| async { Json(json!({"jsonrpc": "2.0", "result": {"rows": []}})) }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    listener.set_nonblocking(true).unwrap();
    tokio::spawn(async move {
        hyper::Server::from_tcp(listener)
            .unwrap()
            .serve(app.into_make_service())
            .await
    });

    let fetcher = RemoteCatalogFetcher::new(Arc::new(
        HttpTemplateSource::new(&format!("http://{}", addr), Duration::from_secs(2)).unwrap(),
    ));
    assert!(fetcher.fetch().await.is_empty());
}

#[tokio::test]
async fn test_get_and_health_routes() {
    let base = spawn_server(TemplateStore::from_toml_str(TEMPLATES).unwrap());
    let client = reqwest::Client::new();

    let health: Value = client
        .get(format!("{}/health", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "healthy");

    let body: Value = client
        .get(format!("{}/project_templates/kanban_examples", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["result"]["examples"][0]["name"], "Custom Flow");
    assert_eq!(body["result"]["examples"][0]["foldedColumns"][0], "Shipped");
}

#[tokio::test]
async fn test_post_echoes_request_id() {
    let base = spawn_server(TemplateStore::default());
    let body: Value = reqwest::Client::new()
        .post(format!("{}/project_templates/kanban_examples", base))
        .json(&json!({"jsonrpc": "2.0", "method": "call", "params": {}, "id": 42}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["id"], 42);
    assert_eq!(body["result"]["examples"], json!([]));
}

#[tokio::test]
async fn test_metrics_route_reports_recorded_counters() {
    kanban_catalog::metrics::init().unwrap();
    let base = spawn_server(TemplateStore::from_toml_str(TEMPLATES).unwrap());
    let loader =
        CatalogLoader::from_config(&remote_config(base.clone()), Arc::new(CatalogRegistry::new())).unwrap();
    assert_eq!(loader.load().await.examples.len(), 13);

    let response = reqwest::get(format!("{}/metrics", base)).await.unwrap();
    assert!(response.status().is_success());
    let text = response.text().await.unwrap();

    assert!(text.contains("kanban_catalog_remote_fetch_success_total"));
    assert!(text.contains("kanban_catalog_examples_requests_total"));
    assert!(text.contains("kanban_catalog_published_total"));
}
