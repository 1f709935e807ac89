use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use hyper::Server;
use serde_json::{json, Value};
use std::net::{SocketAddr, TcpListener};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::constants::KANBAN_EXAMPLES_PATH;
use crate::error::Result;
use crate::metrics;
use crate::templates::TemplateStore;
use crate::types::ExamplesResponse;

/// Where the endpoint reads its templates from
#[derive(Clone)]
pub enum TemplateOrigin {
    /// A store held in memory for the life of the server
    Fixed(Arc<TemplateStore>),
    /// Re-read on every request so operator edits apply without a restart
    File(PathBuf),
}

#[derive(Clone)]
pub struct ServerState {
    origin: TemplateOrigin,
}

impl ServerState {
    pub fn new(origin: TemplateOrigin) -> Self {
        Self { origin }
    }

    pub fn fixed(store: TemplateStore) -> Self {
        Self::new(TemplateOrigin::Fixed(Arc::new(store)))
    }

    /// Current examples payload; a store that cannot be read serves no examples
    pub async fn examples(&self) -> ExamplesResponse {
        match &self.origin {
            TemplateOrigin::Fixed(store) => store.kanban_examples(),
            TemplateOrigin::File(path) => match TemplateStore::load_async(path).await {
                Ok(store) => store.kanban_examples(),
                Err(e) => {
                    warn!("Serving no examples, templates unavailable: {}", e);
                    ExamplesResponse::default()
                }
            },
        }
    }
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "kanban-catalog",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn prometheus_metrics() -> impl IntoResponse {
    match metrics::render() {
        Some(text) => (StatusCode::OK, [(header::CONTENT_TYPE, "text/plain; version=0.0.4")], text).into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "metrics recorder not installed").into_response(),
    }
}

async fn jsonrpc_result(state: &ServerState, id: Value) -> Json<Value> {
    let examples = state.examples().await;
    metrics::server::examples_served(examples.examples.len());
    Json(json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": examples,
    }))
}

async fn kanban_examples_post(State(state): State<ServerState>, body: Option<Json<Value>>) -> Json<Value> {
    let id = body
        .and_then(|Json(v)| v.get("id").cloned())
        .unwrap_or(Value::Null);
    jsonrpc_result(&state, id).await
}

async fn kanban_examples_get(State(state): State<ServerState>) -> Json<Value> {
    jsonrpc_result(&state, Value::Null).await
}

/// Router serving the examples endpoint, health and metrics
pub fn create_server(state: ServerState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(prometheus_metrics))
        .route(
            KANBAN_EXAMPLES_PATH,
            get(kanban_examples_get).post(kanban_examples_post),
        )
        .with_state(state)
        .layer(ServiceBuilder::new().layer(cors))
}

/// Start the HTTP server on the specified port
pub async fn start_server(state: ServerState, port: u16) -> Result<()> {
    let app = create_server(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("HTTP server running on http://localhost:{}", port);
    info!("Kanban examples: http://localhost:{}{}", port, KANBAN_EXAMPLES_PATH);

    Server::bind(&addr).serve(app.into_make_service()).await?;
    Ok(())
}

/// Serve on an already bound listener
pub async fn serve_listener(state: ServerState, listener: TcpListener) -> Result<()> {
    listener.set_nonblocking(true)?;
    let app = create_server(state);
    Server::from_tcp(listener)?.serve(app.into_make_service()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_fixed_state_serves_store() {
        let store = TemplateStore::from_toml_str("[[templates]]\nname = \"Ops\"\n").unwrap();
        let state = ServerState::fixed(store);
        assert_eq!(state.examples().await.examples[0].name, "Ops");
    }

    #[tokio::test]
    async fn test_file_state_rereads_and_degrades() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[templates]]\nname = \"First\"").unwrap();
        let state = ServerState::new(TemplateOrigin::File(file.path().to_path_buf()));
        assert_eq!(state.examples().await.examples.len(), 1);

        writeln!(file, "[[templates]]\nname = \"Second\"").unwrap();
        assert_eq!(state.examples().await.examples.len(), 2);

        writeln!(file, "this is not toml [").unwrap();
        assert!(state.examples().await.examples.is_empty());
    }
}
