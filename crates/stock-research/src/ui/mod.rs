//! Single-page web front end
//!
//! `GET /` serves the form, `POST /api/research` runs the research agent and
//! always answers 200 with `{"report": ...}`.

use crate::config::UiSettings;
use crate::error::Result;
use crate::invoke::ResearchService;
use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

const INDEX_HTML: &str = include_str!("index.html");
const EMPTY_QUERY: &str = "Please enter a research query.";

/// Body of `POST /api/research`
#[derive(Debug, Deserialize)]
pub struct ResearchRequest {
    #[serde(default)]
    pub query: String,
}

/// Reply of `POST /api/research`
#[derive(Debug, Serialize, Deserialize)]
pub struct ResearchResponse {
    pub report: String,
}

/// Routes over a shared research service
pub fn router(service: Arc<ResearchService>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/research", post(research))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}

/// Bind per `settings` and serve until the process stops
pub async fn serve(service: Arc<ResearchService>, settings: &UiSettings) -> Result<()> {
    let address = settings.bind_address();
    if settings.share {
        warn!(address = %address, "Sharing enabled: the UI listens on all interfaces");
    }

    let listener = TcpListener::bind(&address).await?;
    info!(address = %listener.local_addr()?, "Research UI listening");
    axum::serve(listener, router(service)).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn research(
    State(service): State<Arc<ResearchService>>,
    Json(request): Json<ResearchRequest>,
) -> Json<ResearchResponse> {
    let query = request.query.trim();
    let report = if query.is_empty() {
        EMPTY_QUERY.to_string()
    } else {
        service.run_stock_research(query).await
    };
    Json(ResearchResponse { report })
}
