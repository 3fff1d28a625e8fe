mod decoder;
mod detect;
mod error;
mod ml;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, Method};
use axum::routing::get;
use axum::{Json, Router};
use linkshield_common::types::ServiceInfo;
use linkshield_config::{init_tracing, AppConfig};
use linkshield_scoring::ScoringConfig;
use tower_http::cors::{Any, CorsLayer};

use crate::ml::{ModelClient, TextClassifier};

#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn TextClassifier>,
    pub scoring: Arc<ScoringConfig>,
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let model_status = if state.classifier.ready().await {
        "ready"
    } else {
        "unavailable"
    };
    Json(serde_json::json!({
        "status": "running",
        "model_status": model_status,
        "service": "linkshield-api",
    }))
}

async fn info() -> Json<ServiceInfo> {
    Json(ServiceInfo::new("linkshield-api"))
}

fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .route("/info", get(info))
        .merge(detect::router())
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env().expect("failed to load config");
    init_tracing(&config.log_level);
    tracing::info!(service = "linkshield-api", "starting");

    let classifier = ModelClient::new(&config.model_url, config.model_timeout_secs)
        .expect("failed to build model client");
    let state = AppState {
        classifier: Arc::new(classifier),
        scoring: Arc::new(ScoringConfig::default()),
    };

    let app = build_router(state, config.max_upload_bytes);
    let addr: SocketAddr = config.bind_addr().parse().expect("invalid bind address");

    tracing::info!(%addr, model_url = %config.model_url, "listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");
    axum::serve(listener, app).await.expect("server error");
}
