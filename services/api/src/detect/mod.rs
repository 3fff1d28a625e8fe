pub mod handlers;
pub mod requests;
pub mod responses;

use axum::routing::post;
use axum::Router;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/detect/link", post(handlers::detect_link))
        .route("/api/detect/qr", post(handlers::detect_qr))
}
