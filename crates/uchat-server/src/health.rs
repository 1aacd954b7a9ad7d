use axum::response::IntoResponse;
use http::StatusCode;

/// Liveness probe, answers `ok` as plain text
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
