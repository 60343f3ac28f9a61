use axum::http::StatusCode;

/// Liveness probe. No body, no authentication.
pub async fn health() -> StatusCode {
    StatusCode::NO_CONTENT
}
