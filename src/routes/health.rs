use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub message: String,
}

/// Liveness probe; never touches the provider.
pub async fn root() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Stock Data API is running".to_string(),
    })
}
