use axum::Json;

use algoviz_core::CATALOG;

use crate::schema::catalog::HealthResponse;

/// `GET /`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "algoviz server is running",
        algorithms: CATALOG.len(),
    })
}
