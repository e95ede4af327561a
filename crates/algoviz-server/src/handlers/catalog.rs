//! Catalog handlers.

use axum::extract::{Path, State};
use axum::Json;

use algoviz_core::AlgorithmId;

use crate::error::ApiError;
use crate::schema::catalog::{AlgorithmView, CatalogResponse};
use crate::state::AppState;

/// Lists every algorithm with its complexity and run count.
///
/// `GET /algorithms`
pub async fn list_algorithms(State(state): State<AppState>) -> Json<CatalogResponse> {
    Json(state.service.catalog())
}

/// `GET /algorithms/{algorithm}`
pub async fn get_algorithm(
    State(state): State<AppState>,
    Path(algorithm): Path<String>,
) -> Result<Json<AlgorithmView>, ApiError> {
    let id: AlgorithmId = algorithm.parse()?;
    Ok(Json(state.service.describe(id)))
}
