//! Trace generation handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;

use algoviz_core::AlgorithmId;

use crate::error::ApiError;
use crate::schema::trace::RunResponse;
use crate::state::AppState;

/// Runs one engine on the posted input.
///
/// `POST /algorithms/{algorithm}/trace`
pub async fn generate_trace(
    State(state): State<AppState>,
    Path(algorithm): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RunResponse>, ApiError> {
    let id: AlgorithmId = algorithm.parse()?;
    let Json(input) = body?;
    Ok(Json(state.service.run(id, input).await?))
}

/// Same as [`generate_trace`], addressed by the older route names
/// (`bubbleSteps`, `nQueenSteps`, `gridPaths2Steps`, ...).
///
/// `POST /api/{route}`
pub async fn legacy_trace(
    State(state): State<AppState>,
    Path(route): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RunResponse>, ApiError> {
    let id = AlgorithmId::from_route(&route)?;
    let Json(input) = body?;
    Ok(Json(state.service.run(id, input).await?))
}
