//! Trace response type.

use serde::Serialize;
use uuid::Uuid;

use algoviz_core::TraceResponse;

/// A generated trace tagged with a fresh run id:
/// `{ runId, algorithm, steps, ..summary, stats, code }`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResponse {
    pub run_id: Uuid,
    #[serde(flatten)]
    pub response: TraceResponse,
}
