//! Catalog response types.

use serde::Serialize;

use algoviz_core::AlgorithmInfo;

/// A catalog entry plus its process-local run counter.
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmView {
    #[serde(flatten)]
    pub info: &'static AlgorithmInfo,
    /// Traces generated since the server started.
    pub runs: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogResponse {
    pub algorithms: Vec<AlgorithmView>,
}

/// `GET /` body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub message: &'static str,
    pub algorithms: usize,
}
