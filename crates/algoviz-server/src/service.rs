//! TraceService: the single coordinator between HTTP handlers and the
//! algoviz-core dispatch layer.
//!
//! Engines are synchronous and CPU-bound, so every run is moved onto the
//! blocking pool. The only shared state is a per-algorithm run counter.

use dashmap::DashMap;
use serde_json::Value;
use uuid::Uuid;

use algoviz_core::catalog::{self, CATALOG};
use algoviz_core::{dispatch, AlgorithmId, InputLimits};

use crate::error::ApiError;
use crate::schema::catalog::{AlgorithmView, CatalogResponse};
use crate::schema::trace::RunResponse;

pub struct TraceService {
    limits: InputLimits,
    runs: DashMap<AlgorithmId, u64>,
}

impl TraceService {
    pub fn new(limits: InputLimits) -> Self {
        TraceService {
            limits,
            runs: DashMap::new(),
        }
    }

    pub fn limits(&self) -> &InputLimits {
        &self.limits
    }

    /// Number of traces generated for `id` since startup.
    pub fn run_count(&self, id: AlgorithmId) -> u64 {
        self.runs.get(&id).map(|entry| *entry).unwrap_or(0)
    }

    pub fn catalog(&self) -> CatalogResponse {
        CatalogResponse {
            algorithms: CATALOG.iter().map(|info| self.view(info.id)).collect(),
        }
    }

    pub fn describe(&self, id: AlgorithmId) -> AlgorithmView {
        self.view(id)
    }

    fn view(&self, id: AlgorithmId) -> AlgorithmView {
        AlgorithmView {
            info: catalog::info(id),
            runs: self.run_count(id),
        }
    }

    /// Generates one trace on the blocking pool.
    pub async fn run(&self, id: AlgorithmId, input: Value) -> Result<RunResponse, ApiError> {
        let limits = self.limits;
        let outcome = tokio::task::spawn_blocking(move || dispatch(id, input, &limits))
            .await
            .map_err(|e| ApiError::InternalError(format!("trace task failed: {}", e)))?;

        let response = match outcome {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(algorithm = %id, error = %err, "rejected trace request");
                return Err(err.into());
            }
        };

        let run_id = Uuid::new_v4();
        *self.runs.entry(id).or_insert(0) += 1;
        tracing::info!(
            algorithm = %id,
            steps = response.stats.total_steps,
            run_id = %run_id,
            "generated trace"
        );
        Ok(RunResponse { run_id, response })
    }
}

impl Default for TraceService {
    fn default() -> Self {
        Self::new(InputLimits::default())
    }
}
