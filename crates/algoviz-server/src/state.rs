//! Application state shared by every handler.

use std::sync::Arc;

use algoviz_core::InputLimits;

use crate::service::TraceService;

/// Shared application state for the HTTP server.
///
/// [`TraceService`] keeps its counters in a `DashMap`, so handlers share it
/// through a plain `Arc` without an outer lock.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TraceService>,
}

impl AppState {
    pub fn new(limits: InputLimits) -> Self {
        AppState {
            service: Arc::new(TraceService::new(limits)),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(InputLimits::default())
    }
}
