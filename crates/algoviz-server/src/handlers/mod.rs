//! HTTP handler modules for the algoviz API.
//!
//! Handlers resolve the algorithm name, hand the body to [`TraceService`]
//! and return JSON. No engine logic lives here.
//!
//! [`TraceService`]: crate::service::TraceService

pub mod catalog;
pub mod health;
pub mod trace;
