//! API schema types for request/response definitions.
//!
//! Trace request bodies are engine-specific and decoded by the core dispatch
//! layer, so only response shapes live here.

pub mod catalog;
pub mod trace;
