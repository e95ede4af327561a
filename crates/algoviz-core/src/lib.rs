pub mod catalog;
pub mod dispatch;
pub mod dp;
pub mod error;
pub mod graph;
pub mod id;
pub mod limits;
pub mod recursion;
pub mod search;
pub mod sort;
pub mod trace;
pub mod tree;

// Re-export commonly used types
pub use catalog::{AlgorithmInfo, Category, TimeComplexity, CATALOG};
pub use dispatch::{dispatch, EngineTrace, SummaryView, TraceResponse};
pub use error::DispatchError;
pub use id::{AlgorithmId, DivisionId};
pub use limits::InputLimits;
pub use trace::{StepEvent, Trace, TraceBuilder, TraceStats};
