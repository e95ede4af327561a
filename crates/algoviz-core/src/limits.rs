//! Input size bounds applied before an engine runs.
//!
//! Engines never check wall-clock time, and most of them snapshot their whole
//! working state on every step, so trace memory grows with the square of the
//! input for the table-filling engines. These limits keep a single request
//! bounded.

use serde::{Deserialize, Serialize};

use crate::error::DispatchError;
use crate::id::AlgorithmId;
use crate::recursion::{FACTORIAL_EXACT_MAX, FIBONACCI_EXACT_MAX};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputLimits {
    /// Elements in a sort or search array.
    pub max_array_len: usize,
    /// Nodes in a BFS/DFS/Dijkstra graph, sinks included.
    pub max_graph_nodes: usize,
    /// Neighbor entries across the whole adjacency document, repeats included.
    pub max_graph_edges: usize,
    /// Cells in a knapsack, LCS or grid table.
    pub max_dp_cells: usize,
    /// Target amount for coin change.
    pub max_coin_amount: usize,
    /// Denominations in a coin change request. Each one adds a step per
    /// amount, and every step copies the whole table.
    pub max_coins: usize,
    /// Board size for N-Queens.
    pub max_queens: usize,
    pub max_factorial_n: usize,
    pub max_fibonacci_n: usize,
    /// Nodes in a traversal tree.
    pub max_tree_nodes: usize,
}

impl Default for InputLimits {
    fn default() -> Self {
        InputLimits {
            max_array_len: 100,
            max_graph_nodes: 100,
            max_graph_edges: 1_000,
            max_dp_cells: 1_000,
            max_coin_amount: 500,
            max_coins: 10,
            max_queens: 12,
            max_factorial_n: FACTORIAL_EXACT_MAX as usize,
            max_fibonacci_n: 180,
            max_tree_nodes: 255,
        }
    }
}

impl InputLimits {
    /// Limits that only guard exact arithmetic. Meant for tests and trusted
    /// local use.
    pub fn unbounded() -> Self {
        InputLimits {
            max_array_len: usize::MAX,
            max_graph_nodes: usize::MAX,
            max_graph_edges: usize::MAX,
            max_dp_cells: usize::MAX,
            max_coin_amount: usize::MAX,
            max_coins: usize::MAX,
            max_queens: usize::MAX,
            max_factorial_n: FACTORIAL_EXACT_MAX as usize,
            max_fibonacci_n: FIBONACCI_EXACT_MAX as usize,
            max_tree_nodes: usize::MAX,
        }
    }

    /// Fails with [`DispatchError::LimitExceeded`] when `actual > limit`.
    pub(crate) fn check(
        algorithm: AlgorithmId,
        what: &'static str,
        limit: usize,
        actual: usize,
    ) -> Result<(), DispatchError> {
        if actual > limit {
            return Err(DispatchError::LimitExceeded {
                algorithm,
                what,
                limit,
                actual,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_stay_within_exact_arithmetic() {
        let limits = InputLimits::default();
        assert!(limits.max_factorial_n <= FACTORIAL_EXACT_MAX as usize);
        assert!(limits.max_fibonacci_n <= FIBONACCI_EXACT_MAX as usize);
    }

    #[test]
    fn unbounded_lifts_size_limits() {
        let limits = InputLimits::unbounded();
        assert_eq!(limits.max_graph_edges, usize::MAX);
        assert_eq!(limits.max_coins, usize::MAX);
        assert_eq!(limits.max_fibonacci_n, FIBONACCI_EXACT_MAX as usize);
    }

    #[test]
    fn check_reports_both_sides() {
        assert!(InputLimits::check(AlgorithmId::Bubble, "array length", 3, 3).is_ok());
        let err = InputLimits::check(AlgorithmId::Bubble, "array length", 3, 4).unwrap_err();
        assert_eq!(err.to_string(), "array length for bubble is 4, limit is 3");
    }

    #[test]
    fn partial_documents_fill_in_defaults() {
        let limits: InputLimits =
            serde_json::from_value(serde_json::json!({ "maxQueens": 8 })).unwrap();
        assert_eq!(limits.max_queens, 8);
        assert_eq!(limits.max_array_len, InputLimits::default().max_array_len);
    }
}
