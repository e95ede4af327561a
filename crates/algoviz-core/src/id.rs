//! Identifier types for engines and recursive subproblems.
//!
//! [`AlgorithmId`] names one of the step-trace engines. [`DivisionId`] labels
//! a recursive merge/quick sort call with a heap-style number so the replay
//! client can group steps by subarray.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DispatchError;

/// One of the trace-producing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlgorithmId {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    LinearSearch,
    BinarySearch,
    Bfs,
    Dfs,
    Dijkstra,
    Knapsack01,
    Lcs,
    CoinChange,
    GridPaths,
    NQueens,
    Factorial,
    Fibonacci,
    Inorder,
    Preorder,
    Postorder,
}

impl AlgorithmId {
    /// Every engine, in catalog order.
    pub const ALL: [AlgorithmId; 20] = [
        AlgorithmId::Bubble,
        AlgorithmId::Selection,
        AlgorithmId::Insertion,
        AlgorithmId::Merge,
        AlgorithmId::Quick,
        AlgorithmId::LinearSearch,
        AlgorithmId::BinarySearch,
        AlgorithmId::Bfs,
        AlgorithmId::Dfs,
        AlgorithmId::Dijkstra,
        AlgorithmId::Knapsack01,
        AlgorithmId::Lcs,
        AlgorithmId::CoinChange,
        AlgorithmId::GridPaths,
        AlgorithmId::NQueens,
        AlgorithmId::Factorial,
        AlgorithmId::Fibonacci,
        AlgorithmId::Inorder,
        AlgorithmId::Preorder,
        AlgorithmId::Postorder,
    ];

    /// The wire name, e.g. `"linearSearch"`.
    pub fn as_str(self) -> &'static str {
        match self {
            AlgorithmId::Bubble => "bubble",
            AlgorithmId::Selection => "selection",
            AlgorithmId::Insertion => "insertion",
            AlgorithmId::Merge => "merge",
            AlgorithmId::Quick => "quick",
            AlgorithmId::LinearSearch => "linearSearch",
            AlgorithmId::BinarySearch => "binarySearch",
            AlgorithmId::Bfs => "bfs",
            AlgorithmId::Dfs => "dfs",
            AlgorithmId::Dijkstra => "dijkstra",
            AlgorithmId::Knapsack01 => "knapsack01",
            AlgorithmId::Lcs => "lcs",
            AlgorithmId::CoinChange => "coinChange",
            AlgorithmId::GridPaths => "gridPaths",
            AlgorithmId::NQueens => "nQueens",
            AlgorithmId::Factorial => "factorial",
            AlgorithmId::Fibonacci => "fibonacci",
            AlgorithmId::Inorder => "inorder",
            AlgorithmId::Preorder => "preorder",
            AlgorithmId::Postorder => "postorder",
        }
    }

    /// Resolves a legacy route segment such as `bubbleSteps` or
    /// `gridPaths2Steps`.
    pub fn from_route(route: &str) -> Result<Self, DispatchError> {
        let name = route.strip_suffix("Steps").unwrap_or(route);
        match name {
            "gridPaths2" => Ok(AlgorithmId::GridPaths),
            "nQueen" => Ok(AlgorithmId::NQueens),
            other => other.parse(),
        }
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmId {
    type Err = DispatchError;

    /// Case-insensitive; `-` and `_` are ignored so `binary-search` and
    /// `coin_change` resolve too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        AlgorithmId::ALL
            .into_iter()
            .find(|id| id.as_str().to_ascii_lowercase() == folded)
            .or(match folded.as_str() {
                "knapsack" => Some(AlgorithmId::Knapsack01),
                "nqueen" => Some(AlgorithmId::NQueens),
                _ => None,
            })
            .ok_or_else(|| DispatchError::UnknownAlgorithm {
                name: s.to_string(),
            })
    }
}

/// Heap-style identifier of a recursive sort call.
///
/// The root call is `0`; the children of `d` are `2d + 1` and `2d + 2`.
/// Ids saturate at `u64::MAX` on degenerate recursion deeper than 63 levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DivisionId(pub u64);

impl DivisionId {
    pub const ROOT: DivisionId = DivisionId(0);

    pub fn left(self) -> DivisionId {
        DivisionId(self.0.saturating_mul(2).saturating_add(1))
    }

    pub fn right(self) -> DivisionId {
        DivisionId(self.0.saturating_mul(2).saturating_add(2))
    }
}

impl fmt::Display for DivisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_id_display_matches_wire_name() {
        assert_eq!(AlgorithmId::LinearSearch.to_string(), "linearSearch");
        let json = serde_json::to_string(&AlgorithmId::Knapsack01).unwrap();
        assert_eq!(json, "\"knapsack01\"");
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("BFS".parse::<AlgorithmId>().unwrap(), AlgorithmId::Bfs);
        assert_eq!(
            "binary-search".parse::<AlgorithmId>().unwrap(),
            AlgorithmId::BinarySearch
        );
        assert_eq!(
            "coin_change".parse::<AlgorithmId>().unwrap(),
            AlgorithmId::CoinChange
        );
    }

    #[test]
    fn every_id_round_trips_through_its_name() {
        for id in AlgorithmId::ALL {
            assert_eq!(id.as_str().parse::<AlgorithmId>().unwrap(), id);
        }
    }

    #[test]
    fn legacy_routes_resolve() {
        assert_eq!(
            AlgorithmId::from_route("bubbleSteps").unwrap(),
            AlgorithmId::Bubble
        );
        assert_eq!(
            AlgorithmId::from_route("gridPaths2Steps").unwrap(),
            AlgorithmId::GridPaths
        );
        assert_eq!(
            AlgorithmId::from_route("nQueenSteps").unwrap(),
            AlgorithmId::NQueens
        );
        assert_eq!(
            AlgorithmId::from_route("knapsack01Steps").unwrap(),
            AlgorithmId::Knapsack01
        );
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = "bogosort".parse::<AlgorithmId>().unwrap_err();
        assert!(matches!(err, DispatchError::UnknownAlgorithm { .. }));
    }

    #[test]
    fn division_ids_follow_heap_numbering() {
        let root = DivisionId::ROOT;
        assert_eq!(root.left(), DivisionId(1));
        assert_eq!(root.right(), DivisionId(2));
        assert_eq!(DivisionId(1).left(), DivisionId(3));
        assert_eq!(DivisionId(2).right(), DivisionId(6));
    }

    #[test]
    fn division_ids_saturate() {
        let deep = DivisionId(u64::MAX / 2 + 7);
        assert_eq!(deep.left(), DivisionId(u64::MAX));
    }
}
