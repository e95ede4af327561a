//! Bottom-up dynamic programming engines.
//!
//! Each engine records one `COMPUTING` step per table cell plus the decision
//! that filled it, and every step carries a full copy of the table so the
//! replay can animate fill-in. Trace size is therefore quadratic in the
//! table size; callers bound it with [`InputLimits`](crate::limits::InputLimits).

mod coin_change;
mod grid_paths;
mod knapsack;
mod lcs;

pub use coin_change::{coin_change, CoinChangeStep, CoinChangeSummary};
pub use grid_paths::{grid_paths, GridPathsStep, GridPathsSummary, OBSTACLE};
pub use knapsack::{knapsack01, KnapsackStep, KnapsackSummary};
pub use lcs::{lcs, LcsStep, LcsSummary};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DpAction {
    Start,
    Computing,
    Include,
    Exclude,
    Skip,
    Match,
    NoMatch,
    Update,
    NoUpdate,
    Impossible,
    BaseCase,
    Obstacle,
    Summing,
    Error,
    Completed,
}

impl DpAction {
    pub fn as_str(self) -> &'static str {
        match self {
            DpAction::Start => "START",
            DpAction::Computing => "COMPUTING",
            DpAction::Include => "INCLUDE",
            DpAction::Exclude => "EXCLUDE",
            DpAction::Skip => "SKIP",
            DpAction::Match => "MATCH",
            DpAction::NoMatch => "NO_MATCH",
            DpAction::Update => "UPDATE",
            DpAction::NoUpdate => "NO_UPDATE",
            DpAction::Impossible => "IMPOSSIBLE",
            DpAction::BaseCase => "BASE_CASE",
            DpAction::Obstacle => "OBSTACLE",
            DpAction::Summing => "SUMMING",
            DpAction::Error => "ERROR",
            DpAction::Completed => "COMPLETED",
        }
    }
}

/// A `(row, col)` table coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }
}
