use serde::Serialize;

use crate::trace::{StepEvent, Trace, TraceBuilder};

/// Steps recorded before the trace stops growing. The search itself still
/// runs to the end so `solutionCount` stays exact.
pub const QUEENS_STEP_CAP: usize = 50_000;

/// Solutions kept in full in the summary.
pub const MAX_STORED_SOLUTIONS: usize = 100;

/// Only the first solutions get their own `SOLUTION_FOUND` step.
const ANNOUNCED_SOLUTIONS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueensAction {
    Start,
    Trying,
    Conflict,
    Safe,
    Placing,
    SolutionFound,
    Backtracking,
    Completed,
}

impl QueensAction {
    pub fn as_str(self) -> &'static str {
        match self {
            QueensAction::Start => "START",
            QueensAction::Trying => "TRYING",
            QueensAction::Conflict => "CONFLICT",
            QueensAction::Safe => "SAFE",
            QueensAction::Placing => "PLACING",
            QueensAction::SolutionFound => "SOLUTION_FOUND",
            QueensAction::Backtracking => "BACKTRACKING",
            QueensAction::Completed => "COMPLETED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

/// The square under consideration and, for `CONFLICT`, the queen attacking it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub row: usize,
    pub col: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict_with: Option<Position>,
}

impl From<Position> for Highlight {
    fn from(at: Position) -> Self {
        Highlight {
            row: at.row,
            col: at.col,
            conflict_with: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueensStep {
    /// Queens placed so far, one per row from the top.
    pub board: Vec<Position>,
    pub action: QueensAction,
    pub message: String,
    pub highlight: Option<Highlight>,
    pub solution_count: u64,
}

impl StepEvent for QueensStep {
    fn tag(&self) -> &'static str {
        self.action.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    /// 1-based discovery order.
    pub solution_number: u64,
    pub positions: Vec<Position>,
    /// Dense board, `1` where a queen stands.
    pub grid: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueensSummary {
    pub solution_count: u64,
    pub solutions: Vec<Solution>,
    /// True when the step cap dropped part of the trace.
    pub truncated: bool,
}

pub type QueensTrace = Trace<QueensStep, QueensSummary>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attack {
    Column,
    Diagonal,
}

struct Solver {
    n: usize,
    board: Vec<Position>,
    trace: TraceBuilder<QueensStep>,
    solution_count: u64,
    solutions: Vec<Solution>,
}

impl Solver {
    fn record(&mut self, action: QueensAction, message: impl FnOnce() -> String, highlight: Option<Highlight>) {
        let Solver {
            board,
            trace,
            solution_count,
            ..
        } = self;
        trace.record_with(|| QueensStep {
            board: board.clone(),
            action,
            message: message(),
            highlight,
            solution_count: *solution_count,
        });
    }

    /// First placed queen attacking `at`, and along which line.
    fn attacker(&self, at: Position) -> Option<(Position, Attack)> {
        self.board.iter().find_map(|queen| {
            if queen.col == at.col {
                Some((*queen, Attack::Column))
            } else if queen.row.abs_diff(at.row) == queen.col.abs_diff(at.col) {
                Some((*queen, Attack::Diagonal))
            } else {
                None
            }
        })
    }

    fn is_safe(&mut self, at: Position) -> bool {
        match self.attacker(at) {
            Some((queen, attack)) => {
                self.record(
                    QueensAction::Conflict,
                    || match attack {
                        Attack::Column => format!("Conflict: Column {} occupied", at.col),
                        Attack::Diagonal => "Conflict: Diagonal attack".to_string(),
                    },
                    Some(Highlight {
                        conflict_with: Some(queen),
                        ..Highlight::from(at)
                    }),
                );
                false
            }
            None => {
                self.record(
                    QueensAction::Safe,
                    || format!("Position ({}, {}) is safe", at.row, at.col),
                    Some(at.into()),
                );
                true
            }
        }
    }

    fn solved(&mut self) {
        self.solution_count += 1;
        if self.solutions.len() < MAX_STORED_SOLUTIONS {
            let mut grid = vec![vec![0; self.n]; self.n];
            for queen in &self.board {
                grid[queen.row][queen.col] = 1;
            }
            self.solutions.push(Solution {
                solution_number: self.solution_count,
                positions: self.board.clone(),
                grid,
            });
        }
        if self.solution_count <= ANNOUNCED_SOLUTIONS {
            let number = self.solution_count;
            self.record(
                QueensAction::SolutionFound,
                || format!("Solution #{} found!", number),
                None,
            );
        }
    }

    fn place_row(&mut self, row: usize) {
        if row == self.n {
            self.solved();
            return;
        }

        for col in 0..self.n {
            let at = Position { row, col };
            self.record(
                QueensAction::Trying,
                || format!("Trying position ({}, {})", row, col),
                Some(at.into()),
            );
            if !self.is_safe(at) {
                continue;
            }

            self.board.push(at);
            self.record(
                QueensAction::Placing,
                || format!("Queen placed at ({}, {})", row, col),
                Some(at.into()),
            );
            self.place_row(row + 1);
            self.board.pop();
            self.record(
                QueensAction::Backtracking,
                || format!("Backtracking from row {}", row),
                Some(at.into()),
            );
        }
    }
}

/// Every placement of `n` non-attacking queens, found by row-wise
/// backtracking with columns tried left to right.
///
/// At most [`QUEENS_STEP_CAP`] steps are kept (plus the final `COMPLETED`);
/// past that the search continues silently and `truncated` is set.
pub fn n_queens(n: usize) -> QueensTrace {
    let mut solver = Solver {
        n,
        board: Vec::with_capacity(n),
        trace: TraceBuilder::with_cap(QUEENS_STEP_CAP),
        solution_count: 0,
        solutions: Vec::new(),
    };
    solver.record(
        QueensAction::Start,
        || format!("Starting N-Queens solver for N={}", n),
        None,
    );
    solver.place_row(0);

    let Solver {
        trace,
        solution_count,
        solutions,
        ..
    } = solver;
    let truncated = trace.is_truncated();
    let message = if truncated {
        format!(
            "Step limit reached after {} steps; search finished silently. Total solutions: {}",
            QUEENS_STEP_CAP, solution_count
        )
    } else {
        format!("Algorithm completed. Total solutions: {}", solution_count)
    };
    let completed = QueensStep {
        board: Vec::new(),
        action: QueensAction::Completed,
        message,
        highlight: None,
        solution_count,
    };
    Trace::new(
        trace.finish(completed),
        QueensSummary {
            solution_count,
            solutions,
            truncated,
        },
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn four_queens_has_two_solutions() {
        let trace = n_queens(4);
        assert_eq!(trace.summary.solution_count, 2);
        assert!(!trace.summary.truncated);
        let layouts: HashSet<_> = trace
            .summary
            .solutions
            .iter()
            .map(|s| s.positions.clone())
            .collect();
        assert_eq!(layouts.len(), 2);
        assert_eq!(trace.stats().count("SOLUTION_FOUND"), 2);
    }

    #[test]
    fn first_four_queens_solution_layout() {
        let first = &n_queens(4).summary.solutions[0];
        let cols: Vec<_> = first.positions.iter().map(|p| p.col).collect();
        assert_eq!(cols, vec![1, 3, 0, 2]);
        assert_eq!(first.grid[0], vec![0, 1, 0, 0]);
        assert_eq!(first.solution_number, 1);
    }

    #[test]
    fn known_solution_counts() {
        for (n, count) in [(1, 1), (2, 0), (3, 0), (5, 10), (6, 4), (8, 92)] {
            assert_eq!(n_queens(n).summary.solution_count, count, "n = {n}");
        }
    }

    #[test]
    fn conflict_names_the_attacker() {
        let trace = n_queens(4);
        let conflict = trace
            .steps
            .iter()
            .find(|s| s.action == QueensAction::Conflict)
            .unwrap();
        // Row 1, column 0 clashes with the queen at (0, 0) on the column.
        assert_eq!(
            conflict.highlight,
            Some(Highlight {
                row: 1,
                col: 0,
                conflict_with: Some(Position { row: 0, col: 0 })
            })
        );
    }

    #[test]
    fn conflicts_say_which_line_attacks() {
        let trace = n_queens(4);
        let messages: Vec<&str> = trace
            .steps
            .iter()
            .filter(|s| s.action == QueensAction::Conflict)
            .map(|s| s.message.as_str())
            .take(2)
            .collect();
        // (1, 0) shares a column with (0, 0); (1, 1) shares its diagonal.
        assert_eq!(messages, vec!["Conflict: Column 0 occupied", "Conflict: Diagonal attack"]);
    }

    #[test]
    fn placement_snapshots_include_the_new_queen() {
        let trace = n_queens(4);
        let place = trace
            .steps
            .iter()
            .find(|s| s.action == QueensAction::Placing)
            .unwrap();
        assert_eq!(place.board, vec![Position { row: 0, col: 0 }]);
    }

    #[test]
    fn large_boards_truncate_but_keep_counting() {
        let trace = n_queens(10);
        assert!(trace.summary.truncated);
        assert_eq!(trace.summary.solution_count, 724);
        assert_eq!(trace.summary.solutions.len(), MAX_STORED_SOLUTIONS);
        assert_eq!(trace.steps.len(), QUEENS_STEP_CAP + 1);
        assert_eq!(trace.tags().last(), Some(&"COMPLETED"));
        assert_eq!(trace.stats().count("SOLUTION_FOUND"), 10);
    }
}
