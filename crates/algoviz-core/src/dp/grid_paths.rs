use serde::Serialize;

use super::{Cell, DpAction};
use crate::trace::{StepEvent, Trace, TraceBuilder};

/// Grid value marking a blocked cell. Every other value is open.
pub const OBSTACLE: i64 = -1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPathsStep {
    pub action: DpAction,
    pub message: String,
    /// `dp[r][c]`: distinct right/down paths from the top-left to `(r, c)`.
    pub dp: Vec<Vec<u128>>,
    pub current_cell: Option<Cell>,
    pub total_paths: u128,
}

impl StepEvent for GridPathsStep {
    fn tag(&self) -> &'static str {
        self.action.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPathsSummary {
    pub total_paths: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub type GridPathsTrace = Trace<GridPathsStep, GridPathsSummary>;

struct Table {
    dp: Vec<Vec<u128>>,
}

impl Table {
    fn total(&self) -> u128 {
        self.dp
            .last()
            .and_then(|row| row.last())
            .copied()
            .unwrap_or(0)
    }

    fn step(&self, action: DpAction, message: String, cell: Option<Cell>) -> GridPathsStep {
        GridPathsStep {
            action,
            message,
            dp: self.dp.clone(),
            current_cell: cell,
            total_paths: self.total(),
        }
    }
}

fn rejected(table: &Table, action: DpAction, message: String) -> GridPathsTrace {
    let step = table.step(action, message.clone(), None);
    let error = (action == DpAction::Error).then_some(message);
    Trace::new(
        vec![step],
        GridPathsSummary {
            total_paths: 0,
            error,
        },
    )
}

/// Counts right/down paths from the top-left to the bottom-right cell,
/// avoiding cells equal to [`OBSTACLE`].
///
/// The grid is read as `grid.len()` rows of `grid[0].len()` columns; cells
/// missing from a short row count as open.
pub fn grid_paths(grid: &[Vec<i64>]) -> GridPathsTrace {
    let rows = grid.len();
    let cols = grid.first().map_or(0, Vec::len);
    let mut table = Table {
        dp: vec![vec![0; cols]; rows],
    };
    if rows == 0 || cols == 0 {
        return rejected(&table, DpAction::Error, "Grid must have at least one cell".to_string());
    }

    let blocked = |r: usize, c: usize| grid[r].get(c) == Some(&OBSTACLE);
    if blocked(0, 0) || blocked(rows - 1, cols - 1) {
        return rejected(
            &table,
            DpAction::Obstacle,
            "Start or end position is blocked".to_string(),
        );
    }

    let mut trace = TraceBuilder::new();
    trace.record(table.step(
        DpAction::Start,
        format!("Starting Grid Paths algorithm on {}x{} grid", rows, cols),
        None,
    ));

    table.dp[0][0] = 1;
    trace.record(table.step(
        DpAction::BaseCase,
        "Starting position (0,0) has 1 path".to_string(),
        Some(Cell::new(0, 0)),
    ));

    for i in 0..rows {
        for j in 0..cols {
            if i == 0 && j == 0 {
                continue;
            }
            let cell = Some(Cell::new(i, j));
            trace.record(table.step(
                DpAction::Computing,
                format!("Processing cell ({},{})", i, j),
                cell,
            ));

            if blocked(i, j) {
                table.dp[i][j] = 0;
                trace.record(table.step(
                    DpAction::Obstacle,
                    format!("Cell ({},{}) is obstacle", i, j),
                    cell,
                ));
                continue;
            }

            let from_top = if i > 0 { table.dp[i - 1][j] } else { 0 };
            let from_left = if j > 0 { table.dp[i][j - 1] } else { 0 };
            let Some(sum) = from_top.checked_add(from_left) else {
                let message = format!("Path count overflows at cell ({},{})", i, j);
                let terminal = table.step(DpAction::Error, message.clone(), cell);
                return Trace::new(
                    trace.finish(terminal),
                    GridPathsSummary {
                        total_paths: 0,
                        error: Some(message),
                    },
                );
            };
            table.dp[i][j] = sum;
            trace.record(table.step(
                DpAction::Summing,
                format!(
                    "Cell ({},{}): {} from top + {} from left = {}",
                    i, j, from_top, from_left, sum
                ),
                cell,
            ));
        }
    }

    let total_paths = table.total();
    let steps = trace.finish(table.step(
        DpAction::Completed,
        format!("Total unique paths: {}", total_paths),
        None,
    ));
    Trace::new(
        steps,
        GridPathsSummary {
            total_paths,
            error: None,
        },
    )
}
