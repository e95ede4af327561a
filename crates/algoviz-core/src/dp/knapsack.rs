use serde::Serialize;

use super::DpAction;
use crate::trace::{StepEvent, Trace, TraceBuilder};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnapsackStep {
    pub action: DpAction,
    pub message: String,
    /// `dp[i][w]`: best value using the first `i` items within capacity `w`.
    pub dp: Vec<Vec<u64>>,
    pub current_item: Option<usize>,
    pub current_capacity: Option<usize>,
    pub max_value: u64,
}

impl StepEvent for KnapsackStep {
    fn tag(&self) -> &'static str {
        self.action.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnapsackSummary {
    pub max_value: u64,
    /// Indices of one optimal packing, ascending.
    pub selected_items: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub type KnapsackTrace = Trace<KnapsackStep, KnapsackSummary>;

struct Table {
    dp: Vec<Vec<u64>>,
    items: usize,
    capacity: usize,
}

impl Table {
    fn step(&self, action: DpAction, message: String, at: Option<(usize, usize)>) -> KnapsackStep {
        KnapsackStep {
            action,
            message,
            dp: self.dp.clone(),
            current_item: at.map(|(item, _)| item),
            current_capacity: at.map(|(_, w)| w),
            max_value: self.dp[self.items][self.capacity],
        }
    }

    /// Walks back from `dp[n][capacity]`; a row whose value differs from the
    /// row above took its item.
    fn selected_items(&self, weights: &[usize]) -> Vec<usize> {
        let mut w = self.capacity;
        let mut selected = Vec::new();
        for i in (1..=self.items).rev() {
            if self.dp[i][w] != self.dp[i - 1][w] {
                selected.push(i - 1);
                w -= weights[i - 1];
            }
        }
        selected.reverse();
        selected
    }
}

/// 0/1 knapsack over `(weights[i], values[i])` pairs.
///
/// An item is included only when that is strictly better than leaving it
/// out. Value sums saturate at `u64::MAX`.
pub fn knapsack01(weights: &[usize], values: &[u64], capacity: usize) -> KnapsackTrace {
    if weights.len() != values.len() {
        let message = format!(
            "weights and values must have the same length ({} != {})",
            weights.len(),
            values.len()
        );
        let step = KnapsackStep {
            action: DpAction::Error,
            message: message.clone(),
            dp: Vec::new(),
            current_item: None,
            current_capacity: None,
            max_value: 0,
        };
        return Trace::new(
            vec![step],
            KnapsackSummary {
                max_value: 0,
                selected_items: Vec::new(),
                error: Some(message),
            },
        );
    }

    let n = weights.len();
    let mut table = Table {
        dp: vec![vec![0; capacity + 1]; n + 1],
        items: n,
        capacity,
    };
    let mut trace = TraceBuilder::new();
    trace.record(table.step(
        DpAction::Start,
        format!("Starting 0/1 Knapsack with {} items and capacity {}", n, capacity),
        None,
    ));

    for i in 1..=n {
        let (weight, value) = (weights[i - 1], values[i - 1]);
        for w in 1..=capacity {
            let at = Some((i - 1, w));
            trace.record(table.step(
                DpAction::Computing,
                format!(
                    "Processing item {} (weight: {}, value: {}) at capacity {}",
                    i - 1,
                    weight,
                    value,
                    w
                ),
                at,
            ));

            if weight > w {
                table.dp[i][w] = table.dp[i - 1][w];
                trace.record(table.step(
                    DpAction::Skip,
                    format!("Skip item {} (too heavy: {} > {})", i - 1, weight, w),
                    at,
                ));
                continue;
            }

            let without_item = table.dp[i - 1][w];
            let with_item = table.dp[i - 1][w - weight].saturating_add(value);
            if with_item > without_item {
                table.dp[i][w] = with_item;
                trace.record(table.step(
                    DpAction::Include,
                    format!("Include item {}: {} (previous: {})", i - 1, with_item, without_item),
                    at,
                ));
            } else {
                table.dp[i][w] = without_item;
                trace.record(table.step(
                    DpAction::Exclude,
                    format!("Exclude item {}: {} (would be: {})", i - 1, without_item, with_item),
                    at,
                ));
            }
        }
    }

    let max_value = table.dp[n][capacity];
    let selected_items = table.selected_items(weights);
    let steps = trace.finish(table.step(
        DpAction::Completed,
        format!("Maximum value: {}", max_value),
        None,
    ));
    Trace::new(
        steps,
        KnapsackSummary {
            max_value,
            selected_items,
            error: None,
        },
    )
}
