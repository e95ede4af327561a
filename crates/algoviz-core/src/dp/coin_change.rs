use serde::Serialize;

use super::DpAction;
use crate::trace::{StepEvent, Trace, TraceBuilder};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinChangeStep {
    pub action: DpAction,
    pub message: String,
    /// `dp[a]`: fewest coins summing to `a`; `null` while unreachable.
    pub dp: Vec<Option<usize>>,
    pub current_amount: Option<usize>,
    pub coin_used: Option<usize>,
    pub min_coins: i64,
}

impl StepEvent for CoinChangeStep {
    fn tag(&self) -> &'static str {
        self.action.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinChangeSummary {
    /// `-1` when the amount cannot be formed.
    pub min_coins: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub type CoinChangeTrace = Trace<CoinChangeStep, CoinChangeSummary>;

fn min_coins(best: Option<usize>) -> i64 {
    best.map_or(-1, |count| count as i64)
}

struct Table {
    dp: Vec<Option<usize>>,
    amount: usize,
}

impl Table {
    fn step(
        &self,
        action: DpAction,
        message: String,
        current_amount: Option<usize>,
        coin_used: Option<usize>,
    ) -> CoinChangeStep {
        CoinChangeStep {
            action,
            message,
            dp: self.dp.clone(),
            current_amount,
            coin_used,
            min_coins: min_coins(self.dp[self.amount]),
        }
    }
}

/// Fewest coins from `coins` (unlimited supply of each) summing to `amount`.
pub fn coin_change(coins: &[usize], amount: usize) -> CoinChangeTrace {
    if coins.is_empty() {
        let message = "At least one coin denomination is required".to_string();
        let step = CoinChangeStep {
            action: DpAction::Error,
            message: message.clone(),
            dp: Vec::new(),
            current_amount: None,
            coin_used: None,
            min_coins: -1,
        };
        return Trace::new(
            vec![step],
            CoinChangeSummary {
                min_coins: -1,
                error: Some(message),
            },
        );
    }

    let mut table = Table {
        dp: vec![None; amount + 1],
        amount,
    };
    table.dp[0] = Some(0);

    let mut trace = TraceBuilder::new();
    let listed: Vec<String> = coins.iter().map(ToString::to_string).collect();
    trace.record(table.step(
        DpAction::Start,
        format!(
            "Starting Coin Change with coins [{}] for amount {}",
            listed.join(", "),
            amount
        ),
        None,
        None,
    ));

    for i in 1..=amount {
        trace.record(table.step(
            DpAction::Computing,
            format!("Finding minimum coins for amount {}", i),
            Some(i),
            None,
        ));

        for &coin in coins {
            if coin > i {
                continue;
            }
            let Some(previous) = table.dp[i - coin] else {
                continue;
            };
            let candidate = previous + 1;
            match table.dp[i] {
                Some(current) if candidate >= current => {
                    trace.record(table.step(
                        DpAction::NoUpdate,
                        format!("Coin {} doesn't improve: {} >= {}", coin, candidate, current),
                        Some(i),
                        Some(coin),
                    ));
                }
                current => {
                    table.dp[i] = Some(candidate);
                    let was = current.map_or_else(|| "∞".to_string(), |c| c.to_string());
                    trace.record(table.step(
                        DpAction::Update,
                        format!("Using coin {}: dp[{}] = min({}, {})", coin, i, was, candidate),
                        Some(i),
                        Some(coin),
                    ));
                }
            }
        }

        if table.dp[i].is_none() {
            trace.record(table.step(
                DpAction::Impossible,
                format!("Cannot form amount {} with given coins", i),
                Some(i),
                None,
            ));
        }
    }

    let result = min_coins(table.dp[amount]);
    let message = if result < 0 {
        format!("Cannot form amount {} with given coins", amount)
    } else {
        format!("Minimum coins needed: {}", result)
    };
    let steps = trace.finish(table.step(DpAction::Completed, message, None, None));
    Trace::new(
        steps,
        CoinChangeSummary {
            min_coins: result,
            error: None,
        },
    )
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn greedy_is_not_optimal_here() {
        let trace = coin_change(&[1, 3, 4], 6);
        assert_eq!(trace.summary.min_coins, 2);
        assert_eq!(trace.stats().count("COMPUTING"), 6);
    }

    #[test]
    fn zero_amount_needs_no_coins() {
        let trace = coin_change(&[1, 3, 4], 0);
        assert_eq!(trace.summary.min_coins, 0);
        assert_eq!(trace.tags(), vec!["START", "COMPLETED"]);
    }

    #[test]
    fn unreachable_amounts_report_minus_one() {
        let trace = coin_change(&[2], 3);
        assert_eq!(trace.summary.min_coins, -1);
        assert_eq!(trace.stats().count("IMPOSSIBLE"), 2);
        let last = trace.steps.last().unwrap();
        assert_eq!(last.dp, vec![Some(0), None, Some(1), None]);
    }

    #[test]
    fn unreachable_cells_serialize_as_null() {
        let trace = coin_change(&[2], 1);
        let json = serde_json::to_value(trace.steps.last().unwrap()).unwrap();
        assert_eq!(json["dp"], serde_json::json!([0, null]));
        assert_eq!(json["minCoins"], serde_json::json!(-1));
    }

    #[test]
    fn no_coins_is_rejected() {
        let trace = coin_change(&[], 5);
        assert_eq!(trace.tags(), vec!["ERROR"]);
        assert_eq!(trace.summary.min_coins, -1);
    }

    #[test]
    fn zero_denomination_never_improves() {
        let trace = coin_change(&[0, 5], 5);
        assert_eq!(trace.summary.min_coins, 1);
    }

    fn reference(coins: &[usize], amount: usize) -> i64 {
        // Breadth-first over amounts: the first level reaching `amount` wins.
        let mut seen = vec![false; amount + 1];
        let mut frontier = vec![0usize];
        seen[0] = true;
        let mut level = 0;
        while !frontier.is_empty() {
            if frontier.contains(&amount) {
                return level;
            }
            let mut next = Vec::new();
            for &a in &frontier {
                for &c in coins {
                    let b = a + c;
                    if c > 0 && b <= amount && !seen[b] {
                        seen[b] = true;
                        next.push(b);
                    }
                }
            }
            frontier = next;
            level += 1;
        }
        -1
    }

    proptest! {
        #[test]
        fn matches_breadth_first_reference(
            coins in prop::collection::vec(1usize..12, 1..5),
            amount in 0usize..60,
        ) {
            let trace = coin_change(&coins, amount);
            prop_assert_eq!(trace.summary.min_coins, reference(&coins, amount));
        }
    }
}
