use serde::Serialize;

use super::DpAction;
use crate::trace::{StepEvent, Trace, TraceBuilder};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LcsStep {
    pub action: DpAction,
    pub message: String,
    pub dp: Vec<Vec<usize>>,
    /// Character positions being compared (0-based).
    pub current_i: Option<usize>,
    pub current_j: Option<usize>,
    #[serde(rename = "match")]
    pub is_match: Option<bool>,
    pub lcs_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lcs_string: Option<String>,
    pub str1: String,
    pub str2: String,
}

impl StepEvent for LcsStep {
    fn tag(&self) -> &'static str {
        self.action.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LcsSummary {
    pub lcs_length: usize,
    pub lcs_string: String,
}

pub type LcsTrace = Trace<LcsStep, LcsSummary>;

struct Table<'s> {
    str1: &'s str,
    str2: &'s str,
    dp: Vec<Vec<usize>>,
}

impl Table<'_> {
    fn step(&self, action: DpAction, message: String) -> LcsStep {
        LcsStep {
            action,
            message,
            dp: self.dp.clone(),
            current_i: None,
            current_j: None,
            is_match: None,
            lcs_length: self.dp[self.dp.len() - 1][self.dp[0].len() - 1],
            lcs_string: None,
            str1: self.str1.to_string(),
            str2: self.str2.to_string(),
        }
    }

    fn cell(&self, action: DpAction, message: String, i: usize, j: usize, is_match: Option<bool>) -> LcsStep {
        LcsStep {
            current_i: Some(i),
            current_j: Some(j),
            is_match,
            ..self.step(action, message)
        }
    }
}

/// Walks back from the bottom-right cell. Moves up only when the cell above
/// is strictly larger than the one to the left, which fixes which of several
/// equal-length subsequences is returned.
fn reconstruct(a: &[char], b: &[char], dp: &[Vec<usize>]) -> String {
    let (mut i, mut j) = (a.len(), b.len());
    let mut out = Vec::with_capacity(dp[i][j]);
    while i > 0 && j > 0 {
        if a[i - 1] == b[j - 1] {
            out.push(a[i - 1]);
            i -= 1;
            j -= 1;
        } else if dp[i - 1][j] > dp[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    out.iter().rev().collect()
}

/// Longest common subsequence of two strings, compared by Unicode scalar.
pub fn lcs(str1: &str, str2: &str) -> LcsTrace {
    let a: Vec<char> = str1.chars().collect();
    let b: Vec<char> = str2.chars().collect();
    let (m, n) = (a.len(), b.len());

    let mut table = Table {
        str1,
        str2,
        dp: vec![vec![0; n + 1]; m + 1],
    };
    let mut trace = TraceBuilder::new();
    trace.record(table.step(
        DpAction::Start,
        format!("Starting LCS for '{}' and '{}'", str1, str2),
    ));

    for i in 1..=m {
        for j in 1..=n {
            trace.record(table.cell(
                DpAction::Computing,
                format!(
                    "Comparing str1[{}]='{}' with str2[{}]='{}'",
                    i - 1,
                    a[i - 1],
                    j - 1,
                    b[j - 1]
                ),
                i - 1,
                j - 1,
                None,
            ));

            if a[i - 1] == b[j - 1] {
                table.dp[i][j] = table.dp[i - 1][j - 1] + 1;
                trace.record(table.cell(
                    DpAction::Match,
                    format!("Characters match! LCS[{}][{}] = {}", i, j, table.dp[i][j]),
                    i - 1,
                    j - 1,
                    Some(true),
                ));
            } else {
                let (up, left) = (table.dp[i - 1][j], table.dp[i][j - 1]);
                table.dp[i][j] = up.max(left);
                trace.record(table.cell(
                    DpAction::NoMatch,
                    format!(
                        "Characters don't match. LCS[{}][{}] = max({}, {}) = {}",
                        i, j, up, left, table.dp[i][j]
                    ),
                    i - 1,
                    j - 1,
                    Some(false),
                ));
            }
        }
    }

    let lcs_length = table.dp[m][n];
    let lcs_string = reconstruct(&a, &b, &table.dp);
    let mut completed = table.step(
        DpAction::Completed,
        format!("LCS Length: {}, LCS String: '{}'", lcs_length, lcs_string),
    );
    completed.lcs_string = Some(lcs_string.clone());
    Trace::new(
        trace.finish(completed),
        LcsSummary {
            lcs_length,
            lcs_string,
        },
    )
}
