//! Recursive engines: factorial, memoized Fibonacci and N-Queens backtracking.
//!
//! Factorial and Fibonacci are written as real recursion so the trace follows
//! actual call/return order. Both expose the values resolved so far in every
//! step and use exact `u128` arithmetic.

mod factorial;
mod fibonacci;
mod n_queens;

pub use factorial::{factorial, FACTORIAL_EXACT_MAX};
pub use fibonacci::{fibonacci, FIBONACCI_EXACT_MAX};
pub use n_queens::{
    n_queens, Highlight, Position, QueensAction, QueensStep, QueensSummary, Solution,
    MAX_STORED_SOLUTIONS, QUEENS_STEP_CAP,
};

use std::collections::BTreeMap;

use serde::Serialize;

use crate::trace::{StepEvent, Trace, TraceBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecursionAction {
    Start,
    Warning,
    Call,
    BaseCase,
    Recursion,
    Return,
    Memoized,
    Error,
    Completed,
}

impl RecursionAction {
    pub fn as_str(self) -> &'static str {
        match self {
            RecursionAction::Start => "START",
            RecursionAction::Warning => "WARNING",
            RecursionAction::Call => "CALL",
            RecursionAction::BaseCase => "BASE_CASE",
            RecursionAction::Recursion => "RECURSION",
            RecursionAction::Return => "RETURN",
            RecursionAction::Memoized => "MEMOIZED",
            RecursionAction::Error => "ERROR",
            RecursionAction::Completed => "COMPLETED",
        }
    }
}

/// One factorial or Fibonacci event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecursionStep {
    pub action: RecursionAction,
    pub message: String,
    pub current_n: Option<u32>,
    pub result: Option<u128>,
    /// Sequence number of the call that produced this step, from 1.
    pub call_id: Option<usize>,
    pub is_returning: bool,
    pub is_memoized: bool,
    /// Every `(n, value)` pair resolved so far.
    pub computed: BTreeMap<u32, u128>,
    /// Arguments of the calls currently on the stack, outermost first.
    pub call_stack: Vec<u32>,
}

impl StepEvent for RecursionStep {
    fn tag(&self) -> &'static str {
        self.action.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecursionSummary {
    pub result: Option<u128>,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub type RecursionTrace = Trace<RecursionStep, RecursionSummary>;

/// Call bookkeeping shared by factorial and Fibonacci.
struct Calls {
    trace: TraceBuilder<RecursionStep>,
    computed: BTreeMap<u32, u128>,
    stack: Vec<u32>,
    count: usize,
}

impl Calls {
    fn new() -> Self {
        Calls {
            trace: TraceBuilder::new(),
            computed: BTreeMap::new(),
            stack: Vec::new(),
            count: 0,
        }
    }

    /// Opens a call frame for `n` and returns its id.
    fn enter(&mut self, n: u32) -> usize {
        self.count += 1;
        self.stack.push(n);
        self.count
    }

    fn leave(&mut self) {
        self.stack.pop();
    }

    fn step(&self, action: RecursionAction, message: String) -> RecursionStep {
        RecursionStep {
            action,
            message,
            current_n: None,
            result: None,
            call_id: None,
            is_returning: false,
            is_memoized: false,
            computed: self.computed.clone(),
            call_stack: self.stack.clone(),
        }
    }

    fn record(&mut self, action: RecursionAction, message: String) {
        let step = self.step(action, message);
        self.trace.record(step);
    }

    fn record_call(
        &mut self,
        action: RecursionAction,
        message: String,
        n: u32,
        call_id: usize,
        result: Option<u128>,
    ) {
        let step = RecursionStep {
            current_n: Some(n),
            call_id: Some(call_id),
            result,
            is_returning: matches!(action, RecursionAction::BaseCase | RecursionAction::Return),
            is_memoized: action == RecursionAction::Memoized,
            ..self.step(action, message)
        };
        self.trace.record(step);
    }

    fn completed(self, n: u32, result: u128, message: String) -> RecursionTrace {
        let mut step = self.step(RecursionAction::Completed, message);
        step.current_n = Some(n);
        step.result = Some(result);
        Trace::new(
            self.trace.finish(step),
            RecursionSummary {
                result: Some(result),
                is_valid: true,
                error: None,
            },
        )
    }

    fn rejected(self, message: String) -> RecursionTrace {
        let step = self.step(RecursionAction::Error, message.clone());
        Trace::new(
            self.trace.finish(step),
            RecursionSummary {
                result: None,
                is_valid: false,
                error: Some(message),
            },
        )
    }
}

/// Validates `n` for an engine whose exact range ends at `exact_max`. Records
/// the `WARNING` step for large but valid inputs.
fn admit(
    calls: &mut Calls,
    name: &str,
    n: i64,
    warn_above: u32,
    exact_max: u32,
    warning: &str,
) -> Result<u32, String> {
    if n < 0 {
        return Err(format!("{} is not defined for negative numbers: {}", name, n));
    }
    let n = match u32::try_from(n) {
        Ok(n) if n <= exact_max => n,
        _ => {
            return Err(format!(
                "{}({}) exceeds the exact integer range (n <= {})",
                name.to_lowercase(),
                n,
                exact_max
            ))
        }
    };
    if n > warn_above {
        calls.record(
            RecursionAction::Warning,
            format!("Large number: {}. {}", n, warning),
        );
    }
    Ok(n)
}
