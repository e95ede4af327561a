//! Search engines: linear scan and iterative binary search.

mod binary;
mod linear;

pub use binary::binary_search;
pub use linear::linear_search;

use serde::Serialize;

use crate::trace::{StepEvent, Trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchAction {
    Start,
    Compare,
    Continue,
    Mid,
    GoLeft,
    GoRight,
    Found,
    NotFound,
    Error,
}

impl SearchAction {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchAction::Start => "START",
            SearchAction::Compare => "COMPARE",
            SearchAction::Continue => "CONTINUE",
            SearchAction::Mid => "MID",
            SearchAction::GoLeft => "GO_LEFT",
            SearchAction::GoRight => "GO_RIGHT",
            SearchAction::Found => "FOUND",
            SearchAction::NotFound => "NOT_FOUND",
            SearchAction::Error => "ERROR",
        }
    }
}

/// One search event. `left`/`right` are only set by binary search and may
/// cross (`right = -1`) on the final iteration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStep<T> {
    pub action: SearchAction,
    pub message: String,
    pub array: Vec<T>,
    pub target: T,
    pub current_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<i64>,
}

impl<T: Clone> SearchStep<T> {
    pub(crate) fn new(
        action: SearchAction,
        message: impl Into<String>,
        array: &[T],
        target: &T,
    ) -> Self {
        SearchStep {
            action,
            message: message.into(),
            array: array.to_vec(),
            target: target.clone(),
            current_index: None,
            current_value: None,
            found_index: None,
            left: None,
            right: None,
        }
    }

    pub(crate) fn at(mut self, index: usize) -> Self {
        self.current_index = Some(index);
        self
    }

    pub(crate) fn bounds(mut self, left: i64, right: i64) -> Self {
        self.left = Some(left);
        self.right = Some(right);
        self
    }
}

impl<T> StepEvent for SearchStep<T> {
    fn tag(&self) -> &'static str {
        self.action.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchSummary {
    pub found: bool,
    /// Position of the match, `null` when absent.
    pub index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchSummary {
    fn found(index: usize) -> Self {
        SearchSummary {
            found: true,
            index: Some(index),
            error: None,
        }
    }

    fn missing() -> Self {
        SearchSummary {
            found: false,
            index: None,
            error: None,
        }
    }
}

pub type SearchTrace<T> = Trace<SearchStep<T>, SearchSummary>;
