//! Sorting engines: bubble, selection, insertion, merge, quick.
//!
//! Every engine copies its input, records a `snapshot` step, one step per
//! comparison and per mutation, and a terminal `done` step whose array is the
//! fully sorted sequence. Merge and quick sort tag steps with the
//! [`DivisionId`] of the recursive call that produced them.

mod bubble;
mod insertion;
mod merge;
mod quick;
mod selection;

pub use bubble::bubble_sort;
pub use insertion::insertion_sort;
pub use merge::merge_sort;
pub use quick::quick_sort;
pub use selection::selection_sort;

use serde::Serialize;

use crate::id::DivisionId;
use crate::trace::{StepEvent, Trace};

/// Element bound shared by the sorting and searching engines.
pub trait Element: PartialOrd + Clone + std::fmt::Display {}

impl<T: PartialOrd + Clone + std::fmt::Display> Element for T {}

/// Event kind of a sorting step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortEvent {
    Snapshot,
    Compare,
    Swap,
    Shift,
    Insert,
    Select,
    SortedIndex,
    Divide,
    Merge,
    Pivot,
    Done,
}

impl SortEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            SortEvent::Snapshot => "snapshot",
            SortEvent::Compare => "compare",
            SortEvent::Swap => "swap",
            SortEvent::Shift => "shift",
            SortEvent::Insert => "insert",
            SortEvent::Select => "select",
            SortEvent::SortedIndex => "sortedIndex",
            SortEvent::Divide => "divide",
            SortEvent::Merge => "merge",
            SortEvent::Pivot => "pivot",
            SortEvent::Done => "done",
        }
    }

    /// Display label shown by the replay client.
    pub fn label(self) -> &'static str {
        match self {
            SortEvent::Snapshot => "Initializing",
            SortEvent::Compare => "Comparing",
            SortEvent::Swap => "Swapping",
            SortEvent::Shift => "Shifting",
            SortEvent::Insert => "Inserting",
            SortEvent::Select => "Selecting",
            SortEvent::SortedIndex => "Sorted",
            SortEvent::Divide => "Dividing",
            SortEvent::Merge => "Merging",
            SortEvent::Pivot => "Partitioning",
            SortEvent::Done => "Completed",
        }
    }
}

/// One recorded sorting event with a copy of the array at that instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortStep<T> {
    #[serde(rename = "type")]
    pub kind: SortEvent,
    pub action: &'static str,
    pub message: String,
    pub array: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare: Option<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swapped: Option<[usize; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shifted: Option<[usize; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inserted: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorted: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub division: Option<DivisionId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pivot: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<usize>,
}

impl<T: Clone> SortStep<T> {
    pub(crate) fn new(kind: SortEvent, array: &[T], message: impl Into<String>) -> Self {
        SortStep {
            kind,
            action: kind.label(),
            message: message.into(),
            array: array.to_vec(),
            compare: None,
            swapped: None,
            shifted: None,
            inserted: None,
            selected: None,
            sorted: None,
            division: None,
            pivot: None,
            left: None,
            right: None,
        }
    }

    pub(crate) fn snapshot(array: &[T]) -> Self {
        SortStep::new(SortEvent::Snapshot, array, "Initial array").compare(Vec::new())
    }

    pub(crate) fn done(array: &[T]) -> Self {
        SortStep::new(SortEvent::Done, array, "Array is sorted")
    }

    pub(crate) fn compare(mut self, indices: Vec<usize>) -> Self {
        self.compare = Some(indices);
        self
    }

    pub(crate) fn swapped(mut self, a: usize, b: usize) -> Self {
        self.swapped = Some([a, b]);
        self
    }

    pub(crate) fn shifted(mut self, from: usize, to: usize) -> Self {
        self.shifted = Some([from, to]);
        self
    }

    pub(crate) fn inserted(mut self, index: usize) -> Self {
        self.inserted = Some(index);
        self
    }

    pub(crate) fn selected(mut self, index: usize) -> Self {
        self.selected = Some(index);
        self
    }

    pub(crate) fn sorted(mut self, index: usize) -> Self {
        self.sorted = Some(index);
        self
    }

    pub(crate) fn division(mut self, id: DivisionId) -> Self {
        self.division = Some(id);
        self
    }

    pub(crate) fn pivot(mut self, index: usize) -> Self {
        self.pivot = Some(index);
        self
    }

    pub(crate) fn range(mut self, left: usize, right: usize) -> Self {
        self.left = Some(left);
        self.right = Some(right);
        self
    }
}

impl<T> StepEvent for SortStep<T> {
    fn tag(&self) -> &'static str {
        self.kind.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortSummary<T> {
    /// The input in ascending order (also the `done` step's array).
    pub sorted: Vec<T>,
}

pub type SortTrace<T> = Trace<SortStep<T>, SortSummary<T>>;
