//! Step recording shared by every engine.
//!
//! An engine owns one [`TraceBuilder`] and threads it by `&mut` through its
//! loops and recursive calls, pushing a self-contained snapshot at every
//! notable event. Snapshots are values: nothing in a recorded step aliases
//! the engine's working state, so later mutation cannot rewrite history.
//!
//! The finished [`Trace`] pairs the ordered steps with an engine-specific
//! summary that serializes flattened beside `steps`.

use indexmap::IndexMap;
use serde::Serialize;

/// A recorded step that can name its event kind.
pub trait StepEvent {
    /// Discriminant tag as it appears on the wire (e.g. `"COMPARE"`).
    fn tag(&self) -> &'static str;
}

/// Append-only step accumulator with an optional hard cap.
#[derive(Debug, Clone)]
pub struct TraceBuilder<S> {
    steps: Vec<S>,
    cap: Option<usize>,
    truncated: bool,
}

impl<S> TraceBuilder<S> {
    pub fn new() -> Self {
        TraceBuilder {
            steps: Vec::new(),
            cap: None,
            truncated: false,
        }
    }

    /// A builder that silently drops steps once `cap` have been recorded.
    pub fn with_cap(cap: usize) -> Self {
        TraceBuilder {
            steps: Vec::new(),
            cap: Some(cap),
            truncated: false,
        }
    }

    /// Appends `step` unless the cap is reached. Returns whether it was kept.
    pub fn record(&mut self, step: S) -> bool {
        if self.is_full() {
            self.truncated = true;
            return false;
        }
        self.steps.push(step);
        true
    }

    /// Like [`record`](Self::record) but only builds the snapshot when it
    /// will be kept.
    pub fn record_with(&mut self, build: impl FnOnce() -> S) -> bool {
        if self.is_full() {
            self.truncated = true;
            return false;
        }
        self.steps.push(build());
        true
    }

    /// Appends the terminal step, ignoring the cap, and returns the steps.
    pub fn finish(mut self, terminal: S) -> Vec<S> {
        self.steps.push(terminal);
        self.steps
    }

    pub fn into_steps(self) -> Vec<S> {
        self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cap.is_some_and(|cap| self.steps.len() >= cap)
    }

    /// True once at least one step has been dropped by the cap.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl<S> Default for TraceBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// A finished trace: ordered steps plus the engine's summary fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace<S, T> {
    pub steps: Vec<S>,
    #[serde(flatten)]
    pub summary: T,
}

impl<S, T> Trace<S, T> {
    pub fn new(steps: Vec<S>, summary: T) -> Self {
        Trace { steps, summary }
    }
}

impl<S: StepEvent, T> Trace<S, T> {
    /// Tags of every step, in order.
    pub fn tags(&self) -> Vec<&'static str> {
        self.steps.iter().map(StepEvent::tag).collect()
    }

    pub fn stats(&self) -> TraceStats {
        TraceStats::from_steps(&self.steps)
    }
}

/// Per-tag step tally for the replay client's operation-count panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceStats {
    pub total_steps: usize,
    /// Counts keyed by tag, in first-seen order.
    pub action_counts: IndexMap<&'static str, usize>,
}

impl TraceStats {
    pub fn from_steps<S: StepEvent>(steps: &[S]) -> Self {
        let mut action_counts = IndexMap::new();
        for step in steps {
            *action_counts.entry(step.tag()).or_insert(0) += 1;
        }
        TraceStats {
            total_steps: steps.len(),
            action_counts,
        }
    }

    pub fn count(&self, tag: &str) -> usize {
        self.action_counts.get(tag).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Tick(&'static str);

    impl StepEvent for Tick {
        fn tag(&self) -> &'static str {
            self.0
        }
    }

    #[test]
    fn uncapped_builder_keeps_everything() {
        let mut builder = TraceBuilder::new();
        for _ in 0..1000 {
            assert!(builder.record(Tick("A")));
        }
        assert_eq!(builder.len(), 1000);
        assert!(!builder.is_full());
        assert!(!builder.is_truncated());
    }

    #[test]
    fn cap_drops_and_marks_truncated() {
        let mut builder = TraceBuilder::with_cap(2);
        assert!(builder.record(Tick("A")));
        assert!(builder.record(Tick("B")));
        assert!(!builder.is_truncated());
        assert!(!builder.record(Tick("C")));
        assert!(builder.is_full());
        assert!(builder.is_truncated());
        assert_eq!(builder.len(), 2);
    }

    #[test]
    fn record_with_skips_building_when_full() {
        let mut builder = TraceBuilder::with_cap(0);
        let mut built = false;
        builder.record_with(|| {
            built = true;
            Tick("A")
        });
        assert!(!built);
        assert!(builder.is_truncated());
    }

    #[test]
    fn finish_bypasses_cap() {
        let mut builder = TraceBuilder::with_cap(1);
        builder.record(Tick("START"));
        builder.record(Tick("DROPPED"));
        let steps = builder.finish(Tick("COMPLETED"));
        assert_eq!(steps, vec![Tick("START"), Tick("COMPLETED")]);
    }

    #[test]
    fn stats_count_in_first_seen_order() {
        let trace = Trace::new(
            vec![Tick("START"), Tick("VISIT"), Tick("SKIP"), Tick("VISIT")],
            (),
        );
        let stats = trace.stats();
        assert_eq!(stats.total_steps, 4);
        assert_eq!(stats.count("VISIT"), 2);
        assert_eq!(stats.count("MISSING"), 0);
        let order: Vec<_> = stats.action_counts.keys().copied().collect();
        assert_eq!(order, vec!["START", "VISIT", "SKIP"]);
        assert_eq!(trace.tags(), vec!["START", "VISIT", "SKIP", "VISIT"]);
    }
}
