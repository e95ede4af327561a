use super::{SearchAction, SearchStep, SearchSummary, SearchTrace};
use crate::sort::Element;
use crate::trace::{Trace, TraceBuilder};

/// Iterative binary search over a non-decreasing array.
///
/// Sortedness is checked before any midpoint is computed; an unsorted array
/// yields a single `ERROR` step.
pub fn binary_search<T: Element>(array: &[T], target: &T) -> SearchTrace<T> {
    let mut trace = TraceBuilder::new();

    if array.windows(2).any(|pair| pair[1] < pair[0]) {
        let steps = trace.finish(SearchStep::new(
            SearchAction::Error,
            "Array must be sorted for Binary Search",
            array,
            target,
        ));
        let summary = SearchSummary {
            error: Some("Array not sorted".to_string()),
            ..SearchSummary::missing()
        };
        return Trace::new(steps, summary);
    }

    let mut left: i64 = 0;
    let mut right: i64 = array.len() as i64 - 1;

    trace.record(
        SearchStep::new(
            SearchAction::Start,
            format!("Starting Binary Search for {} in sorted array", target),
            array,
            target,
        )
        .bounds(left, right),
    );

    while left <= right {
        // left <= right keeps both non-negative here.
        let mid = ((left + right) / 2) as usize;
        let value = &array[mid];

        trace.record(
            SearchStep::new(
                SearchAction::Mid,
                format!("Calculating mid = ({} + {}) / 2 = {}", left, right, mid),
                array,
                target,
            )
            .at(mid)
            .bounds(left, right),
        );
        trace.record(
            SearchStep::new(
                SearchAction::Compare,
                format!("Comparing array[{}] = {} with target {}", mid, value, target),
                array,
                target,
            )
            .at(mid)
            .bounds(left, right),
        );

        if value == target {
            let mut found = SearchStep::new(
                SearchAction::Found,
                format!("Found {} at index {}", target, mid),
                array,
                target,
            )
            .at(mid)
            .bounds(left, right);
            found.found_index = Some(mid);
            let steps = trace.finish(found);
            return Trace::new(steps, SearchSummary::found(mid));
        }

        if value < target {
            left = mid as i64 + 1;
            trace.record(
                SearchStep::new(
                    SearchAction::GoRight,
                    format!("{} < {}, searching right half", value, target),
                    array,
                    target,
                )
                .at(mid)
                .bounds(left, right),
            );
        } else {
            right = mid as i64 - 1;
            trace.record(
                SearchStep::new(
                    SearchAction::GoLeft,
                    format!("{} > {}, searching left half", value, target),
                    array,
                    target,
                )
                .at(mid)
                .bounds(left, right),
            );
        }
    }

    let steps = trace.finish(
        SearchStep::new(
            SearchAction::NotFound,
            format!("Target {} not found in array", target),
            array,
            target,
        )
        .bounds(left, right),
    );
    Trace::new(steps, SearchSummary::missing())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn unsorted_input_is_rejected_up_front() {
        let trace = binary_search(&[1, 3, 2], &3);
        assert_eq!(trace.tags(), vec!["ERROR"]);
        assert!(!trace.summary.found);
        assert_eq!(trace.summary.error.as_deref(), Some("Array not sorted"));
    }

    #[test]
    fn walks_left_and_right() {
        let trace = binary_search(&[1, 3, 5, 7, 9, 11, 13], &11);
        assert_eq!(
            trace.tags(),
            vec!["START", "MID", "COMPARE", "GO_RIGHT", "MID", "COMPARE", "FOUND"]
        );
        assert_eq!(trace.summary.index, Some(5));
        let go_right = &trace.steps[3];
        assert_eq!((go_right.left, go_right.right), (Some(4), Some(6)));
    }

    #[test]
    fn crossing_bounds_ends_with_not_found() {
        let trace = binary_search(&[2, 4], &1);
        assert_eq!(
            trace.tags(),
            vec!["START", "MID", "COMPARE", "GO_LEFT", "NOT_FOUND"]
        );
        let last = trace.steps.last().unwrap();
        assert_eq!((last.left, last.right), (Some(0), Some(-1)));
    }

    #[test]
    fn duplicates_are_allowed() {
        let trace = binary_search(&[1, 2, 2, 2, 3], &2);
        assert!(trace.summary.found);
        assert_eq!(trace.summary.index, Some(2));
    }

    #[test]
    fn empty_array_is_not_found() {
        let trace = binary_search::<i64>(&[], &4);
        assert_eq!(trace.tags(), vec!["START", "NOT_FOUND"]);
    }

    proptest! {
        #[test]
        fn agrees_with_position_on_distinct_sorted_input(
            set in proptest::collection::btree_set(-200i64..200, 0..64),
            target in -200i64..200,
        ) {
            let array: Vec<i64> = set.into_iter().collect();
            let trace = binary_search(&array, &target);
            prop_assert_eq!(trace.summary.index, array.iter().position(|v| *v == target));
            prop_assert_eq!(trace.summary.found, array.contains(&target));

            // At most floor(log2 n) + 1 probes.
            let bound = if array.is_empty() { 0 } else { array.len().ilog2() as usize + 1 };
            prop_assert!(trace.stats().count("MID") <= bound);
        }
    }
}
