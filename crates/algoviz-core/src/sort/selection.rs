use super::{Element, SortEvent, SortStep, SortSummary, SortTrace};
use crate::trace::{Trace, TraceBuilder};

/// Selection sort: scan the unsorted suffix for its minimum and swap it into
/// place. The swap step is only recorded when the minimum actually moves.
pub fn selection_sort<T: Element>(input: &[T]) -> SortTrace<T> {
    let mut a = input.to_vec();
    let n = a.len();
    let mut trace = TraceBuilder::new();
    trace.record(SortStep::snapshot(&a));

    for i in 0..n.saturating_sub(1) {
        let mut min_idx = i;
        trace.record(
            SortStep::new(
                SortEvent::Select,
                &a,
                format!("Selecting position {} (current minimum {})", i, a[i]),
            )
            .selected(i)
            .compare(vec![i]),
        );

        for j in i + 1..n {
            trace.record(
                SortStep::new(
                    SortEvent::Compare,
                    &a,
                    format!(
                        "Comparing minimum a[{}]={} with a[{}]={}",
                        min_idx, a[min_idx], j, a[j]
                    ),
                )
                .selected(i)
                .compare(vec![min_idx, j]),
            );
            if a[j] < a[min_idx] {
                min_idx = j;
                trace.record(
                    SortStep::new(
                        SortEvent::Select,
                        &a,
                        format!("New minimum {} at index {}", a[j], j),
                    )
                    .selected(i)
                    .compare(vec![min_idx]),
                );
            }
        }

        if min_idx != i {
            a.swap(i, min_idx);
            trace.record(
                SortStep::new(
                    SortEvent::Swap,
                    &a,
                    format!("Swapped positions {} and {}", i, min_idx),
                )
                .swapped(i, min_idx)
                .selected(i),
            );
        }

        trace.record(
            SortStep::new(
                SortEvent::SortedIndex,
                &a,
                format!("Index {} holds its final value {}", i, a[i]),
            )
            .sorted(i),
        );
    }

    if n > 0 {
        trace.record(
            SortStep::new(
                SortEvent::SortedIndex,
                &a,
                format!("Index {} holds its final value {}", n - 1, a[n - 1]),
            )
            .sorted(n - 1),
        );
    }

    let steps = trace.finish(SortStep::done(&a));
    Trace::new(steps, SortSummary { sorted: a })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swaps_once_per_misplaced_minimum() {
        let trace = selection_sort(&[2, 3, 1]);
        // Pass 0 moves 1 to the front; pass 1 moves 2 behind it.
        let swaps: Vec<_> = trace
            .steps
            .iter()
            .filter_map(|s| s.swapped)
            .collect();
        assert_eq!(swaps, vec![[0, 2], [1, 2]]);
        assert_eq!(trace.summary.sorted, vec![1, 2, 3]);
    }

    #[test]
    fn every_index_is_marked_sorted() {
        let trace = selection_sort(&[5, 1, 4, 2]);
        let sorted: Vec<_> = trace.steps.iter().filter_map(|s| s.sorted).collect();
        assert_eq!(sorted, vec![0, 1, 2, 3]);
    }

    #[test]
    fn comparisons_are_quadratic() {
        let trace = selection_sort(&[4, 3, 2, 1, 0]);
        assert_eq!(trace.stats().count("compare"), 4 + 3 + 2 + 1);
    }
}
