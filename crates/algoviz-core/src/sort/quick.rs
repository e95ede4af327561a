use super::{Element, SortEvent, SortStep, SortSummary, SortTrace};
use crate::id::DivisionId;
use crate::trace::{Trace, TraceBuilder};

/// Quick sort with Lomuto partitioning around the last element of each range.
pub fn quick_sort<T: Element>(input: &[T]) -> SortTrace<T> {
    let mut a = input.to_vec();
    let mut trace = TraceBuilder::new();
    trace.record(SortStep::snapshot(&a));

    if !a.is_empty() {
        let last = a.len() - 1;
        sort_range(&mut a, 0, last, DivisionId::ROOT, &mut trace);
    }

    let steps = trace.finish(SortStep::done(&a));
    Trace::new(steps, SortSummary { sorted: a })
}

fn sort_range<T: Element>(
    a: &mut [T],
    low: usize,
    high: usize,
    div: DivisionId,
    trace: &mut TraceBuilder<SortStep<T>>,
) {
    if low == high {
        trace.record(
            SortStep::new(
                SortEvent::SortedIndex,
                a,
                format!("Index {} holds its final value {}", low, a[low]),
            )
            .sorted(low),
        );
        return;
    }
    if low > high {
        return;
    }

    trace.record(
        SortStep::new(
            SortEvent::Divide,
            a,
            format!("Sorting range {}..={} (division {})", low, high, div),
        )
        .division(div)
        .compare(Vec::new())
        .range(low, high),
    );

    let pivot = partition(a, low, high, div, trace);
    if pivot > low {
        sort_range(a, low, pivot - 1, div.left(), trace);
    }
    if pivot < high {
        sort_range(a, pivot + 1, high, div.right(), trace);
    }
}

/// Returns the pivot's final index.
fn partition<T: Element>(
    a: &mut [T],
    low: usize,
    high: usize,
    div: DivisionId,
    trace: &mut TraceBuilder<SortStep<T>>,
) -> usize {
    let pivot = a[high].clone();
    trace.record(
        SortStep::new(
            SortEvent::Pivot,
            a,
            format!("Pivot is {} at index {}", pivot, high),
        )
        .division(div)
        .compare(Vec::new())
        .pivot(high)
        .range(low, high),
    );

    // Next slot for an element smaller than the pivot.
    let mut store = low;
    for j in low..high {
        trace.record(
            SortStep::new(
                SortEvent::Compare,
                a,
                format!("Comparing {} with pivot {}", a[j], pivot),
            )
            .division(div)
            .compare(vec![j, high])
            .pivot(high)
            .range(low, high),
        );
        if a[j] < pivot {
            if store != j {
                a.swap(store, j);
                trace.record(
                    SortStep::new(
                        SortEvent::Swap,
                        a,
                        format!("Swapped positions {} and {}", store, j),
                    )
                    .swapped(store, j)
                    .division(div)
                    .pivot(high)
                    .range(low, high),
                );
            }
            store += 1;
        }
    }

    a.swap(store, high);
    trace.record(
        SortStep::new(
            SortEvent::Pivot,
            a,
            format!("Pivot {} placed at index {}", pivot, store),
        )
        .division(div)
        .compare(Vec::new())
        .pivot(store)
        .range(low, high),
    );
    store
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_op_swaps_are_not_recorded() {
        // Every element is below the pivot, so each lands where it already is.
        let trace = quick_sort(&[1, 2, 3, 9]);
        assert_eq!(trace.stats().count("swap"), 0);
        assert_eq!(trace.stats().count("compare"), 3 + 2 + 1);
    }

    #[test]
    fn pivot_is_marked_before_and_after_partition() {
        let trace = quick_sort(&[3, 1, 2]);
        let pivots: Vec<_> = trace
            .steps
            .iter()
            .filter(|s| s.kind == SortEvent::Pivot && s.division == Some(DivisionId::ROOT))
            .map(|s| s.pivot.unwrap())
            .collect();
        assert_eq!(pivots, vec![2, 1]);
        assert_eq!(trace.summary.sorted, vec![1, 2, 3]);
    }

    #[test]
    fn children_use_heap_numbering() {
        let trace = quick_sort(&[5, 1, 4, 2, 3]);
        let divisions: Vec<_> = trace
            .steps
            .iter()
            .filter(|s| s.kind == SortEvent::Divide)
            .map(|s| s.division.unwrap().0)
            .collect();
        assert_eq!(divisions[0], 0);
        assert!(divisions.iter().all(|d| [0, 1, 2, 3, 4, 5, 6].contains(d)));
    }

    #[test]
    fn single_element_ranges_are_marked_sorted() {
        let trace = quick_sort(&[2, 1]);
        assert_eq!(
            trace.tags(),
            vec!["snapshot", "divide", "pivot", "compare", "pivot", "sortedIndex", "done"]
        );
        assert_eq!(trace.steps[5].sorted, Some(1));
    }
}
