use super::{Element, SortEvent, SortStep, SortSummary, SortTrace};
use crate::trace::{Trace, TraceBuilder};

/// Bubble sort: adjacent compare-and-swap passes, largest value settling
/// at the end of each pass.
pub fn bubble_sort<T: Element>(input: &[T]) -> SortTrace<T> {
    let mut a = input.to_vec();
    let n = a.len();
    let mut trace = TraceBuilder::new();
    trace.record(SortStep::snapshot(&a));

    for i in 0..n {
        for j in 0..n - i - 1 {
            trace.record(
                SortStep::new(
                    SortEvent::Compare,
                    &a,
                    format!("Comparing a[{}]={} with a[{}]={}", j, a[j], j + 1, a[j + 1]),
                )
                .compare(vec![j, j + 1]),
            );
            if a[j] > a[j + 1] {
                a.swap(j, j + 1);
                trace.record(
                    SortStep::new(
                        SortEvent::Swap,
                        &a,
                        format!("Swapped positions {} and {}", j, j + 1),
                    )
                    .swapped(j, j + 1),
                );
            }
        }
        let settled = n - i - 1;
        trace.record(
            SortStep::new(
                SortEvent::SortedIndex,
                &a,
                format!("Index {} holds its final value {}", settled, a[settled]),
            )
            .sorted(settled),
        );
    }

    let steps = trace.finish(SortStep::done(&a));
    Trace::new(steps, SortSummary { sorted: a })
}
