use super::{Element, SortEvent, SortStep, SortSummary, SortTrace};
use crate::trace::{Trace, TraceBuilder};

/// Insertion sort: lift `a[i]` out, shift larger predecessors one slot right,
/// drop the key into the gap.
pub fn insertion_sort<T: Element>(input: &[T]) -> SortTrace<T> {
    let mut a = input.to_vec();
    let n = a.len();
    let mut trace = TraceBuilder::new();
    trace.record(SortStep::snapshot(&a));

    for i in 1..n {
        let key = a[i].clone();
        trace.record(
            SortStep::new(SortEvent::Insert, &a, format!("Picking up key {} at index {}", key, i))
                .inserted(i)
                .compare(vec![i]),
        );

        // `slot` is the gap the key currently occupies.
        let mut slot = i;
        while slot > 0 && a[slot - 1] > key {
            trace.record(
                SortStep::new(
                    SortEvent::Compare,
                    &a,
                    format!("{} at index {} is greater than key {}", a[slot - 1], slot - 1, key),
                )
                .inserted(i)
                .compare(vec![slot - 1, slot]),
            );
            a[slot] = a[slot - 1].clone();
            trace.record(
                SortStep::new(
                    SortEvent::Shift,
                    &a,
                    format!("Shifted {} from index {} to {}", a[slot], slot - 1, slot),
                )
                .inserted(i)
                .shifted(slot - 1, slot),
            );
            slot -= 1;
        }

        a[slot] = key;
        trace.record(
            SortStep::new(SortEvent::Insert, &a, format!("Inserted key {} at index {}", a[slot], slot))
                .inserted(slot)
                .compare(Vec::new()),
        );
        trace.record(
            SortStep::new(SortEvent::SortedIndex, &a, format!("Prefix 0..={} is sorted", i)).sorted(i),
        );
    }

    let steps = trace.finish(SortStep::done(&a));
    Trace::new(steps, SortSummary { sorted: a })
}
