use super::{Element, SortEvent, SortStep, SortSummary, SortTrace};
use crate::id::DivisionId;
use crate::trace::{Trace, TraceBuilder};

/// Top-down merge sort. Every element written back during a merge is its own
/// step so the replay shows the subarray filling in.
pub fn merge_sort<T: Element>(input: &[T]) -> SortTrace<T> {
    let mut a = input.to_vec();
    let mut trace = TraceBuilder::new();
    trace.record(SortStep::snapshot(&a));

    if !a.is_empty() {
        let last = a.len() - 1;
        divide(&mut a, 0, last, DivisionId::ROOT, &mut trace);
    }

    let steps = trace.finish(SortStep::done(&a));
    Trace::new(steps, SortSummary { sorted: a })
}

fn divide<T: Element>(
    a: &mut [T],
    left: usize,
    right: usize,
    div: DivisionId,
    trace: &mut TraceBuilder<SortStep<T>>,
) {
    trace.record(
        SortStep::new(
            SortEvent::Divide,
            a,
            format!("Dividing range {}..={} (division {})", left, right, div),
        )
        .division(div)
        .compare(Vec::new())
        .range(left, right),
    );
    if left >= right {
        return;
    }

    let mid = (left + right) / 2;
    divide(a, left, mid, div.left(), trace);
    divide(a, mid + 1, right, div.right(), trace);
    merge(a, left, mid, right, div, trace);
}

fn merge<T: Element>(
    a: &mut [T],
    left: usize,
    mid: usize,
    right: usize,
    div: DivisionId,
    trace: &mut TraceBuilder<SortStep<T>>,
) {
    let lower = a[left..=mid].to_vec();
    let upper = a[mid + 1..=right].to_vec();

    let merging = |a: &[T], message: String| {
        SortStep::new(SortEvent::Merge, a, message)
            .division(div)
            .compare(Vec::new())
            .range(left, right)
    };

    trace.record(merging(
        a,
        format!("Merging {}..={} with {}..={}", left, mid, mid + 1, right),
    ));

    let (mut i, mut j, mut k) = (0, 0, left);
    while i < lower.len() && j < upper.len() {
        trace.record(
            SortStep::new(
                SortEvent::Compare,
                a,
                format!("Comparing {} with {}", lower[i], upper[j]),
            )
            .division(div)
            .compare(vec![left + i, mid + 1 + j]),
        );
        // `<=` keeps equal elements in their original order.
        if lower[i] <= upper[j] {
            a[k] = lower[i].clone();
            i += 1;
        } else {
            a[k] = upper[j].clone();
            j += 1;
        }
        trace.record(merging(a, format!("Wrote {} to index {}", a[k], k)));
        k += 1;
    }

    while i < lower.len() {
        a[k] = lower[i].clone();
        trace.record(merging(a, format!("Copied remaining {} to index {}", a[k], k)));
        i += 1;
        k += 1;
    }

    while j < upper.len() {
        a[k] = upper[j].clone();
        trace.record(merging(a, format!("Copied remaining {} to index {}", a[k], k)));
        j += 1;
        k += 1;
    }
}
