use super::{SearchAction, SearchStep, SearchSummary, SearchTrace};
use crate::sort::Element;
use crate::trace::{Trace, TraceBuilder};

/// Left-to-right scan; stops at the first match.
pub fn linear_search<T: Element>(array: &[T], target: &T) -> SearchTrace<T> {
    let mut trace = TraceBuilder::new();
    trace.record(SearchStep::new(
        SearchAction::Start,
        format!("Starting Linear Search for {}", target),
        array,
        target,
    ));

    for (i, value) in array.iter().enumerate() {
        let mut compare = SearchStep::new(
            SearchAction::Compare,
            format!("Comparing array[{}] = {} with target {}", i, value, target),
            array,
            target,
        )
        .at(i);
        compare.current_value = Some(value.clone());
        trace.record(compare);

        if value == target {
            let mut found = SearchStep::new(
                SearchAction::Found,
                format!("Found {} at index {}", target, i),
                array,
                target,
            )
            .at(i);
            found.current_value = Some(value.clone());
            found.found_index = Some(i);
            let steps = trace.finish(found);
            return Trace::new(steps, SearchSummary::found(i));
        }

        let mut miss = SearchStep::new(
            SearchAction::Continue,
            format!("{} != {}, continuing search", value, target),
            array,
            target,
        )
        .at(i);
        miss.current_value = Some(value.clone());
        trace.record(miss);
    }

    let steps = trace.finish(SearchStep::new(
        SearchAction::NotFound,
        format!("Target {} not found in array", target),
        array,
        target,
    ));
    Trace::new(steps, SearchSummary::missing())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_first_occurrence() {
        let trace = linear_search(&[4, 7, 7, 1], &7);
        assert!(trace.summary.found);
        assert_eq!(trace.summary.index, Some(1));
        assert_eq!(
            trace.tags(),
            vec!["START", "COMPARE", "CONTINUE", "COMPARE", "FOUND"]
        );
        assert_eq!(trace.steps.last().unwrap().found_index, Some(1));
    }

    #[test]
    fn missing_target_compares_everything() {
        let trace = linear_search(&[1, 2, 3], &9);
        assert!(!trace.summary.found);
        assert_eq!(trace.summary.index, None);
        assert_eq!(trace.stats().count("COMPARE"), 3);
        assert_eq!(trace.tags().last(), Some(&"NOT_FOUND"));
    }

    #[test]
    fn empty_array_is_start_then_not_found() {
        let trace = linear_search::<i64>(&[], &1);
        assert_eq!(trace.tags(), vec!["START", "NOT_FOUND"]);
    }

    #[test]
    fn summary_snapshot() {
        let trace = linear_search(&[10, 20, 30], &30);
        insta::assert_json_snapshot!(trace.summary, @r#"
        {
          "found": true,
          "index": 2
        }
        "#);
    }
}
