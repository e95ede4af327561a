use std::collections::VecDeque;

use indexmap::IndexSet;

use super::{missing_start, symmetrize, Adjacency, TraversalAction, TraversalStep, TraversalSummary, TraversalTrace};
use crate::trace::{Trace, TraceBuilder};

struct Frontier {
    queue: VecDeque<String>,
    visited: IndexSet<String>,
    traversal: Vec<String>,
}

impl Frontier {
    fn step(&self, action: TraversalAction, message: String, current: Option<&str>) -> TraversalStep {
        TraversalStep {
            action,
            message,
            current_node: current.map(str::to_string),
            queue: Some(self.queue.iter().cloned().collect()),
            stack: None,
            depth: None,
            visited: self.visited.iter().cloned().collect(),
            traversal: self.traversal.clone(),
        }
    }
}

/// Breadth-first traversal of the undirected view of `graph` from `start`.
///
/// Discovery is recorded as `ENQUEUE` followed by a separate `VISIT`, so the
/// replay can show "queued" and "visited" as distinct states.
pub fn bfs(graph: &Adjacency, start: &str) -> TraversalTrace {
    let undirected = symmetrize(graph);
    if !undirected.contains_key(start) {
        return missing_start(start);
    }

    let mut trace = TraceBuilder::new();
    let mut state = Frontier {
        queue: VecDeque::new(),
        visited: IndexSet::new(),
        traversal: Vec::new(),
    };

    trace.record(state.step(
        TraversalAction::Start,
        format!("Starting BFS from node {}", start),
        None,
    ));

    state.queue.push_back(start.to_string());
    state.visited.insert(start.to_string());
    state.traversal.push(start.to_string());
    trace.record(state.step(
        TraversalAction::Visit,
        format!("Visiting node {}", start),
        Some(start),
    ));

    while let Some(current) = state.queue.pop_front() {
        trace.record(state.step(
            TraversalAction::Dequeue,
            format!("Dequeuing node {}", current),
            Some(current.as_str()),
        ));

        let neighbors = undirected.get(&current).map(Vec::as_slice).unwrap_or_default();
        for neighbor in neighbors {
            if state.visited.contains(neighbor) {
                trace.record(state.step(
                    TraversalAction::Skip,
                    format!("Skipping already visited neighbor: {}", neighbor),
                    Some(current.as_str()),
                ));
                continue;
            }

            state.visited.insert(neighbor.clone());
            state.queue.push_back(neighbor.clone());
            trace.record(state.step(
                TraversalAction::Enqueue,
                format!("Found unvisited neighbor: {}", neighbor),
                Some(current.as_str()),
            ));
            state.traversal.push(neighbor.clone());
            trace.record(state.step(
                TraversalAction::Visit,
                format!("Visiting node {}", neighbor),
                Some(neighbor.as_str()),
            ));
        }
    }

    let message = format!("BFS completed. Traversal: [{}]", state.traversal.join(", "));
    let steps = trace.finish(state.step(TraversalAction::Completed, message, None));
    Trace::new(
        steps,
        TraversalSummary {
            traversal: state.traversal,
            error: None,
        },
    )
}

#[cfg(test)]
mod tests {
    use petgraph::graphmap::UnGraphMap;
    use petgraph::visit::Bfs;

    use super::*;
    use crate::graph::adjacency;

    #[test]
    fn visits_level_by_level() {
        let graph = adjacency(&[("A", &["B", "C"]), ("B", &["D"]), ("C", &["E"])]);
        let trace = bfs(&graph, "A");
        assert_eq!(trace.summary.traversal, vec!["A", "B", "C", "D", "E"]);
        assert_eq!(trace.tags().first(), Some(&"START"));
        assert_eq!(trace.tags().last(), Some(&"COMPLETED"));
    }

    #[test]
    fn enqueue_is_followed_by_visit() {
        let graph = adjacency(&[("A", &["B"])]);
        let trace = bfs(&graph, "A");
        assert_eq!(
            trace.tags(),
            vec!["START", "VISIT", "DEQUEUE", "ENQUEUE", "VISIT", "DEQUEUE", "SKIP", "COMPLETED"]
        );
        let enqueue = &trace.steps[3];
        assert_eq!(enqueue.queue.as_deref(), Some(&["B".to_string()][..]));
        assert_eq!(enqueue.current_node.as_deref(), Some("A"));
    }

    #[test]
    fn edges_are_followed_backwards() {
        // Only declared D -> A, but BFS from A still reaches D.
        let graph = adjacency(&[("A", &[]), ("D", &["A"])]);
        let trace = bfs(&graph, "A");
        assert_eq!(trace.summary.traversal, vec!["A", "D"]);
    }

    #[test]
    fn other_components_are_never_visited() {
        let graph = adjacency(&[("A", &["B"]), ("X", &["Y"])]);
        let trace = bfs(&graph, "A");
        assert_eq!(trace.summary.traversal, vec!["A", "B"]);
    }

    #[test]
    fn unknown_start_is_an_error_step() {
        let graph = adjacency(&[("A", &["B"])]);
        let trace = bfs(&graph, "Z");
        assert_eq!(trace.tags(), vec!["ERROR"]);
        assert!(trace.summary.traversal.is_empty());
        assert!(trace.summary.error.is_some());
    }

    #[test]
    fn reaches_the_same_nodes_as_petgraph() {
        let graph = adjacency(&[
            ("1", &["2", "3"]),
            ("2", &["4"]),
            ("5", &["6"]),
            ("6", &["3"]),
            ("7", &["8"]),
        ]);
        let mut reference = UnGraphMap::<&str, ()>::new();
        for (node, neighbors) in &graph {
            reference.add_node(node.as_str());
            for n in neighbors {
                reference.add_edge(node.as_str(), n.as_str(), ());
            }
        }
        let mut walk = Bfs::new(&reference, "1");
        let mut expected = Vec::new();
        while let Some(node) = walk.next(&reference) {
            expected.push(node.to_string());
        }
        expected.sort();

        let mut got = bfs(&graph, "1").summary.traversal;
        got.sort();
        assert_eq!(got, expected);
    }
}
