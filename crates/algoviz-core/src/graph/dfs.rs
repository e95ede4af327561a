use indexmap::IndexSet;

use super::{missing_start, symmetrize, Adjacency, TraversalAction, TraversalStep, TraversalSummary, TraversalTrace};
use crate::trace::{Trace, TraceBuilder};

struct Walk<'g> {
    graph: &'g Adjacency,
    visited: IndexSet<String>,
    traversal: Vec<String>,
    /// Nodes on the current recursion path, root first.
    path: Vec<String>,
    trace: TraceBuilder<TraversalStep>,
}

impl Walk<'_> {
    fn record(&mut self, action: TraversalAction, message: String, current: &str, depth: usize) {
        let step = TraversalStep {
            action,
            message,
            current_node: Some(current.to_string()),
            queue: None,
            stack: Some(self.path.clone()),
            depth: Some(depth),
            visited: self.visited.iter().cloned().collect(),
            traversal: self.traversal.clone(),
        };
        self.trace.record(step);
    }

    fn visit(&mut self, node: &str, depth: usize) {
        if self.visited.contains(node) {
            self.record(
                TraversalAction::Backtrack,
                format!("Node {} already visited, backtracking", node),
                node,
                depth,
            );
            return;
        }
        self.visited.insert(node.to_string());
        self.traversal.push(node.to_string());
        self.path.push(node.to_string());
        self.record(
            TraversalAction::Visit,
            format!("Visiting node {} (depth: {})", node, depth),
            node,
            depth,
        );

        let graph = self.graph;
        for neighbor in graph.get(node).map(Vec::as_slice).unwrap_or_default() {
            if self.visited.contains(neighbor) {
                self.record(
                    TraversalAction::Skip,
                    format!("Skipping already visited neighbor: {}", neighbor),
                    node,
                    depth,
                );
                continue;
            }
            self.record(
                TraversalAction::Explore,
                format!("Exploring edge {} -> {}", node, neighbor),
                node,
                depth,
            );
            self.visit(neighbor, depth + 1);
        }

        self.path.pop();
    }
}

/// Recursive depth-first traversal of the undirected view of `graph`.
///
/// `depth` on each step is for display only.
pub fn dfs(graph: &Adjacency, start: &str) -> TraversalTrace {
    let undirected = symmetrize(graph);
    if !undirected.contains_key(start) {
        return missing_start(start);
    }

    let mut walk = Walk {
        graph: &undirected,
        visited: IndexSet::new(),
        traversal: Vec::new(),
        path: Vec::new(),
        trace: TraceBuilder::new(),
    };
    walk.trace.record(TraversalStep {
        action: TraversalAction::Start,
        message: format!("Starting DFS from node {}", start),
        current_node: None,
        queue: None,
        stack: Some(Vec::new()),
        depth: None,
        visited: Vec::new(),
        traversal: Vec::new(),
    });

    walk.visit(start, 0);

    let Walk { traversal, visited, trace, .. } = walk;
    let completed = TraversalStep {
        action: TraversalAction::Completed,
        message: format!("DFS completed. Traversal: [{}]", traversal.join(", ")),
        current_node: None,
        queue: None,
        stack: Some(Vec::new()),
        depth: None,
        visited: visited.into_iter().collect(),
        traversal: traversal.clone(),
    };
    Trace::new(
        trace.finish(completed),
        TraversalSummary {
            traversal,
            error: None,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::adjacency;

    #[test]
    fn goes_deep_before_wide() {
        let graph = adjacency(&[("A", &["B", "C"]), ("B", &["D"]), ("C", &["E"])]);
        let trace = dfs(&graph, "A");
        assert_eq!(trace.summary.traversal, vec!["A", "B", "D", "C", "E"]);
    }

    #[test]
    fn explore_precedes_every_descent() {
        let graph = adjacency(&[("A", &["B"])]);
        let trace = dfs(&graph, "A");
        assert_eq!(
            trace.tags(),
            vec!["START", "VISIT", "EXPLORE", "VISIT", "SKIP", "COMPLETED"]
        );
        let inner = &trace.steps[3];
        assert_eq!(inner.depth, Some(1));
        assert_eq!(
            inner.stack.as_deref(),
            Some(&["A".to_string(), "B".to_string()][..])
        );
    }

    #[test]
    fn returning_from_a_child_records_nothing() {
        let graph = adjacency(&[("A", &["B", "C"])]);
        let trace = dfs(&graph, "A");
        assert_eq!(
            trace.tags(),
            vec!["START", "VISIT", "EXPLORE", "VISIT", "SKIP", "EXPLORE", "VISIT", "SKIP", "COMPLETED"]
        );
        assert_eq!(trace.stats().count("BACKTRACK"), 0);
    }

    #[test]
    fn cycles_are_skipped() {
        let graph = adjacency(&[("A", &["B"]), ("B", &["C"]), ("C", &["A"])]);
        let trace = dfs(&graph, "A");
        assert_eq!(trace.summary.traversal, vec!["A", "B", "C"]);
        assert!(trace.stats().count("SKIP") >= 1);
    }

    #[test]
    fn agrees_with_bfs_on_reachable_set() {
        let graph = adjacency(&[("A", &["B"]), ("C", &["B"]), ("X", &["Y"])]);
        let mut deep = dfs(&graph, "C").summary.traversal;
        let mut wide = crate::graph::bfs(&graph, "C").summary.traversal;
        deep.sort();
        wide.sort();
        assert_eq!(deep, wide);
        assert_eq!(deep, vec!["A", "B", "C"]);
    }

    #[test]
    fn unknown_start_is_an_error_step() {
        let trace = dfs(&adjacency(&[]), "A");
        assert_eq!(trace.tags(), vec!["ERROR"]);
    }
}
