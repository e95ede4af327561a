//! Graph engines: BFS, DFS and Dijkstra over adjacency maps keyed by node name.
//!
//! Node order is first-appearance order in the input, which makes neighbor
//! iteration (and so every trace) deterministic. BFS and DFS treat the graph
//! as undirected via [`symmetrize`]; Dijkstra uses the weighted edges exactly
//! as given.

mod bfs;
mod dfs;
mod dijkstra;

pub use bfs::bfs;
pub use dfs::dfs;
pub use dijkstra::{dijkstra, DijkstraStep, DijkstraSummary, DistanceUpdate};

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::trace::{StepEvent, Trace};

/// Unweighted adjacency: `{ node: [neighbor, ...] }`.
pub type Adjacency = IndexMap<String, Vec<String>>;

/// Weighted adjacency: `{ node: { neighbor: weight } }`.
pub type WeightedAdjacency = IndexMap<String, IndexMap<String, EdgeWeight>>;

/// An edge weight as supplied by the caller.
///
/// Anything that is not a JSON number lands in `Malformed` so Dijkstra can
/// report and skip the edge instead of rejecting the whole graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EdgeWeight {
    Number(f64),
    Malformed(serde_json::Value),
}

impl EdgeWeight {
    /// The weight if it is a finite, non-negative number.
    pub fn valid(&self) -> Option<f64> {
        match self {
            EdgeWeight::Number(w) if w.is_finite() && *w >= 0.0 => Some(*w),
            _ => None,
        }
    }
}

impl From<f64> for EdgeWeight {
    fn from(w: f64) -> Self {
        EdgeWeight::Number(w)
    }
}

impl std::fmt::Display for EdgeWeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeWeight::Number(w) => write!(f, "{}", w),
            EdgeWeight::Malformed(v) => write!(f, "{}", v),
        }
    }
}

/// Array-index keys (`"0"`, `"17"`, but not `"01"` or `"-1"`) as numbers.
fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse::<u32>().ok().filter(|&i| i != u32::MAX)
}

/// Orders object keys the way a JSON object enumerates its properties:
/// array-index keys ascending, then every other key in insertion order.
pub fn property_order<'a, I>(keys: I) -> Vec<&'a String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut keys: Vec<&String> = keys.into_iter().collect();
    keys.sort_by_key(|key| array_index(key).map_or((1, 0), |i| (0, i)));
    keys
}

/// Adds the reverse of every edge, keeping existing neighbor order and
/// appending reverse edges after it. Nodes that only appear as neighbors gain
/// their own entry. Source nodes are walked in [`property_order`], which
/// decides the order of appended reverse edges.
pub fn symmetrize(graph: &Adjacency) -> Adjacency {
    let mut undirected = graph.clone();
    for node in property_order(graph.keys()) {
        for neighbor in &graph[node] {
            let back = undirected.entry(neighbor.clone()).or_default();
            if !back.contains(node) {
                back.push(node.clone());
            }
        }
    }
    undirected
}

/// Every node named by `graph`, keys and neighbor-only sinks alike, in
/// [`property_order`].
pub fn node_universe(graph: &WeightedAdjacency) -> IndexSet<String> {
    let mut nodes: IndexSet<&String> = graph.keys().collect();
    for node in property_order(graph.keys()) {
        nodes.extend(property_order(graph[node].keys()));
    }
    property_order(nodes).into_iter().cloned().collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TraversalAction {
    Start,
    Visit,
    Dequeue,
    Enqueue,
    Explore,
    Skip,
    Backtrack,
    Completed,
    Error,
}

impl TraversalAction {
    pub fn as_str(self) -> &'static str {
        match self {
            TraversalAction::Start => "START",
            TraversalAction::Visit => "VISIT",
            TraversalAction::Dequeue => "DEQUEUE",
            TraversalAction::Enqueue => "ENQUEUE",
            TraversalAction::Explore => "EXPLORE",
            TraversalAction::Skip => "SKIP",
            TraversalAction::Backtrack => "BACKTRACK",
            TraversalAction::Completed => "COMPLETED",
            TraversalAction::Error => "ERROR",
        }
    }
}

/// A BFS or DFS event. BFS fills `queue`; DFS fills `stack` and `depth`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraversalStep {
    pub action: TraversalAction,
    pub message: String,
    pub current_node: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<usize>,
    pub visited: Vec<String>,
    pub traversal: Vec<String>,
}

impl StepEvent for TraversalStep {
    fn tag(&self) -> &'static str {
        self.action.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraversalSummary {
    /// Nodes in visit order; exactly the start node's connected component.
    pub traversal: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub type TraversalTrace = Trace<TraversalStep, TraversalSummary>;

/// Shared rejection for a start node the graph does not contain.
fn missing_start(start: &str) -> TraversalTrace {
    let message = format!("Start node {} is not in the graph", start);
    let step = TraversalStep {
        action: TraversalAction::Error,
        message: message.clone(),
        current_node: None,
        queue: None,
        stack: None,
        depth: None,
        visited: Vec::new(),
        traversal: Vec::new(),
    };
    Trace::new(
        vec![step],
        TraversalSummary {
            traversal: Vec::new(),
            error: Some(message),
        },
    )
}

#[cfg(test)]
pub(crate) fn adjacency(edges: &[(&str, &[&str])]) -> Adjacency {
    edges
        .iter()
        .map(|(node, neighbors)| {
            (
                node.to_string(),
                neighbors.iter().map(|n| n.to_string()).collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetrize_appends_reverse_edges() {
        let graph = adjacency(&[("A", &["B", "C"]), ("B", &["D"])]);
        let undirected = symmetrize(&graph);
        assert_eq!(undirected["A"], vec!["B", "C"]);
        assert_eq!(undirected["B"], vec!["D", "A"]);
        assert_eq!(undirected["C"], vec!["A"]);
        assert_eq!(undirected["D"], vec!["B"]);
        let order: Vec<_> = undirected.keys().cloned().collect();
        assert_eq!(order, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn symmetrize_does_not_duplicate_declared_back_edges() {
        let graph = adjacency(&[("A", &["B"]), ("B", &["A"])]);
        let undirected = symmetrize(&graph);
        assert_eq!(undirected["A"], vec!["B"]);
        assert_eq!(undirected["B"], vec!["A"]);
    }

    #[test]
    fn universe_includes_sinks() {
        let graph: WeightedAdjacency = serde_json::from_value(serde_json::json!({
            "A": { "B": 1, "C": 2 },
            "B": { "D": 1 }
        }))
        .unwrap();
        let nodes: Vec<_> = node_universe(&graph).into_iter().collect();
        assert_eq!(nodes, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn property_order_puts_index_keys_first() {
        let keys: Vec<String> = ["b", "10", "a", "2", "01", "-1", "0"]
            .iter()
            .map(|k| k.to_string())
            .collect();
        let ordered: Vec<&str> = property_order(&keys).into_iter().map(String::as_str).collect();
        assert_eq!(ordered, vec!["0", "2", "10", "b", "a", "01", "-1"]);
    }

    #[test]
    fn numeric_ids_follow_property_order() {
        let graph: WeightedAdjacency = serde_json::from_value(serde_json::json!({
            "s": { "2": 1, "1": 1 },
            "2": { "t": 1 }
        }))
        .unwrap();
        let nodes: Vec<_> = node_universe(&graph).into_iter().collect();
        assert_eq!(nodes, vec!["1", "2", "s", "t"]);

        let undirected = symmetrize(&adjacency(&[("2", &["x"]), ("1", &["x"])]));
        assert_eq!(undirected["x"], vec!["1", "2"]);
    }

    #[test]
    fn malformed_weights_deserialize() {
        let graph: WeightedAdjacency = serde_json::from_value(serde_json::json!({
            "A": { "B": "heavy", "C": -3, "D": 2.5 }
        }))
        .unwrap();
        let edges = &graph["A"];
        assert_eq!(edges["B"].valid(), None);
        assert_eq!(edges["C"].valid(), None);
        assert_eq!(edges["D"].valid(), Some(2.5));
    }
}
