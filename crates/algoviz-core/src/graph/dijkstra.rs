use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use super::{node_universe, property_order, WeightedAdjacency};
use crate::trace::{StepEvent, Trace, TraceBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DijkstraAction {
    Start,
    Visit,
    Update,
    NoUpdate,
    Skip,
    Error,
    Completed,
}

impl DijkstraAction {
    pub fn as_str(self) -> &'static str {
        match self {
            DijkstraAction::Start => "START",
            DijkstraAction::Visit => "VISIT",
            DijkstraAction::Update => "UPDATE",
            DijkstraAction::NoUpdate => "NO_UPDATE",
            DijkstraAction::Skip => "SKIP",
            DijkstraAction::Error => "ERROR",
            DijkstraAction::Completed => "COMPLETED",
        }
    }
}

/// A successful relaxation. `old_dist` is `None` when the node was unreached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceUpdate {
    pub node: String,
    pub old_dist: Option<f64>,
    pub new_dist: f64,
}

/// A Dijkstra event with distance, visited and back-pointer snapshots.
/// Unreached distances serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DijkstraStep {
    pub action: DijkstraAction,
    pub message: String,
    /// Node whose edges are being relaxed.
    pub current_node: Option<String>,
    /// Node settled by a `VISIT` step.
    pub visited_node: Option<String>,
    pub distance_updated: Option<DistanceUpdate>,
    pub distances: IndexMap<String, Option<f64>>,
    pub visited: Vec<String>,
    pub previous: IndexMap<String, Option<String>>,
}

impl StepEvent for DijkstraStep {
    fn tag(&self) -> &'static str {
        self.action.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DijkstraSummary {
    pub distances: IndexMap<String, Option<f64>>,
    /// Start-to-end node sequence; empty without a reachable `end`.
    pub path: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub type DijkstraTrace = Trace<DijkstraStep, DijkstraSummary>;

struct Search {
    distances: IndexMap<String, f64>,
    previous: IndexMap<String, Option<String>>,
    visited: IndexSet<String>,
    trace: TraceBuilder<DijkstraStep>,
}

impl Search {
    fn finite_distances(&self) -> IndexMap<String, Option<f64>> {
        self.distances
            .iter()
            .map(|(node, d)| (node.clone(), d.is_finite().then_some(*d)))
            .collect()
    }

    fn step(&self, action: DijkstraAction, message: String) -> DijkstraStep {
        DijkstraStep {
            action,
            message,
            current_node: None,
            visited_node: None,
            distance_updated: None,
            distances: self.finite_distances(),
            visited: self.visited.iter().cloned().collect(),
            previous: self.previous.clone(),
        }
    }

    fn record(&mut self, action: DijkstraAction, message: String, current: &str) {
        let mut step = self.step(action, message);
        step.current_node = Some(current.to_string());
        self.trace.record(step);
    }

    /// First unvisited node with the strictly smallest distance, in node order.
    fn closest_unvisited(&self) -> Option<(String, f64)> {
        let mut best: Option<(&String, f64)> = None;
        for (node, &dist) in &self.distances {
            if self.visited.contains(node) {
                continue;
            }
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((node, dist));
            }
        }
        best.map(|(node, dist)| (node.clone(), dist))
    }
}

/// Single-source shortest paths over the directed, weighted `graph`.
///
/// Selection is an O(V²) scan for the closest unvisited node so each scan
/// decision lands in the trace. Edges with a missing, negative or non-finite
/// weight are reported as `ERROR` steps and skipped. A path is reconstructed
/// only when `end` is given and reachable.
pub fn dijkstra(graph: &WeightedAdjacency, start: &str, end: Option<&str>) -> DijkstraTrace {
    let nodes = node_universe(graph);
    if !nodes.contains(start) {
        let message = format!("Start node {} is not in the graph", start);
        let step = DijkstraStep {
            action: DijkstraAction::Error,
            message: message.clone(),
            current_node: None,
            visited_node: None,
            distance_updated: None,
            distances: IndexMap::new(),
            visited: Vec::new(),
            previous: IndexMap::new(),
        };
        return Trace::new(
            vec![step],
            DijkstraSummary {
                distances: IndexMap::new(),
                path: Vec::new(),
                error: Some(message),
            },
        );
    }

    let mut search = Search {
        distances: nodes
            .iter()
            .map(|node| {
                let d = if node == start { 0.0 } else { f64::INFINITY };
                (node.clone(), d)
            })
            .collect(),
        previous: nodes.iter().map(|node| (node.clone(), None)).collect(),
        visited: IndexSet::new(),
        trace: TraceBuilder::new(),
    };

    let begin = search.step(
        DijkstraAction::Start,
        format!("Starting Dijkstra's algorithm from node {}", start),
    );
    search.trace.record(begin);

    while let Some((current, dist)) = search.closest_unvisited() {
        if dist.is_infinite() {
            break;
        }

        search.visited.insert(current.clone());
        let mut visit = search.step(
            DijkstraAction::Visit,
            format!("Visiting node {} (distance: {})", current, dist),
        );
        visit.visited_node = Some(current.clone());
        search.trace.record(visit);

        let Some(edges) = graph.get(&current) else {
            continue;
        };
        for neighbor in property_order(edges.keys()) {
            let weight = &edges[neighbor];
            if search.visited.contains(neighbor) {
                search.record(
                    DijkstraAction::Skip,
                    format!("Skipping already visited neighbor: {}", neighbor),
                    &current,
                );
                continue;
            }

            let Some(weight) = weight.valid() else {
                search.record(
                    DijkstraAction::Error,
                    format!("Invalid edge weight for {} -> {}: {}", current, neighbor, weight),
                    &current,
                );
                continue;
            };

            let candidate = dist + weight;
            let old = search.distances[neighbor.as_str()];
            if candidate < old {
                search.distances[neighbor.as_str()] = candidate;
                search.previous[neighbor.as_str()] = Some(current.clone());
                let mut update = search.step(
                    DijkstraAction::Update,
                    format!(
                        "Updating distance to {}: {} (via {})",
                        neighbor, candidate, current
                    ),
                );
                update.current_node = Some(current.clone());
                update.distance_updated = Some(DistanceUpdate {
                    node: neighbor.clone(),
                    old_dist: old.is_finite().then_some(old),
                    new_dist: candidate,
                });
                search.trace.record(update);
            } else {
                search.record(
                    DijkstraAction::NoUpdate,
                    format!("No improvement for {}: {} >= {}", neighbor, candidate, old),
                    &current,
                );
            }
        }
    }

    let mut path = Vec::new();
    let mut error = None;
    match end {
        Some(end) if !search.distances.contains_key(end) => {
            let message = format!("End node {} is not in the graph", end);
            let step = search.step(DijkstraAction::Error, message.clone());
            search.trace.record(step);
            error = Some(message);
        }
        Some(end) if search.distances[end].is_finite() => {
            let mut cursor = Some(end.to_string());
            while let Some(node) = cursor {
                cursor = search.previous[node.as_str()].clone();
                path.push(node);
            }
            path.reverse();
        }
        _ => {}
    }

    let message = match end {
        Some(end) => match search.distances.get(end) {
            Some(d) if d.is_finite() => {
                format!("Algorithm completed. Shortest distance to {}: {}", end, d)
            }
            _ => format!("Algorithm completed. Shortest distance to {}: unreachable", end),
        },
        None => "Algorithm completed. Shortest distances: see distances".to_string(),
    };
    let completed = search.step(DijkstraAction::Completed, message);
    let distances = search.finite_distances();
    Trace::new(
        search.trace.finish(completed),
        DijkstraSummary {
            distances,
            path,
            error,
        },
    )
}
