//! Dispatch layer: JSON request body in, serialized trace out.
//!
//! Each engine's input is decoded into a typed request struct that accepts
//! both the documented field names and the older request names (`inputs`,
//! `adjacencyList`, `startNode`, `endNode`, `nSize`, `gridMatrix`). Shape
//! and size are checked here so the engines can assume well-formed input.

use indexmap::{IndexMap, IndexSet};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::dp::{self, CoinChangeSummary, GridPathsSummary, KnapsackSummary, LcsSummary};
use crate::error::DispatchError;
use crate::graph::{self, Adjacency, DijkstraSummary, TraversalSummary, WeightedAdjacency};
use crate::id::AlgorithmId;
use crate::limits::InputLimits;
use crate::recursion::{self, QueensSummary, RecursionSummary};
use crate::search::{self, SearchSummary};
use crate::sort::{self, SortSummary};
use crate::trace::{Trace, TraceStats};
use crate::tree::{self, TreeNode, TreeSummary};

/// A finished run as sent to clients: `{ algorithm, steps, ..summary, stats, code }`.
#[derive(Debug, Clone, Serialize)]
pub struct TraceResponse {
    pub algorithm: AlgorithmId,
    #[serde(flatten)]
    pub trace: EngineTrace,
    pub stats: TraceStats,
    /// Source of the engine that produced the trace.
    pub code: &'static str,
}

/// The trace of whichever engine ran.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EngineTrace {
    SortInt(Trace<sort::SortStep<i64>, SortSummary<i64>>),
    SortFloat(Trace<sort::SortStep<f64>, SortSummary<f64>>),
    SearchInt(Trace<search::SearchStep<i64>, SearchSummary>),
    SearchFloat(Trace<search::SearchStep<f64>, SearchSummary>),
    Traversal(Trace<graph::TraversalStep, TraversalSummary>),
    Dijkstra(Trace<graph::DijkstraStep, DijkstraSummary>),
    Knapsack(Trace<dp::KnapsackStep, KnapsackSummary>),
    Lcs(Trace<dp::LcsStep, LcsSummary>),
    CoinChange(Trace<dp::CoinChangeStep, CoinChangeSummary>),
    GridPaths(Trace<dp::GridPathsStep, GridPathsSummary>),
    Recursion(Trace<recursion::RecursionStep, RecursionSummary>),
    Queens(Trace<recursion::QueensStep, QueensSummary>),
    Tree(Trace<tree::TreeStep, TreeSummary>),
}

macro_rules! each_trace {
    ($value:expr, $trace:ident => $body:expr) => {
        match $value {
            EngineTrace::SortInt($trace) => $body,
            EngineTrace::SortFloat($trace) => $body,
            EngineTrace::SearchInt($trace) => $body,
            EngineTrace::SearchFloat($trace) => $body,
            EngineTrace::Traversal($trace) => $body,
            EngineTrace::Dijkstra($trace) => $body,
            EngineTrace::Knapsack($trace) => $body,
            EngineTrace::Lcs($trace) => $body,
            EngineTrace::CoinChange($trace) => $body,
            EngineTrace::GridPaths($trace) => $body,
            EngineTrace::Recursion($trace) => $body,
            EngineTrace::Queens($trace) => $body,
            EngineTrace::Tree($trace) => $body,
        }
    };
}

impl EngineTrace {
    pub fn stats(&self) -> TraceStats {
        each_trace!(self, t => t.stats())
    }

    pub fn len(&self) -> usize {
        each_trace!(self, t => t.steps.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn tags(&self) -> Vec<&'static str> {
        each_trace!(self, t => t.tags())
    }

    /// The summary fields alone, without `steps`.
    pub fn summary(&self) -> SummaryView<'_> {
        SummaryView(self)
    }
}

/// Serializes as the summary object of the wrapped trace.
#[derive(Debug, Clone, Copy)]
pub struct SummaryView<'a>(&'a EngineTrace);

impl Serialize for SummaryView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        each_trace!(self.0, t => t.summary.serialize(serializer))
    }
}

/// A list of numbers that stays integral unless some element is fractional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum NumberList {
    Ints(Vec<i64>),
    Floats(Vec<f64>),
}

impl NumberList {
    fn len(&self) -> usize {
        match self {
            NumberList::Ints(v) => v.len(),
            NumberList::Floats(v) => v.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SortRequest {
    #[serde(alias = "inputs", alias = "array")]
    numbers: NumberList,
}

#[derive(Debug, Deserialize)]
struct SearchRequest {
    #[serde(alias = "array", alias = "inputs")]
    numbers: NumberList,
    target: Number,
}

#[derive(Debug, Deserialize)]
struct GraphRequest {
    #[serde(alias = "adjacencyList", alias = "graph")]
    adjacency: IndexMap<String, Vec<Value>>,
    #[serde(alias = "startNode")]
    start: Value,
}

#[derive(Debug, Deserialize)]
struct DijkstraRequest {
    #[serde(alias = "adjacencyList", alias = "graph")]
    adjacency: WeightedAdjacency,
    #[serde(alias = "startNode")]
    start: Value,
    #[serde(alias = "endNode", default)]
    end: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct KnapsackRequest {
    weights: Vec<usize>,
    values: Vec<u64>,
    capacity: usize,
}

#[derive(Debug, Deserialize)]
struct LcsRequest {
    str1: String,
    str2: String,
}

#[derive(Debug, Deserialize)]
struct CoinChangeRequest {
    coins: Vec<usize>,
    amount: usize,
}

#[derive(Debug, Deserialize)]
struct GridRequest {
    #[serde(alias = "gridMatrix")]
    grid: Vec<Vec<i64>>,
}

#[derive(Debug, Deserialize)]
struct CountRequest {
    #[serde(alias = "nSize")]
    n: i64,
}

#[derive(Debug, Deserialize)]
struct TreeRequest {
    #[serde(alias = "root", default)]
    tree: Option<TreeNode>,
}

fn decode<T: DeserializeOwned>(algorithm: AlgorithmId, input: Value) -> Result<T, DispatchError> {
    serde_json::from_value(input).map_err(|e| DispatchError::invalid(algorithm, e.to_string()))
}

/// Graph node names may be sent as strings or numbers.
fn node_name(algorithm: AlgorithmId, value: &Value) -> Result<String, DispatchError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(DispatchError::invalid(
            algorithm,
            format!("node names must be strings or numbers, got {}", other),
        )),
    }
}

fn adjacency(algorithm: AlgorithmId, raw: IndexMap<String, Vec<Value>>) -> Result<Adjacency, DispatchError> {
    raw.into_iter()
        .map(|(node, neighbors)| {
            let neighbors = neighbors
                .iter()
                .map(|n| node_name(algorithm, n))
                .collect::<Result<Vec<_>, _>>()?;
            Ok((node, neighbors))
        })
        .collect()
}

fn cells(rows: usize, cols: usize) -> usize {
    rows.saturating_mul(cols)
}

/// Engine source shipped with every response.
pub fn source(id: AlgorithmId) -> &'static str {
    match id {
        AlgorithmId::Bubble => include_str!("sort/bubble.rs"),
        AlgorithmId::Selection => include_str!("sort/selection.rs"),
        AlgorithmId::Insertion => include_str!("sort/insertion.rs"),
        AlgorithmId::Merge => include_str!("sort/merge.rs"),
        AlgorithmId::Quick => include_str!("sort/quick.rs"),
        AlgorithmId::LinearSearch => include_str!("search/linear.rs"),
        AlgorithmId::BinarySearch => include_str!("search/binary.rs"),
        AlgorithmId::Bfs => include_str!("graph/bfs.rs"),
        AlgorithmId::Dfs => include_str!("graph/dfs.rs"),
        AlgorithmId::Dijkstra => include_str!("graph/dijkstra.rs"),
        AlgorithmId::Knapsack01 => include_str!("dp/knapsack.rs"),
        AlgorithmId::Lcs => include_str!("dp/lcs.rs"),
        AlgorithmId::CoinChange => include_str!("dp/coin_change.rs"),
        AlgorithmId::GridPaths => include_str!("dp/grid_paths.rs"),
        AlgorithmId::NQueens => include_str!("recursion/n_queens.rs"),
        AlgorithmId::Factorial => include_str!("recursion/factorial.rs"),
        AlgorithmId::Fibonacci => include_str!("recursion/fibonacci.rs"),
        AlgorithmId::Inorder | AlgorithmId::Preorder | AlgorithmId::Postorder => {
            include_str!("tree/traversal.rs")
        }
    }
}

fn run_sort(id: AlgorithmId, numbers: &NumberList) -> EngineTrace {
    macro_rules! engine {
        ($f:path) => {
            match numbers {
                NumberList::Ints(v) => EngineTrace::SortInt($f(v)),
                NumberList::Floats(v) => EngineTrace::SortFloat($f(v)),
            }
        };
    }
    match id {
        AlgorithmId::Selection => engine!(sort::selection_sort),
        AlgorithmId::Insertion => engine!(sort::insertion_sort),
        AlgorithmId::Merge => engine!(sort::merge_sort),
        AlgorithmId::Quick => engine!(sort::quick_sort),
        _ => engine!(sort::bubble_sort),
    }
}

fn run_search(id: AlgorithmId, request: SearchRequest) -> EngineTrace {
    let binary = id == AlgorithmId::BinarySearch;
    match (request.numbers, request.target) {
        (NumberList::Ints(v), Number::Int(t)) if binary => {
            EngineTrace::SearchInt(search::binary_search(&v, &t))
        }
        (NumberList::Ints(v), Number::Int(t)) => {
            EngineTrace::SearchInt(search::linear_search(&v, &t))
        }
        (numbers, target) => {
            let v: Vec<f64> = match numbers {
                NumberList::Ints(v) => v.into_iter().map(|x| x as f64).collect(),
                NumberList::Floats(v) => v,
            };
            let t = target.as_f64();
            if binary {
                EngineTrace::SearchFloat(search::binary_search(&v, &t))
            } else {
                EngineTrace::SearchFloat(search::linear_search(&v, &t))
            }
        }
    }
}

fn non_negative(id: AlgorithmId, n: i64, what: &str) -> Result<usize, DispatchError> {
    usize::try_from(n).map_err(|_| DispatchError::invalid(id, format!("{} must be non-negative, got {}", what, n)))
}

/// Decodes `input` for `id`, enforces `limits` and runs the engine.
pub fn dispatch(id: AlgorithmId, input: Value, limits: &InputLimits) -> Result<TraceResponse, DispatchError> {
    let trace = match id {
        AlgorithmId::Bubble
        | AlgorithmId::Selection
        | AlgorithmId::Insertion
        | AlgorithmId::Merge
        | AlgorithmId::Quick => {
            let request: SortRequest = decode(id, input)?;
            InputLimits::check(id, "array length", limits.max_array_len, request.numbers.len())?;
            run_sort(id, &request.numbers)
        }

        AlgorithmId::LinearSearch | AlgorithmId::BinarySearch => {
            let request: SearchRequest = decode(id, input)?;
            InputLimits::check(id, "array length", limits.max_array_len, request.numbers.len())?;
            run_search(id, request)
        }

        AlgorithmId::Bfs | AlgorithmId::Dfs => {
            let request: GraphRequest = decode(id, input)?;
            let start = node_name(id, &request.start)?;
            let graph = adjacency(id, request.adjacency)?;
            let edges = graph.values().map(Vec::len).sum();
            InputLimits::check(id, "graph edges", limits.max_graph_edges, edges)?;
            let nodes = graph::symmetrize(&graph).len();
            InputLimits::check(id, "graph nodes", limits.max_graph_nodes, nodes)?;
            if id == AlgorithmId::Bfs {
                EngineTrace::Traversal(graph::bfs(&graph, &start))
            } else {
                EngineTrace::Traversal(graph::dfs(&graph, &start))
            }
        }

        AlgorithmId::Dijkstra => {
            let request: DijkstraRequest = decode(id, input)?;
            let start = node_name(id, &request.start)?;
            let end = match &request.end {
                None | Some(Value::Null) => None,
                Some(Value::String(s)) if s.is_empty() => None,
                Some(value) => Some(node_name(id, value)?),
            };
            let edges = request.adjacency.values().map(|edges| edges.len()).sum();
            InputLimits::check(id, "graph edges", limits.max_graph_edges, edges)?;
            let nodes: IndexSet<String> = graph::node_universe(&request.adjacency);
            InputLimits::check(id, "graph nodes", limits.max_graph_nodes, nodes.len())?;
            EngineTrace::Dijkstra(graph::dijkstra(&request.adjacency, &start, end.as_deref()))
        }

        AlgorithmId::Knapsack01 => {
            let request: KnapsackRequest = decode(id, input)?;
            let table = cells(request.weights.len() + 1, request.capacity.saturating_add(1));
            InputLimits::check(id, "table cells", limits.max_dp_cells, table)?;
            EngineTrace::Knapsack(dp::knapsack01(&request.weights, &request.values, request.capacity))
        }

        AlgorithmId::Lcs => {
            let request: LcsRequest = decode(id, input)?;
            let table = cells(request.str1.chars().count() + 1, request.str2.chars().count() + 1);
            InputLimits::check(id, "table cells", limits.max_dp_cells, table)?;
            EngineTrace::Lcs(dp::lcs(&request.str1, &request.str2))
        }

        AlgorithmId::CoinChange => {
            let request: CoinChangeRequest = decode(id, input)?;
            InputLimits::check(id, "amount", limits.max_coin_amount, request.amount)?;
            InputLimits::check(id, "coin count", limits.max_coins, request.coins.len())?;
            EngineTrace::CoinChange(dp::coin_change(&request.coins, request.amount))
        }

        AlgorithmId::GridPaths => {
            let request: GridRequest = decode(id, input)?;
            let cols = request.grid.first().map_or(0, Vec::len);
            if let Some(row) = request.grid.iter().position(|r| r.len() != cols) {
                return Err(DispatchError::invalid(
                    id,
                    format!("grid must be rectangular: row {} has {} columns, expected {}", row, request.grid[row].len(), cols),
                ));
            }
            InputLimits::check(id, "table cells", limits.max_dp_cells, cells(request.grid.len(), cols))?;
            EngineTrace::GridPaths(dp::grid_paths(&request.grid))
        }

        AlgorithmId::NQueens => {
            let request: CountRequest = decode(id, input)?;
            let n = non_negative(id, request.n, "board size")?;
            if n == 0 {
                return Err(DispatchError::invalid(id, "board size must be at least 1"));
            }
            InputLimits::check(id, "board size", limits.max_queens, n)?;
            EngineTrace::Queens(recursion::n_queens(n))
        }

        AlgorithmId::Factorial | AlgorithmId::Fibonacci => {
            let request: CountRequest = decode(id, input)?;
            // Negative n is the engine's own ERROR step, not a rejection.
            if let Ok(n) = usize::try_from(request.n) {
                let limit = if id == AlgorithmId::Factorial {
                    limits.max_factorial_n
                } else {
                    limits.max_fibonacci_n
                };
                InputLimits::check(id, "n", limit, n)?;
            }
            if id == AlgorithmId::Factorial {
                EngineTrace::Recursion(recursion::factorial(request.n))
            } else {
                EngineTrace::Recursion(recursion::fibonacci(request.n))
            }
        }

        AlgorithmId::Inorder | AlgorithmId::Preorder | AlgorithmId::Postorder => {
            let request: TreeRequest = decode(id, input)?;
            let nodes = request.tree.as_ref().map_or(0, TreeNode::node_count);
            InputLimits::check(id, "tree nodes", limits.max_tree_nodes, nodes)?;
            let root = request.tree.as_ref();
            EngineTrace::Tree(match id {
                AlgorithmId::Preorder => tree::preorder(root),
                AlgorithmId::Postorder => tree::postorder(root),
                _ => tree::inorder(root),
            })
        }
    };

    Ok(TraceResponse {
        algorithm: id,
        stats: trace.stats(),
        trace,
        code: source(id),
    })
}
