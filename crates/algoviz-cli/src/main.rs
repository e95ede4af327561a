//! Algorithm trace CLI.
//!
//! Provides the `algoviz` binary: `list` prints the catalog and `run`
//! generates one trace and prints it as JSON. Uses the same
//! `algoviz_core::dispatch()` entry point as the HTTP server, so request
//! bodies and responses are identical between the two.

use std::io::Read;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use algoviz_core::{dispatch, AlgorithmId, DispatchError, InputLimits, SummaryView, TraceStats, CATALOG};

/// Step-by-step algorithm traces.
#[derive(Parser)]
#[command(name = "algoviz", about = "Step-by-step algorithm traces")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List every algorithm with its complexity.
    List {
        /// Print the catalog as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate a trace.
    Run {
        /// Algorithm name, e.g. `quick`, `binarySearch`, `coin-change`.
        algorithm: String,

        /// Read the input document from a file (`-` for stdin).
        #[arg(short, long, conflicts_with = "json")]
        input: Option<PathBuf>,

        /// Inline input document.
        #[arg(short, long)]
        json: Option<String>,

        /// Print only the summary and step stats.
        #[arg(long)]
        summary_only: bool,

        /// Pretty-print the output.
        #[arg(long)]
        pretty: bool,

        #[command(flatten)]
        limits: LimitArgs,
    },
}

/// Per-run overrides of the default input limits.
#[derive(Args, Debug, Default)]
struct LimitArgs {
    #[arg(long)]
    max_array_len: Option<usize>,
    #[arg(long)]
    max_graph_nodes: Option<usize>,
    #[arg(long)]
    max_graph_edges: Option<usize>,
    #[arg(long)]
    max_dp_cells: Option<usize>,
    #[arg(long)]
    max_coin_amount: Option<usize>,
    #[arg(long)]
    max_coins: Option<usize>,
    #[arg(long)]
    max_queens: Option<usize>,
    #[arg(long)]
    max_factorial_n: Option<usize>,
    #[arg(long)]
    max_fibonacci_n: Option<usize>,
    #[arg(long)]
    max_tree_nodes: Option<usize>,
    /// Lift every size limit; exact-arithmetic bounds still apply.
    #[arg(long)]
    unbounded: bool,
}

impl LimitArgs {
    fn resolve(&self) -> InputLimits {
        let base = if self.unbounded {
            InputLimits::unbounded()
        } else {
            InputLimits::default()
        };
        InputLimits {
            max_array_len: self.max_array_len.unwrap_or(base.max_array_len),
            max_graph_nodes: self.max_graph_nodes.unwrap_or(base.max_graph_nodes),
            max_graph_edges: self.max_graph_edges.unwrap_or(base.max_graph_edges),
            max_dp_cells: self.max_dp_cells.unwrap_or(base.max_dp_cells),
            max_coin_amount: self.max_coin_amount.unwrap_or(base.max_coin_amount),
            max_coins: self.max_coins.unwrap_or(base.max_coins),
            max_queens: self.max_queens.unwrap_or(base.max_queens),
            max_factorial_n: self.max_factorial_n.unwrap_or(base.max_factorial_n),
            max_fibonacci_n: self.max_fibonacci_n.unwrap_or(base.max_fibonacci_n),
            max_tree_nodes: self.max_tree_nodes.unwrap_or(base.max_tree_nodes),
        }
    }
}

/// `--summary-only` output.
#[derive(Serialize)]
struct SummaryOutput<'a> {
    algorithm: AlgorithmId,
    #[serde(flatten)]
    summary: SummaryView<'a>,
    stats: &'a TraceStats,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::List { json } => run_list(json),
        Commands::Run {
            algorithm,
            input,
            json,
            summary_only,
            pretty,
            limits,
        } => run_trace(&algorithm, input, json, summary_only, pretty, &limits.resolve()),
    };
    process::exit(exit_code);
}

fn run_list(json: bool) -> i32 {
    if json {
        return print_json(&CATALOG, true);
    }
    for info in CATALOG.iter() {
        println!(
            "{:<14} {:<28} {:<20} avg {:<12} space {}",
            info.id.as_str(),
            info.name,
            format!("{:?}", info.category),
            info.time.average,
            info.space
        );
    }
    0
}

/// Execute the run subcommand.
///
/// Returns exit code: 0 = success, 1 = rejected input, 2 = unknown
/// algorithm, 3 = I/O error.
fn run_trace(
    algorithm: &str,
    input: Option<PathBuf>,
    json: Option<String>,
    summary_only: bool,
    pretty: bool,
    limits: &InputLimits,
) -> i32 {
    let id: AlgorithmId = match algorithm.parse() {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 2;
        }
    };

    let text = match read_input(input, json) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: failed to read input: {}", e);
            return 3;
        }
    };
    let document: serde_json::Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Error: input is not valid JSON: {}", e);
            return 1;
        }
    };

    let response = match dispatch(id, document, limits) {
        Ok(response) => response,
        Err(e @ DispatchError::UnknownAlgorithm { .. }) => {
            eprintln!("Error: {}", e);
            return 2;
        }
        Err(e) => {
            tracing::warn!(algorithm = %id, "rejected input");
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    tracing::info!(algorithm = %id, steps = response.stats.total_steps, "generated trace");

    if summary_only {
        let output = SummaryOutput {
            algorithm: id,
            summary: response.trace.summary(),
            stats: &response.stats,
        };
        print_json(&output, pretty)
    } else {
        print_json(&response, pretty)
    }
}

/// Input precedence: `--json`, then `--input`, then stdin.
fn read_input(input: Option<PathBuf>, json: Option<String>) -> std::io::Result<String> {
    if let Some(json) = json {
        return Ok(json);
    }
    match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path),
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> i32 {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match rendered {
        Ok(text) => {
            println!("{}", text);
            0
        }
        Err(e) => {
            eprintln!("Error: failed to serialize output: {}", e);
            3
        }
    }
}
