//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use infragraph_core::{FlowDirection, Ranker};

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
///
/// Parsing `"-"` yields [`PathOrStdin::Stdin`]; anything else yields
/// [`PathOrStdin::Path`].  This avoids stringly-typed handling of the stdin
/// sentinel throughout the codebase.
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Output format for CLI commands.
#[derive(Clone, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text (default).
    #[default]
    Human,
    /// Structured JSON output.
    Json,
}

/// Flow direction argument for the `layout` subcommand.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DirectionArg {
    /// Roots at the top, dependencies below (default).
    TopToBottom,
    /// Roots at the bottom, dependencies above.
    BottomToTop,
    /// Roots at the left, dependencies to the right.
    LeftToRight,
    /// Roots at the right, dependencies to the left.
    RightToLeft,
}

impl From<DirectionArg> for FlowDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::TopToBottom => FlowDirection::TopToBottom,
            DirectionArg::BottomToTop => FlowDirection::BottomToTop,
            DirectionArg::LeftToRight => FlowDirection::LeftToRight,
            DirectionArg::RightToLeft => FlowDirection::RightToLeft,
        }
    }
}

/// Rank-assignment strategy argument for the `layout` subcommand.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RankerArg {
    /// Longest-path layering (default).
    LongestPath,
    /// Longest-path layering with slack tightening.
    Tight,
}

impl From<RankerArg> for Ranker {
    fn from(arg: RankerArg) -> Self {
        match arg {
            RankerArg::LongestPath => Ranker::LongestPath,
            RankerArg::Tight => Ranker::Tight,
        }
    }
}

/// All top-level subcommands exposed by the `infragraph` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Compute 2-D positions for a dependency graph.
    Layout {
        /// Path to a graph JSON file (`{"nodes": [...], "edges": [...]}`),
        /// or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
        /// Flow direction; when omitted, the best direction is chosen from
        /// the graph's root/leaf balance.
        #[arg(long, value_enum)]
        direction: Option<DirectionArg>,
        /// Rank-assignment strategy.
        #[arg(long, value_enum, default_value = "longest-path")]
        ranker: RankerArg,
        /// Output format.
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Detect circular dependencies. Exits 1 when any cycle is found.
    Cycles {
        /// Path to a graph JSON file, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
        /// Output format.
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Compute the blast radius of a change to one node.
    Impact {
        /// Path to a graph JSON file, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
        /// Id of the node that changes.
        #[arg(value_name = "NODE_ID")]
        node_id: String,
        /// Maximum propagation depth in hops.
        #[arg(long)]
        depth: Option<u32>,
        /// Output format.
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Suggest a flow direction for a graph.
    Direction {
        /// Path to a graph JSON file, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
    },

    /// Print the infragraph-core library version.
    Version,
}

/// Root CLI parser for the `infragraph` binary.
#[derive(Parser)]
#[command(name = "infragraph", about = "Infrastructure dependency graph tooling")]
pub struct Cli {
    /// Maximum input size in bytes.
    #[arg(long, global = true, default_value_t = 64 * 1024 * 1024)]
    pub max_file_size: u64,

    #[command(subcommand)]
    pub command: Command,
}
