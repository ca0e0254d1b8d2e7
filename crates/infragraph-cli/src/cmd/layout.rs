//! Implementation of `infragraph layout <file>`.
//!
//! Parses a graph document, computes node positions with the layered
//! algorithm, and writes the placed graph to stdout.
//!
//! Flags:
//! - `--direction <d>` (optional): flow direction; defaults to the
//!   root/leaf heuristic when omitted.
//! - `--ranker <r>`: rank-assignment strategy.
//!
//! Output (human mode): one `id x y` line per node plus a trailing size line.
//! Output (JSON mode): the full layout result object.
//!
//! Exit codes: 0 = success, 2 = read/parse failure.
use infragraph_core::{LayoutOptions, LayoutResult, layout, optimal_direction};

use crate::cli::{DirectionArg, OutputFormat, RankerArg};
use crate::error::CliError;
use crate::io::GraphDocument;

/// Runs the `layout` command.
///
/// # Errors
///
/// Returns [`CliError`] with exit code 2 when stdout cannot be written.
pub fn run(
    doc: &GraphDocument,
    direction: Option<DirectionArg>,
    ranker: RankerArg,
    format: &OutputFormat,
) -> Result<(), CliError> {
    let direction = match direction {
        Some(arg) => arg.into(),
        None => optimal_direction(&doc.nodes, &doc.edges),
    };
    let options = LayoutOptions {
        direction,
        ranker: ranker.into(),
        ..LayoutOptions::default()
    };
    let result = layout(&doc.nodes, &doc.edges, &options);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Human => print_human(&mut out, &result),
        OutputFormat::Json => print_json(&mut out, &result),
    }
    .map_err(|e| CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    })
}

fn print_human(out: &mut impl std::io::Write, result: &LayoutResult) -> std::io::Result<()> {
    for placed in &result.nodes {
        writeln!(out, "{} {} {}", placed.id(), placed.x, placed.y)?;
    }
    writeln!(out, "size {} {}", result.width, result.height)
}

fn print_json(out: &mut impl std::io::Write, result: &LayoutResult) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(result).map_err(std::io::Error::other)?;
    writeln!(out, "{json}")
}
