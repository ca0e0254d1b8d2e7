//! Implementation of `infragraph impact <file> <node-id>`.
//!
//! Parses a graph document, propagates a change from the given node across
//! everything downstream of it, and reports the blast radius.
//!
//! Flags:
//! - `--depth <n>` (optional): maximum propagation depth in hops.
//!
//! Output (human mode): a summary header followed by one `depth id (name)`
//! line per affected node.
//! Output (JSON mode): the full result object with resolved node details.
//!
//! Exit codes: 0 = success, 1 = node id not found, 2 = read/parse failure.
use std::collections::HashMap;

use infragraph_core::{
    AffectedNode, BlastRadiusResult, DEFAULT_MAX_DEPTH, Node, propagate, resolve_affected,
    summarize,
};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::io::GraphDocument;

/// Runs the `impact` command.
///
/// `depth` caps the propagation in hops; when `None`, the engine default
/// applies.
///
/// # Errors
///
/// - [`CliError::NodeNotFound`] (exit code 1) when `node_id` does not exist
///   in the document.
/// - [`CliError::IoError`] (exit code 2) when stdout cannot be written.
pub fn run(
    doc: &GraphDocument,
    node_id: &str,
    depth: Option<u32>,
    format: &OutputFormat,
) -> Result<(), CliError> {
    if !doc.nodes.iter().any(|n| n.id == node_id) {
        return Err(CliError::NodeNotFound {
            id: node_id.to_owned(),
        });
    }

    let max_depth = depth.unwrap_or(DEFAULT_MAX_DEPTH);
    let result = propagate(node_id, &doc.edges, doc.nodes.len(), max_depth);

    let lookup: HashMap<String, Node> = doc
        .nodes
        .iter()
        .map(|n| (n.id.clone(), n.clone()))
        .collect();
    let resolved = resolve_affected(&result, &lookup);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Human => print_human(&mut out, &result, &resolved),
        OutputFormat::Json => print_json(&mut out, &result, &resolved),
    }
    .map_err(|e| CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    })
}

fn print_human(
    out: &mut impl std::io::Write,
    result: &BlastRadiusResult,
    resolved: &[AffectedNode],
) -> std::io::Result<()> {
    let summary = summarize(result);
    writeln!(
        out,
        "{}: {} affected ({} direct, {} transitive), score {:.2}, severity {}",
        result.source_id,
        result.affected_count(),
        result.direct_dependent_count,
        result.transitive_dependent_count,
        result.impact_score,
        result.severity.as_str(),
    )?;
    writeln!(out, "max depth reached: {}", summary.max_depth_reached)?;
    for node in resolved {
        writeln!(out, "  {} {} ({})", node.depth, node.id, node.name)?;
    }
    Ok(())
}

fn print_json(
    out: &mut impl std::io::Write,
    result: &BlastRadiusResult,
    resolved: &[AffectedNode],
) -> std::io::Result<()> {
    let value = serde_json::json!({
        "result": result,
        "resolved": resolved,
    });
    let json = serde_json::to_string_pretty(&value).map_err(std::io::Error::other)?;
    writeln!(out, "{json}")
}
