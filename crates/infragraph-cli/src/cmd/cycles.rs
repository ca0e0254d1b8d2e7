//! Implementation of `infragraph cycles <file>`.
//!
//! Parses a graph document and reports every circular dependency.
//!
//! Output (human mode): one line per cycle, member ids joined with ` -> `.
//! Output (JSON mode): `{"cycles": [[...], ...], "count": N}`.
//!
//! Exit codes: 0 = no cycles, 1 = cycles found, 2 = read/parse failure.
use infragraph_core::find_cycles;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::io::GraphDocument;

/// Runs the `cycles` command.
///
/// # Errors
///
/// - [`CliError::CyclesFound`] (exit code 1) when the graph contains at
///   least one cycle; the cycles are printed before returning.
/// - [`CliError::IoError`] (exit code 2) when stdout cannot be written.
pub fn run(doc: &GraphDocument, format: &OutputFormat) -> Result<(), CliError> {
    let cycles = find_cycles(&doc.nodes, &doc.edges);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Human => print_human(&mut out, &cycles),
        OutputFormat::Json => print_json(&mut out, &cycles),
    }
    .map_err(|e| CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    })?;

    if cycles.is_empty() {
        Ok(())
    } else {
        Err(CliError::CyclesFound {
            count: cycles.len(),
        })
    }
}

fn print_human(out: &mut impl std::io::Write, cycles: &[Vec<String>]) -> std::io::Result<()> {
    if cycles.is_empty() {
        return writeln!(out, "no cycles");
    }
    for cycle in cycles {
        writeln!(out, "{}", cycle.join(" -> "))?;
    }
    Ok(())
}

fn print_json(out: &mut impl std::io::Write, cycles: &[Vec<String>]) -> std::io::Result<()> {
    let value = serde_json::json!({
        "cycles": cycles,
        "count": cycles.len(),
    });
    let json = serde_json::to_string_pretty(&value).map_err(std::io::Error::other)?;
    writeln!(out, "{json}")
}
