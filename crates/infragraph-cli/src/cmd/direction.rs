//! Implementation of `infragraph direction <file>`.
//!
//! Parses a graph document and prints the suggested flow direction, chosen
//! from the graph's root/leaf balance. Always prints the snake_case token
//! (`top_to_bottom` or `left_to_right`) so the output can be fed back into
//! `layout --direction`.
//!
//! Exit codes: 0 = success, 2 = read/parse failure.
use std::io::Write as _;

use infragraph_core::{FlowDirection, optimal_direction};

use crate::error::CliError;
use crate::io::GraphDocument;

/// Runs the `direction` command.
///
/// # Errors
///
/// Returns [`CliError::IoError`] (exit code 2) when stdout cannot be
/// written.
pub fn run(doc: &GraphDocument) -> Result<(), CliError> {
    let direction = optimal_direction(&doc.nodes, &doc.edges);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", token(direction)).map_err(|e| CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    })
}

fn token(direction: FlowDirection) -> &'static str {
    match direction {
        FlowDirection::TopToBottom => "top_to_bottom",
        FlowDirection::BottomToTop => "bottom_to_top",
        FlowDirection::LeftToRight => "left_to_right",
        FlowDirection::RightToLeft => "right_to_left",
    }
}
