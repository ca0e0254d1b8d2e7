/// Supporting value types shared across the infragraph data model.
use serde::{Deserialize, Serialize};

/// Location of a scanned resource in its source configuration.
///
/// Line numbers are 1-based and inclusive; `end_line` equals `start_line`
/// for single-line declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SourceLocation {
    /// Path of the file the resource was declared in, relative to the scan
    /// root.
    pub file: String,

    /// First line of the declaration (1-based).
    pub start_line: u32,

    /// Last line of the declaration (1-based, inclusive).
    pub end_line: u32,
}
