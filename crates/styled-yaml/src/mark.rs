//! Source positions for nodes built from YAML text.

use serde::{Deserialize, Serialize};

/// Where a node started in the text it was parsed from.
///
/// Nodes produced by the encoder have no mark; nodes produced by the parser
/// carry the position reported by the scanner for their start event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMark {
    /// Character offset from start of source (0-based)
    pub index: usize,

    /// Line number (1-based)
    pub line: usize,

    /// Column number (1-based, in characters not bytes)
    pub col: usize,
}

impl SourceMark {
    /// Create a new SourceMark with all fields specified.
    pub fn new(index: usize, line: usize, col: usize) -> Self {
        Self { index, line, col }
    }

    /// Create a SourceMark from a yaml-rust2::Marker.
    pub fn from_marker(marker: &yaml_rust2::scanner::Marker) -> Self {
        Self {
            index: marker.index(),
            line: marker.line(),
            // yaml-rust2 counts lines from 1 but columns from 0
            col: marker.col() + 1,
        }
    }
}

impl Default for SourceMark {
    fn default() -> Self {
        Self {
            index: 0,
            line: 1,
            col: 1,
        }
    }
}

impl std::fmt::Display for SourceMark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.col)
    }
}
