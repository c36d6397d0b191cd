//! Error types for styled YAML parsing and encoding.

use crate::SourceMark;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for styled-yaml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing or encoding.
///
/// Misuse of the build protocol (ending a container that was never started,
/// a styler changing a node's kind) is a programming error and panics
/// instead of showing up here.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed YAML, as reported by the scanner.
    #[error("YAML scan error: {0}")]
    Scan(#[from] yaml_rust2::ScanError),

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value contained itself while aliases were being dereferenced, so it
    /// cannot be expanded into a finite tree.
    #[error("value re-entered itself while dereferencing aliases (at {path})")]
    Cycle { path: String },
}

impl Error {
    /// Where in the input the error was detected, if it came from the scanner.
    pub fn location(&self) -> Option<SourceMark> {
        match self {
            Error::Scan(err) => Some(SourceMark::from_marker(err.marker())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_error_keeps_location() {
        let err = yaml_rust2::YamlLoader::load_from_str("key: [unclosed").unwrap_err();
        let original = err.to_string();
        let err = Error::from(err);

        assert!(err.to_string().ends_with(&original));
        let mark = err.location().unwrap();
        assert!(mark.line >= 1);
    }

    #[test]
    fn test_cycle_display() {
        let err = Error::Cycle {
            path: "/0/1".into(),
        };
        assert_eq!(
            err.to_string(),
            "value re-entered itself while dereferencing aliases (at /0/1)"
        );
        assert!(err.location().is_none());
    }
}
