//! Options shared by the dump and parse entry points.
//!
//! ```rust
//! use styled_yaml::Options;
//!
//! let options = Options { indentation: 4, deref_aliases: true, ..Options::default() };
//! assert_eq!(options.indent(), 4);
//! ```

use crate::Sniffer;

/// Options for styling and emitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Spaces per block indentation level (default: 2).
    ///
    /// Values outside `2..=9` are clamped when emitting.
    pub indentation: usize,

    /// Encode a value again wherever it repeats instead of emitting an
    /// alias to its first occurrence (default: false).
    pub deref_aliases: bool,

    /// Track levels, positions and parents for stylers (default: true).
    ///
    /// With this off, stylers always see level 1 and position 1; turn it
    /// off only when no styler looks at the sniffer.
    pub sniff: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            indentation: 2,
            deref_aliases: false,
            sniff: true,
        }
    }
}

impl Options {
    /// The indentation actually used by the emitter.
    pub fn indent(&self) -> usize {
        self.indentation.clamp(2, 9)
    }

    pub(crate) fn sniffer(&self) -> Sniffer {
        if self.sniff {
            Sniffer::new()
        } else {
            Sniffer::disabled()
        }
    }
}
