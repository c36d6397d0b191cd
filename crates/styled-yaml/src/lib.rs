//! # styled-yaml
//!
//! YAML tree building with styling callbacks that know where each node is.
//!
//! Every node built, whether parsed from text or encoded from a Rust value,
//! passes through an ordered list of [`Styler`]s before it settles in the
//! tree. Stylers can change a node's style, text or tag, and read the
//! [`Sniffer`] to learn the node's level, its position among its siblings
//! and the chain of parents above it.
//!
//! ## Design
//!
//! The [`StyledTreeBuilder`] decorates any [`builder::TreeBuilder`]: it runs
//! the stylers on each node, updates the sniffer, and forwards the node to
//! the wrapped builder. The parser front end drives it from
//! `yaml-rust2` scanner events; the [`encode::Encoder`] drives it from Rust
//! values, aliasing repeated shared values and letting values that implement
//! [`encode::Blueberry`] style their own subtree.
//!
//! ## Example
//!
//! ```rust
//! use styled_yaml::stylers::FlowStyler;
//! use styled_yaml::{dump, Options, Styler};
//! use std::collections::BTreeMap;
//!
//! let burgers = BTreeMap::from([(
//!     "Burgers",
//!     BTreeMap::from([("Classic", BTreeMap::from([("Sauce", vec!["Ketchup", "Mustard"])]))]),
//! )]);
//!
//! let mut flow = FlowStyler::new(4);
//! let stylers: &mut [&mut dyn Styler] = &mut [&mut flow];
//! let yaml = dump(&burgers, stylers, &Options::default()).unwrap();
//! assert_eq!(yaml, "---\nBurgers:\n  Classic: {Sauce: [Ketchup, Mustard]}\n");
//! ```

pub mod builder;
mod emit;
pub mod encode;
mod error;
mod mark;
mod node;
mod options;
mod parse;
mod sniffer;
mod styled;
mod styler;
pub mod stylers;

pub use emit::emit;
pub use error::{Error, Result};
pub use mark::SourceMark;
pub use node::{
    Alias, Document, Mapping, MappingStyle, Node, NodeKind, Scalar, ScalarStyle, Sequence,
    SequenceStyle, Stream, StreamEncoding, Style, TagDirective,
};
pub use options::Options;
pub use parse::{build_from_str, parse, parse_file, parse_stream, parse_tree};
pub use sniffer::{ChildType, DebugTag, Parent, Sniffer};
pub use styled::{StyledTreeBuilder, StylerId};
pub use styler::{EmptyStyler, Styler};

use encode::{Encode, Encoder};
use std::path::Path;
use stylers::HierarchyStyler;
use tracing::debug;

/// Encode `value` as one styled document and write it as YAML.
///
/// # Errors
///
/// Returns [`Error::Cycle`] if `value` contains itself while
/// [`Options::deref_aliases`] is on.
pub fn dump<T: Encode + ?Sized>(
    value: &T,
    stylers: &mut [&mut dyn Styler],
    options: &Options,
) -> Result<String> {
    debug!(stylers = stylers.len(), "dumping one document");
    let mut encoder = Encoder::new(stylers, options);
    encoder.document(value)?;
    Ok(emit(&encoder.finish(), options))
}

/// Encode each value as its own document and return the styled stream.
/// An empty slice gives a stream with a single `null` document.
///
/// # Errors
///
/// See [`dump`].
pub fn to_node_tree<T: Encode>(
    values: &[T],
    stylers: &mut [&mut dyn Styler],
    options: &Options,
) -> Result<Node> {
    debug!(documents = values.len(), stylers = stylers.len(), "encoding stream");
    let mut encoder = Encoder::new(stylers, options);
    if values.is_empty() {
        encoder.document(&None::<T>)?;
    }
    for value in values {
        encoder.document(value)?;
    }
    Ok(encoder.finish())
}

/// Like [`dump`], with one document per value.
///
/// # Errors
///
/// See [`dump`].
pub fn dump_stream<T: Encode>(
    values: &[T],
    stylers: &mut [&mut dyn Styler],
    options: &Options,
) -> Result<String> {
    let tree = to_node_tree(values, stylers, options)?;
    Ok(emit(&tree, options))
}

/// Write [`dump_stream`] output to a file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be written, or any error of
/// [`dump`].
pub fn dump_file<T: Encode>(
    path: impl AsRef<Path>,
    values: &[T],
    stylers: &mut [&mut dyn Styler],
    options: &Options,
) -> Result<()> {
    let path = path.as_ref();
    let yaml = dump_stream(values, stylers, options)?;
    debug!(path = %path.display(), "writing YAML file");
    std::fs::write(path, yaml).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// The [`HierarchyStyler`] trace of encoding `value`: one line per node
/// with its level, position and parent.
///
/// # Errors
///
/// See [`dump`].
pub fn hierarchy<T: Encode + ?Sized>(value: &T, verbose: bool) -> Result<String> {
    let mut styler = HierarchyStyler::new(verbose);
    {
        let stylers: &mut [&mut dyn Styler] = &mut [&mut styler];
        let mut encoder = Encoder::new(stylers, &Options::default());
        encoder.document(value)?;
        encoder.finish();
    }
    Ok(styler.to_string())
}
