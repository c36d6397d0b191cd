//! Encoding Rust values as a styled node tree.
//!
//! An [`Encoder`] walks values through the [`Encode`] trait and sends build
//! events into a [`StyledTreeBuilder`], so stylers decorate the tree as it
//! is built. A value with an [`Encode::identity`] that shows up a second
//! time in a document becomes an [`Alias`] to its first node, unless
//! aliases are dereferenced.
//!
//! ```rust
//! use styled_yaml::encode::{Encode, Encoder};
//! use styled_yaml::{Mapping, Result};
//!
//! struct Size {
//!     width: u32,
//!     height: u32,
//! }
//!
//! impl Encode for Size {
//!     fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
//!         encoder.start_mapping(Mapping::new());
//!         encoder.entry("width", &self.width)?;
//!         encoder.entry("height", &self.height)?;
//!         encoder.end_mapping();
//!         Ok(())
//!     }
//! }
//!
//! let size = Size { width: 4, height: 3 };
//! let yaml = styled_yaml::dump(&size, &mut [], &Default::default()).unwrap();
//! assert_eq!(yaml, "---\nwidth: 4\nheight: 3\n");
//! ```

mod impls;
mod registrar;

pub use registrar::Registrar;

use crate::builder::{NodeTreeBuilder, TreeBuilder};
use crate::{
    Alias, Document, Error, Mapping, Node, Options, Result, Scalar, Sequence, Sniffer, Stream,
    StreamEncoding, StyledTreeBuilder, Styler,
};
use tracing::trace;

/// A value that can be encoded as YAML nodes.
pub trait Encode {
    /// Emit exactly one node (a scalar, or a whole mapping or sequence)
    /// for this value.
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()>;

    /// An address identifying this value across the encode pass, for
    /// values that may be shared (like `Rc`). Repeats of an identity are
    /// aliased.
    fn identity(&self) -> Option<usize> {
        None
    }

    /// The [`Blueberry`] capability of this value, if it has one.
    fn as_blueberry(&self) -> Option<&dyn Blueberry> {
        None
    }
}

/// A value that brings its own stylers.
///
/// The stylers are asked for right before the value is encoded and are
/// active only while its own nodes are built.
pub trait Blueberry {
    fn stylers(&self, sniffer: &Sniffer) -> Vec<Box<dyn Styler>>;
}

/// Walks values and builds the styled tree of one stream.
pub struct Encoder<'s> {
    builder: StyledTreeBuilder<'s, NodeTreeBuilder>,
    registrar: Registrar,
    /// Child-index path where the next node will be placed.
    cursor: Vec<usize>,
    /// Identities whose nodes are being built right now.
    in_progress: Vec<usize>,
}

impl<'s> Encoder<'s> {
    pub fn new(stylers: &'s mut [&mut dyn Styler], options: &Options) -> Self {
        Self::from_builder(StyledTreeBuilder::from_parts(
            NodeTreeBuilder::new(),
            stylers,
            options,
        ))
    }

    /// Encode into a fresh builder set up by the caller.
    pub fn from_builder(builder: StyledTreeBuilder<'s, NodeTreeBuilder>) -> Self {
        let mut encoder = Self {
            builder,
            registrar: Registrar::new(),
            cursor: Vec::new(),
            in_progress: Vec::new(),
        };
        encoder.builder.start_stream(Stream::new(StreamEncoding::Utf8));
        encoder.open();
        encoder
    }

    pub fn sniffer(&self) -> &Sniffer {
        self.builder.sniffer()
    }

    pub fn deref_aliases(&self) -> bool {
        self.builder.deref_aliases()
    }

    pub fn builder(&self) -> &StyledTreeBuilder<'s, NodeTreeBuilder> {
        &self.builder
    }

    /// Encode `value` as the root of a new document.
    pub fn document<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.registrar.reset();
        self.builder.start_document(Document::new());
        self.open();
        self.accept(value)?;
        self.builder.end_document(true);
        self.close();
        Ok(())
    }

    /// Encode a nested value: push its own stylers, emit an alias if it
    /// was seen before, otherwise encode it; then drop its stylers again.
    pub fn accept<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
        let scoped = match value.as_blueberry() {
            Some(blueberry) => {
                let stylers = blueberry.stylers(self.builder.sniffer());
                self.builder.push_scoped(stylers)
            }
            None => 0,
        };
        let result = self.accept_registered(value);
        self.builder.pop_scoped(scoped);
        result
    }

    fn accept_registered<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
        let Some(id) = value.identity() else {
            return value.encode(self);
        };

        if self.builder.deref_aliases() {
            if self.registrar.unregister(id) {
                trace!(id, "dereferencing repeated value");
            }
            if self.in_progress.contains(&id) {
                return Err(Error::Cycle {
                    path: self.cursor_path(),
                });
            }
        } else if let Some(anchor) = self.registrar.anchor(id) {
            trace!(id, %anchor, "aliasing repeated value");
            self.alias(Alias::new(anchor));
            return Ok(());
        }

        self.registrar.register(id, self.cursor.clone());
        self.in_progress.push(id);
        let result = value.encode(self);
        self.in_progress.pop();
        result
    }

    /// Encode a key and its value inside an open mapping.
    pub fn entry<K, V>(&mut self, key: &K, value: &V) -> Result<()>
    where
        K: Encode + ?Sized,
        V: Encode + ?Sized,
    {
        self.accept(key)?;
        self.accept(value)
    }

    pub fn scalar(&mut self, scalar: Scalar) {
        self.builder.scalar(scalar);
        self.advance();
    }

    /// Refer to an anchor of this document.
    pub fn alias(&mut self, alias: Alias) {
        self.builder.alias(alias);
        self.advance();
    }

    pub fn start_mapping(&mut self, mapping: Mapping) {
        self.builder.start_mapping(mapping);
        self.open();
    }

    pub fn end_mapping(&mut self) {
        self.builder.end_mapping();
        self.close();
    }

    pub fn start_sequence(&mut self, sequence: Sequence) {
        self.builder.start_sequence(sequence);
        self.open();
    }

    pub fn end_sequence(&mut self) {
        self.builder.end_sequence();
        self.close();
    }

    /// End the stream and return it, with anchors on every aliased node.
    pub fn finish(mut self) -> Node {
        self.builder.end_stream();
        self.close();

        let mut root = self
            .builder
            .into_inner()
            .into_root()
            .expect("the stream was started when the encoder was created");
        for (path, anchor) in self.registrar.anchored() {
            if let Some(node) = root.descendant_mut(path) {
                node.set_anchor(Some(anchor.clone()));
            }
        }
        root
    }

    fn open(&mut self) {
        self.cursor.push(0);
    }

    fn close(&mut self) {
        self.cursor.pop();
        self.advance();
    }

    fn advance(&mut self) {
        if let Some(last) = self.cursor.last_mut() {
            *last += 1;
        }
    }

    fn cursor_path(&self) -> String {
        self.cursor.iter().map(|i| format!("/{i}")).collect()
    }
}
