//! A tree builder that runs stylers on every node it builds.

use crate::builder::TreeBuilder;
use crate::styler::dispatch;
use crate::{
    Alias, Document, Mapping, Node, Options, Scalar, Sequence, Sniffer, Stream, Styler,
};
use tracing::{debug, trace};

/// Handle to a styler in a [`StyledTreeBuilder`], for removing it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StylerId(u64);

/// Wraps a [`TreeBuilder`] and styles each node the wrapped builder
/// produces.
///
/// For aliases, scalars and the start of streams, documents, mappings and
/// sequences, every styler runs (in the order they were added) on the node
/// as placed in the tree; then the [`Sniffer`] records it. End events go to
/// the wrapped builder first, then to the sniffer.
///
/// Stylers added while a tree is being built only see the nodes built after
/// that; the encoder uses this to scope an object's stylers to its subtree.
pub struct StyledTreeBuilder<'s, B> {
    inner: B,
    sniffer: Sniffer,
    stylers: Vec<(StylerId, Box<dyn Styler + 's>)>,
    next_id: u64,
    deref_aliases: bool,
}

impl<'s, B: TreeBuilder> StyledTreeBuilder<'s, B> {
    pub fn new(inner: B) -> Self {
        Self::with_sniffer(inner, Sniffer::new())
    }

    /// Use a specific sniffer, e.g. [`Sniffer::disabled`] when no styler
    /// looks at positions.
    pub fn with_sniffer(inner: B, sniffer: Sniffer) -> Self {
        Self {
            inner,
            sniffer,
            stylers: Vec::new(),
            next_id: 0,
            deref_aliases: false,
        }
    }

    /// Sniffing and alias dereferencing as set in `options`.
    pub fn with_options(inner: B, options: &Options) -> Self {
        let mut builder = Self::with_sniffer(inner, options.sniffer());
        builder.deref_aliases = options.deref_aliases;
        builder
    }

    /// A builder running borrowed stylers, in slice order.
    pub(crate) fn from_parts(
        inner: B,
        stylers: &'s mut [&mut dyn Styler],
        options: &Options,
    ) -> Self {
        let mut builder = Self::with_options(inner, options);
        for styler in stylers.iter_mut() {
            builder.add_styler(&mut **styler);
        }
        builder
    }

    pub fn sniffer(&self) -> &Sniffer {
        &self.sniffer
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut B {
        &mut self.inner
    }

    pub fn into_inner(self) -> B {
        self.inner
    }

    /// Whether repeated values are encoded again instead of as aliases.
    pub fn deref_aliases(&self) -> bool {
        self.deref_aliases
    }

    pub fn set_deref_aliases(&mut self, deref_aliases: bool) {
        self.deref_aliases = deref_aliases;
    }

    /// Number of active stylers.
    pub fn styler_count(&self) -> usize {
        self.stylers.len()
    }

    fn next_id(&mut self) -> StylerId {
        let id = StylerId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a styler; it runs after all current stylers.
    pub fn add_styler(&mut self, styler: impl Styler + 's) -> StylerId {
        self.add_boxed_styler(Box::new(styler))
    }

    pub fn add_boxed_styler(&mut self, styler: Box<dyn Styler + 's>) -> StylerId {
        let id = self.next_id();
        self.stylers.push((id, styler));
        id
    }

    /// Append several stylers, returning how many were added.
    pub fn add_stylers<I>(&mut self, stylers: I) -> usize
    where
        I: IntoIterator<Item = Box<dyn Styler + 's>>,
    {
        let before = self.stylers.len();
        for styler in stylers {
            self.add_boxed_styler(styler);
        }
        self.stylers.len() - before
    }

    /// Insert a styler at `index` in the running order.
    ///
    /// # Panics
    ///
    /// If `index` is greater than [`StyledTreeBuilder::styler_count`].
    pub fn insert_styler(&mut self, index: usize, styler: impl Styler + 's) -> StylerId {
        let id = self.next_id();
        self.stylers.insert(index, (id, Box::new(styler)));
        id
    }

    /// Remove the most recently added (last) styler.
    pub fn pop_styler(&mut self) -> Option<Box<dyn Styler + 's>> {
        self.stylers.pop().map(|(_, styler)| styler)
    }

    /// Remove the last `count` stylers, returned in running order.
    ///
    /// # Panics
    ///
    /// If fewer than `count` stylers are active: pushes and pops of scoped
    /// stylers must balance.
    pub fn pop_stylers(&mut self, count: usize) -> Vec<Box<dyn Styler + 's>> {
        assert!(
            count <= self.stylers.len(),
            "popping {count} stylers but only {} are active",
            self.stylers.len()
        );
        let start = self.stylers.len() - count;
        self.stylers
            .drain(start..)
            .map(|(_, styler)| styler)
            .collect()
    }

    /// Remove the styler added under `id`, wherever it is in the order.
    pub fn remove_styler(&mut self, id: StylerId) -> Option<Box<dyn Styler + 's>> {
        let index = self.stylers.iter().position(|(i, _)| *i == id)?;
        Some(self.stylers.remove(index).1)
    }

    pub fn remove_styler_at(&mut self, index: usize) -> Option<Box<dyn Styler + 's>> {
        (index < self.stylers.len()).then(|| self.stylers.remove(index).1)
    }

    /// Push an object's stylers for the duration of its subtree; returns
    /// the count to hand back to [`StyledTreeBuilder::pop_scoped`].
    pub(crate) fn push_scoped(&mut self, stylers: Vec<Box<dyn Styler + 's>>) -> usize {
        let count = self.add_stylers(stylers);
        if count > 0 {
            debug!(count, active = self.stylers.len(), "pushed scoped stylers");
        }
        count
    }

    pub(crate) fn pop_scoped(&mut self, count: usize) {
        if count > 0 {
            self.pop_stylers(count);
            debug!(count, active = self.stylers.len(), "popped scoped stylers");
        }
    }
}

fn run_stylers(
    stylers: &mut [(StylerId, Box<dyn Styler + '_>)],
    sniffer: &Sniffer,
    node: &mut Node,
) {
    for (_, styler) in stylers.iter_mut() {
        dispatch(styler.as_mut(), sniffer, node);
    }
}

impl<B: TreeBuilder> TreeBuilder for StyledTreeBuilder<'_, B> {
    fn start_stream(&mut self, stream: Stream) -> &mut Node {
        let node = self.inner.start_stream(stream);
        run_stylers(&mut self.stylers, &self.sniffer, node);
        self.sniffer.start_stream(node);
        node
    }

    fn end_stream(&mut self) {
        self.inner.end_stream();
        self.sniffer.end_stream();
    }

    fn start_document(&mut self, document: Document) -> &mut Node {
        let node = self.inner.start_document(document);
        run_stylers(&mut self.stylers, &self.sniffer, node);
        self.sniffer.start_document(node);
        node
    }

    fn end_document(&mut self, implicit_end: bool) {
        self.inner.end_document(implicit_end);
        self.sniffer.end_document();
    }

    fn start_mapping(&mut self, mapping: Mapping) -> &mut Node {
        let node = self.inner.start_mapping(mapping);
        run_stylers(&mut self.stylers, &self.sniffer, node);
        self.sniffer.start_mapping(node);
        node
    }

    fn end_mapping(&mut self) {
        self.inner.end_mapping();
        self.sniffer.end_mapping();
    }

    fn start_sequence(&mut self, sequence: Sequence) -> &mut Node {
        let node = self.inner.start_sequence(sequence);
        run_stylers(&mut self.stylers, &self.sniffer, node);
        self.sniffer.start_sequence(node);
        node
    }

    fn end_sequence(&mut self) {
        self.inner.end_sequence();
        self.sniffer.end_sequence();
    }

    fn scalar(&mut self, scalar: Scalar) -> &mut Node {
        let node = self.inner.scalar(scalar);
        run_stylers(&mut self.stylers, &self.sniffer, node);
        self.sniffer.add_scalar(node);
        node
    }

    fn alias(&mut self, alias: Alias) -> &mut Node {
        trace!(anchor = %alias.anchor, "alias");
        let node = self.inner.alias(alias);
        run_stylers(&mut self.stylers, &self.sniffer, node);
        self.sniffer.add_alias(node);
        node
    }
}
