//! The generic tree-builder contract and the builders that materialize nodes.
//!
//! Build events arrive strictly nested: every `start_*` has exactly one
//! matching `end_*` before its enclosing scope ends. Producing operations
//! receive the childless node and return it as placed in the tree, so the
//! caller can look at (and style) the real node.

use crate::{Alias, Document, Mapping, Node, Scalar, Sequence, Stream};

/// Receives tree-build events and places nodes in a tree.
pub trait TreeBuilder {
    fn start_stream(&mut self, stream: Stream) -> &mut Node;
    fn end_stream(&mut self);
    fn start_document(&mut self, document: Document) -> &mut Node;
    fn end_document(&mut self, implicit_end: bool);
    fn start_mapping(&mut self, mapping: Mapping) -> &mut Node;
    fn end_mapping(&mut self);
    fn start_sequence(&mut self, sequence: Sequence) -> &mut Node;
    fn end_sequence(&mut self);
    fn scalar(&mut self, scalar: Scalar) -> &mut Node;
    fn alias(&mut self, alias: Alias) -> &mut Node;
}

/// Stack of open containers shared by the concrete builders.
#[derive(Debug, Default)]
struct OpenNodes {
    stack: Vec<Node>,
}

impl OpenNodes {
    fn open(&mut self, node: Node) -> &mut Node {
        self.stack.push(node);
        self.stack.last_mut().expect("node was just pushed")
    }

    fn close(&mut self, expected: crate::NodeKind, event: &str) -> Node {
        let node = self
            .stack
            .pop()
            .unwrap_or_else(|| panic!("{event} without a matching start"));
        assert_eq!(
            node.kind(),
            expected,
            "{event} closed a {} instead of a {expected}",
            node.kind()
        );
        node
    }

    /// Append to the innermost open container, returning the placed node.
    /// `None` when nothing is open.
    fn attach(&mut self, node: Node) -> Result<&mut Node, Node> {
        match self.stack.last_mut() {
            Some(parent) => {
                let children = parent
                    .children_mut()
                    .expect("only containers are ever opened");
                children.push(node);
                Ok(children.last_mut().expect("child was just pushed"))
            }
            None => Err(node),
        }
    }
}

/// Builds one in-memory tree, rooted at the outermost node it receives
/// (normally a [`Stream`]).
#[derive(Debug, Default)]
pub struct NodeTreeBuilder {
    open: OpenNodes,
    root: Option<Node>,
}

impl NodeTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The finished tree, once the outermost node has ended.
    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub fn root_mut(&mut self) -> Option<&mut Node> {
        self.root.as_mut()
    }

    pub fn into_root(self) -> Option<Node> {
        self.root
    }

    /// Whether some container is still waiting for its end event.
    pub fn is_open(&self) -> bool {
        !self.open.stack.is_empty()
    }

    fn place(&mut self, node: Node) -> &mut Node {
        match self.open.attach(node) {
            Ok(placed) => placed,
            Err(node) => {
                assert!(
                    self.root.is_none(),
                    "a second root node was built after the tree was complete"
                );
                self.root.insert(node)
            }
        }
    }

    fn finish(&mut self, node: Node) {
        self.place(node);
    }
}

impl TreeBuilder for NodeTreeBuilder {
    fn start_stream(&mut self, stream: Stream) -> &mut Node {
        self.open.open(Node::Stream(stream))
    }

    fn end_stream(&mut self) {
        let node = self.open.close(crate::NodeKind::Stream, "end_stream");
        self.finish(node);
    }

    fn start_document(&mut self, document: Document) -> &mut Node {
        self.open.open(Node::Document(document))
    }

    fn end_document(&mut self, implicit_end: bool) {
        let mut node = self.open.close(crate::NodeKind::Document, "end_document");
        if let Node::Document(document) = &mut node {
            document.implicit_end = implicit_end;
        }
        self.finish(node);
    }

    fn start_mapping(&mut self, mapping: Mapping) -> &mut Node {
        self.open.open(Node::Mapping(mapping))
    }

    fn end_mapping(&mut self) {
        let node = self.open.close(crate::NodeKind::Mapping, "end_mapping");
        self.finish(node);
    }

    fn start_sequence(&mut self, sequence: Sequence) -> &mut Node {
        self.open.open(Node::Sequence(sequence))
    }

    fn end_sequence(&mut self) {
        let node = self.open.close(crate::NodeKind::Sequence, "end_sequence");
        self.finish(node);
    }

    fn scalar(&mut self, scalar: Scalar) -> &mut Node {
        self.place(Node::Scalar(scalar))
    }

    fn alias(&mut self, alias: Alias) -> &mut Node {
        self.place(Node::Alias(alias))
    }
}

/// Builds documents one at a time and hands each to a callback as soon as it
/// ends, instead of keeping the whole stream.
pub struct DocumentStreamBuilder<F>
where
    F: FnMut(Document),
{
    inner: NodeTreeBuilder,
    on_document: F,
}

impl<F> DocumentStreamBuilder<F>
where
    F: FnMut(Document),
{
    pub fn new(on_document: F) -> Self {
        Self {
            inner: NodeTreeBuilder::new(),
            on_document,
        }
    }

    /// The stream node (without documents) once it has ended.
    pub fn into_root(self) -> Option<Node> {
        self.inner.into_root()
    }
}

impl<F> TreeBuilder for DocumentStreamBuilder<F>
where
    F: FnMut(Document),
{
    fn start_stream(&mut self, stream: Stream) -> &mut Node {
        self.inner.start_stream(stream)
    }

    fn end_stream(&mut self) {
        self.inner.end_stream();
    }

    fn start_document(&mut self, document: Document) -> &mut Node {
        self.inner.start_document(document)
    }

    fn end_document(&mut self, implicit_end: bool) {
        let node = self
            .inner
            .open
            .close(crate::NodeKind::Document, "end_document");
        if let Node::Document(mut document) = node {
            document.implicit_end = implicit_end;
            (self.on_document)(document);
        }
    }

    fn start_mapping(&mut self, mapping: Mapping) -> &mut Node {
        self.inner.start_mapping(mapping)
    }

    fn end_mapping(&mut self) {
        self.inner.end_mapping();
    }

    fn start_sequence(&mut self, sequence: Sequence) -> &mut Node {
        self.inner.start_sequence(sequence)
    }

    fn end_sequence(&mut self) {
        self.inner.end_sequence();
    }

    fn scalar(&mut self, scalar: Scalar) -> &mut Node {
        self.inner.scalar(scalar)
    }

    fn alias(&mut self, alias: Alias) -> &mut Node {
        self.inner.alias(alias)
    }
}
