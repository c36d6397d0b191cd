//! Position tracking for nodes as a tree is built.
//!
//! The [`Sniffer`] receives one update per build event and keeps the level
//! (depth) and position (1-based sibling index) of the node being built,
//! plus the stack of [`Parent`] frames above it. Mapping entries get an
//! extra synthetic frame for their key, so a mapping value is one level
//! deeper than its key:
//!
//! ```text
//! (1:1):Stream - <root:(0:0)>
//! (1:1):Document - <stream:(1:1)>
//! (1:1):Mapping - <doc:(1:1)>
//!  (2:1):Burgers - <map:(1:1)>
//!   (3:1):Mapping - <Burgers:(2:1)>
//!    (4:1):Classic - <map:(3:1)>
//!     (5:1):Mapping - <Classic:(4:1)>
//!      (6:1):Sauce - <map:(5:1)>
//!       (7:1):Sequence - <Sauce:(6:1)>
//!        (8:1):Ketchup - <seq:(7:1)>
//!        (8:2):Mustard - <seq:(7:1)>
//! ```
//!
//! Stylers see a node before the sniffer records it, so `level`, `position`
//! and `parent` describe the node being styled.

mod parent;

pub use parent::{ChildType, DebugTag, Parent};

use crate::{Alias, Document, Mapping, Node, Scalar, Sequence, Stream};
use std::rc::Rc;

/// Tracks level, position and ancestors of the node being built, and keeps
/// a snapshot (without children) of every node seen so far.
///
/// Each snapshot is allocated once and shared between the history and the
/// frame it opens; the per-kind histories are views over it.
#[derive(Debug, Clone)]
pub struct Sniffer {
    enabled: bool,
    level: usize,
    position: usize,
    parents: Vec<Parent>,
    nodes: Vec<Rc<Node>>,
}

impl Default for Sniffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sniffer {
    pub fn new() -> Self {
        let mut sniffer = Self {
            enabled: true,
            level: 0,
            position: 0,
            parents: Vec::new(),
            nodes: Vec::new(),
        };
        sniffer.start_parent(None, DebugTag::Root, None, false);
        sniffer
    }

    /// A sniffer that ignores every update. Stylers always see level 1,
    /// position 1 and the root frame.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Depth of the current node (1 for the top level).
    pub fn level(&self) -> usize {
        self.level
    }

    /// Sibling index of the current node (1-based).
    pub fn position(&self) -> usize {
        self.position
    }

    /// The innermost frame: the root sentinel before anything is built.
    pub fn parent(&self) -> Option<&Parent> {
        self.parents.last()
    }

    /// All frames from the root sentinel down to [`Sniffer::parent`].
    pub fn parents(&self) -> &[Parent] {
        &self.parents
    }

    pub fn aliases(&self) -> impl Iterator<Item = &Alias> {
        self.nodes().filter_map(Node::as_alias)
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.nodes().filter_map(Node::as_document)
    }

    pub fn mappings(&self) -> impl Iterator<Item = &Mapping> {
        self.nodes().filter_map(Node::as_mapping)
    }

    /// Every node seen so far, in build order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Node> {
        self.nodes.iter().map(|node| &**node)
    }

    pub fn scalars(&self) -> impl Iterator<Item = &Scalar> {
        self.nodes().filter_map(Node::as_scalar)
    }

    pub fn sequences(&self) -> impl Iterator<Item = &Sequence> {
        self.nodes().filter_map(Node::as_sequence)
    }

    pub fn streams(&self) -> impl Iterator<Item = &Stream> {
        self.nodes().filter_map(Node::as_stream)
    }

    // Updates. The styled tree builder calls exactly one of these per build
    // event; stylers only ever get a shared reference.

    pub fn add_alias(&mut self, node: &Node) {
        assert!(
            matches!(node, Node::Alias(_)),
            "add_alias called with a {}",
            node.kind()
        );
        if !self.enabled {
            return;
        }
        self.add_child(node);
    }

    pub fn add_scalar(&mut self, node: &Node) {
        assert!(
            matches!(node, Node::Scalar(_)),
            "add_scalar called with a {}",
            node.kind()
        );
        if !self.enabled {
            return;
        }
        self.add_child(node);
    }

    pub fn start_stream(&mut self, node: &Node) {
        if !self.enabled {
            return;
        }
        let snapshot = self.record(node);
        self.start_parent(Some(snapshot), DebugTag::Stream, None, true);
    }

    pub fn start_document(&mut self, node: &Node) {
        if !self.enabled {
            return;
        }
        let snapshot = self.record(node);
        self.start_parent(Some(snapshot), DebugTag::Doc, None, true);
    }

    pub fn start_mapping(&mut self, node: &Node) {
        if !self.enabled {
            return;
        }
        let snapshot = self.record(node);
        self.start_parent(Some(snapshot), DebugTag::Map, Some(ChildType::Key), false);
    }

    pub fn start_sequence(&mut self, node: &Node) {
        if !self.enabled {
            return;
        }
        let snapshot = self.record(node);
        self.start_parent(Some(snapshot), DebugTag::Seq, None, false);
    }

    pub fn end_stream(&mut self) {
        if self.enabled {
            self.end_parent(false);
        }
    }

    pub fn end_document(&mut self) {
        if self.enabled {
            self.end_parent(false);
        }
    }

    pub fn end_mapping(&mut self) {
        if self.enabled {
            self.end_parent(true);
        }
    }

    pub fn end_sequence(&mut self) {
        if self.enabled {
            self.end_parent(true);
        }
    }

    fn current_mut(&mut self) -> &mut Parent {
        self.parents
            .last_mut()
            .expect("the root frame is never popped")
    }

    /// Snapshot a node into the history of all nodes.
    fn record(&mut self, node: &Node) -> Rc<Node> {
        let snapshot = Rc::new(node.shallow_clone());
        self.nodes.push(Rc::clone(&snapshot));
        snapshot
    }

    fn add_child(&mut self, node: &Node) {
        let snapshot = self.record(node);
        let child_type = self.current_mut().child_type;
        match child_type {
            Some(ChildType::Key) => {
                let debug_tag = match &*snapshot {
                    Node::Scalar(scalar) => DebugTag::Key(scalar.value.clone()),
                    Node::Alias(alias) => DebugTag::Key(alias.anchor.clone()),
                    _ => DebugTag::NoFace,
                };
                self.start_parent(Some(snapshot), debug_tag, Some(ChildType::Value), false);
            }
            Some(ChildType::Value) => self.end_mapping_value(),
            None => self.next_sibling(),
        }
    }

    fn next_sibling(&mut self) {
        let parent = self.current_mut();
        parent.child_position += 1;
        let position = parent.child_position;
        self.position = position;
    }

    fn start_parent(
        &mut self,
        node: Option<Rc<Node>>,
        debug_tag: DebugTag,
        child_type: Option<ChildType>,
        top_level: bool,
    ) {
        let frame = Parent::new(node, debug_tag, self.level, self.position, child_type);
        let position = frame.position;
        self.parents.push(frame);

        if top_level {
            self.level = 1;
            self.position = position;
        } else {
            self.level += 1;
            self.position = 1;
        }
    }

    /// Pop the innermost frame and advance its parent to the next sibling.
    /// `container` is set for the end of a mapping or sequence, which may
    /// finish a mapping value or start the value of a complex key.
    fn end_parent(&mut self, container: bool) {
        assert!(
            self.parents.len() > 1,
            "end event without a matching start (only the root frame is left)"
        );
        let closed = self.parents.pop().expect("checked above");
        self.level = closed.level;

        let child_type = self.current_mut().child_type;
        match child_type {
            Some(ChildType::Key) if container => {
                // The container was a mapping key: its value nests under it
                // the way a scalar key's value does.
                self.position = closed.position;
                self.start_parent(closed.node, DebugTag::NoFace, Some(ChildType::Value), false);
            }
            Some(ChildType::Value) if container => {
                self.next_sibling();
                self.end_mapping_value();
            }
            _ => self.next_sibling(),
        }
    }

    /// Close the synthetic key frame once its value is complete.
    fn end_mapping_value(&mut self) {
        self.end_parent(false);
        self.current_mut().child_type = Some(ChildType::Key);
    }
}
