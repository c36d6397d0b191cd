//! One open ancestor scope of the node being built.

use crate::{Node, NodeKind};
use std::fmt;
use std::rc::Rc;

/// Which half of a key/value pair a frame's next child is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildType {
    Key,
    Value,
}

impl fmt::Display for ChildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildType::Key => f.write_str("key"),
            ChildType::Value => f.write_str("value"),
        }
    }
}

/// Short label of a frame, used in traces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DebugTag {
    Root,
    Stream,
    Doc,
    Map,
    Seq,
    /// A mapping key: the key scalar's text or the alias' anchor.
    Key(String),
    /// A mapping key with nothing printable (a collection used as a key).
    NoFace,
}

impl fmt::Display for DebugTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebugTag::Root => f.write_str("root"),
            DebugTag::Stream => f.write_str("stream"),
            DebugTag::Doc => f.write_str("doc"),
            DebugTag::Map => f.write_str("map"),
            DebugTag::Seq => f.write_str("seq"),
            DebugTag::Key(text) => f.write_str(text),
            DebugTag::NoFace => f.write_str("noface"),
        }
    }
}

/// A parent frame: a stream, document, mapping or sequence that is still
/// open, or a mapping key whose value is being built.
///
/// The node is a snapshot (without children) taken when the frame opened,
/// after every styler had seen it.
#[derive(Debug, Clone)]
pub struct Parent {
    pub(crate) node: Option<Rc<Node>>,
    pub(crate) debug_tag: DebugTag,
    pub(crate) level: usize,
    pub(crate) position: usize,
    pub(crate) child_position: usize,
    pub(crate) child_type: Option<ChildType>,
}

impl Parent {
    pub(crate) fn new(
        node: Option<Rc<Node>>,
        debug_tag: DebugTag,
        level: usize,
        position: usize,
        child_type: Option<ChildType>,
    ) -> Self {
        Self {
            node,
            debug_tag,
            level,
            position,
            child_position: 1,
            child_type,
        }
    }

    /// The node of this frame; `None` only for the root sentinel.
    pub fn node(&self) -> Option<&Node> {
        self.node.as_deref()
    }

    pub fn debug_tag(&self) -> &DebugTag {
        &self.debug_tag
    }

    /// Level of this frame's node.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Position of this frame's node among its siblings.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Position the next child will get.
    pub fn child_position(&self) -> usize {
        self.child_position
    }

    /// `Key` for a mapping, `Value` for a mapping key, `None` otherwise.
    pub fn child_type(&self) -> Option<ChildType> {
        self.child_type
    }

    pub fn is_child_key(&self) -> bool {
        self.child_type == Some(ChildType::Key)
    }

    pub fn is_child_value(&self) -> bool {
        self.child_type == Some(ChildType::Value)
    }

    pub fn kind(&self) -> Option<NodeKind> {
        self.node.as_deref().map(Node::kind)
    }

    pub fn node_of(&self, names: &[&str]) -> bool {
        self.node.as_deref().is_some_and(|node| node.node_of(names))
    }

    /// Text of the node when it is a scalar (e.g. the key of a value).
    pub fn value(&self) -> Option<&str> {
        self.node
            .as_deref()
            .and_then(Node::as_scalar)
            .map(|scalar| scalar.value.as_str())
    }

    pub fn tag(&self) -> Option<&str> {
        self.node.as_deref().and_then(Node::tag)
    }

    pub fn anchor(&self) -> Option<&str> {
        self.node.as_deref().and_then(Node::anchor)
    }

    pub fn is_implicit(&self) -> bool {
        match self.node.as_deref() {
            Some(Node::Document(d)) => d.implicit,
            Some(Node::Mapping(m)) => m.implicit,
            Some(Node::Sequence(s)) => s.implicit,
            _ => false,
        }
    }

    pub fn is_implicit_end(&self) -> bool {
        matches!(self.node.as_deref(), Some(Node::Document(d)) if d.implicit_end)
    }

    pub fn is_plain(&self) -> bool {
        matches!(self.node.as_deref(), Some(Node::Scalar(s)) if s.plain)
    }

    pub fn is_quoted(&self) -> bool {
        matches!(self.node.as_deref(), Some(Node::Scalar(s)) if s.quoted)
    }
}

/// `<tag:(level:position):child_type:(:child_position)>`
impl fmt::Display for Parent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}:({}:{}):", self.debug_tag, self.level, self.position)?;
        if let Some(child_type) = self.child_type {
            write!(f, "{child_type}")?;
        }
        write!(f, ":(:{})>", self.child_position)
    }
}
