//! The document tree that builders produce and stylers decorate.
//!
//! A tree is a [`Node::Stream`] holding [`Node::Document`]s, each holding at
//! most one root node. Mapping children alternate key, value, key, value.
//! Only the containers (stream, document, mapping, sequence) have children.

use crate::SourceMark;
use serde::{Deserialize, Serialize};

/// Layout of a mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MappingStyle {
    /// Let the emitter decide (block).
    #[default]
    Any,
    Block,
    Flow,
}

/// Layout of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SequenceStyle {
    /// Let the emitter decide (block).
    #[default]
    Any,
    Block,
    Flow,
}

/// Quoting of a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScalarStyle {
    /// Let the emitter pick the simplest style that keeps the text intact.
    #[default]
    Any,
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
}

/// Character encoding recorded on a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StreamEncoding {
    Any,
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
}

/// A `%TAG` directive of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDirective {
    pub handle: String,
    pub prefix: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Stream {
    pub encoding: StreamEncoding,
    pub children: Vec<Node>,
}

impl Stream {
    pub fn new(encoding: StreamEncoding) -> Self {
        Self {
            encoding,
            children: Vec::new(),
        }
    }

    /// The documents of this stream, in order.
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.children.iter().filter_map(Node::as_document)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// `%YAML major.minor` directive, if any.
    pub version: Option<(u32, u32)>,
    pub tag_directives: Vec<TagDirective>,
    /// No explicit `---` start marker.
    pub implicit: bool,
    /// No explicit `...` end marker.
    pub implicit_end: bool,
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mark: Option<SourceMark>,
}

impl Document {
    /// An explicit (`---`) document with an implicit end.
    pub fn new() -> Self {
        Self {
            version: None,
            tag_directives: Vec::new(),
            implicit: false,
            implicit_end: true,
            children: Vec::new(),
            mark: None,
        }
    }

    pub fn root(&self) -> Option<&Node> {
        self.children.first()
    }

    pub fn root_mut(&mut self) -> Option<&mut Node> {
        self.children.first_mut()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mapping {
    pub anchor: Option<String>,
    pub tag: Option<String>,
    /// The tag may be omitted when emitting.
    pub implicit: bool,
    pub style: MappingStyle,
    /// Keys and values, alternating.
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mark: Option<SourceMark>,
}

impl Mapping {
    pub fn new() -> Self {
        Self {
            implicit: true,
            ..Self::default()
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self.implicit = false;
        self
    }

    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }

    pub fn with_style(mut self, style: MappingStyle) -> Self {
        self.style = style;
        self
    }

    /// Key/value pairs. A trailing key without a value is not yielded.
    pub fn entries(&self) -> impl Iterator<Item = (&Node, &Node)> {
        self.children
            .chunks_exact(2)
            .map(|pair| (&pair[0], &pair[1]))
    }

    /// The value of the first entry whose key is a scalar with this text.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries()
            .find(|(k, _)| k.as_scalar().is_some_and(|s| s.value == key))
            .map(|(_, v)| v)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sequence {
    pub anchor: Option<String>,
    pub tag: Option<String>,
    pub implicit: bool,
    pub style: SequenceStyle,
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mark: Option<SourceMark>,
}

impl Sequence {
    pub fn new() -> Self {
        Self {
            implicit: true,
            ..Self::default()
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self.implicit = false;
        self
    }

    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }

    pub fn with_style(mut self, style: SequenceStyle) -> Self {
        self.style = style;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scalar {
    pub value: String,
    pub anchor: Option<String>,
    pub tag: Option<String>,
    /// The tag may be omitted when written plain.
    pub plain: bool,
    /// The tag may be omitted when written quoted.
    pub quoted: bool,
    pub style: ScalarStyle,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mark: Option<SourceMark>,
}

impl Scalar {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            anchor: None,
            tag: None,
            plain: true,
            quoted: true,
            style: ScalarStyle::Any,
            mark: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self.plain = false;
        self.quoted = false;
        self
    }

    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }

    pub fn with_style(mut self, style: ScalarStyle) -> Self {
        self.style = style;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alias {
    /// Name of the anchor this alias refers to.
    pub anchor: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mark: Option<SourceMark>,
}

impl Alias {
    pub fn new(anchor: impl Into<String>) -> Self {
        Self {
            anchor: anchor.into(),
            mark: None,
        }
    }
}

/// One element of the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Stream(Stream),
    Document(Document),
    Mapping(Mapping),
    Sequence(Sequence),
    Scalar(Scalar),
    Alias(Alias),
}

/// The six kinds of [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Stream,
    Document,
    Mapping,
    Sequence,
    Scalar,
    Alias,
}

impl NodeKind {
    /// Resolve a kind from its name or short alias (`doc`, `map`, `seq`),
    /// ignoring case.
    pub fn from_name(name: &str) -> Option<NodeKind> {
        match name.trim().to_ascii_lowercase().as_str() {
            "stream" => Some(NodeKind::Stream),
            "document" | "doc" => Some(NodeKind::Document),
            "mapping" | "map" => Some(NodeKind::Mapping),
            "sequence" | "seq" => Some(NodeKind::Sequence),
            "scalar" => Some(NodeKind::Scalar),
            "alias" => Some(NodeKind::Alias),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Stream => "Stream",
            NodeKind::Document => "Document",
            NodeKind::Mapping => "Mapping",
            NodeKind::Sequence => "Sequence",
            NodeKind::Scalar => "Scalar",
            NodeKind::Alias => "Alias",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A style constant for one node kind.
///
/// Looking up a constant that a kind does not have yields
/// [`Style::Unsupported`], which [`Node::apply_style`] ignores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Mapping(MappingStyle),
    Sequence(SequenceStyle),
    Scalar(ScalarStyle),
    Stream(StreamEncoding),
    Unsupported,
}

impl Style {
    /// Look up a style constant by kind name and constant name, e.g.
    /// `("map", "flow")` or `("scalar", "single-quoted")`.
    pub fn lookup(kind: &str, name: &str) -> Style {
        let Some(kind) = NodeKind::from_name(kind) else {
            return Style::Unsupported;
        };
        let name = name.trim().to_ascii_lowercase().replace('-', "_");

        match (kind, name.as_str()) {
            (NodeKind::Mapping, "any") => Style::Mapping(MappingStyle::Any),
            (NodeKind::Mapping, "block") => Style::Mapping(MappingStyle::Block),
            (NodeKind::Mapping, "flow") => Style::Mapping(MappingStyle::Flow),
            (NodeKind::Sequence, "any") => Style::Sequence(SequenceStyle::Any),
            (NodeKind::Sequence, "block") => Style::Sequence(SequenceStyle::Block),
            (NodeKind::Sequence, "flow") => Style::Sequence(SequenceStyle::Flow),
            (NodeKind::Scalar, "any") => Style::Scalar(ScalarStyle::Any),
            (NodeKind::Scalar, "plain") => Style::Scalar(ScalarStyle::Plain),
            (NodeKind::Scalar, "single_quoted") => Style::Scalar(ScalarStyle::SingleQuoted),
            (NodeKind::Scalar, "double_quoted") => Style::Scalar(ScalarStyle::DoubleQuoted),
            (NodeKind::Scalar, "literal") => Style::Scalar(ScalarStyle::Literal),
            (NodeKind::Scalar, "folded") => Style::Scalar(ScalarStyle::Folded),
            (NodeKind::Stream, "any") => Style::Stream(StreamEncoding::Any),
            (NodeKind::Stream, "utf8") => Style::Stream(StreamEncoding::Utf8),
            (NodeKind::Stream, "utf16le") => Style::Stream(StreamEncoding::Utf16Le),
            (NodeKind::Stream, "utf16be") => Style::Stream(StreamEncoding::Utf16Be),
            _ => Style::Unsupported,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Style::Unsupported)
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Stream(_) => NodeKind::Stream,
            Node::Document(_) => NodeKind::Document,
            Node::Mapping(_) => NodeKind::Mapping,
            Node::Sequence(_) => NodeKind::Sequence,
            Node::Scalar(_) => NodeKind::Scalar,
            Node::Alias(_) => NodeKind::Alias,
        }
    }

    /// Whether this node is of any of the named kinds (see [`NodeKind::from_name`]).
    /// Unknown names never match.
    pub fn node_of(&self, names: &[&str]) -> bool {
        names
            .iter()
            .filter_map(|name| NodeKind::from_name(name))
            .any(|kind| kind == self.kind())
    }

    pub fn is_container(&self) -> bool {
        self.children_ref().is_some()
    }

    /// The name used in hierarchy traces: the text of a scalar, `*anchor`
    /// for an alias, otherwise the kind name.
    pub fn display_name(&self) -> String {
        match self {
            Node::Scalar(scalar) => scalar.value.clone(),
            Node::Alias(alias) => format!("*{}", alias.anchor),
            other => other.kind().name().to_string(),
        }
    }

    pub fn anchor(&self) -> Option<&str> {
        match self {
            Node::Mapping(m) => m.anchor.as_deref(),
            Node::Sequence(s) => s.anchor.as_deref(),
            Node::Scalar(s) => s.anchor.as_deref(),
            Node::Alias(a) => Some(&a.anchor),
            Node::Stream(_) | Node::Document(_) => None,
        }
    }

    /// Set the anchor of a mapping, sequence or scalar. Returns false for
    /// kinds that cannot carry an anchor.
    pub fn set_anchor(&mut self, anchor: Option<String>) -> bool {
        match self {
            Node::Mapping(m) => m.anchor = anchor,
            Node::Sequence(s) => s.anchor = anchor,
            Node::Scalar(s) => s.anchor = anchor,
            _ => return false,
        }
        true
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Mapping(m) => m.tag.as_deref(),
            Node::Sequence(s) => s.tag.as_deref(),
            Node::Scalar(s) => s.tag.as_deref(),
            _ => None,
        }
    }

    /// Set the tag of a mapping, sequence or scalar. Returns false for kinds
    /// that cannot carry a tag.
    pub fn set_tag(&mut self, tag: Option<String>) -> bool {
        let explicit = tag.is_some();
        match self {
            Node::Mapping(m) => {
                m.tag = tag;
                m.implicit = !explicit;
            }
            Node::Sequence(s) => {
                s.tag = tag;
                s.implicit = !explicit;
            }
            Node::Scalar(s) => {
                s.tag = tag;
                s.plain = !explicit;
                s.quoted = !explicit;
            }
            _ => return false,
        }
        true
    }

    /// Apply a style constant if it belongs to this node's kind.
    pub fn apply_style(&mut self, style: Style) -> bool {
        match (self, style) {
            (Node::Mapping(m), Style::Mapping(s)) => m.style = s,
            (Node::Sequence(q), Style::Sequence(s)) => q.style = s,
            (Node::Scalar(c), Style::Scalar(s)) => c.style = s,
            (Node::Stream(t), Style::Stream(e)) => t.encoding = e,
            _ => return false,
        }
        true
    }

    pub fn mark(&self) -> Option<SourceMark> {
        match self {
            Node::Stream(_) => None,
            Node::Document(d) => d.mark,
            Node::Mapping(m) => m.mark,
            Node::Sequence(s) => s.mark,
            Node::Scalar(s) => s.mark,
            Node::Alias(a) => a.mark,
        }
    }

    /// Children of a container; empty for scalars and aliases.
    pub fn children(&self) -> &[Node] {
        self.children_ref().map(Vec::as_slice).unwrap_or(&[])
    }

    fn children_ref(&self) -> Option<&Vec<Node>> {
        match self {
            Node::Stream(s) => Some(&s.children),
            Node::Document(d) => Some(&d.children),
            Node::Mapping(m) => Some(&m.children),
            Node::Sequence(s) => Some(&s.children),
            Node::Scalar(_) | Node::Alias(_) => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Stream(s) => Some(&mut s.children),
            Node::Document(d) => Some(&mut d.children),
            Node::Mapping(m) => Some(&mut m.children),
            Node::Sequence(s) => Some(&mut s.children),
            Node::Scalar(_) | Node::Alias(_) => None,
        }
    }

    /// A copy of this node without its children.
    pub fn shallow_clone(&self) -> Node {
        match self {
            Node::Stream(s) => Node::Stream(Stream {
                encoding: s.encoding,
                children: Vec::new(),
            }),
            Node::Document(d) => Node::Document(Document {
                version: d.version,
                tag_directives: d.tag_directives.clone(),
                implicit: d.implicit,
                implicit_end: d.implicit_end,
                children: Vec::new(),
                mark: d.mark,
            }),
            Node::Mapping(m) => Node::Mapping(Mapping {
                anchor: m.anchor.clone(),
                tag: m.tag.clone(),
                implicit: m.implicit,
                style: m.style,
                children: Vec::new(),
                mark: m.mark,
            }),
            Node::Sequence(s) => Node::Sequence(Sequence {
                anchor: s.anchor.clone(),
                tag: s.tag.clone(),
                implicit: s.implicit,
                style: s.style,
                children: Vec::new(),
                mark: s.mark,
            }),
            Node::Scalar(s) => Node::Scalar(s.clone()),
            Node::Alias(a) => Node::Alias(a.clone()),
        }
    }

    /// Follow child indices down from this node.
    pub fn descendant_mut(&mut self, path: &[usize]) -> Option<&mut Node> {
        let mut node = self;
        for &index in path {
            node = node.children_mut()?.get_mut(index)?;
        }
        Some(node)
    }

    pub fn as_stream(&self) -> Option<&Stream> {
        match self {
            Node::Stream(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Node::Document(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Node::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_alias(&self) -> Option<&Alias> {
        match self {
            Node::Alias(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_scalar_mut(&mut self) -> Option<&mut Scalar> {
        match self {
            Node::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Node::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence_mut(&mut self) -> Option<&mut Sequence> {
        match self {
            Node::Sequence(s) => Some(s),
            _ => None,
        }
    }
}
