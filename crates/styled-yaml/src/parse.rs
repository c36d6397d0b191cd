//! Parsing YAML text into a styled node tree.
//!
//! The scanner's events drive any [`TreeBuilder`]; with a
//! [`StyledTreeBuilder`] in between, stylers restyle the parsed nodes before
//! they are emitted again.

use crate::builder::{DocumentStreamBuilder, NodeTreeBuilder, TreeBuilder};
use crate::{
    Alias, Document, Error, Mapping, MappingStyle, Node, Options, Result, Scalar, ScalarStyle,
    Sequence, SequenceStyle, SourceMark, Stream, StreamEncoding, StyledTreeBuilder, Styler,
};
use std::path::Path;
use tracing::debug;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser, Tag};
use yaml_rust2::scanner::{Marker, TScalarStyle};

/// Feed every event of `yaml` (all documents) into `builder`.
///
/// # Errors
///
/// Returns [`Error::Scan`] for malformed input. Events before the error
/// have already reached the builder.
pub fn build_from_str<B>(yaml: &str, builder: &mut B) -> Result<()>
where
    B: TreeBuilder + ?Sized,
{
    let mut driver = EventDriver {
        builder,
        source: yaml.chars().collect(),
        pending: None,
    };
    let mut parser = Parser::new_from_str(yaml);
    parser.load(&mut driver, true)?;
    Ok(())
}

/// Parse a whole stream, styling every node as it is built.
///
/// # Example
///
/// ```rust
/// use styled_yaml::{parse_tree, Options};
///
/// let tree = parse_tree("a: 1\n---\nb: 2\n", &mut [], &Options::default()).unwrap();
/// assert_eq!(tree.children().len(), 2);
/// ```
///
/// # Errors
///
/// Returns [`Error::Scan`] if the YAML is malformed.
pub fn parse_tree(yaml: &str, stylers: &mut [&mut dyn Styler], options: &Options) -> Result<Node> {
    debug!(len = yaml.len(), stylers = stylers.len(), "parsing YAML stream");
    let mut builder = StyledTreeBuilder::from_parts(NodeTreeBuilder::new(), stylers, options);
    build_from_str(yaml, &mut builder)?;

    Ok(builder
        .into_inner()
        .into_root()
        .unwrap_or_else(|| Node::Stream(Stream::new(StreamEncoding::Utf8))))
}

/// Parse the first document of `yaml`, styling it as it is built.
/// Returns `None` when the input has no document at all.
///
/// # Errors
///
/// Returns [`Error::Scan`] if the YAML is malformed.
pub fn parse(
    yaml: &str,
    stylers: &mut [&mut dyn Styler],
    options: &Options,
) -> Result<Option<Document>> {
    let Node::Stream(stream) = parse_tree(yaml, stylers, options)? else {
        return Ok(None);
    };
    Ok(stream.children.into_iter().find_map(|node| match node {
        Node::Document(document) => Some(document),
        _ => None,
    }))
}

/// Parse a stream and hand each styled document to `on_document` as soon
/// as it ends, without keeping earlier documents around.
///
/// # Errors
///
/// Returns [`Error::Scan`] if the YAML is malformed; documents completed
/// before the error have already been handed out.
pub fn parse_stream<F>(
    yaml: &str,
    stylers: &mut [&mut dyn Styler],
    options: &Options,
    on_document: F,
) -> Result<()>
where
    F: FnMut(Document),
{
    debug!(len = yaml.len(), "parsing YAML stream document by document");
    let inner = DocumentStreamBuilder::new(on_document);
    let mut builder = StyledTreeBuilder::from_parts(inner, stylers, options);
    build_from_str(yaml, &mut builder)
}

/// Read and parse the first document of a file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Scan`] if
/// it is not valid YAML.
pub fn parse_file(
    path: impl AsRef<Path>,
    stylers: &mut [&mut dyn Styler],
    options: &Options,
) -> Result<Option<Document>> {
    let path = path.as_ref();
    let yaml = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&yaml, stylers, options)
}

/// Turns scanner events into tree-builder calls.
struct EventDriver<'b, B: ?Sized> {
    builder: &'b mut B,
    /// The input as characters; markers count characters, not bytes.
    source: Vec<char>,
    /// A collection start held back until the next event shows its style.
    pending: Option<(Event, Marker)>,
}

impl<B: TreeBuilder + ?Sized> EventDriver<'_, B> {
    fn starts_with(&self, index: usize, text: &str) -> bool {
        let mut chars = self.source.iter().skip(index);
        text.chars().all(|c| chars.next() == Some(&c))
    }

    /// Whether the collection starting at `index` is written in flow style.
    /// The marker may point at an anchor or tag in front of the bracket.
    fn is_flow_collection(&self, index: usize) -> bool {
        let mut i = index;
        while let Some(&c) = self.source.get(i) {
            match c {
                '&' | '!' => {
                    while self.source.get(i).is_some_and(|c| !c.is_whitespace()) {
                        i += 1;
                    }
                }
                c if c.is_whitespace() => i += 1,
                '[' | '{' => return true,
                _ => return false,
            }
        }
        false
    }

    fn start_collection(&mut self, start: Event, marker: Marker, flow: bool) {
        let mark = Some(SourceMark::from_marker(&marker));
        match start {
            Event::MappingStart(anchor_id, tag) => {
                let style = if flow {
                    MappingStyle::Flow
                } else {
                    MappingStyle::Block
                };
                let mut mapping = Mapping::new().with_style(style);
                mapping.anchor = anchor_name(anchor_id);
                if let Some(tag) = tag_name(tag) {
                    mapping = mapping.with_tag(tag);
                }
                mapping.mark = mark;
                self.builder.start_mapping(mapping);
            }
            Event::SequenceStart(anchor_id, tag) => {
                let style = if flow {
                    SequenceStyle::Flow
                } else {
                    SequenceStyle::Block
                };
                let mut sequence = Sequence::new().with_style(style);
                sequence.anchor = anchor_name(anchor_id);
                if let Some(tag) = tag_name(tag) {
                    sequence = sequence.with_tag(tag);
                }
                sequence.mark = mark;
                self.builder.start_sequence(sequence);
            }
            _ => unreachable!("only collection starts are held back"),
        }
    }
}

fn anchor_name(anchor_id: usize) -> Option<String> {
    (anchor_id > 0).then(|| anchor_id.to_string())
}

fn tag_name(tag: Option<Tag>) -> Option<String> {
    tag.map(|tag| format!("{}{}", tag.handle, tag.suffix))
}

fn scalar_style(style: TScalarStyle) -> ScalarStyle {
    match style {
        TScalarStyle::Plain => ScalarStyle::Plain,
        TScalarStyle::SingleQuoted => ScalarStyle::SingleQuoted,
        TScalarStyle::DoubleQuoted => ScalarStyle::DoubleQuoted,
        TScalarStyle::Literal => ScalarStyle::Literal,
        _ => ScalarStyle::Folded,
    }
}

impl<B: TreeBuilder + ?Sized> MarkedEventReceiver for EventDriver<'_, B> {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        if let Some((start, start_marker)) = self.pending.take() {
            // A block collection whose first entry is a flow collection
            // starts at that entry's bracket, like the entry itself does.
            let flow = self.is_flow_collection(start_marker.index())
                && marker.index() != start_marker.index();
            self.start_collection(start, start_marker, flow);
        }

        let mark = Some(SourceMark::from_marker(&marker));
        match ev {
            Event::StreamStart => {
                self.builder.start_stream(Stream::new(StreamEncoding::Utf8));
            }
            Event::StreamEnd => self.builder.end_stream(),

            Event::DocumentStart => {
                let document = Document {
                    implicit: !self.starts_with(marker.index(), "---"),
                    mark,
                    ..Document::new()
                };
                self.builder.start_document(document);
            }
            Event::DocumentEnd => {
                let implicit_end = !self.starts_with(marker.index(), "...");
                self.builder.end_document(implicit_end);
            }

            Event::MappingStart(..) | Event::SequenceStart(..) => {
                self.pending = Some((ev, marker));
            }
            Event::MappingEnd => self.builder.end_mapping(),
            Event::SequenceEnd => self.builder.end_sequence(),

            Event::Scalar(value, style, anchor_id, tag) => {
                let mut scalar = Scalar::new(value).with_style(scalar_style(style));
                scalar.anchor = anchor_name(anchor_id);
                if let Some(tag) = tag_name(tag) {
                    scalar = scalar.with_tag(tag);
                }
                scalar.mark = mark;
                self.builder.scalar(scalar);
            }
            Event::Alias(anchor_id) => {
                let alias = Alias {
                    anchor: anchor_id.to_string(),
                    mark,
                };
                self.builder.alias(alias);
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(yaml: &str) -> Node {
        parse_tree(yaml, &mut [], &Options::default()).unwrap()
    }

    fn first_root(yaml: &str) -> Node {
        parse(yaml, &mut [], &Options::default())
            .unwrap()
            .unwrap()
            .children
            .remove(0)
    }

    #[test]
    fn test_parse_scalar() {
        let root = first_root("hello");
        let scalar = root.as_scalar().unwrap();
        assert_eq!(scalar.value, "hello");
        assert_eq!(scalar.style, ScalarStyle::Plain);
        assert!(scalar.tag.is_none());
    }

    #[test]
    fn test_parse_quoted_styles() {
        let root = first_root("- 'single'\n- \"double\"\n- |\n  literal\n");
        let styles: Vec<_> = root
            .children()
            .iter()
            .map(|n| n.as_scalar().unwrap().style)
            .collect();
        assert_eq!(
            styles,
            [
                ScalarStyle::SingleQuoted,
                ScalarStyle::DoubleQuoted,
                ScalarStyle::Literal
            ]
        );
        assert_eq!(root.children()[2].as_scalar().unwrap().value, "literal\n");
    }

    #[test]
    fn test_parse_hash() {
        let root = first_root("title: My Document\nauthor: John Doe");
        let mapping = root.as_mapping().unwrap();
        assert_eq!(mapping.style, MappingStyle::Block);
        assert_eq!(
            mapping.get("author").and_then(Node::as_scalar).unwrap().value,
            "John Doe"
        );
    }

    #[test]
    fn test_collection_styles_are_recovered() {
        let root = first_root("outer:\n  flow: [1, 2]\n  map: &m {a: b}\n  block:\n    - x\n");
        let outer = root.as_mapping().unwrap().get("outer").unwrap().as_mapping().unwrap();
        assert_eq!(outer.style, MappingStyle::Block);
        assert_eq!(
            outer.get("flow").unwrap().as_sequence().unwrap().style,
            SequenceStyle::Flow
        );
        let map = outer.get("map").unwrap().as_mapping().unwrap();
        assert_eq!(map.style, MappingStyle::Flow);
        assert!(map.anchor.is_some());
        assert_eq!(
            outer.get("block").unwrap().as_sequence().unwrap().style,
            SequenceStyle::Block
        );
    }

    #[test]
    fn test_block_sequence_of_flow_collections_stays_block() {
        let root = first_root("a:\n- {b: c}\n- [d]\n");
        let items = root.as_mapping().unwrap().get("a").unwrap();
        assert_eq!(items.as_sequence().unwrap().style, SequenceStyle::Block);
        assert_eq!(items.children()[0].as_mapping().unwrap().style, MappingStyle::Flow);
        assert_eq!(items.children()[1].as_sequence().unwrap().style, SequenceStyle::Flow);

        let root = first_root("x:\n- [1]\n- 2\n");
        let items = root.as_mapping().unwrap().get("x").unwrap();
        assert_eq!(items.as_sequence().unwrap().style, SequenceStyle::Block);
        assert_eq!(items.children()[0].as_sequence().unwrap().style, SequenceStyle::Flow);

        let root = first_root("- - [1]\n");
        assert_eq!(root.as_sequence().unwrap().style, SequenceStyle::Block);
        let inner = &root.children()[0];
        assert_eq!(inner.as_sequence().unwrap().style, SequenceStyle::Block);
        assert_eq!(inner.children()[0].as_sequence().unwrap().style, SequenceStyle::Flow);
    }

    #[test]
    fn test_empty_flow_collections() {
        let root = first_root("a: []\nb: {}\n");
        let mapping = root.as_mapping().unwrap();
        assert_eq!(mapping.get("a").unwrap().as_sequence().unwrap().style, SequenceStyle::Flow);
        assert_eq!(mapping.get("b").unwrap().as_mapping().unwrap().style, MappingStyle::Flow);
    }

    #[test]
    fn test_tags_anchors_and_aliases() {
        let root = first_root("a: &x !!str 1\nb: *x\nc: !custom {k: v}\n");
        let mapping = root.as_mapping().unwrap();
        let a = mapping.get("a").unwrap().as_scalar().unwrap();
        assert_eq!(a.tag.as_deref(), Some("tag:yaml.org,2002:str"));
        assert!(!a.plain);
        let anchor = a.anchor.clone().unwrap();

        let b = mapping.get("b").unwrap().as_alias().unwrap();
        assert_eq!(b.anchor, anchor);

        let c = mapping.get("c").unwrap().as_mapping().unwrap();
        assert_eq!(c.tag.as_deref(), Some("!custom"));
        assert!(!c.implicit);
    }

    #[test]
    fn test_documents_and_markers() {
        let root = tree("a: 1\n---\nb: 2\n...\n");
        let docs: Vec<_> = root.as_stream().unwrap().documents().collect();
        assert_eq!(docs.len(), 2);
        assert!(docs[0].implicit);
        assert!(docs[0].implicit_end);
        assert!(!docs[1].implicit);
        assert!(!docs[1].implicit_end);
        assert_eq!(docs[1].mark.unwrap().line, 2);
    }

    #[test]
    fn test_empty_input_has_no_document() {
        assert!(parse("", &mut [], &Options::default()).unwrap().is_none());
        assert!(tree("").children().is_empty());
    }

    #[test]
    fn test_scan_error_propagates() {
        let err = parse("key: [unclosed", &mut [], &Options::default()).unwrap_err();
        assert!(matches!(err, Error::Scan(_)));
        assert!(err.location().is_some());
    }

    #[test]
    fn test_parse_stream_hands_out_each_document() {
        let mut roots = Vec::new();
        parse_stream("- 1\n--- two\n", &mut [], &Options::default(), |doc| {
            roots.push(doc.children[0].kind())
        })
        .unwrap();
        assert_eq!(roots, [crate::NodeKind::Sequence, crate::NodeKind::Scalar]);
    }

    #[test]
    fn test_marks_are_one_based() {
        let root = first_root("key: value");
        let value = &root.children()[1];
        let mark = value.mark().unwrap();
        assert_eq!((mark.line, mark.col), (1, 6));

        let root = first_root("a: 1\nb:\n  - x\n");
        let mark = root.as_mapping().unwrap().get("b").unwrap().mark().unwrap();
        assert_eq!((mark.line, mark.col), (3, 3));
    }

    #[test]
    fn test_scan_error_location_matches_scanner() {
        let err = parse_tree("a: 1\nb: [1, 2\n", &mut [], &Options::default()).unwrap_err();
        let Error::Scan(scan) = &err else {
            panic!("expected a scan error");
        };
        let mark = err.location().unwrap();
        assert_eq!(mark.line, scan.marker().line());
        assert_eq!(mark.col, scan.marker().col() + 1);
    }

    #[test]
    fn test_parse_file_reports_missing_file() {
        let err = parse_file("/definitely/not/here.yaml", &mut [], &Options::default())
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
