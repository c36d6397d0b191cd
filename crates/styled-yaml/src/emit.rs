//! Writing a node tree as YAML text.
//!
//! Every style field is honored where YAML can express it: a scalar whose
//! requested style cannot hold its text (or is not allowed where the scalar
//! sits, like a literal block inside a flow sequence) falls back to a
//! quoted form. Lines are never folded.

use crate::{
    Document, Mapping, MappingStyle, Node, Options, Scalar, ScalarStyle, Sequence, SequenceStyle,
};
use once_cell::sync::Lazy;
use regex::Regex;

const CORE_TAG_PREFIX: &str = "tag:yaml.org,2002:";

/// Plain text that a YAML 1.1 loader would read as something other than a
/// string: null, booleans, numbers, dates, merge and value keys.
static NON_STRING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:~|null|Null|NULL|y|Y|yes|Yes|YES|n|N|no|No|NO|true|True|TRUE|false|False|FALSE",
        r"|on|On|ON|off|Off|OFF|=|<<)$",
        r"|^[-+]?(?:0|[1-9][0-9_]*)$",
        r"|^[-+]?0b[01_]+$",
        r"|^[-+]?0o?[0-7_]+$",
        r"|^[-+]?0x[0-9a-fA-F_]+$",
        r"|^[-+]?[1-9][0-9_]*(?::[0-5]?[0-9])+(?:\.[0-9_]*)?$",
        r"|^[-+]?(?:[0-9][0-9_]*)?\.[0-9_]*(?:[eE][-+]?[0-9]+)?$",
        r"|^[-+]?[0-9][0-9_]*(?:\.[0-9_]*)?[eE][-+]?[0-9]+$",
        r"|^[-+]?\.(?:inf|Inf|INF)$",
        r"|^\.(?:nan|NaN|NAN)$",
        r"|^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}",
    ))
    .unwrap()
});

/// Serialize a stream, a document or a bare node.
///
/// # Example
///
/// ```rust
/// use styled_yaml::{emit, parse_tree, Options};
///
/// let tree = parse_tree("a: [1, 2]\nb: {c: d}\n", &mut [], &Options::default()).unwrap();
/// assert_eq!(emit(&tree, &Options::default()), "a: [1, 2]\nb: {c: d}\n");
/// ```
pub fn emit(node: &Node, options: &Options) -> String {
    let mut emitter = Emitter {
        out: String::new(),
        step: options.indent(),
    };
    match node {
        Node::Stream(stream) => {
            for (index, child) in stream.children.iter().enumerate() {
                match child {
                    Node::Document(document) => emitter.document(document, index == 0),
                    other => emitter.block_value(other, 0, Slot::Root { header: index > 0 }),
                }
            }
        }
        Node::Document(document) => emitter.document(document, true),
        other => emitter.block_value(other, 0, Slot::Root { header: false }),
    }
    emitter.out
}

/// What the current line holds when a block value is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// Document root: nothing, or the `---` marker.
    Root { header: bool },
    /// `key:`
    Value,
    /// `-`
    Item,
}

/// A scalar rendered in one line, or as a block scalar header plus lines.
enum Rendered {
    Inline(String),
    Block { header: String, lines: Vec<String> },
}

struct Emitter {
    out: String,
    step: usize,
}

impl Emitter {
    fn document(&mut self, document: &Document, first: bool) {
        let mut explicit = !(document.implicit && first);
        if let Some((major, minor)) = document.version {
            self.out.push_str(&format!("%YAML {major}.{minor}\n"));
            explicit = true;
        }
        for directive in &document.tag_directives {
            self.out
                .push_str(&format!("%TAG {} {}\n", directive.handle, directive.prefix));
            explicit = true;
        }

        if explicit {
            self.out.push_str("---");
        }
        match document.root() {
            Some(root) => self.block_value(root, 0, Slot::Root { header: explicit }),
            None if explicit => self.out.push('\n'),
            None => {}
        }
        if !document.implicit_end {
            self.out.push_str("...\n");
        }
    }

    fn pad(&mut self, width: usize) {
        self.out.extend(std::iter::repeat_n(' ', width));
    }

    /// Continue the current line with `text`.
    fn lead(&mut self, slot: Slot, text: &str) {
        if text.is_empty() {
            return;
        }
        if slot != (Slot::Root { header: false }) {
            self.out.push(' ');
        }
        self.out.push_str(text);
    }

    /// Finish the line holding a block collection's properties.
    fn open_block(&mut self, slot: Slot, properties: &str) {
        self.lead(slot, properties);
        if slot != (Slot::Root { header: false }) || !properties.is_empty() {
            self.out.push('\n');
        }
    }

    fn block_value(&mut self, node: &Node, indent: usize, slot: Slot) {
        match node {
            Node::Mapping(mapping)
                if mapping.style != MappingStyle::Flow && !mapping.children.is_empty() =>
            {
                let properties = collection_properties(
                    mapping.anchor.as_deref(),
                    mapping.tag.as_deref(),
                    mapping.implicit,
                );
                let child = match slot {
                    Slot::Root { .. } => 0,
                    Slot::Value | Slot::Item => indent + self.step,
                };
                if slot == Slot::Item && properties.is_empty() {
                    self.pad(self.step - 1);
                    self.block_mapping(mapping, child, true);
                } else {
                    self.open_block(slot, &properties);
                    self.block_mapping(mapping, child, false);
                }
            }
            Node::Sequence(sequence)
                if sequence.style != SequenceStyle::Flow && !sequence.children.is_empty() =>
            {
                let properties = collection_properties(
                    sequence.anchor.as_deref(),
                    sequence.tag.as_deref(),
                    sequence.implicit,
                );
                let child = match slot {
                    Slot::Root { .. } => 0,
                    Slot::Value => indent,
                    Slot::Item => indent + self.step,
                };
                if slot == Slot::Item && properties.is_empty() {
                    self.pad(self.step - 1);
                    self.block_sequence(sequence, child, true);
                } else {
                    self.open_block(slot, &properties);
                    self.block_sequence(sequence, child, false);
                }
            }
            Node::Scalar(scalar) => self.block_scalar(scalar, indent, slot),
            other => {
                let text = self.flow_text(other);
                self.lead(slot, &text);
                self.out.push('\n');
            }
        }
    }

    fn block_mapping(&mut self, mapping: &Mapping, indent: usize, first_inline: bool) {
        for (index, (key, value)) in mapping.entries().enumerate() {
            if index > 0 || !first_inline {
                self.pad(indent);
            }
            let key = self.key_text(key);
            self.out.push_str(&key);
            self.out.push(':');
            self.block_value(value, indent, Slot::Value);
        }
    }

    fn block_sequence(&mut self, sequence: &Sequence, indent: usize, first_inline: bool) {
        for (index, item) in sequence.children.iter().enumerate() {
            if index > 0 || !first_inline {
                self.pad(indent);
            }
            self.out.push('-');
            self.block_value(item, indent, Slot::Item);
        }
    }

    fn block_scalar(&mut self, scalar: &Scalar, indent: usize, slot: Slot) {
        let style = choose_style(scalar, false, false);
        let properties = scalar_properties(scalar, style);
        match self.render(scalar, style, false, false) {
            Rendered::Inline(text) => {
                self.lead(slot, &join(&properties, &text));
                self.out.push('\n');
            }
            Rendered::Block { header, lines } => {
                self.lead(slot, &join(&properties, &header));
                self.out.push('\n');
                for line in lines {
                    if !line.is_empty() {
                        self.pad(indent + self.step);
                        self.out.push_str(&line);
                    }
                    self.out.push('\n');
                }
            }
        }
    }

    /// A node in flow form, on one line.
    fn flow_text(&self, node: &Node) -> String {
        match node {
            Node::Scalar(scalar) => self.inline_scalar(scalar, true, false),
            Node::Alias(alias) => format!("*{}", alias.anchor),
            Node::Mapping(mapping) => {
                let entries: Vec<String> = mapping
                    .entries()
                    .map(|(key, value)| {
                        format!("{}: {}", self.flow_key_text(key), self.flow_text(value))
                    })
                    .collect();
                let properties = collection_properties(
                    mapping.anchor.as_deref(),
                    mapping.tag.as_deref(),
                    mapping.implicit,
                );
                join(&properties, &format!("{{{}}}", entries.join(", ")))
            }
            Node::Sequence(sequence) => {
                let items: Vec<String> =
                    sequence.children.iter().map(|item| self.flow_text(item)).collect();
                let properties = collection_properties(
                    sequence.anchor.as_deref(),
                    sequence.tag.as_deref(),
                    sequence.implicit,
                );
                join(&properties, &format!("[{}]", items.join(", ")))
            }
            Node::Stream(_) | Node::Document(_) => String::new(),
        }
    }

    /// A block mapping key. Collections are written in flow form.
    fn key_text(&self, key: &Node) -> String {
        match key {
            Node::Scalar(scalar) => self.inline_scalar(scalar, false, true),
            Node::Alias(alias) => format!("*{} ", alias.anchor),
            other => self.flow_text(other),
        }
    }

    fn flow_key_text(&self, key: &Node) -> String {
        match key {
            Node::Scalar(scalar) => self.inline_scalar(scalar, true, true),
            Node::Alias(alias) => format!("*{} ", alias.anchor),
            other => self.flow_text(other),
        }
    }

    fn inline_scalar(&self, scalar: &Scalar, flow: bool, key: bool) -> String {
        let style = choose_style(scalar, flow, key);
        let properties = scalar_properties(scalar, style);
        match self.render(scalar, style, flow, key) {
            Rendered::Inline(text) => join(&properties, &text),
            // Block styles are never chosen in flow or key position.
            Rendered::Block { .. } => join(&properties, &double_quoted(&scalar.value)),
        }
    }

    fn render(&self, scalar: &Scalar, style: ScalarStyle, flow: bool, key: bool) -> Rendered {
        let value = scalar.value.as_str();
        match style {
            ScalarStyle::Plain if value.is_empty() && (flow || key) => Rendered::Inline("~".into()),
            ScalarStyle::Plain | ScalarStyle::Any => Rendered::Inline(value.to_string()),
            ScalarStyle::SingleQuoted => Rendered::Inline(format!("'{}'", value.replace('\'', "''"))),
            ScalarStyle::DoubleQuoted => Rendered::Inline(double_quoted(value)),
            ScalarStyle::Literal => self.block(value, '|', false),
            ScalarStyle::Folded => self.block(value, '>', true),
        }
    }

    fn block(&self, value: &str, indicator: char, folded: bool) -> Rendered {
        let body = value.trim_end_matches('\n');
        let trailing = value.len() - body.len();
        let chomping = match trailing {
            0 => "-",
            1 => "",
            _ => "+",
        };
        let mut header = indicator.to_string();
        if body.starts_with(' ') {
            header.push_str(&self.step.to_string());
        }
        header.push_str(chomping);

        let mut lines = Vec::new();
        let mut previous: Option<&str> = None;
        for line in body.split('\n') {
            // A single line break between two text lines would fold into a
            // space; an empty line keeps it.
            if folded && previous.is_some_and(|p| !p.is_empty()) {
                lines.push(String::new());
            }
            lines.push(line.to_string());
            previous = Some(line);
        }
        lines.extend(std::iter::repeat_n(String::new(), trailing.saturating_sub(1)));
        Rendered::Block { header, lines }
    }
}

fn join(properties: &str, text: &str) -> String {
    match (properties.is_empty(), text.is_empty()) {
        (true, _) => text.to_string(),
        (false, true) => properties.to_string(),
        (false, false) => format!("{properties} {text}"),
    }
}

fn tag_text(tag: &str) -> String {
    if let Some(suffix) = tag.strip_prefix(CORE_TAG_PREFIX) {
        format!("!!{suffix}")
    } else if tag.starts_with('!') {
        tag.to_string()
    } else {
        format!("!<{tag}>")
    }
}

fn collection_properties(anchor: Option<&str>, tag: Option<&str>, implicit: bool) -> String {
    let tag = tag.filter(|_| !implicit);
    properties(anchor, tag)
}

fn scalar_properties(scalar: &Scalar, style: ScalarStyle) -> String {
    let implicit = match style {
        ScalarStyle::Plain | ScalarStyle::Any => scalar.plain,
        _ => scalar.quoted,
    };
    properties(scalar.anchor.as_deref(), scalar.tag.as_deref().filter(|_| !implicit))
}

fn properties(anchor: Option<&str>, tag: Option<&str>) -> String {
    let mut parts = Vec::new();
    if let Some(anchor) = anchor {
        parts.push(format!("&{anchor}"));
    }
    if let Some(tag) = tag {
        parts.push(tag_text(tag));
    }
    parts.join(" ")
}

/// The style a scalar is written in: the requested one when it can hold
/// the text in this position, otherwise the simplest one that can.
fn choose_style(scalar: &Scalar, flow: bool, key: bool) -> ScalarStyle {
    let value = scalar.value.as_str();
    let in_block = !flow && !key;
    match scalar.style {
        ScalarStyle::Plain if value.is_empty() || plain_allowed(value, flow, key) => {
            return ScalarStyle::Plain;
        }
        ScalarStyle::Any
            if plain_allowed(value, flow, key)
                && (scalar.tag.is_some() || !NON_STRING.is_match(value)) =>
        {
            return ScalarStyle::Plain;
        }
        ScalarStyle::Literal if in_block && block_allowed(value) => return ScalarStyle::Literal,
        ScalarStyle::Folded if in_block && block_allowed(value) => {
            // Folding does not apply to more-indented lines.
            if value.split('\n').any(|line| line.starts_with([' ', '\t'])) {
                return ScalarStyle::Literal;
            }
            return ScalarStyle::Folded;
        }
        ScalarStyle::Any if in_block && value.contains('\n') && block_allowed(value) => {
            return ScalarStyle::Literal;
        }
        ScalarStyle::SingleQuoted if single_allowed(value) => return ScalarStyle::SingleQuoted,
        ScalarStyle::DoubleQuoted => return ScalarStyle::DoubleQuoted,
        _ => {}
    }
    if single_allowed(value) {
        ScalarStyle::SingleQuoted
    } else {
        ScalarStyle::DoubleQuoted
    }
}

fn is_printable(c: char) -> bool {
    !c.is_control() && c != '\u{feff}'
}

fn plain_allowed(value: &str, flow: bool, key: bool) -> bool {
    let mut chars = value.chars();
    let (Some(first), Some(last)) = (chars.next(), value.chars().last()) else {
        return false;
    };
    if first.is_whitespace() || last.is_whitespace() || last == ':' {
        return false;
    }
    if value.starts_with("---") || value.starts_with("...") {
        return false;
    }
    if !value.chars().all(is_printable) {
        return false;
    }
    if "#,[]{}&*!|>'\"%@`".contains(first) {
        return false;
    }
    if "-?:".contains(first) {
        match chars.next() {
            None | Some(' ') => return false,
            Some(c) if flow && ",[]{}".contains(c) => return false,
            _ => {}
        }
    }
    if value.contains(": ") || value.contains(" #") {
        return false;
    }
    if flow && value.contains([',', '[', ']', '{', '}', ':']) {
        return false;
    }
    !(key && value.len() > 1024)
}

fn single_allowed(value: &str) -> bool {
    value.chars().all(|c| c == '\t' || is_printable(c))
}

fn block_allowed(value: &str) -> bool {
    let body = value.trim_end_matches('\n');
    !body.is_empty()
        && body.chars().all(|c| c == '\n' || c == '\t' || is_printable(c))
        && body
            .split('\n')
            .all(|line| line.is_empty() || !line.trim().is_empty())
}

fn double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c if !is_printable(c) && (c as u32) < 0x100 => {
                out.push_str(&format!("\\x{:02X}", c as u32));
            }
            c if !is_printable(c) => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
