//! Ready-made stylers.
//!
//! ```rust
//! use styled_yaml::stylers::{CapStyler, FlowStyler};
//! use styled_yaml::{dump, Options, Styler};
//! use std::collections::BTreeMap;
//!
//! let value = BTreeMap::from([("fried eggs", vec![vec!["over easy"]])]);
//! let mut cap = CapStyler::new();
//! let mut flow = FlowStyler::new(4);
//! let stylers: &mut [&mut dyn Styler] = &mut [&mut cap, &mut flow];
//! let yaml = dump(&value, stylers, &Options::default()).unwrap();
//! assert_eq!(yaml, "---\nFried Eggs:\n- [Over Easy]\n");
//! ```

use crate::{Mapping, MappingStyle, Node, Scalar, Sequence, SequenceStyle, Sniffer, Styler};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static DEFAULT_DELIM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s_\-]").unwrap());

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Like [`capitalize`], but a word whose first character is already upper
/// case (or has no case, like a digit) is kept as is, so `BBQ` stays `BBQ`.
pub fn cap_word(word: &str) -> String {
    match word.chars().next() {
        Some(first) if first.to_uppercase().eq(std::iter::once(first)) => word.to_string(),
        Some(_) => capitalize(word),
        None => String::new(),
    }
}

/// Capitalizes scalar text, each word or the whole text.
#[derive(Debug, Clone)]
pub struct CapStyler {
    /// Capitalize every word separated by the delimiter (default: true),
    /// otherwise only the start of the text.
    pub each_word: bool,
    /// Replacement written in place of every delimiter, if any.
    pub new_delim: Option<String>,
    delim: Regex,
}

impl Default for CapStyler {
    fn default() -> Self {
        Self {
            each_word: true,
            new_delim: None,
            delim: DEFAULT_DELIM.clone(),
        }
    }
}

impl CapStyler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capitalize only the start of the text.
    pub fn whole_text() -> Self {
        Self {
            each_word: false,
            ..Self::default()
        }
    }

    /// Split words on matches of `delim` instead of `[\s_\-]`.
    pub fn with_delim(mut self, delim: Regex) -> Self {
        self.delim = delim;
        self
    }

    /// Split words on the exact text `delim`.
    pub fn with_literal_delim(self, delim: &str) -> Self {
        let delim = Regex::new(&regex::escape(delim)).expect("an escaped literal is a valid pattern");
        self.with_delim(delim)
    }

    pub fn with_new_delim(mut self, new_delim: impl Into<String>) -> Self {
        self.new_delim = Some(new_delim.into());
        self
    }

    pub fn delim(&self) -> &Regex {
        &self.delim
    }

    pub fn capitalize(&self, text: &str) -> String {
        if !self.each_word {
            return cap_word(text);
        }

        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for delim in self.delim.find_iter(text).filter(|m| !m.is_empty()) {
            out.push_str(&cap_word(&text[last..delim.start()]));
            out.push_str(self.new_delim.as_deref().unwrap_or(delim.as_str()));
            last = delim.end();
        }
        out.push_str(&cap_word(&text[last..]));
        out
    }
}

impl Styler for CapStyler {
    fn style_scalar(&mut self, _sniffer: &Sniffer, scalar: &mut Scalar) {
        scalar.value = self.capitalize(&scalar.value);
    }
}

/// Sets the style of mappings at or below `min_level` (default: flow).
///
/// There is no maximum level: an ancestor in flow style puts its whole
/// subtree in flow style anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapFlowStyler {
    pub min_level: usize,
    pub new_style: MappingStyle,
}

impl MapFlowStyler {
    pub fn new(min_level: usize) -> Self {
        Self {
            min_level,
            new_style: MappingStyle::Flow,
        }
    }

    pub fn with_style(mut self, new_style: MappingStyle) -> Self {
        self.new_style = new_style;
        self
    }
}

impl Default for MapFlowStyler {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Styler for MapFlowStyler {
    fn style_mapping(&mut self, sniffer: &Sniffer, mapping: &mut Mapping) {
        if sniffer.level() >= self.min_level {
            mapping.style = self.new_style;
        }
    }
}

/// Sets the style of sequences at or below `min_level` (default: flow).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeqFlowStyler {
    pub min_level: usize,
    pub new_style: SequenceStyle,
}

impl SeqFlowStyler {
    pub fn new(min_level: usize) -> Self {
        Self {
            min_level,
            new_style: SequenceStyle::Flow,
        }
    }

    pub fn with_style(mut self, new_style: SequenceStyle) -> Self {
        self.new_style = new_style;
        self
    }
}

impl Default for SeqFlowStyler {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Styler for SeqFlowStyler {
    fn style_sequence(&mut self, sniffer: &Sniffer, sequence: &mut Sequence) {
        if sniffer.level() >= self.min_level {
            sequence.style = self.new_style;
        }
    }
}

/// [`MapFlowStyler`] and [`SeqFlowStyler`] with one threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlowStyler {
    pub mapping: MapFlowStyler,
    pub sequence: SeqFlowStyler,
}

impl FlowStyler {
    pub fn new(min_level: usize) -> Self {
        Self {
            mapping: MapFlowStyler::new(min_level),
            sequence: SeqFlowStyler::new(min_level),
        }
    }
}

impl Styler for FlowStyler {
    fn style_mapping(&mut self, sniffer: &Sniffer, mapping: &mut Mapping) {
        self.mapping.style_mapping(sniffer, mapping);
    }

    fn style_sequence(&mut self, sniffer: &Sniffer, sequence: &mut Sequence) {
        self.sequence.style_sequence(sniffer, sequence);
    }
}

/// Turns symbol-like scalars (`:name`) into plain text, capitalized unless
/// `cap` is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoSymStyler {
    pub cap: bool,
}

impl NoSymStyler {
    pub fn new(cap: bool) -> Self {
        Self { cap }
    }
}

impl Default for NoSymStyler {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Styler for NoSymStyler {
    fn style_scalar(&mut self, _sniffer: &Sniffer, scalar: &mut Scalar) {
        let Some(name) = scalar.value.strip_prefix(':') else {
            return;
        };
        scalar.value = if self.cap {
            capitalize(name)
        } else {
            name.to_string()
        };
    }
}

/// Removes the tag of every node that has one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTagStyler;

impl Styler for NoTagStyler {
    fn style(&mut self, _sniffer: &Sniffer, node: &mut Node) {
        node.set_tag(None);
    }
}

/// Writes one line per node with its level, position and parent, for
/// debugging stylers:
///
/// ```text
/// (1:1):Stream - <root:(0:0)>
/// (1:1):Document - <stream:(1:1)>
/// (1:1):Mapping - <doc:(1:1)>
///  (2:1):Burgers - <map:(1:1)>
/// ```
///
/// The verbose form writes the whole parent frame, with the type and
/// position of its next child.
#[derive(Debug, Clone, Default)]
pub struct HierarchyStyler<W = String> {
    out: W,
    pub verbose: bool,
}

impl HierarchyStyler<String> {
    pub fn new(verbose: bool) -> Self {
        Self {
            out: String::new(),
            verbose,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }
}

impl<W: fmt::Write> HierarchyStyler<W> {
    /// Write the trace to `out` instead of an internal buffer.
    pub fn with_writer(out: W, verbose: bool) -> Self {
        Self { out, verbose }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, sniffer: &Sniffer, node: &Node) -> fmt::Result {
        let indent = sniffer.level().saturating_sub(1);
        write!(
            self.out,
            "{:indent$}({}:{}):{} - ",
            "",
            sniffer.level(),
            sniffer.position(),
            node.display_name()
        )?;
        if let Some(parent) = sniffer.parent() {
            if self.verbose {
                write!(self.out, "{parent}")?;
            } else {
                write!(
                    self.out,
                    "<{}:({}:{})>",
                    parent.debug_tag(),
                    parent.level(),
                    parent.position()
                )?;
            }
        }
        writeln!(self.out)
    }
}

impl<W: fmt::Write> Styler for HierarchyStyler<W> {
    fn style(&mut self, sniffer: &Sniffer, node: &mut Node) {
        // A writer that refuses text only loses trace lines.
        let _ = self.write_line(sniffer, node);
    }
}

impl fmt::Display for HierarchyStyler<String> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.out)
    }
}
