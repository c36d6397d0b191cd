//! The convenience stylers on encoded values and parsed text.

mod common;

use regex::Regex;
use styled_yaml::encode::{Blueberry, Encode, Encoder};
use styled_yaml::stylers::{
    CapStyler, FlowStyler, MapFlowStyler, NoSymStyler, NoTagStyler, SeqFlowStyler,
};
use styled_yaml::{
    dump, emit, parse_tree, Mapping, MappingStyle, Options, Result, Sequence, SequenceStyle, Sniffer,
    Styler,
};

/// A tagged value with symbol-like keys that flows its own lists.
struct EggCarton {
    styles: Vec<&'static str>,
    colors: (Vec<&'static str>, Vec<&'static str>),
}

impl EggCarton {
    fn new() -> Self {
        Self {
            styles: vec!["omelette", "BBQ eggs", "hard-boiled eggs", "soft_boiled eggs", "fried@eggs"],
            colors: (vec!["brown", "white"], vec!["blue", "green"]),
        }
    }
}

struct Colors<'a>(&'a (Vec<&'static str>, Vec<&'static str>));

impl Encode for Colors<'_> {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        encoder.start_sequence(Sequence::new());
        for color in &self.0.0 {
            encoder.accept(color)?;
        }
        encoder.accept(&self.0.1)?;
        encoder.end_sequence();
        Ok(())
    }
}

struct Eggs<'a>(&'a EggCarton);

impl Encode for Eggs<'_> {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        encoder.start_mapping(Mapping::new());
        encoder.entry(":styles", &self.0.styles)?;
        encoder.entry(":colors", &Colors(&self.0.colors))?;
        encoder.end_mapping();
        Ok(())
    }
}

impl Encode for EggCarton {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        encoder.start_mapping(Mapping::new().with_tag("!egg_carton"));
        encoder.entry("eggs", &Eggs(self))?;
        encoder.end_mapping();
        Ok(())
    }

    fn as_blueberry(&self) -> Option<&dyn Blueberry> {
        Some(self)
    }
}

impl Blueberry for EggCarton {
    fn stylers(&self, _sniffer: &Sniffer) -> Vec<Box<dyn Styler>> {
        vec![Box::new(FlowStyler::new(4))]
    }
}

fn dump_carton(styler: &mut dyn Styler) -> String {
    dump(&EggCarton::new(), &mut [styler], &Options::default()).unwrap()
}

#[test]
fn test_cap_styler_whole_text() {
    let yaml = dump_carton(&mut CapStyler::whole_text());
    assert_eq!(
        yaml,
        "\
--- !egg_carton
Eggs:
  :styles: [Omelette, BBQ eggs, Hard-boiled eggs, Soft_boiled eggs, Fried@eggs]
  :colors: [Brown, White, [Blue, Green]]
"
    );
}

#[test]
fn test_cap_styler_each_word_with_new_delim() {
    let mut styler = CapStyler::new()
        .with_delim(Regex::new(r"[\s_\-@]").unwrap())
        .with_new_delim("+");
    assert_eq!(
        dump_carton(&mut styler),
        "\
--- !egg_carton
Eggs:
  :styles: [Omelette, BBQ+Eggs, Hard+Boiled+Eggs, Soft+Boiled+Eggs, Fried+Eggs]
  :colors: [Brown, White, [Blue, Green]]
"
    );
}

#[test]
fn test_no_sym_styler() {
    assert_eq!(
        dump_carton(&mut NoSymStyler::default()),
        "\
--- !egg_carton
eggs:
  Styles: [omelette, BBQ eggs, hard-boiled eggs, soft_boiled eggs, fried@eggs]
  Colors: [brown, white, [blue, green]]
"
    );
}

#[test]
fn test_no_tag_styler() {
    assert_eq!(
        dump_carton(&mut NoTagStyler),
        "\
---
eggs:
  :styles: [omelette, BBQ eggs, hard-boiled eggs, soft_boiled eggs, fried@eggs]
  :colors: [brown, white, [blue, green]]
"
    );
}

#[test]
fn test_no_tag_styler_on_parsed_text() {
    let mut styler = NoTagStyler;
    let tree = parse_tree("--- !set\n? a\n? b\n", &mut [&mut styler], &Options::default()).unwrap();
    assert_eq!(emit(&tree, &Options::default()), "---\na:\nb:\n");
}

#[test]
fn test_flow_stylers_on_parsed_text() {
    let mut flow = FlowStyler::new(4);
    let tree = parse_tree(common::BURGERS_YAML, &mut [&mut flow], &Options::default()).unwrap();
    assert_eq!(emit(&tree, &Options::default()), common::FLOWED_BURGERS);
}

#[test]
fn test_separate_thresholds() {
    let yaml = "a:\n  b: [1, [2]]\n  c:\n    d: e\n";
    let mut maps = MapFlowStyler::new(5);
    let mut seqs = SeqFlowStyler::new(3).with_style(SequenceStyle::Block);
    let tree = parse_tree(yaml, &mut [&mut maps, &mut seqs], &Options::default()).unwrap();
    assert_eq!(
        emit(&tree, &Options::default()),
        "a:\n  b:\n  - 1\n  - - 2\n  c: {d: e}\n"
    );
}

#[test]
fn test_block_style_undoes_flow() {
    let mut block = MapFlowStyler::new(0).with_style(MappingStyle::Block);
    let tree = parse_tree("{a: {b: c}}\n", &mut [&mut block], &Options::default()).unwrap();
    assert_eq!(emit(&tree, &Options::default()), "a:\n  b: c\n");
}
