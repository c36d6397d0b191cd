//! Values that bring stylers for their own subtree.

use std::cell::Cell;
use std::rc::Rc;
use styled_yaml::builder::NodeTreeBuilder;
use styled_yaml::encode::{Blueberry, Encode, Encoder};
use styled_yaml::{
    dump, Mapping, MappingStyle, Node, Options, Result, Scalar, ScalarStyle, Sequence,
    SequenceStyle, Sniffer, StyledTreeBuilder, Styler,
};
use yaml_rust2::YamlLoader;

enum Sauce {
    One(&'static str),
    Many(Vec<&'static str>),
}

impl Encode for Sauce {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        match self {
            Sauce::One(sauce) => encoder.accept(*sauce),
            Sauce::Many(sauces) => encoder.accept(sauces),
        }
    }
}

struct Burger {
    sauce: Sauce,
    cheese: &'static str,
    bun: &'static str,
}

impl Burger {
    fn new(sauce: Sauce, cheese: &'static str, bun: &'static str) -> Self {
        Self { sauce, cheese, bun }
    }
}

impl Encode for Burger {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        encoder.start_mapping(Mapping::new().with_tag("!burger"));
        encoder.entry("Bun", self.bun)?;
        encoder.entry("Cheese", self.cheese)?;
        encoder.entry("Sauce", &self.sauce)?;
        encoder.end_mapping();
        Ok(())
    }

    fn as_blueberry(&self) -> Option<&dyn Blueberry> {
        Some(self)
    }
}

impl Blueberry for Burger {
    fn stylers(&self, sniffer: &Sniffer) -> Vec<Box<dyn Styler>> {
        vec![Box::new(BurgerStyler {
            level: sniffer.level(),
        })]
    }
}

/// Quotes everything of one burger, flows its sauce list and flows the
/// whole burger when it is the BBQ one.
struct BurgerStyler {
    level: usize,
}

impl Styler for BurgerStyler {
    fn style(&mut self, _sniffer: &Sniffer, node: &mut Node) {
        node.set_tag(None);
    }

    fn style_mapping(&mut self, sniffer: &Sniffer, mapping: &mut Mapping) {
        let is_bbq = sniffer
            .parent()
            .and_then(|parent| parent.value())
            .is_some_and(|value| value.eq_ignore_ascii_case("bbq"));
        if is_bbq {
            mapping.style = MappingStyle::Flow;
        }
    }

    fn style_scalar(&mut self, _sniffer: &Sniffer, scalar: &mut Scalar) {
        scalar.style = ScalarStyle::SingleQuoted;
    }

    fn style_sequence(&mut self, sniffer: &Sniffer, sequence: &mut Sequence) {
        if sniffer.level() + 1 - self.level == 3 {
            sequence.style = SequenceStyle::Flow;
        }
    }
}

struct Burgers {
    burgers: Vec<(&'static str, Burger)>,
    toppings: yaml_rust2::Yaml,
}

impl Burgers {
    fn new() -> Self {
        let toppings = YamlLoader::load_from_str(
            "[Mushrooms, [Lettuce, Onions, Pickles, Tomatoes], [[Ketchup, Mustard], [Salt, Pepper]]]",
        )
        .unwrap()
        .remove(0);
        Self {
            burgers: vec![
                ("Classic", Burger::new(Sauce::Many(vec!["Ketchup", "Mustard"]), "American", "Sesame Seed")),
                ("BBQ", Burger::new(Sauce::One("Honey BBQ"), "Cheddar", "Kaiser")),
                ("Fancy", Burger::new(Sauce::One("Spicy Wasabi"), "Smoked Gouda", "Hawaiian")),
            ],
            toppings,
        }
    }
}

struct Menu<'a>(&'a [(&'static str, Burger)]);

impl Encode for Menu<'_> {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        encoder.start_mapping(Mapping::new());
        for (name, burger) in self.0 {
            encoder.entry(*name, burger)?;
        }
        encoder.end_mapping();
        Ok(())
    }
}

impl Encode for Burgers {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        encoder.start_mapping(Mapping::new().with_tag("!burgers"));
        encoder.entry("Burgers", &Menu(&self.burgers))?;
        encoder.entry("Toppings", &self.toppings)?;
        encoder.end_mapping();
        Ok(())
    }
}

#[test]
fn test_stylers_apply_only_to_their_value() {
    let yaml = dump(&Burgers::new(), &mut [], &Options::default()).unwrap();
    assert_eq!(
        yaml,
        "\
--- !burgers
Burgers:
  Classic:
    'Bun': 'Sesame Seed'
    'Cheese': 'American'
    'Sauce': ['Ketchup', 'Mustard']
  BBQ: {'Bun': 'Kaiser', 'Cheese': 'Cheddar', 'Sauce': 'Honey BBQ'}
  Fancy:
    'Bun': 'Hawaiian'
    'Cheese': 'Smoked Gouda'
    'Sauce': 'Spicy Wasabi'
Toppings:
- Mushrooms
- - Lettuce
  - Onions
  - Pickles
  - Tomatoes
- - - Ketchup
    - Mustard
  - - Salt
    - Pepper
"
    );
}

/// Counts the nodes it sees, shared with the test.
struct Counter(Rc<Cell<usize>>);

impl Styler for Counter {
    fn style(&mut self, _sniffer: &Sniffer, _node: &mut Node) {
        self.0.set(self.0.get() + 1);
    }
}

/// A list whose items each bring zero, one or two counters.
struct Nested {
    counters: usize,
    seen: Rc<Cell<usize>>,
    children: Vec<Nested>,
}

impl Encode for Nested {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        encoder.start_sequence(Sequence::new());
        encoder.accept(&self.counters)?;
        for child in &self.children {
            encoder.accept(child)?;
        }
        encoder.end_sequence();
        Ok(())
    }

    fn as_blueberry(&self) -> Option<&dyn Blueberry> {
        Some(self)
    }
}

impl Blueberry for Nested {
    fn stylers(&self, _sniffer: &Sniffer) -> Vec<Box<dyn Styler>> {
        (0..self.counters)
            .map(|_| Box::new(Counter(Rc::clone(&self.seen))) as Box<dyn Styler>)
            .collect()
    }
}

#[test]
fn test_push_pop_symmetry() {
    let seen = Rc::new(Cell::new(0));
    let leaf = |counters| Nested {
        counters,
        seen: Rc::clone(&seen),
        children: Vec::new(),
    };
    let value = Nested {
        counters: 1,
        seen: Rc::clone(&seen),
        children: vec![leaf(0), leaf(2), leaf(1)],
    };

    let mut builder = StyledTreeBuilder::new(NodeTreeBuilder::new());
    builder.add_styler(styled_yaml::EmptyStyler);
    let mut encoder = Encoder::from_builder(builder);
    encoder.document(&value).unwrap();
    assert_eq!(encoder.builder().styler_count(), 1);
    encoder.document(&leaf(3)).unwrap();
    assert_eq!(encoder.builder().styler_count(), 1);
    encoder.finish();

    // The root's counter sees all 8 nodes of the first document; each
    // leaf's counters see only the leaf's sequence and number.
    assert_eq!(seen.get(), 8 + 2 * 2 + 2 + 3 * 2);
}

struct Failing;

impl Encode for Failing {
    fn encode(&self, _encoder: &mut Encoder<'_>) -> Result<()> {
        Err(styled_yaml::Error::Cycle { path: "/0".into() })
    }

    fn as_blueberry(&self) -> Option<&dyn Blueberry> {
        Some(self)
    }
}

impl Blueberry for Failing {
    fn stylers(&self, _sniffer: &Sniffer) -> Vec<Box<dyn Styler>> {
        vec![Box::new(styled_yaml::EmptyStyler)]
    }
}

#[test]
fn test_stylers_are_popped_on_error() {
    let mut encoder = Encoder::from_builder(StyledTreeBuilder::new(NodeTreeBuilder::new()));
    assert!(encoder.document(&Failing).is_err());
    assert_eq!(encoder.builder().styler_count(), 0);
}
