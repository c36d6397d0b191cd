//! Level, position and parent traces of whole parses.

mod common;

use common::{BURGERS_YAML, COURSES_YAML};
use styled_yaml::stylers::HierarchyStyler;
use styled_yaml::{parse_tree, ChildType, Node, Options, Sniffer, Styler};

fn trace(yaml: &str, verbose: bool) -> String {
    let mut styler = HierarchyStyler::new(verbose);
    parse_tree(yaml, &mut [&mut styler], &Options::default()).unwrap();
    styler.to_string()
}

#[test]
fn test_burgers_trace() {
    insta::assert_snapshot!(trace(BURGERS_YAML, false), @r"
    (1:1):Stream - <root:(0:0)>
    (1:1):Document - <stream:(1:1)>
    (1:1):Mapping - <doc:(1:1)>
     (2:1):Burgers - <map:(1:1)>
      (3:1):Mapping - <Burgers:(2:1)>
       (4:1):Classic - <map:(3:1)>
        (5:1):Mapping - <Classic:(4:1)>
         (6:1):Sauce - <map:(5:1)>
          (7:1):Sequence - <Sauce:(6:1)>
           (8:1):Ketchup - <seq:(7:1)>
           (8:2):Mustard - <seq:(7:1)>
         (6:2):Cheese - <map:(5:1)>
          (7:1):American - <Cheese:(6:2)>
         (6:3):Bun - <map:(5:1)>
          (7:1):Sesame Seed - <Bun:(6:3)>
       (4:2):BBQ - <map:(3:1)>
        (5:1):Mapping - <BBQ:(4:2)>
         (6:1):Sauce - <map:(5:1)>
          (7:1):Honey BBQ - <Sauce:(6:1)>
         (6:2):Cheese - <map:(5:1)>
          (7:1):Cheddar - <Cheese:(6:2)>
         (6:3):Bun - <map:(5:1)>
          (7:1):Kaiser - <Bun:(6:3)>
       (4:3):Fancy - <map:(3:1)>
        (5:1):Mapping - <Fancy:(4:3)>
         (6:1):Sauce - <map:(5:1)>
          (7:1):Spicy Wasabi - <Sauce:(6:1)>
         (6:2):Cheese - <map:(5:1)>
          (7:1):Smoked Gouda - <Cheese:(6:2)>
         (6:3):Bun - <map:(5:1)>
          (7:1):Hawaiian - <Bun:(6:3)>
     (2:2):Toppings - <map:(1:1)>
      (3:1):Sequence - <Toppings:(2:2)>
       (4:1):Mushrooms - <seq:(3:1)>
       (4:2):Sequence - <seq:(3:1)>
        (5:1):Lettuce - <seq:(4:2)>
        (5:2):Onions - <seq:(4:2)>
        (5:3):Pickles - <seq:(4:2)>
        (5:4):Tomatoes - <seq:(4:2)>
       (4:3):Sequence - <seq:(3:1)>
        (5:1):Sequence - <seq:(4:3)>
         (6:1):Ketchup - <seq:(5:1)>
         (6:2):Mustard - <seq:(5:1)>
        (5:2):Sequence - <seq:(4:3)>
         (6:1):Salt - <seq:(5:2)>
         (6:2):Pepper - <seq:(5:2)>
    ");
}

#[test]
fn test_courses_verbose_trace() {
    insta::assert_snapshot!(trace(COURSES_YAML, true), @r"
    (1:1):Stream - <root:(0:0)::(:1)>
    (1:1):Document - <stream:(1:1)::(:1)>
    (1:1):Mapping - <doc:(1:1)::(:1)>
     (2:1):Courses - <map:(1:1):key:(:1)>
      (3:1):Mapping - <Courses:(2:1):value:(:1)>
       (4:1):COSC - <map:(3:1):key:(:1)>
        (5:1):Sequence - <COSC:(4:1):value:(:1)>
         (6:1):470 - <seq:(5:1)::(:1)>
         (6:2):Computer Science - <seq:(5:1)::(:2)>
       (4:2):MUSC - <map:(3:1):key:(:2)>
        (5:1):Sequence - <MUSC:(4:2):value:(:1)>
         (6:1):340 - <seq:(5:1)::(:1)>
         (6:2):Music - <seq:(5:1)::(:2)>
       (4:3):ARTS - <map:(3:1):key:(:3)>
        (5:1):Sequence - <ARTS:(4:3):value:(:1)>
         (6:1):250 - <seq:(5:1)::(:1)>
         (6:2):The Arts - <seq:(5:1)::(:2)>
     (2:2):Schedule - <map:(1:1):key:(:2)>
      (3:1):Sequence - <Schedule:(2:2):value:(:1)>
       (4:1):Mapping - <seq:(3:1)::(:1)>
        (5:1):Course - <map:(4:1):key:(:1)>
         (6:1):COSC - <Course:(5:1):value:(:1)>
        (5:2):Time - <map:(4:1):key:(:2)>
         (6:1):08:00 - <Time:(5:2):value:(:1)>
       (4:2):Mapping - <seq:(3:1)::(:2)>
        (5:1):Course - <map:(4:2):key:(:1)>
         (6:1):MUSC - <Course:(5:1):value:(:1)>
        (5:2):Time - <map:(4:2):key:(:2)>
         (6:1):10:30 - <Time:(5:2):value:(:1)>
       (4:3):Mapping - <seq:(3:1)::(:3)>
        (5:1):Course - <map:(4:3):key:(:1)>
         (6:1):ARTS - <Course:(5:1):value:(:1)>
        (5:2):Time - <map:(4:3):key:(:2)>
         (6:1):15:10 - <Time:(5:2):value:(:1)>
       (4:4):Mapping - <seq:(3:1)::(:4)>
        (5:1):Course - <map:(4:4):key:(:1)>
         (6:1):COSC - <Course:(5:1):value:(:1)>
        (5:2):Time - <map:(4:4):key:(:2)>
         (6:1):13:10 - <Time:(5:2):value:(:1)>
    ");
}

#[test]
fn test_second_document_restarts_at_top_level() {
    let trace = trace("a: 1\n---\n- b\n", false);
    let lines: Vec<&str> = trace.lines().collect();
    assert_eq!(lines[5], "(1:2):Document - <stream:(1:1)>");
    assert_eq!(lines[6], "(1:2):Sequence - <doc:(1:2)>");
    assert_eq!(lines[7], " (2:1):b - <seq:(1:2)>");
}

#[test]
fn test_complex_and_alias_keys() {
    let trace = trace("? [a, b]\n: c\n&k d: e\n*k : f\n", false);
    insta::assert_snapshot!(trace, @r"
    (1:1):Stream - <root:(0:0)>
    (1:1):Document - <stream:(1:1)>
    (1:1):Mapping - <doc:(1:1)>
     (2:1):Sequence - <map:(1:1)>
      (3:1):a - <seq:(2:1)>
      (3:2):b - <seq:(2:1)>
      (3:1):c - <noface:(2:1)>
     (2:2):d - <map:(1:1)>
      (3:1):e - <d:(2:2)>
     (2:3):*1 - <map:(1:1)>
      (3:1):f - <1:(2:3)>
    ");
}

/// Records what the sniffer says about every mapping value.
#[derive(Default)]
struct ValueRecorder {
    seen: Vec<(String, usize, bool)>,
}

impl Styler for ValueRecorder {
    fn style(&mut self, sniffer: &Sniffer, node: &mut Node) {
        let Some(parent) = sniffer.parent() else {
            return;
        };
        if parent.child_type() == Some(ChildType::Value) {
            self.seen.push((
                node.display_name(),
                sniffer.level(),
                parent.node_of(&["scalar", "alias"]),
            ));
        }
    }
}

#[test]
fn test_parent_of_values_is_the_key() {
    let mut recorder = ValueRecorder::default();
    parse_tree("x: {y: z}\n", &mut [&mut recorder], &Options::default()).unwrap();
    assert_eq!(
        recorder.seen,
        [("Mapping".to_string(), 3, true), ("z".to_string(), 5, true)]
    );
}

#[test]
fn test_disabled_sniffer_stays_at_top() {
    let mut styler = HierarchyStyler::new(false);
    let options = Options {
        sniff: false,
        ..Options::default()
    };
    parse_tree("a: [b]\n", &mut [&mut styler], &options).unwrap();
    assert!(styler
        .as_str()
        .lines()
        .all(|line| line.starts_with("(1:1):") && line.ends_with("<root:(0:0)>")));
}
