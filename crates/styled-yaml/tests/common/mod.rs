//! Shared fixtures for the integration tests.

#![allow(dead_code)]

pub const BURGERS_YAML: &str = "\
Burgers:
  Classic:
    Sauce:  [Ketchup,Mustard]
    Cheese: American
    Bun:    Sesame Seed
  BBQ:
    Sauce:  Honey BBQ
    Cheese: Cheddar
    Bun:    Kaiser
  Fancy:
    Sauce:  Spicy Wasabi
    Cheese: Smoked Gouda
    Bun:    Hawaiian
Toppings:
  - Mushrooms
  - [Lettuce, Onions, Pickles, Tomatoes]
  - [[Ketchup,Mustard], [Salt,Pepper]]
";

pub const COURSES_YAML: &str = "\
Courses:
  COSC: [470,'Computer Science']
  MUSC: [340,'Music']
  ARTS: [250,'The Arts']
Schedule:
- {Course: COSC,Time: '08:00'}
- {Course: MUSC,Time: '10:30'}
- {Course: ARTS,Time: '15:10'}
- {Course: COSC,Time: '13:10'}
";

pub const DOLPHINS_YAML: &str = "\
Dolphins:
  Common:     &com {Length: ~2.5m, Weight:  ~235kg}
  Bottlenose: &bot {Length:   ~4m, Weight:  ~300kg}
  Dusky:      &dus {Length: ~1.7m, Weight:   ~78kg}
  Orca:       &orc {Length:   ~7m, Weight: ~3600kg}
Popular:
  - *bot
  - *orc
";

/// BURGERS_YAML with every mapping and sequence from level 4 down in flow
/// style.
pub const FLOWED_BURGERS: &str = "\
Burgers:
  Classic: {Sauce: [Ketchup, Mustard], Cheese: American, Bun: Sesame Seed}
  BBQ: {Sauce: Honey BBQ, Cheese: Cheddar, Bun: Kaiser}
  Fancy: {Sauce: Spicy Wasabi, Cheese: Smoked Gouda, Bun: Hawaiian}
Toppings:
- Mushrooms
- [Lettuce, Onions, Pickles, Tomatoes]
- [[Ketchup, Mustard], [Salt, Pepper]]
";
