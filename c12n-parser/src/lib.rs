//! # c12n
//!
//! Parser and algebra for classification markings (TLP-style banners).
//!
//! A marking such as `TLP:AMBER//MAPLE//REL TO BEAVER/MOOSE` is parsed against a
//! [`Definition`](c12n::definition::Definition) into [`Parts`](c12n::parts::Parts),
//! which can then be formatted back to canonical text, joined with other markings,
//! checked for accessibility, or run through the editor rule engine.
//!
//! File Layout
//!
//! src/c12n
//!   ├── definition   Schema, compiled lookup tables, validation
//!   ├── loader       YAML / JSON / file entry points for definitions
//!   ├── resolver     Per-category long/short/alias name tables
//!   ├── lexing       logos tokenizer and clause splitting
//!   ├── parts        The parsed marking value
//!   ├── parsing      text -> Parts
//!   ├── formatting   Parts -> text
//!   ├── compare      Level ordering and set containment
//!   ├── merge        Join of markings
//!   ├── access       Accessibility predicate
//!   ├── rules        Editor rule engine
//!   └── testing      Shared fixture definitions
//!
//! Every operation is pure and total: malformed markings never panic or error,
//! they degrade to an `INVALID` level and dropped tokens.

pub mod c12n;

pub use c12n::access::{check, is_accessible, is_accessible_parts, AccessDenied, Verdict};
pub use c12n::definition::Definition;
pub use c12n::error::DefinitionError;
pub use c12n::formatting::{format, normalize, Style};
pub use c12n::merge::{join, join_all, max_classification};
pub use c12n::parsing::parse;
pub use c12n::parts::{Level, Parts};
pub use c12n::rules::{apply_rules, apply_user_rules, Disabled, RuleOutcome};
