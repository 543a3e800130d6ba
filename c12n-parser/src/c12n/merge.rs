//! Join of markings.
//!
//! The join is the least marking at least as restrictive as both operands: the
//! higher level and the union of every tag set. It is a plain union; dependency
//! rules are left to [`rules`](crate::c12n::rules).

use crate::c12n::compare::max_level;
use crate::c12n::definition::Definition;
use crate::c12n::formatting::{format, Style};
use crate::c12n::parsing::parse;
use crate::c12n::parts::Parts;

pub fn join(a: &Parts, b: &Parts) -> Parts {
    let (level, mut required, mut groups, mut subgroups) = a.clone().into_sets();
    required.extend(b.required().iter().cloned());
    groups.extend(b.groups().iter().cloned());
    subgroups.extend(b.subgroups().iter().cloned());
    Parts::new(
        max_level(level, b.level().clone()),
        required,
        groups,
        subgroups,
    )
}

/// Join any number of markings. `None` when there is nothing to join.
pub fn join_all<'a>(markings: impl IntoIterator<Item = &'a Parts>) -> Option<Parts> {
    markings.into_iter().fold(None, |acc, parts| match acc {
        None => Some(parts.clone()),
        Some(acc) => Some(join(&acc, parts)),
    })
}

/// Parse two markings, join them and render the result.
pub fn max_classification(
    a: &str,
    b: &str,
    definition: &Definition,
    style: Style,
    mobile: bool,
) -> String {
    let joined = join(&parse(a, definition), &parse(b, definition));
    format(&joined, definition, style, mobile)
}
