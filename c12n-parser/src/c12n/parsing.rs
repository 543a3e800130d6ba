//! Marking text to [`Parts`].
//!
//! Parsing is total. The level clause either resolves or yields
//! [`Level::Invalid`]; every other token either resolves in the first category
//! that knows it (required, then group, then subgroup) or is dropped.

use crate::c12n::definition::Definition;
use crate::c12n::lexing::{split_clauses, strip_relation};
use crate::c12n::parts::{Level, Parts};
use crate::c12n::resolver::{normalize_token, Category};
use std::collections::BTreeSet;

pub fn parse(text: &str, definition: &Definition) -> Parts {
    let upper = text.to_uppercase();
    let mut clauses = split_clauses(&upper).into_iter();

    let level = clauses
        .next()
        .map(|clause| resolve_level(clause.text, definition))
        .unwrap_or(Level::Invalid);

    let mut required = BTreeSet::new();
    let mut groups = BTreeSet::new();
    let mut subgroups = BTreeSet::new();

    for clause in clauses {
        for item in clause.items {
            let token = normalize_token(item);
            match resolve_token(&token, definition) {
                Some((Category::Required, name)) => {
                    required.insert(name);
                }
                Some((Category::Group, name)) => {
                    groups.insert(name);
                }
                Some((Category::Subgroup, name)) => {
                    subgroups.insert(name);
                }
                Some((Category::Level, _)) | None => {
                    tracing::debug!(token = %token, marking = text, "dropping unresolved token");
                }
            }
        }
    }

    Parts::new(level, required, groups, subgroups)
}

fn resolve_level(clause: &str, definition: &Definition) -> Level {
    let token = normalize_token(clause);
    let known = definition
        .resolve(Category::Level, &token)
        .and_then(|short| definition.level(short));
    match known {
        Some(level) => Level::Known {
            name: level.short_name.clone(),
            rank: level.lvl,
        },
        None => {
            tracing::debug!(token = %token, "level clause does not resolve");
            Level::Invalid
        }
    }
}

fn resolve_in_priority(token: &str, definition: &Definition) -> Option<(Category, String)> {
    Category::TOKEN_PRIORITY.iter().find_map(|&category| {
        definition
            .table(category)
            .resolve(token)
            .map(|short| (category, short.to_string()))
    })
}

/// Resolve one normalized non-level token.
///
/// The verbatim spelling is tried before the relation marker is stripped.
fn resolve_token(token: &str, definition: &Definition) -> Option<(Category, String)> {
    if let Some(hit) = resolve_in_priority(token, definition) {
        return Some(hit);
    }
    let bare = strip_relation(token);
    if let Some(hit) = bare
        .filter(|bare| !bare.is_empty())
        .and_then(|bare| resolve_in_priority(bare, definition))
    {
        return Some(hit);
    }

    let name = bare.unwrap_or(token);
    let ad_hoc = definition.dynamic_groups()
        && !name.is_empty()
        && definition.table(Category::Level).resolve(name).is_none();
    ad_hoc.then(|| (Category::Group, name.to_string()))
}
