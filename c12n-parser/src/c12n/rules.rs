//! Editor rule engine
//!
//!     An interactive marking editor needs two things after every click: the
//!     selection corrected so it is consistent with the definition's dependency
//!     edges, and the set of options that can no longer be picked.
//!
//!     Dependency edges
//!
//!     - `require_lvl` on a required tag: the level must rank at least that high.
//!     - `require_group` on a subgroup: that group must be selected.
//!     - `limited_to_group` on a subgroup: no other group may be selected.
//!     - `auto_select` groups / subgroups: selected as soon as any group / subgroup
//!       is (markings only; a user's own clearance is edited without auto-select).
//!
//!     Correction is `raise(narrow(close(retain_known(parts))))`. An option is
//!     disabled when picking it would introduce a [`RuleViolation`] the corrected
//!     selection does not already have.

use crate::c12n::definition::Definition;
use crate::c12n::parts::{Level, Parts};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleViolation {
    #[error("marking has no valid level")]
    InvalidLevel,

    #[error("required tag '{tag}' needs level rank {required} or higher")]
    LevelBelowRequirement { tag: String, required: u32 },

    #[error("subgroup '{subgroup}' requires group '{group}'")]
    MissingRequiredGroup { subgroup: String, group: String },

    #[error("group '{group}' is not allowed with subgroup '{subgroup}' (limited to '{limited_to}')")]
    GroupOutsideLimit {
        group: String,
        subgroup: String,
        limited_to: String,
    },
}

/// Options an editor must not offer. Canonical short names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Disabled {
    pub levels: BTreeSet<String>,
    pub groups: BTreeSet<String>,
    pub subgroups: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleOutcome {
    pub parts: Parts,
    pub disabled: Disabled,
}

/// Apply rules to a marking being edited.
pub fn apply_rules(parts: &Parts, definition: &Definition) -> RuleOutcome {
    evaluate(parts, definition, true)
}

/// Apply rules to a user's clearance. Auto-select is skipped.
pub fn apply_user_rules(parts: &Parts, definition: &Definition) -> RuleOutcome {
    evaluate(parts, definition, false)
}

/// Every dependency edge the marking breaks.
pub fn violations(parts: &Parts, definition: &Definition) -> BTreeSet<RuleViolation> {
    let mut found = BTreeSet::new();

    match parts.level().rank() {
        None => {
            found.insert(RuleViolation::InvalidLevel);
        }
        Some(rank) => {
            for tag in parts.required() {
                if let Some(required) = definition.required_tag(tag).and_then(|t| t.require_lvl) {
                    if rank < required {
                        found.insert(RuleViolation::LevelBelowRequirement {
                            tag: tag.clone(),
                            required,
                        });
                    }
                }
            }
        }
    }

    for name in parts.subgroups() {
        let Some(subgroup) = definition.subgroup(name) else {
            continue;
        };
        if let Some(group) = &subgroup.require_group {
            if !parts.groups().contains(group) {
                found.insert(RuleViolation::MissingRequiredGroup {
                    subgroup: name.clone(),
                    group: group.clone(),
                });
            }
        }
        if let Some(limited_to) = &subgroup.limited_to_group {
            for group in parts.groups().iter().filter(|group| *group != limited_to) {
                found.insert(RuleViolation::GroupOutsideLimit {
                    group: group.clone(),
                    subgroup: name.clone(),
                    limited_to: limited_to.clone(),
                });
            }
        }
    }

    found
}

fn evaluate(parts: &Parts, definition: &Definition, auto_select: bool) -> RuleOutcome {
    let corrected = raise(
        narrow(close(retain_known(parts, definition), definition, auto_select), definition),
        definition,
    );
    if &corrected != parts {
        tracing::debug!(?parts, ?corrected, "rule engine corrected selection");
    }

    let baseline = violations(&corrected, definition);
    let introduces_violation = |candidate: &Parts| {
        violations(candidate, definition)
            .difference(&baseline)
            .next()
            .is_some()
    };

    let mut disabled = Disabled::default();

    for level in definition.levels() {
        let candidate = corrected.clone().with_level(Level::Known {
            name: level.short_name.clone(),
            rank: level.lvl,
        });
        if introduces_violation(&candidate) {
            disabled.levels.insert(level.short_name.clone());
        }
    }

    for group in definition.groups() {
        let mut groups = corrected.groups().clone();
        groups.insert(group.short_name.clone());
        let candidate = close(corrected.clone().with_groups(groups), definition, auto_select);
        if introduces_violation(&candidate) {
            disabled.groups.insert(group.short_name.clone());
        }
    }

    for subgroup in definition.subgroups() {
        let mut subgroups = corrected.subgroups().clone();
        subgroups.insert(subgroup.short_name.clone());
        let candidate = narrow(
            close(corrected.clone().with_subgroups(subgroups), definition, auto_select),
            definition,
        );
        if introduces_violation(&candidate) {
            disabled.subgroups.insert(subgroup.short_name.clone());
        }
    }

    RuleOutcome {
        parts: corrected,
        disabled,
    }
}

/// Drop anything the definition does not declare.
fn retain_known(parts: &Parts, definition: &Definition) -> Parts {
    let level = match parts.level() {
        Level::Known { name, rank } => match definition.level(name) {
            Some(level) if level.lvl == *rank => parts.level().clone(),
            _ => Level::Invalid,
        },
        Level::Invalid => Level::Invalid,
    };
    let required = parts
        .required()
        .iter()
        .filter(|tag| definition.required_tag(tag).is_some())
        .cloned()
        .collect();
    let groups = parts
        .groups()
        .iter()
        .filter(|group| definition.dynamic_groups() || definition.group(group).is_some())
        .cloned()
        .collect();
    let subgroups = parts
        .subgroups()
        .iter()
        .filter(|subgroup| definition.subgroup(subgroup).is_some())
        .cloned()
        .collect();
    Parts::new(level, required, groups, subgroups)
}

/// Add everything the current selection pulls in.
fn close(parts: Parts, definition: &Definition, auto_select: bool) -> Parts {
    let mut subgroups = parts.subgroups().clone();
    if auto_select && !subgroups.is_empty() {
        subgroups.extend(definition.auto_select_subgroups().map(str::to_string));
    }

    let mut groups = parts.groups().clone();
    groups.extend(
        subgroups
            .iter()
            .filter_map(|name| definition.subgroup(name))
            .filter_map(|subgroup| subgroup.require_group.clone()),
    );
    if auto_select && !groups.is_empty() {
        groups.extend(definition.auto_select_groups().map(str::to_string));
    }

    parts.with_subgroups(subgroups).with_groups(groups)
}

/// Remove groups excluded by a selected subgroup's `limited_to_group`.
fn narrow(parts: Parts, definition: &Definition) -> Parts {
    let limits: BTreeSet<&str> = parts
        .subgroups()
        .iter()
        .filter_map(|name| definition.subgroup(name))
        .filter_map(|subgroup| subgroup.limited_to_group.as_deref())
        .collect();
    if limits.is_empty() {
        return parts;
    }
    let groups = parts
        .groups()
        .iter()
        .filter(|group| limits.iter().all(|limit| *limit == group.as_str()))
        .cloned()
        .collect();
    parts.with_groups(groups)
}

/// Lift the level to the lowest one satisfying every `require_lvl`.
fn raise(parts: Parts, definition: &Definition) -> Parts {
    let Some(required) = parts
        .required()
        .iter()
        .filter_map(|tag| definition.required_tag(tag))
        .filter_map(|tag| tag.require_lvl)
        .max()
    else {
        return parts;
    };
    if parts.level().rank().is_some_and(|rank| rank >= required) {
        return parts;
    }
    match definition.lowest_level_at_least(required) {
        Some(level) => {
            let level = Level::Known {
                name: level.short_name.clone(),
                rank: level.lvl,
            };
            parts.with_level(level)
        }
        None => parts,
    }
}
