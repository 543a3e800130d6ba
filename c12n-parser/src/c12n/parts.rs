//! The parsed marking value.
//!
//! [`Parts`] is produced by [`parse`](crate::c12n::parsing::parse), by the join in
//! [`merge`](crate::c12n::merge) and by the rule engine. It is never mutated in
//! place: every transformation consumes or clones and returns a new value.
//!
//! The level is an explicit [`Level`] so callers cannot mistake an unresolved
//! level for a real one. Tag sets hold canonical short names only.

use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Level {
    /// A declared level, by canonical short name and rank.
    Known { name: String, rank: u32 },
    /// The level clause matched nothing.
    Invalid,
}

impl Level {
    pub fn is_valid(&self) -> bool {
        matches!(self, Level::Known { .. })
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Level::Known { name, .. } => Some(name),
            Level::Invalid => None,
        }
    }

    pub fn rank(&self) -> Option<u32> {
        match self {
            Level::Known { rank, .. } => Some(*rank),
            Level::Invalid => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Parts {
    level: Level,
    required: BTreeSet<String>,
    groups: BTreeSet<String>,
    subgroups: BTreeSet<String>,
}

impl Parts {
    pub(crate) fn new(
        level: Level,
        required: BTreeSet<String>,
        groups: BTreeSet<String>,
        subgroups: BTreeSet<String>,
    ) -> Self {
        Parts {
            level,
            required,
            groups,
            subgroups,
        }
    }

    /// A marking with no resolvable level and no tags.
    pub fn invalid() -> Self {
        Self::new(
            Level::Invalid,
            BTreeSet::new(),
            BTreeSet::new(),
            BTreeSet::new(),
        )
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn required(&self) -> &BTreeSet<String> {
        &self.required
    }

    pub fn groups(&self) -> &BTreeSet<String> {
        &self.groups
    }

    pub fn subgroups(&self) -> &BTreeSet<String> {
        &self.subgroups
    }

    pub fn is_valid(&self) -> bool {
        self.level.is_valid()
    }

    pub(crate) fn with_level(self, level: Level) -> Self {
        Parts { level, ..self }
    }

    pub(crate) fn with_groups(self, groups: BTreeSet<String>) -> Self {
        Parts { groups, ..self }
    }

    pub(crate) fn with_subgroups(self, subgroups: BTreeSet<String>) -> Self {
        Parts { subgroups, ..self }
    }

    pub(crate) fn into_sets(
        self,
    ) -> (Level, BTreeSet<String>, BTreeSet<String>, BTreeSet<String>) {
        (self.level, self.required, self.groups, self.subgroups)
    }
}
