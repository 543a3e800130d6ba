//! Name resolution
//!
//!     Every category of the definition (levels, required tags, groups, subgroups)
//!     carries a long name, a short name and any number of aliases. Markings in the
//!     wild use all three spellings, so each category gets a [`NameTable`] built once
//!     when the definition is compiled.
//!
//!     Lookup order is fixed: long names, then short names, then aliases. A hit
//!     always yields the canonical short name, which is the identity stored in
//!     [`Parts`](crate::c12n::parts::Parts). A miss is not an error; the caller decides
//!     whether it is fatal (the level) or silently dropped (everything else).
//!
//!     Tables are keyed by normalized spellings: upper case with inner whitespace
//!     collapsed to a single space. See [`normalize_token`].

use crate::c12n::error::DefinitionError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// The four kinds of names a definition declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Level,
    Required,
    Group,
    Subgroup,
}

impl Category {
    /// Resolution priority for tokens outside the level clause.
    pub const TOKEN_PRIORITY: [Category; 3] =
        [Category::Required, Category::Group, Category::Subgroup];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Level => write!(f, "level"),
            Category::Required => write!(f, "required tag"),
            Category::Group => write!(f, "group"),
            Category::Subgroup => write!(f, "subgroup"),
        }
    }
}

/// Upper-case a spelling and collapse whitespace runs to one space.
pub fn normalize_token(raw: &str) -> String {
    WHITESPACE_RUN
        .replace_all(raw.trim(), " ")
        .to_uppercase()
}

/// Long/short/alias lookup for one category.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    long_to_short: HashMap<String, String>,
    short_to_long: HashMap<String, String>,
    aliases: HashMap<String, String>,
}

impl NameTable {
    /// Register an entry. Long and short names must each be unique in the table.
    pub fn insert(
        &mut self,
        category: Category,
        long: &str,
        short: &str,
    ) -> Result<(), DefinitionError> {
        if self.long_to_short.contains_key(long) {
            return Err(DefinitionError::DuplicateName {
                category,
                name: long.to_string(),
            });
        }
        if self.short_to_long.contains_key(short) {
            return Err(DefinitionError::DuplicateName {
                category,
                name: short.to_string(),
            });
        }
        self.long_to_short
            .insert(long.to_string(), short.to_string());
        self.short_to_long
            .insert(short.to_string(), long.to_string());
        Ok(())
    }

    /// Register an alias for a canonical short name.
    ///
    /// An alias shared by several entries resolves to the first one registered.
    pub fn insert_alias(&mut self, alias: &str, short: &str) {
        match self.aliases.entry(alias.to_string()) {
            Entry::Occupied(existing) => {
                if existing.get() != short {
                    tracing::debug!(
                        alias,
                        kept = %existing.get(),
                        ignored = short,
                        "alias already bound, keeping first entry"
                    );
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(short.to_string());
            }
        }
    }

    /// Resolve a normalized spelling to its canonical short name.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        if let Some(short) = self.long_to_short.get(token) {
            return Some(short.as_str());
        }
        if let Some((short, _)) = self.short_to_long.get_key_value(token) {
            return Some(short.as_str());
        }
        self.aliases.get(token).map(String::as_str)
    }

    /// Long name for a canonical short name.
    pub fn long_name(&self, short: &str) -> Option<&str> {
        self.short_to_long.get(short).map(String::as_str)
    }

    pub fn contains(&self, short: &str) -> bool {
        self.short_to_long.contains_key(short)
    }

    pub fn len(&self) -> usize {
        self.short_to_long.len()
    }

    pub fn is_empty(&self) -> bool {
        self.short_to_long.is_empty()
    }
}
