//! Classification definition
//!
//!     The definition parameterizes every operation in this crate: which levels
//!     exist and how they rank, which required tags, groups and subgroups may
//!     appear, and how each is spelled. It is produced by the platform's
//!     configuration endpoint and arrives here as a [`DefinitionDocument`]
//!     (see [loader](crate::c12n::loader) for the YAML/JSON entry points).
//!
//!     [`Definition::new`] compiles a document once: every name is normalized
//!     (upper case, collapsed whitespace), lookup tables are built per category,
//!     group references are resolved to canonical short names and the document is
//!     checked for internal consistency. The compiled value is immutable and can be
//!     shared freely between threads.

use crate::c12n::error::DefinitionError;
use crate::c12n::formatting::Style;
use crate::c12n::parsing;
use crate::c12n::parts::Parts;
use crate::c12n::resolver::{normalize_token, Category, NameTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rendered in place of a level that resolved to nothing.
pub const INVALID_LEVEL: &str = "INVALID";

fn enabled() -> bool {
    true
}

/// Raw definition as served by the configuration endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefinitionDocument {
    #[serde(default = "enabled")]
    pub enforce: bool,
    #[serde(default)]
    pub dynamic_groups: bool,
    #[serde(default)]
    pub levels: Vec<LevelDefinition>,
    #[serde(default)]
    pub required: Vec<RequiredDefinition>,
    #[serde(default)]
    pub groups: Vec<GroupDefinition>,
    #[serde(default)]
    pub subgroups: Vec<SubgroupDefinition>,
    pub restricted: String,
    pub unrestricted: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub name: String,
    pub short_name: String,
    /// Rank; higher is more restrictive.
    pub lvl: u32,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredDefinition {
    pub name: String,
    pub short_name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub description: String,
    /// Rendered in the release clause instead of the required clause.
    #[serde(default)]
    pub is_required_group: bool,
    /// Minimum level rank a marking carrying this tag must have.
    #[serde(default)]
    pub require_lvl: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDefinition {
    pub name: String,
    pub short_name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub auto_select: bool,
    /// Replaces `REL TO <group>` when this is the only group in a marking.
    #[serde(default)]
    pub solitary_display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubgroupDefinition {
    pub name: String,
    pub short_name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub auto_select: bool,
    #[serde(default)]
    pub require_group: Option<String>,
    #[serde(default)]
    pub limited_to_group: Option<String>,
}

/// Compiled, validated definition.
#[derive(Debug, Clone)]
pub struct Definition {
    enforce: bool,
    dynamic_groups: bool,
    /// Ascending rank.
    levels: Vec<LevelDefinition>,
    required: BTreeMap<String, RequiredDefinition>,
    groups: BTreeMap<String, GroupDefinition>,
    subgroups: BTreeMap<String, SubgroupDefinition>,
    level_names: NameTable,
    required_names: NameTable,
    group_names: NameTable,
    subgroup_names: NameTable,
    restricted: String,
    unrestricted: String,
}

/// Normalize and check one declared spelling.
fn spelling(category: Category, raw: &str) -> Result<String, DefinitionError> {
    let name = normalize_token(raw);
    if name.is_empty() {
        return Err(DefinitionError::EmptyName { category });
    }
    if name.contains('/') || name.contains(',') {
        return Err(DefinitionError::ReservedCharacter { category, name });
    }
    Ok(name)
}

fn spellings(category: Category, raw: &[String]) -> Result<Vec<String>, DefinitionError> {
    raw.iter().map(|alias| spelling(category, alias)).collect()
}

/// Register long, short and alias spellings of one entry.
fn register(
    table: &mut NameTable,
    category: Category,
    name: &str,
    short_name: &str,
    aliases: &[String],
) -> Result<(), DefinitionError> {
    table.insert(category, name, short_name)?;
    for alias in aliases {
        table.insert_alias(alias, short_name);
    }
    Ok(())
}

fn group_reference(
    groups: &NameTable,
    subgroup: &str,
    reference: Option<String>,
) -> Result<Option<String>, DefinitionError> {
    let Some(raw) = reference else {
        return Ok(None);
    };
    let token = normalize_token(&raw);
    match groups.resolve(&token) {
        Some(short) => Ok(Some(short.to_string())),
        None => Err(DefinitionError::UnknownGroupReference {
            subgroup: subgroup.to_string(),
            group: raw,
        }),
    }
}

impl Definition {
    /// Compile and validate a definition document.
    pub fn new(document: DefinitionDocument) -> Result<Self, DefinitionError> {
        let DefinitionDocument {
            enforce,
            dynamic_groups,
            levels,
            required,
            groups,
            subgroups,
            restricted,
            unrestricted,
        } = document;

        if levels.is_empty() {
            return Err(DefinitionError::NoLevels);
        }

        let mut level_names = NameTable::default();
        let mut compiled_levels = Vec::with_capacity(levels.len());
        for level in levels {
            let level = LevelDefinition {
                name: spelling(Category::Level, &level.name)?,
                short_name: spelling(Category::Level, &level.short_name)?,
                aliases: spellings(Category::Level, &level.aliases)?,
                ..level
            };
            register(
                &mut level_names,
                Category::Level,
                &level.name,
                &level.short_name,
                &level.aliases,
            )?;
            compiled_levels.push(level);
        }
        compiled_levels.sort_by_key(|level| level.lvl);
        if let Some(pair) = compiled_levels
            .windows(2)
            .find(|pair| pair[0].lvl == pair[1].lvl)
        {
            return Err(DefinitionError::DuplicateRank {
                rank: pair[0].lvl,
                first: pair[0].name.clone(),
                second: pair[1].name.clone(),
            });
        }

        let mut required_names = NameTable::default();
        let mut compiled_required = BTreeMap::new();
        for tag in required {
            let tag = RequiredDefinition {
                name: spelling(Category::Required, &tag.name)?,
                short_name: spelling(Category::Required, &tag.short_name)?,
                aliases: spellings(Category::Required, &tag.aliases)?,
                ..tag
            };
            register(
                &mut required_names,
                Category::Required,
                &tag.name,
                &tag.short_name,
                &tag.aliases,
            )?;
            compiled_required.insert(tag.short_name.clone(), tag);
        }

        let mut group_names = NameTable::default();
        let mut compiled_groups = BTreeMap::new();
        for group in groups {
            let solitary_display_name = group
                .solitary_display_name
                .as_deref()
                .map(|name| spelling(Category::Group, name))
                .transpose()?;
            let group = GroupDefinition {
                name: spelling(Category::Group, &group.name)?,
                short_name: spelling(Category::Group, &group.short_name)?,
                aliases: spellings(Category::Group, &group.aliases)?,
                solitary_display_name,
                ..group
            };
            register(
                &mut group_names,
                Category::Group,
                &group.name,
                &group.short_name,
                &group.aliases,
            )?;
            compiled_groups.insert(group.short_name.clone(), group);
        }
        // Solitary names are printed, so they must parse back.
        for group in compiled_groups.values() {
            if let Some(solitary) = &group.solitary_display_name {
                group_names.insert_alias(solitary, &group.short_name);
            }
        }

        let mut subgroup_names = NameTable::default();
        let mut compiled_subgroups = BTreeMap::new();
        for subgroup in subgroups {
            let name = spelling(Category::Subgroup, &subgroup.name)?;
            let require_group = group_reference(&group_names, &name, subgroup.require_group)?;
            let limited_to_group =
                group_reference(&group_names, &name, subgroup.limited_to_group)?;
            let subgroup = SubgroupDefinition {
                name,
                short_name: spelling(Category::Subgroup, &subgroup.short_name)?,
                aliases: spellings(Category::Subgroup, &subgroup.aliases)?,
                require_group,
                limited_to_group,
                ..subgroup
            };
            register(
                &mut subgroup_names,
                Category::Subgroup,
                &subgroup.name,
                &subgroup.short_name,
                &subgroup.aliases,
            )?;
            compiled_subgroups.insert(subgroup.short_name.clone(), subgroup);
        }

        let definition = Definition {
            enforce,
            dynamic_groups,
            levels: compiled_levels,
            required: compiled_required,
            groups: compiled_groups,
            subgroups: compiled_subgroups,
            level_names,
            required_names,
            group_names,
            subgroup_names,
            restricted,
            unrestricted,
        };

        for (field, marking) in [
            ("restricted", &definition.restricted),
            ("unrestricted", &definition.unrestricted),
        ] {
            if !parsing::parse(marking, &definition).level().is_valid() {
                return Err(DefinitionError::InvalidDefaultMarking {
                    field,
                    marking: marking.clone(),
                });
            }
        }

        tracing::debug!(
            levels = definition.levels.len(),
            required = definition.required.len(),
            groups = definition.groups.len(),
            subgroups = definition.subgroups.len(),
            dynamic_groups,
            enforce,
            "compiled classification definition"
        );

        Ok(definition)
    }

    /// Whether access checks are enforced at all.
    pub fn enforce(&self) -> bool {
        self.enforce
    }

    /// Whether unknown release tokens become ad-hoc groups.
    pub fn dynamic_groups(&self) -> bool {
        self.dynamic_groups
    }

    /// Levels in ascending rank order.
    pub fn levels(&self) -> impl Iterator<Item = &LevelDefinition> {
        self.levels.iter()
    }

    pub fn required_tags(&self) -> impl Iterator<Item = &RequiredDefinition> {
        self.required.values()
    }

    pub fn groups(&self) -> impl Iterator<Item = &GroupDefinition> {
        self.groups.values()
    }

    pub fn subgroups(&self) -> impl Iterator<Item = &SubgroupDefinition> {
        self.subgroups.values()
    }

    pub fn level(&self, short_name: &str) -> Option<&LevelDefinition> {
        self.levels
            .iter()
            .find(|level| level.short_name == short_name)
    }

    pub fn required_tag(&self, short_name: &str) -> Option<&RequiredDefinition> {
        self.required.get(short_name)
    }

    pub fn group(&self, short_name: &str) -> Option<&GroupDefinition> {
        self.groups.get(short_name)
    }

    pub fn subgroup(&self, short_name: &str) -> Option<&SubgroupDefinition> {
        self.subgroups.get(short_name)
    }

    /// Groups added whenever any group is selected.
    pub fn auto_select_groups(&self) -> impl Iterator<Item = &str> {
        self.groups
            .values()
            .filter(|group| group.auto_select)
            .map(|group| group.short_name.as_str())
    }

    /// Subgroups added whenever any subgroup is selected.
    pub fn auto_select_subgroups(&self) -> impl Iterator<Item = &str> {
        self.subgroups
            .values()
            .filter(|subgroup| subgroup.auto_select)
            .map(|subgroup| subgroup.short_name.as_str())
    }

    /// Lowest level whose rank is at least `rank`.
    pub fn lowest_level_at_least(&self, rank: u32) -> Option<&LevelDefinition> {
        self.levels.iter().find(|level| level.lvl >= rank)
    }

    /// Display text for a level rank, or `INVALID` when no level has that rank.
    pub fn level_text(&self, rank: u32, style: Style, mobile: bool) -> &str {
        let style = style.effective(mobile);
        match self.levels.iter().find(|level| level.lvl == rank) {
            Some(level) if style == Style::Long => &level.name,
            Some(level) => &level.short_name,
            None => INVALID_LEVEL,
        }
    }

    pub(crate) fn table(&self, category: Category) -> &NameTable {
        match category {
            Category::Level => &self.level_names,
            Category::Required => &self.required_names,
            Category::Group => &self.group_names,
            Category::Subgroup => &self.subgroup_names,
        }
    }

    /// Resolve any spelling (case-insensitive) to its canonical short name.
    pub fn resolve(&self, category: Category, token: &str) -> Option<&str> {
        self.table(category).resolve(&normalize_token(token))
    }

    /// Render a canonical short name in the requested style.
    ///
    /// Names the definition does not know (dynamic groups) render as themselves.
    pub fn display_name<'a>(
        &'a self,
        category: Category,
        canonical: &'a str,
        style: Style,
    ) -> &'a str {
        match style {
            Style::Long => self.table(category).long_name(canonical).unwrap_or(canonical),
            Style::Short => canonical,
        }
    }

    /// Default marking for restricted content.
    pub fn restricted(&self) -> Parts {
        parsing::parse(&self.restricted, self)
    }

    /// Default marking for unrestricted content.
    pub fn unrestricted(&self) -> Parts {
        parsing::parse(&self.unrestricted, self)
    }
}
