//! [`Parts`] back to canonical marking text.
//!
//!     LEVEL[//REQ/REQ][//[REQ-GROUP/...][REL TO G1/G2 | SOLITARY][/SUB/SUB]]
//!
//!     Each clause is omitted when empty. Names inside a clause are sorted by the
//!     spelling being printed, so the long and short renderings of the same marking
//!     may order differently.

use crate::c12n::definition::{Definition, INVALID_LEVEL};
use crate::c12n::parsing::parse;
use crate::c12n::parts::{Level, Parts};
use crate::c12n::resolver::Category;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Style {
    #[default]
    Long,
    Short,
}

impl Style {
    /// Mobile rendering always uses short names.
    pub fn effective(self, mobile: bool) -> Style {
        if mobile {
            Style::Short
        } else {
            self
        }
    }

    fn relation_marker(self) -> &'static str {
        match self {
            Style::Long => "REL TO ",
            Style::Short => "REL ",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Style::Long => write!(f, "long"),
            Style::Short => write!(f, "short"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown display style '{0}', expected 'long' or 'short'")]
pub struct UnknownStyle(pub String);

impl FromStr for Style {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "long" => Ok(Style::Long),
            "short" => Ok(Style::Short),
            _ => Err(UnknownStyle(s.to_string())),
        }
    }
}

/// Render a marking.
pub fn format(parts: &Parts, definition: &Definition, style: Style, mobile: bool) -> String {
    let style = style.effective(mobile);

    let mut out = match parts.level() {
        Level::Known { rank, .. } => definition.level_text(*rank, style, false).to_string(),
        Level::Invalid => INVALID_LEVEL.to_string(),
    };

    let (release_tags, handling_tags): (Vec<&String>, Vec<&String>) =
        parts.required().iter().partition(|tag| {
            definition
                .required_tag(tag)
                .is_some_and(|tag| tag.is_required_group)
        });

    let handling = sorted_names(definition, Category::Required, handling_tags, style);
    if !handling.is_empty() {
        out.push_str("//");
        out.push_str(&handling.join("/"));
    }

    let mut release = sorted_names(definition, Category::Required, release_tags, style);
    if let Some(groups) = group_text(parts, definition, style) {
        release.push(groups);
    }
    release.extend(sorted_names(
        definition,
        Category::Subgroup,
        parts.subgroups(),
        style,
    ));
    if !release.is_empty() {
        out.push_str("//");
        out.push_str(&release.join("/"));
    }

    out
}

/// Parse and re-render a marking in canonical form.
pub fn normalize(text: &str, definition: &Definition, style: Style, mobile: bool) -> String {
    format(&parse(text, definition), definition, style, mobile)
}

fn sorted_names<'a>(
    definition: &'a Definition,
    category: Category,
    canonical: impl IntoIterator<Item = &'a String>,
    style: Style,
) -> Vec<String> {
    let mut names: Vec<String> = canonical
        .into_iter()
        .map(|name| definition.display_name(category, name, style).to_string())
        .collect();
    names.sort();
    names
}

fn group_text(parts: &Parts, definition: &Definition, style: Style) -> Option<String> {
    let groups = parts.groups();
    if groups.len() == 1 {
        let solitary = groups
            .first()
            .and_then(|group| definition.group(group))
            .and_then(|group| group.solitary_display_name.clone());
        if solitary.is_some() {
            return solitary;
        }
    }
    if groups.is_empty() {
        return None;
    }
    let names = sorted_names(definition, Category::Group, groups, style);
    Some(format!("{}{}", style.relation_marker(), names.join("/")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::c12n::testing::{reference_definition, tlp_definition, REFERENCE_YAML};

    fn long(text: &str) -> String {
        normalize(text, tlp_definition(), Style::Long, false)
    }

    fn short(text: &str) -> String {
        normalize(text, tlp_definition(), Style::Short, false)
    }

    #[test]
    fn test_level_only() {
        assert_eq!(long("TLP:A"), "TLP:AMBER");
        assert_eq!(short("TLP:AMBER"), "TLP:A");
    }

    #[test]
    fn test_invalid_level() {
        assert_eq!(long("NOPE//MAPLE"), "INVALID//MAPLE");
        assert_eq!(short(""), "INVALID");
    }

    #[test]
    fn test_required_tags_sorted_by_printed_name() {
        assert_eq!(long("TLP:G//MPL/LF"), "TLP:GREEN//LEAF/MAPLE");
        assert_eq!(short("TLP:G//MAPLE/LEAF"), "TLP:G//LF/MPL");
    }

    #[test]
    fn test_relation_marker_per_style() {
        assert_eq!(long("TLP:G//REL B/M"), "TLP:GREEN//REL TO BEAVER/MOOSE");
        assert_eq!(short("TLP:G//REL TO MOOSE/BEAVER"), "TLP:G//REL B/M");
    }

    #[test]
    fn test_subgroups_without_groups_have_no_marker() {
        assert_eq!(long("TLP:G//SUB"), "TLP:GREEN//SUBGRP");
        assert_eq!(short("TLP:G//M/SUBGRP"), "TLP:G//REL M/SUB");
    }

    #[test]
    fn test_mobile_forces_short() {
        let parts = parse("TLP:CLEAR//MAPLE//REL BEAVER", tlp_definition());
        assert_eq!(
            format(&parts, tlp_definition(), Style::Long, true),
            "TLP:C//MPL//REL B"
        );
    }

    #[test]
    fn test_required_group_tags_lead_release_clause() {
        let definition = reference_definition();
        assert_eq!(
            normalize("L0//ORCON/LE//REL A", definition, Style::Short, false),
            "L0//LE//ORCON/REL A"
        );
        assert_eq!(
            normalize("L0//NOCON/ORCON", definition, Style::Long, false),
            "LEVEL 0//NO CONTRACTORS/ORIGINATOR CONTROLLED"
        );
        assert_eq!(
            normalize("L0//ORCON//R1", definition, Style::Short, false),
            "L0//ORCON/R1"
        );
    }

    #[test]
    fn test_solitary_display_name() {
        let definition = reference_definition();
        assert_eq!(normalize("L0//REL X", definition, Style::Short, false), "L0//XX");
        assert_eq!(normalize("L0//REL X", definition, Style::Long, false), "LEVEL 0//XX");
        assert_eq!(
            normalize("L0//REL X/A", definition, Style::Short, false),
            "L0//REL A/X"
        );
        assert_eq!(normalize("L0//XX/R3", definition, Style::Short, false), "L0//XX/R3");
    }

    #[test]
    fn test_ad_hoc_groups_render_under_their_own_name() {
        let yaml = REFERENCE_YAML.replace("dynamic_groups: false", "dynamic_groups: true");
        let definition = Definition::from_yaml_str(&yaml).unwrap();
        assert_eq!(
            normalize("L0//REL sales team/A", &definition, Style::Long, false),
            "LEVEL 0//REL TO GROUP A/SALES TEAM"
        );
        assert_eq!(
            normalize("L0//REL sales team/A", &definition, Style::Short, false),
            "L0//REL A/SALES TEAM"
        );
        assert_eq!(
            normalize("L0//ORCON/REL OPS", &definition, Style::Long, true),
            "L0//ORCON/REL OPS"
        );
    }

    #[test]
    fn test_style_from_str() {
        assert_eq!("long".parse::<Style>(), Ok(Style::Long));
        assert_eq!(" Short ".parse::<Style>(), Ok(Style::Short));
        assert!("medium".parse::<Style>().is_err());
        assert_eq!(Style::Short.to_string(), "short");
    }
}
