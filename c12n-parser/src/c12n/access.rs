//! Accessibility predicate: may the holder of one marking see data marked with another.
//!
//! All of the following must hold when enforcement is on:
//!
//! - the holder's level ranks at least as high as the target's
//! - the holder carries every required tag of the target (AND)
//! - the target has no groups, or the holder shares at least one of them (OR)
//!
//! Subgroups never gate access. An unresolvable level on either side denies.

use crate::c12n::compare::{contains_all, intersects_any, level_at_least};
use crate::c12n::definition::Definition;
use crate::c12n::parsing::parse;
use crate::c12n::parts::Parts;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    #[error("holder marking has no valid level")]
    InvalidHolderLevel,

    #[error("target marking has no valid level")]
    InvalidTargetLevel,

    #[error("level {holder} is below {target}")]
    LevelTooLow { holder: String, target: String },

    #[error("missing required tags: {}", .missing.join("/"))]
    MissingRequired { missing: Vec<String> },

    #[error("no shared group with: {}", .groups.join("/"))]
    NoSharedGroup { groups: Vec<String> },
}

/// Check access, naming the first failed condition.
pub fn evaluate(holder: &Parts, target: &Parts, enforce: bool) -> Result<(), AccessDenied> {
    if !enforce {
        return Ok(());
    }

    let (Some(holder_level), Some(target_level)) = (holder.level().name(), target.level().name())
    else {
        return Err(if holder.is_valid() {
            AccessDenied::InvalidTargetLevel
        } else {
            AccessDenied::InvalidHolderLevel
        });
    };
    if !level_at_least(holder.level(), target.level()) {
        return Err(AccessDenied::LevelTooLow {
            holder: holder_level.to_string(),
            target: target_level.to_string(),
        });
    }

    if !contains_all(holder.required(), target.required()) {
        return Err(AccessDenied::MissingRequired {
            missing: target
                .required()
                .difference(holder.required())
                .cloned()
                .collect(),
        });
    }

    if !target.groups().is_empty() && !intersects_any(holder.groups(), target.groups()) {
        return Err(AccessDenied::NoSharedGroup {
            groups: target.groups().iter().cloned().collect(),
        });
    }

    Ok(())
}

pub fn is_accessible_parts(holder: &Parts, target: &Parts, enforce: bool) -> bool {
    evaluate(holder, target, enforce).is_ok()
}

/// Why a check passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The target is missing or blank.
    Unmarked,
    /// Enforcement is off.
    NotEnforced,
    /// Every condition holds.
    Allowed,
}

/// Check access between two marking strings.
///
/// A missing or blank target denotes unmarked data and is always accessible. A
/// missing holder is parsed as an empty marking, which has no valid level.
pub fn check(
    holder: Option<&str>,
    target: Option<&str>,
    definition: &Definition,
    enforce: bool,
) -> Result<Verdict, AccessDenied> {
    let Some(target_text) = target.filter(|text| !text.trim().is_empty()) else {
        return Ok(Verdict::Unmarked);
    };
    if !enforce {
        return Ok(Verdict::NotEnforced);
    }
    let holder_text = holder.unwrap_or_default();
    evaluate(
        &parse(holder_text, definition),
        &parse(target_text, definition),
        enforce,
    )
    .map(|()| Verdict::Allowed)
    .inspect_err(|reason| {
        tracing::debug!(holder = holder_text, marking = target_text, %reason, "access denied");
    })
}

/// String form of the predicate. See [`check`].
pub fn is_accessible(
    holder: Option<&str>,
    target: Option<&str>,
    definition: &Definition,
    enforce: bool,
) -> bool {
    check(holder, target, definition, enforce).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::c12n::testing::{reference_definition, tlp_definition};

    fn allowed(holder: &str, target: &str) -> bool {
        is_accessible(Some(holder), Some(target), reference_definition(), true)
    }

    #[test]
    fn test_not_enforced() {
        let definition = reference_definition();
        assert!(is_accessible(Some("L0"), Some("L1"), definition, false));
        assert!(is_accessible(Some("L3"), Some("L1"), definition, false));
        assert!(is_accessible(None, Some("L1"), definition, false));
    }

    #[test]
    fn test_unmarked_target() {
        let definition = reference_definition();
        assert!(is_accessible(Some("L1"), None, definition, true));
        assert!(is_accessible(Some("L2"), Some(""), definition, true));
        assert!(is_accessible(Some("L2"), Some("   "), definition, true));
        assert!(is_accessible(None, None, definition, true));
    }

    #[test]
    fn test_missing_holder_is_denied() {
        assert!(!is_accessible(None, Some("L0"), reference_definition(), true));
    }

    #[test]
    fn test_levels() {
        assert!(allowed("L1", "L1"));
        assert!(allowed("L1", "L0"));
        assert!(!allowed("L0", "L1"));
        assert!(!allowed("L1//REL A", "L2"));
        assert!(!allowed("L0//AC", "L1"));
        assert!(!allowed("L3", "L1"));
        assert!(!allowed("L2", "L9"));
    }

    #[test]
    fn test_required_tags() {
        assert!(!allowed("L2", "L0//LE"));
        assert!(allowed("L2//LE", "L0//LE"));
        assert!(!allowed("L2//LE", "L2//LE/AC"));
        assert!(allowed("L2//LE/AC", "L2//AC/LE"));
        assert!(!allowed("L2//ORCON", "L2//ORCON/NOCON"));
        assert!(allowed("L2//NOCON/ORCON", "L2//ORCON/NOCON"));
    }

    #[test]
    fn test_groups() {
        assert!(!allowed("L2", "L2//REL A"));
        assert!(!allowed("L2//REL B", "L2//REL A"));
        assert!(allowed("L2//REL B", "L2//REL A, B"));
        assert!(allowed("L2//REL B", "L2"));
        assert!(allowed("L1//LE//REL A", "L1//LE//REL A"));
    }

    #[test]
    fn test_subgroups_do_not_gate() {
        assert!(allowed("L2", "L2//R1"));
        assert!(allowed("L2//REL X", "L2//REL X/R3"));
    }

    #[test]
    fn test_evaluate_names_the_failure() {
        let definition = tlp_definition();
        let holder = parse("TLP:A//MPL", definition);

        let denied = evaluate(&holder, &parse("TLP:R", definition), true).unwrap_err();
        assert_eq!(
            denied,
            AccessDenied::LevelTooLow {
                holder: "TLP:A".to_string(),
                target: "TLP:R".to_string()
            }
        );

        let denied = evaluate(&holder, &parse("TLP:G//MAPLE/LEAF", definition), true).unwrap_err();
        assert_eq!(denied.to_string(), "missing required tags: LF");

        let denied = evaluate(&holder, &parse("TLP:G//REL MOOSE/BEAVER", definition), true)
            .unwrap_err();
        assert_eq!(denied.to_string(), "no shared group with: B/M");

        let denied = evaluate(&Parts::invalid(), &holder, true).unwrap_err();
        assert_eq!(denied, AccessDenied::InvalidHolderLevel);
        let denied = evaluate(&holder, &Parts::invalid(), true).unwrap_err();
        assert_eq!(denied, AccessDenied::InvalidTargetLevel);

        assert!(evaluate(&Parts::invalid(), &Parts::invalid(), false).is_ok());
    }

    #[test]
    fn test_check_verdicts() {
        let definition = reference_definition();
        assert_eq!(check(Some("L1"), None, definition, true), Ok(Verdict::Unmarked));
        assert_eq!(check(None, Some("  "), definition, false), Ok(Verdict::Unmarked));
        assert_eq!(check(None, Some("L2"), definition, false), Ok(Verdict::NotEnforced));
        assert_eq!(
            check(Some("L2//REL A"), Some("L1//REL A"), definition, true),
            Ok(Verdict::Allowed)
        );
        assert_eq!(
            check(None, Some("L0"), definition, true),
            Err(AccessDenied::InvalidHolderLevel)
        );
        assert_eq!(
            check(Some("L2"), Some("L2//REL B"), definition, true),
            Err(AccessDenied::NoSharedGroup {
                groups: vec!["B".to_string()]
            })
        );
    }
}
