//! Level ordering and set containment.

use crate::c12n::parts::Level;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// True iff both levels are valid and `a` ranks at least as high as `b`.
pub fn level_at_least(a: &Level, b: &Level) -> bool {
    match (a.rank(), b.rank()) {
        (Some(a), Some(b)) => a >= b,
        _ => false,
    }
}

/// Order for the join: any valid level beats `Invalid`.
pub fn level_order(a: &Level, b: &Level) -> Ordering {
    a.rank().cmp(&b.rank())
}

/// The more restrictive of two levels. `Invalid` never wins over a valid level.
pub fn max_level(a: Level, b: Level) -> Level {
    match level_order(&a, &b) {
        Ordering::Less => b,
        _ => a,
    }
}

pub fn contains_all(superset: &BTreeSet<String>, subset: &BTreeSet<String>) -> bool {
    subset.is_subset(superset)
}

pub fn intersects_any(a: &BTreeSet<String>, b: &BTreeSet<String>) -> bool {
    !a.is_disjoint(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(rank: u32) -> Level {
        Level::Known {
            name: format!("L{rank}"),
            rank,
        }
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_level_at_least() {
        assert!(level_at_least(&known(5), &known(1)));
        assert!(level_at_least(&known(5), &known(5)));
        assert!(!level_at_least(&known(1), &known(5)));
        assert!(!level_at_least(&Level::Invalid, &known(1)));
        assert!(!level_at_least(&known(1), &Level::Invalid));
        assert!(!level_at_least(&Level::Invalid, &Level::Invalid));
    }

    #[test]
    fn test_max_level() {
        assert_eq!(max_level(known(1), known(5)), known(5));
        assert_eq!(max_level(known(5), known(1)), known(5));
        assert_eq!(max_level(Level::Invalid, known(1)), known(1));
        assert_eq!(max_level(known(1), Level::Invalid), known(1));
        assert_eq!(max_level(Level::Invalid, Level::Invalid), Level::Invalid);
    }

    #[test]
    fn test_set_helpers() {
        assert!(contains_all(&set(&["A", "B"]), &set(&["A"])));
        assert!(contains_all(&set(&["A"]), &set(&[])));
        assert!(!contains_all(&set(&["A"]), &set(&["A", "B"])));

        assert!(intersects_any(&set(&["A", "B"]), &set(&["B", "C"])));
        assert!(!intersects_any(&set(&["A"]), &set(&["C"])));
        assert!(!intersects_any(&set(&[]), &set(&["C"])));
    }
}
