//! Property-based tests for the marking algebra
//!
//! Markings are generated from the TLP fixture's own spellings (long, short and
//! alias forms, random case) so every token resolves; noise tokens are added
//! separately where dropping them is the property under test.

use c12n_parser::c12n::testing::tlp_definition;
use c12n_parser::{format, is_accessible_parts, join, parse, Parts, Style};
use proptest::prelude::*;

const LEVELS: &[&str] = &[
    "TLP:CLEAR",
    "TLP:C",
    "TLP:WHITE",
    "TLP:GREEN",
    "TLP:G",
    "TLP:AMBER",
    "TLP:A",
    "TLP:AMBER+STRICT",
    "TLP:A+S",
    "TLP:RED",
    "TLP:R",
];
const REQUIRED: &[&str] = &["MAPLE", "MPL", "ERABLE", "LEAF", "LF"];
const GROUPS: &[&str] = &["BEAVER", "B", "CASTOR", "MOOSE", "M"];
const SUBGROUPS: &[&str] = &["SUBGRP", "SUB", "SG"];
const ALIASES: &[&str] = &["TLP:WHITE", "ERABLE", "CASTOR", "SG"];
const RELATION_MARKERS: &[&str] = &["REL TO ", "REL ", ""];

fn random_case(text: String) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<bool>(), text.len()).prop_map(move |flips| {
        text.chars()
            .zip(flips)
            .map(|(c, lower)| if lower { c.to_ascii_lowercase() } else { c })
            .collect()
    })
}

fn pick(options: &'static [&'static str], max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(options), 0..=max)
        .prop_map(|items| items.into_iter().map(str::to_string).collect())
}

/// Generate a well-formed marking whose every token resolves
fn marking_strategy() -> impl Strategy<Value = String> {
    (
        prop::sample::select(LEVELS),
        pick(REQUIRED, 3),
        pick(GROUPS, 3),
        pick(SUBGROUPS, 2),
        prop::sample::select(RELATION_MARKERS),
    )
        .prop_map(|(level, required, groups, subgroups, marker)| {
            let mut out = level.to_string();
            if !required.is_empty() {
                out.push_str("//");
                out.push_str(&required.join("/"));
            }
            let release: Vec<String> = groups.into_iter().chain(subgroups).collect();
            if !release.is_empty() {
                out.push_str("//");
                out.push_str(marker);
                out.push_str(&release.join("/"));
            }
            out
        })
        .prop_flat_map(random_case)
}

fn style_strategy() -> impl Strategy<Value = Style> {
    prop_oneof![Just(Style::Long), Just(Style::Short)]
}

fn parsed(text: &str) -> Parts {
    parse(text, tlp_definition())
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_round_trip(text in marking_strategy(), style in style_strategy()) {
            let definition = tlp_definition();
            let parts = parsed(&text);
            let rendered = format(&parts, definition, style, false);
            prop_assert_eq!(parse(&rendered, definition), parts, "rendered: {}", rendered);
        }

        #[test]
        fn test_format_is_canonical(text in marking_strategy(), style in style_strategy()) {
            let definition = tlp_definition();
            let once = format(&parsed(&text), definition, style, false);
            let twice = format(&parsed(&once), definition, style, false);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn test_aliases_never_rendered(text in marking_strategy(), style in style_strategy()) {
            let rendered = format(&parsed(&text), tlp_definition(), style, false);
            for alias in ALIASES {
                prop_assert!(
                    !rendered.split("//").flat_map(|clause| clause.split('/')).any(|t| t == *alias),
                    "alias {} leaked into {}", alias, rendered
                );
            }
        }

        #[test]
        fn test_noise_tokens_are_dropped(text in marking_strategy(), noise in "[QZ]{3,6}") {
            let with_noise = format!("{}//{}", text, noise);
            prop_assert_eq!(parsed(&with_noise), parsed(&text));
        }

        #[test]
        fn test_join_commutative(a in marking_strategy(), b in marking_strategy()) {
            let (a, b) = (parsed(&a), parsed(&b));
            prop_assert_eq!(join(&a, &b), join(&b, &a));
        }

        #[test]
        fn test_join_idempotent(a in marking_strategy()) {
            let a = parsed(&a);
            prop_assert_eq!(join(&a, &a), a);
        }

        #[test]
        fn test_join_associative(
            a in marking_strategy(),
            b in marking_strategy(),
            c in marking_strategy(),
        ) {
            let (a, b, c) = (parsed(&a), parsed(&b), parsed(&c));
            prop_assert_eq!(join(&join(&a, &b), &c), join(&a, &join(&b, &c)));
        }

        #[test]
        fn test_join_monotonic(a in marking_strategy(), b in marking_strategy()) {
            let (a, b) = (parsed(&a), parsed(&b));
            let joined = join(&a, &b);
            prop_assert!(is_accessible_parts(&joined, &a, true));
            prop_assert!(is_accessible_parts(&joined, &b, true));
        }

        #[test]
        fn test_access_reflexive(a in marking_strategy()) {
            let a = parsed(&a);
            prop_assert!(is_accessible_parts(&a, &a, true));
        }

        #[test]
        fn test_enforce_bypass(a in ".{0,40}", b in ".{0,40}") {
            prop_assert!(is_accessible_parts(&parsed(&a), &parsed(&b), false));
        }

        #[test]
        fn test_parse_is_total(text in ".{0,80}") {
            let definition = tlp_definition();
            let parts = parse(&text, definition);
            let _ = format(&parts, definition, Style::Long, true);
        }
    }
}
