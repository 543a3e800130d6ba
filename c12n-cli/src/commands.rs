//! Subcommand handlers. Each returns the text to print on stdout.

use anyhow::{Context, Result};
use c12n_parser::c12n::rules::violations;
use c12n_parser::{
    apply_rules, apply_user_rules, check, format, join_all, normalize, parse, Definition, Style,
    Verdict,
};
use serde_json::json;

/// Rendering options resolved from config and flags.
#[derive(Debug, Clone, Copy)]
pub struct Display {
    pub style: Style,
    pub mobile: bool,
}

pub fn normalize_markings(markings: &[&str], definition: &Definition, display: Display) -> String {
    markings
        .iter()
        .map(|marking| normalize(marking, definition, display.style, display.mobile))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn parts(marking: &str, definition: &Definition) -> Result<String> {
    let parts = parse(marking, definition);
    serde_json::to_string_pretty(&parts).context("serializing parts")
}

pub fn max(markings: &[&str], definition: &Definition, display: Display) -> String {
    let parsed: Vec<_> = markings
        .iter()
        .map(|marking| parse(marking, definition))
        .collect();
    match join_all(&parsed) {
        Some(joined) => format(&joined, definition, display.style, display.mobile),
        None => String::new(),
    }
}

/// Access verdict and the line describing it.
pub fn access(
    holder: Option<&str>,
    target: Option<&str>,
    definition: &Definition,
    enforce: bool,
) -> (bool, String) {
    match check(holder, target, definition, enforce) {
        Ok(Verdict::Unmarked) => (true, "allowed: data is unmarked".to_string()),
        Ok(Verdict::NotEnforced) => (true, "allowed: enforcement disabled".to_string()),
        Ok(Verdict::Allowed) => (true, "allowed".to_string()),
        Err(reason) => (false, format!("denied: {reason}")),
    }
}

pub fn rules(marking: &str, definition: &Definition, user: bool, display: Display) -> Result<String> {
    let parts = parse(marking, definition);
    let outcome = if user {
        apply_user_rules(&parts, definition)
    } else {
        apply_rules(&parts, definition)
    };
    let remaining: Vec<String> = violations(&outcome.parts, definition)
        .iter()
        .map(ToString::to_string)
        .collect();
    let report = json!({
        "marking": format(&outcome.parts, definition, display.style, display.mobile),
        "parts": outcome.parts,
        "disabled": outcome.disabled,
        "violations": remaining,
    });
    serde_json::to_string_pretty(&report).context("serializing rule outcome")
}

pub fn levels(definition: &Definition) -> String {
    definition
        .levels()
        .map(|level| format!("{}\t{}\t{}", level.lvl, level.short_name, level.name))
        .collect::<Vec<_>>()
        .join("\n")
}
