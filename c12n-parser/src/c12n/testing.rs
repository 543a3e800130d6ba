//! Shared fixture definitions for unit and integration tests.
//!
//! `TLP_YAML` is a Traffic Light Protocol scheme; `REFERENCE_YAML` exercises every
//! definition feature (required-group tags, solitary names, subgroup limits).

use crate::c12n::definition::Definition;
use once_cell::sync::Lazy;

pub const TLP_YAML: &str = include_str!("../../fixtures/tlp.yml");
pub const REFERENCE_YAML: &str = include_str!("../../fixtures/reference.yml");

static TLP: Lazy<Definition> =
    Lazy::new(|| Definition::from_yaml_str(TLP_YAML).expect("tlp fixture must compile"));

static REFERENCE: Lazy<Definition> = Lazy::new(|| {
    Definition::from_yaml_str(REFERENCE_YAML).expect("reference fixture must compile")
});

pub fn tlp_definition() -> &'static Definition {
    &TLP
}

pub fn reference_definition() -> &'static Definition {
    &REFERENCE
}
