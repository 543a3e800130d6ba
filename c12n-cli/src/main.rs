//! Command-line interface for classification markings
//!
//! Usage:
//!   c12n --definition `<path>` normalize `<marking>`...      - Canonical rendering
//!   c12n --definition `<path>` parts `<marking>`             - Parsed components as JSON
//!   c12n --definition `<path>` max `<marking>`...            - Join of several markings
//!   c12n --definition `<path>` access --holder `<m>` `<m>`   - Accessibility check
//!   c12n --definition `<path>` rules [--user] `<marking>`    - Editor rule engine
//!   c12n --definition `<path>` levels                        - Levels by rank
//!
//! Settings are layered: built-in defaults, `--config` file, `C12N_*` environment
//! variables, then command-line flags.
//!
//! The clap command lives in `cli.rs`, which `build.rs` includes to generate shell
//! completions.

mod cli;
mod commands;

use anyhow::{anyhow, Context, Result};
use c12n_config::{C12nConfig, Loader};
use c12n_parser::Definition;
use clap::ArgMatches;
use commands::Display;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let matches = cli::build_cli().get_matches();
    match run(&matches) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &ArgMatches) -> Result<ExitCode> {
    let config = load_config(matches)?;
    init_logging(&config);

    let path = config.definition.path.as_ref().ok_or_else(|| {
        anyhow!("no classification definition configured; pass --definition or set definition.path")
    })?;
    let definition = Definition::from_path(path)
        .with_context(|| format!("loading definition {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        levels = definition.levels().count(),
        enforce = definition.enforce(),
        "definition loaded"
    );
    let display = Display {
        style: config.display.style.into(),
        mobile: config.display.mobile,
    };

    let output = match matches.subcommand() {
        Some(("normalize", sub)) => {
            commands::normalize_markings(&values(sub, "markings"), &definition, display)
        }
        Some(("parts", sub)) => commands::parts(value(sub, "marking")?, &definition)?,
        Some(("max", sub)) => commands::max(&values(sub, "markings"), &definition, display),
        Some(("access", sub)) => {
            let enforce = config.access.enforce.resolve(definition.enforce());
            tracing::debug!(mode = ?config.access.enforce, enforce, "access enforcement resolved");
            let holder = sub.get_one::<String>("holder").map(String::as_str);
            let target = sub.get_one::<String>("target").map(String::as_str);
            let (allowed, verdict) = commands::access(holder, target, &definition, enforce);
            println!("{verdict}");
            return Ok(if allowed {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            });
        }
        Some(("rules", sub)) => commands::rules(
            value(sub, "marking")?,
            &definition,
            sub.get_flag("user"),
            display,
        )?,
        Some(("levels", _)) => commands::levels(&definition),
        Some((other, _)) => return Err(anyhow!("unknown command '{other}'")),
        None => return Err(anyhow!("no command given")),
    };

    println!("{output}");
    Ok(ExitCode::SUCCESS)
}

/// Layer defaults, `--config`, environment and flags.
fn load_config(matches: &ArgMatches) -> Result<C12nConfig> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    loader = loader.with_env_prefix("C12N");

    if let Some(path) = matches.get_one::<String>("definition") {
        loader = loader.set_override("definition.path", path.as_str())?;
    }
    if let Some(style) = matches.get_one::<String>("style") {
        loader = loader.set_override("display.style", style.as_str())?;
    }
    if matches.get_flag("mobile") {
        loader = loader.set_override("display.mobile", true)?;
    }
    if let Some(("access", sub)) = matches.subcommand() {
        if let Some(mode) = sub.get_one::<String>("enforce") {
            loader = loader.set_override("access.enforce", mode.as_str())?;
        }
    }

    loader.build().context("loading configuration")
}

fn init_logging(config: &C12nConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn value<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing argument '{id}'"))
}

fn values<'a>(matches: &'a ArgMatches, id: &str) -> Vec<&'a str> {
    matches
        .get_many::<String>(id)
        .map(|values| values.map(String::as_str).collect())
        .unwrap_or_default()
}
