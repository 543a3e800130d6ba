use clap::{Arg, ArgAction, Command, ValueHint};

pub fn build_cli() -> Command {
    Command::new("c12n")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse, normalize, join and check classification markings")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("definition")
                .long("definition")
                .short('d')
                .global(true)
                .help("Classification definition file (YAML, or JSON by extension)")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the built-in defaults")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("style")
                .long("style")
                .short('s')
                .global(true)
                .help("Display style for rendered markings")
                .value_parser(["long", "short"]),
        )
        .arg(
            Arg::new("mobile")
                .long("mobile")
                .global(true)
                .help("Force short names regardless of style")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("normalize")
                .about("Render markings in canonical form")
                .arg(
                    Arg::new("markings")
                        .help("Markings to normalize, one output line each")
                        .required(true)
                        .num_args(1..),
                ),
        )
        .subcommand(
            Command::new("parts")
                .about("Print the parsed components of a marking as JSON")
                .arg(Arg::new("marking").help("Marking to parse").required(true)),
        )
        .subcommand(
            Command::new("max")
                .about("Join markings into the least marking dominating all of them")
                .arg(
                    Arg::new("markings")
                        .help("Markings to join")
                        .required(true)
                        .num_args(1..),
                ),
        )
        .subcommand(
            Command::new("access")
                .about("Check whether a holder may see data carrying a marking")
                .arg(
                    Arg::new("holder")
                        .long("holder")
                        .help("The holder's clearance marking (absent means no clearance)"),
                )
                .arg(
                    Arg::new("enforce")
                        .long("enforce")
                        .help("Override the configured enforcement mode")
                        .value_parser(["definition", "always", "never"]),
                )
                .arg(
                    Arg::new("target")
                        .help("Marking of the data (absent means unmarked)")
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("rules")
                .about("Apply editor rules and list options that must be disabled")
                .arg(Arg::new("marking").help("Marking being edited").required(true))
                .arg(
                    Arg::new("user")
                        .long("user")
                        .help("Treat the marking as a user clearance (no auto-select)")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("levels").about("List the definition's levels by rank"))
}
