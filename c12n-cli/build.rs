use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

include!("src/cli.rs");

fn main() -> Result<(), Error> {
    println!("cargo:rerun-if-changed=src/cli.rs");

    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = build_cli();

    generate_to(Bash, &mut cmd, "c12n", &outdir)?;
    generate_to(Zsh, &mut cmd, "c12n", &outdir)?;
    generate_to(Fish, &mut cmd, "c12n", &outdir)?;

    Ok(())
}
