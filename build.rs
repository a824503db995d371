use clap::CommandFactory;
use clap_complete::generate_to;
use clap_complete::shells::{Bash, Fish, Zsh};
use std::env;
use std::io::Error;

include!("src/cli.rs");

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Opts::command();
    let bin = "invoicegen";

    let paths = [
        generate_to(Bash, &mut cmd, bin, &outdir)?,
        generate_to(Zsh, &mut cmd, bin, &outdir)?,
        generate_to(Fish, &mut cmd, bin, &outdir)?,
    ];

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=build.rs");
    for path in paths.iter() {
        println!("cargo:warning=completion file is generated: {:?}", path);
    }

    Ok(())
}
