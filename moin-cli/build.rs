use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command tree from src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
fn page_source_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("renames")
            .long("renames")
            .help("Rename list (PAGE|old|new and FILE|page|old|new lines)")
            .value_hint(ValueHint::FilePath),
    )
    .arg(
        Arg::new("intermap")
            .long("intermap")
            .help("intermap.txt with additional interwiki tags")
            .value_hint(ValueHint::FilePath),
    )
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("moinconv")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Migrate MoinMoin 1.5 wiki pages to the 1.6 markup")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to a moin.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log progress to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(page_source_args(
            Command::new("convert")
                .about("Convert a single page (default command)")
                .arg(
                    Arg::new("input")
                        .help("Page file in 1.5 markup")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("page")
                        .long("page")
                        .help("Name of the page")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("pages")
                        .long("pages")
                        .help("Page directory used to look up existing pages")
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        ))
        .subcommand(page_source_args(
            Command::new("migrate")
                .about("Convert every page of a page directory")
                .arg(
                    Arg::new("pages")
                        .help("Page directory")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Directory for the converted pages")
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the report as JSON")
                        .action(ArgAction::SetTrue),
                ),
        ))
        .subcommand(
            Command::new("inspect")
                .about("List the rule matches of every line of a page")
                .arg(
                    Arg::new("path")
                        .help("Page file in 1.5 markup")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(Command::new("macros").about("List the known macro names"));

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "moinconv", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "moinconv", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "moinconv", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
