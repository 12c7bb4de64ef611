#![warn(clippy::pedantic)]

//! # tree-gen
//!
//! Command line driver of the syntax tree generator.
//!
//! ```bash
//! tree-gen <spec-file> <decl-output-dir> <defn-output-dir>
//! ```
//!
//! The tree grammar at `<spec-file>` is parsed and resolved, then the
//! declaration and definition artifacts it names are written into the two
//! directories. Logging goes to stderr and is controlled through `RUST_LOG`
//! (default `warn`).
//!
//! Exactly three arguments are accepted. Any other count, `--help` and
//! `--version` included, prints the one-line usage.
//!
//! ## Exit codes
//! * 0 – both artifacts were written.
//! * 1 – wrong arguments, unreadable grammar, parse or analysis error, or an
//!   output file that could not be written.

mod parser;

use std::{env, process};

use clap::Parser;
use parser::{ARGUMENT_COUNT, Cli, USAGE};
use tracing_subscriber::{EnvFilter, fmt};

/// Entry point for the CLI executable.
///
/// On any failure a diagnostic is printed to stderr and the process exits
/// with code `1`.
fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = match Cli::try_parse() {
        Ok(args) if env::args_os().count() == ARGUMENT_COUNT + 1 => args,
        _ => {
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    if let Err(e) = tree_gen::generate(&args.spec, &args.decl_dir, &args.defn_dir) {
        eprintln!("{e:#}");
        process::exit(1);
    }
}
