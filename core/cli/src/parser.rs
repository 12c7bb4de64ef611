//! Command line argument parsing for the `tree-gen` driver.

use std::path::PathBuf;

use clap::Parser;

/// One-line usage printed for any malformed command line.
pub(crate) const USAGE: &str = "Usage: tree-gen <spec-file> <decl-output-dir> <defn-output-dir>";

/// Number of positional arguments, not counting the program name.
pub(crate) const ARGUMENT_COUNT: usize = 3;

/// Command line interface of the tree generator.
///
/// The generator takes exactly three positional arguments. The names of the
/// two generated files come from the `decl_file` and `defn_file` directives of
/// the tree grammar; the arguments only choose the directories they are
/// written to. There are no flags: `--help`, `--version` and `--` are plain
/// arguments, and paths may start with `-`.
///
/// ```bash
/// tree-gen src/ast.tree src/generated src/generated
/// ```
#[derive(Parser, Debug)]
#[command(
    name = "tree-gen",
    disable_help_flag = true,
    disable_version_flag = true,
    about = "Generates a syntax tree implementation from a tree grammar",
    long_about = "Reads a tree grammar and writes the declaration artifact (node types, visitors, dumper) \
into <decl-output-dir> and the definition artifact (their implementations) into <defn-output-dir>."
)]
pub(crate) struct Cli {
    /// Path to the tree grammar.
    #[arg(allow_hyphen_values = true)]
    pub(crate) spec: PathBuf,

    /// Directory receiving the declaration artifact.
    #[arg(allow_hyphen_values = true)]
    pub(crate) decl_dir: PathBuf,

    /// Directory receiving the definition artifact.
    #[arg(allow_hyphen_values = true)]
    pub(crate) defn_dir: PathBuf,
}
