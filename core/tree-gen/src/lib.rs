#![warn(clippy::pedantic)]
//! Generator for type-safe polymorphic syntax trees.
//!
//! `tree-gen` reads a *tree grammar* (a declarative description of node
//! types, their children and their specialization relationships) and emits
//! the Rust source of a complete tree implementation: a `NodeType` tag enum,
//! a `Node` root trait with downcasts, one trait per abstract node and one
//! struct per leaf node with constructors, completeness checks, deep copies and
//! structural equality, a `Visitor` with inheritance fallback, a
//! `RecursiveVisitor` that traverses the tree by default, and a `Dumper` that
//! renders an indented debug view.
//!
//! ## Pipeline
//!
//! ```text
//! grammar text → parse → Specification → build → Grammar → emit → (decl, defn)
//! ```
//!
//! Each stage is available on its own:
//!
//! ```rust,no_run
//! use tree_gen::{emit, parse};
//!
//! let source = r#"
//!     decl_file "ast.rs"
//!     defn_file "ast_impl.rs"
//!     initializer tree_gen_runtime::initialize
//!     expression {
//!         literal { value: i64; }
//!     }
//! "#;
//! let grammar = parse(source)?.build()?;
//! let artifacts = emit(&grammar);
//! assert!(artifacts.decl.contains("pub struct Literal"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`generate`] runs the whole pipeline from a grammar file to the two output
//! directories, which is what the `tree-gen` binary does.
//!
//! ## Using the output
//!
//! Both artifacts are meant to be included side by side into one module of a
//! crate that depends on `tree-gen-runtime`:
//!
//! ```rust,ignore
//! include!(concat!(env!("OUT_DIR"), "/ast.rs"));
//! include!(concat!(env!("OUT_DIR"), "/ast_impl.rs"));
//! ```

pub mod emit;
pub mod errors;
pub mod naming;
pub mod parser;
pub mod resolver;
pub mod spec;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use tracing::{debug, info};

pub use emit::{Artifacts, emit};
pub use errors::{ParseError, SpecError};
pub use parser::parse;
pub use resolver::Grammar;
pub use spec::Specification;

/// Paths of the two files written by [`generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFiles {
    pub decl: PathBuf,
    pub defn: PathBuf,
}

/// Reads, parses and resolves the tree grammar at `spec_path`.
///
/// # Errors
///
/// Returns an error if:
/// - the file cannot be read (`Failed to open input file <path>`)
/// - the text is not a valid tree grammar, or repeats a directive or a node
///   name (`Failed to parse <path>`)
/// - resolution fails, for example on a missing directive or an undefined
///   node (`Analysis error`)
///
/// The underlying cause is attached to each error.
pub fn load(spec_path: &Path) -> anyhow::Result<Grammar> {
    let source = fs::read_to_string(spec_path)
        .with_context(|| format!("Failed to open input file {}", spec_path.display()))?;
    let specification =
        parse(&source).with_context(|| format!("Failed to parse {}", spec_path.display()))?;
    let grammar = specification.build().context("Analysis error")?;
    debug!(
        path = %spec_path.display(),
        nodes = grammar.nodes().len(),
        "loaded tree grammar"
    );
    Ok(grammar)
}

/// Runs the complete generator: loads the grammar at `spec_path`, renders
/// both artifacts and writes them as `<decl_dir>/<decl_file>` and
/// `<defn_dir>/<defn_file>`.
///
/// Nothing is written unless the grammar loads successfully. Both artifacts
/// are rendered before either file is written; a failure while writing can
/// still leave the declaration file behind.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
///
/// let out = Path::new("target/generated");
/// let files = tree_gen::generate(Path::new("ast.tree"), out, out)?;
/// println!("wrote {} and {}", files.decl.display(), files.defn.display());
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns the errors of [`load`], and `Failed to write declaration file
/// <path>` / `Failed to write definition file <path>` when an output file
/// cannot be written.
pub fn generate(spec_path: &Path, decl_dir: &Path, defn_dir: &Path) -> anyhow::Result<GeneratedFiles> {
    let grammar = load(spec_path)?;
    let artifacts = emit(&grammar);

    let files = GeneratedFiles {
        decl: decl_dir.join(&grammar.decl_file),
        defn: defn_dir.join(&grammar.defn_file),
    };
    fs::write(&files.decl, artifacts.decl).with_context(|| {
        format!("Failed to write declaration file {}", files.decl.display())
    })?;
    fs::write(&files.defn, artifacts.defn).with_context(|| {
        format!("Failed to write definition file {}", files.defn.display())
    })?;
    info!(
        decl = %files.decl.display(),
        defn = %files.defn.display(),
        "generated tree"
    );
    Ok(files)
}
