//! Code emission.
//!
//! A resolved [`Grammar`] is rendered into two Rust source artifacts that are
//! meant to be `include!`d side by side into one module:
//!
//! - the *declaration* artifact holds the `NodeType` enum, the `Node` trait,
//!   one trait per abstract node, one struct per leaf node, the `Visitor` and
//!   `RecursiveVisitor` traits and the `Dumper` struct, nested in `pub mod`
//!   blocks for the grammar's namespaces;
//! - the *definition* artifact holds every `impl` block in a private module
//!   that imports the declarations.
//!
//! Neither artifact uses inner attributes, so both are valid `include!` input.

mod dumper;
mod nodes;
mod visitors;

use std::path::Path;

use tracing::debug;

use crate::{
    naming::{LINE_WIDTH, module_ident, wrap_doc},
    resolver::Grammar,
    spec::{ChildKind, ChildNode, Multiplicity, NodeId},
};

const BANNER: &str = "// This file was generated by tree-gen. Do not edit.";

/// Width of one indentation level in generated code.
const INDENT: &str = "    ";

/// The two rendered source files of one generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub decl: String,
    pub defn: String,
}

/// Renders both artifacts for `grammar`.
#[must_use]
pub fn emit(grammar: &Grammar) -> Artifacts {
    let decl = emit_declarations(grammar);
    let defn = emit_definitions(grammar);
    debug!(
        decl_bytes = decl.len(),
        defn_bytes = defn.len(),
        "emitted tree artifacts"
    );
    Artifacts { decl, defn }
}

fn emit_declarations(grammar: &Grammar) -> String {
    let mut w = CodeWriter::new();
    w.line(BANNER);
    w.blank();
    open_namespaces(&mut w, grammar);

    let mut imports = vec!["Annotations"];
    for multiplicity in [
        Multiplicity::Any,
        Multiplicity::Many,
        Multiplicity::Maybe,
    ] {
        if grammar.uses(multiplicity) {
            imports.push(multiplicity.container());
        }
    }
    imports.extend(["NotWellFormed", "One"]);
    w.line("#[allow(unused_imports)]");
    w.line(format!("use {}::{{{}}};", grammar.tree_scope, imports.join(", ")));
    for line in &grammar.decl_uses {
        w.line(line);
    }
    w.blank();

    nodes::emit_node_type_enum(&mut w, grammar);
    nodes::emit_node_trait(&mut w, grammar);
    for id in grammar.generation_order() {
        nodes::emit_node_declaration(&mut w, grammar, id);
    }
    visitors::emit_visitor_trait(&mut w, grammar);
    visitors::emit_recursive_visitor_trait(&mut w, grammar);
    dumper::emit_dumper_struct(&mut w);

    for _ in &grammar.namespaces {
        w.close();
    }
    w.finish()
}

fn emit_definitions(grammar: &Grammar) -> String {
    let mut w = CodeWriter::new();
    w.line(BANNER);
    w.blank();
    w.line("#[allow(unused_imports, clippy::all, clippy::pedantic)]");
    w.open(format!("mod {}", definitions_module(grammar)));
    let namespace_path: String = grammar
        .namespaces
        .iter()
        .map(|namespace| format!("{}::", namespace.name))
        .collect();
    w.line(format!("use super::{namespace_path}*;"));
    w.line(format!(
        "use {}::{{Annotations, Any, Dump, Many, Maybe, NotWellFormed, One, TreeNode}};",
        grammar.tree_scope
    ));
    for line in &grammar.defn_uses {
        w.line(line);
    }
    w.line("use ::std::{cell::RefCell, fmt, rc::Rc};");
    w.blank();

    for id in grammar.generation_order() {
        nodes::emit_node_definitions(&mut w, grammar, id);
    }
    nodes::emit_root_definitions(&mut w);
    visitors::emit_visitor_blanket_impl(&mut w, grammar);
    dumper::emit_dumper_impls(&mut w, grammar);

    w.close();
    w.finish()
}

/// Opens one `pub mod` per namespace. The first namespace doc found
/// documents the innermost module.
fn open_namespaces(w: &mut CodeWriter, grammar: &Grammar) {
    let doc = grammar
        .namespaces
        .iter()
        .map(|namespace| namespace.doc.as_str())
        .find(|doc| !doc.is_empty());
    let last = grammar.namespaces.len().saturating_sub(1);
    for (index, namespace) in grammar.namespaces.iter().enumerate() {
        if index == last
            && let Some(doc) = doc
        {
            w.doc(doc);
        }
        w.open(format!("pub mod {}", namespace.name));
    }
}

/// Name of the private module wrapping the definition artifact.
fn definitions_module(grammar: &Grammar) -> String {
    let stem = Path::new(&grammar.defn_file)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("tree");
    format!("{}_defs", module_ident(stem))
}

/// Type of a node as stored in containers: the struct for leaves, the trait
/// object for abstract nodes.
pub(crate) fn node_type_ref(grammar: &Grammar, id: NodeId) -> String {
    let node = grammar.node(id);
    if node.is_leaf() {
        node.title_case_name.clone()
    } else {
        format!("dyn {}", node.title_case_name)
    }
}

/// Rust type of a child field.
pub(crate) fn field_type(grammar: &Grammar, child: &ChildNode) -> String {
    match &child.kind {
        ChildKind::Node { multiplicity, .. } => {
            let target = child
                .target()
                .map_or_else(|| "dyn Node".to_string(), |id| node_type_ref(grammar, id));
            format!("{}<{target}>", multiplicity.container())
        }
        ChildKind::External {
            multiplicity,
            type_name,
        } => format!("{}<{type_name}>", multiplicity.container()),
        ChildKind::Primitive { type_name } => type_name.clone(),
    }
}

/// Line-oriented writer for generated source with indentation tracking.
pub(crate) struct CodeWriter {
    out: String,
    depth: usize,
}

impl CodeWriter {
    pub(crate) fn new() -> Self {
        Self {
            out: String::new(),
            depth: 0,
        }
    }

    /// Writes `text` at the current indentation. Embedded line breaks start
    /// new lines at the same indentation.
    pub(crate) fn line(&mut self, text: impl AsRef<str>) {
        for line in text.as_ref().split('\n') {
            if !line.is_empty() {
                for _ in 0..self.depth {
                    self.out.push_str(INDENT);
                }
                self.out.push_str(line);
            }
            self.out.push('\n');
        }
    }

    /// Writes an empty line, collapsing runs of them.
    pub(crate) fn blank(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    /// Writes `header {` and indents.
    pub(crate) fn open(&mut self, header: impl AsRef<str>) {
        self.line(format!("{} {{", header.as_ref()));
        self.depth += 1;
    }

    /// Dedents and writes `}`, dropping a blank line right before it.
    pub(crate) fn close(&mut self) {
        self.close_with("");
    }

    /// Like [`Self::close`], with `suffix` appended to the brace.
    pub(crate) fn close_with(&mut self, suffix: &str) {
        if self.out.ends_with("\n\n") {
            self.out.pop();
        }
        self.depth = self.depth.saturating_sub(1);
        self.line(format!("}}{suffix}"));
    }

    /// Closes the current block with `} else {` and opens the else branch.
    pub(crate) fn else_branch(&mut self) {
        self.close_with(" else {");
        self.depth += 1;
    }

    /// Writes `doc` as `///` comments wrapped to the line width.
    pub(crate) fn doc(&mut self, doc: &str) {
        let used = self.depth * INDENT.len() + 4;
        let width = LINE_WIDTH.saturating_sub(used).max(20);
        for line in wrap_doc(doc, width) {
            if line.is_empty() {
                self.line("///");
            } else {
                self.line(format!("/// {line}"));
            }
        }
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}
