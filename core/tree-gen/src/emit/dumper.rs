//! Dumper emission: a recursive visitor rendering an indented text tree.
//!
//! ```text
//! !Binary( # 1:1..1:6
//!   lhs: <
//!     Literal(
//!       value: 1
//!     )
//!   >
//!   rhs: !MISSING
//! )
//! ```

use tracing::trace;

use super::CodeWriter;
use crate::{
    naming::field_ident,
    resolver::Grammar,
    spec::{ChildKind, ChildNode, Multiplicity, NodeType},
};

pub(super) fn emit_dumper_struct(w: &mut CodeWriter) {
    w.doc(
        "Recursive visitor writing the indented debug rendering used by \
         `Node::dump`. The first write error is kept and returned by `finish`.",
    );
    w.open("pub struct Dumper<'a>");
    w.line("pub(crate) out: &'a mut dyn ::std::fmt::Write,");
    w.line("pub(crate) indent: usize,");
    w.line("pub(crate) status: ::std::fmt::Result,");
    w.close();
}

pub(super) fn emit_dumper_impls(w: &mut CodeWriter, grammar: &Grammar) {
    let children = grammar
        .leaves()
        .flat_map(|leaf| grammar.all_children(leaf.id))
        .collect::<Vec<_>>();
    let has_primitives = children
        .iter()
        .any(|child| matches!(child.kind, ChildKind::Primitive { .. }));
    let has_externals = children
        .iter()
        .any(|child| matches!(child.kind, ChildKind::External { .. }));

    w.open("impl<'a> Dumper<'a>");
    w.doc("Creates a dumper writing to `out` at indentation level `indent`.");
    w.open("pub fn new(out: &'a mut dyn fmt::Write, indent: usize) -> Self");
    w.open("Self");
    w.line("out,");
    w.line("indent,");
    w.line("status: Ok(()),");
    w.close();
    w.close();
    w.blank();
    w.doc("Returns the first write error, if any.");
    w.line("///");
    w.line("/// # Errors");
    w.line("///");
    w.line("/// Propagates errors of the writer.");
    w.open("pub fn finish(self) -> fmt::Result");
    w.line("self.status");
    w.close();
    w.blank();
    w.open("fn write(&mut self, text: &str)");
    w.open("if self.status.is_ok()");
    w.line("self.status = self.out.write_str(text);");
    w.close();
    w.close();
    w.blank();
    w.open("fn write_indent(&mut self)");
    w.open("for _ in 0..self.indent");
    w.line("self.write(\"  \");");
    w.close();
    w.close();
    if has_primitives {
        w.blank();
        w.open("fn write_primitive(&mut self, type_name: &str, value: &dyn fmt::Display)");
        w.line("let text = value.to_string();");
        w.line("let text = text.trim_end();");
        w.open("if text.contains('\\n')");
        w.line("self.write(type_name);");
        w.line("self.write(\"<<\\n\");");
        w.line("self.indent += 1;");
        w.open("for line in text.lines()");
        w.line("self.write_indent();");
        w.line("self.write(line);");
        w.line("self.write(\"\\n\");");
        w.close();
        w.line("self.indent -= 1;");
        w.line("self.write_indent();");
        w.line("self.write(\">>\\n\");");
        w.else_branch();
        w.line("self.write(text);");
        w.line("self.write(\"\\n\");");
        w.close();
        w.close();
    }
    if has_externals {
        w.blank();
        w.open("fn write_external<T: ?Sized + Dump>(&mut self, node: &mut T)");
        w.open("if self.status.is_ok()");
        w.line("self.status = node.dump_tree(&mut *self.out, self.indent);");
        w.close();
        w.close();
    }
    w.close();
    w.blank();

    w.open("impl RecursiveVisitor for Dumper<'_>");
    w.open("fn visit_node(&mut self, _node: &mut dyn Node)");
    w.line("self.write_indent();");
    w.line("self.write(\"!Node()\\n\");");
    w.close();
    for leaf in grammar.leaves() {
        w.blank();
        emit_leaf_dump(w, grammar, leaf);
    }
    w.close();
    w.blank();
}

fn emit_leaf_dump(w: &mut CodeWriter, grammar: &Grammar, leaf: &NodeType) {
    trace!(node = %leaf.snake_case_name, "emitting dump");
    let children = grammar.all_children(leaf.id);
    w.open(format!(
        "fn visit_{}(&mut self, node: &mut {})",
        leaf.snake_case_name, leaf.title_case_name
    ));
    w.line("self.write_indent();");
    w.open("if !node.is_complete()");
    w.line("self.write(\"!\");");
    w.close();
    if children.is_empty() {
        w.line(format!("self.write(\"{}()\");", leaf.title_case_name));
        emit_location(w, grammar);
        w.line("self.write(\"\\n\");");
        w.close();
        return;
    }
    w.line(format!("self.write(\"{}(\");", leaf.title_case_name));
    emit_location(w, grammar);
    w.line("self.write(\"\\n\");");
    w.line("self.indent += 1;");
    for child in children {
        emit_child_dump(w, child);
    }
    w.line("self.indent -= 1;");
    w.line("self.write_indent();");
    w.line("self.write(\")\\n\");");
    w.close();
}

fn emit_location(w: &mut CodeWriter, grammar: &Grammar) {
    if let Some(location) = &grammar.location {
        w.open(format!(
            "if let Some(location) = node.meta.get::<{location}>()"
        ));
        w.line("self.write(\" # \");");
        w.line("self.write(&location.to_string());");
        w.close();
    }
}

fn emit_child_dump(w: &mut CodeWriter, child: &ChildNode) {
    let ident = field_ident(&child.name);
    w.line("self.write_indent();");
    w.line(format!("self.write(\"{}: \");", child.name));
    let (multiplicity, visit) = match &child.kind {
        ChildKind::Primitive { type_name } => {
            w.line(format!(
                "self.write_primitive(\"{}\", &node.{ident});",
                type_name.escape_default()
            ));
            return;
        }
        ChildKind::Node { multiplicity, .. } => (*multiplicity, "element.visit(self);"),
        ChildKind::External { multiplicity, .. } => {
            (*multiplicity, "self.write_external(&mut *element);")
        }
    };

    if multiplicity.is_sequence() {
        w.open(format!("if node.{ident}.is_empty()"));
        w.line(if multiplicity == Multiplicity::Many {
            "self.write(\"!MISSING\\n\");"
        } else {
            "self.write(\"[]\\n\");"
        });
        w.else_branch();
        w.line("self.write(\"[\\n\");");
        w.line("self.indent += 1;");
        w.open(format!("for element in node.{ident}.iter()"));
        w.open("if let Some(mut element) = element.get_mut()");
        w.line(visit);
        w.else_branch();
        w.line("self.write_indent();");
        w.line("self.write(\"!NULL\\n\");");
        w.close();
        w.close();
        w.line("self.indent -= 1;");
        w.line("self.write_indent();");
        w.line("self.write(\"]\\n\");");
        w.close();
    } else {
        w.open(format!("if let Some(mut element) = node.{ident}.get_mut()"));
        w.line("self.write(\"<\\n\");");
        w.line("self.indent += 1;");
        w.line(visit);
        w.line("self.indent -= 1;");
        w.line("self.write_indent();");
        w.line("self.write(\">\\n\");");
        w.else_branch();
        w.line(if multiplicity == Multiplicity::One {
            "self.write(\"!MISSING\\n\");"
        } else {
            "self.write(\"-\\n\");"
        });
        w.close();
    }
}
