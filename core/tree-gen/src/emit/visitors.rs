//! Visitor emission.
//!
//! `Visitor` methods fall back along the inheritance chain up to
//! `visit_node`. `RecursiveVisitor` methods first run the same fallback and
//! then visit the node type's own relational children, so inherited children
//! are visited by the ancestor's method before the node's own. Every
//! recursive visitor is a visitor through a blanket impl in the definition
//! artifact.

use tracing::trace;

use super::{CodeWriter, node_type_ref};
use crate::{
    naming::field_ident,
    resolver::Grammar,
    spec::{ChildNode, Multiplicity, NodeType},
};

pub(super) fn emit_visitor_trait(w: &mut CodeWriter, grammar: &Grammar) {
    w.doc(
        "Double-dispatch visitor over the node hierarchy.\n\
         Each method defaults to the method of the parent node type, and node \
         types without a parent fall back to `visit_node`, so overriding a \
         method at any level of the hierarchy covers every node type below it.",
    );
    w.open("pub trait Visitor");
    w.doc("Fallback for every node type whose method is not overridden.");
    w.line("fn visit_node(&mut self, node: &mut dyn Node);");
    for node in grammar.nodes() {
        w.blank();
        w.open(visit_signature(grammar, node));
        w.line(format!("Visitor::{}(self, node);", fallback(grammar, node)));
        w.close();
    }
    w.close();
    w.blank();
}

pub(super) fn emit_recursive_visitor_trait(w: &mut CodeWriter, grammar: &Grammar) {
    w.doc(
        "Visitor that traverses the whole tree by default.\n\
         A method first runs the fallback of its node type, like `Visitor`, and \
         then visits the node's own relational children in declaration order. \
         Children of another tree are not visited. An override can resume the \
         default traversal by calling the matching `walk_*` function.",
    );
    w.open("pub trait RecursiveVisitor: Sized");
    w.doc("Fallback for every node type whose method is not overridden.");
    w.line("fn visit_node(&mut self, node: &mut dyn Node);");
    for node in grammar.nodes() {
        w.blank();
        w.open(visit_signature(grammar, node));
        if has_own_relational_children(node) {
            w.line(format!("walk_{}(self, node);", node.snake_case_name));
        } else {
            w.line(format!(
                "RecursiveVisitor::{}(self, node);",
                fallback(grammar, node)
            ));
        }
        w.close();
    }
    w.close();
    w.blank();

    for node in grammar
        .nodes()
        .iter()
        .filter(|node| has_own_relational_children(node))
    {
        emit_walk_function(w, grammar, node);
    }
}

fn emit_walk_function(w: &mut CodeWriter, grammar: &Grammar, node: &NodeType) {
    trace!(node = %node.snake_case_name, "emitting traversal");
    let names: Vec<String> = relational_children(node)
        .map(|(child, _)| format!("`{}`", child.name))
        .collect();
    w.doc(&format!(
        "Default traversal of a `{}` node: runs the fallback method, then visits {}.",
        node.title_case_name,
        names.join(", ")
    ));
    w.open(format!(
        "pub fn walk_{}<V: RecursiveVisitor>(visitor: &mut V, node: &mut {})",
        node.snake_case_name,
        node_type_ref(grammar, node.id)
    ));
    w.line(format!(
        "<V as RecursiveVisitor>::{}(visitor, node);",
        fallback(grammar, node)
    ));
    for (child, multiplicity) in relational_children(node) {
        let field = if node.is_leaf() {
            format!("node.{}", field_ident(&child.name))
        } else {
            format!("node.{}()", field_ident(&child.name))
        };
        if multiplicity.is_sequence() {
            w.open(format!("for element in {field}.iter()"));
            w.open("if let Some(mut element) = element.get_mut()");
        } else {
            w.open(format!("if let Some(mut element) = {field}.get_mut()"));
        }
        w.line("element.visit(visitor);");
        w.close();
        if multiplicity.is_sequence() {
            w.close();
        }
    }
    w.close();
    w.blank();
}

/// `impl<V: RecursiveVisitor> Visitor for V`, forwarding every method.
pub(super) fn emit_visitor_blanket_impl(w: &mut CodeWriter, grammar: &Grammar) {
    w.open("impl<V: RecursiveVisitor> Visitor for V");
    w.open("fn visit_node(&mut self, node: &mut dyn Node)");
    w.line("RecursiveVisitor::visit_node(self, node);");
    w.close();
    for node in grammar.nodes() {
        w.blank();
        w.open(visit_signature(grammar, node));
        w.line(format!(
            "RecursiveVisitor::visit_{}(self, node);",
            node.snake_case_name
        ));
        w.close();
    }
    w.close();
    w.blank();
}

fn visit_signature(grammar: &Grammar, node: &NodeType) -> String {
    format!(
        "fn visit_{}(&mut self, node: &mut {})",
        node.snake_case_name,
        node_type_ref(grammar, node.id)
    )
}

/// Method a node type falls back to: its parent's, or `visit_node`.
fn fallback(grammar: &Grammar, node: &NodeType) -> String {
    node.parent.map_or_else(
        || "visit_node".to_string(),
        |parent| format!("visit_{}", grammar.node(parent).snake_case_name),
    )
}

fn relational_children(node: &NodeType) -> impl Iterator<Item = (&ChildNode, Multiplicity)> {
    node.children.iter().filter_map(|child| {
        child
            .is_relational()
            .then(|| child.multiplicity())
            .flatten()
            .map(|multiplicity| (child, multiplicity))
    })
}

fn has_own_relational_children(node: &NodeType) -> bool {
    node.children.iter().any(ChildNode::is_relational)
}
