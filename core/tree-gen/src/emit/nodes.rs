//! Node hierarchy emission: the tag enum, the root `Node` trait, one trait per
//! abstract node, one struct per leaf, and every `impl` block that makes a
//! leaf a node.

use tracing::trace;

use super::{CodeWriter, field_type, node_type_ref};
use crate::{
    naming::field_ident,
    resolver::Grammar,
    spec::{ChildKind, ChildNode, Multiplicity, NodeId, NodeType},
};

const RC_REF_CELL: &str = "::std::rc::Rc<::std::cell::RefCell";

pub(super) fn emit_node_type_enum(w: &mut CodeWriter, grammar: &Grammar) {
    w.doc("Tag of every concrete (leaf) node type.");
    w.line("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]");
    w.open("pub enum NodeType");
    for leaf in grammar.leaves() {
        w.line(format!("{},", leaf.title_case_name));
    }
    w.close();
    w.blank();
}

pub(super) fn emit_node_trait(w: &mut CodeWriter, grammar: &Grammar) {
    w.doc("Root of the node hierarchy, implemented by every leaf node type.");
    w.open("pub trait Node");
    w.doc("Tag of the concrete node type.");
    w.line("fn node_type(&self) -> NodeType;");
    w.blank();
    w.doc(
        "Whether this node and every node it refers to are well-formed. Error \
         marker nodes are never complete.",
    );
    w.line("fn is_complete(&self) -> bool;");
    w.blank();
    w.doc("Like `is_complete`, reporting the failure as an error.");
    w.open("fn check_complete(&self) -> Result<(), NotWellFormed>");
    w.open("if self.is_complete()");
    w.line("return Ok(());");
    w.close();
    w.line("Err(NotWellFormed::new(format!(");
    w.line(r#"    "{:?} node is not well-formed","#);
    w.line("    self.node_type()");
    w.line(")))");
    w.close();
    w.blank();
    w.doc("Shallow copy of this node; its children are shared with the original.");
    w.line("fn clone_node(&self) -> One<dyn Node>;");
    w.blank();
    w.doc("Copy of this node and everything it owns.");
    w.line(format!("fn deep_copy_node(&self) -> {RC_REF_CELL}<dyn Node>>;"));
    w.blank();
    w.doc("Structural equality. Annotations are not compared.");
    w.line("fn equals(&self, rhs: &dyn Node) -> bool;");
    w.blank();
    w.doc("Calls the visitor method for the concrete node type.");
    w.line("fn visit(&mut self, visitor: &mut dyn Visitor);");
    w.blank();
    w.line("fn annotations(&self) -> &Annotations;");
    w.blank();
    w.line("fn annotations_mut(&mut self) -> &mut Annotations;");
    w.blank();
    w.doc("Writes an indented debug rendering of this tree to `out`.");
    w.line("///");
    w.line("/// # Errors");
    w.line("///");
    w.line("/// Propagates errors of the writer.");
    w.open(
        "fn dump(&mut self, out: &mut dyn ::std::fmt::Write, indent: usize) -> ::std::fmt::Result",
    );
    w.line("let mut dumper = Dumper::new(out, indent);");
    w.line("self.visit(&mut dumper);");
    w.line("dumper.finish()");
    w.close();
    for node in grammar.nodes() {
        w.blank();
        let target = node_type_ref(grammar, node.id);
        w.open(format!(
            "fn as_{}(&self) -> Option<&{target}>",
            node.snake_case_name
        ));
        w.line("None");
        w.close();
        w.blank();
        w.open(format!(
            "fn as_{}_mut(&mut self) -> Option<&mut {target}>",
            node.snake_case_name
        ));
        w.line("None");
        w.close();
    }
    w.close();
    w.blank();
}

/// Declares the trait of an abstract node or the struct of a leaf.
pub(super) fn emit_node_declaration(w: &mut CodeWriter, grammar: &Grammar, id: NodeId) {
    let node = grammar.node(id);
    trace!(node = %node.snake_case_name, leaf = node.is_leaf(), "declaring node");
    if !node.doc.is_empty() {
        w.doc(&node.doc);
    }
    if node.is_leaf() {
        w.line("#[derive(Clone)]");
        w.open(format!("pub struct {}", node.title_case_name));
        for child in grammar.all_children(id) {
            if !child.doc.is_empty() {
                w.doc(&child.doc);
            }
            w.line(format!(
                "pub {}: {},",
                field_ident(&child.name),
                field_type(grammar, child)
            ));
        }
        w.doc("Side table of annotations attached to this node.");
        w.line("pub meta: Annotations,");
        w.close();
    } else {
        let parent = node
            .parent
            .map_or("Node", |parent| grammar.node(parent).title_case_name.as_str());
        w.open(format!("pub trait {}: {parent}", node.title_case_name));
        for child in &node.children {
            if !child.doc.is_empty() {
                w.doc(&child.doc);
            }
            let ty = field_type(grammar, child);
            w.line(format!("fn {}(&self) -> &{ty};", field_ident(&child.name)));
            w.line(format!("fn {}_mut(&mut self) -> &mut {ty};", child.name));
            w.blank();
        }
        w.doc("Copy of this node and everything it owns.");
        w.line(format!(
            "fn deep_copy_{}(&self) -> {RC_REF_CELL}<dyn {}>>;",
            node.snake_case_name, node.title_case_name
        ));
        w.close();
    }
    w.blank();
}

/// Emits every `impl` block of a leaf; abstract nodes get their trait-object
/// impls instead.
pub(super) fn emit_node_definitions(w: &mut CodeWriter, grammar: &Grammar, id: NodeId) {
    let node = grammar.node(id);
    trace!(node = %node.snake_case_name, "defining node");
    if !node.is_leaf() {
        emit_trait_object_impls(
            w,
            &node.title_case_name,
            &format!("deep_copy_{}", node.snake_case_name),
        );
        return;
    }

    let name = &node.title_case_name;
    let children = grammar.all_children(id);
    emit_inherent_impl(w, grammar, node, &children);
    emit_default_impl(w, grammar, name, &children);
    emit_partial_eq_impl(w, name, &children);
    emit_node_impl(w, grammar, node, &children);
    for ancestor in grammar.ancestry(id).into_iter().skip(1) {
        emit_family_impl(w, grammar, name, ancestor);
    }

    w.open(format!("impl TreeNode for {name}"));
    w.open("fn node_is_complete(&self) -> bool");
    w.line("Node::is_complete(self)");
    w.close();
    w.blank();
    w.open("fn node_eq(&self, other: &Self) -> bool");
    w.line("self == other");
    w.close();
    w.blank();
    w.open("fn node_deep_copy(&self) -> Rc<RefCell<Self>>");
    w.line("Rc::new(RefCell::new(self.deep_clone()))");
    w.close();
    w.close();
    w.blank();

    w.open(format!("impl Dump for {name}"));
    w.open("fn dump_tree(&mut self, out: &mut dyn fmt::Write, indent: usize) -> fmt::Result");
    w.line("Node::dump(self, out, indent)");
    w.close();
    w.close();
    w.blank();

    w.open(format!("impl fmt::Display for {name}"));
    w.open("fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result");
    w.line("Node::dump(&mut Clone::clone(self), f, 0)");
    w.close();
    w.close();
    w.blank();

    let families = grammar
        .ancestry(id)
        .into_iter()
        .skip(1)
        .map(|ancestor| ancestor.title_case_name.as_str())
        .chain(["Node"]);
    for family in families {
        for container in ["One", "Maybe"] {
            w.open(format!("impl From<{name}> for {container}<dyn {family}>"));
            w.open(format!("fn from(node: {name}) -> Self"));
            w.line(format!(
                "let node: Rc<RefCell<dyn {family}>> = Rc::new(RefCell::new(node));"
            ));
            w.line("Self::from_rc(node)");
            w.close();
            w.close();
            w.blank();
        }
    }
}

/// Impls for `dyn Node` itself.
pub(super) fn emit_root_definitions(w: &mut CodeWriter) {
    emit_trait_object_impls(w, "Node", "deep_copy_node");
}

/// `TreeNode`, `Dump`, `PartialEq` and `Display` for the trait object of a
/// node family, so that containers over it work.
fn emit_trait_object_impls(w: &mut CodeWriter, family: &str, deep_copy: &str) {
    w.open(format!("impl TreeNode for dyn {family}"));
    w.open("fn node_is_complete(&self) -> bool");
    w.line("self.is_complete()");
    w.close();
    w.blank();
    w.open("fn node_eq(&self, other: &Self) -> bool");
    w.line("self.equals(other)");
    w.close();
    w.blank();
    w.open("fn node_deep_copy(&self) -> Rc<RefCell<Self>>");
    w.line(format!("self.{deep_copy}()"));
    w.close();
    w.close();
    w.blank();

    w.open(format!("impl Dump for dyn {family}"));
    w.open("fn dump_tree(&mut self, out: &mut dyn fmt::Write, indent: usize) -> fmt::Result");
    w.line("self.dump(out, indent)");
    w.close();
    w.close();
    w.blank();

    w.open(format!("impl PartialEq for dyn {family}"));
    w.open("fn eq(&self, other: &Self) -> bool");
    w.line("self.equals(other)");
    w.close();
    w.close();
    w.blank();

    w.open(format!("impl fmt::Display for dyn {family}"));
    w.open("fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result");
    w.line("let copy = self.clone_node();");
    w.open("if let Some(mut node) = copy.get_mut()");
    w.line("return node.dump(f, 0);");
    w.close();
    w.line("Ok(())");
    w.close();
    w.close();
    w.blank();
}

fn emit_inherent_impl(
    w: &mut CodeWriter,
    grammar: &Grammar,
    node: &NodeType,
    children: &[&ChildNode],
) {
    w.open(format!("impl {}", node.title_case_name));
    if !children.is_empty() {
        w.doc(&format!(
            "Creates a `{}` node from all of its children.",
            node.title_case_name
        ));
        if children.len() > 7 {
            w.line("#[allow(clippy::too_many_arguments)]");
        }
        let params: Vec<String> = children
            .iter()
            .map(|child| format!("{}: {}", field_ident(&child.name), field_type(grammar, child)))
            .collect();
        w.open(format!("pub fn new({}) -> Self", params.join(", ")));
        w.open("Self");
        for child in children {
            w.line(format!("{},", field_ident(&child.name)));
        }
        w.line("meta: Annotations::default(),");
        w.close();
        w.close();
        w.blank();
    }
    w.doc("Copies this node and every node it owns. Annotations are shared.");
    w.line("#[must_use]");
    w.open("pub fn deep_clone(&self) -> Self");
    w.open("Self");
    for child in children {
        let ident = field_ident(&child.name);
        let copy = match child.kind {
            ChildKind::Primitive { .. } => "clone",
            ChildKind::Node { .. } | ChildKind::External { .. } => "deep_clone",
        };
        w.line(format!("{ident}: self.{ident}.{copy}(),"));
    }
    w.line("meta: self.meta.clone(),");
    w.close();
    w.close();
    w.close();
    w.blank();
}

fn emit_default_impl(w: &mut CodeWriter, grammar: &Grammar, name: &str, children: &[&ChildNode]) {
    w.open(format!("impl Default for {name}"));
    w.open("fn default() -> Self");
    w.open("Self");
    for child in children {
        let value = match child.multiplicity() {
            Some(Multiplicity::One) => "One::empty()".to_string(),
            Some(Multiplicity::Maybe) => "Maybe::empty()".to_string(),
            Some(Multiplicity::Any) => "Any::new()".to_string(),
            Some(Multiplicity::Many) => "Many::new()".to_string(),
            None => format!("{}()", grammar.initializer),
        };
        w.line(format!("{}: {value},", field_ident(&child.name)));
    }
    w.line("meta: Annotations::default(),");
    w.close();
    w.close();
    w.close();
    w.blank();
}

fn emit_partial_eq_impl(w: &mut CodeWriter, name: &str, children: &[&ChildNode]) {
    w.open(format!("impl PartialEq for {name}"));
    if children.is_empty() {
        w.open("fn eq(&self, _other: &Self) -> bool");
        w.line("true");
    } else {
        w.open("fn eq(&self, other: &Self) -> bool");
        let comparisons: Vec<String> = children
            .iter()
            .map(|child| {
                let ident = field_ident(&child.name);
                format!("self.{ident} == other.{ident}")
            })
            .collect();
        w.line(comparisons.join("\n    && "));
    }
    w.close();
    w.close();
    w.blank();
}

fn emit_node_impl(
    w: &mut CodeWriter,
    grammar: &Grammar,
    node: &NodeType,
    children: &[&ChildNode],
) {
    let name = &node.title_case_name;
    w.open(format!("impl Node for {name}"));
    w.open("fn node_type(&self) -> NodeType");
    w.line(format!("NodeType::{name}"));
    w.close();
    w.blank();

    w.open("fn is_complete(&self) -> bool");
    let checked: Vec<String> = children
        .iter()
        .filter(|child| child.multiplicity().is_some())
        .map(|child| format!("self.{}.is_complete()", field_ident(&child.name)))
        .collect();
    if node.is_error_marker {
        w.line("false");
    } else if checked.is_empty() {
        w.line("true");
    } else {
        w.line(checked.join("\n    && "));
    }
    w.close();
    w.blank();

    w.open("fn clone_node(&self) -> One<dyn Node>");
    w.line("let node: Rc<RefCell<dyn Node>> = Rc::new(RefCell::new(Clone::clone(self)));");
    w.line("One::from_rc(node)");
    w.close();
    w.blank();
    w.open("fn deep_copy_node(&self) -> Rc<RefCell<dyn Node>>");
    w.line("Rc::new(RefCell::new(self.deep_clone()))");
    w.close();
    w.blank();
    w.open("fn equals(&self, rhs: &dyn Node) -> bool");
    w.line(format!(
        "rhs.as_{}().is_some_and(|rhs| self == rhs)",
        node.snake_case_name
    ));
    w.close();
    w.blank();
    w.open("fn visit(&mut self, visitor: &mut dyn Visitor)");
    w.line(format!("visitor.visit_{}(self);", node.snake_case_name));
    w.close();
    w.blank();
    w.open("fn annotations(&self) -> &Annotations");
    w.line("&self.meta");
    w.close();
    w.blank();
    w.open("fn annotations_mut(&mut self) -> &mut Annotations");
    w.line("&mut self.meta");
    w.close();

    for target in grammar.ancestry(node.id) {
        let ty = node_type_ref(grammar, target.id);
        let (shared, exclusive) = if target.is_leaf() {
            ("self".to_string(), "self".to_string())
        } else {
            (format!("self as &{ty}"), format!("self as &mut {ty}"))
        };
        w.blank();
        w.open(format!(
            "fn as_{}(&self) -> Option<&{ty}>",
            target.snake_case_name
        ));
        w.line(format!("Some({shared})"));
        w.close();
        w.blank();
        w.open(format!(
            "fn as_{}_mut(&mut self) -> Option<&mut {ty}>",
            target.snake_case_name
        ));
        w.line(format!("Some({exclusive})"));
        w.close();
    }
    w.close();
    w.blank();
}

/// Implements the trait of abstract `ancestor` for leaf `name`.
fn emit_family_impl(w: &mut CodeWriter, grammar: &Grammar, name: &str, ancestor: &NodeType) {
    w.open(format!("impl {} for {name}", ancestor.title_case_name));
    for child in &ancestor.children {
        let ident = field_ident(&child.name);
        let ty = field_type(grammar, child);
        w.open(format!("fn {ident}(&self) -> &{ty}"));
        w.line(format!("&self.{ident}"));
        w.close();
        w.blank();
        w.open(format!("fn {}_mut(&mut self) -> &mut {ty}", child.name));
        w.line(format!("&mut self.{ident}"));
        w.close();
        w.blank();
    }
    w.open(format!(
        "fn deep_copy_{}(&self) -> Rc<RefCell<dyn {}>>",
        ancestor.snake_case_name, ancestor.title_case_name
    ));
    w.line("Rc::new(RefCell::new(self.deep_clone()))");
    w.close();
    w.close();
    w.blank();
}
