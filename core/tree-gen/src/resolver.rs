//! Semantic resolution of a [`Specification`] into a linked [`Grammar`].

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::{
    errors::SpecError,
    naming::{is_snake_case, is_unescapable_keyword},
    spec::{ChildKind, ChildNode, Multiplicity, Namespace, NodeId, NodeRef, NodeType, Specification},
};

/// Container path used when the grammar has no `tree_scope` directive.
pub const DEFAULT_TREE_SCOPE: &str = "tree_gen_runtime";

/// Child names that would shadow methods of the generated root trait or
/// collide with the annotation field.
const RESERVED_CHILD_NAMES: &[&str] = &[
    "meta",
    "new",
    "deep_clone",
    "node_type",
    "is_complete",
    "check_complete",
    "clone_node",
    "equals",
    "visit",
    "annotations",
    "annotations_mut",
    "dump",
];

const RESERVED_CHILD_PREFIXES: &[&str] = &["as_", "deep_copy_"];

/// A fully linked tree grammar, ready for emission.
///
/// Nodes are kept in declaration order, which fixes both the order of the
/// generated `NodeType` variants and the emission order.
#[derive(Debug, Clone)]
pub struct Grammar {
    pub decl_file: String,
    pub defn_file: String,
    pub decl_uses: Vec<String>,
    pub defn_uses: Vec<String>,
    pub namespaces: Vec<Namespace>,
    pub tree_scope: String,
    pub initializer: String,
    pub location: Option<String>,
    nodes: Vec<NodeType>,
}

impl Specification {
    /// Validates the directives, links every child reference to its node
    /// type and returns the resolved grammar.
    ///
    /// # Errors
    ///
    /// Returns the first [`SpecError`] found: a missing `decl_file`,
    /// `defn_file` or `initializer` directive, both artifacts sharing one
    /// file name, a reference to an undefined
    /// node, a parent cycle, a reserved or malformed child name, or a child
    /// name repeated along an inheritance chain.
    pub fn build(self) -> Result<Grammar, SpecError> {
        let Specification {
            decl_file,
            defn_file,
            decl_uses,
            defn_uses,
            namespaces,
            tree_scope,
            initializer,
            location,
            builders: mut nodes,
            ..
        } = self;

        let decl_file = decl_file.ok_or(SpecError::MissingDeclFile)?;
        let defn_file = defn_file.ok_or(SpecError::MissingDefnFile)?;
        let initializer = initializer.ok_or(SpecError::MissingInitializer)?;
        if decl_file == defn_file {
            return Err(SpecError::ArtifactNameClash { name: decl_file });
        }

        let ids: FxHashMap<String, NodeId> = nodes
            .iter()
            .map(|node| (node.snake_case_name.clone(), node.id))
            .collect();
        for node in &mut nodes {
            for child in &mut node.children {
                if let ChildKind::Node { target, .. } = &mut child.kind
                    && let NodeRef::Named(name) = target
                {
                    let Some(id) = ids.get(name.as_str()) else {
                        return Err(SpecError::UndefinedNode {
                            name: name.clone(),
                            node: node.snake_case_name.clone(),
                            child: child.name.clone(),
                        });
                    };
                    trace!(node = %node.snake_case_name, child = %child.name, "linked to `{name}`");
                    *target = NodeRef::Resolved(*id);
                }
            }
        }

        let grammar = Grammar {
            decl_file,
            defn_file,
            decl_uses,
            defn_uses,
            namespaces,
            tree_scope: tree_scope.unwrap_or_else(|| DEFAULT_TREE_SCOPE.to_string()),
            initializer,
            location,
            nodes,
        };
        grammar.check_parent_cycles()?;
        grammar.check_children()?;
        debug!(nodes = grammar.nodes.len(), "resolved tree grammar");
        Ok(grammar)
    }
}

impl Grammar {
    /// All node types in declaration order.
    #[must_use]
    pub fn nodes(&self) -> &[NodeType] {
        &self.nodes
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &NodeType {
        &self.nodes[id.0]
    }

    #[must_use]
    pub fn find(&self, snake_case_name: &str) -> Option<&NodeType> {
        self.nodes
            .iter()
            .find(|node| node.snake_case_name == snake_case_name)
    }

    /// Leaf node types in declaration order.
    pub fn leaves(&self) -> impl Iterator<Item = &NodeType> {
        self.nodes.iter().filter(|node| node.is_leaf())
    }

    /// The node itself followed by its parent, grandparent and so on.
    #[must_use]
    pub fn ancestry(&self, id: NodeId) -> Vec<&NodeType> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(id) = current {
            let node = self.node(id);
            chain.push(node);
            current = node.parent;
        }
        chain
    }

    /// Own and inherited children, parent-first, in declaration order.
    #[must_use]
    pub fn all_children(&self, id: NodeId) -> Vec<&ChildNode> {
        self.ancestry(id)
            .into_iter()
            .rev()
            .flat_map(|node| node.children.iter())
            .collect()
    }

    /// Whether the node has relational children, own or inherited.
    #[must_use]
    pub fn has_relational_children(&self, id: NodeId) -> bool {
        self.all_children(id)
            .iter()
            .any(|child| child.is_relational())
    }

    /// Emission order: every ancestor before any of its descendants, with
    /// shared ancestors emitted once.
    #[must_use]
    pub fn generation_order(&self) -> Vec<NodeId> {
        let mut generated = FxHashSet::default();
        let mut order = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            for ancestor in self.ancestry(node.id).into_iter().rev() {
                if generated.insert(ancestor.id) {
                    order.push(ancestor.id);
                }
            }
        }
        order
    }

    /// Whether any child of any node uses the given container kind.
    #[must_use]
    pub fn uses(&self, multiplicity: Multiplicity) -> bool {
        self.nodes
            .iter()
            .flat_map(|node| node.children.iter())
            .any(|child| child.multiplicity() == Some(multiplicity))
    }

    fn check_parent_cycles(&self) -> Result<(), SpecError> {
        for node in &self.nodes {
            let mut current = node.parent;
            let mut steps = 0;
            while let Some(id) = current {
                steps += 1;
                if id == node.id || steps > self.nodes.len() {
                    return Err(SpecError::ParentCycle {
                        node: node.snake_case_name.clone(),
                    });
                }
                current = self.node(id).parent;
            }
        }
        Ok(())
    }

    fn check_children(&self) -> Result<(), SpecError> {
        for node in &self.nodes {
            for child in &node.children {
                if !is_snake_case(&child.name) {
                    return Err(SpecError::InvalidChildName {
                        node: node.snake_case_name.clone(),
                        child: child.name.clone(),
                    });
                }
                if is_reserved_child_name(&child.name) {
                    return Err(SpecError::ReservedChildName {
                        node: node.snake_case_name.clone(),
                        child: child.name.clone(),
                    });
                }
            }
            let mut seen = FxHashSet::default();
            for child in self.all_children(node.id) {
                if !seen.insert(child.name.as_str()) {
                    return Err(SpecError::DuplicateChild {
                        node: node.snake_case_name.clone(),
                        child: child.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn is_reserved_child_name(name: &str) -> bool {
    is_unescapable_keyword(name)
        || RESERVED_CHILD_NAMES.contains(&name)
        || RESERVED_CHILD_PREFIXES
            .iter()
            .any(|prefix| name.starts_with(prefix))
}
