//! In-memory model of a tree grammar.
//!
//! A [`Specification`] is populated by the grammar parser (or directly through
//! its builder methods) in whatever order the input presents directives and
//! nodes. Node references are stored by name until [`Specification::build`]
//! links them and produces a read-only [`Grammar`](crate::resolver::Grammar).

use rustc_hash::FxHashMap;

use crate::{
    errors::{Directive, SpecError},
    naming::{is_snake_case, title_case},
};

/// Node names that would collide with items of the generated API or with the
/// names it imports.
pub(crate) const RESERVED_NODE_NAMES: &[&str] = &[
    "node",
    "node_type",
    "visitor",
    "recursive_visitor",
    "dumper",
    "annotations",
    "not_well_formed",
    "tree_node",
    "dump",
    "one",
    "maybe",
    "any",
    "many",
    "option",
    "result",
    "clone",
    "default",
    "from",
    "partial_eq",
    "sized",
    "rc",
    "ref_cell",
    "self",
];

/// Index of a node in its [`Specification`] (and in the resulting grammar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Container kind of a relational or external child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Multiplicity {
    /// Exactly one.
    One,
    /// Zero or one.
    Maybe,
    /// Zero or more.
    Any,
    /// One or more.
    Many,
}

impl Multiplicity {
    /// Name of the runtime container type.
    #[must_use]
    pub fn container(self) -> &'static str {
        match self {
            Multiplicity::One => "One",
            Multiplicity::Maybe => "Maybe",
            Multiplicity::Any => "Any",
            Multiplicity::Many => "Many",
        }
    }

    /// Whether an empty container makes the owning node incomplete.
    #[must_use]
    pub fn is_required(self) -> bool {
        matches!(self, Multiplicity::One | Multiplicity::Many)
    }

    #[must_use]
    pub fn is_sequence(self) -> bool {
        matches!(self, Multiplicity::Any | Multiplicity::Many)
    }

    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "One" => Some(Multiplicity::One),
            "Maybe" => Some(Multiplicity::Maybe),
            "Any" => Some(Multiplicity::Any),
            "Many" => Some(Multiplicity::Many),
            _ => None,
        }
    }
}

/// Reference from a child to the node type it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeRef {
    /// Not linked yet.
    Named(String),
    /// Linked by [`Specification::build`].
    Resolved(NodeId),
}

/// What a child field holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildKind {
    /// A container of nodes of this tree.
    Node {
        multiplicity: Multiplicity,
        target: NodeRef,
    },
    /// A container of nodes defined by another generated tree. Counts for
    /// completeness and dumping, but is not traversed by visitors.
    External {
        multiplicity: Multiplicity,
        type_name: String,
    },
    /// A plain value of an opaque Rust type.
    Primitive { type_name: String },
}

/// One field of a node type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildNode {
    pub name: String,
    pub doc: String,
    pub kind: ChildKind,
}

impl ChildNode {
    #[must_use]
    pub fn node(name: &str, multiplicity: Multiplicity, target: &str) -> Self {
        Self::with_kind(
            name,
            ChildKind::Node {
                multiplicity,
                target: NodeRef::Named(target.to_string()),
            },
        )
    }

    #[must_use]
    pub fn external(name: &str, multiplicity: Multiplicity, type_name: &str) -> Self {
        Self::with_kind(
            name,
            ChildKind::External {
                multiplicity,
                type_name: type_name.to_string(),
            },
        )
    }

    #[must_use]
    pub fn primitive(name: &str, type_name: &str) -> Self {
        Self::with_kind(
            name,
            ChildKind::Primitive {
                type_name: type_name.to_string(),
            },
        )
    }

    fn with_kind(name: &str, kind: ChildKind) -> Self {
        Self {
            name: name.to_string(),
            doc: String::new(),
            kind,
        }
    }

    #[must_use]
    pub fn with_doc(mut self, doc: &str) -> Self {
        self.doc = doc.to_string();
        self
    }

    /// Container kind, or `None` for primitives.
    #[must_use]
    pub fn multiplicity(&self) -> Option<Multiplicity> {
        match &self.kind {
            ChildKind::Node { multiplicity, .. } | ChildKind::External { multiplicity, .. } => {
                Some(*multiplicity)
            }
            ChildKind::Primitive { .. } => None,
        }
    }

    /// Whether this child holds nodes of the same tree.
    #[must_use]
    pub fn is_relational(&self) -> bool {
        matches!(self.kind, ChildKind::Node { .. })
    }

    /// Linked target of a relational child.
    #[must_use]
    pub fn target(&self) -> Option<NodeId> {
        match &self.kind {
            ChildKind::Node {
                target: NodeRef::Resolved(id),
                ..
            } => Some(*id),
            _ => None,
        }
    }
}

/// One declared node kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeType {
    pub id: NodeId,
    pub snake_case_name: String,
    pub title_case_name: String,
    pub doc: String,
    pub parent: Option<NodeId>,
    pub derived: Vec<NodeId>,
    /// Own children only; inherited ones live on the ancestors.
    pub children: Vec<ChildNode>,
    pub is_error_marker: bool,
}

impl NodeType {
    /// Leaves have no specializations and are the only concrete node types.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.derived.is_empty()
    }
}

/// A namespace (module) the generated code is nested in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    pub name: String,
    pub doc: String,
}

/// A tree grammar under construction.
#[derive(Debug, Default)]
pub struct Specification {
    pub(crate) decl_file: Option<String>,
    pub(crate) defn_file: Option<String>,
    pub(crate) decl_uses: Vec<String>,
    pub(crate) defn_uses: Vec<String>,
    pub(crate) namespaces: Vec<Namespace>,
    pub(crate) tree_scope: Option<String>,
    pub(crate) initializer: Option<String>,
    pub(crate) location: Option<String>,
    pub(crate) builders: Vec<NodeType>,
    names: FxHashMap<String, NodeId>,
    title_names: FxHashMap<String, NodeId>,
}

fn set_once(slot: &mut Option<String>, value: &str, directive: Directive) -> Result<(), SpecError> {
    if slot.is_some() {
        return Err(SpecError::DuplicateDirective(directive));
    }
    *slot = Some(value.to_string());
    Ok(())
}

impl Specification {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name of the declaration artifact.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::DuplicateDirective`] when already set.
    pub fn set_decl_file(&mut self, name: &str) -> Result<(), SpecError> {
        set_once(&mut self.decl_file, name, Directive::DeclFile)
    }

    /// Sets the name of the definition artifact.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::DuplicateDirective`] when already set.
    pub fn set_defn_file(&mut self, name: &str) -> Result<(), SpecError> {
        set_once(&mut self.defn_file, name, Directive::DefnFile)
    }

    /// Sets the module path of the runtime containers.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::DuplicateDirective`] when already set.
    pub fn set_tree_scope(&mut self, path: &str) -> Result<(), SpecError> {
        set_once(&mut self.tree_scope, path, Directive::TreeScope)
    }

    /// Sets the default-value factory used for primitive fields.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::DuplicateDirective`] when already set.
    pub fn set_initializer(&mut self, path: &str) -> Result<(), SpecError> {
        set_once(&mut self.initializer, path, Directive::Initializer)
    }

    /// Sets the annotation type the dumper prints as source location.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::DuplicateDirective`] when already set.
    pub fn set_location(&mut self, path: &str) -> Result<(), SpecError> {
        set_once(&mut self.location, path, Directive::Location)
    }

    pub fn add_decl_use(&mut self, line: &str) {
        self.decl_uses.push(line.to_string());
    }

    pub fn add_defn_use(&mut self, line: &str) {
        self.defn_uses.push(line.to_string());
    }

    pub fn add_namespace(&mut self, name: &str, doc: &str) {
        self.namespaces.push(Namespace {
            name: name.to_string(),
            doc: doc.to_string(),
        });
    }

    /// Registers a new node type.
    ///
    /// # Errors
    ///
    /// Fails when the name is not snake_case, is reserved, is already taken,
    /// or maps to the same type name as an existing node.
    pub fn add_node(&mut self, name: &str, doc: &str) -> Result<NodeId, SpecError> {
        if !is_snake_case(name) {
            return Err(SpecError::InvalidNodeName {
                name: name.to_string(),
            });
        }
        if RESERVED_NODE_NAMES.contains(&name) {
            return Err(SpecError::ReservedNodeName {
                name: name.to_string(),
            });
        }
        if self.names.contains_key(name) {
            return Err(SpecError::DuplicateNode {
                name: name.to_string(),
            });
        }
        let title = title_case(name);
        if let Some(other) = self.title_names.get(&title) {
            return Err(SpecError::ConflictingNodeNames {
                first: self.builders[other.0].snake_case_name.clone(),
                second: name.to_string(),
                title,
            });
        }

        let id = NodeId(self.builders.len());
        self.builders.push(NodeType {
            id,
            snake_case_name: name.to_string(),
            title_case_name: title.clone(),
            doc: doc.to_string(),
            parent: None,
            derived: Vec::new(),
            children: Vec::new(),
            is_error_marker: false,
        });
        self.names.insert(name.to_string(), id);
        self.title_names.insert(title, id);
        Ok(id)
    }

    /// Makes `node` a specialization of `parent`.
    ///
    /// # Errors
    ///
    /// Fails when `node` already has a parent or would derive from itself.
    pub fn derive_from(&mut self, node: NodeId, parent: NodeId) -> Result<(), SpecError> {
        if node == parent {
            return Err(SpecError::ParentCycle {
                node: self.builders[node.0].snake_case_name.clone(),
            });
        }
        if let Some(previous) = self.builders[node.0].parent {
            return Err(SpecError::AlreadyDerived {
                node: self.builders[node.0].snake_case_name.clone(),
                parent: self.builders[parent.0].snake_case_name.clone(),
                previous: self.builders[previous.0].snake_case_name.clone(),
            });
        }
        self.builders[node.0].parent = Some(parent);
        self.builders[parent.0].derived.push(node);
        Ok(())
    }

    pub fn add_child(&mut self, node: NodeId, child: ChildNode) {
        self.builders[node.0].children.push(child);
    }

    /// Marks `node` as a parse-error placeholder that is never well-formed.
    pub fn mark_error(&mut self, node: NodeId) {
        self.builders[node.0].is_error_marker = true;
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &NodeType {
        &self.builders[id.0]
    }
}
