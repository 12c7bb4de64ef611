use std::fmt::{self, Display, Formatter};

use thiserror::Error;

use crate::parser::Rule;

/// Directives that may appear at most once in a tree grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    DeclFile,
    DefnFile,
    TreeScope,
    Initializer,
    Location,
}

impl Display for Directive {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Directive::DeclFile => write!(f, "decl_file"),
            Directive::DefnFile => write!(f, "defn_file"),
            Directive::TreeScope => write!(f, "tree_scope"),
            Directive::Initializer => write!(f, "initializer"),
            Directive::Location => write!(f, "location"),
        }
    }
}

/// Semantic errors raised while populating or resolving a [`Specification`].
///
/// [`Specification`]: crate::spec::Specification
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("duplicate `{0}` directive")]
    DuplicateDirective(Directive),

    #[error("missing declaration file name (`decl_file` directive)")]
    MissingDeclFile,

    #[error("missing definition file name (`defn_file` directive)")]
    MissingDefnFile,

    #[error("initialization function not specified (`initializer` directive)")]
    MissingInitializer,

    #[error("declaration and definition files are both named `{name}`")]
    ArtifactNameClash { name: String },

    #[error("duplicate node name `{name}`")]
    DuplicateNode { name: String },

    #[error("node names `{first}` and `{second}` both map to `{title}`")]
    ConflictingNodeNames {
        first: String,
        second: String,
        title: String,
    },

    #[error("invalid node name `{name}`: expected lowercase snake_case")]
    InvalidNodeName { name: String },

    #[error("node name `{name}` is reserved by the generated API")]
    ReservedNodeName { name: String },

    #[error("invalid child name `{child}` in node `{node}`: expected lowercase snake_case")]
    InvalidChildName { node: String, child: String },

    #[error("child name `{child}` in node `{node}` is reserved by the generated API")]
    ReservedChildName { node: String, child: String },

    #[error("duplicate child `{child}` in node `{node}` (inherited children included)")]
    DuplicateChild { node: String, child: String },

    #[error("use of undefined node `{name}` (child `{child}` of `{node}`)")]
    UndefinedNode {
        name: String,
        node: String,
        child: String,
    },

    #[error("node `{node}` cannot derive from `{parent}`: it already derives from `{previous}`")]
    AlreadyDerived {
        node: String,
        parent: String,
        previous: String,
    },

    #[error("node `{node}` is its own ancestor")]
    ParentCycle { node: String },
}

/// Errors produced while reading the textual tree grammar.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The text does not match the tree grammar syntax.
    #[error("{0}")]
    Syntax(Box<pest::error::Error<Rule>>),

    /// A directive or declaration was rejected by `Specification`; the
    /// boxed pest error carries the same message plus the offending span.
    #[error("{location}")]
    Spec {
        #[source]
        source: SpecError,
        location: Box<pest::error::Error<Rule>>,
    },
}

impl ParseError {
    /// The specification error behind this parse failure, if any.
    #[must_use]
    pub fn spec_error(&self) -> Option<&SpecError> {
        match self {
            ParseError::Syntax(_) => None,
            ParseError::Spec { source, .. } => Some(source),
        }
    }
}

impl From<pest::error::Error<Rule>> for ParseError {
    fn from(error: pest::error::Error<Rule>) -> Self {
        ParseError::Syntax(Box::new(error))
    }
}
