#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # tree-gen runtime
//!
//! Support library for trees emitted by the `tree-gen` generator. Generated code
//! refers to this crate through the `tree_scope` directive of its tree grammar
//! (by default `tree_gen_runtime`).
//!
//! ## Ownership containers
//!
//! Every child edge of a generated tree is one of four handle kinds:
//!
//! | Kind | Multiplicity | Complete when |
//! |------|--------------|---------------|
//! | [`One`] | exactly one | populated and the node is complete |
//! | [`Maybe`] | zero or one | empty, or the node is complete |
//! | [`Any`] | zero or more | every slot populated and complete |
//! | [`Many`] | one or more | non-empty, every slot populated and complete |
//!
//! Nodes live behind `Rc<RefCell<_>>`. Cloning a handle aliases the node, which
//! lets two parents share one child (error recovery relies on this), while
//! `deep_clone` copies the subtree. Trees are single threaded: the handles are
//! neither `Send` nor `Sync`.
//!
//! ## Node contract
//!
//! Generated node types implement [`TreeNode`] (what the containers need for
//! completeness, equality and deep copies) and [`Dump`] (debug rendering, used
//! when one tree embeds nodes of another). Per-node metadata is kept in an
//! [`Annotations`] side table that is ignored by equality.

mod annotations;
mod containers;
mod errors;

use std::{cell::RefCell, fmt, rc::Rc};

pub use annotations::Annotations;
pub use containers::{Any, Many, Maybe, One};
pub use errors::NotWellFormed;

/// Operations a node type must provide to live inside the containers.
///
/// Generated code implements this for every leaf struct and for the trait
/// object of every abstract node family.
pub trait TreeNode {
    /// Recursive well-formedness check of this node.
    fn node_is_complete(&self) -> bool;

    /// Structural equality, ignoring annotations.
    fn node_eq(&self, other: &Self) -> bool;

    /// Copies this node and everything it owns into a fresh allocation.
    fn node_deep_copy(&self) -> Rc<RefCell<Self>>;
}

/// Debug rendering of a node at a given indentation level.
pub trait Dump {
    /// Writes the indented dump of this node to `out`.
    ///
    /// # Errors
    ///
    /// Propagates errors of the underlying writer.
    fn dump_tree(&mut self, out: &mut dyn fmt::Write, indent: usize) -> fmt::Result;
}

/// Default value factory for primitive fields of generated nodes.
#[must_use]
pub fn initialize<T: Default>() -> T {
    T::default()
}
