use std::{
    cell::{Ref, RefCell, RefMut},
    fmt::{self, Debug, Formatter},
    rc::Rc,
    slice,
};

use crate::{errors::NotWellFormed, TreeNode};

/// Declares a handle owning zero or one node.
///
/// `Clone` on the handle aliases the node (both handles observe the same
/// value); `deep_clone` copies the whole subtree.
macro_rules! single_container {
    (
        $(#[$outer:meta])*
        $name:ident, required = $required:literal
    ) => {
        $(#[$outer])*
        pub struct $name<T: ?Sized> {
            node: Option<Rc<RefCell<T>>>,
        }

        impl<T> $name<T> {
            #[must_use]
            pub fn new(value: T) -> Self {
                Self {
                    node: Some(Rc::new(RefCell::new(value))),
                }
            }
        }

        impl<T: ?Sized> $name<T> {
            #[must_use]
            pub fn empty() -> Self {
                Self { node: None }
            }

            /// Wraps an existing shared node without copying it.
            #[must_use]
            pub fn from_rc(node: Rc<RefCell<T>>) -> Self {
                Self { node: Some(node) }
            }

            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.node.is_none()
            }

            /// Borrows the node.
            ///
            /// # Panics
            ///
            /// Panics if the node is currently mutably borrowed.
            #[must_use]
            pub fn get(&self) -> Option<Ref<'_, T>> {
                self.node.as_ref().map(|node| node.borrow())
            }

            /// Mutably borrows the node. Aliasing handles share the same cell.
            ///
            /// # Panics
            ///
            /// Panics if the node is currently borrowed.
            #[must_use]
            pub fn get_mut(&self) -> Option<RefMut<'_, T>> {
                self.node.as_ref().map(|node| node.borrow_mut())
            }

            #[must_use]
            pub fn rc(&self) -> Option<&Rc<RefCell<T>>> {
                self.node.as_ref()
            }

            #[must_use]
            pub fn into_rc(self) -> Option<Rc<RefCell<T>>> {
                self.node
            }

            /// Points this handle at the node of `other`, sharing it.
            pub fn set(&mut self, other: &Self) {
                self.node.clone_from(&other.node);
            }

            pub fn reset(&mut self) {
                self.node = None;
            }

            /// Returns whether both handles refer to the same node.
            #[must_use]
            pub fn ptr_eq(&self, other: &Self) -> bool {
                match (&self.node, &other.node) {
                    (Some(lhs), Some(rhs)) => Rc::ptr_eq(lhs, rhs),
                    (None, None) => true,
                    _ => false,
                }
            }
        }

        impl<T: ?Sized + TreeNode> $name<T> {
            #[must_use]
            pub fn is_complete(&self) -> bool {
                match &self.node {
                    Some(node) => node.borrow().node_is_complete(),
                    None => !$required,
                }
            }

            /// # Errors
            ///
            /// Returns [`NotWellFormed`] when [`Self::is_complete`] fails.
            pub fn check_complete(&self) -> Result<(), NotWellFormed> {
                if self.is_complete() {
                    Ok(())
                } else if self.node.is_none() {
                    Err(NotWellFormed::new(concat!(
                        "required ",
                        stringify!($name),
                        " is empty"
                    )))
                } else {
                    Err(NotWellFormed::new(concat!(
                        stringify!($name),
                        " refers to an incomplete node"
                    )))
                }
            }

            /// Copies the referenced subtree into a fresh, unshared node.
            #[must_use]
            pub fn deep_clone(&self) -> Self {
                Self {
                    node: self.node.as_ref().map(|node| node.borrow().node_deep_copy()),
                }
            }
        }

        impl<T: ?Sized> Clone for $name<T> {
            fn clone(&self) -> Self {
                Self {
                    node: self.node.clone(),
                }
            }
        }

        impl<T: ?Sized> Default for $name<T> {
            fn default() -> Self {
                Self::empty()
            }
        }

        impl<T> From<T> for $name<T> {
            fn from(value: T) -> Self {
                Self::new(value)
            }
        }

        impl<T: ?Sized + TreeNode> PartialEq for $name<T> {
            fn eq(&self, other: &Self) -> bool {
                match (&self.node, &other.node) {
                    (Some(lhs), Some(rhs)) => {
                        Rc::ptr_eq(lhs, rhs) || lhs.borrow().node_eq(&rhs.borrow())
                    }
                    (None, None) => true,
                    _ => false,
                }
            }
        }

        impl<T: ?Sized> Debug for $name<T> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                match &self.node {
                    Some(node) => write!(f, "{}({:p})", stringify!($name), Rc::as_ptr(node)),
                    None => write!(f, "{}(-)", stringify!($name)),
                }
            }
        }
    };
}

/// Declares a handle owning a sequence of nodes.
macro_rules! sequence_container {
    (
        $(#[$outer:meta])*
        $name:ident, required = $required:literal
    ) => {
        $(#[$outer])*
        pub struct $name<T: ?Sized> {
            items: Vec<One<T>>,
        }

        impl<T: ?Sized> $name<T> {
            #[must_use]
            pub fn new() -> Self {
                Self { items: Vec::new() }
            }

            pub fn push(&mut self, item: impl Into<One<T>>) {
                self.items.push(item.into());
            }

            /// Appends every element of `other`, aliasing its nodes.
            pub fn extend_from(&mut self, other: &Self) {
                self.items.extend(other.items.iter().cloned());
            }

            #[must_use]
            pub fn len(&self) -> usize {
                self.items.len()
            }

            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.items.is_empty()
            }

            #[must_use]
            pub fn at(&self, index: usize) -> Option<&One<T>> {
                self.items.get(index)
            }

            pub fn at_mut(&mut self, index: usize) -> Option<&mut One<T>> {
                self.items.get_mut(index)
            }

            /// Removes and returns the element at `index`, shifting the rest
            /// down; `None` when `index` is out of range.
            pub fn remove(&mut self, index: usize) -> Option<One<T>> {
                (index < self.items.len()).then(|| self.items.remove(index))
            }

            pub fn clear(&mut self) {
                self.items.clear();
            }

            pub fn iter(&self) -> slice::Iter<'_, One<T>> {
                self.items.iter()
            }

            pub fn iter_mut(&mut self) -> slice::IterMut<'_, One<T>> {
                self.items.iter_mut()
            }
        }

        impl<T: ?Sized + TreeNode> $name<T> {
            /// Complete when every slot holds a complete node (and, for
            /// one-or-more sequences, at least one slot exists).
            #[must_use]
            pub fn is_complete(&self) -> bool {
                if $required && self.items.is_empty() {
                    return false;
                }
                self.items.iter().all(One::is_complete)
            }

            /// # Errors
            ///
            /// Returns [`NotWellFormed`] when [`Self::is_complete`] fails.
            pub fn check_complete(&self) -> Result<(), NotWellFormed> {
                if $required && self.items.is_empty() {
                    return Err(NotWellFormed::new(concat!(
                        "required ",
                        stringify!($name),
                        " is empty"
                    )));
                }
                for (index, item) in self.items.iter().enumerate() {
                    if !item.is_complete() {
                        return Err(NotWellFormed::new(format!(
                            "{} element {index} is null or incomplete",
                            stringify!($name)
                        )));
                    }
                }
                Ok(())
            }

            #[must_use]
            pub fn deep_clone(&self) -> Self {
                Self {
                    items: self.items.iter().map(One::deep_clone).collect(),
                }
            }
        }

        impl<T: ?Sized> Clone for $name<T> {
            fn clone(&self) -> Self {
                Self {
                    items: self.items.clone(),
                }
            }
        }

        impl<T: ?Sized> Default for $name<T> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<T: ?Sized> From<Vec<One<T>>> for $name<T> {
            fn from(items: Vec<One<T>>) -> Self {
                Self { items }
            }
        }

        impl<T: ?Sized> FromIterator<One<T>> for $name<T> {
            fn from_iter<I: IntoIterator<Item = One<T>>>(iter: I) -> Self {
                Self {
                    items: iter.into_iter().collect(),
                }
            }
        }

        impl<'a, T: ?Sized> IntoIterator for &'a $name<T> {
            type Item = &'a One<T>;
            type IntoIter = slice::Iter<'a, One<T>>;

            fn into_iter(self) -> Self::IntoIter {
                self.items.iter()
            }
        }

        impl<T: ?Sized + TreeNode> PartialEq for $name<T> {
            fn eq(&self, other: &Self) -> bool {
                self.items == other.items
            }
        }

        impl<T: ?Sized> Debug for $name<T> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.items).finish()
            }
        }
    };
}

single_container! {
    /// Exactly one node. Empty only while a tree is under construction; an
    /// empty `One` makes the tree incomplete.
    One, required = true
}

single_container! {
    /// Zero or one node.
    Maybe, required = false
}

sequence_container! {
    /// Zero or more nodes.
    Any, required = false
}

sequence_container! {
    /// One or more nodes. An empty `Many` makes the tree incomplete.
    Many, required = true
}
