use std::{
    any::{Any, TypeId},
    fmt::{self, Debug, Formatter},
    rc::Rc,
};

use rustc_hash::FxHashMap;

/// Type-keyed side table attached to every generated node.
///
/// At most one value per type can be stored. Payloads are reference counted,
/// so cloning a node (or the table itself) shares them rather than copying.
/// Annotations never take part in node equality.
#[derive(Clone, Default)]
pub struct Annotations {
    entries: FxHashMap<TypeId, Rc<dyn Any>>,
}

impl Annotations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `value`, replacing any previous annotation of the same type.
    pub fn set<T: 'static>(&mut self, value: T) {
        self.entries.insert(TypeId::of::<T>(), Rc::new(value));
    }

    /// Attaches an already shared payload.
    pub fn set_rc<T: 'static>(&mut self, value: Rc<T>) {
        self.entries.insert(TypeId::of::<T>(), value);
    }

    #[must_use]
    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>())
    }

    /// Returns the shared payload of type `T`, if any.
    #[must_use]
    pub fn get_rc<T: 'static>(&self) -> Option<Rc<T>> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|value| Rc::clone(value).downcast::<T>().ok())
    }

    /// Mutable access to the annotation of type `T`.
    ///
    /// Returns `None` when no such annotation exists or when the payload is
    /// currently shared with a clone of this table.
    pub fn get_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.entries
            .get_mut(&TypeId::of::<T>())
            .and_then(Rc::get_mut)
            .and_then(|value| value.downcast_mut::<T>())
    }

    #[must_use]
    pub fn has<T: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Removes the annotation of type `T`, returning whether one was present.
    pub fn erase<T: 'static>(&mut self) -> bool {
        self.entries.remove(&TypeId::of::<T>()).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Debug for Annotations {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Annotations")
            .field("len", &self.entries.len())
            .finish()
    }
}
