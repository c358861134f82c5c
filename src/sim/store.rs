//! Insertion-ordered entity storage
//!
//! Entities live in a dense `Vec` with the newest at the back; iteration
//! runs newest-first so that "prepend" semantics hold. Removal happens only
//! in explicit passes (`prune`, `retain`, `clear`), never behind an
//! iterator's back.

use serde::{Deserialize, Serialize};

/// Newest-first collection of one entity kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityList<T> {
    items: Vec<T>,
}

impl<T> Default for EntityList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> EntityList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert as the newest entity (O(1))
    pub fn prepend(&mut self, item: T) {
        self.items.push(item);
    }

    /// Prepend a batch in order; the last item ends up newest
    pub fn prepend_all(&mut self, items: impl IntoIterator<Item = T>) {
        self.items.extend(items);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Newest-first iteration
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.items.iter().rev()
    }

    /// Newest-first mutable iteration
    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut T> + ExactSizeIterator {
        self.items.iter_mut().rev()
    }

    /// Entity at position `n` in newest-first order
    pub fn nth_mut(&mut self, n: usize) -> Option<&mut T> {
        let len = self.items.len();
        if n >= len {
            return None;
        }
        self.items.get_mut(len - 1 - n)
    }

    pub fn find(&self, pred: impl Fn(&T) -> bool) -> Option<&T> {
        self.iter().find(|item| pred(item))
    }

    pub fn find_mut(&mut self, pred: impl Fn(&T) -> bool) -> Option<&mut T> {
        self.iter_mut().find(|item| pred(item))
    }

    /// Advance every entity and drop those whose lifetime ended, in one pass.
    ///
    /// `step` mutates the entity and returns `true` while it should stay.
    /// Returns how many entities were removed.
    pub fn prune(&mut self, step: impl FnMut(&mut T) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain_mut(step);
        before - self.items.len()
    }

    /// Keep only entities matching `keep`, preserving order
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(keep);
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
