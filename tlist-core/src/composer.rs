//! Ordered list of transformations with a cached composite
use std::cell::Cell;
use std::fmt;
use std::slice;

use log::{debug, trace};

use crate::entry::TaggedTransform;
use crate::error::{ComposerError, Result};
use crate::observer::{ChangeObserver, ObserverId, Observers};
use crate::portable::{self, PortableTransform};
use crate::transform::Transform;

/// Ordered sequence of tagged transformations.
///
/// Entry 0 is applied to a point first and the last entry last. The
/// composite of the whole list is cached and recomputed lazily after any
/// structural change. Every change notifies subscribed observers exactly once,
/// after the cache has been invalidated.
///
/// The composer is meant to be used from one context at a time; it is not
/// `Sync`. Share it across threads only behind a lock that covers the whole
/// value.
pub struct TransformComposer {
    entries: Vec<TaggedTransform>,
    cached_composite: Cell<Option<Transform>>,
    dirty: Cell<bool>,
    observers: Observers,
}

impl TransformComposer {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            cached_composite: Cell::new(None),
            dirty: Cell::new(true),
            observers: Observers::default(),
        }
    }

    // -- Composition --

    /// Composite of every entry, served from the cache when it is fresh.
    pub fn complete_transform(&self) -> Transform {
        if let (false, Some(cached)) = (self.dirty.get(), self.cached_composite.get()) {
            return cached;
        }

        trace!("recomputing composite of {} transformations", self.entries.len());
        let composite = compose(&self.entries);
        self.cached_composite.set(Some(composite));
        self.dirty.set(false);
        composite
    }

    /// Composite of the first `count` entries. Never cached.
    pub fn prefix_transform(&self, count: usize) -> Result<Transform> {
        let prefix = self.entries.get(..count).ok_or(ComposerError::OutOfRange {
            index: count,
            len: self.entries.len(),
        })?;
        Ok(compose(prefix))
    }

    /// Currently the complete transform.
    ///
    /// Separating a pure scale from a composite that may also rotate is not
    /// attempted, so callers must not assume the result is free of rotation.
    pub fn scaling_transform(&self) -> Transform {
        self.complete_transform()
    }

    // -- Bulk replacement --

    /// Replace every entry with copies of `source`, in order.
    pub fn replace_all(&mut self, source: &[TaggedTransform]) {
        self.entries = source.to_vec();
        self.commit("replaced all transformations");
    }

    /// Copy the entries of another composer. Its observers are not copied.
    pub fn copy_from(&mut self, other: &TransformComposer) {
        self.replace_all(&other.entries);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.commit("cleared transformations");
    }

    // -- Portable form --

    /// Plain `(kind, matrix)` snapshots of every entry, in order.
    pub fn to_portable(&self) -> Vec<PortableTransform> {
        self.entries.iter().map(PortableTransform::from_entry).collect()
    }

    /// Replace every entry with the decoded `pairs`.
    ///
    /// Nothing changes and no observer is notified if any pair is malformed.
    pub fn restore_portable(&mut self, pairs: &[PortableTransform]) -> Result<()> {
        self.entries = portable::decode_all(pairs)?;
        self.commit("restored transformations");
        Ok(())
    }

    // -- List access --

    pub fn get(&self, index: usize) -> Result<&TaggedTransform> {
        self.entries.get(index).ok_or(ComposerError::OutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    /// Replace the entry at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, value: TaggedTransform) -> Result<TaggedTransform> {
        let len = self.entries.len();
        let slot = self
            .entries
            .get_mut(index)
            .ok_or(ComposerError::OutOfRange { index, len })?;
        let previous = std::mem::replace(slot, value);
        self.commit("replaced transformation");
        Ok(previous)
    }

    /// Insert before `index`; `index == len()` appends.
    pub fn insert(&mut self, index: usize, value: TaggedTransform) -> Result<()> {
        self.check_insertion(index)?;
        self.entries.insert(index, value);
        self.commit("inserted transformation");
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<TaggedTransform> {
        self.get(index)?;
        let removed = self.entries.remove(index);
        self.commit("removed transformation");
        Ok(removed)
    }

    pub fn append(&mut self, value: TaggedTransform) {
        self.entries.push(value);
        self.commit("appended transformation");
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, value: &TaggedTransform) -> bool {
        self.entries.contains(value)
    }

    pub fn entries(&self) -> &[TaggedTransform] {
        &self.entries
    }

    pub fn iter(&self) -> slice::Iter<'_, TaggedTransform> {
        self.entries.iter()
    }

    // -- Observers --

    pub fn subscribe(&mut self, observer: impl ChangeObserver + 'static) -> ObserverId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn check_insertion(&self, index: usize) -> Result<()> {
        if index > self.entries.len() {
            return Err(ComposerError::OutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(())
    }

    /// Invalidate the cache, then notify observers.
    fn commit(&mut self, action: &str) {
        self.dirty.set(true);
        self.cached_composite.set(None);
        debug!("{action}, {} transformations", self.entries.len());

        // Observers only get a shared view of the composer, so they cannot
        // subscribe or unsubscribe while being notified.
        self.observers.notify(self);
    }
}

/// Compose `entries` so that the first one is applied first.
fn compose(entries: &[TaggedTransform]) -> Transform {
    entries
        .iter()
        .fold(Transform::identity(), |composite, entry| {
            composite.then(entry.transform())
        })
}

impl Default for TransformComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TransformComposer {
    /// Copies entries and cache. Observers are not cloned.
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            cached_composite: self.cached_composite.clone(),
            dirty: self.dirty.clone(),
            observers: Observers::default(),
        }
    }
}

impl fmt::Debug for TransformComposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformComposer")
            .field("entries", &self.entries)
            .field("dirty", &self.dirty.get())
            .field("observers", &self.observers)
            .finish()
    }
}

impl<'a> IntoIterator for &'a TransformComposer {
    type Item = &'a TaggedTransform;
    type IntoIter = slice::Iter<'a, TaggedTransform>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
