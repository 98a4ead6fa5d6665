//! Transaction layers stacked on top of a parent store.
//!
//! An [`OverlayStore`] records only what changed since it was opened: keys it
//! assigned, keys it hid, and a signed adjustment to the parent's value
//! counts. Everything else is answered by the parent, which may itself be an
//! overlay.
//!
//! # Count accounting
//!
//! While a key is shadowed by this layer (assigned or deleted here), the
//! parent's value for that key has been subtracted from `local_counts`
//! exactly once. Reassigning a shadowed key only moves the local value;
//! deleting a locally assigned key removes the local value and, if the
//! parent still sees the key, turns the assignment into a delete without
//! subtracting the parent's value a second time.

use std::collections::{HashMap, HashSet};
use std::mem;

use tracing::{debug, trace};

use crate::counts::{self, CountDelta};
use crate::store::Store;
use crate::traits::{StoreReader, StoreWriter};

/// An open transaction over `parent`.
///
/// `local_data` and `local_deletes` are always disjoint. For every value `v`,
/// `local_counts.get(v) + parent.count(v)` equals the number of keys whose
/// merged value is `v`.
///
/// Committing or rolling back consumes the overlay, so a finished
/// transaction cannot be touched again. Lookups, commit and drop walk the
/// chain with a loop, so nesting depth is bounded by memory, not stack.
/// The derived `Clone`, `PartialEq` and `Debug` still recurse per layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayStore {
    parent: Box<Store>,
    depth: usize,
    local_data: HashMap<String, String>,
    local_deletes: HashSet<String>,
    local_counts: CountDelta,
}

impl OverlayStore {
    /// Open a transaction over `parent`. The parent is untouched until commit.
    pub fn new(parent: Store) -> Self {
        Self {
            depth: parent.depth() + 1,
            parent: Box::new(parent),
            local_data: HashMap::new(),
            local_deletes: HashSet::new(),
            local_counts: CountDelta::new(),
        }
    }

    /// Open a nested transaction on top of this one.
    pub fn begin(self) -> OverlayStore {
        debug!(depth = self.depth + 1, "begin nested transaction");
        OverlayStore::new(Store::Overlay(self))
    }

    /// Fold this layer's edits into its parent, then keep committing down
    /// the chain. The returned store is always the root.
    ///
    /// An overlay parent takes the edits and the count delta wholesale; the
    /// root replays them through [`StoreWriter`].
    pub fn commit(mut self) -> Store {
        loop {
            debug!(
                depth = self.depth,
                sets = self.local_data.len(),
                deletes = self.local_deletes.len(),
                "commit transaction"
            );
            let local_data = mem::take(&mut self.local_data);
            let local_deletes = mem::take(&mut self.local_deletes);
            let local_counts = mem::take(&mut self.local_counts);
            match mem::take(&mut *self.parent) {
                Store::Overlay(mut parent) => {
                    parent.absorb(local_data, local_deletes, local_counts);
                    self = parent;
                }
                Store::Root(mut root) => {
                    for key in &local_deletes {
                        root.delete(key);
                    }
                    for (key, value) in &local_data {
                        root.set(key, value);
                    }
                    return Store::Root(root.commit());
                }
            }
        }
    }

    /// Take over a committed child's edits.
    ///
    /// The child's delta is relative to this layer's merged view, so adding
    /// it to `local_counts` yields the child's view relative to our parent.
    /// A child delete becomes a tombstone here even when the key was only
    /// assigned in this layer; such a tombstone hides nothing and subtracts
    /// nothing.
    fn absorb(
        &mut self,
        data: HashMap<String, String>,
        deletes: HashSet<String>,
        delta: CountDelta,
    ) {
        for key in deletes {
            self.local_data.remove(&key);
            self.local_deletes.insert(key);
        }
        for (key, value) in data {
            self.local_deletes.remove(&key);
            self.local_data.insert(key, value);
        }
        self.local_counts.absorb(delta);
    }

    /// Discard this layer's edits and hand back the parent as it was.
    pub fn rollback(mut self) -> Store {
        debug!(
            depth = self.depth,
            discarded = self.local_data.len() + self.local_deletes.len(),
            "rollback transaction"
        );
        mem::take(&mut *self.parent)
    }

    /// The store this transaction was opened on.
    pub fn parent(&self) -> &Store {
        &self.parent
    }

    /// Number of transactions open in this chain, counting this one.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether this layer holds no edits of its own.
    pub fn is_clean(&self) -> bool {
        self.local_data.is_empty() && self.local_deletes.is_empty()
    }

    /// Count adjustments this layer applies over its parent.
    pub fn count_delta(&self) -> &CountDelta {
        &self.local_counts
    }

    /// This layer's own answer for `key`: `Some(None)` for a tombstone,
    /// `None` when the parent must be asked.
    fn lookup_local(&self, key: &str) -> Option<Option<&str>> {
        if self.local_deletes.contains(key) {
            Some(None)
        } else {
            self.local_data.get(key).map(|value| Some(value.as_str()))
        }
    }
}

impl Drop for OverlayStore {
    fn drop(&mut self) {
        // Unlink ancestors one at a time instead of recursing through boxes.
        let mut next = mem::take(&mut *self.parent);
        while let Store::Overlay(mut overlay) = mem::take(&mut next) {
            next = mem::take(&mut *overlay.parent);
        }
    }
}

impl StoreReader for OverlayStore {
    fn get(&self, key: &str) -> Option<&str> {
        let mut layer = self;
        loop {
            if let Some(found) = layer.lookup_local(key) {
                return found;
            }
            match layer.parent() {
                Store::Overlay(parent) => layer = parent,
                Store::Root(root) => return root.get(key),
            }
        }
    }

    fn count(&self, value: &str) -> usize {
        let mut delta = 0;
        let mut layer = self;
        loop {
            delta += layer.local_counts.get(value);
            match layer.parent() {
                Store::Overlay(parent) => layer = parent,
                Store::Root(root) => return counts::offset(root.count(value), delta),
            }
        }
    }
}

impl StoreWriter for OverlayStore {
    fn set(&mut self, key: &str, value: &str) {
        trace!(key, value, "overlay set");
        if self.local_deletes.remove(key) {
            // Undelete: the parent's value was already subtracted by the delete.
            self.local_counts.increment(value);
        } else if let Some(old) = self.local_data.get(key) {
            if old == value {
                return;
            }
            self.local_counts.decrement(old);
            self.local_counts.increment(value);
        } else if let Some(old) = self.parent.get(key) {
            // Shadow the parent even when the value is unchanged.
            if old != value {
                self.local_counts.decrement(old);
                self.local_counts.increment(value);
            }
        } else {
            self.local_counts.increment(value);
        }
        self.local_data.insert(key.to_string(), value.to_string());
    }

    fn delete(&mut self, key: &str) {
        if self.local_deletes.contains(key) {
            return;
        }
        trace!(key, "overlay delete");

        let overridden = match self.local_data.remove(key) {
            Some(local) => {
                self.local_counts.decrement(&local);
                true
            }
            None => false,
        };

        if let Some(inherited) = self.parent.get(key) {
            if !overridden {
                self.local_counts.decrement(inherited);
            }
            self.local_deletes.insert(key.to_string());
        }
    }
}
