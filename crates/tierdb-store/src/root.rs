//! The authoritative bottom layer of a store chain.

use std::collections::HashMap;

use tracing::trace;

use crate::counts::ValueCounts;
use crate::overlay::OverlayStore;
use crate::store::Store;
use crate::traits::{StoreReader, StoreWriter};

/// Root of a chain: owns the committed key/value data and its exact
/// value counts.
///
/// For every value `v`, `counts.get(v)` equals the number of keys mapped to
/// `v` in `data`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootStore {
    data: HashMap<String, String>,
    counts: ValueCounts,
}

impl RootStore {
    /// Create an empty root store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a transaction layered on this store.
    pub fn begin(self) -> OverlayStore {
        OverlayStore::new(Store::Root(self))
    }

    /// The root has nothing pending; committing returns it unchanged.
    pub fn commit(self) -> Self {
        self
    }

    /// Number of keys held.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The value counts backing [`StoreReader::count`].
    pub fn counts(&self) -> &ValueCounts {
        &self.counts
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl StoreReader for RootStore {
    fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    fn count(&self, value: &str) -> usize {
        self.counts.get(value)
    }
}

impl StoreWriter for RootStore {
    fn set(&mut self, key: &str, value: &str) {
        trace!(key, value, "root set");
        match self.data.insert(key.to_string(), value.to_string()) {
            Some(old) if old == value => {}
            Some(old) => {
                self.counts.decrement(&old);
                self.counts.increment(value);
            }
            None => self.counts.increment(value),
        }
    }

    fn delete(&mut self, key: &str) {
        if let Some(old) = self.data.remove(key) {
            trace!(key, "root delete");
            self.counts.decrement(&old);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated() -> RootStore {
        let mut root = RootStore::new();
        root.set("foo", "bar");
        root
    }

    #[test]
    fn empty_store_has_nothing() {
        let root = RootStore::new();
        assert_eq!(root.get("foo"), None);
        assert_eq!(root.count("bar"), 0);
        assert!(root.is_empty());
    }

    #[test]
    fn set_then_get() {
        let mut root = RootStore::new();
        root.set("foo", "bar");
        assert_eq!(root.get("foo"), Some("bar"));
        assert_eq!(root.count("bar"), 1);
    }

    #[test]
    fn overwrite_with_same_value_keeps_count() {
        let mut root = populated();
        root.set("foo", "bar");
        assert_eq!(root.get("foo"), Some("bar"));
        assert_eq!(root.count("bar"), 1);
    }

    #[test]
    fn overwrite_with_different_value_moves_count() {
        let mut root = populated();
        root.set("foo", "baz");
        assert_eq!(root.get("foo"), Some("baz"));
        assert_eq!(root.count("bar"), 0);
        assert_eq!(root.count("baz"), 1);
        assert_eq!(root.counts().len(), 1);
    }

    #[test]
    fn delete_removes_key_and_count() {
        let mut root = populated();
        root.delete("foo");
        assert_eq!(root.get("foo"), None);
        assert_eq!(root.count("bar"), 0);
        assert!(root.counts().is_empty());
    }

    #[test]
    fn delete_missing_key_is_noop() {
        let mut root = populated();
        root.delete("nope");
        assert_eq!(root.len(), 1);
        assert_eq!(root.count("bar"), 1);
    }

    #[test]
    fn counts_track_shared_values() {
        let mut root = RootStore::new();
        root.set("a", "x");
        root.set("b", "x");
        root.set("c", "y");
        assert_eq!(root.count("x"), 2);
        assert_eq!(root.count("y"), 1);

        root.set("a", "y");
        assert_eq!(root.count("x"), 1);
        assert_eq!(root.count("y"), 2);
    }

    #[test]
    fn commit_returns_same_store() {
        let root = populated();
        let expected = root.clone();
        assert_eq!(root.commit(), expected);
    }

    #[test]
    fn begin_opens_overlay_over_root() {
        let tx = populated().begin();
        assert_eq!(tx.depth(), 1);
        assert_eq!(tx.get("foo"), Some("bar"));
    }
}
