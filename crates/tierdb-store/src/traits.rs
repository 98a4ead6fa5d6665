//! The read and write boundaries shared by every layer of a store chain.
//!
//! Both [`RootStore`](crate::RootStore) and [`OverlayStore`](crate::OverlayStore)
//! implement these traits, and so does the [`Store`](crate::Store) handle
//! that dispatches to whichever variant is current. An overlay only ever
//! talks to its parent through these two traits.

/// Read boundary: point lookups and reverse-index queries over the merged view.
pub trait StoreReader {
    /// The value currently visible for `key`, or `None` if the key is absent
    /// (never set, or deleted in this layer or any layer below it).
    fn get(&self, key: &str) -> Option<&str>;

    /// Number of keys whose visible value is `value`. Zero for unknown values.
    fn count(&self, value: &str) -> usize;

    /// Whether `key` is visible in the merged view.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Write boundary: mutations that keep the reverse index in step.
pub trait StoreWriter {
    /// Associate `key` with `value`, replacing any prior value.
    ///
    /// Setting a key to the value it already holds leaves every count as is.
    fn set(&mut self, key: &str, value: &str);

    /// Remove `key` from the visible mapping. A no-op if it is not visible.
    fn delete(&mut self, key: &str);
}
