//! Sparse reverse indexes from value to number of keys holding it.
//!
//! Neither map ever stores a zero: an entry that reaches zero is removed, so
//! an absent value reads as zero and the non-zero entries are the whole
//! index.

use std::collections::HashMap;

/// Exact value counts held by the root of a chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueCounts {
    counts: HashMap<String, usize>,
}

impl ValueCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for `value`, zero if absent.
    pub fn get(&self, value: &str) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, value: &str) {
        *self.counts.entry(value.to_string()).or_insert(0) += 1;
    }

    /// Decrement `value`, pruning the entry when it reaches zero.
    ///
    /// Decrementing an absent value is a no-op.
    pub fn decrement(&mut self, value: &str) {
        if let Some(count) = self.counts.get_mut(value) {
            if *count > 1 {
                *count -= 1;
            } else {
                self.counts.remove(value);
            }
        }
    }

    /// Number of distinct values with a non-zero count.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(v, c)| (v.as_str(), *c))
    }
}

/// A base count shifted by a summed delta. Never below zero.
pub(crate) fn offset(base: usize, delta: i64) -> usize {
    let merged = base as i64 + delta;
    debug_assert!(merged >= 0, "count went negative: base {base}, delta {delta}");
    merged.max(0) as usize
}

/// Signed count adjustments an overlay applies on top of its parent.
///
/// A negative entry means the overlay hides keys the parent counts for that
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountDelta {
    deltas: HashMap<String, i64>,
}

impl CountDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta for `value`, zero if absent.
    pub fn get(&self, value: &str) -> i64 {
        self.deltas.get(value).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, value: &str) {
        self.adjust(value, 1);
    }

    pub fn decrement(&mut self, value: &str) {
        self.adjust(value, -1);
    }

    fn adjust(&mut self, value: &str, by: i64) {
        let next = self.get(value) + by;
        if next == 0 {
            self.deltas.remove(value);
        } else {
            self.deltas.insert(value.to_string(), next);
        }
    }

    /// Apply this delta to a base count from the layer below.
    pub fn apply(&self, value: &str, base: usize) -> usize {
        offset(base, self.get(value))
    }

    /// Add every entry of `other` into this delta.
    pub fn absorb(&mut self, other: CountDelta) {
        for (value, by) in other.deltas {
            self.adjust(&value, by);
        }
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.deltas.iter().map(|(v, d)| (v.as_str(), *d))
    }
}
