//! The caller's handle on a store chain.

use std::mem;

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::overlay::OverlayStore;
use crate::root::RootStore;
use crate::traits::{StoreReader, StoreWriter};

/// Either the root of a chain or the innermost open transaction.
///
/// A caller keeps one `Store` as its current handle and routes every
/// operation through it. [`begin`](Store::begin), [`commit`](Store::commit)
/// and [`rollback`](Store::rollback) replace the handle in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Store {
    Root(RootStore),
    Overlay(OverlayStore),
}

impl Default for Store {
    fn default() -> Self {
        Store::Root(RootStore::new())
    }
}

impl From<RootStore> for Store {
    fn from(root: RootStore) -> Self {
        Store::Root(root)
    }
}

impl From<OverlayStore> for Store {
    fn from(overlay: OverlayStore) -> Self {
        Store::Overlay(overlay)
    }
}

impl Store {
    /// A fresh, empty root store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new transaction on top of the current handle.
    pub fn begin(&mut self) {
        let current = mem::take(self);
        *self = Store::Overlay(match current {
            Store::Root(root) => {
                debug!(depth = 1, "begin transaction");
                root.begin()
            }
            Store::Overlay(overlay) => overlay.begin(),
        });
    }

    /// Commit every open transaction, leaving the handle on the root.
    pub fn commit(&mut self) {
        let current = mem::take(self);
        *self = current.into_committed();
    }

    /// Discard the innermost transaction.
    ///
    /// Fails with [`StoreError::TransactionNotFound`] on the root, leaving
    /// the handle unchanged.
    pub fn rollback(&mut self) -> StoreResult<()> {
        match mem::take(self) {
            Store::Root(root) => {
                *self = Store::Root(root);
                Err(StoreError::TransactionNotFound)
            }
            Store::Overlay(overlay) => {
                *self = overlay.rollback();
                Ok(())
            }
        }
    }

    /// Consume the handle, committing everything down to the root.
    pub fn into_committed(self) -> Store {
        match self {
            Store::Root(root) => Store::Root(root.commit()),
            Store::Overlay(overlay) => overlay.commit(),
        }
    }

    /// Number of open transactions; zero at the root.
    pub fn depth(&self) -> usize {
        match self {
            Store::Root(_) => 0,
            Store::Overlay(overlay) => overlay.depth(),
        }
    }

    pub fn in_transaction(&self) -> bool {
        matches!(self, Store::Overlay(_))
    }

    /// The root at the bottom of the chain.
    pub fn root(&self) -> &RootStore {
        let mut store = self;
        loop {
            match store {
                Store::Root(root) => return root,
                Store::Overlay(overlay) => store = overlay.parent(),
            }
        }
    }
}

impl StoreReader for Store {
    fn get(&self, key: &str) -> Option<&str> {
        match self {
            Store::Root(root) => root.get(key),
            Store::Overlay(overlay) => overlay.get(key),
        }
    }

    fn count(&self, value: &str) -> usize {
        match self {
            Store::Root(root) => root.count(value),
            Store::Overlay(overlay) => overlay.count(value),
        }
    }
}

impl StoreWriter for Store {
    fn set(&mut self, key: &str, value: &str) {
        match self {
            Store::Root(root) => root.set(key, value),
            Store::Overlay(overlay) => overlay.set(key, value),
        }
    }

    fn delete(&mut self, key: &str) {
        match self {
            Store::Root(root) => root.delete(key),
            Store::Overlay(overlay) => overlay.delete(key),
        }
    }
}
