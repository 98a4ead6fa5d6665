//! Layered key/value storage with nested speculative transactions.
//!
//! A chain starts at a [`RootStore`], which holds the committed data and an
//! exact reverse index from value to the number of keys holding it. Each
//! [`OverlayStore`] on top of it is an open transaction that records only its
//! own edits and delegates everything else to its parent, so transactions
//! nest to any depth and each one sees the merged view of its ancestors plus
//! its own changes.
//!
//! # Architecture
//!
//! - **Root** answers reads directly and is mutated in place.
//! - **Overlays** shadow parent keys with local assignments and deletions and
//!   keep a signed count delta, so [`StoreReader::count`] never rescans data.
//! - **Commit** replays an overlay's edits into its parent and keeps
//!   committing down to the root. **Rollback** drops the overlay and returns
//!   the parent untouched. Both consume the overlay.
//! - [`Store`] is the handle callers hold: it is whichever layer is current
//!   and swaps itself on begin, commit and rollback.
//!
//! # Modules
//!
//! - [`error`] — [`StoreError`] and [`StoreResult`]
//! - [`traits`] — [`StoreReader`] and [`StoreWriter`], the shared contract
//! - [`counts`] — sparse reverse indexes [`ValueCounts`] and [`CountDelta`]
//! - [`root`] — [`RootStore`]
//! - [`overlay`] — [`OverlayStore`]
//! - [`store`] — the [`Store`] handle
//!
//! ```
//! use tierdb_store::{Store, StoreReader, StoreWriter};
//!
//! let mut store = Store::new();
//! store.set("foo", "bar");
//!
//! store.begin();
//! store.set("foo", "baz");
//! assert_eq!(store.count("bar"), 0);
//! assert_eq!(store.root().count("bar"), 1);
//!
//! store.commit();
//! assert_eq!(store.get("foo"), Some("baz"));
//! assert!(store.rollback().is_err());
//! ```

pub mod counts;
pub mod error;
pub mod overlay;
pub mod root;
pub mod store;
pub mod traits;

pub use counts::{CountDelta, ValueCounts};
pub use error::{StoreError, StoreResult};
pub use overlay::OverlayStore;
pub use root::RootStore;
pub use store::Store;
pub use traits::{StoreReader, StoreWriter};
