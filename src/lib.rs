#![deny(missing_docs)]

//! This crate implements an ordered map, [OrderedMap], as an unbalanced binary search tree.
//!
//! Keys are unique, a second put for a key replaces the value in place.
//! Each node caches the size of its subtree, so [OrderedMap::size] is O(1).
//! There is no rebalancing, so keys inserted in sorted order give a tree of height n.
//! All operations use loops and explicit stacks rather than recursion, so such a tree is still safe to use and drop.
//!
//! Iteration ( [OrderedMap::iter] ) is in ascending key order, and borrows the map, so the map
//! cannot be modified while an iterator is live. Call iter again to restart.
//!
//! # Example
//!
//! ```
//!     use bst_map::OrderedMap;
//!     let mut mymap = OrderedMap::new();
//!     mymap.put(4, "horse");
//!     mymap.put(7, "goat");
//!     mymap.put(1, "sheep");
//!     assert_eq!(mymap.get(&4), Some(&"horse"));
//!     mymap.delete(&1);
//!     for (k, v) in mymap.iter() {
//!         println!("{k}: {v}");
//!     }
//! ```
//!
//!# Features
//!
//! This crate supports the following cargo features:
//! - `serde` : enables serialisation of [OrderedMap] via serde crate.
//! - `tracing` : emits trace events for structural changes via tracing crate.

/// Module with the map itself and its tree operations.
pub mod bst;

/// Module with the iterator types.
pub mod iter;

mod error;
mod log;

pub use bst::OrderedMap;
pub use error::InvariantError;
pub use iter::{IntoIter, Iter, IterMut, Keys, Preorder, Values};

// Tests.

/* mimalloc cannot be used with miri */
#[cfg(all(test, not(miri)))]
use mimalloc::MiMalloc;

#[cfg(all(test, not(miri)))]
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[cfg(test)]
mod mytests;
