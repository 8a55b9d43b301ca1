//! # freqstore
//!
//! An in-memory keyed frequency store: feed it a stream of word tokens and it
//! counts occurrences of each distinct key, with exact-match lookup.
//!
//! Two interchangeable backends implement the same counting contract:
//!
//! 1. **[`HashStore`]**: a fixed-capacity open-addressing hash table,
//!    resolving collisions by linear probing or double hashing, with
//!    per-key probe-distance statistics.
//!
//! 2. **[`OrderedTreeStore`]**: a binary search tree ordered by key, with an
//!    optional red-black balancing mode that keeps lookups O(log n) via
//!    rotation/recolor fixups applied bottom-up after each insertion.
//!
//! Tokens are expected to be ASCII case-folded alphanumeric words (internal
//! apostrophes allowed); tokenization is the caller's job. The empty string
//! is a valid, if unusual, key.
//!
//! ## Example
//!
//! ```rust
//! use freqstore::{CollisionStrategy, HashStore, OrderedTreeStore, TreeMode};
//!
//! let mut words = HashStore::new(113, CollisionStrategy::Linear);
//! words.insert("the");
//! words.insert("the");
//! words.insert("cat");
//! assert_eq!(words.search("the"), 2);
//! assert_eq!(words.search("dog"), 0);
//!
//! let mut tree = OrderedTreeStore::new(TreeMode::Balanced);
//! tree.insert("the");
//! tree.insert("cat");
//! tree.finalize_root_color();
//! assert!(tree.search("cat"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod hash;
pub mod tree;

pub use hash::{CollisionStrategy, HashStore, SlotRecord, StatsLine};
pub use tree::{OrderedTreeStore, TreeMode};

/// Errors reported by the stores.
///
/// Both backends are infallible for well-formed use; the only recoverable
/// error condition is asking for the depth of an empty tree, which the
/// reference behavior left undefined and we reject explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Depth was requested on a tree with no nodes.
    #[error("depth is undefined for an empty tree")]
    EmptyTree,
}

#[cfg(test)]
mod proptests;
