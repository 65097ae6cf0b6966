//! Left-leaning red-black order-statistic map for Rust.
//!
//! This crate provides [`LlrbMap`], an ordered symbol table built on a left-leaning
//! red-black tree whose nodes carry their subtree size. Besides the usual map operations it
//! answers order-statistic and range queries in O(log n):
//!
//! - [`rank`](LlrbMap::rank) - The number of keys strictly less than a given key
//! - [`select`](LlrbMap::select) - The key at a given sorted position
//! - [`floor`](LlrbMap::floor) / [`ceiling`](LlrbMap::ceiling) - Nearest keys at or below / above
//! - [`range_len`](LlrbMap::range_len) / [`keys_in_range`](LlrbMap::keys_in_range) - Closed-range
//!   count and enumeration
//! - Indexing by [`Rank`] - e.g., `map[Rank(0)]` for the first value
//!
//! # Example
//!
//! ```
//! use lean_tree::{LlrbMap, Rank};
//!
//! let mut scores = LlrbMap::new();
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//! scores.insert("Carol", 92);
//!
//! assert_eq!(scores.get("Bob"), Some(&85));
//! assert_eq!(scores.len(), 3);
//!
//! // Order-statistic operations (O(log n))
//! assert_eq!(scores.select(1), Ok(&"Bob"));
//! assert_eq!(scores.rank("Carol"), 2);
//! assert_eq!(scores[Rank(0)], 100);
//!
//! // The tree can verify its own structure.
//! assert_eq!(scores.validate(), Ok(()));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **O(log n) everything** - Black-balance bounds the height by 2 log<sub>2</sub> n
//! - **Self-checking** - [`LlrbMap::validate`] verifies every structural invariant
//!
//! # Implementation
//!
//! Red links lean left only, so the tree is a binary encoding of a 2-3 tree. Insertion
//! descends recursively and repairs on the way back up with rotations and color flips;
//! deletion pushes a red link down the search path before removing so that the removed node
//! never leaves a path short of a black link.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod order_statistic;
mod raw;

pub mod llrb_map;

pub use error::{Error, ErrorKind, Violation};
pub use llrb_map::LlrbMap;
pub use order_statistic::Rank;
