//! Classic Heap Data Structures for Rust
//!
//! This crate provides textbook min-heap implementations with insert and
//! extract-minimum, plus a small separate-chaining hash table.
//!
//! # Features
//!
//! - **Binary Heap**: array-backed; O(log n) insert and extract-min
//! - **Binomial Heap**: forest of binomial trees; O(log n) insert, extract-min and merge
//! - **Fibonacci Heap**: lazy root list; O(1) insert, O(log n) amortized extract-min
//! - **Hash Table**: fixed bucket count, separate chaining, no rehashing
//!
//! The linked heaps keep their nodes in an arena ([`storage`]) and address
//! them by generational keys, so circular sibling lists and parent
//! back-references need neither raw pointers nor reference counting.
//!
//! Absence (extracting from an empty heap, looking up a missing key) is always
//! reported as `None`.
//!
//! # Example
//!
//! ```rust
//! use classic_heaps::fibonacci::FibonacciHeap;
//! use classic_heaps::{Heap, MergeableHeap};
//!
//! let mut a = FibonacciHeap::new();
//! a.insert(5);
//! a.insert(3);
//!
//! let mut b = FibonacciHeap::new();
//! b.insert(1);
//!
//! a.append(&mut b);
//! assert!(b.is_empty());
//! assert_eq!(a.extract_min(), Some(1));
//! assert_eq!(a.extract_min(), Some(3));
//! ```

pub mod binary;
pub mod binomial;
pub mod degree;
pub mod fibonacci;
pub mod hash_table;
pub mod storage;
pub mod traits;

// Re-export the main traits for convenience
pub use traits::{Heap, MergeableHeap};

/// Fast deterministic hasher for [`hash_table::HashTable`]
pub use rustc_hash::FxBuildHasher;
