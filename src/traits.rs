//! Common traits for the heap data structures
//!
//! - [`Heap`]: insert / peek / extract-min over keys with native ordering
//! - [`MergeableHeap`]: consuming merge of two heaps of the same type
//!
//! Every heap in this crate is a min-heap: `extract_min` returns the smallest
//! key first. Absence is always reported as `None`, never as a sentinel key.

/// Base trait for min-heaps over keys ordered by [`Ord`]
///
/// # Example
///
/// ```rust
/// use classic_heaps::Heap;
/// use classic_heaps::binary::BinaryHeap;
///
/// let mut heap = BinaryHeap::new();
/// heap.insert(3);
/// heap.insert(1);
/// heap.insert(2);
///
/// assert_eq!(heap.peek(), Some(&1));
/// assert_eq!(heap.extract_min(), Some(1));
/// ```
pub trait Heap<K: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap holds no keys
    fn is_empty(&self) -> bool;

    /// Returns the number of keys in the heap
    fn len(&self) -> usize;

    /// Inserts a key
    ///
    /// # Time Complexity
    /// O(log n) for the binary and binomial heaps, O(1) for the Fibonacci heap.
    fn insert(&mut self, key: K);

    /// Returns the minimum key without removing it, or `None` if empty
    ///
    /// # Time Complexity
    /// O(1) for the binary and Fibonacci heaps; O(log n) root scan for the
    /// binomial heap, which keeps no minimum pointer.
    fn peek(&self) -> Option<&K>;

    /// Removes and returns the minimum key, or `None` if empty
    ///
    /// An empty heap is left untouched.
    ///
    /// # Time Complexity
    /// O(log n), amortized for the Fibonacci heap.
    fn extract_min(&mut self) -> Option<K>;
}

/// Heaps that can absorb another heap of the same type
pub trait MergeableHeap<K: Ord>: Heap<K> {
    /// Moves every key of `other` into this heap, leaving `other` empty
    ///
    /// After the call `other.is_empty()` holds and `other` may be reused as
    /// a fresh heap.
    ///
    /// # Time Complexity
    /// - Binary heap: O(m log(n + m)) for m keys moved
    /// - Binomial heap: O(m + log n)
    /// - Fibonacci heap: O(m) to move the nodes, O(1) to splice the rings
    fn append(&mut self, other: &mut Self);

    /// Merges another heap into this one, consuming it
    fn merge(&mut self, mut other: Self)
    where
        Self: Sized,
    {
        self.append(&mut other);
    }
}
