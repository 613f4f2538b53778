//! Binary Heap implementation
//!
//! An array-backed binary min-heap. The vector encodes a complete binary tree
//! by position: the children of index `i` sit at `2i + 1` and `2i + 2`, and
//! every non-root element is no smaller than its parent.
//!
//! # Time Complexity
//!
//! | Operation     | Complexity       |
//! |---------------|------------------|
//! | `insert`      | O(log n)         |
//! | `extract_min` | O(log n)         |
//! | `peek`        | O(1)             |
//! | `from_vec`    | O(n)             |
//! | `append`      | O(m log(n + m))  |
//!
//! # Example
//!
//! ```rust
//! use classic_heaps::Heap;
//! use classic_heaps::binary::BinaryHeap;
//!
//! let mut heap = BinaryHeap::new();
//! for key in [3, 1, 4, 1, 5] {
//!     heap.insert(key);
//! }
//!
//! assert_eq!(heap.extract_min(), Some(1));
//! assert_eq!(heap.extract_min(), Some(1));
//! assert_eq!(heap.extract_min(), Some(3));
//! assert_eq!(heap.extract_min(), Some(4));
//! assert_eq!(heap.extract_min(), Some(5));
//! assert_eq!(heap.extract_min(), None);
//! ```

use crate::traits::{Heap, MergeableHeap};

/// A binary min-heap
#[derive(Debug, Clone)]
pub struct BinaryHeap<K: Ord> {
    /// Complete binary tree in level order
    data: Vec<K>,
}

impl<K: Ord> Heap<K> for BinaryHeap<K> {
    fn new() -> Self {
        Self { data: Vec::new() }
    }

    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn insert(&mut self, key: K) {
        self.data.push(key);
        self.sift_up(self.data.len() - 1);
    }

    fn peek(&self) -> Option<&K> {
        self.data.first()
    }

    fn extract_min(&mut self) -> Option<K> {
        if self.data.is_empty() {
            return None;
        }

        // Moves the last element into the root slot
        let min = self.data.swap_remove(0);

        if !self.data.is_empty() {
            self.sift_down(0);
        }

        Some(min)
    }
}

impl<K: Ord> MergeableHeap<K> for BinaryHeap<K> {
    fn append(&mut self, other: &mut Self) {
        if other.data.len() > self.data.len() {
            std::mem::swap(&mut self.data, &mut other.data);
        }
        self.data.reserve(other.data.len());
        for key in other.data.drain(..) {
            self.data.push(key);
            let last = self.data.len() - 1;
            self.sift_up(last);
        }
    }
}

impl<K: Ord> BinaryHeap<K> {
    /// Creates an empty heap with room for `capacity` keys
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Builds a heap from an unordered vector in O(n)
    pub fn from_vec(data: Vec<K>) -> Self {
        let mut heap = Self { data };
        heap.rebuild();
        heap
    }

    /// Drains the heap into a vector sorted in ascending order
    pub fn into_sorted_vec(mut self) -> Vec<K> {
        let mut sorted = Vec::with_capacity(self.data.len());
        while let Some(key) = self.extract_min() {
            sorted.push(key);
        }
        sorted
    }

    /// Bottom-up heapify: sift down every internal node, last first
    fn rebuild(&mut self) {
        let len = self.data.len();
        for index in (0..len / 2).rev() {
            self.sift_down(index);
        }
    }

    /// Move element at index up while it is smaller than its parent
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.data[index] < self.data[parent] {
                self.data.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Move element at index down while a child is smaller
    ///
    /// On equal children the left one is chosen.
    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < len && self.data[left] < self.data[smallest] {
                smallest = left;
            }
            if right < len && self.data[right] < self.data[smallest] {
                smallest = right;
            }

            if smallest != index {
                self.data.swap(index, smallest);
                index = smallest;
            } else {
                break;
            }
        }
    }

    /// Checks the heap order of every parent/child pair
    pub fn verify_structure(&self) -> bool {
        (1..self.data.len()).all(|i| self.data[(i - 1) / 2] <= self.data[i])
    }
}

impl<K: Ord> Default for BinaryHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> From<Vec<K>> for BinaryHeap<K> {
    fn from(data: Vec<K>) -> Self {
        Self::from_vec(data)
    }
}

impl<K: Ord> FromIterator<K> for BinaryHeap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<K: Ord> Extend<K> for BinaryHeap<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}
