//! Binomial Heap implementation
//!
//! A binomial heap is a forest of binomial trees with:
//! - O(log n) insert and extract_min
//! - O(log n) get_min (root scan, no cached minimum)
//! - O(m + log n) merge of a heap with m nodes
//!
//! # Algorithm Overview
//!
//! **Binomial Tree Bₖ**: Recursively defined:
//! - B₀ is a single node
//! - Bₖ is formed by linking two B_{k-1} trees
//! - Bₖ has exactly 2ᵏ nodes and its root has k children of degrees
//!   k-1, k-2, ..., 0 (most recently linked child first)
//!
//! The roots form a singly linked list through their `sibling` links, sorted
//! by strictly increasing degree. Like the binary representation of n, there
//! is at most one tree of each degree.
//!
//! **Key Operations**:
//! - **Merge**: splice the two degree-sorted root lists like sorted linked
//!   lists, then walk the result linking neighbours of equal degree
//! - **Insert**: merge a one-node list
//! - **Extract-min**: unlink the minimum root, reverse its child list (which
//!   is in decreasing degree order) and merge it back
//!
//! # Node Ownership
//!
//! Nodes live in a [`NodeArena`]. The `child` and `sibling` links form the
//! ownership tree (each node is reached from exactly one of them, or is the
//! head), `parent` is a back-reference used only for navigation.

use crate::degree::{checked_increment, Degree};
use crate::storage::{NodeArena, NodeKey, NodeLinks};
use crate::traits::{Heap, MergeableHeap};
use tracing::trace;

/// Arena entry of a binomial tree node
#[derive(Debug, Clone)]
struct Node<K> {
    key: K,
    /// Number of children. A Bₖ root has degree k.
    degree: Degree,
    /// Back-reference to the parent (None for roots)
    parent: Option<NodeKey>,
    /// First child, the one with the highest degree
    child: Option<NodeKey>,
    /// Next root in the root list, or next child of the same parent
    sibling: Option<NodeKey>,
}

impl<K> Node<K> {
    fn new(key: K) -> Self {
        Self {
            key,
            degree: 0,
            parent: None,
            child: None,
            sibling: None,
        }
    }
}

impl<K> NodeLinks for Node<K> {
    fn remap_links(&mut self, remap: &dyn Fn(NodeKey) -> NodeKey) {
        self.parent = self.parent.map(remap);
        self.child = self.child.map(remap);
        self.sibling = self.sibling.map(remap);
    }
}

/// Binomial Heap
///
/// # Example
///
/// ```rust
/// use classic_heaps::binomial::BinomialHeap;
/// use classic_heaps::Heap;
///
/// let mut heap = BinomialHeap::new();
/// heap.insert(5);
/// heap.insert(1);
/// heap.insert(7);
///
/// assert_eq!(heap.extract_min(), Some(1));
/// assert_eq!(heap.extract_min(), Some(5));
/// assert_eq!(heap.extract_min(), Some(7));
/// assert_eq!(heap.extract_min(), None);
/// ```
#[derive(Debug, Clone)]
pub struct BinomialHeap<K: Ord> {
    nodes: NodeArena<Node<K>>,
    /// First root of the root list (lowest degree)
    head: Option<NodeKey>,
}

impl<K: Ord> Heap<K> for BinomialHeap<K> {
    fn new() -> Self {
        Self {
            nodes: NodeArena::new(),
            head: None,
        }
    }

    fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Inserts a key as a one-node heap merged into this one
    ///
    /// **Time Complexity**: O(log n); linking carries like binary increment.
    fn insert(&mut self, key: K) {
        let node = self.nodes.insert(Node::new(key));
        self.union(Some(node));
    }

    /// Returns the minimum key by scanning the root list
    fn peek(&self) -> Option<&K> {
        self.find_min_root().map(|(_, min)| &self.nodes[min].key)
    }

    /// Removes and returns the minimum key
    ///
    /// **Time Complexity**: O(log n)
    ///
    /// **Algorithm**:
    /// 1. Scan the roots for the minimum and its predecessor
    /// 2. Unlink the minimum from the root list
    /// 3. Reverse its child list, clearing parent links. Children are stored
    ///    in decreasing degree order, so the reversal yields a valid root list
    /// 4. Merge the reversed list into the remaining roots
    fn extract_min(&mut self) -> Option<K> {
        let (prev, min) = self.find_min_root()?;

        let after = self.nodes[min].sibling.take();
        match prev {
            Some(p) => self.nodes[p].sibling = after,
            None => self.head = after,
        }

        let mut child = self.nodes[min].child.take();
        let mut reversed = None;
        while let Some(c) = child {
            let node = &mut self.nodes[c];
            child = node.sibling;
            node.sibling = reversed;
            node.parent = None;
            reversed = Some(c);
        }

        self.union(reversed);

        self.nodes.remove(min).map(|node| node.key)
    }
}

impl<K: Ord> MergeableHeap<K> for BinomialHeap<K> {
    /// Merges the roots of `other` into this heap, leaving `other` empty
    ///
    /// The nodes of the smaller arena are moved into the larger one; the
    /// resulting root lists are then united like two binary numbers.
    fn append(&mut self, other: &mut Self) {
        if other.is_empty() {
            return;
        }
        if self.nodes.len() < other.nodes.len() {
            std::mem::swap(self, other);
        }

        let moved = other.nodes.len();
        let remap = self.nodes.absorb(&mut other.nodes);
        let other_head = other.head.take().map(|k| remap[&k]);
        self.union(other_head);

        trace!(moved, len = self.nodes.len(), "merged binomial heaps");
    }
}

impl<K: Ord> BinomialHeap<K> {
    /// Returns the minimum key, or `None` if the heap is empty
    ///
    /// Alias of [`Heap::peek`].
    pub fn get_min(&self) -> Option<&K> {
        self.peek()
    }

    /// Degrees of the roots, in root-list order
    pub fn root_degrees(&self) -> Vec<Degree> {
        self.roots().map(|root| self.nodes[root].degree).collect()
    }

    fn roots(&self) -> impl Iterator<Item = NodeKey> + '_ {
        std::iter::successors(self.head, move |&root| self.nodes[root].sibling)
    }

    /// Finds the minimum root (leftmost on ties) and the root before it
    fn find_min_root(&self) -> Option<(Option<NodeKey>, NodeKey)> {
        let mut min = self.head?;
        let mut min_prev = None;

        let mut prev = min;
        let mut cursor = self.nodes[min].sibling;
        while let Some(root) = cursor {
            if self.nodes[root].key < self.nodes[min].key {
                min = root;
                min_prev = Some(prev);
            }
            prev = root;
            cursor = self.nodes[root].sibling;
        }

        Some((min_prev, min))
    }

    /// Makes `child` the first child of `parent`
    ///
    /// Both must be roots of equal degree and the caller must have arranged
    /// `key(parent) <= key(child)`. `child`'s previous sibling link is
    /// overwritten, so the caller must already have unlinked it.
    fn link(&mut self, parent: NodeKey, child: NodeKey) {
        let first_child = self.nodes[parent].child;
        {
            let node = &mut self.nodes[child];
            node.parent = Some(parent);
            node.sibling = first_child;
        }
        let node = &mut self.nodes[parent];
        node.child = Some(child);
        node.degree = checked_increment(node.degree);
    }

    /// Splices two degree-sorted root lists into one degree-sorted list
    ///
    /// On equal degrees the node from `a` comes first.
    fn merge_root_lists(
        &mut self,
        mut a: Option<NodeKey>,
        mut b: Option<NodeKey>,
    ) -> Option<NodeKey> {
        let mut head = None;
        let mut tail: Option<NodeKey> = None;

        while let (Some(x), Some(y)) = (a, b) {
            let next = if self.nodes[x].degree <= self.nodes[y].degree {
                a = self.nodes[x].sibling;
                x
            } else {
                b = self.nodes[y].sibling;
                y
            };
            match tail {
                Some(t) => self.nodes[t].sibling = Some(next),
                None => head = Some(next),
            }
            tail = Some(next);
        }

        let rest = a.or(b);
        match tail {
            Some(t) => {
                self.nodes[t].sibling = rest;
                head
            }
            None => rest,
        }
    }

    /// Unites the root list starting at `other` with this heap's roots
    ///
    /// **Algorithm**: after splicing the lists, walk them with a window of
    /// (prev, curr, next). Advance when `curr` and `next` differ in degree,
    /// or when a third root of the same degree follows (that pair is linked
    /// on the next step, keeping carries in order). Otherwise link the two:
    /// the smaller key becomes the parent, `curr` on ties, and scanning
    /// continues from the linked tree.
    ///
    /// **Invariant**: on return no two roots share a degree and degrees are
    /// strictly increasing along the list.
    fn union(&mut self, other: Option<NodeKey>) {
        self.head = self.merge_root_lists(self.head, other);

        let Some(mut curr) = self.head else {
            return;
        };
        let mut prev: Option<NodeKey> = None;

        while let Some(next) = self.nodes[curr].sibling {
            let degree = self.nodes[curr].degree;
            let after = self.nodes[next].sibling;
            let third_of_degree = after.is_some_and(|a| self.nodes[a].degree == degree);

            if self.nodes[next].degree != degree || third_of_degree {
                prev = Some(curr);
                curr = next;
            } else if self.nodes[curr].key <= self.nodes[next].key {
                self.nodes[curr].sibling = after;
                self.link(curr, next);
            } else {
                match prev {
                    Some(p) => self.nodes[p].sibling = Some(next),
                    None => self.head = Some(next),
                }
                self.link(next, curr);
                curr = next;
            }
        }
    }

    /// Checks every structural invariant of the heap
    ///
    /// - Root degrees are strictly increasing and roots have no parent
    /// - A node of degree k has k children of degrees k-1, ..., 0 in order,
    ///   each pointing back at it and holding a key no smaller than its own
    /// - Every tree of degree k holds exactly 2ᵏ nodes
    /// - The trees account for every node in the arena
    pub fn verify_structure(&self) -> bool {
        let mut last_degree: Option<Degree> = None;
        let mut total = 0usize;

        for root in self.roots() {
            let node = &self.nodes[root];
            if node.parent.is_some() || last_degree.is_some_and(|d| d >= node.degree) {
                return false;
            }
            last_degree = Some(node.degree);

            match self.tree_size(root) {
                Some(size) => total += size,
                None => return false,
            }
        }

        total == self.nodes.len()
    }

    /// Size of the binomial tree under `root`, or `None` if it is malformed
    fn tree_size(&self, root: NodeKey) -> Option<usize> {
        let node = &self.nodes[root];
        let mut size = 1usize;
        let mut expected = node.degree;

        let mut cursor = node.child;
        while let Some(c) = cursor {
            let child = &self.nodes[c];
            if expected == 0
                || child.degree != expected - 1
                || child.parent != Some(root)
                || child.key < node.key
            {
                return None;
            }
            expected -= 1;
            size += self.tree_size(c)?;
            cursor = child.sibling;
        }

        let full = 1usize.checked_shl(u32::from(node.degree));
        (expected == 0 && full == Some(size)).then_some(size)
    }
}

impl<K: Ord> Default for BinomialHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> Extend<K> for BinomialHeap<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for BinomialHeap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}
