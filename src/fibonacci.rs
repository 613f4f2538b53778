//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) insert and peek
//! - O(log n) amortized extract_min
//! - O(1) ring splice on merge (plus moving the other heap's nodes)
//!
//! The structure consists of a collection of heap-ordered trees. Roots are
//! linked in a circular doubly linked list, and so are the children of every
//! node. The heap keeps a pointer to the minimum root.
//!
//! Work is deferred: insert only splices a node into the root list, and trees
//! are only combined by `consolidate` during `extract_min`, which links roots
//! of equal degree until every degree appears at most once.
//!
//! # Rings in the arena
//!
//! Nodes live in a [`NodeArena`] and refer to each other by [`NodeKey`].
//! `left` and `right` always form a valid ring; a node alone in its ring
//! points at itself on both sides. `child` is the entry point into the child
//! ring and `parent` is a back-reference.

use crate::degree::{checked_increment, table_slots, Degree};
use crate::storage::{NodeArena, NodeKey, NodeLinks};
use crate::traits::{Heap, MergeableHeap};
use smallvec::SmallVec;
use tracing::trace;

/// Handle to a key inserted into a Fibonacci heap
///
/// Handles stay valid until their key is extracted. A handle is tied to the
/// heap that issued it: after [`MergeableHeap::append`] moves the nodes of a
/// heap elsewhere, that heap's handles no longer resolve.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FibonacciHandle {
    node: NodeKey,
}

#[derive(Debug, Clone)]
struct Node<K> {
    key: K,
    degree: Degree,
    /// Set when the node lost a child since it last became a child
    marked: bool,
    parent: Option<NodeKey>,
    child: Option<NodeKey>,
    left: NodeKey,
    right: NodeKey,
}

impl<K> NodeLinks for Node<K> {
    fn remap_links(&mut self, remap: &dyn Fn(NodeKey) -> NodeKey) {
        self.parent = self.parent.map(remap);
        self.child = self.child.map(remap);
        self.left = remap(self.left);
        self.right = remap(self.right);
    }
}

/// Fibonacci Heap
///
/// # Example
///
/// ```rust
/// use classic_heaps::fibonacci::FibonacciHeap;
/// use classic_heaps::Heap;
///
/// let mut heap = FibonacciHeap::new();
/// heap.insert(2);
/// heap.insert(9);
/// assert_eq!(heap.extract_min(), Some(2));
/// heap.insert(1);
/// assert_eq!(heap.extract_min(), Some(1));
/// assert_eq!(heap.extract_min(), Some(9));
/// assert_eq!(heap.extract_min(), None);
/// ```
#[derive(Debug, Clone)]
pub struct FibonacciHeap<K: Ord> {
    nodes: NodeArena<Node<K>>,
    min: Option<NodeKey>,
    len: usize,
}

impl<K: Ord> Heap<K> for FibonacciHeap<K> {
    fn new() -> Self {
        Self {
            nodes: NodeArena::new(),
            min: None,
            len: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn insert(&mut self, key: K) {
        self.push(key);
    }

    fn peek(&self) -> Option<&K> {
        self.min.map(|min| &self.nodes[min].key)
    }

    /// Removes and returns the minimum key
    ///
    /// **Time Complexity**: O(log n) amortized
    ///
    /// **Algorithm**:
    /// 1. Move every child of the minimum into the root list
    /// 2. Detach the minimum from the root list
    /// 3. If any root remains, point `min` at one and consolidate
    fn extract_min(&mut self) -> Option<K> {
        let z = self.min?;

        if let Some(first) = self.nodes[z].child.take() {
            // The child ring is rewired while moving, so collect it first
            let children: SmallVec<[NodeKey; 16]> = self.ring(first).collect();
            for x in children {
                self.remove_from_list(x);
                self.add_to_root_list(x);
                self.nodes[x].parent = None;
            }
        }

        self.remove_from_list(z);

        let right = self.nodes[z].right;
        if right == z {
            self.min = None;
        } else {
            self.min = Some(right);
            self.consolidate();
        }

        self.len -= 1;
        self.nodes.remove(z).map(|node| node.key)
    }
}

impl<K: Ord> MergeableHeap<K> for FibonacciHeap<K> {
    /// Moves the nodes of `other` into this heap and splices the root rings
    fn append(&mut self, other: &mut Self) {
        let Some(other_min) = other.min.take() else {
            return;
        };

        let remap = self.nodes.absorb(&mut other.nodes);
        let other_min = remap[&other_min];
        let moved = std::mem::take(&mut other.len);
        self.len += moved;

        match self.min {
            None => self.min = Some(other_min),
            Some(self_min) => {
                let self_left = self.nodes[self_min].left;
                let other_left = self.nodes[other_min].left;

                self.nodes[self_left].right = other_min;
                self.nodes[other_min].left = self_left;
                self.nodes[other_left].right = self_min;
                self.nodes[self_min].left = other_left;

                if self.nodes[other_min].key < self.nodes[self_min].key {
                    self.min = Some(other_min);
                }
            }
        }

        trace!(moved, len = self.len, "merged fibonacci heaps");
    }
}

impl<K: Ord> FibonacciHeap<K> {
    /// Inserts a key and returns a handle to its node
    ///
    /// **Time Complexity**: O(1)
    pub fn push(&mut self, key: K) -> FibonacciHandle {
        let node = self.nodes.insert_with_key(|me| Node {
            key,
            degree: 0,
            marked: false,
            parent: None,
            child: None,
            left: me,
            right: me,
        });
        self.add_to_root_list(node);
        self.len += 1;
        FibonacciHandle { node }
    }

    /// Returns the key behind a handle, or `None` once it was extracted
    pub fn get(&self, handle: FibonacciHandle) -> Option<&K> {
        self.nodes.get(handle.node).map(|node| &node.key)
    }

    /// Returns true while the handle's key is still in the heap
    pub fn contains(&self, handle: FibonacciHandle) -> bool {
        self.nodes.contains(handle.node)
    }

    /// Iterates over the ring containing `start`, beginning at `start`
    fn ring(&self, start: NodeKey) -> impl Iterator<Item = NodeKey> + '_ {
        std::iter::successors(Some(start), move |&x| {
            let next = self.nodes[x].right;
            (next != start).then_some(next)
        })
    }

    /// Splices `x` into the root list next to `min`
    ///
    /// An empty heap makes `x` the only root, as a self-loop.
    fn add_to_root_list(&mut self, x: NodeKey) {
        match self.min {
            None => {
                let node = &mut self.nodes[x];
                node.left = x;
                node.right = x;
                self.min = Some(x);
            }
            Some(min) => {
                let min_right = self.nodes[min].right;
                {
                    let node = &mut self.nodes[x];
                    node.right = min_right;
                    node.left = min;
                }
                self.nodes[min_right].left = x;
                self.nodes[min].right = x;

                if self.nodes[x].key < self.nodes[min].key {
                    self.min = Some(x);
                }
            }
        }
    }

    /// Unlinks `x` from its ring; `x` keeps its stale `left`/`right`
    fn remove_from_list(&mut self, x: NodeKey) {
        let (left, right) = (self.nodes[x].left, self.nodes[x].right);
        self.nodes[left].right = right;
        self.nodes[right].left = left;
    }

    /// Makes root `y` a child of root `x`
    fn link(&mut self, y: NodeKey, x: NodeKey) {
        self.remove_from_list(y);
        {
            let node = &mut self.nodes[y];
            node.parent = Some(x);
            node.marked = false;
        }

        match self.nodes[x].child {
            None => {
                self.nodes[x].child = Some(y);
                let node = &mut self.nodes[y];
                node.left = y;
                node.right = y;
            }
            Some(child) => {
                let child_right = self.nodes[child].right;
                {
                    let node = &mut self.nodes[y];
                    node.right = child_right;
                    node.left = child;
                }
                self.nodes[child_right].left = y;
                self.nodes[child].right = y;
            }
        }

        let node = &mut self.nodes[x];
        node.degree = checked_increment(node.degree);
    }

    /// Links roots of equal degree until every degree appears at most once
    ///
    /// **Algorithm**:
    /// 1. Collect the roots (linking rewires the root ring)
    /// 2. For each root, while the table holds a root of the same degree,
    ///    link the larger key under the smaller and move up one degree
    /// 3. Rebuild the root list from the table and recompute `min`
    ///
    /// **Why O(log n) amortized?** Each link removes a root, and the number
    /// of roots is paid for by the inserts and cuts that created them. The
    /// table has O(log n) slots since degrees only grow here.
    fn consolidate(&mut self) {
        let Some(start) = self.min else {
            return;
        };

        let roots: SmallVec<[NodeKey; 32]> = self.ring(start).collect();
        let root_count = roots.len();

        let mut table: SmallVec<[Option<NodeKey>; 64]> = SmallVec::new();
        table.resize(table_slots(self.len), None);

        for w in roots {
            let mut x = w;
            let mut d = usize::from(self.nodes[x].degree);

            while let Some(mut y) = table.get_mut(d).and_then(Option::take) {
                if self.nodes[x].key > self.nodes[y].key {
                    std::mem::swap(&mut x, &mut y);
                }
                self.link(y, x);
                d += 1;
            }

            if d >= table.len() {
                table.resize(d + 1, None);
            }
            table[d] = Some(x);
        }

        self.min = None;
        let slots = table.len();
        let mut trees = 0usize;
        for a in table.into_iter().flatten() {
            self.add_to_root_list(a);
            trees += 1;
        }

        trace!(roots = root_count, trees, slots, "consolidated fibonacci roots");
    }

    /// Checks every structural invariant of the heap
    ///
    /// - Every ring is doubly linked: `left(right(x)) == x`, and walking
    ///   `right` from any node returns to it
    /// - Roots have no parent; children point back at their parent
    /// - No node is marked
    /// - A node's degree equals the size of its child ring
    /// - Heap order holds on every edge
    /// - `min` is a root holding the smallest root key
    /// - The trees account for `len` nodes and every node in the arena
    pub fn verify_structure(&self) -> bool {
        let Some(min) = self.min else {
            return self.len == 0 && self.nodes.is_empty();
        };
        if self.nodes[min].parent.is_some() {
            return false;
        }

        let mut total = 0usize;
        for (seen, root) in self.ring(min).enumerate() {
            if seen >= self.nodes.len() || self.nodes[root].key < self.nodes[min].key {
                return false;
            }
            match self.verify_ring_member(root, None) {
                Some(size) => total += size,
                None => return false,
            }
        }

        total == self.len && total == self.nodes.len()
    }

    /// Checks `x` and its subtree; returns the subtree size
    fn verify_ring_member(&self, x: NodeKey, parent: Option<NodeKey>) -> Option<usize> {
        let node = &self.nodes[x];
        // Marks are only set by cuts, which this heap never performs
        if node.parent != parent
            || node.marked
            || self.nodes[node.right].left != x
            || self.nodes[node.left].right != x
        {
            return None;
        }

        let mut size = 1usize;
        let mut children = 0usize;
        if let Some(first) = node.child {
            for c in self.ring(first) {
                if self.nodes[c].key < node.key {
                    return None;
                }
                children += 1;
                // A ring that does not close would walk forever
                if children > self.nodes.len() {
                    return None;
                }
                size += self.verify_ring_member(c, Some(x))?;
            }
        }

        (children == usize::from(node.degree)).then_some(size)
    }
}

impl<K: Ord> Default for FibonacciHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> Extend<K> for FibonacciHeap<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.push(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for FibonacciHeap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}
