//! Arena storage for linked heap nodes
//!
//! The binomial and Fibonacci heaps keep their nodes in a [`NodeArena`]
//! instead of individually boxed allocations. Nodes refer to each other with
//! [`NodeKey`]s, which are generational `slotmap` keys:
//!
//! - Cycles (circular sibling rings, parent back-references) are plain keys,
//!   so no reference counting or raw pointers are involved
//! - Removing a node invalidates its key; a stale key is detected on lookup
//!   instead of dereferencing freed memory
//! - Dropping the arena drops every node exactly once
//!
//! Moving nodes between heaps (merge) goes through [`NodeArena::absorb`],
//! which re-inserts every node of the source arena and rewrites all of their
//! links through a [`NodeLinks`] implementation.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use std::ops::{Index, IndexMut};

new_key_type! {
    /// Stable key of a node inside a [`NodeArena`]
    pub struct NodeKey;
}

/// Nodes that hold links to other nodes of the same arena
///
/// `absorb` calls [`NodeLinks::remap_links`] on every moved node so that the
/// node can replace each of its keys with the key the target arena assigned.
pub trait NodeLinks {
    /// Rewrites every stored key through `remap`
    fn remap_links(&mut self, remap: &dyn Fn(NodeKey) -> NodeKey);
}

/// Slotmap-backed node arena
#[derive(Debug, Clone)]
pub struct NodeArena<N> {
    nodes: SlotMap<NodeKey, N>,
}

impl<N> Default for NodeArena<N> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }
}

impl<N> NodeArena<N> {
    /// Creates an empty arena
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Inserts a node, returning its key
    #[inline]
    pub fn insert(&mut self, node: N) -> NodeKey {
        self.nodes.insert(node)
    }

    /// Inserts a node built from its own key
    ///
    /// Used for self-referential nodes such as a singleton ring whose
    /// `left`/`right` point back at the node itself.
    #[inline]
    pub fn insert_with_key(&mut self, f: impl FnOnce(NodeKey) -> N) -> NodeKey {
        self.nodes.insert_with_key(f)
    }

    /// Removes a node, returning it if the key was live
    #[inline]
    pub fn remove(&mut self, key: NodeKey) -> Option<N> {
        self.nodes.remove(key)
    }

    #[inline]
    pub fn get(&self, key: NodeKey) -> Option<&N> {
        self.nodes.get(key)
    }

    #[inline]
    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }
}

impl<N: NodeLinks> NodeArena<N> {
    /// Moves every node of `other` into `self`, leaving `other` empty
    ///
    /// Returns the key translation table (old key in `other` to new key in
    /// `self`). All links inside the moved nodes are already rewritten; the
    /// caller only needs the table for keys it held outside the nodes, such
    /// as a root-list head or a minimum pointer.
    pub fn absorb(&mut self, other: &mut NodeArena<N>) -> FxHashMap<NodeKey, NodeKey> {
        let mut remap: FxHashMap<NodeKey, NodeKey> = FxHashMap::default();
        remap.reserve(other.nodes.len());

        for (old, node) in other.nodes.drain() {
            let new = self.nodes.insert(node);
            remap.insert(old, new);
        }

        // Every link of a moved node points into the source arena, so every
        // key it holds has an entry in `remap`.
        let translate = |key: NodeKey| remap[&key];
        for &new in remap.values() {
            self.nodes[new].remap_links(&translate);
        }

        remap
    }
}

impl<N> Index<NodeKey> for NodeArena<N> {
    type Output = N;

    #[inline]
    fn index(&self, key: NodeKey) -> &N {
        &self.nodes[key]
    }
}

impl<N> IndexMut<NodeKey> for NodeArena<N> {
    #[inline]
    fn index_mut(&mut self, key: NodeKey) -> &mut N {
        &mut self.nodes[key]
    }
}
