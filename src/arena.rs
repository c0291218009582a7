//! Dense storage for the nodes of a single tree.
//!
//! Nodes never point at each other directly. Every child (and, for Red-Black
//! trees, parent) link is a [`NodeId`] into the tree's [`Arena`], a thin
//! wrapper over a [`Slab`]. Rotations are a handful of index writes and
//! dropping or cloning a tree never recurses.

use std::fmt;
use std::ops::{Index, IndexMut};

use slab::Slab;

/// The position of a node inside its tree's [`Arena`]. Only meaningful for
/// the tree that handed it out.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The raw slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A slab of nodes. Removed nodes leave a vacant slot behind which is reused
/// by the next insert.
#[derive(Clone)]
pub struct Arena<N> {
    slab: Slab<N>,
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Arena<N> {
    pub(crate) fn new() -> Self {
        Self { slab: Slab::new() }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.slab.len()
    }

    /// Whether the arena holds no live nodes.
    pub fn is_empty(&self) -> bool {
        self.slab.is_empty()
    }

    /// The node at `id`, if that slot is live.
    pub fn get(&self, id: NodeId) -> Option<&N> {
        self.slab.get(id.0)
    }

    pub(crate) fn insert(&mut self, node: N) -> NodeId {
        NodeId(self.slab.insert(node))
    }

    /// Takes the node out of its slot. The caller must already have unlinked
    /// it from the rest of the tree.
    pub(crate) fn remove(&mut self, id: NodeId) -> N {
        self.slab
            .try_remove(id.0)
            .expect("Removing a node twice from the arena")
    }

    /// Mutable access to two distinct nodes at once.
    ///
    /// ## Panics
    ///
    /// When `a == b` or either slot is vacant.
    pub(crate) fn pair_mut(&mut self, a: NodeId, b: NodeId) -> (&mut N, &mut N) {
        self.slab
            .get2_mut(a.0, b.0)
            .expect("pair_mut needs two distinct live nodes")
    }

    /// Ids of every live node.
    #[cfg(test)]
    pub(crate) fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slab.iter().map(|(key, _)| NodeId(key))
    }

    pub(crate) fn clear(&mut self) {
        self.slab.clear();
    }
}

impl<N> Index<NodeId> for Arena<N> {
    type Output = N;

    fn index(&self, id: NodeId) -> &N {
        self.get(id).expect("Node ids held by a tree are always live")
    }
}

impl<N> IndexMut<NodeId> for Arena<N> {
    fn index_mut(&mut self, id: NodeId) -> &mut N {
        self.slab
            .get_mut(id.0)
            .expect("Node ids held by a tree are always live")
    }
}

impl<N: fmt::Debug> fmt::Debug for Arena<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.slab.iter().map(|(key, node)| (NodeId(key), node)))
            .finish()
    }
}
