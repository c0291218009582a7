//! The contract every tree node satisfies, whatever keeps it balanced.
//!
//! A [`Node`] knows its data and the ids of its children. The shared walks
//! (search, extremes, depth) only need that much and are provided here. Each
//! variant brings its own `insert` and `remove` which restructure the subtree
//! inside the tree's [`Arena`] and report the subtree's new root back up.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

use crate::arena::{Arena, NodeId};

mod sealed {
    pub trait Sealed {}

    impl<T> Sealed for crate::bst::BstNode<T> {}
    impl<T> Sealed for crate::avl::AvlNode<T> {}
    impl<T> Sealed for crate::red_black::RedBlackNode<T> {}
}

/// Outcome of inserting into a subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// The value was added. `root` is the subtree's root afterwards, which may
    /// differ from the one passed in if the subtree was rotated.
    Inserted {
        /// New root of the subtree.
        root: NodeId,
    },
    /// An equal value was already present so nothing changed.
    Duplicate,
}

/// Outcome of removing from a subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal<T> {
    /// The value wasn't found so nothing was removed.
    NotFound,
    /// The value was removed and is handed back as `data`. `root` is the
    /// subtree's new root, `None` if the subtree is now empty.
    Removed {
        /// New root of the subtree.
        root: Option<NodeId>,
        /// The value that was removed.
        data: T,
    },
}

/// A node of a binary search tree stored in an [`Arena`].
///
/// This trait is sealed: the node types of this crate ([`BstNode`],
/// [`AvlNode`] and [`RedBlackNode`]) are its only implementors.
///
/// [`BstNode`]: crate::BstNode
/// [`AvlNode`]: crate::AvlNode
/// [`RedBlackNode`]: crate::RedBlackNode
pub trait Node: Sized + sealed::Sealed {
    /// The ordered payload.
    type Data: Ord;

    /// The value stored in this node.
    fn data(&self) -> &Self::Data;

    /// Id of the left child.
    fn left(&self) -> Option<NodeId>;

    /// Id of the right child.
    fn right(&self) -> Option<NodeId>;

    /// Inserts `data` into the subtree rooted at `root` (`None` for an empty
    /// subtree). Equal data is left alone and reported as
    /// [`Insertion::Duplicate`] without any node being modified.
    fn insert(nodes: &mut Arena<Self>, root: Option<NodeId>, data: Self::Data) -> Insertion;

    /// Removes the node holding `data` from the subtree rooted at `root`.
    fn remove(nodes: &mut Arena<Self>, root: NodeId, data: &Self::Data) -> Removal<Self::Data>;

    /// Checks the variant's structural invariant (heights, colors, parent
    /// links...) over the subtree. Ordering is checked separately by the tree.
    fn verify_shape(nodes: &Arena<Self>, root: Option<NodeId>) -> bool;

    /// How `data` orders against this node's data. `Less` means `data` belongs
    /// in the left subtree.
    fn compare(&self, data: &Self::Data) -> Ordering {
        data.cmp(self.data())
    }

    /// Walks down from `root` looking for `data`.
    fn find(nodes: &Arena<Self>, root: Option<NodeId>, data: &Self::Data) -> Option<NodeId> {
        let mut current = root;
        while let Some(id) = current {
            let node = &nodes[id];
            current = match node.compare(data) {
                Ordering::Less => node.left(),
                Ordering::Equal => return Some(id),
                Ordering::Greater => node.right(),
            };
        }
        None
    }

    /// The smallest node of the subtree rooted at `id`.
    fn leftmost(nodes: &Arena<Self>, mut id: NodeId) -> NodeId {
        while let Some(left) = nodes[id].left() {
            id = left;
        }
        id
    }

    /// The largest node of the subtree rooted at `id`.
    fn rightmost(nodes: &Arena<Self>, mut id: NodeId) -> NodeId {
        while let Some(right) = nodes[id].right() {
            id = right;
        }
        id
    }

    /// Number of levels below and including `root`, counted breadth-first.
    fn depth(nodes: &Arena<Self>, root: Option<NodeId>) -> usize {
        let mut level: VecDeque<NodeId> = root.into_iter().collect();
        let mut depth = 0;
        while !level.is_empty() {
            depth += 1;
            for _ in 0..level.len() {
                let id = level.pop_front().expect("Counted non-empty level");
                level.extend(nodes[id].left());
                level.extend(nodes[id].right());
            }
        }
        depth
    }
}

/// A borrowed, read-only view of one node and, through its children, the
/// subtree below it.
///
/// [`node`][NodeRef::node] exposes the variant's own node type, e.g. for
/// [`AvlNode::height`][crate::AvlNode::height] or
/// [`RedBlackNode::color`][crate::RedBlackNode::color].
pub struct NodeRef<'a, N> {
    nodes: &'a Arena<N>,
    id: NodeId,
}

impl<N> Clone for NodeRef<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<N> Copy for NodeRef<'_, N> {}

impl<'a, N: Node> NodeRef<'a, N> {
    pub(crate) fn new(nodes: &'a Arena<N>, id: NodeId) -> Self {
        Self { nodes, id }
    }

    /// Id of this node in its tree.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The value stored in this node.
    pub fn data(&self) -> &'a N::Data {
        self.node().data()
    }

    /// The left child, if any.
    pub fn left(&self) -> Option<Self> {
        self.node().left().map(|id| Self::new(self.nodes, id))
    }

    /// The right child, if any.
    pub fn right(&self) -> Option<Self> {
        self.node().right().map(|id| Self::new(self.nodes, id))
    }

    /// Another node of the same tree by id.
    pub fn get(&self, id: NodeId) -> Option<Self> {
        self.nodes.get(id).map(|_| Self::new(self.nodes, id))
    }

    /// The variant-specific node.
    pub fn node(&self) -> &'a N {
        &self.nodes[self.id]
    }
}

impl<N> fmt::Debug for NodeRef<'_, N>
where
    N: Node,
    N::Data: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("data", self.data())
            .field("left", &self.node().left())
            .field("right", &self.node().right())
            .finish()
    }
}
