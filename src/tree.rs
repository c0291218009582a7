//! The tree facade shared by every balancing strategy.
//!
//! [`Tree`] owns the node arena, the root, the element count and the default
//! traversal order. Anything that restructures nodes is delegated to the node
//! type `N`; everything else (search, extremes, traversals, bulk operations)
//! lives here and works the same for every variant.

use std::fmt;

use log::debug;

use crate::arena::{Arena, NodeId};
use crate::error::{Result, TreeError};
use crate::node::{Insertion, Node, NodeRef, Removal};
use crate::traversal::{Inorder, Iter, LevelOrder, Postorder, Preorder, TraversalOrder};

/// A binary search tree holding unique, ordered values.
///
/// `N` picks the balancing strategy. Use the aliases rather than naming it:
/// [`BinarySearchTree`][crate::BinarySearchTree],
/// [`AvlTree`][crate::AvlTree] or [`RedBlackTree`][crate::RedBlackTree].
///
/// # Examples
///
/// ```
/// use search_trees::{AvlTree, TraversalOrder, TreeError};
///
/// let mut tree = AvlTree::new();
/// assert_eq!(tree.min(), Err(TreeError::EmptyTree));
///
/// assert!(tree.add(3));
/// assert!(tree.add(1));
/// assert!(tree.add(2));
/// // Duplicates are ignored.
/// assert!(!tree.add(2));
/// assert_eq!(tree.len(), 3);
///
/// assert_eq!(tree.min(), Ok(&1));
/// assert_eq!(tree.max(), Ok(&3));
///
/// tree.set_traversal_order(TraversalOrder::Preorder);
/// let values: Vec<_> = tree.iter().copied().collect();
/// assert_eq!(values, [2, 1, 3]);
/// ```
pub struct Tree<N> {
    nodes: Arena<N>,
    root: Option<NodeId>,
    len: usize,
    order: TraversalOrder,
}

impl<N> Default for Tree<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone> Clone for Tree<N> {
    fn clone(&self) -> Self {
        // Links are ids into the arena so a plain copy of the arena is a
        // faithful copy of the tree.
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            len: self.len,
            order: self.order,
        }
    }
}

impl<N> Tree<N> {
    /// Generate a new, empty `Tree` that iterates in order.
    pub fn new() -> Self {
        Self::with_traversal_order(TraversalOrder::default())
    }

    /// Generate a new, empty `Tree` whose [`iter`][Tree::iter] uses `order`.
    pub fn with_traversal_order(order: TraversalOrder) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
            order,
        }
    }

    /// Number of elements in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree has no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The order [`iter`][Tree::iter] currently uses.
    pub fn traversal_order(&self) -> TraversalOrder {
        self.order
    }

    /// Changes the order [`iter`][Tree::iter] uses from now on.
    pub fn set_traversal_order(&mut self, order: TraversalOrder) {
        self.order = order;
    }

    /// Removes every element. Calling this on an empty tree does nothing.
    pub fn clear(&mut self) {
        if self.len > 0 {
            debug!("clearing tree of {} elements", self.len);
        }
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    #[cfg(test)]
    pub(crate) fn nodes(&self) -> &Arena<N> {
        &self.nodes
    }

    #[cfg(test)]
    pub(crate) fn nodes_mut(&mut self) -> &mut Arena<N> {
        &mut self.nodes
    }
}

impl<N: Node> Tree<N> {
    /// Inserts `item` unless an equal value is already present. Returns
    /// whether the tree changed.
    ///
    /// # Examples
    ///
    /// ```
    /// use search_trees::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// assert!(tree.add("b"));
    /// assert!(!tree.add("b"));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn add(&mut self, item: N::Data) -> bool {
        match N::insert(&mut self.nodes, self.root, item) {
            Insertion::Inserted { root } => {
                self.root = Some(root);
                self.len += 1;
                true
            }
            Insertion::Duplicate => false,
        }
    }

    /// Adds every value of `values`, in order. Values already present are
    /// skipped, as with [`add`][Tree::add].
    pub fn add_range<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = N::Data>,
    {
        let before = self.len;
        for value in values {
            self.add(value);
        }
        debug!("add_range inserted {} new elements", self.len - before);
    }

    /// Adds a copy of every element of `other`. Works across balancing
    /// strategies; `other` is left untouched and no nodes are shared.
    ///
    /// # Examples
    ///
    /// ```
    /// use search_trees::{AvlTree, BinarySearchTree};
    ///
    /// let mut tree: BinarySearchTree<_> = (0..10).collect();
    /// let other: AvlTree<_> = (5..15).collect();
    ///
    /// tree.merge_with(&other);
    /// assert!(tree.inorder().copied().eq(0..15));
    /// assert_eq!(other.len(), 10);
    /// ```
    pub fn merge_with<M>(&mut self, other: &Tree<M>)
    where
        M: Node<Data = N::Data>,
        N::Data: Clone,
    {
        debug!(
            "merging {} elements into a tree of {}",
            other.len(),
            self.len
        );
        self.add_range(other.inorder().cloned());
    }

    /// Removes `item` if present. Returns whether the tree changed.
    pub fn remove(&mut self, item: &N::Data) -> bool {
        self.take(item).is_some()
    }

    /// Removes `item` if present and hands back the stored value.
    pub fn take(&mut self, item: &N::Data) -> Option<N::Data> {
        let root = self.root?;
        match N::remove(&mut self.nodes, root, item) {
            Removal::Removed { root, data } => {
                self.root = root;
                self.len -= 1;
                Some(data)
            }
            Removal::NotFound => None,
        }
    }

    /// Whether an equal value is stored in the tree.
    pub fn contains(&self, item: &N::Data) -> bool {
        N::find(&self.nodes, self.root, item).is_some()
    }

    /// The stored value equal to `item`, if any.
    pub fn get(&self, item: &N::Data) -> Option<&N::Data> {
        N::find(&self.nodes, self.root, item).map(|id| self.nodes[id].data())
    }

    /// The smallest element.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyTree`] when there are no elements.
    pub fn min(&self) -> Result<&N::Data> {
        let root = self.root.ok_or(TreeError::EmptyTree)?;
        Ok(self.nodes[N::leftmost(&self.nodes, root)].data())
    }

    /// The largest element.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyTree`] when there are no elements.
    pub fn max(&self) -> Result<&N::Data> {
        let root = self.root.ok_or(TreeError::EmptyTree)?;
        Ok(self.nodes[N::rightmost(&self.nodes, root)].data())
    }

    /// Number of levels in the tree, 0 when empty.
    pub fn depth(&self) -> usize {
        N::depth(&self.nodes, self.root)
    }

    /// Copies the elements in sorted order into `dest`, starting at
    /// `start`. A `start` outside of `dest` copies nothing.
    ///
    /// # Errors
    ///
    /// [`TreeError::InsufficientSpace`] when `dest` has fewer than
    /// [`len`][Tree::len] slots from `start` on. Nothing is written in that
    /// case.
    ///
    /// # Examples
    ///
    /// ```
    /// use search_trees::AvlTree;
    ///
    /// let tree = AvlTree::from([3, 1, 2]);
    /// let mut dest = [0; 5];
    ///
    /// tree.copy_to(&mut dest, 1).unwrap();
    /// assert_eq!(dest, [0, 1, 2, 3, 0]);
    ///
    /// assert!(tree.copy_to(&mut dest, 3).is_err());
    /// assert_eq!(dest, [0, 1, 2, 3, 0]);
    /// ```
    pub fn copy_to(&self, dest: &mut [N::Data], start: usize) -> Result<()>
    where
        N::Data: Clone,
    {
        if start >= dest.len() {
            return Ok(());
        }
        let available = dest.len() - start;
        if available < self.len {
            return Err(TreeError::InsufficientSpace {
                needed: self.len,
                available,
            });
        }
        for (slot, value) in dest[start..].iter_mut().zip(self.inorder()) {
            *slot = value.clone();
        }
        Ok(())
    }

    /// Elements in sorted order.
    pub fn inorder(&self) -> Inorder<'_, N> {
        Inorder::new(&self.nodes, self.root)
    }

    /// Each node before its subtrees.
    pub fn preorder(&self) -> Preorder<'_, N> {
        Preorder::new(&self.nodes, self.root)
    }

    /// Each node after its subtrees.
    pub fn postorder(&self) -> Postorder<'_, N> {
        Postorder::new(&self.nodes, self.root)
    }

    /// Elements level by level from the root down.
    pub fn level_order(&self) -> LevelOrder<'_, N> {
        LevelOrder::new(&self.nodes, self.root)
    }

    /// Elements in the tree's current [`TraversalOrder`].
    pub fn iter(&self) -> Iter<'_, N> {
        Iter::new(&self.nodes, self.root, self.order)
    }

    /// A read-only view of the root node, for inspecting the tree's shape.
    pub fn root(&self) -> Option<NodeRef<'_, N>> {
        self.root.map(|id| NodeRef::new(&self.nodes, id))
    }

    /// Checks every invariant the tree is meant to keep: elements strictly
    /// increase in order, the count matches the nodes, and the balancing
    /// strategy's own rules hold.
    pub fn verify(&self) -> bool {
        let mut seen = 0;
        let mut previous: Option<&N::Data> = None;
        for data in self.inorder() {
            if previous.is_some_and(|previous| previous >= data) {
                return false;
            }
            previous = Some(data);
            seen += 1;
        }

        seen == self.len
            && self.nodes.len() == self.len
            && self.root.is_none() == (self.len == 0)
            && N::verify_shape(&self.nodes, self.root)
    }
}

impl<N: Node> Extend<N::Data> for Tree<N> {
    fn extend<I: IntoIterator<Item = N::Data>>(&mut self, iter: I) {
        self.add_range(iter);
    }
}

impl<N: Node> FromIterator<N::Data> for Tree<N> {
    fn from_iter<I: IntoIterator<Item = N::Data>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.add_range(iter);
        tree
    }
}

impl<N: Node, const K: usize> From<[N::Data; K]> for Tree<N> {
    fn from(values: [N::Data; K]) -> Self {
        values.into_iter().collect()
    }
}

impl<'a, N: Node> IntoIterator for &'a Tree<N> {
    type Item = &'a N::Data;
    type IntoIter = Iter<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Two trees are equal when they hold the same elements, whatever their shape
/// or traversal order.
impl<N: Node> PartialEq for Tree<N> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.inorder().eq(other.inorder())
    }
}

impl<N: Node> Eq for Tree<N> {}

impl<N> fmt::Debug for Tree<N>
where
    N: Node,
    N::Data: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.inorder()).finish()
    }
}
