//! Ways of walking every node of a tree.
//!
//! All of the iterators here keep their own stack (or queue) of node ids
//! instead of recursing, so walking a degenerate, list-shaped tree of any
//! size is fine. Each is built fresh by the tree's methods and borrows the
//! tree for as long as it lives.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use crate::arena::{Arena, NodeId};
use crate::error::TreeError;
use crate::node::Node;

/// Which order a tree's default iteration ([`Tree::iter`][crate::Tree::iter])
/// visits its elements in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TraversalOrder {
    /// Node, then left subtree, then right subtree.
    Preorder,
    /// Left subtree, then node, then right subtree. Yields sorted data.
    #[default]
    Inorder,
    /// Left subtree, then right subtree, then node.
    Postorder,
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Preorder => "preorder",
            Self::Inorder => "inorder",
            Self::Postorder => "postorder",
        })
    }
}

impl FromStr for TraversalOrder {
    type Err = TreeError;

    /// Accepts `preorder`, `inorder` and `postorder` in any case, with or
    /// without a hyphen (`pre-order`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "").as_str() {
            "preorder" => Ok(Self::Preorder),
            "inorder" => Ok(Self::Inorder),
            "postorder" => Ok(Self::Postorder),
            _ => Err(TreeError::UnknownTraversal(s.to_string())),
        }
    }
}

impl TryFrom<u8> for TraversalOrder {
    type Error = TreeError;

    /// `0` is preorder, `1` inorder and `2` postorder.
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Preorder),
            1 => Ok(Self::Inorder),
            2 => Ok(Self::Postorder),
            _ => Err(TreeError::UnknownTraversal(code.to_string())),
        }
    }
}

/// Sorted iteration: left subtree, node, right subtree.
pub struct Inorder<'a, N> {
    nodes: &'a Arena<N>,
    /// Nodes whose left subtree is being visited.
    stack: Vec<NodeId>,
    /// Next subtree to descend into.
    current: Option<NodeId>,
}

impl<'a, N> Inorder<'a, N> {
    pub(crate) fn new(nodes: &'a Arena<N>, root: Option<NodeId>) -> Self {
        Self {
            nodes,
            stack: Vec::new(),
            current: root,
        }
    }
}

impl<'a, N: Node> Iterator for Inorder<'a, N> {
    type Item = &'a N::Data;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.current {
            self.stack.push(id);
            self.current = self.nodes[id].left();
        }
        let id = self.stack.pop()?;
        let node = &self.nodes[id];
        self.current = node.right();
        Some(node.data())
    }
}

/// Node first, then its left subtree, then its right subtree.
pub struct Preorder<'a, N> {
    nodes: &'a Arena<N>,
    stack: Vec<NodeId>,
}

impl<'a, N> Preorder<'a, N> {
    pub(crate) fn new(nodes: &'a Arena<N>, root: Option<NodeId>) -> Self {
        Self {
            nodes,
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a, N: Node> Iterator for Preorder<'a, N> {
    type Item = &'a N::Data;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = &self.nodes[id];
        // Right goes on first so left comes off first.
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        Some(node.data())
    }
}

/// Both subtrees before the node itself.
pub struct Postorder<'a, N> {
    nodes: &'a Arena<N>,
    /// Each entry records whether its children have already been pushed.
    stack: Vec<(NodeId, bool)>,
}

impl<'a, N> Postorder<'a, N> {
    pub(crate) fn new(nodes: &'a Arena<N>, root: Option<NodeId>) -> Self {
        Self {
            nodes,
            stack: root.map(|id| (id, false)).into_iter().collect(),
        }
    }
}

impl<'a, N: Node> Iterator for Postorder<'a, N> {
    type Item = &'a N::Data;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (id, expanded) = self.stack.pop()?;
            let node = &self.nodes[id];
            if expanded {
                return Some(node.data());
            }
            self.stack.push((id, true));
            self.stack.extend(node.right().map(|id| (id, false)));
            self.stack.extend(node.left().map(|id| (id, false)));
        }
    }
}

/// Breadth-first: the root, then every node one level down, and so on, each
/// level left to right.
pub struct LevelOrder<'a, N> {
    nodes: &'a Arena<N>,
    queue: VecDeque<NodeId>,
}

impl<'a, N> LevelOrder<'a, N> {
    pub(crate) fn new(nodes: &'a Arena<N>, root: Option<NodeId>) -> Self {
        Self {
            nodes,
            queue: root.into_iter().collect(),
        }
    }
}

impl<'a, N: Node> Iterator for LevelOrder<'a, N> {
    type Item = &'a N::Data;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.queue.pop_front()?;
        let node = &self.nodes[id];
        self.queue.extend(node.left());
        self.queue.extend(node.right());
        Some(node.data())
    }
}

/// Iteration in whichever [`TraversalOrder`] the tree was set to when this
/// was created.
pub enum Iter<'a, N> {
    /// See [`Preorder`].
    Preorder(Preorder<'a, N>),
    /// See [`Inorder`].
    Inorder(Inorder<'a, N>),
    /// See [`Postorder`].
    Postorder(Postorder<'a, N>),
}

impl<'a, N> Iter<'a, N> {
    pub(crate) fn new(nodes: &'a Arena<N>, root: Option<NodeId>, order: TraversalOrder) -> Self {
        match order {
            TraversalOrder::Preorder => Self::Preorder(Preorder::new(nodes, root)),
            TraversalOrder::Inorder => Self::Inorder(Inorder::new(nodes, root)),
            TraversalOrder::Postorder => Self::Postorder(Postorder::new(nodes, root)),
        }
    }
}

impl<'a, N: Node> Iterator for Iter<'a, N> {
    type Item = &'a N::Data;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Preorder(iter) => iter.next(),
            Self::Inorder(iter) => iter.next(),
            Self::Postorder(iter) => iter.next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BinarySearchTree;

    /// ```text
    ///        4
    ///      /   \
    ///     2     6
    ///    / \     \
    ///   1   3     7
    /// ```
    fn sample() -> BinarySearchTree<i32> {
        BinarySearchTree::from([4, 2, 6, 1, 3, 7])
    }

    #[test]
    fn orders() {
        let tree = sample();

        assert_eq!(tree.inorder().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 6, 7]);
        assert_eq!(tree.preorder().copied().collect::<Vec<_>>(), [4, 2, 1, 3, 6, 7]);
        assert_eq!(tree.postorder().copied().collect::<Vec<_>>(), [1, 3, 2, 7, 6, 4]);
        assert_eq!(tree.level_order().copied().collect::<Vec<_>>(), [4, 2, 6, 1, 3, 7]);
    }

    #[test]
    fn empty_tree_yields_nothing() {
        let tree = BinarySearchTree::<i32>::new();

        assert_eq!(tree.inorder().next(), None);
        assert_eq!(tree.preorder().next(), None);
        assert_eq!(tree.postorder().next(), None);
        assert_eq!(tree.level_order().next(), None);
    }

    #[test]
    fn iter_follows_traversal_order() {
        let mut tree = sample();

        tree.set_traversal_order(TraversalOrder::Postorder);
        assert!(tree.iter().eq(tree.postorder()));

        tree.set_traversal_order(TraversalOrder::Preorder);
        assert!((&tree).into_iter().eq(tree.preorder()));
    }

    #[test]
    fn parses_names_and_codes() {
        assert_eq!("Pre-Order".parse(), Ok(TraversalOrder::Preorder));
        assert_eq!("inorder".parse(), Ok(TraversalOrder::Inorder));
        assert_eq!(" POSTORDER ".parse(), Ok(TraversalOrder::Postorder));
        assert_eq!(TraversalOrder::try_from(1), Ok(TraversalOrder::Inorder));

        assert_eq!(
            "levelorder".parse::<TraversalOrder>(),
            Err(TreeError::UnknownTraversal("levelorder".to_string()))
        );
        assert_eq!(
            TraversalOrder::try_from(3),
            Err(TreeError::UnknownTraversal("3".to_string()))
        );
    }

    #[test]
    fn display_round_trips() {
        for order in [
            TraversalOrder::Preorder,
            TraversalOrder::Inorder,
            TraversalOrder::Postorder,
        ] {
            assert_eq!(order.to_string().parse(), Ok(order));
        }
    }
}
