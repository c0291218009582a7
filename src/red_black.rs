//! A Red-Black tree. Every node is colored red or black and the tree keeps
//! three rules:
//!
//! 1. The root is black.
//! 2. A red node never has a red child.
//! 3. Every path from a node down to an empty child passes through the same
//!    number of black nodes.
//!
//! Together they keep the longest path at most twice the shortest. Nodes also
//! record their parent so the fix-ups after insert and remove can walk back up
//! the tree iteratively.
//!
//! # Examples
//!
//! ```
//! use search_trees::{Color, RedBlackTree};
//!
//! let mut tree: RedBlackTree<i32> = (1..=3).collect();
//!
//! let root = tree.root().unwrap();
//! assert_eq!(*root.data(), 2);
//! assert_eq!(root.node().color(), Color::Black);
//! assert_eq!(root.left().unwrap().node().color(), Color::Red);
//!
//! assert!(tree.remove(&2));
//! assert!(tree.verify());
//! ```

use std::cmp::Ordering;
use std::mem;

use log::trace;

use crate::arena::{Arena, NodeId};
use crate::node::{Insertion, Node, Removal};
use crate::tree::Tree;

/// A [`Tree`] kept balanced by node colors.
pub type RedBlackTree<T> = Tree<RedBlackNode<T>>;

/// The color of a [`RedBlackNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Newly inserted nodes start red. A red node can't have a red child.
    Red,
    /// Black nodes are counted to keep every root-to-leaf path equally long.
    Black,
}

/// A node of a [`RedBlackTree`].
#[derive(Debug, Clone)]
pub struct RedBlackNode<T> {
    data: T,
    left: Option<NodeId>,
    right: Option<NodeId>,
    /// Back link for rotations and fix-ups. Never owns anything.
    parent: Option<NodeId>,
    color: Color,
}

impl<T> RedBlackNode<T> {
    fn new(data: T, parent: Option<NodeId>) -> Self {
        Self {
            data,
            left: None,
            right: None,
            parent,
            color: Color::Red,
        }
    }

    /// This node's color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Id of this node's parent, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

type Nodes<T> = Arena<RedBlackNode<T>>;

/// Empty children count as black.
fn is_red<T>(nodes: &Nodes<T>, id: Option<NodeId>) -> bool {
    id.is_some_and(|id| nodes[id].color == Color::Red)
}

fn is_black<T>(nodes: &Nodes<T>, id: Option<NodeId>) -> bool {
    !is_red(nodes, id)
}

fn set_color<T>(nodes: &mut Nodes<T>, id: Option<NodeId>, color: Color) {
    if let Some(id) = id {
        nodes[id].color = color;
    }
}

fn parent_of<T>(nodes: &Nodes<T>, id: NodeId) -> NodeId {
    nodes[id]
        .parent
        .expect("Fix-up only visits nodes below the root")
}

/// Points whatever referenced `old` (its parent's child link, or the tree
/// root) at `new`, and gives `new` the old parent.
fn replace_child<T>(nodes: &mut Nodes<T>, root: &mut NodeId, old: NodeId, new: Option<NodeId>) {
    let parent = nodes[old].parent;
    match parent {
        None => {
            if let Some(new) = new {
                *root = new;
            }
        }
        Some(parent) => {
            if nodes[parent].left == Some(old) {
                nodes[parent].left = new;
            } else {
                nodes[parent].right = new;
            }
        }
    }
    if let Some(new) = new {
        nodes[new].parent = parent;
    }
}

/// Rotate `old_root` to the left, moving its right child up into its place
/// (including in `old_root`'s parent, or as the tree `root`).
///
/// ## Panics
///
/// When called on a node without a right child.
///
/// # Diagram
///
/// ```text
///    Option<parent>            Option<parent>
///      /                         /
///   old_root                 new_root
///    /     \                  /     \
///   x    new_root  rotate -> old_root z
///          / \                /  \
///         y   z              x    y
/// ```
fn rotate_left<T>(nodes: &mut Nodes<T>, root: &mut NodeId, old_root: NodeId) {
    let new_root = nodes[old_root].right.expect("Rotate left => right child");
    trace!("red-black: rotating {:?} left under {:?}", old_root, new_root);

    let moved = nodes[new_root].left;
    nodes[old_root].right = moved;
    if let Some(moved) = moved {
        nodes[moved].parent = Some(old_root);
    }

    replace_child(nodes, root, old_root, Some(new_root));
    nodes[new_root].left = Some(old_root);
    nodes[old_root].parent = Some(new_root);
}

/// Mirror image of [`rotate_left`]: the left child moves up.
///
/// ## Panics
///
/// When called on a node without a left child.
fn rotate_right<T>(nodes: &mut Nodes<T>, root: &mut NodeId, old_root: NodeId) {
    let new_root = nodes[old_root].left.expect("Rotate right => left child");
    trace!("red-black: rotating {:?} right under {:?}", old_root, new_root);

    let moved = nodes[new_root].right;
    nodes[old_root].left = moved;
    if let Some(moved) = moved {
        nodes[moved].parent = Some(old_root);
    }

    replace_child(nodes, root, old_root, Some(new_root));
    nodes[new_root].right = Some(old_root);
    nodes[old_root].parent = Some(new_root);
}

/// Restores the red rule after `node` was attached red below a possibly red
/// parent.
fn insert_fix_up<T>(nodes: &mut Nodes<T>, root: &mut NodeId, mut node: NodeId) {
    while let Some(parent) = nodes[node].parent.filter(|&p| nodes[p].color == Color::Red) {
        // A red parent is never the root so the grandparent exists.
        let grandparent = parent_of(nodes, parent);
        let parent_is_left = nodes[grandparent].left == Some(parent);
        let uncle = if parent_is_left {
            nodes[grandparent].right
        } else {
            nodes[grandparent].left
        };

        if is_red(nodes, uncle) {
            trace!("red-black: recoloring around {:?}", grandparent);
            nodes[parent].color = Color::Black;
            set_color(nodes, uncle, Color::Black);
            nodes[grandparent].color = Color::Red;
            node = grandparent;
            continue;
        }

        // Zig-zag: turn it into a straight line first.
        if parent_is_left && nodes[parent].right == Some(node) {
            node = parent;
            rotate_left(nodes, root, node);
        } else if !parent_is_left && nodes[parent].left == Some(node) {
            node = parent;
            rotate_right(nodes, root, node);
        }

        let parent = parent_of(nodes, node);
        nodes[parent].color = Color::Black;
        nodes[grandparent].color = Color::Red;
        if parent_is_left {
            rotate_right(nodes, root, grandparent);
        } else {
            rotate_left(nodes, root, grandparent);
        }
    }

    nodes[*root].color = Color::Black;
}

/// Resolves the missing black left behind when a black node was spliced out.
/// `node` is what took its place (possibly nothing) and `parent` is where
/// that happened.
fn remove_fix_up<T>(
    nodes: &mut Nodes<T>,
    root: &mut NodeId,
    mut node: Option<NodeId>,
    mut parent: Option<NodeId>,
) {
    while node != Some(*root) && is_black(nodes, node) {
        let Some(p) = parent else {
            break;
        };

        if nodes[p].left == node {
            let mut sibling = nodes[p].right.expect("A double-black node has a sibling");
            if nodes[sibling].color == Color::Red {
                trace!("red-black: red sibling {:?}", sibling);
                nodes[sibling].color = Color::Black;
                nodes[p].color = Color::Red;
                rotate_left(nodes, root, p);
                sibling = nodes[p].right.expect("A double-black node has a sibling");
            }

            let (near, far) = (nodes[sibling].left, nodes[sibling].right);
            if is_black(nodes, near) && is_black(nodes, far) {
                trace!("red-black: pushing double black up from {:?}", p);
                nodes[sibling].color = Color::Red;
                node = Some(p);
                parent = nodes[p].parent;
            } else {
                if is_black(nodes, far) {
                    trace!("red-black: red near nephew under {:?}", sibling);
                    set_color(nodes, near, Color::Black);
                    nodes[sibling].color = Color::Red;
                    rotate_right(nodes, root, sibling);
                    sibling = nodes[p].right.expect("A double-black node has a sibling");
                }
                trace!("red-black: red far nephew under {:?}", sibling);
                nodes[sibling].color = nodes[p].color;
                nodes[p].color = Color::Black;
                let far = nodes[sibling].right;
                set_color(nodes, far, Color::Black);
                rotate_left(nodes, root, p);
                node = Some(*root);
                parent = None;
            }
        } else {
            let mut sibling = nodes[p].left.expect("A double-black node has a sibling");
            if nodes[sibling].color == Color::Red {
                trace!("red-black: red sibling {:?}", sibling);
                nodes[sibling].color = Color::Black;
                nodes[p].color = Color::Red;
                rotate_right(nodes, root, p);
                sibling = nodes[p].left.expect("A double-black node has a sibling");
            }

            let (near, far) = (nodes[sibling].right, nodes[sibling].left);
            if is_black(nodes, near) && is_black(nodes, far) {
                trace!("red-black: pushing double black up from {:?}", p);
                nodes[sibling].color = Color::Red;
                node = Some(p);
                parent = nodes[p].parent;
            } else {
                if is_black(nodes, far) {
                    trace!("red-black: red near nephew under {:?}", sibling);
                    set_color(nodes, near, Color::Black);
                    nodes[sibling].color = Color::Red;
                    rotate_left(nodes, root, sibling);
                    sibling = nodes[p].left.expect("A double-black node has a sibling");
                }
                trace!("red-black: red far nephew under {:?}", sibling);
                nodes[sibling].color = nodes[p].color;
                nodes[p].color = Color::Black;
                let far = nodes[sibling].left;
                set_color(nodes, far, Color::Black);
                rotate_right(nodes, root, p);
                node = Some(*root);
                parent = None;
            }
        }
    }

    set_color(nodes, node, Color::Black);
}

impl<T: Ord> Node for RedBlackNode<T> {
    type Data = T;

    fn data(&self) -> &T {
        &self.data
    }

    fn left(&self) -> Option<NodeId> {
        self.left
    }

    fn right(&self) -> Option<NodeId> {
        self.right
    }

    fn insert(nodes: &mut Arena<Self>, root: Option<NodeId>, data: T) -> Insertion {
        let Some(mut root) = root else {
            let root = nodes.insert(Self::new(data, None));
            nodes[root].color = Color::Black;
            return Insertion::Inserted { root };
        };

        let mut parent = root;
        let goes_left = loop {
            let node = &nodes[parent];
            let (next, goes_left) = match node.compare(&data) {
                Ordering::Less => (node.left, true),
                Ordering::Equal => return Insertion::Duplicate,
                Ordering::Greater => (node.right, false),
            };
            match next {
                Some(next) => parent = next,
                None => break goes_left,
            }
        };

        let node = nodes.insert(Self::new(data, Some(parent)));
        if goes_left {
            nodes[parent].left = Some(node);
        } else {
            nodes[parent].right = Some(node);
        }

        insert_fix_up(nodes, &mut root, node);

        if cfg!(debug_assertions) {
            assert_eq!(nodes[root].color, Color::Black);
            assert!(nodes[root].parent.is_none());
        }
        Insertion::Inserted { root }
    }

    fn remove(nodes: &mut Arena<Self>, root: NodeId, data: &T) -> Removal<T> {
        let Some(mut target) = Self::find(nodes, Some(root), data) else {
            return Removal::NotFound;
        };
        let mut root = root;

        // With two children, trade data with the predecessor (which has no
        // right child) and remove that node instead.
        if let (Some(left), Some(_)) = (nodes[target].left, nodes[target].right) {
            let predecessor = Self::rightmost(nodes, left);
            let (a, b) = nodes.pair_mut(target, predecessor);
            mem::swap(&mut a.data, &mut b.data);
            target = predecessor;
        }

        let child = nodes[target].left.or(nodes[target].right);
        let parent = nodes[target].parent;
        if parent.is_none() && child.is_none() {
            // Removing the last node.
            let removed = nodes.remove(target);
            return Removal::Removed {
                root: None,
                data: removed.data,
            };
        }

        replace_child(nodes, &mut root, target, child);
        let removed = nodes.remove(target);
        if removed.color == Color::Black {
            remove_fix_up(nodes, &mut root, child, parent);
        }

        if cfg!(debug_assertions) {
            assert_eq!(nodes[root].color, Color::Black);
            assert!(nodes[root].parent.is_none());
        }
        Removal::Removed {
            root: Some(root),
            data: removed.data,
        }
    }

    fn verify_shape(nodes: &Arena<Self>, root: Option<NodeId>) -> bool {
        /// Returns the black height of the subtree, `None` if any rule or
        /// parent link is broken inside it.
        fn black_height<T>(
            nodes: &Nodes<T>,
            id: Option<NodeId>,
            parent: Option<NodeId>,
        ) -> Option<usize> {
            let Some(id) = id else {
                return Some(1);
            };
            let node = &nodes[id];
            if node.parent != parent {
                return None;
            }
            if node.color == Color::Red && (is_red(nodes, node.left) || is_red(nodes, node.right))
            {
                return None;
            }
            let left = black_height(nodes, node.left, Some(id))?;
            let right = black_height(nodes, node.right, Some(id))?;
            (left == right).then_some(left + usize::from(node.color == Color::Black))
        }

        !is_red(nodes, root) && black_height(nodes, root, None).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Assert a node's data, color and the data of its parent.
    macro_rules! assert_node {
        ($tree:ident, $data:expr, $color:expr, $parent:expr) => {{
            let root = $tree.root().unwrap();
            let id = RedBlackNode::find($tree.nodes(), Some(root.id()), &$data).unwrap();
            let node = root.get(id).unwrap();
            assert_eq!(node.node().color(), $color);
            let parent = node.node().parent().map(|p| *root.get(p).unwrap().data());
            assert_eq!(parent, $parent);
        }};
    }

    fn preorder(tree: &RedBlackTree<i32>) -> Vec<i32> {
        tree.preorder().copied().collect()
    }

    #[test]
    fn first_node_is_black_root() {
        let tree = RedBlackTree::from([1]);

        assert_node!(tree, 1, Color::Black, None);
    }

    #[test]
    fn red_uncle_recolors() {
        let tree = RedBlackTree::from([2, 1, 3, 4]);

        assert_eq!(preorder(&tree), [2, 1, 3, 4]);
        assert_node!(tree, 2, Color::Black, None);
        assert_node!(tree, 1, Color::Black, Some(2));
        assert_node!(tree, 3, Color::Black, Some(2));
        assert_node!(tree, 4, Color::Red, Some(3));
    }

    #[test]
    fn straight_line_rotates_grandparent() {
        let tree = RedBlackTree::from([1, 2, 3]);

        assert_eq!(preorder(&tree), [2, 1, 3]);
        assert_node!(tree, 2, Color::Black, None);
        assert_node!(tree, 1, Color::Red, Some(2));
        assert_node!(tree, 3, Color::Red, Some(2));
    }

    #[test]
    fn zig_zag_rotates_twice() {
        let tree = RedBlackTree::from([3, 1, 2]);

        assert_eq!(preorder(&tree), [2, 1, 3]);
        assert_node!(tree, 2, Color::Black, None);
        assert_node!(tree, 1, Color::Red, Some(2));
        assert_node!(tree, 3, Color::Red, Some(2));
    }

    #[test]
    fn rotate_right_fixes_parent_pointers() {
        // 1 lands under 3 under 5, rotating 10's left subtree rather than the
        // root.
        let tree = RedBlackTree::from([10, 5, 15, 3, 1]);

        assert_eq!(preorder(&tree), [10, 3, 1, 5, 15]);
        assert_node!(tree, 10, Color::Black, None);
        assert_node!(tree, 3, Color::Black, Some(10));
        assert_node!(tree, 1, Color::Red, Some(3));
        assert_node!(tree, 5, Color::Red, Some(3));
        assert_node!(tree, 15, Color::Black, Some(10));
    }

    #[test]
    fn rotate_left_fixes_parent_pointers() {
        let tree = RedBlackTree::from([1, 2, 3, 4, 5]);

        assert_eq!(preorder(&tree), [2, 1, 4, 3, 5]);
        assert_node!(tree, 4, Color::Black, Some(2));
        assert_node!(tree, 3, Color::Red, Some(4));
        assert_node!(tree, 5, Color::Red, Some(4));
    }

    #[test]
    fn red_uncle_propagates_up() {
        let tree = RedBlackTree::from([5, 3, 9, 4, 2, 1]);

        assert!(tree.verify());
        assert_node!(tree, 5, Color::Black, None);
        assert_node!(tree, 3, Color::Red, Some(5));
        assert_node!(tree, 2, Color::Black, Some(3));
        assert_node!(tree, 1, Color::Red, Some(2));
        assert_node!(tree, 4, Color::Black, Some(3));
        assert_node!(tree, 9, Color::Black, Some(5));
    }

    #[test]
    fn delete_red_leaf() {
        let mut tree = RedBlackTree::from([2, 1, 3]);

        assert_eq!(tree.take(&3), Some(3));
        assert_eq!(preorder(&tree), [2, 1]);
        assert!(tree.verify());
    }

    #[test]
    fn delete_black_leaf_with_red_sibling_child() {
        let mut tree = RedBlackTree::from([2, 1, 3, 4]);

        // 1 is black with a black sibling (3) whose far child (4) is red.
        assert!(tree.remove(&1));
        assert_eq!(preorder(&tree), [3, 2, 4]);
        assert_node!(tree, 3, Color::Black, None);
        assert_node!(tree, 2, Color::Black, Some(3));
        assert_node!(tree, 4, Color::Black, Some(3));
    }

    #[test]
    fn delete_with_two_children_uses_predecessor() {
        let mut tree = RedBlackTree::from([5, 3, 8, 1, 4, 7, 9]);

        assert_eq!(tree.take(&5), Some(5));
        assert_eq!(tree.root().map(|n| *n.data()), Some(4));
        assert!(tree.verify());
    }

    #[test]
    fn delete_everything() {
        let mut tree: RedBlackTree<_> = (0..64).collect();

        for key in (0..64).rev().step_by(2).chain((0..64).step_by(2)) {
            assert!(tree.remove(&key));
            assert!(tree.verify());
        }
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
    }

    #[test]
    fn broken_parent_link_fails_verification() {
        let mut tree = RedBlackTree::from([2, 1, 3]);
        let root = tree.root().unwrap();
        let left = root.left().unwrap().id();
        let right = root.right().unwrap().id();
        tree.nodes_mut()[left].parent = Some(right);

        assert!(!tree.verify());
    }

    #[test]
    fn red_root_fails_verification() {
        let mut tree = RedBlackTree::from([1]);
        let root = tree.root().unwrap().id();
        tree.nodes_mut()[root].color = Color::Red;

        assert!(!tree.verify());
    }
}
