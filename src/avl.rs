//! A self-balancing Binary Search Tree (specifically, an AVL tree).
//!
//! Every node caches the height of its subtree. After each insert or removal
//! the nodes along the modified path recompute their height and, if one side
//! has become two levels taller than the other, rotate to restore balance.
//! See [the Wikipedia page][wiki] for terminology.
//!
//! # Examples
//!
//! ```
//! use search_trees::AvlTree;
//!
//! // Ascending input would turn a plain BST into a list.
//! let tree: AvlTree<i32> = (0..1023).collect();
//!
//! assert_eq!(tree.depth(), 10);
//! assert!(tree.verify());
//! ```
//!
//! [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Rebalancing

use std::cmp::Ordering;
use std::mem;

use log::trace;

use crate::arena::{Arena, NodeId};
use crate::node::{Insertion, Node, Removal};
use crate::tree::Tree;

/// A [`Tree`] kept height-balanced.
pub type AvlTree<T> = Tree<AvlNode<T>>;

/// A node of an [`AvlTree`].
#[derive(Debug, Clone)]
pub struct AvlNode<T> {
    data: T,
    left: Option<NodeId>,
    right: Option<NodeId>,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    height: usize,
}

impl<T> AvlNode<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            left: None,
            right: None,
            height: 1,
        }
    }

    /// How many levels are in the subtree rooted at this node. A node with no
    /// children has a height of 1.
    pub fn height(&self) -> usize {
        self.height
    }
}

fn height<T>(nodes: &Arena<AvlNode<T>>, id: Option<NodeId>) -> usize {
    id.map_or(0, |id| nodes[id].height)
}

/// Adjusts the height of `id` to be the max of its children's heights + 1.
fn fix_height<T>(nodes: &mut Arena<AvlNode<T>>, id: NodeId) {
    let node = &nodes[id];
    let left_height = height(nodes, node.left);
    let right_height = height(nodes, node.right);
    nodes[id].height = left_height.max(right_height) + 1;
}

/// The difference in height between the right and left subtrees.
fn balance_factor<T>(nodes: &Arena<AvlNode<T>>, id: NodeId) -> isize {
    let node = &nodes[id];
    height(nodes, node.right) as isize - height(nodes, node.left) as isize
}

/// Rotate `id` to the left. This moves the right child up vertically and `id`
/// down vertically. Returns the subtree's new root.
///
/// ## Panics
///
/// When called on a node without a right child.
///
/// # Diagram
///
/// ```text
///   old_root                    new_root
///    /     \                    /     \
///   x    new_root  rotate ->  old_root  z
///          / \                /  \
///         y   z              x    y
/// ```
fn rotate_left<T>(nodes: &mut Arena<AvlNode<T>>, old_root: NodeId) -> NodeId {
    let new_root = nodes[old_root].right.expect("Rotate left => right child");
    trace!("avl: rotating {:?} left under {:?}", old_root, new_root);

    nodes[old_root].right = nodes[new_root].left;
    fix_height(nodes, old_root);

    nodes[new_root].left = Some(old_root);
    fix_height(nodes, new_root);
    new_root
}

/// Mirror image of [`rotate_left`]: the left child moves up.
///
/// ## Panics
///
/// When called on a node without a left child.
fn rotate_right<T>(nodes: &mut Arena<AvlNode<T>>, old_root: NodeId) -> NodeId {
    let new_root = nodes[old_root].left.expect("Rotate right => left child");
    trace!("avl: rotating {:?} right under {:?}", old_root, new_root);

    nodes[old_root].left = nodes[new_root].right;
    fix_height(nodes, old_root);

    nodes[new_root].right = Some(old_root);
    fix_height(nodes, new_root);
    new_root
}

/// Recomputes the height of `id` and rotates if one side is two levels taller.
/// Returns the subtree's root afterwards.
fn rebalance<T>(nodes: &mut Arena<AvlNode<T>>, id: NodeId) -> NodeId {
    fix_height(nodes, id);

    let new_root = match balance_factor(nodes, id) {
        2 => {
            let right = nodes[id].right.expect("Right-heavy => right child");
            if balance_factor(nodes, right) < 0 {
                nodes[id].right = Some(rotate_right(nodes, right));
            }
            rotate_left(nodes, id)
        }
        -2 => {
            let left = nodes[id].left.expect("Left-heavy => left child");
            if balance_factor(nodes, left) > 0 {
                nodes[id].left = Some(rotate_left(nodes, left));
            }
            rotate_right(nodes, id)
        }
        _ => id,
    };

    if cfg!(debug_assertions) {
        let node = &nodes[new_root];
        let left_height = height(nodes, node.left);
        let right_height = height(nodes, node.right);
        assert_eq!(node.height, left_height.max(right_height) + 1);
        assert!(left_height.abs_diff(right_height) <= 1);
    }
    new_root
}

/// Unlinks the smallest node below `id`, returning the subtree's new root and
/// the smallest node's data.
fn remove_leftmost<T>(nodes: &mut Arena<AvlNode<T>>, id: NodeId) -> (Option<NodeId>, T) {
    match nodes[id].left {
        None => {
            let node = nodes.remove(id);
            (node.right, node.data)
        }
        Some(left) => {
            let (new_left, data) = remove_leftmost(nodes, left);
            nodes[id].left = new_left;
            (Some(rebalance(nodes, id)), data)
        }
    }
}

impl<T: Ord> Node for AvlNode<T> {
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
        let Some(id) = root else {
            return Insertion::Inserted {
                root: nodes.insert(Self::new(data)),
            };
        };

        // Recursion depth is bounded by the height which is O(lg N).
        match nodes[id].compare(&data) {
            Ordering::Less => {
                let left = nodes[id].left;
                match Self::insert(nodes, left, data) {
                    Insertion::Inserted { root: left } => {
                        nodes[id].left = Some(left);
                        Insertion::Inserted {
                            root: rebalance(nodes, id),
                        }
                    }
                    Insertion::Duplicate => Insertion::Duplicate,
                }
            }
            Ordering::Equal => Insertion::Duplicate,
            Ordering::Greater => {
                let right = nodes[id].right;
                match Self::insert(nodes, right, data) {
                    Insertion::Inserted { root: right } => {
                        nodes[id].right = Some(right);
                        Insertion::Inserted {
                            root: rebalance(nodes, id),
                        }
                    }
                    Insertion::Duplicate => Insertion::Duplicate,
                }
            }
        }
    }

    fn remove(nodes: &mut Arena<Self>, root: NodeId, data: &T) -> Removal<T> {
        let id = root;
        match nodes[id].compare(data) {
            Ordering::Less => {
                let Some(left) = nodes[id].left else {
                    return Removal::NotFound;
                };
                match Self::remove(nodes, left, data) {
                    Removal::Removed { root: left, data } => {
                        nodes[id].left = left;
                        Removal::Removed {
                            root: Some(rebalance(nodes, id)),
                            data,
                        }
                    }
                    Removal::NotFound => Removal::NotFound,
                }
            }
            Ordering::Greater => {
                let Some(right) = nodes[id].right else {
                    return Removal::NotFound;
                };
                match Self::remove(nodes, right, data) {
                    Removal::Removed { root: right, data } => {
                        nodes[id].right = right;
                        Removal::Removed {
                            root: Some(rebalance(nodes, id)),
                            data,
                        }
                    }
                    Removal::NotFound => Removal::NotFound,
                }
            }
            Ordering::Equal => match (nodes[id].left, nodes[id].right) {
                (None, None) => Removal::Removed {
                    root: None,
                    data: nodes.remove(id).data,
                },
                // A lone child of an AVL node is a leaf, so it can simply
                // take this node's place.
                (Some(child), None) | (None, Some(child)) => Removal::Removed {
                    root: Some(child),
                    data: nodes.remove(id).data,
                },
                (Some(_), Some(right)) => {
                    let (new_right, successor) = remove_leftmost(nodes, right);
                    nodes[id].right = new_right;
                    let data = mem::replace(&mut nodes[id].data, successor);
                    Removal::Removed {
                        root: Some(rebalance(nodes, id)),
                        data,
                    }
                }
            },
        }
    }

    fn verify_shape(nodes: &Arena<Self>, root: Option<NodeId>) -> bool {
        /// Returns the checked height of the subtree, `None` if any node's
        /// cached height is stale or its children differ by more than one.
        fn checked_height<T>(nodes: &Arena<AvlNode<T>>, id: Option<NodeId>) -> Option<usize> {
            let Some(id) = id else {
                return Some(0);
            };
            let node = &nodes[id];
            let left = checked_height(nodes, node.left)?;
            let right = checked_height(nodes, node.right)?;
            let height = left.max(right) + 1;
            (left.abs_diff(right) <= 1 && node.height == height).then_some(height)
        }

        checked_height(nodes, root).is_some()
    }
}
