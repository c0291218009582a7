//! A plain, unbalanced Binary Search Tree. Its shape depends entirely on
//! insertion order: inserting sorted values degenerates it into a list.
//!
//! # Examples
//!
//! ```
//! use search_trees::BinarySearchTree;
//!
//! let mut tree: BinarySearchTree<i32> = (0..10).collect();
//! assert!(tree.remove(&5));
//!
//! let values: Vec<_> = tree.inorder().copied().collect();
//! assert_eq!(values, [0, 1, 2, 3, 4, 6, 7, 8, 9]);
//! ```

use std::cmp::Ordering;
use std::mem;

use crate::arena::{Arena, NodeId};
use crate::node::{Insertion, Node, Removal};
use crate::tree::Tree;

/// A [`Tree`] that never rebalances.
pub type BinarySearchTree<T> = Tree<BstNode<T>>;

/// A node of a [`BinarySearchTree`].
#[derive(Debug, Clone)]
pub struct BstNode<T> {
    data: T,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl<T> BstNode<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            left: None,
            right: None,
        }
    }
}

impl<T: Ord> Node for BstNode<T> {
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
        let Some(root) = root else {
            return Insertion::Inserted {
                root: nodes.insert(Self::new(data)),
            };
        };

        // An unbalanced tree can be as deep as it is long, so descend with a
        // loop rather than the call stack.
        let mut current = root;
        let goes_left = loop {
            let node = &nodes[current];
            let (next, goes_left) = match node.compare(&data) {
                Ordering::Less => (node.left, true),
                Ordering::Equal => return Insertion::Duplicate,
                Ordering::Greater => (node.right, false),
            };
            match next {
                Some(next) => current = next,
                None => break goes_left,
            }
        };

        let leaf = nodes.insert(Self::new(data));
        if goes_left {
            nodes[current].left = Some(leaf);
        } else {
            nodes[current].right = Some(leaf);
        }

        if cfg!(debug_assertions) {
            let parent = &nodes[current];
            if let Some(left) = parent.left {
                assert!(nodes[left].data < parent.data);
            }
            if let Some(right) = parent.right {
                assert!(nodes[right].data > parent.data);
            }
        }

        Insertion::Inserted { root }
    }

    fn remove(nodes: &mut Arena<Self>, root: NodeId, data: &T) -> Removal<T> {
        // `parent` is the node whose child link points at `current`, and
        // whether that link is its left one.
        let mut parent: Option<(NodeId, bool)> = None;
        let mut current = root;
        loop {
            let node = &nodes[current];
            let (next, is_left) = match node.compare(data) {
                Ordering::Less => (node.left, true),
                Ordering::Equal => break,
                Ordering::Greater => (node.right, false),
            };
            match next {
                Some(next) => {
                    parent = Some((current, is_left));
                    current = next;
                }
                None => return Removal::NotFound,
            }
        }

        let replacement = match (nodes[current].left, nodes[current].right) {
            (None, None) => None,
            (Some(child), None) | (None, Some(child)) => Some(child),
            (Some(_), Some(right)) => {
                // Two children: pull the in-order successor's data up into
                // this node and splice the successor out of the right subtree.
                let mut successor_parent = current;
                let mut successor = right;
                while let Some(left) = nodes[successor].left {
                    successor_parent = successor;
                    successor = left;
                }
                let successor_right = nodes[successor].right;
                if successor_parent == current {
                    nodes[current].right = successor_right;
                } else {
                    nodes[successor_parent].left = successor_right;
                }

                let successor = nodes.remove(successor);
                let data = mem::replace(&mut nodes[current].data, successor.data);
                return Removal::Removed {
                    root: Some(root),
                    data,
                };
            }
        };

        let removed = nodes.remove(current);
        let root = match parent {
            None => replacement,
            Some((parent, true)) => {
                nodes[parent].left = replacement;
                Some(root)
            }
            Some((parent, false)) => {
                nodes[parent].right = replacement;
                Some(root)
            }
        };

        Removal::Removed {
            root,
            data: removed.data,
        }
    }

    fn verify_shape(_nodes: &Arena<Self>, _root: Option<NodeId>) -> bool {
        // Nothing beyond ordering to check.
        true
    }
}
