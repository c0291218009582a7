//! This crate exposes a family of Binary Search Trees (BSTs) sharing one
//! interface: a plain BST, an AVL tree and a Red-Black tree.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is
//! defined as the longest path from the root `Node` to a leaf `Node`). A
//! [`BinarySearchTree`] makes no effort to bound its height: inserting sorted
//! values produces a tree as tall as it is long. [`AvlTree`] and
//! [`RedBlackTree`] restructure themselves with rotations on every insert and
//! removal to keep the height within `O(lg N)`.
//!
//! ## Layout
//!
//! Every tree is a [`Tree`] over some [`Node`] type. The `Tree` owns an
//! [`Arena`] of nodes, linked together by [`NodeId`]s rather than pointers,
//! and handles everything that doesn't depend on how the tree is balanced:
//! search, min/max, depth, the traversals and bulk operations. The node types
//! ([`BstNode`], [`AvlNode`], [`RedBlackNode`]) each implement their own
//! `insert` and `remove`.
//!
//! # Examples
//!
//! ```
//! use search_trees::{AvlTree, RedBlackTree, TraversalOrder};
//!
//! let mut avl: AvlTree<_> = [6, 55, -55, -40, 8, 66, 554, 74, 12, 7].into_iter().collect();
//! let red_black: RedBlackTree<_> = avl.inorder().copied().collect();
//!
//! assert_eq!(avl.min(), red_black.min());
//! assert_eq!(avl.max(), Ok(&554));
//!
//! avl.set_traversal_order(TraversalOrder::Postorder);
//! for value in &avl {
//!     assert!(red_black.contains(value));
//! }
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod arena;
pub mod avl;
pub mod bst;
mod error;
mod node;
pub mod red_black;
pub mod traversal;
mod tree;


pub use arena::{Arena, NodeId};
pub use avl::{AvlNode, AvlTree};
pub use bst::{BinarySearchTree, BstNode};
pub use error::{Result, TreeError};
pub use node::{Insertion, Node, NodeRef, Removal};
pub use red_black::{Color, RedBlackNode, RedBlackTree};
pub use traversal::TraversalOrder;
pub use tree::Tree;
