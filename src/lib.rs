//! An ordered collection built on an unbalanced Binary Search Tree (BST),
//! written to make the classic textbook operations easy to read and poke at.
//!
//! ## Binary Search Tree
//!
//! A BST is a data structure used for storing and looking up ordered data.
//! It is a binary tree (each node has at most two children) that maintains
//! two invariants:
//!
//! 1. Every element in a node's left subtree is less than the node's element.
//! 2. Every element in a node's right subtree is greater than the node's
//!    element.
//!
//! Equal elements have nowhere to live under those two rules, so duplicate
//! inserts are rejected with an error instead of being stored.
//!
//! The invariants mean a lookup only ever walks one path from the root: at
//! each node it compares once and commits to the left or the right subtree.
//! That walk costs time proportional to the tree's height. Nothing here
//! rebalances, so the height depends entirely on insertion order. Inserting
//! `[2, 1, 3]` produces a bushy tree with height 1, while inserting
//! `[1, 2, 3]` produces a chain with height 2, and a long sorted run
//! degrades every operation to a linear scan. Watching that happen is the
//! point of this crate.
//!
//! Every node also stores a link to its parent. The parent links are what
//! make "walk upward" operations cheap: a node can report its [depth], find
//! its [in-order successor] without a search from the root, and say whether
//! it is its parent's left or right child.
//!
//! [depth]: tree::NodeRef::depth
//! [in-order successor]: tree::NodeRef::successor

#![deny(missing_docs)]

pub mod tree;

pub use crate::tree::{InOrder, LevelOrder, NodeRef, OrderedTree, PostOrder, PreOrder, TreeError};

#[cfg(test)]
mod test;
