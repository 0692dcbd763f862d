//! The tree, node handles, and lazy traversals.
//!
//! ## Design Notes
//!
//! Nodes live in a [`Vec`] arena and point at each other by index, so the
//! whole structure is safe code. Each node records its left child, right
//! child, and parent as an `Option<usize>` into the arena. Deleting a node
//! fills its slot with the arena's last node and re-points the links that
//! named the moved node, which keeps the storage dense without shifting
//! every element.
//!
//! Node handles are exposed as [`NodeRef`], a copyable pair of tree borrow
//! and index. Because a `NodeRef` holds a shared borrow of the tree, the
//! borrow checker stops any insert or delete while a handle is alive, and a
//! handle can never name a node that has since moved or been freed.
//!
//! The traversal iterators ([`InOrder`], [`PreOrder`], [`PostOrder`],
//! [`LevelOrder`]) are lazy. Each one carries its own stack or queue of
//! pending positions and does no work until asked for the next element, so
//! an abandoned traversal costs only what it actually visited.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::mem;
use std::ptr;

/// The ways an [`OrderedTree`] operation can fail.
///
/// Every variant is a local, recoverable condition. A failed operation
/// leaves the tree exactly as it was, and the tree stays fully usable.
/// Absences that are expected in normal use, such as a missing child or an
/// unsuccessful [`find`](OrderedTree::find), are reported as [`None`]
/// rather than as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The element to insert is already in the tree, which stores each
    /// element at most once.
    #[error("element is already in the tree")]
    DuplicateElement,

    /// The element to delete is not in the tree.
    #[error("element is not in the tree")]
    NotFound,

    /// The operation needs at least one node but the tree has none.
    #[error("the tree is empty")]
    EmptyTree,

    /// The node is the root, which has no parent.
    #[error("the root has no parent")]
    NoParent,
}

#[derive(Clone)]
struct Node<T> {
    element: T,
    left: Option<usize>,
    right: Option<usize>,
    parent: Option<usize>,
}

/// An ordered set of elements stored in an unbalanced binary search tree.
///
/// Elements in a node's left subtree are less than the node's element and
/// elements in its right subtree are greater, so an in-order walk yields
/// the elements in ascending order. Duplicates are rejected. Nothing
/// rebalances: the shape of the tree, and with it the cost of every
/// operation, is decided by the order the elements arrive in.
///
/// # Examples
///
/// ```
/// use ordered_tree::OrderedTree;
///
/// let mut tree = OrderedTree::new();
/// for value in [5, 3, 8, 1, 4, 7, 9] {
///     tree.insert(value).unwrap();
/// }
///
/// assert!(tree.contains(&4));
/// assert_eq!(tree.find_min().unwrap().element(), &1);
/// assert_eq!(tree.delete(&5), Ok(5));
///
/// let ascending: Vec<i32> = tree.in_order().copied().collect();
/// assert_eq!(ascending, vec![1, 3, 4, 7, 8, 9]);
/// ```
#[derive(Clone)]
pub struct OrderedTree<T> {
    nodes: Vec<Node<T>>,
    root: Option<usize>,
}

impl<T> Default for OrderedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.in_order()).finish()
    }
}

impl<T> OrderedTree<T> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// Returns the number of elements in the tree.
    ///
    /// The count is read from the arena, so this is constant time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// assert_eq!(tree.len(), 0);
    /// tree.insert(1).unwrap();
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree has no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Counts the elements by walking the whole tree.
    ///
    /// This visits every node and always agrees with [`len`](Self::len).
    /// It exists to show the linear-time recursive count that [`len`]
    /// replaces.
    ///
    /// [`len`]: Self::len
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// for value in [2, 1, 3] {
    ///     tree.insert(value).unwrap();
    /// }
    /// assert_eq!(tree.recursive_len(), tree.len());
    /// ```
    pub fn recursive_len(&self) -> usize {
        self.count_below(self.root)
    }

    /// Inserts an element into the tree.
    ///
    /// The new element descends from the root, going left when it is less
    /// than the node under consideration and right when it is greater,
    /// until it falls off the tree and becomes a new leaf there. If it
    /// compares equal to an element already present, nothing changes, the
    /// new element is dropped, and [`TreeError::DuplicateElement`] is
    /// returned.
    ///
    /// Takes time proportional to the height of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{OrderedTree, TreeError};
    ///
    /// let mut tree = OrderedTree::new();
    /// assert_eq!(tree.insert(1), Ok(()));
    /// assert_eq!(tree.insert(1), Err(TreeError::DuplicateElement));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, element: T) -> Result<(), TreeError>
    where
        T: Ord,
    {
        let mut cursor = match self.root {
            Some(root) => root,
            None => {
                let index = self.alloc(element, None);
                self.root = Some(index);
                return Ok(());
            }
        };

        loop {
            match element.cmp(&self.nodes[cursor].element) {
                Ordering::Less => match self.nodes[cursor].left {
                    Some(left) => cursor = left,
                    None => {
                        let index = self.alloc(element, Some(cursor));
                        self.nodes[cursor].left = Some(index);
                        break;
                    }
                },
                Ordering::Equal => return Err(TreeError::DuplicateElement),
                Ordering::Greater => match self.nodes[cursor].right {
                    Some(right) => cursor = right,
                    None => {
                        let index = self.alloc(element, Some(cursor));
                        self.nodes[cursor].right = Some(index);
                        break;
                    }
                },
            }
        }

        if cfg!(debug_assertions) {
            let parent = &self.nodes[cursor];
            if let Some(left) = parent.left {
                assert!(self.nodes[left].element < parent.element);
            }
            if let Some(right) = parent.right {
                assert!(self.nodes[right].element > parent.element);
            }
        }

        Ok(())
    }

    /// Looks up an element and returns a handle to its node.
    ///
    /// Returns [`None`] if the element is not in the tree. Takes time
    /// proportional to the height of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(2).unwrap();
    ///
    /// assert_eq!(tree.find(&2).unwrap().element(), &2);
    /// assert!(tree.find(&7).is_none());
    /// ```
    pub fn find(&self, element: &T) -> Option<NodeRef<'_, T>>
    where
        T: Ord,
    {
        let index = self.find_index(element)?;
        Some(NodeRef { tree: self, index })
    }

    /// Returns `true` if the element is in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert("oak").unwrap();
    ///
    /// assert!(tree.contains(&"oak"));
    /// assert!(!tree.contains(&"elm"));
    /// ```
    pub fn contains(&self, element: &T) -> bool
    where
        T: Ord,
    {
        self.find_index(element).is_some()
    }

    /// Deletes an element and returns it, or [`TreeError::NotFound`] if it
    /// is not in the tree.
    ///
    /// How the node leaves the tree depends on its children:
    ///
    /// - A leaf is detached from its parent.
    /// - A node with one child is spliced out, its parent adopting the
    ///   child in its place.
    /// - A node with two children trades elements with its in-order
    ///   successor, the smallest element of its right subtree. The
    ///   successor's old node has no left child, so deleting it there
    ///   reduces to one of the first two cases.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{OrderedTree, TreeError};
    ///
    /// let mut tree = OrderedTree::new();
    /// for value in [5, 3, 8] {
    ///     tree.insert(value).unwrap();
    /// }
    ///
    /// assert_eq!(tree.delete(&3), Ok(3));
    /// assert_eq!(tree.delete(&3), Err(TreeError::NotFound));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn delete(&mut self, element: &T) -> Result<T, TreeError>
    where
        T: Ord,
    {
        let mut target = self.find_index(element).ok_or(TreeError::NotFound)?;

        if let (Some(_), Some(right)) = (self.nodes[target].left, self.nodes[target].right) {
            let successor = self.min_index(right);
            self.swap_elements(target, successor);
            target = successor;
        }

        // `target` now has at most one child, which takes its place.
        let child = self.nodes[target].left.or(self.nodes[target].right);
        let parent = self.nodes[target].parent;
        if let Some(child) = child {
            self.nodes[child].parent = parent;
        }
        match parent {
            None => self.root = child,
            Some(parent) => {
                if self.nodes[parent].left == Some(target) {
                    self.nodes[parent].left = child;
                } else {
                    debug_assert_eq!(self.nodes[parent].right, Some(target));
                    self.nodes[parent].right = child;
                }
            }
        }

        Ok(self.release(target))
    }

    /// Returns a handle to the node holding the smallest element, reached
    /// by walking left from the root until there is no left child.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{OrderedTree, TreeError};
    ///
    /// let mut tree = OrderedTree::new();
    /// assert_eq!(tree.find_min().unwrap_err(), TreeError::EmptyTree);
    ///
    /// for value in [5, 3, 8, 1] {
    ///     tree.insert(value).unwrap();
    /// }
    /// assert_eq!(tree.find_min().unwrap().element(), &1);
    /// ```
    pub fn find_min(&self) -> Result<NodeRef<'_, T>, TreeError> {
        let root = self.root.ok_or(TreeError::EmptyTree)?;
        let index = self.min_index(root);
        Ok(NodeRef { tree: self, index })
    }

    /// Returns a handle to the node holding the largest element, reached
    /// by walking right from the root until there is no right child.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{OrderedTree, TreeError};
    ///
    /// let mut tree = OrderedTree::new();
    /// assert_eq!(tree.find_max().unwrap_err(), TreeError::EmptyTree);
    ///
    /// for value in [5, 3, 8, 9] {
    ///     tree.insert(value).unwrap();
    /// }
    /// assert_eq!(tree.find_max().unwrap().element(), &9);
    /// ```
    pub fn find_max(&self) -> Result<NodeRef<'_, T>, TreeError> {
        let root = self.root.ok_or(TreeError::EmptyTree)?;
        let index = self.max_index(root);
        Ok(NodeRef { tree: self, index })
    }

    /// Returns a handle to the root node, or [`TreeError::EmptyTree`] if
    /// the tree has no nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// for value in [2, 1, 3] {
    ///     tree.insert(value).unwrap();
    /// }
    ///
    /// let root = tree.root().unwrap();
    /// assert_eq!(root.element(), &2);
    /// assert_eq!(root.left().unwrap().element(), &1);
    /// ```
    pub fn root(&self) -> Result<NodeRef<'_, T>, TreeError> {
        match self.root {
            Some(index) => Ok(NodeRef { tree: self, index }),
            None => Err(TreeError::EmptyTree),
        }
    }

    /// Returns the height of the tree, the number of edges on the longest
    /// path from the root down to a leaf.
    ///
    /// An empty tree and a single-node tree both have height `0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// assert_eq!(tree.height(), 0);
    ///
    /// tree.insert(2).unwrap();
    /// assert_eq!(tree.height(), 0);
    ///
    /// tree.insert(1).unwrap();
    /// tree.insert(3).unwrap();
    /// assert_eq!(tree.height(), 1);
    /// ```
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = Vec::new();
        if let Some(root) = self.root {
            stack.push((root, 0));
        }
        while let Some((index, depth)) = stack.pop() {
            height = height.max(depth);
            if let Some(left) = self.nodes[index].left {
                stack.push((left, depth + 1));
            }
            if let Some(right) = self.nodes[index].right {
                stack.push((right, depth + 1));
            }
        }
        height
    }

    /// Returns the number of levels in the tree, counting the root's level
    /// as the first.
    ///
    /// An empty tree has `0` levels, and a non-empty tree has one more
    /// level than its [`height`](Self::height). The count here is computed
    /// on its own, by recursion over subtrees, rather than derived from
    /// the height.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// assert_eq!(tree.num_levels(), 0);
    ///
    /// for value in [1, 2, 3] {
    ///     tree.insert(value).unwrap();
    /// }
    ///
    /// // An ascending run builds a chain, one node per level.
    /// assert_eq!(tree.num_levels(), 3);
    /// assert_eq!(tree.num_levels(), tree.height() + 1);
    /// ```
    pub fn num_levels(&self) -> usize {
        self.levels_below(self.root)
    }

    /// Returns a lazy iterator over the elements in ascending order.
    ///
    /// This is the traversal that makes a search tree an ordered
    /// container, and it is also what `&tree` iterates as and what
    /// [`Debug`](fmt::Debug) prints. Each call starts a fresh traversal
    /// from the smallest element.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// for value in [5, 3, 8, 1, 4, 7, 9] {
    ///     tree.insert(value).unwrap();
    /// }
    ///
    /// let line = tree
    ///     .in_order()
    ///     .map(|element| element.to_string())
    ///     .collect::<Vec<_>>()
    ///     .join(" ");
    /// assert_eq!(line, "1 3 4 5 7 8 9");
    /// ```
    pub fn in_order(&self) -> InOrder<'_, T> {
        InOrder {
            tree: self,
            stack: Vec::new(),
            descent: self.root,
        }
    }

    /// Returns a lazy iterator that visits each node before either of its
    /// subtrees, the order a recursive copy of the tree would take.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// for value in [5, 3, 8, 1, 4, 7, 9] {
    ///     tree.insert(value).unwrap();
    /// }
    ///
    /// let order: Vec<i32> = tree.pre_order().copied().collect();
    /// assert_eq!(order, vec![5, 3, 1, 4, 8, 7, 9]);
    /// ```
    pub fn pre_order(&self) -> PreOrder<'_, T> {
        PreOrder {
            tree: self,
            stack: self.root.into_iter().collect(),
        }
    }

    /// Returns a lazy iterator that visits both of a node's subtrees
    /// before the node itself, so the root comes last.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// for value in [5, 3, 8, 1, 4, 7, 9] {
    ///     tree.insert(value).unwrap();
    /// }
    ///
    /// let order: Vec<i32> = tree.post_order().copied().collect();
    /// assert_eq!(order, vec![1, 4, 3, 7, 9, 8, 5]);
    /// ```
    pub fn post_order(&self) -> PostOrder<'_, T> {
        PostOrder {
            tree: self,
            stack: self.root.map(|root| (root, false)).into_iter().collect(),
        }
    }

    /// Returns a lazy iterator that visits the tree level by level, top to
    /// bottom and left to right within each level.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// for value in [5, 3, 8, 1, 4, 7, 9] {
    ///     tree.insert(value).unwrap();
    /// }
    ///
    /// let order: Vec<i32> = tree.level_order().copied().collect();
    /// assert_eq!(order, vec![5, 3, 8, 1, 4, 7, 9]);
    /// ```
    pub fn level_order(&self) -> LevelOrder<'_, T> {
        LevelOrder {
            tree: self,
            queue: self.root.into_iter().collect(),
        }
    }

    fn alloc(&mut self, element: T, parent: Option<usize>) -> usize {
        let index = self.nodes.len();
        self.nodes.push(Node {
            element,
            left: None,
            right: None,
            parent,
        });
        index
    }

    fn find_index(&self, element: &T) -> Option<usize>
    where
        T: Ord,
    {
        let mut cursor = self.root;
        while let Some(index) = cursor {
            cursor = match element.cmp(&self.nodes[index].element) {
                Ordering::Less => self.nodes[index].left,
                Ordering::Equal => return Some(index),
                Ordering::Greater => self.nodes[index].right,
            };
        }
        None
    }

    fn min_index(&self, mut index: usize) -> usize {
        while let Some(left) = self.nodes[index].left {
            index = left;
        }
        index
    }

    fn max_index(&self, mut index: usize) -> usize {
        while let Some(right) = self.nodes[index].right {
            index = right;
        }
        index
    }

    fn count_below(&self, link: Option<usize>) -> usize {
        match link {
            None => 0,
            Some(index) => {
                1 + self.count_below(self.nodes[index].left)
                    + self.count_below(self.nodes[index].right)
            }
        }
    }

    fn levels_below(&self, link: Option<usize>) -> usize {
        match link {
            None => 0,
            Some(index) => {
                let left = self.levels_below(self.nodes[index].left);
                let right = self.levels_below(self.nodes[index].right);
                left.max(right) + 1
            }
        }
    }

    /// Swaps the elements of two nodes, leaving all links alone.
    fn swap_elements(&mut self, a: usize, b: usize) {
        debug_assert_ne!(a, b);
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        let (front, back) = self.nodes.split_at_mut(high);
        mem::swap(&mut front[low].element, &mut back[0].element);
    }

    /// Frees an unlinked node's arena slot and returns its element.
    ///
    /// `swap_remove` fills the slot with the arena's last node, so every
    /// link that named the moved node's old position is re-pointed here.
    fn release(&mut self, index: usize) -> T {
        let node = self.nodes.swap_remove(index);
        let moved = self.nodes.len();
        if index != moved {
            match self.nodes[index].parent {
                Some(parent) => {
                    if self.nodes[parent].left == Some(moved) {
                        self.nodes[parent].left = Some(index);
                    } else {
                        debug_assert_eq!(self.nodes[parent].right, Some(moved));
                        self.nodes[parent].right = Some(index);
                    }
                }
                None => self.root = Some(index),
            }
            if let Some(left) = self.nodes[index].left {
                self.nodes[left].parent = Some(index);
            }
            if let Some(right) = self.nodes[index].right {
                self.nodes[right].parent = Some(index);
            }
        }
        node.element
    }
}

impl<'a, T> IntoIterator for &'a OrderedTree<T> {
    type Item = &'a T;
    type IntoIter = InOrder<'a, T>;

    fn into_iter(self) -> InOrder<'a, T> {
        self.in_order()
    }
}

/// A borrowed handle to one node of an [`OrderedTree`].
///
/// A `NodeRef` pairs a shared borrow of the tree with the position of a
/// single node, so it is `Copy` and freely passed around. The borrow pins
/// the tree: while any handle is alive the tree cannot be mutated, which
/// is what keeps a handle from ever naming a node that moved or was
/// deleted. Two handles compare equal when they name the same node of the
/// same tree.
///
/// # Examples
///
/// ```
/// use ordered_tree::OrderedTree;
///
/// let mut tree = OrderedTree::new();
/// for value in [5, 3, 8, 7, 9] {
///     tree.insert(value).unwrap();
/// }
///
/// let eight = tree.find(&8).unwrap();
/// assert_eq!(eight.left().unwrap().element(), &7);
/// assert_eq!(eight.parent().unwrap().element(), &5);
/// assert!(eight.is_right_child());
/// ```
pub struct NodeRef<'a, T> {
    tree: &'a OrderedTree<T>,
    index: usize,
}

impl<'a, T> NodeRef<'a, T> {
    fn node(&self) -> &'a Node<T> {
        &self.tree.nodes[self.index]
    }

    /// Returns the element stored in this node.
    ///
    /// The reference borrows from the tree, not from the handle, so it
    /// stays valid after the handle is gone.
    pub fn element(&self) -> &'a T {
        &self.node().element
    }

    /// Returns a handle to the left child, if there is one.
    pub fn left(&self) -> Option<NodeRef<'a, T>> {
        let index = self.node().left?;
        Some(NodeRef {
            tree: self.tree,
            index,
        })
    }

    /// Returns a handle to the right child, if there is one.
    pub fn right(&self) -> Option<NodeRef<'a, T>> {
        let index = self.node().right?;
        Some(NodeRef {
            tree: self.tree,
            index,
        })
    }

    /// Returns a handle to the parent, or [`TreeError::NoParent`] if this
    /// node is the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{OrderedTree, TreeError};
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(5).unwrap();
    /// tree.insert(3).unwrap();
    ///
    /// let three = tree.find(&3).unwrap();
    /// assert_eq!(three.parent().unwrap().element(), &5);
    /// assert_eq!(tree.root().unwrap().parent().unwrap_err(), TreeError::NoParent);
    /// ```
    pub fn parent(&self) -> Result<NodeRef<'a, T>, TreeError> {
        match self.node().parent {
            Some(index) => Ok(NodeRef {
                tree: self.tree,
                index,
            }),
            None => Err(TreeError::NoParent),
        }
    }

    /// Returns a handle to the node holding the next element in ascending
    /// order, or [`None`] if this node holds the largest element.
    ///
    /// If the node has a right subtree, the successor is that subtree's
    /// smallest node. Otherwise the successor is the first ancestor
    /// reached from its left side, found by climbing the parent links
    /// while the node being left behind is a right child.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// for value in [5, 3, 8, 1, 4, 7, 9] {
    ///     tree.insert(value).unwrap();
    /// }
    ///
    /// let five = tree.find(&5).unwrap();
    /// assert_eq!(five.successor().unwrap().element(), &7);
    ///
    /// // 4 has no right subtree; its successor is an ancestor.
    /// let four = tree.find(&4).unwrap();
    /// assert_eq!(four.successor().unwrap().element(), &5);
    ///
    /// let nine = tree.find(&9).unwrap();
    /// assert!(nine.successor().is_none());
    /// ```
    pub fn successor(&self) -> Option<NodeRef<'a, T>> {
        if let Some(right) = self.node().right {
            return Some(NodeRef {
                tree: self.tree,
                index: self.tree.min_index(right),
            });
        }
        let mut below = self.index;
        let mut above = self.node().parent;
        while let Some(index) = above {
            if self.tree.nodes[index].right == Some(below) {
                below = index;
                above = self.tree.nodes[index].parent;
            } else {
                return Some(NodeRef {
                    tree: self.tree,
                    index,
                });
            }
        }
        None
    }

    /// Returns a handle to the node holding the previous element in
    /// ascending order, or [`None`] if this node holds the smallest
    /// element.
    ///
    /// The mirror image of [`successor`](Self::successor): the largest
    /// node of the left subtree if there is one, otherwise the first
    /// ancestor reached from its right side.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// for value in [5, 3, 8, 1, 4, 7, 9] {
    ///     tree.insert(value).unwrap();
    /// }
    ///
    /// let five = tree.find(&5).unwrap();
    /// assert_eq!(five.predecessor().unwrap().element(), &4);
    ///
    /// let one = tree.find(&1).unwrap();
    /// assert!(one.predecessor().is_none());
    /// ```
    pub fn predecessor(&self) -> Option<NodeRef<'a, T>> {
        if let Some(left) = self.node().left {
            return Some(NodeRef {
                tree: self.tree,
                index: self.tree.max_index(left),
            });
        }
        let mut below = self.index;
        let mut above = self.node().parent;
        while let Some(index) = above {
            if self.tree.nodes[index].left == Some(below) {
                below = index;
                above = self.tree.nodes[index].parent;
            } else {
                return Some(NodeRef {
                    tree: self.tree,
                    index,
                });
            }
        }
        None
    }

    /// Returns the number of parent links between this node and the root.
    ///
    /// The root has depth `0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// for value in [5, 3, 8, 9] {
    ///     tree.insert(value).unwrap();
    /// }
    ///
    /// assert_eq!(tree.root().unwrap().depth(), 0);
    /// assert_eq!(tree.find(&9).unwrap().depth(), 2);
    /// ```
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut cursor = self.node().parent;
        while let Some(index) = cursor {
            depth += 1;
            cursor = self.tree.nodes[index].parent;
        }
        depth
    }

    /// Returns `true` if this node is the root.
    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }

    /// Returns `true` if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.node().left.is_none() && self.node().right.is_none()
    }

    /// Returns `true` if this node has a left child.
    pub fn has_left(&self) -> bool {
        self.node().left.is_some()
    }

    /// Returns `true` if this node has a right child.
    pub fn has_right(&self) -> bool {
        self.node().right.is_some()
    }

    /// Returns `true` if this node is its parent's left child.
    ///
    /// The root is nobody's child, so this is `false` for the root.
    pub fn is_left_child(&self) -> bool {
        match self.node().parent {
            Some(parent) => self.tree.nodes[parent].left == Some(self.index),
            None => false,
        }
    }

    /// Returns `true` if this node is its parent's right child.
    ///
    /// `false` for the root, as with [`is_left_child`](Self::is_left_child).
    pub fn is_right_child(&self) -> bool {
        match self.node().parent {
            Some(parent) => self.tree.nodes[parent].right == Some(self.index),
            None => false,
        }
    }

    /// Returns how many children this node has, from `0` to `2`.
    pub fn num_children(&self) -> usize {
        let mut children = 0;
        if self.has_left() {
            children += 1;
        }
        if self.has_right() {
            children += 1;
        }
        children
    }
}

// Derived impls would demand the same of `T`, which these never need.
impl<'a, T> Clone for NodeRef<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for NodeRef<'a, T> {}

impl<'a, T> PartialEq for NodeRef<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl<'a, T> Eq for NodeRef<'a, T> {}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("element", self.element())
            .finish()
    }
}

/// A lazy ascending traversal, created by [`OrderedTree::in_order`].
///
/// The iterator keeps a stack of the nodes whose left subtrees it has
/// entered but not finished. Cloning it mid-way yields an independent
/// traversal that resumes from the same position.
pub struct InOrder<'a, T> {
    tree: &'a OrderedTree<T>,
    stack: Vec<usize>,
    descent: Option<usize>,
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let tree = self.tree;
        while let Some(index) = self.descent {
            self.stack.push(index);
            self.descent = tree.nodes[index].left;
        }
        let index = self.stack.pop()?;
        self.descent = tree.nodes[index].right;
        Some(&tree.nodes[index].element)
    }
}

impl<'a, T> Clone for InOrder<'a, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            stack: self.stack.clone(),
            descent: self.descent,
        }
    }
}

/// A lazy node-before-subtrees traversal, created by
/// [`OrderedTree::pre_order`].
pub struct PreOrder<'a, T> {
    tree: &'a OrderedTree<T>,
    stack: Vec<usize>,
}

impl<'a, T> Iterator for PreOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let tree = self.tree;
        let index = self.stack.pop()?;
        let node = &tree.nodes[index];
        // The right child goes under the left so the left pops first.
        if let Some(right) = node.right {
            self.stack.push(right);
        }
        if let Some(left) = node.left {
            self.stack.push(left);
        }
        Some(&node.element)
    }
}

impl<'a, T> Clone for PreOrder<'a, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            stack: self.stack.clone(),
        }
    }
}

/// A lazy subtrees-before-node traversal, created by
/// [`OrderedTree::post_order`].
///
/// Each stack entry remembers whether the node's subtrees have already
/// been pushed, so a node is emitted only on its second visit.
pub struct PostOrder<'a, T> {
    tree: &'a OrderedTree<T>,
    stack: Vec<(usize, bool)>,
}

impl<'a, T> Iterator for PostOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let tree = self.tree;
        while let Some((index, expanded)) = self.stack.pop() {
            if expanded {
                return Some(&tree.nodes[index].element);
            }
            let node = &tree.nodes[index];
            self.stack.push((index, true));
            if let Some(right) = node.right {
                self.stack.push((right, false));
            }
            if let Some(left) = node.left {
                self.stack.push((left, false));
            }
        }
        None
    }
}

impl<'a, T> Clone for PostOrder<'a, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            stack: self.stack.clone(),
        }
    }
}

/// A lazy top-to-bottom, left-to-right traversal, created by
/// [`OrderedTree::level_order`].
///
/// Dequeuing a node enqueues its children, left first, so a whole level
/// drains before the next one starts.
pub struct LevelOrder<'a, T> {
    tree: &'a OrderedTree<T>,
    queue: VecDeque<usize>,
}

impl<'a, T> Iterator for LevelOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let tree = self.tree;
        let index = self.queue.pop_front()?;
        let node = &tree.nodes[index];
        if let Some(left) = node.left {
            self.queue.push_back(left);
        }
        if let Some(right) = node.right {
            self.queue.push_back(right);
        }
        Some(&node.element)
    }
}

impl<'a, T> Clone for LevelOrder<'a, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            queue: self.queue.clone(),
        }
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::tests::check_invariants;
    use super::*;
    use crate::test::quick::Op;

    /// Applies each operation to the tree and to the oracle, checking as
    /// it goes that the two agree on what each operation did.
    fn do_ops<T: Ord + Clone>(ops: &[Op<T>], tree: &mut OrderedTree<T>, oracle: &mut BTreeSet<T>) {
        for op in ops {
            match op {
                Op::Insert(x) => {
                    let fresh = oracle.insert(x.clone());
                    assert_eq!(tree.insert(x.clone()).is_ok(), fresh);
                }
                Op::Remove(x) => {
                    let present = oracle.remove(x);
                    assert_eq!(tree.delete(x).is_ok(), present);
                }
                Op::Iter => {
                    assert!(tree.in_order().eq(oracle.iter()));
                }
            }
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations(ops: Vec<Op<i8>>) -> bool {
            let mut tree = OrderedTree::new();
            let mut oracle = BTreeSet::new();
            do_ops(&ops, &mut tree, &mut oracle);
            check_invariants(&tree);
            tree.len() == oracle.len() && oracle.iter().all(|x| tree.contains(x))
        }
    }
}
