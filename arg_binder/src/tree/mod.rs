//! Ordered n-ary tree used to hold parsed argument invocations.
//!
//! Children are owned by their parent, so every non-root node has exactly one
//! parent and the root always exists.

use std::iter::FusedIterator;

/// A node holding a value and an ordered list of children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode<T> {
    value: T,
    children: Vec<Self>,
}

impl<T> TreeNode<T> {
    /// Creates a leaf node.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self {
            value,
            children: Vec::new(),
        }
    }

    /// Creates a node owning `children` in the given order.
    #[must_use]
    pub fn with_children<I>(value: T, children: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self {
            value,
            children: children.into_iter().collect(),
        }
    }

    /// The value stored in this node.
    #[must_use]
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Children of this node, in insertion order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Appends `child` as the last child of this node.
    pub fn add(&mut self, child: Self) {
        self.children.push(child);
    }

    /// Appends every node in `children`, preserving their order.
    pub fn extend<I>(&mut self, children: I)
    where
        I: IntoIterator<Item = Self>,
    {
        self.children.extend(children);
    }

    /// Detaches and returns the child at `index`, if present.
    pub fn remove(&mut self, index: usize) -> Option<Self> {
        (index < self.children.len()).then(|| self.children.remove(index))
    }

    /// Mutable access to the most recently added child.
    pub fn last_child_mut(&mut self) -> Option<&mut Self> {
        self.children.last_mut()
    }

    /// Depth-first, pre-order iteration over this node's subtree values.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { stack: vec![self] }
    }
}

/// A rooted tree of [`TreeNode`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree<T> {
    root: TreeNode<T>,
}

impl<T> Tree<T> {
    /// Wraps `root` as a tree.
    #[must_use]
    pub const fn new(root: TreeNode<T>) -> Self {
        Self { root }
    }

    /// The root node.
    #[must_use]
    pub const fn root(&self) -> &TreeNode<T> {
        &self.root
    }

    /// Mutable access to the root node.
    pub const fn root_mut(&mut self) -> &mut TreeNode<T> {
        &mut self.root
    }

    /// Depth-1 nodes: one per argument invocation in a parsed tree.
    #[must_use]
    pub fn invocations(&self) -> &[TreeNode<T>] {
        self.root.children()
    }

    /// Depth-first, pre-order iteration over every value in the tree.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        self.root.iter()
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pre-order iterator over tree values.
#[derive(Debug)]
pub struct Iter<'a, T> {
    stack: Vec<&'a TreeNode<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(&node.value)
    }
}

impl<T> FusedIterator for Iter<'_, T> {}
