//! Nodes of a [`Tree`] and read-only views onto them.
//!
//! A node owns its payload and an insertion-ordered list of child handles. The
//! parent link is a plain [`NodeIndex`] and never keeps anything alive: the
//! tree's arena is the sole owner of every node.
use std::fmt::{self, Debug, Display};
use std::io;
use std::iter::FusedIterator;

use crate::{NodeIndex, Tree};

/// Number of columns a value is shifted per level by [`NodeRef::print_tree`].
pub const INDENT_WIDTH: usize = 4;

/// Storage of a single node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NodeData<T> {
    pub(crate) value: T,
    /// `None` exactly for the root.
    pub(crate) parent: Option<NodeIndex>,
    pub(crate) children: Vec<NodeIndex>,
}

impl<T> NodeData<T> {
    pub(crate) fn new(parent: Option<NodeIndex>, value: T) -> Self {
        Self {
            value,
            parent,
            children: Vec::new(),
        }
    }
}

/// A reference to a node in a [`Tree`].
///
/// Since this type does not point to the node directly, but to the tree and
/// the node's index, it can be used to walk to the node's parent and children.
pub struct NodeRef<'a, T> {
    tree: &'a Tree<T>,
    index: NodeIndex,
}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>, index: NodeIndex) -> Self {
        Self { tree, index }
    }

    #[inline]
    fn data(&self) -> &'a NodeData<T> {
        self.tree.node_data(self.index)
    }

    /// Returns the handle of the node.
    #[inline]
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// Returns the node's payload.
    #[inline]
    pub fn value(&self) -> &'a T {
        &self.data().value
    }

    /// Returns the parent of the node, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.data().parent.map(|parent| Self::new(self.tree, parent))
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.data().parent.is_none()
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.data().children.is_empty()
    }

    /// Returns the number of the node's children.
    #[inline]
    pub fn child_count(&self) -> usize {
        self.data().children.len()
    }

    /// Returns the handles of the node's children in insertion order.
    #[inline]
    pub fn child_indices(&self) -> &'a [NodeIndex] {
        &self.data().children
    }

    /// Returns the `n`th child of the node, if any.
    pub fn child(&self, n: usize) -> Option<Self> {
        self.data()
            .children
            .get(n)
            .map(|&child| Self::new(self.tree, child))
    }

    /// Iterates over the node's children in insertion order.
    pub fn children(&self) -> Children<'a, T> {
        Children {
            tree: self.tree,
            indices: self.data().children.iter(),
        }
    }

    /// Number of edges between the node and the root.
    pub fn depth(&self) -> usize {
        std::iter::successors(self.parent(), NodeRef::parent).count()
    }

    /// Returns the position of the first child whose value satisfies
    /// `predicate`, scanning in insertion order.
    ///
    /// The scan stops at the first match.
    ///
    /// ```
    /// # use treezipper::Zipper;
    /// let mut zipper = Zipper::new(0);
    /// for v in [3, 8, 5, 8] {
    ///     zipper.create_branch(v);
    ///     zipper.step_back().unwrap();
    /// }
    ///
    /// let root = zipper.root();
    /// assert_eq!(root.find_child_index(|v| *v == 8), Some(1));
    /// assert_eq!(root.find_child_index(|v| *v > 10), None);
    /// ```
    pub fn find_child_index<P>(&self, mut predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.children().position(|child| predicate(child.value()))
    }

    /// Calls `visitor` on the value of every child in insertion order.
    pub fn for_each_child<F>(&self, mut visitor: F)
    where
        F: FnMut(&T),
    {
        self.children().for_each(|child| visitor(child.value()))
    }

    /// Collects `transform` applied to every child's value, in child order.
    pub fn map_children<U, F>(&self, mut transform: F) -> Vec<U>
    where
        F: FnMut(&T) -> U,
    {
        self.children()
            .map(|child| transform(child.value()))
            .collect()
    }

    /// Left-folds over the children in insertion order.
    ///
    /// `combiner` receives the child's value first and the accumulator second,
    /// so children `[c1, c2, c3]` produce
    /// `combiner(c3, combiner(c2, combiner(c1, init)))`.
    pub fn fold_children<A, F>(&self, init: A, mut combiner: F) -> A
    where
        F: FnMut(&T, A) -> A,
    {
        self.children()
            .fold(init, |acc, child| combiner(child.value(), acc))
    }

    /// Writes the subtree rooted at this node in pre-order, one value per line.
    ///
    /// Each value is right-aligned in a field of `depth * INDENT_WIDTH`
    /// columns, with `depth` counted from the value passed in for this node.
    pub fn print_tree<W>(&self, output: &mut W, depth: usize) -> io::Result<()>
    where
        W: io::Write + ?Sized,
        T: Display,
    {
        let mut stack = vec![(self.index, depth)];

        while let Some((index, depth)) = stack.pop() {
            let node = self.tree.node_data(index);
            // Not every `Display` impl honours the width, so pad the rendered text.
            let text = node.value.to_string();
            writeln!(output, "{:>width$}", text, width = depth * INDENT_WIDTH)?;
            stack.extend(node.children.iter().rev().map(|&child| (child, depth + 1)));
        }

        Ok(())
    }
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T: Debug> Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("index", &self.index)
            .field("value", self.value())
            .field("children", &self.child_indices())
            .finish()
    }
}

/// Iterator over the children of a node, created by [`NodeRef::children`].
pub struct Children<'a, T> {
    tree: &'a Tree<T>,
    indices: std::slice::Iter<'a, NodeIndex>,
}

impl<'a, T> Iterator for Children<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let &index = self.indices.next()?;
        Some(NodeRef::new(self.tree, index))
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Children<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let &index = self.indices.next_back()?;
        Some(NodeRef::new(self.tree, index))
    }
}

impl<'a, T> ExactSizeIterator for Children<'a, T> {
    #[inline(always)]
    fn len(&self) -> usize {
        self.indices.len()
    }
}

impl<'a, T> FusedIterator for Children<'a, T> {}
