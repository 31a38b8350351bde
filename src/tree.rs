use std::fmt::{self, Display};
use std::io;

use crate::memory::Arena;
use crate::node::{NodeData, NodeRef};
use crate::NodeIndex;

/// An insertion-ordered N-ary tree that only grows.
///
/// The tree always has a root. New nodes are appended as the last child of an
/// existing node and are never removed, so every [`NodeIndex`] the tree hands
/// out stays valid for the tree's whole lifetime.
///
/// A tree is built through a [`Zipper`](crate::Zipper): creating a branch at
/// the cursor is the only way to add a node. A tree taken out of its zipper is
/// read-only apart from its payloads.
///
/// ```compile_fail
/// # use treezipper::Zipper;
/// let mut tree = Zipper::new(0).into_tree();
/// let root = tree.root_index();
/// tree.add_child(root, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree<T> {
    nodes: Arena<NodeIndex, NodeData<T>>,
    root: NodeIndex,
}

impl<T> Tree<T> {
    /// Creates a tree that consists of a root node holding `root`.
    pub(crate) fn new(root: T) -> Self {
        Self::with_capacity(1, root)
    }

    /// Creates a tree with room for `capacity` nodes before reallocating.
    pub(crate) fn with_capacity(capacity: usize, root: T) -> Self {
        let mut nodes = Arena::with_capacity(capacity.max(1));
        let root = nodes.insert(NodeData::new(None, root));
        Self { nodes, root }
    }

    #[inline]
    pub fn root_index(&self) -> NodeIndex {
        self.root
    }

    /// Returns a reference to the root node.
    #[inline]
    pub fn root(&self) -> NodeRef<'_, T> {
        NodeRef::new(self, self.root)
    }

    /// Returns a reference to a node, or `None` if `node` is out of range.
    ///
    /// Handles carry no tree identity: an in-range handle from another tree
    /// resolves to whatever node of this tree holds that position.
    pub fn get(&self, node: NodeIndex) -> Option<NodeRef<'_, T>> {
        self.nodes.contains(node).then(|| NodeRef::new(self, node))
    }

    /// Returns a mutable reference to a node's payload.
    pub fn value_mut(&mut self, node: NodeIndex) -> Option<&mut T> {
        Some(&mut self.nodes.get_mut(node)?.value)
    }

    /// Returns the number of nodes in the tree, root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its root, so it is never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Appends a new node holding `value` as the last child of `parent`.
    ///
    /// Existing handles, including those of `parent`'s other children, remain
    /// valid.
    ///
    /// # Panics
    ///
    /// Panics when `parent` was not issued by this tree.
    pub(crate) fn add_child(&mut self, parent: NodeIndex, value: T) -> NodeIndex {
        assert!(self.nodes.contains(parent), "unknown parent node");
        let child = self.nodes.insert(NodeData::new(Some(parent), value));
        self.nodes[parent].children.push(child);
        child
    }

    /// Calls `visitor` with mutable access to the value of every child of
    /// `node`, in insertion order.
    pub(crate) fn for_each_child_mut<F>(&mut self, node: NodeIndex, mut visitor: F)
    where
        F: FnMut(&mut T),
    {
        let child_count = self.nodes[node].children.len();

        for position in 0..child_count {
            let child = self.nodes[node].children[position];
            visitor(&mut self.nodes[child].value);
        }
    }

    /// Writes the whole tree, starting at the root with depth zero.
    ///
    /// See [`NodeRef::print_tree`] for the format.
    pub fn print_tree<W>(&self, output: &mut W) -> io::Result<()>
    where
        W: io::Write + ?Sized,
        T: Display,
    {
        self.root().print_tree(output, 0)
    }

    #[inline]
    pub(crate) fn node_data(&self, node: NodeIndex) -> &NodeData<T> {
        &self.nodes[node]
    }

    #[inline]
    pub(crate) fn node_value_mut(&mut self, node: NodeIndex) -> &mut T {
        &mut self.nodes[node].value
    }

    #[inline]
    pub(crate) fn parent_of(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.nodes[node].parent
    }

    #[inline]
    pub(crate) fn children_of(&self, node: NodeIndex) -> &[NodeIndex] {
        &self.nodes[node].children
    }
}

impl<T: Display> Display for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buffer = Vec::new();
        self.print_tree(&mut buffer).map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&buffer))
    }
}
