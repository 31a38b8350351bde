//! The cursor through which a [`Tree`] is grown and walked.
use std::fmt::{self, Display};
use std::io;

use log::{debug, trace};
use thiserror::Error;

use crate::node::{Children, NodeRef};
use crate::{NodeIndex, Tree};

/// A tree together with a position inside it.
///
/// The zipper owns the whole tree; the current position is a [`NodeIndex`] and
/// always denotes a node reachable from the root. New nodes only enter the tree
/// through [`Zipper::create_branch`], which also moves the cursor onto them.
///
/// # Example
///
/// ```
/// use treezipper::Zipper;
///
/// let mut zipper = Zipper::new(0);
/// zipper.create_branch(1);
/// zipper.step_back().unwrap();
/// zipper.create_branch(2);
/// zipper.step_back().unwrap();
///
/// assert_eq!(zipper.find_branch(|v| *v == 2), Some(1));
/// zipper.step_forward(1).unwrap();
/// assert_eq!(*zipper.value(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zipper<T> {
    tree: Tree<T>,
    current: NodeIndex,
}

impl<T: Default> Default for Zipper<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Zipper<T> {
    /// Creates a zipper over a fresh tree whose root holds `root`.
    pub fn new(root: T) -> Self {
        Self::at_root(Tree::new(root))
    }

    /// Creates a zipper whose tree has room for `capacity` nodes before
    /// reallocating.
    pub fn with_capacity(capacity: usize, root: T) -> Self {
        Self::at_root(Tree::with_capacity(capacity, root))
    }

    fn at_root(tree: Tree<T>) -> Self {
        let current = tree.root_index();
        Self { tree, current }
    }

    /// Returns whether the cursor is below the root.
    #[inline]
    pub fn can_step_back(&self) -> bool {
        self.tree.parent_of(self.current).is_some()
    }

    /// Moves the cursor to the parent of the current node.
    ///
    /// # Errors
    ///
    /// [`StepError::AtRoot`] when the cursor is on the root. The cursor does not
    /// move in that case.
    pub fn step_back(&mut self) -> Result<(), StepError> {
        let Some(parent) = self.tree.parent_of(self.current) else {
            debug!("step back refused at the root");
            return Err(StepError::AtRoot);
        };

        trace!("step back {:?} -> {:?}", self.current, parent);
        self.current = parent;
        Ok(())
    }

    /// Steps back `n` times in sequence.
    ///
    /// # Errors
    ///
    /// Stops at the first failing step and returns its error. Steps taken
    /// before the failure are kept, so the cursor is left on the root.
    pub fn step_back_n(&mut self, n: usize) -> Result<(), StepError> {
        for _ in 0..n {
            self.step_back()?;
        }

        Ok(())
    }

    /// Returns whether the current node has at least one branch.
    #[inline]
    pub fn can_step_forward(&self) -> bool {
        !self.tree.children_of(self.current).is_empty()
    }

    /// Returns the position of the first branch whose value satisfies
    /// `predicate`, or `None` when there is none.
    pub fn find_branch<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.current().find_child_index(predicate)
    }

    /// Moves the cursor to the branch at position `branch`.
    ///
    /// # Errors
    ///
    ///  - [`StepError::NegativeBranch`] when `branch` is negative.
    ///  - [`StepError::BranchOutOfRange`] when the current node has no branch at
    ///    that position.
    ///
    /// The cursor does not move on error.
    pub fn step_forward(&mut self, branch: isize) -> Result<(), StepError> {
        let Ok(index) = usize::try_from(branch) else {
            debug!("step forward refused: negative branch {}", branch);
            return Err(StepError::NegativeBranch(branch));
        };

        let children = self.tree.children_of(self.current);
        let Some(&child) = children.get(index) else {
            debug!(
                "step forward refused: branch {} of {}",
                index,
                children.len()
            );
            return Err(StepError::BranchOutOfRange {
                index,
                len: children.len(),
            });
        };

        trace!("step forward {:?} -> {:?}", self.current, child);
        self.current = child;
        Ok(())
    }

    /// Appends a new branch holding `value` to the current node and moves the
    /// cursor onto it.
    pub fn create_branch(&mut self, value: T) -> NodeIndex {
        let child = self.tree.add_child(self.current, value);
        trace!("create branch {:?} under {:?}", child, self.current);
        self.current = child;
        child
    }

    /// Iterates over the branches of the current node.
    pub fn available_branches(&self) -> Children<'_, T> {
        self.current().children()
    }

    /// Collects `transform` applied to the value of every branch of the
    /// current node.
    pub fn map_branches<U, F>(&self, transform: F) -> Vec<U>
    where
        F: FnMut(&T) -> U,
    {
        self.current().map_children(transform)
    }

    /// Calls `visitor` on the value of every branch of the current node.
    pub fn for_each_branch<F>(&self, visitor: F)
    where
        F: FnMut(&T),
    {
        self.current().for_each_child(visitor)
    }

    /// Like [`Zipper::for_each_branch`], with mutable access to the values.
    pub fn for_each_branch_mut<F>(&mut self, visitor: F)
    where
        F: FnMut(&mut T),
    {
        self.tree.for_each_child_mut(self.current, visitor)
    }

    /// Left-folds over the branches of the current node, see
    /// [`NodeRef::fold_children`].
    pub fn fold_children<A, F>(&self, init: A, combiner: F) -> A
    where
        F: FnMut(&T, A) -> A,
    {
        self.current().fold_children(init, combiner)
    }

    /// Writes the entire tree from the root, wherever the cursor is.
    pub fn print_tree<W>(&self, output: &mut W) -> io::Result<()>
    where
        W: io::Write + ?Sized,
        T: Display,
    {
        self.tree.print_tree(output)
    }

    /// Returns the node under the cursor.
    #[inline]
    pub fn current(&self) -> NodeRef<'_, T> {
        NodeRef::new(&self.tree, self.current)
    }

    /// Returns the handle of the node under the cursor.
    #[inline]
    pub fn current_index(&self) -> NodeIndex {
        self.current
    }

    /// Returns the value of the node under the cursor.
    #[inline]
    pub fn value(&self) -> &T {
        self.current().value()
    }

    /// Returns the value of the node under the cursor for modification.
    pub fn value_mut(&mut self) -> &mut T {
        self.tree.node_value_mut(self.current)
    }

    #[inline]
    pub fn root(&self) -> NodeRef<'_, T> {
        self.tree.root()
    }

    #[inline]
    pub fn tree(&self) -> &Tree<T> {
        &self.tree
    }

    /// Drops the cursor and returns the tree.
    pub fn into_tree(self) -> Tree<T> {
        self.tree
    }

    /// Returns the number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

impl<T: Display> Display for Zipper<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.tree, f)
    }
}

/// Error produced when the cursor can not move in the requested direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum StepError {
    #[error("cannot step back from the root node")]
    AtRoot,
    #[error("invalid branch {0}: negative index, possibly an unchecked result of find_branch")]
    NegativeBranch(isize),
    #[error("invalid branch {index}: the current node only has {len} branches")]
    BranchOutOfRange { index: usize, len: usize },
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    /// Grows a tree the way the `grow` binary does and returns the first error.
    fn grow(zipper: &mut Zipper<i32>, steps: i32, back: usize) -> Result<(), StepError> {
        for i in 0..steps {
            if i % 6 == 5 {
                zipper.step_back_n(back)?;
            } else {
                zipper.create_branch(i);
            }
        }
        Ok(())
    }

    #[test]
    fn starts_at_root() {
        let zipper = Zipper::new(-1);
        assert_eq!(zipper.current_index(), zipper.root().index());
        assert!(!zipper.can_step_back());
        assert!(!zipper.can_step_forward());
        assert_eq!(zipper.len(), 1);
    }

    #[test]
    fn step_back_from_root_fails() {
        let mut zipper = Zipper::<u8>::default();
        assert_eq!(zipper.step_back(), Err(StepError::AtRoot));
        assert_eq!(zipper.current_index(), zipper.root().index());
    }

    #[test]
    fn create_branch_descends() {
        let mut zipper = Zipper::new("root");
        let a = zipper.create_branch("a");

        assert_eq!(zipper.current_index(), a);
        assert_eq!(*zipper.value(), "a");
        assert!(zipper.can_step_back());
        assert!(zipper.current().is_leaf());

        zipper.step_back().unwrap();
        assert!(zipper.can_step_forward());
        assert!(zipper.available_branches().map(|b| b.index()).eq([a]));
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut zipper = Zipper::new('r');
        zipper.create_branch('a');
        zipper.step_back().unwrap();
        zipper.create_branch('b');
        zipper.step_back().unwrap();

        assert_eq!(zipper.map_branches(|c| *c), vec!['a', 'b']);
    }

    #[rstest]
    #[case(3, StepError::BranchOutOfRange { index: 3, len: 3 })]
    #[case(100, StepError::BranchOutOfRange { index: 100, len: 3 })]
    #[case(-1, StepError::NegativeBranch(-1))]
    #[case(isize::MIN, StepError::NegativeBranch(isize::MIN))]
    fn invalid_forward_step_keeps_position(#[case] branch: isize, #[case] expected: StepError) {
        let mut zipper = Zipper::new(0);
        for v in 1..=3 {
            zipper.create_branch(v);
            zipper.step_back().unwrap();
        }
        let before = zipper.current_index();

        assert_eq!(zipper.step_forward(branch), Err(expected));
        assert_eq!(zipper.current_index(), before);
    }

    #[test]
    fn forward_step_on_leaf_is_out_of_range() {
        let mut zipper = Zipper::new(0);
        assert_eq!(
            zipper.step_forward(0),
            Err(StepError::BranchOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn find_branch_then_step_forward() {
        let mut zipper = Zipper::new(0);
        for v in [4, 9, 16, 9] {
            zipper.create_branch(v);
            zipper.step_back().unwrap();
        }

        let branch = zipper.find_branch(|v| *v == 9).unwrap();
        assert_eq!(branch, 1);
        zipper.step_forward(branch as isize).unwrap();
        assert_eq!(*zipper.value(), 9);

        zipper.step_back().unwrap();
        assert_eq!(zipper.find_branch(|v| *v > 100), None);
    }

    #[rstest]
    #[case(0, 3)]
    #[case(2, 1)]
    #[case(3, 0)]
    fn step_back_n_within_depth(#[case] n: usize, #[case] depth: usize) {
        let mut zipper = Zipper::new(0);
        for v in 1..=3 {
            zipper.create_branch(v);
        }

        zipper.step_back_n(n).unwrap();
        assert_eq!(zipper.current().depth(), depth);
    }

    #[test]
    fn step_back_n_does_not_roll_back() {
        let mut zipper = Zipper::new(0);
        for v in 1..=3 {
            zipper.create_branch(v);
        }

        assert_eq!(zipper.step_back_n(5), Err(StepError::AtRoot));
        assert_eq!(zipper.current_index(), zipper.root().index());
    }

    #[test]
    fn bulk_operations_only_see_current_branches() {
        let mut zipper = Zipper::new(1);
        zipper.create_branch(2);
        zipper.create_branch(20);
        zipper.step_back().unwrap();
        zipper.create_branch(21);
        zipper.step_back_n(2).unwrap();
        zipper.create_branch(3);
        zipper.step_back().unwrap();

        assert_eq!(zipper.fold_children(0, |v, acc| v + acc), 5);
        let mut seen = Vec::new();
        zipper.for_each_branch(|v| seen.push(*v));
        assert_eq!(seen, [2, 3]);

        zipper.step_forward(0).unwrap();
        zipper.for_each_branch_mut(|v| *v += 100);
        assert_eq!(zipper.map_branches(|v| *v), vec![120, 121]);
        assert_eq!(*zipper.value(), 2);
    }

    #[test]
    fn value_mut_edits_current_node() {
        let mut zipper = Zipper::new(String::from("root"));
        zipper.create_branch(String::from("leaf"));
        zipper.value_mut().push_str("!");
        zipper.step_back().unwrap();

        assert_eq!(zipper.map_branches(String::clone), vec!["leaf!"]);
    }

    #[test]
    fn print_ignores_cursor_position() {
        let mut zipper = Zipper::new(-1);
        zipper.create_branch(0);
        zipper.create_branch(1);

        let mut out = Vec::new();
        zipper.print_tree(&mut out).unwrap();
        let expected = format!("-1\n{}0\n{}1\n", " ".repeat(3), " ".repeat(7));
        assert_eq!(String::from_utf8(out).unwrap(), expected);
        assert_eq!(zipper.to_string(), expected);
    }

    #[test]
    fn grow_scenario_returns_to_root_each_cycle() {
        let mut zipper = Zipper::new(-1);

        assert_eq!(grow(&mut zipper, 26, 5), Ok(()));
        assert_eq!(zipper.map_branches(|v| *v), vec![0, 6, 12, 18, 24]);
        assert_eq!(zipper.len(), 23);
        assert_eq!(*zipper.value(), 25);
        assert_eq!(zipper.current().depth(), 2);

        let first = zipper.root().child(0).unwrap();
        let chain: Vec<i32> = std::iter::successors(Some(first), |n| n.child(0))
            .map(|n| *n.value())
            .collect();
        assert_eq!(chain, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn grow_scenario_past_the_root_stops_early() {
        let mut zipper = Zipper::new(-1);

        assert_eq!(grow(&mut zipper, 26, 6), Err(StepError::AtRoot));
        assert_eq!(zipper.current_index(), zipper.root().index());
        assert_eq!(zipper.map_branches(|v| *v), vec![0]);
        assert_eq!(zipper.len(), 6);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            StepError::AtRoot.to_string(),
            "cannot step back from the root node"
        );
        assert_eq!(
            StepError::BranchOutOfRange { index: 4, len: 2 }.to_string(),
            "invalid branch 4: the current node only has 2 branches"
        );
    }

    #[test]
    fn nodes_only_enter_at_the_cursor() {
        let mut zipper = Zipper::<u8>::default();
        let root = zipper.current_index();
        let a = zipper.create_branch(1);
        zipper.step_back().unwrap();
        let b = zipper.create_branch(2);
        zipper.create_branch(3);

        let tree = zipper.into_tree();
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.root_index(), root);
        assert_eq!(tree.root().map_children(|v| *v), vec![1, 2]);
        assert_eq!(tree.get(a).unwrap().parent().unwrap().index(), root);
        assert_eq!(tree.get(b).unwrap().map_children(|v| *v), vec![3]);
    }

    proptest! {
        #[test]
        fn create_then_step_back_round_trips(values in prop::collection::vec(any::<i16>(), 0..64), prefix in 0usize..8) {
            let mut zipper = Zipper::new(0i16);
            for v in 0..prefix {
                zipper.create_branch(v as i16);
            }
            let origin = zipper.current_index();

            for v in &values {
                zipper.create_branch(*v);
            }
            prop_assert_eq!(zipper.current().depth(), prefix + values.len());

            zipper.step_back_n(values.len()).unwrap();
            prop_assert_eq!(zipper.current_index(), origin);
        }

        #[test]
        fn forward_and_back_round_trips(widths in prop::collection::vec(1usize..5, 1..10), picks in prop::collection::vec(any::<prop::sample::Index>(), 10)) {
            let mut zipper = Zipper::new(0usize);
            for &width in &widths {
                for v in 0..width {
                    zipper.create_branch(v);
                    zipper.step_back().unwrap();
                }
                zipper.step_forward((width - 1) as isize).unwrap();
            }
            zipper.step_back_n(widths.len()).unwrap();
            let origin = zipper.current_index();

            let mut steps = 0;
            for pick in &picks {
                if !zipper.can_step_forward() {
                    break;
                }
                let len = zipper.current().child_count();
                zipper.step_forward(pick.index(len) as isize).unwrap();
                steps += 1;
            }

            zipper.step_back_n(steps).unwrap();
            prop_assert_eq!(zipper.current_index(), origin);
        }

        #[test]
        fn branches_keep_insertion_order(values in prop::collection::vec(any::<u32>(), 0..64)) {
            let mut zipper = Zipper::new(0u32);
            for v in &values {
                zipper.create_branch(*v);
                zipper.step_back().unwrap();
            }
            prop_assert_eq!(zipper.map_branches(|v| *v), values);
        }

        #[test]
        fn fold_is_a_left_fold(values in prop::collection::vec(any::<i64>(), 0..32), init in any::<i64>()) {
            let mut zipper = Zipper::new(0i64);
            for v in &values {
                zipper.create_branch(*v);
                zipper.step_back().unwrap();
            }

            let combine = |v: &i64, acc: i64| acc.wrapping_mul(31).wrapping_add(*v);
            let expected = values.iter().fold(init, |acc, v| combine(v, acc));
            prop_assert_eq!(zipper.fold_children(init, combine), expected);
        }
    }
}
