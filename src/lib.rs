//! A mutable N-ary tree with a zipper cursor.
//!
//! A [`Zipper`] owns a [`Tree`] and a position inside it. The cursor descends by
//! creating or choosing branches and retreats toward the root one parent at a
//! time. Nodes are stored in an append-only arena and refer to each other by
//! [`NodeIndex`], so appending children never invalidates a position.
//!
//! # Example
//!
//! ```
//! use treezipper::{StepError, Zipper};
//!
//! let mut zipper = Zipper::new("root");
//! zipper.create_branch("a");
//! zipper.create_branch("a.0");
//! zipper.step_back_n(2).unwrap();
//! zipper.create_branch("b");
//! zipper.step_back().unwrap();
//!
//! assert_eq!(zipper.map_branches(|v| v.len()), vec![1, 1]);
//! assert_eq!(zipper.step_back(), Err(StepError::AtRoot));
//! ```

pub mod memory;
pub mod node;
pub mod tree;
pub mod zipper;

pub use node::{Children, NodeRef};
pub use tree::Tree;
pub use zipper::{StepError, Zipper};

/// Handle of a node inside a [`Tree`].
///
/// A handle is a position, not an owner: it stays valid for the lifetime of
/// the tree that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(u32);

crate::entity_impl!(NodeIndex, u32);
