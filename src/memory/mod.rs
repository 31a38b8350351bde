//! Index-addressed storage for tree nodes.
//!
//! Nodes never move once they are stored: every relation between nodes is
//! expressed as an index into an [`Arena`], so growing one node's child list
//! can not invalidate a handle to any other node.
pub mod arena;

pub use arena::Arena;

/// A typed index into an [`Arena`].
pub trait EntityIndex: Copy + Eq {
    /// Creates an index from its raw position.
    ///
    /// # Panics
    ///
    /// Panics when `index` does not fit into the backing integer type.
    fn new(index: usize) -> Self {
        Self::try_new(index).expect("index exceeds the range of the index type")
    }

    fn try_new(index: usize) -> Option<Self>;
    fn index(self) -> usize;
}

/// Macro which provides the common implementation of an n-bit entity reference
///
/// Based on [`cranelift_entity`'s `entity_impl!`](https://docs.rs/cranelift-entity/0.89.2/cranelift_entity/macro.entity_impl.html)
#[macro_export]
macro_rules! entity_impl {
    ($entity:ident, $backing:ty) => {
        impl $crate::memory::EntityIndex for $entity {
            #[inline(always)]
            fn try_new(ix: usize) -> Option<Self> {
                <$backing>::try_from(ix).ok().map($entity)
            }

            #[inline(always)]
            fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}
