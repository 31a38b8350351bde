use std::{
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use crate::memory::EntityIndex;

/// An append-only arena that hands out stable keys.
///
/// Values are never removed, so a key stays valid for as long as the arena
/// lives, no matter how many values are inserted after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arena<K, V> {
    data: Vec<V>,
    phantom: PhantomData<K>,
}

impl<K, V> Arena<K, V>
where
    K: EntityIndex,
{
    /// Creates an empty [`Arena<K, V>`].
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            phantom: PhantomData,
        }
    }

    /// Returns the number of stored values.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns the key the next inserted value will receive.
    #[inline]
    pub fn next_key(&self) -> K {
        K::new(self.data.len())
    }

    #[inline]
    pub fn contains(&self, key: K) -> bool {
        key.index() < self.data.len()
    }

    /// Stores a value and returns its key.
    ///
    /// # Panics
    ///
    /// Panics when the key type can not address another value.
    pub fn insert(&mut self, value: V) -> K {
        let key = self.next_key();
        self.data.push(value);
        key
    }

    #[inline]
    pub fn get(&self, key: K) -> Option<&V> {
        self.data.get(key.index())
    }

    #[inline]
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.data.get_mut(key.index())
    }
}

impl<K, V> Index<K> for Arena<K, V>
where
    K: EntityIndex,
{
    type Output = V;

    fn index(&self, key: K) -> &Self::Output {
        self.get(key).expect("invalid key")
    }
}

impl<K, V> IndexMut<K> for Arena<K, V>
where
    K: EntityIndex,
{
    fn index_mut(&mut self, key: K) -> &mut Self::Output {
        self.get_mut(key).expect("invalid key")
    }
}

impl<K, V> Default for Arena<K, V>
where
    K: EntityIndex,
{
    fn default() -> Self {
        Self::new()
    }
}
