//! Exact bidirectional map.

use std::{collections::HashMap, hash::Hash};

use indexmap::IndexMap;

/// A 1:1 association that can be queried from either side.
///
/// Keys are unique and values are unique. Setting a pair evicts any prior
/// pair that shared either the key or the value, so `get(k) == Some(v)`
/// and `get_key(v) == Some(k)` always hold together.
///
/// Iteration follows insertion order of the forward side. Overwriting the
/// value of an existing key keeps the key's position.
///
/// # Example
///
/// ```
/// use specgen_core::BiMap;
///
/// let mut names = BiMap::new();
/// names.set("ref:Pet", "Pet");
/// names.set("ref:Owner", "Owner");
///
/// assert_eq!(names.get(&"ref:Pet"), Some(&"Pet"));
/// assert_eq!(names.get_key(&"Owner"), Some(&"ref:Owner"));
/// ```
#[derive(Debug, Clone)]
pub struct BiMap<K, V> {
    forward: IndexMap<K, V>,
    reverse: HashMap<V, K>,
}

impl<K, V> BiMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            forward: IndexMap::new(),
            reverse: HashMap::new(),
        }
    }

    /// Insert a pair, removing any prior pair that shared `key` or `value`.
    pub fn set(&mut self, key: K, value: V) -> &mut Self {
        if let Some(previous_key) = self.reverse.get(&value)
            && *previous_key != key
        {
            let previous_key = previous_key.clone();
            self.forward.shift_remove(&previous_key);
        }

        if let Some(previous_value) = self.forward.insert(key.clone(), value.clone())
            && previous_value != value
        {
            self.reverse.remove(&previous_value);
        }

        self.reverse.insert(value, key);
        self
    }

    /// Look up the value for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.forward.get(key)
    }

    /// Look up the key for `value`.
    pub fn get_key(&self, value: &V) -> Option<&K> {
        self.reverse.get(value)
    }

    /// Remove the pair owning `key`. Returns whether a pair existed.
    pub fn delete(&mut self, key: &K) -> bool {
        match self.forward.shift_remove(key) {
            Some(value) => {
                self.reverse.remove(&value);
                true
            }
            None => false,
        }
    }

    /// Remove the pair owning `value`. Returns whether a pair existed.
    pub fn delete_value(&mut self, value: &V) -> bool {
        match self.reverse.remove(value) {
            Some(key) => {
                self.forward.shift_remove(&key);
                true
            }
            None => false,
        }
    }

    pub fn has_key(&self, key: &K) -> bool {
        self.forward.contains_key(key)
    }

    pub fn has_value(&self, value: &V) -> bool {
        self.reverse.contains_key(value)
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.forward.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.forward.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.forward.values()
    }
}

impl<K, V> Default for BiMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FromIterator<(K, V)> for BiMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.set(key, value);
        }
        map
    }
}

impl<'a, K, V> IntoIterator for &'a BiMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = indexmap::map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.forward.iter()
    }
}
