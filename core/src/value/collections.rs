use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    iter::FromIterator,
    ops::Deref,
};

use indexmap::{IndexMap, IndexSet};

use super::Value;


fn hash_one<T: Hash + ?Sized>(t: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    t.hash(&mut hasher);
    hasher.finish()
}


/// An unordered collection of distinct `Value`s.
///
/// Iteration yields the elements in the order they were first inserted, but
/// equality and hashing ignore order, so `#[1, 2]` equals `#[2, 1]`.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct ValueSet(IndexSet<Value>);

impl ValueSet {
    /// Make an empty set.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element.  Returns whether it was not already present.
    #[inline]
    pub fn insert(&mut self, value: Value) -> bool {
        self.0.insert(value)
    }
}

impl Deref for ValueSet {
    type Target = IndexSet<Value>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<Value> for ValueSet {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Order-independent: the sum of the elements' own hashes.
impl Hash for ValueSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let sum = self.0.iter()
                        .fold(0_u64, |acc, elem| acc.wrapping_add(hash_one(elem)));
        state.write_usize(self.0.len());
        state.write_u64(sum);
    }
}


/// An association of distinct `Value` keys to `Value`s.
///
/// Like `ValueSet`, iteration follows insertion order while equality and
/// hashing ignore it.  Inserting an existing key replaces its value.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct ValueMap(IndexMap<Value, Value>);

impl ValueMap {
    /// Make an empty map.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `value` with `key`, returning the value that was replaced.
    #[inline]
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }
}

impl Deref for ValueMap {
    type Target = IndexMap<Value, Value>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<(Value, Value)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Order-independent: the sum of the entries' own hashes.
impl Hash for ValueMap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let sum = self.0.iter()
                        .fold(0_u64, |acc, entry| acc.wrapping_add(hash_one(&entry)));
        state.write_usize(self.0.len());
        state.write_u64(sum);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_order_independent() {
        let a: ValueSet = vec![Value::Integer(1), Value::Integer(2)].into_iter().collect();
        let b: ValueSet = vec![Value::Integer(2), Value::Integer(1)].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(hash_one(&a), hash_one(&b));
        assert_eq!(a.iter().next(), Some(&Value::Integer(1)));
    }

    #[test]
    fn set_dedup() {
        let mut s = ValueSet::new();
        assert!(s.insert(Value::String("x".into())));
        assert!(!s.insert(Value::String("x".into())));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn map_order_independent() {
        let a: ValueMap = vec![(Value::Integer(1), Value::Boolean(true)),
                               (Value::Integer(2), Value::Boolean(false))]
            .into_iter().collect();
        let b: ValueMap = vec![(Value::Integer(2), Value::Boolean(false)),
                               (Value::Integer(1), Value::Boolean(true))]
            .into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(hash_one(&a), hash_one(&b));

        let c: ValueMap = vec![(Value::Integer(2), Value::Boolean(true)),
                               (Value::Integer(1), Value::Boolean(true))]
            .into_iter().collect();
        assert_ne!(a, c);
    }

    #[test]
    fn map_last_write_wins() {
        let mut m = ValueMap::new();
        assert_eq!(m.insert(Value::Character('k'), Value::Integer(1)), None);
        assert_eq!(m.insert(Value::Character('k'), Value::Integer(2)),
                   Some(Value::Integer(1)));
        assert_eq!(m.get(&Value::Character('k')), Some(&Value::Integer(2)));
    }
}
