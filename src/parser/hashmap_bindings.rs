use std::{
    collections::{HashMap, hash_map::RandomState},
    hash::BuildHasher,
};

use crate::{
    Value,
    parser::{LabelBindings, LabelKey},
};


/// A [`LabelBindings`] that associates labels with values using a `HashMap`.
///
/// This is the better choice for documents with many labels.
///
/// [`LabelBindings`]: ../../surf_core/parser/trait.LabelBindings.html
#[derive(Clone, Debug)]
pub struct LabelTable<S = RandomState>
    where S: BuildHasher,
{
    /// The `HashMap` of labels bound to values.
    pub hashmap: HashMap<LabelKey, Value, S>,
}

impl<S> LabelTable<S>
    where S: BuildHasher,
{
    /// Given a `HashMap` of our type, make a new instance of `Self` that uses
    /// it for its `hashmap` field.
    ///
    /// This enables using a premade `HashMap`, possibly with a certain capacity
    /// and/or with a different hashing algorithm (as supported by `HashMap`).
    #[inline]
    pub fn new(hashmap: HashMap<LabelKey, Value, S>) -> Self {
        Self { hashmap }
    }
}

impl<S> Default for LabelTable<S>
    where S: BuildHasher + Default,
{
    /// Make a new instance of `Self` using the `HashMap::default()` of our
    /// type.
    #[inline]
    fn default() -> Self {
        Self::new(HashMap::default())
    }
}

impl<S> LabelBindings for LabelTable<S>
    where S: BuildHasher,
{
    #[inline]
    fn resolve(&self, key: &LabelKey) -> Option<&Value> {
        self.hashmap.get(key)
    }

    #[inline]
    fn bind(&mut self, key: LabelKey, value: Value) -> Option<Value> {
        self.hashmap.insert(key, value)
    }
}
