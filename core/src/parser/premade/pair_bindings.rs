use crate::{
    Value,
    parser::{LabelBindings, LabelKey},
};


/// A [`LabelBindings`] that keeps its bindings as a vector of pairs (2-tuples)
/// in the order they were bound, and looks them up linearly.
///
/// Suitable for documents with few labels, and usable without hashing.
///
/// [`LabelBindings`]: ../trait.LabelBindings.html
#[derive(Clone, Default, Debug)]
pub struct PairLabelBindings {
    /// The bindings, oldest first.
    pub pairs: Vec<(LabelKey, Value)>,
}

impl PairLabelBindings {
    /// Make a new instance with no bindings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LabelBindings for PairLabelBindings {
    #[inline]
    fn resolve(&self, key: &LabelKey) -> Option<&Value> {
        self.pairs.iter().find_map(|(k, v)| if k == key { Some(v) } else { None })
    }

    fn bind(&mut self, key: LabelKey, value: Value) -> Option<Value> {
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => Some(std::mem::replace(v, value)),
            None => {
                self.pairs.push((key, value));
                None
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        let plb = PairLabelBindings::new();
        assert_eq!(plb.resolve(&LabelKey::Alias("a".into())), None);
    }

    #[test]
    fn bind_and_resolve() {
        let mut plb = PairLabelBindings::new();
        assert_eq!(plb.bind(LabelKey::Alias("x".into()), Value::Integer(1)), None);
        assert_eq!(plb.bind(LabelKey::Tag("x".into()), Value::Integer(2)), None);
        assert_eq!(plb.bind(LabelKey::TypeId("T".into(), "x".into()), Value::Integer(3)), None);
        assert_eq!(plb.resolve(&LabelKey::Alias("x".into())), Some(&Value::Integer(1)));
        assert_eq!(plb.resolve(&LabelKey::Tag("x".into())), Some(&Value::Integer(2)));
        assert_eq!(plb.resolve(&LabelKey::TypeId("T".into(), "x".into())),
                   Some(&Value::Integer(3)));
        assert_eq!(plb.resolve(&LabelKey::TypeId("U".into(), "x".into())), None);

        assert_eq!(plb.bind(LabelKey::Alias("x".into()), Value::Integer(4)),
                   Some(Value::Integer(1)));
        assert_eq!(plb.resolve(&LabelKey::Alias("x".into())), Some(&Value::Integer(4)));
        assert_eq!(plb.pairs.len(), 3);
    }
}
