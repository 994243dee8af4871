//! The nodes of a parsed resource graph.

use std::{
    hash::{Hash, Hasher},
    mem,
    sync::Arc,
};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use uuid::Uuid;

use crate::ResourceId;

mod collections;
pub use collections::{ValueSet, ValueMap};

mod scalar;
pub use scalar::{EmailAddress, Iri, TelephoneNumber, Pattern};

mod temporal;
pub use temporal::Temporal;


/// A node of a resource graph: an object, a literal, or a collection.
///
/// Equality and hashing are structural, so that any `Value`, including nested
/// collections, can be a set element or a map key.  The exceptions:
///
/// * `Object`s compare by resource identity.  Within one document every
///   occurrence of a tag or of a (type, ID) pair yields the same identity.
///
/// * `Float`s compare by bit pattern, so `NaN` equals itself and `0.0` does
///   not equal `-0.0`.
///
/// Collections are shared behind `Arc` and are never mutated once built, so a
/// value that is used as a key stays consistent with its hash.  Cloning a
/// collection `Value` shares the same instance.
#[derive(Clone, Debug)]
pub enum Value {
    /// A resource, which lives in its document's arena
    Object(ResourceId),
    /// `true` or `false`
    Boolean(bool),
    /// A native integer literal, like `123`
    Integer(i64),
    /// A native literal with a fraction or an exponent, like `1.5`
    Float(f64),
    /// An arbitrary-precision integer literal, like `$123`
    BigInteger(BigInt),
    /// An arbitrary-precision literal with a fraction or an exponent, like
    /// `$1.5`
    Decimal(BigDecimal),
    /// A single Unicode scalar value
    Character(char),
    /// A string
    String(String),
    /// A sequence of bytes
    Binary(Vec<u8>),
    /// A UUID
    Uuid(Uuid),
    /// An email address
    EmailAddress(EmailAddress),
    /// An absolute IRI
    Iri(Iri),
    /// An E.164 telephone number
    TelephoneNumber(TelephoneNumber),
    /// One of the temporal shapes
    Temporal(Temporal),
    /// A compiled regular expression
    Regex(Pattern),
    /// An ordered sequence
    List(Arc<Vec<Value>>),
    /// An unordered collection of distinct values
    Set(Arc<ValueSet>),
    /// An association of distinct keys to values
    Map(Arc<ValueMap>),
}

impl Value {
    /// The resource identity, if this is an `Object`.
    #[inline]
    pub fn as_object(&self) -> Option<ResourceId> {
        match self {
            Value::Object(id) => Some(*id),
            _ => None,
        }
    }

    /// The string, if this is a `String`.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this and `other` are the very same shared instance, as opposed
    /// to merely equal.  Only collections and objects have instance identity;
    /// for other values this is plain equality.
    pub fn same_instance(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::List(a), Value::List(b)) => Arc::ptr_eq(a, b),
            (Value::Set(a), Value::Set(b)) => Arc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Arc::ptr_eq(a, b),
            _ => self == other,
        }
    }

    pub(crate) fn list(elems: Vec<Value>) -> Self {
        Value::List(Arc::new(elems))
    }
}


impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;

        match (self, other) {
            (Object(a), Object(b)) => a == b,
            (Boolean(a), Boolean(b)) => a == b,
            (Integer(a), Integer(b)) => a == b,
            (Float(a), Float(b)) => a.to_bits() == b.to_bits(),
            (BigInteger(a), BigInteger(b)) => a == b,
            (Decimal(a), Decimal(b)) => a == b,
            (Character(a), Character(b)) => a == b,
            (String(a), String(b)) => a == b,
            (Binary(a), Binary(b)) => a == b,
            (Uuid(a), Uuid(b)) => a == b,
            (EmailAddress(a), EmailAddress(b)) => a == b,
            (Iri(a), Iri(b)) => a == b,
            (TelephoneNumber(a), TelephoneNumber(b)) => a == b,
            (Temporal(a), Temporal(b)) => a == b,
            (Regex(a), Regex(b)) => a == b,
            (List(a), List(b)) => a == b,
            (Set(a), Set(b)) => a == b,
            (Map(a), Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        use Value::*;

        mem::discriminant(self).hash(state);
        match self {
            Object(id) => id.hash(state),
            Boolean(b) => b.hash(state),
            Integer(i) => i.hash(state),
            Float(f) => f.to_bits().hash(state),
            BigInteger(i) => i.hash(state),
            Decimal(d) => d.hash(state),
            Character(c) => c.hash(state),
            String(s) => s.hash(state),
            Binary(b) => b.hash(state),
            Uuid(u) => u.hash(state),
            EmailAddress(e) => e.hash(state),
            Iri(i) => i.hash(state),
            TelephoneNumber(t) => t.hash(state),
            Temporal(t) => t.hash(state),
            Regex(r) => r.hash(state),
            List(l) => l.hash(state),
            Set(s) => s.hash(state),
            Map(m) => m.hash(state),
        }
    }
}
