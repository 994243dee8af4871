//! Used by the integration tests of both the [core](../surf_core/index.html)
//! and the [full](../surf/index.html) crates.  It provides test suites that
//! can be run against any combination of source stream and label bindings, and
//! it uses tricks so that its representation of expected results can be
//! directly compared against parsed values, which refer to their objects only
//! by identity.

use std::fmt::{self, Debug};

use surf_core::*;


pub mod suites;


/// The shape a parsed value is expected to have.
///
/// Objects are compared by their type and properties, recursively, rather
/// than by identity.  The kinds of values that this crate cannot construct
/// without depending on more crates are compared by their text.
#[derive(Debug)]
pub enum Expected {
    /// The document has no root.
    Empty,
    /// Equal to the value.
    Is(Value),
    /// An object with the type and the properties, in order.
    Object(Option<&'static str>, Vec<(&'static str, Expected)>),
    /// A list of the elements, in order.
    List(Vec<Expected>),
    /// A set of the elements, in order of first occurrence.
    Set(Vec<Expected>),
    /// A map of the entries, in order of first occurrence.
    Map(Vec<(Expected, Expected)>),
    /// An arbitrary-precision integer that displays as the text.
    BigInteger(&'static str),
    /// An arbitrary-precision decimal that displays as the text.
    Decimal(&'static str),
    /// A UUID in lowercase hyphenated form.
    Uuid(&'static str),
    /// An email address that displays as the text.
    EmailAddress(&'static str),
    /// A temporal that displays as the text, without the `@`.
    Temporal(&'static str),
    /// A regular expression with the pattern text.
    Regex(&'static str),
}

impl Expected {
    fn matches(&self, value: &Value, resources: &[Resource]) -> bool {
        use Expected::*;

        fn all<'v, I>(expected: &[Expected], actual: I, resources: &[Resource]) -> bool
            where I: ExactSizeIterator<Item = &'v Value>,
        {
            expected.len() == actual.len()
                && expected.iter().zip(actual).all(|(e, a)| e.matches(a, resources))
        }

        match (self, value) {
            (Is(expected), actual) => expected == actual,
            (Object(type_name, properties), Value::Object(id)) => {
                match resources.get(id.index()) {
                    Some(resource) => {
                        resource.type_name() == *type_name
                            && resource.properties().len() == properties.len()
                            && properties.iter().zip(resource.properties()).all(
                                |((eh, ev), (ah, av))| *eh == ah.as_str()
                                                   && ev.matches(av, resources))
                    }
                    None => false,
                }
            }
            (List(expected), Value::List(actual)) => all(expected, actual.iter(), resources),
            (Set(expected), Value::Set(actual)) => all(expected, actual.iter(), resources),
            (Map(expected), Value::Map(actual)) => {
                expected.len() == actual.len()
                    && expected.iter().zip(actual.iter()).all(
                        |((ek, ev), (ak, av))| ek.matches(ak, resources)
                                               && ev.matches(av, resources))
            }
            (BigInteger(text), Value::BigInteger(n)) => n.to_string() == *text,
            (Decimal(text), Value::Decimal(d)) => d.to_string() == *text,
            (Uuid(text), Value::Uuid(u)) => u.hyphenated().to_string() == *text,
            (EmailAddress(text), Value::EmailAddress(e)) => e.to_string() == *text,
            (Temporal(text), Value::Temporal(t)) => t.to_string() == *text,
            (Regex(text), Value::Regex(p)) => p.as_str() == *text,
            _ => false,
        }
    }
}

/// The root of a parsed document, with the resources its objects refer to.
pub struct Actual<'d> {
    value: Option<&'d Value>,
    resources: &'d [Resource],
}

impl<'d> Actual<'d> {
    /// The root of `document`.
    pub fn root<LB>(document: &'d Document<LB>) -> Self
        where LB: LabelBindings,
    {
        Self { value: document.root(), resources: document.resources() }
    }
}

impl Debug for Actual<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actual")
         .field("value", &self.value)
         .field("resources", &self.resources)
         .finish()
    }
}

/// This allows `Expected` to be compared with parsed values, in our special
/// ways.
impl PartialEq<Actual<'_>> for Expected {
    fn eq(&self, other: &Actual<'_>) -> bool {
        match (self, other.value) {
            (Expected::Empty, None) => true,
            (expected, Some(value)) => expected.matches(value, other.resources),
            _ => false,
        }
    }
}


/// Shorthand for an expected integer.
pub fn int(n: i64) -> Expected {
    Expected::Is(Value::Integer(n))
}

/// Shorthand for an expected string.
pub fn string(s: &str) -> Expected {
    Expected::Is(Value::String(s.into()))
}

/// Shorthand for an expected object.
pub fn object(type_name: Option<&'static str>, properties: Vec<(&'static str, Expected)>)
              -> Expected
{
    Expected::Object(type_name, properties)
}
