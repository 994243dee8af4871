//! Writing values back out as SURF text.
//!
//! The output is compact: no filler, and one line.  Parsing it yields a value
//! that equals the original, with the same sharing of resources.
//!
//! Resources are written with their label the first time they are reached,
//! with their property block, and as bare references every time after that:
//!
//! * A tagged resource is written `|<tag>|*Type:…;` and then `|<tag>|`.
//!
//! * A resource with an ID is written `|"id"|*Type:…;` and then `|"id"|*Type`.
//!
//! * An unlabeled resource that is reached more than once, including through a
//!   cycle, is given a generated alias `|rN|`.  Other unlabeled resources are
//!   written inline without a label.
//!
//! Aliases of non-object values are not preserved.  Such values are written in
//! full wherever they occur, which parses to equal values.

use std::{
    collections::{HashMap, HashSet},
    fmt::Write as _,
};

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use thiserror::Error;

use crate::{
    Document, Resource, ResourceId, Value,
    parser::{CharClassifier, DefaultCharClassifier, LabelBindings},
    syntax::*,
};


/// The ways that a value cannot be written as SURF text.
#[derive(Error, Clone, PartialEq, Debug)]
pub enum SerializeError {
    /// SURF has no literal for infinities and NaN.
    #[error("non-finite float `{0}` has no SURF form")]
    NonFiniteFloat(f64),
    /// A property or type name is not a valid handle.
    #[error("`{handle}` is not a valid handle")]
    InvalidHandle {
        /// The offending name
        handle: String,
    },
    /// A value refers to a resource that is not among the given resources.
    #[error("resource #{index} does not exist")]
    DanglingResource {
        /// The `ResourceId::index` of the missing resource
        index: usize,
    },
}


/// Write the root of `document` as SURF text.  A document with no root is
/// written as the empty string.
pub fn to_string<LB>(document: &Document<LB>) -> Result<String, SerializeError>
    where LB: LabelBindings,
{
    match document.root() {
        Some(root) => value_to_string(root, document.resources()),
        None => Ok(String::new()),
    }
}

/// Write `value` as SURF text, looking up the objects it refers to in
/// `resources`.
pub fn value_to_string(value: &Value, resources: &[Resource]) -> Result<String, SerializeError> {
    let mut ser = Serializer {
        resources,
        references: HashMap::new(),
        aliases: HashMap::new(),
        written: HashSet::new(),
        out: String::new(),
    };
    ser.count(value)?;
    ser.write_value(value)?;
    Ok(ser.out)
}


struct Serializer<'r> {
    resources: &'r [Resource],
    /// How many times each resource is reached.
    references: HashMap<ResourceId, usize>,
    aliases: HashMap<ResourceId, String>,
    written: HashSet<ResourceId>,
    out: String,
}

fn lookup(resources: &[Resource], id: ResourceId) -> Result<&Resource, SerializeError> {
    resources.get(id.index()).ok_or(SerializeError::DanglingResource { index: id.index() })
}

impl Serializer<'_> {
    fn count(&mut self, value: &Value) -> Result<(), SerializeError> {
        match value {
            Value::Object(id) => {
                let resource = lookup(self.resources, *id)?;
                let seen = self.references.entry(*id).or_insert(0);
                *seen += 1;
                if *seen == 1 {
                    for value in resource.properties().values() {
                        self.count(value)?;
                    }
                }
            }
            Value::List(elems) => for elem in elems.iter() { self.count(elem)?; },
            Value::Set(elems) => for elem in elems.iter() { self.count(elem)?; },
            Value::Map(entries) => for (key, value) in entries.iter() {
                self.count(key)?;
                self.count(value)?;
            },
            _ => {}
        }
        Ok(())
    }

    fn write_value(&mut self, value: &Value) -> Result<(), SerializeError> {
        match value {
            Value::Object(id) => self.write_object(*id)?,
            Value::Boolean(b) => self.out.push_str(if *b { TRUE } else { FALSE }),
            Value::Integer(n) => self.write(format_args!("{}", n)),
            Value::Float(f) => {
                if !f.is_finite() {
                    return Err(SerializeError::NonFiniteFloat(*f));
                }
                // Debug always has a `.` or an exponent, and round-trips.
                self.write(format_args!("{:?}", f));
            }
            Value::BigInteger(n) => self.write(format_args!("{}{}", DECIMAL_BEGIN, n)),
            Value::Decimal(d) => {
                let text = d.to_string();
                self.out.push(DECIMAL_BEGIN);
                self.out.push_str(&text);
                if !text.contains(|ch| ch == '.' || ch == 'e' || ch == 'E') {
                    self.out.push_str(".0");
                }
            }
            Value::Character(ch) => {
                self.out.push(CHARACTER_DELIMITER);
                self.write_escaped(*ch, CHARACTER_DELIMITER);
                self.out.push(CHARACTER_DELIMITER);
            }
            Value::String(s) => self.write_string(s),
            Value::Binary(bytes) => {
                self.out.push(BINARY_BEGIN);
                self.out.push_str(&URL_SAFE_NO_PAD.encode(bytes));
            }
            Value::Uuid(uuid) => self.write(format_args!("{}{}", UUID_BEGIN, uuid.hyphenated())),
            Value::EmailAddress(email) => self.write(format_args!("{}{}", EMAIL_ADDRESS_BEGIN,
                                                                  email)),
            Value::Iri(iri) => self.write(format_args!("{}{}{}", IRI_BEGIN, iri, IRI_END)),
            Value::TelephoneNumber(tel) => self.out.push_str(tel.as_str()),
            Value::Temporal(t) => self.write(format_args!("{}{}", TEMPORAL_BEGIN, t)),
            Value::Regex(pattern) => {
                self.out.push(REGEX_DELIMITER);
                // Escape pairs pass through whole.  A `\/` pair reads back as
                // `/`, which matches the same.
                let mut chars = pattern.as_str().chars();
                while let Some(ch) = chars.next() {
                    match ch {
                        REGEX_DELIMITER => {
                            self.out.push(ESCAPE);
                            self.out.push(ch);
                        }
                        ESCAPE => {
                            self.out.push(ESCAPE);
                            self.out.extend(chars.next());
                        }
                        ch => self.out.push(ch),
                    }
                }
                self.out.push(REGEX_DELIMITER);
            }
            Value::List(elems) => {
                self.out.push(LIST_BEGIN);
                self.write_sequence(elems.iter())?;
                self.out.push(LIST_END);
            }
            Value::Set(elems) => {
                self.out.push(SET_MARKER);
                self.out.push(LIST_BEGIN);
                self.write_sequence(elems.iter())?;
                self.out.push(LIST_END);
            }
            Value::Map(entries) => {
                self.out.push(MAP_BEGIN);
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        self.out.push(SEQUENCE_DELIMITER);
                    }
                    self.write_value(key)?;
                    // A `:` right after an object would begin its property block.
                    if let Value::Object(_) = key {
                        self.out.push(' ');
                    }
                    self.out.push(ENTRY_KEY_VALUE_DELIMITER);
                    self.write_value(value)?;
                }
                self.out.push(MAP_END);
            }
        }
        Ok(())
    }

    fn write_sequence<'v, I>(&mut self, elems: I) -> Result<(), SerializeError>
        where I: Iterator<Item = &'v Value>,
    {
        for (i, elem) in elems.enumerate() {
            if i > 0 {
                self.out.push(SEQUENCE_DELIMITER);
            }
            self.write_value(elem)?;
        }
        Ok(())
    }

    fn write_object(&mut self, id: ResourceId) -> Result<(), SerializeError> {
        let resource = lookup(self.resources, id)?;
        let first = self.written.insert(id);

        if let Some(tag) = resource.tag() {
            self.write(format_args!("{}{}{}{}{}", LABEL_DELIMITER, IRI_BEGIN, tag, IRI_END,
                                    LABEL_DELIMITER));
            if !first {
                return Ok(());
            }
        } else if let Some(local_id) = resource.id() {
            self.out.push(LABEL_DELIMITER);
            self.write_string(local_id);
            self.out.push(LABEL_DELIMITER);
            if !first {
                self.out.push(OBJECT_BEGIN);
                return self.write_type(resource);
            }
        } else if self.references.get(&id).map_or(false, |&n| n > 1) {
            let next = self.aliases.len() + 1;
            let alias = self.aliases.entry(id).or_insert_with(|| format!("r{}", next));
            self.out.push(LABEL_DELIMITER);
            self.out.push_str(alias);
            self.out.push(LABEL_DELIMITER);
            if !first {
                return Ok(());
            }
        }

        self.out.push(OBJECT_BEGIN);
        self.write_type(resource)?;
        if !resource.properties().is_empty() {
            self.out.push(PROPERTIES_BEGIN);
            for (i, (handle, value)) in resource.properties().iter().enumerate() {
                if i > 0 {
                    self.out.push(SEQUENCE_DELIMITER);
                }
                self.write_handle(handle)?;
                self.out.push(PROPERTY_VALUE_DELIMITER);
                self.write_value(value)?;
            }
            self.out.push(PROPERTIES_END);
        }
        Ok(())
    }

    fn write_type(&mut self, resource: &Resource) -> Result<(), SerializeError> {
        match resource.type_name() {
            Some(type_name) => self.write_handle(type_name),
            None => Ok(()),
        }
    }

    fn write_handle(&mut self, handle: &str) -> Result<(), SerializeError> {
        if !is_handle(handle) {
            return Err(SerializeError::InvalidHandle { handle: handle.into() });
        }
        self.out.push_str(handle);
        Ok(())
    }

    fn write_string(&mut self, s: &str) {
        self.out.push(STRING_DELIMITER);
        for ch in s.chars() {
            self.write_escaped(ch, STRING_DELIMITER);
        }
        self.out.push(STRING_DELIMITER);
    }

    fn write_escaped(&mut self, ch: char, delimiter: char) {
        match ch {
            '\\' => self.out.push_str("\\\\"),
            '\u{8}' => self.out.push_str("\\b"),
            '\u{C}' => self.out.push_str("\\f"),
            '\n' => self.out.push_str("\\n"),
            '\r' => self.out.push_str("\\r"),
            '\t' => self.out.push_str("\\t"),
            '\u{B}' => self.out.push_str("\\v"),
            c if c == delimiter => {
                self.out.push(ESCAPE);
                self.out.push(c);
            }
            c if c.is_control() => {
                let mut units = [0; 2];
                for unit in c.encode_utf16(&mut units) {
                    self.write(format_args!("\\u{:04X}", unit));
                }
            }
            c => self.out.push(c),
        }
    }

    fn write(&mut self, args: std::fmt::Arguments<'_>) {
        // Writing to a `String` cannot fail.
        let _ = self.out.write_fmt(args);
    }
}


/// Whether `s` is a handle by the default classification.
fn is_handle(s: &str) -> bool {
    let classifier = DefaultCharClassifier;
    let mut segments = s.split(HANDLE_SEGMENT_DELIMITER);
    let first_ok = segments.next().map_or(false, |first| {
        first.chars().next().map_or(false, |c| classifier.is_handle_begin(c))
            && first.chars().all(|c| classifier.is_handle_char(c))
    });
    first_ok && segments.all(|seg| !seg.is_empty()
                                   && seg.chars().all(|c| classifier.is_handle_char(c)))
}
