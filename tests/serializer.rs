//! Checks that serialized values parse back to equal values, both for
//! generated trees of literals and collections and for resource graphs.

use std::sync::Arc;

use proptest::{collection::vec, prelude::*};

use surf::{
    Value, ValueMap, ValueSet,
    common::inmem::parse_str,
    ser::{self, SerializeError},
};


/// The value of a document made of one literal.
fn read(text: String) -> Value {
    parse_str(&text).unwrap().root().cloned().unwrap()
}

/// Regex literal text: atoms that stay valid in any order, including escape
/// pairs next to the closing slash.
fn regex_text() -> impl Strategy<Value = String> {
    let atom = prop_oneof![
        Just("a"), Just("x+"), Just("."), Just(r"\d"), Just(r"\\"), Just(r"\/"),
        Just(r"[\/a]"), Just(r"\\+"), Just(r"\.\/"),
    ];
    vec(atom, 1 .. 6).prop_map(|atoms| format!("/{}/", atoms.concat()))
}

/// The kinds whose values are most easily had by reading generated text.
fn textual() -> impl Strategy<Value = Value> {
    prop_oneof![
        "\\$-?[1-9][0-9]{0,30}",
        "\\$-?[0-9]{1,12}\\.[0-9]{1,12}",
        "&[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}",
        "<https://[a-z]{1,8}\\.example(/[a-z0-9]{1,6}){0,3}>",
        "<urn:[a-z]{1,8}:[a-z0-9]{1,8}>",
        "\\^[a-z0-9]{1,8}(\\.[a-z0-9_+-]{1,8})?@[a-z]{1,8}(-[a-z]{1,4})?\\.(com|org)",
        "\\+[0-9]{1,15}",
        "@[12][0-9]{3}(-(0[1-9]|1[0-2]))?",
        "@--(0[1-9]|1[0-2])-(0[1-9]|1[0-9]|2[0-8])",
        "@([01][0-9]|2[0-3]):[0-5][0-9](:[0-5][0-9](\\.[0-9]{1,9})?)?(Z|[+-]0[0-9]:[0-5][0-9])?",
        "@[12][0-9]{3}-(0[1-9]|1[0-2])-(0[1-9]|1[0-9]|2[0-8])\
         (T([01][0-9]|2[0-3]):[0-5][0-9](:[0-5][0-9](\\.[0-9]{1,9})?)?\
         (Z|[+-](0[0-9]|1[0-3]):[0-5][0-9])?)?",
        "@[12][0-9]{3}-(0[1-9]|1[0-2])-(0[1-9]|1[0-9]|2[0-8])T([01][0-9]|2[0-3]):[0-5][0-9]\
         (Z|[+-](0[0-9]|1[0-3]):[0-5][0-9])\\[(America/Los_Angeles|Europe/Paris|Etc/UTC)\\]",
        regex_text(),
    ].prop_map(read)
}

fn literal() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Boolean),
        any::<i64>().prop_map(Value::Integer),
        any::<f64>().prop_filter("SURF has no non-finite floats", |f| f.is_finite())
                    .prop_map(Value::Float),
        any::<char>().prop_map(Value::Character),
        any::<String>().prop_map(Value::String),
        vec(any::<u8>(), 0 .. 16).prop_map(Value::Binary),
        textual(),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    literal().prop_recursive(4, 48, 6, |inner| prop_oneof![
        vec(inner.clone(), 0 .. 6).prop_map(|v| Value::List(Arc::new(v))),
        vec(inner.clone(), 0 .. 6)
            .prop_map(|v| Value::Set(Arc::new(v.into_iter().collect::<ValueSet>()))),
        vec((inner.clone(), inner), 0 .. 6)
            .prop_map(|v| Value::Map(Arc::new(v.into_iter().collect::<ValueMap>()))),
    ])
}

proptest! {
    #[test]
    fn values_round_trip(v in value()) {
        let text = ser::value_to_string(&v, &[]).unwrap();
        let doc = parse_str(&text).unwrap();
        prop_assert_eq!(doc.root(), Some(&v), "text: {}", text);
    }

    #[test]
    fn strings_round_trip(s in "\\PC*") {
        let text = ser::value_to_string(&Value::String(s.clone()), &[]).unwrap();
        let doc = parse_str(&text).unwrap();
        prop_assert_eq!(doc.root(), Some(&Value::String(s)));
    }
}


/// Serializing what was parsed from serialized text gives the same text.
fn fixpoint(input: &str) -> String {
    let first = ser::to_string(&parse_str(input).unwrap()).unwrap();
    let second = ser::to_string(&parse_str(&first).unwrap()).unwrap();
    assert_eq!(first, second, "input: {:?}", input);
    first
}

#[test]
fn graphs() {
    for input in &["*",
                   "*Point:x=1,y=-2.5;",
                   "[|x|*:a=1;, |x|, *]",
                   "[|<urn:a>|*T:v=1;, |<urn:a>|, |<urn:b>|]",
                   "{*K : [|\"1\"|*User:n=\"a\";, |\"1\"|*User], \"k\": #[1, 2]}",
                   "|top|*Tree:kids=[*Tree:up=|top|;, *Tree:up=|top|;];",
                   "*Contact:\n  email = ^jo@example.com\n  tel = +15550100\n  \
                    home = <https://example.com/~jo>\n  id = &5ce1a0d6-23a0-4b0a-8f12-1c0a83f6e0b4\n;"]
    {
        let _ = fixpoint(input);
    }
}

#[test]
fn cycle_survives() {
    let text = fixpoint("|<urn:a>|*Node:next=*Node:next=|<urn:a>|;;");
    let doc = parse_str(&text).unwrap();
    let a = doc.find_by_tag("urn:a").unwrap();
    let b = doc[a].property("next").and_then(Value::as_object).unwrap();
    assert_ne!(a, b);
    assert_eq!(doc[b].property("next"), Some(&Value::Object(a)));

    let text = fixpoint("|me|*Node:self=|me|;");
    let doc = parse_str(&text).unwrap();
    let me = doc.root().and_then(Value::as_object).unwrap();
    assert_eq!(doc[me].property("self"), Some(&Value::Object(me)));
}

#[test]
fn literals_fixpoint() {
    for input in &["$-123456789012345678901234567890", "$1.25", "$1e3", "'\\u0000'",
                   "@2017", "@--12-25", "@2017-02-12T23:29:18.829Z", "@15:29:18.5+05:30",
                   "@2017-02-12T15:29:18-08:00[America/Los_Angeles]", "/[a-z]+\\/\\d/",
                   "/a\\\\/", "/\\\\\\//",
                   "<^jo@example.com>"]
    {
        let _ = fixpoint(input);
    }
}

#[test]
fn dangling_resource() {
    let doc = parse_str("*:a=1;").unwrap();
    let (root, mut resources, _) = doc.into_parts();
    let root = root.unwrap();
    assert!(ser::value_to_string(&root, &resources).is_ok());
    resources.clear();
    assert_eq!(ser::value_to_string(&root, &resources),
               Err(SerializeError::DanglingResource { index: 0 }));
}
