//! Suites of tests applied across multiple crates


use super::*;

use surf_core::parser::DEFAULT_MAX_DEPTH;


macro_rules! test {
    ($parse:ident: $input:expr =>! $kind:pat, $line:expr, $column:expr)
        =>
    {match $parse($input) {
        Err(SyntaxError { kind: $kind, pos }) =>
            assert_eq!((pos.line, pos.column), ($line, $column), "input: {:?}", $input),
        Err(e) => panic!("input: {:?}: wrong error: {:?}", $input, e),
        Ok(_) => panic!("input: {:?}: parsed but should fail", $input),
    }};

    ($parse:ident: $input:expr =>! $kind:pat)
        =>
    {match $parse($input) {
        Err(SyntaxError { kind: $kind, .. }) => {}
        Err(e) => panic!("input: {:?}: wrong error: {:?}", $input, e),
        Ok(_) => panic!("input: {:?}: parsed but should fail", $input),
    }};

    ($parse:ident: $input:expr => $expected:expr)
        =>
    {match $parse($input) {
        Ok(doc) => assert_eq!($expected, Actual::root(&doc), "input: {:?}", $input),
        Err(e) => panic!("input: {:?}: {}", $input, e),
    }};
}


/// The literal forms, each alone as the root of a document.
pub fn test_suite0<LB, F>(parse: F)
    where LB: LabelBindings,
          F: Fn(&str) -> Result<Document<LB>, SyntaxError>,
{
    use Expected::*;
    use ErrorKind::*;

    let tel = |digits| Is(Value::TelephoneNumber(TelephoneNumber::from_digits(digits)
                                                      .unwrap()));
    let iri = |text| Is(Value::Iri(Iri::parse(text).unwrap()));

    // Booleans
    test!(parse: "true" => Is(Value::Boolean(true)));
    test!(parse: "false" => Is(Value::Boolean(false)));
    test!(parse: "tru" =>! InvalidBoolean, 1, 1);
    test!(parse: "truest" =>! InvalidBoolean, 1, 1);

    // Numbers
    test!(parse: "0" => int(0));
    test!(parse: "-12" => int(-12));
    test!(parse: "9223372036854775807" => int(i64::MAX));
    test!(parse: "9223372036854775808" =>! IntegerOverflow{..}, 1, 1);
    test!(parse: "1.5" => Is(Value::Float(1.5)));
    test!(parse: "-2.5e3" => Is(Value::Float(-2500.0)));
    test!(parse: "1E2" => Is(Value::Float(100.0)));
    test!(parse: "1e-1" => Is(Value::Float(0.1)));
    test!(parse: "$123" => BigInteger("123"));
    test!(parse: "$-7" => BigInteger("-7"));
    test!(parse: "$123456789012345678901234567890" => BigInteger("123456789012345678901234567890"));
    test!(parse: "$1.50" => Decimal("1.50"));
    test!(parse: "[1x]" =>! UnexpectedChar{found: 'x', ..}, 1, 3);
    test!(parse: "[-]" =>! InvalidNumber);
    test!(parse: "1e400" =>! InvalidNumber, 1, 1);
    test!(parse: "[-1e400]" =>! InvalidNumber, 1, 2);

    // Characters and strings
    test!(parse: "'a'" => Is(Value::Character('a')));
    test!(parse: r"'\''" => Is(Value::Character('\'')));
    test!(parse: r"'\u00e9'" => Is(Value::Character('é')));
    test!(parse: "''" =>! InvalidCharacter);
    test!(parse: "'ab'" =>! InvalidCharacter);
    test!(parse: r#""""# => string(""));
    test!(parse: r#""a\"b""# => string("a\"b"));
    test!(parse: r#""\\\/\b\f\n\r\t\v""# => string("\\/\u{8}\u{c}\n\r\t\u{b}"));
    test!(parse: r#""\uD83D\uDE00""# => string("😀"));
    test!(parse: "\"two\nlines\"" => string("two\nlines"));
    test!(parse: r#""\q""# =>! InvalidEscape{found: 'q'}, 1, 3);
    test!(parse: r#""\u00""# =>! InvalidUnicodeEscape);
    test!(parse: r#""\uD83D""# =>! UnpairedSurrogate{code: 0xD83D});
    test!(parse: "\"abc" =>! UnexpectedEnd{..});

    // Binary, UUIDs, telephone numbers, email addresses
    test!(parse: "%" => Is(Value::Binary(vec![])));
    test!(parse: "%Zm9vYg" => Is(Value::Binary(b"foob".to_vec())));
    test!(parse: "%Zm9vY" =>! InvalidBinary{..});
    test!(parse: "&5CE1A0D6-23A0-4B0A-8F12-1C0A83F6E0B4"
                 => Uuid("5ce1a0d6-23a0-4b0a-8f12-1c0a83f6e0b4"));
    test!(parse: "&5ce1a0d6" =>! InvalidUuid{..});
    test!(parse: "+12015550123" => tel("12015550123"));
    test!(parse: "+" =>! InvalidTelephoneNumber);
    test!(parse: "+1234567890123456" =>! InvalidTelephoneNumber);
    test!(parse: "^jdoe@example.com" => EmailAddress("jdoe@example.com"));
    test!(parse: "^a.b@[192.168.0.1]" => EmailAddress("a.b@[192.168.0.1]"));
    test!(parse: "^@example.com" =>! InvalidEmailAddress);

    // IRIs
    test!(parse: "<https://example.com/a?b#c>" => iri("https://example.com/a?b#c"));
    test!(parse: "<urn:isbn:0451450523>" => iri("urn:isbn:0451450523"));
    test!(parse: "<^jdoe@example.com>" => iri("mailto:jdoe@example.com"));
    test!(parse: "<+12015550123>" => iri("tel:+12015550123"));
    test!(parse: "<&5CE1A0D6-23A0-4B0A-8F12-1C0A83F6E0B4>"
                 => iri("urn:uuid:5ce1a0d6-23a0-4b0a-8f12-1c0a83f6e0b4"));
    test!(parse: "<relative/path>" =>! InvalidIri{..});

    // Temporals
    test!(parse: "@2017" => Temporal("2017"));
    test!(parse: "@2017-02" => Temporal("2017-02"));
    test!(parse: "@--02-29" => Temporal("--02-29"));
    test!(parse: "@2017-02-12" => Temporal("2017-02-12"));
    test!(parse: "@15:29" => Temporal("15:29:00"));
    test!(parse: "@2017-02-12T23:29:18.829Z" => Temporal("2017-02-12T23:29:18.829Z"));
    test!(parse: "@2017-02-12T15:29:18-08:00" => Temporal("2017-02-12T15:29:18-08:00"));
    test!(parse: "@2017-02-12T15:29:18-08:00[America/Los_Angeles]"
                 => Temporal("2017-02-12T15:29:18-08:00[America/Los_Angeles]"));
    test!(parse: "@2017-13" =>! InvalidTemporal);

    // Regular expressions
    test!(parse: "/a+b/" => Regex("a+b"));
    test!(parse: r"/\d{3}\/x/" => Regex(r"\d{3}/x"));
    test!(parse: "/[/" =>! InvalidRegex{..});
}


/// Objects, collections, separators, filler, and the errors of their
/// structure.
pub fn test_suite1<LB, F>(parse: F)
    where LB: LabelBindings,
          F: Fn(&str) -> Result<Document<LB>, SyntaxError>,
{
    use Expected::*;
    use ErrorKind::*;

    // Empty documents and filler
    test!(parse: "" => Empty);
    test!(parse: " \t\n\r\n" => Empty);
    test!(parse: "! only a comment" => Empty);
    test!(parse: "\n ! comment\n  1 ! trailing\n" => int(1));

    // Objects
    test!(parse: "*" => object(None, vec![]));
    test!(parse: "*Point" => object(Some("Point"), vec![]));
    test!(parse: "*Point:x=1,y=2;" => object(Some("Point"), vec![("x", int(1)),
                                                              ("y", int(2))]));
    test!(parse: "*Point:\n  x = 1\n  y = 2 ! why\n;"
                 => object(Some("Point"), vec![("x", int(1)), ("y", int(2))]));
    test!(parse: "*Person:\n  name = \"Jo\"\n  address = *Address:city=\"X\";\n;"
                 => object(Some("Person"),
                           vec![("name", string("Jo")),
                                ("address", object(Some("Address"),
                                                   vec![("city", string("X"))]))]));
    test!(parse: "*:a=1,a=2;" =>! DuplicateProperty{..}, 1, 7);
    test!(parse: "*:a=;" =>! UnexpectedChar{found: ';', ..}, 1, 5);
    test!(parse: "*:1=2;" =>! UnexpectedChar{found: '1', ..}, 1, 3);
    test!(parse: "*:a=1" =>! UnexpectedEnd{..});
    test!(parse: "*:\n  a =\n    1\n;" => object(None, vec![("a", int(1))]));
    test!(parse: "*:a\n=1;" =>! UnexpectedChar{found: '\n', ..}, 1, 4);

    // Lists
    test!(parse: "[]" => List(vec![]));
    test!(parse: "[ ]" => List(vec![]));
    test!(parse: "[1, [2, 3], []]" => List(vec![int(1),
                                                 List(vec![int(2), int(3)]),
                                                 List(vec![])]));
    test!(parse: "[\n  1\n  2, 3\n]" => List(vec![int(1), int(2), int(3)]));
    test!(parse: "[1,]" =>! TrailingSeparator);
    test!(parse: "[1 2]" =>! UnexpectedChar{found: '2', ..}, 1, 4);
    test!(parse: "[" =>! UnexpectedEnd{..});
    test!(parse: "]" =>! UnexpectedChar{found: ']', ..}, 1, 1);

    // Sets
    test!(parse: "#[]" => Set(vec![]));
    test!(parse: "#[1, 2, 2, 1]" => Set(vec![int(1), int(2)]));
    test!(parse: "#[[1], [1], #[2]]" => Set(vec![List(vec![int(1)]), Set(vec![int(2)])]));
    test!(parse: "#[@2017-02-12T15:29:18-08:00, @2017-02-12T16:29:18-07:00]"
                 => Set(vec![Temporal("2017-02-12T15:29:18-08:00"),
                             Temporal("2017-02-12T16:29:18-07:00")]));
    test!(parse: "#[@2017-02-12T15:29:18-08:00, @2017-02-12T23:29:18+00:00]"
                 => Set(vec![Temporal("2017-02-12T15:29:18-08:00"),
                             Temporal("2017-02-12T23:29:18+00:00")]));
    test!(parse: "#[@2017-02-12T15:29:18-08:00, @2017-02-12T15:29:18-08:00]"
                 => Set(vec![Temporal("2017-02-12T15:29:18-08:00")]));

    // Maps
    test!(parse: "{}" => Map(vec![]));
    test!(parse: "{\"a\": 1, \"b\": [true]}"
                 => Map(vec![(string("a"), int(1)),
                             (string("b"), List(vec![Is(Value::Boolean(true))]))]));
    test!(parse: "{1: \"x\", 1: \"y\"}" => Map(vec![(int(1), string("y"))]));
    test!(parse: "{[1, 2]: #[3]}" => Map(vec![(List(vec![int(1), int(2)]),
                                               Set(vec![int(3)]))]));
    test!(parse: "{*Key : 1}" => Map(vec![(object(Some("Key"), vec![]), int(1))]));
    test!(parse: "{1 2}" =>! UnexpectedChar{found: '2', ..});
    test!(parse: "{1: 2,}" =>! TrailingSeparator);
    test!(parse: "{\"a\":\n  1}" => Map(vec![(string("a"), int(1))]));

    // The root
    test!(parse: "1 2" =>! ContentAfterRoot, 1, 3);
    test!(parse: "[]\n\n[]" =>! ContentAfterRoot, 3, 1);
    test!(parse: " 1 ! fine\n" => int(1));

    // Nesting
    let deep = format!("{}{}", "[".repeat(DEFAULT_MAX_DEPTH + 1),
                       "]".repeat(DEFAULT_MAX_DEPTH + 1));
    test!(parse: &deep =>! NestingTooDeep{max: DEFAULT_MAX_DEPTH});
    let ok = format!("{}{}", "[".repeat(DEFAULT_MAX_DEPTH - 1),
                     "]".repeat(DEFAULT_MAX_DEPTH - 1));
    assert!(parse(&ok).is_ok());
}


/// Labels, the identity of objects, and the categories of errors.
pub fn test_suite2<LB, F>(parse: F)
    where LB: LabelBindings,
          F: Fn(&str) -> Result<Document<LB>, SyntaxError>,
{
    use ErrorKind::*;

    fn items(doc: &Document<impl LabelBindings>) -> Vec<Value> {
        match doc.root() {
            Some(Value::List(items)) => items.to_vec(),
            other => panic!("not a list: {:?}", other),
        }
    }

    // Tags
    let doc = parse("[|<urn:x>|*Thing:v=1;, |<urn:x>|, |<urn:x>|*Thing]").unwrap();
    let list = items(&doc);
    let x = doc.find_by_tag("urn:x").unwrap();
    assert!(list.iter().all(|v| v.as_object() == Some(x)));
    assert_eq!(doc[x].type_name(), Some("Thing"));
    assert_eq!(doc[x].property("v"), Some(&Value::Integer(1)));
    assert_eq!(doc.resources().len(), 1);

    let doc = parse("|<urn:a>|*Node:next=*Node:next=|<urn:a>|;;").unwrap();
    let a = doc.find_by_tag("urn:a").unwrap();
    let b = doc[a].property("next").and_then(Value::as_object).unwrap();
    assert_eq!(doc[b].property("next"), Some(&Value::Object(a)));

    let doc = parse("[|<urn:later>|, |<urn:later>|*Thing:x=1;]").unwrap();
    let list = items(&doc);
    assert_eq!(list[0], list[1]);
    assert_eq!(doc.object(&list[0]).and_then(Resource::type_name), Some("Thing"));

    // IDs, which are scoped by type
    let doc = parse("[|\"1\"|*User:name=\"a\";, |\"1\"|*User, |\"1\"|*Group]").unwrap();
    let list = items(&doc);
    assert_eq!(list[0], list[1]);
    assert_ne!(list[0], list[2]);
    assert_eq!(doc.find_by_type_and_id("User", "1"), list[0].as_object());
    assert_eq!(doc.find_by_type_and_id("Group", "1"), list[2].as_object());
    assert_eq!(doc.find_by_type_and_id("User", "2"), None);
    assert_eq!(doc.object(&list[1]).and_then(Resource::id), Some("1"));

    // Aliases
    let doc = parse("[|l|[1, 2], |l|, |o|*:x=1;, |o|, |s|\"str\", |s|]").unwrap();
    let list = items(&doc);
    assert!(list[0].same_instance(&list[1]));
    assert_eq!(list[2], list[3]);
    assert_eq!(list[5], Value::String("str".into()));
    assert!(doc.find_by_alias("l").unwrap().same_instance(&list[0]));
    assert_eq!(doc.find_by_alias("none"), None);

    let doc = parse("|me|*Loop:self=|me|;").unwrap();
    let me = doc.root().and_then(Value::as_object).unwrap();
    assert_eq!(doc[me].property("self"), Some(&Value::Object(me)));

    // Unlabeled objects are always distinct
    let list = items(&parse("[*, *]").unwrap());
    assert_ne!(list[0], list[1]);

    // Label errors
    test!(parse: "[1, |nope|]" =>! UnresolvedAlias{..}, 1, 5);
    test!(parse: "[|a|1, |a|2]" =>! LabelRedeclared{..}, 1, 8);
    test!(parse: "|a|[|a|1]" =>! LabelRedeclared{..}, 1, 1);
    test!(parse: "|a|#[|a|*]" =>! LabelRedeclared{..}, 1, 1);
    test!(parse: "[|<urn:x>|*:a=1;, |<urn:x>|*:b=1;]" =>! LabelRedeclared{..});
    test!(parse: "[|<urn:x>|*A, |<urn:x>|*B]" =>! ConflictingType{..});
    test!(parse: "|\"1\"|*:a=1;" =>! IdWithoutType{..}, 1, 1);
    test!(parse: "[|\"1\"|]" =>! IdWithoutType{..});
    test!(parse: "|<urn:x>|[1]" =>! InvalidLabel, 1, 1);
    test!(parse: "|\"x\"|'c'" =>! InvalidLabel);
    test!(parse: "|<relative>|*" =>! InvalidIri{..});
    test!(parse: "|a *" =>! UnexpectedChar{found: ' ', ..}, 1, 3);

    // Categories
    let category = |input: &str| parse(input).err().map(|e| e.category());
    assert_eq!(category("\"\\q\""), Some(ErrorCategory::Lexical));
    assert_eq!(category("[1,]"), Some(ErrorCategory::Structural));
    assert_eq!(category("1 2"), Some(ErrorCategory::Structural));
    assert_eq!(category("|nope|"), Some(ErrorCategory::Reference));
    assert_eq!(category("[]"), None);
}
