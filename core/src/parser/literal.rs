//! Scanners for the literal terms other than temporals.
//!
//! Each scanner starts at its literal's opening marker, which the dispatcher
//! has only peeked, and consumes through the literal's end.

use std::str::FromStr;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use regex::Regex;
use uuid::Uuid;

use crate::{
    EmailAddress, Iri, Pattern, TelephoneNumber, Value, SourceStream,
    error::{ErrorKind, ParseResult, SyntaxError},
    syntax::*,
};
use super::{CharClassifier, LabelBindings, ParseContext};


const HIGH_SURROGATES: std::ops::RangeInclusive<u32> = 0xD800 ..= 0xDBFF;
const LOW_SURROGATES: std::ops::RangeInclusive<u32> = 0xDC00 ..= 0xDFFF;

/// The characters an email address's local part is made of, besides the `.`
/// that separates them into atoms.
fn is_atext(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || "!#$%&'*+-/=?^_`{|}~".contains(ch)
}

fn is_domain_label_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-'
}

fn is_base64url(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}


impl<CC, S, LB> ParseContext<'_, CC, S, LB>
    where CC: CharClassifier,
          S: SourceStream,
          LB: LabelBindings,
{
    /// `true` or `false`.  The word is read speculatively and rewound if it is
    /// neither, so that the error points at its start.
    pub(super) fn parse_boolean(&mut self) -> ParseResult<bool> {
        let mut word = String::new();
        self.source.mark();
        self.take_while(&mut word, |ch| ch.is_ascii_alphabetic());
        let value = match word.as_str() {
            TRUE => true,
            FALSE => false,
            _ => {
                self.source.reset();
                return Err(self.error(ErrorKind::InvalidBoolean));
            }
        };
        self.source.unmark();
        Ok(value)
    }

    /// A number, classified as it is scanned into one of four kinds: the
    /// decimal marker selects the arbitrary-precision family, and a fraction
    /// or an exponent selects a non-integer kind.
    pub(super) fn parse_number(&mut self) -> ParseResult<Value> {
        let start = self.position();
        let big = self.eat(DECIMAL_BEGIN);
        let mut text = String::new();
        if self.eat('-') {
            text.push('-');
        }
        self.digits(&mut text)?;
        let mut fractional = false;
        if self.eat('.') {
            text.push('.');
            self.digits(&mut text)?;
            fractional = true;
        }
        if self.eat('e') || self.eat('E') {
            text.push('e');
            if self.eat('-') {
                text.push('-');
            } else {
                let _ = self.eat('+');
            }
            self.digits(&mut text)?;
            fractional = true;
        }

        let invalid = || SyntaxError::new(ErrorKind::InvalidNumber, start);
        Ok(match (big, fractional) {
            (false, false) => match text.parse() {
                Ok(n) => Value::Integer(n),
                Err(_) => return Err(SyntaxError::new(ErrorKind::IntegerOverflow { text },
                                                      start)),
            },
            (false, true) => match text.parse::<f64>() {
                // Out of range for a double.
                Ok(f) if f.is_finite() => Value::Float(f),
                _ => return Err(invalid()),
            },
            (true, false) => Value::BigInteger(BigInt::from_str(&text).map_err(|_| invalid())?),
            (true, true) => Value::Decimal(BigDecimal::from_str(&text).map_err(|_| invalid())?),
        })
    }

    /// A required run of ASCII digits.
    fn digits(&mut self, buf: &mut String) -> ParseResult<()> {
        let before = buf.len();
        self.take_while(buf, |ch| ch.is_ascii_digit());
        if buf.len() == before {
            Err(match self.peek_char() {
                Some(_) => self.error(ErrorKind::InvalidNumber),
                None => self.unexpected("a digit"),
            })
        } else {
            Ok(())
        }
    }

    pub(super) fn parse_string(&mut self) -> ParseResult<String> {
        self.expect(STRING_DELIMITER)?;
        let mut string = String::new();
        loop {
            match self.require("the end of the string")? {
                STRING_DELIMITER => return Ok(string),
                ESCAPE => string.push(self.parse_escape(STRING_DELIMITER)?),
                ch => string.push(ch),
            }
        }
    }

    pub(super) fn parse_character(&mut self) -> ParseResult<char> {
        let start = self.position();
        self.expect(CHARACTER_DELIMITER)?;
        let ch = match self.require("a character")? {
            CHARACTER_DELIMITER => {
                return Err(SyntaxError::new(ErrorKind::InvalidCharacter, start));
            }
            ESCAPE => self.parse_escape(CHARACTER_DELIMITER)?,
            ch => ch,
        };
        match self.require("the end of the character")? {
            CHARACTER_DELIMITER => Ok(ch),
            _ => Err(SyntaxError::new(ErrorKind::InvalidCharacter, start)),
        }
    }

    /// Decode the escape sequence after a backslash.  `delimiter` is the
    /// enclosing literal's delimiter, which may itself be escaped.
    fn parse_escape(&mut self, delimiter: char) -> ParseResult<char> {
        let pos = self.position();
        Ok(match self.require("an escape sequence")? {
            ESCAPE => ESCAPE,
            '/' => '/',
            'b' => '\u{08}',
            'f' => '\u{0C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\u{0B}',
            'u' => return self.parse_unicode_escape(),
            ch if ch == delimiter => ch,
            found => return Err(SyntaxError::new(ErrorKind::InvalidEscape { found }, pos)),
        })
    }

    /// The code after `\u`.  A high surrogate must be followed immediately by
    /// a `\u` escape of a low surrogate.
    #[allow(clippy::cast_possible_truncation)]
    fn parse_unicode_escape(&mut self) -> ParseResult<char> {
        let pos = self.position();
        let code = self.hex4()?;
        let scalar = if HIGH_SURROGATES.contains(&code) {
            let unpaired = SyntaxError::new(ErrorKind::UnpairedSurrogate { code: code as u16 },
                                            pos);
            if !(self.eat(ESCAPE) && self.eat('u')) {
                return Err(unpaired);
            }
            let low = self.hex4()?;
            if !LOW_SURROGATES.contains(&low) {
                return Err(unpaired);
            }
            0x1_0000 + ((code - 0xD800) << 10) + (low - 0xDC00)
        } else if LOW_SURROGATES.contains(&code) {
            return Err(SyntaxError::new(ErrorKind::UnpairedSurrogate { code: code as u16 },
                                        pos));
        } else {
            code
        };
        char::from_u32(scalar).ok_or_else(|| SyntaxError::new(ErrorKind::InvalidUnicodeEscape,
                                                              pos))
    }

    fn hex4(&mut self) -> ParseResult<u32> {
        let pos = self.position();
        let mut code = 0;
        for _ in 0 .. 4 {
            let digit = self.peek_char().and_then(|ch| ch.to_digit(16));
            match digit {
                Some(digit) => {
                    let _ = self.next_char();
                    code = code * 16 + digit;
                }
                None => return Err(SyntaxError::new(ErrorKind::InvalidUnicodeEscape, pos)),
            }
        }
        Ok(code)
    }

    /// URL-safe base64 without padding.
    pub(super) fn parse_binary(&mut self) -> ParseResult<Vec<u8>> {
        let start = self.position();
        self.expect(BINARY_BEGIN)?;
        let mut text = String::new();
        self.take_while(&mut text, is_base64url);
        URL_SAFE_NO_PAD.decode(&text).map_err(|e| SyntaxError::new(
            ErrorKind::InvalidBinary { message: e.to_string() }, start))
    }

    /// Five groups of 8, 4, 4, 4, and 12 hexadecimal digits joined by `-`.
    pub(super) fn parse_uuid(&mut self) -> ParseResult<Uuid> {
        const GROUP_ENDS: [usize; 4] = [8, 13, 18, 23];
        let start = self.position();
        self.expect(UUID_BEGIN)?;
        let mut text = String::new();
        self.take_while(&mut text, |ch| ch.is_ascii_hexdigit() || ch == '-');
        let invalid = |message: String| SyntaxError::new(ErrorKind::InvalidUuid { message },
                                                         start);
        let well_formed = text.len() == 36
            && text.char_indices().all(|(i, ch)| (ch == '-') == GROUP_ENDS.contains(&i));
        if !well_formed {
            return Err(invalid(format!("`{}` is not in 8-4-4-4-12 form", text)));
        }
        Uuid::parse_str(&text).map_err(|e| invalid(e.to_string()))
    }

    pub(super) fn parse_telephone_number(&mut self) -> ParseResult<TelephoneNumber> {
        let start = self.position();
        self.expect(TELEPHONE_NUMBER_BEGIN)?;
        let mut digits = String::new();
        self.take_while(&mut digits, |ch| ch.is_ascii_digit());
        TelephoneNumber::from_digits(&digits)
            .ok_or_else(|| SyntaxError::new(ErrorKind::InvalidTelephoneNumber, start))
    }

    /// A dot-atom local part, `@`, and a domain that is either dot-separated
    /// labels or a bracketed literal.
    pub(super) fn parse_email_address(&mut self) -> ParseResult<EmailAddress> {
        let start = self.position();
        let invalid = || SyntaxError::new(ErrorKind::InvalidEmailAddress, start);
        self.expect(EMAIL_ADDRESS_BEGIN)?;

        let mut local_part = String::new();
        loop {
            let before = local_part.len();
            self.take_while(&mut local_part, is_atext);
            if local_part.len() == before {
                return Err(invalid());
            }
            if !self.eat('.') {
                break;
            }
            local_part.push('.');
        }
        if !self.eat(EMAIL_ADDRESS_AT) {
            return Err(invalid());
        }

        let mut domain = String::new();
        if self.eat('[') {
            domain.push('[');
            self.take_while(&mut domain, |ch| !matches!(ch, '[' | ']' | '\\')
                                               && !ch.is_whitespace());
            if domain.len() == 1 || !self.eat(']') {
                return Err(invalid());
            }
            domain.push(']');
        } else {
            loop {
                let before = domain.len();
                self.take_while(&mut domain, is_domain_label_char);
                let label = &domain[before ..];
                if label.is_empty() || label.starts_with('-') || label.ends_with('-') {
                    return Err(invalid());
                }
                if !self.peek_is('.') {
                    break;
                }
                // A `.` continues the domain only if another label follows.
                self.source.mark();
                let _ = self.next_char();
                match self.peek_char() {
                    Some(ch) if is_domain_label_char(ch) => {
                        self.source.unmark();
                        domain.push('.');
                    }
                    _ => {
                        self.source.reset();
                        break;
                    }
                }
            }
        }
        Ok(EmailAddress::new(local_part, domain))
    }

    /// An IRI between angle brackets, or one of the short forms that expand an
    /// email address, telephone number, or UUID literal to its IRI.
    pub(super) fn parse_iri(&mut self) -> ParseResult<Iri> {
        let start = self.position();
        self.expect(IRI_BEGIN)?;
        let text = match self.peek_char() {
            Some(EMAIL_ADDRESS_BEGIN) => {
                format!("{}{}", MAILTO_SCHEME, self.parse_email_address()?)
            }
            Some(TELEPHONE_NUMBER_BEGIN) => {
                format!("{}{}", TEL_SCHEME, self.parse_telephone_number()?)
            }
            Some(UUID_BEGIN) => {
                format!("{}{}", UUID_URN_PREFIX, self.parse_uuid()?.hyphenated())
            }
            _ => {
                let mut text = String::new();
                self.take_while(&mut text, |ch| ch != IRI_END);
                text
            }
        };
        self.expect(IRI_END)?;
        self.parse_iri_text(text, start)
    }

    /// Pattern text between slashes.  A backslash and the character after it
    /// are taken as a pair: `\/` becomes `/` and any other pair is kept as
    /// written, to be interpreted by the regex syntax.
    pub(super) fn parse_regex(&mut self) -> ParseResult<Pattern> {
        let start = self.position();
        self.expect(REGEX_DELIMITER)?;
        let mut pattern = String::new();
        loop {
            match self.require("the end of the regular expression")? {
                REGEX_DELIMITER => break,
                ESCAPE => match self.require("the end of the regular expression")? {
                    REGEX_DELIMITER => pattern.push(REGEX_DELIMITER),
                    ch => {
                        pattern.push(ESCAPE);
                        pattern.push(ch);
                    }
                },
                ch => pattern.push(ch),
            }
        }
        Regex::new(&pattern).map(Pattern::from).map_err(|e| SyntaxError::new(
            ErrorKind::InvalidRegex { message: e.to_string() }, start))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Document, StrSourceStream, ErrorCategory,
        parser::{Parser, premade::*},
    };

    fn parse(input: &str) -> ParseResult<Document<PairLabelBindings>> {
        Parser::new(DefaultCharClassifier)
            .parse(StrSourceStream::new(input), PairLabelBindings::default())
    }

    fn root(input: &str) -> Value {
        parse(input).unwrap().root().unwrap().clone()
    }

    fn kind(input: &str) -> ErrorKind {
        parse(input).unwrap_err().kind
    }

    #[test]
    fn booleans() {
        assert_eq!(root("true"), Value::Boolean(true));
        assert_eq!(root("false"), Value::Boolean(false));
        let e = parse("[1, tru]").unwrap_err();
        assert_eq!(e.kind, ErrorKind::InvalidBoolean);
        assert_eq!(e.pos.column, 5);
        assert_eq!(kind("falsey"), ErrorKind::InvalidBoolean);
    }

    #[test]
    fn numbers() {
        assert_eq!(root("123"), Value::Integer(123));
        assert_eq!(root("-123"), Value::Integer(-123));
        assert_eq!(root("123.0"), Value::Float(123.0));
        assert_eq!(root("1e3"), Value::Float(1000.0));
        assert_eq!(root("-2.5E-1"), Value::Float(-0.25));
        assert_eq!(root("1e+2"), Value::Float(100.0));
        assert_eq!(root("$123"), Value::BigInteger(BigInt::from(123_i64)));
        assert_eq!(root("$-123"), Value::BigInteger(BigInt::from(-123_i64)));
        assert_eq!(root("$123.0"), Value::Decimal(BigDecimal::from_str("123.0").unwrap()));
        assert_eq!(root("$1.5e2"), Value::Decimal(BigDecimal::from_str("150").unwrap()));
        assert_eq!(root("9223372036854775807"), Value::Integer(i64::MAX));
        assert_eq!(root("-9223372036854775808"), Value::Integer(i64::MIN));
        assert_eq!(root("$92233720368547758070"),
                   Value::BigInteger(BigInt::from_str("92233720368547758070").unwrap()));

        let e = parse("9223372036854775808").unwrap_err();
        assert_eq!(e.kind, ErrorKind::IntegerOverflow { text: "9223372036854775808".into() });
        assert_eq!(e.category(), ErrorCategory::Lexical);

        assert_eq!(kind("1."), ErrorKind::UnexpectedEnd { expected: "a digit".into() });
        assert_eq!(kind("[1.]"), ErrorKind::InvalidNumber);
        assert_eq!(kind("[-]"), ErrorKind::InvalidNumber);
        assert_eq!(kind("[1e]"), ErrorKind::InvalidNumber);
        assert_eq!(kind("[$]"), ErrorKind::InvalidNumber);
        assert_eq!(kind("[.5]"), ErrorKind::UnexpectedChar { found: '.',
                                                              expected: "a resource".into() });

        let e = parse("[1, 1e400]").unwrap_err();
        assert_eq!(e.kind, ErrorKind::InvalidNumber);
        assert_eq!(e.pos.column, 5);
        assert_eq!(kind("-1e400"), ErrorKind::InvalidNumber);
        assert_eq!(root("1e-400"), Value::Float(0.0));
        assert_eq!(root("1.7976931348623157e308"), Value::Float(f64::MAX));
    }

    #[test]
    fn strings() {
        assert_eq!(root("\"\""), Value::String(String::new()));
        assert_eq!(root(r#""a\"b\\c\/d""#), Value::String("a\"b\\c/d".into()));
        assert_eq!(root(r#""\b\f\n\r\t\v""#),
                   Value::String("\u{8}\u{c}\n\r\t\u{b}".into()));
        assert_eq!(root(r#""\u0041\u00e9\u4E2D""#), Value::String("Aé中".into()));
        assert_eq!(root(r#""\uD83D\uDE00""#), Value::String("😀".into()));
        assert_eq!(root("\"multi\nline 😀\""), Value::String("multi\nline 😀".into()));
        assert_eq!(root(r#""it's""#), Value::String("it's".into()));
    }

    #[test]
    fn string_errors() {
        let e = parse("\"abc").unwrap_err();
        assert!(matches!(e.kind, ErrorKind::UnexpectedEnd{..}));
        assert_eq!(e.category(), ErrorCategory::Lexical);
        assert_eq!(kind(r#""\q""#), ErrorKind::InvalidEscape { found: 'q' });
        assert_eq!(kind(r#""\'""#), ErrorKind::InvalidEscape { found: '\'' });
        assert_eq!(kind(r#""\u12G4""#), ErrorKind::InvalidUnicodeEscape);
        assert_eq!(kind(r#""\u12""#), ErrorKind::InvalidUnicodeEscape);
        assert_eq!(kind(r#""\uD83D""#), ErrorKind::UnpairedSurrogate { code: 0xD83D });
        assert_eq!(kind(r#""\uD83Dx""#), ErrorKind::UnpairedSurrogate { code: 0xD83D });
        assert_eq!(kind(r#""\uD83D\u0041""#), ErrorKind::UnpairedSurrogate { code: 0xD83D });
        assert_eq!(kind(r#""\uDE00""#), ErrorKind::UnpairedSurrogate { code: 0xDE00 });
    }

    #[test]
    fn characters() {
        assert_eq!(root("'a'"), Value::Character('a'));
        assert_eq!(root("'😀'"), Value::Character('😀'));
        assert_eq!(root(r"'\''"), Value::Character('\''));
        assert_eq!(root(r"'\\'"), Value::Character('\\'));
        assert_eq!(root(r"'\u00e9'"), Value::Character('é'));
        assert_eq!(root(r"'\uD83D\uDE00'"), Value::Character('😀'));
        assert_eq!(root("'\"'"), Value::Character('"'));
        assert_eq!(kind("''"), ErrorKind::InvalidCharacter);
        assert_eq!(kind("'ab'"), ErrorKind::InvalidCharacter);
        assert_eq!(kind(r#"'\"'"#), ErrorKind::InvalidEscape { found: '"' });
    }

    #[test]
    fn binary() {
        assert_eq!(root("%"), Value::Binary(vec![]));
        assert_eq!(root("%AQID"), Value::Binary(vec![1, 2, 3]));
        assert_eq!(root("%-_8"), Value::Binary(vec![0xFB, 0xFF]));
        assert_eq!(root("[%Zm9vYmFy, %Zm9vYg]"),
                   Value::list(vec![Value::Binary(b"foobar".to_vec()),
                                    Value::Binary(b"foob".to_vec())]));
        assert!(matches!(kind("%A"), ErrorKind::InvalidBinary{..}));
        assert!(matches!(kind("[%Zm9vYg==]"), ErrorKind::UnexpectedChar{found: '=', ..}));
    }

    #[test]
    fn uuids() {
        let text = "5764a9f6-5c6e-4b2d-8f3e-0a9b8c7d6e5f";
        assert_eq!(root(&format!("&{}", text)), Value::Uuid(Uuid::parse_str(text).unwrap()));
        assert!(matches!(kind("&5764a9f65c6e4b2d8f3e0a9b8c7d6e5f"),
                         ErrorKind::InvalidUuid{..}));
        assert!(matches!(kind("&5764a9f6-5c6e-4b2d-8f3e-0a9b8c7d6e5"),
                         ErrorKind::InvalidUuid{..}));
        assert!(matches!(kind("&5764a9f6-5c6e4-b2d-8f3e-0a9b8c7d6e5f"),
                         ErrorKind::InvalidUuid{..}));
    }

    #[test]
    fn telephone_numbers() {
        match root("+12015550123") {
            Value::TelephoneNumber(t) => assert_eq!(t.as_str(), "+12015550123"),
            other => panic!("{:?}", other),
        }
        assert_eq!(kind("+"), ErrorKind::InvalidTelephoneNumber);
        assert_eq!(kind("+1234567890123456"), ErrorKind::InvalidTelephoneNumber);
    }

    #[test]
    fn email_addresses() {
        match root("^jdoe.x+tag@example.com") {
            Value::EmailAddress(e) => {
                assert_eq!(e.local_part(), "jdoe.x+tag");
                assert_eq!(e.domain(), "example.com");
                assert_eq!(e.to_string(), "jdoe.x+tag@example.com");
            }
            other => panic!("{:?}", other),
        }
        match root("^a@[192.0.2.1]") {
            Value::EmailAddress(e) => assert_eq!(e.domain(), "[192.0.2.1]"),
            other => panic!("{:?}", other),
        }
        assert_eq!(root("[^a@b.c\n]"), root("[^a@b.c]"));
        assert_eq!(kind("^a@b.c."), ErrorKind::ContentAfterRoot);
        assert_eq!(kind("^@b.c"), ErrorKind::InvalidEmailAddress);
        assert_eq!(kind("^a..b@c"), ErrorKind::InvalidEmailAddress);
        assert_eq!(kind("^a"), ErrorKind::InvalidEmailAddress);
        assert_eq!(kind("^a@"), ErrorKind::InvalidEmailAddress);
        assert_eq!(kind("^a@-b.c"), ErrorKind::InvalidEmailAddress);
        assert_eq!(kind("^a@[]"), ErrorKind::InvalidEmailAddress);
    }

    #[test]
    fn iris() {
        match root("<https://example.com/path?q=1#f>") {
            Value::Iri(i) => assert_eq!(i.as_str(), "https://example.com/path?q=1#f"),
            other => panic!("{:?}", other),
        }
        let iri = |input| match root(input) {
            Value::Iri(i) => i.as_str().to_owned(),
            other => panic!("{:?}", other),
        };
        assert_eq!(iri("<^jdoe@example.com>"), "mailto:jdoe@example.com");
        assert_eq!(iri("<+12015550123>"), "tel:+12015550123");
        assert_eq!(iri("<&5764a9f6-5c6e-4b2d-8f3e-0a9b8c7d6e5f>"),
                   "urn:uuid:5764a9f6-5c6e-4b2d-8f3e-0a9b8c7d6e5f");
        assert!(matches!(kind("<no-scheme>"), ErrorKind::InvalidIri{..}));
        assert!(matches!(kind("<https://example.com"), ErrorKind::UnexpectedEnd{..}));
        assert!(matches!(kind("<^a@b x>"), ErrorKind::UnexpectedChar{found: ' ', ..}));
    }

    #[test]
    fn regexes() {
        let pattern = |input| match root(input) {
            Value::Regex(p) => p.as_str().to_owned(),
            other => panic!("{:?}", other),
        };
        assert_eq!(pattern("/a+b/"), "a+b");
        assert_eq!(pattern(r"/a\/b/"), "a/b");
        assert_eq!(pattern(r"/\d+\.\w/"), r"\d+\.\w");
        match root(r"/^\d{3}$/") {
            Value::Regex(p) => assert!(p.regex().is_match("123")),
            other => panic!("{:?}", other),
        }
        assert!(matches!(kind("/(/"), ErrorKind::InvalidRegex{..}));
        assert!(matches!(kind("/abc"), ErrorKind::UnexpectedEnd{..}));
    }

    #[test]
    fn regex_escape_pairs() {
        let pattern = |input| match root(input) {
            Value::Regex(p) => p.as_str().to_owned(),
            other => panic!("{:?}", other),
        };
        // An escaped backslash right before the closing slash.
        assert_eq!(pattern(r"/a\\/"), r"a\\");
        match root(r"/a\\/") {
            Value::Regex(p) => assert!(p.regex().is_match(r"a\")),
            other => panic!("{:?}", other),
        }
        // An escaped backslash then an escaped slash.
        assert_eq!(pattern(r"/\\\//"), r"\\/");
        assert!(matches!(kind(r"/a\/"), ErrorKind::UnexpectedEnd{..}));
    }
}
