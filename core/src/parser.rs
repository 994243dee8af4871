//! The recursive-descent parser, and the traits that parameterize it.
//!
//! Parsing is done by a per-parse context that owns the source stream, the
//! label bindings, and the arena of resources being built.  The `Parser`
//! itself only holds configuration, so one `Parser` can be shared to parse any
//! number of documents, even concurrently, each with its own fresh bindings.

use std::collections::HashSet;

use tracing::debug;

use crate::{
    Document, Iri, Resource, ResourceId, Value, SourceStream, SourcePos,
    error::{ErrorKind, ParseResult, SyntaxError},
    syntax::{HANDLE_SEGMENT_DELIMITER, LINE_COMMENT_BEGIN},
};

mod dispatch;
mod literal;
mod sequence;
mod temporal;


/// Implementations provided for ready use.
pub mod premade
{
    mod default_classifier;
    pub use default_classifier::DefaultCharClassifier;

    mod pair_bindings;
    pub use pair_bindings::PairLabelBindings;
}


/// Classifies the characters whose roles are not fixed marker characters:
/// filler, line breaks, and the characters of handles.
///
/// The fixed markers are the constants of the [`syntax`](../syntax/index.html)
/// module.  A custom classifier must not classify any of those as whitespace
/// or as a handle character.
pub trait CharClassifier {
    /// Predicate that determines the character(s) considered to be whitespace
    /// filler, not counting line breaks.
    fn is_whitespace(&self, c: char) -> bool;

    /// Predicate that determines the character(s) that end a line, which end
    /// comments and can separate the items of sequences.
    fn is_line_break(&self, c: char) -> bool;

    /// Predicate that determines the character(s) that may begin a handle.
    fn is_handle_begin(&self, c: char) -> bool;

    /// Predicate that determines the character(s) that may continue a handle,
    /// apart from its segment delimiters.
    fn is_handle_char(&self, c: char) -> bool;
}


/// The key that a label binds a value under.
///
/// The kinds never collide, even when their text is the same.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum LabelKey {
    /// An absolute IRI tag
    Tag(String),
    /// A type handle and an ID
    TypeId(String, String),
    /// An alias handle
    Alias(String),
}


/// Associates labels with the values they were bound to, for the duration of
/// one parse.
///
/// Each parse must be given its own fresh instance.  A parse only ever binds a
/// key that does not resolve yet.
pub trait LabelBindings {
    /// Look-up the value bound to `key`, if any.
    fn resolve(&self, key: &LabelKey) -> Option<&Value>;

    /// Bind `key` to `value`, returning any value that was bound before.
    fn bind(&mut self, key: LabelKey, value: Value) -> Option<Value>;
}


/// The nesting depth that [`Parser::new`](struct.Parser.html#method.new)
/// permits.
pub const DEFAULT_MAX_DEPTH: usize = 256;


/// A parser of SURF documents.
///
/// The fields are its configuration and may be changed between parses.
#[derive(Clone, Debug)]
pub struct Parser<CC> {
    /// Classifies whitespace, line breaks, and handle characters
    pub classifier: CC,
    /// Terms nested deeper than this fail with
    /// [`ErrorKind::NestingTooDeep`](../enum.ErrorKind.html#variant.NestingTooDeep)
    /// instead of exhausting the stack.  The root term is at depth 1.
    pub max_depth: usize,
}

impl<CC> Parser<CC>
    where CC: CharClassifier,
{
    /// Make a new parser with the given classifier and the default nesting
    /// limit.
    #[inline]
    pub fn new(classifier: CC) -> Self {
        Self { classifier, max_depth: DEFAULT_MAX_DEPTH }
    }

    /// Parse one document from `source`.
    ///
    /// Leading and trailing filler is skipped.  Input that is only filler
    /// yields a document with no root.  Anything after the root term is an
    /// error.
    ///
    /// `bindings` must be fresh.  It is returned in the `Document`, holding
    /// every label that was bound.
    pub fn parse<S, LB>(&self, source: S, bindings: LB) -> Result<Document<LB>, SyntaxError>
        where S: SourceStream,
              LB: LabelBindings,
    {
        let mut cx = ParseContext {
            classifier: &self.classifier,
            max_depth: self.max_depth,
            source,
            bindings,
            resources: Vec::new(),
            described: HashSet::new(),
            depth: 0,
        };
        match cx.parse_document() {
            Ok(root) => {
                debug!(resources = cx.resources.len(), empty = root.is_none(),
                       "parsed SURF document");
                Ok(Document { root, resources: cx.resources, bindings: cx.bindings })
            }
            Err(error) => {
                debug!(%error, "failed to parse SURF document");
                Err(error)
            }
        }
    }
}

impl<CC> Default for Parser<CC>
    where CC: CharClassifier + Default,
{
    #[inline]
    fn default() -> Self {
        Self::new(CC::default())
    }
}


/// The state of one parse.
struct ParseContext<'p, CC, S, LB> {
    classifier: &'p CC,
    max_depth: usize,
    source: S,
    bindings: LB,
    resources: Vec<Resource>,
    /// Resources whose property block has been parsed, or is being parsed.
    described: HashSet<ResourceId>,
    depth: usize,
}

impl<CC, S, LB> ParseContext<'_, CC, S, LB>
    where CC: CharClassifier,
          S: SourceStream,
          LB: LabelBindings,
{
    #[inline]
    fn peek_char(&mut self) -> Option<char> {
        self.source.peek().map(|item| item.ch)
    }

    #[inline]
    fn next_char(&mut self) -> Option<char> {
        self.source.next().map(|item| item.ch)
    }

    #[inline]
    fn position(&self) -> SourcePos {
        self.source.position()
    }

    #[inline]
    fn peek_is(&mut self, ch: char) -> bool {
        self.peek_char() == Some(ch)
    }

    /// Consume the next character if it is `ch`.
    fn eat(&mut self, ch: char) -> bool {
        if self.peek_is(ch) {
            let _ = self.next_char();
            true
        } else {
            false
        }
    }

    #[inline]
    fn error(&self, kind: ErrorKind) -> SyntaxError {
        SyntaxError::new(kind, self.position())
    }

    /// The error for whatever is next, when it is not what is `expected`.
    fn unexpected(&mut self, expected: &str) -> SyntaxError {
        match self.source.peek() {
            Some(item) => SyntaxError::new(ErrorKind::UnexpectedChar {
                                               found: item.ch,
                                               expected: expected.into(),
                                           },
                                           item.pos),
            None => self.error(ErrorKind::UnexpectedEnd { expected: expected.into() }),
        }
    }

    fn expect(&mut self, ch: char) -> ParseResult<()> {
        if self.eat(ch) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("`{}`", ch)))
        }
    }

    /// Consume the next character, whatever it is.
    fn require(&mut self, expected: &str) -> ParseResult<char> {
        match self.next_char() {
            Some(ch) => Ok(ch),
            None => Err(self.error(ErrorKind::UnexpectedEnd { expected: expected.into() })),
        }
    }

    /// Consume characters while `pred` holds, appending them to `buf`.
    fn take_while<F>(&mut self, buf: &mut String, mut pred: F)
        where F: FnMut(char) -> bool,
    {
        while let Some(ch) = self.peek_char() {
            if !pred(ch) { break; }
            buf.push(ch);
            let _ = self.next_char();
        }
    }

    /// Skip whitespace and comments, but not line breaks.  A comment runs up
    /// to, and not including, the next line break.
    fn skip_filler(&mut self) {
        let mut in_comment = false;
        while let Some(ch) = self.peek_char() {
            if self.classifier.is_line_break(ch) {
                break;
            } else if in_comment || self.classifier.is_whitespace(ch) {
                // skip
            } else if ch == LINE_COMMENT_BEGIN {
                in_comment = true;
            } else {
                break;
            }
            let _ = self.next_char();
        }
    }

    /// Skip filler and line breaks.  Returns whether any line break was
    /// skipped.
    fn skip_filler_and_line_breaks(&mut self) -> bool {
        let mut line_break = false;
        loop {
            self.skip_filler();
            match self.peek_char() {
                Some(ch) if self.classifier.is_line_break(ch) => {
                    line_break = true;
                    let _ = self.next_char();
                }
                _ => return line_break,
            }
        }
    }

    /// Read a handle: segments of handle characters separated by single
    /// segment delimiters.
    fn parse_handle(&mut self) -> ParseResult<String> {
        let start = self.position();
        let mut handle = String::new();
        match self.peek_char() {
            Some(ch) if self.classifier.is_handle_begin(ch) => {}
            _ => return Err(self.unexpected("a handle")),
        }
        loop {
            let classifier = self.classifier;
            self.take_while(&mut handle, |ch| classifier.is_handle_char(ch));
            if !self.eat(HANDLE_SEGMENT_DELIMITER) {
                return Ok(handle);
            }
            handle.push(HANDLE_SEGMENT_DELIMITER);
            match self.peek_char() {
                Some(ch) if self.classifier.is_handle_char(ch) => {}
                _ => return Err(SyntaxError::new(ErrorKind::InvalidHandle, start)),
            }
        }
    }

    /// Run `f` one nesting level deeper.
    fn nested<T, F>(&mut self, f: F) -> ParseResult<T>
        where F: FnOnce(&mut Self) -> ParseResult<T>,
    {
        if self.depth >= self.max_depth {
            return Err(self.error(ErrorKind::NestingTooDeep { max: self.max_depth }));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn new_resource(&mut self, resource: Resource) -> ResourceId {
        let id = ResourceId(self.resources.len());
        self.resources.push(resource);
        id
    }

    fn parse_iri_text(&mut self, text: String, start: SourcePos) -> ParseResult<Iri> {
        Iri::parse(text.clone()).map_err(|e| SyntaxError::new(
            ErrorKind::InvalidIri { text, message: e.to_string() },
            start))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{StrSourceStream, parser::premade::*};

    fn parse(input: &str) -> ParseResult<Document<PairLabelBindings>> {
        Parser::new(DefaultCharClassifier)
            .parse(StrSourceStream::new(input), PairLabelBindings::default())
    }

    fn root(input: &str) -> Value {
        parse(input).unwrap().root.unwrap()
    }

    fn kind(input: &str) -> ErrorKind {
        parse(input).unwrap_err().kind
    }

    #[test]
    fn empty_and_filler() {
        assert_eq!(parse("").unwrap().root(), None);
        assert_eq!(parse("  \n\t ! just a comment\n\n").unwrap().root(), None);
        assert_eq!(root(" ! lead\n 1 ! trail\n"), Value::Integer(1));
    }

    #[test]
    fn content_after_root() {
        assert_eq!(kind("1 2"), ErrorKind::ContentAfterRoot);
        assert_eq!(kind("1\n2"), ErrorKind::ContentAfterRoot);
        let e = parse("[1]\n  x").unwrap_err();
        assert_eq!(e.pos, SourcePos { char_pos: 6, line: 2, column: 3 });
    }

    #[test]
    fn handles() {
        let doc = parse("*:a-b=1,_c2=2;").unwrap();
        let r = doc.object(doc.root().unwrap()).unwrap();
        assert_eq!(r.properties().keys().collect::<Vec<_>>(), ["a-b", "_c2"]);
        assert_eq!(kind("*:a-=1;"), ErrorKind::InvalidHandle);
        assert_eq!(kind("*:a--b=1;"), ErrorKind::InvalidHandle);
        assert!(matches!(kind("*:-a=1;"), ErrorKind::UnexpectedChar{found: '-', ..}));
    }

    #[test]
    fn nesting_limit() {
        let mut p = Parser::new(DefaultCharClassifier);
        p.max_depth = 3;
        let ok = p.parse(StrSourceStream::new("[[1]]"), PairLabelBindings::default());
        assert!(ok.is_ok());
        let deep = p.parse(StrSourceStream::new("[[[1]]]"), PairLabelBindings::default());
        assert_eq!(deep.unwrap_err().kind, ErrorKind::NestingTooDeep { max: 3 });

        let input = "[".repeat(10_000);
        assert_eq!(kind(&input), ErrorKind::NestingTooDeep { max: DEFAULT_MAX_DEPTH });
    }
}
