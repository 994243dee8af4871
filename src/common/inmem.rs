//! A `Parser` for parsing inputs that are single in-memory strings.

use crate::{
    Document as DocumentStruct, Parser as ParserStruct, SyntaxError,
    parser::{LabelTable, LabelBindings as LabelBindingsTrait},
    source_stream::StrSourceStream,
};


#[doc(no_inline)]
pub use crate::parser::DefaultCharClassifier as CharClassifier;


/// Chosen so that labels are looked up in a `HashMap`, which suits documents
/// with any number of labels.
///
/// This `LabelBindings` type is a `LabelTable` with the default hasher.
pub type LabelBindings = LabelTable;

/// A [`Parser`] that uses the default characters for filler, line breaks,
/// and handles.
///
/// [`Parser`]: ../../../surf_core/parser/struct.Parser.html
pub type Parser = ParserStruct<CharClassifier>;

/// The result of parsing with this module's functions.
pub type Document = DocumentStruct<LabelBindings>;


/// Make a new `Parser` that uses the types chosen by this module and the
/// default nesting limit.
///
/// You may change its fields and call its [`parse`] method with any source
/// stream and any label bindings.
///
/// [`parse`]: ../../../surf_core/parser/struct.Parser.html#method.parse
#[inline]
pub fn parser() -> Parser {
    Parser::default()
}

/// Parse the given string slice with a [`Parser`](type.Parser.html), binding
/// its labels in the given fresh `bindings`.
pub fn parse_str_with<LB>(input: &str, bindings: LB) -> Result<DocumentStruct<LB>, SyntaxError>
    where LB: LabelBindingsTrait,
{
    parser().parse(StrSourceStream::new(input), bindings)
}

/// Parse the given string slice with a [`Parser`](type.Parser.html), binding
/// its labels in a new `LabelTable`.
#[inline]
pub fn parse_str(input: &str) -> Result<Document, SyntaxError> {
    parse_str_with(input, LabelBindings::default())
}
