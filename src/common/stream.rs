//! A `Parser` for parsing inputs from streaming sources, which are never held
//! in memory all at once.

use std::io::{self, BufRead};

use thiserror::Error;
use tracing::debug;

use crate::{SyntaxError, source_stream::CharIterSourceStream};

use super::{
    helper::ReaderChars,
    inmem::{parser, Document, LabelBindings},
};


/// Failure to parse a document from a reader.
#[derive(Error, Debug)]
pub enum ReadError {
    /// Reading failed, or the input was not UTF-8.
    #[error("failed to read SURF input: {0}")]
    Io(#[from] io::Error),
    /// The input was read but is not a valid document.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}


/// Parse the given stream of `char`s with the same kind of
/// [`Parser`](../inmem/type.Parser.html) as [`inmem`](../inmem/index.html).
pub fn parse_chars<I>(input: I) -> Result<Document, SyntaxError>
    where I: IntoIterator<Item = char>,
{
    parser().parse(CharIterSourceStream::new(input), LabelBindings::default())
}

/// Parse a document from the given reader, decoding it as UTF-8 as it is
/// parsed.
///
/// If reading fails, that failure is returned rather than the syntax error
/// that the truncated input caused.
pub fn parse_reader<R>(reader: R) -> Result<Document, ReadError>
    where R: BufRead,
{
    let mut chars = ReaderChars::new(reader);
    let result = parse_chars(&mut chars);
    match chars.error {
        Some(error) => {
            debug!(%error, "reading SURF input failed");
            Err(ReadError::Io(error))
        }
        None => result.map_err(ReadError::Syntax),
    }
}
