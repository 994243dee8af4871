//! The input abstraction that the parser reads characters from.

use std::fmt::{self, Display};


/// Implementations provided for ready use.
pub mod premade {
    mod str_src_strm;
    pub use str_src_strm::StrSourceStream;
}


/// Position of a character relative to the start of its source.
///
/// `line` and `column` are 1-based, for human-readable error reports.
/// `char_pos` is the 0-based count of `char`s before this one.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct SourcePos {
    /// Count of `char`s before this position
    pub char_pos: usize,
    /// 1-based line number
    pub line: usize,
    /// 1-based column number, counted in `char`s
    pub column: usize,
}

impl SourcePos {
    /// The position of the first character of any source.
    pub const START: Self = Self { char_pos: 0, line: 1, column: 1 };

    /// The position immediately after the given character, which must be the
    /// one at `self`.  Only `\n` starts a new line, so `\r\n` counts once.
    #[inline]
    #[must_use]
    pub fn advance(self, ch: char) -> Self {
        if ch == '\n' {
            Self { char_pos: self.char_pos + 1, line: self.line + 1, column: 1 }
        } else {
            Self { char_pos: self.char_pos + 1, column: self.column + 1, ..self }
        }
    }
}

impl Default for SourcePos {
    #[inline]
    fn default() -> Self {
        Self::START
    }
}

impl Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}


/// The items yielded by a `SourceStream`: each character with its position.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct SourceIterItem {
    /// The character
    pub ch: char,
    /// Where it is
    pub pos: SourcePos,
}


/// A stream of characters, with their positions, that supports one character
/// of lookahead and short bounded backtracking.
///
/// Backtracking is done by calling `mark`, then consuming some items, then
/// either `reset` to rewind to where `mark` was called or `unmark` to commit.
/// There is only one mark at a time: calling `mark` again replaces it.
/// Implementations are only required to support backtracking over a few
/// characters, so callers must not consume more than a short, bounded run
/// while marked.
pub trait SourceStream: Iterator<Item = SourceIterItem> {
    /// Get the next item without consuming it.
    fn peek(&mut self) -> Option<&SourceIterItem>;

    /// The position of the next item, or of the end of the stream if there is
    /// no next item.
    fn position(&self) -> SourcePos;

    /// Remember the current position so that `reset` can return to it.
    fn mark(&mut self);

    /// Rewind to the position remembered by the last `mark`, so that the items
    /// consumed since then will be yielded again.  Does nothing if there is no
    /// mark.  The mark is cleared.
    fn reset(&mut self);

    /// Forget the mark, committing to the items consumed since then.
    fn unmark(&mut self);
}
