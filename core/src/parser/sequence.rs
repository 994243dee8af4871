use crate::{
    SourceStream,
    error::{ErrorKind, ParseResult},
    syntax::SEQUENCE_DELIMITER,
};
use super::{CharClassifier, LabelBindings, ParseContext};


impl<CC, S, LB> ParseContext<'_, CC, S, LB>
    where CC: CharClassifier,
          S: SourceStream,
          LB: LabelBindings,
{
    /// Parse the items of a sequence up to and including `end`, calling `item`
    /// to parse each one.  The opening delimiter must already be consumed.
    ///
    /// A comma between items forces another item to follow, so a comma before
    /// `end` is an error.  Line breaks between items permit another item
    /// without forcing one, and any run of line breaks and comments counts
    /// once.  A comment alone never separates items.
    pub(super) fn parse_sequence<F>(&mut self, end: char, mut item: F) -> ParseResult<()>
        where F: FnMut(&mut Self) -> ParseResult<()>,
    {
        let mut item_forced = false;
        loop {
            let _ = self.skip_filler_and_line_breaks();
            match self.peek_char() {
                Some(ch) if ch == end => {
                    if item_forced {
                        return Err(self.error(ErrorKind::TrailingSeparator));
                    }
                    let _ = self.next_char();
                    return Ok(());
                }
                Some(_) => {}
                None => return Err(self.unexpected(&format!("`{}`", end))),
            }

            item(self)?;

            let line_break = self.skip_filler_and_line_breaks();
            match self.peek_char() {
                Some(SEQUENCE_DELIMITER) => {
                    let _ = self.next_char();
                    item_forced = true;
                }
                Some(ch) if ch == end => {
                    let _ = self.next_char();
                    return Ok(());
                }
                Some(_) if line_break => item_forced = false,
                _ => {
                    return Err(self.unexpected(&format!("`{}`, a line break, or `{}`",
                                                        SEQUENCE_DELIMITER, end)));
                }
            }
        }
    }
}
