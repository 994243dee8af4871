use crate::parser::CharClassifier;


/// A [`CharClassifier`](../trait.CharClassifier.html) that uses the Unicode
/// whitespace property, `\n` and `\r` as line breaks, and alphanumerics and
/// `_` for handles.
#[derive(Copy, Clone, Default, Debug)]
pub struct DefaultCharClassifier;

impl CharClassifier for DefaultCharClassifier {
    #[inline]
    fn is_whitespace(&self, c: char) -> bool {
        c.is_whitespace() && !self.is_line_break(c)
    }

    #[inline]
    fn is_line_break(&self, c: char) -> bool {
        '\n' == c || '\r' == c
    }

    #[inline]
    fn is_handle_begin(&self, c: char) -> bool {
        c.is_alphabetic() || '_' == c
    }

    #[inline]
    fn is_handle_char(&self, c: char) -> bool {
        c.is_alphanumeric() || '_' == c
    }
}
