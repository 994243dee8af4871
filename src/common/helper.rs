use std::io::{self, BufRead};


/// The `char`s of a `BufRead`, decoded a line at a time.
///
/// An I/O or UTF-8 error ends the iteration and is kept in `error`, so that a
/// truncated input can be told apart from a syntax error.
#[derive(Debug)]
pub(crate) struct ReaderChars<R> {
    reader: R,
    line: Vec<char>,
    next: usize,
    pub(crate) error: Option<io::Error>,
}

impl<R> ReaderChars<R>
    where R: BufRead,
{
    pub(crate) fn new(reader: R) -> Self {
        Self { reader, line: Vec::new(), next: 0, error: None }
    }
}

impl<R> Iterator for ReaderChars<R>
    where R: BufRead,
{
    type Item = char;

    fn next(&mut self) -> Option<char> {
        if self.next == self.line.len() {
            if self.error.is_some() {
                return None;
            }
            let mut buf = String::new();
            match self.reader.read_line(&mut buf) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line = buf.chars().collect();
                    self.next = 0;
                }
                Err(e) => {
                    self.error = Some(e);
                    return None;
                }
            }
        }
        let ch = self.line[self.next];
        self.next += 1;
        Some(ch)
    }
}
