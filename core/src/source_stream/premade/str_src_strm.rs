use crate::{SourceStream, SourceIterItem, SourcePos};


/// A [`SourceStream`] over a single in-memory `&str`.
///
/// Backtracking is unbounded and free, because rewinding only restores a byte
/// index into the string.
///
/// [`SourceStream`]: ../trait.SourceStream.html
#[derive(Clone, Debug)]
pub struct StrSourceStream<'s> {
    src: &'s str,
    byte_pos: usize,
    pos: SourcePos,
    peeked: Option<SourceIterItem>,
    marked: Option<(usize, SourcePos)>,
}

impl<'s> StrSourceStream<'s> {
    /// Make a new stream that yields the characters of `src` from its start.
    #[inline]
    pub fn new(src: &'s str) -> Self {
        Self {
            src,
            byte_pos: 0,
            pos: SourcePos::START,
            peeked: None,
            marked: None,
        }
    }

    /// The part of the input not yet consumed.
    #[inline]
    pub fn remaining(&self) -> &'s str {
        &self.src[self.byte_pos ..]
    }
}

impl<'s> From<&'s str> for StrSourceStream<'s> {
    #[inline]
    fn from(src: &'s str) -> Self {
        Self::new(src)
    }
}


impl Iterator for StrSourceStream<'_> {
    type Item = SourceIterItem;

    fn next(&mut self) -> Option<Self::Item> {
        let item = match self.peeked.take() {
            Some(item) => item,
            None => SourceIterItem { ch: self.remaining().chars().next()?,
                                     pos: self.pos },
        };
        self.byte_pos += item.ch.len_utf8();
        self.pos = self.pos.advance(item.ch);
        Some(item)
    }
}


impl SourceStream for StrSourceStream<'_> {
    fn peek(&mut self) -> Option<&SourceIterItem> {
        if self.peeked.is_none() {
            let next = self.remaining().chars().next();
            self.peeked = next.map(|ch| SourceIterItem { ch, pos: self.pos });
        }
        self.peeked.as_ref()
    }

    #[inline]
    fn position(&self) -> SourcePos {
        self.pos
    }

    #[inline]
    fn mark(&mut self) {
        self.marked = Some((self.byte_pos, self.pos));
    }

    fn reset(&mut self) {
        if let Some((byte_pos, pos)) = self.marked.take() {
            self.byte_pos = byte_pos;
            self.pos = pos;
            self.peeked = None;
        }
    }

    #[inline]
    fn unmark(&mut self) {
        self.marked = None;
    }
}
