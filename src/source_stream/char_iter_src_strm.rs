//! A generic `SourceStream` implementation for any `Iterator` of `char`s and
//! that provides the position of each `char` relative to the start of the
//! iteration.

use std::collections::VecDeque;

use crate::{SourceStream, SourceIterItem, SourcePos};


/// A generic [`SourceStream`] implementation for any `Iterator` of `char`s and
/// that provides the position of each `char` relative to the start of the
/// iteration.
///
/// This is useful for streaming sources that are not entirely in memory.  Only
/// the `char`s consumed since the last `mark` are retained, to be replayed
/// after a `reset`, so memory use stays bounded by the parser's short
/// backtracking.
///
/// [`SourceStream`]: ../../surf_core/source_stream/trait.SourceStream.html
#[derive(Debug)]
pub struct CharIterSourceStream<CI>
    where CI: Iterator<Item = char>,
{
    iter: CI,
    pos: SourcePos,
    /// Items already pulled from `iter`, or replayed by `reset`, that are not
    /// consumed yet.
    pending: VecDeque<SourceIterItem>,
    /// The marked position and the items consumed since then.
    recording: Option<(SourcePos, Vec<SourceIterItem>)>,
}

impl<CI> CharIterSourceStream<CI>
    where CI: Iterator<Item = char>,
{
    /// Given anything that can convert into an `Iterator` of `char`s, make a
    /// new `SourceStream` from it that yields its `char`s and their positions
    /// relative to the start of the iteration.
    pub fn new<I>(iter: I) -> Self
        where I: IntoIterator<IntoIter = CI, Item = char>,
    {
        Self {
            iter: iter.into_iter(),
            pos: SourcePos::START,
            pending: VecDeque::new(),
            recording: None,
        }
    }

    /// Only called when nothing is pending, so the next `char` is at `pos`.
    fn pull(&mut self) -> Option<SourceIterItem> {
        let pos = self.pos;
        self.iter.next().map(|ch| SourceIterItem { ch, pos })
    }
}


/// Required by `SourceStream`.
impl<CI> Iterator for CharIterSourceStream<CI>
    where CI: Iterator<Item = char>,
{
    type Item = SourceIterItem;

    fn next(&mut self) -> Option<Self::Item> {
        let item = match self.pending.pop_front() {
            Some(item) => item,
            None => self.pull()?,
        };
        self.pos = item.pos.advance(item.ch);
        if let Some((_, consumed)) = &mut self.recording {
            consumed.push(item);
        }
        Some(item)
    }
}


/// Enables `CharIterSourceStream` to be used as the input source for parsing.
impl<CI> SourceStream for CharIterSourceStream<CI>
    where CI: Iterator<Item = char>,
{
    fn peek(&mut self) -> Option<&SourceIterItem> {
        if self.pending.is_empty() {
            let item = self.pull()?;
            self.pending.push_back(item);
        }
        self.pending.front()
    }

    #[inline]
    fn position(&self) -> SourcePos {
        self.pos
    }

    #[inline]
    fn mark(&mut self) {
        self.recording = Some((self.pos, Vec::new()));
    }

    fn reset(&mut self) {
        if let Some((pos, consumed)) = self.recording.take() {
            for item in consumed.into_iter().rev() {
                self.pending.push_front(item);
            }
            self.pos = pos;
        }
    }

    #[inline]
    fn unmark(&mut self) {
        self.recording = None;
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn pos(char_pos: usize, line: usize, column: usize) -> SourcePos {
        SourcePos { char_pos, line, column }
    }

    #[test]
    fn iter() {
        let mut ciss0 = CharIterSourceStream::new("".chars());
        assert!(ciss0.next().is_none());

        let ciss1 = CharIterSourceStream::new("a".chars());
        assert_eq!(ciss1.collect::<Vec<_>>(),
                   vec![SourceIterItem{ch: 'a', pos: pos(0, 1, 1)}]);

        let ciss2 = CharIterSourceStream::new("λ\nb".chars());
        assert_eq!(ciss2.collect::<Vec<_>>(),
                   vec![SourceIterItem{ch: 'λ', pos: pos(0, 1, 1)},
                        SourceIterItem{ch: '\n', pos: pos(1, 1, 2)},
                        SourceIterItem{ch: 'b', pos: pos(2, 2, 1)}]);

        let ciss3 = CharIterSourceStream::new(" 1 ".chars().chain("23".chars()));
        assert_eq!(ciss3.map(|i| i.pos.char_pos).collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);

        let ciss4 = CharIterSourceStream::new(
            (0..4321).map(|n| if n % 2 == 0 { 'λ' } else { '-' }));
        assert_eq!(ciss4.collect::<Vec<_>>(),
                   (0..4321)
                   .map(|n| SourceIterItem{ch: if n % 2 == 0 { 'λ' } else { '-' },
                                           pos: pos(n, 1, n + 1)})
                   .collect::<Vec<_>>());
    }

    #[test]
    fn source_stream() {
        let mut ciss = CharIterSourceStream::new("tru\nx".chars());
        assert_eq!(ciss.position(), SourcePos::START);
        assert_eq!(ciss.peek(), Some(&SourceIterItem{ch: 't', pos: pos(0, 1, 1)}));
        assert_eq!(ciss.position(), SourcePos::START);

        ciss.mark();
        assert_eq!(ciss.by_ref().take(4).map(|i| i.ch).collect::<String>(), "tru\n");
        assert_eq!(ciss.position(), pos(4, 2, 1));
        assert_eq!(ciss.peek(), Some(&SourceIterItem{ch: 'x', pos: pos(4, 2, 1)}));
        ciss.reset();
        assert_eq!(ciss.position(), SourcePos::START);
        assert_eq!(ciss.peek(), Some(&SourceIterItem{ch: 't', pos: pos(0, 1, 1)}));
        assert_eq!(ciss.by_ref().map(|i| i.ch).collect::<String>(), "tru\nx");
        assert_eq!(ciss.peek(), None);
        assert_eq!(ciss.position(), pos(5, 2, 2));

        let mut ciss = CharIterSourceStream::new("abc".chars());
        let _ = ciss.next();
        ciss.mark();
        let _ = ciss.next();
        ciss.unmark();
        ciss.reset();
        assert_eq!(ciss.next(), Some(SourceIterItem{ch: 'c', pos: pos(2, 1, 3)}));

        // Resetting twice only rewinds to the mark once.
        let mut ciss = CharIterSourceStream::new("abc".chars());
        ciss.mark();
        let _ = ciss.next();
        ciss.reset();
        let _ = ciss.next();
        ciss.reset();
        assert_eq!(ciss.next().map(|i| i.ch), Some('b'));
    }
}
