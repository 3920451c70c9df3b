//! A scanner over source text, yielding lines and whitespace-delimited tokens with byte ranges.

use std::ops::Range;

use super::{LexWarning, LexWarningWithRange};
use crate::mixin::SourceRangeMixinExt;

/// A cursor on a source string.
///
/// All ranges it returns are absolute: they are offset by the `base` given on construction, so a
/// cursor over one line of a file reports positions in the whole file.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    /// The index position in `source`.
    index: usize,
    /// The absolute index of the start of `source`.
    base: usize,
    /// The source str.
    source: &'a str,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor over `source`, which starts at the absolute index `base`.
    #[must_use]
    pub const fn new(source: &'a str, base: usize) -> Self {
        Self {
            index: 0,
            base,
            source,
        }
    }

    /// Whether only whitespace remains.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.peek_next_token().is_none()
    }

    fn peek_next_token_range(&self) -> Range<usize> {
        let rest = self.source.get(self.index..).unwrap_or("");
        let start = rest
            .find(|c: char| !c.is_whitespace())
            .map_or(self.source.len(), |i| i + self.index);
        let end = self
            .source
            .get(start..)
            .and_then(|rest| rest.find(char::is_whitespace))
            .map_or(self.source.len(), |i| i + start);
        start..end
    }

    /// Returns the next token without moving.
    #[must_use]
    pub fn peek_next_token(&self) -> Option<&'a str> {
        let range = self.peek_next_token_range();
        if range.is_empty() {
            return None;
        }
        self.source.get(range)
    }

    /// Moves through the next token and returns it with its absolute range.
    pub fn next_token_with_range(&mut self) -> Option<(Range<usize>, &'a str)> {
        let range = self.peek_next_token_range();
        if range.is_empty() {
            return None;
        }
        let token = self.source.get(range.clone())?;
        self.index = range.end;
        Some((self.absolute(range), token))
    }

    /// Moves through the next token and returns it.
    pub fn next_token(&mut self) -> Option<&'a str> {
        self.next_token_with_range().map(|(_, token)| token)
    }

    /// Moves through the rest of the current line and returns it trimmed, with its absolute range.
    /// The line feed is consumed but not returned, and a carriage return before it is dropped.
    ///
    /// Returns `None` at the end of the source.
    pub fn next_line(&mut self) -> Option<(Range<usize>, &'a str)> {
        let rest = self.source.get(self.index..)?;
        if rest.is_empty() {
            return None;
        }
        let (content_len, consumed) = match rest.find('\n') {
            Some(lf) => (lf, lf + 1),
            None => (rest.len(), rest.len()),
        };
        let content = rest.get(..content_len).unwrap_or("");
        let content = content.strip_suffix('\r').unwrap_or(content);
        let leading = content.len() - content.trim_start().len();
        let trimmed = content.trim();
        let start = self.index + leading;
        self.index += consumed;
        Some((self.absolute(start..start + trimmed.len()), trimmed))
    }

    /// Moves through the rest of the current line and returns it trimmed, with its absolute range.
    pub fn next_line_remaining(&mut self) -> (Range<usize>, &'a str) {
        self.next_line()
            .unwrap_or_else(|| (self.absolute(self.index..self.index), ""))
    }

    /// Returns the current absolute byte index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.base + self.index
    }

    /// Returns the absolute range of the whole source.
    #[must_use]
    pub const fn full_range(&self) -> Range<usize> {
        self.base..self.base + self.source.len()
    }

    /// Makes a warning for a missing token, spanning the whole source.
    #[must_use]
    pub fn make_err_expected_token(&self, expected: impl Into<String>) -> LexWarningWithRange {
        LexWarning::ExpectedToken {
            expected: expected.into(),
        }
        .into_wrapper_range(self.full_range())
    }

    const fn absolute(&self, range: Range<usize>) -> Range<usize> {
        self.base + range.start..self.base + range.end
    }
}
