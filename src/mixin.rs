//! Values tagged with the byte range of the source text they came from.
//!
//! Warnings of the text reader are wrapped in [`SourceRangeMixin`], so they can point back into
//! the file, see [`crate::diagnostics`].

use std::{
    fmt::{self, Display, Formatter},
    ops::Range,
};

/// A value with the byte range `start..end` of the source it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceRangeMixin<T> {
    content: T,
    start: usize,
    end: usize,
}

impl<T> SourceRangeMixin<T> {
    /// Tags `content` with a byte range.
    #[must_use]
    pub fn new(content: T, range: Range<usize>) -> Self {
        Self {
            content,
            start: range.start,
            end: range.end,
        }
    }

    /// The tagged value.
    #[must_use]
    pub const fn content(&self) -> &T {
        &self.content
    }

    /// The byte range in the source.
    #[must_use]
    pub const fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Whether the range covers no byte, as for values not read from a line.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

impl<T: Display> Display for SourceRangeMixin<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} at bytes {}..{}", self.content, self.start, self.end)
    }
}

impl<T: std::error::Error + 'static> std::error::Error for SourceRangeMixin<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.content)
    }
}

/// Wraps any value into a [`SourceRangeMixin`].
pub trait SourceRangeMixinExt: Sized {
    /// Tags the value with a byte range.
    fn into_wrapper_range(self, range: Range<usize>) -> SourceRangeMixin<Self> {
        SourceRangeMixin::new(self, range)
    }
}

impl<T> SourceRangeMixinExt for T {}
