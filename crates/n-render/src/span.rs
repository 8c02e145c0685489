//! Highlight spans — one colored region on one rendered line.
//!
//! A span is created relative to the leaf that owns it: line 0 is the leaf's
//! first line. The flatten pass never edits a stored span; it emits a copy
//! shifted by the leaf's absolute start line (see [`HighlightSpan::offset`]).
//!
//! Columns are byte offsets into the line text, which is what editor hosts
//! expect for highlight ranges. `last = None` means "to the end of the line".

use std::fmt;

/// A highlight group applied to a column range of one line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HighlightSpan {
    /// Highlight group name, resolved to colors by the host.
    pub group: String,

    /// 0-based line. Relative to the owning leaf until flattened, absolute
    /// afterwards.
    pub line: usize,

    /// First byte column (inclusive).
    pub first: usize,

    /// Last byte column (exclusive). `None` extends to the end of the line.
    pub last: Option<usize>,
}

impl HighlightSpan {
    /// Create a span over `first..last` on `line`.
    #[must_use]
    pub fn new(group: impl Into<String>, line: usize, first: usize, last: usize) -> Self {
        Self {
            group: group.into(),
            line,
            first,
            last: Some(last),
        }
    }

    /// Create a span covering a whole line.
    #[must_use]
    pub fn whole_line(group: impl Into<String>, line: usize) -> Self {
        Self {
            group: group.into(),
            line,
            first: 0,
            last: None,
        }
    }

    /// Create a span from byte column `first` to the end of `line`.
    #[must_use]
    pub fn until_end(group: impl Into<String>, line: usize, first: usize) -> Self {
        Self {
            group: group.into(),
            line,
            first,
            last: None,
        }
    }

    /// A copy of this span moved down by `base` lines.
    #[inline]
    #[must_use]
    pub fn offset(&self, base: usize) -> Self {
        Self {
            group: self.group.clone(),
            line: self.line + base,
            first: self.first,
            last: self.last,
        }
    }

    /// True when the span covers no columns.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.last.is_some_and(|last| last <= self.first)
    }
}

impl fmt::Display for HighlightSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.last {
            Some(last) => write!(f, "{}@{}:{}..{}", self.group, self.line, self.first, last),
            None => write!(f, "{}@{}:{}..", self.group, self.line, self.first),
        }
    }
}
