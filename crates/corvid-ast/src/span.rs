//! Source locations.
//!
//! Every declaration, pattern, expression and type reference carries a
//! [`Span`] so diagnostics can point back at the source text.
//!
//! ```
//! use corvid_ast::span::Span;
//!
//! let name = Span::new(7, 12, 1, 8, 1, 13);
//! let body = Span::new(13, 40, 1, 14, 3, 2);
//! let whole = Span::merge(name, body);
//!
//! assert_eq!(whole.start, 7);
//! assert_eq!(whole.end_line, 3);
//! ```

use std::fmt;

/// Byte range plus 1-indexed line/column of both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Byte offset of the first character
    pub start: usize,

    /// Byte offset one past the last character
    pub end: usize,

    /// Line of `start`
    pub start_line: usize,

    /// Column of `start`, in bytes
    pub start_col: usize,

    /// Line of `end`
    pub end_line: usize,

    /// Column of `end`, in bytes
    pub end_col: usize,
}

impl Span {
    /// Span used for nodes synthesized by the compiler.
    pub const SYNTHESIZED: Span = Span::point(0, 0, 0);

    /// Creates a span from offsets and line/column positions.
    #[must_use]
    pub const fn new(
        start: usize,
        end: usize,
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Self {
        Self {
            start,
            end,
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Zero-length span at one position.
    ///
    /// ```
    /// use corvid_ast::span::Span;
    ///
    /// let eof = Span::point(120, 9, 1);
    /// assert!(eof.is_empty());
    /// ```
    #[must_use]
    pub const fn point(offset: usize, line: usize, col: usize) -> Self {
        Self::new(offset, offset, line, col, line, col)
    }

    /// Span covering `left` through `right`.
    #[must_use]
    pub const fn merge(left: Span, right: Span) -> Self {
        Self {
            start: left.start,
            end: right.end,
            start_line: left.start_line,
            start_col: left.start_col,
            end_line: right.end_line,
            end_col: right.end_col,
        }
    }

    /// Length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` for zero-length spans.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if the node has no source text of its own.
    #[must_use]
    pub const fn is_synthesized(&self) -> bool {
        self.start_line == 0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_synthesized() {
            f.write_str("<synthesized>")
        } else {
            write!(f, "{}:{}", self.start_line, self.start_col)
        }
    }
}

/// Anything with a source location.
pub trait Spanned {
    /// Location of this item.
    fn span(&self) -> Span;
}

impl Spanned for Span {
    fn span(&self) -> Span {
        *self
    }
}
