//! Diagnostics.
//!
//! Semantic passes produce [`Diagnostic`] values and keep going. Rendering
//! them against source text is left to the driver.

use crate::span::Span;
use std::fmt;

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity
    pub level: DiagnosticLevel,
    /// Stable error code such as `E101`
    pub code: Option<String>,
    /// Primary message
    pub message: String,
    /// Primary location
    pub span: Span,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Secondary locations
    pub notes: Vec<DiagnosticNote>,
}

impl Diagnostic {
    /// Returns `true` for [`DiagnosticLevel::Error`].
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == DiagnosticLevel::Error
    }
}

/// Severity of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticLevel {
    /// The program is rejected
    Error,
    /// Suspicious but accepted
    Warning,
    /// Extra context
    Note,
    /// Suggested fix
    Help,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Note => "note",
            Self::Help => "help",
        })
    }
}

/// Secondary message attached to a [`Diagnostic`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticNote {
    /// Note text
    pub message: String,
    /// Where the note points
    pub span: Span,
}

/// Fluent constructor for [`Diagnostic`].
///
/// ```
/// use corvid_ast::diagnostic::{DiagnosticBuilder, DiagnosticLevel};
/// use corvid_ast::span::Span;
///
/// let diag = DiagnosticBuilder::new(DiagnosticLevel::Error, "subscript must be a member", Span::point(0, 1, 1))
///     .code("E105")
///     .suggest("move the subscript into a type")
///     .build();
///
/// assert_eq!(diag.code.as_deref(), Some("E105"));
/// ```
#[derive(Debug)]
pub struct DiagnosticBuilder {
    diagnostic: Diagnostic,
}

impl DiagnosticBuilder {
    /// Starts a diagnostic.
    #[must_use]
    pub fn new(level: DiagnosticLevel, message: impl Into<String>, span: Span) -> Self {
        Self {
            diagnostic: Diagnostic {
                level,
                code: None,
                message: message.into(),
                span,
                suggestions: Vec::new(),
                notes: Vec::new(),
            },
        }
    }

    /// Sets the error code.
    #[must_use]
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.diagnostic.code = Some(code.into());
        self
    }

    /// Adds a suggestion.
    #[must_use]
    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.diagnostic.suggestions.push(suggestion.into());
        self
    }

    /// Adds a note at `span`.
    #[must_use]
    pub fn note(mut self, message: impl Into<String>, span: Span) -> Self {
        self.diagnostic.notes.push(DiagnosticNote {
            message: message.into(),
            span,
        });
        self
    }

    /// Finishes the diagnostic.
    #[must_use]
    pub fn build(self) -> Diagnostic {
        self.diagnostic
    }
}
