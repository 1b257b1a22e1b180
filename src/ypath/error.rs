//! Error taxonomy for the YPath query engine.

use std::fmt;

/// A byte-offset span into the original path expression text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub(crate) fn join(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    pub(crate) fn join_opt(a: Option<Span>, b: Option<Span>) -> Option<Span> {
        match (a, b) {
            (Some(a), Some(b)) => Some(a.join(b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        }
    }
}

/// Error produced while parsing or evaluating a YPath expression.
#[derive(Debug, Clone, PartialEq)]
pub enum PathError {
    /// The tokenizer found an illegal character, an unterminated literal, or a
    /// numeric literal that overflows.
    Lex { span: Span, message: String },

    /// The shunting-yard parser found a missing or ill-typed operand, or a
    /// terminating filter (`**`, `**$`, `$`, `%`, `[]`, `{}`) that is not the
    /// last element of its chain.
    Parse { span: Span, message: String },

    /// The flow-YAML builder used for `"..."`/`'...'`/`{...}`/`[...]` map-key
    /// literals rejected the matched text.
    Document { span: Span, message: String },

    /// A collaborator (allocation, FFI) failed in a way unrelated to the
    /// expression text itself.
    Resource { message: String },
}

impl PathError {
    pub(crate) fn lex(span: Span, message: impl Into<String>) -> Self {
        PathError::Lex {
            span,
            message: message.into(),
        }
    }

    pub(crate) fn parse(span: Span, message: impl Into<String>) -> Self {
        PathError::Parse {
            span,
            message: message.into(),
        }
    }

    pub(crate) fn document(span: Span, message: impl Into<String>) -> Self {
        PathError::Document {
            span,
            message: message.into(),
        }
    }

    /// The span of expression text this error points at, if any.
    pub fn span(&self) -> Option<Span> {
        match self {
            PathError::Lex { span, .. } => Some(*span),
            PathError::Parse { span, .. } => Some(*span),
            PathError::Document { span, .. } => Some(*span),
            PathError::Resource { .. } => None,
        }
    }

    /// The human-readable message, without location information.
    pub fn message(&self) -> &str {
        match self {
            PathError::Lex { message, .. } => message,
            PathError::Parse { message, .. } => message,
            PathError::Document { message, .. } => message,
            PathError::Resource { message } => message,
        }
    }
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span() {
            Some(span) => write!(
                f,
                "{} (at byte {}..{})",
                self.message(),
                span.start,
                span.end
            ),
            None => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for PathError {}
