use std::fmt;

use hdl_ir::Span;

/// Category of a source-located error.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorKind {
    Parse,
    Type,
    /// A test assertion, runtime failure, or falsified quickcheck.
    Failure,
    Internal,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Parse => "ParseError",
            ErrorKind::Type => "TypeInferenceError",
            ErrorKind::Failure => "FailureError",
            ErrorKind::Internal => "InternalError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error that points at a span of the module's source.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PositionalError {
    pub span: Span,
    pub kind: ErrorKind,
    pub message: String,
}

impl PositionalError {
    pub fn new(span: Span, kind: ErrorKind, message: impl Into<String>) -> Self {
        PositionalError {
            span,
            kind,
            message: message.into(),
        }
    }

    pub fn failure(span: Span, message: impl Into<String>) -> Self {
        Self::new(span, ErrorKind::Failure, message)
    }

    /// Message prefixed with the error category, e.g. `FailureError: ...`.
    pub fn message_with_type(&self) -> String {
        format!("{}: {}", self.kind, self.message)
    }
}

impl fmt::Display for PositionalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.message_with_type(), self.span)
    }
}

impl std::error::Error for PositionalError {}
