//! This module implements `TemporalError`.

use alloc::borrow::Cow;
use core::fmt;

/// `TemporalError`'s error type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Error.
    #[default]
    Generic,
    /// A value lies outside the range a rule accepts.
    Range,
    /// No rule is registered for an element or unit on a chronology.
    RuleNotFound,
    /// Integer overflow during duration folding or rule application.
    Arithmetic,
    /// An operator cannot resolve its element on the target type.
    Navigation,
    /// Malformed duration text.
    Syntax,
    /// An internal assertion failed.
    Assert,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => "Error",
            Self::Range => "RangeError",
            Self::RuleNotFound => "RuleNotFoundError",
            Self::Arithmetic => "ArithmeticError",
            Self::Navigation => "NavigationError",
            Self::Syntax => "SyntaxError",
            Self::Assert => "ImplementationError",
        }
        .fmt(f)
    }
}

/// The error type for `temporal_engine`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalError {
    kind: ErrorKind,
    msg: Cow<'static, str>,
}

impl TemporalError {
    #[inline]
    #[must_use]
    const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            msg: Cow::Borrowed(""),
        }
    }

    /// Create a generic error
    #[inline]
    #[must_use]
    pub fn general<S>(msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        Self::new(ErrorKind::Generic).with_message(msg)
    }

    /// Create a range error.
    #[inline]
    #[must_use]
    pub const fn range() -> Self {
        Self::new(ErrorKind::Range)
    }

    /// Create a rule not found error.
    #[inline]
    #[must_use]
    pub const fn rule_not_found() -> Self {
        Self::new(ErrorKind::RuleNotFound)
    }

    /// Create an arithmetic overflow error.
    #[inline]
    #[must_use]
    pub const fn arithmetic() -> Self {
        Self::new(ErrorKind::Arithmetic)
    }

    /// Create an unsupported navigation error.
    #[inline]
    #[must_use]
    pub const fn navigation() -> Self {
        Self::new(ErrorKind::Navigation)
    }

    /// Create a syntax error.
    #[inline]
    #[must_use]
    pub const fn syntax() -> Self {
        Self::new(ErrorKind::Syntax)
    }

    /// Creates an assertion error
    #[inline]
    #[must_use]
    pub(crate) const fn assert() -> Self {
        Self {
            kind: ErrorKind::Assert,
            msg: Cow::Borrowed("implementation error"),
        }
    }

    /// Add a message to the error.
    #[inline]
    #[must_use]
    pub fn with_message<S>(mut self, msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        self.msg = msg.into();
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Extracts the error message.
    #[inline]
    #[must_use]
    pub fn into_message(self) -> Cow<'static, str> {
        self.msg
    }
}

impl fmt::Display for TemporalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        let msg = self.msg.trim();
        if !msg.is_empty() {
            write!(f, ": {msg}")?;
        }

        Ok(())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TemporalError {}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, TemporalError};
    use alloc::string::ToString;

    #[test]
    fn display_includes_kind_and_message() {
        let err = TemporalError::range().with_message("day-of-month out of range");
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(err.to_string(), "RangeError: day-of-month out of range");
        assert_eq!(TemporalError::arithmetic().to_string(), "ArithmeticError");
    }

    #[test]
    fn general_carries_message() {
        let err = TemporalError::general("oops");
        assert_eq!(err.kind(), ErrorKind::Generic);
        assert_eq!(err.message(), "oops");
    }
}
