//! # error.rs
//!
//! Errors reported while turning an expression string into an
//! [`ExpressionTree`](crate::ExpressionTree).
//!
//! Every failure is detected at parse time and aborts the whole pipeline;
//! evaluation itself never fails (numeric edge cases such as division by zero
//! follow IEEE floating-point semantics instead).

use std::fmt;

/// Byte offset of a failure in the original expression string.
///
/// Whitespace is skipped rather than removed before scanning, so the offset
/// always points into the string the caller passed in. Some failures (an empty
/// expression, for one) have no meaningful location; those carry
/// [`Position::UNKNOWN`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position(Option<usize>);

impl Position {
    /// Sentinel for failures that cannot be pinned to a character.
    pub const UNKNOWN: Self = Self(None);

    /// A known byte offset.
    pub const fn at(offset: usize) -> Self {
        Self(Some(offset))
    }

    /// Returns the byte offset, if known.
    pub const fn offset(&self) -> Option<usize> {
        self.0
    }

    /// Returns `true` when the position points at an actual character.
    pub const fn is_known(&self) -> bool {
        self.0.is_some()
    }
}

impl From<usize> for Position {
    fn from(offset: usize) -> Self {
        Self::at(offset)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(offset) => write!(f, "position {offset}"),
            None => f.write_str("unknown position"),
        }
    }
}

/// All the ways parsing an expression can fail.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Unrecognized character or malformed numeric literal.
    #[error("{message} at {position}")]
    LexError {
        message: String,
        position: Position,
    },

    /// A function argument list was opened but never closed.
    #[error("missing closing bracket for '(' at {position}")]
    MissingClosingBracket {
        position: Position,
    },

    /// A `)` without a matching `(`, or a `(` still open at end of input.
    #[error("unbalanced parentheses at {position}")]
    UnbalancedParentheses {
        position: Position,
    },

    /// A letter run that does not name a registered function.
    #[error("unknown function '{name}' at {position}")]
    UnknownFunction {
        name: String,
        position: Position,
    },

    /// A function received the wrong number of arguments, or one of its
    /// arguments did not reduce to a single token.
    #[error("'{function}' expects {expected} {what}, found {found} at {position}")]
    ArgumentArityMismatch {
        function: String,
        what: &'static str,
        expected: usize,
        found: usize,
        position: Position,
    },

    /// An operator without two operands to bind.
    #[error("missing operand at {position}")]
    MissingOperand {
        position: Position,
    },

    /// Two operands side by side with nothing joining them (e.g. `x2`).
    #[error("operand without operator at {position}")]
    ExtraOperand {
        position: Position,
    },

    /// Parentheses or function calls nested past the configured limit.
    #[error("nesting deeper than {limit} levels at {position}")]
    NestingTooDeep {
        limit: usize,
        position: Position,
    },
}

impl ParseError {
    /// Returns where in the input the failure was detected.
    pub fn position(&self) -> Position {
        match self {
            Self::LexError { position, .. }
            | Self::MissingClosingBracket { position }
            | Self::UnbalancedParentheses { position }
            | Self::UnknownFunction { position, .. }
            | Self::ArgumentArityMismatch { position, .. }
            | Self::MissingOperand { position }
            | Self::ExtraOperand { position }
            | Self::NestingTooDeep { position, .. } => *position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_display() {
        assert_eq!(Position::at(4).to_string(), "position 4");
        assert_eq!(Position::UNKNOWN.to_string(), "unknown position");
        assert!(Position::from(0).is_known());
        assert!(!Position::default().is_known());
    }

    #[test]
    fn test_error_messages() {
        let err = ParseError::UnknownFunction { name: "foo".into(), position: Position::at(0) };
        assert_eq!(err.to_string(), "unknown function 'foo' at position 0");

        let err = ParseError::ArgumentArityMismatch {
            function: "pow".into(),
            what: "arguments",
            expected: 2,
            found: 1,
            position: Position::at(3),
        };
        assert_eq!(err.to_string(), "'pow' expects 2 arguments, found 1 at position 3");

        let err = ParseError::MissingOperand { position: Position::UNKNOWN };
        assert_eq!(err.to_string(), "missing operand at unknown position");
    }

    #[test]
    fn test_position_accessor() {
        let err = ParseError::MissingClosingBracket { position: Position::at(3) };
        assert_eq!(err.position().offset(), Some(3));
        let err = ParseError::NestingTooDeep { limit: 2, position: Position::at(7) };
        assert_eq!(err.position(), Position::at(7));
    }
}
