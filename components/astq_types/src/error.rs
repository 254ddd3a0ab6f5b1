//! Error types shared across the astq components.
//!
//! Each failure mode that crosses a component boundary has its own type so
//! callers can match on exactly the cases they handle; [`AstqError`] folds
//! them into one enum for surfaces that treat every failure the same way.

use crate::position::Position;
use thiserror::Error;

/// Selector text failed to parse.
///
/// Carries the furthest position the parser reached together with a
/// description of what it wanted to see there.
///
/// # Examples
///
/// ```
/// use astq_types::{Position, QueryParseError};
///
/// let err = QueryParseError {
///     position: Position::new(1, 9, 8),
///     expected: "a quoted string".to_string(),
///     found: "`]`".to_string(),
/// };
/// assert_eq!(err.to_string(), "1:9: expected a quoted string, found `]`");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{position}: expected {expected}, found {found}")]
pub struct QueryParseError {
    /// Where the parser gave up.
    pub position: Position,
    /// Description of the token class the parser wanted next.
    pub expected: String,
    /// The offending token, or `end of input`.
    pub found: String,
}

/// The host-language parser rejected the source text.
///
/// The message is surfaced unchanged from the host parser.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot parse source: {0}")]
pub struct SourceParseError(pub String);

/// A replace-mode child command failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("command `{command}` failed ({status}): {stderr}")]
pub struct ChildProcessError {
    /// The command line that was run.
    pub command: String,
    /// The child's exit status, as reported by the operating system.
    pub status: String,
    /// Captured standard error of the child.
    pub stderr: String,
}

/// Any failure the astq stack can produce.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AstqError {
    /// See [`QueryParseError`].
    #[error(transparent)]
    Query(#[from] QueryParseError),

    /// See [`SourceParseError`].
    #[error(transparent)]
    Source(#[from] SourceParseError),

    /// See [`ChildProcessError`].
    #[error(transparent)]
    Child(#[from] ChildProcessError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_trait() {
        let err = SourceParseError("unexpected token".to_string());
        let _: &dyn Error = &err;
    }

    #[test]
    fn test_query_parse_error_message() {
        let err = QueryParseError {
            position: Position::new(2, 4, 10),
            expected: "`]`".to_string(),
            found: "end of input".to_string(),
        };
        assert_eq!(err.to_string(), "2:4: expected `]`, found end of input");
    }

    #[test]
    fn test_child_process_error_message() {
        let err = ChildProcessError {
            command: "sed -e p".to_string(),
            status: "exit status: 1".to_string(),
            stderr: "sed: bad flag".to_string(),
        };
        assert!(err.to_string().contains("sed -e p"));
        assert!(err.to_string().contains("sed: bad flag"));
    }

    #[test]
    fn test_conversion_into_astq_error() {
        let err: AstqError = SourceParseError("boom".to_string()).into();
        assert!(matches!(err, AstqError::Source(_)));
    }
}
