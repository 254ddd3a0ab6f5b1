//! Locations inside selector text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in selector text.
///
/// `line` and `column` are 1-based and count characters; `offset` is the
/// 0-based byte offset into the original string.
///
/// # Examples
///
/// ```
/// use astq_types::Position;
///
/// let mut pos = Position::start();
/// pos.advance('a');
/// pos.advance('\n');
/// assert_eq!(pos.line, 2);
/// assert_eq!(pos.column, 1);
/// assert_eq!(pos.offset, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
    /// 0-based byte offset.
    pub offset: usize,
}

impl Position {
    /// The position of the first character of the input.
    pub fn start() -> Self {
        Position {
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Creates a position from its three coordinates.
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Position {
            line,
            column,
            offset,
        }
    }

    /// Moves the position past `ch`.
    pub fn advance(&mut self, ch: char) {
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
