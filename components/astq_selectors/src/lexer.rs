//! Tokenizer for selector text.
//!
//! Longest-match scanning with whitespace elided. String literals are
//! unquoted and escape-decoded here, so the parser only ever sees their
//! decoded values.

use astq_types::{Position, QueryParseError};

/// The token classes of the selector grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `(alpha | '_') (alpha | digit | '_' | '-')*`
    Ident(String),
    /// Double-quoted string literal, already unescaped.
    Str(String),
    /// Single-quoted string literal, already unescaped.
    Str2(String),
    /// Optional sign followed by one or more digits.
    Number(String),
    /// A single punctuation character.
    Punct(char),
}

/// One token together with the position of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token's class and payload.
    pub kind: TokenKind,
    /// Position of the token's first character.
    pub position: Position,
}

impl Token {
    /// Human-readable rendering for error messages.
    pub fn describe(&self) -> String {
        match &self.kind {
            TokenKind::Ident(name) => format!("`{name}`"),
            TokenKind::Str(value) | TokenKind::Str2(value) => format!("`'{value}'`"),
            TokenKind::Number(digits) => format!("`{digits}`"),
            TokenKind::Punct(ch) => format!("`{ch}`"),
        }
    }
}

/// The lexer's output: the tokens plus the end-of-input position, kept for
/// diagnostics that point past the last token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream {
    /// The tokens, in input order, whitespace elided.
    pub tokens: Vec<Token>,
    /// Position just past the final character of the input.
    pub eof: Position,
}

/// Tokenizes selector text.
///
/// Fails on unterminated string literals and on characters outside the
/// token alphabet, reporting the offending position.
pub fn tokenize(input: &str) -> Result<TokenStream, QueryParseError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();
    let mut pos = Position::start();

    while let Some(&ch) = chars.peek() {
        let start = pos;
        match ch {
            ' ' | '\t' | '\r' | '\n' => {
                chars.next();
                pos.advance(ch);
            }
            _ if ch.is_ascii_alphabetic() || ch == '_' => {
                let mut name = String::new();
                while let Some(&next) = chars.peek() {
                    if next.is_ascii_alphanumeric() || next == '_' || next == '-' {
                        name.push(next);
                        chars.next();
                        pos.advance(next);
                    } else {
                        break;
                    }
                }
                tokens.push(Token {
                    kind: TokenKind::Ident(name),
                    position: start,
                });
            }
            '"' | '\'' => {
                chars.next();
                pos.advance(ch);
                let mut value = String::new();
                let mut closed = false;
                while let Some(next) = chars.next() {
                    pos.advance(next);
                    if next == '\\' {
                        match chars.next() {
                            Some(escaped) => {
                                pos.advance(escaped);
                                value.push(unescape(escaped));
                            }
                            None => break,
                        }
                    } else if next == ch {
                        closed = true;
                        break;
                    } else {
                        value.push(next);
                    }
                }
                if !closed {
                    return Err(QueryParseError {
                        position: start,
                        expected: format!("closing `{ch}`"),
                        found: "end of input".to_string(),
                    });
                }
                let kind = if ch == '"' {
                    TokenKind::Str(value)
                } else {
                    TokenKind::Str2(value)
                };
                tokens.push(Token {
                    kind,
                    position: start,
                });
            }
            _ if ch.is_ascii_digit() || (sign(ch) && digit_follows(&chars)) => {
                let mut digits = String::new();
                if sign(ch) {
                    digits.push(ch);
                    chars.next();
                    pos.advance(ch);
                }
                while let Some(&next) = chars.peek() {
                    if next.is_ascii_digit() {
                        digits.push(next);
                        chars.next();
                        pos.advance(next);
                    } else {
                        break;
                    }
                }
                tokens.push(Token {
                    kind: TokenKind::Number(digits),
                    position: start,
                });
            }
            _ if ch.is_ascii_punctuation() => {
                chars.next();
                pos.advance(ch);
                tokens.push(Token {
                    kind: TokenKind::Punct(ch),
                    position: start,
                });
            }
            other => {
                return Err(QueryParseError {
                    position: start,
                    expected: "an identifier, string, number, or punctuation".to_string(),
                    found: format!("`{other}`"),
                });
            }
        }
    }

    Ok(TokenStream { tokens, eof: pos })
}

fn sign(ch: char) -> bool {
    ch == '+' || ch == '-'
}

fn digit_follows(chars: &std::iter::Peekable<std::str::Chars<'_>>) -> bool {
    let mut look = chars.clone();
    look.next();
    matches!(look.next(), Some(next) if next.is_ascii_digit())
}

fn unescape(ch: char) -> char {
    match ch {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        other => other,
    }
}
