//! The selector grammar, parsed with nom over the lexed token stream.
//!
//! ```text
//! Query          = [ Selector { ',' Selector } ]
//! Selector       = SimpleSelector { SimpleSelector }
//! SimpleSelector = [ Combinator ] [ Name ] { Option }
//! Combinator     = '>' | '+' | '~'
//! Name           = Ident | '*'
//! Option         = '[' Attribute ']' | ':' Pseudo
//! Attribute      = Ident [ AttrOp (String | String2) ]
//! AttrOp         = '=' | '~=' | '|=' | '^=' | '$=' | '*='
//! Pseudo         = 'empty' | 'first-child' | 'first-of-type'
//!                | 'last-child' | 'last-of-type' | 'root'
//!                | ('has'|'is'|'not') '(' Selector { ',' Selector } ')'
//! ```
//!
//! Whitespace never reaches the parser; the lexer elides it. Errors carry
//! the furthest position any alternative reached together with what was
//! expected there.

use crate::lexer::{tokenize, Token, TokenKind};
use crate::query::{
    Attribute, AttributeOperator, Combinator, Pseudo, PseudoClass, Query, Selector,
    SelectorOption, SimpleSelector,
};
use astq_types::{Position, QueryParseError};
use nom::branch::alt;
use nom::combinator::{map, opt};
use nom::multi::{many0, many1};
use nom::{IResult, InputLength};
use tracing::debug;

/// Parser input: a cursor over the lexed tokens.
#[derive(Debug, Clone, Copy)]
struct Tokens<'a> {
    toks: &'a [Token],
    eof: Position,
}

impl<'a> Tokens<'a> {
    fn first(&self) -> Option<&'a Token> {
        self.toks.first()
    }

    fn advance(&self) -> Tokens<'a> {
        Tokens {
            toks: &self.toks[1..],
            eof: self.eof,
        }
    }

    fn position(&self) -> Position {
        self.first().map(|t| t.position).unwrap_or(self.eof)
    }

    fn describe_head(&self) -> String {
        self.first()
            .map(Token::describe)
            .unwrap_or_else(|| "end of input".to_string())
    }
}

impl InputLength for Tokens<'_> {
    fn input_len(&self) -> usize {
        self.toks.len()
    }
}

/// Internal parse failure; the furthest one survives `alt`.
#[derive(Debug)]
struct ParseFailure {
    position: Position,
    expected: String,
    found: String,
}

impl ParseFailure {
    fn expected(input: Tokens<'_>, what: impl Into<String>) -> nom::Err<ParseFailure> {
        nom::Err::Error(ParseFailure {
            position: input.position(),
            expected: what.into(),
            found: input.describe_head(),
        })
    }
}

impl<'a> nom::error::ParseError<Tokens<'a>> for ParseFailure {
    fn from_error_kind(input: Tokens<'a>, _kind: nom::error::ErrorKind) -> Self {
        ParseFailure {
            position: input.position(),
            expected: "a selector".to_string(),
            found: input.describe_head(),
        }
    }

    fn append(_input: Tokens<'a>, _kind: nom::error::ErrorKind, other: Self) -> Self {
        other
    }

    fn or(self, other: Self) -> Self {
        if other.position.offset > self.position.offset {
            other
        } else {
            self
        }
    }
}

type PResult<'a, O> = IResult<Tokens<'a>, O, ParseFailure>;

/// Promotes a recoverable error to a failure, stopping backtracking once
/// the input is committed (after `(`, a comma, an attribute operator...).
fn commit<T>(result: PResult<'_, T>) -> PResult<'_, T> {
    result.map_err(|err| match err {
        nom::Err::Error(inner) => nom::Err::Failure(inner),
        other => other,
    })
}

/// Parses selector text into a [`Query`].
///
/// Empty input (after whitespace) parses to an empty query, which matches
/// nothing. Anything the grammar cannot consume is an error.
pub fn parse_query(text: &str) -> Result<Query, QueryParseError> {
    let stream = tokenize(text)?;
    let input = Tokens {
        toks: &stream.tokens,
        eof: stream.eof,
    };
    if input.input_len() == 0 {
        return Ok(Query {
            position: Position::start(),
            selectors: Vec::new(),
        });
    }
    match selector_list(input) {
        Ok((rest, selectors)) => {
            if rest.input_len() > 0 {
                return Err(QueryParseError {
                    position: rest.position(),
                    expected: "`,` or end of input".to_string(),
                    found: rest.describe_head(),
                });
            }
            debug!(selectors = selectors.len(), "parsed query");
            Ok(Query {
                position: selectors[0].position,
                selectors,
            })
        }
        Err(nom::Err::Error(failure)) | Err(nom::Err::Failure(failure)) => Err(QueryParseError {
            position: failure.position,
            expected: failure.expected,
            found: failure.found,
        }),
        Err(nom::Err::Incomplete(_)) => Err(QueryParseError {
            position: stream.eof,
            expected: "a complete query".to_string(),
            found: "end of input".to_string(),
        }),
    }
}

/// `Selector { ',' Selector }` — shared by the top level and by the
/// selector-list pseudo-classes.
fn selector_list(input: Tokens<'_>) -> PResult<'_, Vec<Selector>> {
    let (mut input, first) = selector(input)?;
    let mut selectors = vec![first];
    while let Ok((rest, _)) = punct(input, ',') {
        let (rest, next) = commit(selector(rest))?;
        selectors.push(next);
        input = rest;
    }
    Ok((input, selectors))
}

fn selector(input: Tokens<'_>) -> PResult<'_, Selector> {
    let position = input.position();
    let (input, simple_selectors) = many1(simple_selector)(input)?;
    Ok((
        input,
        Selector {
            position,
            simple_selectors,
        },
    ))
}

fn simple_selector(input: Tokens<'_>) -> PResult<'_, SimpleSelector> {
    let position = input.position();
    let (rest, combinator) = opt(combinator)(input)?;
    let (rest, name) = opt(name)(rest)?;
    let (rest, options) = many0(selector_option)(rest)?;
    // At least one token must have been consumed, or `many1` above would
    // loop forever on option-less, name-less input.
    if rest.input_len() == input.input_len() {
        return Err(ParseFailure::expected(input, "a selector"));
    }
    Ok((
        rest,
        SimpleSelector {
            position,
            combinator: combinator.unwrap_or(Combinator::Descendant),
            name: name.unwrap_or_default(),
            options,
        },
    ))
}

fn combinator(input: Tokens<'_>) -> PResult<'_, Combinator> {
    alt((
        map(|i| punct(i, '>'), |_| Combinator::Child),
        map(|i| punct(i, '+'), |_| Combinator::NextSibling),
        map(|i| punct(i, '~'), |_| Combinator::SubsequentSibling),
    ))(input)
}

fn name(input: Tokens<'_>) -> PResult<'_, String> {
    alt((
        map(ident, |(name, _)| name),
        map(|i| punct(i, '*'), |_| "*".to_string()),
    ))(input)
}

fn selector_option(input: Tokens<'_>) -> PResult<'_, SelectorOption> {
    alt((
        map(attribute, SelectorOption::Attribute),
        map(pseudo_class, SelectorOption::Pseudo),
    ))(input)
}

fn attribute(input: Tokens<'_>) -> PResult<'_, Attribute> {
    let (input, open) = punct(input, '[')?;
    let (input, (name, _)) =
        commit(ident(input).map_err(|_| ParseFailure::expected(input, "an attribute name")))?;
    let (input, operator) = opt(attribute_operator)(input)?;
    let (input, attr) = match operator {
        Some(operator) => {
            let (input, (value, _)) = commit(
                string_value(input)
                    .map_err(|_| ParseFailure::expected(input, "a quoted string")),
            )?;
            (
                input,
                Attribute {
                    position: open,
                    name,
                    operator,
                    value: Some(value),
                },
            )
        }
        None => (
            input,
            Attribute {
                position: open,
                name,
                operator: AttributeOperator::Present,
                value: None,
            },
        ),
    };
    let (input, _) =
        commit(punct(input, ']').map_err(|_| ParseFailure::expected(input, "`]`")))?;
    Ok((input, attr))
}

fn attribute_operator(input: Tokens<'_>) -> PResult<'_, AttributeOperator> {
    alt((
        map(|i| punct2(i, '~'), |_| AttributeOperator::Includes),
        map(|i| punct2(i, '|'), |_| AttributeOperator::DashMatch),
        map(|i| punct2(i, '^'), |_| AttributeOperator::Prefix),
        map(|i| punct2(i, '$'), |_| AttributeOperator::Suffix),
        map(|i| punct2(i, '*'), |_| AttributeOperator::Substring),
        map(|i| punct(i, '='), |_| AttributeOperator::Equals),
    ))(input)
}

fn pseudo_class(input: Tokens<'_>) -> PResult<'_, PseudoClass> {
    let (input, colon) = punct(input, ':')?;
    let (input, (name, name_pos)) =
        commit(ident(input).map_err(|_| ParseFailure::expected(input, "a pseudo-class name")))?;
    let (input, kind) = match name.as_str() {
        "empty" => (input, Pseudo::Empty),
        "first-child" => (input, Pseudo::FirstChild),
        "first-of-type" => (input, Pseudo::FirstOfType),
        "last-child" => (input, Pseudo::LastChild),
        "last-of-type" => (input, Pseudo::LastOfType),
        "root" => (input, Pseudo::Root),
        "has" | "is" | "not" => {
            let (input, _) =
                commit(punct(input, '(').map_err(|_| ParseFailure::expected(input, "`(`")))?;
            let (input, selectors) = commit(selector_list(input))?;
            let (input, _) =
                commit(punct(input, ')').map_err(|_| ParseFailure::expected(input, "`)`")))?;
            let kind = match name.as_str() {
                "has" => Pseudo::Has(selectors),
                "is" => Pseudo::Is(selectors),
                _ => Pseudo::Not(selectors),
            };
            (input, kind)
        }
        _ => {
            return Err(nom::Err::Failure(ParseFailure {
                position: name_pos,
                expected: "a pseudo-class name".to_string(),
                found: format!("`{name}`"),
            }));
        }
    };
    Ok((
        input,
        PseudoClass {
            position: colon,
            kind,
        },
    ))
}

// Token-level primitives. These take the input as their first argument so
// combinator call sites can stay `|i| punct(i, '>')`-shaped.

fn ident(input: Tokens<'_>) -> PResult<'_, (String, Position)> {
    match input.first() {
        Some(Token {
            kind: TokenKind::Ident(name),
            position,
        }) => Ok((input.advance(), (name.clone(), *position))),
        _ => Err(ParseFailure::expected(input, "an identifier")),
    }
}

fn string_value(input: Tokens<'_>) -> PResult<'_, (String, Position)> {
    match input.first() {
        Some(Token {
            kind: TokenKind::Str(value) | TokenKind::Str2(value),
            position,
        }) => Ok((input.advance(), (value.clone(), *position))),
        _ => Err(ParseFailure::expected(input, "a quoted string")),
    }
}

fn punct(input: Tokens<'_>, expected: char) -> PResult<'_, Position> {
    match input.first() {
        Some(Token {
            kind: TokenKind::Punct(ch),
            position,
        }) if *ch == expected => Ok((input.advance(), *position)),
        _ => Err(ParseFailure::expected(input, format!("`{expected}`"))),
    }
}

/// Two-character attribute operator: `expected` immediately followed by `=`.
fn punct2(input: Tokens<'_>, expected: char) -> PResult<'_, Position> {
    let (input, position) = punct(input, expected)?;
    let (input, _) = punct(input, '=')?;
    Ok((input, position))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query() {
        let query = parse_query("").unwrap();
        assert_eq!(query.position, Position::start());
        assert!(query.selectors.is_empty());
    }

    #[test]
    fn test_whitespace_only_query() {
        let query = parse_query("  \n\t").unwrap();
        assert!(query.selectors.is_empty());
    }

    #[test]
    fn test_trailing_garbage_is_rejected() {
        let err = parse_query("File )").unwrap_err();
        assert_eq!(err.position, Position::new(1, 6, 5));
        assert!(err.expected.contains("end of input"));
    }

    #[test]
    fn test_unknown_pseudo_is_rejected() {
        let err = parse_query("File:nth-child(2)").unwrap_err();
        assert_eq!(err.position, Position::new(1, 6, 5));
        assert_eq!(err.expected, "a pseudo-class name");
        assert_eq!(err.found, "`nth-child`");
    }

    #[test]
    fn test_attribute_value_must_be_quoted() {
        let err = parse_query("Ident[Name=foo]").unwrap_err();
        assert_eq!(err.expected, "a quoted string");
        assert_eq!(err.found, "`foo`");
    }

    #[test]
    fn test_missing_close_paren() {
        let err = parse_query("File:has(Ident").unwrap_err();
        assert_eq!(err.expected, "`)`");
        assert_eq!(err.found, "end of input");
    }
}
