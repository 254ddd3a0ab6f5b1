//! The typed selector tree produced by the parser.
//!
//! Every node records the [`Position`] of its first token so diagnostics
//! and tooling can point back into the query text.

use astq_types::{Position, QueryParseError};
use std::fmt;
use std::str::FromStr;

/// A parsed query: comma-separated selectors whose match sets are unioned.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Position of the first token, or the start of the input when empty.
    pub position: Position,
    /// The comma-separated alternatives. Empty queries match nothing.
    pub selectors: Vec<Selector>,
}

/// A chain of simple selectors related by combinators.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    /// Position of the selector's first token.
    pub position: Position,
    /// The chain, left to right. Never empty for a parsed selector.
    pub simple_selectors: Vec<SimpleSelector>,
}

/// One link of a selector chain: a combinator, an optional type name, and
/// any number of attribute or pseudo-class options.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleSelector {
    /// Position of the link's first token.
    pub position: Position,
    /// Relation to the previous link; descendant when none was written.
    pub combinator: Combinator,
    /// Short type name to match, `*` for any, or empty when the link
    /// consists of options alone.
    pub name: String,
    /// Attribute and pseudo-class constraints, all of which must hold.
    pub options: Vec<SelectorOption>,
}

/// Relation between consecutive links of a selector chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// The implicit whitespace relation: any descendant.
    Descendant,
    /// `>`: a direct child.
    Child,
    /// `+`: the immediately following sibling.
    NextSibling,
    /// `~`: any following sibling.
    SubsequentSibling,
}

impl Combinator {
    /// The combinator's source spelling; empty for descendant.
    pub fn as_str(self) -> &'static str {
        match self {
            Combinator::Descendant => "",
            Combinator::Child => ">",
            Combinator::NextSibling => "+",
            Combinator::SubsequentSibling => "~",
        }
    }
}

/// One bracketed or colon-prefixed option on a simple selector.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorOption {
    /// `[name]`, `[name='value']` and friends.
    Attribute(Attribute),
    /// `:empty`, `:has(...)` and the rest of the pseudo-class set.
    Pseudo(PseudoClass),
}

/// An attribute constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Position of the opening `[`.
    pub position: Position,
    /// Field name looked up on the candidate node.
    pub name: String,
    /// Comparison applied to the field value.
    pub operator: AttributeOperator,
    /// Right-hand side; absent for a bare presence test.
    pub value: Option<String>,
}

/// Comparison operator of an attribute option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeOperator {
    /// `[name]`: the field exists and is string-valued.
    Present,
    /// `=`: exact equality.
    Equals,
    /// `~=`: the value contains the operand as a whitespace-delimited word.
    Includes,
    /// `|=`: the value contains `operand-` as a substring. Note this is
    /// looser than the CSS dash-match, which anchors at the start.
    DashMatch,
    /// `^=`: the value starts with the operand.
    Prefix,
    /// `$=`: the value ends with the operand.
    Suffix,
    /// `*=`: the value contains the operand.
    Substring,
}

impl AttributeOperator {
    /// The operator's source spelling; empty for a presence test.
    pub fn as_str(self) -> &'static str {
        match self {
            AttributeOperator::Present => "",
            AttributeOperator::Equals => "=",
            AttributeOperator::Includes => "~=",
            AttributeOperator::DashMatch => "|=",
            AttributeOperator::Prefix => "^=",
            AttributeOperator::Suffix => "$=",
            AttributeOperator::Substring => "*=",
        }
    }
}

/// A pseudo-class option together with its position.
#[derive(Debug, Clone, PartialEq)]
pub struct PseudoClass {
    /// Position of the leading `:`.
    pub position: Position,
    /// Which pseudo-class this is.
    pub kind: Pseudo,
}

/// The supported pseudo-class set.
#[derive(Debug, Clone, PartialEq)]
pub enum Pseudo {
    /// `:empty` — no children, or only comment children.
    Empty,
    /// `:first-child`.
    FirstChild,
    /// `:first-of-type`.
    FirstOfType,
    /// `:has(...)` — some selector in the list matches within the subtree.
    Has(Vec<Selector>),
    /// `:is(...)` — some selector's first link matches the node itself.
    Is(Vec<Selector>),
    /// `:last-child`.
    LastChild,
    /// `:last-of-type`.
    LastOfType,
    /// `:not(...)` — no selector's first link matches the node itself.
    Not(Vec<Selector>),
    /// `:root`.
    Root,
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{selector}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, simple) in self.simple_selectors.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{simple}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.combinator != Combinator::Descendant {
            write!(f, "{} ", self.combinator.as_str())?;
        }
        write!(f, "{}", self.name)?;
        for option in &self.options {
            write!(f, "{option}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SelectorOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorOption::Attribute(attr) => write!(f, "{attr}"),
            SelectorOption::Pseudo(pseudo) => write!(f, "{pseudo}"),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => {
                let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
                write!(f, "[{}{}'{}']", self.name, self.operator.as_str(), escaped)
            }
            None => write!(f, "[{}]", self.name),
        }
    }
}

impl fmt::Display for PseudoClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.kind)
    }
}

impl fmt::Display for Pseudo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = |f: &mut fmt::Formatter<'_>, name: &str, selectors: &[Selector]| {
            write!(f, "{name}(")?;
            for (i, selector) in selectors.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{selector}")?;
            }
            write!(f, ")")
        };
        match self {
            Pseudo::Empty => write!(f, "empty"),
            Pseudo::FirstChild => write!(f, "first-child"),
            Pseudo::FirstOfType => write!(f, "first-of-type"),
            Pseudo::Has(selectors) => list(f, "has", selectors),
            Pseudo::Is(selectors) => list(f, "is", selectors),
            Pseudo::LastChild => write!(f, "last-child"),
            Pseudo::LastOfType => write!(f, "last-of-type"),
            Pseudo::Not(selectors) => list(f, "not", selectors),
            Pseudo::Root => write!(f, "root"),
        }
    }
}

impl FromStr for Query {
    type Err = QueryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_query(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combinator_spellings() {
        assert_eq!(Combinator::Descendant.as_str(), "");
        assert_eq!(Combinator::Child.as_str(), ">");
        assert_eq!(Combinator::NextSibling.as_str(), "+");
        assert_eq!(Combinator::SubsequentSibling.as_str(), "~");
    }

    #[test]
    fn test_display_round_trip_spelling() {
        let query: Query = "File > Ident[Name^='a']:first-child, *".parse().unwrap();
        assert_eq!(query.to_string(), "File > Ident[Name^='a']:first-child, *");
    }

    #[test]
    fn test_display_quotes_are_escaped() {
        let query: Query = r#"Ident[Name="it's"]"#.parse().unwrap();
        assert_eq!(query.to_string(), r"Ident[Name='it\'s']");
    }
}
