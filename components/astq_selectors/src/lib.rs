//! CSS-style selector engine for wrapped syntax trees.
//!
//! This crate turns selector text into a typed [`Query`] and evaluates it
//! against the uniform trees built by `astq-tree`, with the composition
//! semantics CSS selectors have over the DOM.
//!
//! # Quick Start
//!
//! ```
//! use astq_selectors::{parse_query, Queryable};
//! use astq_tree::parse_source;
//!
//! let tree = parse_source("fn main() {}").unwrap();
//! let query = parse_query("function_item > identifier").unwrap();
//! let matches = (&tree).query_all(&query);
//! assert_eq!(matches.len(), 1);
//! ```
//!
//! # Supported Selectors
//!
//! ## Simple Selectors
//!
//! | Selector | Example | Description |
//! |----------|---------|-------------|
//! | Type | `function_item` | Node's short type name |
//! | Universal | `*` | Any node |
//!
//! ## Attribute Selectors
//!
//! | Selector | Example | Description |
//! |----------|---------|-------------|
//! | Exists | `[name]` | String-valued field exists |
//! | Equals | `[name='f']` | Exact match |
//! | Word | `[doc~='safe']` | Whitespace-delimited word |
//! | Dash | `[doc\|='unix']` | Contains `unix-` |
//! | Starts | `[name^='f']` | Prefix match |
//! | Ends | `[name$='2']` | Suffix match |
//! | Contains | `[name*='oo']` | Substring match |
//!
//! ## Combinators
//!
//! | Combinator | Example | Description |
//! |------------|---------|-------------|
//! | Descendant | `a b` | Any descendant |
//! | Child | `a > b` | Direct child |
//! | Adjacent | `a + b` | Immediate next sibling |
//! | General | `a ~ b` | Any following sibling |
//!
//! ## Pseudo-Classes
//!
//! `:empty`, `:first-child`, `:first-of-type`, `:last-child`,
//! `:last-of-type`, `:root`, `:has(...)`, `:is(...)`, `:not(...)`.
//!
//! `:is` and `:not` test only the *first* simple selector of each
//! argument against the candidate node; use `:has` when you mean
//! "a matching descendant exists".

#![warn(missing_docs)]

pub mod lexer;
pub mod matcher;
pub mod parser;
mod predicates;
pub mod query;

// Re-exports
pub use matcher::Queryable;
pub use parser::parse_query;
pub use query::{
    Attribute, AttributeOperator, Combinator, Pseudo, PseudoClass, Query, Selector,
    SelectorOption, SimpleSelector,
};
