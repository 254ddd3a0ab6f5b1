//! Shared type definitions for the astq workspace.
//!
//! This crate sits at the bottom of the component stack and defines the
//! vocabulary the other crates agree on: source [`Position`]s inside
//! selector text and the error kinds that cross component boundaries.
//!
//! # Error model
//!
//! | Error | Raised by | Meaning |
//! |-------|-----------|---------|
//! | [`QueryParseError`] | selector parser | selector text is syntactically invalid |
//! | [`SourceParseError`] | host adapter | the host-language parser rejected the input |
//! | [`ChildProcessError`] | CLI replace mode | a replacement command failed |
//!
//! A missing or non-string attribute during matching is *not* an error;
//! predicates simply evaluate to "no match".

#![warn(missing_docs)]

pub mod error;
pub mod position;

// Re-exports
pub use error::{AstqError, ChildProcessError, QueryParseError, SourceParseError};
pub use position::Position;
