//! Uniform syntax-tree wrapper for selector matching.
//!
//! This crate lifts a host-language syntax tree into a flat, immutable
//! [`Tree`] of uniform nodes so the selector engine never has to know what
//! it is querying. A host exposes itself through the [`SourceAst`] contract
//! (a pre-order walk with explicit subtree-end events); the wrapper replays
//! that walk once into an arena and hands out cheap [`NodeRef`] handles.
//!
//! # Overview
//!
//! - [`SourceAst`] / [`WalkEvent`] / [`HostNode`] — the host contract.
//! - [`Tree`] / [`NodeId`] — arena storage, built in a single pass.
//! - [`NodeRef`] — copyable navigation handle (parent, children, siblings,
//!   attributes), also the unit returned by matches.
//! - [`RustSource`] / [`parse_source`] — the bundled host adapter, parsing
//!   Rust source through tree-sitter.
//!
//! # Quick Start
//!
//! ```
//! use astq_tree::parse_source;
//!
//! let tree = parse_source("fn main() {}").unwrap();
//! let root = tree.root();
//! assert_eq!(root.name(), "source_file");
//! assert_eq!(root.type_name(), "rust.source_file");
//! ```
//!
//! Once built, a tree is never mutated; it can be shared and queried from
//! any number of threads without coordination.

#![warn(missing_docs)]

pub mod arena;
pub mod host;
pub mod node;
pub mod source;

// Re-exports
pub use arena::{NodeId, Tree};
pub use host::{HostNode, SourceAst, WalkEvent};
pub use node::NodeRef;
pub use source::{parse_source, RustSource};
