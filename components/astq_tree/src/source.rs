//! Rust source ingestion through tree-sitter.
//!
//! This is the bundled [`SourceAst`] host: it parses Rust source with the
//! tree-sitter grammar and replays the named nodes of the resulting
//! concrete syntax tree. Anonymous punctuation and keyword tokens are not
//! part of the wrapped tree.

use crate::arena::Tree;
use crate::host::{HostNode, SourceAst, WalkEvent};
use astq_types::SourceParseError;
use tracing::debug;

/// Grammar name used to qualify node kinds, so `function_item` wraps as
/// `rust.function_item`.
const LANGUAGE_NAME: &str = "rust";

/// A parsed Rust source file, ready to be wrapped.
#[derive(Debug)]
pub struct RustSource {
    tree: tree_sitter::Tree,
    source: String,
}

impl RustSource {
    /// Parses `source` as a Rust file.
    ///
    /// Syntax errors reported by the grammar surface as
    /// [`SourceParseError`] with the first offending location.
    pub fn parse(source: impl Into<String>) -> Result<Self, SourceParseError> {
        let source = source.into();
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_rust::LANGUAGE.into())
            .map_err(|err| SourceParseError(err.to_string()))?;
        let tree = parser
            .parse(&source, None)
            .ok_or_else(|| SourceParseError("parser produced no tree".to_string()))?;
        if tree.root_node().has_error() {
            return Err(SourceParseError(describe_first_error(tree.root_node())));
        }
        debug!(bytes = source.len(), "parsed rust source");
        Ok(RustSource { tree, source })
    }

    /// The original source text.
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl SourceAst for RustSource {
    fn walk(&self, visit: &mut dyn FnMut(WalkEvent)) {
        walk_node(self.tree.root_node(), &self.source, visit);
    }
}

/// Parses Rust source and wraps it in one step.
pub fn parse_source(source: impl Into<String>) -> Result<Tree, SourceParseError> {
    let host = RustSource::parse(source)?;
    Ok(Tree::wrap(&host))
}

fn walk_node(node: tree_sitter::Node<'_>, source: &str, visit: &mut dyn FnMut(WalkEvent)) {
    visit(WalkEvent::Enter(host_node(node, source)));
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        walk_node(child, source, visit);
    }
    visit(WalkEvent::Leave);
}

fn host_node(node: tree_sitter::Node<'_>, source: &str) -> HostNode {
    HostNode {
        type_label: format!("{LANGUAGE_NAME}.{}", node.kind()),
        pos: node.start_byte(),
        end: node.end_byte(),
        comment: node.is_extra(),
        fields: field_snapshot(node, source),
    }
}

/// Collects the string-valued fields of `node`.
///
/// A field reads as a string when the child under it is a single token
/// (no children of its own in the grammar); its value is that token's
/// source text. Structured fields are skipped entirely. The first child
/// seen for a field wins.
fn field_snapshot(node: tree_sitter::Node<'_>, source: &str) -> Vec<(String, String)> {
    let mut fields: Vec<(String, String)> = Vec::new();
    let mut cursor = node.walk();
    if cursor.goto_first_child() {
        loop {
            if let Some(field) = cursor.field_name() {
                let child = cursor.node();
                if child.child_count() == 0 && !fields.iter().any(|(name, _)| name == field) {
                    let text = source
                        .get(child.start_byte()..child.end_byte())
                        .unwrap_or_default();
                    fields.push((field.to_string(), text.to_string()));
                }
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }
    fields
}

/// Locates the first `ERROR` or missing node under `node`.
fn describe_first_error(node: tree_sitter::Node<'_>) -> String {
    if node.is_error() || node.is_missing() {
        let point = node.start_position();
        return format!(
            "syntax error at line {}, column {}",
            point.row + 1,
            point.column + 1
        );
    }
    let mut cursor = node.walk();
    let children: Vec<tree_sitter::Node<'_>> = node.children(&mut cursor).collect();
    for child in children {
        if child.has_error() {
            return describe_first_error(child);
        }
    }
    let point = node.start_position();
    format!(
        "syntax error at line {}, column {}",
        point.row + 1,
        point.column + 1
    )
}
