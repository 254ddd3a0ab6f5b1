//! The contract a host syntax tree implements to be wrapped.

/// One step of a pre-order walk over a host syntax tree.
///
/// `Enter` is delivered exactly once per node, before any of its children;
/// `Leave` closes the most recently entered subtree. The stream must be
/// well nested: every `Enter` is matched by exactly one `Leave`.
#[derive(Debug, Clone)]
pub enum WalkEvent {
    /// A node begins here; its children follow before the matching `Leave`.
    Enter(HostNode),
    /// The most recently entered subtree ends.
    Leave,
}

/// The facts the wrapper records about one host node.
#[derive(Debug, Clone)]
pub struct HostNode {
    /// Concrete type label. May carry pointer or array decoration
    /// (`*ast.Ident`, `[]ast.Stmt`) and dotted qualification; the wrapper
    /// strips the former and splits on the latter.
    pub type_label: String,
    /// Byte offset of the node's first byte in the original source.
    pub pos: usize,
    /// Byte offset one past the node's last byte.
    pub end: usize,
    /// Whether the node represents a comment.
    pub comment: bool,
    /// String-valued fields of the node, in host field order.
    ///
    /// Fields whose values are not string-typed scalars are omitted here;
    /// they can never satisfy an attribute predicate.
    pub fields: Vec<(String, String)>,
}

impl HostNode {
    /// Creates a field-less, non-comment node. Fields and the comment
    /// marker can be filled in afterwards.
    pub fn new(type_label: impl Into<String>, pos: usize, end: usize) -> Self {
        HostNode {
            type_label: type_label.into(),
            pos,
            end,
            comment: false,
            fields: Vec::new(),
        }
    }
}

/// A parsed host syntax tree that can replay itself as a walk.
///
/// The first event of the stream (if any) enters the root. Implementations
/// must produce the same stream every time `walk` is called; the wrapper
/// replays it once per [`crate::Tree::wrap`].
pub trait SourceAst {
    /// Drives `visit` through the tree in pre-order.
    fn walk(&self, visit: &mut dyn FnMut(WalkEvent));
}
