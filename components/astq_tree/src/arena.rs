//! Arena storage for wrapped syntax trees.
//!
//! The tree is built in one pass and never mutated afterwards, so the
//! arena is a plain vector of node records addressed by slot index. Parent
//! links are stored as [`NodeId`]s rather than references, which keeps the
//! structure acyclic and freely shareable.

use crate::host::{SourceAst, WalkEvent};
use crate::node::NodeRef;
use tracing::debug;

/// Identifier of a node slot within a [`Tree`].
///
/// Ids are only meaningful for the tree that produced them. Slots are
/// assigned during the pre-order build pass, so comparing two ids from
/// the same tree compares document positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// Stored record for one wrapped node.
#[derive(Debug)]
pub(crate) struct NodeData {
    /// Qualified type name with decoration stripped, e.g. `rust.function_item`.
    pub(crate) type_name: String,
    /// Final dot-segment of `type_name`; what selectors match against.
    pub(crate) name: String,
    pub(crate) pos: usize,
    pub(crate) end: usize,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
    /// Position in the parent's child list; 0 and meaningless at the root.
    pub(crate) index: usize,
    pub(crate) comment: bool,
    pub(crate) attrs: Vec<(String, String)>,
}

/// An immutable wrapped syntax tree.
///
/// Built once from a [`SourceAst`] walk; queried through [`NodeRef`]
/// handles starting at [`Tree::root`].
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<NodeData>,
}

impl Tree {
    /// Builds the wrapper tree by replaying `host`'s walk.
    ///
    /// Maintains a stack of currently open nodes: `Enter` appends a child
    /// to the top of the stack (or starts the root) and pushes it; `Leave`
    /// pops. A well-nested event stream therefore yields exactly one
    /// record per host node, in pre-order.
    pub fn wrap(host: &dyn SourceAst) -> Tree {
        let mut nodes: Vec<NodeData> = Vec::new();
        let mut stack: Vec<NodeId> = Vec::new();
        host.walk(&mut |event| match event {
            WalkEvent::Enter(entry) => {
                let id = NodeId(nodes.len());
                let (type_name, name) = split_type_label(&entry.type_label);
                let (parent, index) = match stack.last().copied() {
                    Some(parent) => {
                        let index = nodes[parent.0].children.len();
                        nodes[parent.0].children.push(id);
                        (Some(parent), index)
                    }
                    None => (None, 0),
                };
                nodes.push(NodeData {
                    type_name,
                    name,
                    pos: entry.pos,
                    end: entry.end,
                    children: Vec::new(),
                    parent,
                    index,
                    comment: entry.comment,
                    attrs: entry.fields,
                });
                stack.push(id);
            }
            WalkEvent::Leave => {
                stack.pop();
            }
        });
        debug_assert!(stack.is_empty(), "host walk was not well nested");
        debug!(nodes = nodes.len(), "wrapped host tree");
        Tree { nodes }
    }

    /// The root node of the tree.
    ///
    /// The [`SourceAst`] contract guarantees at least one node for any
    /// parsed source, so the root always exists for adapter-built trees.
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: NodeId(0),
        }
    }

    /// Handle for an id previously obtained from this tree.
    pub fn get(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { tree: self, id }
    }

    /// Total number of wrapped nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no nodes (an empty host walk).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }
}

/// Strips pointer/array decoration from a host type label and splits it
/// into the qualified type name and its final dot-segment.
fn split_type_label(label: &str) -> (String, String) {
    let type_name = label.replace('*', "").replace("[]", "");
    let name = type_name.rsplit('.').next().unwrap_or("").to_string();
    (type_name, name)
}
