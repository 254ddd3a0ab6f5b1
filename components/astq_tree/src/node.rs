//! Navigation handles over wrapped trees.

use crate::arena::{NodeData, NodeId, Tree};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

/// A copyable handle to one node of a [`Tree`].
///
/// Two handles compare equal when they point at the same slot of the same
/// tree. Matches are reported as `NodeRef`s; the byte range
/// [`pos`](NodeRef::pos)`..`[`end`](NodeRef::end) locates the node in the
/// original source.
#[derive(Clone, Copy)]
pub struct NodeRef<'t> {
    pub(crate) tree: &'t Tree,
    pub(crate) id: NodeId,
}

impl<'t> NodeRef<'t> {
    fn data(&self) -> &'t NodeData {
        self.tree.node(self.id)
    }

    /// The node's id within its tree.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The tree this handle belongs to.
    pub fn tree(&self) -> &'t Tree {
        self.tree
    }

    /// Qualified type name, e.g. `rust.function_item`.
    pub fn type_name(&self) -> &'t str {
        &self.data().type_name
    }

    /// Short type name (final dot-segment of [`type_name`](Self::type_name)),
    /// the name selectors match against.
    pub fn name(&self) -> &'t str {
        &self.data().name
    }

    /// Byte offset of the node's first byte in the original source.
    pub fn pos(&self) -> usize {
        self.data().pos
    }

    /// Byte offset one past the node's last byte.
    pub fn end(&self) -> usize {
        self.data().end
    }

    /// Whether the node represents a comment.
    pub fn is_comment(&self) -> bool {
        self.data().comment
    }

    /// Whether the node is the tree's root.
    pub fn is_root(&self) -> bool {
        self.data().parent.is_none()
    }

    /// The parent node, absent at the root.
    pub fn parent(&self) -> Option<NodeRef<'t>> {
        let parent = self.data().parent?;
        Some(NodeRef {
            tree: self.tree,
            id: parent,
        })
    }

    /// Position of this node in its parent's child list; `None` at the root.
    pub fn index(&self) -> Option<usize> {
        self.data().parent.map(|_| self.data().index)
    }

    /// The node's children, in host order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'t>> + 't {
        let tree = self.tree;
        self.data().children.iter().map(move |&id| NodeRef { tree, id })
    }

    /// Number of children.
    pub fn child_count(&self) -> usize {
        self.data().children.len()
    }

    /// The immediately following sibling, if any.
    pub fn next_sibling(&self) -> Option<NodeRef<'t>> {
        let parent = self.parent()?;
        let id = *parent.data().children.get(self.data().index + 1)?;
        Some(NodeRef {
            tree: self.tree,
            id,
        })
    }

    /// Every sibling after this node, in document order.
    pub fn following_siblings(&self) -> impl Iterator<Item = NodeRef<'t>> + 't {
        let tree = self.tree;
        let rest: &'t [NodeId] = match self.parent() {
            Some(parent) => &parent.data().children[self.data().index + 1..],
            None => &[],
        };
        rest.iter().map(move |&id| NodeRef { tree, id })
    }

    /// String value of the named field, if the host exposed one.
    pub fn attr(&self, name: &str) -> Option<&'t str> {
        self.data()
            .attrs
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether the host exposed a string-valued field under `name`.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("name", &self.name())
            .field("pos", &self.pos())
            .field("end", &self.end())
            .finish()
    }
}

/// JSON projection used by the dump tool: `type`, `pos`, `end` and the
/// recursive `children` list. Other wrapper fields stay hidden.
impl Serialize for NodeRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Node", 4)?;
        state.serialize_field("type", self.type_name())?;
        state.serialize_field("pos", &self.pos())?;
        state.serialize_field("end", &self.end())?;
        let children: Vec<NodeRef<'_>> = self.children().collect();
        state.serialize_field("children", &children)?;
        state.end()
    }
}
