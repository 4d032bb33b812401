use std::ops::Index;
use std::path::Path;

use crate::filesystem::{Node, NodeId};

/// Flat, pre-ordered arena of the nodes produced by one walk or listing.
///
/// The tree owns every node; parent links are [`NodeId`]s into it. Children are not stored
/// and are found by scanning for nodes that point back at a directory.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub(crate) fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId::from(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// The node the tree was built from.
    pub fn root(&self) -> Option<&Node> {
        self.nodes.first()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn parent(&self, node: &Node) -> Option<&Node> {
        node.parent().and_then(|id| self.get(id))
    }

    /// Walks the parent links upwards, nearest directory first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = &Node> {
        let mut current = self.get(id).and_then(Node::parent);
        std::iter::from_fn(move || {
            let node = self.get(current?)?;
            current = node.parent();
            Some(node)
        })
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node> {
        self.nodes
            .iter()
            .filter(move |node| node.parent() == Some(id))
    }

    pub fn find(&self, path: impl AsRef<Path>) -> Option<NodeId> {
        let path = path.as_ref();
        self.nodes
            .iter()
            .position(|node| node.path() == path)
            .map(NodeId::from)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    pub fn iter_with_ids(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId::from(index), node))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.index()]
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
