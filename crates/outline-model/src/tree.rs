//! Outline forests.
//!
//! A [`Forest`] is an arena of [`OutlineNode`]s. Nodes refer to their parent
//! and children by [`NodeId`] and to story content by [`ElementId`], so two
//! forests can present the same elements without sharing ownership.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::ids::{ElementId, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Overview,
    Folder,
    Problem,
    Character,
    Setting,
    PlotPoint,
    NarrativeView,
    Trash,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub element: Option<ElementId>,
    pub is_root: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forest {
    nodes: Vec<OutlineNode>,
    roots: Vec<NodeId>,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a detached node and return its id.
    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        kind: NodeKind,
        element: Option<ElementId>,
    ) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(OutlineNode {
            id,
            name: name.into(),
            kind,
            parent: None,
            children: Vec::new(),
            element,
            is_root: false,
        });
        id
    }

    /// Add a node and register it as the next root of the forest.
    pub fn add_root(
        &mut self,
        name: impl Into<String>,
        kind: NodeKind,
        element: Option<ElementId>,
    ) -> NodeId {
        let id = self.add_node(name, kind, element);
        self.nodes[id.index()].is_root = true;
        self.roots.push(id);
        id
    }

    /// Append `child` to `parent`'s children, detaching it from any previous
    /// parent.
    pub fn attach(&mut self, child: NodeId, parent: NodeId) -> Result<()> {
        self.check(child)?;
        self.check(parent)?;
        if let Some(previous) = self.nodes[child.index()].parent {
            self.nodes[previous.index()]
                .children
                .retain(|&id| id != child);
        }
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> Option<&OutlineNode> {
        self.nodes.get(id.index())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut OutlineNode> {
        self.nodes.get_mut(id.index())
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn root_nodes(&self) -> impl Iterator<Item = &OutlineNode> {
        self.roots.iter().filter_map(|&id| self.node(id))
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &OutlineNode> {
        self.node(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|&child| self.node(child))
    }

    pub fn nodes(&self) -> &[OutlineNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first, pre-order walk over every node reachable from the roots,
    /// yielding each node with its depth (roots are depth 0).
    pub fn walk(&self) -> Vec<(usize, &OutlineNode)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(usize, NodeId)> =
            self.roots.iter().rev().map(|&id| (0, id)).collect();
        while let Some((depth, id)) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            out.push((depth, node));
            stack.extend(node.children.iter().rev().map(|&child| (depth + 1, child)));
        }
        out
    }

    fn check(&self, id: NodeId) -> Result<()> {
        if id.index() < self.nodes.len() {
            Ok(())
        } else {
            Err(ModelError::UnknownNode(id.index()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_sets_parent_and_order() {
        let mut forest = Forest::new();
        let root = forest.add_root("Root", NodeKind::Overview, None);
        let a = forest.add_node("A", NodeKind::Folder, None);
        let b = forest.add_node("B", NodeKind::Folder, None);
        forest.attach(a, root).unwrap();
        forest.attach(b, root).unwrap();

        let names: Vec<_> = forest.children(root).map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(forest.node(a).unwrap().parent, Some(root));
        assert!(forest.node(root).unwrap().is_root);
        assert!(!forest.node(a).unwrap().is_root);
    }

    #[test]
    fn reattach_moves_child() {
        let mut forest = Forest::new();
        let first = forest.add_root("First", NodeKind::Overview, None);
        let second = forest.add_root("Second", NodeKind::Trash, None);
        let leaf = forest.add_node("Leaf", NodeKind::Problem, Some(ElementId::new(0)));
        forest.attach(leaf, first).unwrap();
        forest.attach(leaf, second).unwrap();

        assert_eq!(forest.children(first).count(), 0);
        assert_eq!(forest.children(second).count(), 1);
    }

    #[test]
    fn attach_unknown_node_fails() {
        let mut forest = Forest::new();
        let root = forest.add_root("Root", NodeKind::Overview, None);
        let err = forest.attach(NodeId::new(9), root).unwrap_err();
        assert_eq!(err, ModelError::UnknownNode(9));
    }

    #[test]
    fn walk_is_preorder_with_depth() {
        let mut forest = Forest::new();
        let root = forest.add_root("Root", NodeKind::Overview, None);
        let folder = forest.add_node("Folder", NodeKind::Folder, None);
        let leaf = forest.add_node("Leaf", NodeKind::Setting, None);
        forest.attach(folder, root).unwrap();
        forest.attach(leaf, folder).unwrap();
        forest.add_root("Trash", NodeKind::Trash, None);

        let walked: Vec<_> = forest
            .walk()
            .into_iter()
            .map(|(depth, node)| (depth, node.name.as_str()))
            .collect();
        assert_eq!(
            walked,
            [(0, "Root"), (1, "Folder"), (2, "Leaf"), (0, "Trash")]
        );
    }
}
