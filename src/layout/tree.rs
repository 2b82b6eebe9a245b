//! In-memory view tree implementing [`LayoutHost`]

use std::collections::HashMap;

use super::host::{LayoutHost, NodeId};
use super::types::{Rect, Size};

#[derive(Debug, Clone)]
struct NodeData {
    name: String,
    frame: Rect,
    intrinsic: Option<Size>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena of named nodes
#[derive(Debug, Clone, Default)]
pub struct NodeTree {
    nodes: Vec<NodeData>,
    by_name: HashMap<String, NodeId>,
}

impl NodeTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node without a parent
    pub fn add_root(&mut self, name: impl Into<String>, frame: Rect) -> NodeId {
        self.insert(name.into(), frame, None)
    }

    /// Add a node as the last child of `parent`
    pub fn add_child(&mut self, parent: NodeId, name: impl Into<String>, frame: Rect) -> NodeId {
        let id = self.insert(name.into(), frame, Some(parent));
        self.nodes[parent.0].children.push(id);
        id
    }

    fn insert(&mut self, name: String, frame: Rect, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.by_name.insert(name.clone(), id);
        self.nodes.push(NodeData {
            name,
            frame,
            intrinsic: None,
            parent,
            children: vec![],
        });
        id
    }

    pub fn set_intrinsic_size(&mut self, node: NodeId, size: Option<Size>) {
        self.nodes[node.0].intrinsic = size;
    }

    /// Look up a node by name
    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, node: NodeId) -> &str {
        &self.nodes[node.0].name
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// All node ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl LayoutHost for NodeTree {
    fn frame(&self, node: NodeId) -> Rect {
        self.nodes[node.0].frame
    }

    fn set_frame(&mut self, node: NodeId, frame: Rect) {
        self.nodes[node.0].frame = frame;
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    fn intrinsic_size(&self, node: NodeId) -> Option<Size> {
        self.nodes[node.0].intrinsic
    }

    fn siblings(&self, node: NodeId) -> Vec<NodeId> {
        match self.parent(node) {
            Some(parent) => self
                .children(parent)
                .iter()
                .copied()
                .filter(|&child| child != node)
                .collect(),
            None => self
                .ids()
                .filter(|&other| other != node && self.nodes[other.0].parent.is_none())
                .collect(),
        }
    }

    fn label(&self, node: NodeId) -> String {
        self.nodes[node.0].name.clone()
    }
}
