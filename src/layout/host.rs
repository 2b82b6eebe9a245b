//! The view-tree interface the engine reads frames from and writes frames to

use super::anchor::{
    Anchor, AnchorKind, HorizontalEdge, HorizontalEdgeKind, VerticalEdge, VerticalEdgeKind,
};
use super::types::{Point, Rect, Size};

/// Opaque handle to a node owned by a [`LayoutHost`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn anchor(self, kind: AnchorKind) -> Anchor {
        Anchor { node: self, kind }
    }

    pub fn h_edge(self, kind: HorizontalEdgeKind) -> HorizontalEdge {
        HorizontalEdge { node: self, kind }
    }

    pub fn v_edge(self, kind: VerticalEdgeKind) -> VerticalEdge {
        VerticalEdge { node: self, kind }
    }
}

/// A tree of rectangular nodes.
///
/// Frames are stored relative to each node's parent. The provided methods translate frames
/// between subtrees so anchors on any node can be resolved in a session's container space.
pub trait LayoutHost {
    /// Current frame in parent coordinates
    fn frame(&self, node: NodeId) -> Rect;

    fn set_frame(&mut self, node: NodeId, frame: Rect);

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Content size used by `fit_size` and `aspect_ratio_from_content`; `None` if not measurable
    fn intrinsic_size(&self, node: NodeId) -> Option<Size>;

    /// Other children of the node's parent, in tree order
    fn siblings(&self, node: NodeId) -> Vec<NodeId>;

    /// Human-readable name used in warnings and log lines
    fn label(&self, node: NodeId) -> String {
        format!("node {}", node.0)
    }

    /// Size of the parent's bounds, `None` for a root node
    fn parent_bounds(&self, node: NodeId) -> Option<Size> {
        self.parent(node).map(|parent| self.frame(parent).size)
    }

    /// Origin of the node's coordinate space (its own top-left) in root coordinates
    fn absolute_origin(&self, node: NodeId) -> Point {
        let mut origin = self.frame(node).origin;
        let mut current = self.parent(node);
        while let Some(parent) = current {
            origin = origin.offset(self.frame(parent).origin);
            current = self.parent(parent);
        }
        origin
    }

    /// The node's frame expressed in the coordinate space of `space` (root space for `None`)
    fn frame_in(&self, node: NodeId, space: Option<NodeId>) -> Rect {
        let frame = self.frame(node);
        let parent_origin = match self.parent(node) {
            Some(parent) => self.absolute_origin(parent),
            None => Point::default(),
        };
        let space_origin = match space {
            Some(space) => self.absolute_origin(space),
            None => Point::default(),
        };
        frame.translated(Point::new(
            parent_origin.x - space_origin.x,
            parent_origin.y - space_origin.y,
        ))
    }
}
