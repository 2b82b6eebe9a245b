//! Anchors, edges and the reading direction used to resolve their aliases
//!
//! ```text
//!          top_left      top_center      top_right
//!             o-------------o--------------o
//!             |                            |
//!  center_left o           center o         o center_right
//!             |                            |
//!             o-------------o--------------o
//!       bottom_left    bottom_center    bottom_right
//! ```
//!
//! `start`/`end` names are aliases of `left`/`right` in LTR and of `right`/`left` in RTL.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use super::host::NodeId;
use super::types::{Point, Rect};

/// Reading direction used for `start`/`end`/`before`/`after`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

static CURRENT_DIRECTION: AtomicU8 = AtomicU8::new(0);

impl LayoutDirection {
    /// The process-wide direction picked up by new sessions
    pub fn current() -> LayoutDirection {
        match CURRENT_DIRECTION.load(Ordering::Relaxed) {
            1 => LayoutDirection::Rtl,
            _ => LayoutDirection::Ltr,
        }
    }

    /// Change the process-wide direction. Sessions already started keep theirs.
    pub fn set(direction: LayoutDirection) {
        let raw = match direction {
            LayoutDirection::Ltr => 0,
            LayoutDirection::Rtl => 1,
        };
        CURRENT_DIRECTION.store(raw, Ordering::Relaxed);
    }

    pub fn from_name(name: &str) -> Option<LayoutDirection> {
        match name {
            "ltr" => Some(LayoutDirection::Ltr),
            "rtl" => Some(LayoutDirection::Rtl),
            _ => None,
        }
    }
}

impl fmt::Display for LayoutDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutDirection::Ltr => write!(f, "ltr"),
            LayoutDirection::Rtl => write!(f, "rtl"),
        }
    }
}

/// Edges positioned along the x axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalEdgeKind {
    Left,
    HCenter,
    Right,
    Start,
    End,
}

/// A vertical line of a frame after `start`/`end` have been resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalSide {
    Left,
    Center,
    Right,
}

impl HorizontalEdgeKind {
    /// The physical line this edge names under `direction`
    pub fn side(self, direction: LayoutDirection) -> HorizontalSide {
        match (self, direction) {
            (Self::Left, _)
            | (Self::Start, LayoutDirection::Ltr)
            | (Self::End, LayoutDirection::Rtl) => HorizontalSide::Left,
            (Self::HCenter, _) => HorizontalSide::Center,
            (Self::Right, _)
            | (Self::Start, LayoutDirection::Rtl)
            | (Self::End, LayoutDirection::Ltr) => HorizontalSide::Right,
        }
    }

    /// x coordinate of this edge on `frame`
    pub fn coordinate(self, frame: &Rect, direction: LayoutDirection) -> f64 {
        match self.side(direction) {
            HorizontalSide::Left => frame.min_x(),
            HorizontalSide::Center => frame.mid_x(),
            HorizontalSide::Right => frame.max_x(),
        }
    }

    pub fn from_name(name: &str) -> Option<HorizontalEdgeKind> {
        match name {
            "left" => Some(Self::Left),
            "h_center" | "hcenter" => Some(Self::HCenter),
            "right" => Some(Self::Right),
            "start" => Some(Self::Start),
            "end" => Some(Self::End),
            _ => None,
        }
    }
}

/// Edges positioned along the y axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalEdgeKind {
    Top,
    VCenter,
    Bottom,
}

impl VerticalEdgeKind {
    /// y coordinate of this edge on `frame`
    pub fn coordinate(self, frame: &Rect) -> f64 {
        match self {
            Self::Top => frame.min_y(),
            Self::VCenter => frame.mid_y(),
            Self::Bottom => frame.max_y(),
        }
    }

    pub fn from_name(name: &str) -> Option<VerticalEdgeKind> {
        match name {
            "top" => Some(Self::Top),
            "v_center" | "vcenter" => Some(Self::VCenter),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }
}

/// The nine named points of a frame plus their reading-direction aliases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorKind {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
    TopStart,
    TopEnd,
    CenterStart,
    CenterEnd,
    BottomStart,
    BottomEnd,
}

impl AnchorKind {
    pub const ALL: [AnchorKind; 15] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::CenterLeft,
        Self::Center,
        Self::CenterRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
        Self::TopStart,
        Self::TopEnd,
        Self::CenterStart,
        Self::CenterEnd,
        Self::BottomStart,
        Self::BottomEnd,
    ];

    /// Split into the edge pair that locates the anchor
    pub fn edges(self) -> (HorizontalEdgeKind, VerticalEdgeKind) {
        use HorizontalEdgeKind as H;
        use VerticalEdgeKind as V;
        match self {
            Self::TopLeft => (H::Left, V::Top),
            Self::TopCenter => (H::HCenter, V::Top),
            Self::TopRight => (H::Right, V::Top),
            Self::CenterLeft => (H::Left, V::VCenter),
            Self::Center => (H::HCenter, V::VCenter),
            Self::CenterRight => (H::Right, V::VCenter),
            Self::BottomLeft => (H::Left, V::Bottom),
            Self::BottomCenter => (H::HCenter, V::Bottom),
            Self::BottomRight => (H::Right, V::Bottom),
            Self::TopStart => (H::Start, V::Top),
            Self::TopEnd => (H::End, V::Top),
            Self::CenterStart => (H::Start, V::VCenter),
            Self::CenterEnd => (H::End, V::VCenter),
            Self::BottomStart => (H::Start, V::Bottom),
            Self::BottomEnd => (H::End, V::Bottom),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::TopLeft => "top_left",
            Self::TopCenter => "top_center",
            Self::TopRight => "top_right",
            Self::CenterLeft => "center_left",
            Self::Center => "center",
            Self::CenterRight => "center_right",
            Self::BottomLeft => "bottom_left",
            Self::BottomCenter => "bottom_center",
            Self::BottomRight => "bottom_right",
            Self::TopStart => "top_start",
            Self::TopEnd => "top_end",
            Self::CenterStart => "center_start",
            Self::CenterEnd => "center_end",
            Self::BottomStart => "bottom_start",
            Self::BottomEnd => "bottom_end",
        }
    }

    pub fn from_name(name: &str) -> Option<AnchorKind> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }
}

/// Absolute point of `kind` on `frame`
pub fn resolve_anchor(frame: &Rect, kind: AnchorKind, direction: LayoutDirection) -> Point {
    let (h, v) = kind.edges();
    Point::new(h.coordinate(frame, direction), v.coordinate(frame))
}

/// A named point on a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anchor {
    pub node: NodeId,
    pub kind: AnchorKind,
}

/// A vertical line on a node (left, h_center, right, start, end)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HorizontalEdge {
    pub node: NodeId,
    pub kind: HorizontalEdgeKind,
}

/// A horizontal line on a node (top, v_center, bottom)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VerticalEdge {
    pub node: NodeId,
    pub kind: VerticalEdgeKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Rect {
        Rect::new(10.0, 20.0, 100.0, 40.0)
    }

    #[test]
    fn test_anchor_points() {
        let f = frame();
        let ltr = LayoutDirection::Ltr;
        assert_eq!(resolve_anchor(&f, AnchorKind::TopLeft, ltr), Point::new(10.0, 20.0));
        assert_eq!(resolve_anchor(&f, AnchorKind::Center, ltr), Point::new(60.0, 40.0));
        assert_eq!(
            resolve_anchor(&f, AnchorKind::BottomRight, ltr),
            Point::new(110.0, 60.0)
        );
        assert_eq!(
            resolve_anchor(&f, AnchorKind::CenterRight, ltr),
            Point::new(110.0, 40.0)
        );
    }

    #[test]
    fn test_start_end_aliases_flip_under_rtl() {
        let f = frame();
        assert_eq!(
            resolve_anchor(&f, AnchorKind::TopStart, LayoutDirection::Ltr),
            resolve_anchor(&f, AnchorKind::TopLeft, LayoutDirection::Ltr)
        );
        assert_eq!(
            resolve_anchor(&f, AnchorKind::TopStart, LayoutDirection::Rtl),
            resolve_anchor(&f, AnchorKind::TopRight, LayoutDirection::Rtl)
        );
        assert_eq!(
            HorizontalEdgeKind::End.coordinate(&f, LayoutDirection::Rtl),
            10.0
        );
        assert_eq!(
            HorizontalEdgeKind::End.coordinate(&f, LayoutDirection::Ltr),
            110.0
        );
    }

    #[test]
    fn test_edge_sides() {
        use HorizontalEdgeKind::*;
        let ltr = [Left, HCenter, Right, Start, End].map(|k| k.side(LayoutDirection::Ltr));
        let rtl = [Left, HCenter, Right, Start, End].map(|k| k.side(LayoutDirection::Rtl));
        assert_eq!(
            ltr,
            [
                HorizontalSide::Left,
                HorizontalSide::Center,
                HorizontalSide::Right,
                HorizontalSide::Left,
                HorizontalSide::Right
            ]
        );
        assert_eq!(
            rtl,
            [
                HorizontalSide::Left,
                HorizontalSide::Center,
                HorizontalSide::Right,
                HorizontalSide::Right,
                HorizontalSide::Left
            ]
        );
    }

    #[test]
    fn test_edge_coordinates() {
        let f = frame();
        assert_eq!(HorizontalEdgeKind::HCenter.coordinate(&f, LayoutDirection::Rtl), 60.0);
        assert_eq!(VerticalEdgeKind::Top.coordinate(&f), 20.0);
        assert_eq!(VerticalEdgeKind::VCenter.coordinate(&f), 40.0);
        assert_eq!(VerticalEdgeKind::Bottom.coordinate(&f), 60.0);
    }

    #[test]
    fn test_anchor_names_round_trip() {
        for kind in AnchorKind::ALL {
            assert_eq!(AnchorKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(AnchorKind::from_name("middle"), None);
    }

    #[test]
    fn test_edge_names() {
        assert_eq!(HorizontalEdgeKind::from_name("start"), Some(HorizontalEdgeKind::Start));
        assert_eq!(VerticalEdgeKind::from_name("v_center"), Some(VerticalEdgeKind::VCenter));
        assert_eq!(VerticalEdgeKind::from_name("left"), None);
    }
}
