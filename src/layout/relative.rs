//! Placement relative to a group of sibling frames (above, below, left_of, right_of, before, after)

use super::anchor::{HorizontalSide, LayoutDirection};
use super::directives::Slot;
use super::types::Rect;

/// Horizontal alignment against the union of reference frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
    Start,
    End,
}

impl HorizontalAlign {
    /// The physical side this alignment names under `direction`
    pub fn side(self, direction: LayoutDirection) -> HorizontalSide {
        match (self, direction) {
            (Self::Left, _)
            | (Self::Start, LayoutDirection::Ltr)
            | (Self::End, LayoutDirection::Rtl) => HorizontalSide::Left,
            (Self::Center, _) => HorizontalSide::Center,
            (Self::Right, _)
            | (Self::Start, LayoutDirection::Rtl)
            | (Self::End, LayoutDirection::Ltr) => HorizontalSide::Right,
        }
    }

    pub fn from_name(name: &str) -> Option<HorizontalAlign> {
        match name {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            "start" => Some(Self::Start),
            "end" => Some(Self::End),
            _ => None,
        }
    }
}

/// Vertical alignment against the union of reference frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
}

impl VerticalAlign {
    pub fn from_name(name: &str) -> Option<VerticalAlign> {
        match name {
            "top" => Some(Self::Top),
            "center" => Some(Self::Center),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }
}

/// Where to put the node relative to the reference group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Above(Option<HorizontalAlign>),
    Below(Option<HorizontalAlign>),
    LeftOf(Option<VerticalAlign>),
    RightOf(Option<VerticalAlign>),
    /// `left_of` in LTR, `right_of` in RTL
    Before(Option<VerticalAlign>),
    /// `right_of` in LTR, `left_of` in RTL
    After(Option<VerticalAlign>),
}

impl Relation {
    /// Replace `Before`/`After` with the physical relation for `direction`
    pub fn physical(self, direction: LayoutDirection) -> Relation {
        match (self, direction) {
            (Self::Before(a), LayoutDirection::Ltr) | (Self::After(a), LayoutDirection::Rtl) => {
                Self::LeftOf(a)
            }
            (Self::Before(a), LayoutDirection::Rtl) | (Self::After(a), LayoutDirection::Ltr) => {
                Self::RightOf(a)
            }
            (other, _) => other,
        }
    }
}

/// Slot writes that place a node against `frames` (already in container space).
///
/// Returns nothing when `frames` is empty; the caller reports that.
pub fn place(relation: Relation, frames: &[Rect], direction: LayoutDirection) -> Vec<(Slot, f64)> {
    let Some(first) = frames.first() else {
        return Vec::new();
    };
    let bounds = frames[1..].iter().fold(*first, |acc, f| acc.union(f));

    let (primary, aligned) = match relation.physical(direction) {
        Relation::Above(align) => (
            (Slot::Bottom, bounds.min_y()),
            align.map(|a| horizontal(a, &bounds, direction)),
        ),
        Relation::Below(align) => (
            (Slot::Top, bounds.max_y()),
            align.map(|a| horizontal(a, &bounds, direction)),
        ),
        Relation::LeftOf(align) | Relation::Before(align) => (
            (Slot::Right, bounds.min_x()),
            align.map(|a| vertical(a, &bounds)),
        ),
        Relation::RightOf(align) | Relation::After(align) => (
            (Slot::Left, bounds.max_x()),
            align.map(|a| vertical(a, &bounds)),
        ),
    };
    std::iter::once(primary).chain(aligned).collect()
}

fn horizontal(align: HorizontalAlign, bounds: &Rect, direction: LayoutDirection) -> (Slot, f64) {
    match align.side(direction) {
        HorizontalSide::Left => (Slot::Left, bounds.min_x()),
        HorizontalSide::Center => (Slot::HCenter, bounds.mid_x()),
        HorizontalSide::Right => (Slot::Right, bounds.max_x()),
    }
}

fn vertical(align: VerticalAlign, bounds: &Rect) -> (Slot, f64) {
    match align {
        VerticalAlign::Top => (Slot::Top, bounds.min_y()),
        VerticalAlign::Center => (Slot::VCenter, bounds.mid_y()),
        VerticalAlign::Bottom => (Slot::Bottom, bounds.max_y()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> Vec<Rect> {
        vec![
            Rect::new(10.0, 50.0, 40.0, 20.0),
            Rect::new(80.0, 40.0, 30.0, 50.0),
        ]
    }

    #[test]
    fn test_below_aligned_end_follows_direction() {
        let ltr = place(Relation::Below(Some(HorizontalAlign::End)), &group(), LayoutDirection::Ltr);
        assert_eq!(ltr, vec![(Slot::Top, 90.0), (Slot::Right, 110.0)]);
        let rtl = place(Relation::Below(Some(HorizontalAlign::End)), &group(), LayoutDirection::Rtl);
        assert_eq!(rtl, vec![(Slot::Top, 90.0), (Slot::Left, 10.0)]);
    }

    #[test]
    fn test_above_uses_topmost_edge() {
        let writes = place(Relation::Above(None), &group(), LayoutDirection::Ltr);
        assert_eq!(writes, vec![(Slot::Bottom, 40.0)]);
    }

    #[test]
    fn test_below_with_alignment() {
        let writes = place(
            Relation::Below(Some(HorizontalAlign::Center)),
            &group(),
            LayoutDirection::Ltr,
        );
        assert_eq!(writes, vec![(Slot::Top, 90.0), (Slot::HCenter, 60.0)]);
    }

    #[test]
    fn test_left_and_right_of() {
        let ltr = LayoutDirection::Ltr;
        assert_eq!(
            place(Relation::LeftOf(Some(VerticalAlign::Top)), &group(), ltr),
            vec![(Slot::Right, 10.0), (Slot::Top, 40.0)]
        );
        assert_eq!(
            place(Relation::RightOf(Some(VerticalAlign::Bottom)), &group(), ltr),
            vec![(Slot::Left, 110.0), (Slot::Bottom, 90.0)]
        );
    }

    #[test]
    fn test_before_after_follow_direction() {
        let frames = group();
        assert_eq!(
            place(Relation::Before(None), &frames, LayoutDirection::Ltr),
            place(Relation::LeftOf(None), &frames, LayoutDirection::Ltr)
        );
        assert_eq!(
            place(Relation::Before(None), &frames, LayoutDirection::Rtl),
            place(Relation::RightOf(None), &frames, LayoutDirection::Rtl)
        );
        assert_eq!(
            place(Relation::After(None), &frames, LayoutDirection::Rtl),
            vec![(Slot::Right, 10.0)]
        );
    }

    #[test]
    fn test_start_alignment_flips() {
        let frames = group();
        assert_eq!(
            place(Relation::Above(Some(HorizontalAlign::Start)), &frames, LayoutDirection::Rtl),
            vec![(Slot::Bottom, 40.0), (Slot::Right, 110.0)]
        );
    }

    #[test]
    fn test_empty_group_writes_nothing() {
        assert!(place(Relation::Below(None), &[], LayoutDirection::Ltr).is_empty());
    }
}
