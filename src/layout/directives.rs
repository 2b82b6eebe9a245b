//! The accumulator: resolved slot values recorded by a session in call order

use std::fmt;

/// A named quantity a directive can set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Top,
    Left,
    Bottom,
    Right,
    HCenter,
    VCenter,
    Width,
    Height,
    MinWidth,
    MaxWidth,
    MinHeight,
    MaxHeight,
    AspectRatio,
    MarginTop,
    MarginLeft,
    MarginBottom,
    MarginRight,
}

const SLOT_COUNT: usize = 17;

impl Slot {
    pub fn name(self) -> &'static str {
        match self {
            Slot::Top => "top",
            Slot::Left => "left",
            Slot::Bottom => "bottom",
            Slot::Right => "right",
            Slot::HCenter => "h_center",
            Slot::VCenter => "v_center",
            Slot::Width => "width",
            Slot::Height => "height",
            Slot::MinWidth => "min_width",
            Slot::MaxWidth => "max_width",
            Slot::MinHeight => "min_height",
            Slot::MaxHeight => "max_height",
            Slot::AspectRatio => "aspect_ratio",
            Slot::MarginTop => "margin_top",
            Slot::MarginLeft => "margin_left",
            Slot::MarginBottom => "margin_bottom",
            Slot::MarginRight => "margin_right",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Placement of a node inside the span between two opposing edges when its size is smaller
/// (or larger) than the span. `Start` is the physical left/top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanAlign {
    Start,
    Center,
    End,
}

/// Resolved directive values for one session.
///
/// Positions are coordinates in the container's space (a `right(10)` on a 200-wide container is
/// stored as 190). Each slot is last-write-wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directives {
    values: [Option<f64>; SLOT_COUNT],
    pub fit_size: bool,
    pub pin_edges: bool,
    pub justify: Option<SpanAlign>,
    pub align: Option<SpanAlign>,
}

impl Directives {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, slot: Slot, value: f64) {
        self.values[slot as usize] = Some(value);
    }

    pub fn get(&self, slot: Slot) -> Option<f64> {
        self.values[slot as usize]
    }

    pub fn is_set(&self, slot: Slot) -> bool {
        self.get(slot).is_some()
    }

    pub fn clear(&mut self, slot: Slot) {
        self.values[slot as usize] = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let mut d = Directives::new();
        d.set(Slot::Width, 10.0);
        d.set(Slot::Width, 20.0);
        assert_eq!(d.get(Slot::Width), Some(20.0));
    }

    #[test]
    fn test_unset_slots() {
        let mut d = Directives::new();
        assert!(!d.is_set(Slot::MarginRight));
        d.set(Slot::MarginRight, 4.0);
        assert!(d.is_set(Slot::MarginRight));
        d.clear(Slot::MarginRight);
        assert!(!d.is_set(Slot::MarginRight));
    }

    #[test]
    fn test_slot_names() {
        assert_eq!(Slot::HCenter.to_string(), "h_center");
        assert_eq!(Slot::MarginBottom.to_string(), "margin_bottom");
    }
}
