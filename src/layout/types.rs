//! Geometry primitives shared by the resolver, the synthesizer and the hosts

use serde::{Deserialize, Serialize};

/// A 2D point in container coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by another point used as an offset
    pub fn offset(&self, by: Point) -> Point {
        Point::new(self.x + by.x, self.y + by.y)
    }
}

/// Width and height of a node
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Ratio between width and height, if the height is not zero
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.height.abs() > f64::EPSILON {
            Some(self.width / self.height)
        } else {
            None
        }
    }
}

/// A frame: origin plus size
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Create a zero-sized frame at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    pub fn mid_x(&self) -> f64 {
        self.origin.x + self.size.width / 2.0
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    pub fn mid_y(&self) -> f64 {
        self.origin.y + self.size.height / 2.0
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    /// Same frame moved by `by`
    pub fn translated(&self, by: Point) -> Rect {
        Rect {
            origin: self.origin.offset(by),
            size: self.size,
        }
    }

    /// Smallest frame containing both frames
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.min_x().min(other.min_x());
        let y = self.min_y().min(other.min_y());
        let right = self.max_x().max(other.max_x());
        let bottom = self.max_y().max(other.max_y());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Check whether two frames match within `tolerance` on every component
    pub fn approx_eq(&self, other: &Rect, tolerance: f64) -> bool {
        (self.origin.x - other.origin.x).abs() <= tolerance
            && (self.origin.y - other.origin.y).abs() <= tolerance
            && (self.size.width - other.size.width).abs() <= tolerance
            && (self.size.height - other.size.height).abs() <= tolerance
    }
}

/// Distances applied inside each side of a frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Insets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Insets {
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Same value on every side
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }
}

impl From<f64> for Insets {
    fn from(value: f64) -> Self {
        Insets::uniform(value)
    }
}

/// `(vertical, horizontal)`
impl From<(f64, f64)> for Insets {
    fn from((vertical, horizontal): (f64, f64)) -> Self {
        Insets::new(vertical, horizontal, vertical, horizontal)
    }
}

/// `(top, horizontal, bottom)`
impl From<(f64, f64, f64)> for Insets {
    fn from((top, horizontal, bottom): (f64, f64, f64)) -> Self {
        Insets::new(top, horizontal, bottom, horizontal)
    }
}

/// `(top, left, bottom, right)`
impl From<(f64, f64, f64, f64)> for Insets {
    fn from((top, left, bottom, right): (f64, f64, f64, f64)) -> Self {
        Insets::new(top, left, bottom, right)
    }
}

/// Insets expressed with reading-direction sides, flipped under RTL at intake
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DirectionalInsets {
    pub top: f64,
    pub start: f64,
    pub bottom: f64,
    pub end: f64,
}

impl DirectionalInsets {
    pub fn new(top: f64, start: f64, bottom: f64, end: f64) -> Self {
        Self {
            top,
            start,
            bottom,
            end,
        }
    }
}

/// A fraction of a reference dimension, written in percent (`Percent(50.0)` is half)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percent(pub f64);

impl Percent {
    /// Resolve against `reference`. Negative percentages resolve to 0.
    pub fn of(&self, reference: f64) -> f64 {
        self.0.max(0.0) * reference / 100.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }
}

/// A directive argument: absolute points or a percentage of the container
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Points(f64),
    Percent(Percent),
}

impl Value {
    /// Resolve to points against the container dimension of the slot's axis
    pub fn resolve(&self, reference: f64) -> f64 {
        match self {
            Value::Points(v) => *v,
            Value::Percent(p) => p.of(reference),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Points(value)
    }
}

impl From<Percent> for Value {
    fn from(percent: Percent) -> Self {
        Value::Percent(percent)
    }
}
