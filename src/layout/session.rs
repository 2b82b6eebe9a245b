//! The fluent directive surface.
//!
//! A [`PinLayout`] session borrows its host mutably, records directives for one node, and writes
//! the synthesized frame back exactly once: on [`PinLayout::apply`], or when the session is
//! dropped while still accumulating. [`PinLayout::discard`] ends it without a write.
//!
//! Every value is normalized when the directive is issued: percentages are resolved against the
//! container, `right`/`bottom` offsets become coordinates, and `start`/`end`/`before`/`after`
//! become physical sides for the session's direction.
//!
//! ```
//! use pinframe::layout::{pin, NodeTree, Percent, Rect};
//!
//! let mut tree = NodeTree::new();
//! let root = tree.add_root("root", Rect::new(0.0, 0.0, 300.0, 200.0));
//! let card = tree.add_child(root, "card", Rect::zero());
//!
//! let resolution = pin(&mut tree, card)
//!     .top(10.0)
//!     .horizontally(20.0)
//!     .height(Percent(50.0))
//!     .apply();
//!
//! assert_eq!(resolution.frame, Rect::new(20.0, 10.0, 260.0, 100.0));
//! ```

use super::anchor::{
    resolve_anchor, Anchor, AnchorKind, HorizontalEdge, HorizontalEdgeKind, HorizontalSide,
    LayoutDirection, VerticalEdge, VerticalEdgeKind,
};
use super::config::LayoutConfig;
use super::directives::{Directives, Slot, SpanAlign};
use super::host::{LayoutHost, NodeId};
use super::relative::{place, HorizontalAlign, Relation, VerticalAlign};
use super::synth::{synthesize, SynthesisInput};
use super::types::{DirectionalInsets, Insets, Point, Rect, Size, Value};
use super::warning::{log_warnings, LayoutWarning};

/// Lifecycle of a session; transitions out of `Accumulating` are one-way
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Accumulating,
    Committed,
    Discarded,
}

/// Outcome of a committed session
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub frame: Rect,
    pub warnings: Vec<LayoutWarning>,
}

/// Start a session for `node` using the process-wide direction and default config
pub fn pin<H: LayoutHost>(host: &mut H, node: NodeId) -> PinLayout<'_, H> {
    PinLayout::new(host, node)
}

/// Directive accumulator for one node and one pass
pub struct PinLayout<'h, H: LayoutHost> {
    host: &'h mut H,
    node: NodeId,
    label: String,
    container: Option<NodeId>,
    container_size: Size,
    missing_container_reported: bool,
    direction: LayoutDirection,
    tolerance: f64,
    log_warnings: bool,
    directives: Directives,
    warnings: Vec<LayoutWarning>,
    state: SessionState,
}

macro_rules! anchor_directives {
    ($($kind:ident => $to:ident, $here:ident;)*) => {
        $(
            #[doc = concat!("Pin this node's `", stringify!($here), "` to `anchor`")]
            pub fn $to(self, anchor: Anchor) -> Self {
                self.anchor_to(AnchorKind::$kind, anchor)
            }

            #[doc = concat!("Pin this node's `", stringify!($here), "` to the container's `", stringify!($here), "`")]
            pub fn $here(self) -> Self {
                self.anchor_to_container(AnchorKind::$kind)
            }
        )*
    };
}

impl<'h, H: LayoutHost> PinLayout<'h, H> {
    pub fn new(host: &'h mut H, node: NodeId) -> Self {
        Self::with_config(host, node, &LayoutConfig::default())
    }

    pub fn with_config(host: &'h mut H, node: NodeId, config: &LayoutConfig) -> Self {
        let container = host.parent(node);
        let container_size = host.parent_bounds(node).unwrap_or_default();
        let label = host.label(node);
        Self {
            host,
            node,
            label,
            container,
            container_size,
            missing_container_reported: false,
            direction: config.effective_direction(),
            tolerance: config.tolerance,
            log_warnings: config.log_warnings,
            directives: Directives::new(),
            warnings: Vec::new(),
            state: SessionState::Accumulating,
        }
    }

    /// Override the reading direction. Directives already issued keep the sides they resolved to.
    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn direction(&self) -> LayoutDirection {
        self.direction
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn directives(&self) -> &Directives {
        &self.directives
    }

    /// Warnings raised at intake so far
    pub fn warnings(&self) -> &[LayoutWarning] {
        &self.warnings
    }

    // ---- absolute positioning ----

    pub fn top(mut self, value: impl Into<Value>) -> Self {
        let v = self.resolve_vertical(value.into(), "top");
        self.set(Slot::Top, v);
        self
    }

    pub fn left(mut self, value: impl Into<Value>) -> Self {
        let v = self.resolve_horizontal(value.into(), "left");
        self.set(Slot::Left, v);
        self
    }

    /// Distance from the container's bottom edge
    pub fn bottom(mut self, value: impl Into<Value>) -> Self {
        let v = self.resolve_vertical(value.into(), "bottom");
        let height = self.container("bottom").height;
        self.set(Slot::Bottom, height - v);
        self
    }

    /// Distance from the container's right edge
    pub fn right(mut self, value: impl Into<Value>) -> Self {
        let v = self.resolve_horizontal(value.into(), "right");
        let width = self.container("right").width;
        self.set(Slot::Right, width - v);
        self
    }

    /// Horizontal center, offset from the container's center (positive moves right)
    pub fn h_center(mut self, value: impl Into<Value>) -> Self {
        let v = self.resolve_horizontal(value.into(), "h_center");
        let width = self.container("h_center").width;
        self.set(Slot::HCenter, width / 2.0 + v);
        self
    }

    /// Vertical center, offset from the container's center (positive moves down)
    pub fn v_center(mut self, value: impl Into<Value>) -> Self {
        let v = self.resolve_vertical(value.into(), "v_center");
        let height = self.container("v_center").height;
        self.set(Slot::VCenter, height / 2.0 + v);
        self
    }

    /// `left` in LTR, `right` in RTL
    pub fn start(self, value: impl Into<Value>) -> Self {
        match self.direction {
            LayoutDirection::Ltr => self.left(value),
            LayoutDirection::Rtl => self.right(value),
        }
    }

    /// `right` in LTR, `left` in RTL
    pub fn end(self, value: impl Into<Value>) -> Self {
        match self.direction {
            LayoutDirection::Ltr => self.right(value),
            LayoutDirection::Rtl => self.left(value),
        }
    }

    // ---- bulk positioning ----

    pub fn all(self, value: impl Into<Value>) -> Self {
        let value: Value = value.into();
        self.top(value).left(value).bottom(value).right(value)
    }

    pub fn horizontally(self, value: impl Into<Value>) -> Self {
        let value: Value = value.into();
        self.left(value).right(value)
    }

    pub fn vertically(self, value: impl Into<Value>) -> Self {
        let value: Value = value.into();
        self.top(value).bottom(value)
    }

    // ---- edge-relative positioning ----

    /// Pin one of this node's vertical lines to a vertical line of another node
    pub fn h_edge_to(mut self, own: HorizontalEdgeKind, target: HorizontalEdge) -> Self {
        let frame = self.host.frame_in(target.node, self.container);
        let x = target.kind.coordinate(&frame, self.direction);
        self.set(horizontal_slot(own.side(self.direction)), x);
        self
    }

    /// Pin one of this node's horizontal lines to a horizontal line of another node
    pub fn v_edge_to(mut self, own: VerticalEdgeKind, target: VerticalEdge) -> Self {
        let frame = self.host.frame_in(target.node, self.container);
        let y = target.kind.coordinate(&frame);
        self.set(vertical_slot(own), y);
        self
    }

    pub fn top_to(self, edge: VerticalEdge) -> Self {
        self.v_edge_to(VerticalEdgeKind::Top, edge)
    }

    pub fn v_center_to(self, edge: VerticalEdge) -> Self {
        self.v_edge_to(VerticalEdgeKind::VCenter, edge)
    }

    pub fn bottom_to(self, edge: VerticalEdge) -> Self {
        self.v_edge_to(VerticalEdgeKind::Bottom, edge)
    }

    pub fn left_to(self, edge: HorizontalEdge) -> Self {
        self.h_edge_to(HorizontalEdgeKind::Left, edge)
    }

    pub fn h_center_to(self, edge: HorizontalEdge) -> Self {
        self.h_edge_to(HorizontalEdgeKind::HCenter, edge)
    }

    pub fn right_to(self, edge: HorizontalEdge) -> Self {
        self.h_edge_to(HorizontalEdgeKind::Right, edge)
    }

    pub fn start_to(self, edge: HorizontalEdge) -> Self {
        self.h_edge_to(HorizontalEdgeKind::Start, edge)
    }

    pub fn end_to(self, edge: HorizontalEdge) -> Self {
        self.h_edge_to(HorizontalEdgeKind::End, edge)
    }

    // ---- anchor-relative positioning ----

    /// Pin this node's `own` anchor onto `target`; sets one horizontal and one vertical slot
    pub fn anchor_to(mut self, own: AnchorKind, target: Anchor) -> Self {
        let frame = self.host.frame_in(target.node, self.container);
        let point = resolve_anchor(&frame, target.kind, self.direction);
        self.set_anchor(own, point);
        self
    }

    /// Pin this node's `kind` anchor onto the same anchor of the container
    pub fn anchor_to_container(mut self, kind: AnchorKind) -> Self {
        let size = self.container(kind.name());
        let bounds = Rect::new(0.0, 0.0, size.width, size.height);
        let point = resolve_anchor(&bounds, kind, self.direction);
        self.set_anchor(kind, point);
        self
    }

    anchor_directives! {
        TopLeft => top_left_to, top_left;
        TopCenter => top_center_to, top_center;
        TopRight => top_right_to, top_right;
        CenterLeft => center_left_to, center_left;
        Center => center_to, center;
        CenterRight => center_right_to, center_right;
        BottomLeft => bottom_left_to, bottom_left;
        BottomCenter => bottom_center_to, bottom_center;
        BottomRight => bottom_right_to, bottom_right;
        TopStart => top_start_to, top_start;
        TopEnd => top_end_to, top_end;
        CenterStart => center_start_to, center_start;
        CenterEnd => center_end_to, center_end;
        BottomStart => bottom_start_to, bottom_start;
        BottomEnd => bottom_end_to, bottom_end;
    }

    // ---- sibling-relative positioning ----

    /// Place above the highest of `nodes`
    pub fn above(self, nodes: &[NodeId]) -> Self {
        self.relative(Relation::Above(None), nodes, "above")
    }

    pub fn above_aligned(self, nodes: &[NodeId], align: HorizontalAlign) -> Self {
        self.relative(Relation::Above(Some(align)), nodes, "above")
    }

    /// Place below the lowest of `nodes`
    pub fn below(self, nodes: &[NodeId]) -> Self {
        self.relative(Relation::Below(None), nodes, "below")
    }

    pub fn below_aligned(self, nodes: &[NodeId], align: HorizontalAlign) -> Self {
        self.relative(Relation::Below(Some(align)), nodes, "below")
    }

    pub fn left_of(self, nodes: &[NodeId]) -> Self {
        self.relative(Relation::LeftOf(None), nodes, "left_of")
    }

    pub fn left_of_aligned(self, nodes: &[NodeId], align: VerticalAlign) -> Self {
        self.relative(Relation::LeftOf(Some(align)), nodes, "left_of")
    }

    pub fn right_of(self, nodes: &[NodeId]) -> Self {
        self.relative(Relation::RightOf(None), nodes, "right_of")
    }

    pub fn right_of_aligned(self, nodes: &[NodeId], align: VerticalAlign) -> Self {
        self.relative(Relation::RightOf(Some(align)), nodes, "right_of")
    }

    pub fn before(self, nodes: &[NodeId]) -> Self {
        self.relative(Relation::Before(None), nodes, "before")
    }

    pub fn before_aligned(self, nodes: &[NodeId], align: VerticalAlign) -> Self {
        self.relative(Relation::Before(Some(align)), nodes, "before")
    }

    pub fn after(self, nodes: &[NodeId]) -> Self {
        self.relative(Relation::After(None), nodes, "after")
    }

    pub fn after_aligned(self, nodes: &[NodeId], align: VerticalAlign) -> Self {
        self.relative(Relation::After(Some(align)), nodes, "after")
    }

    /// Apply a sibling relation; references outside the node's siblings are skipped
    pub fn relative(mut self, relation: Relation, nodes: &[NodeId], directive: &str) -> Self {
        let siblings = self.host.siblings(self.node);
        let mut frames = Vec::with_capacity(nodes.len());
        for &other in nodes {
            if siblings.contains(&other) {
                frames.push(self.host.frame_in(other, self.container));
            } else {
                let other = self.host.label(other);
                self.warnings.push(LayoutWarning::ineffective(format!(
                    "{}: '{}' is not a sibling of '{}'; reference ignored",
                    directive, other, self.label
                )));
            }
        }
        if frames.is_empty() {
            self.warnings.push(LayoutWarning::ineffective(format!(
                "{} has no sibling to place against",
                directive
            )));
            return self;
        }
        for (slot, value) in place(relation, &frames, self.direction) {
            self.set(slot, value);
        }
        self
    }

    // ---- sizing ----

    pub fn width(mut self, value: impl Into<Value>) -> Self {
        let v = self.resolve_horizontal(value.into(), "width");
        self.set_size(Slot::Width, v);
        self
    }

    pub fn height(mut self, value: impl Into<Value>) -> Self {
        let v = self.resolve_vertical(value.into(), "height");
        self.set_size(Slot::Height, v);
        self
    }

    pub fn size(self, size: Size) -> Self {
        self.width(size.width).height(size.height)
    }

    /// Same width and height; a percentage resolves against the container width for both
    pub fn size_square(mut self, value: impl Into<Value>) -> Self {
        let v = self.resolve_horizontal(value.into(), "size_square");
        self.set_size(Slot::Width, v);
        self.set_size(Slot::Height, v);
        self
    }

    pub fn width_of(self, node: NodeId) -> Self {
        let width = self.host.frame(node).size.width;
        self.width(width)
    }

    pub fn height_of(self, node: NodeId) -> Self {
        let height = self.host.frame(node).size.height;
        self.height(height)
    }

    pub fn size_of(self, node: NodeId) -> Self {
        let size = self.host.frame(node).size;
        self.size(size)
    }

    pub fn min_width(mut self, value: impl Into<Value>) -> Self {
        let v = self.resolve_horizontal(value.into(), "min_width");
        self.set_size(Slot::MinWidth, v);
        self
    }

    pub fn max_width(mut self, value: impl Into<Value>) -> Self {
        let v = self.resolve_horizontal(value.into(), "max_width");
        self.set_size(Slot::MaxWidth, v);
        self
    }

    pub fn min_height(mut self, value: impl Into<Value>) -> Self {
        let v = self.resolve_vertical(value.into(), "min_height");
        self.set_size(Slot::MinHeight, v);
        self
    }

    pub fn max_height(mut self, value: impl Into<Value>) -> Self {
        let v = self.resolve_vertical(value.into(), "max_height");
        self.set_size(Slot::MaxHeight, v);
        self
    }

    /// Width divided by height; must be positive
    pub fn aspect_ratio(mut self, ratio: f64) -> Self {
        if ratio.is_finite() && ratio > 0.0 {
            self.set(Slot::AspectRatio, ratio);
        } else {
            self.warnings.push(LayoutWarning::ineffective(format!(
                "aspect_ratio {} ignored: the ratio must be positive",
                ratio
            )));
        }
        self
    }

    /// Use the current aspect ratio of another node
    pub fn aspect_ratio_of(mut self, node: NodeId) -> Self {
        match self.host.frame(node).size.aspect_ratio() {
            Some(ratio) => self.aspect_ratio(ratio),
            None => {
                let other = self.host.label(node);
                self.warnings.push(LayoutWarning::underconstrained(format!(
                    "aspect_ratio_of('{}') ignored: its height is zero",
                    other
                )));
                self
            }
        }
    }

    /// Use the aspect ratio of this node's intrinsic content size
    pub fn aspect_ratio_from_content(mut self) -> Self {
        match self
            .host
            .intrinsic_size(self.node)
            .and_then(|s| s.aspect_ratio())
        {
            Some(ratio) => self.aspect_ratio(ratio),
            None => {
                self.warnings.push(LayoutWarning::underconstrained(
                    "aspect_ratio_from_content ignored: no measurable content size",
                ));
                self
            }
        }
    }

    /// Size to the intrinsic content size wherever no explicit size is set
    pub fn fit_size(mut self) -> Self {
        log::trace!(target: "pinframe", "[{}] fit_size", self.label);
        self.directives.fit_size = true;
        self
    }

    // ---- margins ----

    pub fn margin_top(mut self, value: impl Into<Value>) -> Self {
        let v = self.resolve_vertical(value.into(), "margin_top");
        self.set(Slot::MarginTop, v);
        self
    }

    pub fn margin_left(mut self, value: impl Into<Value>) -> Self {
        let v = self.resolve_horizontal(value.into(), "margin_left");
        self.set(Slot::MarginLeft, v);
        self
    }

    pub fn margin_bottom(mut self, value: impl Into<Value>) -> Self {
        let v = self.resolve_vertical(value.into(), "margin_bottom");
        self.set(Slot::MarginBottom, v);
        self
    }

    pub fn margin_right(mut self, value: impl Into<Value>) -> Self {
        let v = self.resolve_horizontal(value.into(), "margin_right");
        self.set(Slot::MarginRight, v);
        self
    }

    pub fn margin_start(self, value: impl Into<Value>) -> Self {
        match self.direction {
            LayoutDirection::Ltr => self.margin_left(value),
            LayoutDirection::Rtl => self.margin_right(value),
        }
    }

    pub fn margin_end(self, value: impl Into<Value>) -> Self {
        match self.direction {
            LayoutDirection::Ltr => self.margin_right(value),
            LayoutDirection::Rtl => self.margin_left(value),
        }
    }

    pub fn margin_horizontal(self, value: impl Into<Value>) -> Self {
        let value: Value = value.into();
        self.margin_left(value).margin_right(value)
    }

    pub fn margin_vertical(self, value: impl Into<Value>) -> Self {
        let value: Value = value.into();
        self.margin_top(value).margin_bottom(value)
    }

    /// Set all four margins: `margin(4.0)`, `margin((v, h))`, `margin((t, h, b))`,
    /// `margin((t, l, b, r))` or `margin(Insets { .. })`
    pub fn margin(self, insets: impl Into<Insets>) -> Self {
        let insets = insets.into();
        self.margin_top(insets.top)
            .margin_left(insets.left)
            .margin_bottom(insets.bottom)
            .margin_right(insets.right)
    }

    pub fn margin_directional(self, insets: DirectionalInsets) -> Self {
        self.margin_top(insets.top)
            .margin_start(insets.start)
            .margin_bottom(insets.bottom)
            .margin_end(insets.end)
    }

    // ---- span alignment ----

    /// Horizontal placement when an explicit width is narrower or wider than left..right
    pub fn justify(mut self, align: HorizontalAlign) -> Self {
        self.directives.justify = Some(match align.side(self.direction) {
            HorizontalSide::Left => SpanAlign::Start,
            HorizontalSide::Center => SpanAlign::Center,
            HorizontalSide::Right => SpanAlign::End,
        });
        self
    }

    /// Vertical placement when an explicit height differs from top..bottom
    pub fn align(mut self, align: VerticalAlign) -> Self {
        self.directives.align = Some(match align {
            VerticalAlign::Top => SpanAlign::Start,
            VerticalAlign::Center => SpanAlign::Center,
            VerticalAlign::Bottom => SpanAlign::End,
        });
        self
    }

    /// Margins shrink the node inward instead of moving it
    pub fn pin_edges(mut self) -> Self {
        log::trace!(target: "pinframe", "[{}] pin_edges", self.label);
        self.directives.pin_edges = true;
        self
    }

    // ---- terminal steps ----

    /// Synthesize the frame and write it to the node
    pub fn apply(mut self) -> Resolution {
        self.commit()
    }

    /// End the session without touching the node
    pub fn discard(mut self) {
        log::debug!(target: "pinframe", "[{}] session discarded", self.label);
        self.state = SessionState::Discarded;
    }

    fn commit(&mut self) -> Resolution {
        let input = SynthesisInput::new(self.host.frame(self.node))
            .with_intrinsic(self.host.intrinsic_size(self.node))
            .with_tolerance(self.tolerance);
        let synthesis = synthesize(&self.directives, &input);

        let mut warnings = std::mem::take(&mut self.warnings);
        warnings.extend(synthesis.warnings);

        self.host.set_frame(self.node, synthesis.frame);
        self.state = SessionState::Committed;

        if self.log_warnings {
            log_warnings(&self.label, &warnings);
        }
        log::debug!(
            target: "pinframe",
            "[{}] frame = ({}, {}, {} x {})",
            self.label,
            synthesis.frame.origin.x,
            synthesis.frame.origin.y,
            synthesis.frame.size.width,
            synthesis.frame.size.height
        );

        Resolution {
            frame: synthesis.frame,
            warnings,
        }
    }

    // ---- intake helpers ----

    fn set(&mut self, slot: Slot, value: f64) {
        if !value.is_finite() {
            self.warnings.push(LayoutWarning::ineffective(format!(
                "{} ignored: {} is not a finite number",
                slot, value
            )));
            return;
        }
        log::trace!(target: "pinframe", "[{}] {} = {}", self.label, slot, value);
        self.directives.set(slot, value);
    }

    fn set_size(&mut self, slot: Slot, value: f64) {
        if value < 0.0 {
            self.warnings.push(LayoutWarning::conflict(format!(
                "{} {} is negative; using 0",
                slot, value
            )));
            self.set(slot, 0.0);
        } else {
            self.set(slot, value);
        }
    }

    fn set_anchor(&mut self, own: AnchorKind, point: Point) {
        let (h, v) = own.edges();
        self.set(horizontal_slot(h.side(self.direction)), point.x);
        self.set(vertical_slot(v), point.y);
    }

    /// Container size, reporting once when the node has no parent to measure against
    fn container(&mut self, directive: &str) -> Size {
        if self.container.is_none() && !self.missing_container_reported {
            self.missing_container_reported = true;
            self.warnings.push(LayoutWarning::underconstrained(format!(
                "{}: '{}' has no parent container; resolving against an empty one",
                directive, self.label
            )));
        }
        self.container_size
    }

    fn resolve_horizontal(&mut self, value: Value, directive: &str) -> f64 {
        self.resolve(value, directive, |size| size.width)
    }

    fn resolve_vertical(&mut self, value: Value, directive: &str) -> f64 {
        self.resolve(value, directive, |size| size.height)
    }

    fn resolve(&mut self, value: Value, directive: &str, axis: fn(Size) -> f64) -> f64 {
        let reference = match value {
            Value::Points(_) => 0.0,
            Value::Percent(p) => {
                if p.is_negative() {
                    self.warnings.push(LayoutWarning::ineffective(format!(
                        "{}: negative percentage {}% clamped to 0",
                        directive, p.0
                    )));
                }
                axis(self.container(directive))
            }
        };
        value.resolve(reference)
    }
}

impl<H: LayoutHost> Drop for PinLayout<'_, H> {
    fn drop(&mut self) {
        if self.state == SessionState::Accumulating {
            self.commit();
        }
    }
}

fn horizontal_slot(side: HorizontalSide) -> Slot {
    match side {
        HorizontalSide::Left => Slot::Left,
        HorizontalSide::Center => Slot::HCenter,
        HorizontalSide::Right => Slot::Right,
    }
}

fn vertical_slot(kind: VerticalEdgeKind) -> Slot {
    match kind {
        VerticalEdgeKind::Top => Slot::Top,
        VerticalEdgeKind::VCenter => Slot::VCenter,
        VerticalEdgeKind::Bottom => Slot::Bottom,
    }
}
