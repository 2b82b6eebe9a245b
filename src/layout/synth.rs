//! Frame synthesis: turns accumulated directives into one rectangle.
//!
//! Each axis is solved on its own, size first and then origin. Everything here is a pure
//! function of [`Directives`] and [`SynthesisInput`].

use super::directives::{Directives, Slot, SpanAlign};
use super::types::{Rect, Size};
use super::warning::LayoutWarning;

/// What the synthesizer needs to know about the node besides its directives
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisInput {
    /// Frame before this pass, in container coordinates
    pub current: Rect,
    /// Content size, used when `fit_size` was requested
    pub intrinsic: Option<Size>,
    /// Distance under which two coordinates count as equal for validation
    pub tolerance: f64,
}

impl SynthesisInput {
    pub fn new(current: Rect) -> Self {
        Self {
            current,
            intrinsic: None,
            tolerance: 0.001,
        }
    }

    pub fn with_intrinsic(mut self, intrinsic: Option<Size>) -> Self {
        self.intrinsic = intrinsic;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Result of a synthesis pass
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesis {
    pub frame: Rect,
    pub warnings: Vec<LayoutWarning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn size_name(self) -> &'static str {
        match self {
            Axis::Horizontal => "width",
            Axis::Vertical => "height",
        }
    }

    fn start_name(self) -> &'static str {
        match self {
            Axis::Horizontal => "left",
            Axis::Vertical => "top",
        }
    }

    fn end_name(self) -> &'static str {
        match self {
            Axis::Horizontal => "right",
            Axis::Vertical => "bottom",
        }
    }

    fn center_name(self) -> &'static str {
        match self {
            Axis::Horizontal => "h_center",
            Axis::Vertical => "v_center",
        }
    }

    fn span_align_name(self) -> &'static str {
        match self {
            Axis::Horizontal => "justify",
            Axis::Vertical => "align",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SizeSource {
    Explicit,
    FitContent,
    Edges,
    EdgeAndCenter,
}

/// One axis worth of directives, so both axes share a single solver
#[derive(Debug, Clone, Copy)]
struct AxisSlots {
    axis: Axis,
    start: Option<f64>,
    center: Option<f64>,
    end: Option<f64>,
    size: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
    margin_start: Option<f64>,
    margin_end: Option<f64>,
    span_align: Option<SpanAlign>,
    fit: Option<f64>,
    current_origin: f64,
    current_size: f64,
}

impl AxisSlots {
    fn horizontal(d: &Directives, input: &SynthesisInput) -> Self {
        Self {
            axis: Axis::Horizontal,
            start: d.get(Slot::Left),
            center: d.get(Slot::HCenter),
            end: d.get(Slot::Right),
            size: d.get(Slot::Width),
            min: d.get(Slot::MinWidth),
            max: d.get(Slot::MaxWidth),
            margin_start: d.get(Slot::MarginLeft),
            margin_end: d.get(Slot::MarginRight),
            span_align: d.justify,
            fit: d
                .fit_size
                .then_some(input.intrinsic)
                .flatten()
                .map(|s| s.width),
            current_origin: input.current.origin.x,
            current_size: input.current.size.width,
        }
    }

    fn vertical(d: &Directives, input: &SynthesisInput) -> Self {
        Self {
            axis: Axis::Vertical,
            start: d.get(Slot::Top),
            center: d.get(Slot::VCenter),
            end: d.get(Slot::Bottom),
            size: d.get(Slot::Height),
            min: d.get(Slot::MinHeight),
            max: d.get(Slot::MaxHeight),
            margin_start: d.get(Slot::MarginTop),
            margin_end: d.get(Slot::MarginBottom),
            span_align: d.align,
            fit: d
                .fit_size
                .then_some(input.intrinsic)
                .flatten()
                .map(|s| s.height),
            current_origin: input.current.origin.y,
            current_size: input.current.size.height,
        }
    }

    fn margins(&self) -> (f64, f64) {
        (
            self.margin_start.unwrap_or(0.0),
            self.margin_end.unwrap_or(0.0),
        )
    }

    /// A size this axis determines on its own: explicit size, then fit-to-content, then two
    /// opposing edges, then one edge plus the center line. The aspect ratio and the current size
    /// are fallbacks applied by the caller; clamps run after both.
    fn determined_size(&self, warnings: &mut Vec<LayoutWarning>) -> Option<(f64, SizeSource)> {
        if let Some(size) = self.size {
            return Some((size, SizeSource::Explicit));
        }
        if let Some(fit) = self.fit {
            return Some((fit, SizeSource::FitContent));
        }
        let (ms, me) = self.margins();
        let (size, source) = match (self.start, self.center, self.end) {
            (Some(start), _, Some(end)) => (end - start - ms - me, SizeSource::Edges),
            (Some(start), Some(center), None) => {
                (2.0 * (center - (start + ms)), SizeSource::EdgeAndCenter)
            }
            (None, Some(center), Some(end)) => {
                (2.0 * ((end - me) - center), SizeSource::EdgeAndCenter)
            }
            _ => return None,
        };
        if size < 0.0 {
            warnings.push(LayoutWarning::conflict(format!(
                "{} implied by {} is negative ({}); using 0",
                self.axis.size_name(),
                match source {
                    SizeSource::Edges =>
                        format!("{} and {}", self.axis.start_name(), self.axis.end_name()),
                    _ => format!("an edge and {}", self.axis.center_name()),
                },
                size
            )));
            return Some((0.0, source));
        }
        Some((size, source))
    }

    fn clamp(&self, size: f64) -> f64 {
        let mut size = size;
        if let Some(max) = self.max {
            size = size.min(max);
        }
        if let Some(min) = self.min {
            size = size.max(min);
        }
        size
    }

    /// Origin on this axis for a resolved `size`. The start edge wins over the end edge, either
    /// edge wins over the center line, and an unpositioned axis keeps its current origin.
    fn origin(&self, size: f64) -> f64 {
        let (ms, me) = self.margins();
        match (self.start, self.center, self.end) {
            (Some(start), _, Some(end)) => {
                let low = start + ms;
                let high = end - me;
                match self.span_align {
                    None | Some(SpanAlign::Start) => low,
                    Some(SpanAlign::Center) => low + (high - low - size) / 2.0,
                    Some(SpanAlign::End) => high - size,
                }
            }
            (Some(start), _, None) => start + ms,
            (None, _, Some(end)) => end - size - me,
            (None, Some(center), None) => center - size / 2.0,
            (None, None, None) => self.current_origin,
        }
    }

    fn validate(
        &self,
        rule: Option<(f64, SizeSource)>,
        size: f64,
        origin: f64,
        tolerance: f64,
        check_span_align: bool,
        warnings: &mut Vec<LayoutWarning>,
    ) {
        let axis = self.axis;
        let (ms, me) = self.margins();

        if let (Some(start), Some(end), Some((wanted, source))) = (self.start, self.end, rule) {
            let implied = end - start - ms - me;
            let direct = matches!(source, SizeSource::Explicit | SizeSource::FitContent);
            if direct && self.span_align.is_none() && (implied - wanted).abs() > tolerance {
                warnings.push(LayoutWarning::conflict(format!(
                    "{size} {wanted} conflicts with the {size} implied by {start_name} and {end_name} ({implied}); {end_name} ignored",
                    size = axis.size_name(),
                    start_name = axis.start_name(),
                    end_name = axis.end_name(),
                )));
            }
        }

        if let Some(center) = self.center {
            if self.start.is_some() || self.end.is_some() {
                let resolved = origin + size / 2.0;
                if (resolved - center).abs() > tolerance {
                    warnings.push(LayoutWarning::conflict(format!(
                        "{} {} ignored: {}/{} take precedence (resolved center is {})",
                        axis.center_name(),
                        center,
                        axis.start_name(),
                        axis.end_name(),
                        resolved
                    )));
                }
            }
        }

        if self.margin_start.is_some_and(|m| m != 0.0) && self.start.is_none() {
            warnings.push(LayoutWarning::ineffective(format!(
                "margin_{} has no effect: {} was never positioned",
                axis.start_name(),
                axis.start_name()
            )));
        }
        if self.margin_end.is_some_and(|m| m != 0.0) && self.end.is_none() {
            warnings.push(LayoutWarning::ineffective(format!(
                "margin_{} has no effect: {} was never positioned",
                axis.end_name(),
                axis.end_name()
            )));
        }

        if check_span_align
            && self.span_align.is_some()
            && (self.start.is_none() || self.end.is_none())
        {
            warnings.push(LayoutWarning::ineffective(format!(
                "{} has no effect unless both {} and {} are set",
                axis.span_align_name(),
                axis.start_name(),
                axis.end_name()
            )));
        }

        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                warnings.push(LayoutWarning::conflict(format!(
                    "min_{size} {min} is greater than max_{size} {max}; min_{size} wins",
                    size = axis.size_name()
                )));
            }
        }
    }
}

/// Resolve accumulated directives into a frame
pub fn synthesize(directives: &Directives, input: &SynthesisInput) -> Synthesis {
    let mut warnings = Vec::new();

    if directives.fit_size {
        if input.intrinsic.is_none() {
            warnings.push(LayoutWarning::underconstrained(
                "fit_size requested but the node has no intrinsic size",
            ));
        } else if directives.is_set(Slot::Width) && directives.is_set(Slot::Height) {
            warnings.push(LayoutWarning::ineffective(
                "fit_size ignored: width and height are both set explicitly",
            ));
        }
    }

    let frame = if directives.pin_edges {
        solve_pinned(directives, input, &mut warnings)
    } else {
        solve(directives, input, true, &mut warnings)
    };

    Synthesis { frame, warnings }
}

/// Resolve without margins, pin the four resulting edges, then let the margins shrink the frame
/// inward so an edge without a margin keeps its coordinate.
fn solve_pinned(
    directives: &Directives,
    input: &SynthesisInput,
    warnings: &mut Vec<LayoutWarning>,
) -> Rect {
    let mut unmargined = directives.clone();
    for slot in MARGIN_SLOTS {
        unmargined.clear(slot);
    }
    // The pinned pass always has both edges, so justify/align only get judged there
    let span = solve(&unmargined, input, false, warnings);

    let mut pinned = Directives::new();
    pinned.set(Slot::Left, span.min_x());
    pinned.set(Slot::Right, span.max_x());
    pinned.set(Slot::Top, span.min_y());
    pinned.set(Slot::Bottom, span.max_y());
    for slot in MARGIN_SLOTS.into_iter().chain(CLAMP_SLOTS) {
        if let Some(value) = directives.get(slot) {
            pinned.set(slot, value);
        }
    }
    pinned.justify = directives.justify;
    pinned.align = directives.align;

    let mut second = Vec::new();
    let frame = solve(&pinned, input, true, &mut second);
    for w in second {
        if !warnings.contains(&w) {
            warnings.push(w);
        }
    }
    frame
}

const MARGIN_SLOTS: [Slot; 4] = [
    Slot::MarginTop,
    Slot::MarginLeft,
    Slot::MarginBottom,
    Slot::MarginRight,
];

const CLAMP_SLOTS: [Slot; 4] = [
    Slot::MinWidth,
    Slot::MaxWidth,
    Slot::MinHeight,
    Slot::MaxHeight,
];

fn solve(
    directives: &Directives,
    input: &SynthesisInput,
    check_span_align: bool,
    warnings: &mut Vec<LayoutWarning>,
) -> Rect {
    let h = AxisSlots::horizontal(directives, input);
    let v = AxisSlots::vertical(directives, input);

    let width_rule = h.determined_size(warnings);
    let height_rule = v.determined_size(warnings);
    let mut width = width_rule.map(|(size, _)| size);
    let mut height = height_rule.map(|(size, _)| size);

    if let Some(ratio) = directives.get(Slot::AspectRatio) {
        match (width, height) {
            (Some(_), Some(_)) => warnings.push(LayoutWarning::ineffective(format!(
                "aspect_ratio {} ignored: width and height are both determined",
                ratio
            ))),
            (Some(w), None) => height = Some(w / ratio),
            (None, Some(hh)) => width = Some(hh * ratio),
            (None, None) => warnings.push(LayoutWarning::underconstrained(format!(
                "aspect_ratio {} needs a width or a height to scale from",
                ratio
            ))),
        }
    }

    let width = h.clamp(width.unwrap_or(h.current_size));
    let height = v.clamp(height.unwrap_or(v.current_size));
    let x = h.origin(width);
    let y = v.origin(height);

    h.validate(width_rule, width, x, input.tolerance, check_span_align, warnings);
    v.validate(height_rule, height, y, input.tolerance, check_span_align, warnings);

    Rect::new(x, y, width, height)
}
