//! Runs a parsed pin script: builds the view tree, then resolves each `pin` statement as one
//! session, in order.
//!
//! Every call in a `pin` statement is converted to a [`Directive`] before the session starts, so
//! a bad name or argument aborts the run without a half-applied session.

use std::fmt;

use serde::Serialize;

use crate::layout::{
    Anchor, AnchorKind, HorizontalAlign, HorizontalEdge, HorizontalEdgeKind, Insets,
    LayoutConfig, LayoutDirection, LayoutHost, NodeId, NodeTree, Percent, PinLayout, Rect,
    Relation, SceneError, Size, Value, VerticalAlign, VerticalEdge, VerticalEdgeKind,
};
use crate::parser::ast::*;

const VIEW_MODIFIERS: &[&str] = &[
    "x",
    "y",
    "width",
    "height",
    "intrinsic_width",
    "intrinsic_height",
];

/// Directives that take a single number or percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueDirective {
    Top,
    Left,
    Bottom,
    Right,
    HCenter,
    VCenter,
    Start,
    End,
    All,
    Horizontally,
    Vertically,
    Width,
    Height,
    MinWidth,
    MaxWidth,
    MinHeight,
    MaxHeight,
    MarginTop,
    MarginLeft,
    MarginBottom,
    MarginRight,
    MarginStart,
    MarginEnd,
    MarginHorizontal,
    MarginVertical,
}

impl ValueDirective {
    const ALL: [(&'static str, ValueDirective); 25] = [
        ("top", Self::Top),
        ("left", Self::Left),
        ("bottom", Self::Bottom),
        ("right", Self::Right),
        ("h_center", Self::HCenter),
        ("v_center", Self::VCenter),
        ("start", Self::Start),
        ("end", Self::End),
        ("all", Self::All),
        ("horizontally", Self::Horizontally),
        ("vertically", Self::Vertically),
        ("width", Self::Width),
        ("height", Self::Height),
        ("min_width", Self::MinWidth),
        ("max_width", Self::MaxWidth),
        ("min_height", Self::MinHeight),
        ("max_height", Self::MaxHeight),
        ("margin_top", Self::MarginTop),
        ("margin_left", Self::MarginLeft),
        ("margin_bottom", Self::MarginBottom),
        ("margin_right", Self::MarginRight),
        ("margin_start", Self::MarginStart),
        ("margin_end", Self::MarginEnd),
        ("margin_horizontal", Self::MarginHorizontal),
        ("margin_vertical", Self::MarginVertical),
    ];

    fn from_name(name: &str) -> Option<ValueDirective> {
        Self::ALL
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, d)| *d)
    }

    /// Positions and bulk setters default to 0 when called without an argument
    fn takes_default(self) -> bool {
        matches!(
            self,
            Self::Top
                | Self::Left
                | Self::Bottom
                | Self::Right
                | Self::HCenter
                | Self::VCenter
                | Self::Start
                | Self::End
                | Self::All
                | Self::Horizontally
                | Self::Vertically
        )
    }

    fn apply<'h, H: LayoutHost>(self, s: PinLayout<'h, H>, v: Value) -> PinLayout<'h, H> {
        match self {
            Self::Top => s.top(v),
            Self::Left => s.left(v),
            Self::Bottom => s.bottom(v),
            Self::Right => s.right(v),
            Self::HCenter => s.h_center(v),
            Self::VCenter => s.v_center(v),
            Self::Start => s.start(v),
            Self::End => s.end(v),
            Self::All => s.all(v),
            Self::Horizontally => s.horizontally(v),
            Self::Vertically => s.vertically(v),
            Self::Width => s.width(v),
            Self::Height => s.height(v),
            Self::MinWidth => s.min_width(v),
            Self::MaxWidth => s.max_width(v),
            Self::MinHeight => s.min_height(v),
            Self::MaxHeight => s.max_height(v),
            Self::MarginTop => s.margin_top(v),
            Self::MarginLeft => s.margin_left(v),
            Self::MarginBottom => s.margin_bottom(v),
            Self::MarginRight => s.margin_right(v),
            Self::MarginStart => s.margin_start(v),
            Self::MarginEnd => s.margin_end(v),
            Self::MarginHorizontal => s.margin_horizontal(v),
            Self::MarginVertical => s.margin_vertical(v),
        }
    }
}

/// Directives that measure another node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Measure {
    Width,
    Height,
    Size,
    AspectRatio,
}

const RELATIONS: &[&str] = &["above", "below", "left_of", "right_of", "before", "after"];
const OTHER_DIRECTIVES: &[&str] = &[
    "size",
    "aspect_ratio",
    "fit_size",
    "pin_edges",
    "margin",
    "justify",
    "align",
];

/// One call of a `pin` chain, validated and bound to node ids
#[derive(Debug, Clone, PartialEq)]
enum Directive {
    Value(ValueDirective, Value),
    HorizontalEdge(HorizontalEdgeKind, HorizontalEdge),
    VerticalEdge(VerticalEdgeKind, VerticalEdge),
    /// `None` pins against the container
    Anchor(AnchorKind, Option<Anchor>),
    Relative(Relation, Vec<NodeId>, String),
    Size(Value, Value),
    SizeSquare(Value),
    Measure(Measure, NodeId),
    AspectRatio(f64),
    AspectRatioFromContent,
    FitSize,
    PinEdges,
    Margin(Insets),
    Justify(HorizontalAlign),
    Align(VerticalAlign),
}

impl Directive {
    fn apply<'h, H: LayoutHost>(self, s: PinLayout<'h, H>) -> PinLayout<'h, H> {
        match self {
            Directive::Value(d, v) => d.apply(s, v),
            Directive::HorizontalEdge(own, target) => s.h_edge_to(own, target),
            Directive::VerticalEdge(own, target) => s.v_edge_to(own, target),
            Directive::Anchor(own, Some(target)) => s.anchor_to(own, target),
            Directive::Anchor(own, None) => s.anchor_to_container(own),
            Directive::Relative(relation, nodes, name) => s.relative(relation, &nodes, &name),
            Directive::Size(w, h) => s.width(w).height(h),
            Directive::SizeSquare(v) => s.size_square(v),
            Directive::Measure(Measure::Width, node) => s.width_of(node),
            Directive::Measure(Measure::Height, node) => s.height_of(node),
            Directive::Measure(Measure::Size, node) => s.size_of(node),
            Directive::Measure(Measure::AspectRatio, node) => s.aspect_ratio_of(node),
            Directive::AspectRatio(ratio) => s.aspect_ratio(ratio),
            Directive::AspectRatioFromContent => s.aspect_ratio_from_content(),
            Directive::FitSize => s.fit_size(),
            Directive::PinEdges => s.pin_edges(),
            Directive::Margin(insets) => s.margin(insets),
            Directive::Justify(align) => s.justify(align),
            Directive::Align(align) => s.align(align),
        }
    }
}

/// Resolved frame of one view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeReport {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Frame in the parent's coordinate space
    pub frame: Rect,
    #[serde(skip)]
    pub depth: usize,
}

/// A warning raised by one `pin` statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarningReport {
    pub node: String,
    pub category: String,
    pub message: String,
}

/// Result of running a script
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneReport {
    pub nodes: Vec<NodeReport>,
    pub warnings: Vec<WarningReport>,
}

impl SceneReport {
    pub fn frame(&self, name: &str) -> Option<Rect> {
        self.nodes.iter().find(|n| n.name == name).map(|n| n.frame)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

impl fmt::Display for SceneReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            let r = node.frame;
            writeln!(
                f,
                "{}{}: x={} y={} w={} h={}",
                "  ".repeat(node.depth),
                node.name,
                r.origin.x,
                r.origin.y,
                r.size.width,
                r.size.height
            )?;
        }
        if !self.warnings.is_empty() {
            writeln!(f, "warnings:")?;
            for w in &self.warnings {
                writeln!(f, "  {}: {}: {}", w.node, w.category, w.message)?;
            }
        }
        Ok(())
    }
}

/// The view tree of a script plus the declaration order of its views
struct Scene {
    tree: NodeTree,
    order: Vec<(NodeId, usize)>,
}

impl Scene {
    fn build(script: &Script) -> Result<Self, SceneError> {
        let mut scene = Scene {
            tree: NodeTree::new(),
            order: Vec::new(),
        };
        for stmt in &script.statements {
            if let Statement::View(view) = &stmt.node {
                scene.add_view(view, None, 0)?;
            }
        }
        Ok(scene)
    }

    fn add_view(
        &mut self,
        view: &ViewDecl,
        parent: Option<NodeId>,
        depth: usize,
    ) -> Result<(), SceneError> {
        if self.tree.get(&view.name.node).is_some() {
            return Err(SceneError::DuplicateView {
                name: view.name.node.clone(),
                span: view.name.span.clone(),
            });
        }

        let mut frame = Rect::zero();
        let mut intrinsic: Option<Size> = None;
        for m in &view.modifiers {
            let value = m.node.value.node;
            match m.node.key.node.as_str() {
                "x" => frame.origin.x = value,
                "y" => frame.origin.y = value,
                "width" => frame.size.width = value,
                "height" => frame.size.height = value,
                "intrinsic_width" => intrinsic.get_or_insert_with(Size::zero).width = value,
                "intrinsic_height" => intrinsic.get_or_insert_with(Size::zero).height = value,
                other => {
                    return Err(SceneError::UnknownModifier {
                        name: other.to_string(),
                        valid: VIEW_MODIFIERS.join(", "),
                        span: m.node.key.span.clone(),
                    })
                }
            }
        }

        let id = match parent {
            Some(parent) => self.tree.add_child(parent, view.name.node.clone(), frame),
            None => self.tree.add_root(view.name.node.clone(), frame),
        };
        self.tree.set_intrinsic_size(id, intrinsic);
        self.order.push((id, depth));

        for child in &view.children {
            self.add_view(&child.node, Some(id), depth + 1)?;
        }
        Ok(())
    }

    fn node(&self, name: &str, span: &Span) -> Result<NodeId, SceneError> {
        self.tree.get(name).ok_or_else(|| {
            SceneError::unknown_node(
                name,
                span.clone(),
                self.tree.ids().map(|id| self.tree.name(id)),
            )
        })
    }

    fn report(&self, warnings: Vec<WarningReport>) -> SceneReport {
        let nodes = self
            .order
            .iter()
            .map(|&(id, depth)| NodeReport {
                name: self.tree.name(id).to_string(),
                parent: self
                    .tree
                    .parent(id)
                    .map(|p| self.tree.name(p).to_string()),
                frame: self.tree.frame(id),
                depth,
            })
            .collect();
        SceneReport { nodes, warnings }
    }

    /// Convert one call into a directive
    fn directive(&self, call: &Spanned<Call>) -> Result<Directive, SceneError> {
        let name = call.node.name.node.as_str();
        let args = &call.node.args;
        let span = &call.span;
        let bad = |expected: &str| SceneError::bad_arguments(name, expected, span.clone());

        if let Some(d) = ValueDirective::from_name(name) {
            return match args.as_slice() {
                [] if d.takes_default() => Ok(Directive::Value(d, Value::Points(0.0))),
                [arg] => {
                    if let Some(v) = value_arg(&arg.node) {
                        return Ok(Directive::Value(d, v));
                    }
                    self.edge_or_measure(d, arg)
                        .unwrap_or_else(|| Err(bad(expected_for(d))))
                }
                _ => Err(bad(expected_for(d))),
            };
        }

        if let Some(kind) = AnchorKind::from_name(name) {
            return match args.as_slice() {
                [] => Ok(Directive::Anchor(kind, None)),
                [arg] => match &arg.node {
                    Arg::Member { node, member } => {
                        let target = AnchorKind::from_name(member)
                            .ok_or_else(|| bad("an anchor such as 'other.top_left'"))?;
                        Ok(Directive::Anchor(
                            kind,
                            Some(self.node(node, &arg.span)?.anchor(target)),
                        ))
                    }
                    _ => Err(bad("an anchor such as 'other.top_left'")),
                },
                _ => Err(bad("at most one anchor")),
            };
        }

        if RELATIONS.contains(&name) {
            return self.relative(name, args, span);
        }

        match (name, args.as_slice()) {
            ("size", [arg]) => match &arg.node {
                Arg::Name(node) => Ok(Directive::Measure(
                    Measure::Size,
                    self.node(node, &arg.span)?,
                )),
                other => value_arg(other)
                    .map(Directive::SizeSquare)
                    .ok_or_else(|| bad("a size, a node, or a width and a height")),
            },
            ("size", [w, h]) => match (value_arg(&w.node), value_arg(&h.node)) {
                (Some(w), Some(h)) => Ok(Directive::Size(w, h)),
                _ => Err(bad("a width and a height")),
            },
            ("aspect_ratio", []) => Ok(Directive::AspectRatioFromContent),
            ("aspect_ratio", [arg]) => match &arg.node {
                Arg::Number(ratio) => Ok(Directive::AspectRatio(*ratio)),
                Arg::Name(node) => Ok(Directive::Measure(
                    Measure::AspectRatio,
                    self.node(node, &arg.span)?,
                )),
                _ => Err(bad("a ratio or a node")),
            },
            ("fit_size", []) => Ok(Directive::FitSize),
            ("pin_edges", []) => Ok(Directive::PinEdges),
            ("margin", values) if (1..=4).contains(&values.len()) => {
                let numbers: Option<Vec<f64>> = values
                    .iter()
                    .map(|a| match a.node {
                        Arg::Number(n) => Some(n),
                        _ => None,
                    })
                    .collect();
                let insets = match numbers.as_deref() {
                    Some(&[all]) => Insets::from(all),
                    Some(&[v, h]) => Insets::from((v, h)),
                    Some(&[t, h, b]) => Insets::from((t, h, b)),
                    Some(&[t, l, b, r]) => Insets::from((t, l, b, r)),
                    _ => return Err(bad("1 to 4 numbers")),
                };
                Ok(Directive::Margin(insets))
            }
            ("justify", [arg]) => name_arg(&arg.node)
                .and_then(HorizontalAlign::from_name)
                .map(Directive::Justify)
                .ok_or_else(|| bad("left, center, right, start or end")),
            ("align", [arg]) => name_arg(&arg.node)
                .and_then(VerticalAlign::from_name)
                .map(Directive::Align)
                .ok_or_else(|| bad("top, center or bottom")),
            ("size" | "aspect_ratio" | "fit_size" | "pin_edges" | "margin" | "justify" | "align", _) => {
                Err(bad(match name {
                    "size" => "a size, a node, or a width and a height",
                    "aspect_ratio" => "a ratio, a node, or nothing",
                    "margin" => "1 to 4 numbers",
                    "justify" => "left, center, right, start or end",
                    "align" => "top, center or bottom",
                    _ => "no arguments",
                }))
            }
            _ => Err(SceneError::unknown_directive(
                name,
                call.node.name.span.clone(),
                known_directives(),
            )),
        }
    }

    /// `top(other.bottom)`, `left(other.end)`, `width(other)`
    fn edge_or_measure(
        &self,
        d: ValueDirective,
        arg: &Spanned<Arg>,
    ) -> Option<Result<Directive, SceneError>> {
        let own_h = match d {
            ValueDirective::Left => Some(HorizontalEdgeKind::Left),
            ValueDirective::Right => Some(HorizontalEdgeKind::Right),
            ValueDirective::HCenter => Some(HorizontalEdgeKind::HCenter),
            ValueDirective::Start => Some(HorizontalEdgeKind::Start),
            ValueDirective::End => Some(HorizontalEdgeKind::End),
            _ => None,
        };
        let own_v = match d {
            ValueDirective::Top => Some(VerticalEdgeKind::Top),
            ValueDirective::Bottom => Some(VerticalEdgeKind::Bottom),
            ValueDirective::VCenter => Some(VerticalEdgeKind::VCenter),
            _ => None,
        };
        let measure = match d {
            ValueDirective::Width => Some(Measure::Width),
            ValueDirective::Height => Some(Measure::Height),
            _ => None,
        };

        match (&arg.node, own_h, own_v, measure) {
            (Arg::Member { node, member }, Some(own), _, _) => {
                let kind = HorizontalEdgeKind::from_name(member)?;
                Some(
                    self.node(node, &arg.span)
                        .map(|id| Directive::HorizontalEdge(own, id.h_edge(kind))),
                )
            }
            (Arg::Member { node, member }, _, Some(own), _) => {
                let kind = VerticalEdgeKind::from_name(member)?;
                Some(
                    self.node(node, &arg.span)
                        .map(|id| Directive::VerticalEdge(own, id.v_edge(kind))),
                )
            }
            (Arg::Name(node), _, _, Some(measure)) => Some(
                self.node(node, &arg.span)
                    .map(|id| Directive::Measure(measure, id)),
            ),
            _ => None,
        }
    }

    /// `below(a)`, `below([a, b])`, `below(a, aligned: left)`
    fn relative(
        &self,
        name: &str,
        args: &[Spanned<Arg>],
        span: &Span,
    ) -> Result<Directive, SceneError> {
        let vertical_stack = matches!(name, "above" | "below");
        let expected = if vertical_stack {
            "a node or [nodes], optionally 'aligned: left|center|right|start|end'"
        } else {
            "a node or [nodes], optionally 'aligned: top|center|bottom'"
        };
        let bad = || SceneError::bad_arguments(name, expected, span.clone());

        let (targets, aligned) = match args {
            [targets] => (targets, None),
            [targets, aligned] => match &aligned.node {
                Arg::Named { key, value } if key.node == "aligned" => {
                    (targets, Some(name_arg(&value.node).ok_or_else(bad)?))
                }
                _ => return Err(bad()),
            },
            _ => return Err(bad()),
        };

        let mut nodes = Vec::new();
        match &targets.node {
            Arg::Name(node) => nodes.push(self.node(node, &targets.span)?),
            Arg::List(items) => {
                for item in items {
                    match &item.node {
                        Arg::Name(node) => nodes.push(self.node(node, &item.span)?),
                        _ => return Err(bad()),
                    }
                }
            }
            _ => return Err(bad()),
        }

        let relation = if vertical_stack {
            let align = match aligned {
                Some(a) => Some(HorizontalAlign::from_name(a).ok_or_else(bad)?),
                None => None,
            };
            if name == "above" {
                Relation::Above(align)
            } else {
                Relation::Below(align)
            }
        } else {
            let align = match aligned {
                Some(a) => Some(VerticalAlign::from_name(a).ok_or_else(bad)?),
                None => None,
            };
            match name {
                "left_of" => Relation::LeftOf(align),
                "right_of" => Relation::RightOf(align),
                "before" => Relation::Before(align),
                _ => Relation::After(align),
            }
        };
        Ok(Directive::Relative(relation, nodes, name.to_string()))
    }
}

fn value_arg(arg: &Arg) -> Option<Value> {
    match arg {
        Arg::Number(n) => Some(Value::Points(*n)),
        Arg::Percent(p) => Some(Value::Percent(Percent(*p))),
        _ => None,
    }
}

fn name_arg(arg: &Arg) -> Option<&str> {
    match arg {
        Arg::Name(name) => Some(name),
        _ => None,
    }
}

fn expected_for(d: ValueDirective) -> &'static str {
    match d {
        ValueDirective::Top | ValueDirective::Bottom | ValueDirective::VCenter => {
            "a number, a percentage, or an edge such as 'other.bottom'"
        }
        ValueDirective::Left
        | ValueDirective::Right
        | ValueDirective::HCenter
        | ValueDirective::Start
        | ValueDirective::End => "a number, a percentage, or an edge such as 'other.right'",
        ValueDirective::Width | ValueDirective::Height => {
            "a number, a percentage, or a node to copy from"
        }
        _ => "a number or a percentage",
    }
}

fn known_directives() -> impl Iterator<Item = &'static str> {
    ValueDirective::ALL
        .iter()
        .map(|(name, _)| *name)
        .chain(AnchorKind::ALL.iter().map(|k| k.name()))
        .chain(RELATIONS.iter().copied())
        .chain(OTHER_DIRECTIVES.iter().copied())
}

/// Build the view tree of `script` and resolve its `pin` statements in order
pub fn run(script: &Script, config: &LayoutConfig) -> Result<SceneReport, SceneError> {
    let mut scene = Scene::build(script)?;
    let mut direction = config.effective_direction();
    let mut warnings = Vec::new();

    for stmt in &script.statements {
        match &stmt.node {
            Statement::View(_) => {}
            Statement::Direction(name) => {
                direction = LayoutDirection::from_name(&name.node).ok_or_else(|| {
                    SceneError::BadDirection {
                        name: name.node.clone(),
                        span: name.span.clone(),
                    }
                })?;
            }
            Statement::Pin(decl) => {
                let node = scene.node(&decl.target.node, &decl.target.span)?;
                let directives = decl
                    .calls
                    .iter()
                    .map(|call| scene.directive(call))
                    .collect::<Result<Vec<_>, _>>()?;

                let session = PinLayout::with_config(&mut scene.tree, node, config)
                    .with_direction(direction);
                let resolution = directives
                    .into_iter()
                    .fold(session, |s, d| d.apply(s))
                    .apply();

                warnings.extend(resolution.warnings.into_iter().map(|w| WarningReport {
                    node: decl.target.node.clone(),
                    category: w.category.to_string(),
                    message: w.message,
                }));
            }
        }
    }

    Ok(scene.report(warnings))
}
