//! Layout engine: resolves a node's frame from a chain of positioning, sizing and spacing
//! directives.
//!
//! A [`PinLayout`] session normalizes each directive into [`Directives`] as it is issued;
//! [`synthesize`] then turns the accumulated slots into one frame, and the session writes it back
//! through [`LayoutHost`].

pub mod anchor;
pub mod config;
pub mod directives;
pub mod error;
pub mod host;
pub mod relative;
pub mod session;
pub mod synth;
pub mod tree;
pub mod types;
pub mod warning;

pub use anchor::{
    resolve_anchor, Anchor, AnchorKind, HorizontalEdge, HorizontalEdgeKind, HorizontalSide,
    LayoutDirection, VerticalEdge, VerticalEdgeKind,
};
pub use config::{ConfigError, LayoutConfig};
pub use directives::{Directives, Slot, SpanAlign};
pub use error::SceneError;
pub use host::{LayoutHost, NodeId};
pub use relative::{place, HorizontalAlign, Relation, VerticalAlign};
pub use session::{pin, PinLayout, Resolution, SessionState};
pub use synth::{synthesize, Synthesis, SynthesisInput};
pub use tree::NodeTree;
pub use types::*;
pub use warning::{log_warnings, LayoutWarning, WarningCategory};
