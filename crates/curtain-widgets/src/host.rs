#![forbid(unsafe_code)]

//! Host collaborator traits.
//!
//! The curtain owns geometry, placement policy, and the lifecycle of its own
//! five nodes. Everything else is delegated to the embedding application:
//!
//! | Trait | Collaborator |
//! |-------|--------------|
//! | [`Surface`] | Node tree supporting absolute positioning and z-order |
//! | [`Measure`] | Rendered width/height of a node |
//! | [`Toggle`] | Fade-in/fade-out transition primitive |
//! | [`Resolve`] | Selector lookup and bounding-box reads |
//!
//! Any type implementing all four is a [`Host`].

use std::fmt;

use curtain_core::{Point, Rect, Size};

use crate::markup::Content;

/// Opaque handle to a node created by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Wrap a host-assigned identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The host-assigned identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Fill rule for the darkness path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    /// Regions enclosed an even number of times are unfilled.
    #[default]
    EvenOdd,
}

/// The nodes a curtain creates, with their initial presentation.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Full-viewport drawing surface for the mask.
    ///
    /// Pointer events must pass through to the page beneath.
    MaskSurface { z_index: i32, pointer_events: bool },
    /// The darkness path inside the mask surface.
    MaskPath { class: &'static str, fill_rule: FillRule },
    /// Tooltip container, stacked above the mask.
    Tooltip { class: String, z_index: i32 },
    /// Arrow decoration inside the tooltip.
    TooltipArrow { class: &'static str },
    /// Content area inside the tooltip.
    TooltipInner { class: &'static str },
}

/// Incremental change to a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    /// Resize a drawing surface.
    Size(Size),
    /// Replace path data (SVG `d` syntax).
    Path(String),
    /// Move an absolutely positioned node (`left`/`top`).
    Position(Point),
    /// Replace the class list.
    Class(String),
    /// Replace text content.
    Content(Content),
}

/// Node tree the curtain mounts into.
pub trait Surface {
    /// Append `element` under `parent` (or the host root when `None`).
    fn append(&mut self, parent: Option<NodeId>, element: Element) -> NodeId;

    /// Apply `patch` to `node`.
    fn update(&mut self, node: NodeId, patch: Patch);

    /// Detach `node` and its children.
    fn remove(&mut self, node: NodeId);
}

/// Layout measurement.
pub trait Measure {
    /// Rendered size of `node`, optionally including its margins.
    fn measure(&self, node: NodeId, include_margins: bool) -> Size;
}

/// Visibility transitions.
pub trait Toggle {
    /// Fade `node` in or out.
    fn toggle(&mut self, node: NodeId, visible: bool);
}

/// Target lookup.
pub trait Resolve {
    /// Find the first node matching `selector`.
    fn select(&self, selector: &str) -> Option<NodeId>;

    /// Current bounding box of `node` in viewport coordinates.
    fn bounding_rect(&self, node: NodeId) -> Option<Rect>;
}

/// Everything the curtain needs from its environment.
pub trait Host: Surface + Measure + Toggle + Resolve {}

impl<T: Surface + Measure + Toggle + Resolve> Host for T {}

/// What to highlight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target<'a> {
    /// A raw viewport rectangle.
    Rect(Rect),
    /// A rendered node whose bounding box is read at call time.
    Node(NodeId),
    /// A selector resolved through [`Resolve::select`].
    Selector(&'a str),
}

impl From<Rect> for Target<'_> {
    fn from(rect: Rect) -> Self {
        Self::Rect(rect)
    }
}

impl From<NodeId> for Target<'_> {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}

impl<'a> From<&'a str> for Target<'a> {
    fn from(selector: &'a str) -> Self {
        Self::Selector(selector)
    }
}
