#![forbid(unsafe_code)]

//! Test harness for the curtain overlay.
//!
//! [`RecordingHost`] implements every host collaborator in memory. It keeps
//! the node tree the curtain builds, applies patches, answers measurements
//! with configurable sizes, and logs every call as an [`Op`] so tests can
//! assert ordering (mask cut before measurement) and silence after teardown.
//!
//! Page elements that tours point at are registered with
//! [`RecordingHost::add_element`] and can be moved or hidden between steps.

pub mod tour;

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use curtain_core::{Point, Rect, Size};
use curtain_widgets::host::{Element, Measure, NodeId, Patch, Resolve, Surface, Toggle};
use curtain_widgets::markup::Content;

/// Default content-area size reported for the tooltip inner node.
pub const DEFAULT_CALLOUT: Size = Size::new(200.0, 60.0);
/// Default rendered size reported for the whole tooltip node.
pub const DEFAULT_TOOLTIP: Size = Size::new(210.0, 75.0);

/// What a recorded node is.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A node created by the curtain.
    Curtain(Element),
    /// A page element registered by the test.
    Page { selector: String },
}

/// State of one node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub class: Option<String>,
    pub path: Option<String>,
    pub size: Option<Size>,
    pub position: Option<Point>,
    pub content: Option<Content>,
    pub visible: bool,
    pub removed: bool,
    /// Bounding box for page elements; `None` means "not measurable".
    pub rect: Option<Rect>,
}

impl NodeRecord {
    fn new(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            parent,
            class: None,
            path: None,
            size: None,
            position: None,
            content: None,
            visible: false,
            removed: false,
            rect: None,
        }
    }
}

/// A recorded host call.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Append(NodeId),
    Update(NodeId, Patch),
    Remove(NodeId),
    Measure(NodeId, bool),
    Toggle(NodeId, bool),
}

/// In-memory host that records every call.
#[derive(Debug, Clone)]
pub struct RecordingHost {
    next_id: u64,
    nodes: BTreeMap<NodeId, NodeRecord>,
    selectors: HashMap<String, NodeId>,
    callout: Size,
    tooltip: Size,
    ops: RefCell<Vec<Op>>,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingHost {
    /// An empty host with default measurement sizes.
    pub fn new() -> Self {
        Self {
            next_id: 1,
            nodes: BTreeMap::new(),
            selectors: HashMap::new(),
            callout: DEFAULT_CALLOUT,
            tooltip: DEFAULT_TOOLTIP,
            ops: RefCell::new(Vec::new()),
        }
    }

    /// Size reported for the tooltip content area (builder pattern).
    #[must_use]
    pub fn with_callout_size(mut self, size: Size) -> Self {
        self.callout = size;
        self
    }

    /// Size reported for the whole tooltip (builder pattern).
    #[must_use]
    pub fn with_tooltip_size(mut self, size: Size) -> Self {
        self.tooltip = size;
        self
    }

    fn allocate(&mut self, record: NodeRecord) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, record);
        id
    }

    /// Register a page element reachable through `selector`.
    pub fn add_element(&mut self, selector: &str, rect: Rect) -> NodeId {
        let mut record = NodeRecord::new(
            NodeKind::Page {
                selector: selector.to_owned(),
            },
            None,
        );
        record.rect = Some(rect);
        let id = self.allocate(record);
        self.selectors.insert(selector.to_owned(), id);
        id
    }

    /// Move a page element (simulates reflow).
    pub fn move_element(&mut self, node: NodeId, rect: Rect) {
        if let Some(record) = self.nodes.get_mut(&node) {
            record.rect = Some(rect);
        }
    }

    /// Make a page element unmeasurable (e.g. `display: none`).
    pub fn hide_element(&mut self, node: NodeId) {
        if let Some(record) = self.nodes.get_mut(&node) {
            record.rect = None;
        }
    }

    /// Look up a node record.
    pub fn node(&self, id: NodeId) -> Option<&NodeRecord> {
        self.nodes.get(&id)
    }

    /// Every call so far.
    pub fn ops(&self) -> Vec<Op> {
        self.ops.borrow().clone()
    }

    /// Number of calls so far, for use with [`RecordingHost::ops_since`].
    pub fn op_count(&self) -> usize {
        self.ops.borrow().len()
    }

    /// Calls recorded after the first `mark` ops.
    pub fn ops_since(&self, mark: usize) -> Vec<Op> {
        let ops = self.ops.borrow();
        ops[mark.min(ops.len())..].to_vec()
    }

    fn record(&self, op: Op) {
        self.ops.borrow_mut().push(op);
    }

    /// Curtain nodes that are still mounted.
    pub fn live_curtain_nodes(&self) -> usize {
        self.nodes
            .values()
            .filter(|r| matches!(r.kind, NodeKind::Curtain(_)) && !r.removed)
            .count()
    }

    fn find(&self, pred: impl Fn(&Element) -> bool) -> Option<(NodeId, &NodeRecord)> {
        self.nodes.iter().find_map(|(id, r)| match &r.kind {
            NodeKind::Curtain(element) if pred(element) => Some((*id, r)),
            _ => None,
        })
    }

    /// The mask surface node.
    pub fn surface(&self) -> Option<(NodeId, &NodeRecord)> {
        self.find(|e| matches!(e, Element::MaskSurface { .. }))
    }

    /// The darkness path node.
    pub fn darkness(&self) -> Option<(NodeId, &NodeRecord)> {
        self.find(|e| matches!(e, Element::MaskPath { .. }))
    }

    /// The tooltip container node.
    pub fn tooltip(&self) -> Option<(NodeId, &NodeRecord)> {
        self.find(|e| matches!(e, Element::Tooltip { .. }))
    }

    /// The tooltip content node.
    pub fn tooltip_inner(&self) -> Option<(NodeId, &NodeRecord)> {
        self.find(|e| matches!(e, Element::TooltipInner { .. }))
    }

    /// Current darkness path data.
    pub fn mask_path(&self) -> Option<&str> {
        self.darkness().and_then(|(_, r)| r.path.as_deref())
    }

    /// Current tooltip class list.
    pub fn tooltip_class(&self) -> Option<&str> {
        self.tooltip().and_then(|(_, r)| r.class.as_deref())
    }

    /// Number of toggle calls with the given visibility.
    pub fn toggle_count(&self, visible: bool) -> usize {
        self.ops
            .borrow()
            .iter()
            .filter(|op| matches!(op, Op::Toggle(_, v) if *v == visible))
            .count()
    }

    fn mark_removed(&mut self, node: NodeId) {
        let children: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|(_, r)| r.parent == Some(node))
            .map(|(id, _)| *id)
            .collect();
        if let Some(record) = self.nodes.get_mut(&node) {
            record.removed = true;
        }
        for child in children {
            self.mark_removed(child);
        }
    }
}

impl Surface for RecordingHost {
    fn append(&mut self, parent: Option<NodeId>, element: Element) -> NodeId {
        let mut record = NodeRecord::new(NodeKind::Curtain(element.clone()), parent);
        record.class = match &element {
            Element::MaskPath { class, .. }
            | Element::TooltipArrow { class }
            | Element::TooltipInner { class } => Some((*class).to_owned()),
            Element::Tooltip { class, .. } => Some(class.clone()),
            Element::MaskSurface { .. } => None,
        };
        let id = self.allocate(record);
        self.record(Op::Append(id));
        id
    }

    fn update(&mut self, node: NodeId, patch: Patch) {
        self.record(Op::Update(node, patch.clone()));
        let Some(record) = self.nodes.get_mut(&node) else {
            return;
        };
        match patch {
            Patch::Size(size) => record.size = Some(size),
            Patch::Path(path) => record.path = Some(path),
            Patch::Position(point) => record.position = Some(point),
            Patch::Class(class) => record.class = Some(class),
            Patch::Content(content) => record.content = Some(content),
        }
    }

    fn remove(&mut self, node: NodeId) {
        self.record(Op::Remove(node));
        self.mark_removed(node);
    }
}

impl Measure for RecordingHost {
    fn measure(&self, node: NodeId, include_margins: bool) -> Size {
        self.record(Op::Measure(node, include_margins));
        match self.nodes.get(&node).map(|r| (&r.kind, r.rect)) {
            Some((NodeKind::Curtain(Element::TooltipInner { .. }), _)) => self.callout,
            Some((NodeKind::Curtain(Element::Tooltip { .. }), _)) => self.tooltip,
            Some((_, Some(rect))) => Size::new(rect.width, rect.height),
            _ => Size::default(),
        }
    }
}

impl Toggle for RecordingHost {
    fn toggle(&mut self, node: NodeId, visible: bool) {
        self.record(Op::Toggle(node, visible));
        if let Some(record) = self.nodes.get_mut(&node) {
            record.visible = visible;
        }
    }
}

impl Resolve for RecordingHost {
    fn select(&self, selector: &str) -> Option<NodeId> {
        self.selectors
            .get(selector)
            .copied()
            .filter(|id| self.nodes.get(id).is_some_and(|r| !r.removed))
    }

    fn bounding_rect(&self, node: NodeId) -> Option<Rect> {
        self.nodes.get(&node).and_then(|r| r.rect)
    }
}
