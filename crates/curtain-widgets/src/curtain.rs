#![forbid(unsafe_code)]

//! The curtain: lifecycle, reveal flow, and resize handling.
//!
//! [`Curtain`] mounts a darkened mask and a tooltip into a [`Host`], keeps the
//! mask hole anchored across viewport resizes, and tears both down together.
//!
//! # Reveal flow
//!
//! 1. Resolve the target to a viewport rectangle.
//! 2. Cut the mask hole (always first; placement never reads mask state).
//! 3. Render the text, measure the content area.
//! 4. Pick a side on the viewport-trimmed target. For [`Side::Top`] run the
//!    provisional pass: show the tooltip with the final visibility class,
//!    measure its real height, then compute the position.
//! 5. Clamp, apply position and class, fade in.
//!
//! # Resize
//!
//! The instance registers `resize.<namespace>-<id>` on the [`Window`]. The
//! handler holds only a weak reference, so events delivered after
//! [`Curtain::remove`] (or after the curtain is dropped) are no-ops. A resize
//! arriving while the curtain is busy is parked and replayed as soon as the
//! current operation returns.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use curtain_core::animation::FrameClock;
use curtain_core::event::{Event, ListenerName};
use curtain_core::window::Window;
use curtain_core::{Point, Rect, Size};
use tracing::field::Empty;
use web_time::Instant;

use crate::config::CurtainConfig;
use crate::error::{CurtainError, Result};
use crate::host::{Element, FillRule, Host, NodeId, Patch, Target};
use crate::markup::Content;
use crate::mask::Mask;
use crate::placement::Side;

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

const DARKNESS_CLASS: &str = "curtain-darkness";
const TOOLTIP_CLASS: &str = "tooltip";
const CURTAIN_TOOLTIP_CLASS: &str = "curtain-tooltip tooltip";
const VISIBLE_CLASS: &str = "in";

/// Per-call options for [`Curtain::reveal`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealOptions {
    /// Mask transition length. `None` uses the configured default;
    /// `Some(Duration::ZERO)` disables animation.
    pub duration: Option<Duration>,
    /// Extra class appended to the tooltip's class list.
    pub tooltip_class: Option<String>,
}

impl RevealOptions {
    /// Options with every field at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mask transition length (builder pattern).
    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Set an extra tooltip class (builder pattern).
    #[must_use]
    pub fn tooltip_class(mut self, class: impl Into<String>) -> Self {
        self.tooltip_class = Some(class.into());
        self
    }

    fn is_instant(&self) -> bool {
        self.duration == Some(Duration::ZERO)
    }
}

/// Snapshot of the tooltip after a reveal, for chaining host calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipHandle {
    /// The tooltip container node.
    pub node: NodeId,
    /// Side of the target the tooltip is anchored to, once placed.
    pub side: Option<Side>,
    /// Clamped top-left position, once placed.
    pub position: Option<Point>,
    /// Whether the tooltip is currently faded in.
    pub visible: bool,
}

#[derive(Debug, Clone, Copy)]
struct Nodes {
    surface: NodeId,
    darkness: NodeId,
    tooltip: NodeId,
    content: NodeId,
}

#[derive(Debug, Default)]
struct TooltipState {
    side: Option<Side>,
    position: Option<Point>,
    visible: bool,
    class: String,
}

struct Inner<H> {
    host: H,
    config: CurtainConfig,
    nodes: Option<Nodes>,
    mask: Mask,
    tooltip: TooltipState,
    clock: FrameClock,
}

impl<H: Host> Inner<H> {
    fn resolve(&self, target: Target<'_>) -> Result<Rect> {
        match target {
            Target::Rect(rect) => Ok(rect),
            Target::Node(node) => self
                .host
                .bounding_rect(node)
                .ok_or(CurtainError::NoBoundingBox(node)),
            Target::Selector(selector) => {
                let node = self
                    .host
                    .select(selector)
                    .ok_or_else(|| CurtainError::TargetNotFound(selector.to_owned()))?;
                self.host
                    .bounding_rect(node)
                    .ok_or(CurtainError::NoBoundingBox(node))
            }
        }
    }

    fn cut(&mut self, hole: Option<Rect>, duration: Option<Duration>, viewport: Size) {
        let Some(nodes) = self.nodes else {
            tracing::debug!("curtain.cut ignored after teardown");
            return;
        };
        let target = self.mask.cut(hole, viewport, duration);
        tracing::debug!(
            hole = ?target.hole,
            duration_ms = duration.map(|d| d.as_millis() as u64),
            "curtain.cut"
        );
        self.host.update(nodes.darkness, Patch::Path(self.mask.path()));
    }

    fn resize(&mut self, viewport: Size) {
        let Some(nodes) = self.nodes else {
            return;
        };
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            "curtain.resize"
        );
        self.host.update(nodes.surface, Patch::Size(viewport));
        let duration = self.config.resize_duration();
        self.cut(self.mask.hole(), Some(duration), viewport);
    }

    fn tick(&mut self, dt: Duration) {
        let Some(nodes) = self.nodes else {
            return;
        };
        if self.mask.tick(dt) {
            self.host.update(nodes.darkness, Patch::Path(self.mask.path()));
        }
    }

    fn set_class(&mut self, nodes: Nodes, class: String) {
        self.host.update(nodes.tooltip, Patch::Class(class.clone()));
        self.tooltip.class = class;
    }

    fn hide(&mut self, nodes: Nodes) {
        self.host.toggle(nodes.tooltip, false);
        self.tooltip.visible = false;
    }

    fn reveal(
        &mut self,
        target: Target<'_>,
        text: Option<&str>,
        options: &RevealOptions,
        window: &Window,
    ) -> Result<TooltipHandle> {
        let nodes = self.nodes.ok_or(CurtainError::Detached)?;
        let target = self.resolve(target)?;
        self.cut(Some(target), options.duration, window.inner_size());

        let Some(text) = text.filter(|t| !t.is_empty()) else {
            self.hide(nodes);
            return Ok(self.handle(nodes));
        };

        let span = tracing::debug_span!("curtain.reveal", side = Empty, x = Empty, y = Empty);
        let _guard = span.enter();

        if !self.tooltip.class.split_whitespace().any(|c| c == VISIBLE_CLASS) {
            let class = format!("{} {VISIBLE_CLASS}", self.tooltip.class);
            self.set_class(nodes, class);
        }
        self.host
            .update(nodes.content, Patch::Content(Content::parse(text)));
        let callout = self.host.measure(nodes.content, true);

        let viewport = window.inner_size();
        let trimmed = target.trim_to(viewport);
        let policy = self.config.placement;
        let side = policy.side_for(&trimmed, viewport);
        let already_showing = self.tooltip.visible && self.tooltip.side == Some(side);

        let tip_height = if side.needs_measure() {
            // Provisional pass: the rendered height is only known after layout.
            self.set_class(nodes, format!("{CURTAIN_TOOLTIP_CLASS} {VISIBLE_CLASS}"));
            self.host.toggle(nodes.tooltip, true);
            self.host.measure(nodes.tooltip, false).height
        } else {
            0.0
        };
        let anchor = policy.anchor(side, &trimmed, callout, tip_height);
        let position = policy.clamp(anchor, callout, viewport);

        if !already_showing || options.is_instant() {
            self.host.toggle(nodes.tooltip, true);
        }
        self.host.update(nodes.tooltip, Patch::Position(position));
        let mut class = format!("{CURTAIN_TOOLTIP_CLASS} {VISIBLE_CLASS} {side}");
        if let Some(extra) = options.tooltip_class.as_deref().filter(|c| !c.is_empty()) {
            class.push(' ');
            class.push_str(extra);
        }
        self.set_class(nodes, class);
        self.tooltip.side = Some(side);
        self.tooltip.position = Some(position);
        self.tooltip.visible = true;

        span.record("side", tracing::field::display(side));
        span.record("x", position.x);
        span.record("y", position.y);
        tracing::debug!(side = %side, x = position.x, y = position.y, "tooltip placed");

        Ok(self.handle(nodes))
    }

    fn handle(&self, nodes: Nodes) -> TooltipHandle {
        TooltipHandle {
            node: nodes.tooltip,
            side: self.tooltip.side,
            position: self.tooltip.position,
            visible: self.tooltip.visible,
        }
    }

    fn teardown(&mut self) -> bool {
        let Some(nodes) = self.nodes.take() else {
            return false;
        };
        self.host.remove(nodes.surface);
        self.host.remove(nodes.tooltip);
        self.tooltip = TooltipState::default();
        self.clock.reset();
        true
    }
}

/// A mounted guided-tour overlay.
///
/// Created with [`Curtain::attach`]; torn down with [`Curtain::remove`] or on
/// drop.
pub struct Curtain<H: Host + 'static> {
    inner: Rc<RefCell<Inner<H>>>,
    pending_resize: Rc<Cell<Option<Size>>>,
    window: Window,
    listener: String,
}

impl<H: Host + 'static> fmt::Debug for Curtain<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Curtain")
            .field("listener", &self.listener)
            .field("attached", &self.is_attached())
            .finish_non_exhaustive()
    }
}

impl<H: Host + 'static> Curtain<H> {
    /// Mount with the default configuration.
    pub fn attach(host: H, window: &Window) -> Result<Self> {
        Self::attach_with_config(host, window, CurtainConfig::default())
    }

    /// Mount the mask and tooltip into `host` and start tracking `window`.
    ///
    /// Creates the mask surface (pointer events disabled) with its darkness
    /// path, the tooltip container with arrow and content area, registers a
    /// per-instance resize listener, and runs an initial resize pass.
    pub fn attach_with_config(mut host: H, window: &Window, config: CurtainConfig) -> Result<Self> {
        let id = NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed);
        let listener = format!("resize.{}-{id}", config.namespace);
        // Validate before mounting so a bad namespace leaves the host untouched.
        let _: ListenerName = listener.parse()?;

        let surface = host.append(
            None,
            Element::MaskSurface {
                z_index: config.mask_z_index,
                pointer_events: false,
            },
        );
        let darkness = host.append(
            Some(surface),
            Element::MaskPath {
                class: DARKNESS_CLASS,
                fill_rule: FillRule::EvenOdd,
            },
        );
        let tooltip = host.append(
            None,
            Element::Tooltip {
                class: TOOLTIP_CLASS.to_owned(),
                z_index: config.tooltip_z_index,
            },
        );
        host.append(Some(tooltip), Element::TooltipArrow { class: "tooltip-arrow" });
        let content = host.append(Some(tooltip), Element::TooltipInner { class: "tooltip-inner" });

        let viewport = window.inner_size();
        let mask = Mask::new(viewport)
            .default_duration(config.default_duration())
            .easing(config.easing);
        let inner = Rc::new(RefCell::new(Inner {
            host,
            config,
            nodes: Some(Nodes {
                surface,
                darkness,
                tooltip,
                content,
            }),
            mask,
            tooltip: TooltipState {
                class: TOOLTIP_CLASS.to_owned(),
                ..TooltipState::default()
            },
            clock: FrameClock::new(),
        }));
        let pending_resize = Rc::new(Cell::new(None));

        let weak = Rc::downgrade(&inner);
        let pending = Rc::clone(&pending_resize);
        window.on(&listener, move |event| {
            let Event::Resize(size) = *event;
            let Some(inner) = weak.upgrade() else {
                return;
            };
            match inner.try_borrow_mut() {
                Ok(mut inner) => inner.resize(size),
                Err(_) => pending.set(Some(size)),
            }
        })?;
        tracing::debug!(listener = %listener, "curtain attached");

        inner.borrow_mut().resize(viewport);
        Ok(Self {
            inner,
            pending_resize,
            window: window.clone(),
            listener,
        })
    }

    /// Highlight `target` and explain it with `text`.
    ///
    /// `None` or empty text masks the target and fades the tooltip out.
    pub fn reveal<'a>(
        &self,
        target: impl Into<Target<'a>>,
        text: Option<&str>,
        options: &RevealOptions,
    ) -> Result<TooltipHandle> {
        let result = self
            .inner
            .borrow_mut()
            .reveal(target.into(), text, options, &self.window);
        if let Err(err) = &result {
            tracing::debug!(error = %err, error_type = err.error_type(), "curtain.reveal failed");
        }
        self.flush_pending_resize();
        result
    }

    /// Cut `hole` out of the mask (or cover everything with `None`).
    ///
    /// A no-op once the curtain has been removed.
    pub fn cut(&self, hole: Option<Rect>, duration: Option<Duration>) {
        let viewport = self.window.inner_size();
        self.inner.borrow_mut().cut(hole, duration, viewport);
        self.flush_pending_resize();
    }

    /// Advance the mask transition by `dt`.
    pub fn tick(&self, dt: Duration) {
        self.inner.borrow_mut().tick(dt);
        self.flush_pending_resize();
    }

    /// Advance the mask transition to the host frame at `now`.
    pub fn frame(&self, now: Instant) {
        {
            let mut inner = self.inner.borrow_mut();
            let dt = inner.clock.advance(now);
            inner.tick(dt);
        }
        self.flush_pending_resize();
    }

    /// Remove both elements and deregister this instance's resize listener.
    ///
    /// Idempotent.
    pub fn remove(&self) {
        if !self.inner.borrow_mut().teardown() {
            return;
        }
        self.pending_resize.set(None);
        match self.window.off(&self.listener) {
            Ok(removed) => tracing::debug!(listener = %self.listener, removed, "curtain.remove"),
            Err(err) => tracing::warn!(listener = %self.listener, error = %err, "curtain.remove"),
        }
    }

    /// Whether the elements are still mounted.
    pub fn is_attached(&self) -> bool {
        self.inner.borrow().nodes.is_some()
    }

    /// The retained hole datum.
    pub fn hole(&self) -> Option<Rect> {
        self.inner.borrow().mask.hole()
    }

    /// Whether a mask transition is in flight.
    pub fn is_animating(&self) -> bool {
        self.inner.borrow().mask.is_animating()
    }

    /// Current tooltip state, or `None` after teardown.
    pub fn tooltip(&self) -> Option<TooltipHandle> {
        let inner = self.inner.borrow();
        inner.nodes.map(|nodes| inner.handle(nodes))
    }

    /// The resize listener name registered on the window.
    pub fn listener_name(&self) -> &str {
        &self.listener
    }

    /// Inspect the host.
    pub fn with_host<R>(&self, f: impl FnOnce(&H) -> R) -> R {
        f(&self.inner.borrow().host)
    }

    /// Mutate the host (e.g. to move a target element between reveals).
    pub fn with_host_mut<R>(&self, f: impl FnOnce(&mut H) -> R) -> R {
        f(&mut self.inner.borrow_mut().host)
    }

    fn flush_pending_resize(&self) {
        let Some(size) = self.pending_resize.take() else {
            return;
        };
        match self.inner.try_borrow_mut() {
            Ok(mut inner) => inner.resize(size),
            Err(_) => self.pending_resize.set(Some(size)),
        }
    }
}

impl<H: Host + 'static> Drop for Curtain<H> {
    fn drop(&mut self) {
        if self.inner.try_borrow().is_ok_and(|inner| inner.nodes.is_some()) {
            self.remove();
        }
    }
}
