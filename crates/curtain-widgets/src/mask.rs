#![forbid(unsafe_code)]

//! Mask renderer: the darkened viewport with one rectangular hole.
//!
//! The mask is a single path made of two closed sub-paths: a rectangle
//! covering the whole viewport, then the hole traced with the opposite
//! winding. With either the even-odd or the non-zero fill rule the hole
//! subtracts from the fill instead of adding a second region.
//!
//! # Invariants
//!
//! - The outer rectangle always covers the full current viewport.
//! - A hole is clipped to the viewport before it is traced; a hole with
//!   nothing visible is dropped.
//! - [`Mask::hole`] is the datum most recently passed to [`Mask::cut`],
//!   unclipped, so a resize can replay it against new dimensions.
//! - A cut interrupts any in-flight transition; the settled shape is always
//!   the last requested one.

use std::fmt::Write as _;
use std::time::Duration;

use curtain_core::animation::{Easing, Interpolate, Transition};
use curtain_core::{Rect, Size};

/// Duration used when a cut does not specify one.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(600);

/// Resolved mask geometry: viewport plus the clipped hole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskShape {
    pub viewport: Size,
    pub hole: Option<Rect>,
}

impl MaskShape {
    /// Build a shape, clipping `hole` to `viewport`.
    pub fn new(viewport: Size, hole: Option<Rect>) -> Self {
        Self {
            viewport,
            hole: hole.and_then(|h| h.clip_to(viewport)),
        }
    }

    /// SVG path data for this shape.
    pub fn path(&self) -> String {
        let Size { width: w, height: h } = self.viewport;
        let mut d = format!("M0,0L0,{h}L{w},{h}L{w},0Z");
        if let Some(hole) = self.hole.filter(|hole| !hole.is_empty()) {
            let (l, t, r, b) = (hole.left, hole.top, hole.right(), hole.bottom());
            // Opposite winding to the outer rectangle.
            let _ = write!(d, "M{l},{t}L{r},{t}L{r},{b}L{l},{b}Z");
        }
        d
    }
}

impl Interpolate for MaskShape {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        let viewport = self.viewport.interpolate(&to.viewport, t);
        // Holes appear and disappear by growing from / shrinking to their centre.
        let endpoints = match (self.hole, to.hole) {
            (Some(a), Some(b)) => Some((a, b)),
            (Some(a), None) => Some((a, a.collapsed())),
            (None, Some(b)) => Some((b.collapsed(), b)),
            (None, None) => None,
        };
        let hole = endpoints
            .map(|(a, b)| a.interpolate(&b, t))
            .filter(|hole| !hole.is_empty());
        Self { viewport, hole }
    }
}

/// Animated mask state.
#[derive(Debug, Clone)]
pub struct Mask {
    datum: Option<Rect>,
    transition: Transition<MaskShape>,
    default_duration: Duration,
}

impl Mask {
    /// A mask covering `viewport` with no hole.
    pub fn new(viewport: Size) -> Self {
        Self {
            datum: None,
            transition: Transition::settled(MaskShape::new(viewport, None)),
            default_duration: DEFAULT_DURATION,
        }
    }

    /// Set the duration used for cuts without one (builder pattern).
    #[must_use]
    pub fn default_duration(mut self, duration: Duration) -> Self {
        self.default_duration = duration;
        self
    }

    /// Set the transition easing (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.transition = self.transition.easing(easing);
        self
    }

    /// Cut `hole` out of a mask covering `viewport`.
    ///
    /// `Some(Duration::ZERO)` applies the shape immediately; `None` animates
    /// over the default duration. Returns the shape the mask settles on.
    pub fn cut(&mut self, hole: Option<Rect>, viewport: Size, duration: Option<Duration>) -> MaskShape {
        self.datum = hole;
        let target = MaskShape::new(viewport, hole);
        let duration = duration.unwrap_or(self.default_duration);
        if duration.is_zero() {
            self.transition.snap(target);
        } else {
            // Interrupt: the new leg starts wherever the old one currently is.
            self.transition.retarget(target, duration);
        }
        target
    }

    /// Advance the transition. Returns `true` if the shape changed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.transition.tick(dt)
    }

    /// The retained hole datum, as last passed to [`Mask::cut`].
    pub fn hole(&self) -> Option<Rect> {
        self.datum
    }

    /// The current (possibly mid-transition) shape.
    pub fn shape(&self) -> MaskShape {
        self.transition.value()
    }

    /// Path data for the current shape.
    pub fn path(&self) -> String {
        self.shape().path()
    }

    /// Whether a transition is in flight.
    pub fn is_animating(&self) -> bool {
        self.transition.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(1200.0, 800.0);

    #[test]
    fn path_without_hole_covers_viewport() {
        let shape = MaskShape::new(VIEWPORT, None);
        assert_eq!(shape.path(), "M0,0L0,800L1200,800L1200,0Z");
    }

    #[test]
    fn path_with_hole_has_two_subpaths() {
        let shape = MaskShape::new(VIEWPORT, Some(Rect::new(10.0, 20.0, 50.0, 30.0)));
        assert_eq!(
            shape.path(),
            "M0,0L0,800L1200,800L1200,0ZM10,20L60,20L60,50L10,50Z"
        );
    }

    #[test]
    fn hole_is_clipped_to_viewport() {
        let shape = MaskShape::new(VIEWPORT, Some(Rect::new(1100.0, 700.0, 300.0, 300.0)));
        assert_eq!(shape.hole, Some(Rect::new(1100.0, 700.0, 100.0, 100.0)));
    }

    #[test]
    fn offscreen_hole_is_dropped() {
        let shape = MaskShape::new(VIEWPORT, Some(Rect::new(1300.0, 0.0, 10.0, 10.0)));
        assert_eq!(shape.hole, None);
    }

    #[test]
    fn instant_cut_applies_immediately() {
        let mut mask = Mask::new(VIEWPORT);
        let hole = Rect::new(10.0, 10.0, 50.0, 20.0);
        mask.cut(Some(hole), VIEWPORT, Some(Duration::ZERO));
        assert!(!mask.is_animating());
        assert_eq!(mask.shape().hole, Some(hole));
        assert_eq!(mask.hole(), Some(hole));
    }

    #[test]
    fn default_cut_animates_linearly() {
        let mut mask = Mask::new(VIEWPORT);
        mask.cut(Some(Rect::new(100.0, 100.0, 100.0, 100.0)), VIEWPORT, None);
        assert!(mask.is_animating());
        mask.tick(Duration::from_millis(300));
        // Halfway through growing from the centre (150, 150).
        assert_eq!(mask.shape().hole, Some(Rect::new(125.0, 125.0, 50.0, 50.0)));
        mask.tick(Duration::from_millis(300));
        assert!(!mask.is_animating());
    }

    #[test]
    fn second_cut_interrupts_first() {
        let mut mask = Mask::new(VIEWPORT);
        let first = Rect::new(0.0, 0.0, 100.0, 100.0);
        let second = Rect::new(500.0, 500.0, 40.0, 40.0);
        mask.cut(Some(first), VIEWPORT, Some(Duration::from_millis(100)));
        mask.tick(Duration::from_millis(50));
        mask.cut(Some(second), VIEWPORT, Some(Duration::from_millis(100)));
        mask.tick(Duration::from_secs(1));
        assert_eq!(mask.shape().hole, Some(second));
        assert_eq!(mask.hole(), Some(second));
    }

    #[test]
    fn hole_to_none_shrinks_then_vanishes() {
        let mut mask = Mask::new(VIEWPORT);
        mask.cut(Some(Rect::new(0.0, 0.0, 100.0, 100.0)), VIEWPORT, Some(Duration::ZERO));
        mask.cut(None, VIEWPORT, Some(Duration::from_millis(100)));
        mask.tick(Duration::from_millis(50));
        assert_eq!(mask.shape().hole, Some(Rect::new(25.0, 25.0, 50.0, 50.0)));
        mask.tick(Duration::from_millis(50));
        assert_eq!(mask.shape().hole, None);
        assert_eq!(mask.path(), "M0,0L0,800L1200,800L1200,0Z");
    }

    #[test]
    fn interrupted_cut_resumes_from_current_shape() {
        let mut mask = Mask::new(VIEWPORT);
        mask.cut(Some(Rect::new(0.0, 0.0, 100.0, 100.0)), VIEWPORT, Some(Duration::from_millis(100)));
        mask.tick(Duration::from_millis(50));
        let midway = mask.shape();
        mask.cut(Some(Rect::new(500.0, 500.0, 40.0, 40.0)), VIEWPORT, Some(Duration::from_millis(100)));
        assert_eq!(mask.shape(), midway);
        assert!(mask.is_animating());
    }

    #[test]
    fn easing_survives_every_cut() {
        let mut mask = Mask::new(VIEWPORT).easing(Easing::EaseIn);
        mask.cut(Some(Rect::new(0.0, 0.0, 10.0, 10.0)), VIEWPORT, Some(Duration::ZERO));
        mask.cut(None, VIEWPORT, Some(Duration::ZERO));
        mask.cut(Some(Rect::new(100.0, 100.0, 100.0, 100.0)), VIEWPORT, Some(Duration::from_millis(600)));
        mask.tick(Duration::from_millis(300));
        // Cubic ease-in at half time: 0.125 of the way out from the centre.
        assert_eq!(mask.shape().hole, Some(Rect::new(143.75, 143.75, 12.5, 12.5)));
    }
}
