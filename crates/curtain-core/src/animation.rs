#![forbid(unsafe_code)]

//! Interruptible transitions for overlay geometry.
//!
//! A [`Transition`] interpolates between two values of any [`Interpolate`]
//! type over a fixed duration. Hosts drive it with [`Transition::tick`] from
//! their animation loop (or with a [`FrameClock`] fed frame timestamps).
//!
//! # Invariants
//!
//! 1. Progress is always in `[0.0, 1.0]`.
//! 2. [`Transition::retarget`] starts the new transition from the *current*
//!    interpolated value; the previous target is discarded, so once settled
//!    only the most recent target is visible.
//! 3. A settled transition reports `value() == target()`.
//!
//! # Failure Modes
//!
//! - Zero duration: completes instantly.
//! - Ticking a settled transition is a no-op.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::geometry::{Point, Rect, Size};

// ============================================================================
// Easing
// ============================================================================

/// Easing curve applied to transition progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Easing {
    /// Linear interpolation.
    #[default]
    Linear,
    /// Cubic ease-in (accelerating).
    EaseIn,
    /// Cubic ease-out (decelerating).
    EaseOut,
    /// Cubic S-curve.
    EaseInOut,
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0).
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t * t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

// ============================================================================
// Interpolation
// ============================================================================

/// Values that can be blended between two endpoints.
pub trait Interpolate: Clone {
    /// Blend from `self` (at `t = 0`) to `to` (at `t = 1`).
    fn interpolate(&self, to: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    #[inline]
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Interpolate for Point {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Point::new(self.x.interpolate(&to.x, t), self.y.interpolate(&to.y, t))
    }
}

impl Interpolate for Size {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Size::new(
            self.width.interpolate(&to.width, t),
            self.height.interpolate(&to.height, t),
        )
    }
}

impl Interpolate for Rect {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Rect::new(
            self.left.interpolate(&to.left, t),
            self.top.interpolate(&to.top, t),
            self.width.interpolate(&to.width, t),
            self.height.interpolate(&to.height, t),
        )
    }
}

// ============================================================================
// Transition
// ============================================================================

/// A single interruptible transition between two values.
#[derive(Debug, Clone)]
pub struct Transition<T> {
    from: T,
    to: T,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl<T: Interpolate> Transition<T> {
    /// A transition that is already at rest on `value`.
    pub fn settled(value: T) -> Self {
        Self {
            from: value.clone(),
            to: value,
            duration: Duration::ZERO,
            elapsed: Duration::ZERO,
            easing: Easing::Linear,
        }
    }

    /// Start a transition from `from` to `to`.
    pub fn new(from: T, to: T, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
        }
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Interrupt the in-flight transition and head for `to` instead.
    ///
    /// The new transition starts from the current interpolated value.
    pub fn retarget(&mut self, to: T, duration: Duration) {
        self.from = self.value();
        self.to = to;
        self.duration = duration;
        self.elapsed = Duration::ZERO;
    }

    /// Jump straight to `value`, cancelling any in-flight transition.
    pub fn snap(&mut self, value: T) {
        self.from = value.clone();
        self.to = value;
        self.duration = Duration::ZERO;
        self.elapsed = Duration::ZERO;
    }

    /// Advance by `dt`. Returns `true` if the value changed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.is_running() || dt.is_zero() {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        true
    }

    /// Linear progress in `[0.0, 1.0]`, before easing.
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Whether the transition still has time left.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.elapsed < self.duration
    }

    /// The current interpolated value.
    pub fn value(&self) -> T {
        if !self.is_running() {
            return self.to.clone();
        }
        self.from
            .interpolate(&self.to, self.easing.apply(self.progress()))
    }

    /// The value the transition settles on.
    #[inline]
    pub fn target(&self) -> &T {
        &self.to
    }

    /// Total duration of the current leg.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

// ============================================================================
// Frame clock
// ============================================================================

/// Converts host frame timestamps into tick deltas.
///
/// The first frame yields a zero delta.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    /// Create a clock that has not seen a frame yet.
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Record a frame at `now` and return the time since the previous one.
    pub fn advance(&mut self, now: Instant) -> Duration {
        let dt = self
            .last
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last = Some(now);
        dt
    }

    /// Forget the previous frame (e.g. after the overlay was hidden).
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
        ] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-9);
            assert_eq!(easing.apply(-3.0), 0.0);
        }
    }

    #[test]
    fn linear_midpoint() {
        let mut t = Transition::new(0.0, 10.0, MS_100, Easing::Linear);
        t.tick(Duration::from_millis(50));
        assert!((t.value() - 5.0).abs() < 1e-9);
        assert!(t.is_running());
    }

    #[test]
    fn overshoot_tick_settles_on_target() {
        let mut t = Transition::new(0.0, 10.0, MS_100, Easing::Linear);
        assert!(t.tick(Duration::from_secs(5)));
        assert!(!t.is_running());
        assert_eq!(t.value(), 10.0);
    }

    #[test]
    fn zero_duration_is_instant() {
        let t = Transition::new(0.0, 10.0, Duration::ZERO, Easing::Linear);
        assert!(!t.is_running());
        assert_eq!(t.value(), 10.0);
        assert_eq!(t.progress(), 1.0);
    }

    #[test]
    fn retarget_starts_from_current_value() {
        let mut t = Transition::new(0.0, 10.0, MS_100, Easing::Linear);
        t.tick(Duration::from_millis(50));
        t.retarget(100.0, MS_100);
        assert!((t.value() - 5.0).abs() < 1e-9);
        t.tick(MS_100);
        assert_eq!(t.value(), 100.0);
    }

    #[test]
    fn settled_tick_is_noop() {
        let mut t = Transition::settled(3.0);
        assert!(!t.tick(MS_100));
        assert_eq!(t.value(), 3.0);
    }

    #[test]
    fn snap_cancels_in_flight() {
        let mut t = Transition::new(0.0, 10.0, MS_100, Easing::Linear);
        t.tick(Duration::from_millis(10));
        t.snap(42.0);
        assert!(!t.is_running());
        assert_eq!(t.value(), 42.0);
    }

    #[test]
    fn rect_interpolates_componentwise() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(a.interpolate(&b, 0.5), Rect::new(5.0, 10.0, 20.0, 25.0));
    }

    #[test]
    fn frame_clock_first_frame_is_zero() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        assert_eq!(clock.advance(start), Duration::ZERO);
        assert_eq!(clock.advance(start + MS_100), MS_100);
        clock.reset();
        assert_eq!(clock.advance(start + MS_100), Duration::ZERO);
    }
}
