#![forbid(unsafe_code)]

//! Tooltip placement policy.
//!
//! Placement is a pure function of the (trimmed) target rectangle, the
//! callout size, and the viewport. Sides are tried in a fixed priority order
//! and the first match wins:
//!
//! 1. **Bottom** when `target.bottom < min(bottom_threshold, target.right)`.
//!    Targets hugging the top-left corner get their callout underneath.
//! 2. **Right** when more than `side_room` pixels remain right of the target.
//! 3. **Left** when the target starts more than `left_threshold` from the left.
//! 4. **Top** otherwise. This is the only side that needs the rendered
//!    tooltip height, so the caller measures it in a provisional pass.
//!
//! The resulting point is clamped so the callout stays `margin` pixels inside
//! the viewport.

use std::fmt;

use curtain_core::{Point, Rect, Size};

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

/// Edge of the target the callout is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// Class name used for styling (arrow direction).
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Whether placement on this side needs the tooltip's rendered height.
    pub const fn needs_measure(self) -> bool {
        matches!(self, Self::Top)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Final callout placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub side: Side,
    pub position: Point,
}

/// Thresholds driving side selection and clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct PlacementPolicy {
    /// Upper bound on `target.bottom` for the bottom heuristic.
    pub bottom_threshold: f64,
    /// Room required right of the target for right placement.
    pub side_room: f64,
    /// Minimum left edge of the target for left placement.
    pub left_threshold: f64,
    /// Distance from the target's left edge to the callout's left edge.
    pub left_offset: f64,
    /// Minimum distance between the callout and the viewport edges.
    pub margin: f64,
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        Self {
            bottom_threshold: 100.0,
            side_room: 300.0,
            left_threshold: 300.0,
            left_offset: 200.0,
            margin: 10.0,
        }
    }
}

impl PlacementPolicy {
    /// Choose the side for `target` (already trimmed to `viewport`).
    pub fn side_for(&self, target: &Rect, viewport: Size) -> Side {
        // Compares a fixed threshold with the target's horizontal extent; kept
        // as-is for compatibility with existing tours.
        if target.bottom() < self.bottom_threshold.min(target.right()) {
            Side::Bottom
        } else if target.right() + self.side_room < viewport.width {
            Side::Right
        } else if target.left > self.left_threshold {
            Side::Left
        } else {
            Side::Top
        }
    }

    /// Unclamped anchor point for `side`.
    ///
    /// `tip_height` is the measured tooltip height and is only read for
    /// [`Side::Top`].
    pub fn anchor(&self, side: Side, target: &Rect, callout: Size, tip_height: f64) -> Point {
        let center = target.center();
        match side {
            Side::Bottom => Point::new(center.x - callout.width / 2.0, target.bottom()),
            Side::Right => Point::new(target.right(), center.y - callout.height / 2.0),
            Side::Left => Point::new(
                target.left - self.left_offset,
                center.y - callout.height / 2.0,
            ),
            Side::Top => Point::new(center.x - callout.width / 2.0, target.top - tip_height),
        }
    }

    /// Returns a list of validation errors. An empty list means the policy
    /// is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let thresholds = [
            ("bottom_threshold", self.bottom_threshold),
            ("side_room", self.side_room),
            ("left_threshold", self.left_threshold),
            ("left_offset", self.left_offset),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() {
                errors.push(format!("placement.{name} must be finite, got {value}"));
            }
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            errors.push(format!(
                "placement.margin must be finite and >= 0, got {}",
                self.margin
            ));
        }
        errors
    }

    /// Clamp `point` so a callout of `callout` size stays inside the margins.
    ///
    /// If the callout does not fit, it is pinned to the leading margin. A
    /// non-finite margin falls back to the default one, and a NaN coordinate
    /// lands on the leading margin.
    pub fn clamp(&self, point: Point, callout: Size, viewport: Size) -> Point {
        let m = if self.margin.is_finite() {
            self.margin
        } else {
            Self::default().margin
        };
        let max_x = (viewport.width - callout.width - m).max(m);
        let max_y = (viewport.height - callout.height - m).max(m);
        Point::new(point.x.max(m).min(max_x), point.y.max(m).min(max_y))
    }

    /// Side selection, anchoring, and clamping in one step.
    ///
    /// `measure_tip` is only invoked when the chosen side needs the rendered
    /// tooltip height.
    pub fn place<F>(&self, target: &Rect, callout: Size, viewport: Size, measure_tip: F) -> Placement
    where
        F: FnOnce() -> f64,
    {
        let side = self.side_for(target, viewport);
        let tip_height = if side.needs_measure() { measure_tip() } else { 0.0 };
        let position = self.clamp(self.anchor(side, target, callout, tip_height), callout, viewport);
        Placement { side, position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(1200.0, 800.0);
    const CALLOUT: Size = Size::new(200.0, 60.0);

    fn side(target: Rect) -> Side {
        PlacementPolicy::default().side_for(&target, VIEWPORT)
    }

    #[test]
    fn top_left_corner_is_bottom() {
        assert_eq!(side(Rect::new(10.0, 10.0, 50.0, 20.0)), Side::Bottom);
    }

    #[test]
    fn room_on_the_right_is_right() {
        assert_eq!(side(Rect::new(50.0, 400.0, 100.0, 50.0)), Side::Right);
    }

    #[test]
    fn exact_room_is_not_right() {
        // 800 + 100 + 300 == 1200, not strictly less.
        assert_eq!(side(Rect::new(800.0, 400.0, 100.0, 50.0)), Side::Left);
    }

    #[test]
    fn narrow_viewport_falls_back_to_top() {
        let policy = PlacementPolicy::default();
        let viewport = Size::new(500.0, 800.0);
        let target = Rect::new(100.0, 400.0, 200.0, 50.0);
        assert_eq!(policy.side_for(&target, viewport), Side::Top);
    }

    #[test]
    fn bottom_anchor_centers_under_target() {
        let policy = PlacementPolicy::default();
        let target = Rect::new(10.0, 10.0, 50.0, 20.0);
        let p = policy.anchor(Side::Bottom, &target, CALLOUT, 0.0);
        assert_eq!(p, Point::new(-65.0, 30.0));
        assert_eq!(policy.clamp(p, CALLOUT, VIEWPORT), Point::new(10.0, 30.0));
    }

    #[test]
    fn right_anchor_centers_vertically() {
        let policy = PlacementPolicy::default();
        let target = Rect::new(50.0, 400.0, 100.0, 50.0);
        let p = policy.anchor(Side::Right, &target, CALLOUT, 0.0);
        assert_eq!(p, Point::new(150.0, 395.0));
    }

    #[test]
    fn left_anchor_uses_fixed_offset() {
        let policy = PlacementPolicy::default();
        let target = Rect::new(800.0, 400.0, 100.0, 50.0);
        let p = policy.anchor(Side::Left, &target, CALLOUT, 0.0);
        assert_eq!(p, Point::new(600.0, 395.0));
    }

    #[test]
    fn top_anchor_uses_tip_height() {
        let policy = PlacementPolicy::default();
        let target = Rect::new(100.0, 400.0, 200.0, 50.0);
        let p = policy.anchor(Side::Top, &target, CALLOUT, 75.0);
        assert_eq!(p, Point::new(100.0, 325.0));
    }

    #[test]
    fn clamp_pins_oversized_callout_to_margin() {
        let policy = PlacementPolicy::default();
        let huge = Size::new(2000.0, 2000.0);
        assert_eq!(
            policy.clamp(Point::new(500.0, 500.0), huge, VIEWPORT),
            Point::new(10.0, 10.0)
        );
    }

    #[test]
    fn clamp_keeps_right_margin() {
        let policy = PlacementPolicy::default();
        let p = policy.clamp(Point::new(1150.0, 790.0), CALLOUT, VIEWPORT);
        assert_eq!(p, Point::new(990.0, 730.0));
    }

    #[test]
    fn clamp_survives_non_finite_input() {
        let policy = PlacementPolicy {
            margin: f64::NAN,
            ..PlacementPolicy::default()
        };
        let p = policy.clamp(Point::new(f64::NAN, 1150.0), CALLOUT, VIEWPORT);
        assert_eq!(p, Point::new(10.0, 730.0));

        let policy = PlacementPolicy {
            margin: f64::INFINITY,
            ..PlacementPolicy::default()
        };
        let p = policy.clamp(Point::new(-50.0, 400.0), CALLOUT, VIEWPORT);
        assert_eq!(p, Point::new(10.0, 400.0));
    }

    #[test]
    fn validate_catches_bad_margin_and_thresholds() {
        assert!(PlacementPolicy::default().validate().is_empty());

        let policy = PlacementPolicy {
            margin: f64::NAN,
            side_room: f64::INFINITY,
            ..PlacementPolicy::default()
        };
        let errors = policy.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.contains("side_room")));
        assert!(errors.iter().any(|e| e.contains("margin")));

        let negative = PlacementPolicy {
            margin: -1.0,
            ..PlacementPolicy::default()
        };
        assert_eq!(negative.validate().len(), 1);
    }

    #[test]
    fn place_only_measures_for_top() {
        let policy = PlacementPolicy::default();
        let placed = policy.place(&Rect::new(50.0, 400.0, 100.0, 50.0), CALLOUT, VIEWPORT, || {
            panic!("right placement must not measure")
        });
        assert_eq!(placed.side, Side::Right);

        let mut measured = false;
        let viewport = Size::new(500.0, 800.0);
        let placed = policy.place(&Rect::new(100.0, 400.0, 200.0, 50.0), CALLOUT, viewport, || {
            measured = true;
            80.0
        });
        assert!(measured);
        assert_eq!(placed.side, Side::Top);
        assert_eq!(placed.position, Point::new(100.0, 320.0));
    }

    #[test]
    fn side_display() {
        assert_eq!(Side::Left.to_string(), "left");
        assert!(Side::Top.needs_measure());
        assert!(!Side::Bottom.needs_measure());
    }
}
