#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All values are viewport pixels with the origin at the top-left corner, as
//! reported by the host's bounding-box queries. Coordinates are `f64` because
//! hosts report fractional boxes and because holes are interpolated during
//! mask transitions.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair (viewport dimensions, measured element sizes).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The rectangle at the origin covering this size.
    #[inline]
    pub const fn to_rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// A rectangle in viewport coordinates.
///
/// Field names follow DOM bounding boxes (`left`, `top`) so host adapters can
/// copy values across without renaming.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Left edge (inclusive).
    pub left: f64,
    /// Top edge (inclusive).
    pub top: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Centre point.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Check if the rectangle has zero (or negative) area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Compute the intersection with another rectangle, returning `None` if no overlap.
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if left < right && top < bottom {
            Some(Rect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }

    /// Intersect with the viewport `[0, width] x [0, height]`.
    ///
    /// Returns `None` when nothing of the rectangle is visible.
    #[inline]
    pub fn clip_to(&self, viewport: Size) -> Option<Rect> {
        self.intersection_opt(&viewport.to_rect())
    }

    /// Truncate the bottom and right edges to the viewport.
    ///
    /// Unlike [`Rect::clip_to`] the origin is left untouched; only the
    /// overflowing extent is cut, and never below zero.
    pub fn trim_to(&self, viewport: Size) -> Rect {
        let mut trimmed = *self;
        if trimmed.bottom() > viewport.height {
            trimmed.height = (viewport.height - trimmed.top).max(0.0);
        }
        if trimmed.right() > viewport.width {
            trimmed.width = (viewport.width - trimmed.left).max(0.0);
        }
        trimmed
    }

    /// A zero-size rectangle at this rectangle's centre.
    #[inline]
    pub fn collapsed(&self) -> Rect {
        let c = self.center();
        Rect::new(c.x, c.y, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Rect, Size};

    #[test]
    fn rect_edges() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.right(), 40.0);
        assert_eq!(rect.bottom(), 60.0);
        assert_eq!(rect.center(), Point::new(25.0, 40.0));
    }

    #[test]
    fn rect_intersection_no_overlap_is_none() {
        let a = Rect::new(0.0, 0.0, 2.0, 2.0);
        let b = Rect::new(3.0, 3.0, 2.0, 2.0);
        assert_eq!(a.intersection_opt(&b), None);
    }

    #[test]
    fn clip_to_trims_every_edge() {
        let viewport = Size::new(100.0, 50.0);
        let rect = Rect::new(-10.0, 40.0, 200.0, 20.0);
        assert_eq!(rect.clip_to(viewport), Some(Rect::new(0.0, 40.0, 100.0, 10.0)));
    }

    #[test]
    fn clip_to_offscreen_is_none() {
        let viewport = Size::new(100.0, 50.0);
        assert_eq!(Rect::new(120.0, 0.0, 10.0, 10.0).clip_to(viewport), None);
    }

    #[test]
    fn trim_to_only_cuts_bottom_and_right() {
        let viewport = Size::new(100.0, 50.0);
        let trimmed = Rect::new(-5.0, 40.0, 200.0, 20.0).trim_to(viewport);
        assert_eq!(trimmed, Rect::new(-5.0, 40.0, 105.0, 10.0));
    }

    #[test]
    fn trim_to_never_goes_negative() {
        let viewport = Size::new(100.0, 50.0);
        let trimmed = Rect::new(150.0, 80.0, 10.0, 10.0).trim_to(viewport);
        assert_eq!(trimmed.width, 0.0);
        assert_eq!(trimmed.height, 0.0);
    }

    #[test]
    fn collapsed_sits_on_center() {
        let r = Rect::new(0.0, 0.0, 10.0, 4.0).collapsed();
        assert_eq!(r, Rect::new(5.0, 2.0, 0.0, 0.0));
        assert!(r.is_empty());
    }
}
