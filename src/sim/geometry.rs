//! Rectangles, line segments, and reflections on the playing field
//!
//! Field coordinates: origin top-left, x right, y down, in pixels. All
//! collision work reduces to axis-aligned rects and segment intersections.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One value per rect edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sides<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

impl Sides<bool> {
    /// True if any edge is flagged
    pub fn any(&self) -> bool {
        self.top || self.right || self.bottom || self.left
    }
}

/// One value per rect corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Corners<T> {
    pub top_left: T,
    pub top_right: T,
    pub bottom_right: T,
    pub bottom_left: T,
}

impl<T> Corners<T> {
    pub fn as_array(&self) -> [&T; 4] {
        [
            &self.top_left,
            &self.top_right,
            &self.bottom_right,
            &self.bottom_left,
        ]
    }
}

/// A line segment between two field points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Slope and y-intercept satisfying y = mx + b, or `None` for a
    /// vertical segment.
    fn line(&self) -> Option<(f32, f32)> {
        let dx = self.end.x - self.start.x;
        if dx == 0.0 {
            return None;
        }
        let m = (self.end.y - self.start.y) / dx;
        let b = self.start.y - m * self.start.x;
        Some((m, b))
    }

    fn in_domain(&self, x: f32) -> bool {
        let (lo, hi) = (self.start.x.min(self.end.x), self.start.x.max(self.end.x));
        lo <= x && x <= hi
    }

    fn in_range(&self, y: f32) -> bool {
        let (lo, hi) = (self.start.y.min(self.end.y), self.start.y.max(self.end.y));
        lo <= y && y <= hi
    }

    /// Intersection point of two segments, or `None` when parallel or when
    /// the lines cross outside either segment's extent.
    pub fn intersection(&self, other: &Segment) -> Option<Vec2> {
        let ours = self.line();
        let theirs = other.line();

        let (x, y) = match (ours, theirs) {
            // Both vertical, or equal slopes: parallel
            (None, None) => return None,
            (Some((m1, _)), Some((m2, _))) if m1 == m2 => return None,
            // We are vertical
            (None, Some((m2, b2))) => {
                let x = self.start.x;
                (x, m2 * x + b2)
            }
            // They are vertical
            (Some((m1, b1)), None) => {
                let x = other.start.x;
                (x, m1 * x + b1)
            }
            (Some((m1, b1)), Some((m2, b2))) => {
                let x = (b2 - b1) / (m1 - m2);
                (x, m1 * x + b1)
            }
        };

        let inside = |seg: &Segment| seg.in_domain(x) && seg.in_range(y);
        if inside(self) && inside(other) {
            Some(Vec2::new(x, y))
        } else {
            None
        }
    }
}

/// An axis-aligned rectangle in field space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Move the rect so its right edge sits at `x`
    pub fn set_right(&mut self, x: f32) {
        self.left = x - self.width;
    }

    /// Move the rect so its bottom edge sits at `y`
    pub fn set_bottom(&mut self, y: f32) {
        self.top = y - self.height;
    }

    pub fn corners(&self) -> Corners<Vec2> {
        Corners {
            top_left: Vec2::new(self.left, self.top),
            top_right: Vec2::new(self.right(), self.top),
            bottom_right: Vec2::new(self.right(), self.bottom()),
            bottom_left: Vec2::new(self.left, self.bottom()),
        }
    }

    /// The four edges as segments
    pub fn segments(&self) -> Sides<Segment> {
        let c = self.corners();
        Sides {
            top: Segment::new(c.top_left, c.top_right),
            right: Segment::new(c.top_right, c.bottom_right),
            bottom: Segment::new(c.bottom_left, c.bottom_right),
            left: Segment::new(c.top_left, c.bottom_left),
        }
    }

    /// Strict containment: `other` lies entirely inside with no shared edge
    pub fn contains(&self, other: &Rect) -> bool {
        self.left < other.left
            && self.top < other.top
            && self.right() > other.right()
            && self.bottom() > other.bottom()
    }

    /// Inclusive overlap test
    pub fn collides(&self, other: &Rect) -> bool {
        self.left <= other.right()
            && self.right() >= other.left
            && self.top <= other.bottom()
            && self.bottom() >= other.top
    }

    /// Which edges of `self` reach or pass the matching edge of `bounds`
    pub fn uncontained_edges(&self, bounds: &Rect) -> Sides<bool> {
        if bounds.contains(self) {
            return Sides {
                top: false,
                right: false,
                bottom: false,
                left: false,
            };
        }
        Sides {
            top: self.top <= bounds.top,
            right: self.right() >= bounds.right(),
            bottom: self.bottom() >= bounds.bottom(),
            left: self.left <= bounds.left,
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.left += delta.x;
        self.top += delta.y;
    }
}

/// Reflect a velocity off vertical and/or horizontal surfaces.
///
/// A horizontal reflection flips travel across a vertical surface (negates
/// x); a vertical reflection flips travel across a horizontal surface
/// (negates y). Matches the wall/paddle bounce semantics everywhere in sim.
#[inline]
pub fn reflect(vel: Vec2, horizontally: bool, vertically: bool) -> Vec2 {
    Vec2::new(
        if horizontally { -vel.x } else { vel.x },
        if vertically { -vel.y } else { vel.y },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn rect1() -> Rect {
        Rect::new(15.0, 20.0, 60.0, 80.0)
    }

    #[test]
    fn test_rect_properties() {
        let r = rect1();
        assert_eq!(r.right(), 75.0);
        assert_eq!(r.bottom(), 100.0);
        assert_eq!(r.center(), Vec2::new(45.0, 60.0));
    }

    #[test]
    fn test_rect_setters() {
        let mut r = rect1();
        r.set_right(100.0);
        assert_eq!(r.left, 40.0);
        r.set_bottom(200.0);
        assert_eq!(r.top, 120.0);
    }

    #[test]
    fn test_rect_contains() {
        let outer = rect1();
        // Overlaps but pokes out of the top-left
        let overlapping = Rect::new(13.0, 19.0, 10.0, 10.0);
        // Fully inside
        let inner = Rect::new(16.0, 21.0, 10.0, 10.0);
        assert!(outer.contains(&inner));
        assert!(!outer.contains(&overlapping));
    }

    #[test]
    fn test_rect_collides() {
        let a = rect1();
        let apart = Rect::new(200.0, 200.0, 10.0, 10.0);
        let touching = Rect::new(75.0, 20.0, 10.0, 10.0);
        assert!(a.collides(&rect1()));
        assert!(a.collides(&touching));
        assert!(!a.collides(&apart));
    }

    #[test]
    fn test_uncontained_edges() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inside = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(!inside.uncontained_edges(&bounds).any());

        let out_top_left = Rect::new(-5.0, -5.0, 20.0, 20.0);
        let edges = out_top_left.uncontained_edges(&bounds);
        assert!(edges.top && edges.left);
        assert!(!edges.bottom && !edges.right);
    }

    #[test]
    fn test_segment_intersection_crossing() {
        let a = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Segment::new(Vec2::new(0.0, 10.0), Vec2::new(10.0, 0.0));
        let p = a.intersection(&b).expect("diagonals cross");
        assert_relative_eq!(p.x, 5.0);
        assert_relative_eq!(p.y, 5.0);
    }

    #[test]
    fn test_segment_intersection_vertical() {
        let vertical = Segment::new(Vec2::new(5.0, 0.0), Vec2::new(5.0, 10.0));
        let diagonal = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let p = vertical.intersection(&diagonal).expect("crosses at (5,5)");
        assert_relative_eq!(p.x, 5.0);
        assert_relative_eq!(p.y, 5.0);
        // Symmetric call sees the same point
        let q = diagonal.intersection(&vertical).expect("crosses at (5,5)");
        assert_relative_eq!(q.x, p.x);
        assert_relative_eq!(q.y, p.y);
    }

    #[test]
    fn test_segment_intersection_parallel() {
        let a = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
        let b = Segment::new(Vec2::new(0.0, 5.0), Vec2::new(10.0, 5.0));
        assert!(a.intersection(&b).is_none());

        let v1 = Segment::new(Vec2::new(1.0, 0.0), Vec2::new(1.0, 10.0));
        let v2 = Segment::new(Vec2::new(2.0, 0.0), Vec2::new(2.0, 10.0));
        assert!(v1.intersection(&v2).is_none());
    }

    #[test]
    fn test_segment_intersection_off_extent() {
        // Lines cross at (5,5) but segment `b` stops short of it
        let a = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Segment::new(Vec2::new(0.0, 10.0), Vec2::new(4.0, 6.0));
        assert!(a.intersection(&b).is_none());
    }

    proptest! {
        #[test]
        fn reflect_is_involution(x in -5000.0f32..5000.0, y in -5000.0f32..5000.0,
                                 h in proptest::bool::ANY, v in proptest::bool::ANY) {
            let vel = Vec2::new(x, y);
            let twice = reflect(reflect(vel, h, v), h, v);
            prop_assert_eq!(twice, vel);
        }

        #[test]
        fn reflect_preserves_speed(x in -5000.0f32..5000.0, y in -5000.0f32..5000.0) {
            let vel = Vec2::new(x, y);
            prop_assert_eq!(reflect(vel, true, false).length(), vel.length());
            prop_assert_eq!(reflect(vel, false, true).length(), vel.length());
        }

        #[test]
        fn reflect_order_commutes(x in -5000.0f32..5000.0, y in -5000.0f32..5000.0) {
            let vel = Vec2::new(x, y);
            let combo1 = reflect(reflect(vel, true, false), false, true);
            let combo2 = reflect(reflect(vel, false, true), true, false);
            let both = reflect(vel, true, true);
            prop_assert_eq!(combo1, combo2);
            prop_assert_eq!(combo1, both);
        }
    }
}
