// src/geom.rs

//! Integer points and rectangles, plus the clipping used by every pixel copy.

use std::ops::{Add, Sub};

/// A 2-D integer coordinate. Also used for sizes (x = width, y = height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

// Coordinates saturate at the ends of the i32 range instead of wrapping.
impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

/// An axis-aligned rectangle containing the points with
/// `min.x <= x < max.x` and `min.y <= y < max.y`.
///
/// Constructors keep `min <= max` componentwise. A rectangle is empty when it
/// has zero width or zero height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rectangle {
    pub min: Point,
    pub max: Point,
}

impl Rectangle {
    pub const ZERO: Rectangle = Rectangle {
        min: Point::ZERO,
        max: Point::ZERO,
    };

    /// Builds the rectangle spanning the two corners, swapping coordinates as
    /// needed so the result is well-formed.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Rectangle {
            min: Point::new(x0.min(x1), y0.min(y1)),
            max: Point::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// The rectangle anchored at the origin with the given size.
    pub fn from_size(size: Point) -> Self {
        Rectangle::new(0, 0, size.x, size.y)
    }

    /// The rectangle anchored at `origin` with the given size. The far edge
    /// stops at `i32::MAX`.
    pub fn with_origin(origin: Point, size: Point) -> Self {
        Rectangle {
            min: origin,
            max: origin + size,
        }
    }

    pub fn dx(&self) -> i32 {
        self.max.x.saturating_sub(self.min.x)
    }

    pub fn dy(&self) -> i32 {
        self.max.y.saturating_sub(self.min.y)
    }

    pub fn size(&self) -> Point {
        Point::new(self.dx(), self.dy())
    }

    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    pub fn contains(&self, p: Point) -> bool {
        self.min.x <= p.x && p.x < self.max.x && self.min.y <= p.y && p.y < self.max.y
    }

    /// True if every point of `self` is inside `other`. The empty rectangle is
    /// inside everything.
    pub fn is_inside(&self, other: &Rectangle) -> bool {
        if self.is_empty() {
            return true;
        }
        other.min.x <= self.min.x
            && self.max.x <= other.max.x
            && other.min.y <= self.min.y
            && self.max.y <= other.max.y
    }

    /// The largest rectangle contained by both. Empty intersections collapse to
    /// [`Rectangle::ZERO`].
    pub fn intersect(&self, other: &Rectangle) -> Rectangle {
        let r = Rectangle {
            min: Point::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y)),
            max: Point::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y)),
        };
        if r.is_empty() {
            Rectangle::ZERO
        } else {
            r
        }
    }
}

/// Clips a copy of `sr` (in source space) to `dp` (in destination space).
///
/// The source rectangle is first clipped to `src_bounds`, shifting the
/// destination anchor by the same amount, and the destination rectangle is then
/// clipped to `dst_bounds`. Returns the destination rectangle that will actually
/// be written and the source point that maps onto its top-left corner. Rows and
/// columns falling outside either bounds are dropped.
pub fn clip_copy(
    dp: Point,
    sr: Rectangle,
    src_bounds: Rectangle,
    dst_bounds: Rectangle,
) -> (Rectangle, Point) {
    let sr_clipped = sr.intersect(&src_bounds);
    if sr_clipped.is_empty() {
        return (Rectangle::ZERO, Point::ZERO);
    }
    // `dp` may be anywhere in i32 space, so the destination side is worked out
    // in i64 and only narrowed once it is inside `dst_bounds`.
    let span = |d: i32, s_min: i32, s_clip: i32, len: i32, lo: i32, hi: i32| {
        let anchor = i64::from(d) + i64::from(s_clip) - i64::from(s_min);
        let start = anchor.max(i64::from(lo));
        let end = (anchor + i64::from(len)).min(i64::from(hi));
        (start < end).then(|| {
            let src = i64::from(s_clip) + (start - anchor);
            (start as i32, end as i32, src as i32)
        })
    };
    let x = span(
        dp.x,
        sr.min.x,
        sr_clipped.min.x,
        sr_clipped.dx(),
        dst_bounds.min.x,
        dst_bounds.max.x,
    );
    let y = span(
        dp.y,
        sr.min.y,
        sr_clipped.min.y,
        sr_clipped.dy(),
        dst_bounds.min.y,
        dst_bounds.max.y,
    );
    match (x, y) {
        (Some((x0, x1, sx)), Some((y0, y1, sy))) => (
            Rectangle {
                min: Point::new(x0, y0),
                max: Point::new(x1, y1),
            },
            Point::new(sx, sy),
        ),
        _ => (Rectangle::ZERO, Point::ZERO),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn it_should_normalize_swapped_corners() {
        let r = Rectangle::new(10, 60, 110, 10);
        assert_eq!(r.min, Point::new(10, 10));
        assert_eq!(r.max, Point::new(110, 60));
        assert_eq!(r.size(), Point::new(100, 50));
    }

    #[test]
    fn it_should_collapse_disjoint_intersections_to_zero() {
        let a = Rectangle::new(0, 0, 10, 10);
        let b = Rectangle::new(20, 20, 30, 30);
        assert_eq!(a.intersect(&b), Rectangle::ZERO);
        assert!(Rectangle::new(5, 5, 5, 9).is_empty());
    }

    #[test]
    fn it_should_shift_the_source_when_the_destination_is_clipped() {
        let src = Rectangle::new(0, 0, 8, 8);
        let dst = Rectangle::new(0, 0, 4, 4);
        let (dr, sp) = clip_copy(Point::new(-2, -1), Rectangle::new(1, 1, 6, 6), src, dst);
        assert_eq!(dr, Rectangle::new(0, 0, 3, 4));
        assert_eq!(sp, Point::new(3, 2));
    }

    #[test]
    fn it_should_clip_the_source_to_its_own_bounds() {
        let src = Rectangle::new(0, 0, 4, 4);
        let dst = Rectangle::new(0, 0, 100, 100);
        let (dr, sp) = clip_copy(Point::new(10, 10), Rectangle::new(-2, 2, 6, 10), src, dst);
        assert_eq!(sp, Point::new(0, 2));
        assert_eq!(dr, Rectangle::new(12, 10, 16, 12));
    }

    #[test]
    fn it_should_clip_copies_anchored_at_the_ends_of_the_coordinate_range() {
        let src = Rectangle::new(0, 0, 4, 4);
        let dst = Rectangle::new(0, 0, 8, 8);
        assert_eq!(
            clip_copy(Point::new(i32::MAX - 1, 0), src, src, dst),
            (Rectangle::ZERO, Point::ZERO)
        );
        assert_eq!(
            clip_copy(Point::new(i32::MIN, i32::MIN), src, src, dst),
            (Rectangle::ZERO, Point::ZERO)
        );
        // A source starting at i32::MIN still lines up with its anchor.
        let wide = Rectangle::new(i32::MIN, 0, 2, 4);
        let (dr, sp) = clip_copy(Point::new(i32::MIN, 0), wide, src, dst);
        assert_eq!(dr, Rectangle::new(0, 0, 2, 4));
        assert_eq!(sp, Point::ZERO);
    }

    #[test]
    fn it_should_saturate_extreme_extents() {
        let r = Rectangle::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        assert_eq!(r.size(), Point::new(i32::MAX, i32::MAX));
        assert_eq!(
            Rectangle::with_origin(Point::new(i32::MAX - 1, 0), Point::new(4, 4)).max,
            Point::new(i32::MAX, 4)
        );
    }

    fn rect() -> impl Strategy<Value = Rectangle> {
        (-64i32..64, -64i32..64, -64i32..64, -64i32..64)
            .prop_map(|(x0, y0, x1, y1)| Rectangle::new(x0, y0, x1, y1))
    }

    proptest! {
        #[test]
        fn intersection_is_inside_both(a in rect(), b in rect()) {
            let r = a.intersect(&b);
            prop_assert!(r.is_inside(&a));
            prop_assert!(r.is_inside(&b));
        }

        #[test]
        fn intersection_keeps_every_shared_point(a in rect(), b in rect(), x in -64i32..64, y in -64i32..64) {
            let p = Point::new(x, y);
            prop_assert_eq!(a.contains(p) && b.contains(p), a.intersect(&b).contains(p));
        }

        #[test]
        fn clipped_copies_stay_inside_both_bounds(
            dx in -80i32..80,
            dy in -80i32..80,
            sr in rect(),
            sw in 0i32..48,
            sh in 0i32..48,
            tw in 0i32..48,
            th in 0i32..48,
        ) {
            let src_bounds = Rectangle::from_size(Point::new(sw, sh));
            let dst_bounds = Rectangle::from_size(Point::new(tw, th));
            let (dr, sp) = clip_copy(Point::new(dx, dy), sr, src_bounds, dst_bounds);
            prop_assert!(dr.is_inside(&dst_bounds));
            prop_assert!(Rectangle::with_origin(sp, dr.size()).is_inside(&src_bounds));
            prop_assert!(Rectangle::with_origin(sp, dr.size()).is_inside(&sr));
            // Every written pixel keeps its offset relative to the requested anchor.
            if !dr.is_empty() {
                prop_assert_eq!(dr.min - Point::new(dx, dy), sp - sr.min);
            }
        }

        #[test]
        fn clipping_never_overflows_on_full_range_coordinates(
            dx in any::<i32>(),
            dy in any::<i32>(),
            x0 in any::<i32>(),
            y0 in any::<i32>(),
            x1 in any::<i32>(),
            y1 in any::<i32>(),
        ) {
            let sr = Rectangle::new(x0, y0, x1, y1);
            let src_bounds = Rectangle::from_size(Point::new(16, 16));
            let dst_bounds = Rectangle::new(-8, -8, 24, 24);
            let (dr, sp) = clip_copy(Point::new(dx, dy), sr, src_bounds, dst_bounds);
            prop_assert!(dr.is_inside(&dst_bounds));
            prop_assert!(Rectangle::with_origin(sp, dr.size()).is_inside(&src_bounds));
            prop_assert!(sr.dx() >= 0 && sr.dy() >= 0);
            if !dr.is_empty() {
                let shift = |a: i32, b: i32| i64::from(a) - i64::from(b);
                prop_assert_eq!(shift(dr.min.x, dx), shift(sp.x, sr.min.x));
                prop_assert_eq!(shift(dr.min.y, dy), shift(sp.y, sr.min.y));
            }
        }
    }
}
