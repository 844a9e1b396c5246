//! Axis-aligned bounding box collision
//!
//! Every entity in the game is a screen-space rectangle with its origin at
//! the top-left corner (y grows downward).

use glam::Vec2;

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn square(pos: Vec2, side: f32) -> Self {
        Self {
            pos,
            size: Vec2::splat(side),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Grow the rectangle by `margin` on every side
    pub fn inflate(&self, margin: f32) -> Self {
        Self {
            pos: self.pos - Vec2::splat(margin),
            size: self.size + Vec2::splat(margin * 2.0),
        }
    }
}

/// True iff the open interiors of `a` and `b` intersect on both axes.
///
/// Rectangles that merely share an edge do not collide.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap() {
        let player = Rect::new(100.0, 100.0, 60.0, 60.0);
        let bomb = Rect::new(140.0, 140.0, 80.0, 80.0);
        assert!(overlaps(&player, &bomb));
    }

    #[test]
    fn test_separated() {
        let player = Rect::new(100.0, 100.0, 60.0, 60.0);
        assert!(!overlaps(&player, &Rect::new(300.0, 100.0, 50.0, 50.0)));
        assert!(!overlaps(&player, &Rect::new(100.0, 300.0, 50.0, 50.0)));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let player = Rect::new(100.0, 100.0, 60.0, 60.0);
        // Right edge of player == left edge of gem
        assert!(!overlaps(&player, &Rect::new(160.0, 100.0, 50.0, 50.0)));
        // Bottom edge of player == top edge of gem
        assert!(!overlaps(&player, &Rect::new(100.0, 160.0, 50.0, 50.0)));
    }

    #[test]
    fn test_containment() {
        let outer = Rect::new(0.0, 0.0, 200.0, 200.0);
        let inner = Rect::new(50.0, 50.0, 10.0, 10.0);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    #[test]
    fn test_inflate() {
        let r = Rect::new(100.0, 100.0, 60.0, 60.0).inflate(4.0);
        assert_eq!(r, Rect::new(96.0, 96.0, 68.0, 68.0));
    }

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (
            -500.0f32..2000.0,
            -500.0f32..2000.0,
            0.0f32..300.0,
            0.0f32..300.0,
        )
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn prop_non_empty_rect_overlaps_itself(
            x in -500.0f32..2000.0,
            y in -500.0f32..2000.0,
            side in 1.0f32..300.0,
        ) {
            let r = Rect::new(x, y, side, side);
            prop_assert!(overlaps(&r, &r));
        }
    }
}
