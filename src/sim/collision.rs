//! Circle and rectangle intersection tests
//!
//! Touching shapes count as colliding. All tests are pure functions over
//! screen-space coordinates (y grows downward).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, `pos` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Rectangle of `size` centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
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

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Point of the rectangle closest to `point`
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.pos, self.pos + self.size)
    }
}

/// Check whether two circles overlap or touch
#[inline]
pub fn circles_collide(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a.distance_squared(b) <= reach * reach
}

/// Check whether a circle overlaps or touches a rectangle
pub fn circle_rect_collide(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = rect.closest_point(center);
    center.distance_squared(closest) <= radius * radius
}

/// Check whether a circle lies strictly beyond the left or right edge of `[0, width]`
///
/// A circle whose edge sits exactly on the boundary is still on screen.
#[inline]
pub fn circle_off_horizontal(center: Vec2, radius: f32, width: f32) -> bool {
    center.x + radius < 0.0 || center.x - radius > width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circles_collide() {
        assert!(circles_collide(Vec2::ZERO, 5.0, Vec2::new(8.0, 0.0), 5.0));
        // Exactly touching
        assert!(circles_collide(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
        assert!(!circles_collide(Vec2::ZERO, 5.0, Vec2::new(10.1, 0.0), 5.0));
    }

    #[test]
    fn test_circle_rect_sides_and_corners() {
        let rect = Rect::new(100.0, 100.0, 50.0, 20.0);

        // Center inside
        assert!(circle_rect_collide(Vec2::new(120.0, 110.0), 1.0, &rect));
        // Touching the left side
        assert!(circle_rect_collide(Vec2::new(90.0, 110.0), 10.0, &rect));
        assert!(!circle_rect_collide(Vec2::new(89.0, 110.0), 10.0, &rect));
        // Near the top-right corner: distance to corner is 5*sqrt(2) ~ 7.07
        assert!(circle_rect_collide(Vec2::new(155.0, 95.0), 7.1, &rect));
        assert!(!circle_rect_collide(Vec2::new(155.0, 95.0), 7.0, &rect));
    }

    #[test]
    fn test_rect_helpers() {
        let rect = Rect::centered(Vec2::new(50.0, 50.0), Vec2::new(40.0, 20.0));
        assert_eq!(rect.left(), 30.0);
        assert_eq!(rect.right(), 70.0);
        assert_eq!(rect.top(), 40.0);
        assert_eq!(rect.bottom(), 60.0);
        assert_eq!(rect.center(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_off_horizontal_boundary_is_inclusive() {
        let width = 1600.0;
        let radius = 10.0;
        // x + r == 0 is still on screen
        assert!(!circle_off_horizontal(Vec2::new(-10.0, 0.0), radius, width));
        assert!(circle_off_horizontal(Vec2::new(-10.01, 0.0), radius, width));
        // x - r == width is still on screen
        assert!(!circle_off_horizontal(Vec2::new(1610.0, 0.0), radius, width));
        assert!(circle_off_horizontal(Vec2::new(1610.01, 0.0), radius, width));
    }
}
