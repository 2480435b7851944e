//! Collision tests between circles (projectiles) and axis-aligned rectangles
//! (the player and enemies).
//!
//! All functions are pure.

/// Axis-aligned rectangle, anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Circle described by its center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// Two projectiles closer than this (edge to edge) are considered touching.
pub const TOUCH_EPSILON: f64 = 1.0;

/// Returns true if the rectangle and circle overlap.
///
/// Edges count as overlapping; there is no tolerance.
pub fn rect_circle_colliding(circle: &Circle, rect: &Rect) -> bool {
    let half_w = rect.width / 2.0;
    let half_h = rect.height / 2.0;
    let dist_x = (circle.x - rect.x - half_w).abs();
    let dist_y = (circle.y - rect.y - half_h).abs();

    if dist_x > half_w + circle.radius {
        return false;
    }
    if dist_y > half_h + circle.radius {
        return false;
    }

    if dist_x <= half_w {
        return true;
    }
    if dist_y <= half_h {
        return true;
    }

    // Corner region
    let dx = dist_x - half_w;
    let dy = dist_y - half_h;
    dx * dx + dy * dy <= circle.radius * circle.radius
}

/// Near-touch test between two circles, using [`TOUCH_EPSILON`].
pub fn circles_touching(a: &Circle, b: &Circle) -> bool {
    let dist = (a.x - b.x).hypot(a.y - b.y);
    dist - a.radius - b.radius < TOUCH_EPSILON
}
