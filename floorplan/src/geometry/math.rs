use super::tolerance::{near_zero, round_to_step, EPS_LEN};
use crate::model::Point;

#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x; let dy = b.y - a.y;
    (dx*dx + dy*dy).sqrt()
}

/// Parameter of the orthogonal projection of `p` onto the infinite line
/// through `a` and `b`. Not clamped; `None` for a zero-length line.
pub fn projection_param(p: Point, a: Point, b: Point) -> Option<f64> {
    let vx = b.x - a.x; let vy = b.y - a.y;
    let vv = vx*vx + vy*vy;
    if near_zero(vv, EPS_LEN * EPS_LEN) { return None; }
    Some((vx * (p.x - a.x) + vy * (p.y - a.y)) / vv)
}

/// Distance from `p` to the infinite line through `a` and `b`.
pub fn line_distance(p: Point, a: Point, b: Point) -> f64 {
    let len = distance(a, b);
    if near_zero(len, EPS_LEN) { return distance(p, a); }
    ((b.x - a.x) * (a.y - p.y) - (a.x - p.x) * (b.y - a.y)).abs() / len
}

#[inline]
pub fn lerp(a: Point, b: Point, t: f64) -> Point {
    Point::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y))
}

/// Angle of the vector `from -> to` in radians, `atan2` convention.
#[inline]
pub fn angle(from: Point, to: Point) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

#[inline]
pub fn to_deg(rad: f64) -> f64 { rad.to_degrees() }

/// Rounds both coordinates to the committed grid.
#[inline]
pub fn round_point(p: Point) -> Point {
    Point::new(round_to_step(p.x), round_to_step(p.y))
}

/// Twice the signed area of the trapezoid under `a -> b`; summing over a
/// closed ring gives twice the polygon's signed area.
#[inline]
pub fn cross(a: Point, b: Point) -> f64 {
    a.x * b.y - b.x * a.y
}
