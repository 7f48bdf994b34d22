// Segment-segment intersection with tolerances.
// Classifies proper crossings, endpoint touches and collinear (no single point) cases.

use super::tolerance::{EPS_DENOM, EPS_POS};
use crate::model::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegIntersection {
    None,
    // Proper interior intersection (not at endpoints within tolerance)
    Proper { t: f64, u: f64, p: Point },
    // Touch at endpoints; t/u clamped to [0,1]
    Touch { t: f64, u: f64, p: Point },
    // Collinear segments: no unique crossing point
    Collinear,
}

impl SegIntersection {
    pub fn point(&self) -> Option<Point> {
        match *self {
            SegIntersection::Proper { p, .. } | SegIntersection::Touch { p, .. } => Some(p),
            _ => None,
        }
    }
}

#[inline]
fn orient(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

#[inline]
fn within_eps(x: f64, eps: f64) -> bool { x.abs() <= eps }

#[inline]
fn clamp01(x: f64) -> f64 { x.clamp(0.0, 1.0) }

pub fn intersect_segments(a: Point, b: Point, c: Point, d: Point) -> SegIntersection {
    let eps = EPS_POS;
    let o1 = orient(a, b, c);
    let o2 = orient(a, b, d);
    let o3 = orient(c, d, a);
    let o4 = orient(c, d, b);

    if within_eps(o1, eps) && within_eps(o2, eps) && within_eps(o3, eps) && within_eps(o4, eps) {
        return SegIntersection::Collinear;
    }

    // o1/o2 straddle AB and o3/o4 straddle CD (zero counts as touching)
    let inter1 = (o1 > 0.0 && o2 < 0.0) || (o1 < 0.0 && o2 > 0.0) || within_eps(o1, eps) || within_eps(o2, eps);
    let inter2 = (o3 > 0.0 && o4 < 0.0) || (o3 < 0.0 && o4 > 0.0) || within_eps(o3, eps) || within_eps(o4, eps);
    if !(inter1 && inter2) {
        return SegIntersection::None;
    }

    let r = b - a;
    let s = d - c;
    let rxs = r.x * s.y - r.y * s.x;
    if within_eps(rxs, EPS_DENOM) {
        return SegIntersection::None;
    }
    let qp = c - a;
    let t = (qp.x * s.y - qp.y * s.x) / rxs;
    let u = (qp.x * r.y - qp.y * r.x) / rxs;
    let p = Point::new(a.x + t * r.x, a.y + t * r.y);

    let is_touch = within_eps(t, eps) || within_eps(1.0 - t, eps) || within_eps(u, eps) || within_eps(1.0 - u, eps);
    if is_touch {
        SegIntersection::Touch { t: clamp01(t), u: clamp01(u), p }
    } else if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        SegIntersection::Proper { t, u, p }
    } else {
        SegIntersection::None
    }
}

/// The crossing point of segments `a-b` and `c-d`, if they meet in a single point.
#[inline]
pub fn intersection_point(a: Point, b: Point, c: Point, d: Point) -> Option<Point> {
    intersect_segments(a, b, c, d).point()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Point { Point::new(x, y) }

    #[test]
    fn proper_cross() {
        let r = intersect_segments(pt(0.0, 0.0), pt(2.0, 2.0), pt(0.0, 2.0), pt(2.0, 0.0));
        match r {
            SegIntersection::Proper { t, u, p } => {
                assert!((t - 0.5).abs() < 1e-9 && (u - 0.5).abs() < 1e-9);
                assert!((p.x - 1.0).abs() < 1e-9 && (p.y - 1.0).abs() < 1e-9);
            }
            _ => panic!("expected proper"),
        }
    }

    #[test]
    fn endpoint_touch() {
        let r = intersect_segments(pt(0.0, 0.0), pt(1.0, 0.0), pt(1.0, 0.0), pt(1.0, 1.0));
        match r {
            SegIntersection::Touch { t, u, p } => {
                assert!((p.x - 1.0).abs() < 1e-9 && p.y.abs() < 1e-9);
                assert!((t - 1.0).abs() < 1e-6);
                assert!(u.abs() < 1e-6);
            }
            _ => panic!("expected touch"),
        }
    }

    #[test]
    fn disjoint_and_collinear() {
        assert_eq!(intersection_point(pt(0.0, 0.0), pt(1.0, 0.0), pt(0.0, 1.0), pt(1.0, 1.0)), None);
        assert_eq!(
            intersect_segments(pt(0.0, 0.0), pt(3.0, 0.0), pt(1.0, 0.0), pt(2.0, 0.0)),
            SegIntersection::Collinear
        );
    }
}
