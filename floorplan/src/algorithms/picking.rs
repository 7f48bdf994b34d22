use crate::config::Settings;
use crate::geometry::intersect::intersection_point;
use crate::geometry::math::distance;
use crate::model::{NodeId, Point};
use crate::Graph;

/// What a press on a corner grabs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grab {
    /// Inside the inner handle: move the corner.
    Translate,
    /// Inside the outer ring: drag a new wall out of the corner.
    Extend,
}

/// Strictly nearest node to `p` (model space); first found wins ties.
pub fn closest_node(g: &Graph, p: Point) -> Option<NodeId> {
    let mut best: Option<(NodeId, f64)> = None;
    for n in g.nodes() {
        let d = distance(p, n.position);
        if best.map_or(true, |(_, bd)| d < bd) { best = Some((n.id, d)); }
    }
    best.map(|(id, _)| id)
}

/// Hit-tests a press at model position `p` against the closest corner.
pub fn grab_at(g: &Graph, p: Point, settings: &Settings) -> Option<(NodeId, Grab)> {
    let id = closest_node(g, p)?;
    let d = distance(g.position(id)?, p);
    if d <= settings.translate_radius {
        Some((id, Grab::Translate))
    } else if d <= settings.extend_radius {
        Some((id, Grab::Extend))
    } else {
        None
    }
}

/// Among all walls crossed by the segment `center -> p`, the crossing
/// nearest to `p`.
pub fn next_edge_to_segment(g: &Graph, center: Point, p: Point) -> Option<Point> {
    let mut best: Option<(Point, f64)> = None;
    for e in g.edges() {
        let (Some(a), Some(b)) = (g.position(e.id1()), g.position(e.id2())) else { continue };
        if let Some(hit) = intersection_point(center, p, a, b) {
            let d = distance(hit, p);
            if best.map_or(true, |(_, bd)| d < bd) { best = Some((hit, d)); }
        }
    }
    best.map(|(hit, _)| hit)
}
