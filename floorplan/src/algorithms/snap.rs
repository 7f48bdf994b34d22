//! Snapping of a dragged corner against the rest of the plan.
//!
//! Every pass runs against a detached copy of the dragged node; the graph
//! itself is only read. Priority is node, then edge, then per-axis alignment
//! with free placement on whichever axis found nothing. `pointer` is always
//! in screen space; `node.delta` holds the screen position the node currently
//! renders at so that repeated moves of the pointer never accumulate error.

use crate::{
    config::Settings,
    geometry::math::{distance, lerp, line_distance, projection_param, round_point},
    model::{CornerNode, EdgeKey, NodeId, Point},
    projection::Projection,
    Graph,
};

/// Per-axis distance to the node an axis snapped to, in model units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisHits {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

/// Runs the whole snap sequence for node `id` and stores the result in the
/// graph. `false` if the node does not exist.
pub fn snap_node<P: Projection + ?Sized>(
    g: &mut Graph,
    id: NodeId,
    pointer: Point,
    extending: bool,
    settings: &Settings,
    proj: &P,
) -> bool {
    let Some(mut node) = g.node(id).cloned() else {
        return false;
    };
    snap_detached(g, &mut node, pointer, extending, settings, proj);
    if let Some(slot) = g.node_mut(id) {
        *slot = node;
    }
    true
}

/// Snap sequence on a node copy; `g` supplies every other node and edge.
pub fn snap_detached<P: Projection + ?Sized>(
    g: &Graph,
    node: &mut CornerNode,
    pointer: Point,
    extending: bool,
    settings: &Settings,
    proj: &P,
) {
    node.snap = Default::default();
    if snap_node_to_node(g, node, pointer, extending, settings, proj) {
        log::trace!("node {} snapped to node {:?}", node.id, node.snap.node_x);
        return;
    }
    if snap_node_to_edge(g, node, pointer, extending, settings, proj) {
        log::trace!("node {} snapped to edge {:?}", node.id, node.snap.edge);
        return;
    }

    let hits = snap_node_to_neighbors(g, node, pointer, extending, settings, proj, true);
    let scale = proj.scale();
    let free = round_point(Point::new(
        node.position.x + (pointer.x - node.delta.x) / scale,
        node.position.y + (pointer.y - node.delta.y) / scale,
    ));
    let free_screen = proj.to_screen(free);
    if hits.x.is_none() {
        node.snap.node_x = None;
        if extending {
            node.delta.x = pointer.x;
        } else {
            node.position.x = free.x;
            node.delta.x = free_screen.x;
        }
    }
    if hits.y.is_none() {
        node.snap.node_y = None;
        if extending {
            node.delta.y = pointer.y;
        } else {
            node.position.y = free.y;
            node.delta.y = free_screen.y;
        }
    }
}

/// Full 2-D snap onto the nearest node within the extend radius. While
/// translating, the node itself is not a candidate.
pub fn snap_node_to_node<P: Projection + ?Sized>(
    g: &Graph,
    node: &mut CornerNode,
    pointer: Point,
    extending: bool,
    settings: &Settings,
    proj: &P,
) -> bool {
    let target = proj.to_model(pointer);
    let mut best: Option<f64> = None;
    for other in g.nodes() {
        if !extending && other.id == node.id {
            continue;
        }
        let d = distance(other.position, target);
        if d < settings.extend_radius && best.map_or(true, |b| d < b) {
            best = Some(d);
            node.delta = proj.to_screen(other.position);
            node.snap.node_x = Some(other.id);
            node.snap.node_y = Some(other.id);
            if !extending {
                node.position = other.position;
            }
        }
    }
    best.is_some()
}

/// Snaps onto the nearest wall whose perpendicular foot lies within the
/// segment, then tries to slide along it to line up with an axis neighbor.
///
/// While translating, walls touching the node are skipped. Zero-length walls
/// are never candidates.
pub fn snap_node_to_edge<P: Projection + ?Sized>(
    g: &Graph,
    node: &mut CornerNode,
    pointer: Point,
    extending: bool,
    settings: &Settings,
    proj: &P,
) -> bool {
    let click = proj.to_model(pointer);
    let mut hit: Option<(EdgeKey, f64)> = None;
    for e in g.edges() {
        if !extending && e.key.contains(node.id) {
            continue;
        }
        let (Some(p1), Some(p2)) = (g.position(e.id1()), g.position(e.id2())) else {
            continue;
        };
        let Some(t) = projection_param(click, p1, p2) else {
            continue;
        };
        if !(0.0..=1.0).contains(&t) {
            continue;
        }
        let d = line_distance(click, p1, p2);
        if d < settings.extend_radius && hit.map_or(true, |(_, b)| d < b) {
            hit = Some((e.key, d));
            let foot = round_point(lerp(p1, p2, t));
            node.snap.edge = Some(e.key);
            node.snap.pos = Some(t);
            node.delta = proj.to_screen(foot);
            if !extending {
                node.position = foot;
            }
        }
    }
    let Some((edge, _)) = hit else {
        return false;
    };
    let (Some(p1), Some(p2)) = (g.position(edge.id1()), g.position(edge.id2())) else {
        return true;
    };

    let axis = snap_node_to_neighbors(g, node, pointer, extending, settings, proj, false);
    let x_first = matches!((axis.x, axis.y), (Some(x), Some(y)) if x <= y);
    let y_first = matches!((axis.x, axis.y), (Some(x), Some(y)) if y < x);
    let (sx, sy) = (node.snap.node_x, node.snap.node_y);
    let on_edge = |id: Option<NodeId>| id.is_some_and(|id| edge.contains(id));

    if let Some(xid) = sx.filter(|&id| !edge.contains(id)) {
        if sy.is_none() || x_first || on_edge(sy) {
            if let Some(other) = g.position(xid) {
                let along = (other.x - p1.x) / (p2.x - p1.x);
                if along > 0.0 && along < 1.0 {
                    slide(node, Point::new(other.x, p1.y + along * (p2.y - p1.y)), along, extending, proj);
                }
            }
            return true;
        }
    }
    if let Some(yid) = sy.filter(|&id| !edge.contains(id)) {
        if sx.is_none() || y_first || on_edge(sx) {
            if let Some(other) = g.position(yid) {
                let along = (other.y - p1.y) / (p2.y - p1.y);
                if along > 0.0 && along < 1.0 {
                    slide(node, Point::new(p1.x + along * (p2.x - p1.x), other.y), along, extending, proj);
                }
            }
            return true;
        }
    }
    node.snap.node_x = None;
    node.snap.node_y = None;
    true
}

fn slide<P: Projection + ?Sized>(node: &mut CornerNode, p: Point, along: f64, extending: bool, proj: &P) {
    let p = round_point(p);
    node.snap.pos = Some(along);
    node.delta = proj.to_screen(p);
    if !extending {
        node.position = p;
    }
}

/// Independent per-axis alignment: each other node may claim the x axis
/// (when its horizontal gap is the smaller one, ties included) or the y axis
/// (strictly smaller vertical gap). Neighbor ids are always recorded; the
/// node and its screen position only move when `change` is set.
pub fn snap_node_to_neighbors<P: Projection + ?Sized>(
    g: &Graph,
    node: &mut CornerNode,
    pointer: Point,
    extending: bool,
    settings: &Settings,
    proj: &P,
    change: bool,
) -> AxisHits {
    let click = proj.to_model(pointer);
    let r = settings.extend_radius;
    let mut hits = AxisHits::default();
    for other in g.nodes() {
        if !extending && other.id == node.id {
            continue;
        }
        let dx = (other.position.x - click.x).abs();
        let dy = (other.position.y - click.y).abs();
        if dx < r && hits.x.map_or(true, |b| dx < b) && dx <= dy {
            hits.x = Some(dx);
            node.snap.node_x = Some(other.id);
            if change {
                node.delta.x = proj.to_screen(other.position).x;
                if !extending {
                    node.position.x = other.position.x;
                }
            }
        } else if dy < r && hits.y.map_or(true, |b| dy < b) && dy < dx {
            hits.y = Some(dy);
            node.snap.node_y = Some(other.id);
            if change {
                node.delta.y = proj.to_screen(other.position).y;
                if !extending {
                    node.position.y = other.position.y;
                }
            }
        }
    }
    hits
}
