//! Face extraction over the wall graph.
//!
//! Every undirected wall contributes two half-edges. At each corner the
//! outgoing half-edges are sorted by `atan2` angle; arriving at a corner from
//! neighbor `n`, a trace continues along the neighbor that precedes `n` in
//! that circular order. Following `next` from any unused half-edge until it
//! closes yields one face, so every half-edge lands in exactly one face,
//! including the unbounded outer boundary of each component (negative area).

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::{
    geometry::{
        math::{angle, cross},
        tolerance::MM2_PER_M2,
    },
    model::{NodeId, Point},
    Graph,
};

/// A closed face with positive area, i.e. a room.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Room {
    /// Closed node sequence: the first id is repeated at the end.
    pub nodes: Vec<NodeId>,
    pub points: Vec<Point>,
    /// mm².
    pub area: f64,
    pub centroid: Point,
}

impl Room {
    pub fn area_m2(&self) -> f64 {
        self.area / MM2_PER_M2
    }
}

/// Half-edges with their successor in face order, indexed by arena position.
struct HalfEdges {
    ends: Vec<(NodeId, NodeId)>,
    next: Vec<usize>,
}

fn build_half_edges(g: &Graph) -> HalfEdges {
    let mut ends: Vec<(NodeId, NodeId)> = Vec::new();
    let mut fan: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
    for e in g.edges() {
        ends.push((e.id1(), e.id2()));
        ends.push((e.id2(), e.id1()));
        fan.entry(e.id1()).or_default().push(e.id2());
        fan.entry(e.id2()).or_default().push(e.id1());
    }
    let index: HashMap<(NodeId, NodeId), usize> =
        ends.iter().enumerate().map(|(i, &he)| (he, i)).collect();

    // (corner, arrived from) -> leave toward
    let mut turn: HashMap<(NodeId, NodeId), NodeId> = HashMap::new();
    for (&id, around) in fan.iter() {
        let Some(center) = g.position(id) else {
            continue;
        };
        let mut sorted: Vec<(f64, NodeId)> = around
            .iter()
            .map(|&n| (g.position(n).map_or(0.0, |p| angle(center, p)), n))
            .collect();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
        let k = sorted.len();
        for i in 0..k {
            let prev = sorted[(i + k - 1) % k].1;
            turn.insert((id, sorted[i].1), prev);
        }
    }

    let next = ends
        .iter()
        .enumerate()
        .map(|(i, &(from, at))| {
            turn.get(&(at, from))
                .and_then(|&to| index.get(&(at, to)).copied())
                .unwrap_or(i)
        })
        .collect();
    HalfEdges { ends, next }
}

/// All faces as closed node sequences (first id repeated at the end),
/// the outer boundaries included.
pub fn faces(g: &Graph) -> Vec<Vec<NodeId>> {
    let he = build_half_edges(g);
    let mut used = vec![false; he.ends.len()];
    let mut out = Vec::new();
    let mut start = 0;
    loop {
        while start < used.len() && used[start] {
            start += 1;
        }
        if start == used.len() {
            break;
        }
        let mut face = vec![he.ends[start].0];
        let mut h = start;
        while !used[h] {
            used[h] = true;
            face.push(he.ends[h].1);
            h = he.next[h];
        }
        out.push(face);
    }
    out
}

/// Signed area of a closed ring (first point repeated at the end); positive
/// for rooms in the editor's y-down frame.
pub fn polygon_area(ring: &[Point]) -> f64 {
    ring.windows(2).map(|w| cross(w[0], w[1])).sum::<f64>() * 0.5
}

/// Centroid of a closed ring; the ring's own first point when degenerate.
pub fn polygon_centroid(ring: &[Point]) -> Point {
    let mut cx = 0.0;
    let mut cy = 0.0;
    let mut a = 0.0;
    for w in ring.windows(2) {
        let c = cross(w[0], w[1]);
        a += c;
        cx += (w[0].x + w[1].x) * c;
        cy += (w[0].y + w[1].y) * c;
    }
    let a = a * 0.5;
    if a == 0.0 {
        return ring.first().copied().unwrap_or_default();
    }
    Point::new(cx / (6.0 * a), cy / (6.0 * a))
}

/// Faces with positive area, with their area and centroid.
pub fn rooms(g: &Graph) -> Vec<Room> {
    let mut out = Vec::new();
    for nodes in faces(g) {
        if nodes.len() < 2 {
            continue;
        }
        let points: Vec<Point> = nodes.iter().filter_map(|&id| g.position(id)).collect();
        let area = polygon_area(&points);
        if area <= 0.0 {
            continue;
        }
        let centroid = polygon_centroid(&points);
        out.push(Room {
            nodes,
            points,
            area,
            centroid,
        });
    }
    out
}
