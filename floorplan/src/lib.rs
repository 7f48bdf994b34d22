pub mod model;
pub mod config;
pub mod controller;
pub mod error;
pub mod projection;
pub mod geometry {
    pub mod intersect;
    pub mod limits;
    pub mod math;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod faces;
    pub mod picking;
    pub mod snap;
}
mod attachments;
mod json;

pub use algorithms::faces::Room;
pub use config::Settings;
pub use controller::Editor;
pub use error::LoadError;
pub use model::{
    CornerNode, Edge, EdgeKey, NodeId, Openable, OpenableId, OpenableSnap, Orientation, Point,
    SnapState,
};
pub use projection::{Projection, ViewProjection};

use std::collections::BTreeMap;

/// Corner nodes, walls between them and the openables anchored on walls.
///
/// Edges live in a two-level map keyed `id1 -> id2 -> Edge` with `id1 < id2`;
/// an outer bucket is dropped as soon as it becomes empty. Ordered maps keep
/// iteration, and therefore face output, deterministic.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    pub(crate) next_id: NodeId,
    pub(crate) nodes: BTreeMap<NodeId, CornerNode>,
    pub(crate) edges: BTreeMap<NodeId, BTreeMap<NodeId, Edge>>,
    pub(crate) openables: Vec<Option<Openable>>, // id is index
}

impl Graph {
    pub fn new() -> Self {
        Graph::default()
    }

    /// Id the next `add_node` call will hand out.
    pub fn next_id(&self) -> NodeId {
        self.next_id
    }

    // Nodes

    /// Panics once every id below `NodeId::MAX` has been handed out; the
    /// loader never accepts `NodeId::MAX` itself.
    pub fn add_node(&mut self, p: Point) -> NodeId {
        let id = self.next_id;
        assert!(id < NodeId::MAX, "node id space exhausted");
        self.next_id = id + 1;
        self.nodes.insert(id, CornerNode::new(id, p));
        log::debug!("new node {}", id);
        id
    }
    pub fn node(&self, id: NodeId) -> Option<&CornerNode> {
        self.nodes.get(&id)
    }
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut CornerNode> {
        self.nodes.get_mut(&id)
    }
    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.nodes.get(&id).map(|n| n.position)
    }
    pub fn move_node(&mut self, id: NodeId, p: Point) -> bool {
        match self.nodes.get_mut(&id) {
            Some(n) => {
                n.position = p;
                true
            }
            None => false,
        }
    }
    pub fn nodes(&self) -> impl Iterator<Item = &CornerNode> {
        self.nodes.values()
    }
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
    /// Removes the node and every edge touching it. `false` if absent.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        if self.nodes.remove(&id).is_none() {
            return false;
        }
        log::debug!("remove node {}", id);
        for key in self.incident_edges(id) {
            self.remove_edge(key.id1(), key.id2());
        }
        true
    }

    // Edges
    /// Returns the edge joining `a` and `b`, creating it if needed.
    /// `None` for `a == b`.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> Option<&mut Edge> {
        let key = EdgeKey::new(a, b)?;
        debug_assert!(
            self.nodes.contains_key(&a) && self.nodes.contains_key(&b),
            "add_edge({a}, {b}) references a missing node"
        );
        let bucket = self.edges.entry(key.id1()).or_default();
        let edge = bucket.entry(key.id2()).or_insert_with(|| {
            log::debug!("new edge ({}, {})", key.id1(), key.id2());
            Edge::new(key)
        });
        Some(edge)
    }
    pub fn edge(&self, key: EdgeKey) -> Option<&Edge> {
        self.edges.get(&key.id1()).and_then(|b| b.get(&key.id2()))
    }
    pub fn edge_mut(&mut self, key: EdgeKey) -> Option<&mut Edge> {
        self.edges.get_mut(&key.id1()).and_then(|b| b.get_mut(&key.id2()))
    }
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<&Edge> {
        EdgeKey::new(a, b).and_then(|k| self.edge(k))
    }
    pub fn has_edge(&self, key: EdgeKey) -> bool {
        self.edge(key).is_some()
    }
    /// All edges in canonical `(id1, id2)` order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values().flat_map(|b| b.values())
    }
    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        self.edges().map(|e| e.key).collect()
    }
    pub fn incident_edges(&self, id: NodeId) -> Vec<EdgeKey> {
        self.edges()
            .filter(|e| e.key.contains(id))
            .map(|e| e.key)
            .collect()
    }
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(|b| b.len()).sum()
    }
    pub fn set_edge_stroke(&mut self, a: NodeId, b: NodeId, stroke: &str) -> bool {
        match EdgeKey::new(a, b).and_then(|k| self.edge_mut(k)) {
            Some(e) => {
                e.stroke = stroke.to_string();
                true
            }
            None => false,
        }
    }
    /// Deletes the edge, clearing the snap of every openable it carried.
    pub fn remove_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        let Some(key) = EdgeKey::new(a, b) else {
            return false;
        };
        let Some(bucket) = self.edges.get_mut(&key.id1()) else {
            return false;
        };
        let removed = bucket.remove(&key.id2());
        if bucket.is_empty() {
            self.edges.remove(&key.id1());
        }
        match removed {
            Some(edge) => {
                self.clear_openable_snaps(&edge.openables);
                true
            }
            None => false,
        }
    }

    /// Folds `from` into `to`: every wall of `from` is re-attached to `to`
    /// (reusing an existing wall where one is already there), openables
    /// travel along, then `from` is removed. A wall between the two is dropped.
    pub fn merge_nodes(&mut self, from: NodeId, to: NodeId) {
        log::debug!("merge node {} into {}", from, to);
        for key in self.incident_edges(from) {
            let Some(other) = key.other(from) else {
                continue;
            };
            if other == to {
                continue;
            }
            let from_first = key.id1() == from;
            let carried = match self.edge_mut(key) {
                Some(e) => std::mem::take(&mut e.openables),
                None => continue,
            };
            let new_key = match self.add_edge(to, other) {
                Some(e) => e.key,
                None => continue,
            };
            // positions are measured from id1; re-anchor when `to` sits on the other side
            let flip = from_first != (new_key.id1() == to);
            self.transfer_openables(carried, new_key, |pos| {
                if flip {
                    (1.0 - pos, true)
                } else {
                    (pos, false)
                }
            });
        }
        self.remove_node(from);
    }

    /// Splits `edge` at parameter `pos` (from `id1` toward `id2`) by routing
    /// it through `new_id`. Openables land on whichever half contains them.
    ///
    /// Panics if `edge` is not in the graph or `new_id` is missing or one of
    /// its endpoints.
    pub fn bisect(&mut self, new_id: NodeId, edge: EdgeKey, pos: f64) {
        assert!(
            self.nodes.contains_key(&new_id),
            "bisect: node {new_id} is not in the graph"
        );
        assert!(
            self.has_edge(edge),
            "bisect: edge ({}, {}) is not in the graph",
            edge.id1(),
            edge.id2()
        );
        let (Some(first), Some(second)) =
            (EdgeKey::new(new_id, edge.id1()), EdgeKey::new(new_id, edge.id2()))
        else {
            panic!(
                "bisect: node {new_id} is an endpoint of ({}, {})",
                edge.id1(),
                edge.id2()
            );
        };
        debug_assert!((0.0..=1.0).contains(&pos), "bisect: pos {pos} outside [0, 1]");
        log::debug!("bisect ({}, {}) by {} at {:.3}", edge.id1(), edge.id2(), new_id, pos);

        self.add_edge(new_id, edge.id1());
        self.add_edge(new_id, edge.id2());

        let carried = match self.edge_mut(edge) {
            Some(e) => std::mem::take(&mut e.openables),
            None => Vec::new(),
        };
        let (on_first, on_second): (Vec<OpenableId>, Vec<OpenableId>) = carried
            .into_iter()
            .partition(|oid| self.openable_pos(*oid).unwrap_or(0.0) <= pos);

        // first half runs id1 -> new_id, second half new_id -> id2
        let flip_first = first.id2() != new_id;
        let flip_second = second.id1() != new_id;
        self.transfer_openables(on_first, first, |p| {
            let local = if pos > 0.0 { p / pos } else { 0.0 };
            if flip_first {
                (1.0 - local, true)
            } else {
                (local, false)
            }
        });
        self.transfer_openables(on_second, second, |p| {
            let local = if pos < 1.0 { (p - pos) / (1.0 - pos) } else { 1.0 };
            if flip_second {
                (1.0 - local, true)
            } else {
                (local, false)
            }
        });

        self.remove_edge(edge.id1(), edge.id2());
    }

    /// Drops all nodes, edges and openables and restarts ids at zero.
    pub fn clear(&mut self) {
        self.next_id = 0;
        self.nodes.clear();
        self.edges.clear();
        self.openables.clear();
    }

    // Faces
    pub fn faces(&self) -> Vec<Vec<NodeId>> {
        algorithms::faces::faces(self)
    }
    pub fn rooms(&self) -> Vec<Room> {
        algorithms::faces::rooms(self)
    }

    // Picking
    pub fn closest_node(&self, p: Point) -> Option<NodeId> {
        algorithms::picking::closest_node(self, p)
    }
    pub fn next_edge_to_segment(&self, center: Point, p: Point) -> Option<Point> {
        algorithms::picking::next_edge_to_segment(self, center, p)
    }

    // JSON
    pub fn to_json_value(&self) -> serde_json::Value {
        json::to_json_impl(self)
    }
    pub fn to_json_string(&self) -> String {
        self.to_json_value().to_string()
    }
    /// Strictly validates and builds a graph; nothing is kept on error.
    pub fn from_json_value(v: serde_json::Value) -> Result<Graph, LoadError> {
        json::from_json_impl(v).inspect_err(|e| log::warn!("rejected floor plan: {}", e))
    }
    pub fn from_json_str(s: &str) -> Result<Graph, LoadError> {
        json::from_json_str_impl(s).inspect_err(|e| log::warn!("rejected floor plan: {}", e))
    }
}
