// Openables anchored on walls: the arena, host bookkeeping and placement.
//
// Host membership is stored twice (edge.openables and openable.snap.edge);
// every function here updates both sides together.

use crate::geometry::math::{angle, lerp, to_deg};
use crate::model::{EdgeKey, Openable, OpenableId, Orientation, Point};
use crate::Graph;

impl Graph {
    pub fn add_openable(&mut self, width: f64) -> OpenableId {
        let id = self.openables.len() as OpenableId;
        self.openables.push(Some(Openable::new(width)));
        id
    }
    pub fn openable(&self, id: OpenableId) -> Option<&Openable> {
        self.openables.get(id as usize).and_then(|o| o.as_ref())
    }
    pub fn openable_ids(&self) -> Vec<OpenableId> {
        self.openables
            .iter()
            .enumerate()
            .filter_map(|(i, o)| o.as_ref().map(|_| i as OpenableId))
            .collect()
    }
    pub fn openable_count(&self) -> usize {
        self.openables.iter().filter(|o| o.is_some()).count()
    }
    pub(crate) fn openable_mut(&mut self, id: OpenableId) -> Option<&mut Openable> {
        self.openables.get_mut(id as usize).and_then(|o| o.as_mut())
    }
    pub(crate) fn openable_pos(&self, id: OpenableId) -> Option<f64> {
        self.openable(id).and_then(|o| o.snap.pos)
    }

    pub fn remove_openable(&mut self, id: OpenableId) -> bool {
        if self.openable(id).is_none() {
            return false;
        }
        self.detach_openable(id);
        if let Some(slot) = self.openables.get_mut(id as usize) {
            *slot = None;
        }
        true
    }

    /// Anchors the openable on `edge` at `pos` (from `id1`), leaving any
    /// previous host. `false` if either side is missing or `pos` is outside
    /// [0, 1].
    pub fn attach_openable(
        &mut self,
        id: OpenableId,
        edge: EdgeKey,
        pos: f64,
        orientation: Orientation,
    ) -> bool {
        if !(0.0..=1.0).contains(&pos) || self.openable(id).is_none() || !self.has_edge(edge) {
            return false;
        }
        self.detach_openable(id);
        if let Some(e) = self.edge_mut(edge) {
            e.openables.push(id);
        }
        if let Some(o) = self.openable_mut(id) {
            o.snap.edge = Some(edge);
            o.snap.pos = Some(pos);
            o.snap.orientation = Some(orientation);
        }
        self.place_openables(edge);
        true
    }

    /// Leaves the host wall, if any. The openable keeps its last placement.
    pub fn detach_openable(&mut self, id: OpenableId) -> bool {
        let Some(host) = self.openable(id).and_then(|o| o.snap.edge) else {
            return false;
        };
        if let Some(e) = self.edge_mut(host) {
            e.openables.retain(|&o| o != id);
        }
        if let Some(o) = self.openable_mut(id) {
            o.snap.clear();
        }
        true
    }

    /// Recomputes position and angle of every openable on `edge` from the
    /// current endpoint positions.
    pub fn place_openables(&mut self, edge: EdgeKey) {
        let (Some(p1), Some(p2)) = (self.position(edge.id1()), self.position(edge.id2())) else {
            return;
        };
        let Some(ids) = self.edge(edge).map(|e| e.openables.clone()) else {
            return;
        };
        let heading = to_deg(angle(p1, p2));
        for id in ids {
            if let Some(o) = self.openable_mut(id) {
                let (Some(pos), Some(orientation)) = (o.snap.pos, o.snap.orientation) else {
                    continue;
                };
                let mid = lerp(p1, p2, pos);
                o.position = Point::new(mid.x - o.width / 2.0, mid.y);
                o.angle = heading + orientation.index() as f64 * 180.0;
            }
        }
    }

    /// Re-inserts openables persisted outside the graph document, e.g. after a
    /// load. Hosts are resolved by their `(id1, id2)` pair; a snap whose wall
    /// no longer exists, whose position is not in `[0, 1]` or which lacks an
    /// orientation is cleared. Returns the new ids in input order.
    pub fn restore_openables(&mut self, openables: Vec<Openable>) -> Vec<OpenableId> {
        let mut ids = Vec::with_capacity(openables.len());
        for mut o in openables {
            let id = self.openables.len() as OpenableId;
            let anchored = o.snap.pos.is_some_and(|t| (0.0..=1.0).contains(&t))
                && o.snap.orientation.is_some();
            let host = o.snap.edge.filter(|k| anchored && self.has_edge(*k));
            match host {
                Some(key) => {
                    if let Some(e) = self.edge_mut(key) {
                        e.openables.push(id);
                    }
                }
                None => o.snap.clear(),
            }
            self.openables.push(Some(o));
            if let Some(key) = host {
                self.place_openables(key);
            }
            ids.push(id);
        }
        ids
    }

    pub(crate) fn clear_openable_snaps(&mut self, ids: &[OpenableId]) {
        for &id in ids {
            if let Some(o) = self.openable_mut(id) {
                o.snap.clear();
            }
        }
    }

    /// Appends `ids` to `target`'s list. `remap` turns an old position into
    /// the new local one plus whether the orientation must flip.
    pub(crate) fn transfer_openables(
        &mut self,
        ids: Vec<OpenableId>,
        target: EdgeKey,
        remap: impl Fn(f64) -> (f64, bool),
    ) {
        for &id in &ids {
            if let Some(o) = self.openable_mut(id) {
                let (pos, flip) = remap(o.snap.pos.unwrap_or(0.0));
                o.snap.edge = Some(target);
                o.snap.pos = Some(pos);
                if flip {
                    o.snap.orientation = o.snap.orientation.map(Orientation::flipped);
                }
            }
        }
        if let Some(e) = self.edge_mut(target) {
            e.openables.extend(ids);
        }
    }
}
