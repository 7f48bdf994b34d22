//! Press / drag / release handling on top of the graph.
//!
//! The editor only keeps per-node transient state (`translating`,
//! `extending`, `delta`, `snap`); nothing is committed to the topology until
//! release.

use crate::{
    algorithms::{
        faces::{self, Room},
        picking::{self, Grab},
        snap,
    },
    config::Settings,
    error::LoadError,
    geometry::math::round_point,
    model::{NodeId, Point},
    projection::{Projection, ViewProjection},
    Graph,
};

#[derive(Clone, Debug, Default)]
pub struct Editor<P: Projection = ViewProjection> {
    graph: Graph,
    settings: Settings,
    projection: P,
}

impl<P: Projection> Editor<P> {
    pub fn new(projection: P) -> Self {
        Editor {
            graph: Graph::new(),
            settings: Settings::default(),
            projection,
        }
    }

    pub fn with_settings(projection: P, settings: Settings) -> Self {
        Editor {
            graph: Graph::new(),
            settings,
            projection,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }
    pub fn projection(&self) -> &P {
        &self.projection
    }
    pub fn projection_mut(&mut self) -> &mut P {
        &mut self.projection
    }

    /// Nodes currently being translated or extended.
    pub fn active_nodes(&self) -> Vec<NodeId> {
        self.graph
            .nodes()
            .filter(|n| n.translating || n.extending)
            .map(|n| n.id)
            .collect()
    }

    /// Grabs the corner under `screen`, if any. The inner radius moves it,
    /// the outer ring starts a new wall from it.
    pub fn press(&mut self, screen: Point) -> bool {
        let at = self.projection.to_model(screen);
        let Some((id, grab)) = picking::grab_at(&self.graph, at, &self.settings) else {
            return false;
        };
        let Some(n) = self.graph.node_mut(id) else {
            return false;
        };
        match grab {
            Grab::Translate => n.translating = true,
            Grab::Extend => n.extending = true,
        }
        n.delta = screen;
        log::debug!("press on node {} ({:?})", id, grab);
        true
    }

    /// Pointer moved to `screen`; `over_delete` marks the pointer as hovering
    /// the delete target. Returns whether any node is being dragged.
    pub fn drag(&mut self, screen: Point, over_delete: bool) -> bool {
        let mut active = false;
        for id in self.graph.node_ids() {
            let Some(n) = self.graph.node(id) else {
                continue;
            };
            let (translating, extending) = (n.translating, n.extending);
            if !translating && !extending {
                continue;
            }
            active = true;
            snap::snap_node(
                &mut self.graph,
                id,
                screen,
                !translating,
                &self.settings,
                &self.projection,
            );
            if translating {
                for key in self.graph.incident_edges(id) {
                    self.graph.place_openables(key);
                }
            }
            if let Some(n) = self.graph.node_mut(id) {
                n.pending_remove = over_delete;
            }
        }
        active
    }

    /// Commits every active drag: deletes, merges, bisects or extends, then
    /// clears the transient state.
    pub fn release(&mut self, screen: Point) {
        for id in self.graph.node_ids() {
            // an earlier merge may already have consumed this node
            let Some(n) = self.graph.node(id) else {
                continue;
            };
            let (translating, extending, pending, snap, delta) =
                (n.translating, n.extending, n.pending_remove, n.snap, n.delta);

            if translating && pending {
                self.graph.remove_node(id);
                continue;
            }
            if translating {
                if let Some(target) = snap.full_node().filter(|&t| t != id) {
                    self.graph.merge_nodes(id, target);
                    continue;
                }
                if let (Some(edge), Some(pos)) = (snap.edge, snap.pos) {
                    if self.graph.has_edge(edge) {
                        self.graph.bisect(id, edge, pos);
                    }
                }
            } else if extending && !pending {
                match snap.full_node() {
                    Some(target) => {
                        if target != id {
                            self.graph.add_edge(id, target);
                        }
                    }
                    None => {
                        let free = snap.edge.is_none();
                        let x = if free && snap.node_x.is_none() { screen.x } else { delta.x };
                        let y = if free && snap.node_y.is_none() { screen.y } else { delta.y };
                        let p = round_point(self.projection.to_model(Point::new(x, y)));
                        let new_id = self.graph.add_node(p);
                        self.graph.add_edge(id, new_id);
                        if let (Some(edge), Some(pos)) = (snap.edge, snap.pos) {
                            if self.graph.has_edge(edge) {
                                self.graph.bisect(new_id, edge, pos);
                            }
                        }
                    }
                }
            }
            if let Some(n) = self.graph.node_mut(id) {
                n.reset_interaction();
            }
        }
    }

    pub fn faces(&self) -> Vec<Vec<NodeId>> {
        faces::faces(&self.graph)
    }
    pub fn rooms(&self) -> Vec<Room> {
        faces::rooms(&self.graph)
    }

    pub fn to_json(&self) -> String {
        self.graph.to_json_string()
    }
    /// Replaces the graph with the parsed document; on error the current
    /// graph is kept untouched.
    pub fn load_json(&mut self, s: &str) -> Result<(), LoadError> {
        self.graph = Graph::from_json_str(s)?;
        Ok(())
    }
}
