use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;
mod logger;

pub use logger::init_logging;

/// Browser handle on one floor plan: the graph, the editor settings and the
/// current view.
#[wasm_bindgen]
pub struct Floorplan {
    pub(crate) inner: floorplan::Editor,
}

impl Floorplan {
    pub fn rs_new() -> Floorplan {
        Floorplan { inner: floorplan::Editor::default() }
    }
    pub fn rs_graph(&self) -> &floorplan::Graph {
        self.inner.graph()
    }
}
