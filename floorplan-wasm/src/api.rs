use crate::Floorplan;
use floorplan::geometry::limits::{in_coord_bounds, COORD_MAX, COORD_MIN};
use floorplan::{EdgeKey, Orientation, Point};
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;
use crate::error;
use crate::interop;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn check_coord(param: &str, v: f64) -> Result<(), JsValue> {
    if !v.is_finite() {
        return Err(error::non_finite(param));
    }
    if !in_coord_bounds(v) {
        return Err(error::out_of_range(param, COORD_MIN, COORD_MAX, v));
    }
    Ok(())
}

fn check_finite(param: &str, v: f64) -> Result<(), JsValue> {
    if v.is_finite() { Ok(()) } else { Err(error::non_finite(param)) }
}

fn check_width(v: f64) -> Result<(), JsValue> {
    check_finite("width", v)?;
    if v <= 0.0 || v > COORD_MAX {
        return Err(error::out_of_range("width", 0.0, COORD_MAX, v));
    }
    Ok(())
}

#[wasm_bindgen]
impl Floorplan {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Floorplan {
        crate::Floorplan::rs_new()
    }

    // Settings
    pub fn translate_radius(&self) -> f64 {
        self.inner.settings().translate_radius
    }
    pub fn extend_radius(&self) -> f64 {
        self.inner.settings().extend_radius
    }
    pub fn set_translate_radius(&mut self, r: f64) -> bool {
        self.inner.settings_mut().set_translate_radius(r)
    }
    pub fn set_extend_radius(&mut self, r: f64) -> bool {
        self.inner.settings_mut().set_extend_radius(r)
    }
    pub fn set_translate_radius_res(&mut self, r: f64) -> JsValue {
        if !r.is_finite() {
            return error::non_finite("r");
        }
        if r <= 0.0 {
            return error::out_of_range("r", 0.0, f64::INFINITY, r);
        }
        self.inner.settings_mut().set_translate_radius(r);
        error::ok(JsValue::from_f64(self.inner.settings().extend_radius))
    }
    pub fn set_extend_radius_res(&mut self, r: f64) -> JsValue {
        if !r.is_finite() {
            return error::non_finite("r");
        }
        if r <= 0.0 {
            return error::out_of_range("r", 0.0, f64::INFINITY, r);
        }
        self.inner.settings_mut().set_extend_radius(r);
        error::ok(JsValue::from_f64(self.inner.settings().translate_radius))
    }

    // View
    pub fn set_view_res(&mut self, offset_x: f64, offset_y: f64, scale: f64) -> JsValue {
        let r = check_finite("offset_x", offset_x)
            .and_then(|_| check_finite("offset_y", offset_y))
            .and_then(|_| check_finite("scale", scale));
        if let Err(e) = r {
            return e;
        }
        if scale <= 0.0 {
            return error::out_of_range("scale", 0.0, f64::INFINITY, scale);
        }
        let view = self.inner.projection_mut();
        view.offset = Point::new(offset_x, offset_y);
        view.scale = scale;
        error::ok(JsValue::TRUE)
    }
    pub fn pan(&mut self, dx: f64, dy: f64) {
        if dx.is_finite() && dy.is_finite() {
            self.inner.projection_mut().pan(dx, dy);
        }
    }
    pub fn zoom_at(&mut self, x: f64, y: f64, factor: f64) {
        if x.is_finite() && y.is_finite() {
            self.inner.projection_mut().zoom_at(Point::new(x, y), factor);
        }
    }
    /// `[offset_x, offset_y, scale]`.
    pub fn view(&self) -> Vec<f64> {
        let v = self.inner.projection();
        vec![v.offset.x, v.offset.y, v.scale]
    }

    // Nodes
    pub fn add_node(&mut self, x: f64, y: f64) -> u32 {
        self.inner.graph_mut().add_node(Point::new(x, y))
    }
    pub fn add_node_res(&mut self, x: f64, y: f64) -> JsValue {
        if let Err(e) = check_coord("x", x).and_then(|_| check_coord("y", y)) {
            return e;
        }
        error::ok(JsValue::from_f64(self.add_node(x, y) as f64))
    }
    pub fn move_node(&mut self, id: u32, x: f64, y: f64) -> bool {
        self.inner.graph_mut().move_node(id, Point::new(x, y))
    }
    pub fn move_node_res(&mut self, id: u32, x: f64, y: f64) -> JsValue {
        if let Err(e) = check_coord("x", x).and_then(|_| check_coord("y", y)) {
            return e;
        }
        if self.rs_graph().node(id).is_none() {
            return error::invalid_id("node", id);
        }
        let ok = self.move_node(id, x, y);
        error::ok(JsValue::from_bool(ok))
    }
    pub fn get_node(&self, id: u32) -> JsValue {
        match self.rs_graph().position(id) {
            Some(p) => interop::to_js(&[p.x, p.y]),
            None => JsValue::NULL,
        }
    }
    pub fn get_node_res(&self, id: u32) -> JsValue {
        match self.rs_graph().position(id) {
            Some(p) => error::ok(interop::to_js(&[p.x, p.y])),
            None => error::invalid_id("node", id),
        }
    }
    pub fn remove_node(&mut self, id: u32) -> bool {
        self.inner.graph_mut().remove_node(id)
    }
    pub fn remove_node_res(&mut self, id: u32) -> JsValue {
        if self.rs_graph().node(id).is_none() {
            return error::invalid_id("node", id);
        }
        error::ok(JsValue::from_bool(self.remove_node(id)))
    }
    pub fn node_count(&self) -> u32 {
        self.rs_graph().node_count() as u32
    }
    pub fn closest_node(&self, x: f64, y: f64) -> Option<u32> {
        self.rs_graph().closest_node(Point::new(x, y))
    }

    // Edges
    pub fn add_edge(&mut self, a: u32, b: u32) -> bool {
        let g = self.inner.graph_mut();
        if g.node(a).is_none() || g.node(b).is_none() {
            return false;
        }
        g.add_edge(a, b).is_some()
    }
    pub fn add_edge_res(&mut self, a: u32, b: u32) -> JsValue {
        if self.rs_graph().node(a).is_none() {
            return error::invalid_id("node", a);
        }
        if self.rs_graph().node(b).is_none() {
            return error::invalid_id("node", b);
        }
        if a == b {
            return error::invalid_edge(a, b, "edge endpoints cannot be the same node");
        }
        error::ok(JsValue::from_bool(self.add_edge(a, b)))
    }
    pub fn remove_edge(&mut self, a: u32, b: u32) -> bool {
        self.inner.graph_mut().remove_edge(a, b)
    }
    pub fn remove_edge_res(&mut self, a: u32, b: u32) -> JsValue {
        if self.rs_graph().edge_between(a, b).is_none() {
            return error::invalid_edge(a, b, "no such edge");
        }
        error::ok(JsValue::from_bool(self.remove_edge(a, b)))
    }
    pub fn edge_count(&self) -> u32 {
        self.rs_graph().edge_count() as u32
    }
    pub fn set_edge_stroke(&mut self, a: u32, b: u32, stroke: &str) -> bool {
        self.inner.graph_mut().set_edge_stroke(a, b, stroke)
    }
    pub fn set_edge_stroke_res(&mut self, a: u32, b: u32, stroke: &str) -> JsValue {
        if self.rs_graph().edge_between(a, b).is_none() {
            return error::invalid_edge(a, b, "no such edge");
        }
        let max = floorplan::geometry::limits::STROKE_MAX_LEN;
        if stroke.is_empty() || stroke.len() > max {
            return error::out_of_range("stroke", 1.0, max as f64, stroke.len() as f64);
        }
        error::ok(JsValue::from_bool(self.set_edge_stroke(a, b, stroke)))
    }
    pub fn merge_nodes_res(&mut self, from: u32, to: u32) -> JsValue {
        if self.rs_graph().node(from).is_none() {
            return error::invalid_id("node", from);
        }
        if self.rs_graph().node(to).is_none() {
            return error::invalid_id("node", to);
        }
        if from == to {
            return error::err("invalid_merge", "cannot merge a node into itself", None);
        }
        self.inner.graph_mut().merge_nodes(from, to);
        error::ok(JsValue::TRUE)
    }
    /// Routes wall `a`-`b` through `node` at `pos`, measured from the smaller
    /// endpoint id.
    pub fn bisect_res(&mut self, node: u32, a: u32, b: u32, pos: f64) -> JsValue {
        if self.rs_graph().node(node).is_none() {
            return error::invalid_id("node", node);
        }
        let Some(key) = EdgeKey::new(a, b).filter(|k| self.rs_graph().has_edge(*k)) else {
            return error::invalid_edge(a, b, "no such edge");
        };
        if key.contains(node) {
            return error::invalid_edge(a, b, "node is an endpoint of the edge");
        }
        if !pos.is_finite() {
            return error::non_finite("pos");
        }
        if !(0.0..=1.0).contains(&pos) {
            return error::out_of_range("pos", 0.0, 1.0, pos);
        }
        self.inner.graph_mut().bisect(node, key, pos);
        error::ok(JsValue::TRUE)
    }

    // Openables
    pub fn add_openable(&mut self, width: f64) -> u32 {
        self.inner.graph_mut().add_openable(width)
    }
    pub fn add_openable_res(&mut self, width: f64) -> JsValue {
        if let Err(e) = check_width(width) {
            return e;
        }
        error::ok(JsValue::from_f64(self.inner.graph_mut().add_openable(width) as f64))
    }
    /// Re-inserts openables kept outside the plan document, typically right
    /// after `from_json_res`. Takes an array of `get_openable`-shaped objects
    /// and returns the new ids as a `Uint32Array`.
    pub fn restore_openables_res(&mut self, openables: JsValue) -> JsValue {
        let list: Vec<floorplan::Openable> = match serde_wasm_bindgen::from_value(openables) {
            Ok(list) => list,
            Err(e) => return error::err("invalid_openable", format!("{}", e), None),
        };
        for o in &list {
            if let Err(e) = check_width(o.width) {
                return e;
            }
        }
        let ids = self.inner.graph_mut().restore_openables(list);
        error::ok(interop::arr_u32(&ids).into())
    }
    pub fn attach_openable_res(&mut self, id: u32, a: u32, b: u32, pos: f64, orientation: u8) -> JsValue {
        if self.rs_graph().openable(id).is_none() {
            return error::invalid_id("openable", id);
        }
        let Some(key) = EdgeKey::new(a, b).filter(|k| self.rs_graph().has_edge(*k)) else {
            return error::invalid_edge(a, b, "no such edge");
        };
        if !pos.is_finite() {
            return error::non_finite("pos");
        }
        if !(0.0..=1.0).contains(&pos) {
            return error::out_of_range("pos", 0.0, 1.0, pos);
        }
        let Some(orientation) = Orientation::from_index(orientation) else {
            return error::invalid_orientation(orientation);
        };
        error::ok(JsValue::from_bool(
            self.inner.graph_mut().attach_openable(id, key, pos, orientation),
        ))
    }
    pub fn detach_openable(&mut self, id: u32) -> bool {
        self.inner.graph_mut().detach_openable(id)
    }
    pub fn remove_openable(&mut self, id: u32) -> bool {
        self.inner.graph_mut().remove_openable(id)
    }
    /// `{ width, snap: { edge, pos, orientation }, position, angle }` or null.
    pub fn get_openable(&self, id: u32) -> JsValue {
        match self.rs_graph().openable(id) {
            Some(o) => interop::to_js(o),
            None => JsValue::NULL,
        }
    }

    // Typed arrays getters
    pub fn get_node_data(&self) -> JsValue {
        let g = self.rs_graph();
        let mut ids = Vec::with_capacity(g.node_count());
        let mut pos = Vec::with_capacity(g.node_count() * 2);
        for n in g.nodes() {
            ids.push(n.id);
            pos.push(n.position.x);
            pos.push(n.position.y);
        }
        let obj = interop::new_obj();
        interop::set_kv(&obj, "ids", &interop::arr_u32(&ids).into());
        interop::set_kv(&obj, "positions", &interop::arr_f64(&pos).into());
        obj.into()
    }
    pub fn get_edge_data(&self) -> JsValue {
        let g = self.rs_graph();
        let endpoints: Vec<u32> = g.edges().flat_map(|e| [e.id1(), e.id2()]).collect();
        let strokes: Vec<&str> = g.edges().map(|e| e.stroke.as_str()).collect();
        let obj = interop::new_obj();
        interop::set_kv(&obj, "endpoints", &interop::arr_u32(&endpoints).into());
        interop::set_kv(&obj, "strokes", &interop::to_js(&strokes));
        obj.into()
    }

    // Interaction, in screen coordinates
    pub fn press(&mut self, x: f64, y: f64) -> bool {
        x.is_finite() && y.is_finite() && self.inner.press(Point::new(x, y))
    }
    pub fn drag(&mut self, x: f64, y: f64, over_delete: bool) -> bool {
        x.is_finite() && y.is_finite() && self.inner.drag(Point::new(x, y), over_delete)
    }
    pub fn release(&mut self, x: f64, y: f64) {
        if x.is_finite() && y.is_finite() {
            self.inner.release(Point::new(x, y));
        }
    }
    pub fn release_res(&mut self, x: f64, y: f64) -> JsValue {
        if let Err(e) = check_finite("x", x).and_then(|_| check_finite("y", y)) {
            return e;
        }
        self.inner.release(Point::new(x, y));
        error::ok(JsValue::TRUE)
    }
    /// Crossing nearest to `(x, y)` among walls crossed by the segment from
    /// `(cx, cy)`, as `[x, y]`, or null.
    pub fn next_edge_to_segment(&self, cx: f64, cy: f64, x: f64, y: f64) -> JsValue {
        match self.rs_graph().next_edge_to_segment(Point::new(cx, cy), Point::new(x, y)) {
            Some(p) => interop::to_js(&[p.x, p.y]),
            None => JsValue::NULL,
        }
    }

    // Rooms
    pub fn rooms(&self) -> JsValue {
        interop::to_js(&self.inner.rooms())
    }
    pub fn faces(&self) -> JsValue {
        interop::to_js(&self.inner.faces())
    }

    // JSON
    pub fn to_json(&self) -> JsValue {
        interop::to_js(&self.rs_graph().to_json_value())
    }
    pub fn to_json_string(&self) -> String {
        self.inner.to_json()
    }
    pub fn from_json(&mut self, v: JsValue) -> bool {
        match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(val) => match floorplan::Graph::from_json_value(val) {
                Ok(g) => {
                    *self.inner.graph_mut() = g;
                    true
                }
                Err(_) => false,
            },
            Err(_) => false,
        }
    }
    pub fn from_json_res(&mut self, v: JsValue) -> JsValue {
        match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(val) => match floorplan::Graph::from_json_value(val) {
                Ok(g) => {
                    *self.inner.graph_mut() = g;
                    error::ok(JsValue::TRUE)
                }
                Err(e) => error::load_error(&e),
            },
            Err(e) => error::err("invalid_json", format!("{}", e), None),
        }
    }
    pub fn load_json_str_res(&mut self, s: &str) -> JsValue {
        match self.inner.load_json(s) {
            Ok(()) => error::ok(JsValue::TRUE),
            Err(e) => error::load_error(&e),
        }
    }
    pub fn clear(&mut self) {
        self.inner.graph_mut().clear();
    }
}

impl Default for Floorplan {
    fn default() -> Self {
        Floorplan::rs_new()
    }
}
