#![cfg(target_arch = "wasm32")]

use floorplan_wasm::Floorplan;
use js_sys::{Float64Array, Reflect, Uint32Array};
use serde::Deserialize;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn nodes_and_edges_basic() {
    let mut f = Floorplan::new();
    let a = f.add_node(10.0, 20.0);
    let b = f.add_node(30.0, 40.0);
    assert_eq!(f.node_count(), 2);

    let va: Vec<f64> = serde_wasm_bindgen::from_value(f.get_node(a)).unwrap();
    assert_eq!(va, vec![10.0, 20.0]);

    assert!(f.move_node(b, 35.0, 45.0));
    let vb: Vec<f64> = serde_wasm_bindgen::from_value(f.get_node(b)).unwrap();
    assert_eq!(vb, vec![35.0, 45.0]);

    assert!(f.add_edge(b, a));
    assert!(f.add_edge(a, b));
    assert_eq!(f.edge_count(), 1);

    let nd = f.get_node_data();
    let n_ids = Uint32Array::new(&Reflect::get(&nd, &JsValue::from_str("ids")).unwrap());
    let n_pos = Float64Array::new(&Reflect::get(&nd, &JsValue::from_str("positions")).unwrap());
    assert_eq!(n_ids.length(), 2);
    assert_eq!(n_pos.length(), 4);

    let ed = f.get_edge_data();
    let ep = Uint32Array::new(&Reflect::get(&ed, &JsValue::from_str("endpoints")).unwrap());
    assert_eq!(ep.to_vec(), vec![a, b]);

    assert!(f.remove_edge(b, a));
    assert_eq!(f.edge_count(), 0);
}

#[wasm_bindgen_test]
fn drawing_and_rooms() {
    let mut f = Floorplan::new();
    f.add_node(0.0, 0.0);
    let corners = [(1000.0, 0.0), (1000.0, 1000.0), (0.0, 1000.0)];
    let mut last = (0.0, 0.0);
    for (x, y) in corners {
        assert!(f.press(last.0 + 20.0, last.1));
        assert!(f.drag(x, y, false));
        f.release(x, y);
        last = (x, y);
    }
    assert!(f.press(last.0 + 20.0, last.1));
    assert!(f.drag(2.0, 1.0, false));
    f.release(2.0, 1.0);

    #[derive(Deserialize)]
    struct Room {
        nodes: Vec<u32>,
        area: f64,
    }
    let rooms: Vec<Room> = serde_wasm_bindgen::from_value(f.rooms()).unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].nodes.len(), 5);
    assert!((rooms[0].area - 1.0e6).abs() < 1e-6);
}

#[wasm_bindgen_test]
fn openables_are_exposed_as_plain_objects() {
    let mut f = Floorplan::new();
    let a = f.add_node(0.0, 0.0);
    let b = f.add_node(1000.0, 0.0);
    f.add_edge(a, b);
    let o = f.add_openable(100.0);
    let r = f.attach_openable_res(o, b, a, 0.5, 1);
    assert_eq!(Reflect::get(&r, &JsValue::from_str("ok")).unwrap(), JsValue::TRUE);

    #[derive(Deserialize)]
    struct Placed {
        angle: f64,
        position: Pos,
    }
    #[derive(Deserialize)]
    struct Pos {
        x: f64,
        y: f64,
    }
    let p: Placed = serde_wasm_bindgen::from_value(f.get_openable(o)).unwrap();
    assert_eq!((p.position.x, p.position.y), (450.0, 0.0));
    assert_eq!(p.angle, 180.0);
    assert!(f.get_openable(o + 1).is_null());
}

#[wasm_bindgen_test]
fn json_round_trip_through_js() {
    let mut f = Floorplan::new();
    let a = f.add_node(0.0, 0.0);
    let b = f.add_node(500.0, 0.0);
    f.add_edge(a, b);
    f.set_edge_stroke(a, b, "red");
    let doc = f.to_json();
    let s = f.to_json_string();

    let mut g = Floorplan::new();
    assert!(g.from_json(doc));
    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.to_json_string(), s);
    g.clear();
    assert_eq!(g.node_count(), 0);
}

#[wasm_bindgen_test]
fn settings_stay_ordered() {
    let mut f = Floorplan::new();
    assert!(f.set_translate_radius(40.0));
    assert_eq!(f.extend_radius(), 40.0);
    assert!(f.set_extend_radius(5.0));
    assert_eq!(f.translate_radius(), 5.0);
    assert!(!f.set_extend_radius(f64::NAN));
    assert!(logging_accepts_levels());
}

fn logging_accepts_levels() -> bool {
    floorplan_wasm::init_logging("debug") && !floorplan_wasm::init_logging("loud")
}

#[wasm_bindgen_test]
fn openables_are_restored_after_a_reload() {
    let mut f = Floorplan::new();
    let a = f.add_node(0.0, 0.0);
    let b = f.add_node(1000.0, 0.0);
    f.add_edge(a, b);
    let o = f.add_openable(100.0);
    f.attach_openable_res(o, a, b, 0.25, 0);
    let kept = js_sys::Array::of1(&f.get_openable(o));
    let doc = f.to_json();

    let mut g = Floorplan::new();
    assert!(g.from_json(doc));
    assert!(g.get_openable(0).is_null());
    let r = g.restore_openables_res(kept.into());
    assert_eq!(Reflect::get(&r, &JsValue::from_str("ok")).unwrap(), JsValue::TRUE);
    let ids = Uint32Array::new(&Reflect::get(&r, &JsValue::from_str("value")).unwrap()).to_vec();
    assert_eq!(ids.len(), 1);

    #[derive(Deserialize)]
    struct Snap {
        edge: Option<[u32; 2]>,
        pos: Option<f64>,
    }
    #[derive(Deserialize)]
    struct Restored {
        snap: Snap,
        angle: f64,
    }
    let back: Restored = serde_wasm_bindgen::from_value(g.get_openable(ids[0])).unwrap();
    assert_eq!(back.snap.edge, Some([a, b]));
    assert_eq!(back.snap.pos, Some(0.25));
    assert_eq!(back.angle, 0.0);
}
