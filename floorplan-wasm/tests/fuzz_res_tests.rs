#![cfg(target_arch = "wasm32")]

use floorplan_wasm::Floorplan;
use js_sys::Reflect;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn is_ok(v: &JsValue) -> bool { Reflect::get(v, &JsValue::from_str("ok")).ok().and_then(|x| x.as_bool()).unwrap_or(false) }

#[wasm_bindgen_test]
fn fuzz_strict_methods_no_abort() {
    let mut f = Floorplan::new();
    let a = f.add_node(0.0, 0.0); let b = f.add_node(100.0, 0.0);
    f.add_edge(a, b);

    // Simple LCG
    let mut seed: u64 = 0x1234_5678_ABCD_EF01;
    let mut rnd = || { seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1); (seed >> 16) as u32 };

    for _ in 0..500u32 {
        let op = rnd() % 10;
        let before = f.to_json_string();
        let res = match op {
            0 => f.add_node_res(f64::from_bits(rnd() as u64 | ((rnd() as u64) << 32)), 0.0),
            1 => { let id = if rnd() % 2 == 0 { a } else { 99_999 }; f.move_node_res(id, f64::from_bits((rnd() as u64) << 32), 1.0) }
            2 => f.get_node_res(99_999),
            3 => f.remove_edge_res(77_777, a),
            4 => f.add_edge_res(a, a),
            5 => f.bisect_res(99_999, a, b, 0.5),
            6 => f.merge_nodes_res(a, 88_888),
            7 => f.attach_openable_res(55_555, a, b, 0.5, 0),
            8 => f.set_extend_radius_res(f64::from_bits((rnd() as u64) << 40)),
            9 => f.load_json_str_res("{\"nodes\": 3}"),
            _ => unreachable!()
        };
        // No aborts and no plan mutation on error paths
        if !is_ok(&res) { assert_eq!(f.to_json_string(), before); }
    }

    let v = f.add_node_res(10.0, 20.0); assert!(is_ok(&v));
    assert!(f.press(10.0, 20.0));
    assert!(f.drag(f64::NAN, 0.0, false) == false);
    assert!(is_ok(&f.release_res(3.0, 0.0)));
}
