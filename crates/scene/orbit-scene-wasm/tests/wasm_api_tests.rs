#![cfg(target_arch = "wasm32")]
use orbit_scene_wasm::{abi_version, OrbitSceneWasm};
use serde_json::{json, Value as JsonValue};
use serde_wasm_bindgen as swb;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn to_json(v: JsValue) -> JsonValue {
    swb::from_value(v).unwrap()
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn construct_with_defaults() {
    let scene = OrbitSceneWasm::new(JsValue::UNDEFINED, JsValue::NULL);
    assert!(scene.is_ok());
}

#[wasm_bindgen_test]
fn rejects_empty_headings() {
    let headings = swb::to_value(&Vec::<String>::new()).unwrap();
    assert!(OrbitSceneWasm::new(JsValue::NULL, headings).is_err());
}

#[wasm_bindgen_test]
fn wheel_scenario_over_the_boundary() {
    let mut scene = OrbitSceneWasm::new(JsValue::NULL, JsValue::NULL).unwrap();

    let a = to_json(scene.on_wheel(120.0, Some(0.0)).unwrap());
    assert_eq!(a["kind"], "stepped");
    assert_eq!(a["step"], 1);

    let b = to_json(scene.on_wheel(120.0, Some(500.0)).unwrap());
    assert_eq!(b["kind"], "ignored");

    let c = to_json(scene.on_wheel(-50.0, Some(2100.0)).unwrap());
    assert_eq!(c["step"], 0);
    assert_eq!(c["wrapped"], true);
    assert_eq!(scene.step(), 0);
}

#[wasm_bindgen_test]
fn frames_only_while_running() {
    let mut scene = OrbitSceneWasm::new(JsValue::NULL, JsValue::NULL).unwrap();
    assert!(scene.frame(0.016).unwrap().is_null());

    scene.start();
    let out = to_json(scene.frame(1.0).unwrap());
    assert_eq!(out["events"][0], json!({ "type": "frame_loop_started" }));
    let spin = scene.value("planet.0".into(), "rotation.y".into()).unwrap();
    assert!((spin - 1.57).abs() < 1e-4);

    scene.stop();
    assert!(scene.frame(0.016).unwrap().is_null());
}

#[wasm_bindgen_test]
fn resize_returns_aspect() {
    let mut scene = OrbitSceneWasm::new(JsValue::NULL, JsValue::NULL).unwrap();
    let out = to_json(scene.on_resize(1000.0, 500.0, 3.0).unwrap());
    assert_eq!(out["aspect"], 2.0);
    assert_eq!(out["pixel_ratio"], 2.0);
}
