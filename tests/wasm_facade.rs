// Browser-side checks of the JSON facade, including the JsValue error paths.
// Run with `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]

use magnifier_core::{SearchResult, ZoomEngine};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const FRAME_JSON: &str = r#"{
    "cursor": { "x": 500, "y": 250 },
    "container_rect": { "left": 0, "top": 0, "width": 1000, "height": 500 },
    "svg_rect": { "left": 0, "top": 0, "width": 1000, "height": 500 },
    "view_box": "0 0 1000 500",
    "detected_regions": [{ "id": "lu", "is_very_small": true }],
    "detected_smallest_size": 5,
    "region_rects": { "lu": { "left": 497.5, "top": 247.5, "width": 5, "height": 5 } }
}"#;

#[wasm_bindgen_test]
fn constructor_rejects_bad_config() {
    let err = ZoomEngine::new(r#"{"zoom":{"zoom_step":2.0}}"#).err().unwrap();
    let message = err.as_string().unwrap();
    assert!(message.starts_with("Invalid config"));
}

#[wasm_bindgen_test]
fn frame_search_round_trip() {
    let engine = ZoomEngine::new("{}").unwrap();
    let result: SearchResult =
        serde_json::from_str(&engine.find_optimal_zoom(FRAME_JSON).unwrap()).unwrap();
    assert!(result.found_good_zoom);
    assert!(result.zoom > 1.0);
}

#[wasm_bindgen_test]
fn malformed_frame_is_an_error() {
    let engine = ZoomEngine::new("{}").unwrap();
    let err = engine.find_optimal_zoom("{").err().unwrap();
    assert!(err.as_string().unwrap().starts_with("Invalid frame"));
}

#[wasm_bindgen_test]
fn malformed_piece_sizes_is_an_error() {
    let mut engine = ZoomEngine::new("{}").unwrap();
    assert!(engine.set_piece_sizes(r#"{"ph": 3}"#).is_err());
    assert!(engine
        .set_piece_sizes(r#"{"ph": {"width": 4, "height": 2}}"#)
        .is_ok());
}
