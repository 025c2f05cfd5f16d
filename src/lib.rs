// magnifier_core: adaptive zoom for the map magnifier.
// Pure geometry and search live in Rust; JS measures the DOM and applies the zoom.

mod detection;
mod error;
mod frame;
mod importance;
mod measure;
mod search;
mod thresholds;
mod types;
mod viewbox;
mod viewport;

use std::collections::HashMap;

use wasm_bindgen::prelude::*;

pub use detection::{detect_regions, detection_box, is_very_small, Detection};
pub use error::ZoomError;
pub use frame::{DetectionInput, FrameInput};
pub use importance::{calculate_importance, rank_by_importance, DETECTION_RADIUS_PX};
pub use measure::{build_piece_cache, largest_piece, FnMeasurer, RegionMeasurer};
pub use search::{find_optimal_zoom, SearchContext};
pub use thresholds::calculate_adaptive_thresholds;
pub use types::*;
pub use viewbox::ViewBox;
pub use viewport::{
    clamp_viewport_to_map_bounds, is_region_in_viewport, magnified_viewport, ClampedViewport,
};

/// Initialize panic hook and console logging for the browser.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Debug);
}

/// Zoom engine exposed to JavaScript.
/// Holds config and the multi-piece cache; each frame is one batch call.
#[wasm_bindgen]
pub struct ZoomEngine {
    config: EngineConfig,
    piece_sizes: HashMap<String, PieceSize>,
}

impl ZoomEngine {
    pub fn from_config(config: EngineConfig) -> Self {
        ZoomEngine {
            config,
            piece_sizes: HashMap::new(),
        }
    }

    pub fn from_config_json(config_json: &str) -> Result<Self, ZoomError> {
        let config: EngineConfig = serde_json::from_str(config_json)?;
        Ok(ZoomEngine::from_config(config))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the multi-piece cache. Searches only ever read it.
    pub fn replace_piece_sizes(&mut self, piece_sizes: HashMap<String, PieceSize>) {
        log::debug!("Piece-size cache now holds {} regions", piece_sizes.len());
        self.piece_sizes = piece_sizes;
    }

    pub fn search_frame(&self, frame: &FrameInput) -> SearchResult {
        frame.search(&self.config, &self.piece_sizes)
    }
}

#[wasm_bindgen]
impl ZoomEngine {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<ZoomEngine, JsValue> {
        ZoomEngine::from_config_json(config_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))
    }

    /// Load the largest-piece sizes, e.g. `{ "ph": { "width": 6.1, "height": 4.0 } }`.
    pub fn set_piece_sizes(&mut self, piece_sizes_json: &str) -> Result<(), JsValue> {
        let piece_sizes: HashMap<String, PieceSize> = serde_json::from_str(piece_sizes_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid piece sizes: {}", e)))?;
        self.replace_piece_sizes(piece_sizes);
        Ok(())
    }

    /// Run one zoom search. Returns JSON `{ zoom, found_good_zoom, bounding_boxes }`.
    pub fn find_optimal_zoom(&self, frame_json: &str) -> Result<String, JsValue> {
        let frame: FrameInput = serde_json::from_str(frame_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid frame: {}", e)))?;

        let result = self.search_frame(&frame);

        serde_json::to_string(&result)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Hit-test regions under the cursor. Returns JSON `{ regions, smallest_size }`.
    pub fn detect_regions(&self, input_json: &str) -> Result<String, JsValue> {
        let input: DetectionInput = serde_json::from_str(input_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid detection input: {}", e)))?;

        serde_json::to_string(&input.detect())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Acceptance thresholds for a region size, as JSON `{ min, max }`.
    pub fn thresholds_for(&self, smallest_size_px: f64) -> Result<String, JsValue> {
        serde_json::to_string(&calculate_adaptive_thresholds(smallest_size_px))
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Highest zoom the search tries.
    pub fn max_zoom(&self) -> f64 {
        self.config.zoom.max_zoom()
    }

    /// Fallback zoom when nothing fits.
    pub fn min_zoom(&self) -> f64 {
        self.config.zoom.min_zoom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_creation_works() {
        let engine = ZoomEngine::from_config_json(r#"{"zoom":{},"magnifier":{}}"#);
        assert!(engine.is_ok());
    }

    #[test]
    fn engine_rejects_bad_step() {
        let engine = ZoomEngine::from_config_json(r#"{"zoom":{"zoom_step":1.0}}"#);
        assert!(matches!(engine, Err(ZoomError::Serialization(_))));
    }

    const FRAME_JSON: &str = r#"{
        "cursor": { "x": 500, "y": 250 },
        "container_rect": { "left": 0, "top": 0, "width": 1000, "height": 500 },
        "svg_rect": { "left": 0, "top": 0, "width": 1000, "height": 500 },
        "view_box": "0 0 1000 500",
        "detected_regions": [{ "id": "ph" }],
        "detected_smallest_size": 5,
        "region_rects": { "ph": { "left": 450, "top": 200, "width": 100, "height": 100 } }
    }"#;

    #[test]
    fn json_search_through_engine() {
        let mut engine = ZoomEngine::new(r#"{"zoom":{"max_zoom":500}}"#).unwrap();
        assert_eq!(engine.max_zoom(), 500.0);
        assert_eq!(engine.min_zoom(), 1.0);

        let without: SearchResult =
            serde_json::from_str(&engine.find_optimal_zoom(FRAME_JSON).unwrap()).unwrap();

        engine
            .set_piece_sizes(r#"{ "ph": { "width": 5, "height": 5 } }"#)
            .unwrap();
        let with: SearchResult =
            serde_json::from_str(&engine.find_optimal_zoom(FRAME_JSON).unwrap()).unwrap();

        assert!(with.found_good_zoom);
        assert!(with.zoom > without.zoom);
        assert!(with.zoom <= 500.0);
        assert_eq!(with.accepted_box().map(|b| b.region_id.as_str()), Some("ph"));
    }

    #[test]
    fn json_detection_feeds_json_search() {
        let engine = ZoomEngine::new("{}").unwrap();
        let detection_json = engine
            .detect_regions(r#"{"cursor":{"x":500,"y":250},"region_rects":{}}"#)
            .unwrap();
        let detection: serde_json::Value = serde_json::from_str(&detection_json).unwrap();

        let frame = serde_json::json!({
            "cursor": { "x": 500, "y": 250 },
            "container_rect": { "left": 0, "top": 0, "width": 1000, "height": 500 },
            "svg_rect": { "left": 0, "top": 0, "width": 1000, "height": 500 },
            "view_box": "0 0 1000 500",
            "detected_regions": detection["regions"],
            "detected_smallest_size": detection["smallest_size"],
        });
        let result: SearchResult =
            serde_json::from_str(&engine.find_optimal_zoom(&frame.to_string()).unwrap()).unwrap();
        assert!(!result.found_good_zoom);
        assert_eq!(result.zoom, 1.0);
    }

    #[test]
    fn json_thresholds() {
        let engine = ZoomEngine::new("{}").unwrap();
        let thresholds: AcceptanceThresholds =
            serde_json::from_str(&engine.thresholds_for(3.0).unwrap()).unwrap();
        assert_eq!((thresholds.min, thresholds.max), (0.05, 0.15));
    }

    #[test]
    fn piece_cache_feeds_search() {
        let mut engine = ZoomEngine::from_config(EngineConfig::default());
        let frame: FrameInput = serde_json::from_str(
            r#"{
                "cursor": { "x": 500, "y": 250 },
                "container_rect": { "left": 0, "top": 0, "width": 1000, "height": 500 },
                "svg_rect": { "left": 0, "top": 0, "width": 1000, "height": 500 },
                "view_box": "0 0 1000 500",
                "detected_regions": [{ "id": "ph" }],
                "detected_smallest_size": 5,
                "region_rects": { "ph": { "left": 450, "top": 200, "width": 100, "height": 100 } }
            }"#,
        )
        .unwrap();

        let without = engine.search_frame(&frame);

        let mut pieces = HashMap::new();
        pieces.insert(
            "ph".to_string(),
            PieceSize {
                width: 5.0,
                height: 5.0,
            },
        );
        engine.replace_piece_sizes(pieces);
        let with = engine.search_frame(&frame);

        assert!(with.found_good_zoom);
        assert!(with.zoom > without.zoom);
    }
}
