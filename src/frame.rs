// Per-frame JSON payloads from JS. One crossing per pointer move.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::detection::{detect_regions, Detection};
use crate::search::{find_optimal_zoom, SearchContext};
use crate::types::*;
use crate::viewbox::ViewBox;

/// Live measurements for one zoom search.
///
/// ```json
/// {
///   "cursor": { "x": 412, "y": 230 },
///   "container_rect": { "left": 0, "top": 64, "width": 1200, "height": 700 },
///   "svg_rect": { "left": 0, "top": 64, "width": 1200, "height": 700 },
///   "view_box": "0 0 1010 666",
///   "detected_regions": [{ "id": "lu", "is_very_small": true }],
///   "detected_smallest_size": 2.4,
///   "region_rects": { "lu": { "left": 410, "top": 290, "width": 2.4, "height": 3.1 } }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameInput {
    pub cursor: Point,
    pub container_rect: PixelRect,
    pub svg_rect: PixelRect,
    #[serde(default)]
    pub view_box: String,
    #[serde(default)]
    pub detected_regions: Vec<DetectedRegion>,
    /// Omitted or `null` when nothing was detected.
    #[serde(default = "no_detection_size", deserialize_with = "size_or_infinity")]
    pub detected_smallest_size: f64,
    #[serde(default)]
    pub region_rects: HashMap<String, PixelRect>,
}

fn no_detection_size() -> f64 {
    f64::INFINITY
}

impl FrameInput {
    /// Run the zoom search for this frame.
    pub fn search(
        &self,
        config: &EngineConfig,
        piece_sizes: &HashMap<String, PieceSize>,
    ) -> SearchResult {
        let ctx = SearchContext {
            cursor: self.cursor,
            container_rect: self.container_rect,
            svg_rect: self.svg_rect,
            view_box: ViewBox::parse(&self.view_box),
            detected_regions: &self.detected_regions,
            detected_smallest_size: self.detected_smallest_size,
            piece_sizes,
            measurer: &self.region_rects,
            zoom: config.zoom,
            magnifier: config.magnifier,
        };
        find_optimal_zoom(&ctx)
    }
}

/// Candidate rects to hit-test against the cursor detection box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionInput {
    /// Cursor in client pixels.
    pub cursor: Point,
    /// Ordered by id so detection output is deterministic.
    pub region_rects: BTreeMap<String, PixelRect>,
}

impl DetectionInput {
    pub fn detect(&self) -> Detection {
        detect_regions(
            self.cursor,
            self.region_rects
                .iter()
                .map(|(id, rect)| (id.as_str(), *rect)),
        )
    }
}
