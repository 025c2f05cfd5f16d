// Cursor detection box: which regions sit under the cursor and how small the smallest one is.
// Feeds the zoom search its detected regions and threshold input.

use serde::{Deserialize, Serialize};

use crate::importance::DETECTION_RADIUS_PX;
use crate::types::{size_or_infinity, Bounds, DetectedRegion, PixelRect, Point};
use crate::viewport::is_region_in_viewport;

/// Regions narrower or shorter than this (display px) are very small.
pub const VERY_SMALL_DIMENSION_PX: f64 = 15.0;

/// Regions found under the cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub regions: Vec<DetectedRegion>,
    /// Smallest `min(width, height)` among detected regions; infinite when none.
    #[serde(deserialize_with = "size_or_infinity")]
    pub smallest_size: f64,
}

impl Detection {
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

pub fn is_very_small(rect: &PixelRect) -> bool {
    rect.width < VERY_SMALL_DIMENSION_PX || rect.height < VERY_SMALL_DIMENSION_PX
}

/// Square detection box centered on the cursor, in client pixels.
pub fn detection_box(cursor: Point) -> Bounds {
    Bounds::centered_on(cursor, DETECTION_RADIUS_PX, DETECTION_RADIUS_PX)
}

/// Hit-test candidate region rects (client pixels) against the cursor detection box.
pub fn detect_regions<'a, I>(cursor: Point, candidates: I) -> Detection
where
    I: IntoIterator<Item = (&'a str, PixelRect)>,
{
    let hit_box = detection_box(cursor);
    let mut regions = Vec::new();
    let mut smallest_size = f64::INFINITY;

    for (id, rect) in candidates {
        if !is_region_in_viewport(&rect.to_bounds(), &hit_box) {
            continue;
        }
        smallest_size = smallest_size.min(rect.width.min(rect.height));
        regions.push(DetectedRegion::new(id, is_very_small(&rect)));
    }

    Detection {
        regions,
        smallest_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_overlapping_regions_only() {
        let cursor = Point::new(100.0, 100.0);
        let detection = detect_regions(
            cursor,
            [
                ("near", PixelRect::new(90.0, 90.0, 30.0, 30.0)),
                ("far", PixelRect::new(400.0, 400.0, 30.0, 30.0)),
            ],
        );
        assert_eq!(detection.regions.len(), 1);
        assert_eq!(detection.regions[0].id, "near");
        assert!(!detection.regions[0].is_very_small);
        assert_eq!(detection.smallest_size, 30.0);
    }

    #[test]
    fn box_edge_touch_is_not_detected() {
        // Box spans 75..125; this region starts exactly at 125.
        let detection = detect_regions(
            Point::new(100.0, 100.0),
            [("edge", PixelRect::new(125.0, 90.0, 10.0, 10.0))],
        );
        assert!(detection.is_empty());
        assert_eq!(detection.smallest_size, f64::INFINITY);
    }

    #[test]
    fn smallest_uses_min_dimension() {
        let detection = detect_regions(
            Point::new(0.0, 0.0),
            [
                ("wide", PixelRect::new(-20.0, -1.0, 40.0, 2.0)),
                ("square", PixelRect::new(-5.0, -5.0, 10.0, 10.0)),
            ],
        );
        assert_eq!(detection.regions.len(), 2);
        assert_eq!(detection.smallest_size, 2.0);
        assert!(detection.regions.iter().all(|r| r.is_very_small));
    }

    #[test]
    fn very_small_by_either_dimension() {
        assert!(is_very_small(&PixelRect::new(0.0, 0.0, 15.0, 13.0)));
        assert!(!is_very_small(&PixelRect::new(0.0, 0.0, 15.0, 15.0)));
        assert!(is_very_small(&PixelRect::new(0.0, 0.0, 100.0, 1.0)));
    }
}
