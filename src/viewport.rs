// Magnified viewport geometry in map (viewBox) space: construction, clamping, overlap.
// Clamping is four sequential rigid shifts; the order is load-bearing for oversized viewports.

use serde::{Deserialize, Serialize};

use crate::types::{Bounds, Point};

/// A viewport after clamping, with whether any shift was applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClampedViewport {
    pub viewport: Bounds,
    pub was_clamped: bool,
}

/// Viewport seen through the magnifier at `zoom`, centered on `center` (map units).
pub fn magnified_viewport(center: Point, map_width: f64, map_height: f64, zoom: f64) -> Bounds {
    Bounds::centered_on(center, map_width / zoom, map_height / zoom)
}

/// Shift `viewport` so it lies inside `map`, preserving its size.
///
/// Corrections run in order: left, right, top, bottom. Each one translates both edges
/// of its axis. A viewport wider (or taller) than the map therefore ends up flush with
/// the right (or bottom) edge and overflowing on the left (or top).
pub fn clamp_viewport_to_map_bounds(viewport: Bounds, map: Bounds) -> ClampedViewport {
    let mut v = viewport;
    let mut was_clamped = false;

    if v.left < map.left {
        let shift = map.left - v.left;
        v.left += shift;
        v.right += shift;
        was_clamped = true;
    }
    if v.right > map.right {
        let shift = v.right - map.right;
        v.left -= shift;
        v.right -= shift;
        was_clamped = true;
    }
    if v.top < map.top {
        let shift = map.top - v.top;
        v.top += shift;
        v.bottom += shift;
        was_clamped = true;
    }
    if v.bottom > map.bottom {
        let shift = v.bottom - map.bottom;
        v.top -= shift;
        v.bottom -= shift;
        was_clamped = true;
    }

    ClampedViewport {
        viewport: v,
        was_clamped,
    }
}

/// Strict overlap test. Rectangles that only share an edge do not overlap.
pub fn is_region_in_viewport(region: &Bounds, viewport: &Bounds) -> bool {
    region.left < viewport.right
        && region.right > viewport.left
        && region.top < viewport.bottom
        && region.bottom > viewport.top
}
