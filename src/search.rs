// Adaptive zoom search for the map magnifier.
// Scans a geometric zoom series from max to min and takes the first level where an
// in-view region fills a legible share of the magnifier. First fit, not best fit:
// this runs on every pointer move and must exit early.

use std::collections::HashMap;

use crate::importance::{calculate_importance, rank_by_importance};
use crate::measure::RegionMeasurer;
use crate::thresholds::calculate_adaptive_thresholds;
use crate::types::*;
use crate::viewbox::ViewBox;
use crate::viewport::{clamp_viewport_to_map_bounds, is_region_in_viewport, magnified_viewport};

/// Everything one search needs, measured fresh for the current frame.
pub struct SearchContext<'a> {
    /// Cursor position relative to the container, in display pixels.
    pub cursor: Point,
    pub container_rect: PixelRect,
    pub svg_rect: PixelRect,
    pub view_box: ViewBox,
    pub detected_regions: &'a [DetectedRegion],
    pub detected_smallest_size: f64,
    /// Largest-piece sizes for multi-piece regions. Read only.
    pub piece_sizes: &'a HashMap<String, PieceSize>,
    pub measurer: &'a dyn RegionMeasurer,
    pub zoom: ZoomConfig,
    pub magnifier: MagnifierSettings,
}

/// A measured region ready for the zoom loop.
struct Candidate {
    map_bounds: Bounds,
    /// Size used for the fit test, in display pixels.
    width: f64,
    height: f64,
}

/// Client-pixel to map-space conversion for the rendered SVG.
struct MapProjection {
    svg_rect: PixelRect,
    view_box: ViewBox,
    scale_x: f64,
    scale_y: f64,
}

impl MapProjection {
    fn new(svg_rect: PixelRect, view_box: ViewBox) -> Option<Self> {
        if svg_rect.width <= 0.0 || svg_rect.height <= 0.0 {
            return None;
        }
        Some(MapProjection {
            svg_rect,
            view_box,
            scale_x: view_box.width / svg_rect.width,
            scale_y: view_box.height / svg_rect.height,
        })
    }

    fn to_map(&self, client: Point) -> Point {
        Point::new(
            (client.x - self.svg_rect.left) * self.scale_x + self.view_box.x,
            (client.y - self.svg_rect.top) * self.scale_y + self.view_box.y,
        )
    }

    fn rect_to_map(&self, rect: &PixelRect) -> Bounds {
        let top_left = self.to_map(Point::new(rect.left, rect.top));
        let bottom_right = self.to_map(Point::new(rect.right(), rect.bottom()));
        Bounds::new(top_left.x, bottom_right.x, top_left.y, bottom_right.y)
    }
}

fn not_found(zoom: &ZoomConfig, bounding_boxes: Vec<DebugBoundingBox>) -> SearchResult {
    SearchResult {
        zoom: zoom.min_zoom(),
        found_good_zoom: false,
        bounding_boxes,
    }
}

/// Pick the magnifier zoom for the current cursor position.
///
/// The result zoom is always within `[min_zoom, max_zoom]`. When no region fits at
/// any level, the result is `min_zoom` with `found_good_zoom == false`.
pub fn find_optimal_zoom(ctx: &SearchContext<'_>) -> SearchResult {
    let thresholds = calculate_adaptive_thresholds(ctx.detected_smallest_size);

    let Some(projection) = MapProjection::new(ctx.svg_rect, ctx.view_box) else {
        log::debug!("SVG has no rendered size; falling back to min zoom");
        return not_found(&ctx.zoom, Vec::new());
    };

    // Cursor is container-relative; project through client space.
    let cursor_client = Point::new(
        ctx.container_rect.left + ctx.cursor.x,
        ctx.container_rect.top + ctx.cursor.y,
    );
    let cursor_map = projection.to_map(cursor_client);

    let mut scored: Vec<((Candidate, DebugBoundingBox), f64)> = ctx
        .detected_regions
        .iter()
        .filter_map(|region| {
            let rect = ctx.measurer.measure(&region.id)?;
            let importance = calculate_importance(rect.center(), cursor_client, region.is_very_small);
            let (width, height) = match ctx.piece_sizes.get(&region.id) {
                Some(piece) => (piece.width, piece.height),
                None => (rect.width, rect.height),
            };
            let map_bounds = projection.rect_to_map(&rect);
            let candidate = Candidate {
                map_bounds,
                width,
                height,
            };
            let debug_box = DebugBoundingBox {
                region_id: region.id.clone(),
                bounds: map_bounds,
                importance,
                was_accepted: false,
            };
            Some(((candidate, debug_box), importance))
        })
        .collect();
    rank_by_importance(&mut scored);

    let (candidates, mut bounding_boxes): (Vec<Candidate>, Vec<DebugBoundingBox>) =
        scored.into_iter().map(|(pair, _)| pair).unzip();

    if candidates.is_empty() {
        log::debug!(
            "No measurable regions among {} detected",
            ctx.detected_regions.len()
        );
        return not_found(&ctx.zoom, bounding_boxes);
    }

    let (magnifier_width, magnifier_height) = ctx.magnifier.size_for(ctx.container_rect.width);
    let map_bounds = ctx.view_box.bounds();

    let mut test_zoom = ctx.zoom.max_zoom();
    let mut levels = 0usize;
    while test_zoom >= ctx.zoom.min_zoom() {
        levels += 1;
        debug_assert!(levels <= ctx.zoom.iteration_bound());

        let viewport = magnified_viewport(
            cursor_map,
            ctx.view_box.width,
            ctx.view_box.height,
            test_zoom,
        );
        let viewport = clamp_viewport_to_map_bounds(viewport, map_bounds).viewport;

        for (index, candidate) in candidates.iter().enumerate() {
            if !is_region_in_viewport(&candidate.map_bounds, &viewport) {
                continue;
            }

            let width_ratio = candidate.width * test_zoom / magnifier_width;
            let height_ratio = candidate.height * test_zoom / magnifier_height;

            if thresholds.accepts(width_ratio) || thresholds.accepts(height_ratio) {
                bounding_boxes[index].was_accepted = true;
                log::trace!(
                    "Accepted {} at zoom {:.2} (width {:.3}, height {:.3})",
                    bounding_boxes[index].region_id,
                    test_zoom,
                    width_ratio,
                    height_ratio
                );
                return SearchResult {
                    zoom: test_zoom,
                    found_good_zoom: true,
                    bounding_boxes,
                };
            }
        }

        test_zoom *= ctx.zoom.zoom_step();
    }

    log::debug!(
        "No zoom in [{}, {}] frames any of {} regions after {} levels",
        ctx.zoom.min_zoom(),
        ctx.zoom.max_zoom(),
        candidates.len(),
        levels
    );
    not_found(&ctx.zoom, bounding_boxes)
}
