// Region importance: cursor proximity times a size boost.
// Orders candidates before the zoom search; never decides zoom on its own.

use crate::types::Point;

/// Radius (display px) at which proximity weight falls to zero.
/// Matches the side of the cursor detection box.
pub const DETECTION_RADIUS_PX: f64 = 50.0;

/// Weight multiplier for regions flagged very small.
pub const VERY_SMALL_BOOST: f64 = 2.0;

/// Importance of a region for the current cursor, always >= 0.
///
/// Proximity falls off linearly from 1 at the cursor to 0 at 50px. Very small
/// regions are doubled so a microstate is not starved by a larger, nearer neighbor.
pub fn calculate_importance(region_center: Point, cursor: Point, is_very_small: bool) -> f64 {
    let distance = region_center.distance_to(&cursor);
    let distance_weight = 1.0 - (distance / DETECTION_RADIUS_PX).min(1.0);
    let size_weight = if is_very_small { VERY_SMALL_BOOST } else { 1.0 };
    distance_weight * size_weight
}

/// Sort scored items by descending importance. Ties keep their input order.
pub fn rank_by_importance<T>(items: &mut [(T, f64)]) {
    items.sort_by(|a, b| b.1.total_cmp(&a.1));
}
