// Adaptive acceptance thresholds.
// Tiny regions barely grow even at max zoom, so their framing target is more permissive.

use crate::types::AcceptanceThresholds;

/// Regions below this size (display px) use the sub-pixel tier.
pub const SUB_PIXEL_SIZE: f64 = 1.0;

/// Regions below this size (display px) use the small tier.
pub const SMALL_REGION_SIZE: f64 = 5.0;

/// Map the smallest detected region size to an acceptance ratio range.
///
/// Tier boundaries are strict: exactly 1px or 5px falls into the next, stricter tier.
pub fn calculate_adaptive_thresholds(smallest_size_px: f64) -> AcceptanceThresholds {
    if smallest_size_px < SUB_PIXEL_SIZE {
        AcceptanceThresholds {
            min: 0.02,
            max: 0.08,
        }
    } else if smallest_size_px < SMALL_REGION_SIZE {
        AcceptanceThresholds {
            min: 0.05,
            max: 0.15,
        }
    } else {
        AcceptanceThresholds {
            min: 0.10,
            max: 0.25,
        }
    }
}
