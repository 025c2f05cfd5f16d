// Layout measurement seam. The browser measures region paths; the search only asks by id.
// A miss means "no rendered path", which the search skips rather than treats as an error.

use std::collections::HashMap;

use crate::types::{PieceSize, PixelRect};

/// Supplies on-screen bounding boxes for regions.
pub trait RegionMeasurer {
    /// Client-space bounding box of the region, or `None` if it has no rendered shape.
    fn measure(&self, region_id: &str) -> Option<PixelRect>;
}

impl RegionMeasurer for HashMap<String, PixelRect> {
    fn measure(&self, region_id: &str) -> Option<PixelRect> {
        self.get(region_id).copied()
    }
}

/// Adapter for closure-based measurement.
pub struct FnMeasurer<F>(pub F);

impl<F> RegionMeasurer for FnMeasurer<F>
where
    F: Fn(&str) -> Option<PixelRect>,
{
    fn measure(&self, region_id: &str) -> Option<PixelRect> {
        (self.0)(region_id)
    }
}

/// Size of the largest piece (by area) of a multi-piece region.
pub fn largest_piece(pieces: &[PixelRect]) -> Option<PieceSize> {
    pieces
        .iter()
        .max_by(|a, b| a.area().total_cmp(&b.area()))
        .map(|rect| PieceSize {
            width: rect.width,
            height: rect.height,
        })
}

/// Build the piece-size cache from each region's measured pieces.
/// Only regions with more than one piece are recorded.
pub fn build_piece_cache<'a, I>(regions: I) -> HashMap<String, PieceSize>
where
    I: IntoIterator<Item = (&'a str, &'a [PixelRect])>,
{
    regions
        .into_iter()
        .filter(|(_, pieces)| pieces.len() > 1)
        .filter_map(|(id, pieces)| largest_piece(pieces).map(|size| (id.to_string(), size)))
        .collect()
}
