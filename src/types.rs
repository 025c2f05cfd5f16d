// Strong typing over loose numbers. Separate types for display pixels and map (viewBox) space.
// Config types validate on deserialize, so an out-of-range zoom series cannot be built.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ZoomError;

/// Point in display pixels (or map units, depending on context).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// On-screen rectangle in display pixels, as reported by a layout measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        PixelRect {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Edge form of this rect, still in display pixels.
    pub fn to_bounds(&self) -> Bounds {
        Bounds::new(self.left, self.right(), self.top, self.bottom())
    }
}

/// Axis-aligned rectangle by edges. Used for map (viewBox) space boxes and viewports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Bounds {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Bounds {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Rectangle of the given size centered on `center`.
    pub fn centered_on(center: Point, width: f64, height: f64) -> Self {
        Bounds {
            left: center.x - width / 2.0,
            right: center.x + width / 2.0,
            top: center.y - height / 2.0,
            bottom: center.y + height / 2.0,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Region size that reads JSON `null` as "nothing detected".
///
/// serde_json writes an infinite `f64` as `null`, so detection output fed back
/// into a frame payload must map `null` to infinity rather than reject it.
pub(crate) fn size_or_infinity<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
}

/// Target range for (magnified size / magnifier size). Both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcceptanceThresholds {
    pub min: f64,
    pub max: f64,
}

impl AcceptanceThresholds {
    pub fn accepts(&self, ratio: f64) -> bool {
        ratio >= self.min && ratio <= self.max
    }
}

/// Size of the largest contiguous piece of a multi-piece region, in display pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieceSize {
    pub width: f64,
    pub height: f64,
}

/// A region under the cursor, as reported by detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedRegion {
    pub id: String,
    #[serde(default)]
    pub is_very_small: bool,
}

impl DetectedRegion {
    pub fn new(id: impl Into<String>, is_very_small: bool) -> Self {
        DetectedRegion {
            id: id.into(),
            is_very_small,
        }
    }
}

/// Region box in map space, annotated for the debug overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugBoundingBox {
    pub region_id: String,
    pub bounds: Bounds,
    pub importance: f64,
    pub was_accepted: bool,
}

/// Outcome of one zoom search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub zoom: f64,
    pub found_good_zoom: bool,
    pub bounding_boxes: Vec<DebugBoundingBox>,
}

impl SearchResult {
    pub fn accepted_box(&self) -> Option<&DebugBoundingBox> {
        self.bounding_boxes.iter().find(|b| b.was_accepted)
    }
}

/// Zoom series searched from `max_zoom` down to `min_zoom`, multiplying by `zoom_step`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ZoomConfigFields", into = "ZoomConfigFields")]
pub struct ZoomConfig {
    max_zoom: f64,
    min_zoom: f64,
    zoom_step: f64,
}

impl ZoomConfig {
    /// Requires `0 < min_zoom <= max_zoom` (finite) and `0 < zoom_step < 1`.
    pub fn new(max_zoom: f64, min_zoom: f64, zoom_step: f64) -> Result<Self, ZoomError> {
        if !min_zoom.is_finite() || !max_zoom.is_finite() {
            return Err(ZoomError::InvalidConfig(format!(
                "zoom bounds must be finite (min {}, max {})",
                min_zoom, max_zoom
            )));
        }
        if min_zoom <= 0.0 {
            return Err(ZoomError::InvalidConfig(format!(
                "min_zoom must be positive, got {}",
                min_zoom
            )));
        }
        if min_zoom > max_zoom {
            return Err(ZoomError::InvalidConfig(format!(
                "min_zoom {} exceeds max_zoom {}",
                min_zoom, max_zoom
            )));
        }
        if !(zoom_step > 0.0 && zoom_step < 1.0) {
            return Err(ZoomError::InvalidConfig(format!(
                "zoom_step must be in (0, 1), got {}",
                zoom_step
            )));
        }
        Ok(ZoomConfig {
            max_zoom,
            min_zoom,
            zoom_step,
        })
    }

    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    pub fn zoom_step(&self) -> f64 {
        self.zoom_step
    }

    /// Upper bound on the number of zoom levels a search visits.
    pub fn iteration_bound(&self) -> usize {
        let levels = (self.max_zoom / self.min_zoom).ln() / (1.0 / self.zoom_step).ln();
        levels.ceil() as usize + 1
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        ZoomConfig {
            max_zoom: default_max_zoom(),
            min_zoom: default_min_zoom(),
            zoom_step: default_zoom_step(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ZoomConfigFields {
    #[serde(default = "default_max_zoom")]
    max_zoom: f64,
    #[serde(default = "default_min_zoom")]
    min_zoom: f64,
    #[serde(default = "default_zoom_step")]
    zoom_step: f64,
}

impl TryFrom<ZoomConfigFields> for ZoomConfig {
    type Error = ZoomError;

    fn try_from(fields: ZoomConfigFields) -> Result<Self, Self::Error> {
        ZoomConfig::new(fields.max_zoom, fields.min_zoom, fields.zoom_step)
    }
}

impl From<ZoomConfig> for ZoomConfigFields {
    fn from(config: ZoomConfig) -> Self {
        ZoomConfigFields {
            max_zoom: config.max_zoom,
            min_zoom: config.min_zoom,
            zoom_step: config.zoom_step,
        }
    }
}

fn default_max_zoom() -> f64 {
    1000.0
}

fn default_min_zoom() -> f64 {
    1.0
}

fn default_zoom_step() -> f64 {
    0.9
}

/// Magnifier overlay geometry relative to the map container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MagnifierFields", into = "MagnifierFields")]
pub struct MagnifierSettings {
    width_fraction: f64,
    aspect_ratio: f64,
}

impl MagnifierSettings {
    /// `width_fraction` of the container width, in (0, 1]; `aspect_ratio` is width / height.
    pub fn new(width_fraction: f64, aspect_ratio: f64) -> Result<Self, ZoomError> {
        if !(width_fraction > 0.0 && width_fraction <= 1.0) {
            return Err(ZoomError::InvalidConfig(format!(
                "magnifier width_fraction must be in (0, 1], got {}",
                width_fraction
            )));
        }
        if !(aspect_ratio > 0.0 && aspect_ratio.is_finite()) {
            return Err(ZoomError::InvalidConfig(format!(
                "magnifier aspect_ratio must be positive, got {}",
                aspect_ratio
            )));
        }
        Ok(MagnifierSettings {
            width_fraction,
            aspect_ratio,
        })
    }

    /// Magnifier (width, height) in display pixels for a container of the given width.
    pub fn size_for(&self, container_width: f64) -> (f64, f64) {
        let width = container_width * self.width_fraction;
        (width, width / self.aspect_ratio)
    }
}

impl Default for MagnifierSettings {
    fn default() -> Self {
        MagnifierSettings {
            width_fraction: default_width_fraction(),
            aspect_ratio: default_aspect_ratio(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct MagnifierFields {
    #[serde(default = "default_width_fraction")]
    width_fraction: f64,
    #[serde(default = "default_aspect_ratio")]
    aspect_ratio: f64,
}

impl TryFrom<MagnifierFields> for MagnifierSettings {
    type Error = ZoomError;

    fn try_from(fields: MagnifierFields) -> Result<Self, Self::Error> {
        MagnifierSettings::new(fields.width_fraction, fields.aspect_ratio)
    }
}

impl From<MagnifierSettings> for MagnifierFields {
    fn from(settings: MagnifierSettings) -> Self {
        MagnifierFields {
            width_fraction: settings.width_fraction,
            aspect_ratio: settings.aspect_ratio,
        }
    }
}

fn default_width_fraction() -> f64 {
    0.5
}

fn default_aspect_ratio() -> f64 {
    2.0
}

/// Engine configuration passed from JS.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub zoom: ZoomConfig,
    #[serde(default)]
    pub magnifier: MagnifierSettings,
}
