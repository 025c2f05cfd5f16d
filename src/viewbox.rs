// SVG viewBox parsing. Malformed input falls back to a 1000 x 1000 box rather than failing a frame.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ZoomError;
use crate::types::Bounds;

/// Intrinsic coordinate system of the map SVG.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        ViewBox {
            x,
            y,
            width,
            height,
        }
    }

    /// Lenient parse: anything malformed yields `ViewBox::default()`.
    pub fn parse(value: &str) -> ViewBox {
        match value.parse() {
            Ok(view_box) => view_box,
            Err(err) => {
                log::warn!("{}; using default viewBox", err);
                ViewBox::default()
            }
        }
    }

    /// Full map extent as edges.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.x + self.width, self.y, self.y + self.height)
    }
}

impl Default for ViewBox {
    fn default() -> Self {
        ViewBox::new(0.0, 0.0, 1000.0, 1000.0)
    }
}

impl FromStr for ViewBox {
    type Err = ZoomError;

    /// `min-x min-y width height`, separated by whitespace and/or commas.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ZoomError::InvalidViewBox {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let numbers = value
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<f64>().map_err(|_| invalid("non-numeric component")))
            .collect::<Result<Vec<_>, _>>()?;

        let [x, y, width, height] = numbers[..] else {
            return Err(invalid("expected 4 numbers"));
        };
        if numbers.iter().any(|n| !n.is_finite()) {
            return Err(invalid("non-finite component"));
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(invalid("width and height must be positive"));
        }

        Ok(ViewBox::new(x, y, width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_space_separated() {
        let vb = ViewBox::parse("0 0 1010 666");
        assert_eq!(vb, ViewBox::new(0.0, 0.0, 1010.0, 666.0));
    }

    #[test]
    fn parses_commas_and_negative_origin() {
        let vb = ViewBox::parse("-12.5, 30,800 , 400");
        assert_eq!(vb, ViewBox::new(-12.5, 30.0, 800.0, 400.0));
    }

    #[test]
    fn malformed_falls_back() {
        assert_eq!(ViewBox::parse(""), ViewBox::default());
        assert_eq!(ViewBox::parse("0 0 abc 10"), ViewBox::default());
        assert_eq!(ViewBox::parse("0 0 10"), ViewBox::default());
        assert_eq!(ViewBox::parse("0 0 0 10"), ViewBox::default());
        assert_eq!(ViewBox::parse("0 0 NaN 10"), ViewBox::default());
    }

    #[test]
    fn strict_parse_reports_error() {
        let err = "1 2 3".parse::<ViewBox>().unwrap_err();
        assert!(matches!(err, ZoomError::InvalidViewBox { .. }));
    }

    #[test]
    fn bounds_from_origin() {
        let vb = ViewBox::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(vb.bounds(), Bounds::new(10.0, 110.0, 20.0, 70.0));
    }
}
