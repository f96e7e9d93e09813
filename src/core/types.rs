use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ChartError, ChartResult};

pub const DEFAULT_CHART_WIDTH: u32 = 275;
pub const DEFAULT_CHART_HEIGHT: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn validate(self) -> ChartResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_CHART_WIDTH, DEFAULT_CHART_HEIGHT)
    }
}

/// One sample: `x` is the point index inside the lookback window, `y` the value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Identified, ordered sequence of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(deserialize_with = "deserialize_series_id")]
    pub id: String,
    #[serde(rename = "data")]
    pub points: Vec<DataPoint>,
}

/// Series ids arrive either as strings or as plain numbers.
fn deserialize_series_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SeriesIdWire {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match SeriesIdWire::deserialize(deserializer)? {
        SeriesIdWire::Text(text) => text,
        SeriesIdWire::Number(number) => number.to_string(),
    })
}

impl Series {
    #[must_use]
    pub fn new(id: impl Into<String>, points: Vec<DataPoint>) -> Self {
        Self {
            id: id.into(),
            points,
        }
    }

    /// Builds a series from plain values, using each value's position as `x`.
    #[must_use]
    pub fn from_values(id: impl Into<String>, values: &[f64]) -> Self {
        let points = values
            .iter()
            .enumerate()
            .map(|(index, value)| DataPoint::new(index as f64, *value))
            .collect();
        Self::new(id, points)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Rejects non-finite coordinates and points whose `x` goes backwards.
    pub fn validate(&self) -> ChartResult<()> {
        let mut previous_x = f64::NEG_INFINITY;
        for (position, point) in self.points.iter().enumerate() {
            if !point.x.is_finite() || !point.y.is_finite() {
                return Err(ChartError::InvalidInput(format!(
                    "series `{}` point {position} must have finite x and y",
                    self.id
                )));
            }
            if point.x < previous_x {
                return Err(ChartError::InvalidInput(format!(
                    "series `{}` is not ordered: x={} follows x={previous_x}",
                    self.id, point.x
                )));
            }
            previous_x = point.x;
        }
        Ok(())
    }
}
