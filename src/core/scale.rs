use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Bound of a scale domain: either pinned or derived from data.
///
/// Serializes the way the widget expects it: a number, or the string `"auto"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScaleBoundWire", into = "ScaleBoundWire")]
pub enum ScaleBound {
    Fixed(f64),
    Auto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ScaleBoundWire {
    Value(f64),
    Keyword(String),
}

impl From<ScaleBound> for ScaleBoundWire {
    fn from(bound: ScaleBound) -> Self {
        match bound {
            ScaleBound::Fixed(value) => Self::Value(value),
            ScaleBound::Auto => Self::Keyword("auto".to_owned()),
        }
    }
}

impl TryFrom<ScaleBoundWire> for ScaleBound {
    type Error = String;

    fn try_from(wire: ScaleBoundWire) -> Result<Self, Self::Error> {
        match wire {
            ScaleBoundWire::Value(value) if value.is_finite() => Ok(Self::Fixed(value)),
            ScaleBoundWire::Value(value) => Err(format!("scale bound must be finite, got {value}")),
            ScaleBoundWire::Keyword(keyword) if keyword == "auto" => Ok(Self::Auto),
            ScaleBoundWire::Keyword(keyword) => Err(format!("unknown scale bound `{keyword}`")),
        }
    }
}

impl ScaleBound {
    fn resolve(self, data_extreme: Option<f64>, fallback: f64) -> f64 {
        match self {
            Self::Fixed(value) => value,
            Self::Auto => data_extreme.unwrap_or(fallback),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    Linear,
}

/// Declarative scale description handed to the widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleSpec {
    #[serde(rename = "type")]
    pub kind: ScaleKind,
    pub min: ScaleBound,
    pub max: ScaleBound,
}

impl ScaleSpec {
    #[must_use]
    pub const fn linear_from_zero() -> Self {
        Self {
            kind: ScaleKind::Linear,
            min: ScaleBound::Fixed(0.0),
            max: ScaleBound::Auto,
        }
    }

    /// Resolves the bounds against data values into a usable scale.
    ///
    /// A degenerate domain (no data, or max equal to min) is widened by one
    /// unit so projection stays finite.
    pub fn resolve(self, values: impl IntoIterator<Item = f64>) -> ChartResult<LinearScale> {
        let mut data_min: Option<f64> = None;
        let mut data_max: Option<f64> = None;
        for value in values {
            data_min = Some(data_min.map_or(value, |current| current.min(value)));
            data_max = Some(data_max.map_or(value, |current| current.max(value)));
        }

        let start = self.min.resolve(data_min, 0.0);
        let mut end = self.max.resolve(data_max, start);
        if end <= start {
            end = start + 1.0;
        }
        LinearScale::new(start, end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    /// Maps `value` linearly onto `[range_start, range_end]`.
    pub fn map(self, value: f64, range_start: f64, range_end: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Ok(range_start + normalized * (range_end - range_start))
    }
}
