use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{DataPoint, LinearScale, Viewport, project_point};
use crate::error::ChartResult;

/// Axis along which hover slices are cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SliceAxis {
    X,
}

/// Crosshair drawn while hovering: a vertical guide at the slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrosshairType {
    X,
}

/// A sample together with its display strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedPoint {
    pub x: f64,
    pub y: f64,
    pub x_formatted: String,
    pub y_formatted: String,
}

impl FormattedPoint {
    #[must_use]
    pub fn data_point(&self) -> DataPoint {
        DataPoint::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedSeries {
    pub id: String,
    pub points: Vec<FormattedPoint>,
}

/// One point inside a hover slice.
#[derive(Debug, Clone, PartialEq)]
pub struct SlicePoint {
    pub series_id: String,
    pub series_index: usize,
    pub point_index: usize,
    pub y_px: f64,
    pub data: FormattedPoint,
}

/// All points sharing one x-position, plus the pixel band that selects them.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub id: usize,
    pub x: f64,
    pub x_px: f64,
    pub x0_px: f64,
    pub width_px: f64,
    pub points: SmallVec<[SlicePoint; 2]>,
}

impl Slice {
    #[must_use]
    pub fn contains_pixel(&self, pointer_x: f64) -> bool {
        pointer_x >= self.x0_px && pointer_x <= self.x0_px + self.width_px
    }
}

/// Groups points of every series by x-position, in ascending x.
///
/// Points keep series order inside a slice. Each slice owns the horizontal
/// band between the midpoints to its neighbours; the outermost slices extend
/// to the chart edges.
pub fn build_slices(
    series: &[FormattedSeries],
    x_scale: LinearScale,
    y_scale: LinearScale,
    viewport: Viewport,
) -> ChartResult<Vec<Slice>> {
    let mut grouped: IndexMap<OrderedFloat<f64>, (f64, SmallVec<[SlicePoint; 2]>)> =
        IndexMap::new();

    for (series_index, item) in series.iter().enumerate() {
        for (point_index, point) in item.points.iter().enumerate() {
            let (x_px, y_px) = project_point(point.data_point(), x_scale, y_scale, viewport)?;
            let entry = grouped
                .entry(OrderedFloat(point.x))
                .or_insert_with(|| (x_px, SmallVec::new()));
            entry.1.push(SlicePoint {
                series_id: item.id.clone(),
                series_index,
                point_index,
                y_px,
                data: point.clone(),
            });
        }
    }
    grouped.sort_keys();

    let width = f64::from(viewport.width);
    let centers: Vec<f64> = grouped.values().map(|(x_px, _)| *x_px).collect();
    let mut slices = Vec::with_capacity(grouped.len());
    for (id, (x, (x_px, points))) in grouped.into_iter().enumerate() {
        let x0_px = if id == 0 {
            0.0
        } else {
            (centers[id - 1] + x_px) / 2.0
        };
        let x1_px = centers
            .get(id + 1)
            .map_or(width, |next| (x_px + next) / 2.0);
        slices.push(Slice {
            id,
            x: x.into_inner(),
            x_px,
            x0_px,
            width_px: (x1_px - x0_px).max(0.0),
            points,
        });
    }

    Ok(slices)
}

/// Picks the slice closest to the pointer along x.
///
/// Returns `None` for an empty chart or a pointer outside `[0, width]`.
#[must_use]
pub fn nearest_slice(slices: &[Slice], pointer_x: f64, viewport: Viewport) -> Option<&Slice> {
    if !pointer_x.is_finite() || pointer_x < 0.0 || pointer_x > f64::from(viewport.width) {
        return None;
    }
    slices
        .iter()
        .min_by_key(|slice| OrderedFloat((slice.x_px - pointer_x).abs()))
}
