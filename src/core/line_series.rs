use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, LinearScale, Viewport};
use crate::error::ChartResult;

/// Projected line segment in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Maps one sample to pixel space. Y grows downwards from the top edge.
pub fn project_point(
    point: DataPoint,
    x_scale: LinearScale,
    y_scale: LinearScale,
    viewport: Viewport,
) -> ChartResult<(f64, f64)> {
    viewport.validate()?;
    let x = x_scale.map(point.x, 0.0, f64::from(viewport.width))?;
    let y = y_scale.map(point.y, f64::from(viewport.height), 0.0)?;
    Ok((x, y))
}

/// Projects points into adjacent straight segments (linear curve).
///
/// The function is deterministic and side-effect free so both rendering and
/// tests can consume the exact same geometry output.
pub fn project_line_segments(
    points: &[DataPoint],
    x_scale: LinearScale,
    y_scale: LinearScale,
    viewport: Viewport,
) -> ChartResult<Vec<LineSegment>> {
    if points.len() < 2 {
        return Ok(Vec::new());
    }

    let mut mapped = Vec::with_capacity(points.len());
    for point in points {
        mapped.push(project_point(*point, x_scale, y_scale, viewport)?);
    }

    let segments = mapped
        .windows(2)
        .map(|pair| LineSegment {
            x1: pair[0].0,
            y1: pair[0].1,
            x2: pair[1].0,
            y2: pair[1].1,
        })
        .collect();

    Ok(segments)
}
