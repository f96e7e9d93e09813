use serde::{Deserialize, Serialize};

use crate::core::{ScaleSpec, Viewport};
use crate::error::ChartResult;
use crate::interaction::{CrosshairType, SliceAxis};
use crate::render::Color;

pub const DEFAULT_LINE_COLOR: &str = "black";
pub const CROSSHAIR_STROKE: &str = "black";
pub const CROSSHAIR_STROKE_WIDTH: f64 = 1.0;
pub const CROSSHAIR_STROKE_OPACITY: f64 = 0.35;
pub const SERIES_STROKE_WIDTH: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Curve {
    Linear,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosshairLineStyle {
    pub stroke: String,
    pub stroke_width: f64,
    pub stroke_opacity: f64,
}

impl CrosshairLineStyle {
    /// Stroke color with the opacity folded into alpha.
    pub fn color(&self) -> ChartResult<Color> {
        Ok(Color::parse(&self.stroke)?.with_alpha(self.stroke_opacity))
    }
}

impl Default for CrosshairLineStyle {
    fn default() -> Self {
        Self {
            stroke: CROSSHAIR_STROKE.to_owned(),
            stroke_width: CROSSHAIR_STROKE_WIDTH,
            stroke_opacity: CROSSHAIR_STROKE_OPACITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CrosshairTheme {
    pub line: CrosshairLineStyle,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartTheme {
    pub crosshair: CrosshairTheme,
}

/// Widget configuration of the sparkline.
///
/// Everything except size and series color is fixed by
/// [`ChartLineOptions::new`]. `enable_area` stays `false` until filled areas
/// render correctly in the embedding dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartLineOptions {
    pub width: u32,
    pub height: u32,
    pub colors: Vec<String>,
    pub enable_area: bool,
    pub animate: bool,
    pub enable_slices: SliceAxis,
    pub curve: Curve,
    pub debug_mesh: bool,
    pub x_scale: ScaleSpec,
    pub y_scale: ScaleSpec,
    pub crosshair_type: CrosshairType,
    pub theme: ChartTheme,
    /// `false` hides the axis.
    pub axis_left: bool,
    /// `false` hides the axis.
    pub axis_bottom: bool,
    pub enable_grid_x: bool,
    pub enable_grid_y: bool,
    pub enable_points: bool,
}

impl ChartLineOptions {
    pub fn new(color: &str, viewport: Viewport) -> ChartResult<Self> {
        viewport.validate()?;
        Color::parse(color)?;

        Ok(Self {
            width: viewport.width,
            height: viewport.height,
            colors: vec![color.to_owned()],
            enable_area: false,
            animate: true,
            enable_slices: SliceAxis::X,
            curve: Curve::Linear,
            debug_mesh: true,
            x_scale: ScaleSpec::linear_from_zero(),
            y_scale: ScaleSpec::linear_from_zero(),
            crosshair_type: CrosshairType::X,
            theme: ChartTheme::default(),
            axis_left: false,
            axis_bottom: false,
            enable_grid_x: false,
            enable_grid_y: false,
            enable_points: false,
        })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    /// Parsed color of the single series.
    pub fn series_color(&self) -> ChartResult<Color> {
        let raw = self.colors.first().map_or(DEFAULT_LINE_COLOR, String::as_str);
        Color::parse(raw)
    }
}
