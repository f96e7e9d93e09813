use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{
    DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH, IntervalSource, LinearScale, Series, Viewport,
    project_line_segments,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{FormattedPoint, FormattedSeries, Slice, build_slices, nearest_slice};
use crate::render::{Color, LinePrimitive, RectPrimitive, RenderFrame, Renderer};

use super::chart_options::{DEFAULT_LINE_COLOR, SERIES_STROKE_WIDTH};
use super::time_label_format::{Clock, TimeLabelFormatter, format_value};
use super::tooltip::{TooltipContent, render_slice_tooltip};
use super::ChartLineOptions;

const DEBUG_MESH_COLOR: Color = Color::rgba(1.0, 0.0, 0.0, 0.75);
const DEBUG_MESH_STROKE_WIDTH: f64 = 1.0;

fn default_color() -> String {
    DEFAULT_LINE_COLOR.to_owned()
}

fn default_width() -> u32 {
    DEFAULT_CHART_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_CHART_HEIGHT
}

/// Inputs of the sparkline component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLineProps {
    pub data: Vec<Series>,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

impl ChartLineProps {
    /// Props with default color (`black`) and size (275x64).
    #[must_use]
    pub fn new(data: Vec<Series>) -> Self {
        Self {
            data,
            color: default_color(),
            width: default_width(),
            height: default_height(),
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.viewport().validate()?;
        Color::parse(&self.color)?;

        let mut ids = HashSet::with_capacity(self.data.len());
        for series in &self.data {
            if !ids.insert(series.id.as_str()) {
                return Err(ChartError::InvalidInput(format!(
                    "duplicate series id `{}`",
                    series.id
                )));
            }
            series.validate()?;
        }
        Ok(())
    }
}

/// Time-series sparkline whose x labels follow the dashboard interval.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLine {
    props: ChartLineProps,
}

impl ChartLine {
    pub fn new(props: ChartLineProps) -> ChartResult<Self> {
        if let Err(err) = props.validate() {
            warn!(error = %err, "rejecting chart line props");
            return Err(err);
        }
        Ok(Self { props })
    }

    #[must_use]
    pub fn props(&self) -> &ChartLineProps {
        &self.props
    }

    /// Renders against the interval read from `source` right now, anchoring
    /// labels at `now`.
    pub fn render<S, Tz>(&self, source: &S, now: &DateTime<Tz>) -> ChartResult<RenderedChart<Tz>>
    where
        S: IntervalSource + ?Sized,
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let interval = source.interval();
        let formatter = TimeLabelFormatter::new(interval, now)?;
        let options = ChartLineOptions::new(&self.props.color, self.props.viewport())?;

        let mut series = Vec::with_capacity(self.props.data.len());
        for item in &self.props.data {
            let mut points = Vec::with_capacity(item.points.len());
            for point in &item.points {
                points.push(FormattedPoint {
                    x: point.x,
                    y: point.y,
                    x_formatted: formatter.format(point.x)?,
                    y_formatted: format_value(point.y),
                });
            }
            series.push(FormattedSeries {
                id: item.id.clone(),
                points,
            });
        }

        let x_scale = options
            .x_scale
            .resolve(self.props.data.iter().flat_map(|s| s.points.iter().map(|p| p.x)))?;
        let y_scale = options
            .y_scale
            .resolve(self.props.data.iter().flat_map(|s| s.points.iter().map(|p| p.y)))?;
        let slices = build_slices(&series, x_scale, y_scale, options.viewport())?;

        debug!(
            %interval,
            series = series.len(),
            slices = slices.len(),
            pattern = ?formatter.pattern(),
            "rendered chart line"
        );

        Ok(RenderedChart {
            options,
            formatter,
            series,
            slices,
            x_scale,
            y_scale,
        })
    }

    /// Same as [`ChartLine::render`], taking `now` from `clock`.
    pub fn render_now<S, C>(&self, source: &S, clock: &C) -> ChartResult<RenderedChart<C::Tz>>
    where
        S: IntervalSource + ?Sized,
        C: Clock,
        <C::Tz as TimeZone>::Offset: fmt::Display,
    {
        self.render(source, &clock.now())
    }
}

/// Slice under the pointer and its tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverState {
    pub slice: Slice,
    pub tooltip: Option<TooltipContent>,
}

/// Output of one render: widget options, formatted data and hover support.
#[derive(Debug, Clone)]
pub struct RenderedChart<Tz: TimeZone> {
    options: ChartLineOptions,
    formatter: TimeLabelFormatter<Tz>,
    series: Vec<FormattedSeries>,
    slices: Vec<Slice>,
    x_scale: LinearScale,
    y_scale: LinearScale,
}

impl<Tz> RenderedChart<Tz>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    #[must_use]
    pub fn options(&self) -> &ChartLineOptions {
        &self.options
    }

    #[must_use]
    pub fn formatter(&self) -> &TimeLabelFormatter<Tz> {
        &self.formatter
    }

    #[must_use]
    pub fn series(&self) -> &[FormattedSeries] {
        &self.series
    }

    #[must_use]
    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    #[must_use]
    pub fn x_scale(&self) -> LinearScale {
        self.x_scale
    }

    #[must_use]
    pub fn y_scale(&self) -> LinearScale {
        self.y_scale
    }

    /// x-axis label of point `index`.
    pub fn format_x(&self, index: f64) -> ChartResult<String> {
        self.formatter.format(index)
    }

    /// Resolves the slice nearest to `pointer_x` (pixels from the left edge).
    #[must_use]
    pub fn hover(&self, pointer_x: f64) -> Option<HoverState> {
        let slice = nearest_slice(&self.slices, pointer_x, self.options.viewport())?;
        trace!(pointer_x, slice = slice.id, "hover slice");
        Some(HoverState {
            slice: slice.clone(),
            tooltip: render_slice_tooltip(slice),
        })
    }

    /// Builds the draw list: series lines, slice debug bands and, while
    /// hovering, the crosshair and tooltip text.
    pub fn build_render_frame(&self, hover: Option<&HoverState>) -> ChartResult<RenderFrame> {
        let viewport = self.options.viewport();
        let height = f64::from(viewport.height);
        let series_color = self.options.series_color()?;
        let mut frame = RenderFrame::new(viewport);

        for series in &self.series {
            let points: Vec<_> = series.points.iter().map(FormattedPoint::data_point).collect();
            for segment in project_line_segments(&points, self.x_scale, self.y_scale, viewport)? {
                frame = frame.with_line(LinePrimitive::new(
                    segment.x1,
                    segment.y1,
                    segment.x2,
                    segment.y2,
                    SERIES_STROKE_WIDTH,
                    series_color,
                ));
            }
        }

        if self.options.debug_mesh {
            for slice in &self.slices {
                frame = frame.with_rect(RectPrimitive::new(
                    slice.x0_px,
                    0.0,
                    slice.width_px,
                    height,
                    DEBUG_MESH_STROKE_WIDTH,
                    DEBUG_MESH_COLOR,
                ));
            }
        }

        if let Some(hover) = hover {
            let line_style = &self.options.theme.crosshair.line;
            let crosshair_color = line_style.color()?;
            let slice = &hover.slice;

            frame = frame.with_line(LinePrimitive::new(
                slice.x_px,
                0.0,
                slice.x_px,
                height,
                line_style.stroke_width,
                crosshair_color,
            ));
            if let Some(tooltip) = &hover.tooltip {
                for text in tooltip.text_primitives(slice.x_px) {
                    frame = frame.with_text(text);
                }
            }
        }

        Ok(frame)
    }

    /// Hands the current frame to the widget backend.
    pub fn draw<R: Renderer>(
        &self,
        renderer: &mut R,
        hover: Option<&HoverState>,
    ) -> ChartResult<()> {
        let frame = self.build_render_frame(hover)?;
        trace!(
            lines = frame.lines.len(),
            rects = frame.rects.len(),
            texts = frame.texts.len(),
            "draw chart line"
        );
        renderer.render(&frame)
    }
}
