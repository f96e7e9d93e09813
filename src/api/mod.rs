mod chart_line;
mod chart_options;
mod json_contract;
mod time_label_format;
mod tooltip;

pub use chart_line::{ChartLine, ChartLineProps, HoverState, RenderedChart};
pub use chart_options::{
    CROSSHAIR_STROKE, CROSSHAIR_STROKE_OPACITY, CROSSHAIR_STROKE_WIDTH, ChartLineOptions,
    ChartTheme, CrosshairLineStyle, CrosshairTheme, Curve, DEFAULT_LINE_COLOR,
    SERIES_STROKE_WIDTH,
};
pub use json_contract::{WIDGET_PAYLOAD_JSON_SCHEMA_V1, WidgetPayloadJsonContractV1};
pub use time_label_format::{
    Clock, FixedClock, LabelStep, SystemClock, TimeLabelFormatter, TimeLabelPattern, format_value,
};
pub use tooltip::{TOOLTIP_CLASS, TOOLTIP_TEXT_CLASS, TooltipContent, render_slice_tooltip};
