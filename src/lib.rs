//! chart-line: interval-aware sparkline component for stats dashboards.
//!
//! The crate turns a data series and the dashboard's lookback interval into
//! time labels, slice tooltips, a fixed widget configuration and a
//! backend-agnostic render frame. Drawing itself is left to a [`render::Renderer`].

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartLine, ChartLineOptions, ChartLineProps, RenderedChart};
pub use crate::core::{Interval, IntervalSource, IntervalStore};
pub use error::{ChartError, ChartResult};
