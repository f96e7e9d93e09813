pub mod interval;
pub mod line_series;
pub mod scale;
pub mod types;

pub use interval::{Interval, IntervalListenerFn, IntervalSource, IntervalStore, SubscriptionId};
pub use line_series::{LineSegment, project_line_segments, project_point};
pub use scale::{LinearScale, ScaleBound, ScaleKind, ScaleSpec};
pub use types::{DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH, DataPoint, Series, Viewport};
