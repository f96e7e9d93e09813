use std::fmt;

use chrono::{DateTime, Datelike, Days, Local, NaiveDateTime, TimeDelta, TimeZone};
use serde::{Deserialize, Serialize};

use crate::core::Interval;
use crate::error::{ChartError, ChartResult};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Output pattern of x-axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeLabelPattern {
    /// `D MMM HH:00`, e.g. `9 Jan 15:00`. Minutes are always printed as `00`.
    DayMonthHour,
    /// `D MMM YYYY`, e.g. `12 Dec 2023`.
    DayMonthYear,
}

impl TimeLabelPattern {
    #[must_use]
    pub const fn strftime(self) -> &'static str {
        match self {
            Self::DayMonthHour => "%-d %b %H:00",
            Self::DayMonthYear => "%-d %b %Y",
        }
    }
}

/// Spacing between consecutive point indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelStep {
    Hour,
    Day,
}

/// Source of "now" for renders that do not pass it explicitly.
pub trait Clock {
    type Tz: TimeZone;

    fn now(&self) -> DateTime<Self::Tz>;
}

/// Wall-clock time in the host's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone)]
pub struct FixedClock<Tz: TimeZone>(pub DateTime<Tz>);

impl<Tz: TimeZone> Clock for FixedClock<Tz> {
    type Tz = Tz;

    fn now(&self) -> DateTime<Tz> {
        self.0.clone()
    }
}

/// Maps point indexes to timestamp labels for one interval.
///
/// The anchor is computed once from the `now` handed to [`TimeLabelFormatter::new`]:
/// * 1-day and 7-day intervals: `now - 24 * days` hours, one point per hour;
/// * any other interval: `now - (days - 1)` calendar days, one point per day.
///
/// Hourly steps are absolute time. Daily steps move the local calendar date
/// and keep the wall-clock time, so DST transitions never shift or break a
/// daily label.
///
/// Two formatters built at different instants may label the same index
/// differently when an hour or day boundary passed in between.
#[derive(Debug, Clone)]
pub struct TimeLabelFormatter<Tz: TimeZone> {
    interval: Interval,
    anchor: LabelAnchor<Tz>,
}

#[derive(Debug, Clone)]
enum LabelAnchor<Tz: TimeZone> {
    Hour(DateTime<Tz>),
    Day(NaiveDateTime),
}

impl<Tz: TimeZone> TimeLabelFormatter<Tz>
where
    Tz::Offset: fmt::Display,
{
    pub fn new(interval: Interval, now: &DateTime<Tz>) -> ChartResult<Self> {
        let days = interval.days();
        let anchor = if interval.is_hourly() {
            TimeDelta::try_hours(24 * i64::from(days))
                .and_then(|lookback| now.clone().checked_sub_signed(lookback))
                .map(LabelAnchor::Hour)
        } else {
            now.naive_local()
                .checked_sub_days(Days::new(u64::from(days - 1)))
                .map(LabelAnchor::Day)
        };
        let anchor = anchor.ok_or(ChartError::AnchorOutOfRange { interval: days })?;

        Ok(Self { interval, anchor })
    }

    #[must_use]
    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Local wall-clock time of index 0.
    #[must_use]
    pub fn anchor(&self) -> NaiveDateTime {
        match &self.anchor {
            LabelAnchor::Hour(anchor) => anchor.naive_local(),
            LabelAnchor::Day(anchor) => *anchor,
        }
    }

    #[must_use]
    pub fn step(&self) -> LabelStep {
        if self.interval.is_hourly() {
            LabelStep::Hour
        } else {
            LabelStep::Day
        }
    }

    #[must_use]
    pub fn pattern(&self) -> TimeLabelPattern {
        match self.step() {
            LabelStep::Hour => TimeLabelPattern::DayMonthHour,
            LabelStep::Day => TimeLabelPattern::DayMonthYear,
        }
    }

    /// Local wall-clock time of point `index`.
    ///
    /// Fractional indexes follow the widget's date arithmetic. Hourly: the
    /// target instant is truncated to whole milliseconds. Daily: the target
    /// day-of-month (`anchor day + index`) is truncated toward zero, so `-1.5`
    /// from the 12th lands on the 10th.
    pub fn local_time_at(&self, index: f64) -> ChartResult<NaiveDateTime> {
        if !index.is_finite() {
            return Err(ChartError::InvalidInput(format!(
                "label index must be finite, got {index}"
            )));
        }

        let out_of_range = || ChartError::TimestampOutOfRange { index };
        match &self.anchor {
            LabelAnchor::Hour(anchor) => {
                let target = (anchor.timestamp_millis() as f64 + index * MILLIS_PER_HOUR).trunc();
                if target.abs() >= i64::MAX as f64 {
                    return Err(out_of_range());
                }
                anchor
                    .timezone()
                    .timestamp_millis_opt(target as i64)
                    .single()
                    .map(|timestamp| timestamp.naive_local())
                    .ok_or_else(out_of_range)
            }
            LabelAnchor::Day(anchor) => {
                let day_of_month = f64::from(anchor.day());
                let days = (day_of_month + index).trunc() - day_of_month;
                if days.abs() >= u64::MAX as f64 {
                    return Err(out_of_range());
                }
                let shifted = if days >= 0.0 {
                    anchor.checked_add_days(Days::new(days as u64))
                } else {
                    anchor.checked_sub_days(Days::new((-days) as u64))
                };
                shifted.ok_or_else(out_of_range)
            }
        }
    }

    /// Formats the label of point `index`.
    pub fn format(&self, index: f64) -> ChartResult<String> {
        let local_time = self.local_time_at(index)?;
        Ok(local_time.format(self.pattern().strftime()).to_string())
    }
}

/// Formats a y-value the way the widget does by default: shortest decimal form.
#[must_use]
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        // Avoids printing `-0`.
        return "0".to_owned();
    }
    value.to_string()
}
