use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{ChartError, ChartResult};

/// Lookback window in whole days. Always `>= 1`.
///
/// Zero is rejected even though a zero-day window would simply anchor daily
/// labels one day ahead of now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Interval(u32);

impl Interval {
    pub const DAY: Self = Self(1);
    pub const WEEK: Self = Self(7);
    pub const MONTH: Self = Self(30);
    pub const QUARTER: Self = Self(90);

    pub fn new(days: u32) -> ChartResult<Self> {
        if days == 0 {
            return Err(ChartError::InvalidInterval(days));
        }
        Ok(Self(days))
    }

    #[must_use]
    pub fn days(self) -> u32 {
        self.0
    }

    /// 1-day and 7-day windows are sampled hourly; everything else daily.
    #[must_use]
    pub fn is_hourly(self) -> bool {
        self.0 == 1 || self.0 == 7
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::DAY
    }
}

impl TryFrom<u32> for Interval {
    type Error = ChartError;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}

impl From<Interval> for u32 {
    fn from(interval: Interval) -> Self {
        interval.0
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d", self.0)
    }
}

/// Read-only access to the externally owned interval setting.
///
/// Implementations must return a consistent snapshot; the chart calls this
/// once per render.
pub trait IntervalSource {
    fn interval(&self) -> Interval;
}

impl IntervalSource for Interval {
    fn interval(&self) -> Interval {
        *self
    }
}

impl<T: IntervalSource + ?Sized> IntervalSource for &T {
    fn interval(&self) -> Interval {
        (**self).interval()
    }
}

pub type IntervalListenerFn = Arc<dyn Fn(Interval) + Send + Sync + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct IntervalStoreState {
    interval: Interval,
    next_subscription: u64,
    listeners: IndexMap<SubscriptionId, IntervalListenerFn>,
}

/// Shared interval cell with change notification.
///
/// Cloning yields another handle to the same value.
#[derive(Clone)]
pub struct IntervalStore {
    state: Arc<RwLock<IntervalStoreState>>,
}

impl IntervalStore {
    #[must_use]
    pub fn new(interval: Interval) -> Self {
        Self {
            state: Arc::new(RwLock::new(IntervalStoreState {
                interval,
                next_subscription: 0,
                listeners: IndexMap::new(),
            })),
        }
    }

    #[must_use]
    pub fn get(&self) -> Interval {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .interval
    }

    /// Stores `interval` and notifies subscribers in subscription order.
    ///
    /// Returns `false` and notifies nobody when the value is unchanged.
    pub fn set(&self, interval: Interval) -> bool {
        let listeners: Vec<IntervalListenerFn> = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            if state.interval == interval {
                trace!(%interval, "interval unchanged");
                return false;
            }
            state.interval = interval;
            state.listeners.values().cloned().collect()
        };

        debug!(%interval, listeners = listeners.len(), "interval changed");
        for listener in listeners {
            listener(interval);
        }
        true
    }

    pub fn subscribe(&self, listener: IntervalListenerFn) -> SubscriptionId {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let id = SubscriptionId(state.next_subscription);
        state.next_subscription += 1;
        state.listeners.insert(id, listener);
        id
    }

    /// Returns `true` when `id` was subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners
            .shift_remove(&id)
            .is_some()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners
            .len()
    }
}

impl Default for IntervalStore {
    fn default() -> Self {
        Self::new(Interval::default())
    }
}

impl fmt::Debug for IntervalStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntervalStore")
            .field("interval", &self.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl IntervalSource for IntervalStore {
    fn interval(&self) -> Interval {
        self.get()
    }
}
