//! Access event entity recorded on every successful resolution.

use chrono::{DateTime, Utc};

/// One resolution of a short link.
///
/// Events are append-only. `time` is in seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessEvent {
    pub link_id: i64,
    pub time: i64,
}

impl AccessEvent {
    pub fn new(link_id: i64, time: i64) -> Self {
        Self { link_id, time }
    }

    /// The event time as a UTC timestamp, if representable.
    pub fn at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time, 0)
    }
}
