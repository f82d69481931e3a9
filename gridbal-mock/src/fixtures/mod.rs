pub mod capacity;
pub mod consumption;
pub mod exchange;
pub mod production;
pub mod supplemental;

use chrono::{DateTime, Utc};
use gridbal_core::Window;

/// Instants on a `step_seconds` cadence inside `window`, both ends inclusive.
pub fn slots(window: Window, step_seconds: i64) -> impl Iterator<Item = DateTime<Utc>> {
    let start = window.start().timestamp();
    let first = start + (step_seconds - start.rem_euclid(step_seconds)) % step_seconds;
    let end = window.end().timestamp();
    (first..=end)
        .step_by(usize::try_from(step_seconds).unwrap_or(usize::MAX))
        .filter_map(|s| DateTime::from_timestamp(s, 0))
}

/// Hour of day in UTC.
pub fn hour_of(ts: DateTime<Utc>) -> i64 {
    ts.timestamp().rem_euclid(86_400) / 3_600
}
