use chrono::{DateTime, TimeDelta, Utc};

/// Estimate a representative step (in seconds) from positive adjacent timestamp
/// deltas in the input series.
///
/// Prefer the mode (most frequent positive delta); if there is no unique mode,
/// return the lower median.
///
/// Unique mode (900s):
///
/// ```
/// use chrono::{DateTime, Utc};
/// use gridbal_core::estimate_step_seconds;
///
/// let t = |sec: i64| DateTime::<Utc>::from_timestamp(sec, 0).unwrap();
/// // Adjacent deltas: 900,900,900,1800  => unique mode is 900
/// let ts = vec![t(0), t(900), t(1800), t(2700), t(4500)];
/// assert_eq!(estimate_step_seconds(ts), Some(900));
/// ```
///
/// The input order does not matter; duplicates are ignored. Returns `None` if
/// fewer than two distinct timestamps are present.
#[must_use]
pub fn estimate_step_seconds<I>(timestamps: I) -> Option<i64>
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    let mut ts: Vec<DateTime<Utc>> = timestamps.into_iter().collect();
    if ts.len() < 2 {
        return None;
    }
    ts.sort_unstable();

    let mut deltas: Vec<i64> = Vec::with_capacity(ts.len().saturating_sub(1));
    let mut last = ts[0];
    for cur in ts.into_iter().skip(1) {
        let dt: TimeDelta = cur - last;
        if dt > TimeDelta::zero() {
            deltas.push(dt.num_seconds());
            last = cur;
        }
    }
    if deltas.is_empty() {
        return None;
    }
    deltas.sort_unstable();

    let mut best_delta: i64 = deltas[0];
    let mut best_count: usize = 0;
    let mut num_best_candidates: usize = 0;

    let mut cur_delta: i64 = deltas[0];
    let mut cur_count: usize = 1;
    for &d in deltas.iter().skip(1) {
        if d == cur_delta {
            cur_count += 1;
            continue;
        }
        if cur_count > best_count {
            best_count = cur_count;
            best_delta = cur_delta;
            num_best_candidates = 1;
        } else if cur_count == best_count {
            num_best_candidates = num_best_candidates.saturating_add(1);
        }
        cur_delta = d;
        cur_count = 1;
    }
    if cur_count > best_count {
        best_delta = cur_delta;
        num_best_candidates = 1;
    } else if cur_count == best_count {
        num_best_candidates = num_best_candidates.saturating_add(1);
    }

    if num_best_candidates == 1 {
        return Some(best_delta);
    }

    // Lower median keeps the answer an observed cadence.
    let mid = deltas.len() / 2;
    if deltas.len() % 2 == 1 {
        Some(deltas[mid])
    } else {
        Some(deltas[mid - 1])
    }
}
