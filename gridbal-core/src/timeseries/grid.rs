use chrono::offset::LocalResult;
use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone, Utc};
use gridbal_types::{GridConfig, GridbalError};

use crate::model::TimePoint;

/// Canonical fixed-step timeline anchored at the unix epoch.
///
/// A timestamp belongs to the grid when it is a whole multiple of the step.
/// `tolerance` bounds how far a raw sample may sit from its nearest grid
/// instant and still be snapped onto it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeGrid {
    step_ms: i64,
    tolerance_ms: i64,
}

impl TimeGrid {
    /// Build a grid.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the step is not a positive whole number of
    /// seconds, or the tolerance is negative or exceeds half a step.
    pub fn new(step: TimeDelta, tolerance: TimeDelta) -> Result<Self, GridbalError> {
        let step_ms = step.num_milliseconds();
        let tolerance_ms = tolerance.num_milliseconds();
        if step_ms <= 0 || step_ms % 1000 != 0 {
            return Err(GridbalError::InvalidArg(format!(
                "grid step must be a positive whole number of seconds, got {step_ms}ms"
            )));
        }
        if tolerance_ms < 0 || tolerance_ms.saturating_mul(2) > step_ms {
            return Err(GridbalError::InvalidArg(format!(
                "snap tolerance {tolerance_ms}ms must be within [0, step/2]"
            )));
        }
        Ok(Self {
            step_ms,
            tolerance_ms,
        })
    }

    /// Build a grid from configuration.
    ///
    /// # Errors
    /// Same as [`TimeGrid::new`].
    pub fn from_config(cfg: &GridConfig) -> Result<Self, GridbalError> {
        Self::new(
            TimeDelta::minutes(i64::from(cfg.step_minutes)),
            TimeDelta::seconds(i64::from(cfg.snap_tolerance_seconds)),
        )
    }

    /// Grid step.
    #[must_use]
    pub fn step(&self) -> TimeDelta {
        TimeDelta::milliseconds(self.step_ms)
    }

    /// Grid step in whole seconds.
    #[must_use]
    pub const fn step_seconds(&self) -> i64 {
        self.step_ms / 1000
    }

    /// Snap `ts` onto the nearest grid instant.
    ///
    /// Exact midpoints snap down.
    ///
    /// # Errors
    /// Returns `UnalignedTimestamp` when the nearest instant is further away
    /// than the tolerance.
    pub fn snap(&self, ts: DateTime<Utc>) -> Result<TimePoint, GridbalError> {
        let t = ts.timestamp_millis();
        let rem = t.rem_euclid(self.step_ms);
        let (target, distance) = if rem <= self.step_ms - rem {
            (t - rem, rem)
        } else {
            (t - rem + self.step_ms, self.step_ms - rem)
        };
        if distance > self.tolerance_ms {
            return Err(self.unaligned(ts));
        }
        DateTime::from_timestamp_millis(target)
            .map(TimePoint::new_unchecked)
            .ok_or_else(|| self.unaligned(ts))
    }

    /// Grid slot containing `ts`: the latest grid instant not after it.
    ///
    /// # Errors
    /// Returns `UnalignedTimestamp` only when the slot start is not
    /// representable, which happens at the edge of chrono's range.
    pub fn floor(&self, ts: DateTime<Utc>) -> Result<TimePoint, GridbalError> {
        let t = ts.timestamp_millis();
        DateTime::from_timestamp_millis(t - t.rem_euclid(self.step_ms))
            .map(TimePoint::new_unchecked)
            .ok_or_else(|| self.unaligned(ts))
    }

    /// Grid instant following `p`, if representable.
    #[must_use]
    pub fn next(&self, p: TimePoint) -> Option<TimePoint> {
        p.as_datetime()
            .checked_add_signed(self.step())
            .map(TimePoint::new_unchecked)
    }

    /// Grid instants covering `[start, end]` inclusive.
    ///
    /// Unaligned bounds shrink inward to the first and last grid instants
    /// inside the interval. The result is empty when no instant qualifies.
    #[must_use]
    pub fn range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> GridRange {
        let bounds = self.floor(end).ok().and_then(|last| {
            let first = self.floor(start).ok()?;
            let first = if first.as_datetime() < start {
                self.next(first)?
            } else {
                first
            };
            (first <= last).then_some((first, last))
        });
        GridRange {
            bounds,
            step_ms: self.step_ms,
        }
    }

    fn unaligned(&self, ts: DateTime<Utc>) -> GridbalError {
        GridbalError::UnalignedTimestamp {
            ts: ts.timestamp(),
            step_seconds: self.step_seconds(),
        }
    }
}

/// Finite, restartable run of grid instants.
///
/// The range is a plain value: every call to [`GridRange::iter`] starts over
/// from the first instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRange {
    bounds: Option<(TimePoint, TimePoint)>,
    step_ms: i64,
}

impl GridRange {
    /// First instant, if any.
    #[must_use]
    pub fn first(&self) -> Option<TimePoint> {
        self.bounds.map(|(f, _)| f)
    }

    /// Last instant, if any.
    #[must_use]
    pub fn last(&self) -> Option<TimePoint> {
        self.bounds.map(|(_, l)| l)
    }

    /// Number of instants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bounds.map_or(0, |(f, l)| {
            let span = l.as_datetime().timestamp_millis() - f.as_datetime().timestamp_millis();
            usize::try_from(span / self.step_ms).map_or(0, |n| n + 1)
        })
    }

    /// True when the range holds no instant.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    /// Whether `p` is one of the range's instants.
    #[must_use]
    pub fn contains(&self, p: TimePoint) -> bool {
        self.bounds.is_some_and(|(f, l)| f <= p && p <= l)
    }

    /// Same range extended backwards so that it starts no later than `p`.
    #[must_use]
    pub fn extended_to(self, p: TimePoint) -> Self {
        let bounds = match self.bounds {
            Some((f, l)) => Some((f.min(p), l.max(p))),
            None => Some((p, p)),
        };
        Self {
            bounds,
            step_ms: self.step_ms,
        }
    }

    /// Iterate the instants from the first one.
    #[must_use]
    pub fn iter(&self) -> GridIter {
        GridIter {
            next: self.first(),
            last: self.last(),
            step: TimeDelta::milliseconds(self.step_ms),
        }
    }
}

impl IntoIterator for GridRange {
    type Item = TimePoint;
    type IntoIter = GridIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &GridRange {
    type Item = TimePoint;
    type IntoIter = GridIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`GridRange`].
#[derive(Debug, Clone)]
pub struct GridIter {
    next: Option<TimePoint>,
    last: Option<TimePoint>,
    step: TimeDelta,
}

impl Iterator for GridIter {
    type Item = TimePoint;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.next?;
        let last = self.last?;
        if cur > last {
            self.next = None;
            return None;
        }
        self.next = cur
            .as_datetime()
            .checked_add_signed(self.step)
            .map(TimePoint::new_unchecked);
        Some(cur)
    }
}

/// Number of half-hour settlement periods on the longest (DST fall-back) day.
const MAX_SETTLEMENT_PERIODS: u32 = 50;

/// UTC start of half-hourly settlement period `period` of local `date` in `tz`.
///
/// Periods are numbered from 1 at local midnight and advance by 30 minutes of
/// local wall time. Ambiguous wall times (fall-back) resolve to the earlier
/// instant; wall times skipped by a spring-forward transition are read with
/// the offset in force just before the transition.
///
/// # Errors
/// Returns `InvalidArg` for `period` outside `1..=50` or an unrepresentable date.
pub fn settlement_period_start(
    date: NaiveDate,
    period: u32,
    tz: chrono_tz::Tz,
) -> Result<DateTime<Utc>, GridbalError> {
    if period == 0 || period > MAX_SETTLEMENT_PERIODS {
        return Err(GridbalError::InvalidArg(format!(
            "settlement period {period} outside 1..={MAX_SETTLEMENT_PERIODS}"
        )));
    }
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| GridbalError::InvalidArg(format!("invalid settlement date {date}")))?;
    let wall = midnight + TimeDelta::minutes(30 * i64::from(period - 1));
    match tz.from_local_datetime(&wall) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earlier, _) => Ok(earlier.with_timezone(&Utc)),
        LocalResult::None => {
            let before = wall - TimeDelta::hours(1);
            tz.from_local_datetime(&before)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc) + TimeDelta::hours(1))
                .ok_or_else(|| {
                    GridbalError::InvalidArg(format!(
                        "wall time {wall} does not exist in {}",
                        tz.name()
                    ))
                })
        }
    }
}
