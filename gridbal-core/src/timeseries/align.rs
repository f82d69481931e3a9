use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use gridbal_types::{GridbalError, ResampleMethod};
use rust_decimal::Decimal;

use super::grid::{GridRange, TimeGrid};
use super::infer::estimate_step_seconds;
use crate::model::TimePoint;

/// Decimal places kept after aggregating samples.
pub const ROUND_DP: u32 = 3;

/// A series whose every point lies on one grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedSeries {
    grid: TimeGrid,
    points: BTreeMap<TimePoint, Decimal>,
    dropped: usize,
}

impl AlignedSeries {
    /// Empty series on `grid`.
    #[must_use]
    pub const fn empty(grid: TimeGrid) -> Self {
        Self {
            grid,
            points: BTreeMap::new(),
            dropped: 0,
        }
    }

    /// Series on `grid` holding already-aligned points; later duplicates win.
    pub fn from_points<I>(grid: TimeGrid, points: I) -> Self
    where
        I: IntoIterator<Item = (TimePoint, Decimal)>,
    {
        Self {
            grid,
            points: points.into_iter().collect(),
            dropped: 0,
        }
    }

    /// Grid the series lives on.
    #[must_use]
    pub const fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Value at `p`, if present.
    #[must_use]
    pub fn get(&self, p: TimePoint) -> Option<Decimal> {
        self.points.get(&p).copied()
    }

    /// Present points in time order.
    pub fn iter(&self) -> impl Iterator<Item = (TimePoint, Decimal)> + '_ {
        self.points.iter().map(|(p, v)| (*p, *v))
    }

    /// Number of present points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when no point is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Earliest present point.
    #[must_use]
    pub fn first_point(&self) -> Option<TimePoint> {
        self.points.keys().next().copied()
    }

    /// Raw samples dropped while aligning because they did not snap.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    pub(crate) fn insert(&mut self, p: TimePoint, v: Decimal) {
        self.points.insert(p, v);
    }
}

/// Align raw samples onto `grid` using the arithmetic mean for finer inputs.
///
/// # Errors
/// See [`resample_with`].
pub fn resample(
    samples: &[(DateTime<Utc>, Decimal)],
    grid: &TimeGrid,
) -> Result<AlignedSeries, GridbalError> {
    resample_with(samples, grid, ResampleMethod::Mean)
}

/// Align raw samples onto `grid`, inferring their native step.
///
/// - Native step equal to the grid step: every sample is snapped; samples
///   outside the snap tolerance are dropped and counted. Missing slots are
///   left absent.
/// - Native step finer than the grid step: samples are aggregated per slot
///   with `method`.
///
/// The series counts as coarser only when no two adjacent samples are within
/// one grid step of each other. It counts as finer when at least half of the
/// occupied slots hold several samples, so an isolated off-grid sample is
/// dropped rather than averaged in. Use [`resample_native`] when the source
/// declares its step.
///
/// Slots receiving more than one sample hold the aggregate rounded to
/// [`ROUND_DP`] places (half to even).
///
/// # Errors
/// Returns `IncompatibleStep` when the series is coarser than the grid.
pub fn resample_with(
    samples: &[(DateTime<Utc>, Decimal)],
    grid: &TimeGrid,
    method: ResampleMethod,
) -> Result<AlignedSeries, GridbalError> {
    resample_native(samples, grid, method, None)
}

/// Align raw samples onto `grid` using the step declared by their source.
///
/// `native_seconds` of `None` falls back to inference as in [`resample_with`].
///
/// # Errors
/// Returns `IncompatibleStep` when the native step is coarser than the grid.
pub fn resample_native(
    samples: &[(DateTime<Utc>, Decimal)],
    grid: &TimeGrid,
    method: ResampleMethod,
    native_seconds: Option<i64>,
) -> Result<AlignedSeries, GridbalError> {
    let cadence = match native_seconds {
        Some(n) => declared_cadence(n, grid.step_seconds())?,
        None => infer_cadence(samples, grid)?,
    };
    match cadence {
        Cadence::OnGrid => Ok(snap_samples(samples, grid)),
        Cadence::Finer(n) => match method {
            ResampleMethod::Mean => mean_by_slot(samples, grid),
            ResampleMethod::TimeWeighted => time_weighted(samples, grid, n),
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cadence {
    OnGrid,
    Finer(i64),
}

const fn incompatible(native_seconds: i64, target_seconds: i64) -> GridbalError {
    GridbalError::IncompatibleStep {
        native_seconds,
        target_seconds,
    }
}

fn declared_cadence(native: i64, target: i64) -> Result<Cadence, GridbalError> {
    match native.cmp(&target) {
        core::cmp::Ordering::Greater => Err(incompatible(native, target)),
        core::cmp::Ordering::Equal => Ok(Cadence::OnGrid),
        core::cmp::Ordering::Less => Ok(Cadence::Finer(native.max(1))),
    }
}

fn infer_cadence(
    samples: &[(DateTime<Utc>, Decimal)],
    grid: &TimeGrid,
) -> Result<Cadence, GridbalError> {
    let target = grid.step_seconds();
    let mut ts: Vec<DateTime<Utc>> = samples.iter().map(|(t, _)| *t).collect();
    ts.sort_unstable();
    ts.dedup();
    let Some(min_delta) = ts.windows(2).map(|w| (w[1] - w[0]).num_seconds()).min() else {
        return Ok(Cadence::OnGrid);
    };
    if min_delta > target {
        let native = estimate_step_seconds(ts).unwrap_or(min_delta);
        return Err(incompatible(native, target));
    }

    // Samples that snap count toward their grid instant, the rest toward
    // the slot containing them.
    let mut per_slot: BTreeMap<TimePoint, usize> = BTreeMap::new();
    for t in &ts {
        let slot = match grid.snap(*t) {
            Ok(p) => p,
            Err(_) => grid.floor(*t)?,
        };
        *per_slot.entry(slot).or_default() += 1;
    }
    let shared = per_slot.values().filter(|n| **n > 1).count();
    if shared * 2 < per_slot.len() {
        return Ok(Cadence::OnGrid);
    }
    let native = estimate_step_seconds(ts)
        .unwrap_or(min_delta)
        .clamp(1, target);
    Ok(Cadence::Finer(native))
}

fn snap_samples(samples: &[(DateTime<Utc>, Decimal)], grid: &TimeGrid) -> AlignedSeries {
    let mut buckets: BTreeMap<TimePoint, Vec<Decimal>> = BTreeMap::new();
    let mut dropped = 0usize;
    for (ts, v) in samples {
        match grid.snap(*ts) {
            Ok(p) => buckets.entry(p).or_default().push(*v),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(error = %_e, "dropping unaligned sample");
                dropped += 1;
            }
        }
    }
    AlignedSeries {
        grid: *grid,
        points: buckets
            .into_iter()
            .map(|(p, vs)| (p, mean(&vs)))
            .collect(),
        dropped,
    }
}

fn mean_by_slot(
    samples: &[(DateTime<Utc>, Decimal)],
    grid: &TimeGrid,
) -> Result<AlignedSeries, GridbalError> {
    let mut buckets: BTreeMap<TimePoint, Vec<Decimal>> = BTreeMap::new();
    for (ts, v) in samples {
        buckets.entry(grid.floor(*ts)?).or_default().push(*v);
    }
    Ok(AlignedSeries {
        grid: *grid,
        points: buckets
            .into_iter()
            .map(|(p, vs)| (p, mean(&vs).round_dp(ROUND_DP)))
            .collect(),
        dropped: 0,
    })
}

fn time_weighted(
    samples: &[(DateTime<Utc>, Decimal)],
    grid: &TimeGrid,
    native_seconds: i64,
) -> Result<AlignedSeries, GridbalError> {
    let native_ms = native_seconds.saturating_mul(1000);
    let step_ms = grid.step_seconds().saturating_mul(1000);
    // slot -> (weighted sum, covered milliseconds)
    let mut acc: BTreeMap<TimePoint, (Decimal, i64)> = BTreeMap::new();
    for (ts, v) in samples {
        let mut cursor = ts.timestamp_millis();
        let end = cursor.saturating_add(native_ms);
        while cursor < end {
            let slot_start = cursor - cursor.rem_euclid(step_ms);
            let seg_end = end.min(slot_start + step_ms);
            let weight = seg_end - cursor;
            let at = DateTime::from_timestamp_millis(cursor)
                .ok_or_else(|| GridbalError::Data(format!("unrepresentable instant {cursor}ms")))?;
            let slot = grid.floor(at)?;
            let e = acc.entry(slot).or_insert((Decimal::ZERO, 0));
            e.0 += *v * Decimal::from(weight);
            e.1 += weight;
            cursor = seg_end;
        }
    }
    Ok(AlignedSeries {
        grid: *grid,
        points: acc
            .into_iter()
            .filter(|(_, (_, w))| *w > 0)
            .map(|(p, (sum, w))| (p, (sum / Decimal::from(w)).round_dp(ROUND_DP)))
            .collect(),
        dropped: 0,
    })
}

fn mean(values: &[Decimal]) -> Decimal {
    match values {
        [] => Decimal::ZERO,
        [single] => *single,
        many => {
            let total: Decimal = many.iter().sum();
            (total / Decimal::from(many.len())).round_dp(ROUND_DP)
        }
    }
}

/// Forward-fill absent slots from the latest present value, at most
/// `max_gap` consecutive slots at a time.
///
/// The walk covers every slot from the earlier of the series' first point and
/// `range`'s first instant, up to `range`'s last instant. Once a run of fills
/// exceeds `max_gap`, later absent slots stay absent until a real value is
/// seen. Slots before the first real value are never filled.
#[must_use]
pub fn gap_fill(series: &AlignedSeries, range: &GridRange, max_gap: usize) -> AlignedSeries {
    let mut out = series.clone();
    let walk = match (series.first_point(), range.is_empty()) {
        (_, true) => return out,
        (Some(first), false) => range.extended_to(first),
        (None, false) => *range,
    };
    let Some(last) = range.last() else {
        return out;
    };

    let mut carried: Option<Decimal> = None;
    let mut run = 0usize;
    for p in walk.iter().take_while(|p| *p <= last) {
        if let Some(v) = series.get(p) {
            carried = Some(v);
            run = 0;
            continue;
        }
        run = run.saturating_add(1);
        if run <= max_gap
            && let Some(v) = carried
        {
            out.insert(p, v);
        }
    }
    out
}
