use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use gridbal_types::{GridConfig, GridbalError, ResampleMethod, ZoneKey, ZonePair};
use rust_decimal::Decimal;

use crate::model::{ExchangeLeg, Sampling, TimePoint};
use crate::timeseries::align::{AlignedSeries, gap_fill, resample_with};
use crate::timeseries::grid::{GridRange, TimeGrid};

/// Signed flow of `leg` as seen from `target`: positive means import.
///
/// # Errors
/// Returns `UnrelatedZone` when `target` is neither end of the leg's pair.
pub fn normalize_direction(leg: &ExchangeLeg, target: &ZoneKey) -> Result<Decimal, GridbalError> {
    if leg.pair.second() == target {
        Ok(leg.net_flow)
    } else if leg.pair.first() == target {
        Ok(-leg.net_flow)
    } else {
        Err(GridbalError::UnrelatedZone {
            zone: target.to_string(),
            pair: leg.pair.key(),
        })
    }
}

/// Net import of a zone summed over all of its borders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetImport {
    /// Aggregated series; positive is net inflow.
    pub series: AlignedSeries,
    /// Pairs whose source reports instantaneous snapshots.
    pub snapshot_pairs: Vec<ZonePair>,
    /// Leg samples dropped while aligning.
    pub dropped_unaligned: usize,
}

/// Combines exchange legs into one net-import series for a target zone.
#[derive(Debug, Clone, Copy)]
pub struct ExchangeAggregator {
    grid: TimeGrid,
    method: ResampleMethod,
    max_gap: usize,
}

impl ExchangeAggregator {
    /// Aggregator aligning legs on `grid`.
    #[must_use]
    pub const fn new(grid: TimeGrid, method: ResampleMethod, max_gap: usize) -> Self {
        Self {
            grid,
            method,
            max_gap,
        }
    }

    /// Aggregator configured from grid settings.
    ///
    /// # Errors
    /// Propagates grid validation errors.
    pub fn from_config(cfg: &GridConfig) -> Result<Self, GridbalError> {
        Ok(Self::new(
            TimeGrid::from_config(cfg)?,
            cfg.resample,
            cfg.max_forward_fill,
        ))
    }

    /// Sum every leg into a net-import series for `target` over `range`.
    ///
    /// Legs are grouped per pair and sign-normalized, then each pair is
    /// resampled and forward-filled on its own before the per-slot sum. A slot
    /// is present when at least one pair has a value there; pairs without a
    /// value contribute nothing.
    ///
    /// Snapshot-sampled pairs are aggregated like any other and listed in the
    /// result, since their sampling bias cannot be undone here.
    ///
    /// # Errors
    /// Returns `UnrelatedZone` if any leg does not touch `target`, and
    /// `IncompatibleStep` if a pair is natively coarser than the grid.
    pub fn aggregate(
        &self,
        legs: &[ExchangeLeg],
        target: &ZoneKey,
        range: &GridRange,
    ) -> Result<NetImport, GridbalError> {
        let mut per_pair: BTreeMap<&ZonePair, Vec<(DateTime<Utc>, Decimal)>> = BTreeMap::new();
        let mut snapshot_pairs: Vec<ZonePair> = Vec::new();
        for leg in legs {
            let flow = normalize_direction(leg, target)?;
            per_pair
                .entry(&leg.pair)
                .or_default()
                .push((leg.timestamp, flow));
            if leg.sampling == Sampling::Snapshot && !snapshot_pairs.contains(&leg.pair) {
                snapshot_pairs.push(leg.pair.clone());
            }
        }

        let mut totals: BTreeMap<TimePoint, Decimal> = BTreeMap::new();
        let mut dropped_unaligned = 0usize;
        for (_pair, samples) in per_pair {
            let aligned = resample_with(&samples, &self.grid, self.method)?;
            dropped_unaligned += aligned.dropped();
            let filled = gap_fill(&aligned, range, self.max_gap);
            #[cfg(feature = "tracing")]
            tracing::trace!(pair = %_pair, points = filled.len(), "aligned exchange pair");
            for (p, v) in filled.iter() {
                *totals.entry(p).or_insert(Decimal::ZERO) += v;
            }
        }

        let mut series = AlignedSeries::empty(self.grid);
        for (p, v) in totals {
            series.insert(p, v);
        }
        snapshot_pairs.sort();
        Ok(NetImport {
            series,
            snapshot_pairs,
            dropped_unaligned,
        })
    }
}
