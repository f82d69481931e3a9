use gridbal_types::{GridbalError, ReconcileConfig, ReconcileStats, ZoneKey};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::capacity::CapacityLookupTable;
use super::exchange::ExchangeAggregator;
use super::reconcile::{BalanceReconciler, retain_informative};
use super::supplement::{apply_override, latest_revision};
use crate::model::{
    CapacityEntry, ExchangeLeg, ProductionRecord, SeriesRecord, Window, field_samples,
};
use crate::timeseries::align::{AlignedSeries, gap_fill, resample_with};
use crate::timeseries::grid::{GridRange, TimeGrid};

/// Field carried by consumption records.
pub const CONSUMPTION_FIELD: &str = "consumption";

/// Fully materialized inputs of one balance run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceInputs {
    /// Zone being balanced.
    pub zone: ZoneKey,
    /// Requested window; fills never extend past its end.
    pub window: Window,
    /// Samples carrying the `consumption` field.
    pub consumption: Vec<SeriesRecord>,
    /// Legs on every border of `zone`. Empty means an isolated zone with no
    /// cross-border flow.
    pub exchanges: Vec<ExchangeLeg>,
    /// Reported generation.
    pub production: Vec<ProductionRecord>,
    /// Installed-capacity history of the zone, possibly empty.
    pub capacity_history: Vec<CapacityEntry>,
    /// Replacement samples for the supplemental category, if configured.
    pub supplemental: Vec<SeriesRecord>,
}

impl BalanceInputs {
    /// Inputs with every list empty.
    #[must_use]
    pub fn new(zone: ZoneKey, window: Window) -> Self {
        Self {
            zone,
            window,
            consumption: Vec::new(),
            exchanges: Vec::new(),
            production: Vec::new(),
            capacity_history: Vec::new(),
            supplemental: Vec::new(),
        }
    }
}

/// Output of a successful balance run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BalanceOutcome {
    /// Reconciled records in time order.
    pub records: Vec<ProductionRecord>,
    /// Issues recovered from during the run.
    pub stats: ReconcileStats,
}

/// Run the whole balance pipeline for one zone and window.
///
/// Consumption is aligned and forward-filled, legs are aggregated into net
/// import, the supplemental category is swapped in when its override is
/// active for the window, and production is reconciled and annotated with
/// capacity. Records without positive `unknown` are discarded when
/// `discard_uninformative` is set.
///
/// # Errors
/// Returns the first configuration-level failure: an invalid grid,
/// `IncompatibleStep` for a series coarser than the grid, or `UnrelatedZone`
/// for a leg that does not touch the zone.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "gridbal_core::run_balance",
        skip(inputs, cfg),
        fields(
            zone = %inputs.zone,
            production = inputs.production.len(),
            legs = inputs.exchanges.len(),
        ),
    )
)]
pub fn run_balance(
    inputs: BalanceInputs,
    cfg: &ReconcileConfig,
) -> Result<BalanceOutcome, GridbalError> {
    let BalanceInputs {
        zone,
        window,
        consumption,
        exchanges,
        mut production,
        capacity_history,
        supplemental,
    } = inputs;

    let grid = TimeGrid::from_config(&cfg.grid)?;
    let range = grid.range(window.start(), window.end());
    let mut stats = ReconcileStats::default();

    let load = resample_with(
        &field_samples(&consumption, CONSUMPTION_FIELD),
        &grid,
        cfg.grid.resample,
    )?;
    stats.dropped_unaligned += load.dropped();
    let load = gap_fill(&load, &range, cfg.grid.max_forward_fill);

    let net_import = if exchanges.is_empty() {
        isolated(&grid, &range)
    } else {
        let aggregated = ExchangeAggregator::from_config(&cfg.grid)?.aggregate(
            &exchanges,
            &zone,
            &range,
        )?;
        stats.dropped_unaligned += aggregated.dropped_unaligned;
        stats.snapshot_pairs = aggregated.snapshot_pairs;
        aggregated.series
    };

    if let Some(ov) = cfg.supplemental.filter(|ov| ov.is_active(window.start())) {
        let (values, dropped) = latest_revision(&supplemental, ov.category.as_str(), &grid);
        stats.dropped_unaligned += dropped;
        apply_override(&mut production, ov.category, &values, &grid)?;
    }

    let table = CapacityLookupTable::build(
        capacity_history,
        cfg.capacity.defaults_for(&zone),
        cfg.capacity.floor_year,
    );
    let mut reconciled =
        BalanceReconciler::new(grid, &table).reconcile(production, &load, &net_import)?;
    stats.absorb(core::mem::take(&mut reconciled.stats));

    if cfg.discard_uninformative {
        stats.discarded_uninformative += retain_informative(&mut reconciled.records);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        records = reconciled.records.len(),
        dropped_unaligned = stats.dropped_unaligned,
        skipped = stats.skipped_missing_operand,
        discarded = stats.discarded_uninformative,
        "balance run complete"
    );

    Ok(BalanceOutcome {
        records: reconciled.records,
        stats,
    })
}

fn isolated(grid: &TimeGrid, range: &GridRange) -> AlignedSeries {
    let mut series = AlignedSeries::empty(*grid);
    for p in range {
        series.insert(p, Decimal::ZERO);
    }
    series
}
