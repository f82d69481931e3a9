//! gridbal-core
//!
//! Core records, source traits, and the balance engine shared across the
//! gridbal ecosystem.
//!
//! - `model`: records exchanged with sources (series samples, exchange legs,
//!   production mixes, capacity entries).
//! - `connector`: the `GridbalConnector` trait and source role traits.
//! - `timeseries`: canonical grid, step inference, resampling and gap filling.
//! - `balance`: exchange aggregation, capacity lookup, supplemental override
//!   and the conservation-equation reconciler.
//!
//! Everything outside `connector` is synchronous and operates on fully
//! materialized inputs; no I/O happens here.
#![warn(missing_docs)]

/// Balance engine over aligned series.
pub mod balance;
/// Source capability traits and the primary `GridbalConnector` interface.
pub mod connector;
/// Records shared by sources and the balance engine.
pub mod model;
/// Time-series utilities for alignment.
pub mod timeseries;

pub use balance::capacity::CapacityLookupTable;
pub use balance::exchange::{ExchangeAggregator, NetImport, normalize_direction};
pub use balance::pipeline::{BalanceInputs, BalanceOutcome, CONSUMPTION_FIELD, run_balance};
pub use balance::reconcile::{BalanceReconciler, Reconciled, reconcile_mix, retain_informative};
pub use balance::supplement::{apply_override, latest_revision};
pub use connector::GridbalConnector;
pub use model::{
    CapacityEntry, ExchangeLeg, ProductionMix, ProductionRecord, Sampling, SeriesRecord,
    TimePoint, Window, field_samples,
};
pub use timeseries::align::{
    AlignedSeries, ROUND_DP, gap_fill, resample, resample_native, resample_with,
};
pub use timeseries::grid::{GridIter, GridRange, TimeGrid, settlement_period_start};
pub use timeseries::infer::estimate_step_seconds;

pub use gridbal_types::{
    CapacityConfig, Capability, Category, ConnectorKey, GridConfig, GridbalConfig, GridbalError,
    ReconcileConfig, ReconcileStats, ResampleMethod, SupplementalOverride, ZoneKey, ZonePair,
    ZoneTopology,
};
pub use rust_decimal::Decimal;
