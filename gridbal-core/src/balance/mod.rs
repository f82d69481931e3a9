//! Balance engine: exchange aggregation, capacity lookup, supplemental
//! override and the conservation-equation reconciler.

/// Installed-capacity lookup with year fallback.
pub mod capacity;
/// Net-import aggregation over exchange legs.
pub mod exchange;
/// End-to-end balance run over materialized inputs.
pub mod pipeline;
/// Residual reconciliation of production records.
pub mod reconcile;
/// Category replacement from supplemental series.
pub mod supplement;
