//! Gridbal reconciles electricity balance data across multiple sources.
//!
//! Overview
//! - Routes consumption, production, exchange, capacity and supplemental
//!   requests to connectors implementing the `gridbal_core` source traits.
//! - Applies per-zone priorities to influence connector order; each
//!   capability falls back to the next connector on failure or empty data.
//! - Feeds the fetched inputs to the synchronous balance engine in
//!   `gridbal_core` and returns reconciled production records.
//!
//! Key behaviors and trade-offs
//! - Every provider call is bounded by the provider timeout; an optional
//!   request timeout bounds the whole fetch phase of a run.
//! - Exchange legs are chosen from the configured `ZoneTopology`; borders not
//!   yet in operation for the requested window are never fetched.
//! - Capacity history is best effort: failures degrade to configured
//!   defaults instead of failing the run.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use gridbal::{Gridbal, Window, ZoneKey, ZoneTopology};
//! use gridbal_mock::{FIXTURE_EXCHANGES, MockConnector};
//!
//! let topology = ZoneTopology::from_exchanges(FIXTURE_EXCHANGES, &Default::default())?;
//! let gridbal = Gridbal::builder()
//!     .with_connector(Arc::new(MockConnector::new()))
//!     .topology(topology)
//!     .build()?;
//!
//! let nl = ZoneKey::new("NL")?;
//! let outcome = gridbal.reconcile(&nl, window).await?;
//! for rec in &outcome.records {
//!     println!("{} unknown={:?}", rec.timestamp, rec.production.get(Category::Unknown));
//! }
//! ```
//!
//! See `gridbal/examples/` for a runnable end-to-end demonstration.
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use self::core::{Gridbal, GridbalBuilder, tag_err};
pub use router::util::collapse_errors;

// Re-export core types for convenience
pub use gridbal_core::{
    BalanceInputs, BalanceOutcome, CapacityConfig, CapacityEntry, Capability, Category,
    ExchangeLeg, GridConfig, GridbalConfig, GridbalConnector, GridbalError, ProductionMix,
    ProductionRecord, ReconcileConfig, ReconcileStats, ResampleMethod, SeriesRecord,
    SupplementalOverride, Window, ZoneKey, ZonePair, ZoneTopology,
};
