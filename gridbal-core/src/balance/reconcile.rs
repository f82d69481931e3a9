use std::collections::BTreeSet;

use gridbal_types::{Category, GridbalError, ReconcileStats};
use rust_decimal::Decimal;

use super::capacity::CapacityLookupTable;
use crate::model::ProductionRecord;
use crate::timeseries::align::{AlignedSeries, ROUND_DP};
use crate::timeseries::grid::TimeGrid;

/// Reconciled records together with what was recovered along the way.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reconciled {
    /// Records in time order, one per grid slot.
    pub records: Vec<ProductionRecord>,
    /// Counters of dropped and skipped inputs.
    pub stats: ReconcileStats,
}

/// Conservation-equation engine.
///
/// For each production slot, total generation is `consumption - net_import`.
/// Generation the reporting source did not see is added to `unknown`; no
/// reported category is ever reduced to force balance.
#[derive(Debug, Clone, Copy)]
pub struct BalanceReconciler<'a> {
    grid: TimeGrid,
    capacity: &'a CapacityLookupTable,
}

impl<'a> BalanceReconciler<'a> {
    /// Reconciler snapping production onto `grid` and annotating from `capacity`.
    #[must_use]
    pub const fn new(grid: TimeGrid, capacity: &'a CapacityLookupTable) -> Self {
        Self { grid, capacity }
    }

    /// Reconcile every production record against aligned operands.
    ///
    /// Records that do not snap onto the grid are dropped; on duplicate slots
    /// the first record wins. Slots where consumption or net import is absent
    /// are skipped and never filled from neighbouring slots.
    ///
    /// # Errors
    /// Returns `NegativeQuantity` only if a record already violates the mix
    /// invariant, which a well-formed [`crate::ProductionMix`] cannot.
    pub fn reconcile(
        &self,
        production: Vec<ProductionRecord>,
        consumption: &AlignedSeries,
        net_import: &AlignedSeries,
    ) -> Result<Reconciled, GridbalError> {
        let mut out = Reconciled::default();
        let mut seen = BTreeSet::new();
        for mut rec in production {
            let p = match self.grid.snap(rec.timestamp) {
                Ok(p) => p,
                Err(_e) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(error = %_e, "dropping unaligned production record");
                    out.stats.dropped_unaligned += 1;
                    continue;
                }
            };
            if !seen.insert(p) {
                continue;
            }
            let operands = consumption.get(p).zip(net_import.get(p));
            let Some((load, import)) = operands else {
                #[cfg(feature = "tracing")]
                {
                    let operand = if consumption.get(p).is_none() {
                        "consumption"
                    } else {
                        "net_import"
                    };
                    let e = GridbalError::missing_operand(p.timestamp(), operand);
                    tracing::debug!(error = %e, "skipping production slot");
                }
                out.stats.skipped_missing_operand += 1;
                continue;
            };

            rec.timestamp = p.as_datetime();
            if reconcile_mix(&mut rec, load - import)? {
                out.stats.residual_added += 1;
            }
            rec.capacity.extend(self.capacity.annotate(rec.timestamp));
            out.records.push(rec);
        }
        out.records.sort_by_key(|r| r.timestamp);
        Ok(out)
    }
}

/// Raise `unknown` by the unreported part of `total_generation`.
///
/// `unknown` is created at zero when absent. A residual that rounds to zero
/// leaves the record unchanged. Returns whether `unknown` was raised.
///
/// # Errors
/// Propagates `NegativeQuantity` from the mix.
pub fn reconcile_mix(
    rec: &mut ProductionRecord,
    total_generation: Decimal,
) -> Result<bool, GridbalError> {
    if rec.production.get(Category::Unknown).is_none() {
        rec.production.set(Category::Unknown, Decimal::ZERO)?;
    }
    let residual = (total_generation - rec.production.total()).round_dp(ROUND_DP);
    if residual <= Decimal::ZERO {
        return Ok(false);
    }
    rec.production.accumulate(Category::Unknown, residual)?;
    Ok(true)
}

/// Keep only records whose `unknown` is strictly positive.
///
/// Records without residual are treated as uninformative downstream. Returns
/// the number of records removed.
pub fn retain_informative(records: &mut Vec<ProductionRecord>) -> usize {
    let before = records.len();
    records.retain(|r| {
        r.production
            .get(Category::Unknown)
            .is_some_and(|u| u > Decimal::ZERO)
    });
    before - records.len()
}
