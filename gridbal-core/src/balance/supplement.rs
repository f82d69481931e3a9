use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use gridbal_types::{Category, GridbalError};
use rust_decimal::Decimal;

use crate::model::{ProductionRecord, SeriesRecord, TimePoint};
use crate::timeseries::grid::TimeGrid;

/// Per-slot value of `field`, keeping the latest published revision.
///
/// Samples that do not snap onto `grid` are skipped and counted. Samples
/// without a revision time rank below any published one; on equal revision
/// times the first sample wins.
#[must_use]
pub fn latest_revision(
    records: &[SeriesRecord],
    field: &str,
    grid: &TimeGrid,
) -> (BTreeMap<TimePoint, Decimal>, usize) {
    let mut best: BTreeMap<TimePoint, (Option<DateTime<Utc>>, Decimal)> = BTreeMap::new();
    let mut dropped = 0usize;
    for r in records {
        let Some(v) = r.value(field) else {
            continue;
        };
        let Ok(p) = grid.snap(r.timestamp) else {
            dropped += 1;
            continue;
        };
        match best.get(&p) {
            Some((published, _)) if *published >= r.published => {}
            _ => {
                best.insert(p, (r.published, v));
            }
        }
    }
    (best.into_iter().map(|(p, (_, v))| (p, v)).collect(), dropped)
}

/// Replace `category` in every record by the supplemental value at its slot.
///
/// Records whose slot has no supplemental value get the category cleared,
/// since the replaced source is no longer trusted for it.
///
/// # Errors
/// Returns `NegativeQuantity` if a supplemental value is negative on a
/// non-`unknown` category.
pub fn apply_override(
    records: &mut [ProductionRecord],
    category: Category,
    values: &BTreeMap<TimePoint, Decimal>,
    grid: &TimeGrid,
) -> Result<(), GridbalError> {
    for rec in records.iter_mut() {
        let value = grid.snap(rec.timestamp).ok().and_then(|p| values.get(&p));
        match value {
            Some(v) => rec.production.set(category, *v)?,
            None => rec.production.clear(category),
        }
    }
    Ok(())
}
