//! Report envelopes produced by balance runs.

use serde::{Deserialize, Serialize};

use crate::zone::ZonePair;

/// Counters for issues a balance run recovered from locally.
///
/// A run either fails with one terminal error or succeeds with these
/// statistics attached; nothing here is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReconcileStats {
    /// Samples dropped because they did not snap onto the grid.
    pub dropped_unaligned: usize,
    /// Production slots skipped because consumption or net import was absent.
    pub skipped_missing_operand: usize,
    /// Records whose `unknown` was raised by the residual.
    pub residual_added: usize,
    /// Records removed by the non-positive `unknown` policy.
    pub discarded_uninformative: usize,
    /// Exchange pairs whose source only reports instantaneous snapshots.
    pub snapshot_pairs: Vec<ZonePair>,
}

impl ReconcileStats {
    /// Fold the counters of `other` into `self`.
    pub fn absorb(&mut self, other: Self) {
        self.dropped_unaligned += other.dropped_unaligned;
        self.skipped_missing_operand += other.skipped_missing_operand;
        self.residual_added += other.residual_added;
        self.discarded_uninformative += other.discarded_uninformative;
        for p in other.snapshot_pairs {
            if !self.snapshot_pairs.contains(&p) {
                self.snapshot_pairs.push(p);
            }
        }
    }
}
