//! Configuration types shared by the balance engine and the orchestrator.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::zone::{ZoneKey, ZonePair};

/// How finer-than-grid samples are combined into one grid slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResampleMethod {
    /// Arithmetic mean of the samples whose timestamp falls in the slot.
    #[default]
    Mean,
    /// Each sample covers one native step; slots average the covered span
    /// weighted by overlap. Suited to steps that do not divide the grid step.
    TimeWeighted,
}

/// Canonical timeline and alignment settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Grid step in minutes.
    pub step_minutes: u32,
    /// Maximum distance from a grid instant for a sample to snap onto it.
    pub snap_tolerance_seconds: u32,
    /// Maximum consecutive slots a forward fill may span.
    pub max_forward_fill: usize,
    /// Aggregation used when a series is natively finer than the grid.
    pub resample: ResampleMethod,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            step_minutes: 15,
            snap_tolerance_seconds: 0,
            max_forward_fill: 3,
            resample: ResampleMethod::Mean,
        }
    }
}

/// Installed-capacity lookup settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityConfig {
    /// Oldest year (inclusive) the lookup walks back to before using defaults.
    pub floor_year: i32,
    /// Fallback capacity per zone and category.
    pub defaults: HashMap<ZoneKey, BTreeMap<Category, Decimal>>,
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            floor_year: 2016,
            defaults: HashMap::new(),
        }
    }
}

impl CapacityConfig {
    /// Configured defaults for a zone; empty when none are configured.
    #[must_use]
    pub fn defaults_for(&self, zone: &ZoneKey) -> BTreeMap<Category, Decimal> {
        self.defaults.get(zone).cloned().unwrap_or_default()
    }
}

/// Replacement of one production category by a supplemental series.
///
/// The switch is evaluated once per run against the run window start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplementalOverride {
    /// Category replaced by the supplemental series.
    pub category: Category,
    /// First instant the supplemental source is trusted; `None` means always.
    pub available_from: Option<DateTime<Utc>>,
    /// Master switch.
    pub enabled: bool,
}

impl SupplementalOverride {
    /// Whether the override applies to a run starting at `run_start`.
    #[must_use]
    pub fn is_active(&self, run_start: DateTime<Utc>) -> bool {
        self.enabled && self.available_from.is_none_or(|from| run_start >= from)
    }
}

/// Settings of one balance run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Timeline and alignment.
    pub grid: GridConfig,
    /// Capacity lookup.
    pub capacity: CapacityConfig,
    /// Drop records whose final `unknown` is not strictly positive.
    pub discard_uninformative: bool,
    /// Optional category replacement.
    pub supplemental: Option<SupplementalOverride>,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            capacity: CapacityConfig::default(),
            discard_uninformative: true,
            supplemental: None,
        }
    }
}

/// Global configuration for the `Gridbal` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridbalConfig {
    /// Settings forwarded to every balance run.
    pub reconcile: ReconcileConfig,
    /// First instant each exchange is operated; legs are not fetched for
    /// windows ending before it.
    pub exchange_activation: HashMap<ZonePair, DateTime<Utc>>,
    /// Timeout for individual provider requests.
    pub provider_timeout: Duration,
    /// Optional overall deadline for the fetch phase of a run.
    pub request_timeout: Option<Duration>,
}

impl Default for GridbalConfig {
    fn default() -> Self {
        Self {
            reconcile: ReconcileConfig::default(),
            exchange_activation: HashMap::new(),
            provider_timeout: Duration::from_secs(5),
            request_timeout: None,
        }
    }
}

impl GridbalConfig {
    /// Whether `pair` is operated at any point up to `window_end`.
    #[must_use]
    pub fn exchange_active(&self, pair: &ZonePair, window_end: DateTime<Utc>) -> bool {
        self.exchange_activation
            .get(pair)
            .is_none_or(|from| *from <= window_end)
    }
}
