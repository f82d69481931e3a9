//! Records exchanged between sources, the aligner and the balance engine.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use gridbal_types::{Category, GridbalError, ZoneKey, ZonePair};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A UTC instant lying exactly on a [`crate::TimeGrid`].
///
/// Only the grid constructs points, so holding one proves alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TimePoint(DateTime<Utc>);

impl TimePoint {
    pub(crate) const fn new_unchecked(ts: DateTime<Utc>) -> Self {
        Self(ts)
    }

    /// The underlying instant.
    #[must_use]
    pub const fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }

    /// Unix seconds of the instant.
    #[must_use]
    pub fn timestamp(self) -> i64 {
        self.0.timestamp()
    }
}

impl From<TimePoint> for DateTime<Utc> {
    fn from(p: TimePoint) -> Self {
        p.0
    }
}

impl core::fmt::Display for TimePoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

/// Inclusive UTC window requested from sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Window {
    /// Build a window covering `[start, end]`.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `start` is after `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, GridbalError> {
        if start > end {
            return Err(GridbalError::InvalidArg(format!(
                "window start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Window start (inclusive).
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Window end (inclusive).
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether `ts` lies inside the window.
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts <= self.end
    }
}

/// One sample of one or more named quantities for a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesRecord {
    /// Zone the sample describes.
    pub zone: ZoneKey,
    /// Native sample instant.
    pub timestamp: DateTime<Utc>,
    /// Field name to quantity, e.g. `"consumption"`.
    pub values: BTreeMap<String, Decimal>,
    /// Source label.
    pub source: String,
    /// Revision time for sources that republish samples.
    pub published: Option<DateTime<Utc>>,
}

impl SeriesRecord {
    /// Build a record carrying a single field.
    pub fn single(
        zone: ZoneKey,
        timestamp: DateTime<Utc>,
        field: impl Into<String>,
        value: Decimal,
        source: impl Into<String>,
    ) -> Self {
        Self {
            zone,
            timestamp,
            values: BTreeMap::from([(field.into(), value)]),
            source: source.into(),
            published: None,
        }
    }

    /// Attach a revision time.
    #[must_use]
    pub fn published_at(mut self, at: DateTime<Utc>) -> Self {
        self.published = Some(at);
        self
    }

    /// Value of `field`, if present.
    #[must_use]
    pub fn value(&self, field: &str) -> Option<Decimal> {
        self.values.get(field).copied()
    }
}

/// Extract `(timestamp, value)` samples of `field`, skipping records without it.
#[must_use]
pub fn field_samples(records: &[SeriesRecord], field: &str) -> Vec<(DateTime<Utc>, Decimal)> {
    records
        .iter()
        .filter_map(|r| r.value(field).map(|v| (r.timestamp, v)))
        .collect()
}

/// How a source samples exchange flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sampling {
    /// Each value is the average flow over its interval.
    #[default]
    IntervalAverage,
    /// Each value is an instantaneous reading taken once per interval.
    ///
    /// The true interval average cannot be recovered from such readings; the
    /// bias belongs to the source and is reported, not corrected.
    Snapshot,
}

/// Net flow on one border at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeLeg {
    /// Canonical pair; positive flow moves toward `pair.second()`.
    pub pair: ZonePair,
    /// Native sample instant.
    pub timestamp: DateTime<Utc>,
    /// Signed flow in the pair's canonical direction.
    pub net_flow: Decimal,
    /// Source label.
    pub source: String,
    /// Sampling semantics of the source.
    pub sampling: Sampling,
}

impl ExchangeLeg {
    /// Build an interval-averaged leg.
    pub fn new(
        pair: ZonePair,
        timestamp: DateTime<Utc>,
        net_flow: Decimal,
        source: impl Into<String>,
    ) -> Self {
        Self {
            pair,
            timestamp,
            net_flow,
            source: source.into(),
            sampling: Sampling::IntervalAverage,
        }
    }

    /// Build a leg from the components of a multi-interconnector border.
    ///
    /// Absent components are skipped; a row without any component is a zero flow.
    pub fn from_components<I>(
        pair: ZonePair,
        timestamp: DateTime<Utc>,
        components: I,
        source: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = Option<Decimal>>,
    {
        let net_flow = components.into_iter().flatten().sum();
        Self::new(pair, timestamp, net_flow, source)
    }

    /// Mark the leg as snapshot-sampled.
    #[must_use]
    pub fn snapshot(mut self) -> Self {
        self.sampling = Sampling::Snapshot;
        self
    }
}

/// Fixed-shape generation mix with one optional slot per [`Category`].
///
/// Slots other than `unknown` never hold negative quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(
    into = "BTreeMap<Category, Decimal>",
    try_from = "BTreeMap<Category, Decimal>"
)]
pub struct ProductionMix {
    slots: [Option<Decimal>; Category::COUNT],
}

impl ProductionMix {
    /// Empty mix.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [None; Category::COUNT],
        }
    }

    /// Quantity of `category`, if reported.
    #[must_use]
    pub const fn get(&self, category: Category) -> Option<Decimal> {
        self.slots[category.index()]
    }

    /// Set `category` to `value`.
    ///
    /// # Errors
    /// Returns `NegativeQuantity` for a negative value on a non-`unknown` slot.
    pub fn set(&mut self, category: Category, value: Decimal) -> Result<(), GridbalError> {
        check_sign(category, value)?;
        self.slots[category.index()] = Some(value);
        Ok(())
    }

    /// Builder form of [`ProductionMix::set`].
    ///
    /// # Errors
    /// Same as [`ProductionMix::set`].
    pub fn with(mut self, category: Category, value: Decimal) -> Result<Self, GridbalError> {
        self.set(category, value)?;
        Ok(self)
    }

    /// Mark `category` as not reported.
    pub fn clear(&mut self, category: Category) {
        self.slots[category.index()] = None;
    }

    /// Add `value` to `category`, treating an absent slot as zero.
    ///
    /// # Errors
    /// Returns `NegativeQuantity` if the resulting value is negative on a
    /// non-`unknown` slot; the slot is left untouched in that case.
    pub fn accumulate(&mut self, category: Category, value: Decimal) -> Result<(), GridbalError> {
        let next = self.get(category).unwrap_or(Decimal::ZERO) + value;
        self.set(category, next)
    }

    /// Total merge: every slot present in `other` replaces the slot in `self`.
    #[must_use]
    pub fn overlay(mut self, other: &Self) -> Self {
        for (slot, theirs) in self.slots.iter_mut().zip(other.slots.iter()) {
            if theirs.is_some() {
                *slot = *theirs;
            }
        }
        self
    }

    /// Sum of every reported slot; absent slots count as zero.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.slots.iter().flatten().copied().sum()
    }

    /// Reported `(category, value)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, Decimal)> + '_ {
        Category::ALL
            .into_iter()
            .filter_map(|c| self.get(c).map(|v| (c, v)))
    }

    /// True when no slot is reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

fn check_sign(category: Category, value: Decimal) -> Result<(), GridbalError> {
    if value.is_sign_negative() && !value.is_zero() && !category.allows_negative() {
        return Err(GridbalError::NegativeQuantity {
            category: category.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

impl From<ProductionMix> for BTreeMap<Category, Decimal> {
    fn from(mix: ProductionMix) -> Self {
        mix.iter().collect()
    }
}

impl TryFrom<BTreeMap<Category, Decimal>> for ProductionMix {
    type Error = GridbalError;

    fn try_from(map: BTreeMap<Category, Decimal>) -> Result<Self, Self::Error> {
        let mut mix = Self::new();
        for (c, v) in map {
            mix.set(c, v)?;
        }
        Ok(mix)
    }
}

/// Reported generation of a zone at one instant, enriched by reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionRecord {
    /// Zone the record describes.
    pub zone: ZoneKey,
    /// Record instant; on the grid once reconciled.
    pub timestamp: DateTime<Utc>,
    /// Generation per category.
    pub production: ProductionMix,
    /// Installed capacity per category of interest.
    pub capacity: BTreeMap<Category, Decimal>,
    /// Source label.
    pub source: String,
}

impl ProductionRecord {
    /// Build a record without capacity annotations.
    pub fn new(
        zone: ZoneKey,
        timestamp: DateTime<Utc>,
        production: ProductionMix,
        source: impl Into<String>,
    ) -> Self {
        Self {
            zone,
            timestamp,
            production,
            capacity: BTreeMap::new(),
            source: source.into(),
        }
    }
}

/// Installed capacity of one category in one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityEntry {
    /// Calendar year the capacity applies to.
    pub year: i32,
    /// Production category.
    pub category: Category,
    /// Installed capacity.
    pub value: Decimal,
}
