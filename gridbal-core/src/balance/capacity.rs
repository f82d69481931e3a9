use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Datelike, Utc};
use gridbal_types::Category;
use rust_decimal::Decimal;

use crate::model::CapacityEntry;
use crate::timeseries::align::ROUND_DP;

/// As-of-date installed capacity per category for one zone.
///
/// Lookups walk back one year at a time from the requested year down to
/// `floor_year` (inclusive) and fall back to the zone default. A category with
/// neither history nor a default resolves to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityLookupTable {
    history: BTreeMap<Category, BTreeMap<i32, Decimal>>,
    defaults: BTreeMap<Category, Decimal>,
    floor_year: i32,
}

impl CapacityLookupTable {
    /// Index `entries` by category and year.
    ///
    /// When several entries share a category and year, the first one wins.
    pub fn build<I>(entries: I, defaults: BTreeMap<Category, Decimal>, floor_year: i32) -> Self
    where
        I: IntoIterator<Item = CapacityEntry>,
    {
        let mut history: BTreeMap<Category, BTreeMap<i32, Decimal>> = BTreeMap::new();
        for e in entries {
            history
                .entry(e.category)
                .or_default()
                .entry(e.year)
                .or_insert(e.value);
        }
        Self {
            history,
            defaults,
            floor_year,
        }
    }

    /// Capacity of `category` as of `at`, rounded to three decimals.
    #[must_use]
    pub fn lookup(&self, at: DateTime<Utc>, category: Category) -> Decimal {
        let found = self.history.get(&category).and_then(|years| {
            (self.floor_year..=at.year())
                .rev()
                .find_map(|y| years.get(&y).copied())
        });
        found
            .or_else(|| self.defaults.get(&category).copied())
            .unwrap_or(Decimal::ZERO)
            .round_dp(ROUND_DP)
    }

    /// Categories worth annotating: configured defaults plus categories with history.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        let set: BTreeSet<Category> = self
            .defaults
            .keys()
            .chain(self.history.keys())
            .copied()
            .collect();
        set.into_iter().collect()
    }

    /// Capacity of every category of interest as of `at`.
    #[must_use]
    pub fn annotate(&self, at: DateTime<Utc>) -> BTreeMap<Category, Decimal> {
        self.categories()
            .into_iter()
            .map(|c| (c, self.lookup(at, c)))
            .collect()
    }
}
