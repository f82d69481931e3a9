#![allow(dead_code)]

// Re-export helpers so tests can `use helpers::*;`
pub mod mock_connector;

pub use mock_connector::MockConnector;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use gridbal_core::{
    CONSUMPTION_FIELD, GridbalConnector, CapacityConfig, Category, ExchangeLeg, GridConfig, ProductionMix,
    ProductionRecord, ReconcileConfig, SeriesRecord, Window, ZoneKey, ZonePair,
};
use rust_decimal::Decimal;

// ---------- Lightweight fixtures and helpers for tests ----------

/// 2021-01-01T00:00:00Z
pub const START: i64 = 1_609_459_200;
pub const HOUR: i64 = 3_600;

pub fn t(sec: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(sec, 0).unwrap()
}

pub fn at_hour(h: i64) -> DateTime<Utc> {
    t(START + h * HOUR)
}

/// Window covering hours `0..=hours` after `START`.
pub fn window(hours: i64) -> Window {
    Window::new(at_hour(0), at_hour(hours)).unwrap()
}

pub fn zone(s: &str) -> ZoneKey {
    ZoneKey::new(s).unwrap()
}

pub fn pair(s: &str) -> ZonePair {
    s.parse().unwrap()
}

/// Hourly consumption of `zone`, one sample per value.
pub fn hourly_consumption(zone_key: &str, values: &[i64]) -> Vec<SeriesRecord> {
    values
        .iter()
        .enumerate()
        .map(|(h, v)| {
            SeriesRecord::single(
                zone(zone_key),
                at_hour(h as i64),
                CONSUMPTION_FIELD,
                Decimal::from(*v),
                "test",
            )
        })
        .collect()
}

/// Hourly production of `zone` with the given `(category, value)` mix at every hour.
pub fn hourly_production(
    zone_key: &str,
    hours: i64,
    mix: &[(Category, i64)],
) -> Vec<ProductionRecord> {
    (0..=hours)
        .map(|h| {
            let mut production = ProductionMix::new();
            for (c, v) in mix {
                production.set(*c, Decimal::from(*v)).unwrap();
            }
            ProductionRecord::new(zone(zone_key), at_hour(h), production, "test")
        })
        .collect()
}

/// Constant hourly flow on `key` (`A->B`, positive is A to B).
pub fn hourly_legs(key: &str, hours: i64, flow: i64) -> Vec<ExchangeLeg> {
    (0..=hours)
        .map(|h| ExchangeLeg::new(pair(key), at_hour(h), Decimal::from(flow), "test"))
        .collect()
}

/// Hourly grid, no discard of uninformative records, and one gas default.
pub fn hourly_reconcile_config(zone_key: &str) -> ReconcileConfig {
    ReconcileConfig {
        grid: GridConfig {
            step_minutes: 60,
            ..GridConfig::default()
        },
        capacity: CapacityConfig {
            floor_year: 2016,
            defaults: HashMap::from([(
                zone(zone_key),
                BTreeMap::from([(Category::Gas, Decimal::from(15_000))]),
            )]),
        },
        discard_uninformative: false,
        supplemental: None,
    }
}

pub fn arc(c: MockConnector) -> Arc<dyn GridbalConnector> {
    Arc::new(c)
}
