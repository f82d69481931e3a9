#![allow(dead_code)]
#![allow(clippy::type_complexity)]

use std::sync::Arc;

use async_trait::async_trait;
use gridbal_core::connector::{
    CapacityHistorySource, ConsumptionSource, ExchangeSource, GridbalConnector, ProductionSource,
    SupplementalSource,
};
use gridbal_core::{
    CapacityEntry, Category, ExchangeLeg, GridbalError, ProductionRecord, SeriesRecord, Window,
    ZoneKey, ZonePair,
};
use tokio::time::{Duration, sleep};

/// Simple in-memory connector used by integration tests.
/// Tailor behavior (data, failures, served zones, latency) via the fields below.
/// A capability is advertised when its value or closure is set.
pub struct MockConnector {
    pub name: &'static str,
    pub zones: Option<Vec<&'static str>>,
    pub delay_ms: u64,

    pub consumption: Option<Vec<SeriesRecord>>,
    pub production: Option<Vec<ProductionRecord>>,
    pub exchange: Option<Vec<ExchangeLeg>>,
    pub capacity: Option<Vec<CapacityEntry>>,
    pub supplemental: Option<Vec<SeriesRecord>>,

    // Optional closures to customize behavior per test
    pub consumption_fn:
        Option<Arc<dyn Fn(&ZoneKey) -> Result<Vec<SeriesRecord>, GridbalError> + Send + Sync>>,
    pub production_fn:
        Option<Arc<dyn Fn(&ZoneKey) -> Result<Vec<ProductionRecord>, GridbalError> + Send + Sync>>,
    pub exchange_fn:
        Option<Arc<dyn Fn(&ZonePair) -> Result<Vec<ExchangeLeg>, GridbalError> + Send + Sync>>,
    pub capacity_fn: Option<
        Arc<dyn Fn(&ZoneKey, Category) -> Result<Vec<CapacityEntry>, GridbalError> + Send + Sync>,
    >,
    pub supplemental_fn: Option<
        Arc<dyn Fn(&ZoneKey, Category) -> Result<Vec<SeriesRecord>, GridbalError> + Send + Sync>,
    >,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self {
            name: "default_mock",
            zones: None,
            delay_ms: 0,

            consumption: None,
            production: None,
            exchange: None,
            capacity: None,
            supplemental: None,

            consumption_fn: None,
            production_fn: None,
            exchange_fn: None,
            capacity_fn: None,
            supplemental_fn: None,
        }
    }
}

impl MockConnector {
    pub fn named(name: &'static str) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    pub fn with_consumption_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&ZoneKey) -> Result<Vec<SeriesRecord>, GridbalError> + Send + Sync + 'static,
    {
        self.consumption_fn = Some(Arc::new(f));
        self
    }

    pub fn with_production_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&ZoneKey) -> Result<Vec<ProductionRecord>, GridbalError> + Send + Sync + 'static,
    {
        self.production_fn = Some(Arc::new(f));
        self
    }

    pub fn with_exchange_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&ZonePair) -> Result<Vec<ExchangeLeg>, GridbalError> + Send + Sync + 'static,
    {
        self.exchange_fn = Some(Arc::new(f));
        self
    }

    pub fn with_capacity_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&ZoneKey, Category) -> Result<Vec<CapacityEntry>, GridbalError>
            + Send
            + Sync
            + 'static,
    {
        self.capacity_fn = Some(Arc::new(f));
        self
    }

    pub fn with_supplemental_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&ZoneKey, Category) -> Result<Vec<SeriesRecord>, GridbalError>
            + Send
            + Sync
            + 'static,
    {
        self.supplemental_fn = Some(Arc::new(f));
        self
    }

    async fn pause(&self) {
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }
}

impl GridbalConnector for MockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn supports_zone(&self, zone: &ZoneKey) -> bool {
        self.zones
            .as_ref()
            .is_none_or(|zs| zs.iter().any(|z| *z == zone.as_str()))
    }

    fn as_consumption_source(&self) -> Option<&dyn ConsumptionSource> {
        (self.consumption.is_some() || self.consumption_fn.is_some())
            .then_some(self as &dyn ConsumptionSource)
    }
    fn as_production_source(&self) -> Option<&dyn ProductionSource> {
        (self.production.is_some() || self.production_fn.is_some())
            .then_some(self as &dyn ProductionSource)
    }
    fn as_exchange_source(&self) -> Option<&dyn ExchangeSource> {
        (self.exchange.is_some() || self.exchange_fn.is_some())
            .then_some(self as &dyn ExchangeSource)
    }
    fn as_capacity_history_source(&self) -> Option<&dyn CapacityHistorySource> {
        (self.capacity.is_some() || self.capacity_fn.is_some())
            .then_some(self as &dyn CapacityHistorySource)
    }
    fn as_supplemental_source(&self) -> Option<&dyn SupplementalSource> {
        (self.supplemental.is_some() || self.supplemental_fn.is_some())
            .then_some(self as &dyn SupplementalSource)
    }
}

#[async_trait]
impl ConsumptionSource for MockConnector {
    async fn fetch_consumption(
        &self,
        zone: &ZoneKey,
        _window: Window,
    ) -> Result<Vec<SeriesRecord>, GridbalError> {
        self.pause().await;
        if let Some(f) = &self.consumption_fn {
            return (f)(zone);
        }
        self.consumption
            .clone()
            .ok_or_else(|| GridbalError::unsupported("consumption"))
    }
}

#[async_trait]
impl ProductionSource for MockConnector {
    async fn fetch_production(
        &self,
        zone: &ZoneKey,
        _window: Window,
    ) -> Result<Vec<ProductionRecord>, GridbalError> {
        self.pause().await;
        if let Some(f) = &self.production_fn {
            return (f)(zone);
        }
        self.production
            .clone()
            .ok_or_else(|| GridbalError::unsupported("production"))
    }
}

#[async_trait]
impl ExchangeSource for MockConnector {
    async fn fetch_exchange(
        &self,
        pair: &ZonePair,
        _window: Window,
    ) -> Result<Vec<ExchangeLeg>, GridbalError> {
        self.pause().await;
        if let Some(f) = &self.exchange_fn {
            return (f)(pair);
        }
        // Static legs are filtered to the requested border.
        self.exchange
            .clone()
            .map(|legs| legs.into_iter().filter(|l| &l.pair == pair).collect())
            .ok_or_else(|| GridbalError::unsupported("exchange"))
    }
}

#[async_trait]
impl CapacityHistorySource for MockConnector {
    async fn fetch_capacity_history(
        &self,
        zone: &ZoneKey,
        category: Category,
    ) -> Result<Vec<CapacityEntry>, GridbalError> {
        self.pause().await;
        if let Some(f) = &self.capacity_fn {
            return (f)(zone, category);
        }
        self.capacity
            .clone()
            .map(|rows| rows.into_iter().filter(|e| e.category == category).collect())
            .ok_or_else(|| GridbalError::unsupported("capacity-history"))
    }
}

#[async_trait]
impl SupplementalSource for MockConnector {
    async fn fetch_supplemental(
        &self,
        zone: &ZoneKey,
        category: Category,
        _window: Window,
    ) -> Result<Vec<SeriesRecord>, GridbalError> {
        self.pause().await;
        if let Some(f) = &self.supplemental_fn {
            return (f)(zone, category);
        }
        self.supplemental
            .clone()
            .ok_or_else(|| GridbalError::unsupported("supplemental"))
    }
}
