//! Mock gridbal connectors.
//!
//! [`MockConnector`] serves deterministic fixtures for a small NL-centred grid
//! (borders with BE, DE, GB and NO). [`DynamicMockConnector`] defers every
//! answer to a controller owned by the test.
use async_trait::async_trait;
use gridbal_core::connector::{
    CapacityHistorySource, ConsumptionSource, ExchangeSource, GridbalConnector, ProductionSource,
    SupplementalSource,
};
use gridbal_core::{
    CapacityEntry, Category, ExchangeLeg, GridbalError, ProductionRecord, SeriesRecord, Window,
    ZoneKey, ZonePair,
};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};

/// Borders known to the fixtures, in `A->B` form.
pub const FIXTURE_EXCHANGES: &[&str] = fixtures::exchange::EXCHANGES;

/// Mock connector for CI-safe examples. Provides deterministic data from static fixtures.
///
/// The zone `FAIL` makes every call fail; the zone `TIMEOUT` delays every
/// call long enough to trip a short provider timeout.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn not_found(what: &str) -> GridbalError {
        GridbalError::not_found(what.to_string())
    }

    async fn maybe_fail_or_timeout(zone: &str, capability: &'static str) -> Result<(), GridbalError> {
        match zone {
            "FAIL" => Err(GridbalError::connector(
                "gridbal-mock",
                format!("forced failure: {capability}"),
            )),
            "TIMEOUT" => {
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    async fn maybe_fail_pair(pair: &ZonePair, capability: &'static str) -> Result<(), GridbalError> {
        Self::maybe_fail_or_timeout(pair.first().as_str(), capability).await?;
        Self::maybe_fail_or_timeout(pair.second().as_str(), capability).await
    }
}

impl GridbalConnector for MockConnector {
    fn name(&self) -> &'static str {
        "gridbal-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_consumption_source(&self) -> Option<&dyn ConsumptionSource> {
        Some(self as &dyn ConsumptionSource)
    }
    fn as_exchange_source(&self) -> Option<&dyn ExchangeSource> {
        Some(self as &dyn ExchangeSource)
    }
    fn as_production_source(&self) -> Option<&dyn ProductionSource> {
        Some(self as &dyn ProductionSource)
    }
    fn as_capacity_history_source(&self) -> Option<&dyn CapacityHistorySource> {
        Some(self as &dyn CapacityHistorySource)
    }
    fn as_supplemental_source(&self) -> Option<&dyn SupplementalSource> {
        Some(self as &dyn SupplementalSource)
    }
}

#[async_trait]
impl ConsumptionSource for MockConnector {
    async fn fetch_consumption(
        &self,
        zone: &ZoneKey,
        window: Window,
    ) -> Result<Vec<SeriesRecord>, GridbalError> {
        Self::maybe_fail_or_timeout(zone.as_str(), "consumption").await?;
        fixtures::consumption::by_zone(zone, window)
            .ok_or_else(|| Self::not_found(&format!("consumption for {zone}")))
    }
}

#[async_trait]
impl ExchangeSource for MockConnector {
    async fn fetch_exchange(
        &self,
        pair: &ZonePair,
        window: Window,
    ) -> Result<Vec<ExchangeLeg>, GridbalError> {
        Self::maybe_fail_pair(pair, "exchange").await?;
        fixtures::exchange::by_pair(pair, window)
            .ok_or_else(|| Self::not_found(&format!("exchange for {pair}")))
    }
}

#[async_trait]
impl ProductionSource for MockConnector {
    async fn fetch_production(
        &self,
        zone: &ZoneKey,
        window: Window,
    ) -> Result<Vec<ProductionRecord>, GridbalError> {
        Self::maybe_fail_or_timeout(zone.as_str(), "production").await?;
        fixtures::production::by_zone(zone, window)
            .ok_or_else(|| Self::not_found(&format!("production for {zone}")))?
    }
}

#[async_trait]
impl CapacityHistorySource for MockConnector {
    async fn fetch_capacity_history(
        &self,
        zone: &ZoneKey,
        category: Category,
    ) -> Result<Vec<CapacityEntry>, GridbalError> {
        Self::maybe_fail_or_timeout(zone.as_str(), "capacity-history").await?;
        Ok(fixtures::capacity::by_zone(zone, category))
    }
}

#[async_trait]
impl SupplementalSource for MockConnector {
    async fn fetch_supplemental(
        &self,
        zone: &ZoneKey,
        category: Category,
        window: Window,
    ) -> Result<Vec<SeriesRecord>, GridbalError> {
        Self::maybe_fail_or_timeout(zone.as_str(), "supplemental").await?;
        fixtures::supplemental::by_zone(zone, category, window)
            .ok_or_else(|| Self::not_found(&format!("supplemental {category} for {zone}")))
    }
}
