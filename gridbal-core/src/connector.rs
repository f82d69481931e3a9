use async_trait::async_trait;

pub use gridbal_types::ConnectorKey;
use gridbal_types::{Category, GridbalError, ZoneKey, ZonePair};

use crate::model::{CapacityEntry, ExchangeLeg, ProductionRecord, SeriesRecord, Window};

/// Focused role trait for connectors that provide zone consumption.
#[async_trait]
pub trait ConsumptionSource: Send + Sync {
    /// Fetch consumption samples for `zone` within `window`.
    ///
    /// Every returned record carries the `"consumption"` field.
    async fn fetch_consumption(
        &self,
        zone: &ZoneKey,
        window: Window,
    ) -> Result<Vec<SeriesRecord>, GridbalError>;
}

/// Focused role trait for connectors that provide cross-border flows.
#[async_trait]
pub trait ExchangeSource: Send + Sync {
    /// Fetch exchange legs for `pair` within `window`.
    async fn fetch_exchange(
        &self,
        pair: &ZonePair,
        window: Window,
    ) -> Result<Vec<ExchangeLeg>, GridbalError>;
}

/// Focused role trait for connectors that provide reported generation.
#[async_trait]
pub trait ProductionSource: Send + Sync {
    /// Fetch partially categorised production records for `zone` within `window`.
    async fn fetch_production(
        &self,
        zone: &ZoneKey,
        window: Window,
    ) -> Result<Vec<ProductionRecord>, GridbalError>;
}

/// Focused role trait for connectors that provide installed-capacity history.
#[async_trait]
pub trait CapacityHistorySource: Send + Sync {
    /// Fetch yearly capacity entries; an empty list is a valid answer.
    async fn fetch_capacity_history(
        &self,
        zone: &ZoneKey,
        category: Category,
    ) -> Result<Vec<CapacityEntry>, GridbalError>;
}

/// Focused role trait for connectors that provide a replacement series for
/// one production category (e.g. a better wind feed).
#[async_trait]
pub trait SupplementalSource: Send + Sync {
    /// Fetch supplemental samples; the value field is the category label.
    async fn fetch_supplemental(
        &self,
        zone: &ZoneKey,
        category: Category,
        window: Window,
    ) -> Result<Vec<SeriesRecord>, GridbalError>;
}

/// Main connector trait implemented by data sources.
pub trait GridbalConnector: Send + Sync {
    /// A stable identifier for priority lists (e.g., "gridbal-mock").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Whether this connector *claims* to serve data for `zone`.
    ///
    /// Default: `true`. Connectors scoped to a few zones should override it.
    fn supports_zone(&self, zone: &ZoneKey) -> bool {
        let _ = zone;
        true
    }

    /// Advertise consumption capability.
    fn as_consumption_source(&self) -> Option<&dyn ConsumptionSource> {
        None
    }

    /// Advertise exchange capability.
    fn as_exchange_source(&self) -> Option<&dyn ExchangeSource> {
        None
    }

    /// Advertise production capability.
    fn as_production_source(&self) -> Option<&dyn ProductionSource> {
        None
    }

    /// Advertise capacity-history capability.
    fn as_capacity_history_source(&self) -> Option<&dyn CapacityHistorySource> {
        None
    }

    /// Advertise supplemental-series capability.
    fn as_supplemental_source(&self) -> Option<&dyn SupplementalSource> {
        None
    }
}
