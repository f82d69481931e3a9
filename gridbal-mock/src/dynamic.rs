use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use gridbal_core::connector::{
    ConsumptionSource, ExchangeSource, GridbalConnector, ProductionSource,
};
use gridbal_core::{
    ExchangeLeg, GridbalError, ProductionRecord, SeriesRecord, Window, ZoneKey, ZonePair,
};

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(GridbalError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

impl<T> MockBehavior<T> {
    async fn resolve(self) -> Result<T, GridbalError> {
        match self {
            Self::Return(v) => Ok(v),
            Self::Fail(e) => Err(e),
            Self::Hang => std::future::pending().await,
        }
    }
}

#[derive(Default)]
struct InternalState {
    consumption_rules: HashMap<ZoneKey, MockBehavior<Vec<SeriesRecord>>>,
    production_rules: HashMap<ZoneKey, MockBehavior<Vec<ProductionRecord>>>,
    exchange_rules: HashMap<ZonePair, MockBehavior<Vec<ExchangeLeg>>>,
    requests: Vec<String>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for consumption calls for a specific zone.
    pub async fn set_consumption_behavior(
        &self,
        zone: ZoneKey,
        behavior: MockBehavior<Vec<SeriesRecord>>,
    ) {
        let mut guard = self.state.lock().await;
        guard.consumption_rules.insert(zone, behavior);
    }

    /// Set the behavior for production calls for a specific zone.
    pub async fn set_production_behavior(
        &self,
        zone: ZoneKey,
        behavior: MockBehavior<Vec<ProductionRecord>>,
    ) {
        let mut guard = self.state.lock().await;
        guard.production_rules.insert(zone, behavior);
    }

    /// Set the behavior for exchange calls for a specific border.
    pub async fn set_exchange_behavior(
        &self,
        pair: ZonePair,
        behavior: MockBehavior<Vec<ExchangeLeg>>,
    ) {
        let mut guard = self.state.lock().await;
        guard.exchange_rules.insert(pair, behavior);
    }

    /// Requests seen so far, as `capability:target` strings in call order.
    pub async fn requests(&self) -> Vec<String> {
        let guard = self.state.lock().await;
        guard.requests.clone()
    }

    /// Clear all configured behaviors and the request log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.consumption_rules.clear();
        guard.production_rules.clear();
        guard.exchange_rules.clear();
        guard.requests.clear();
    }
}

/// A connector that defers all behavior to an external controller.
///
/// Inputs without a configured behavior answer `Unsupported`.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn GridbalConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn GridbalConnector>, controller)
    }

    async fn log(&self, entry: String) {
        self.state.lock().await.requests.push(entry);
    }
}

impl GridbalConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
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
}

#[async_trait]
impl ConsumptionSource for DynamicMockConnector {
    async fn fetch_consumption(
        &self,
        zone: &ZoneKey,
        _window: Window,
    ) -> Result<Vec<SeriesRecord>, GridbalError> {
        self.log(format!("consumption:{zone}")).await;
        // Snapshot the rule without holding the lock across the await below
        let behavior = {
            let guard = self.state.lock().await;
            guard.consumption_rules.get(zone).cloned()
        };
        match behavior {
            Some(b) => b.resolve().await,
            None => Err(GridbalError::unsupported("consumption")),
        }
    }
}

#[async_trait]
impl ExchangeSource for DynamicMockConnector {
    async fn fetch_exchange(
        &self,
        pair: &ZonePair,
        _window: Window,
    ) -> Result<Vec<ExchangeLeg>, GridbalError> {
        self.log(format!("exchange:{pair}")).await;
        let behavior = {
            let guard = self.state.lock().await;
            guard.exchange_rules.get(pair).cloned()
        };
        match behavior {
            Some(b) => b.resolve().await,
            None => Err(GridbalError::unsupported("exchange")),
        }
    }
}

#[async_trait]
impl ProductionSource for DynamicMockConnector {
    async fn fetch_production(
        &self,
        zone: &ZoneKey,
        _window: Window,
    ) -> Result<Vec<ProductionRecord>, GridbalError> {
        self.log(format!("production:{zone}")).await;
        let behavior = {
            let guard = self.state.lock().await;
            guard.production_rules.get(zone).cloned()
        };
        match behavior {
            Some(b) => b.resolve().await,
            None => Err(GridbalError::unsupported("production")),
        }
    }
}
