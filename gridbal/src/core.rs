use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use gridbal_core::connector::ConnectorKey;
use gridbal_core::{
    Capability, GridbalConfig, GridbalConnector, GridbalError, ReconcileConfig, ZoneKey,
    ZoneTopology,
};

/// Orchestrator that routes source requests across registered connectors and
/// runs the balance engine over what they return.
pub struct Gridbal {
    pub(crate) connectors: Vec<Arc<dyn GridbalConnector>>,
    pub(crate) cfg: GridbalConfig,
    pub(crate) topology: ZoneTopology,
    pub(crate) per_zone_priority: HashMap<ZoneKey, Vec<ConnectorKey>>,
}

/// Builder for constructing a `Gridbal` orchestrator with custom configuration.
pub struct GridbalBuilder {
    connectors: Vec<Arc<dyn GridbalConnector>>,
    cfg: GridbalConfig,
    topology: ZoneTopology,
    per_zone_priority: HashMap<ZoneKey, Vec<ConnectorKey>>,
}

impl Default for GridbalBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GridbalBuilder {
    /// Create a new builder with default configuration and an empty topology.
    ///
    /// Without a topology every zone is treated as isolated (no exchange legs
    /// are fetched).
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: GridbalConfig::default(),
            topology: ZoneTopology::default(),
            per_zone_priority: HashMap::new(),
        }
    }

    /// Register a connector.
    ///
    /// Registration order is the fallback order when no zone preference is set.
    /// Duplicates are not deduplicated; avoid registering the same connector twice.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn GridbalConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Set preferred connectors for a zone.
    ///
    /// The list is an ordering hint for every capability fetched on behalf of
    /// `zone` (its own series and the legs on its borders); unlisted but
    /// capable connectors are still tried after the listed ones.
    #[must_use]
    pub fn prefer_for_zone(
        mut self,
        zone: &ZoneKey,
        connectors_desc: &[Arc<dyn GridbalConnector>],
    ) -> Self {
        let keys: Vec<ConnectorKey> = connectors_desc
            .iter()
            .map(|c| ConnectorKey::new(c.name()))
            .collect();
        self.per_zone_priority.insert(zone.clone(), keys);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: GridbalConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Replace only the balance-run settings.
    #[must_use]
    pub fn reconcile_config(mut self, cfg: ReconcileConfig) -> Self {
        self.cfg.reconcile = cfg;
        self
    }

    /// Zone neighbour relation used to pick exchange legs.
    #[must_use]
    pub fn topology(mut self, topology: ZoneTopology) -> Self {
        self.topology = topology;
        self
    }

    /// Set the per-provider request timeout.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Bound the whole fetch phase of a run.
    ///
    /// When exceeded, the run fails with `RequestTimeout`.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Build the `Gridbal` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors have been registered via [`Self::with_connector`].
    pub fn build(mut self) -> Result<Gridbal, GridbalError> {
        // Drop priority keys naming unregistered connectors and dedup.
        let known: HashSet<&'static str> = self.connectors.iter().map(|c| c.name()).collect();
        for v in self.per_zone_priority.values_mut() {
            let mut seen: HashSet<&'static str> = HashSet::new();
            v.retain(|k| known.contains(k.as_str()) && seen.insert(k.as_str()));
        }

        if self.connectors.is_empty() {
            return Err(GridbalError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }

        Ok(Gridbal {
            connectors: self.connectors,
            cfg: self.cfg,
            topology: self.topology,
            per_zone_priority: self.per_zone_priority,
        })
    }
}

/// Attribute an untagged provider error to `connector`.
pub fn tag_err(connector: &str, e: GridbalError) -> GridbalError {
    match e {
        e @ (GridbalError::NotFound { .. }
        | GridbalError::ProviderTimeout { .. }
        | GridbalError::Connector { .. }
        | GridbalError::RequestTimeout { .. }
        | GridbalError::AllProvidersTimedOut { .. }
        | GridbalError::AllProvidersFailed(_)) => e,
        other => GridbalError::Connector {
            connector: connector.to_string(),
            msg: other.to_string(),
        },
    }
}

/// Await `fut`, failing with `RequestTimeout("request")` once `deadline` elapses.
pub(crate) async fn with_request_deadline<T, Fut>(
    deadline: Option<Duration>,
    fut: Fut,
) -> Result<T, GridbalError>
where
    Fut: core::future::Future<Output = T>,
{
    match deadline {
        Some(d) => tokio::time::timeout(d, fut)
            .await
            .map_err(|_| GridbalError::request_timeout("request")),
        None => Ok(fut.await),
    }
}

impl Gridbal {
    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "gridbal::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = %capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: Capability,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, GridbalError>
    where
        Fut: core::future::Future<Output = Result<T, GridbalError>>,
    {
        (tokio::time::timeout(timeout, fut).await).unwrap_or_else(|_| {
            Err(GridbalError::provider_timeout(
                connector_name,
                capability.as_str(),
            ))
        })
    }

    /// Start building a new `Gridbal` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use gridbal_mock::MockConnector;
    ///
    /// let mock = Arc::new(MockConnector::new());
    /// let gridbal = gridbal::Gridbal::builder()
    ///     .with_connector(mock)
    ///     .provider_timeout(std::time::Duration::from_secs(2))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> GridbalBuilder {
        GridbalBuilder::new()
    }

    /// Configuration the orchestrator was built with.
    #[must_use]
    pub const fn config(&self) -> &GridbalConfig {
        &self.cfg
    }

    /// Zone neighbour relation the orchestrator was built with.
    #[must_use]
    pub const fn topology(&self) -> &ZoneTopology {
        &self.topology
    }

    pub(crate) fn ordered_for_zone(&self, zone: &ZoneKey) -> Vec<Arc<dyn GridbalConnector>> {
        let mut out: Vec<(usize, Arc<dyn GridbalConnector>)> =
            self.connectors.iter().cloned().enumerate().collect();
        if let Some(pref) = self.per_zone_priority.get(zone) {
            let pos: HashMap<_, _> = pref
                .iter()
                .enumerate()
                .map(|(i, n)| (n.as_str(), i))
                .collect();
            out.sort_by_key(|(orig_i, c)| {
                (pos.get(c.name()).copied().unwrap_or(usize::MAX), *orig_i)
            });
        }
        out.into_iter().map(|(_, c)| c).collect()
    }

    /// Try eligible connectors in priority order until one returns a non-empty list.
    ///
    /// - `call` returns `None` for connectors that cannot serve the request;
    ///   those do not count as attempts.
    /// - Each attempt is bounded by the provider timeout.
    /// - An empty list counts as `NotFound` from that connector and the next one
    ///   is tried.
    /// - Failures collapse through [`crate::router::util::collapse_errors`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "gridbal::core::fetch_first",
            skip(self, what, call),
            fields(zone = %zone, capability = %capability),
        )
    )]
    pub(crate) async fn fetch_first<T, F, Fut>(
        &self,
        zone: &ZoneKey,
        capability: Capability,
        what: String,
        call: F,
    ) -> Result<Vec<T>, GridbalError>
    where
        T: Send,
        F: Fn(Arc<dyn GridbalConnector>) -> Option<Fut> + Send,
        Fut: core::future::Future<Output = Result<Vec<T>, GridbalError>> + Send,
    {
        let mut attempted_any = false;
        let mut errors: Vec<GridbalError> = Vec::new();

        for c in self.ordered_for_zone(zone) {
            let Some(fut) = call(c.clone()) else {
                continue;
            };
            attempted_any = true;
            match Self::provider_call_with_timeout(
                c.name(),
                capability,
                self.cfg.provider_timeout,
                fut,
            )
            .await
            {
                Ok(v) if !v.is_empty() => return Ok(v),
                Ok(_) => errors.push(GridbalError::not_found(format!("{what} from {}", c.name()))),
                Err(e @ (GridbalError::NotFound { .. } | GridbalError::ProviderTimeout { .. })) => {
                    errors.push(e);
                }
                Err(e) => errors.push(tag_err(c.name(), e)),
            }
        }

        Err(crate::router::util::collapse_errors(
            capability,
            attempted_any,
            errors,
            Some(what),
        ))
    }
}
