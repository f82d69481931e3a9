use gridbal_core::{
    BalanceInputs, BalanceOutcome, GridbalError, Window, ZoneKey, ZonePair, run_balance,
};

use crate::Gridbal;

impl Gridbal {
    /// Fetch every input of a balance run for `zone` over `window`.
    ///
    /// Behavior:
    /// - Exchange legs are fetched for each border of `zone` in the topology,
    ///   except borders whose activation date lies after the window end.
    /// - Consumption, production, legs and capacity history are fetched
    ///   concurrently; the supplemental series only when its override is
    ///   active for the window start.
    /// - Capacity-history failures degrade to an empty history.
    /// - The whole fetch phase is bounded by the request timeout, if set.
    ///
    /// # Errors
    /// Returns the collapsed routing error of the first required input that
    /// could not be fetched (`Unsupported`, `NotFound`, `AllProvidersTimedOut`
    /// or `AllProvidersFailed`), or `RequestTimeout` when the deadline elapses.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "gridbal::router",
            skip(self, window),
            fields(zone = %zone),
        )
    )]
    pub async fn fetch_inputs(
        &self,
        zone: &ZoneKey,
        window: Window,
    ) -> Result<BalanceInputs, GridbalError> {
        let pairs: Vec<ZonePair> = self
            .topology
            .pairs_for(zone)?
            .into_iter()
            .filter(|p| {
                let active = self.cfg.exchange_active(p, window.end());
                if !active {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(pair = %p, "exchange not yet active; skipping");
                }
                active
            })
            .collect();
        let supplemental = self
            .cfg
            .reconcile
            .supplemental
            .filter(|ov| ov.is_active(window.start()));

        let legs = futures::future::join_all(pairs.iter().map(|p| self.exchange(zone, p, window)));
        let fetch_supplemental = async {
            match supplemental {
                Some(ov) => self.supplemental(zone, ov.category, window).await.map(Some),
                None => Ok(None),
            }
        };

        let (consumption, production, legs, capacity_history, supplemental) =
            crate::core::with_request_deadline(self.cfg.request_timeout, async {
                futures::join!(
                    self.consumption(zone, window),
                    self.production(zone, window),
                    legs,
                    self.capacity_history_or_empty(zone),
                    fetch_supplemental,
                )
            })
            .await
            .map_err(|e| match e {
                GridbalError::RequestTimeout { .. } => GridbalError::request_timeout("reconcile"),
                other => other,
            })?;

        let mut inputs = BalanceInputs::new(zone.clone(), window);
        inputs.consumption = consumption?;
        inputs.production = production?;
        for leg in legs {
            inputs.exchanges.extend(leg?);
        }
        inputs.capacity_history = capacity_history;
        inputs.supplemental = supplemental?.unwrap_or_default();
        Ok(inputs)
    }

    /// Fetch inputs and run the balance engine for `zone` over `window`.
    ///
    /// Returns reconciled production records in time order together with
    /// counters of what was dropped or skipped along the way.
    ///
    /// # Errors
    /// Fetch errors as in [`Self::fetch_inputs`], then any error of the
    /// balance run itself (`IncompatibleStep`, `UnrelatedZone`, invalid grid).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "gridbal::router",
            skip(self, window),
            fields(zone = %zone),
        )
    )]
    pub async fn reconcile(
        &self,
        zone: &ZoneKey,
        window: Window,
    ) -> Result<BalanceOutcome, GridbalError> {
        let inputs = self.fetch_inputs(zone, window).await?;
        run_balance(inputs, &self.cfg.reconcile)
    }
}
