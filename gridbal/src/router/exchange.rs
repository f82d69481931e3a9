use gridbal_core::{Capability, ExchangeLeg, GridbalError, Window, ZoneKey, ZonePair};

use crate::Gridbal;

impl Gridbal {
    /// Fetch the legs of one border on behalf of `zone`.
    ///
    /// Connector order follows `zone`'s priority list. Connectors must claim
    /// both ends of the pair to be tried.
    ///
    /// # Errors
    /// Returns an error if no eligible connector succeeds or none support the capability.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "gridbal::router",
            skip(self, window),
            fields(zone = %zone, pair = %pair),
        )
    )]
    pub async fn exchange(
        &self,
        zone: &ZoneKey,
        pair: &ZonePair,
        window: Window,
    ) -> Result<Vec<ExchangeLeg>, GridbalError> {
        self.fetch_first(
            zone,
            Capability::Exchange,
            format!("exchange for {pair}"),
            move |c| {
                if !(c.supports_zone(pair.first()) && c.supports_zone(pair.second())) {
                    return None;
                }
                c.as_exchange_source()?;
                let pair = pair.clone();
                Some(async move {
                    if let Some(p) = c.as_exchange_source() {
                        p.fetch_exchange(&pair, window).await
                    } else {
                        Err(GridbalError::connector(
                            c.name(),
                            "missing exchange capability during call",
                        ))
                    }
                })
            },
        )
        .await
    }
}
