use gridbal_core::{CapacityEntry, Capability, Category, GridbalError, ZoneKey};

use crate::Gridbal;
use crate::gridbal_router_method;

impl Gridbal {
    gridbal_router_method! {
        /// Fetch yearly installed capacity of one category for a zone.
        ///
        /// A connector answering with no entries is treated like `NotFound`
        /// and the next connector is tried.
        method: capacity_history(zone: &ZoneKey, category: Category) -> Vec<CapacityEntry>,
        accessor: as_capacity_history_source,
        capability: Capability::CapacityHistory,
        not_found: "capacity history",
        call: fetch_capacity_history(zone, category)
    }

    /// Capacity history of every generating category, degrading to no
    /// history per category on any failure.
    ///
    /// Failures other than `NotFound` and `Unsupported` are logged; the
    /// balance run then falls back to configured defaults.
    pub(crate) async fn capacity_history_or_empty(&self, zone: &ZoneKey) -> Vec<CapacityEntry> {
        let tasks = Category::ALL
            .into_iter()
            .filter(|c| *c != Category::Unknown)
            .map(|category| async move {
                match self.capacity_history(zone, category).await {
                    Ok(entries) => entries,
                    Err(GridbalError::NotFound { .. } | GridbalError::Unsupported { .. }) => {
                        vec![]
                    }
                    Err(_e) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(
                            zone = %zone,
                            category = %category,
                            error = %_e,
                            "capacity history unavailable; using defaults"
                        );
                        vec![]
                    }
                }
            });
        futures::future::join_all(tasks)
            .await
            .into_iter()
            .flatten()
            .collect()
    }
}
