use gridbal_core::{Capability, ProductionRecord};

use crate::Gridbal;
use crate::gridbal_router_method;

impl Gridbal {
    gridbal_router_method! {
        /// Fetch reported generation for a zone.
        method: production(zone: &gridbal_core::ZoneKey, window: gridbal_core::Window) -> Vec<ProductionRecord>,
        accessor: as_production_source,
        capability: Capability::Production,
        not_found: "production",
        call: fetch_production(zone, window)
    }
}
