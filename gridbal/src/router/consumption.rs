use gridbal_core::{Capability, SeriesRecord};

use crate::Gridbal;
use crate::gridbal_router_method;

impl Gridbal {
    gridbal_router_method! {
        /// Fetch consumption samples for a zone.
        ///
        /// Connectors are tried in the zone's priority order; an empty answer
        /// falls through to the next connector.
        method: consumption(zone: &gridbal_core::ZoneKey, window: gridbal_core::Window) -> Vec<SeriesRecord>,
        accessor: as_consumption_source,
        capability: Capability::Consumption,
        not_found: "consumption",
        call: fetch_consumption(zone, window)
    }
}
