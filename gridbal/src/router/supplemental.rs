use gridbal_core::{Capability, Category, SeriesRecord, Window, ZoneKey};

use crate::Gridbal;
use crate::gridbal_router_method;

impl Gridbal {
    gridbal_router_method! {
        /// Fetch the replacement series for one production category.
        method: supplemental(zone: &ZoneKey, category: Category, window: Window) -> Vec<SeriesRecord>,
        accessor: as_supplemental_source,
        capability: Capability::Supplemental,
        not_found: "supplemental series",
        call: fetch_supplemental(zone, category, window)
    }
}
