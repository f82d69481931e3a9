use chrono::TimeDelta;
use gridbal_core::{Category, Decimal, SeriesRecord, Window, ZoneKey};

use super::slots;

/// Hourly NL wind feed, published twice; the later revision is higher.
pub fn by_zone(zone: &ZoneKey, category: Category, window: Window) -> Option<Vec<SeriesRecord>> {
    if zone.as_str() != "NL" || category != Category::Wind {
        return None;
    }
    let mut out = Vec::new();
    for ts in slots(window, 3_600) {
        let field = category.as_str();
        out.push(
            SeriesRecord::single(zone.clone(), ts, field, Decimal::from(2_100), "gridbal-mock")
                .published_at(ts - TimeDelta::hours(6)),
        );
        out.push(
            SeriesRecord::single(zone.clone(), ts, field, Decimal::from(2_400), "gridbal-mock")
                .published_at(ts - TimeDelta::hours(1)),
        );
    }
    Some(out)
}
