use gridbal_core::{CONSUMPTION_FIELD, Decimal, SeriesRecord, Window, ZoneKey};

use super::{hour_of, slots};

/// Quarter-hourly load for the fixture zones.
pub fn by_zone(zone: &ZoneKey, window: Window) -> Option<Vec<SeriesRecord>> {
    let base: i64 = match zone.as_str() {
        "NL" => 11_000,
        "BE" => 9_000,
        "DE" => 55_000,
        _ => return None,
    };
    Some(
        slots(window, 900)
            .map(|ts| {
                let daytime = (7..21).contains(&hour_of(ts));
                let load = if daytime { base + base / 5 } else { base };
                SeriesRecord::single(
                    zone.clone(),
                    ts,
                    CONSUMPTION_FIELD,
                    Decimal::from(load),
                    "gridbal-mock",
                )
            })
            .collect(),
    )
}
