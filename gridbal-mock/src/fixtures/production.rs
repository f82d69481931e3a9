use gridbal_core::{Category, Decimal, GridbalError, ProductionMix, ProductionRecord, Window, ZoneKey};

use super::{hour_of, slots};

/// Hourly, partially categorised generation for NL.
pub fn by_zone(zone: &ZoneKey, window: Window) -> Option<Result<Vec<ProductionRecord>, GridbalError>> {
    if zone.as_str() != "NL" {
        return None;
    }
    Some(
        slots(window, 3_600)
            .map(|ts| {
                let solar = if (7..19).contains(&hour_of(ts)) { 1_500 } else { 0 };
                let mix = ProductionMix::new()
                    .with(Category::Gas, Decimal::from(6_000))?
                    .with(Category::Wind, Decimal::from(2_000))?
                    .with(Category::Solar, Decimal::from(solar))?
                    .with(Category::Nuclear, Decimal::from(480))?;
                Ok(ProductionRecord::new(zone.clone(), ts, mix, "gridbal-mock"))
            })
            .collect(),
    )
}
