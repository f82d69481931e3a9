use gridbal_core::{Decimal, ExchangeLeg, Window, ZonePair};

use super::slots;

/// Legs for the fixture borders of NL.
///
/// BE and DE report quarter-hourly averages, GB reports two cables per row,
/// and NO publishes hourly snapshots.
pub fn by_pair(pair: &ZonePair, window: Window) -> Option<Vec<ExchangeLeg>> {
    let legs = match pair.key().as_str() {
        "BE->NL" => slots(window, 900)
            .map(|ts| ExchangeLeg::new(pair.clone(), ts, Decimal::from(800), "gridbal-mock"))
            .collect(),
        "DE->NL" => slots(window, 900)
            .map(|ts| ExchangeLeg::new(pair.clone(), ts, Decimal::from(1_200), "gridbal-mock"))
            .collect(),
        "BE->DE" => slots(window, 900)
            .map(|ts| ExchangeLeg::new(pair.clone(), ts, Decimal::from(-500), "gridbal-mock"))
            .collect(),
        "GB->NL" => slots(window, 3_600)
            .map(|ts| {
                ExchangeLeg::from_components(
                    pair.clone(),
                    ts,
                    [Some(Decimal::from(-400)), Some(Decimal::from(-300)), None],
                    "gridbal-mock",
                )
            })
            .collect(),
        "NL->NO" => slots(window, 3_600)
            .map(|ts| {
                ExchangeLeg::new(pair.clone(), ts, Decimal::from(300), "gridbal-mock").snapshot()
            })
            .collect(),
        _ => return None,
    };
    Some(legs)
}

/// Borders of the fixture zones, in `A->B` form.
pub const EXCHANGES: &[&str] = &["BE->NL", "DE->NL", "GB->NL", "NL->NO", "BE->DE"];
