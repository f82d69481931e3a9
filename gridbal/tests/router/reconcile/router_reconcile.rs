use std::collections::BTreeMap;

use gridbal::{
    CapacityEntry, Category, Gridbal, GridbalError, ReconcileConfig, SupplementalOverride,
    ZoneTopology,
};
use gridbal_core::SeriesRecord;
use rust_decimal::Decimal;

use crate::helpers::{
    MockConnector, arc, at_hour, hourly_consumption, hourly_legs, hourly_production,
    hourly_reconcile_config, window, zone,
};

fn topology() -> ZoneTopology {
    ZoneTopology::from_exchanges(["BE->NL", "NL->NO"], &BTreeMap::new()).unwrap()
}

fn source() -> MockConnector {
    let mut legs = hourly_legs("BE->NL", 2, 100);
    legs.extend(hourly_legs("NL->NO", 2, 50));
    MockConnector {
        name: "tso",
        consumption: Some(hourly_consumption("NL", &[1000, 1100, 1200])),
        production: Some(hourly_production(
            "NL",
            2,
            &[(Category::Gas, 600), (Category::Wind, 200)],
        )),
        exchange: Some(legs),
        capacity: Some(vec![CapacityEntry {
            year: 2019,
            category: Category::Wind,
            value: Decimal::from(4_000),
        }]),
        ..Default::default()
    }
}

fn build(source: MockConnector, cfg: ReconcileConfig) -> Gridbal {
    Gridbal::builder()
        .with_connector(arc(source))
        .reconcile_config(cfg)
        .topology(topology())
        .build()
        .unwrap()
}

fn unknowns(outcome: &gridbal::BalanceOutcome) -> Vec<Option<Decimal>> {
    outcome
        .records
        .iter()
        .map(|r| r.production.get(Category::Unknown))
        .collect()
}

#[tokio::test]
async fn reconciles_fetched_inputs() {
    let gridbal = build(source(), hourly_reconcile_config("NL"));
    let out = gridbal.reconcile(&zone("NL"), window(2)).await.unwrap();

    // net import 100 - 50; reported 800
    assert_eq!(
        unknowns(&out),
        vec![
            Some(Decimal::from(150)),
            Some(Decimal::from(250)),
            Some(Decimal::from(350)),
        ]
    );
    assert_eq!(
        out.records[0].capacity,
        BTreeMap::from([
            (Category::Gas, Decimal::from(15_000)),
            (Category::Wind, Decimal::from(4_000)),
        ])
    );
    assert_eq!(out.stats.residual_added, 3);
}

#[tokio::test]
async fn fetched_inputs_cover_every_border() {
    let gridbal = build(source(), hourly_reconcile_config("NL"));
    let inputs = gridbal.fetch_inputs(&zone("NL"), window(2)).await.unwrap();
    assert_eq!(inputs.exchanges.len(), 6);
    assert_eq!(inputs.consumption.len(), 3);
    assert!(inputs.supplemental.is_empty());
}

#[tokio::test]
async fn capacity_failure_degrades_to_defaults() {
    let failing = MockConnector {
        capacity: None,
        ..source()
    }
    .with_capacity_fn(|_, _| Err(GridbalError::Other("registry down".into())));
    let gridbal = build(failing, hourly_reconcile_config("NL"));
    let out = gridbal.reconcile(&zone("NL"), window(2)).await.unwrap();
    assert_eq!(
        out.records[0].capacity,
        BTreeMap::from([(Category::Gas, Decimal::from(15_000))])
    );
}

#[tokio::test]
async fn empty_production_is_not_found() {
    let no_production = MockConnector {
        production: Some(vec![]),
        ..source()
    };
    let gridbal = build(no_production, hourly_reconcile_config("NL"));
    let err = gridbal.reconcile(&zone("NL"), window(2)).await.unwrap_err();
    assert_eq!(
        err,
        GridbalError::NotFound {
            what: "production for NL".into()
        }
    );
}

#[tokio::test]
async fn active_supplemental_override_is_applied() {
    let with_feed = MockConnector {
        supplemental: Some(vec![SeriesRecord::single(
            zone("NL"),
            at_hour(0),
            "wind",
            Decimal::from(300),
            "forecast",
        )]),
        ..source()
    };
    let cfg = ReconcileConfig {
        supplemental: Some(SupplementalOverride {
            category: Category::Wind,
            available_from: None,
            enabled: true,
        }),
        ..hourly_reconcile_config("NL")
    };
    let gridbal = build(with_feed, cfg);
    let out = gridbal.reconcile(&zone("NL"), window(2)).await.unwrap();
    assert_eq!(
        unknowns(&out),
        vec![
            Some(Decimal::from(50)),
            Some(Decimal::from(450)),
            Some(Decimal::from(550)),
        ]
    );
    assert_eq!(out.records[1].production.get(Category::Wind), None);
}
