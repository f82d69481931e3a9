use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use gridbal::{Category, Gridbal, GridbalError, ReconcileConfig, ZoneTopology};
use gridbal_mock::{FIXTURE_EXCHANGES, MockConnector};
use rust_decimal::Decimal;

use crate::helpers::{hourly_reconcile_config, pair, window, zone};

fn gridbal(cfg: ReconcileConfig) -> Gridbal {
    Gridbal::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .reconcile_config(cfg)
        .topology(ZoneTopology::from_exchanges(FIXTURE_EXCHANGES, &BTreeMap::new()).unwrap())
        .provider_timeout(Duration::from_millis(50))
        .build()
        .unwrap()
}

#[tokio::test]
async fn fixture_zone_reconciles_end_to_end() {
    let out = gridbal(hourly_reconcile_config("NL"))
        .reconcile(&zone("NL"), window(3))
        .await
        .unwrap();

    // load 11000, import 800 + 1200 - 700 - 300, reported 8480
    assert_eq!(out.records.len(), 4);
    for rec in &out.records {
        assert_eq!(rec.production.get(Category::Unknown), Some(Decimal::from(1_520)));
    }
    assert_eq!(out.stats.snapshot_pairs, vec![pair("NL->NO")]);
    assert_eq!(
        out.records[0].capacity,
        BTreeMap::from([
            (Category::Gas, Decimal::from(15_000)),
            (Category::Nuclear, Decimal::from(485)),
            (Category::Solar, Decimal::from(10_000)),
            (Category::Wind, Decimal::from(4_000)),
        ])
    );
}

#[tokio::test]
async fn forced_failure_surfaces_connector_error() {
    let err = gridbal(hourly_reconcile_config("FAIL"))
        .reconcile(&zone("FAIL"), window(1))
        .await
        .unwrap_err();
    match err {
        GridbalError::AllProvidersFailed(errors) => {
            assert!(matches!(errors[0], GridbalError::Connector { .. }));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn slow_zone_times_out() {
    let err = gridbal(hourly_reconcile_config("TIMEOUT"))
        .reconcile(&zone("TIMEOUT"), window(1))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        GridbalError::AllProvidersTimedOut {
            capability: "consumption".into()
        }
    );
}
