use std::time::Duration;

use gridbal::{Gridbal, GridbalError};
use rust_decimal::Decimal;

use crate::helpers::{
    MockConnector, arc, hourly_consumption, hourly_production, hourly_reconcile_config, window,
    zone,
};

#[tokio::test(start_paused = true)]
async fn slow_connector_times_out_and_falls_back() {
    let slow = arc(MockConnector {
        name: "slow",
        delay_ms: 500,
        consumption: Some(hourly_consumption("NL", &[1])),
        ..Default::default()
    });
    let fast = arc(MockConnector {
        name: "fast",
        consumption: Some(hourly_consumption("NL", &[2])),
        ..Default::default()
    });
    let gridbal = Gridbal::builder()
        .with_connector(slow)
        .with_connector(fast)
        .provider_timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let got = gridbal.consumption(&zone("NL"), window(0)).await.unwrap();
    assert_eq!(got[0].value("consumption"), Some(Decimal::from(2)));
}

#[tokio::test(start_paused = true)]
async fn all_slow_connectors_time_out() {
    let slow = |name| {
        arc(MockConnector {
            name,
            delay_ms: 500,
            consumption: Some(hourly_consumption("NL", &[1])),
            ..Default::default()
        })
    };
    let gridbal = Gridbal::builder()
        .with_connector(slow("s1"))
        .with_connector(slow("s2"))
        .provider_timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let err = gridbal.consumption(&zone("NL"), window(0)).await.unwrap_err();
    assert_eq!(
        err,
        GridbalError::AllProvidersTimedOut {
            capability: "consumption".into()
        }
    );
}

#[tokio::test(start_paused = true)]
async fn request_deadline_bounds_the_fetch_phase() {
    let sluggish = arc(MockConnector {
        name: "sluggish",
        delay_ms: 1_000,
        consumption: Some(hourly_consumption("NL", &[1])),
        production: Some(hourly_production("NL", 0, &[])),
        ..Default::default()
    });
    let gridbal = Gridbal::builder()
        .with_connector(sluggish)
        .reconcile_config(hourly_reconcile_config("NL"))
        .provider_timeout(Duration::from_secs(10))
        .request_timeout(Duration::from_millis(100))
        .build()
        .unwrap();
    let err = gridbal.reconcile(&zone("NL"), window(0)).await.unwrap_err();
    assert_eq!(
        err,
        GridbalError::RequestTimeout {
            capability: "reconcile".into()
        }
    );
}
