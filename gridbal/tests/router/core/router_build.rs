use std::time::Duration;

use gridbal::{Gridbal, GridbalConfig, GridbalError};

use crate::helpers::{MockConnector, arc, hourly_consumption, window, zone};

#[test]
fn build_requires_a_connector() {
    let err = Gridbal::builder().build().err().expect("must fail");
    assert!(matches!(err, GridbalError::InvalidArg(_)));
}

#[test]
fn builder_modifiers_land_in_config() {
    let gridbal = Gridbal::builder()
        .with_connector(arc(MockConnector::default()))
        .config(GridbalConfig::default())
        .provider_timeout(Duration::from_millis(250))
        .request_timeout(Duration::from_secs(3))
        .build()
        .unwrap();
    assert_eq!(gridbal.config().provider_timeout, Duration::from_millis(250));
    assert_eq!(gridbal.config().request_timeout, Some(Duration::from_secs(3)));
}

#[tokio::test]
async fn unknown_priority_keys_are_ignored() {
    let ghost = arc(MockConnector {
        name: "ghost",
        ..Default::default()
    });
    let real = arc(MockConnector {
        name: "real",
        consumption: Some(hourly_consumption("NL", &[1])),
        ..Default::default()
    });
    let gridbal = Gridbal::builder()
        .with_connector(real.clone())
        .prefer_for_zone(&zone("NL"), &[ghost, real.clone(), real])
        .build()
        .unwrap();
    let got = gridbal.consumption(&zone("NL"), window(0)).await.unwrap();
    assert_eq!(got.len(), 1);
}
