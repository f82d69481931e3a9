use gridbal::{Gridbal, GridbalError};
use rust_decimal::Decimal;

use crate::helpers::{MockConnector, arc, hourly_consumption, window, zone};

#[tokio::test]
async fn error_falls_back_to_next_connector() {
    let broken = arc(
        MockConnector::named("broken")
            .with_consumption_fn(|_| Err(GridbalError::Other("boom".into()))),
    );
    let ok = arc(MockConnector {
        name: "ok",
        consumption: Some(hourly_consumption("NL", &[7])),
        ..Default::default()
    });
    let gridbal = Gridbal::builder()
        .with_connector(broken)
        .with_connector(ok)
        .build()
        .unwrap();
    let got = gridbal.consumption(&zone("NL"), window(0)).await.unwrap();
    assert_eq!(got[0].value("consumption"), Some(Decimal::from(7)));
}

#[tokio::test]
async fn empty_answer_falls_through() {
    let empty = arc(MockConnector {
        name: "empty",
        consumption: Some(vec![]),
        ..Default::default()
    });
    let ok = arc(MockConnector {
        name: "ok",
        consumption: Some(hourly_consumption("NL", &[7])),
        ..Default::default()
    });
    let gridbal = Gridbal::builder()
        .with_connector(empty)
        .with_connector(ok)
        .build()
        .unwrap();
    assert_eq!(gridbal.consumption(&zone("NL"), window(0)).await.unwrap().len(), 1);
}

#[tokio::test]
async fn all_empty_or_missing_is_not_found() {
    let empty = arc(MockConnector {
        name: "empty",
        consumption: Some(vec![]),
        ..Default::default()
    });
    let missing = arc(
        MockConnector::named("missing")
            .with_consumption_fn(|z| Err(GridbalError::not_found(z.to_string()))),
    );
    let gridbal = Gridbal::builder()
        .with_connector(empty)
        .with_connector(missing)
        .build()
        .unwrap();
    let err = gridbal.consumption(&zone("NL"), window(0)).await.unwrap_err();
    assert_eq!(
        err,
        GridbalError::NotFound {
            what: "consumption for NL".into()
        }
    );
}

#[tokio::test]
async fn no_capable_connector_is_unsupported() {
    let other_zone = arc(MockConnector {
        name: "be-only",
        zones: Some(vec!["BE"]),
        consumption: Some(hourly_consumption("BE", &[1])),
        ..Default::default()
    });
    let no_capability = arc(MockConnector {
        name: "nothing",
        ..Default::default()
    });
    let gridbal = Gridbal::builder()
        .with_connector(other_zone)
        .with_connector(no_capability)
        .build()
        .unwrap();
    let err = gridbal.consumption(&zone("NL"), window(0)).await.unwrap_err();
    assert_eq!(
        err,
        GridbalError::Unsupported {
            capability: "consumption".into()
        }
    );
}

#[tokio::test]
async fn mixed_failures_are_tagged_and_aggregated() {
    let boom = arc(
        MockConnector::named("boom")
            .with_production_fn(|_| Err(GridbalError::Data("bad payload".into()))),
    );
    let missing = arc(
        MockConnector::named("missing")
            .with_production_fn(|_| Err(GridbalError::not_found("production"))),
    );
    let gridbal = Gridbal::builder()
        .with_connector(boom)
        .with_connector(missing)
        .build()
        .unwrap();
    let err = gridbal.production(&zone("NL"), window(0)).await.unwrap_err();
    match err {
        GridbalError::AllProvidersFailed(errors) => {
            assert_eq!(errors.len(), 2);
            assert!(matches!(
                &errors[0],
                GridbalError::Connector { connector, .. } if connector == "boom"
            ));
            assert!(matches!(&errors[1], GridbalError::NotFound { .. }));
        }
        other => panic!("unexpected: {other:?}"),
    }
}
