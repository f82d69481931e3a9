use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use gridbal::{
    Category, Gridbal, GridbalConfig, GridbalError, ReconcileConfig, SupplementalOverride,
    ZoneTopology,
};
use rust_decimal::Decimal;

use crate::helpers::{
    MockConnector, arc, at_hour, hourly_consumption, hourly_legs, hourly_production,
    hourly_reconcile_config, pair, window, zone,
};

fn topology() -> ZoneTopology {
    ZoneTopology::from_exchanges(["BE->NL", "NL->NO"], &BTreeMap::new()).unwrap()
}

fn base() -> MockConnector {
    MockConnector {
        name: "tso",
        consumption: Some(hourly_consumption("NL", &[1000])),
        production: Some(hourly_production(
            "NL",
            0,
            &[(Category::Gas, 600), (Category::Wind, 200)],
        )),
        ..Default::default()
    }
}

#[tokio::test]
async fn inactive_border_is_not_fetched() {
    let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(vec![]));
    let log = Arc::clone(&seen);
    let source = base().with_exchange_fn(move |p| {
        log.lock().unwrap().push(p.key());
        Ok(hourly_legs(&p.key(), 0, 100))
    });

    let cfg = GridbalConfig {
        reconcile: hourly_reconcile_config("NL"),
        exchange_activation: HashMap::from([(pair("NL->NO"), at_hour(24 * 365))]),
        ..GridbalConfig::default()
    };
    let gridbal = Gridbal::builder()
        .with_connector(arc(source))
        .config(cfg)
        .topology(topology())
        .build()
        .unwrap();
    let out = gridbal.reconcile(&zone("NL"), window(0)).await.unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["BE->NL".to_string()]);
    // 1000 - 100 import - 800 reported
    assert_eq!(
        out.records[0].production.get(Category::Unknown),
        Some(Decimal::from(100))
    );
}

#[tokio::test]
async fn border_active_before_window_end_is_fetched() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let source = base().with_exchange_fn(move |p| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(hourly_legs(&p.key(), 0, 10))
    });
    let cfg = GridbalConfig {
        reconcile: hourly_reconcile_config("NL"),
        exchange_activation: HashMap::from([(pair("NL->NO"), at_hour(0))]),
        ..GridbalConfig::default()
    };
    let gridbal = Gridbal::builder()
        .with_connector(arc(source))
        .config(cfg)
        .topology(topology())
        .build()
        .unwrap();
    gridbal.reconcile(&zone("NL"), window(0)).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn missing_border_data_fails_the_run() {
    let source = base().with_exchange_fn(|p| {
        if p.key() == "NL->NO" {
            Ok(vec![])
        } else {
            Ok(hourly_legs(&p.key(), 0, 100))
        }
    });
    let gridbal = Gridbal::builder()
        .with_connector(arc(source))
        .reconcile_config(hourly_reconcile_config("NL"))
        .topology(topology())
        .build()
        .unwrap();
    let err = gridbal.reconcile(&zone("NL"), window(0)).await.unwrap_err();
    assert_eq!(
        err,
        GridbalError::NotFound {
            what: "exchange for NL->NO".into()
        }
    );
}

#[tokio::test]
async fn supplemental_is_only_fetched_when_active() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let source = base().with_supplemental_fn(move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(vec![])
    });
    let cfg = ReconcileConfig {
        supplemental: Some(SupplementalOverride {
            category: Category::Wind,
            available_from: Some(at_hour(48)),
            enabled: true,
        }),
        ..hourly_reconcile_config("NL")
    };
    let gridbal = Gridbal::builder()
        .with_connector(arc(source))
        .reconcile_config(cfg)
        .build()
        .unwrap();
    let out = gridbal.reconcile(&zone("NL"), window(0)).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    // isolated zone: no topology, no import
    assert_eq!(
        out.records[0].production.get(Category::Unknown),
        Some(Decimal::from(200))
    );
}
