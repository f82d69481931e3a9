use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use gridbal::{Category, Gridbal, GridbalConfig, Window, ZoneKey, ZoneTopology};
use gridbal_mock::{FIXTURE_EXCHANGES, MockConnector};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Render spans and events; `RUST_LOG=gridbal=debug` shows routing detail
    //    when built with `--features tracing`.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // 2. Describe the grid: which borders exist and the fallback capacity.
    let topology = ZoneTopology::from_exchanges(FIXTURE_EXCHANGES, &BTreeMap::new())?;
    let nl = ZoneKey::new("NL")?;
    let mut cfg = GridbalConfig::default();
    cfg.reconcile.grid.step_minutes = 60;
    cfg.reconcile.capacity.defaults.insert(
        nl.clone(),
        BTreeMap::from([(Category::Gas, Decimal::from(15_000))]),
    );

    // 3. Build the orchestrator over the fixture connector.
    let gridbal = Gridbal::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .config(cfg)
        .topology(topology)
        .build()?;

    // 4. Reconcile one day.
    let start = Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).single().ok_or("bad start")?;
    let end = Utc.with_ymd_and_hms(2021, 6, 1, 23, 0, 0).single().ok_or("bad end")?;
    let outcome = gridbal.reconcile(&nl, Window::new(start, end)?).await?;

    // 5. Print the result.
    for rec in &outcome.records {
        println!(
            "{} unknown={} total={}",
            rec.timestamp,
            rec.production.get(Category::Unknown).unwrap_or_default(),
            rec.production.total()
        );
    }
    println!("{:#?}", outcome.stats);

    Ok(())
}
