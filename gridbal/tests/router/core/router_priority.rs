use gridbal::Gridbal;
use rust_decimal::Decimal;

use crate::helpers::{MockConnector, arc, hourly_consumption, window, zone};

fn pair_of_sources() -> (
    std::sync::Arc<dyn gridbal::GridbalConnector>,
    std::sync::Arc<dyn gridbal::GridbalConnector>,
) {
    let a = arc(MockConnector {
        name: "a",
        consumption: Some(hourly_consumption("NL", &[100])),
        ..Default::default()
    });
    let b = arc(MockConnector {
        name: "b",
        consumption: Some(hourly_consumption("NL", &[200])),
        ..Default::default()
    });
    (a, b)
}

#[tokio::test]
async fn registration_order_without_preferences() {
    let (a, b) = pair_of_sources();
    let gridbal = Gridbal::builder()
        .with_connector(a)
        .with_connector(b)
        .build()
        .unwrap();
    let got = gridbal.consumption(&zone("NL"), window(0)).await.unwrap();
    assert_eq!(got[0].value("consumption"), Some(Decimal::from(100)));
}

#[tokio::test]
async fn per_zone_priority_is_applied() {
    let (a, b) = pair_of_sources();
    let gridbal = Gridbal::builder()
        .with_connector(a.clone())
        .with_connector(b.clone())
        .prefer_for_zone(&zone("NL"), &[b, a])
        .build()
        .unwrap();
    let got = gridbal.consumption(&zone("NL"), window(0)).await.unwrap();
    assert_eq!(got[0].value("consumption"), Some(Decimal::from(200)));
}

#[tokio::test]
async fn priority_is_scoped_to_its_zone() {
    let (a, b) = pair_of_sources();
    let gridbal = Gridbal::builder()
        .with_connector(a.clone())
        .with_connector(b.clone())
        .prefer_for_zone(&zone("BE"), &[b])
        .build()
        .unwrap();
    let got = gridbal.consumption(&zone("NL"), window(0)).await.unwrap();
    assert_eq!(got[0].value("consumption"), Some(Decimal::from(100)));
}

fn sources_with_values(values: &[i64; 3]) -> Vec<std::sync::Arc<dyn gridbal::GridbalConnector>> {
    const NAMES: [&str; 3] = ["p0", "p1", "p2"];
    NAMES
        .iter()
        .zip(values)
        .map(|(name, v)| {
            arc(MockConnector {
                name: *name,
                consumption: Some(hourly_consumption("NL", &[*v])),
                ..Default::default()
            })
        })
        .collect()
}

proptest::proptest! {
    #[test]
    fn first_preferred_connector_answers(first in 0usize..3, rotate in 0usize..3) {
        let values = [100, 200, 300];
        let sources = sources_with_values(&values);
        let mut preferred = sources.clone();
        preferred.rotate_left(rotate);
        let idx = preferred.iter().position(|c| c.name() == sources[first].name()).unwrap();
        preferred.swap(0, idx);

        let mut builder = Gridbal::builder();
        for s in &sources {
            builder = builder.with_connector(s.clone());
        }
        let gridbal = builder.prefer_for_zone(&zone("NL"), &preferred).build().unwrap();

        let got = tokio_test::block_on(gridbal.consumption(&zone("NL"), window(0))).unwrap();
        proptest::prop_assert_eq!(got[0].value("consumption"), Some(Decimal::from(values[first])));
    }
}
