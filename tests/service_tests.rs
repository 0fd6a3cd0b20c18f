mod common;

use std::sync::Arc;

use assetmap::prelude::*;
use common::{keyed_asset, located_assets, FakeCatalog};

fn service(catalog: FakeCatalog) -> AssetMapService<Arc<FakeCatalog>> {
    AssetMapService::new(
        Arc::new(catalog),
        FetchConfig::for_testing(),
        MetadataKeyConfig::default(),
        MapSettings::default(),
    )
}

#[tokio::test]
async fn test_load_builds_view_in_catalog_order() {
    let assets = vec![
        keyed_asset("a", "10", "20"),
        Asset::new("b", "No location"),
        keyed_asset("c", "95", "20"),
        Asset::new("d", "Typed").with_metadata(Metadata::Typed(vec![
            TypedProperty::single("GPS Lat", "30"),
            TypedProperty::single("lng", "-40"),
        ])),
    ];
    let service = service(FakeCatalog::new(assets));

    let view = service.load().await.into_view().expect("run should complete");

    let ids: Vec<&str> = view.assets.iter().map(LocatedAsset::id).collect();
    assert_eq!(ids, ["a", "d"]);
    assert_eq!(view.center, LatLng::new(20.0, -10.0));
    assert_eq!(view.summary.total_assets, 4);
    assert_eq!(view.summary.located, 2);
    assert_eq!(view.summary.status, CatalogStatus::Located);
    assert_eq!(view.fetch.stop, StopReason::Complete);
}

#[tokio::test]
async fn test_empty_catalog_is_distinguishable_from_unlocated() {
    let empty = service(FakeCatalog::new(Vec::new())).load().await.into_view().unwrap();
    assert_eq!(empty.summary.status, CatalogStatus::EmptyCatalog);

    let unlocated = service(FakeCatalog::new(vec![
        Asset::new("1", "One"),
        Asset::new("2", "Two"),
    ]))
    .load()
    .await
    .into_view()
    .unwrap();
    assert_eq!(unlocated.summary.status, CatalogStatus::NoLocatedAssets);
    assert_eq!(unlocated.summary.total_assets, 2);
    assert!(unlocated.assets.is_empty());
}

#[tokio::test]
async fn test_partial_fetch_still_produces_view() {
    let catalog = FakeCatalog::new(located_assets(150)).failing(2, 1, || Error::Transport { status: 500 });
    let view = service(catalog).load().await.into_view().unwrap();

    assert_eq!(view.summary.total_assets, 100);
    assert!(matches!(view.fetch.stop, StopReason::Failed { page: 2, .. }));
}

#[tokio::test]
async fn test_superseded_load_is_not_published() {
    let catalog = FakeCatalog::new(located_assets(300));
    let service = service(catalog);

    let runs = service.runs().clone();
    let token = runs.begin();
    runs.cancel();

    let outcome = service.load_with(&token).await;
    assert_eq!(
        outcome,
        RunOutcome::Superseded {
            generation: token.generation()
        }
    );
    assert!(outcome.view().is_none());

    // A fresh load afterwards completes normally
    let view = service.load().await.into_view().unwrap();
    assert_eq!(view.assets.len(), 300);
}

#[tokio::test]
async fn test_load_is_repeatable() {
    let service = service(FakeCatalog::new(located_assets(42)));

    let first = service.load().await.into_view().unwrap();
    let second = service.load().await.into_view().unwrap();

    assert_eq!(first.assets, second.assets);
    assert_eq!(first.center, second.center);
}

#[tokio::test]
async fn test_custom_keys_flow_through() {
    let asset = Asset::new("x", "Custom").with_metadata(Metadata::Keyed(vec![
        KeyedField::new("geo_lat", "1.5"),
        KeyedField::new("geo_lon", "2.5"),
    ]));
    let service = AssetMapService::new(
        Arc::new(FakeCatalog::new(vec![asset])),
        FetchConfig::for_testing(),
        MetadataKeyConfig::new("geo_lat", "geo_lon"),
        MapSettings {
            style: MapStyle::Dark,
            ..MapSettings::default()
        },
    );

    let view = service.load().await.into_view().unwrap();
    assert_eq!(view.assets.len(), 1);
    assert_eq!(view.style, MapStyle::Dark);
    assert!(view.tile_url.contains("dark_all"));
}

#[test]
fn test_service_from_config_requires_domain() {
    let err = AppConfig::from_lookup(|key| match key {
        "FRONTIFY_BEARER_TOKEN" => Some("token".to_string()),
        _ => None,
    })
    .unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_service_from_config_builds_graphql_fetcher() {
    let config = AppConfig::from_lookup(|key| match key {
        "FRONTIFY_DOMAIN" => Some("acme.frontify.com".to_string()),
        "FRONTIFY_BEARER_TOKEN" => Some("token".to_string()),
        "FRONTIFY_LIBRARY_ID" => Some("lib-9".to_string()),
        _ => None,
    })
    .unwrap();

    let service = AssetMapService::from_config(config).unwrap();
    let fetcher = service.orchestrator().fetcher();
    assert_eq!(fetcher.endpoint(), "https://acme.frontify.com/graphql");
    assert_eq!(fetcher.shape(), &QueryShape::Library { id: "lib-9".into() });
}
