mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{inventory, vehicle, FakeApi};
use volt_app_core::{LoadMode, Page, PageKind, PageStatus};
use volt_core::{ApiError, ResourceData, ResourceKey, Session, StationSummary};

fn session() -> Session {
    Session::for_station("STN001")
}

#[tokio::test]
async fn secondary_failure_keeps_dashboard_ready() {
    let api = Arc::new(FakeApi::new());
    api.set(
        ResourceKey::DashboardVehicles,
        Ok(ResourceData::DashboardVehicles(vec![vehicle("V1", "available")])),
    );
    api.set(ResourceKey::ActiveRides, Err(ApiError::status(500)));

    let page = Page::new(PageKind::Dashboard, api.clone(), session());
    let state = page.load().await.unwrap();

    assert_eq!(state.status, PageStatus::Ready);
    assert_eq!(state.dashboard_vehicles()[0].id(), "V1");
    assert_eq!(
        state.error(ResourceKey::ActiveRides).map(ApiError::message),
        Some("HTTP error! status: 500".to_string())
    );
    let partial: Vec<_> = state.partial_errors().into_iter().map(|(k, _)| k).collect();
    assert_eq!(partial, vec![ResourceKey::ActiveRides]);
}

#[tokio::test]
async fn primary_failure_fails_the_page_but_records_secondaries() {
    let api = Arc::new(FakeApi::new());
    api.set(
        ResourceKey::DashboardVehicles,
        Err(ApiError::Transport("connection refused".into())),
    );
    api.set(
        ResourceKey::StationSummary,
        Ok(ResourceData::StationSummary(StationSummary {
            total_vehicles: 3,
            ..Default::default()
        })),
    );

    let page = Page::new(PageKind::Dashboard, api, session());
    let state = page.load().await.unwrap();

    assert!(matches!(state.status, PageStatus::Failed(ApiError::Transport(_))));
    assert_eq!(state.summary().map(|s| s.total_vehicles), Some(3));
}

#[tokio::test(start_paused = true)]
async fn load_returns_only_after_the_slow_resource_settles() {
    let api = Arc::new(FakeApi::new());
    api.set_delayed(
        ResourceKey::StationDetails,
        Ok(ResourceKey::StationDetails.default_data()),
        Duration::from_secs(8),
    );
    api.set(
        ResourceKey::DashboardVehicles,
        Ok(ResourceData::DashboardVehicles(vec![vehicle("V9", "available")])),
    );

    let page = Page::new(PageKind::Dashboard, api.clone(), session());
    let started = tokio::time::Instant::now();
    let state = page.load().await.unwrap();

    assert!(started.elapsed() >= Duration::from_secs(8));
    for key in PageKind::Dashboard.resources() {
        assert!(!state.field(*key).unwrap().is_pending(), "{key} still pending");
        assert_eq!(api.hits(*key), 1);
    }
    assert_eq!(state.dashboard_vehicles().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn silent_reload_never_shows_loading() {
    let api = Arc::new(FakeApi::new());
    api.set(ResourceKey::Vehicles, Ok(inventory(vec![vehicle("V1", "available")])));
    let page = Arc::new(Page::new(PageKind::Vehicles, api.clone(), session()));
    page.load().await.unwrap();

    api.set_delayed(
        ResourceKey::Vehicles,
        Ok(inventory(vec![vehicle("V1", "rented")])),
        Duration::from_secs(3),
    );
    let bg = page.clone();
    let task = tokio::spawn(async move { bg.reload(&[ResourceKey::Vehicles], LoadMode::Silent).await });

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(page.state().status, PageStatus::Ready);

    let state = task.await.unwrap().unwrap();
    assert_eq!(state.status, PageStatus::Ready);
    assert_eq!(state.vehicles()[0].status, "rented");
}

#[tokio::test]
async fn partial_reload_leaves_other_fields_alone() {
    let api = Arc::new(FakeApi::new());
    api.set(ResourceKey::AvailableVehicles, Err(ApiError::status(502)));
    let page = Page::new(PageKind::ChargingPorts, api.clone(), session());
    let first = page.load().await.unwrap();

    let second = page
        .reload(&[ResourceKey::ChargingPorts], LoadMode::Normal)
        .await
        .unwrap();

    assert_eq!(
        second.field(ResourceKey::AvailableVehicles),
        first.field(ResourceKey::AvailableVehicles)
    );
    assert_eq!(api.hits(ResourceKey::AvailableVehicles), 1);
    assert_eq!(api.hits(ResourceKey::ChargingPorts), 2);
}

#[tokio::test(start_paused = true)]
async fn destroying_the_page_discards_in_flight_results() {
    let api = Arc::new(FakeApi::new());
    api.set_delayed(
        ResourceKey::Rides,
        Err(ApiError::status(500)),
        Duration::from_secs(5),
    );
    let page = Arc::new(Page::new(PageKind::Rides, api, session()));

    let bg = page.clone();
    let task = tokio::spawn(async move { bg.load().await });
    tokio::time::sleep(Duration::from_secs(1)).await;

    let revision = page.context().store().revision();
    page.destroy();
    assert!(task.await.unwrap().is_err());

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(page.context().store().revision(), revision);
    assert!(page.state().error(ResourceKey::Rides).is_none());
}

#[tokio::test(start_paused = true)]
async fn charging_refresh_runs_until_nothing_charges() {
    let api = Arc::new(FakeApi::new());
    api.set(
        ResourceKey::Vehicles,
        Ok(inventory(vec![vehicle("V1", "charging"), vehicle("V2", "available")])),
    );
    let page = Page::new(PageKind::Vehicles, api.clone(), session())
        .with_refresh_interval(Duration::from_secs(10));

    page.load().await.unwrap();
    assert!(page.is_refreshing());

    tokio::time::sleep(Duration::from_secs(25)).await;
    assert_eq!(api.hits(ResourceKey::Vehicles), 3);
    assert_eq!(page.state().status, PageStatus::Ready);

    api.set(
        ResourceKey::Vehicles,
        Ok(inventory(vec![vehicle("V1", "available")])),
    );
    page.take_refresh().unwrap().join().await;
    assert_eq!(api.hits(ResourceKey::Vehicles), 4);
    assert!(!page.state().any_charging());
}

#[tokio::test(start_paused = true)]
async fn charging_refresh_stops_with_the_page() {
    let api = Arc::new(FakeApi::new());
    api.set(ResourceKey::Vehicles, Ok(inventory(vec![vehicle("V1", "charging")])));
    let page = Page::new(PageKind::Vehicles, api.clone(), session())
        .with_refresh_interval(Duration::from_secs(10));

    page.load().await.unwrap();
    let refresh = page.take_refresh().unwrap();
    page.destroy();
    refresh.join().await;

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(api.hits(ResourceKey::Vehicles), 1);
}

#[tokio::test]
async fn no_refresh_without_charging_vehicles() {
    let api = Arc::new(FakeApi::new());
    api.set(ResourceKey::Vehicles, Ok(inventory(vec![vehicle("V1", "available")])));
    let page = Page::new(PageKind::Vehicles, api, session());
    page.load().await.unwrap();
    assert!(!page.is_refreshing());
}
