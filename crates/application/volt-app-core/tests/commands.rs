mod common;

use std::sync::Arc;

use common::{inventory, vehicle, FakeApi};
use tokio::sync::mpsc;
use volt_app_core::{Commands, Notice, NoticeLevel, Page, PageKind, PageStatus};
use volt_core::{
    ApiError, ApiErrorKind, NearbyStation, NewVehicle, ResourceData, ResourceKey, Session,
    StationSettings,
};

async fn mounted(kind: PageKind, api: Arc<FakeApi>) -> Arc<Page<FakeApi>> {
    let page = Arc::new(Page::new(kind, api, Session::for_station("STN001")));
    page.load().await.unwrap();
    page
}

#[tokio::test]
async fn failed_mutation_reports_and_changes_nothing() {
    let api = Arc::new(FakeApi::new());
    api.set(ResourceKey::Vehicles, Ok(inventory(vec![vehicle("V1", "available")])));
    let page = mounted(PageKind::Vehicles, api.clone()).await;
    let before = page.state();
    let revision = page.context().store().revision();

    api.fail_mutations(ApiError::Application("Vehicle not found".into()));
    let (tx, mut rx) = mpsc::channel(8);
    let commands = Commands::new(page.clone(), tx);

    let err = commands.delete_vehicle("V1").await.unwrap_err();
    assert_eq!(err.message(), "Vehicle not found");
    assert_eq!(rx.recv().await, Some(Notice::error("Vehicle not found")));
    assert_eq!(page.state(), before);
    assert_eq!(page.context().store().revision(), revision);
    assert_eq!(api.hits(ResourceKey::Vehicles), 1);
}

#[tokio::test]
async fn confirmed_mutation_notifies_then_reloads_affected_resources() {
    let api = Arc::new(FakeApi::new());
    let page = mounted(PageKind::Vehicles, api.clone()).await;
    api.set(ResourceKey::Vehicles, Ok(inventory(vec![vehicle("V7", "available")])));

    let (tx, mut rx) = mpsc::channel(8);
    let commands = Commands::new(page.clone(), tx);
    commands
        .add_vehicle(&NewVehicle::new("V7", "STN001"))
        .await
        .unwrap();

    let notice = rx.recv().await.unwrap();
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.message, "ok");
    assert_eq!(api.hits(ResourceKey::Vehicles), 2);
    assert_eq!(page.state().vehicles()[0].id(), "V7");
    // Not on this page, so never requested.
    assert_eq!(api.hits(ResourceKey::StationSummary), 0);
}

#[tokio::test]
async fn port_commands_use_the_session_station() {
    let api = Arc::new(FakeApi::new());
    let page = mounted(PageKind::ChargingPorts, api.clone()).await;
    let (tx, _rx) = mpsc::channel(8);
    let commands = Commands::new(page, tx);

    commands.assign_port("P2", "V1").await.unwrap();
    commands.remove_from_port("P2").await.unwrap();
    commands.transfer_vehicle("V1", "STN002").await.unwrap();

    assert_eq!(
        api.mutations(),
        vec![
            "assign STN001 P2 V1".to_string(),
            "remove STN001 P2".to_string(),
            "transfer V1 STN001->STN002".to_string(),
        ]
    );
    assert_eq!(api.hits(ResourceKey::ChargingPorts), 3);
    assert_eq!(api.hits(ResourceKey::AvailableVehicles), 3);
}

#[tokio::test]
async fn invalid_settings_are_rejected_before_any_request() {
    let api = Arc::new(FakeApi::new());
    let page = mounted(PageKind::Settings, api.clone()).await;
    let (tx, mut rx) = mpsc::channel(8);
    let commands = Commands::new(page, tx);

    let settings = StationSettings {
        name: "Central".into(),
        capacity: Some(0),
        ..Default::default()
    };
    let err = commands.update_settings(&settings).await.unwrap_err();
    assert_eq!(err.kind(), ApiErrorKind::InvalidRequest);
    assert!(api.mutations().is_empty());
    assert_eq!(rx.recv().await.map(|n| n.level), Some(NoticeLevel::Error));
}

#[tokio::test]
async fn dropped_notice_receiver_does_not_fail_commands() {
    let api = Arc::new(FakeApi::new());
    let page = mounted(PageKind::Settings, api.clone()).await;
    let (tx, rx) = mpsc::channel(1);
    drop(rx);
    let commands = Commands::new(page, tx);
    assert!(commands.reset_settings().await.is_ok());
}

#[tokio::test]
async fn transfer_page_refreshes_nearby_stations_after_a_move() {
    let api = Arc::new(FakeApi::new());
    let page = mounted(PageKind::Transfer, api.clone()).await;
    assert_eq!(api.hits(ResourceKey::NearbyStations), 1);

    let nearby: Vec<NearbyStation> = serde_json::from_value(serde_json::json!([
        { "station_id": "STN002", "station_name": "Airport", "current_vehicles": 4 }
    ]))
    .unwrap();
    api.set(ResourceKey::NearbyStations, Ok(ResourceData::NearbyStations(nearby)));

    let (tx, _rx) = mpsc::channel(8);
    let commands = Commands::new(page.clone(), tx);
    commands.transfer_vehicle("V1", "STN002").await.unwrap();

    assert_eq!(api.hits(ResourceKey::NearbyStations), 2);
    assert_eq!(api.hits(ResourceKey::Vehicles), 2);
    let state = page.state();
    assert_eq!(state.status, PageStatus::Ready);
    assert_eq!(state.nearby_stations()[0].current_vehicles, 4);
}

#[tokio::test]
async fn failed_reload_after_a_mutation_marks_the_page_failed() {
    let api = Arc::new(FakeApi::new());
    api.set(ResourceKey::Vehicles, Ok(inventory(vec![vehicle("V1", "available")])));
    let page = mounted(PageKind::Vehicles, api.clone()).await;

    api.set(
        ResourceKey::Vehicles,
        Err(ApiError::Status {
            status: 500,
            body: None,
        }),
    );
    let (tx, mut rx) = mpsc::channel(8);
    let commands = Commands::new(page.clone(), tx);
    commands.delete_vehicle("V1").await.unwrap();

    assert_eq!(rx.recv().await.map(|n| n.level), Some(NoticeLevel::Success));
    match page.state().status {
        PageStatus::Failed(e) => assert_eq!(e.kind(), ApiErrorKind::Status),
        other => panic!("expected a failed page, got {other:?}"),
    }
}
