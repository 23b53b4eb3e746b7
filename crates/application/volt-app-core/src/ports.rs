use async_trait::async_trait;
use serde_json::{Map, Value};
use volt_core::{
    Ack, ActiveRide, AvailableVehicle, ChargingPort, NearbyStation, NewVehicle, Payment, Report,
    ResourceResult, Ride, StationDetails, StationSettings, StationSummary, Vehicle,
    VehicleInventory, VehicleUpdate,
};

use crate::domain::ConsoleSettings;

/// Backend operations the pages and commands depend on.
///
/// Implemented for [`volt_infra::ApiClient`]; tests substitute in-memory fakes.
#[async_trait]
pub trait StationApi: Send + Sync + 'static {
    async fn station_summary(&self, station_id: &str) -> ResourceResult<StationSummary>;
    async fn active_rides(&self, station_id: &str) -> ResourceResult<Vec<ActiveRide>>;
    async fn dashboard_vehicles(&self, station_id: &str) -> ResourceResult<Vec<Vehicle>>;
    async fn station_details(&self, station_id: &str) -> ResourceResult<StationDetails>;
    async fn vehicles(&self, station_id: &str) -> ResourceResult<VehicleInventory>;
    async fn nearby_stations(&self, station_id: &str) -> ResourceResult<Vec<NearbyStation>>;
    async fn available_vehicles(&self, station_id: &str)
        -> ResourceResult<Vec<AvailableVehicle>>;
    async fn charging_ports(&self, station_id: &str) -> ResourceResult<Vec<ChargingPort>>;
    async fn rides(&self, station_id: &str) -> ResourceResult<Vec<Ride>>;
    /// `None` lists payments across all stations.
    async fn payments(&self, station_id: Option<&str>) -> ResourceResult<Vec<Payment>>;
    async fn report(&self, station_id: &str) -> ResourceResult<Option<Report>>;
    async fn settings(&self, station_id: &str) -> ResourceResult<Option<StationSettings>>;

    async fn add_vehicle(&self, vehicle: &NewVehicle) -> ResourceResult<Ack>;
    async fn update_vehicle(&self, vehicle_id: &str, update: &VehicleUpdate)
        -> ResourceResult<Ack>;
    async fn delete_vehicle(&self, vehicle_id: &str) -> ResourceResult<Ack>;
    async fn update_vehicle_status(
        &self,
        vehicle_id: &str,
        status: &str,
        extra: Map<String, Value>,
    ) -> ResourceResult<Ack>;
    async fn transfer_vehicle(
        &self,
        vehicle_id: &str,
        source_station_id: &str,
        target_station_id: &str,
    ) -> ResourceResult<Ack>;
    async fn assign_port(
        &self,
        station_id: &str,
        port_id: &str,
        vehicle_id: &str,
    ) -> ResourceResult<Ack>;
    async fn remove_from_port(&self, station_id: &str, port_id: &str) -> ResourceResult<Ack>;
    async fn update_settings(
        &self,
        station_id: &str,
        settings: &StationSettings,
    ) -> ResourceResult<Option<StationSettings>>;
    async fn reset_settings(&self, station_id: &str) -> ResourceResult<Option<StationSettings>>;
}

pub trait SettingsRepo: Send + Sync + 'static {
    fn load(&self) -> anyhow::Result<ConsoleSettings>;
    fn save(&self, settings: &ConsoleSettings) -> anyhow::Result<()>;
}
