use async_trait::async_trait;
use serde_json::{Map, Value};
use volt_core::{
    Ack, ActiveRide, AvailableVehicle, ChargingPort, NearbyStation, NewVehicle, Payment, Report,
    ResourceResult, Ride, StationDetails, StationSettings, StationSummary, Vehicle,
    VehicleInventory, VehicleUpdate,
};
use volt_infra::ApiClient;

use crate::ports::StationApi;

#[async_trait]
impl StationApi for ApiClient {
    async fn station_summary(&self, station_id: &str) -> ResourceResult<StationSummary> {
        ApiClient::station_summary(self, station_id).await
    }

    async fn active_rides(&self, station_id: &str) -> ResourceResult<Vec<ActiveRide>> {
        ApiClient::active_rides(self, station_id).await
    }

    async fn dashboard_vehicles(&self, station_id: &str) -> ResourceResult<Vec<Vehicle>> {
        self.vehicles_lite(station_id).await
    }

    async fn station_details(&self, station_id: &str) -> ResourceResult<StationDetails> {
        ApiClient::station_details(self, station_id).await
    }

    async fn vehicles(&self, station_id: &str) -> ResourceResult<VehicleInventory> {
        self.fetch_vehicles(station_id).await
    }

    async fn nearby_stations(&self, station_id: &str) -> ResourceResult<Vec<NearbyStation>> {
        ApiClient::nearby_stations(self, station_id).await
    }

    async fn available_vehicles(
        &self,
        station_id: &str,
    ) -> ResourceResult<Vec<AvailableVehicle>> {
        ApiClient::available_vehicles(self, station_id).await
    }

    async fn charging_ports(&self, station_id: &str) -> ResourceResult<Vec<ChargingPort>> {
        ApiClient::charging_ports(self, station_id).await
    }

    async fn rides(&self, station_id: &str) -> ResourceResult<Vec<Ride>> {
        self.fetch_rides(station_id).await
    }

    async fn payments(&self, station_id: Option<&str>) -> ResourceResult<Vec<Payment>> {
        match station_id {
            Some(id) => self.payments_by_station(id).await,
            None => self.all_payments().await,
        }
    }

    async fn report(&self, station_id: &str) -> ResourceResult<Option<Report>> {
        self.fetch_report(station_id).await
    }

    async fn settings(&self, station_id: &str) -> ResourceResult<Option<StationSettings>> {
        self.fetch_settings(station_id).await
    }

    async fn add_vehicle(&self, vehicle: &NewVehicle) -> ResourceResult<Ack> {
        ApiClient::add_vehicle(self, vehicle).await
    }

    async fn update_vehicle(
        &self,
        vehicle_id: &str,
        update: &VehicleUpdate,
    ) -> ResourceResult<Ack> {
        ApiClient::update_vehicle(self, vehicle_id, update).await
    }

    async fn delete_vehicle(&self, vehicle_id: &str) -> ResourceResult<Ack> {
        ApiClient::delete_vehicle(self, vehicle_id).await
    }

    async fn update_vehicle_status(
        &self,
        vehicle_id: &str,
        status: &str,
        extra: Map<String, Value>,
    ) -> ResourceResult<Ack> {
        ApiClient::update_vehicle_status(self, vehicle_id, status, extra).await
    }

    async fn transfer_vehicle(
        &self,
        vehicle_id: &str,
        source_station_id: &str,
        target_station_id: &str,
    ) -> ResourceResult<Ack> {
        ApiClient::transfer_vehicle(self, vehicle_id, source_station_id, target_station_id).await
    }

    async fn assign_port(
        &self,
        station_id: &str,
        port_id: &str,
        vehicle_id: &str,
    ) -> ResourceResult<Ack> {
        self.assign_vehicle_to_port(station_id, port_id, vehicle_id)
            .await
    }

    async fn remove_from_port(&self, station_id: &str, port_id: &str) -> ResourceResult<Ack> {
        self.remove_vehicle_from_port(station_id, port_id).await
    }

    async fn update_settings(
        &self,
        station_id: &str,
        settings: &StationSettings,
    ) -> ResourceResult<Option<StationSettings>> {
        ApiClient::update_settings(self, station_id, settings).await
    }

    async fn reset_settings(&self, station_id: &str) -> ResourceResult<Option<StationSettings>> {
        ApiClient::reset_settings(self, station_id).await
    }
}
