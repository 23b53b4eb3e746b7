#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use volt_app_core::StationApi;
use volt_core::{
    Ack, ActiveRide, ApiError, AvailableVehicle, ChargingPort, NearbyStation, NewVehicle, Payment,
    Report, ResourceData, ResourceKey, ResourceResult, Ride, StationDetails, StationSettings,
    StationSummary, Vehicle, VehicleInventory, VehicleUpdate,
};

#[derive(Clone)]
struct Scripted {
    result: ResourceResult<ResourceData>,
    delay: Duration,
}

/// In-memory backend: scripted per-resource responses and one scripted mutation outcome.
#[derive(Default)]
pub struct FakeApi {
    responses: Mutex<HashMap<ResourceKey, Scripted>>,
    mutation: Mutex<Option<ApiError>>,
    hits: Mutex<HashMap<ResourceKey, usize>>,
    mutations: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, key: ResourceKey, result: ResourceResult<ResourceData>) {
        self.set_delayed(key, result, Duration::ZERO);
    }

    pub fn set_delayed(
        &self,
        key: ResourceKey,
        result: ResourceResult<ResourceData>,
        delay: Duration,
    ) {
        self.responses
            .lock()
            .unwrap()
            .insert(key, Scripted { result, delay });
    }

    pub fn fail_mutations(&self, err: ApiError) {
        *self.mutation.lock().unwrap() = Some(err);
    }

    pub fn hits(&self, key: ResourceKey) -> usize {
        self.hits.lock().unwrap().get(&key).copied().unwrap_or(0)
    }

    pub fn mutations(&self) -> Vec<String> {
        self.mutations.lock().unwrap().clone()
    }

    async fn get(&self, key: ResourceKey) -> ResourceResult<ResourceData> {
        *self.hits.lock().unwrap().entry(key).or_default() += 1;
        let scripted = self.responses.lock().unwrap().get(&key).cloned();
        match scripted {
            Some(s) => {
                if !s.delay.is_zero() {
                    tokio::time::sleep(s.delay).await;
                }
                s.result
            }
            None => Ok(key.default_data()),
        }
    }

    fn mutate(&self, label: String) -> ResourceResult<Ack> {
        self.mutations.lock().unwrap().push(label);
        match self.mutation.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(Ack {
                message: Some("ok".into()),
            }),
        }
    }
}

macro_rules! scripted {
    ($self:ident, $variant:ident) => {
        match $self.get(ResourceKey::$variant).await? {
            ResourceData::$variant(v) => Ok(v),
            other => Err(ApiError::Decode(format!("scripted {}", other.key()))),
        }
    };
}

#[async_trait]
impl StationApi for FakeApi {
    async fn station_summary(&self, _: &str) -> ResourceResult<StationSummary> {
        scripted!(self, StationSummary)
    }
    async fn active_rides(&self, _: &str) -> ResourceResult<Vec<ActiveRide>> {
        scripted!(self, ActiveRides)
    }
    async fn dashboard_vehicles(&self, _: &str) -> ResourceResult<Vec<Vehicle>> {
        scripted!(self, DashboardVehicles)
    }
    async fn station_details(&self, _: &str) -> ResourceResult<StationDetails> {
        scripted!(self, StationDetails)
    }
    async fn vehicles(&self, _: &str) -> ResourceResult<VehicleInventory> {
        scripted!(self, Vehicles)
    }
    async fn nearby_stations(&self, _: &str) -> ResourceResult<Vec<NearbyStation>> {
        scripted!(self, NearbyStations)
    }
    async fn available_vehicles(&self, _: &str) -> ResourceResult<Vec<AvailableVehicle>> {
        scripted!(self, AvailableVehicles)
    }
    async fn charging_ports(&self, _: &str) -> ResourceResult<Vec<ChargingPort>> {
        scripted!(self, ChargingPorts)
    }
    async fn rides(&self, _: &str) -> ResourceResult<Vec<Ride>> {
        scripted!(self, Rides)
    }
    async fn payments(&self, _: Option<&str>) -> ResourceResult<Vec<Payment>> {
        scripted!(self, Payments)
    }
    async fn report(&self, _: &str) -> ResourceResult<Option<Report>> {
        scripted!(self, Report)
    }
    async fn settings(&self, _: &str) -> ResourceResult<Option<StationSettings>> {
        scripted!(self, Settings)
    }

    async fn add_vehicle(&self, vehicle: &NewVehicle) -> ResourceResult<Ack> {
        self.mutate(format!("add {}", vehicle.vehicle_id))
    }
    async fn update_vehicle(&self, id: &str, _: &VehicleUpdate) -> ResourceResult<Ack> {
        self.mutate(format!("update {id}"))
    }
    async fn delete_vehicle(&self, id: &str) -> ResourceResult<Ack> {
        self.mutate(format!("delete {id}"))
    }
    async fn update_vehicle_status(
        &self,
        id: &str,
        status: &str,
        _: Map<String, Value>,
    ) -> ResourceResult<Ack> {
        self.mutate(format!("status {id} {status}"))
    }
    async fn transfer_vehicle(&self, id: &str, from: &str, to: &str) -> ResourceResult<Ack> {
        self.mutate(format!("transfer {id} {from}->{to}"))
    }
    async fn assign_port(&self, station: &str, port: &str, vehicle: &str) -> ResourceResult<Ack> {
        self.mutate(format!("assign {station} {port} {vehicle}"))
    }
    async fn remove_from_port(&self, station: &str, port: &str) -> ResourceResult<Ack> {
        self.mutate(format!("remove {station} {port}"))
    }
    async fn update_settings(
        &self,
        station: &str,
        settings: &StationSettings,
    ) -> ResourceResult<Option<StationSettings>> {
        self.mutate(format!("settings {station}"))?;
        Ok(Some(settings.clone()))
    }
    async fn reset_settings(&self, station: &str) -> ResourceResult<Option<StationSettings>> {
        self.mutate(format!("reset {station}"))?;
        Ok(None)
    }
}

pub fn vehicle(id: &str, status: &str) -> Vehicle {
    serde_json::from_value(json!({ "vehicle_id": id, "status": status, "type": "Scooter" }))
        .unwrap()
}

pub fn inventory(vehicles: Vec<Vehicle>) -> ResourceData {
    ResourceData::Vehicles(VehicleInventory {
        vehicles,
        capacity_info: None,
    })
}
