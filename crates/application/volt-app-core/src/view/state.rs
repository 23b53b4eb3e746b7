use std::collections::BTreeMap;

use volt_core::{
    ActiveRide, ApiError, AvailableVehicle, ChargingPort, NearbyStation, Payment, Report,
    ResourceData, ResourceKey, Ride, StationDetails, StationSettings, StationSummary, Vehicle,
    VehicleInventory,
};

use super::events::LoadId;

/// Last known value of one resource plus the error of its most recent failed load.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub value: ResourceData,
    pub error: Option<ApiError>,
    pub(crate) pending: Option<LoadId>,
}

impl Field {
    pub fn new(key: ResourceKey) -> Self {
        Self {
            value: key.default_data(),
            error: None,
            pending: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PageStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(ApiError),
}

impl PageStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PageStatus::Idle => "idle",
            PageStatus::Loading => "loading",
            PageStatus::Ready => "ready",
            PageStatus::Failed(_) => "error",
        }
    }
}

/// Per-page view state. Owned by exactly one page; never shared across pages.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    primary: ResourceKey,
    pub status: PageStatus,
    pub(crate) fields: BTreeMap<ResourceKey, Field>,
}

impl ViewState {
    pub fn new(primary: ResourceKey, keys: &[ResourceKey]) -> Self {
        let fields = std::iter::once(primary)
            .chain(keys.iter().copied())
            .map(|k| (k, Field::new(k)))
            .collect();
        Self {
            primary,
            status: PageStatus::Idle,
            fields,
        }
    }

    pub fn primary(&self) -> ResourceKey {
        self.primary
    }

    pub fn is_loading(&self) -> bool {
        self.status == PageStatus::Loading
    }

    pub fn field(&self, key: ResourceKey) -> Option<&Field> {
        self.fields.get(&key)
    }

    pub fn error(&self, key: ResourceKey) -> Option<&ApiError> {
        self.fields.get(&key).and_then(|f| f.error.as_ref())
    }

    pub fn data(&self, key: ResourceKey) -> Option<&ResourceData> {
        self.fields.get(&key).map(|f| &f.value)
    }

    /// Secondary resources whose latest load failed; rendered as partial-data indicators.
    pub fn partial_errors(&self) -> Vec<(ResourceKey, &ApiError)> {
        self.fields
            .iter()
            .filter(|(k, _)| **k != self.primary)
            .filter_map(|(k, f)| f.error.as_ref().map(|e| (*k, e)))
            .collect()
    }

    pub fn summary(&self) -> Option<&StationSummary> {
        match self.data(ResourceKey::StationSummary) {
            Some(ResourceData::StationSummary(v)) => Some(v),
            _ => None,
        }
    }

    pub fn active_rides(&self) -> &[ActiveRide] {
        match self.data(ResourceKey::ActiveRides) {
            Some(ResourceData::ActiveRides(v)) => v,
            _ => &[],
        }
    }

    pub fn dashboard_vehicles(&self) -> &[Vehicle] {
        match self.data(ResourceKey::DashboardVehicles) {
            Some(ResourceData::DashboardVehicles(v)) => v,
            _ => &[],
        }
    }

    pub fn station_details(&self) -> Option<&StationDetails> {
        match self.data(ResourceKey::StationDetails) {
            Some(ResourceData::StationDetails(v)) => Some(v),
            _ => None,
        }
    }

    pub fn inventory(&self) -> Option<&VehicleInventory> {
        match self.data(ResourceKey::Vehicles) {
            Some(ResourceData::Vehicles(v)) => Some(v),
            _ => None,
        }
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        self.inventory().map(|i| i.vehicles.as_slice()).unwrap_or(&[])
    }

    pub fn nearby_stations(&self) -> &[NearbyStation] {
        match self.data(ResourceKey::NearbyStations) {
            Some(ResourceData::NearbyStations(v)) => v,
            _ => &[],
        }
    }

    pub fn available_vehicles(&self) -> &[AvailableVehicle] {
        match self.data(ResourceKey::AvailableVehicles) {
            Some(ResourceData::AvailableVehicles(v)) => v,
            _ => &[],
        }
    }

    pub fn charging_ports(&self) -> &[ChargingPort] {
        match self.data(ResourceKey::ChargingPorts) {
            Some(ResourceData::ChargingPorts(v)) => v,
            _ => &[],
        }
    }

    pub fn rides(&self) -> &[Ride] {
        match self.data(ResourceKey::Rides) {
            Some(ResourceData::Rides(v)) => v,
            _ => &[],
        }
    }

    pub fn payments(&self) -> &[Payment] {
        match self.data(ResourceKey::Payments) {
            Some(ResourceData::Payments(v)) => v,
            _ => &[],
        }
    }

    pub fn report(&self) -> Option<&Report> {
        match self.data(ResourceKey::Report) {
            Some(ResourceData::Report(v)) => v.as_ref(),
            _ => None,
        }
    }

    pub fn settings(&self) -> Option<&StationSettings> {
        match self.data(ResourceKey::Settings) {
            Some(ResourceData::Settings(v)) => v.as_ref(),
            _ => None,
        }
    }

    /// True while any inventory vehicle is in the transient charging state.
    pub fn any_charging(&self) -> bool {
        self.vehicles().iter().any(Vehicle::is_charging)
    }
}
