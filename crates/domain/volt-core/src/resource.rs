//! Logical resources a page can load, and the data each one carries.

use std::fmt;

use crate::payment::Payment;
use crate::port::ChargingPort;
use crate::report::Report;
use crate::ride::{ActiveRide, Ride};
use crate::settings::StationSettings;
use crate::station::{NearbyStation, StationDetails, StationSummary};
use crate::vehicle::{AvailableVehicle, Vehicle, VehicleInventory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKey {
    StationSummary,
    ActiveRides,
    DashboardVehicles,
    StationDetails,
    Vehicles,
    NearbyStations,
    AvailableVehicles,
    ChargingPorts,
    Rides,
    Payments,
    Report,
    Settings,
}

impl ResourceKey {
    pub fn name(self) -> &'static str {
        match self {
            ResourceKey::StationSummary => "stationSummary",
            ResourceKey::ActiveRides => "activeRides",
            ResourceKey::DashboardVehicles => "dashboardVehicles",
            ResourceKey::StationDetails => "stationDetails",
            ResourceKey::Vehicles => "vehicles",
            ResourceKey::NearbyStations => "nearbyStations",
            ResourceKey::AvailableVehicles => "availableVehicles",
            ResourceKey::ChargingPorts => "chargingPorts",
            ResourceKey::Rides => "rides",
            ResourceKey::Payments => "payments",
            ResourceKey::Report => "report",
            ResourceKey::Settings => "settings",
        }
    }

    /// Value a field holds before its first successful load.
    pub fn default_data(self) -> ResourceData {
        match self {
            ResourceKey::StationSummary => ResourceData::StationSummary(StationSummary::default()),
            ResourceKey::ActiveRides => ResourceData::ActiveRides(Vec::new()),
            ResourceKey::DashboardVehicles => ResourceData::DashboardVehicles(Vec::new()),
            ResourceKey::StationDetails => ResourceData::StationDetails(StationDetails::default()),
            ResourceKey::Vehicles => ResourceData::Vehicles(VehicleInventory::default()),
            ResourceKey::NearbyStations => ResourceData::NearbyStations(Vec::new()),
            ResourceKey::AvailableVehicles => ResourceData::AvailableVehicles(Vec::new()),
            ResourceKey::ChargingPorts => ResourceData::ChargingPorts(Vec::new()),
            ResourceKey::Rides => ResourceData::Rides(Vec::new()),
            ResourceKey::Payments => ResourceData::Payments(Vec::new()),
            ResourceKey::Report => ResourceData::Report(None),
            ResourceKey::Settings => ResourceData::Settings(None),
        }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResourceData {
    StationSummary(StationSummary),
    ActiveRides(Vec<ActiveRide>),
    DashboardVehicles(Vec<Vehicle>),
    StationDetails(StationDetails),
    Vehicles(VehicleInventory),
    NearbyStations(Vec<NearbyStation>),
    AvailableVehicles(Vec<AvailableVehicle>),
    ChargingPorts(Vec<ChargingPort>),
    Rides(Vec<Ride>),
    Payments(Vec<Payment>),
    Report(Option<Report>),
    Settings(Option<StationSettings>),
}

impl ResourceData {
    pub fn key(&self) -> ResourceKey {
        match self {
            ResourceData::StationSummary(_) => ResourceKey::StationSummary,
            ResourceData::ActiveRides(_) => ResourceKey::ActiveRides,
            ResourceData::DashboardVehicles(_) => ResourceKey::DashboardVehicles,
            ResourceData::StationDetails(_) => ResourceKey::StationDetails,
            ResourceData::Vehicles(_) => ResourceKey::Vehicles,
            ResourceData::NearbyStations(_) => ResourceKey::NearbyStations,
            ResourceData::AvailableVehicles(_) => ResourceKey::AvailableVehicles,
            ResourceData::ChargingPorts(_) => ResourceKey::ChargingPorts,
            ResourceData::Rides(_) => ResourceKey::Rides,
            ResourceData::Payments(_) => ResourceKey::Payments,
            ResourceData::Report(_) => ResourceKey::Report,
            ResourceData::Settings(_) => ResourceKey::Settings,
        }
    }
}
