use serde::{Deserialize, Serialize};

pub mod auth;
pub mod error;
pub mod filter;
mod lenient;
pub mod payment;
pub mod port;
pub mod report;
pub mod resource;
pub mod ride;
pub mod settings;
pub mod station;
pub mod stats;
pub mod vehicle;

pub use auth::{Manager, Session};
pub use error::{ApiError, ApiErrorKind, ResourceResult};
pub use filter::{derive, filter_items, DerivedView, Facet, FilterPredicate, Filterable};
pub use payment::Payment;
pub use port::ChargingPort;
pub use report::Report;
pub use resource::{ResourceData, ResourceKey};
pub use ride::{ActiveRide, Ride};
pub use settings::StationSettings;
pub use station::{CapacityInfo, NearbyStation, StationDetails, StationSummary};
pub use stats::{percentage, PaymentStats, PortStats, RideStats, VehicleStats};
pub use vehicle::{AvailableVehicle, NewVehicle, Vehicle, VehicleInventory, VehicleUpdate};

pub type StationId = String;
pub type VehicleId = String;
pub type PortId = String;

/// Acknowledgement returned by mutating endpoints (`{"status":"success","message":...}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

impl Ack {
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message.as_deref().unwrap_or(fallback)
    }
}
