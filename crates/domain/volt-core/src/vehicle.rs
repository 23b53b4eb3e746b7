use serde::{Deserialize, Serialize};

use crate::station::CapacityInfo;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RentalRate {
    #[serde(default, deserialize_with = "crate::lenient::number")]
    pub per_km: f64,
    #[serde(default, deserialize_with = "crate::lenient::number")]
    pub per_hour: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargingPortInfo {
    pub port_id: Option<String>,
    #[serde(default)]
    pub connector_type: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::number")]
    pub max_power_kw: f64,
    #[serde(default)]
    pub charging_started_at: Option<String>,
}

fn default_vehicle_status() -> String {
    "available".to_string()
}

/// A vehicle as listed by the inventory and dashboard endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(default)]
    pub vehicle_id: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::opt_string")]
    pub vehicle_number: Option<String>,
    #[serde(default)]
    pub vehicle_name: Option<String>,
    #[serde(default, rename = "type")]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::number")]
    pub battery: f64,
    #[serde(default = "default_vehicle_status")]
    pub status: String,
    #[serde(default, deserialize_with = "crate::lenient::number")]
    pub odometer_reading: f64,
    #[serde(default)]
    pub rental_rate: Option<RentalRate>,
    #[serde(default)]
    pub last_service: Option<String>,
    #[serde(default)]
    pub charging_port_info: Option<ChargingPortInfo>,
}

impl Vehicle {
    pub fn id(&self) -> &str {
        self.vehicle_id.as_deref().unwrap_or("")
    }

    pub fn is_charging(&self) -> bool {
        self.status == "charging"
    }
}

/// Payload of `GET vehicles/{station}/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleInventory {
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub capacity_info: Option<CapacityInfo>,
}

/// Trimmed vehicle record offered for charging port assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableVehicle {
    pub vehicle_id: String,
    #[serde(default, deserialize_with = "crate::lenient::opt_string")]
    pub vehicle_number: Option<String>,
    #[serde(default)]
    pub vehicle_name: Option<String>,
    #[serde(default, rename = "type")]
    pub vehicle_type: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::number")]
    pub battery: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVehicle {
    pub vehicle_id: String,
    pub station_id: String,
    pub vehicle_number: String,
    pub vehicle_name: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub model: String,
    pub battery: f64,
    pub status: String,
    pub odometer_reading: f64,
    pub rental_rate: RentalRate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_service: Option<String>,
}

impl NewVehicle {
    pub fn new(vehicle_id: impl Into<String>, station_id: impl Into<String>) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            station_id: station_id.into(),
            vehicle_number: String::new(),
            vehicle_name: String::new(),
            vehicle_type: String::new(),
            model: String::new(),
            battery: 100.0,
            status: "available".to_string(),
            odometer_reading: 0.0,
            rental_rate: RentalRate::default(),
            last_service: None,
        }
    }
}

/// Partial update; only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub odometer_reading: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rental_rate: Option<RentalRate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_service: Option<String>,
}

impl VehicleUpdate {
    pub fn is_empty(&self) -> bool {
        *self == VehicleUpdate::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let v: Vehicle = serde_json::from_str(r#"{"vehicle_id":"V1","type":"Scooter"}"#).unwrap();
        assert_eq!(v.id(), "V1");
        assert_eq!(v.status, "available");
        assert_eq!(v.vehicle_type.as_deref(), Some("Scooter"));
        assert_eq!(v.battery, 0.0);
    }

    #[test]
    fn update_serializes_only_set_fields() {
        let upd = VehicleUpdate {
            battery: Some(55.0),
            ..Default::default()
        };
        let json = serde_json::to_value(&upd).unwrap();
        assert_eq!(json, serde_json::json!({ "battery": 55.0 }));
        assert!(VehicleUpdate::default().is_empty());
    }
}
