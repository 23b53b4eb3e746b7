use serde::{Deserialize, Serialize};

fn default_port_status() -> String {
    "unknown".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargingPort {
    pub port_id: String,
    #[serde(default = "default_port_status")]
    pub status: String,
    #[serde(default)]
    pub connector_type: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::number")]
    pub max_power_kw: f64,
    #[serde(default)]
    pub current_vehicle_id: Option<String>,
    #[serde(default)]
    pub usage_count: u64,
    #[serde(default)]
    pub last_service: Option<String>,
}

impl ChargingPort {
    pub fn is_available(&self) -> bool {
        self.status == "available"
    }
}
