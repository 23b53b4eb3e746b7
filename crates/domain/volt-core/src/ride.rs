use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    #[serde(default)]
    pub ride_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub vehicle_id: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "crate::lenient::number")]
    pub fare: f64,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::opt_string")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::opt_string")]
    pub distance: Option<String>,
}

/// Lightweight ride record from `GET dashboard/active_rides/{station}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveRide {
    #[serde(default)]
    pub ride_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub vehicle_id: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::number")]
    pub duration_minutes: f64,
    #[serde(default)]
    pub status: String,
}
