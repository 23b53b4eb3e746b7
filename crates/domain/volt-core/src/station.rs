use serde::{Deserialize, Serialize};

/// Headline numbers from `GET dashboard/stats/{station}/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationSummary {
    #[serde(default)]
    pub total_vehicles: u64,
    #[serde(default)]
    pub active_rides: u64,
    #[serde(default)]
    pub total_rides: u64,
    #[serde(default, deserialize_with = "crate::lenient::number")]
    pub total_collection: f64,
    #[serde(default, deserialize_with = "crate::lenient::number")]
    pub pending_payments: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationDetails {
    #[serde(default)]
    pub station_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::opt_string")]
    pub pincode: Option<String>,
    #[serde(default)]
    pub capacity: Option<u64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub today_rides: u64,
    #[serde(default, deserialize_with = "crate::lenient::number")]
    pub today_revenue: f64,
    #[serde(default)]
    pub today_active_users: u64,
}

impl StationDetails {
    /// Joins the non-empty address parts, or a placeholder when none are known.
    pub fn location_line(&self) -> String {
        let parts: Vec<&str> = [&self.address, &self.city, &self.state, &self.pincode]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .filter(|p| !p.trim().is_empty())
            .collect();
        if parts.is_empty() {
            "Location not specified".to_string()
        } else {
            parts.join(", ")
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapacityInfo {
    #[serde(default)]
    pub current_count: u64,
    #[serde(default)]
    pub total_capacity: u64,
    #[serde(default)]
    pub is_full: bool,
    #[serde(default)]
    pub available_slots: u64,
}

/// Transfer target from `GET nearby-stations/{station}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyStation {
    pub station_id: String,
    #[serde(default)]
    pub station_name: Option<String>,
    #[serde(default)]
    pub vehicle_capacity: Option<u64>,
    #[serde(default)]
    pub current_vehicles: u64,
    #[serde(default)]
    pub available_capacity: u64,
    #[serde(default)]
    pub is_full: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_reads_camel_case() {
        let s: StationSummary = serde_json::from_str(
            r#"{"totalVehicles":4,"activeRides":1,"totalRides":9,"totalCollection":120.5,"pendingPayments":30}"#,
        )
        .unwrap();
        assert_eq!(s.total_vehicles, 4);
        assert_eq!(s.pending_payments, 30.0);
    }

    #[test]
    fn location_line_skips_blank_parts() {
        let d = StationDetails {
            address: Some("12 MG Road".into()),
            city: Some("".into()),
            state: Some("Karnataka".into()),
            ..Default::default()
        };
        assert_eq!(d.location_line(), "12 MG Road, Karnataka");
        assert_eq!(
            StationDetails::default().location_line(),
            "Location not specified"
        );
    }
}
