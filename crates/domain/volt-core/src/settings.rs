use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingHours {
    pub open: String,
    pub close: String,
}

impl Default for OperatingHours {
    fn default() -> Self {
        Self {
            open: "06:00".to_string(),
            close: "22:00".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    #[serde(default)]
    pub base_rate: f64,
    #[serde(default)]
    pub per_km_rate: f64,
    #[serde(default)]
    pub per_minute_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPrefs {
    #[serde(default)]
    pub low_battery: bool,
    #[serde(default)]
    pub maintenance: bool,
    #[serde(default)]
    pub payments: bool,
    #[serde(default)]
    pub rides: bool,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        Self {
            low_battery: true,
            maintenance: true,
            payments: true,
            rides: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityPrefs {
    #[serde(default)]
    pub require_face_auth: bool,
    #[serde(default)]
    pub auto_lock: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
}

/// Station configuration document from `GET settings/{station}/`.
///
/// Unknown keys are kept in `extra` so a read-modify-write cycle does not drop them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationSettings {
    #[serde(default, rename = "station_id", skip_serializing_if = "Option::is_none")]
    pub station_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
    #[serde(default)]
    pub operating_hours: OperatingHours,
    #[serde(default)]
    pub pricing: Pricing,
    #[serde(default)]
    pub notifications: NotificationPrefs,
    #[serde(default)]
    pub security: SecurityPrefs,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsValidationError {
    #[error("Station name is required")]
    MissingName,
    #[error("Capacity must be a positive integer")]
    InvalidCapacity,
}

impl StationSettings {
    /// Mirrors the backend's acceptance rules so bad input fails before a round trip.
    pub fn validate(&self) -> Result<(), SettingsValidationError> {
        if self.name.trim().is_empty() {
            return Err(SettingsValidationError::MissingName);
        }
        if matches!(self.capacity, Some(c) if c <= 0) {
            return Err(SettingsValidationError::InvalidCapacity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_survive_round_trip() {
        let raw = serde_json::json!({
            "station_id": "STN001",
            "name": "Central",
            "capacity": 10,
            "operatingHours": { "open": "05:00", "close": "23:00" },
            "created_at": "2024-01-01T00:00:00"
        });
        let s: StationSettings = serde_json::from_value(raw).unwrap();
        assert_eq!(s.operating_hours.open, "05:00");
        assert_eq!(s.station_id.as_deref(), Some("STN001"));
        let back = serde_json::to_value(&s).unwrap();
        assert_eq!(back["created_at"], "2024-01-01T00:00:00");
        assert_eq!(back["station_id"], "STN001");
    }

    #[test]
    fn unset_optional_fields_are_left_out_of_updates() {
        let s = StationSettings {
            station_id: Some("STN001".into()),
            name: "Central".into(),
            location: Some("MG Road".into()),
            ..Default::default()
        };
        let body = serde_json::to_value(&s).unwrap();
        assert_eq!(body["location"], "MG Road");
        assert!(body.get("capacity").is_none());
        assert!(body["security"].get("emergencyContact").is_none());
        assert_eq!(body["security"]["autoLock"], false);

        let back: StationSettings = serde_json::from_value(body).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn validation_rejects_blank_name_and_bad_capacity() {
        let mut s = StationSettings {
            name: "  ".into(),
            ..Default::default()
        };
        assert_eq!(s.validate(), Err(SettingsValidationError::MissingName));
        s.name = "North".into();
        s.capacity = Some(0);
        assert_eq!(s.validate(), Err(SettingsValidationError::InvalidCapacity));
        s.capacity = Some(12);
        assert!(s.validate().is_ok());
    }
}
