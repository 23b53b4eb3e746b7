use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manager {
    #[serde(default)]
    pub manager_id: Option<String>,
    pub station_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub permissions: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub last_login: Option<String>,
}

/// Authenticated identity, passed explicitly to whatever issues station-scoped calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub station_id: String,
    pub manager: Option<Manager>,
}

impl Session {
    pub fn for_manager(manager: Manager) -> Self {
        Self {
            station_id: manager.station_id.clone(),
            manager: Some(manager),
        }
    }

    /// Session established through the legacy station-id login.
    pub fn for_station(station_id: impl Into<String>) -> Self {
        Self {
            station_id: station_id.into(),
            manager: None,
        }
    }

    pub fn display_name(&self) -> &str {
        self.manager
            .as_ref()
            .and_then(|m| m.name.as_deref())
            .unwrap_or(&self.station_id)
    }
}
