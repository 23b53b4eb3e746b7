use serde::{Deserialize, Serialize};
use serde_json::json;
use volt_core::{Manager, ResourceResult, Session};

use crate::net::{decode_envelope, decode_field, ApiClient, RequestDescriptor};

/// Body of `GET test/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerStatus {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl ApiClient {
    pub async fn login(&self, email: &str, password: &str) -> ResourceResult<Session> {
        let req = RequestDescriptor::post(["auth", "login"]).json(json!({
            "email": email.trim().to_lowercase(),
            "password": password,
        }));
        let manager: Manager = decode_field(self.call(req).await?, "manager")?;
        Ok(Session::for_manager(manager))
    }

    /// Legacy station-id login; the server only acknowledges, so the session has no manager.
    pub async fn station_login(&self, station_id: &str, password: &str) -> ResourceResult<Session> {
        let req = RequestDescriptor::post(["station-login"]).json(json!({
            "station_id": station_id,
            "password": password,
        }));
        self.call(req).await?;
        Ok(Session::for_station(station_id))
    }

    pub async fn test_connection(&self) -> ResourceResult<ServerStatus> {
        decode_envelope(self.call(RequestDescriptor::get(["test"])).await?)
    }

    pub async fn check_connection(&self) -> bool {
        self.test_connection().await.is_ok()
    }
}
