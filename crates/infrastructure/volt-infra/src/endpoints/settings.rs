use volt_core::{ApiError, ResourceResult, StationSettings};

use crate::net::{decode_field_or_default, ApiClient, RequestDescriptor};

impl ApiClient {
    /// `None` when the station has never saved settings.
    pub async fn fetch_settings(&self, station_id: &str) -> ResourceResult<Option<StationSettings>> {
        let req = RequestDescriptor::get(["settings", station_id]);
        decode_field_or_default(self.call(req).await?, "settings")
    }

    /// Validates locally, then returns the document as stored by the server.
    pub async fn update_settings(
        &self,
        station_id: &str,
        settings: &StationSettings,
    ) -> ResourceResult<Option<StationSettings>> {
        settings
            .validate()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let req = RequestDescriptor::put(["settings", "update", station_id]).json_from(settings)?;
        decode_field_or_default(self.call(req).await?, "settings")
    }

    pub async fn reset_settings(&self, station_id: &str) -> ResourceResult<Option<StationSettings>> {
        let req = RequestDescriptor::post(["settings", "reset", station_id]);
        decode_field_or_default(self.call(req).await?, "settings")
    }
}
