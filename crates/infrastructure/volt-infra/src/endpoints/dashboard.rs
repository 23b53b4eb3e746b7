use volt_core::{ActiveRide, ResourceResult, StationDetails, StationSummary, Vehicle};

use crate::net::{decode_field, decode_field_or_default, ApiClient, RequestDescriptor};

impl ApiClient {
    /// `GET dashboard/stats/{station}/`, payload under `data`.
    pub async fn station_summary(&self, station_id: &str) -> ResourceResult<StationSummary> {
        let req = RequestDescriptor::get(["dashboard", "stats", station_id]);
        decode_field(self.call(req).await?, "data")
    }

    pub async fn active_rides(&self, station_id: &str) -> ResourceResult<Vec<ActiveRide>> {
        let req = RequestDescriptor::get(["dashboard", "active_rides", station_id]);
        decode_field_or_default(self.call(req).await?, "rides")
    }

    pub async fn vehicles_lite(&self, station_id: &str) -> ResourceResult<Vec<Vehicle>> {
        let req = RequestDescriptor::get(["dashboard", "vehicles", station_id]);
        decode_field_or_default(self.call(req).await?, "vehicles")
    }

    pub async fn station_details(&self, station_id: &str) -> ResourceResult<StationDetails> {
        let req = RequestDescriptor::get(["dashboard", "station", station_id]);
        decode_field(self.call(req).await?, "station")
    }
}
