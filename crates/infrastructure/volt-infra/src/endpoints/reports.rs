use volt_core::{Report, ResourceResult};

use crate::net::{decode_field_or_default, ApiClient, RequestDescriptor};

impl ApiClient {
    /// `report` may be null when the station has no history yet.
    pub async fn fetch_report(&self, station_id: &str) -> ResourceResult<Option<Report>> {
        let req = RequestDescriptor::get(["reports", station_id]);
        decode_field_or_default(self.call(req).await?, "report")
    }
}
