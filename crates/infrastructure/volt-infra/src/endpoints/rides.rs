use volt_core::{ResourceResult, Ride};

use crate::net::{decode_field_or_default, ApiClient, RequestDescriptor};

impl ApiClient {
    pub async fn fetch_rides(&self, station_id: &str) -> ResourceResult<Vec<Ride>> {
        let req = RequestDescriptor::get(["rides", station_id]);
        decode_field_or_default(self.call(req).await?, "rides")
    }
}
