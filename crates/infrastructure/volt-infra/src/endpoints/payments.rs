use volt_core::{Payment, ResourceResult};

use crate::net::{decode_field_or_default, ApiClient, RequestDescriptor};

impl ApiClient {
    pub async fn payments_by_station(&self, station_id: &str) -> ResourceResult<Vec<Payment>> {
        let req = RequestDescriptor::get(["payments", station_id]);
        decode_field_or_default(self.call(req).await?, "payments")
    }

    /// Payments across every station.
    pub async fn all_payments(&self) -> ResourceResult<Vec<Payment>> {
        let req = RequestDescriptor::get(["payments"]);
        decode_field_or_default(self.call(req).await?, "payments")
    }
}
