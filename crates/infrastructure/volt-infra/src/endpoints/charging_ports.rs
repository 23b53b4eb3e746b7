use serde_json::json;
use volt_core::{Ack, AvailableVehicle, ChargingPort, ResourceResult};

use crate::net::{decode_envelope, decode_field_or_default, ApiClient, RequestDescriptor};

impl ApiClient {
    pub async fn charging_ports(&self, station_id: &str) -> ResourceResult<Vec<ChargingPort>> {
        let req = RequestDescriptor::get(["charging-ports", station_id]);
        decode_field_or_default(self.call(req).await?, "ports")
    }

    /// Vehicles at the station that may be plugged into a free port.
    pub async fn available_vehicles(
        &self,
        station_id: &str,
    ) -> ResourceResult<Vec<AvailableVehicle>> {
        let req = RequestDescriptor::get(["charging-ports", station_id, "available-vehicles"]);
        decode_field_or_default(self.call(req).await?, "vehicles")
    }

    pub async fn assign_vehicle_to_port(
        &self,
        station_id: &str,
        port_id: &str,
        vehicle_id: &str,
    ) -> ResourceResult<Ack> {
        let req = RequestDescriptor::post(["charging-ports", station_id, "assign"])
            .json(json!({ "port_id": port_id, "vehicle_id": vehicle_id }));
        decode_envelope(self.call(req).await?)
    }

    pub async fn remove_vehicle_from_port(
        &self,
        station_id: &str,
        port_id: &str,
    ) -> ResourceResult<Ack> {
        let req = RequestDescriptor::post(["charging-ports", station_id, "remove"])
            .json(json!({ "port_id": port_id }));
        decode_envelope(self.call(req).await?)
    }
}
