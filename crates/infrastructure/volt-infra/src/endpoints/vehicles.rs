use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use volt_core::{
    Ack, ApiError, NearbyStation, NewVehicle, ResourceResult, StationDetails, Vehicle,
    VehicleInventory, VehicleUpdate,
};

use crate::net::{decode_envelope, decode_field, decode_field_or_default, ApiClient, RequestDescriptor};

/// Default window for `vehicle_analytics`.
pub const DEFAULT_ANALYTICS_RANGE: &str = "7days";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

/// CSV exports are passed through as text; JSON exports keep the decoded envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportedVehicles {
    Csv(String),
    Json(Value),
}

/// One row of a bulk update: the id plus whichever fields change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkVehicleUpdate {
    pub vehicle_id: String,
    #[serde(flatten)]
    pub update: VehicleUpdate,
}

impl ApiClient {
    pub async fn fetch_vehicles(&self, station_id: &str) -> ResourceResult<VehicleInventory> {
        let req = RequestDescriptor::get(["vehicles", station_id]);
        decode_envelope(self.call(req).await?)
    }

    pub async fn add_vehicle(&self, vehicle: &NewVehicle) -> ResourceResult<Ack> {
        let req = RequestDescriptor::post(["vehicles", "add"]).json_from(vehicle)?;
        decode_envelope(self.call(req).await?)
    }

    pub async fn update_vehicle(
        &self,
        vehicle_id: &str,
        update: &VehicleUpdate,
    ) -> ResourceResult<Ack> {
        if update.is_empty() {
            return Err(ApiError::InvalidRequest("no fields to update".into()));
        }
        let req = RequestDescriptor::put(["vehicles", "update", vehicle_id]).json_from(update)?;
        decode_envelope(self.call(req).await?)
    }

    pub async fn delete_vehicle(&self, vehicle_id: &str) -> ResourceResult<Ack> {
        let req = RequestDescriptor::delete(["vehicles", "delete", vehicle_id]);
        decode_envelope(self.call(req).await?)
    }

    pub async fn vehicle_details(&self, vehicle_id: &str) -> ResourceResult<Vehicle> {
        let req = RequestDescriptor::get(["vehicles", "details", vehicle_id]);
        decode_field(self.call(req).await?, "vehicle")
    }

    /// Stamps `updated_at` with the current time; `extra` keys are merged alongside `status`.
    pub async fn update_vehicle_status(
        &self,
        vehicle_id: &str,
        status: &str,
        extra: Map<String, Value>,
    ) -> ResourceResult<Ack> {
        let mut body = extra;
        body.insert("status".into(), Value::String(status.to_string()));
        body.insert(
            "updated_at".into(),
            Value::String(chrono::Utc::now().to_rfc3339()),
        );
        let req = RequestDescriptor::patch(["vehicles", "update-status", vehicle_id])
            .json(Value::Object(body));
        decode_envelope(self.call(req).await?)
    }

    pub async fn transfer_vehicle(
        &self,
        vehicle_id: &str,
        source_station_id: &str,
        target_station_id: &str,
    ) -> ResourceResult<Ack> {
        if source_station_id == target_station_id {
            return Err(ApiError::InvalidRequest(
                "source and target station are the same".into(),
            ));
        }
        let req = RequestDescriptor::post(["vehicles", "transfer"]).json(json!({
            "vehicle_id": vehicle_id,
            "source_station_id": source_station_id,
            "target_station_id": target_station_id,
        }));
        decode_envelope(self.call(req).await?)
    }

    pub async fn nearby_stations(&self, station_id: &str) -> ResourceResult<Vec<NearbyStation>> {
        let req = RequestDescriptor::get(["nearby-stations", station_id]);
        decode_field_or_default(self.call(req).await?, "stations")
    }

    /// Station record from the vehicles service (`GET stations/{station}/`).
    pub async fn station_details_by_id(&self, station_id: &str) -> ResourceResult<StationDetails> {
        let req = RequestDescriptor::get(["stations", station_id]);
        decode_field(self.call(req).await?, "station")
    }

    pub async fn vehicle_history(&self, vehicle_id: &str) -> ResourceResult<Value> {
        self.call(RequestDescriptor::get(["vehicles", "history", vehicle_id]))
            .await
    }

    pub async fn bulk_update_vehicles(&self, vehicles: &[BulkVehicleUpdate]) -> ResourceResult<Ack> {
        let req = RequestDescriptor::put(["vehicles", "bulk-update"])
            .json_from(&json!({ "vehicles": vehicles }))?;
        decode_envelope(self.call(req).await?)
    }

    pub async fn search_vehicles(&self, params: &[(String, String)]) -> ResourceResult<Vec<Vehicle>> {
        let req = params
            .iter()
            .fold(RequestDescriptor::get(["vehicles", "search"]), |req, (k, v)| {
                req.query(k.as_str(), v.as_str())
            });
        decode_field_or_default(self.call(req).await?, "vehicles")
    }

    pub async fn export_vehicles(
        &self,
        station_id: &str,
        format: ExportFormat,
    ) -> ResourceResult<ExportedVehicles> {
        let req = RequestDescriptor::get(["vehicles", "export", station_id])
            .query("format", format.as_str());
        match format {
            ExportFormat::Csv => self.call_text(req).await.map(ExportedVehicles::Csv),
            ExportFormat::Json => self.call(req).await.map(ExportedVehicles::Json),
        }
    }

    pub async fn import_vehicles(
        &self,
        station_id: &str,
        vehicles: &[NewVehicle],
    ) -> ResourceResult<Ack> {
        let req = RequestDescriptor::post(["vehicles", "import", station_id])
            .json_from(&json!({ "vehicles": vehicles }))?;
        decode_envelope(self.call(req).await?)
    }

    pub async fn schedule_maintenance(&self, vehicle_id: &str, data: Value) -> ResourceResult<Ack> {
        let req =
            RequestDescriptor::post(["vehicles", "maintenance", "schedule", vehicle_id]).json(data);
        decode_envelope(self.call(req).await?)
    }

    pub async fn maintenance_history(&self, vehicle_id: &str) -> ResourceResult<Value> {
        self.call(RequestDescriptor::get([
            "vehicles",
            "maintenance",
            "history",
            vehicle_id,
        ]))
        .await
    }

    /// `range` falls back to [`DEFAULT_ANALYTICS_RANGE`].
    pub async fn vehicle_analytics(
        &self,
        station_id: &str,
        range: Option<&str>,
    ) -> ResourceResult<Value> {
        let req = RequestDescriptor::get(["vehicles", "analytics", station_id])
            .query("range", range.unwrap_or(DEFAULT_ANALYTICS_RANGE));
        self.call(req).await
    }
}
