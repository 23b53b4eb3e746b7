//! Mutations issued from a page. Results go to the caller; user-facing text goes to
//! the notice channel.

use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use volt_core::{
    Ack, ApiError, NewVehicle, ResourceKey, ResourceResult, StationSettings, VehicleUpdate,
};

use crate::aggregator::LoadMode;
use crate::pages::Page;
use crate::ports::StationApi;
use crate::view::PageStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A toast-style message for whatever renders the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

const VEHICLE_SET: &[ResourceKey] = &[
    ResourceKey::Vehicles,
    ResourceKey::DashboardVehicles,
    ResourceKey::StationSummary,
    ResourceKey::AvailableVehicles,
];
const PORT_SET: &[ResourceKey] = &[
    ResourceKey::ChargingPorts,
    ResourceKey::AvailableVehicles,
    ResourceKey::Vehicles,
];
const TRANSFER_SET: &[ResourceKey] = &[
    ResourceKey::Vehicles,
    ResourceKey::NearbyStations,
    ResourceKey::DashboardVehicles,
    ResourceKey::StationSummary,
];
const SETTINGS_SET: &[ResourceKey] = &[ResourceKey::Settings];

/// Commands bound to one page. Nothing in the page's view state changes until the
/// server confirms; a confirmed mutation re-loads the page's affected resources.
pub struct Commands<A: StationApi> {
    page: Arc<Page<A>>,
    notices: mpsc::Sender<Notice>,
}

impl<A: StationApi> Commands<A> {
    pub fn new(page: Arc<Page<A>>, notices: mpsc::Sender<Notice>) -> Self {
        Self { page, notices }
    }

    pub fn page(&self) -> &Arc<Page<A>> {
        &self.page
    }

    fn api(&self) -> &A {
        self.page.api().as_ref()
    }

    fn station_id(&self) -> &str {
        &self.page.session().station_id
    }

    async fn notify(&self, notice: Notice) {
        // A dropped receiver only means nobody is rendering notices.
        let _ = self.notices.send(notice).await;
    }

    async fn finish<T>(
        &self,
        action: &str,
        res: ResourceResult<T>,
        success: impl FnOnce(&T) -> String,
        affected: &[ResourceKey],
    ) -> ResourceResult<T> {
        match res {
            Ok(value) => {
                let message = success(&value);
                info!("{action}: {message}");
                self.notify(Notice::success(message)).await;

                let keys: Vec<ResourceKey> = self
                    .page
                    .kind()
                    .resources()
                    .iter()
                    .copied()
                    .filter(|k| affected.contains(k))
                    .collect();
                if !keys.is_empty() {
                    match self.page.reload(&keys, LoadMode::Normal).await {
                        Ok(state) => {
                            if let PageStatus::Failed(e) = &state.status {
                                warn!("reload after {action} failed: {e}");
                            }
                        }
                        Err(_) => debug!("page closed before {action} reload settled"),
                    }
                }
                Ok(value)
            }
            Err(e) => {
                warn!("{action} failed: {e}");
                self.notify(Notice::error(e.message())).await;
                Err(e)
            }
        }
    }

    pub async fn add_vehicle(&self, vehicle: &NewVehicle) -> ResourceResult<Ack> {
        let res = self.api().add_vehicle(vehicle).await;
        self.finish(
            "add vehicle",
            res,
            |ack| ack.message_or("Vehicle added successfully").to_string(),
            VEHICLE_SET,
        )
        .await
    }

    pub async fn update_vehicle(
        &self,
        vehicle_id: &str,
        update: &VehicleUpdate,
    ) -> ResourceResult<Ack> {
        let res = self.api().update_vehicle(vehicle_id, update).await;
        self.finish(
            "update vehicle",
            res,
            |ack| ack.message_or("Vehicle updated successfully").to_string(),
            VEHICLE_SET,
        )
        .await
    }

    pub async fn delete_vehicle(&self, vehicle_id: &str) -> ResourceResult<Ack> {
        let res = self.api().delete_vehicle(vehicle_id).await;
        self.finish(
            "delete vehicle",
            res,
            |ack| ack.message_or("Vehicle deleted successfully").to_string(),
            VEHICLE_SET,
        )
        .await
    }

    pub async fn update_vehicle_status(
        &self,
        vehicle_id: &str,
        status: &str,
        extra: Map<String, Value>,
    ) -> ResourceResult<Ack> {
        let res = self
            .api()
            .update_vehicle_status(vehicle_id, status, extra)
            .await;
        self.finish(
            "update vehicle status",
            res,
            |ack| {
                ack.message
                    .clone()
                    .unwrap_or_else(|| format!("Vehicle {vehicle_id} is now {status}"))
            },
            VEHICLE_SET,
        )
        .await
    }

    /// Moves a vehicle from the session's station to `target_station_id`.
    pub async fn transfer_vehicle(
        &self,
        vehicle_id: &str,
        target_station_id: &str,
    ) -> ResourceResult<Ack> {
        let res = self
            .api()
            .transfer_vehicle(vehicle_id, self.station_id(), target_station_id)
            .await;
        self.finish(
            "transfer vehicle",
            res,
            |ack| ack.message_or("Vehicle transferred successfully").to_string(),
            TRANSFER_SET,
        )
        .await
    }

    pub async fn assign_port(&self, port_id: &str, vehicle_id: &str) -> ResourceResult<Ack> {
        let res = self
            .api()
            .assign_port(self.station_id(), port_id, vehicle_id)
            .await;
        self.finish(
            "assign port",
            res,
            |ack| {
                ack.message
                    .clone()
                    .unwrap_or_else(|| format!("Vehicle {vehicle_id} assigned to port {port_id}"))
            },
            PORT_SET,
        )
        .await
    }

    pub async fn remove_from_port(&self, port_id: &str) -> ResourceResult<Ack> {
        let res = self.api().remove_from_port(self.station_id(), port_id).await;
        self.finish(
            "remove from port",
            res,
            |ack| {
                ack.message
                    .clone()
                    .unwrap_or_else(|| format!("Vehicle removed from port {port_id}"))
            },
            PORT_SET,
        )
        .await
    }

    /// Rejected locally when the name is blank or the capacity is not positive.
    pub async fn update_settings(
        &self,
        settings: &StationSettings,
    ) -> ResourceResult<Option<StationSettings>> {
        let res = match settings.validate() {
            Ok(()) => self.api().update_settings(self.station_id(), settings).await,
            Err(e) => Err(ApiError::InvalidRequest(e.to_string())),
        };
        self.finish(
            "update settings",
            res,
            |_| "Settings updated successfully".to_string(),
            SETTINGS_SET,
        )
        .await
    }

    pub async fn reset_settings(&self) -> ResourceResult<Option<StationSettings>> {
        let res = self.api().reset_settings(self.station_id()).await;
        self.finish(
            "reset settings",
            res,
            |_| "Settings reset successfully".to_string(),
            SETTINGS_SET,
        )
        .await
    }
}
