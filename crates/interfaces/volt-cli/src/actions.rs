//! Mutating subcommands. Each one goes through the page's command layer so the
//! same notices and reloads apply as in the interactive console.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::Map;
use tokio::sync::mpsc;
use volt_app_core::{Commands, Notice, NoticeLevel, PageKind, ViewState};
use volt_core::vehicle::RentalRate;
use volt_core::{derive, FilterPredicate, NewVehicle, ResourceResult, VehicleUpdate};
use volt_infra::{ApiClient, ExportedVehicles};

use crate::cli::{PortAction, SettingsAction, VehicleAction};
use crate::commands::{cmd_transfer_targets, open_page, ports_text, ready, transfer_text};
use crate::{render, CliContext};

struct ActionPage {
    commands: Commands<ApiClient>,
    notices: mpsc::Receiver<Notice>,
}

impl ActionPage {
    fn open(ctx: &CliContext, kind: PageKind) -> Result<Self> {
        let (tx, notices) = mpsc::channel(16);
        let page = Arc::new(open_page(ctx, kind)?);
        Ok(Self {
            commands: Commands::new(page, tx),
            notices,
        })
    }

    /// Prints queued notices, then hands back the command's result.
    fn settle<T>(&mut self, res: ResourceResult<T>, out: &mut impl Write) -> Result<T> {
        while let Ok(notice) = self.notices.try_recv() {
            let marker = match notice.level {
                NoticeLevel::Success => "::",
                NoticeLevel::Error => "!!",
            };
            writeln!(out, "{marker} {}", notice.message)?;
        }
        Ok(res?)
    }

    /// The page as reloaded by the command; a failed primary reload is an error.
    fn state(&self) -> Result<ViewState> {
        let page = self.commands.page();
        ready(page.kind(), page.state())
    }

    fn render_vehicles(&self, out: &mut impl Write) -> Result<()> {
        let state = self.state()?;
        let view = derive(state.vehicles(), &FilterPredicate::new());
        let capacity = state.inventory().and_then(|i| i.capacity_info.as_ref());
        write!(out, "{}", render::vehicles(&view, capacity))?;
        Ok(())
    }
}

pub async fn cmd_vehicle(ctx: &CliContext, action: VehicleAction, out: &mut impl Write) -> Result<()> {
    let station = ctx.station_id()?;
    match action {
        VehicleAction::History { id } => {
            let history = ctx.api().vehicle_history(&id).await?;
            writeln!(out, "{}", serde_json::to_string_pretty(&history)?)?;
            return Ok(());
        }
        VehicleAction::Details { id } => {
            let vehicle = ctx.api().vehicle_details(&id).await?;
            write!(out, "{}", render::vehicle_details(&vehicle))?;
            return Ok(());
        }
        VehicleAction::Nearby => return cmd_transfer_targets(ctx, out).await,
        VehicleAction::Transfer { id, to } => {
            let mut page = ActionPage::open(ctx, PageKind::Transfer)?;
            let res = page.commands.transfer_vehicle(&id, &to).await;
            page.settle(res, out)?;
            write!(out, "{}", transfer_text(&page.state()?))?;
            return page.render_vehicles(out);
        }
        VehicleAction::Export { format, output } => {
            let text = match ctx.api().export_vehicles(&station, format.into()).await? {
                ExportedVehicles::Csv(csv) => csv,
                ExportedVehicles::Json(value) => serde_json::to_string_pretty(&value)?,
            };
            match output {
                Some(path) => {
                    std::fs::write(&path, text)
                        .with_context(|| format!("Failed to write {path}"))?;
                    writeln!(out, ":: Saved export to {path}")?;
                }
                None => writeln!(out, "{text}")?,
            }
            return Ok(());
        }
        _ => {}
    }

    let mut page = ActionPage::open(ctx, PageKind::Vehicles)?;
    match action {
        VehicleAction::Add {
            id,
            number,
            name,
            kind,
            model,
            battery,
            per_km,
            per_hour,
        } => {
            let mut vehicle = NewVehicle::new(id, station);
            vehicle.vehicle_number = number;
            vehicle.vehicle_name = name;
            vehicle.vehicle_type = kind;
            vehicle.model = model;
            vehicle.battery = battery;
            vehicle.rental_rate = RentalRate { per_km, per_hour };
            let res = page.commands.add_vehicle(&vehicle).await;
            page.settle(res, out)?;
        }
        VehicleAction::Update {
            id,
            number,
            name,
            kind,
            model,
            battery,
            status,
        } => {
            let update = VehicleUpdate {
                vehicle_number: number,
                vehicle_name: name,
                vehicle_type: kind,
                model,
                battery,
                status,
                ..Default::default()
            };
            let res = page.commands.update_vehicle(&id, &update).await;
            page.settle(res, out)?;
        }
        VehicleAction::Delete { id } => {
            let res = page.commands.delete_vehicle(&id).await;
            page.settle(res, out)?;
        }
        VehicleAction::Status { id, status } => {
            let res = page
                .commands
                .update_vehicle_status(&id, &status, Map::new())
                .await;
            page.settle(res, out)?;
        }
        VehicleAction::History { .. }
        | VehicleAction::Details { .. }
        | VehicleAction::Nearby
        | VehicleAction::Transfer { .. }
        | VehicleAction::Export { .. } => {}
    }
    page.render_vehicles(out)
}

pub async fn cmd_port(ctx: &CliContext, action: PortAction, out: &mut impl Write) -> Result<()> {
    let mut page = ActionPage::open(ctx, PageKind::ChargingPorts)?;
    let res = match &action {
        PortAction::Assign { port, vehicle } => page.commands.assign_port(port, vehicle).await,
        PortAction::Remove { port } => page.commands.remove_from_port(port).await,
    };
    page.settle(res, out)?;
    let state = page.state()?;
    write!(out, "{}", ports_text(&state, &FilterPredicate::new()))?;
    Ok(())
}

pub async fn cmd_settings(ctx: &CliContext, action: SettingsAction, out: &mut impl Write) -> Result<()> {
    if let SettingsAction::Show = action {
        return crate::commands::cmd_settings_show(ctx, out).await;
    }
    let mut page = ActionPage::open(ctx, PageKind::Settings)?;
    let res = match action {
        SettingsAction::Show => return Ok(()),
        SettingsAction::Set {
            name,
            location,
            capacity,
            open,
            close,
        } => {
            let station = ctx.station_id()?;
            let mut settings = ctx
                .api()
                .fetch_settings(&station)
                .await?
                .unwrap_or_default();
            if let Some(name) = name {
                settings.name = name;
            }
            if location.is_some() {
                settings.location = location;
            }
            if capacity.is_some() {
                settings.capacity = capacity;
            }
            if let Some(open) = open {
                settings.operating_hours.open = open;
            }
            if let Some(close) = close {
                settings.operating_hours.close = close;
            }
            page.commands.update_settings(&settings).await
        }
        SettingsAction::Reset => page.commands.reset_settings().await,
    };
    page.settle(res, out)?;
    let state = page.state()?;
    write!(out, "{}", render::settings(state.settings()))?;
    Ok(())
}
