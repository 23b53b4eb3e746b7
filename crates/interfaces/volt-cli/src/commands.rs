use std::future::Future;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use volt_app_core::{
    ConsoleSettings, Page, PageKind, PageStatus, PaymentScope, SettingsRepo, StationApi, ViewState,
};
use volt_core::{derive, FilterPredicate};
use volt_infra::ApiClient;

use crate::cli::{ConfigAction, FilterArgs};
use crate::{render, CliContext};

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub(crate) fn predicate(filter: &FilterArgs, kind: Option<&str>) -> FilterPredicate {
    let mut p = FilterPredicate::new();
    if let Some(search) = &filter.search {
        p = p.search(search.as_str());
    }
    if let Some(status) = &filter.status {
        p = p.status(status);
    }
    if let Some(kind) = kind {
        p = p.kind(kind);
    }
    p
}

pub(crate) fn open_page(ctx: &CliContext, kind: PageKind) -> Result<Page<ApiClient>> {
    Ok(Page::new(kind, Arc::clone(ctx.api()), ctx.session()?)
        .with_refresh_interval(ctx.refresh_interval()))
}

/// Fails when the page's primary resource did not load; secondary failures stay
/// on the state as partial data.
pub(crate) fn ready(kind: PageKind, state: ViewState) -> Result<ViewState> {
    if let PageStatus::Failed(e) = &state.status {
        bail!("{} failed to load: {}", kind.title(), e.message());
    }
    Ok(state)
}

/// Loads every resource of the page. Only a failed primary resource is fatal.
pub async fn mount<A: StationApi>(page: &Page<A>) -> Result<ViewState> {
    let pb = spinner(format!("Loading {}...", page.kind().title()));
    let res = page.load().await;
    pb.finish_and_clear();

    let state = res.with_context(|| format!("{} was closed", page.kind().title()))?;
    ready(page.kind(), state)
}

pub async fn cmd_login(
    ctx: &mut CliContext,
    email: &str,
    password: &str,
    out: &mut impl Write,
) -> Result<()> {
    let session = ctx.api().login(email, password).await?;
    ctx.settings.default_station_id = Some(session.station_id.clone());
    ctx.persistence()
        .save(&ctx.settings)
        .context("Failed to remember the station")?;
    writeln!(
        out,
        ":: Signed in as {} (station {})",
        session.display_name(),
        session.station_id
    )?;
    Ok(())
}

pub async fn cmd_ping(ctx: &CliContext, out: &mut impl Write) -> Result<()> {
    writeln!(out, ":: Checking {}", ctx.api().base_url())?;
    let status = ctx.api().test_connection().await?;
    writeln!(
        out,
        "   Server:  {}",
        status.message.as_deref().unwrap_or("reachable")
    )?;
    if let Some(ts) = &status.timestamp {
        writeln!(out, "   Time:    {ts}")?;
    }
    Ok(())
}

pub async fn cmd_dashboard(ctx: &CliContext, out: &mut impl Write) -> Result<()> {
    let page = open_page(ctx, PageKind::Dashboard)?;
    let state = mount(&page).await?;
    write!(out, "{}", render::dashboard(&state))?;
    Ok(())
}

fn vehicles_text(state: &ViewState, predicate: &FilterPredicate) -> String {
    let view = derive(state.vehicles(), predicate);
    let capacity = state.inventory().and_then(|i| i.capacity_info.as_ref());
    render::vehicles(&view, capacity)
}

pub async fn cmd_vehicles(
    ctx: &CliContext,
    filter: &FilterArgs,
    kind: Option<&str>,
    watch: bool,
    out: &mut impl Write,
) -> Result<()> {
    let predicate = predicate(filter, kind);
    let page = open_page(ctx, PageKind::Vehicles)?;
    let state = mount(&page).await?;
    write!(out, "{}", vehicles_text(&state, &predicate))?;

    if !watch {
        return Ok(());
    }
    match follow_charging(&page, &predicate, out, tokio::signal::ctrl_c()).await? {
        WatchEnd::Settled => writeln!(out, ":: No vehicles charging; stopped watching")?,
        WatchEnd::Interrupted => writeln!(out, ":: Interrupted; stopped watching")?,
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEnd {
    /// The charging refresh ended on its own.
    Settled,
    Interrupted,
}

/// Re-renders the vehicle list after every refresh until nothing is charging or
/// `stop` resolves. The page is torn down and its refresh task awaited either way.
pub async fn follow_charging<A, F>(
    page: &Page<A>,
    predicate: &FilterPredicate,
    out: &mut impl Write,
    stop: F,
) -> Result<WatchEnd>
where
    A: StationApi,
    F: Future,
{
    tokio::pin!(stop);
    let mut last = page.context().store().revision();
    let end = loop {
        if !page.is_refreshing() {
            break WatchEnd::Settled;
        }
        tokio::select! {
            biased;
            _ = &mut stop => break WatchEnd::Interrupted,
            _ = tokio::time::sleep(Duration::from_millis(500)) => {}
        }
        let revision = page.context().store().revision();
        if revision != last {
            last = revision;
            writeln!(out)?;
            write!(out, "{}", vehicles_text(&page.state(), predicate))?;
        }
    };
    page.destroy();
    if let Some(refresh) = page.take_refresh() {
        refresh.stop();
        refresh.join().await;
    }
    Ok(end)
}

pub async fn cmd_transfer_targets(ctx: &CliContext, out: &mut impl Write) -> Result<()> {
    let page = open_page(ctx, PageKind::Transfer)?;
    let state = mount(&page).await?;
    write!(out, "{}", transfer_text(&state))?;
    Ok(())
}

pub(crate) fn transfer_text(state: &ViewState) -> String {
    let mut text = render::nearby(state.nearby_stations());
    text.push_str(&render::partial_lines(state));
    text
}

pub async fn cmd_rides(ctx: &CliContext, filter: &FilterArgs, out: &mut impl Write) -> Result<()> {
    let page = open_page(ctx, PageKind::Rides)?;
    let state = mount(&page).await?;
    write!(out, "{}", render::rides(&derive(state.rides(), &predicate(filter, None))))?;
    Ok(())
}

pub async fn cmd_payments(
    ctx: &CliContext,
    filter: &FilterArgs,
    method: Option<&str>,
    all: bool,
    out: &mut impl Write,
) -> Result<()> {
    let scope = if all {
        PaymentScope::AllStations
    } else {
        PaymentScope::Station
    };
    let page = open_page(ctx, PageKind::Payments)?.with_payment_scope(scope);
    let state = mount(&page).await?;
    write!(
        out,
        "{}",
        render::payments(&derive(state.payments(), &predicate(filter, method)))
    )?;
    Ok(())
}

pub(crate) fn ports_text(state: &ViewState, predicate: &FilterPredicate) -> String {
    let mut text = render::ports(
        &derive(state.charging_ports(), predicate),
        state.available_vehicles(),
    );
    text.push_str(&render::partial_lines(state));
    text
}

pub async fn cmd_ports(ctx: &CliContext, filter: &FilterArgs, out: &mut impl Write) -> Result<()> {
    let page = open_page(ctx, PageKind::ChargingPorts)?;
    let state = mount(&page).await?;
    write!(out, "{}", ports_text(&state, &predicate(filter, None)))?;
    Ok(())
}

pub async fn cmd_reports(ctx: &CliContext, out: &mut impl Write) -> Result<()> {
    let page = open_page(ctx, PageKind::Reports)?;
    let state = mount(&page).await?;
    write!(out, "{}", render::report(state.report()))?;
    Ok(())
}

pub async fn cmd_settings_show(ctx: &CliContext, out: &mut impl Write) -> Result<()> {
    let page = open_page(ctx, PageKind::Settings)?;
    let state = mount(&page).await?;
    write!(out, "{}", render::settings(state.settings()))?;
    Ok(())
}

fn show_config(settings: &ConsoleSettings, ctx: &CliContext, out: &mut impl Write) -> Result<()> {
    writeln!(out, ":: Console configuration")?;
    if let Ok(path) = ctx.persistence().settings_path() {
        writeln!(out, "   File:     {}", path.display())?;
    }
    writeln!(out, "   API:      {}", settings.api_base_url)?;
    writeln!(
        out,
        "   Station:  {}",
        settings.default_station_id.as_deref().unwrap_or("-")
    )?;
    writeln!(out, "   Timeout:  {}s", settings.request_timeout().as_secs())?;
    writeln!(out, "   Refresh:  {}s", settings.refresh_interval().as_secs())?;
    Ok(())
}

/// Edits the saved file only; environment and flag overrides are not persisted.
pub fn cmd_config(ctx: &CliContext, action: &ConfigAction, out: &mut impl Write) -> Result<()> {
    let repo = ctx.persistence();
    if let ConfigAction::Show = action {
        return show_config(&ctx.settings, ctx, out);
    }

    let mut saved = repo.load()?;
    match action {
        ConfigAction::Show => {}
        ConfigAction::SetStation { station } => {
            let station = station.trim();
            if station.is_empty() {
                bail!("Station id cannot be empty");
            }
            saved.default_station_id = Some(station.to_string());
        }
        ConfigAction::SetApi { url } => {
            ApiClient::with_timeout(url, saved.request_timeout())
                .with_context(|| format!("Invalid API URL: {url}"))?;
            saved.api_base_url = url.clone();
        }
        ConfigAction::SetTimeout { secs } => {
            saved.request_timeout_secs = *secs;
        }
    }
    repo.save(&saved).context("Failed to save settings")?;
    show_config(&saved, ctx, out)
}
