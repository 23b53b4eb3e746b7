//! Which resources each console page loads, and the page lifecycle around them.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use volt_core::{ResourceKey, Session};

use crate::aggregator::{resource_spec, LoadMode};
use crate::context::{Cancelled, PageContext};
use crate::ports::StationApi;
use crate::refresh::ChargingRefresh;
use crate::view::ViewState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Dashboard,
    Vehicles,
    Rides,
    Payments,
    ChargingPorts,
    Reports,
    Settings,
    /// Picking a destination for a vehicle: nearby stations plus the local fleet.
    Transfer,
}

impl PageKind {
    /// Resources loaded on mount, primary first.
    pub fn resources(self) -> &'static [ResourceKey] {
        match self {
            PageKind::Dashboard => &[
                ResourceKey::DashboardVehicles,
                ResourceKey::StationSummary,
                ResourceKey::ActiveRides,
                ResourceKey::StationDetails,
            ],
            PageKind::Vehicles => &[ResourceKey::Vehicles],
            PageKind::Rides => &[ResourceKey::Rides],
            PageKind::Payments => &[ResourceKey::Payments],
            PageKind::ChargingPorts => &[ResourceKey::ChargingPorts, ResourceKey::AvailableVehicles],
            PageKind::Reports => &[ResourceKey::Report],
            PageKind::Settings => &[ResourceKey::Settings],
            PageKind::Transfer => &[ResourceKey::NearbyStations, ResourceKey::Vehicles],
        }
    }

    pub fn primary(self) -> ResourceKey {
        match self {
            PageKind::Dashboard => ResourceKey::DashboardVehicles,
            PageKind::Vehicles => ResourceKey::Vehicles,
            PageKind::Rides => ResourceKey::Rides,
            PageKind::Payments => ResourceKey::Payments,
            PageKind::ChargingPorts => ResourceKey::ChargingPorts,
            PageKind::Reports => ResourceKey::Report,
            PageKind::Settings => ResourceKey::Settings,
            PageKind::Transfer => ResourceKey::NearbyStations,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PageKind::Dashboard => "Dashboard",
            PageKind::Vehicles => "Vehicles",
            PageKind::Rides => "Rides",
            PageKind::Payments => "Payments",
            PageKind::ChargingPorts => "Charging Ports",
            PageKind::Reports => "Reports",
            PageKind::Settings => "Settings",
            PageKind::Transfer => "Transfer",
        }
    }

    pub fn polls_charging(self) -> bool {
        self == PageKind::Vehicles
    }
}

/// Payments page can list one station or every station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentScope {
    #[default]
    Station,
    AllStations,
}

/// Everything needed to issue a page's loads; cheap to clone into background tasks.
pub(crate) struct Loader<A> {
    api: Arc<A>,
    station_id: String,
    payments: PaymentScope,
    ctx: PageContext,
}

impl<A> Clone for Loader<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            station_id: self.station_id.clone(),
            payments: self.payments,
            ctx: self.ctx.clone(),
        }
    }
}

impl<A: StationApi> Loader<A> {
    pub(crate) fn context(&self) -> &PageContext {
        &self.ctx
    }

    pub(crate) async fn load(
        &self,
        keys: &[ResourceKey],
        mode: LoadMode,
    ) -> Result<ViewState, Cancelled> {
        let specs = keys
            .iter()
            .map(|key| resource_spec(self.api.as_ref(), &self.station_id, *key, self.payments))
            .collect();
        self.ctx.load_view(specs, mode).await
    }
}

/// One mounted page: its view state, its loads and its background refresh.
pub struct Page<A: StationApi> {
    kind: PageKind,
    session: Session,
    loader: Loader<A>,
    refresh_interval: Duration,
    refresh: Mutex<Option<ChargingRefresh>>,
}

impl<A: StationApi> Page<A> {
    pub fn new(kind: PageKind, api: Arc<A>, session: Session) -> Self {
        let state = ViewState::new(kind.primary(), kind.resources());
        Self {
            kind,
            loader: Loader {
                api,
                station_id: session.station_id.clone(),
                payments: PaymentScope::default(),
                ctx: PageContext::new(state),
            },
            session,
            refresh_interval: Duration::from_secs(volt_config::CHARGING_REFRESH_INTERVAL_SECS),
            refresh: Mutex::new(None),
        }
    }

    pub fn with_payment_scope(mut self, scope: PaymentScope) -> Self {
        self.loader.payments = scope;
        self
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn api(&self) -> &Arc<A> {
        &self.loader.api
    }

    pub fn context(&self) -> &PageContext {
        &self.loader.ctx
    }

    pub fn state(&self) -> ViewState {
        self.loader.ctx.state()
    }

    /// Load every resource of the page (mount or user refresh).
    pub async fn load(&self) -> Result<ViewState, Cancelled> {
        self.reload(self.kind.resources(), LoadMode::Normal).await
    }

    /// Load only `keys`; other fields keep their value and error.
    pub async fn reload(
        &self,
        keys: &[ResourceKey],
        mode: LoadMode,
    ) -> Result<ViewState, Cancelled> {
        let state = self.loader.load(keys, mode).await?;
        if self.kind.polls_charging() && keys.contains(&ResourceKey::Vehicles) {
            self.ensure_charging_refresh(&state);
        }
        Ok(state)
    }

    fn ensure_charging_refresh(&self, state: &ViewState) {
        let mut slot = self.refresh.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(ChargingRefresh::is_running) {
            return;
        }
        *slot = state
            .any_charging()
            .then(|| ChargingRefresh::spawn(self.loader.clone(), self.refresh_interval));
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(ChargingRefresh::is_running)
    }

    /// Take the refresh task handle, e.g. to wait for it to wind down.
    pub fn take_refresh(&self) -> Option<ChargingRefresh> {
        self.refresh
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Tear the page down: in-flight loads are discarded and the refresh task ends.
    pub fn destroy(&self) {
        self.loader.ctx.destroy();
    }
}

impl<A: StationApi> Drop for Page<A> {
    fn drop(&mut self) {
        self.loader.ctx.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_is_listed_first() {
        for kind in [
            PageKind::Dashboard,
            PageKind::Vehicles,
            PageKind::Rides,
            PageKind::Payments,
            PageKind::ChargingPorts,
            PageKind::Reports,
            PageKind::Settings,
            PageKind::Transfer,
        ] {
            assert_eq!(kind.resources().first(), Some(&kind.primary()), "{kind:?}");
        }
    }
}
