//! Fan-out/fan-in of independent resource calls.

use std::future::Future;

use futures::future::{join_all, BoxFuture};
use futures::FutureExt;
use tracing::debug;
use volt_core::{ResourceData, ResourceKey, ResourceResult};

use crate::pages::PaymentScope;
use crate::ports::StationApi;

/// `Silent` loads merge exactly like `Normal` ones but never raise the page's loading state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    #[default]
    Normal,
    Silent,
}

/// A named resource call, not yet started.
pub struct ResourceSpec<'a> {
    pub key: ResourceKey,
    call: BoxFuture<'a, ResourceResult<ResourceData>>,
}

impl<'a> ResourceSpec<'a> {
    pub fn new<F>(key: ResourceKey, call: F) -> Self
    where
        F: Future<Output = ResourceResult<ResourceData>> + Send + 'a,
    {
        Self {
            key,
            call: call.boxed(),
        }
    }

    /// Wraps a typed call, tagging its value with the matching [`ResourceData`] variant.
    pub fn map<F, T>(key: ResourceKey, call: F, wrap: fn(T) -> ResourceData) -> Self
    where
        F: Future<Output = ResourceResult<T>> + Send + 'a,
        T: 'a,
    {
        Self::new(key, call.map(move |res| res.map(wrap)))
    }
}

impl std::fmt::Debug for ResourceSpec<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceSpec").field("key", &self.key).finish()
    }
}

/// Runs every call concurrently and returns once all of them have settled.
///
/// Outcomes come back in spec order regardless of completion order.
pub async fn fan_in(specs: Vec<ResourceSpec<'_>>) -> Vec<(ResourceKey, ResourceResult<ResourceData>)> {
    debug!("fan-out of {} resource calls", specs.len());
    let outcomes = join_all(
        specs
            .into_iter()
            .map(|spec| async move { (spec.key, spec.call.await) }),
    )
    .await;
    for (key, outcome) in &outcomes {
        match outcome {
            Ok(_) => debug!("{key} settled ok"),
            Err(e) => debug!("{key} settled with error: {e}"),
        }
    }
    outcomes
}

/// The backend call that fills `key` for `station_id`.
pub fn resource_spec<'a, A>(
    api: &'a A,
    station_id: &'a str,
    key: ResourceKey,
    payments: PaymentScope,
) -> ResourceSpec<'a>
where
    A: StationApi + ?Sized,
{
    match key {
        ResourceKey::StationSummary => ResourceSpec::map(
            key,
            api.station_summary(station_id),
            ResourceData::StationSummary,
        ),
        ResourceKey::ActiveRides => {
            ResourceSpec::map(key, api.active_rides(station_id), ResourceData::ActiveRides)
        }
        ResourceKey::DashboardVehicles => ResourceSpec::map(
            key,
            api.dashboard_vehicles(station_id),
            ResourceData::DashboardVehicles,
        ),
        ResourceKey::StationDetails => ResourceSpec::map(
            key,
            api.station_details(station_id),
            ResourceData::StationDetails,
        ),
        ResourceKey::Vehicles => {
            ResourceSpec::map(key, api.vehicles(station_id), ResourceData::Vehicles)
        }
        ResourceKey::NearbyStations => ResourceSpec::map(
            key,
            api.nearby_stations(station_id),
            ResourceData::NearbyStations,
        ),
        ResourceKey::AvailableVehicles => ResourceSpec::map(
            key,
            api.available_vehicles(station_id),
            ResourceData::AvailableVehicles,
        ),
        ResourceKey::ChargingPorts => ResourceSpec::map(
            key,
            api.charging_ports(station_id),
            ResourceData::ChargingPorts,
        ),
        ResourceKey::Rides => ResourceSpec::map(key, api.rides(station_id), ResourceData::Rides),
        ResourceKey::Payments => {
            let station = match payments {
                PaymentScope::Station => Some(station_id),
                PaymentScope::AllStations => None,
            };
            ResourceSpec::map(key, api.payments(station), ResourceData::Payments)
        }
        ResourceKey::Report => ResourceSpec::map(key, api.report(station_id), ResourceData::Report),
        ResourceKey::Settings => {
            ResourceSpec::map(key, api.settings(station_id), ResourceData::Settings)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use volt_core::ApiError;

    #[tokio::test(start_paused = true)]
    async fn waits_for_the_slowest_call() {
        let fast = ResourceSpec::new(ResourceKey::ActiveRides, async {
            Ok::<_, ApiError>(ResourceData::ActiveRides(vec![]))
        });
        let slow = ResourceSpec::new(ResourceKey::StationSummary, async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Err::<ResourceData, _>(ApiError::status(503))
        });

        let started = tokio::time::Instant::now();
        let outcomes = fan_in(vec![slow, fast]).await;
        assert!(started.elapsed() >= Duration::from_secs(30));
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].0, ResourceKey::StationSummary);
        assert!(outcomes[0].1.is_err());
        assert!(outcomes[1].1.is_ok());
    }

    #[tokio::test]
    async fn empty_spec_list_settles_immediately() {
        assert!(fan_in(Vec::new()).await.is_empty());
    }
}
