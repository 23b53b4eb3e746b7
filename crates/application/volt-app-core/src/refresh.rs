use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;
use volt_core::ResourceKey;

use crate::aggregator::LoadMode;
use crate::pages::Loader;
use crate::ports::StationApi;

/// Silent re-load of the vehicle inventory while any vehicle is charging.
///
/// Stops on its own once no vehicle is charging, when [`ChargingRefresh::stop`] is
/// called, or when the owning page is destroyed.
pub struct ChargingRefresh {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl ChargingRefresh {
    pub(crate) fn spawn<A: StationApi>(loader: Loader<A>, interval: Duration) -> Self {
        let token = loader.context().child_token();
        let stop = token.clone();
        let handle = tokio::spawn(async move {
            info!("charging refresh started, every {}s", interval.as_secs());
            loop {
                tokio::select! {
                    _ = stop.cancelled() => break,
                    _ = tokio::time::sleep(interval) => {}
                }
                match loader.load(&[ResourceKey::Vehicles], LoadMode::Silent).await {
                    Ok(state) if state.any_charging() => {}
                    Ok(_) => break,
                    Err(_) => break,
                }
            }
            info!("charging refresh stopped");
        });
        Self { token, handle }
    }

    pub fn stop(&self) {
        self.token.cancel();
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Wait for the task to exit.
    pub async fn join(self) {
        let _ = self.handle.await;
    }
}
