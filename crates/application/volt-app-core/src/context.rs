use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::aggregator::{fan_in, LoadMode, ResourceSpec};
use crate::view::{LoadId, ViewEvent, ViewState, ViewStore};

/// The owning page went away before its load settled; nothing was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("page context destroyed")]
pub struct Cancelled;

/// Lifetime of one mounted page: its view store plus the token that tears it down.
#[derive(Clone)]
pub struct PageContext {
    store: ViewStore,
    token: CancellationToken,
}

impl PageContext {
    pub fn new(state: ViewState) -> Self {
        Self {
            store: ViewStore::new(state),
            token: CancellationToken::new(),
        }
    }

    pub fn store(&self) -> &ViewStore {
        &self.store
    }

    pub fn state(&self) -> ViewState {
        self.store.state()
    }

    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Token for background work that must stop with the page.
    pub fn child_token(&self) -> CancellationToken {
        self.token.child_token()
    }

    /// Cancels the page. Taken under the store lock, so a load that is applying
    /// its results either finishes first or sees the cancellation.
    pub fn destroy(&self) {
        self.store.fence(|| self.token.cancel());
    }

    /// Fan out `specs`, wait for all of them, then merge into the view state.
    ///
    /// Only the resources named in `specs` are touched. If the context is destroyed
    /// while calls are in flight, the outcomes are discarded and `Err(Cancelled)` is returned.
    pub async fn load_view(
        &self,
        specs: Vec<ResourceSpec<'_>>,
        mode: LoadMode,
    ) -> Result<ViewState, Cancelled> {
        let load_id = LoadId::new_v4();
        let started = ViewEvent::LoadStarted {
            load_id,
            keys: specs.iter().map(|s| s.key).collect(),
            mode,
        };
        self.store
            .apply_while(started, || self.is_active())
            .ok_or(Cancelled)?;

        let outcomes = tokio::select! {
            biased;
            _ = self.token.cancelled() => {
                debug!("load {load_id} abandoned: page destroyed");
                return Err(Cancelled);
            }
            outcomes = fan_in(specs) => outcomes,
        };

        let settled = ViewEvent::LoadSettled {
            load_id,
            mode,
            outcomes,
        };
        self.store
            .apply_while(settled, || self.is_active())
            .ok_or(Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use volt_core::{ApiError, ResourceData, ResourceKey};

    use crate::view::PageStatus;

    fn rides_spec(delay: Duration) -> ResourceSpec<'static> {
        ResourceSpec::new(ResourceKey::Rides, async move {
            tokio::time::sleep(delay).await;
            Ok::<_, ApiError>(ResourceData::Rides(vec![]))
        })
    }

    #[tokio::test(start_paused = true)]
    async fn destroy_mid_flight_writes_nothing() {
        let ctx = PageContext::new(ViewState::new(ResourceKey::Rides, &[]));
        let loader = ctx.clone();
        let task = tokio::spawn(async move {
            loader
                .load_view(vec![rides_spec(Duration::from_secs(5))], LoadMode::Normal)
                .await
        });

        tokio::time::sleep(Duration::from_secs(1)).await;
        let before = ctx.store().revision();
        ctx.destroy();

        assert_eq!(task.await.unwrap(), Err(Cancelled));
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(ctx.store().revision(), before);
        assert_eq!(ctx.state().status, PageStatus::Loading);
    }

    #[tokio::test]
    async fn destroyed_context_refuses_new_loads() {
        let ctx = PageContext::new(ViewState::new(ResourceKey::Rides, &[]));
        ctx.destroy();
        let res = ctx
            .load_view(vec![rides_spec(Duration::ZERO)], LoadMode::Normal)
            .await;
        assert_eq!(res, Err(Cancelled));
        assert_eq!(ctx.store().revision(), 0);
    }
}
