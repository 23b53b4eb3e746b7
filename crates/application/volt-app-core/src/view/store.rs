use std::sync::{Arc, Mutex, PoisonError};

use super::{events::ViewEvent, reducer::reduce, state::ViewState};

struct Inner {
    state: ViewState,
    revision: u64,
}

/// Shared handle to one page's [`ViewState`]. Every write goes through [`ViewStore::apply`].
#[derive(Clone)]
pub struct ViewStore {
    inner: Arc<Mutex<Inner>>,
}

impl ViewStore {
    pub fn new(state: ViewState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner { state, revision: 0 })),
        }
    }

    pub fn state(&self) -> ViewState {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .state
            .clone()
    }

    /// Number of events applied so far.
    pub fn revision(&self) -> u64 {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .revision
    }

    pub fn apply(&self, ev: ViewEvent) -> ViewState {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        Self::commit(&mut guard, ev)
    }

    /// Applies `ev` only if `live` still holds while the store is locked.
    pub fn apply_while(&self, ev: ViewEvent, live: impl FnOnce() -> bool) -> Option<ViewState> {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        live().then(|| Self::commit(&mut guard, ev))
    }

    /// Runs `f` with the store locked, so no write can interleave with it.
    pub fn fence<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }

    fn commit(inner: &mut Inner, ev: ViewEvent) -> ViewState {
        let next = reduce(inner.state.clone(), ev);
        inner.state = next.clone();
        inner.revision += 1;
        next
    }
}
