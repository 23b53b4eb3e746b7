use volt_core::{ResourceData, ResourceKey, ResourceResult};

use crate::aggregator::LoadMode;

/// Identifies one `load_view` invocation. Settlements carrying a superseded id are dropped.
pub type LoadId = uuid::Uuid;

#[derive(Debug, Clone)]
pub enum ViewEvent {
    LoadStarted {
        load_id: LoadId,
        keys: Vec<ResourceKey>,
        mode: LoadMode,
    },
    LoadSettled {
        load_id: LoadId,
        mode: LoadMode,
        outcomes: Vec<(ResourceKey, ResourceResult<ResourceData>)>,
    },
}
