use volt_core::ApiError;

use super::events::ViewEvent;
use super::state::{Field, PageStatus, ViewState};
use crate::aggregator::LoadMode;

pub fn reduce(mut state: ViewState, ev: ViewEvent) -> ViewState {
    match ev {
        ViewEvent::LoadStarted {
            load_id,
            keys,
            mode,
        } => {
            for key in &keys {
                state
                    .fields
                    .entry(*key)
                    .or_insert_with(|| Field::new(*key))
                    .pending = Some(load_id);
            }
            if mode == LoadMode::Normal && keys.contains(&state.primary()) {
                state.status = PageStatus::Loading;
            }
        }

        ViewEvent::LoadSettled {
            load_id,
            mode,
            outcomes,
        } => {
            let primary = state.primary();
            for (key, outcome) in outcomes {
                let field = state.fields.entry(key).or_insert_with(|| Field::new(key));
                // A newer load of this resource is in flight; its result wins.
                if field.pending != Some(load_id) {
                    continue;
                }
                field.pending = None;

                let outcome = outcome.and_then(|data| {
                    if data.key() == key {
                        Ok(data)
                    } else {
                        Err(ApiError::Decode(format!(
                            "{} payload delivered for {key}",
                            data.key()
                        )))
                    }
                });
                let primary_error = match outcome {
                    Ok(data) => {
                        field.value = data;
                        field.error = None;
                        None
                    }
                    Err(e) => {
                        field.error = Some(e.clone());
                        Some(e)
                    }
                };

                if key == primary {
                    state.status = match (primary_error, mode) {
                        (None, _) => PageStatus::Ready,
                        // Stale data stays on screen; the field error carries the failure.
                        (Some(_), LoadMode::Silent) if state.status == PageStatus::Ready => {
                            PageStatus::Ready
                        }
                        (Some(e), _) => PageStatus::Failed(e),
                    };
                }
            }
        }
    }
    state
}
