//! Drains the reducer's effect queue into the host.

use leptos::*;

use crate::runtime_context::CatalogRuntimeContext;

/// Subscribes to the runtime effect queue and hands each non-empty batch to the host.
///
/// The queue is emptied without notifying subscribers, so the next dispatch that appends effects
/// re-triggers this executor with a fresh batch. Batches run against the state current at drain
/// time.
pub fn install(runtime: CatalogRuntimeContext) {
    create_effect(move |_| {
        let Some(batch) = runtime
            .effects
            .with(|queue| (!queue.is_empty()).then(|| queue.clone()))
        else {
            return;
        };
        runtime.effects.update_untracked(Vec::clear);

        let state = runtime.state.get_untracked();
        runtime
            .host
            .with_value(|host| host.spawn_runtime_effects(state, batch));
    });
}
