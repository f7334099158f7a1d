//! Drains the reducer's effect queue and hands each effect to the host.

use leptos::*;

use crate::runtime_context::DesktopRuntimeContext;

/// Installs the executor that runs queued [`crate::RuntimeEffect`]s in emission order.
pub fn install(runtime: DesktopRuntimeContext) {
    // Take the batch before running it: effects that dispatch (timers firing synchronously,
    // nested actions) queue a new batch instead of being lost in this one.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());

        let host = runtime.host.get_value();
        for effect in queued {
            host.run_runtime_effect(runtime, effect);
        }
    });
}
