use std::time::Duration;

use leptos::{leptos_dom::helpers::set_timeout_with_handle, logging, Callable, Callback};

use crate::{host::DesktopHostContext, reducer::DesktopAction, tasks::TaskKey};

/// Arms the timer for `key`, replacing any timer already armed for it.
pub(super) fn schedule(
    host: &DesktopHostContext,
    dispatch: Callback<DesktopAction>,
    key: TaskKey,
    generation: u64,
    delay_ms: u32,
) {
    cancel(host, key);

    let timers = host.timers.clone();
    let fire = move || {
        timers.borrow_mut().remove(&key);
        dispatch.call(DesktopAction::TaskFired { key, generation });
    };

    match set_timeout_with_handle(fire, Duration::from_millis(u64::from(delay_ms))) {
        Ok(handle) => {
            host.timers.borrow_mut().insert(key, handle);
        }
        Err(err) => logging::warn!("arming {key:?} timer failed: {err:?}"),
    }
}

pub(super) fn cancel(host: &DesktopHostContext, key: TaskKey) {
    if let Some(handle) = host.timers.borrow_mut().remove(&key) {
        handle.clear();
    }
}
