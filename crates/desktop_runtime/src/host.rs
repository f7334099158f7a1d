//! Host-side runtime helpers for executing reducer effects.
//!
//! The reducer only describes side effects. This module runs them against the injected
//! [`HostServices`]: bucket writes, UI tones, host notifications and task timers.

mod boot;
mod persistence_effects;
mod timers;

use std::{cell::RefCell, collections::HashMap, future::Future, rc::Rc};

use leptos::{
    leptos_dom::helpers::TimeoutHandle, logging, spawn_local, Callback, SignalGetUntracked,
};
use platform_host::{BucketStore, HostServices, NotificationService, SoundService, Tone};

use crate::{
    reducer::{DesktopAction, RuntimeEffect},
    runtime_context::DesktopRuntimeContext,
    tasks::TaskKey,
};

#[derive(Clone)]
/// Host service bundle plus the live timer table for scheduled tasks.
pub struct DesktopHostContext {
    services: HostServices,
    timers: Rc<RefCell<HashMap<TaskKey, TimeoutHandle>>>,
}

impl DesktopHostContext {
    /// Wraps the services assembled by the entry layer.
    pub fn new(services: HostServices) -> Self {
        Self {
            services,
            timers: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Returns the configured bucket store.
    pub fn bucket_store(&self) -> Rc<dyn BucketStore> {
        self.services.buckets.clone()
    }

    /// Returns the configured notification delivery service.
    pub fn notification_service(&self) -> Rc<dyn NotificationService> {
        self.services.notifications.clone()
    }

    /// Returns the configured sound service.
    pub fn sound_service(&self) -> Rc<dyn SoundService> {
        self.services.sound.clone()
    }

    /// Returns the stable name of the selected host strategy.
    pub fn host_strategy_name(&self) -> &'static str {
        self.services.host_strategy.as_str()
    }

    /// Loads every persisted bucket the desktop hydrates from and dispatches `Hydrate*` actions.
    pub fn install_boot_hydration(&self, dispatch: Callback<DesktopAction>) {
        boot::install_boot_hydration(self.clone(), dispatch);
    }

    /// Reloads settings, profile, notifications and terminal history after the store changed
    /// underneath the running desktop.
    pub fn rehydrate(&self, dispatch: Callback<DesktopAction>) {
        let store = self.bucket_store();
        spawn_local(boot::hydrate_documents(store, dispatch));
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::PersistRunningApps => {
                persistence_effects::persist_running_apps(self.clone(), runtime)
            }
            RuntimeEffect::PersistSettings => {
                persistence_effects::persist_settings(self.clone(), runtime)
            }
            RuntimeEffect::PersistUserProfile => {
                persistence_effects::persist_user_profile(self.clone(), runtime)
            }
            RuntimeEffect::PersistNotifications => {
                persistence_effects::persist_notifications(self.clone(), runtime)
            }
            RuntimeEffect::PersistTerminalHistory => {
                persistence_effects::persist_terminal_history(self.clone(), runtime)
            }
            RuntimeEffect::PlaySound(tone) => {
                let volume = runtime.state.get_untracked().settings.volume;
                self.play_tone(tone, volume);
            }
            RuntimeEffect::Notify { title, body } => {
                spawn_local(self.deliver_notification(title, body));
            }
            RuntimeEffect::ScheduleTask {
                key,
                generation,
                delay_ms,
            } => timers::schedule(self, runtime.dispatch, key, generation, delay_ms),
            RuntimeEffect::CancelTask(key) => timers::cancel(self, key),
        }
    }

    fn play_tone(&self, tone: Tone, volume: u8) {
        self.services.sound.play(tone, volume);
    }

    fn deliver_notification(
        &self,
        title: String,
        body: String,
    ) -> impl Future<Output = ()> + 'static {
        let notifications = self.notification_service();
        async move {
            if let Err(err) = notifications.notify(&title, &body).await {
                logging::warn!("host notification failed: {err}");
            }
        }
    }
}

impl std::fmt::Debug for DesktopHostContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesktopHostContext")
            .field("services", &self.services)
            .field("armed_timers", &self.timers.borrow().len())
            .finish()
    }
}
