//! Registry of deferred work the reducer has asked the host to run later.
//!
//! The reducer never owns a timer. It records a generation per [`TaskKey`] and emits
//! [`crate::RuntimeEffect::ScheduleTask`]; the host arms a timeout and dispatches
//! [`crate::DesktopAction::TaskFired`] back with the same generation. A fired task only takes
//! effect while its generation is still the registered one, so cancelled or superseded timers are
//! inert even if the host fails to clear them.

use std::collections::BTreeMap;

use crate::model::AppId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaskKey {
    /// Simulated fingerprint read on the lock screen.
    Biometric,
    /// Shutdown or restart transition.
    Power,
    /// Auto-dismissal of the notification banner.
    BannerDismiss,
    /// App-owned work, such as a page load in the browser window.
    Navigation(AppId),
}

impl TaskKey {
    /// App that owns the task, if any. Closing that app cancels it.
    pub fn owner(self) -> Option<AppId> {
        match self {
            Self::Navigation(app_id) => Some(app_id),
            Self::Biometric | Self::Power | Self::BannerDismiss => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskRegistry {
    pending: BTreeMap<TaskKey, u64>,
    next_generation: u64,
}

impl TaskRegistry {
    /// Registers `key` and returns its generation, superseding any earlier registration.
    pub fn schedule(&mut self, key: TaskKey) -> u64 {
        self.next_generation += 1;
        self.pending.insert(key, self.next_generation);
        self.next_generation
    }

    /// Drops `key`; returns whether it was pending.
    pub fn cancel(&mut self, key: TaskKey) -> bool {
        self.pending.remove(&key).is_some()
    }

    /// Drops every task owned by `app_id` and returns the cancelled keys.
    pub fn cancel_owned_by(&mut self, app_id: AppId) -> Vec<TaskKey> {
        let keys: Vec<TaskKey> = self
            .pending
            .keys()
            .copied()
            .filter(|key| key.owner() == Some(app_id))
            .collect();
        for key in &keys {
            self.pending.remove(key);
        }
        keys
    }

    /// Drops every pending task and returns the cancelled keys.
    pub fn cancel_all(&mut self) -> Vec<TaskKey> {
        std::mem::take(&mut self.pending).into_keys().collect()
    }

    /// Consumes a firing. Returns `false` for stale or unknown generations.
    pub fn complete(&mut self, key: TaskKey, generation: u64) -> bool {
        if self.pending.get(&key) == Some(&generation) {
            self.pending.remove(&key);
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self, key: TaskKey) -> bool {
        self.pending.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
