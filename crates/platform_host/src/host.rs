//! Host service bundle injected into the desktop runtime.

use std::rc::Rc;

use crate::{
    BucketStore, MemoryBucketStore, NoopNotificationService, NoopSoundService,
    NotificationService, SoundService,
};

/// Stable host strategy selected for the current build/runtime composition path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Browser-backed runtime composition (`localStorage`, Web Audio, Web Notifications).
    Browser,
    /// Placeholder composition with in-memory or no-op adapters.
    Stub,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Stub => "stub",
        }
    }
}

/// Runtime-selected host service bundle.
///
/// All environment-specific service selection happens before this bundle crosses into
/// `desktop_runtime`, which keeps the runtime decoupled from browser adapter details.
#[derive(Clone)]
pub struct HostServices {
    /// Bucket store holding one enveloped JSON document per namespace.
    pub buckets: Rc<dyn BucketStore>,
    /// Notification delivery service.
    pub notifications: Rc<dyn NotificationService>,
    /// UI tone playback service.
    pub sound: Rc<dyn SoundService>,
    /// Stable strategy identifier for diagnostics.
    pub host_strategy: HostStrategy,
}

impl HostServices {
    /// Builds an in-memory bundle for tests and non-browser targets.
    pub fn in_memory() -> Self {
        Self {
            buckets: Rc::new(MemoryBucketStore::default()),
            notifications: Rc::new(NoopNotificationService),
            sound: Rc::new(NoopSoundService),
            host_strategy: HostStrategy::Stub,
        }
    }
}

impl std::fmt::Debug for HostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostServices")
            .field("host_strategy", &self.host_strategy)
            .finish_non_exhaustive()
    }
}
