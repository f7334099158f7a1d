use std::rc::Rc;

use platform_host::{
    BucketEnvelope, BucketStore, BucketStoreFuture, HostServices, HostStrategy, MemoryBucketStore,
    NoopNotificationService, NoopSoundService, NotificationFuture, NotificationService,
    SoundService, Tone,
};

use crate::{WebBucketStore, WebNotificationService, WebSoundService};

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "desktop-host-stub")]
    {
        HostStrategy::Stub
    }

    #[cfg(not(feature = "desktop-host-stub"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    selected_host_strategy().as_str()
}

/// Adapter enum that erases the concrete bucket backend behind [`BucketStore`].
#[derive(Debug, Clone)]
pub enum BucketStoreAdapter {
    /// `localStorage`-backed buckets.
    Browser(WebBucketStore),
    /// Session-lifetime buckets used when persistence is stubbed out.
    Stub(MemoryBucketStore),
}

impl BucketStore for BucketStoreAdapter {
    fn load_envelope<'a>(
        &'a self,
        namespace: &'a str,
    ) -> BucketStoreFuture<'a, Result<Option<BucketEnvelope>, String>> {
        match self {
            Self::Browser(store) => store.load_envelope(namespace),
            Self::Stub(store) => store.load_envelope(namespace),
        }
    }

    fn save_envelope<'a>(
        &'a self,
        envelope: &'a BucketEnvelope,
    ) -> BucketStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.save_envelope(envelope),
            Self::Stub(store) => store.save_envelope(envelope),
        }
    }

    fn delete_bucket<'a>(
        &'a self,
        namespace: &'a str,
    ) -> BucketStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.delete_bucket(namespace),
            Self::Stub(store) => store.delete_bucket(namespace),
        }
    }

    fn list_namespaces<'a>(&'a self) -> BucketStoreFuture<'a, Result<Vec<String>, String>> {
        match self {
            Self::Browser(store) => store.list_namespaces(),
            Self::Stub(store) => store.list_namespaces(),
        }
    }
}

/// Adapter enum that erases the concrete notification backend behind [`NotificationService`].
#[derive(Debug, Clone, Copy)]
pub enum NotificationServiceAdapter {
    /// Web Notifications API delivery.
    Browser(WebNotificationService),
    /// Dropped notifications.
    Stub(NoopNotificationService),
}

impl NotificationService for NotificationServiceAdapter {
    fn notify<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(service) => service.notify(title, body),
            Self::Stub(service) => service.notify(title, body),
        }
    }
}

/// Adapter enum that erases the concrete audio backend behind [`SoundService`].
#[derive(Debug, Clone, Copy)]
pub enum SoundServiceAdapter {
    /// Web Audio oscillator playback.
    Browser(WebSoundService),
    /// Silent playback.
    Stub(NoopSoundService),
}

impl SoundService for SoundServiceAdapter {
    fn play(&self, tone: Tone, volume: u8) {
        match self {
            Self::Browser(service) => service.play(tone, volume),
            Self::Stub(service) => service.play(tone, volume),
        }
    }
}

/// Builds the bucket-store adapter for the compile-time selected host strategy.
pub fn bucket_store() -> BucketStoreAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => BucketStoreAdapter::Browser(WebBucketStore),
        HostStrategy::Stub => BucketStoreAdapter::Stub(MemoryBucketStore::default()),
    }
}

/// Builds the notification adapter for the compile-time selected host strategy.
pub fn notification_service() -> NotificationServiceAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => NotificationServiceAdapter::Browser(WebNotificationService),
        HostStrategy::Stub => NotificationServiceAdapter::Stub(NoopNotificationService),
    }
}

/// Builds the sound adapter for the compile-time selected host strategy.
pub fn sound_service() -> SoundServiceAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => SoundServiceAdapter::Browser(WebSoundService),
        HostStrategy::Stub => SoundServiceAdapter::Stub(NoopSoundService),
    }
}

/// Assembles the [`HostServices`] bundle injected into `desktop_runtime`.
pub fn build_host_services() -> HostServices {
    HostServices {
        buckets: Rc::new(bucket_store()),
        notifications: Rc::new(notification_service()),
        sound: Rc::new(sound_service()),
        host_strategy: selected_host_strategy(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn bundle_reports_selected_strategy() {
        let services = build_host_services();
        assert_eq!(services.host_strategy, selected_host_strategy());
        assert_eq!(host_strategy_name(), services.host_strategy.as_str());
    }

    #[cfg(not(feature = "desktop-host-stub"))]
    #[test]
    fn browser_strategy_uses_local_storage_buckets() {
        assert!(matches!(bucket_store(), BucketStoreAdapter::Browser(_)));
        assert!(matches!(sound_service(), SoundServiceAdapter::Browser(_)));
    }
}
