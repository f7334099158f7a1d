//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete browser-side host wiring layer: `localStorage` buckets, Web Audio
//! tones and Web Notifications. On non-wasm targets every adapter compiles to an inert fallback so
//! the runtime crates stay testable natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod audio;
pub mod notifications;
pub mod storage;

pub use adapters::{
    bucket_store, build_host_services, host_strategy_name, notification_service,
    selected_host_strategy, sound_service, BucketStoreAdapter, NotificationServiceAdapter,
    SoundServiceAdapter,
};
pub use audio::WebSoundService;
pub use notifications::WebNotificationService;
pub use storage::local_storage::WebBucketStore;
