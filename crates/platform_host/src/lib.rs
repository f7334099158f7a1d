//! Typed host-domain contracts shared by the desktop runtime and the browser adapters.
//!
//! This crate is the API-first boundary for platform services. It exposes the bucket envelope
//! model and its store trait, tone playback and notification service traits, and the
//! [`HostServices`] bundle the runtime is composed with. Concrete browser adapters live in
//! `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod audio;
pub mod host;
pub mod notifications;
pub mod storage;
pub mod time;

pub use audio::{
    volume_to_gain, NoopSoundService, RecordingSoundService, SoundService, Tone, ToneWaveform,
};
pub use host::{HostServices, HostStrategy};
pub use notifications::{
    MemoryNotificationService, NoopNotificationService, NotificationFuture, NotificationService,
};
pub use storage::bucket::{
    build_bucket_envelope, decode_bucket_payload, BucketEnvelope, BucketStore, BucketStoreFuture,
    MemoryBucketStore, NoopBucketStore, BUCKET_ENVELOPE_VERSION,
};
pub use time::{next_monotonic_timestamp_ms, unix_time_ms_now};
