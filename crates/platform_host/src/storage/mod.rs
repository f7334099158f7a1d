//! Persisted bucket storage contracts and adapters.

pub mod bucket;
