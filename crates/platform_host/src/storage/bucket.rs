//! Bucket persistence contracts: one enveloped JSON document per namespace.
//!
//! A bucket is always read whole and written whole. There are no partial updates and no
//! transactions; two writers racing on the same namespace resolve as last write wins.

use std::{cell::RefCell, collections::BTreeMap, future::Future, pin::Pin, rc::Rc};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// Version of the [`BucketEnvelope`] wrapper itself.
pub const BUCKET_ENVELOPE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Versioned wrapper around a persisted bucket document.
pub struct BucketEnvelope {
    /// Envelope schema version.
    pub envelope_version: u32,
    /// Namespace identifying the bucket.
    pub namespace: String,
    /// Bucket-defined schema version for `payload`. Free-form; no migration is negotiated.
    pub schema_version: u32,
    /// Store-assigned update time in unix milliseconds.
    pub updated_at_unix_ms: u64,
    /// Serialized bucket document.
    pub payload: Value,
}

impl BucketEnvelope {
    /// Wraps `payload` and stamps it with a monotonic update timestamp.
    pub fn new(namespace: impl Into<String>, schema_version: u32, payload: Value) -> Self {
        Self {
            envelope_version: BUCKET_ENVELOPE_VERSION,
            namespace: namespace.into(),
            schema_version,
            updated_at_unix_ms: crate::time::next_monotonic_timestamp_ms(),
            payload,
        }
    }
}

/// Object-safe boxed future used by [`BucketStore`] async methods.
pub type BucketStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Storage service for whole-document bucket reads and writes.
pub trait BucketStore {
    /// Loads the envelope stored under `namespace`, if any.
    fn load_envelope<'a>(
        &'a self,
        namespace: &'a str,
    ) -> BucketStoreFuture<'a, Result<Option<BucketEnvelope>, String>>;

    /// Replaces the document stored under `envelope.namespace`.
    fn save_envelope<'a>(
        &'a self,
        envelope: &'a BucketEnvelope,
    ) -> BucketStoreFuture<'a, Result<(), String>>;

    /// Deletes the document stored under `namespace`. Deleting a missing bucket succeeds.
    fn delete_bucket<'a>(&'a self, namespace: &'a str)
        -> BucketStoreFuture<'a, Result<(), String>>;

    /// Lists the namespaces currently present, sorted.
    fn list_namespaces<'a>(&'a self) -> BucketStoreFuture<'a, Result<Vec<String>, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Bucket store that never holds anything.
pub struct NoopBucketStore;

impl BucketStore for NoopBucketStore {
    fn load_envelope<'a>(
        &'a self,
        _namespace: &'a str,
    ) -> BucketStoreFuture<'a, Result<Option<BucketEnvelope>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn save_envelope<'a>(
        &'a self,
        _envelope: &'a BucketEnvelope,
    ) -> BucketStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn delete_bucket<'a>(
        &'a self,
        _namespace: &'a str,
    ) -> BucketStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn list_namespaces<'a>(&'a self) -> BucketStoreFuture<'a, Result<Vec<String>, String>> {
        Box::pin(async { Ok(Vec::new()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory bucket store. Clones share the same backing map.
pub struct MemoryBucketStore {
    inner: Rc<RefCell<BTreeMap<String, BucketEnvelope>>>,
}

impl MemoryBucketStore {
    /// Stores a raw payload without going through serialization, for seeding fixtures.
    pub fn insert_raw(&self, namespace: &str, schema_version: u32, payload: Value) {
        self.inner.borrow_mut().insert(
            namespace.to_string(),
            BucketEnvelope::new(namespace, schema_version, payload),
        );
    }
}

impl BucketStore for MemoryBucketStore {
    fn load_envelope<'a>(
        &'a self,
        namespace: &'a str,
    ) -> BucketStoreFuture<'a, Result<Option<BucketEnvelope>, String>> {
        Box::pin(async move { Ok(self.inner.borrow().get(namespace).cloned()) })
    }

    fn save_envelope<'a>(
        &'a self,
        envelope: &'a BucketEnvelope,
    ) -> BucketStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner
                .borrow_mut()
                .insert(envelope.namespace.clone(), envelope.clone());
            Ok(())
        })
    }

    fn delete_bucket<'a>(
        &'a self,
        namespace: &'a str,
    ) -> BucketStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().remove(namespace);
            Ok(())
        })
    }

    fn list_namespaces<'a>(&'a self) -> BucketStoreFuture<'a, Result<Vec<String>, String>> {
        Box::pin(async move { Ok(self.inner.borrow().keys().cloned().collect()) })
    }
}

/// Serializes `document` into a freshly stamped [`BucketEnvelope`].
///
/// # Errors
///
/// Returns an error when `document` cannot be converted to JSON.
pub fn build_bucket_envelope<T: Serialize>(
    namespace: &str,
    schema_version: u32,
    document: &T,
) -> Result<BucketEnvelope, String> {
    let payload = serde_json::to_value(document).map_err(|e| e.to_string())?;
    Ok(BucketEnvelope::new(namespace, schema_version, payload))
}

/// Decodes an envelope payload into its document type.
///
/// # Errors
///
/// Returns an error when the payload does not match `T`.
pub fn decode_bucket_payload<T: DeserializeOwned>(envelope: &BucketEnvelope) -> Result<T, String> {
    serde_json::from_value(envelope.payload.clone())
        .map_err(|e| format!("bucket `{}` payload is malformed: {e}", envelope.namespace))
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Volume {
        level: u8,
    }

    #[test]
    fn envelope_serializes_with_snake_case_fields() {
        let envelope = BucketEnvelope {
            envelope_version: BUCKET_ENVELOPE_VERSION,
            namespace: "system.settings".to_string(),
            schema_version: 3,
            updated_at_unix_ms: 99,
            payload: json!({"level": 40}),
        };

        let value = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(
            value,
            json!({
                "envelope_version": 1,
                "namespace": "system.settings",
                "schema_version": 3,
                "updated_at_unix_ms": 99,
                "payload": {"level": 40},
            })
        );
    }

    #[test]
    fn fresh_envelopes_get_increasing_timestamps() {
        let first = BucketEnvelope::new("a", 1, json!(null));
        let second = BucketEnvelope::new("a", 1, json!(null));
        assert!(second.updated_at_unix_ms > first.updated_at_unix_ms);
    }

    #[test]
    fn decode_reports_namespace_on_mismatch() {
        let envelope = BucketEnvelope::new("system.sound", 1, json!({"level": "loud"}));
        let err = decode_bucket_payload::<Volume>(&envelope).expect_err("mismatch");
        assert!(err.contains("system.sound"), "{err}");

        let ok = BucketEnvelope::new("system.sound", 1, json!({"level": 7}));
        assert_eq!(decode_bucket_payload::<Volume>(&ok), Ok(Volume { level: 7 }));
    }

    #[test]
    fn memory_store_replaces_whole_documents() {
        let store = MemoryBucketStore::default();
        let store_obj: &dyn BucketStore = &store;

        let first = build_bucket_envelope("b.one", 1, &json!({"a": 1, "b": 2})).expect("build");
        let second = build_bucket_envelope("b.one", 1, &json!({"a": 5})).expect("build");
        block_on(store_obj.save_envelope(&first)).expect("save");
        block_on(store_obj.save_envelope(&second)).expect("overwrite");
        store.insert_raw("a.zero", 1, json!([]));

        let loaded = block_on(store_obj.load_envelope("b.one"))
            .expect("load")
            .expect("present");
        assert_eq!(loaded.payload, json!({"a": 5}));
        assert_eq!(
            block_on(store_obj.list_namespaces()).expect("list"),
            vec!["a.zero".to_string(), "b.one".to_string()]
        );

        block_on(store_obj.delete_bucket("b.one")).expect("delete");
        block_on(store_obj.delete_bucket("b.one")).expect("delete missing");
        assert_eq!(block_on(store_obj.load_envelope("b.one")).expect("load"), None);
    }

    #[test]
    fn noop_store_holds_nothing() {
        let store_obj: &dyn BucketStore = &NoopBucketStore;
        let envelope = BucketEnvelope::new("x", 1, json!({}));
        block_on(store_obj.save_envelope(&envelope)).expect("save");
        assert_eq!(block_on(store_obj.load_envelope("x")).expect("load"), None);
        assert!(block_on(store_obj.list_namespaces()).expect("list").is_empty());
    }
}
