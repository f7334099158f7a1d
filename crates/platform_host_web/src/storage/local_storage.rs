//! `localStorage`-backed bucket store.
//!
//! Each bucket occupies one storage entry, `macdesk.bucket.<namespace>`, holding the whole
//! [`BucketEnvelope`] as JSON. The browser API is synchronous; the async [`BucketStore`] surface
//! is a thin wrapper so the runtime can swap in other hosts.

use platform_host::{BucketEnvelope, BucketStore, BucketStoreFuture};

/// Storage key prefix shared by every bucket entry.
pub const BUCKET_KEY_PREFIX: &str = "macdesk.bucket.";

/// Returns the `localStorage` key used for `namespace`.
pub fn bucket_storage_key(namespace: &str) -> String {
    format!("{BUCKET_KEY_PREFIX}{namespace}")
}

/// Recovers the namespace from a `localStorage` key, if it belongs to a bucket.
pub fn namespace_from_storage_key(key: &str) -> Option<&str> {
    key.strip_prefix(BUCKET_KEY_PREFIX)
        .filter(|namespace| !namespace.is_empty())
}

#[derive(Debug, Clone, Copy, Default)]
/// Browser bucket store backed by `window.localStorage`.
pub struct WebBucketStore;

impl WebBucketStore {
    /// Reads the raw envelope JSON for `namespace`.
    pub fn load_raw(self, namespace: &str) -> Result<Option<String>, String> {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(storage) = local_storage() else {
                return Ok(None);
            };
            storage
                .get_item(&bucket_storage_key(namespace))
                .map_err(|e| format!("localStorage get_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = namespace;
            Ok(None)
        }
    }

    /// Writes raw envelope JSON for `namespace`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the write fails (for example when
    /// the origin's quota is exhausted).
    pub fn save_raw(self, namespace: &str, raw_json: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = local_storage().ok_or_else(|| "localStorage unavailable".to_string())?;
            storage
                .set_item(&bucket_storage_key(namespace), raw_json)
                .map_err(|e| format!("localStorage set_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (namespace, raw_json);
            Ok(())
        }
    }

    /// Removes the entry for `namespace`.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the delete fails.
    pub fn delete_raw(self, namespace: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = local_storage().ok_or_else(|| "localStorage unavailable".to_string())?;
            storage
                .remove_item(&bucket_storage_key(namespace))
                .map_err(|e| format!("localStorage remove_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = namespace;
            Ok(())
        }
    }

    /// Lists bucket namespaces present in localStorage, sorted.
    pub fn namespaces(self) -> Result<Vec<String>, String> {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(storage) = local_storage() else {
                return Ok(Vec::new());
            };
            let len = storage
                .length()
                .map_err(|e| format!("localStorage length failed: {e:?}"))?;
            let mut namespaces = Vec::new();
            for index in 0..len {
                let key = storage
                    .key(index)
                    .map_err(|e| format!("localStorage key failed: {e:?}"))?;
                if let Some(namespace) = key.as_deref().and_then(namespace_from_storage_key) {
                    namespaces.push(namespace.to_string());
                }
            }
            namespaces.sort();
            Ok(namespaces)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Ok(Vec::new())
        }
    }
}

impl BucketStore for WebBucketStore {
    fn load_envelope<'a>(
        &'a self,
        namespace: &'a str,
    ) -> BucketStoreFuture<'a, Result<Option<BucketEnvelope>, String>> {
        let store = *self;
        Box::pin(async move {
            let Some(raw) = store.load_raw(namespace)? else {
                return Ok(None);
            };
            serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| format!("bucket `{namespace}` is not a valid envelope: {e}"))
        })
    }

    fn save_envelope<'a>(
        &'a self,
        envelope: &'a BucketEnvelope,
    ) -> BucketStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move {
            let raw = serde_json::to_string(envelope).map_err(|e| e.to_string())?;
            store.save_raw(&envelope.namespace, &raw)
        })
    }

    fn delete_bucket<'a>(
        &'a self,
        namespace: &'a str,
    ) -> BucketStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move { store.delete_raw(namespace) })
    }

    fn list_namespaces<'a>(&'a self) -> BucketStoreFuture<'a, Result<Vec<String>, String>> {
        let store = *self;
        Box::pin(async move { store.namespaces() })
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}
