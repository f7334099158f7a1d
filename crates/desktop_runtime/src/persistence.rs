//! Whole-document bucket load/save plus export, import and reset of every desktop bucket.

use std::collections::BTreeMap;

use platform_host::{build_bucket_envelope, decode_bucket_payload, BucketEnvelope, BucketStore};

use crate::{
    buckets::{validate_bucket_payload, Bucket, RunningAppsDocument, KNOWN_NAMESPACES},
    model::DesktopState,
};

/// Loads `B`, distinguishing "absent" (`Ok(None)`) from "unreadable" (`Err`).
pub async fn try_load_bucket<S, B>(store: &S) -> Result<Option<B>, String>
where
    S: BucketStore + ?Sized,
    B: Bucket,
{
    let Some(envelope) = store.load_envelope(B::NAMESPACE).await? else {
        return Ok(None);
    };
    if envelope.schema_version != B::SCHEMA_VERSION {
        leptos::logging::warn!(
            "bucket `{}` has schema {} (expected {}); decoding as-is",
            B::NAMESPACE,
            envelope.schema_version,
            B::SCHEMA_VERSION
        );
    }
    decode_bucket_payload(&envelope).map(Some)
}

/// Loads `B`, falling back to its default when the bucket is missing or unreadable.
///
/// An unreadable document is logged and left in place; it is only replaced by the next save.
pub async fn load_bucket<S, B>(store: &S) -> B
where
    S: BucketStore + ?Sized,
    B: Bucket,
{
    match try_load_bucket::<S, B>(store).await {
        Ok(document) => document.unwrap_or_default(),
        Err(err) => {
            leptos::logging::warn!("bucket `{}` load failed: {err}", B::NAMESPACE);
            B::default()
        }
    }
}

/// Replaces the stored document for `B`.
pub async fn save_bucket<S, B>(store: &S, document: &B) -> Result<(), String>
where
    S: BucketStore + ?Sized,
    B: Bucket,
{
    let envelope = build_bucket_envelope(B::NAMESPACE, B::SCHEMA_VERSION, document)?;
    store.save_envelope(&envelope).await
}

/// Read-modify-write of the whole document. Concurrent writers resolve as last write wins.
///
/// An unreadable stored document aborts the update instead of being overwritten.
pub async fn update_bucket<S, B, F>(store: &S, mutate: F) -> Result<B, String>
where
    S: BucketStore + ?Sized,
    B: Bucket,
    F: FnOnce(&mut B),
{
    let mut document = try_load_bucket::<S, B>(store).await?.unwrap_or_default();
    mutate(&mut document);
    save_bucket(store, &document).await?;
    Ok(document)
}

/// Serializes every stored desktop bucket as a `{ namespace: envelope }` JSON object.
pub async fn export_buckets<S>(store: &S) -> Result<String, String>
where
    S: BucketStore + ?Sized,
{
    let mut exported = BTreeMap::new();
    for namespace in store.list_namespaces().await? {
        if !KNOWN_NAMESPACES.contains(&namespace.as_str()) {
            continue;
        }
        if let Some(envelope) = store.load_envelope(&namespace).await? {
            exported.insert(namespace, envelope);
        }
    }
    serde_json::to_string_pretty(&exported).map_err(|e| e.to_string())
}

fn parse_import(raw: &str) -> Result<Vec<BucketEnvelope>, String> {
    let entries: BTreeMap<String, BucketEnvelope> =
        serde_json::from_str(raw).map_err(|e| format!("import is not a bucket export: {e}"))?;
    entries
        .into_iter()
        .map(|(namespace, envelope)| {
            if envelope.namespace != namespace {
                return Err(format!(
                    "entry `{namespace}` holds an envelope for `{}`",
                    envelope.namespace
                ));
            }
            validate_bucket_payload(&namespace, &envelope.payload)?;
            Ok(BucketEnvelope::new(
                namespace,
                envelope.schema_version,
                envelope.payload,
            ))
        })
        .collect()
}

/// Imports an [`export_buckets`] document.
///
/// Every entry is validated before anything is written; on any validation failure nothing is
/// written and `false` is returned. A failed write restores the buckets already replaced, so the
/// store ends up either fully imported or as it was.
pub async fn import_buckets<S>(store: &S, raw: &str) -> bool
where
    S: BucketStore + ?Sized,
{
    let envelopes = match parse_import(raw) {
        Ok(envelopes) => envelopes,
        Err(err) => {
            leptos::logging::warn!("bucket import rejected: {err}");
            return false;
        }
    };

    let mut previous = Vec::with_capacity(envelopes.len());
    for envelope in &envelopes {
        match store.load_envelope(&envelope.namespace).await {
            Ok(existing) => previous.push(existing),
            Err(err) => {
                leptos::logging::error!(
                    "bucket import snapshot `{}` failed: {err}",
                    envelope.namespace
                );
                return false;
            }
        }
    }

    for (written, envelope) in envelopes.iter().enumerate() {
        if let Err(err) = store.save_envelope(envelope).await {
            leptos::logging::error!("bucket import write `{}` failed: {err}", envelope.namespace);
            restore_envelopes(store, &envelopes[..=written], &previous).await;
            return false;
        }
    }
    true
}

async fn restore_envelopes<S>(
    store: &S,
    imported: &[BucketEnvelope],
    previous: &[Option<BucketEnvelope>],
) where
    S: BucketStore + ?Sized,
{
    for (envelope, before) in imported.iter().zip(previous).rev() {
        let restored = match before {
            Some(before) => store.save_envelope(before).await,
            None => store.delete_bucket(&envelope.namespace).await,
        };
        if let Err(err) = restored {
            leptos::logging::error!(
                "bucket import rollback `{}` failed: {err}",
                envelope.namespace
            );
        }
    }
}

/// Deletes every desktop bucket.
pub async fn reset_buckets<S>(store: &S) -> Result<(), String>
where
    S: BucketStore + ?Sized,
{
    for namespace in KNOWN_NAMESPACES {
        store.delete_bucket(namespace).await?;
    }
    Ok(())
}

/// Running-apps document derived from the tracked window list.
pub fn running_apps_document(state: &DesktopState) -> RunningAppsDocument {
    RunningAppsDocument::from_apps(
        state.stacked_windows().iter().map(|w| w.app_id),
        state.reopen_on_login,
    )
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use futures::executor::block_on;
    use platform_host::{BucketStoreFuture, MemoryBucketStore};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::{
        buckets::{MusicLibrary, SystemSettings, TerminalHistory},
        model::{AppId, WindowRecord, WindowRect},
    };

    #[test]
    fn missing_bucket_loads_default() {
        let store = MemoryBucketStore::default();
        let settings: SystemSettings = block_on(load_bucket(&store));
        assert_eq!(settings, SystemSettings::default());
    }

    #[test]
    fn malformed_bucket_loads_default_and_is_not_overwritten() {
        let store = MemoryBucketStore::default();
        store.insert_raw("system.settings", 1, json!({ "volume": "loud" }));

        let settings: SystemSettings = block_on(load_bucket(&store));
        assert_eq!(settings, SystemSettings::default());

        let raw = block_on(store.load_envelope("system.settings"))
            .expect("load")
            .expect("present");
        assert_eq!(raw.payload, json!({ "volume": "loud" }));
    }

    #[test]
    fn save_then_load_replaces_the_whole_document() {
        let store = MemoryBucketStore::default();
        let mut settings = SystemSettings::default();
        settings.volume = 15;
        settings.sound_enabled = false;
        block_on(save_bucket(&store, &settings)).expect("save");

        let loaded: SystemSettings = block_on(load_bucket(&store));
        assert_eq!(loaded, settings);
    }

    #[test]
    fn sequential_updates_are_last_write_wins() {
        let store = MemoryBucketStore::default();
        block_on(update_bucket(&store, |history: &mut TerminalHistory| {
            history.push("ls");
        }))
        .expect("first update");
        let updated = block_on(update_bucket(&store, |history: &mut TerminalHistory| {
            history.push("pwd");
        }))
        .expect("second update");

        assert_eq!(updated.commands, vec!["ls".to_string(), "pwd".to_string()]);
    }

    #[test]
    fn update_refuses_to_clobber_an_unreadable_document() {
        let store = MemoryBucketStore::default();
        store.insert_raw("app.music.library", 1, json!({ "tracks": 7 }));

        let result = block_on(update_bucket(&store, |library: &mut MusicLibrary| {
            library.toggle_favorite("night-drive");
        }));

        assert!(result.is_err());
        let raw = block_on(store.load_envelope("app.music.library"))
            .expect("load")
            .expect("present");
        assert_eq!(raw.payload, json!({ "tracks": 7 }));
    }

    #[test]
    fn export_then_import_restores_into_a_fresh_store() {
        let source = MemoryBucketStore::default();
        let mut settings = SystemSettings::default();
        settings.volume = 33;
        block_on(save_bucket(&source, &settings)).expect("save settings");
        block_on(save_bucket(&source, &TerminalHistory {
            commands: vec!["whoami".to_string()],
        }))
        .expect("save history");
        source.insert_raw("foreign.bucket", 1, json!({ "x": 1 }));

        let exported = block_on(export_buckets(&source)).expect("export");
        assert!(!exported.contains("foreign.bucket"));

        let target = MemoryBucketStore::default();
        assert!(block_on(import_buckets(&target, &exported)));
        let restored: SystemSettings = block_on(load_bucket(&target));
        assert_eq!(restored.volume, 33);
        assert_eq!(
            block_on(target.list_namespaces()).expect("list"),
            vec![
                "app.terminal.history".to_string(),
                "system.settings".to_string()
            ]
        );
    }

    #[test]
    fn malformed_import_leaves_existing_data_untouched() {
        let store = MemoryBucketStore::default();
        let mut settings = SystemSettings::default();
        settings.volume = 80;
        block_on(save_bucket(&store, &settings)).expect("save");

        let raw = json!({
            "system.settings": {
                "envelope_version": 1,
                "namespace": "system.settings",
                "schema_version": 1,
                "updated_at_unix_ms": 1,
                "payload": { "volume": 5 }
            },
            "app.music.library": {
                "envelope_version": 1,
                "namespace": "app.music.library",
                "schema_version": 1,
                "updated_at_unix_ms": 1,
                "payload": { "favorites": "everything" }
            }
        })
        .to_string();

        assert!(!block_on(import_buckets(&store, &raw)));
        assert!(!block_on(import_buckets(&store, "not json")));
        let kept: SystemSettings = block_on(load_bucket(&store));
        assert_eq!(kept.volume, 80);
        assert_eq!(
            block_on(store.list_namespaces()).expect("list"),
            vec!["system.settings".to_string()]
        );
    }

    /// Memory store whose `fail_at`-th save (1-based) fails.
    struct FailingSaveStore {
        inner: MemoryBucketStore,
        saves: Cell<usize>,
        fail_at: usize,
    }

    impl BucketStore for FailingSaveStore {
        fn load_envelope<'a>(
            &'a self,
            namespace: &'a str,
        ) -> BucketStoreFuture<'a, Result<Option<BucketEnvelope>, String>> {
            self.inner.load_envelope(namespace)
        }

        fn save_envelope<'a>(
            &'a self,
            envelope: &'a BucketEnvelope,
        ) -> BucketStoreFuture<'a, Result<(), String>> {
            let count = self.saves.get() + 1;
            self.saves.set(count);
            if count == self.fail_at {
                return Box::pin(async { Err("quota exceeded".to_string()) });
            }
            self.inner.save_envelope(envelope)
        }

        fn delete_bucket<'a>(
            &'a self,
            namespace: &'a str,
        ) -> BucketStoreFuture<'a, Result<(), String>> {
            self.inner.delete_bucket(namespace)
        }

        fn list_namespaces<'a>(&'a self) -> BucketStoreFuture<'a, Result<Vec<String>, String>> {
            self.inner.list_namespaces()
        }
    }

    #[test]
    fn failed_import_write_restores_earlier_buckets() {
        let store = FailingSaveStore {
            inner: MemoryBucketStore::default(),
            saves: Cell::new(0),
            fail_at: 3,
        };
        let mut settings = SystemSettings::default();
        settings.volume = 80;
        block_on(save_bucket(&store, &settings)).expect("seed settings");

        let raw = json!({
            "app.terminal.history": {
                "envelope_version": 1,
                "namespace": "app.terminal.history",
                "schema_version": 1,
                "updated_at_unix_ms": 1,
                "payload": { "commands": ["ls"] }
            },
            "system.settings": {
                "envelope_version": 1,
                "namespace": "system.settings",
                "schema_version": 1,
                "updated_at_unix_ms": 1,
                "payload": { "volume": 5 }
            }
        })
        .to_string();

        assert!(!block_on(import_buckets(&store, &raw)));
        let kept: SystemSettings = block_on(load_bucket(&store));
        assert_eq!(kept.volume, 80);
        assert_eq!(
            block_on(store.list_namespaces()).expect("list"),
            vec!["system.settings".to_string()]
        );
    }

    #[test]
    fn import_rejects_mismatched_namespace_entries() {
        let store = MemoryBucketStore::default();
        let raw = json!({
            "system.settings": {
                "envelope_version": 1,
                "namespace": "system.user",
                "schema_version": 1,
                "updated_at_unix_ms": 1,
                "payload": {}
            }
        })
        .to_string();
        assert!(!block_on(import_buckets(&store, &raw)));
    }

    #[test]
    fn reset_removes_every_desktop_bucket() {
        let store = MemoryBucketStore::default();
        block_on(save_bucket(&store, &SystemSettings::default())).expect("save");
        block_on(save_bucket(&store, &MusicLibrary::default())).expect("save");
        store.insert_raw("foreign.bucket", 1, json!(null));

        block_on(reset_buckets(&store)).expect("reset");

        assert_eq!(
            block_on(store.list_namespaces()).expect("list"),
            vec!["foreign.bucket".to_string()]
        );
    }

    #[test]
    fn running_apps_document_follows_stacking_order() {
        let mut state = DesktopState::default();
        let rect = WindowRect {
            x: 0,
            y: 0,
            w: 100,
            h: 100,
        };
        state.windows.push(WindowRecord::new(AppId::Safari, rect, 20));
        state.windows.push(WindowRecord::new(AppId::Terminal, rect, 15));
        state.reopen_on_login = false;

        let document = running_apps_document(&state);
        assert_eq!(
            document.apps,
            vec!["terminal".to_string(), "safari".to_string()]
        );
        assert!(!document.reopen_on_login);
    }
}
