use leptos::{logging, spawn_local, SignalGetUntracked};

use crate::{
    buckets::Bucket, host::DesktopHostContext, persistence,
    runtime_context::DesktopRuntimeContext,
};

fn save_in_background<B: Bucket>(host: DesktopHostContext, document: B) {
    let store = host.bucket_store();
    spawn_local(async move {
        if let Err(err) = persistence::save_bucket(store.as_ref(), &document).await {
            logging::warn!("persist `{}` failed: {err}", B::NAMESPACE);
        }
    });
}

pub(super) fn persist_running_apps(host: DesktopHostContext, runtime: DesktopRuntimeContext) {
    let document = persistence::running_apps_document(&runtime.state.get_untracked());
    save_in_background(host, document);
}

pub(super) fn persist_settings(host: DesktopHostContext, runtime: DesktopRuntimeContext) {
    save_in_background(host, runtime.state.get_untracked().settings);
}

pub(super) fn persist_user_profile(host: DesktopHostContext, runtime: DesktopRuntimeContext) {
    save_in_background(host, runtime.state.get_untracked().profile);
}

pub(super) fn persist_notifications(host: DesktopHostContext, runtime: DesktopRuntimeContext) {
    save_in_background(host, runtime.state.get_untracked().notifications);
}

pub(super) fn persist_terminal_history(host: DesktopHostContext, runtime: DesktopRuntimeContext) {
    save_in_background(host, runtime.state.get_untracked().terminal_history);
}
