use std::rc::Rc;

use leptos::{create_effect, logging, spawn_local, Callable, Callback};
use platform_host::BucketStore;

use crate::{
    buckets::{NotificationLog, RunningAppsDocument, SystemSettings, TerminalHistory, UserProfile},
    host::DesktopHostContext,
    persistence,
    reducer::DesktopAction,
};

pub(super) fn install_boot_hydration(host: DesktopHostContext, dispatch: Callback<DesktopAction>) {
    create_effect(move |_| {
        let store = host.bucket_store();
        let strategy = host.host_strategy_name();
        spawn_local(async move {
            logging::log!("desktop boot: hydrating buckets from `{strategy}` host");
            hydrate_documents(store.clone(), dispatch).await;

            let document: RunningAppsDocument = persistence::load_bucket(store.as_ref()).await;
            let (_, unknown) = document.resolve();
            for key in unknown {
                logging::warn!("skipping unknown running app `{key}`");
            }
            dispatch.call(DesktopAction::HydrateRunningApps { document });
        });
    });
}

/// Reloads every document the live desktop mirrors. The running-apps document is boot-only.
pub(super) async fn hydrate_documents(store: Rc<dyn BucketStore>, dispatch: Callback<DesktopAction>) {
    let settings: SystemSettings = persistence::load_bucket(store.as_ref()).await;
    dispatch.call(DesktopAction::HydrateSettings { settings });

    let profile: UserProfile = persistence::load_bucket(store.as_ref()).await;
    dispatch.call(DesktopAction::HydrateProfile { profile });

    let log: NotificationLog = persistence::load_bucket(store.as_ref()).await;
    dispatch.call(DesktopAction::HydrateNotifications { log });

    let history: TerminalHistory = persistence::load_bucket(store.as_ref()).await;
    dispatch.call(DesktopAction::HydrateTerminalHistory { history });
}
