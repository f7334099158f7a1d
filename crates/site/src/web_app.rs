use desktop_runtime::{AppId, DesktopAction, DesktopProvider, DesktopShell};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use platform_host_web::build_host_services;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="macOS" />
        <Meta name="description" content="A macOS-style desktop that runs in the browser." />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=DesktopEntry />
                    <Route path="/*any" view=DesktopEntry />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    view! {
        <DesktopProvider host_services=build_host_services()>
            <DeepLinkLauncher />
            <DesktopShell />
        </DesktopProvider>
    }
}

/// Opens the app named by `?open=<app>` once the session first unlocks.
#[component]
fn DeepLinkLauncher() -> impl IntoView {
    let runtime = desktop_runtime::components::use_desktop_runtime();
    let query = use_query_map();
    let target = query.with_untracked(|map| map.get("open").and_then(|key| AppId::from_key(key)));
    let launched = store_value(false);

    if let Some(app_id) = target {
        create_effect(move |_| {
            if launched.get_value() || runtime.state.get().session.locked {
                return;
            }
            launched.set_value(true);
            runtime.dispatch_action(DesktopAction::OpenApp { app_id });
        });
    } else if let Some(key) = query.with_untracked(|map| map.get("open").cloned()) {
        logging::warn!("ignoring deep link to unknown app `{key}`");
    }
}
