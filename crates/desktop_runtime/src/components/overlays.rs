use super::*;

#[component]
pub(super) fn SpotlightOverlay() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let query_input = create_node_ref::<html::Input>();

    let open = move || state.get().overlays.spotlight_open;
    let query = move || state.get().overlays.spotlight_query;
    let results = move || apps::search_apps(&query());

    create_effect(move |_| {
        if open() {
            if let Some(input) = query_input.get() {
                let _ = input.focus();
            }
        }
    });

    let launch = move |app_id: AppId| {
        runtime.dispatch_action(DesktopAction::DismissOverlays);
        runtime.dispatch_action(DesktopAction::OpenApp { app_id });
    };
    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if let Some(first) = results().first().copied() {
            launch(first);
        }
    };

    view! {
        <Show when=open fallback=|| ()>
            <div
                class="spotlight"
                role="dialog"
                aria-label="Spotlight Search"
                on:mousedown=move |ev| ev.stop_propagation()
            >
                <form class="spotlight-form" on:submit=on_submit>
                    <input
                        node_ref=query_input
                        class="spotlight-input"
                        type="search"
                        placeholder="Spotlight Search"
                        prop:value=query
                        on:input=move |ev| {
                            runtime.dispatch_action(DesktopAction::SetSpotlightQuery {
                                query: event_target_value(&ev),
                            });
                        }
                    />
                </form>
                <ul class="spotlight-results" role="listbox">
                    <For each=results key=|app_id| *app_id let:app_id>
                        <li role="option">
                            <button
                                class="spotlight-result"
                                data-icon=app_id.icon_id()
                                on:click=move |_| launch(app_id)
                            >
                                {app_id.title()}
                            </button>
                        </li>
                    </For>
                </ul>
            </div>
        </Show>
    }
}

#[component]
pub(super) fn MissionControlOverlay() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let open = move || state.get().overlays.mission_control_open;
    let tiles = move || {
        state
            .get()
            .stacked_windows()
            .into_iter()
            .map(|win| (win.app_id, win.minimized))
            .collect::<Vec<_>>()
    };

    view! {
        <Show when=open fallback=|| ()>
            <div
                class="mission-control"
                role="dialog"
                aria-label="Mission Control"
                on:mousedown=move |_| runtime.dispatch_action(DesktopAction::DismissOverlays)
            >
                <Show
                    when=move || !tiles().is_empty()
                    fallback=|| view! { <p class="mission-control-empty">"No open windows"</p> }
                >
                    <ul class="mission-control-grid">
                        <For each=tiles key=|(app_id, _)| *app_id let:tile>
                            {{
                                let (app_id, minimized) = tile;
                                view! {
                                    <li>
                                        <button
                                            class="mission-control-tile"
                                            class:minimized=minimized
                                            data-icon=app_id.icon_id()
                                            on:mousedown=move |ev| ev.stop_propagation()
                                            on:click=move |_| {
                                                runtime.dispatch_action(DesktopAction::DismissOverlays);
                                                runtime.dispatch_action(DesktopAction::BringToFront { app_id });
                                            }
                                        >
                                            <span class="mission-control-title">{app_id.title()}</span>
                                        </button>
                                    </li>
                                }
                            }}
                        </For>
                    </ul>
                </Show>
            </div>
        </Show>
    }
}

#[component]
pub(super) fn LaunchpadOverlay() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    view! {
        <Show when=move || state.get().overlays.launchpad_open fallback=|| ()>
            <div
                class="launchpad"
                role="dialog"
                aria-label="Launchpad"
                on:mousedown=move |_| runtime.dispatch_action(DesktopAction::DismissOverlays)
            >
                <ul class="launchpad-grid">
                    {apps::app_registry()
                        .iter()
                        .map(|app| {
                            let app_id = app.app_id;
                            view! {
                                <li>
                                    <button
                                        class="launchpad-app"
                                        data-icon=app_id.icon_id()
                                        on:mousedown=move |ev| ev.stop_propagation()
                                        on:click=move |_| {
                                            runtime.dispatch_action(DesktopAction::DismissOverlays);
                                            runtime.dispatch_action(DesktopAction::OpenApp { app_id });
                                        }
                                    >
                                        <span class="launchpad-icon" aria-hidden="true"></span>
                                        <span class="launchpad-label">{app.dock_label}</span>
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </div>
        </Show>
    }
}

/// Transient banner for the most recent notification. The reducer clears it when its dismiss
/// task fires.
#[component]
pub(super) fn NotificationBanner() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let banner = move || state.get().banner;

    view! {
        {move || {
            banner()
                .map(|record| {
                    view! {
                        <aside class="notification-banner" role="status" aria-live="polite">
                            <div class="notification-banner-text">
                                <strong class="notification-banner-title">{record.title}</strong>
                                <p class="notification-banner-body">{record.body}</p>
                            </div>
                            <button
                                class="notification-banner-close"
                                aria-label="Dismiss notification"
                                on:click=move |_| runtime.dispatch_action(DesktopAction::DismissBanner)
                            >
                                "×"
                            </button>
                        </aside>
                    }
                })
        }}
    }
}
