use super::*;

#[component]
pub(super) fn Dock() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let dock_entries = move || apps::dock_apps().collect::<Vec<_>>();

    view! {
        <nav class="dock" aria-label="Dock">
            <ul class="dock-items">
                <For each=dock_entries key=|app| app.app_id let:app>
                    {{
                        let app_id = app.app_id;
                        let running = move || state.get().dock_indicator(app_id);
                        let minimized = move || {
                            state.get().window(app_id).is_some_and(|win| win.minimized)
                        };
                        view! {
                            <li class="dock-item" class:running=running class:minimized=minimized>
                                <button
                                    class="dock-button"
                                    data-icon=app_id.icon_id()
                                    aria-label=app.dock_label
                                    title=app.dock_label
                                    on:click=move |_| {
                                        runtime.dispatch_action(DesktopAction::OpenApp { app_id });
                                    }
                                >
                                    <span class="dock-icon" aria-hidden="true"></span>
                                </button>
                                <span class="dock-indicator" aria-hidden="true"></span>
                            </li>
                        }
                    }}
                </For>
                <li class="dock-separator" role="separator"></li>
                <li class="dock-item">
                    <button
                        class="dock-button"
                        data-icon="launchpad"
                        aria-label="Launchpad"
                        title="Launchpad"
                        on:click=move |_| runtime.dispatch_action(DesktopAction::ToggleLaunchpad)
                    >
                        <span class="dock-icon" aria-hidden="true"></span>
                    </button>
                </li>
            </ul>
        </nav>
    }
}
