//! Desktop shell UI composition and interaction surfaces.

mod app_panes;
mod dock;
mod lock_screen;
mod menu_bar;
mod overlays;
mod window;

use leptos::*;

use self::{
    dock::Dock,
    lock_screen::{LockScreen, PowerOffScreen, PowerTransitionScreen},
    menu_bar::MenuBar,
    overlays::{LaunchpadOverlay, MissionControlOverlay, NotificationBanner, SpotlightOverlay},
    window::DesktopWindow,
};

use crate::{
    apps,
    model::{AppId, PointerPosition, PowerState, ResizeEdge},
    reducer::DesktopAction,
    shortcuts::{resolve_shortcut, KeyChord},
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

#[component]
/// Renders the desktop: menu bar, desktop icons, windows, dock, overlays and the lock screen.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    sync_viewport(runtime);
    let resize_listener = window_event_listener(ev::resize, move |_| sync_viewport(runtime));
    on_cleanup(move || resize_listener.remove());

    let shortcut_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.default_prevented() || ev.repeat() {
            return;
        }
        let locked = state.get_untracked().session.locked;
        if let Some(command) = resolve_shortcut(&key_chord_from_event(&ev), locked) {
            ev.prevent_default();
            ev.stop_propagation();
            runtime.dispatch_action(DesktopAction::Shortcut(command));
        }
    });
    on_cleanup(move || shortcut_listener.remove());

    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        let pointer = pointer_from_pointer_event(&ev);
        let interaction = runtime.interaction.get_untracked();

        if interaction.dragging.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateDrag { pointer });
        }
        if interaction.resizing.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateResize { pointer });
        }
    };
    let on_pointer_end = move |_| end_active_pointer_interaction(runtime);

    let locked = move || state.get().session.locked;
    let desktop_icons = move || apps::desktop_icon_apps().collect::<Vec<_>>();
    let powered_off = move || state.get().session.power == PowerState::Off;
    let transitioning = move || {
        matches!(
            state.get().session.power,
            PowerState::ShuttingDown | PowerState::Restarting
        )
    };

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            tabindex="-1"
            data-appearance=move || {
                if state.get().settings.appearance == crate::buckets::Appearance::Dark {
                    "dark"
                } else {
                    "light"
                }
            }
            data-wallpaper=move || state.get().settings.wallpaper_id
            data-reduced-motion=move || state.get().settings.reduced_motion.to_string()
            style=move || format!("--accent-color:{};", state.get().settings.accent_color)
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_end
            on:pointercancel=on_pointer_end
        >
            <MenuBar />
            <div
                class="desktop-surface"
                on:mousedown=move |_| {
                    if state.get_untracked().overlays.any_open() {
                        runtime.dispatch_action(DesktopAction::DismissOverlays);
                    }
                }
            >
                <ul class="desktop-icons">
                    <For each=desktop_icons key=|app| app.app_id let:app>
                        {{
                            let app_id = app.app_id;
                            view! {
                                <li>
                                    <button
                                        class="desktop-icon"
                                        data-icon=app_id.icon_id()
                                        on:dblclick=move |_| {
                                            runtime.dispatch_action(DesktopAction::OpenApp { app_id });
                                        }
                                    >
                                        <span class="desktop-icon-image" aria-hidden="true"></span>
                                        <span class="desktop-icon-label">{app.dock_label}</span>
                                    </button>
                                </li>
                            }
                        }}
                    </For>
                </ul>

                <div class="window-layer">
                    <For each=move || state.get().windows key=|win| win.app_id let:win>
                        <DesktopWindow app_id=win.app_id />
                    </For>
                </div>
            </div>

            <Dock />
            <NotificationBanner />
            <SpotlightOverlay />
            <MissionControlOverlay />
            <LaunchpadOverlay />

            <Show when=locked fallback=|| ()>
                <LockScreen />
            </Show>
            <Show when=transitioning fallback=|| ()>
                <PowerTransitionScreen />
            </Show>
            <Show when=powered_off fallback=|| ()>
                <PowerOffScreen />
            </Show>
        </div>
    }
}

fn sync_viewport(runtime: DesktopRuntimeContext) {
    let win = window();
    let width = win.inner_width().ok().and_then(|v| v.as_f64());
    let height = win.inner_height().ok().and_then(|v| v.as_f64());
    if let (Some(width), Some(height)) = (width, height) {
        runtime.dispatch_action(DesktopAction::SetViewport {
            width: width as i32,
            height: height as i32,
        });
    }
}

fn key_chord_from_event(ev: &web_sys::KeyboardEvent) -> KeyChord {
    KeyChord {
        key: ev.key(),
        ctrl: ev.ctrl_key(),
        meta: ev.meta_key(),
        alt: ev.alt_key(),
        shift: ev.shift_key(),
    }
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

fn end_active_pointer_interaction(runtime: DesktopRuntimeContext) {
    let interaction = runtime.interaction.get_untracked();
    if interaction.dragging.is_some() {
        runtime.dispatch_action(DesktopAction::EndDrag);
    }
    if interaction.resizing.is_some() {
        runtime.dispatch_action(DesktopAction::EndResize);
    }
}

fn resize_edge_class(edge: ResizeEdge) -> &'static str {
    match edge {
        ResizeEdge::North => "edge-n",
        ResizeEdge::South => "edge-s",
        ResizeEdge::East => "edge-e",
        ResizeEdge::West => "edge-w",
        ResizeEdge::NorthEast => "edge-ne",
        ResizeEdge::NorthWest => "edge-nw",
        ResizeEdge::SouthEast => "edge-se",
        ResizeEdge::SouthWest => "edge-sw",
    }
}
