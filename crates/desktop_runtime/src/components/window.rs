use super::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use super::app_panes::AppPane;

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

/// Primary-button presses only; secondary touches and right clicks never start a gesture.
fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

#[component]
pub(super) fn DesktopWindow(app_id: AppId) -> impl IntoView {
    let runtime = use_desktop_runtime();

    let window = Signal::derive(move || runtime.state.get().window(app_id).cloned());
    let is_front = Signal::derive(move || runtime.state.get().front_app() == Some(app_id));

    let raise = move |_| {
        if !is_front.get_untracked() {
            runtime.dispatch_action(DesktopAction::BringToFront { app_id });
        }
    };
    let begin_drag = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginDrag {
            app_id,
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let titlebar_double_click = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        runtime.dispatch_action(DesktopAction::ToggleMaximize { app_id });
    };

    let style = move || {
        window
            .get()
            .map(|win| {
                format!(
                    "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
                    win.rect.x, win.rect.y, win.rect.w, win.rect.h, win.z_index
                )
            })
            .unwrap_or_default()
    };
    let minimized = move || window.get().is_some_and(|win| win.minimized);
    let maximized = move || window.get().is_some_and(|win| win.maximized);

    view! {
        <Show when=move || window.get().is_some() fallback=|| ()>
            <section
                class="desktop-window"
                class:focused=move || is_front.get()
                class:minimized=minimized
                class:maximized=maximized
                style=style
                on:pointerdown=raise
                role="dialog"
                aria-label=app_id.title()
                data-app=app_id.key()
            >
                <header
                    class="titlebar"
                    on:pointerdown=begin_drag
                    on:dblclick=titlebar_double_click
                >
                    <div class="traffic-lights">
                        <button
                            class="traffic-light close"
                            aria-label="Close window"
                            on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                            on:click=move |ev| {
                                stop_mouse_event(&ev);
                                runtime.dispatch_action(DesktopAction::CloseApp { app_id });
                            }
                        />
                        <button
                            class="traffic-light minimize"
                            aria-label="Minimize window"
                            on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                            on:click=move |ev| {
                                stop_mouse_event(&ev);
                                runtime.dispatch_action(DesktopAction::MinimizeApp { app_id });
                            }
                        />
                        <button
                            class="traffic-light zoom"
                            aria-label=move || {
                                if maximized() { "Restore window" } else { "Maximize window" }
                            }
                            on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                            on:click=move |ev| {
                                stop_mouse_event(&ev);
                                runtime.dispatch_action(DesktopAction::ToggleMaximize { app_id });
                            }
                        />
                    </div>
                    <span class="titlebar-title">{app_id.title()}</span>
                </header>
                <div class="window-body">
                    <AppPane app_id=app_id />
                </div>
                <Show when=move || !maximized() fallback=|| ()>
                    <WindowResizeHandle app_id=app_id edge=ResizeEdge::North />
                    <WindowResizeHandle app_id=app_id edge=ResizeEdge::South />
                    <WindowResizeHandle app_id=app_id edge=ResizeEdge::East />
                    <WindowResizeHandle app_id=app_id edge=ResizeEdge::West />
                    <WindowResizeHandle app_id=app_id edge=ResizeEdge::NorthEast />
                    <WindowResizeHandle app_id=app_id edge=ResizeEdge::NorthWest />
                    <WindowResizeHandle app_id=app_id edge=ResizeEdge::SouthEast />
                    <WindowResizeHandle app_id=app_id edge=ResizeEdge::SouthWest />
                </Show>
            </section>
        </Show>
    }
}

#[component]
fn WindowResizeHandle(app_id: AppId, edge: ResizeEdge) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let class_name = format!("window-resize-handle {}", resize_edge_class(edge));

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginResize {
            app_id,
            edge,
            pointer: pointer_from_pointer_event(&ev),
        });
    };

    view! {
        <div
            class=class_name
            aria-hidden="true"
            on:pointerdown=on_pointerdown
        />
    }
}
