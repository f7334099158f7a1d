use super::*;
use crate::{model::SleepState, session::masked_password};

#[component]
pub(super) fn LockScreen() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let password_input = create_node_ref::<html::Input>();

    let asleep = move || state.get().session.sleep == SleepState::Asleep;
    let failed = move || state.get().session.last_attempt_failed;
    let biometric_pending = move || state.get().session.biometric_pending;
    let password = move || state.get().session.password_input;

    create_effect(move |_| {
        if !asleep() {
            if let Some(input) = password_input.get() {
                let _ = input.focus();
            }
        }
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        runtime.dispatch_action(DesktopAction::SubmitPassword);
    };

    view! {
        <div
            class="lock-screen"
            class:asleep=asleep
            role="dialog"
            aria-modal="true"
            aria-label="Login"
            on:pointerdown=move |_| {
                if asleep() {
                    runtime.dispatch_action(DesktopAction::Wake);
                }
            }
        >
            <div class="lock-screen-card" class:shake=failed>
                <div
                    class="lock-screen-avatar"
                    data-avatar=move || state.get().profile.avatar
                    aria-hidden="true"
                ></div>
                <p class="lock-screen-name">{move || state.get().profile.display_name}</p>
                <form class="lock-screen-form" on:submit=on_submit>
                    <input
                        node_ref=password_input
                        class="lock-screen-password"
                        type="password"
                        placeholder="Enter Password"
                        autocomplete="current-password"
                        aria-invalid=move || failed().to_string()
                        prop:value=password
                        disabled=biometric_pending
                        on:input=move |ev| {
                            runtime.dispatch_action(DesktopAction::SetPasswordInput {
                                text: event_target_value(&ev),
                            });
                        }
                    />
                    <button class="lock-screen-submit" type="submit" aria-label="Unlock">
                        <span aria-hidden="true">"→"</span>
                    </button>
                </form>
                <p class="lock-screen-hint" aria-live="polite">
                    {move || {
                        if biometric_pending() {
                            "Reading fingerprint…".to_string()
                        } else if failed() {
                            "Incorrect password. Try again.".to_string()
                        } else if password().is_empty() {
                            "Press Enter to unlock".to_string()
                        } else {
                            masked_password(&password())
                        }
                    }}
                </p>
                <button
                    class="lock-screen-biometric"
                    type="button"
                    aria-label="Unlock with Touch ID"
                    disabled=biometric_pending
                    on:click=move |_| runtime.dispatch_action(DesktopAction::BeginBiometricUnlock)
                >
                    <span class="lock-screen-glyph" data-icon="fingerprint" aria-hidden="true"></span>
                </button>
            </div>
        </div>
    }
}

#[component]
pub(super) fn PowerOffScreen() -> impl IntoView {
    let runtime = use_desktop_runtime();

    view! {
        <div class="power-off-screen" role="dialog" aria-modal="true" aria-label="Powered off">
            <button
                class="power-button"
                aria-label="Power on"
                on:click=move |_| runtime.dispatch_action(DesktopAction::PowerOn)
            >
                <span class="power-glyph" data-icon="power" aria-hidden="true"></span>
            </button>
        </div>
    }
}

#[component]
pub(super) fn PowerTransitionScreen() -> impl IntoView {
    let state = use_desktop_runtime().state;
    let caption = move || match state.get().session.power {
        PowerState::Restarting => "Restarting…",
        _ => "Shutting down…",
    };

    view! {
        <div class="power-transition-screen" role="status" aria-live="polite">
            <span class="power-transition-spinner" aria-hidden="true"></span>
            <p class="power-transition-caption">{caption}</p>
        </div>
    }
}
