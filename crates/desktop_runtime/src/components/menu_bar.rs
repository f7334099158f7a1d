use std::time::Duration;

use leptos::leptos_dom::helpers::set_interval_with_handle;

use super::*;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClockSnapshot {
    weekday: u32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
}

impl ClockSnapshot {
    fn now() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let date = js_sys::Date::new_0();
            return Self {
                weekday: date.get_day(),
                month: date.get_month(),
                day: date.get_date(),
                hour: date.get_hours(),
                minute: date.get_minutes(),
            };
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Self {
                weekday: 4,
                month: 0,
                day: 1,
                hour: 0,
                minute: 0,
            }
        }
    }

    /// `Thu Jan 1  9:05 AM`
    fn label(self) -> String {
        let weekday = WEEKDAYS[(self.weekday % 7) as usize];
        let month = MONTHS[(self.month % 12) as usize];
        let meridiem = if self.hour < 12 { "AM" } else { "PM" };
        let hour = match self.hour % 12 {
            0 => 12,
            h => h,
        };
        format!(
            "{weekday} {month} {}  {hour}:{:02} {meridiem}",
            self.day, self.minute
        )
    }
}

#[component]
pub(super) fn MenuBar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let apple_menu_open = create_rw_signal(false);
    let clock = create_rw_signal(ClockSnapshot::now());

    if let Ok(interval) =
        set_interval_with_handle(move || clock.set(ClockSnapshot::now()), Duration::from_secs(15))
    {
        on_cleanup(move || interval.clear());
    }

    let outside_click_listener = window_event_listener(ev::mousedown, move |_| {
        if apple_menu_open.get_untracked() {
            apple_menu_open.set(false);
        }
    });
    on_cleanup(move || outside_click_listener.remove());

    let front_title = move || {
        state
            .get()
            .front_app()
            .map(|app_id| app_id.title())
            .unwrap_or("Finder")
    };
    let menu_action = move |action: DesktopAction| {
        apple_menu_open.set(false);
        runtime.dispatch_action(action);
    };

    view! {
        <header class="menu-bar" role="menubar">
            <div class="menu-bar-leading">
                <button
                    class="menu-bar-apple"
                    aria-label="Apple menu"
                    aria-haspopup="menu"
                    aria-expanded=move || apple_menu_open.get().to_string()
                    on:mousedown=move |ev| ev.stop_propagation()
                    on:click=move |_| apple_menu_open.update(|open| *open = !*open)
                >
                    <span class="menu-bar-glyph" data-icon="apple" aria-hidden="true"></span>
                </button>
                <span class="menu-bar-app-title">{front_title}</span>
            </div>

            <Show when=move || apple_menu_open.get() fallback=|| ()>
                <ul class="apple-menu" role="menu" on:mousedown=move |ev| ev.stop_propagation()>
                    <li class="apple-menu-caption">
                        {move || format!("macOS {}", state.get().settings.version)}
                    </li>
                    <li>
                        <button
                            role="menuitem"
                            on:click=move |_| {
                                menu_action(DesktopAction::OpenApp {
                                    app_id: AppId::SystemPreferences,
                                })
                            }
                        >
                            "System Preferences…"
                        </button>
                    </li>
                    <li class="apple-menu-separator" role="separator"></li>
                    <li>
                        <button role="menuitem" on:click=move |_| menu_action(DesktopAction::Sleep)>
                            "Sleep"
                        </button>
                    </li>
                    <li>
                        <button role="menuitem" on:click=move |_| menu_action(DesktopAction::Restart)>
                            "Restart…"
                        </button>
                    </li>
                    <li>
                        <button role="menuitem" on:click=move |_| menu_action(DesktopAction::Shutdown)>
                            "Shut Down…"
                        </button>
                    </li>
                    <li class="apple-menu-separator" role="separator"></li>
                    <li>
                        <button role="menuitem" on:click=move |_| menu_action(DesktopAction::Lock)>
                            "Lock Screen"
                        </button>
                    </li>
                </ul>
            </Show>

            <div class="menu-bar-trailing">
                <button
                    class="menu-bar-spotlight"
                    aria-label="Spotlight"
                    on:mousedown=move |ev| ev.stop_propagation()
                    on:click=move |_| runtime.dispatch_action(DesktopAction::ToggleSpotlight)
                >
                    <span class="menu-bar-glyph" data-icon="search" aria-hidden="true"></span>
                </button>
                <span class="menu-bar-user">{move || state.get().profile.display_name}</span>
                <time class="menu-bar-clock">{move || clock.get().label()}</time>
            </div>
        </header>
    }
}
