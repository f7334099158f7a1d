//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use platform_host::Tone;
use thiserror::Error;

use crate::{
    apps::normalize_url,
    buckets::{
        NotificationLog, NotificationRecord, RunningAppsDocument, SystemSettings, TerminalHistory,
        UserProfile,
    },
    model::{
        AppId, BrowserState, DesktopState, DragSession, InteractionState, OverlayKind,
        PointerPosition, PowerState, ResizeEdge, ResizeSession, SleepState, WindowRecord,
        BANNER_DISMISS_DELAY_MS, BIOMETRIC_DELAY_MS, NAVIGATION_DELAY_MS,
        POWER_TRANSITION_DELAY_MS,
    },
    session::password_matches,
    shortcuts::ShortcutCommand,
    tasks::TaskKey,
    window_manager::{
        bottom_window, clamp_viewport, default_rect, maximized_rect, next_cascade_rect, raise_window,
        resize_rect_clamped,
    },
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open an app's window, or surface the existing one.
    OpenApp {
        /// App to open.
        app_id: AppId,
    },
    /// Close an app's window and cancel work it owns.
    CloseApp {
        /// App to close.
        app_id: AppId,
    },
    /// Hide a window into the dock. The app keeps running.
    MinimizeApp {
        /// App to minimize.
        app_id: AppId,
    },
    /// Fill the work area. Maximizing a maximized window changes nothing.
    MaximizeApp {
        /// App to maximize.
        app_id: AppId,
    },
    /// Return a window to the default geometry and make it visible.
    RestoreApp {
        /// App to restore.
        app_id: AppId,
    },
    /// Green title-bar button: maximize, or restore when already maximized.
    ToggleMaximize {
        /// App to toggle.
        app_id: AppId,
    },
    /// Raise (and unminimize) a window.
    BringToFront {
        /// App to raise.
        app_id: AppId,
    },
    /// Raise the window at the bottom of the stack.
    CycleAppSwitcher,
    /// Begin dragging a window by its title bar.
    BeginDrag {
        /// Window being dragged.
        app_id: AppId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Update an in-progress drag.
    UpdateDrag {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active drag.
    EndDrag,
    /// Begin resizing a window.
    BeginResize {
        /// Window being resized.
        app_id: AppId,
        /// Edge or corner being dragged.
        edge: ResizeEdge,
        /// Pointer position at resize start.
        pointer: PointerPosition,
    },
    /// Update an in-progress resize.
    UpdateResize {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active resize.
    EndResize,
    /// Record the browser viewport; maximized windows follow it.
    SetViewport {
        /// Viewport width in CSS pixels.
        width: i32,
        /// Viewport height in CSS pixels.
        height: i32,
    },
    /// Replace the lock-screen password field.
    SetPasswordInput {
        /// Current field text.
        text: String,
    },
    /// Submit the lock-screen password field.
    SubmitPassword,
    /// Start the simulated fingerprint read.
    BeginBiometricUnlock,
    /// Lock the session. Windows stay open behind the lock screen.
    Lock,
    /// Lock and dim the display.
    Sleep,
    /// Wake the display. The session stays locked.
    Wake,
    /// Begin powering off.
    Shutdown,
    /// Begin a restart.
    Restart,
    /// Power on from the off state.
    PowerOn,
    /// Toggle the Spotlight search overlay.
    ToggleSpotlight,
    /// Replace the Spotlight query text.
    SetSpotlightQuery {
        /// Query text.
        query: String,
    },
    /// Toggle the Mission Control overview.
    ToggleMissionControl,
    /// Toggle the Launchpad grid.
    ToggleLaunchpad,
    /// Close every overlay.
    DismissOverlays,
    /// Run a resolved keyboard shortcut.
    Shortcut(ShortcutCommand),
    /// Log a notification and show its banner.
    PostNotification {
        /// Notification title.
        title: String,
        /// Notification body.
        body: String,
        /// Posting time, stamped by the caller.
        posted_at_unix_ms: u64,
    },
    /// Hide the notification banner early.
    DismissBanner,
    /// Empty the notification log.
    ClearNotifications,
    /// Replace the system settings document.
    UpdateSettings {
        /// New settings.
        settings: SystemSettings,
    },
    /// Replace the user profile document.
    UpdateProfile {
        /// New profile.
        profile: UserProfile,
    },
    /// Choose whether running apps reopen after sign-in.
    SetReopenOnLogin {
        /// New flag.
        enabled: bool,
    },
    /// Append a command to terminal history.
    PushTerminalHistory {
        /// Command text.
        command: String,
    },
    /// Start loading a page in the browser window.
    Navigate {
        /// Address-bar input.
        url: String,
    },
    /// A scheduled task's timer elapsed.
    TaskFired {
        /// Task that fired.
        key: TaskKey,
        /// Generation the timer was armed with.
        generation: u64,
    },
    /// Apply persisted system settings at boot.
    HydrateSettings {
        /// Loaded settings.
        settings: SystemSettings,
    },
    /// Apply the persisted user profile at boot.
    HydrateProfile {
        /// Loaded profile.
        profile: UserProfile,
    },
    /// Apply the persisted notification log at boot.
    HydrateNotifications {
        /// Loaded log.
        log: NotificationLog,
    },
    /// Apply persisted terminal history at boot.
    HydrateTerminalHistory {
        /// Loaded history.
        history: TerminalHistory,
    },
    /// Queue persisted running apps for reopening after sign-in.
    HydrateRunningApps {
        /// Loaded running-apps document.
        document: RunningAppsDocument,
    },
}

impl DesktopAction {
    /// Whether the action is refused while the session is locked or powered down.
    fn requires_interactive_session(&self) -> bool {
        match self {
            Self::OpenApp { .. }
            | Self::CloseApp { .. }
            | Self::MinimizeApp { .. }
            | Self::MaximizeApp { .. }
            | Self::RestoreApp { .. }
            | Self::ToggleMaximize { .. }
            | Self::BringToFront { .. }
            | Self::CycleAppSwitcher
            | Self::BeginDrag { .. }
            | Self::BeginResize { .. }
            | Self::ToggleSpotlight
            | Self::SetSpotlightQuery { .. }
            | Self::ToggleMissionControl
            | Self::ToggleLaunchpad
            | Self::UpdateSettings { .. }
            | Self::UpdateProfile { .. }
            | Self::SetReopenOnLogin { .. }
            | Self::PushTerminalHistory { .. }
            | Self::Navigate { .. } => true,
            Self::Shortcut(command) => *command != ShortcutCommand::SubmitPassword,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the host to execute.
pub enum RuntimeEffect {
    /// Persist the running-apps document derived from the window list.
    PersistRunningApps,
    /// Persist system settings.
    PersistSettings,
    /// Persist the user profile.
    PersistUserProfile,
    /// Persist the notification log.
    PersistNotifications,
    /// Persist terminal history.
    PersistTerminalHistory,
    /// Play a UI tone at the configured volume.
    PlaySound(Tone),
    /// Deliver a host notification.
    Notify {
        /// Notification title.
        title: String,
        /// Notification body.
        body: String,
    },
    /// Arm a timer that dispatches [`DesktopAction::TaskFired`] after `delay_ms`.
    ScheduleTask {
        /// Task to fire.
        key: TaskKey,
        /// Generation to echo back.
        generation: u64,
        /// Delay in milliseconds.
        delay_ms: u32,
    },
    /// Clear the timer armed for a task, if any.
    CancelTask(TaskKey),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that cannot apply to the current state.
pub enum ReducerError {
    /// The app has no open window.
    #[error("no window is open for `{0}`")]
    WindowNotFound(AppId),
    /// The session is locked or not running.
    #[error("the session is locked")]
    SessionLocked,
}

fn window_mut(
    state: &mut DesktopState,
    app_id: AppId,
) -> Result<&mut WindowRecord, ReducerError> {
    state
        .window_mut(app_id)
        .ok_or(ReducerError::WindowNotFound(app_id))
}

fn play(state: &DesktopState, effects: &mut Vec<RuntimeEffect>, tone: Tone) {
    if state.settings.sound_enabled {
        effects.push(RuntimeEffect::PlaySound(tone));
    }
}

fn schedule(
    state: &mut DesktopState,
    effects: &mut Vec<RuntimeEffect>,
    key: TaskKey,
    delay_ms: u32,
) {
    let generation = state.tasks.schedule(key);
    effects.push(RuntimeEffect::ScheduleTask {
        key,
        generation,
        delay_ms,
    });
}

fn cancel(state: &mut DesktopState, effects: &mut Vec<RuntimeEffect>, key: TaskKey) {
    if state.tasks.cancel(key) {
        effects.push(RuntimeEffect::CancelTask(key));
    }
}

/// Opens a window one cascade step past the last opened window and puts it on top.
fn open_new_window(state: &mut DesktopState, app_id: AppId) {
    let rect = next_cascade_rect(state.windows.last().map(|win| win.rect));
    let z = state.next_foreground_z();
    state.windows.push(WindowRecord::new(app_id, rect, z));
}

fn unlock(state: &mut DesktopState, effects: &mut Vec<RuntimeEffect>) {
    state.session.locked = false;
    state.session.sleep = SleepState::Awake;
    state.session.password_input.clear();
    state.session.last_attempt_failed = false;
    state.session.biometric_pending = false;
    cancel(state, effects, TaskKey::Biometric);
    play(state, effects, Tone::Unlock);

    let queued = std::mem::take(&mut state.pending_reopen);
    let mut reopened = false;
    for app_id in queued {
        if state.window(app_id).is_none() {
            open_new_window(state, app_id);
            reopened = true;
        }
    }
    if reopened {
        effects.push(RuntimeEffect::PersistRunningApps);
    }
}

fn lock(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    effects: &mut Vec<RuntimeEffect>,
) {
    state.session.locked = true;
    state.session.password_input.clear();
    state.session.last_attempt_failed = false;
    state.session.biometric_pending = false;
    state.overlays.close_all();
    *interaction = InteractionState::default();
    cancel(state, effects, TaskKey::Biometric);
}

fn begin_power_transition(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    effects: &mut Vec<RuntimeEffect>,
    power: PowerState,
) {
    state.session.power = power;
    state.overlays.close_all();
    *interaction = InteractionState::default();
    cancel(state, effects, TaskKey::Biometric);
    schedule(state, effects, TaskKey::Power, POWER_TRANSITION_DELAY_MS);
}

fn finish_power_transition(state: &mut DesktopState, effects: &mut Vec<RuntimeEffect>) {
    let restarting = state.session.power == PowerState::Restarting;
    for key in state.tasks.cancel_all() {
        effects.push(RuntimeEffect::CancelTask(key));
    }
    state.reset_session();
    effects.push(RuntimeEffect::PersistRunningApps);
    if restarting {
        play(state, effects, Tone::Startup);
    } else {
        state.session.power = PowerState::Off;
    }
}

/// Applies a [`DesktopAction`] to the desktop runtime state and collects resulting side effects.
///
/// This function is the authoritative state transition engine for the desktop: window manager,
/// lock gate, overlays, notification log, and scheduled-task bookkeeping. It performs no I/O;
/// persistence, sound, notifications and timers are requested through [`RuntimeEffect`]s.
///
/// # Errors
///
/// Returns [`ReducerError::SessionLocked`] for desktop interactions while the session is locked
/// or powered down, and [`ReducerError::WindowNotFound`] when an action targets an app without an
/// open window. State is left unchanged in both cases.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    if action.requires_interactive_session() && !state.is_interactive() {
        return Err(ReducerError::SessionLocked);
    }

    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenApp { app_id } => {
            if state.window(app_id).is_some() {
                raise_window(state, app_id);
            } else {
                open_new_window(state, app_id);
                play(state, &mut effects, Tone::Open);
                effects.push(RuntimeEffect::PersistRunningApps);
            }
            state.overlays.close_all();
        }
        DesktopAction::CloseApp { app_id } => {
            let index = state
                .windows
                .iter()
                .position(|w| w.app_id == app_id)
                .ok_or(ReducerError::WindowNotFound(app_id))?;
            state.windows.remove(index);
            interaction.release(app_id);
            for key in state.tasks.cancel_owned_by(app_id) {
                effects.push(RuntimeEffect::CancelTask(key));
            }
            if app_id == AppId::Safari {
                state.browser = BrowserState::default();
            }
            play(state, &mut effects, Tone::Close);
            effects.push(RuntimeEffect::PersistRunningApps);
        }
        DesktopAction::MinimizeApp { app_id } => {
            let window = window_mut(state, app_id)?;
            if !window.minimized {
                window.minimized = true;
                interaction.release(app_id);
                play(state, &mut effects, Tone::Minimize);
            }
        }
        DesktopAction::MaximizeApp { app_id } => {
            let rect = maximized_rect(state.viewport);
            let window = window_mut(state, app_id)?;
            window.rect = rect;
            window.maximized = true;
            window.minimized = false;
        }
        DesktopAction::RestoreApp { app_id } => {
            let window = window_mut(state, app_id)?;
            window.rect = default_rect();
            window.maximized = false;
            window.minimized = false;
        }
        DesktopAction::ToggleMaximize { app_id } => {
            let maximized = window_mut(state, app_id)?.maximized;
            let next = if maximized {
                DesktopAction::RestoreApp { app_id }
            } else {
                DesktopAction::MaximizeApp { app_id }
            };
            effects.extend(reduce_desktop(state, interaction, next)?);
        }
        DesktopAction::BringToFront { app_id } => {
            if !raise_window(state, app_id) {
                return Err(ReducerError::WindowNotFound(app_id));
            }
        }
        DesktopAction::CycleAppSwitcher => {
            if state.windows.len() > 1 {
                if let Some(app_id) = bottom_window(state) {
                    raise_window(state, app_id);
                }
            }
        }
        DesktopAction::BeginDrag { app_id, pointer } => {
            let rect_start = window_mut(state, app_id)?.rect;
            raise_window(state, app_id);
            interaction.resizing = None;
            interaction.dragging = Some(DragSession {
                app_id,
                pointer_start: pointer,
                rect_start,
            });
        }
        DesktopAction::UpdateDrag { pointer } => {
            if let Some(session) = interaction.dragging.as_ref() {
                let dx = pointer.x - session.pointer_start.x;
                let dy = pointer.y - session.pointer_start.y;
                let window = window_mut(state, session.app_id)?;
                if !window.maximized {
                    window.rect = session.rect_start.offset(dx, dy);
                }
            }
        }
        DesktopAction::EndDrag => {
            interaction.dragging = None;
        }
        DesktopAction::BeginResize {
            app_id,
            edge,
            pointer,
        } => {
            let rect_start = window_mut(state, app_id)?.rect;
            raise_window(state, app_id);
            interaction.dragging = None;
            interaction.resizing = Some(ResizeSession {
                app_id,
                edge,
                pointer_start: pointer,
                rect_start,
            });
        }
        DesktopAction::UpdateResize { pointer } => {
            if let Some(session) = interaction.resizing.as_ref() {
                let dx = pointer.x - session.pointer_start.x;
                let dy = pointer.y - session.pointer_start.y;
                let window = window_mut(state, session.app_id)?;
                if !window.maximized {
                    window.rect = resize_rect_clamped(session.rect_start, session.edge, dx, dy);
                }
            }
        }
        DesktopAction::EndResize => {
            interaction.resizing = None;
        }
        DesktopAction::SetViewport { width, height } => {
            state.viewport = clamp_viewport(width, height);
            let rect = maximized_rect(state.viewport);
            for window in state.windows.iter_mut().filter(|w| w.maximized) {
                window.rect = rect;
            }
        }
        DesktopAction::SetPasswordInput { text } => {
            state.session.password_input = text;
            state.session.last_attempt_failed = false;
        }
        DesktopAction::SubmitPassword => {
            if state.session.locked && state.session.power == PowerState::Running {
                if password_matches(&state.session.password_input, &state.profile.password) {
                    unlock(state, &mut effects);
                } else {
                    state.session.password_input.clear();
                    state.session.last_attempt_failed = true;
                    play(state, &mut effects, Tone::Error);
                }
            }
        }
        DesktopAction::BeginBiometricUnlock => {
            if state.session.locked && state.session.power == PowerState::Running {
                state.session.biometric_pending = true;
                schedule(state, &mut effects, TaskKey::Biometric, BIOMETRIC_DELAY_MS);
            }
        }
        DesktopAction::Lock => {
            if state.session.power == PowerState::Running {
                lock(state, interaction, &mut effects);
            }
        }
        DesktopAction::Sleep => {
            if state.session.power == PowerState::Running {
                lock(state, interaction, &mut effects);
                state.session.sleep = SleepState::Asleep;
            }
        }
        DesktopAction::Wake => {
            state.session.sleep = SleepState::Awake;
        }
        DesktopAction::Shutdown => {
            if state.session.power != PowerState::Off {
                begin_power_transition(state, interaction, &mut effects, PowerState::ShuttingDown);
            }
        }
        DesktopAction::Restart => {
            if state.session.power != PowerState::Off {
                begin_power_transition(state, interaction, &mut effects, PowerState::Restarting);
            }
        }
        DesktopAction::PowerOn => {
            if state.session.power == PowerState::Off {
                state.session.power = PowerState::Running;
                state.session.locked = true;
                play(state, &mut effects, Tone::Startup);
            }
        }
        DesktopAction::ToggleSpotlight => {
            state.overlays.toggle(OverlayKind::Spotlight);
        }
        DesktopAction::SetSpotlightQuery { query } => {
            state.overlays.spotlight_query = query;
        }
        DesktopAction::ToggleMissionControl => {
            state.overlays.toggle(OverlayKind::MissionControl);
        }
        DesktopAction::ToggleLaunchpad => {
            state.overlays.toggle(OverlayKind::Launchpad);
        }
        DesktopAction::DismissOverlays => {
            state.overlays.close_all();
        }
        DesktopAction::Shortcut(command) => {
            let next = match command {
                ShortcutCommand::Lock => Some(DesktopAction::Lock),
                ShortcutCommand::ToggleSpotlight => Some(DesktopAction::ToggleSpotlight),
                ShortcutCommand::ToggleMissionControl => Some(DesktopAction::ToggleMissionControl),
                ShortcutCommand::ToggleLaunchpad => Some(DesktopAction::ToggleLaunchpad),
                ShortcutCommand::OpenApp(app_id) => Some(DesktopAction::OpenApp { app_id }),
                ShortcutCommand::CloseFrontApp | ShortcutCommand::QuitFrontApp => state
                    .front_app()
                    .map(|app_id| DesktopAction::CloseApp { app_id }),
                ShortcutCommand::CycleAppSwitcher => Some(DesktopAction::CycleAppSwitcher),
                ShortcutCommand::DismissOverlays => Some(DesktopAction::DismissOverlays),
                ShortcutCommand::SubmitPassword => Some(DesktopAction::SubmitPassword),
            };
            if let Some(next) = next {
                effects.extend(reduce_desktop(state, interaction, next)?);
            }
        }
        DesktopAction::PostNotification {
            title,
            body,
            posted_at_unix_ms,
        } => {
            let record = NotificationRecord {
                id: state.next_notification_id,
                title,
                body,
                posted_at_unix_ms,
            };
            state.next_notification_id = state.next_notification_id.saturating_add(1);
            state.notifications.push(record.clone());
            effects.push(RuntimeEffect::PersistNotifications);
            if state.settings.notifications_enabled {
                effects.push(RuntimeEffect::Notify {
                    title: record.title.clone(),
                    body: record.body.clone(),
                });
                state.banner = Some(record);
                schedule(state, &mut effects, TaskKey::BannerDismiss, BANNER_DISMISS_DELAY_MS);
                play(state, &mut effects, Tone::Notification);
            }
        }
        DesktopAction::DismissBanner => {
            state.banner = None;
            cancel(state, &mut effects, TaskKey::BannerDismiss);
        }
        DesktopAction::ClearNotifications => {
            state.notifications.items.clear();
            state.banner = None;
            cancel(state, &mut effects, TaskKey::BannerDismiss);
            effects.push(RuntimeEffect::PersistNotifications);
        }
        DesktopAction::UpdateSettings { settings } => {
            let volume = settings.volume.min(100);
            state.settings = SystemSettings { volume, ..settings };
            effects.push(RuntimeEffect::PersistSettings);
        }
        DesktopAction::UpdateProfile { profile } => {
            state.profile = profile;
            effects.push(RuntimeEffect::PersistUserProfile);
        }
        DesktopAction::SetReopenOnLogin { enabled } => {
            state.reopen_on_login = enabled;
            effects.push(RuntimeEffect::PersistRunningApps);
        }
        DesktopAction::PushTerminalHistory { command } => {
            if state.terminal_history.push(&command) {
                effects.push(RuntimeEffect::PersistTerminalHistory);
            }
        }
        DesktopAction::Navigate { url } => {
            window_mut(state, AppId::Safari)?;
            if let Some(url) = normalize_url(&url) {
                state.browser.pending_url = Some(url);
                state.browser.loading = true;
                schedule(
                    state,
                    &mut effects,
                    TaskKey::Navigation(AppId::Safari),
                    NAVIGATION_DELAY_MS,
                );
            }
        }
        DesktopAction::TaskFired { key, generation } => {
            if state.tasks.complete(key, generation) {
                match key {
                    TaskKey::Biometric => {
                        state.session.biometric_pending = false;
                        if state.session.locked && state.session.power == PowerState::Running {
                            unlock(state, &mut effects);
                        }
                    }
                    TaskKey::Power => finish_power_transition(state, &mut effects),
                    TaskKey::BannerDismiss => state.banner = None,
                    TaskKey::Navigation(_) => {
                        if let Some(url) = state.browser.pending_url.take() {
                            state.browser.history.push(url.clone());
                            state.browser.current_url = Some(url);
                        }
                        state.browser.loading = false;
                    }
                }
            }
        }
        DesktopAction::HydrateSettings { settings } => {
            state.settings = settings;
        }
        DesktopAction::HydrateProfile { profile } => {
            state.profile = profile;
        }
        DesktopAction::HydrateNotifications { log } => {
            state.next_notification_id = state.next_notification_id.max(log.next_id());
            state.notifications = log;
        }
        DesktopAction::HydrateTerminalHistory { history } => {
            state.terminal_history = history;
        }
        DesktopAction::HydrateRunningApps { document } => {
            state.reopen_on_login = document.reopen_on_login;
            let (apps, _unknown) = document.resolve();
            if document.reopen_on_login {
                state.pending_reopen = apps;
            }
        }
    }

    Ok(effects)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{BrowserState, Viewport, WindowPhase, WindowRect, CASCADE_STEP};

    fn apply(
        state: &mut DesktopState,
        interaction: &mut InteractionState,
        action: DesktopAction,
    ) -> Vec<RuntimeEffect> {
        reduce_desktop(state, interaction, action).expect("action applies")
    }

    fn unlocked() -> (DesktopState, InteractionState) {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        apply(&mut state, &mut interaction, DesktopAction::SubmitPassword);
        assert!(!state.session.locked);
        (state, interaction)
    }

    fn open(state: &mut DesktopState, interaction: &mut InteractionState, app_id: AppId) {
        apply(state, interaction, DesktopAction::OpenApp { app_id });
    }

    fn z_of(state: &DesktopState, app_id: AppId) -> u32 {
        state.window(app_id).expect("window").z_index
    }

    fn scheduled(effects: &[RuntimeEffect], wanted: TaskKey) -> u64 {
        effects
            .iter()
            .find_map(|effect| match effect {
                RuntimeEffect::ScheduleTask {
                    key, generation, ..
                } if *key == wanted => Some(*generation),
                _ => None,
            })
            .expect("task scheduled")
    }

    #[test]
    fn open_tracks_window_and_raises_it() {
        let (mut state, mut interaction) = unlocked();
        let effects = apply(
            &mut state,
            &mut interaction,
            DesktopAction::OpenApp {
                app_id: AppId::Finder,
            },
        );

        assert_eq!(state.running_apps().into_iter().collect::<Vec<_>>(), vec![AppId::Finder]);
        assert!(state.dock_indicator(AppId::Finder));
        assert_eq!(state.front_app(), Some(AppId::Finder));
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::PlaySound(Tone::Open),
                RuntimeEffect::PersistRunningApps
            ]
        );
    }

    #[test]
    fn windows_cascade_by_open_count() {
        let (mut state, mut interaction) = unlocked();
        open(&mut state, &mut interaction, AppId::Finder);
        open(&mut state, &mut interaction, AppId::Music);

        let first = state.window(AppId::Finder).expect("finder").rect;
        let second = state.window(AppId::Music).expect("music").rect;
        assert_eq!(second.x - first.x, 30);
        assert_eq!(second.y - first.y, 30);
    }

    #[test]
    fn three_windows_take_distinct_stepped_positions() {
        let (mut state, mut interaction) = unlocked();
        open(&mut state, &mut interaction, AppId::Finder);
        open(&mut state, &mut interaction, AppId::Music);
        open(&mut state, &mut interaction, AppId::Safari);

        let rects = [AppId::Finder, AppId::Music, AppId::Safari]
            .map(|app_id| state.window(app_id).expect("window").rect);
        assert_eq!(rects[0], default_rect());
        assert_eq!(rects[1], rects[0].offset(CASCADE_STEP, CASCADE_STEP));
        assert_eq!(rects[2], rects[1].offset(CASCADE_STEP, CASCADE_STEP));
        assert_ne!(rects[0], rects[2]);
        assert_eq!(state.front_app(), Some(AppId::Safari));
    }

    #[test]
    fn closing_an_earlier_window_does_not_reuse_a_taken_position() {
        let (mut state, mut interaction) = unlocked();
        open(&mut state, &mut interaction, AppId::Finder);
        open(&mut state, &mut interaction, AppId::Music);
        apply(
            &mut state,
            &mut interaction,
            DesktopAction::CloseApp {
                app_id: AppId::Finder,
            },
        );
        open(&mut state, &mut interaction, AppId::Safari);

        let music = state.window(AppId::Music).expect("music").rect;
        let safari = state.window(AppId::Safari).expect("safari").rect;
        assert_ne!(safari, music);
        assert_eq!(safari, music.offset(CASCADE_STEP, CASCADE_STEP));
    }

    #[test]
    fn first_window_after_closing_everything_opens_at_the_origin() {
        let (mut state, mut interaction) = unlocked();
        open(&mut state, &mut interaction, AppId::Finder);
        apply(
            &mut state,
            &mut interaction,
            DesktopAction::CloseApp {
                app_id: AppId::Finder,
            },
        );
        open(&mut state, &mut interaction, AppId::Terminal);

        assert_eq!(state.window(AppId::Terminal).map(|w| w.rect), Some(default_rect()));
    }

    #[test]
    fn last_opened_window_has_highest_z() {
        let (mut state, mut interaction) = unlocked();
        open(&mut state, &mut interaction, AppId::Finder);
        open(&mut state, &mut interaction, AppId::Music);
        open(&mut state, &mut interaction, AppId::Terminal);

        assert!(z_of(&state, AppId::Terminal) > z_of(&state, AppId::Music));
        assert!(z_of(&state, AppId::Music) > z_of(&state, AppId::Finder));
        assert_eq!(state.front_app(), Some(AppId::Terminal));
    }

    #[test]
    fn reopening_surfaces_the_existing_window() {
        let (mut state, mut interaction) = unlocked();
        open(&mut state, &mut interaction, AppId::Finder);
        open(&mut state, &mut interaction, AppId::Music);
        apply(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeApp {
                app_id: AppId::Finder,
            },
        );

        let effects = apply(
            &mut state,
            &mut interaction,
            DesktopAction::OpenApp {
                app_id: AppId::Finder,
            },
        );

        assert!(effects.is_empty());
        assert_eq!(state.windows.len(), 2);
        assert_eq!(
            state.window(AppId::Finder).map(WindowRecord::phase),
            Some(WindowPhase::Normal)
        );
        assert_eq!(state.front_app(), Some(AppId::Finder));
    }

    #[test]
    fn close_removes_window_and_dock_indicator() {
        let (mut state, mut interaction) = unlocked();
        open(&mut state, &mut interaction, AppId::Finder);

        let effects = apply(
            &mut state,
            &mut interaction,
            DesktopAction::CloseApp {
                app_id: AppId::Finder,
            },
        );

        assert!(state.window(AppId::Finder).is_none());
        assert!(!state.dock_indicator(AppId::Finder));
        assert!(state.running_apps().is_empty());
        assert!(effects.contains(&RuntimeEffect::PersistRunningApps));
    }

    #[test]
    fn closing_a_missing_window_is_an_error() {
        let (mut state, mut interaction) = unlocked();
        let before = state.clone();
        let err = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::CloseApp {
                app_id: AppId::Music,
            },
        )
        .expect_err("missing window");
        assert_eq!(err, ReducerError::WindowNotFound(AppId::Music));
        assert_eq!(state, before);
    }

    #[test]
    fn minimized_app_stays_running() {
        let (mut state, mut interaction) = unlocked();
        open(&mut state, &mut interaction, AppId::Music);
        let effects = apply(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeApp {
                app_id: AppId::Music,
            },
        );

        assert_eq!(effects, vec![RuntimeEffect::PlaySound(Tone::Minimize)]);
        assert!(state.dock_indicator(AppId::Music));
        assert_eq!(state.front_app(), None);
    }

    #[test]
    fn maximize_twice_is_a_no_op_and_toggle_restores_default_rect() {
        let (mut state, mut interaction) = unlocked();
        open(&mut state, &mut interaction, AppId::Safari);
        open(&mut state, &mut interaction, AppId::Music);

        apply(
            &mut state,
            &mut interaction,
            DesktopAction::MaximizeApp {
                app_id: AppId::Music,
            },
        );
        let once = state.clone();
        apply(
            &mut state,
            &mut interaction,
            DesktopAction::MaximizeApp {
                app_id: AppId::Music,
            },
        );
        assert_eq!(state, once);
        assert_eq!(
            state.window(AppId::Music).map(|w| w.rect),
            Some(WindowRect {
                x: 0,
                y: 28,
                w: 1280,
                h: 800 - 28 - 84
            })
        );

        apply(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleMaximize {
                app_id: AppId::Music,
            },
        );
        let music = state.window(AppId::Music).expect("music");
        assert!(!music.maximized);
        assert_eq!(music.rect, default_rect());
    }

    #[test]
    fn toggling_maximize_three_times_matches_the_first_maximize() {
        let (mut state, mut interaction) = unlocked();
        open(&mut state, &mut interaction, AppId::Calculator);
        let toggle = DesktopAction::ToggleMaximize {
            app_id: AppId::Calculator,
        };

        apply(&mut state, &mut interaction, toggle.clone());
        let first = state.window(AppId::Calculator).cloned().expect("calculator");
        assert!(first.maximized);

        apply(&mut state, &mut interaction, toggle.clone());
        let restored = state.window(AppId::Calculator).expect("calculator");
        assert!(!restored.maximized);
        assert_eq!(restored.rect, default_rect());

        apply(&mut state, &mut interaction, toggle);
        let third = state.window(AppId::Calculator).expect("calculator");
        assert!(third.maximized);
        assert_eq!(third.rect, first.rect);
        assert_eq!(third.rect, maximized_rect(state.viewport));
    }

    #[test]
    fn viewport_changes_follow_maximized_windows() {
        let (mut state, mut interaction) = unlocked();
        open(&mut state, &mut interaction, AppId::Finder);
        apply(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleMaximize {
                app_id: AppId::Finder,
            },
        );
        apply(
            &mut state,
            &mut interaction,
            DesktopAction::SetViewport {
                width: 1024,
                height: 768,
            },
        );

        assert_eq!(
            state.viewport,
            Viewport {
                width: 1024,
                height: 768
            }
        );
        assert_eq!(state.window(AppId::Finder).map(|w| w.rect.w), Some(1024));
    }

    #[test]
    fn drag_offsets_from_start_rect_without_clamping() {
        let (mut state, mut interaction) = unlocked();
        open(&mut state, &mut interaction, AppId::Terminal);
        let start = state.window(AppId::Terminal).expect("terminal").rect;

        apply(
            &mut state,
            &mut interaction,
            DesktopAction::BeginDrag {
                app_id: AppId::Terminal,
                pointer: PointerPosition { x: 200, y: 100 },
            },
        );
        apply(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateDrag {
                pointer: PointerPosition { x: -900, y: -400 },
            },
        );
        apply(&mut state, &mut interaction, DesktopAction::EndDrag);

        assert_eq!(
            state.window(AppId::Terminal).map(|w| w.rect),
            Some(start.offset(-1100, -500))
        );
        assert_eq!(interaction, InteractionState::default());
    }

    #[test]
    fn resize_respects_minimum_size() {
        let (mut state, mut interaction) = unlocked();
        open(&mut state, &mut interaction, AppId::Calculator);

        apply(
            &mut state,
            &mut interaction,
            DesktopAction::BeginResize {
                app_id: AppId::Calculator,
                edge: ResizeEdge::SouthEast,
                pointer: PointerPosition { x: 500, y: 500 },
            },
        );
        apply(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateResize {
                pointer: PointerPosition { x: -500, y: -500 },
            },
        );

        let rect = state.window(AppId::Calculator).expect("calculator").rect;
        assert_eq!((rect.w, rect.h), (220, 140));
    }

    #[test]
    fn closing_mid_drag_ends_the_interaction() {
        let (mut state, mut interaction) = unlocked();
        open(&mut state, &mut interaction, AppId::Finder);
        apply(
            &mut state,
            &mut interaction,
            DesktopAction::BeginDrag {
                app_id: AppId::Finder,
                pointer: PointerPosition { x: 0, y: 0 },
            },
        );
        apply(
            &mut state,
            &mut interaction,
            DesktopAction::CloseApp {
                app_id: AppId::Finder,
            },
        );

        assert!(interaction.dragging.is_none());
        assert!(apply(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateDrag {
                pointer: PointerPosition { x: 5, y: 5 },
            },
        )
        .is_empty());
    }

    #[test]
    fn app_switcher_raises_the_bottom_window() {
        let (mut state, mut interaction) = unlocked();
        open(&mut state, &mut interaction, AppId::Finder);
        open(&mut state, &mut interaction, AppId::Music);
        open(&mut state, &mut interaction, AppId::Safari);

        apply(&mut state, &mut interaction, DesktopAction::CycleAppSwitcher);
        assert_eq!(state.front_app(), Some(AppId::Finder));
        apply(&mut state, &mut interaction, DesktopAction::CycleAppSwitcher);
        assert_eq!(state.front_app(), Some(AppId::Music));
    }

    #[test]
    fn locked_session_refuses_desktop_interaction() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let before = state.clone();

        for action in [
            DesktopAction::OpenApp {
                app_id: AppId::Finder,
            },
            DesktopAction::ToggleSpotlight,
            DesktopAction::Shortcut(ShortcutCommand::ToggleLaunchpad),
            DesktopAction::PushTerminalHistory {
                command: "ls".to_string(),
            },
        ] {
            assert_eq!(
                reduce_desktop(&mut state, &mut interaction, action),
                Err(ReducerError::SessionLocked)
            );
        }
        assert_eq!(state, before);
    }

    #[test]
    fn wrong_password_shakes_and_clears_input() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        apply(
            &mut state,
            &mut interaction,
            DesktopAction::SetPasswordInput {
                text: "hunter2".to_string(),
            },
        );
        let effects = apply(&mut state, &mut interaction, DesktopAction::SubmitPassword);

        assert!(state.session.locked);
        assert!(state.session.last_attempt_failed);
        assert_eq!(state.session.password_input, "");
        assert_eq!(effects, vec![RuntimeEffect::PlaySound(Tone::Error)]);

        apply(
            &mut state,
            &mut interaction,
            DesktopAction::SetPasswordInput {
                text: "MACOS".to_string(),
            },
        );
        assert!(!state.session.last_attempt_failed);
        apply(&mut state, &mut interaction, DesktopAction::SubmitPassword);
        assert!(!state.session.locked);
    }

    #[test]
    fn enter_shortcut_unlocks_while_locked() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        apply(
            &mut state,
            &mut interaction,
            DesktopAction::Shortcut(ShortcutCommand::SubmitPassword),
        );
        assert!(!state.session.locked);
    }

    #[test]
    fn lock_keeps_windows_and_closes_overlays() {
        let (mut state, mut interaction) = unlocked();
        open(&mut state, &mut interaction, AppId::Finder);
        apply(&mut state, &mut interaction, DesktopAction::ToggleSpotlight);

        apply(
            &mut state,
            &mut interaction,
            DesktopAction::Shortcut(ShortcutCommand::Lock),
        );

        assert!(state.session.locked);
        assert!(state.dock_indicator(AppId::Finder));
        assert!(!state.overlays.any_open());
    }

    #[test]
    fn biometric_unlock_fires_once_for_the_current_generation() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let first = apply(&mut state, &mut interaction, DesktopAction::BeginBiometricUnlock);
        let stale = scheduled(&first, TaskKey::Biometric);
        let second = apply(&mut state, &mut interaction, DesktopAction::BeginBiometricUnlock);
        let current = scheduled(&second, TaskKey::Biometric);

        apply(
            &mut state,
            &mut interaction,
            DesktopAction::TaskFired {
                key: TaskKey::Biometric,
                generation: stale,
            },
        );
        assert!(state.session.locked);

        apply(
            &mut state,
            &mut interaction,
            DesktopAction::TaskFired {
                key: TaskKey::Biometric,
                generation: current,
            },
        );
        assert!(!state.session.locked);
        assert!(!state.session.biometric_pending);
    }

    #[test]
    fn locking_cancels_a_pending_biometric_read() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let effects = apply(&mut state, &mut interaction, DesktopAction::BeginBiometricUnlock);
        let generation = scheduled(&effects, TaskKey::Biometric);

        let effects = apply(&mut state, &mut interaction, DesktopAction::Sleep);
        assert_eq!(effects, vec![RuntimeEffect::CancelTask(TaskKey::Biometric)]);
        assert_eq!(state.session.sleep, SleepState::Asleep);

        apply(
            &mut state,
            &mut interaction,
            DesktopAction::TaskFired {
                key: TaskKey::Biometric,
                generation,
            },
        );
        assert!(state.session.locked);
    }

    #[test]
    fn wake_keeps_the_session_locked() {
        let (mut state, mut interaction) = unlocked();
        apply(&mut state, &mut interaction, DesktopAction::Sleep);
        apply(&mut state, &mut interaction, DesktopAction::Wake);
        assert_eq!(state.session.sleep, SleepState::Awake);
        assert!(state.session.locked);
    }

    #[test]
    fn shutdown_resets_session_and_power_on_returns_to_lock() {
        let (mut state, mut interaction) = unlocked();
        open(&mut state, &mut interaction, AppId::Finder);

        let effects = apply(&mut state, &mut interaction, DesktopAction::Shutdown);
        let generation = scheduled(&effects, TaskKey::Power);
        assert_eq!(state.session.power, PowerState::ShuttingDown);
        assert_eq!(
            reduce_desktop(
                &mut state,
                &mut interaction,
                DesktopAction::OpenApp {
                    app_id: AppId::Music
                }
            ),
            Err(ReducerError::SessionLocked)
        );

        apply(
            &mut state,
            &mut interaction,
            DesktopAction::TaskFired {
                key: TaskKey::Power,
                generation,
            },
        );
        assert_eq!(state.session.power, PowerState::Off);
        assert!(state.session.locked);
        assert!(state.windows.is_empty());

        apply(&mut state, &mut interaction, DesktopAction::PowerOn);
        assert_eq!(state.session.power, PowerState::Running);
        assert!(state.session.locked);
    }

    #[test]
    fn restart_reopens_previous_apps_after_unlock() {
        let (mut state, mut interaction) = unlocked();
        open(&mut state, &mut interaction, AppId::Finder);
        open(&mut state, &mut interaction, AppId::Terminal);

        let effects = apply(&mut state, &mut interaction, DesktopAction::Restart);
        let generation = scheduled(&effects, TaskKey::Power);
        apply(
            &mut state,
            &mut interaction,
            DesktopAction::TaskFired {
                key: TaskKey::Power,
                generation,
            },
        );
        assert_eq!(state.session.power, PowerState::Running);
        assert!(state.session.locked);
        assert!(state.windows.is_empty());

        apply(&mut state, &mut interaction, DesktopAction::SubmitPassword);
        assert_eq!(state.front_app(), Some(AppId::Terminal));
        assert!(state.dock_indicator(AppId::Finder));
    }

    #[test]
    fn hydrated_running_apps_reopen_on_first_unlock() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        apply(
            &mut state,
            &mut interaction,
            DesktopAction::HydrateRunningApps {
                document: RunningAppsDocument {
                    apps: vec!["music".to_string(), "nope".to_string(), "safari".to_string()],
                    reopen_on_login: true,
                },
            },
        );
        assert!(state.windows.is_empty());

        let effects = apply(&mut state, &mut interaction, DesktopAction::SubmitPassword);

        assert_eq!(state.running_apps().len(), 2);
        assert_eq!(state.front_app(), Some(AppId::Safari));
        assert!(effects.contains(&RuntimeEffect::PersistRunningApps));
        assert!(state.pending_reopen.is_empty());
    }

    #[test]
    fn opening_one_overlay_closes_the_others() {
        let (mut state, mut interaction) = unlocked();
        apply(&mut state, &mut interaction, DesktopAction::ToggleSpotlight);
        apply(&mut state, &mut interaction, DesktopAction::ToggleLaunchpad);

        assert!(state.overlays.launchpad_open);
        assert!(!state.overlays.spotlight_open);

        apply(
            &mut state,
            &mut interaction,
            DesktopAction::Shortcut(ShortcutCommand::DismissOverlays),
        );
        assert!(!state.overlays.any_open());
    }

    #[test]
    fn quit_shortcut_closes_front_app_and_ignores_empty_desktop() {
        let (mut state, mut interaction) = unlocked();
        assert!(apply(
            &mut state,
            &mut interaction,
            DesktopAction::Shortcut(ShortcutCommand::QuitFrontApp),
        )
        .is_empty());

        open(&mut state, &mut interaction, AppId::Finder);
        open(&mut state, &mut interaction, AppId::Music);
        apply(
            &mut state,
            &mut interaction,
            DesktopAction::Shortcut(ShortcutCommand::CloseFrontApp),
        );
        assert_eq!(
            state.running_apps().into_iter().collect::<Vec<_>>(),
            vec![AppId::Finder]
        );
    }

    #[test]
    fn notification_logs_banners_and_auto_dismisses() {
        let (mut state, mut interaction) = unlocked();
        let effects = apply(
            &mut state,
            &mut interaction,
            DesktopAction::PostNotification {
                title: "Music".to_string(),
                body: "Now playing".to_string(),
                posted_at_unix_ms: 42,
            },
        );

        let generation = scheduled(&effects, TaskKey::BannerDismiss);
        assert!(effects.contains(&RuntimeEffect::PersistNotifications));
        assert!(effects.contains(&RuntimeEffect::Notify {
            title: "Music".to_string(),
            body: "Now playing".to_string(),
        }));
        assert_eq!(state.notifications.items.len(), 1);
        assert_eq!(state.banner.as_ref().map(|b| b.id), Some(1));

        apply(
            &mut state,
            &mut interaction,
            DesktopAction::TaskFired {
                key: TaskKey::BannerDismiss,
                generation,
            },
        );
        assert!(state.banner.is_none());
        assert_eq!(state.notifications.items.len(), 1);
    }

    #[test]
    fn notification_ids_stop_at_the_largest_value() {
        let (mut state, mut interaction) = unlocked();
        let mut log = NotificationLog::default();
        log.push(NotificationRecord {
            id: u64::MAX,
            title: "Restored".to_string(),
            body: String::new(),
            posted_at_unix_ms: 1,
        });
        apply(
            &mut state,
            &mut interaction,
            DesktopAction::HydrateNotifications { log },
        );
        assert_eq!(state.next_notification_id, u64::MAX);

        for posted_at_unix_ms in [2, 3] {
            apply(
                &mut state,
                &mut interaction,
                DesktopAction::PostNotification {
                    title: "Mail".to_string(),
                    body: String::new(),
                    posted_at_unix_ms,
                },
            );
        }
        assert_eq!(state.next_notification_id, u64::MAX);
        assert_eq!(state.notifications.items.len(), 3);
        assert_eq!(state.banner.as_ref().map(|b| b.id), Some(u64::MAX));
    }

    #[test]
    fn muted_and_silenced_settings_suppress_feedback() {
        let (mut state, mut interaction) = unlocked();
        let settings = SystemSettings {
            sound_enabled: false,
            notifications_enabled: false,
            ..SystemSettings::default()
        };
        apply(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateSettings { settings },
        );

        let effects = apply(
            &mut state,
            &mut interaction,
            DesktopAction::OpenApp {
                app_id: AppId::Music,
            },
        );
        assert_eq!(effects, vec![RuntimeEffect::PersistRunningApps]);

        let effects = apply(
            &mut state,
            &mut interaction,
            DesktopAction::PostNotification {
                title: "Mail".to_string(),
                body: String::new(),
                posted_at_unix_ms: 1,
            },
        );
        assert_eq!(effects, vec![RuntimeEffect::PersistNotifications]);
        assert!(state.banner.is_none());
    }

    #[test]
    fn navigation_commits_after_its_task_and_close_cancels_it() {
        let (mut state, mut interaction) = unlocked();
        assert_eq!(
            reduce_desktop(
                &mut state,
                &mut interaction,
                DesktopAction::Navigate {
                    url: "apple.com".to_string()
                }
            ),
            Err(ReducerError::WindowNotFound(AppId::Safari))
        );

        open(&mut state, &mut interaction, AppId::Safari);
        let effects = apply(
            &mut state,
            &mut interaction,
            DesktopAction::Navigate {
                url: "apple.com".to_string(),
            },
        );
        let generation = scheduled(&effects, TaskKey::Navigation(AppId::Safari));
        assert!(state.browser.loading);

        apply(
            &mut state,
            &mut interaction,
            DesktopAction::TaskFired {
                key: TaskKey::Navigation(AppId::Safari),
                generation,
            },
        );
        assert_eq!(
            state.browser.current_url.as_deref(),
            Some("https://apple.com")
        );
        assert!(!state.browser.loading);

        let effects = apply(
            &mut state,
            &mut interaction,
            DesktopAction::Navigate {
                url: "example.org".to_string(),
            },
        );
        let pending = scheduled(&effects, TaskKey::Navigation(AppId::Safari));
        let effects = apply(
            &mut state,
            &mut interaction,
            DesktopAction::CloseApp {
                app_id: AppId::Safari,
            },
        );
        assert!(effects.contains(&RuntimeEffect::CancelTask(TaskKey::Navigation(AppId::Safari))));

        apply(
            &mut state,
            &mut interaction,
            DesktopAction::TaskFired {
                key: TaskKey::Navigation(AppId::Safari),
                generation: pending,
            },
        );
        assert_eq!(state.browser, BrowserState::default());
    }

    #[test]
    fn blank_terminal_commands_are_not_persisted() {
        let (mut state, mut interaction) = unlocked();
        assert!(apply(
            &mut state,
            &mut interaction,
            DesktopAction::PushTerminalHistory {
                command: "  ".to_string(),
            },
        )
        .is_empty());
        assert_eq!(
            apply(
                &mut state,
                &mut interaction,
                DesktopAction::PushTerminalHistory {
                    command: "ls -la".to_string(),
                },
            ),
            vec![RuntimeEffect::PersistTerminalHistory]
        );
    }
}
