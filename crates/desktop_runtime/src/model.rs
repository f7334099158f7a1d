use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
    buckets::{NotificationLog, NotificationRecord, SystemSettings, TerminalHistory, UserProfile},
    tasks::TaskRegistry,
};

pub const MENU_BAR_HEIGHT: i32 = 28;
pub const DOCK_RESERVE_HEIGHT: i32 = 84;
pub const CASCADE_ORIGIN_X: i32 = 120;
pub const CASCADE_ORIGIN_Y: i32 = 72;
pub const CASCADE_STEP: i32 = 30;
pub const DEFAULT_WINDOW_WIDTH: i32 = 640;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 420;
pub const DEFAULT_VIEWPORT_WIDTH: i32 = 1280;
pub const DEFAULT_VIEWPORT_HEIGHT: i32 = 800;
/// z-index floor for app windows; menus and overlays render above it.
pub const FOREGROUND_Z_BASE: u32 = 10;

pub const BIOMETRIC_DELAY_MS: u32 = 1_200;
pub const POWER_TRANSITION_DELAY_MS: u32 = 1_500;
pub const BANNER_DISMISS_DELAY_MS: u32 = 4_000;
pub const NAVIGATION_DELAY_MS: u32 = 700;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AppId {
    Finder,
    Calculator,
    Terminal,
    Music,
    Safari,
    SystemPreferences,
}

impl AppId {
    pub const ALL: [AppId; 6] = [
        Self::Finder,
        Self::Safari,
        Self::Music,
        Self::Calculator,
        Self::Terminal,
        Self::SystemPreferences,
    ];

    /// Stable key used in persisted documents and DOM ids.
    pub fn key(self) -> &'static str {
        match self {
            Self::Finder => "finder",
            Self::Calculator => "calculator",
            Self::Terminal => "terminal",
            Self::Music => "music",
            Self::Safari => "safari",
            Self::SystemPreferences => "preferences",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|app| app.key() == key)
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Finder => "Finder",
            Self::Calculator => "Calculator",
            Self::Terminal => "Terminal",
            Self::Music => "Music",
            Self::Safari => "Safari",
            Self::SystemPreferences => "System Preferences",
        }
    }

    pub fn icon_id(self) -> &'static str {
        match self {
            Self::Finder => "finder",
            Self::Calculator => "calculator",
            Self::Terminal => "terminal",
            Self::Music => "music",
            Self::Safari => "compass",
            Self::SystemPreferences => "gear",
        }
    }
}

impl std::fmt::Display for AppId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

/// Visible sub-state of an open window. A closed window is simply not tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPhase {
    Normal,
    Minimized,
    Maximized,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub app_id: AppId,
    pub title: String,
    pub rect: WindowRect,
    pub z_index: u32,
    pub minimized: bool,
    pub maximized: bool,
}

impl WindowRecord {
    pub fn new(app_id: AppId, rect: WindowRect, z_index: u32) -> Self {
        Self {
            app_id,
            title: app_id.title().to_string(),
            rect,
            z_index,
            minimized: false,
            maximized: false,
        }
    }

    pub fn phase(&self) -> WindowPhase {
        if self.minimized {
            WindowPhase::Minimized
        } else if self.maximized {
            WindowPhase::Maximized
        } else {
            WindowPhase::Normal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SleepState {
    #[default]
    Awake,
    Asleep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PowerState {
    #[default]
    Running,
    ShuttingDown,
    Off,
    Restarting,
}

/// Lock gate state. Every desktop interaction is refused unless the session is unlocked and
/// powered on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub locked: bool,
    pub sleep: SleepState,
    pub power: PowerState,
    pub password_input: String,
    /// Set after a rejected password; drives the shake animation until the next keystroke.
    pub last_attempt_failed: bool,
    pub biometric_pending: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            locked: true,
            sleep: SleepState::Awake,
            power: PowerState::Running,
            password_input: String::new(),
            last_attempt_failed: false,
            biometric_pending: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Spotlight,
    MissionControl,
    Launchpad,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverlayState {
    pub spotlight_open: bool,
    pub spotlight_query: String,
    pub mission_control_open: bool,
    pub launchpad_open: bool,
}

impl OverlayState {
    pub fn any_open(&self) -> bool {
        self.spotlight_open || self.mission_control_open || self.launchpad_open
    }

    pub fn close_all(&mut self) {
        *self = Self::default();
    }

    /// Opens `kind` (closing the others) or closes it when it is already open.
    pub fn toggle(&mut self, kind: OverlayKind) {
        let was_open = match kind {
            OverlayKind::Spotlight => self.spotlight_open,
            OverlayKind::MissionControl => self.mission_control_open,
            OverlayKind::Launchpad => self.launchpad_open,
        };
        self.close_all();
        if !was_open {
            match kind {
                OverlayKind::Spotlight => self.spotlight_open = true,
                OverlayKind::MissionControl => self.mission_control_open = true,
                OverlayKind::Launchpad => self.launchpad_open = true,
            }
        }
    }
}

/// Page state of the simulated browser window.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BrowserState {
    pub current_url: Option<String>,
    pub pending_url: Option<String>,
    pub loading: bool,
    pub history: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesktopState {
    /// Tracked windows in open order. This list is the single source of truth for which apps are
    /// running; the dock indicators and the persisted running-apps document derive from it.
    pub windows: Vec<WindowRecord>,
    pub next_z: u32,
    pub viewport: Viewport,
    pub session: SessionState,
    pub overlays: OverlayState,
    pub settings: SystemSettings,
    pub profile: UserProfile,
    pub notifications: NotificationLog,
    pub banner: Option<NotificationRecord>,
    pub next_notification_id: u64,
    pub terminal_history: TerminalHistory,
    pub reopen_on_login: bool,
    /// Apps to reopen on the next successful unlock.
    pub pending_reopen: Vec<AppId>,
    pub browser: BrowserState,
    pub tasks: TaskRegistry,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            windows: Vec::new(),
            next_z: FOREGROUND_Z_BASE,
            viewport: Viewport::default(),
            session: SessionState::default(),
            overlays: OverlayState::default(),
            settings: SystemSettings::default(),
            profile: UserProfile::default(),
            notifications: NotificationLog::default(),
            banner: None,
            next_notification_id: 1,
            terminal_history: TerminalHistory::default(),
            reopen_on_login: true,
            pending_reopen: Vec::new(),
            browser: BrowserState::default(),
            tasks: TaskRegistry::default(),
        }
    }
}

impl DesktopState {
    pub fn window(&self, app_id: AppId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.app_id == app_id)
    }

    pub fn window_mut(&mut self, app_id: AppId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| w.app_id == app_id)
    }

    pub fn is_interactive(&self) -> bool {
        !self.session.locked && self.session.power == PowerState::Running
    }

    pub fn running_apps(&self) -> BTreeSet<AppId> {
        self.windows.iter().map(|w| w.app_id).collect()
    }

    pub fn dock_indicator(&self, app_id: AppId) -> bool {
        self.window(app_id).is_some()
    }

    /// The visible window with the highest z-index.
    pub fn front_app(&self) -> Option<AppId> {
        self.windows
            .iter()
            .filter(|w| !w.minimized)
            .max_by_key(|w| w.z_index)
            .map(|w| w.app_id)
    }

    /// Windows ordered bottom to top.
    pub fn stacked_windows(&self) -> Vec<&WindowRecord> {
        let mut windows: Vec<&WindowRecord> = self.windows.iter().collect();
        windows.sort_by_key(|w| w.z_index);
        windows
    }

    pub fn next_foreground_z(&mut self) -> u32 {
        self.next_z = self.next_z.saturating_add(1);
        self.next_z
    }

    /// Returns the session to its power-on shape: locked, no windows, no overlays, no pending
    /// work. Persisted documents held in memory (settings, profile, notifications, history) stay.
    pub fn reset_session(&mut self) {
        if self.reopen_on_login {
            self.pending_reopen = self.stacked_windows().iter().map(|w| w.app_id).collect();
        }
        self.windows.clear();
        self.next_z = FOREGROUND_Z_BASE;
        self.session = SessionState::default();
        self.overlays.close_all();
        self.banner = None;
        self.browser = BrowserState::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub app_id: AppId,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub app_id: AppId,
    pub edge: ResizeEdge,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
    pub resizing: Option<ResizeSession>,
}

impl InteractionState {
    pub fn release(&mut self, app_id: AppId) {
        if self.dragging.as_ref().is_some_and(|s| s.app_id == app_id) {
            self.dragging = None;
        }
        if self.resizing.as_ref().is_some_and(|s| s.app_id == app_id) {
            self.resizing = None;
        }
    }
}
