//! Global keyboard shortcut table.
//!
//! Resolution is a pure function of the pressed chord and the lock state so it can be tested
//! without a DOM. The shell translates `KeyboardEvent`s into [`KeyChord`]s and dispatches
//! [`crate::DesktopAction::Shortcut`] for whatever resolves.

use crate::model::AppId;

/// Keyboard chord snapshot taken from a `keydown` event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyChord {
    /// `KeyboardEvent.key` value, e.g. `"q"`, `" "`, `"F3"`, `"Escape"`.
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
}

impl KeyChord {
    pub fn plain(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ..Self::default()
        }
    }

    /// Chord with the command modifier held (Meta on macOS keyboards).
    pub fn command(key: &str) -> Self {
        Self {
            key: key.to_string(),
            meta: true,
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    /// Meta or Ctrl; both act as the command modifier so the table works on every keyboard.
    pub fn has_command(&self) -> bool {
        self.meta || self.ctrl
    }

    pub fn has_modifier(&self) -> bool {
        self.ctrl || self.meta || self.alt || self.shift
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutCommand {
    Lock,
    ToggleSpotlight,
    ToggleMissionControl,
    ToggleLaunchpad,
    OpenApp(AppId),
    CloseFrontApp,
    QuitFrontApp,
    CycleAppSwitcher,
    DismissOverlays,
    SubmitPassword,
}

/// Maps a chord to a shortcut command.
///
/// While `locked`, only a bare Enter resolves (it submits the password field).
pub fn resolve_shortcut(chord: &KeyChord, locked: bool) -> Option<ShortcutCommand> {
    let key = chord.key.as_str();

    if locked {
        return (key == "Enter" && !chord.has_modifier()).then_some(ShortcutCommand::SubmitPassword);
    }

    match key {
        "Escape" => return Some(ShortcutCommand::DismissOverlays),
        "F3" => return Some(ShortcutCommand::ToggleMissionControl),
        "F4" => return Some(ShortcutCommand::ToggleLaunchpad),
        "ArrowUp" if chord.ctrl && !chord.meta => {
            return Some(ShortcutCommand::ToggleMissionControl)
        }
        _ => {}
    }

    if !chord.has_command() || chord.alt {
        return None;
    }

    let lowered = key.to_ascii_lowercase();
    match lowered.as_str() {
        "q" if chord.ctrl && chord.meta => Some(ShortcutCommand::Lock),
        "l" => Some(ShortcutCommand::Lock),
        " " | "spacebar" => Some(ShortcutCommand::ToggleSpotlight),
        "n" => Some(ShortcutCommand::OpenApp(AppId::Finder)),
        "w" => Some(ShortcutCommand::CloseFrontApp),
        "q" => Some(ShortcutCommand::QuitFrontApp),
        "tab" => Some(ShortcutCommand::CycleAppSwitcher),
        _ => None,
    }
}
