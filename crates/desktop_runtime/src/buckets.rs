//! Typed documents persisted as whole-document buckets.
//!
//! Every struct here is read and written in one piece through [`crate::persistence`]. Fields carry
//! `#[serde(default)]` so documents written by older builds still decode.

use std::collections::BTreeSet;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use crate::model::AppId;

pub const NOTIFICATION_LOG_CAP: usize = 50;
pub const CALCULATOR_HISTORY_CAP: usize = 50;
pub const TERMINAL_HISTORY_CAP: usize = 100;

/// A document stored under a fixed namespace.
pub trait Bucket: Serialize + DeserializeOwned + Default + 'static {
    const NAMESPACE: &'static str;
    const SCHEMA_VERSION: u32;
}

/// Namespaces owned by the desktop, in export order.
pub const KNOWN_NAMESPACES: [&str; 8] = [
    SystemSettings::NAMESPACE,
    UserProfile::NAMESPACE,
    RunningAppsDocument::NAMESPACE,
    NotificationLog::NAMESPACE,
    FileTree::NAMESPACE,
    CalculatorHistory::NAMESPACE,
    MusicLibrary::NAMESPACE,
    TerminalHistory::NAMESPACE,
];

/// Checks that `payload` decodes as the document type registered for `namespace`.
pub fn validate_bucket_payload(namespace: &str, payload: &serde_json::Value) -> Result<(), String> {
    fn check<B: Bucket>(payload: &serde_json::Value) -> Result<(), String> {
        serde_json::from_value::<B>(payload.clone())
            .map(|_| ())
            .map_err(|e| format!("bucket `{}` payload is malformed: {e}", B::NAMESPACE))
    }

    match namespace {
        SystemSettings::NAMESPACE => check::<SystemSettings>(payload),
        UserProfile::NAMESPACE => check::<UserProfile>(payload),
        RunningAppsDocument::NAMESPACE => check::<RunningAppsDocument>(payload),
        NotificationLog::NAMESPACE => check::<NotificationLog>(payload),
        FileTree::NAMESPACE => check::<FileTree>(payload),
        CalculatorHistory::NAMESPACE => check::<CalculatorHistory>(payload),
        MusicLibrary::NAMESPACE => check::<MusicLibrary>(payload),
        TerminalHistory::NAMESPACE => check::<TerminalHistory>(payload),
        other => Err(format!("unknown bucket namespace `{other}`")),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Appearance {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemSettings {
    /// Marketing version shown in "About This Mac".
    pub version: String,
    pub appearance: Appearance,
    pub accent_color: String,
    pub wallpaper_id: String,
    pub sound_enabled: bool,
    /// 0..=100.
    pub volume: u8,
    pub notifications_enabled: bool,
    pub reduced_motion: bool,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            version: "14.0".to_string(),
            appearance: Appearance::Light,
            accent_color: "#007aff".to_string(),
            wallpaper_id: "sonoma".to_string(),
            sound_enabled: true,
            volume: 60,
            notifications_enabled: true,
            reduced_motion: false,
        }
    }
}

impl Bucket for SystemSettings {
    const NAMESPACE: &'static str = "system.settings";
    const SCHEMA_VERSION: u32 = 1;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub display_name: String,
    pub avatar: String,
    /// Plain-text demo credential. This is a toy lock screen, not an authentication system.
    pub password: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            display_name: "Guest".to_string(),
            avatar: "person".to_string(),
            password: "macos".to_string(),
        }
    }
}

impl Bucket for UserProfile {
    const NAMESPACE: &'static str = "system.user";
    const SCHEMA_VERSION: u32 = 1;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunningAppsDocument {
    /// App keys in bottom-to-top stacking order.
    pub apps: Vec<String>,
    pub reopen_on_login: bool,
}

impl Default for RunningAppsDocument {
    fn default() -> Self {
        Self {
            apps: Vec::new(),
            reopen_on_login: true,
        }
    }
}

impl RunningAppsDocument {
    pub fn from_apps(apps: impl IntoIterator<Item = AppId>, reopen_on_login: bool) -> Self {
        Self {
            apps: apps.into_iter().map(|app| app.key().to_string()).collect(),
            reopen_on_login,
        }
    }

    /// Resolves stored keys, returning recognised apps (deduplicated, in order) and unknown keys.
    pub fn resolve(&self) -> (Vec<AppId>, Vec<String>) {
        let mut apps = Vec::new();
        let mut unknown = Vec::new();
        for key in &self.apps {
            match AppId::from_key(key) {
                Some(app) if !apps.contains(&app) => apps.push(app),
                Some(_) => {}
                None => unknown.push(key.clone()),
            }
        }
        (apps, unknown)
    }
}

impl Bucket for RunningAppsDocument {
    const NAMESPACE: &'static str = "system.running_apps";
    const SCHEMA_VERSION: u32 = 1;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: u64,
    pub title: String,
    pub body: String,
    pub posted_at_unix_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationLog {
    /// Newest first.
    pub items: Vec<NotificationRecord>,
}

impl NotificationLog {
    pub fn push(&mut self, record: NotificationRecord) {
        self.items.insert(0, record);
        self.items.truncate(NOTIFICATION_LOG_CAP);
    }

    pub fn next_id(&self) -> u64 {
        self.items
            .iter()
            .map(|item| item.id)
            .max()
            .unwrap_or(0)
            .saturating_add(1)
    }
}

impl Bucket for NotificationLog {
    const NAMESPACE: &'static str = "system.notifications";
    const SCHEMA_VERSION: u32 = 1;
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalHistory {
    /// Oldest first.
    pub commands: Vec<String>,
}

impl TerminalHistory {
    /// Appends a trimmed command. Blank input is ignored and reported as `false`.
    pub fn push(&mut self, command: &str) -> bool {
        let command = command.trim();
        if command.is_empty() {
            return false;
        }
        self.commands.push(command.to_string());
        if self.commands.len() > TERMINAL_HISTORY_CAP {
            let overflow = self.commands.len() - TERMINAL_HISTORY_CAP;
            self.commands.drain(..overflow);
        }
        true
    }
}

impl Bucket for TerminalHistory {
    const NAMESPACE: &'static str = "app.terminal.history";
    const SCHEMA_VERSION: u32 = 1;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationEntry {
    pub expression: String,
    pub result: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorHistory {
    /// Oldest first.
    pub entries: Vec<CalculationEntry>,
}

impl CalculatorHistory {
    pub fn push(&mut self, expression: &str, result: f64) {
        self.entries.push(CalculationEntry {
            expression: expression.trim().to_string(),
            result,
        });
        if self.entries.len() > CALCULATOR_HISTORY_CAP {
            let overflow = self.entries.len() - CALCULATOR_HISTORY_CAP;
            self.entries.drain(..overflow);
        }
    }
}

impl Bucket for CalculatorHistory {
    const NAMESPACE: &'static str = "app.calculator.history";
    const SCHEMA_VERSION: u32 = 1;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub duration_secs: u32,
}

impl Track {
    fn new(id: &str, title: &str, artist: &str, duration_secs: u32) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
            duration_secs,
        }
    }

    /// `m:ss` rendering.
    pub fn duration_label(&self) -> String {
        format!("{}:{:02}", self.duration_secs / 60, self.duration_secs % 60)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicLibrary {
    pub tracks: Vec<Track>,
    pub favorites: BTreeSet<String>,
}

impl Default for MusicLibrary {
    fn default() -> Self {
        Self {
            tracks: vec![
                Track::new("golden-hour", "Golden Hour", "Coastline", 214),
                Track::new("night-drive", "Night Drive", "Neon Avenue", 187),
                Track::new("paper-planes", "Paper Planes", "The Driftwoods", 243),
                Track::new("slow-tide", "Slow Tide", "Harbor Lights", 198),
            ],
            favorites: BTreeSet::new(),
        }
    }
}

impl MusicLibrary {
    /// Flips the favorite flag of `track_id`; returns the new flag. Unknown ids stay unfavorited.
    pub fn toggle_favorite(&mut self, track_id: &str) -> bool {
        if !self.tracks.iter().any(|track| track.id == track_id) {
            return false;
        }
        if self.favorites.remove(track_id) {
            false
        } else {
            self.favorites.insert(track_id.to_string());
            true
        }
    }

    pub fn is_favorite(&self, track_id: &str) -> bool {
        self.favorites.contains(track_id)
    }
}

impl Bucket for MusicLibrary {
    const NAMESPACE: &'static str = "app.music.library";
    const SCHEMA_VERSION: u32 = 1;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Folder,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    pub name: String,
    pub kind: FileKind,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FileNode>,
}

impl FileNode {
    pub fn folder(name: &str, children: Vec<FileNode>) -> Self {
        Self {
            name: name.to_string(),
            kind: FileKind::Folder,
            content: String::new(),
            children,
        }
    }

    pub fn file(name: &str, content: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: FileKind::File,
            content: content.to_string(),
            children: Vec::new(),
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == FileKind::Folder
    }

    fn child(&self, name: &str) -> Option<&FileNode> {
        self.children.iter().find(|child| child.name == name)
    }

    fn child_mut(&mut self, name: &str) -> Option<&mut FileNode> {
        self.children.iter_mut().find(|child| child.name == name)
    }

    /// `stem.ext`, or `stem N.ext` with the smallest N >= 2 that no child uses yet.
    pub fn unused_child_name(&self, stem: &str, ext: &str) -> String {
        let first = format!("{stem}.{ext}");
        if self.child(&first).is_none() {
            return first;
        }
        (2..)
            .map(|n| format!("{stem} {n}.{ext}"))
            .find(|name| self.child(name).is_none())
            .unwrap_or(first)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileTreeError {
    #[error("path `{0}` is not absolute")]
    InvalidPath(String),
    #[error("folder `{0}` does not exist")]
    FolderNotFound(String),
    #[error("`{0}` is a folder")]
    IsFolder(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTree {
    pub root: FileNode,
}

impl Default for FileTree {
    fn default() -> Self {
        Self {
            root: FileNode::folder(
                "",
                vec![
                    FileNode::folder("Applications", Vec::new()),
                    FileNode::folder("Desktop", Vec::new()),
                    FileNode::folder(
                        "Documents",
                        vec![FileNode::file(
                            "Welcome.txt",
                            "Welcome to your Mac. Files you save here persist in this browser.",
                        )],
                    ),
                    FileNode::folder("Downloads", Vec::new()),
                ],
            ),
        }
    }
}

/// Absolute path of `name` inside `folder`.
pub fn join_path(folder: &str, name: &str) -> String {
    format!("{}/{name}", folder.trim_end_matches('/'))
}

/// Folder containing `path`; the root is its own parent.
pub fn parent_path(path: &str) -> String {
    match path.trim_end_matches('/').rsplit_once('/') {
        Some((parent, _)) if !parent.is_empty() => parent.to_string(),
        _ => "/".to_string(),
    }
}

fn split_path(path: &str) -> Result<Vec<&str>, FileTreeError> {
    let rest = path
        .strip_prefix('/')
        .ok_or_else(|| FileTreeError::InvalidPath(path.to_string()))?;
    Ok(rest.split('/').filter(|part| !part.is_empty()).collect())
}

impl FileTree {
    /// Node at the absolute `path`; `/` is the root folder.
    pub fn find(&self, path: &str) -> Option<&FileNode> {
        let parts = split_path(path).ok()?;
        parts
            .into_iter()
            .try_fold(&self.root, |node, part| node.child(part))
    }

    pub fn read_file(&self, path: &str) -> Option<&str> {
        self.find(path)
            .filter(|node| !node.is_folder())
            .map(|node| node.content.as_str())
    }

    /// Creates or replaces the file at `path`. The parent folder must already exist.
    pub fn write_file(&mut self, path: &str, content: &str) -> Result<(), FileTreeError> {
        let mut parts = split_path(path)?;
        let Some(name) = parts.pop() else {
            return Err(FileTreeError::IsFolder(path.to_string()));
        };

        let mut folder = &mut self.root;
        for part in &parts {
            folder = match folder.child_mut(part) {
                Some(next) if next.is_folder() => next,
                _ => return Err(FileTreeError::FolderNotFound(format!("/{}", parts.join("/")))),
            };
        }

        match folder.child_mut(name) {
            Some(existing) if existing.is_folder() => Err(FileTreeError::IsFolder(path.to_string())),
            Some(existing) => {
                existing.content = content.to_string();
                Ok(())
            }
            None => {
                folder.children.push(FileNode::file(name, content));
                folder.children.sort_by(|a, b| a.name.cmp(&b.name));
                Ok(())
            }
        }
    }
}

impl Bucket for FileTree {
    const NAMESPACE: &'static str = "app.finder.files";
    const SCHEMA_VERSION: u32 = 1;
}
