//! App catalog plus the small pure helpers the bundled apps share.

use crate::{buckets::TerminalHistory, model::AppId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppDescriptor {
    pub app_id: AppId,
    pub dock_label: &'static str,
    /// Extra search terms for Spotlight.
    pub keywords: &'static [&'static str],
    pub show_in_dock: bool,
    pub show_on_desktop: bool,
}

const APP_REGISTRY: [AppDescriptor; 6] = [
    AppDescriptor {
        app_id: AppId::Finder,
        dock_label: "Finder",
        keywords: &["files", "folders", "documents"],
        show_in_dock: true,
        show_on_desktop: true,
    },
    AppDescriptor {
        app_id: AppId::Safari,
        dock_label: "Safari",
        keywords: &["browser", "web", "internet"],
        show_in_dock: true,
        show_on_desktop: false,
    },
    AppDescriptor {
        app_id: AppId::Music,
        dock_label: "Music",
        keywords: &["songs", "player", "audio"],
        show_in_dock: true,
        show_on_desktop: false,
    },
    AppDescriptor {
        app_id: AppId::Calculator,
        dock_label: "Calculator",
        keywords: &["math", "numbers"],
        show_in_dock: true,
        show_on_desktop: false,
    },
    AppDescriptor {
        app_id: AppId::Terminal,
        dock_label: "Terminal",
        keywords: &["shell", "console", "command"],
        show_in_dock: true,
        show_on_desktop: true,
    },
    AppDescriptor {
        app_id: AppId::SystemPreferences,
        dock_label: "System Preferences",
        keywords: &["settings", "sound", "appearance", "notifications"],
        show_in_dock: true,
        show_on_desktop: false,
    },
];

pub fn app_registry() -> &'static [AppDescriptor] {
    &APP_REGISTRY
}

pub fn dock_apps() -> impl Iterator<Item = &'static AppDescriptor> {
    app_registry().iter().filter(|entry| entry.show_in_dock)
}

pub fn desktop_icon_apps() -> impl Iterator<Item = &'static AppDescriptor> {
    app_registry().iter().filter(|entry| entry.show_on_desktop)
}

/// Apps whose label or keywords contain `query` (case-insensitive). An empty query matches all.
pub fn search_apps(query: &str) -> Vec<AppId> {
    let query = query.trim().to_lowercase();
    app_registry()
        .iter()
        .filter(|entry| {
            query.is_empty()
                || entry.dock_label.to_lowercase().contains(&query)
                || entry.keywords.iter().any(|keyword| keyword.contains(&query))
        })
        .map(|entry| entry.app_id)
        .collect()
}

/// Normalizes address-bar input. Blank input yields `None`; bare hosts get `https://`.
pub fn normalize_url(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if input.contains("://") || input.starts_with("about:") {
        Some(input.to_string())
    } else {
        Some(format!("https://{input}"))
    }
}

/// Evaluates a single binary expression such as `12 * 3.5`.
pub fn evaluate_expression(input: &str) -> Option<f64> {
    let input = input.trim();
    // Skip index 0 so a leading minus sign belongs to the left operand.
    let (index, op) = input
        .char_indices()
        .skip(1)
        .find(|(_, ch)| matches!(ch, '+' | '-' | '*' | '/' | '×' | '÷'))?;
    let lhs: f64 = input[..index].trim().parse().ok()?;
    let rhs: f64 = input[index + op.len_utf8()..].trim().parse().ok()?;
    let value = match op {
        '+' => lhs + rhs,
        '-' => lhs - rhs,
        '*' | '×' => lhs * rhs,
        _ if rhs == 0.0 => return None,
        _ => lhs / rhs,
    };
    value.is_finite().then_some(value)
}

/// Calculator display text: integers without a fraction, otherwise at most ten decimals.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let fixed = format!("{value:.10}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Terminal output for one submitted command line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TerminalReply {
    pub lines: Vec<String>,
    /// App the command asked to open.
    pub open: Option<AppId>,
    /// Whether the scrollback should be cleared.
    pub clear: bool,
}

impl TerminalReply {
    fn lines(lines: impl IntoIterator<Item = String>) -> Self {
        Self {
            lines: lines.into_iter().collect(),
            ..Self::default()
        }
    }
}

/// Runs one line of the built-in terminal. Only the fixed command set below is understood.
pub fn run_terminal_command(input: &str, history: &TerminalHistory, user: &str) -> TerminalReply {
    let input = input.trim();
    let (command, args) = input
        .split_once(char::is_whitespace)
        .map(|(command, args)| (command, args.trim()))
        .unwrap_or((input, ""));

    match command {
        "" => TerminalReply::default(),
        "help" => TerminalReply::lines(
            ["help", "clear", "echo <text>", "history", "open <app>", "whoami"]
                .into_iter()
                .map(str::to_string),
        ),
        "clear" => TerminalReply {
            clear: true,
            ..TerminalReply::default()
        },
        "echo" => TerminalReply::lines([args.to_string()]),
        "whoami" => TerminalReply::lines([user.to_string()]),
        "history" => TerminalReply::lines(
            history
                .commands
                .iter()
                .enumerate()
                .map(|(index, command)| format!("{:>4}  {command}", index + 1)),
        ),
        "open" => match AppId::from_key(&args.to_lowercase()) {
            Some(app_id) => TerminalReply {
                open: Some(app_id),
                ..TerminalReply::default()
            },
            None => TerminalReply::lines([format!("open: unknown application `{args}`")]),
        },
        other => TerminalReply::lines([format!("zsh: command not found: {other}")]),
    }
}
