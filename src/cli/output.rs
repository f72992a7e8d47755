use colored::Colorize;
use std::fmt;
use std::sync::{OnceLock, RwLock};

use crate::cli::ui::style::terminal_supports_color;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

#[derive(Clone, Copy, Debug)]
pub struct OutputPreferences {
    pub color: bool,
    pub quiet_mode: bool,
}

impl Default for OutputPreferences {
    fn default() -> Self {
        Self {
            color: true,
            quiet_mode: false,
        }
    }
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

pub fn set_preferences(prefs: OutputPreferences) {
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
}

pub fn current_preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

/// Colour is used only when the preferences allow it and stdout can show it.
pub fn color_enabled() -> bool {
    current_preferences().color && terminal_supports_color()
}

fn should_skip(kind: MessageKind, prefs: &OutputPreferences) -> bool {
    prefs.quiet_mode && matches!(kind, MessageKind::Info | MessageKind::Section)
}

fn icon(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Info => "",
        MessageKind::Success => "✓",
        MessageKind::Warning => "!",
        MessageKind::Error => "✗",
        MessageKind::Section => "",
    }
}

pub fn format_message(kind: MessageKind, message: impl fmt::Display, color: bool) -> String {
    let text = message.to_string();
    let base = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        _ if icon(kind).is_empty() => text,
        _ => format!("{} {}", icon(kind), text),
    };
    if !color {
        return base;
    }
    match kind {
        MessageKind::Success => base.bright_green().to_string(),
        MessageKind::Warning => base.bright_yellow().to_string(),
        MessageKind::Error => base.bright_red().to_string(),
        MessageKind::Section => base.bold().to_string(),
        MessageKind::Info => base,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let prefs = current_preferences();
    if should_skip(kind, &prefs) {
        return;
    }
    let formatted = format_message(kind, message, color_enabled());
    match kind {
        MessageKind::Error | MessageKind::Warning => eprintln!("{}", formatted),
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_messages_carry_icons() {
        assert_eq!(
            format_message(MessageKind::Success, "Profile saved", false),
            "✓ Profile saved"
        );
        assert_eq!(format_message(MessageKind::Error, "boom", false), "✗ boom");
        assert_eq!(format_message(MessageKind::Info, "hello", false), "hello");
        assert_eq!(
            format_message(MessageKind::Section, " Profiles ", false),
            "=== Profiles ==="
        );
    }

    #[test]
    fn quiet_mode_only_hides_informational_output() {
        let prefs = OutputPreferences {
            color: false,
            quiet_mode: true,
        };
        assert!(should_skip(MessageKind::Info, &prefs));
        assert!(!should_skip(MessageKind::Error, &prefs));
        assert!(!should_skip(MessageKind::Success, &prefs));
    }
}
