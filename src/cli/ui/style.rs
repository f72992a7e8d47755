use std::{
    env,
    io::{self, IsTerminal},
};

use colored::Colorize;

use crate::cli::output::color_enabled;

/// Whether stdout is a terminal and `NO_COLOR` is unset.
pub fn terminal_supports_color() -> bool {
    env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal()
}

/// Colour palette for wizard and preview frames. A plain style returns its
/// input untouched, which keeps rendered frames comparable in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiStyle {
    color: bool,
}

impl UiStyle {
    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn colored() -> Self {
        Self { color: true }
    }

    pub fn current() -> Self {
        Self {
            color: color_enabled(),
        }
    }

    pub fn title(&self, text: &str) -> String {
        self.paint(text, |text| text.bold().bright_cyan().to_string())
    }

    pub fn active(&self, text: &str) -> String {
        self.paint(text, |text| text.bold().cyan().to_string())
    }

    pub fn muted(&self, text: &str) -> String {
        self.paint(text, |text| text.dimmed().to_string())
    }

    pub fn selected(&self, text: &str) -> String {
        self.paint(text, |text| text.green().to_string())
    }

    pub fn required(&self, text: &str) -> String {
        self.paint(text, |text| text.yellow().to_string())
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(text, |text| text.bright_red().to_string())
    }

    pub fn button(&self, text: &str, focused: bool) -> String {
        if focused {
            self.paint(text, |text| text.bold().reversed().to_string())
        } else {
            self.muted(text)
        }
    }

    fn paint(&self, text: &str, apply: impl FnOnce(&str) -> String) -> String {
        if self.color {
            apply(text)
        } else {
            text.to_string()
        }
    }
}
