//! Scripted key input for driving the binary without a terminal.
//!
//! When `OTORI_TEST_KEYS` is set, every key the CLI would read from the
//! terminal is taken from this queue instead. Tokens are comma separated:
//! single characters type themselves, named keys (`ENTER`, `UP`, `CTRL_D`,
//! ...) map to [`KeyInput`] variants and `TEXT:<value>` types each character
//! of `<value>`. An exhausted queue answers with Ctrl+C so a short script can
//! never hang the process.

use once_cell::sync::Lazy;
use std::{collections::VecDeque, env, sync::Mutex};

use crate::cli::ui::prompts::KeyInput;

pub const TEST_KEYS_ENV: &str = "OTORI_TEST_KEYS";

struct KeyQueue {
    enabled: bool,
    keys: VecDeque<KeyInput>,
}

impl KeyQueue {
    fn from_env() -> Self {
        match env::var(TEST_KEYS_ENV) {
            Ok(raw) => Self {
                enabled: true,
                keys: parse_key_script(&raw),
            },
            Err(_) => Self::new(),
        }
    }

    fn new() -> Self {
        Self {
            enabled: false,
            keys: VecDeque::new(),
        }
    }

    fn next(&mut self) -> Option<KeyInput> {
        if !self.enabled {
            return None;
        }
        Some(self.keys.pop_front().unwrap_or(KeyInput::CtrlC))
    }
}

static KEYS: Lazy<Mutex<KeyQueue>> = Lazy::new(|| Mutex::new(KeyQueue::from_env()));

pub fn is_enabled() -> bool {
    KEYS.lock().expect("key queue poisoned").enabled
}

/// Next scripted key, or `None` when scripting is off.
pub fn next_key() -> Option<KeyInput> {
    KEYS.lock().expect("key queue poisoned").next()
}

pub fn parse_key_script(raw: &str) -> VecDeque<KeyInput> {
    raw.split(',')
        .flat_map(|token| parse_token(token.trim()))
        .collect()
}

fn parse_token(token: &str) -> Vec<KeyInput> {
    if let Some(text) = token.strip_prefix("TEXT:") {
        return text.chars().map(KeyInput::Char).collect();
    }
    let mut chars = token.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        return vec![KeyInput::Char(ch)];
    }
    let key = match token.to_ascii_uppercase().as_str() {
        "UP" => KeyInput::Up,
        "DOWN" => KeyInput::Down,
        "LEFT" => KeyInput::Left,
        "RIGHT" => KeyInput::Right,
        "ENTER" | "RETURN" => KeyInput::Enter,
        "ESC" | "ESCAPE" => KeyInput::Esc,
        "BACKSPACE" | "BS" => KeyInput::Backspace,
        "CTRL_C" => KeyInput::CtrlC,
        "CTRL_D" => KeyInput::CtrlD,
        "SPACE" => KeyInput::Char(' '),
        "COMMA" => KeyInput::Char(','),
        _ => return Vec::new(),
    };
    vec![key]
}
