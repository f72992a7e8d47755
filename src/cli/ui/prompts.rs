use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{self, ClearType},
    QueueableCommand,
};

use crate::cli::ui::test_mode;

/// Keys the wizard and confirmation step understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Backspace,
    Up,
    Down,
    Left,
    Right,
    Enter,
    CtrlC,
    CtrlD,
    Esc,
}

impl KeyInput {
    pub fn from_key_event(key: KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('C') => Some(KeyInput::CtrlC),
                KeyCode::Char('d') | KeyCode::Char('D') => Some(KeyInput::CtrlD),
                _ => None,
            };
        }
        match key.code {
            KeyCode::Char(ch) => Some(KeyInput::Char(ch)),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Up => Some(KeyInput::Up),
            KeyCode::Down => Some(KeyInput::Down),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Esc => Some(KeyInput::Esc),
            _ => None,
        }
    }
}

/// Source of keys and sink of rendered frames for the interactive steps.
pub trait WizardTerminal {
    fn draw(&mut self, frame: &str) -> io::Result<()>;
    fn next_key(&mut self) -> io::Result<KeyInput>;
}

/// Raw-mode terminal backed by crossterm.
///
/// With scripted keys installed (see [`test_mode`]) raw mode is never entered
/// and frames are printed as plain text so they can be captured.
pub struct CrosstermTerminal {
    guard: Option<RawModeGuard>,
}

impl CrosstermTerminal {
    pub fn new() -> io::Result<Self> {
        if test_mode::is_enabled() {
            return Ok(Self { guard: None });
        }
        Ok(Self {
            guard: Some(RawModeGuard::activate()?),
        })
    }

    pub fn is_scripted(&self) -> bool {
        self.guard.is_none()
    }
}

impl WizardTerminal for CrosstermTerminal {
    fn draw(&mut self, frame: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        if self.is_scripted() {
            writeln!(stdout, "{frame}")?;
            return stdout.flush();
        }
        stdout.queue(cursor::MoveTo(0, 0))?;
        stdout.queue(terminal::Clear(ClearType::All))?;
        write!(stdout, "{}", raw_frame(frame))?;
        stdout.flush()
    }

    fn next_key(&mut self) -> io::Result<KeyInput> {
        if let Some(key) = test_mode::next_key() {
            return Ok(key);
        }
        loop {
            if let Event::Key(key) = event::read()? {
                if let Some(input) = KeyInput::from_key_event(key) {
                    return Ok(input);
                }
            }
        }
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        if let Some(mut guard) = self.guard.take() {
            guard.deactivate();
            println!();
        }
    }
}

/// Raw mode does not translate line feeds.
fn raw_frame(frame: &str) -> String {
    frame.replace('\n', "\r\n")
}

struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    fn activate() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self { active: true })
    }

    fn deactivate(&mut self) {
        if self.active {
            let _ = terminal::disable_raw_mode();
            self.active = false;
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        self.deactivate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn control_chords_map_to_control_keys() {
        assert_eq!(
            KeyInput::from_key_event(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyInput::CtrlC)
        );
        assert_eq!(
            KeyInput::from_key_event(press(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            Some(KeyInput::CtrlD)
        );
        assert_eq!(
            KeyInput::from_key_event(press(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn plain_keys_map_directly() {
        assert_eq!(
            KeyInput::from_key_event(press(KeyCode::Char('D'), KeyModifiers::SHIFT)),
            Some(KeyInput::Char('D'))
        );
        assert_eq!(
            KeyInput::from_key_event(press(KeyCode::Esc, KeyModifiers::NONE)),
            Some(KeyInput::Esc)
        );
        assert_eq!(
            KeyInput::from_key_event(press(KeyCode::Tab, KeyModifiers::NONE)),
            None
        );
    }

    #[test]
    fn releases_are_ignored() {
        let mut key = press(KeyCode::Enter, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(KeyInput::from_key_event(key), None);
    }

    #[test]
    fn raw_frame_uses_carriage_returns() {
        assert_eq!(raw_frame("a\nb\n"), "a\r\nb\r\n");
    }
}
