//! Accept/decline gate shown before a draft is persisted.

use std::io;

use tracing::debug;

use crate::cli::ui::prompts::{KeyInput, WizardTerminal};
use crate::cli::ui::render::render_preview;
use crate::profile::ProfileDraft;

/// Highlighted button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Choice {
    #[default]
    Accept,
    Decline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmEvent {
    Previous,
    Next,
    Confirm,
    Cancel,
}

impl ConfirmEvent {
    pub fn from_key(key: KeyInput) -> Option<Self> {
        match key {
            KeyInput::Left | KeyInput::Char('h') => Some(ConfirmEvent::Previous),
            KeyInput::Right | KeyInput::Char('l') => Some(ConfirmEvent::Next),
            KeyInput::Enter => Some(ConfirmEvent::Confirm),
            KeyInput::CtrlC | KeyInput::Esc => Some(ConfirmEvent::Cancel),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    Confirmed,
    Declined,
    Cancelled,
}

impl ConfirmationOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, ConfirmationOutcome::Confirmed)
    }

    /// Declining counts as cancelling: nothing gets saved either way.
    pub fn is_cancelled(&self) -> bool {
        !self.is_confirmed()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfirmationStep {
    selection: Choice,
    outcome: Option<ConfirmationOutcome>,
}

impl ConfirmationStep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Choice {
        self.selection
    }

    pub fn outcome(&self) -> Option<ConfirmationOutcome> {
        self.outcome
    }

    /// Applies one event; returns the outcome once the step has terminated.
    pub fn apply(&mut self, event: ConfirmEvent) -> Option<ConfirmationOutcome> {
        if self.outcome.is_some() {
            return self.outcome;
        }
        match event {
            ConfirmEvent::Previous => self.selection = Choice::Accept,
            ConfirmEvent::Next => self.selection = Choice::Decline,
            ConfirmEvent::Confirm => {
                self.outcome = Some(match self.selection {
                    Choice::Accept => ConfirmationOutcome::Confirmed,
                    Choice::Decline => ConfirmationOutcome::Declined,
                });
            }
            ConfirmEvent::Cancel => self.outcome = Some(ConfirmationOutcome::Cancelled),
        }
        self.outcome
    }
}

/// Shows the draft and waits for the operator to accept or decline it.
pub fn run_confirmation<T: WizardTerminal>(
    draft: &ProfileDraft,
    terminal: &mut T,
) -> io::Result<ConfirmationOutcome> {
    let mut step = ConfirmationStep::new();
    loop {
        terminal.draw(&render_preview(draft, step.selection()))?;
        let Some(event) = ConfirmEvent::from_key(terminal.next_key()?) else {
            continue;
        };
        if let Some(outcome) = step.apply(event) {
            debug!(?outcome, profile = %draft.profile_name, "confirmation finished");
            return Ok(outcome);
        }
    }
}
