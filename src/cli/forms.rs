//! Wizard-style form used to assemble a profile draft.
//!
//! A [`WizardSession`] owns a fixed sequence of typed fields and consumes one
//! [`WizardEvent`] at a time. [`FormEngine`] wires a session to a
//! [`WizardTerminal`], redrawing after every event until the operator
//! finishes the last field or cancels.

use std::io;

use tracing::debug;

use crate::cli::ui::prompts::{KeyInput, WizardTerminal};
use crate::cli::ui::render::render_wizard;
use crate::profile::{
    sanitize_entry, sanitize_users, validate_field, validate_users,
    validation::{
        FIELD_COMPANY, FIELD_PROFILE_NAME, FIELD_SERVER_NAME, FIELD_TYPE, FIELD_USERS,
    },
    ProfileDraft, ProfileType, DEFAULT_PROFILE_NAME,
};

/// High-level lifecycle states emitted by the form runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormResult<T> {
    Completed(T),
    Cancelled,
}

/// Discrete input accepted by the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardEvent {
    Insert(char),
    Backspace,
    Up,
    Down,
    Confirm,
    /// Done with the current list field (Ctrl+D).
    FinishList,
    Cancel,
}

impl WizardEvent {
    pub fn from_key(key: KeyInput) -> Option<Self> {
        match key {
            KeyInput::Char(ch) => Some(WizardEvent::Insert(ch)),
            KeyInput::Backspace => Some(WizardEvent::Backspace),
            KeyInput::Up => Some(WizardEvent::Up),
            KeyInput::Down => Some(WizardEvent::Down),
            KeyInput::Enter => Some(WizardEvent::Confirm),
            KeyInput::CtrlD => Some(WizardEvent::FinishList),
            KeyInput::CtrlC | KeyInput::Esc => Some(WizardEvent::Cancel),
            KeyInput::Left | KeyInput::Right => None,
        }
    }
}

/// What a single event did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The current field's content or selection changed.
    Edited,
    /// The cursor moved to another field.
    Moved,
    /// The event was refused; the reason is in [`WizardSession::last_error`].
    Rejected,
    Finished,
    Cancelled,
    NoOp,
}

/// Per-type editing state of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Text {
        value: String,
    },
    Select {
        options: Vec<String>,
        selected: usize,
        value: String,
    },
    List {
        pending: String,
        entries: Vec<String>,
    },
}

/// One wizard slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub key: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub required: bool,
    /// Value used when the field is left blank.
    pub fallback: Option<String>,
    pub input: FieldInput,
}

impl Field {
    pub fn text(key: &'static str, label: &'static str, value: impl Into<String>) -> Self {
        Self::with_input(
            key,
            label,
            FieldInput::Text {
                value: value.into(),
            },
        )
    }

    /// Select field positioned on `value` when it is one of `options`,
    /// otherwise on the first option while keeping `value` untouched.
    pub fn select(
        key: &'static str,
        label: &'static str,
        options: Vec<String>,
        value: Option<&str>,
    ) -> Self {
        let (selected, value) = match value {
            Some(current) => {
                let selected = options
                    .iter()
                    .position(|option| option.eq_ignore_ascii_case(current.trim()));
                match selected {
                    Some(index) => (index, options[index].clone()),
                    None => (0, current.to_string()),
                }
            }
            None => (0, options.first().cloned().unwrap_or_default()),
        };
        Self::with_input(
            key,
            label,
            FieldInput::Select {
                options,
                selected,
                value,
            },
        )
    }

    pub fn list(key: &'static str, label: &'static str, entries: Vec<String>) -> Self {
        Self::with_input(
            key,
            label,
            FieldInput::List {
                pending: String::new(),
                entries,
            },
        )
    }

    fn with_input(key: &'static str, label: &'static str, input: FieldInput) -> Self {
        Self {
            key,
            label,
            placeholder: "",
            required: false,
            fallback: None,
            input,
        }
    }

    pub fn with_required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    pub fn is_list(&self) -> bool {
        matches!(self.input, FieldInput::List { .. })
    }

    /// Scalar value for Text and Select fields.
    pub fn value(&self) -> &str {
        match &self.input {
            FieldInput::Text { value } | FieldInput::Select { value, .. } => value.as_str(),
            FieldInput::List { .. } => "",
        }
    }

    pub fn entries(&self) -> &[String] {
        match &self.input {
            FieldInput::List { entries, .. } => entries.as_slice(),
            _ => &[],
        }
    }

    fn has_pending_input(&self) -> bool {
        matches!(&self.input, FieldInput::List { pending, .. } if !pending.is_empty())
    }

    fn insert(&mut self, ch: char) -> Result<(), &'static str> {
        match &mut self.input {
            FieldInput::Text { value } => value.push(ch),
            FieldInput::List { pending, .. } => pending.push(ch),
            FieldInput::Select { .. } => return Err(SELECT_HINT),
        }
        Ok(())
    }

    /// Returns whether anything was removed. On a list field with an empty
    /// buffer the last accepted entry is dropped.
    fn backspace(&mut self) -> Result<bool, &'static str> {
        match &mut self.input {
            FieldInput::Text { value } => Ok(value.pop().is_some()),
            FieldInput::List { pending, entries } => {
                Ok(pending.pop().is_some() || entries.pop().is_some())
            }
            FieldInput::Select { .. } => Err(SELECT_HINT),
        }
    }

    /// Moves a select cursor by one step, clamped to the option range.
    /// Returns whether the selection changed.
    fn step_selection(&mut self, forward: bool) -> bool {
        let FieldInput::Select {
            options,
            selected,
            value,
        } = &mut self.input
        else {
            return false;
        };
        if options.is_empty() {
            return false;
        }
        let next = if forward {
            (*selected + 1).min(options.len() - 1)
        } else {
            selected.saturating_sub(1)
        };
        // An unknown seeded value snaps onto the clamped option.
        if next == *selected && options[next] == *value {
            return false;
        }
        *selected = next;
        *value = options[next].clone();
        true
    }

    /// Moves the pending list entry into the accumulated entries.
    fn flush_pending(&mut self) {
        if let FieldInput::List { pending, entries } = &mut self.input {
            let cleaned = sanitize_entry(pending);
            if !cleaned.is_empty() {
                entries.push(cleaned);
            }
            pending.clear();
        }
    }

    fn clear_pending(&mut self) {
        if let FieldInput::List { pending, .. } = &mut self.input {
            pending.clear();
        }
    }

    /// Trims the scalar value in place and checks it before the cursor leaves.
    fn validate(&mut self) -> Result<(), String> {
        let value = match &mut self.input {
            FieldInput::Text { value } => {
                *value = value.trim().to_string();
                value.clone()
            }
            FieldInput::Select { value, .. } => value.trim().to_string(),
            FieldInput::List { entries, .. } => {
                return match validate_users(entries).into_iter().next() {
                    Some(err) => Err(err.message),
                    None => Ok(()),
                };
            }
        };
        let effective = match (value.is_empty(), &self.fallback) {
            (true, Some(fallback)) => fallback.clone(),
            _ => value,
        };
        if self.required && effective.is_empty() {
            return Err(format!("{} is required", self.label));
        }
        validate_field(self.key, &effective).map_err(|err| err.message)
    }
}

const SELECT_HINT: &str = "Use ↑/↓ to choose an option";
const CONTROL_HINT: &str = "Control characters cannot be typed here";

/// Builds the profile form, pre-filled from `seed` when editing. A blank
/// profile name falls back to `default_name`.
pub fn profile_fields(seed: Option<&ProfileDraft>, default_name: &str) -> Vec<Field> {
    let text = |select: fn(&ProfileDraft) -> &str| seed.map(select).unwrap_or("").to_string();
    vec![
        Field::select(
            FIELD_TYPE,
            "Profile type",
            ProfileType::options(),
            seed.map(|draft| draft.profile_type.as_str()),
        )
        .with_required(),
        Field::text(
            FIELD_SERVER_NAME,
            "Server name",
            text(|draft| draft.server_name.as_str()),
        )
        .with_placeholder("e.g. my-server")
        .with_required(),
        Field::text(
            FIELD_PROFILE_NAME,
            "Profile name",
            text(|draft| draft.profile_name.as_str()),
        )
        .with_placeholder("default if empty")
        .with_fallback(default_name),
        Field::text(FIELD_COMPANY, "Company", text(|draft| draft.company.as_str()))
            .with_placeholder("optional"),
        Field::list(
            FIELD_USERS,
            "Users",
            seed.map(|draft| draft.users.clone()).unwrap_or_default(),
        )
        .with_placeholder("one per line (Enter to add, Ctrl+D to finish)"),
    ]
}

/// Represents an in-progress wizard session.
///
/// The field sequence is fixed at construction; fields are only ever
/// addressed by index.
#[derive(Debug, Clone)]
pub struct WizardSession {
    fields: Vec<Field>,
    index: usize,
    finished: bool,
    cancelled: bool,
    last_error: Option<String>,
    created_at: String,
}

impl WizardSession {
    pub fn new(seed: Option<&ProfileDraft>) -> Self {
        Self::with_default_name(seed, DEFAULT_PROFILE_NAME)
    }

    pub fn with_default_name(seed: Option<&ProfileDraft>, default_name: &str) -> Self {
        let mut session = Self::with_fields(profile_fields(seed, default_name));
        if let Some(draft) = seed {
            session.created_at = draft.created_at.clone();
        }
        session
    }

    pub fn with_fields(fields: Vec<Field>) -> Self {
        Self {
            fields,
            index: 0,
            finished: false,
            cancelled: false,
            last_error: None,
            created_at: String::new(),
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_field(&self) -> Option<&Field> {
        self.fields.get(self.index)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn apply(&mut self, event: WizardEvent) -> SessionEvent {
        if self.finished || self.cancelled || self.fields.is_empty() {
            return SessionEvent::NoOp;
        }

        match event {
            WizardEvent::Cancel => {
                self.cancelled = true;
                SessionEvent::Cancelled
            }
            WizardEvent::Insert(ch) if ch.is_control() => self.reject(CONTROL_HINT),
            WizardEvent::Insert(ch) => {
                let result = self.fields[self.index].insert(ch);
                self.edited(result.map(|_| true))
            }
            WizardEvent::Backspace => {
                let result = self.fields[self.index].backspace();
                self.edited(result)
            }
            WizardEvent::Up => self.navigate(false),
            WizardEvent::Down => self.navigate(true),
            WizardEvent::Confirm => self.confirm(),
            WizardEvent::FinishList => {
                let field = &mut self.fields[self.index];
                if !field.is_list() {
                    return self.reject("Ctrl+D only finishes a list field");
                }
                field.flush_pending();
                self.leave_current()
            }
        }
    }

    /// Collects the field values into a draft.
    pub fn to_draft(&self) -> ProfileDraft {
        let mut draft = ProfileDraft {
            created_at: self.created_at.clone(),
            ..ProfileDraft::default()
        };
        for field in &self.fields {
            let value = field.value().trim().to_string();
            match field.key {
                FIELD_TYPE => draft.profile_type = value,
                FIELD_SERVER_NAME => draft.server_name = value,
                FIELD_PROFILE_NAME => {
                    draft.profile_name = if value.is_empty() {
                        field.fallback.clone().unwrap_or_default()
                    } else {
                        value
                    }
                }
                FIELD_COMPANY => draft.company = value,
                FIELD_USERS => draft.users = sanitize_users(field.entries()),
                _ => {}
            }
        }
        draft
    }

    fn edited(&mut self, result: Result<bool, &'static str>) -> SessionEvent {
        match result {
            Ok(true) => {
                self.last_error = None;
                SessionEvent::Edited
            }
            Ok(false) => SessionEvent::NoOp,
            Err(hint) => self.reject(hint),
        }
    }

    fn navigate(&mut self, forward: bool) -> SessionEvent {
        let field = &mut self.fields[self.index];
        if matches!(field.input, FieldInput::Select { .. }) {
            return if field.step_selection(forward) {
                self.last_error = None;
                SessionEvent::Edited
            } else {
                SessionEvent::NoOp
            };
        }
        if field.has_pending_input() {
            return self.reject("Press Enter to add the entry or Ctrl+D to finish the list");
        }

        let target = if forward {
            if self.index + 1 >= self.fields.len() {
                return self.reject("Already at the last field.");
            }
            self.index + 1
        } else {
            if self.index == 0 {
                return self.reject("Already at the first field.");
            }
            self.index - 1
        };
        self.fields[self.index].clear_pending();
        self.index = target;
        self.last_error = None;
        SessionEvent::Moved
    }

    fn confirm(&mut self) -> SessionEvent {
        let field = &mut self.fields[self.index];
        if field.has_pending_input() {
            field.flush_pending();
            self.last_error = None;
            return SessionEvent::Edited;
        }
        self.leave_current()
    }

    /// Advances only when the current field passes its own rule.
    fn leave_current(&mut self) -> SessionEvent {
        match self.fields[self.index].validate() {
            Ok(()) => self.advance(),
            Err(message) => self.reject(&message),
        }
    }

    fn advance(&mut self) -> SessionEvent {
        self.last_error = None;
        if self.index + 1 < self.fields.len() {
            self.index += 1;
            SessionEvent::Moved
        } else {
            self.finished = true;
            SessionEvent::Finished
        }
    }

    fn reject(&mut self, message: &str) -> SessionEvent {
        self.last_error = Some(message.to_string());
        SessionEvent::Rejected
    }
}

/// Drives a [`WizardSession`] using a [`WizardTerminal`] implementation.
pub struct FormEngine {
    session: WizardSession,
}

impl FormEngine {
    pub fn new(seed: Option<&ProfileDraft>) -> Self {
        Self::from_session(WizardSession::new(seed))
    }

    pub fn from_session(session: WizardSession) -> Self {
        Self { session }
    }

    pub fn run<T: WizardTerminal>(mut self, terminal: &mut T) -> io::Result<FormResult<ProfileDraft>> {
        loop {
            terminal.draw(&render_wizard(&self.session))?;
            let Some(event) = WizardEvent::from_key(terminal.next_key()?) else {
                continue;
            };
            match self.session.apply(event) {
                SessionEvent::Finished => {
                    debug!("profile wizard finished");
                    return Ok(FormResult::Completed(self.session.to_draft()));
                }
                SessionEvent::Cancelled => {
                    debug!("profile wizard cancelled");
                    return Ok(FormResult::Cancelled);
                }
                _ => continue,
            }
        }
    }
}

/// Runs the profile wizard, optionally seeded with an existing profile.
pub fn run_wizard<T: WizardTerminal>(
    seed: Option<&ProfileDraft>,
    terminal: &mut T,
) -> io::Result<FormResult<ProfileDraft>> {
    FormEngine::new(seed).run(terminal)
}
