//! Profile commands shared by the binary and the integration tests.
//!
//! Interactive commands take the terminal as a parameter so tests can feed
//! keys without a tty. Nothing here prints; callers turn outcomes into output.

use std::{fmt::Write as _, io, path::PathBuf};

use dialoguer::{theme::ColorfulTheme, Confirm};
use thiserror::Error;
use tracing::{info, warn};

use crate::cli::confirm::run_confirmation;
use crate::cli::forms::{FormEngine, FormResult, WizardSession};
use crate::cli::ui::prompts::WizardTerminal;
use crate::cli::ui::render::{format_users, preview_rows};
use crate::config::{Config, ConfigError};
use crate::errors::ProfileError;
use crate::profile::{
    is_valid_profile_name, sanitize_entry, validate, ProfileDraft, ValidationError,
};
use crate::storage::ProfileStorage;

const CREATED_COLUMN_WIDTH: usize = 16;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error("Profile `{0}` already exists")]
    AlreadyExists(String),
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CommandError {
    /// Field errors carried by a failed validation, if that is what this is.
    pub fn validation_errors(&self) -> Option<&[ValidationError]> {
        match self {
            CommandError::Profile(ProfileError::Validation(errors)) => Some(errors),
            _ => None,
        }
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Saved { name: String, path: PathBuf },
    /// A rename wrote the new record but the old one could not be removed.
    SavedWithLeftover {
        name: String,
        path: PathBuf,
        leftover: String,
    },
    Deleted { name: String },
    /// The operator backed out; nothing was written.
    Cancelled,
}

/// Flag values for a non-interactive `init`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOptions {
    pub profile_type: Option<String>,
    pub server_name: Option<String>,
    pub profile_name: Option<String>,
    pub company: Option<String>,
    pub users: Vec<String>,
}

impl CreateOptions {
    pub fn is_empty(&self) -> bool {
        *self == CreateOptions::default()
    }

    pub fn into_draft(self, default_name: &str) -> CommandResult<ProfileDraft> {
        let profile_type = self
            .profile_type
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                CommandError::InvalidArguments(
                    "--type is required in non-interactive mode".into(),
                )
            })?;
        let server_name = self
            .server_name
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                CommandError::InvalidArguments(
                    "--server-name is required in non-interactive mode".into(),
                )
            })?;
        let profile_name = self
            .profile_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| default_name.to_string());

        Ok(ProfileDraft {
            profile_type: profile_type.trim().to_lowercase(),
            server_name: server_name.trim().to_string(),
            profile_name,
            company: self.company.unwrap_or_default().trim().to_string(),
            users: self.users,
            created_at: String::new(),
        })
    }
}

/// Splits a `--users a,b,c` value into entries, dropping blanks.
pub fn parse_user_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(sanitize_entry)
        .filter(|user| !user.is_empty())
        .collect()
}

/// Validates and writes a draft. Nothing touches the disk when a rule fails.
pub fn save_validated<S: ProfileStorage>(
    store: &S,
    mut draft: ProfileDraft,
) -> CommandResult<CommandOutcome> {
    draft.sanitize_users();
    let errors = validate(&draft);
    if !errors.is_empty() {
        return Err(ProfileError::Validation(errors).into());
    }
    let path = store.write(&mut draft)?;
    Ok(CommandOutcome::Saved {
        name: draft.profile_name,
        path,
    })
}

fn save_new<S: ProfileStorage>(store: &S, draft: ProfileDraft) -> CommandResult<CommandOutcome> {
    if store.exists(&draft.profile_name) {
        return Err(CommandError::AlreadyExists(draft.profile_name));
    }
    save_validated(store, draft)
}

/// Wizard, preview, then write.
pub fn create_profile<S: ProfileStorage, T: WizardTerminal>(
    store: &S,
    terminal: &mut T,
    default_name: &str,
) -> CommandResult<CommandOutcome> {
    let session = WizardSession::with_default_name(None, default_name);
    let FormResult::Completed(draft) = FormEngine::from_session(session).run(terminal)? else {
        return Ok(CommandOutcome::Cancelled);
    };
    if run_confirmation(&draft, terminal)?.is_cancelled() {
        return Ok(CommandOutcome::Cancelled);
    }
    save_new(store, draft)
}

/// Creates a profile straight from command-line flags.
pub fn create_from_options<S: ProfileStorage>(
    store: &S,
    options: CreateOptions,
    default_name: &str,
) -> CommandResult<CommandOutcome> {
    let draft = options.into_draft(default_name)?;
    save_new(store, draft)
}

/// Re-runs the wizard seeded with `name`. Changing the profile name moves the
/// profile: the new record is written first, then the old one is deleted. A
/// failed delete does not undo the save; it is reported as
/// [`CommandOutcome::SavedWithLeftover`].
pub fn edit_profile<S: ProfileStorage, T: WizardTerminal>(
    store: &S,
    terminal: &mut T,
    name: &str,
) -> CommandResult<CommandOutcome> {
    let existing = store.read(name)?;
    let session = WizardSession::with_default_name(Some(&existing), name);
    let FormResult::Completed(mut draft) = FormEngine::from_session(session).run(terminal)?
    else {
        return Ok(CommandOutcome::Cancelled);
    };
    draft.created_at = existing.created_at.clone();
    if run_confirmation(&draft, terminal)?.is_cancelled() {
        return Ok(CommandOutcome::Cancelled);
    }

    if draft.profile_name == name {
        return save_validated(store, draft);
    }
    let outcome = save_new(store, draft)?;
    if let Err(err) = store.delete(name) {
        warn!(from = name, error = %err, "renamed profile saved, old record left behind");
        return Ok(match outcome {
            CommandOutcome::Saved { name: renamed, path } => CommandOutcome::SavedWithLeftover {
                name: renamed,
                path,
                leftover: name.to_string(),
            },
            other => other,
        });
    }
    info!(from = name, "profile renamed");
    Ok(outcome)
}

/// One line of `list` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileListing {
    Loaded(ProfileDraft),
    Unreadable { name: String, reason: String },
}

impl ProfileListing {
    pub fn name(&self) -> &str {
        match self {
            ProfileListing::Loaded(draft) => &draft.profile_name,
            ProfileListing::Unreadable { name, .. } => name,
        }
    }
}

/// Loads every stored profile; records that fail to load become
/// [`ProfileListing::Unreadable`] instead of aborting the listing.
pub fn list_profiles<S: ProfileStorage>(store: &S) -> CommandResult<Vec<ProfileListing>> {
    let names = store.list()?;
    Ok(names
        .into_iter()
        .map(|name| match store.read(&name) {
            Ok(mut draft) => {
                if draft.profile_name.is_empty() {
                    draft.profile_name = name;
                }
                ProfileListing::Loaded(draft)
            }
            Err(err) => ProfileListing::Unreadable {
                name,
                reason: err.to_string(),
            },
        })
        .collect())
}

pub fn format_profile_table(listings: &[ProfileListing]) -> String {
    let header = ["PROFILE", "TYPE", "SERVER", "COMPANY", "CREATED"].map(String::from);
    let mut rows = vec![header];
    for listing in listings {
        rows.push(match listing {
            ProfileListing::Loaded(draft) => [
                draft.profile_name.clone(),
                draft.profile_type.clone(),
                draft.server_name.clone(),
                draft.company.clone(),
                draft.created_at.chars().take(CREATED_COLUMN_WIDTH).collect(),
            ],
            ProfileListing::Unreadable { name, .. } => [
                name.clone(),
                "[error]".into(),
                "-".into(),
                "-".into(),
                "-".into(),
            ],
        });
    }

    let mut widths = [0usize; 5];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in &rows {
        let mut line = String::new();
        for (index, (cell, width)) in row.iter().zip(widths).enumerate() {
            if index + 1 == row.len() {
                line.push_str(cell);
            } else {
                let _ = write!(line, "{:<width$}  ", cell, width = width);
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

pub fn show_profile<S: ProfileStorage>(store: &S, name: &str) -> CommandResult<String> {
    let draft = store.read(name)?;
    Ok(format_profile_details(name, &draft))
}

pub fn format_profile_details(name: &str, draft: &ProfileDraft) -> String {
    let mut out = format!("Profile: {name}\n\n");
    for (label, value) in preview_rows(draft) {
        if label == "Users" {
            continue;
        }
        let _ = writeln!(out, "  {:<14}{}", format!("{label}:"), value);
    }
    if draft.users.is_empty() {
        let _ = writeln!(out, "  {:<14}{}", "Users:", format_users(&draft.users));
    } else {
        out.push_str("  Users:\n");
        for user in &draft.users {
            let _ = writeln!(out, "    - {user}");
        }
    }
    out
}

/// Deletes `name` once `confirm` agrees. A missing profile fails before the
/// question is asked.
pub fn delete_profile<S, F>(store: &S, name: &str, confirm: F) -> CommandResult<CommandOutcome>
where
    S: ProfileStorage,
    F: FnOnce(&str) -> CommandResult<bool>,
{
    if !store.exists(name) {
        return Err(ProfileError::not_found(name).into());
    }
    if !confirm(name)? {
        return Ok(CommandOutcome::Cancelled);
    }
    store.delete(name)?;
    Ok(CommandOutcome::Deleted {
        name: name.to_string(),
    })
}

pub const CONFIG_KEYS: [&str; 3] = ["profilesDir", "defaultProfileName", "color"];

pub fn format_config(config: &Config) -> String {
    let profiles_dir = config
        .profiles_dir
        .as_ref()
        .map(|dir| dir.display().to_string())
        .unwrap_or_else(|| "(default)".to_string());
    let mut out = String::new();
    let _ = writeln!(out, "  {:<20}{}", "profilesDir:", profiles_dir);
    let _ = writeln!(out, "  {:<20}{}", "defaultProfileName:", config.default_profile_name);
    let _ = writeln!(out, "  {:<20}{}", "color:", if config.color { "on" } else { "off" });
    out
}

/// Applies `config set <key> <value>`. An empty `profilesDir` clears the
/// override.
pub fn set_config_value(config: &mut Config, key: &str, value: &str) -> CommandResult<()> {
    let value = value.trim();
    match key {
        "profilesDir" | "profiles_dir" => {
            config.profiles_dir = (!value.is_empty()).then(|| PathBuf::from(value));
        }
        "defaultProfileName" | "default_profile_name" => {
            if !is_valid_profile_name(value) {
                return Err(CommandError::InvalidArguments(format!(
                    "`{value}` is not a valid profile name"
                )));
            }
            config.default_profile_name = value.to_string();
        }
        "color" => {
            config.color = match value.to_ascii_lowercase().as_str() {
                "on" | "true" | "yes" => true,
                "off" | "false" | "no" => false,
                _ => {
                    return Err(CommandError::InvalidArguments(
                        "color must be on or off".into(),
                    ))
                }
            };
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown config key `{other}` (expected one of: {})",
                CONFIG_KEYS.join(", ")
            )))
        }
    }
    info!(key, "config value updated");
    Ok(())
}

/// Yes/no question on the terminal, defaulting to no.
pub fn confirm_deletion(name: &str) -> CommandResult<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Are you sure you want to delete profile '{name}'?"))
        .default(false)
        .interact()
        .map_err(CommandError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ui::prompts::KeyInput;
    use crate::profile::ProfileType;
    use crate::storage::JsonProfileStore;
    use std::collections::VecDeque;
    use tempfile::tempdir;

    struct ScriptedTerminal {
        keys: VecDeque<KeyInput>,
    }

    impl ScriptedTerminal {
        fn new(script: &[&str]) -> Self {
            let mut keys = VecDeque::new();
            for token in script {
                match *token {
                    "ENTER" => keys.push_back(KeyInput::Enter),
                    "DOWN" => keys.push_back(KeyInput::Down),
                    "RIGHT" => keys.push_back(KeyInput::Right),
                    "CTRL_D" => keys.push_back(KeyInput::CtrlD),
                    "ESC" => keys.push_back(KeyInput::Esc),
                    "BS" => keys.push_back(KeyInput::Backspace),
                    text => keys.extend(text.chars().map(KeyInput::Char)),
                }
            }
            Self { keys }
        }
    }

    impl WizardTerminal for ScriptedTerminal {
        fn draw(&mut self, _frame: &str) -> io::Result<()> {
            Ok(())
        }

        fn next_key(&mut self) -> io::Result<KeyInput> {
            Ok(self.keys.pop_front().unwrap_or(KeyInput::CtrlC))
        }
    }

    fn store() -> (tempfile::TempDir, JsonProfileStore) {
        let dir = tempdir().unwrap();
        let store = JsonProfileStore::new(dir.path().join("profiles"));
        (dir, store)
    }

    #[test]
    fn wizard_create_writes_confirmed_draft() {
        let (_dir, store) = store();
        let mut terminal = ScriptedTerminal::new(&[
            "ENTER", "web-01", "ENTER", "alpha", "ENTER", "Acme", "ENTER", "bob", "ENTER",
            "CTRL_D", "ENTER",
        ]);
        let outcome = create_profile(&store, &mut terminal, "default").unwrap();
        assert!(matches!(outcome, CommandOutcome::Saved { ref name, .. } if name == "alpha"));
        let saved = store.read("alpha").unwrap();
        assert_eq!(saved.profile_type, "classic");
        assert_eq!(saved.company, "Acme");
        assert_eq!(saved.users, vec!["bob"]);
        assert!(!saved.created_at.is_empty());
    }

    #[test]
    fn declining_the_preview_writes_nothing() {
        let (_dir, store) = store();
        let mut terminal = ScriptedTerminal::new(&[
            "ENTER", "web-01", "ENTER", "ENTER", "ENTER", "CTRL_D", "RIGHT", "ENTER",
        ]);
        let outcome = create_profile(&store, &mut terminal, "default").unwrap();
        assert_eq!(outcome, CommandOutcome::Cancelled);
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn cancelled_wizard_writes_nothing() {
        let (_dir, store) = store();
        let mut terminal = ScriptedTerminal::new(&["ENTER", "web", "ESC"]);
        let outcome = create_profile(&store, &mut terminal, "default").unwrap();
        assert_eq!(outcome, CommandOutcome::Cancelled);
        assert!(!store.root().exists());
    }

    #[test]
    fn duplicate_users_block_the_save() {
        let (_dir, store) = store();
        let draft = ProfileDraft::new(ProfileType::Classic, "web-01", "alpha")
            .with_users(["bob", "BOB"]);
        let err = save_validated(&store, draft).unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Duplicate user 'BOB'");
        assert!(!store.exists("alpha"));
    }

    #[test]
    fn wizard_duplicate_is_fixed_before_the_preview() {
        let (_dir, store) = store();
        let mut terminal = ScriptedTerminal::new(&[
            "ENTER", "web-01", "ENTER", "ENTER", "ENTER", "bob", "ENTER", "BOB", "CTRL_D", "BS",
            "CTRL_D", "ENTER",
        ]);
        let outcome = create_profile(&store, &mut terminal, "default").unwrap();
        assert!(matches!(outcome, CommandOutcome::Saved { ref name, .. } if name == "default"));
        assert_eq!(store.read("default").unwrap().users, vec!["bob"]);
    }

    #[test]
    fn create_refuses_to_overwrite() {
        let (_dir, store) = store();
        let options = CreateOptions {
            profile_type: Some("classic".into()),
            server_name: Some("web-01".into()),
            ..CreateOptions::default()
        };
        create_from_options(&store, options.clone(), "default").unwrap();
        let err = create_from_options(&store, options, "default").unwrap_err();
        assert!(matches!(err, CommandError::AlreadyExists(name) if name == "default"));
    }

    #[test]
    fn options_normalize_type_and_default_name() {
        let draft = CreateOptions {
            profile_type: Some(" IA ".into()),
            server_name: Some("db-01".into()),
            users: parse_user_list("root, admin,,"),
            ..CreateOptions::default()
        }
        .into_draft("main")
        .unwrap();
        assert_eq!(draft.profile_type, "ia");
        assert_eq!(draft.profile_name, "main");
        assert_eq!(draft.users, vec!["root", "admin"]);
    }

    #[test]
    fn options_require_type_and_server_name() {
        let err = CreateOptions {
            server_name: Some("db-01".into()),
            ..CreateOptions::default()
        }
        .into_draft("default")
        .unwrap_err();
        assert_eq!(err.to_string(), "--type is required in non-interactive mode");

        let err = CreateOptions {
            profile_type: Some("ia".into()),
            ..CreateOptions::default()
        }
        .into_draft("default")
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "--server-name is required in non-interactive mode"
        );
    }

    #[test]
    fn edit_keeps_created_at() {
        let (_dir, store) = store();
        let mut draft = ProfileDraft::new(ProfileType::Classic, "web-01", "alpha");
        draft.created_at = "2024-01-01T00:00:00+00:00".into();
        store.write(&mut draft).unwrap();

        let mut terminal = ScriptedTerminal::new(&[
            "DOWN", "ENTER", "ENTER", "ENTER", "Acme", "ENTER", "CTRL_D", "ENTER",
        ]);
        edit_profile(&store, &mut terminal, "alpha").unwrap();
        let saved = store.read("alpha").unwrap();
        assert_eq!(saved.profile_type, "ia");
        assert_eq!(saved.company, "Acme");
        assert_eq!(saved.created_at, "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn edit_with_new_name_moves_the_profile() {
        let (_dir, store) = store();
        let mut draft = ProfileDraft::new(ProfileType::Classic, "web-01", "alpha");
        store.write(&mut draft).unwrap();

        let mut terminal = ScriptedTerminal::new(&[
            "ENTER", "ENTER", "BS", "BS", "BS", "BS", "BS", "beta", "ENTER", "ENTER", "CTRL_D",
            "ENTER",
        ]);
        let outcome = edit_profile(&store, &mut terminal, "alpha").unwrap();
        assert!(matches!(outcome, CommandOutcome::Saved { ref name, .. } if name == "beta"));
        assert_eq!(store.list().unwrap(), vec!["beta"]);
        assert_eq!(store.read("beta").unwrap().created_at, draft.created_at);
    }

    /// Store whose deletes always fail, for the half-finished rename path.
    struct UndeletableStore(JsonProfileStore);

    impl ProfileStorage for UndeletableStore {
        fn write(&self, draft: &mut ProfileDraft) -> crate::errors::Result<PathBuf> {
            self.0.write(draft)
        }

        fn read(&self, name: &str) -> crate::errors::Result<ProfileDraft> {
            self.0.read(name)
        }

        fn list(&self) -> crate::errors::Result<Vec<String>> {
            self.0.list()
        }

        fn delete(&self, name: &str) -> crate::errors::Result<()> {
            Err(ProfileError::io(
                crate::errors::Operation::Delete,
                name,
                io::Error::from(io::ErrorKind::PermissionDenied),
            ))
        }

        fn exists(&self, name: &str) -> bool {
            self.0.exists(name)
        }
    }

    #[test]
    fn rename_reports_leftover_when_old_record_stays() {
        let (_dir, inner) = store();
        let store = UndeletableStore(inner);
        let mut draft = ProfileDraft::new(ProfileType::Classic, "web-01", "alpha");
        store.write(&mut draft).unwrap();

        let mut terminal = ScriptedTerminal::new(&[
            "ENTER", "ENTER", "BS", "BS", "BS", "BS", "BS", "beta", "ENTER", "ENTER", "CTRL_D",
            "ENTER",
        ]);
        let outcome = edit_profile(&store, &mut terminal, "alpha").unwrap();
        match outcome {
            CommandOutcome::SavedWithLeftover { name, leftover, .. } => {
                assert_eq!(name, "beta");
                assert_eq!(leftover, "alpha");
            }
            other => panic!("Unexpected outcome: {:?}", other),
        }
        assert_eq!(store.list().unwrap(), vec!["alpha", "beta"]);
    }

    #[test]
    fn config_values_are_parsed_and_checked() {
        let mut config = Config::default();
        set_config_value(&mut config, "defaultProfileName", " main ").unwrap();
        set_config_value(&mut config, "color", "OFF").unwrap();
        set_config_value(&mut config, "profilesDir", "/srv/otori").unwrap();
        assert_eq!(config.default_profile_name, "main");
        assert!(!config.color);
        assert_eq!(config.profiles_dir, Some(PathBuf::from("/srv/otori")));

        set_config_value(&mut config, "profilesDir", "").unwrap();
        assert_eq!(config.profiles_dir, None);

        assert!(set_config_value(&mut config, "defaultProfileName", "bad name").is_err());
        assert!(set_config_value(&mut config, "color", "maybe").is_err());
        let err = set_config_value(&mut config, "theme", "dark").unwrap_err();
        assert!(err.to_string().contains("unknown config key `theme`"));
        assert_eq!(config.default_profile_name, "main");
    }

    #[test]
    fn config_listing_shows_every_key() {
        let text = format_config(&Config::default());
        assert!(text.contains("profilesDir:        (default)"));
        assert!(text.contains("defaultProfileName: default"));
        assert!(text.contains("color:              on"));
    }

    #[test]
    fn edit_missing_profile_is_not_found() {
        let (_dir, store) = store();
        let mut terminal = ScriptedTerminal::new(&[]);
        let err = edit_profile(&store, &mut terminal, "ghost").unwrap_err();
        assert!(matches!(
            err,
            CommandError::Profile(ProfileError::NotFound { .. })
        ));
    }

    #[test]
    fn listing_reports_unreadable_records() {
        let (_dir, store) = store();
        let mut draft = ProfileDraft::new(ProfileType::Ia, "db-01", "alpha");
        store.write(&mut draft).unwrap();
        std::fs::write(store.legacy_record_path("broken"), "{ not json").unwrap();

        let listings = list_profiles(&store).unwrap();
        assert_eq!(listings.len(), 2);
        assert!(matches!(listings[0], ProfileListing::Loaded(_)));
        assert!(matches!(listings[1], ProfileListing::Unreadable { .. }));

        let table = format_profile_table(&listings);
        let lines: Vec<_> = table.lines().collect();
        assert!(lines[0].starts_with("PROFILE"));
        assert!(lines[1].starts_with("alpha"));
        assert!(lines[1].contains("db-01"));
        assert!(lines[2].starts_with("broken"));
        assert!(lines[2].contains("[error]"));
    }

    #[test]
    fn created_column_is_truncated() {
        let mut draft = ProfileDraft::new(ProfileType::Ia, "db-01", "alpha");
        draft.created_at = "2024-05-01T10:00:00+02:00".into();
        let table = format_profile_table(&[ProfileListing::Loaded(draft)]);
        assert!(table.contains("2024-05-01T10:00"));
        assert!(!table.contains("10:00:00"));
    }

    #[test]
    fn details_list_users_one_per_line() {
        let draft = ProfileDraft::new(ProfileType::Classic, "web-01", "alpha")
            .with_users(["root", "admin"]);
        let text = format_profile_details("alpha", &draft);
        assert!(text.starts_with("Profile: alpha"));
        assert!(text.contains("  Server name:  web-01"));
        assert!(text.contains("    - root\n    - admin"));

        let empty = ProfileDraft::new(ProfileType::Classic, "web-01", "alpha");
        assert!(format_profile_details("alpha", &empty).contains("Users:        (none)"));
    }

    #[test]
    fn delete_asks_before_removing() {
        let (_dir, store) = store();
        let mut draft = ProfileDraft::new(ProfileType::Classic, "web-01", "alpha");
        store.write(&mut draft).unwrap();

        let outcome = delete_profile(&store, "alpha", |_| Ok(false)).unwrap();
        assert_eq!(outcome, CommandOutcome::Cancelled);
        assert!(store.exists("alpha"));

        let outcome = delete_profile(&store, "alpha", |_| Ok(true)).unwrap();
        assert_eq!(
            outcome,
            CommandOutcome::Deleted {
                name: "alpha".into()
            }
        );
        assert!(!store.exists("alpha"));
    }

    #[test]
    fn delete_missing_profile_never_asks() {
        let (_dir, store) = store();
        let err = delete_profile(&store, "ghost", |_| panic!("asked")).unwrap_err();
        assert!(matches!(
            err,
            CommandError::Profile(ProfileError::NotFound { .. })
        ));
    }
}
