use std::{collections::HashSet, fmt};

use super::{ProfileDraft, ProfileType};

pub const FIELD_TYPE: &str = "type";
pub const FIELD_SERVER_NAME: &str = "serverName";
pub const FIELD_PROFILE_NAME: &str = "profileName";
pub const FIELD_COMPANY: &str = "company";
pub const FIELD_USERS: &str = "users";

const MIN_SERVER_NAME_LEN: usize = 3;
const MAX_PROFILE_NAME_LEN: usize = 100;

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Checks every rule against the draft and returns all failures.
pub fn validate(draft: &ProfileDraft) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (field, value) in [
        (FIELD_TYPE, draft.profile_type.as_str()),
        (FIELD_SERVER_NAME, draft.server_name.as_str()),
        (FIELD_PROFILE_NAME, draft.profile_name.as_str()),
    ] {
        if let Err(err) = validate_field(field, value) {
            errors.push(err);
        }
    }
    errors.extend(validate_users(&draft.users));
    errors
}

/// Applies the rule for a single scalar field. Fields without rules always pass.
pub fn validate_field(field: &str, value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    let message = match field {
        FIELD_TYPE if value.is_empty() => Some("Type is required".to_string()),
        FIELD_TYPE if value.parse::<ProfileType>().is_err() => {
            Some("Type must be 'classic' or 'ia'".to_string())
        }
        FIELD_SERVER_NAME if value.is_empty() => Some("Server name is required".to_string()),
        FIELD_SERVER_NAME if value.chars().count() < MIN_SERVER_NAME_LEN => Some(format!(
            "Server name must be at least {MIN_SERVER_NAME_LEN} characters"
        )),
        FIELD_PROFILE_NAME if value.is_empty() => Some("Profile name is required".to_string()),
        FIELD_PROFILE_NAME if !is_valid_profile_name(value) => Some(
            "Profile name must contain only letters, digits, hyphens and underscores (max 100)"
                .to_string(),
        ),
        _ => None,
    };
    match message {
        Some(message) => Err(ValidationError::new(field, message)),
        None => Ok(()),
    }
}

/// `^[A-Za-z0-9_-]{1,100}$`
pub fn is_valid_profile_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_PROFILE_NAME_LEN
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}

/// One error per entry that repeats an earlier one, compared trimmed and
/// case-insensitively.
pub fn validate_users(users: &[String]) -> Vec<ValidationError> {
    let mut seen = HashSet::new();
    let mut errors = Vec::new();
    for user in users {
        let key = user.trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        if !seen.insert(key) {
            errors.push(ValidationError::new(
                FIELD_USERS,
                format!("Duplicate user '{}'", user),
            ));
        }
    }
    errors
}
